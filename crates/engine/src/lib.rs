//! Core neighbor discovery engine: interface binder, beacon sender/receiver
//! activities, and the neighbor table they maintain.

pub mod addr;
pub mod beacon;
mod engine;
pub mod error;
pub mod neighbor;
mod receiver;
mod sender;
pub mod timing;
pub mod transport;

pub use addr::{AddrParseError, Address};
pub use beacon::{Beacon, BEACON_LEN, BEACON_TYPE};
pub use engine::{Engine, Status, DEFAULT_INTERFACE};
pub use error::Error;
pub use neighbor::{Neighbor, Table, MAX_RECORDED, TABLE_LEN};
pub use timing::Timing;
pub use transport::{InterfaceInfo, RawSocketTransport, Transport};
