//! The receiver activity: observes beacons and ages the table on its
//! own thread.

use crate::beacon::Beacon;
use crate::neighbor::Table;
use crate::timing::Timing;
use crate::transport::Transport;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

/// Runs until `active` is cleared. Each tick performs a non-blocking receive
/// and, once `timing.aging_interval` has elapsed, one aging pass over the
/// table.
pub(crate) fn run<T: Transport>(
    transport: T,
    active: Arc<AtomicBool>,
    table: Arc<Mutex<Table>>,
    timing: Timing,
) {
    let mut elapsed = Duration::ZERO;

    while active.load(Ordering::Acquire) {
        match transport.recv_nonblocking() {
            Ok(Some(frame)) => {
                if let Some(beacon) = Beacon::decode(&frame) {
                    table.lock().record_arrival(beacon.source);
                    log::trace!("ndp receiver: beacon from {}", beacon.source);
                }
            }
            Ok(None) => {}
            Err(error) => log::trace!("ndp receiver: recv failed: {error}"),
        }

        if elapsed >= timing.aging_interval {
            table.lock().age();
            elapsed = Duration::ZERO;
        }

        thread::sleep(timing.recv_tick);
        elapsed += timing.recv_tick;
    }
}
