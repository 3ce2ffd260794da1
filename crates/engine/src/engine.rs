//! Lifecycle control: create/start/stop/destroy, the table lock, and
//! the status/error observation surfaces exposed to the UI collaborator.

use crate::addr::Address;
use crate::error::Error;
use crate::neighbor::Table;
use crate::receiver;
use crate::sender;
use crate::timing::Timing;
use crate::transport::{InterfaceInfo, RawSocketTransport, Transport};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::{Mutex, MutexGuard};

/// The default interface name used when the caller supplies an empty one.
pub const DEFAULT_INTERFACE: &str = "ra0";

/// A point-in-time snapshot of the engine's status fields, safe
/// to read without the table lock.
#[derive(Debug, Clone, Copy)]
pub struct Status {
    pub interface_index: i32,
    pub mtu: i32,
    pub local_addr: Address,
    pub error: Error,
    pub active: bool,
    pub stress: bool,
}

/// The neighbor discovery engine.
///
/// `T` is the transport used for link-layer I/O; it defaults to
/// [`RawSocketTransport`] for production use and can be swapped for a fake
/// in tests via [`Engine::with_transport`] / [`Engine::with_binder`].
pub struct Engine<T: Transport + Clone = RawSocketTransport> {
    interface: String,
    transport: Option<T>,
    info: Option<InterfaceInfo>,
    error: Error,
    active: Arc<AtomicBool>,
    stress: Arc<AtomicBool>,
    table: Arc<Mutex<Table>>,
    timing: Timing,
    sender: Option<JoinHandle<()>>,
    receiver: Option<JoinHandle<()>>,
}

fn normalize_interface(interface: String) -> String {
    if interface.is_empty() {
        DEFAULT_INTERFACE.to_string()
    } else {
        interface
    }
}

impl Engine<RawSocketTransport> {
    /// Creates the engine against a real interface: runs the
    /// interface binder. An empty name means [`DEFAULT_INTERFACE`].
    pub fn new(interface: impl Into<String>) -> Self {
        Self::with_binder(interface, Timing::default(), RawSocketTransport::bind)
    }
}

impl<T: Transport + Clone> Engine<T> {
    /// Creates the engine using a caller-supplied binder function. Used by
    /// [`Engine::new`] for the real raw-socket binder, and directly by tests
    /// to inject a fake transport or simulate a binder failure.
    pub fn with_binder(
        interface: impl Into<String>,
        timing: Timing,
        bind: impl FnOnce(&str) -> Result<(T, InterfaceInfo), Error>,
    ) -> Self {
        let interface = normalize_interface(interface.into());

        let (transport, info, error) = match bind(&interface) {
            Ok((transport, info)) => (Some(transport), Some(info), Error::None),
            Err(error) => {
                log::warn!("ndp engine: binder failed on {interface}: {error}");
                (None, None, error)
            }
        };

        Self {
            interface,
            transport,
            info,
            error,
            active: Arc::new(AtomicBool::new(false)),
            stress: Arc::new(AtomicBool::new(false)),
            table: Arc::new(Mutex::new(Table::new())),
            timing,
            sender: None,
            receiver: None,
        }
    }

    /// Creates the engine around an already-bound transport, skipping the
    /// binder entirely. Primarily for tests.
    pub fn with_transport(
        interface: impl Into<String>,
        timing: Timing,
        transport: T,
        info: InterfaceInfo,
    ) -> Self {
        Self::with_binder(interface, timing, move |_| Ok((transport, info)))
    }

    /// Starts the engine.
    ///
    /// No-op if a binder error is set or the engine is already active.
    pub fn start(&mut self) {
        if self.error != Error::None || self.active.load(Ordering::Acquire) {
            return;
        }

        let Some(transport) = self.transport.clone() else {
            return;
        };
        let Some(info) = self.info else {
            return;
        };

        self.active.store(true, Ordering::Release);

        let sender_handle = {
            let transport = transport.clone();
            let active = self.active.clone();
            let stress = self.stress.clone();
            let timing = self.timing;
            let local = info.addr;
            std::thread::spawn(move || sender::run(transport, active, stress, local, timing))
        };

        let receiver_handle = {
            let active = self.active.clone();
            let table = self.table.clone();
            let timing = self.timing;
            std::thread::spawn(move || receiver::run(transport, active, table, timing))
        };

        self.sender = Some(sender_handle);
        self.receiver = Some(receiver_handle);

        log::info!(
            "ndp engine started on {} (index={}, mtu={}, addr={})",
            self.interface,
            info.index,
            info.mtu,
            info.addr
        );
    }

    /// Stops the engine: signals both activities, joins them,
    /// and clears the table. No-op if the engine is not active.
    pub fn stop(&mut self) {
        if !self.active.load(Ordering::Acquire) {
            return;
        }

        self.active.store(false, Ordering::Release);

        if let Some(handle) = self.sender.take() {
            let _ = handle.join();
        }
        if let Some(handle) = self.receiver.take() {
            let _ = handle.join();
        }

        self.table.lock().clear();

        log::info!("ndp engine stopped on {}", self.interface);
    }

    /// Destroys the engine: stops it if still active, then
    /// drops the transport, closing the underlying socket.
    pub fn destroy(self) {
        // Dropping `self` runs `Engine`'s `Drop` impl, which stops the
        // engine if needed; the transport closes its socket when its last
        // clone is dropped.
    }

    /// Acquires the table lock. Before the engine is started there is
    /// no contention, so this is effectively free even though it always
    /// takes the real lock; the table is simply always empty at that point.
    pub fn table(&self) -> MutexGuard<'_, Table> {
        self.table.lock()
    }

    /// A snapshot of the status fields observable without the table lock.
    pub fn status(&self) -> Status {
        let info = self.info.unwrap_or(InterfaceInfo {
            index: 0,
            addr: Address::default(),
            mtu: 0,
        });

        Status {
            interface_index: info.index,
            mtu: info.mtu,
            local_addr: info.addr,
            error: self.error,
            active: self.active.load(Ordering::Acquire),
            stress: self.stress.load(Ordering::Relaxed),
        }
    }

    pub fn interface_name(&self) -> &str {
        &self.interface
    }

    pub fn error(&self) -> Error {
        self.error
    }

    /// Toggles stress mode. Read by the sender with no ordering
    /// stronger than eventual.
    pub fn set_stress(&self, enabled: bool) {
        self.stress.store(enabled, Ordering::Relaxed);
    }

    pub fn stress(&self) -> bool {
        self.stress.load(Ordering::Relaxed)
    }
}

impl<T: Transport + Clone> Drop for Engine<T> {
    fn drop(&mut self) {
        self.stop();
    }
}
