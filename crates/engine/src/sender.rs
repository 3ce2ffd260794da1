//! The sender activity: drives outbound beacons on its own thread.

use crate::addr::Address;
use crate::beacon::Beacon;
use crate::timing::Timing;
use crate::transport::Transport;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rand::Rng;

/// Runs until `active` is cleared. Normal mode emits one beacon every
/// `timing.send_interval`; stress mode emits one beacon with randomized
/// source octets every `timing.stress_delay`, restoring the real source
/// address afterward.
pub(crate) fn run<T: Transport>(
    transport: T,
    active: Arc<AtomicBool>,
    stress: Arc<AtomicBool>,
    local: Address,
    timing: Timing,
) {
    let mut rng = rand::rng();
    let mut elapsed = Duration::ZERO;

    while active.load(Ordering::Acquire) {
        if stress.load(Ordering::Relaxed) {
            let spoofed_octets = {
                let mut octets = local.octets();
                octets[3] = rng.random();
                octets[4] = rng.random();
                octets[5] = rng.random();
                octets
            };

            let frame = Beacon::from_source(Address::from_octets(spoofed_octets)).encode();
            if let Err(error) = transport.send(&frame) {
                log::trace!("ndp sender: stress beacon send failed: {error}");
            }

            thread::sleep(timing.stress_delay);
            continue;
        }

        if elapsed >= timing.send_interval {
            let frame = Beacon::from_source(local).encode();
            if let Err(error) = transport.send(&frame) {
                log::trace!("ndp sender: beacon send failed: {error}");
            }
            elapsed = Duration::ZERO;
        }

        thread::sleep(timing.send_tick);
        elapsed += timing.send_tick;
    }
}
