use std::time::Duration;

/// Tunable cadence for the sender and receiver activities.
///
/// The defaults match real-world timing (a ~3s beacon interval, ~5s aging
/// window). Tests override these to exercise the scheduling logic without
/// waiting on the real-world cadence.
#[derive(Debug, Clone, Copy)]
pub struct Timing {
    /// Sender poll-sleep tick (~10 ms).
    pub send_tick: Duration,
    /// Normal-mode beacon interval (~3 s).
    pub send_interval: Duration,
    /// Per-frame delay between stress-mode beacons (~10 ms).
    pub stress_delay: Duration,
    /// Receiver poll-sleep tick (~9 ms).
    pub recv_tick: Duration,
    /// Aging pass interval (~5 s).
    pub aging_interval: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            send_tick: Duration::from_millis(10),
            send_interval: Duration::from_secs(3),
            stress_delay: Duration::from_millis(10),
            recv_tick: Duration::from_millis(9),
            aging_interval: Duration::from_secs(5),
        }
    }
}
