//! End-to-end engine scenarios driven by a fake transport.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use ndp_engine::{Address, Beacon, Engine, Error, InterfaceInfo, Timing, Transport, BEACON_LEN};

#[derive(Clone, Default)]
struct FakeTransport {
    inbound: Arc<Mutex<VecDeque<[u8; BEACON_LEN]>>>,
    outbound: Arc<Mutex<Vec<[u8; BEACON_LEN]>>>,
}

impl FakeTransport {
    fn push_inbound(&self, frame: [u8; BEACON_LEN]) {
        self.inbound.lock().unwrap().push_back(frame);
    }

    fn sent_frames(&self) -> Vec<[u8; BEACON_LEN]> {
        self.outbound.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    fn send(&self, frame: &[u8; BEACON_LEN]) -> io::Result<()> {
        self.outbound.lock().unwrap().push(*frame);
        Ok(())
    }

    fn recv_nonblocking(&self) -> io::Result<Option<[u8; BEACON_LEN]>> {
        Ok(self.inbound.lock().unwrap().pop_front())
    }
}

fn addr(last: u8) -> Address {
    Address::from_octets([0xAA, 0xBB, 0xCC, 0, 0, last])
}

fn fast_timing() -> Timing {
    Timing {
        send_tick: Duration::from_millis(2),
        send_interval: Duration::from_millis(10),
        stress_delay: Duration::from_millis(2),
        recv_tick: Duration::from_millis(2),
        aging_interval: Duration::from_millis(15),
    }
}

fn local_info() -> InterfaceInfo {
    InterfaceInfo {
        index: 1,
        addr: addr(1),
        mtu: 1500,
    }
}

fn engine_with(transport: FakeTransport) -> Engine<FakeTransport> {
    Engine::with_transport("fake0", fast_timing(), transport, local_info())
}

#[test]
fn empty_start_keeps_table_empty() {
    let transport = FakeTransport::default();
    let mut engine = engine_with(transport);

    engine.start();
    thread::sleep(Duration::from_millis(40));

    assert!(engine.table().is_empty());
    engine.stop();
}

#[test]
fn reconfirmed_peer_survives_indefinitely() {
    let transport = FakeTransport::default();
    let peer = addr(42);
    transport.push_inbound(Beacon::from_source(peer).encode());

    let mut engine = engine_with(transport.clone());
    engine.start();

    // Re-confirm the peer faster than the aging cadence, several windows in
    // a row; it must never be evicted.
    for _ in 0..6 {
        thread::sleep(Duration::from_millis(8));
        transport.push_inbound(Beacon::from_source(peer).encode());
    }
    thread::sleep(Duration::from_millis(20));

    assert!(engine.table().get(peer).is_some());
    engine.stop();
}

#[test]
fn silent_peer_is_eventually_evicted() {
    let transport = FakeTransport::default();
    let peer = addr(7);
    transport.push_inbound(Beacon::from_source(peer).encode());

    let mut engine = engine_with(transport);
    engine.start();

    // One beacon, then silence through many aging windows: the neighbor
    // must eventually disappear.
    thread::sleep(Duration::from_millis(15 * 9));

    assert!(engine.table().get(peer).is_none());
    assert!(engine.table().is_empty());
    engine.stop();
}

#[test]
fn thirty_third_peer_is_dropped_not_evicting_an_existing_one() {
    let transport = FakeTransport::default();
    for last in 0..33u8 {
        transport.push_inbound(Beacon::from_source(addr(last)).encode());
    }

    let mut engine = engine_with(transport);
    engine.start();
    thread::sleep(Duration::from_millis(60));

    let table = engine.table();
    assert_eq!(table.len(), 32);
    for last in 0..32u8 {
        assert!(table.get(addr(last)).is_some(), "peer {last} missing");
    }
    assert!(table.get(addr(32)).is_none(), "33rd peer should be dropped");
    drop(table);
    engine.stop();
}

#[test]
fn stress_mode_emits_high_rate_randomized_beacons() {
    let transport = FakeTransport::default();
    let mut engine = engine_with(transport.clone());

    engine.set_stress(true);
    engine.start();
    thread::sleep(Duration::from_millis(50));
    engine.stop();

    let sent = transport.sent_frames();
    assert!(sent.len() > 5, "expected several stress beacons, got {}", sent.len());

    let decoded: Vec<_> = sent.iter().map(|f| Beacon::decode(f).unwrap()).collect();
    assert!(decoded.iter().all(|b| b.target == Address::from_octets([0xFF; 6])));

    let distinct_sources = decoded
        .iter()
        .map(|b| b.source)
        .collect::<std::collections::HashSet<_>>()
        .len();
    assert!(distinct_sources > 1, "stress mode should randomize source octets");
}

#[test]
fn normal_mode_keeps_the_real_source_address() {
    let transport = FakeTransport::default();
    let info = local_info();
    let mut engine = engine_with(transport.clone());
    engine.start();

    thread::sleep(Duration::from_millis(25));
    engine.stop();

    let sent = transport.sent_frames();
    assert!(!sent.is_empty());
    for frame in &sent {
        let beacon = Beacon::decode(frame).unwrap();
        assert_eq!(beacon.source, info.addr);
    }
}

#[test]
fn binder_failure_surfaces_closed_taxonomy_message() {
    let engine: Engine<FakeTransport> =
        Engine::with_binder("fake0", fast_timing(), |_| Err(Error::GetIfIndex));

    assert_eq!(engine.error(), Error::GetIfIndex);
    assert_eq!(engine.error().code(), 2);
    assert_eq!(
        engine.error().to_string(),
        "Failed to retrieve the interface index"
    );
    assert!(!engine.status().active);
}

#[test]
fn start_is_a_no_op_when_binder_failed() {
    let mut engine: Engine<FakeTransport> =
        Engine::with_binder("fake0", fast_timing(), |_| Err(Error::OpenSock));

    engine.start();
    assert!(!engine.status().active);
}
