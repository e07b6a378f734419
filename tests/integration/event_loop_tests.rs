//! Full event loop: scripted and real-UDP datagram sources.

use std::net::UdpSocket;
use std::sync::atomic::AtomicBool;
use std::thread;

use keyfob_lights::adapters::hardware::HardwareAdapter;
use keyfob_lights::adapters::udp::UdpSource;
use keyfob_lights::app::events::{AppEvent, LoopStats};
use keyfob_lights::app::service::AppService;
use keyfob_lights::config::SystemConfig;
use keyfob_lights::error::Error;
use keyfob_lights::pins;

use crate::mock_hw::{MockOutputs, RecordingSink, ScriptedSource};

fn app() -> AppService {
    AppService::new(SystemConfig::default().button_map().unwrap())
}

#[test]
fn socket_fault_is_fatal_and_outputs_end_off() {
    let mut app = app();
    let mut hw = MockOutputs::new(4);
    let mut sink = RecordingSink::new();
    let mut source = ScriptedSource::new([br#"{"cmd": 3}"#.as_slice()]);

    let result = app.run(&mut source, &mut hw, &mut sink, &AtomicBool::new(false));

    assert!(matches!(result, Err(Error::Socket(_))));
    assert!(hw.lit().is_empty());
    assert!(matches!(sink.events.last(), Some(AppEvent::Stopped(_))));
}

#[test]
fn loop_survives_bad_datagrams() {
    let mut app = app();
    let mut hw = MockOutputs::new(4);
    let mut sink = RecordingSink::new();
    let mut source = ScriptedSource::new([
        &b"{broken"[..],
        &b""[..],
        &b"\xff\xfe"[..],
        &br#"{"id": 1}"#[..],
        &br#"<34>1 ts host app 1 - - {"cmd": 60}"#[..],
    ]);

    let _ = app.run(&mut source, &mut hw, &mut sink, &AtomicBool::new(false));

    let pressed: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Pressed { outputs, .. } => Some(outputs.lit().collect::<Vec<_>>()),
            _ => None,
        })
        .collect();
    assert_eq!(pressed, vec![vec![1, 2]]);
    assert_eq!(
        app.stats(),
        LoopStats {
            received: 5,
            pressed: 1,
            unresolved: 0,
            rejected: 4,
        }
    );
}

#[test]
fn empty_datagram_without_shutdown_is_just_rejected() {
    let mut app = app();
    let mut hw = MockOutputs::new(4);
    let mut sink = RecordingSink::new();
    let mut source = ScriptedSource::new([&b""[..], &br#"{"cmd": 48}"#[..]]);

    let _ = app.run(&mut source, &mut hw, &mut sink, &AtomicBool::new(false));
    assert_eq!(app.stats().rejected, 1);
    assert_eq!(app.stats().pressed, 1);
}

#[test]
fn udp_end_to_end_with_clean_shutdown() {
    let mut source = UdpSource::bind("127.0.0.1:0".parse().unwrap()).unwrap();
    let target = source.local_addr();
    let shutdown = source.shutdown_handle();
    let flag = shutdown.clone();

    let worker = thread::spawn(move || {
        let mut app = app();
        let mut hw = HardwareAdapter::simulated(&pins::INDICATOR_GPIOS);
        let mut sink = RecordingSink::new();
        let result = app.run(&mut source, &mut hw, &mut sink, flag.flag());
        (result.is_ok(), sink.events, hw.lit_pins())
    });

    let peer = UdpSocket::bind("127.0.0.1:0").unwrap();
    for datagram in [
        &br#"<34>1 2021-08-18T00:00:00Z host rtl_433 123 - - {"cmd": 3}"#[..],
        &br#"{"cmd": 15}"#[..],
        &b"not json at all"[..],
        &br#"{"cmd": 999}"#[..],
        &br#"{"cmd": 192}"#[..],
    ] {
        peer.send_to(datagram, target).unwrap();
    }
    shutdown.trigger().unwrap();

    let (clean, events, lit_after) = worker.join().unwrap();
    assert!(clean);
    assert!(lit_after.is_empty(), "outputs must be off after shutdown");

    let lit_per_press: Vec<Vec<usize>> = events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Pressed { outputs, .. } => Some(outputs.lit().collect()),
            _ => None,
        })
        .collect();
    assert_eq!(lit_per_press, vec![vec![0], vec![0, 1], vec![3]]);

    match events.last() {
        Some(AppEvent::Stopped(stats)) => {
            assert_eq!(stats.received, 5);
            assert_eq!(stats.rejected, 1);
            assert_eq!(stats.unresolved, 1);
        }
        other => panic!("expected Stopped, got {:?}", other),
    }
}

#[test]
fn shutdown_raised_during_startup_is_honoured() {
    // Signal arrives after the socket is bound but before outputs exist.
    let mut source = UdpSource::bind("127.0.0.1:0".parse().unwrap()).unwrap();
    let shutdown = source.shutdown_handle();
    shutdown.trigger().unwrap();

    let mut app = app();
    let mut hw = HardwareAdapter::simulated(&pins::INDICATOR_GPIOS);
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink);

    let result = app.run(&mut source, &mut hw, &mut sink, shutdown.flag());
    assert!(result.is_ok());
    assert!(hw.lit_pins().is_empty());
    assert_eq!(app.stats().received, 0);
}
