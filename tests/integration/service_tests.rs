//! AppService → resolver → outputs, one datagram at a time.

use keyfob_lights::app::events::AppEvent;
use keyfob_lights::app::service::AppService;
use keyfob_lights::config::SystemConfig;
use keyfob_lights::error::{DatagramError, ParseError};
use keyfob_lights::resolver::Resolution;

use crate::mock_hw::{MockOutputs, OutputCall, RecordingSink};

fn app() -> AppService {
    AppService::new(SystemConfig::default().button_map().unwrap())
}

#[test]
fn syslog_single_press_lights_first_output() {
    let mut app = app();
    let mut hw = MockOutputs::new(4);
    let mut sink = RecordingSink::new();

    let raw = br#"<34>1 2021-08-18T00:00:00Z host rtl_433 123 - - {"cmd": 3}"#;
    let r = app.handle_datagram(raw, &mut hw, &mut sink).unwrap();

    assert_eq!(r, Resolution::Single(3));
    assert_eq!(hw.lit(), vec![0]);
}

#[test]
fn outputs_reset_before_set() {
    let mut app = app();
    let mut hw = MockOutputs::new(4);
    let mut sink = RecordingSink::new();

    app.handle_datagram(br#"{"cmd": 15}"#, &mut hw, &mut sink)
        .unwrap();

    // Four offs, then the two resolved outputs on (diff first, then b).
    let offs: Vec<_> = (0..4).map(|index| OutputCall { index, on: false }).collect();
    assert_eq!(&hw.calls[..4], offs.as_slice());
    assert_eq!(
        &hw.calls[4..],
        &[
            OutputCall { index: 1, on: true },
            OutputCall { index: 0, on: true },
        ]
    );
    assert_eq!(hw.lit(), vec![0, 1]);
}

#[test]
fn every_pair_lights_exactly_its_two_outputs() {
    let config = SystemConfig::default();
    let buttons = config.buttons.clone();
    let mut app = app();
    let mut hw = MockOutputs::new(4);
    let mut sink = RecordingSink::new();

    for i in 0..buttons.len() {
        for j in (i + 1)..buttons.len() {
            let raw = format!("{{\"cmd\": {}}}", buttons[i] + buttons[j]);
            app.handle_datagram(raw.as_bytes(), &mut hw, &mut sink)
                .unwrap();
            assert_eq!(hw.lit(), vec![i, j], "cmd {}", buttons[i] + buttons[j]);
        }
    }
}

#[test]
fn doubled_code_lights_its_single_output() {
    let mut app = app();
    let mut hw = MockOutputs::new(4);
    let mut sink = RecordingSink::new();

    let r = app
        .handle_datagram(br#"{"cmd": 6}"#, &mut hw, &mut sink)
        .unwrap();

    assert_eq!(r, Resolution::Single(3));
    assert_eq!(hw.lit(), vec![0]);
    assert_eq!(&hw.calls[4..], &[OutputCall { index: 0, on: true }]);
}

#[test]
fn malformed_datagram_turns_everything_off() {
    let mut app = app();
    let mut hw = MockOutputs::new(4);
    let mut sink = RecordingSink::new();

    app.handle_datagram(br#"{"cmd": 240}"#, &mut hw, &mut sink)
        .unwrap();
    assert_eq!(hw.lit(), vec![2, 3]);

    let err = app
        .handle_datagram(b"<34>1 ts host app 1 - - {not json", &mut hw, &mut sink)
        .unwrap_err();
    assert!(matches!(err, DatagramError::Parse(ParseError::Json(_))));
    assert!(hw.lit().is_empty());
    assert!(!app.outputs().any_lit());
}

#[test]
fn non_integer_cmd_is_rejected() {
    let mut app = app();
    let mut hw = MockOutputs::new(4);
    let mut sink = RecordingSink::new();

    let err = app
        .handle_datagram(br#"{"cmd": "A"}"#, &mut hw, &mut sink)
        .unwrap_err();
    assert!(matches!(err, DatagramError::InvalidCommand));
    assert!(matches!(
        sink.events.last(),
        Some(AppEvent::Rejected { reason }) if reason.contains("cmd")
    ));
}

#[test]
fn unknown_command_leaves_outputs_off() {
    let mut app = app();
    let mut hw = MockOutputs::new(4);
    let mut sink = RecordingSink::new();

    app.handle_datagram(br#"{"cmd": 3}"#, &mut hw, &mut sink)
        .unwrap();
    let r = app
        .handle_datagram(br#"{"cmd": 999}"#, &mut hw, &mut sink)
        .unwrap();
    assert_eq!(r, Resolution::None);
    assert!(hw.lit().is_empty());
    assert_eq!(app.stats().pressed, 1);
    assert_eq!(app.stats().unresolved, 1);
}

#[test]
fn start_resets_and_announces() {
    let mut app = app();
    let mut hw = MockOutputs::new(4);
    hw.levels = vec![true; 4];
    let mut sink = RecordingSink::new();

    app.start(&mut hw, &mut sink);
    assert!(hw.lit().is_empty());
    assert_eq!(sink.events, vec![AppEvent::Started { buttons: 4 }]);
}
