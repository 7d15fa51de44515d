//! Whole frames pushed through the checker with a live consumer.

use frame_crc_checker::{CheckerState, CrcChecker, Frame, SinkIn, StreamRecord, UnitWidth};
use test_case::test_case;

const MAX_TICKS: usize = 10_000;

/// What the consumer saw for one frame.
#[derive(Debug, Default)]
struct Received {
    data: Vec<u32>,
    sop_first: bool,
    error: Option<bool>,
}

/// Feed `records` and collect output until the frame's eop leaves.
/// `producer_valid` and `consumer_ready` give the handshake pattern by tick.
fn run(
    checker: &mut CrcChecker,
    records: &[StreamRecord],
    producer_valid: impl Fn(usize) -> bool,
    consumer_ready: impl Fn(usize) -> bool,
) -> Received {
    let mut received = Received::default();
    let mut next = 0;
    for tick in 0..MAX_TICKS {
        let sink = match records.get(next) {
            Some(&record) if producer_valid(tick) => SinkIn::valid(record),
            _ => SinkIn::IDLE,
        };
        let ready = consumer_ready(tick);
        let out = checker.step(sink, ready);
        assert!(checker.level() <= checker.width().ratio() + 1);
        if out.sink_ack {
            next += 1;
        }
        if out.source_stb && ready {
            if received.data.is_empty() {
                received.sop_first = out.source.sop;
            }
            received.data.push(out.source.data);
            if out.source.eop {
                received.error = Some(out.error);
                return received;
            }
        }
    }
    panic!("frame did not complete within {MAX_TICKS} ticks");
}

fn payload(width: UnitWidth, len: usize) -> Vec<u32> {
    (0..len as u32)
        .map(|i| i.wrapping_mul(0x9E37_79B9) & width.mask())
        .collect()
}

#[test_case(UnitWidth::W8, 1)]
#[test_case(UnitWidth::W8, 37)]
#[test_case(UnitWidth::W16, 1)]
#[test_case(UnitWidth::W16, 64)]
#[test_case(UnitWidth::W32, 1)]
#[test_case(UnitWidth::W32, 9)]
fn good_frame_comes_out_stripped(width: UnitWidth, len: usize) {
    let payload = payload(width, len);
    let records = Frame::with_crc(width, &payload).unwrap();
    let mut checker = CrcChecker::new(width);
    let got = run(&mut checker, &records, |_| true, |_| true);
    assert_eq!(got.data, payload);
    assert!(got.sop_first);
    assert_eq!(got.error, Some(false));
    assert_eq!(checker.state(), CheckerState::Reset);
}

#[test_case(UnitWidth::W8)]
#[test_case(UnitWidth::W16)]
#[test_case(UnitWidth::W32)]
fn any_single_bit_flip_is_reported(width: UnitWidth) {
    let payload = payload(width, 6);
    let clean = Frame::with_crc(width, &payload).unwrap();
    for index in 0..payload.len() {
        for bit in 0..width.bits() {
            let mut records = clean.clone();
            records[index].data ^= 1 << bit;
            let mut checker = CrcChecker::new(width);
            let got = run(&mut checker, &records, |_| true, |_| true);
            assert_eq!(got.error, Some(true), "unit {index} bit {bit}");
            let forwarded: Vec<u32> = records[..payload.len()].iter().map(|r| r.data).collect();
            assert_eq!(got.data, forwarded);
        }
    }
}

#[test]
fn corrupted_checksum_is_reported() {
    let payload = payload(UnitWidth::W16, 10);
    let mut records = Frame::with_crc(UnitWidth::W16, &payload).unwrap();
    let last = records.len() - 1;
    records[last].data ^= 0x8000;
    let mut checker = CrcChecker::new(UnitWidth::W16);
    let got = run(&mut checker, &records, |_| true, |_| true);
    assert_eq!(got.data, payload);
    assert_eq!(got.error, Some(true));
}

#[test_case(UnitWidth::W8)]
#[test_case(UnitWidth::W16)]
#[test_case(UnitWidth::W32)]
fn back_pressure_loses_nothing(width: UnitWidth) {
    let payload = payload(width, 50);
    let records = Frame::with_crc(width, &payload).unwrap();
    let mut checker = CrcChecker::new(width);
    let got = run(&mut checker, &records, |t| t % 5 != 3, |t| t % 3 == 0);
    assert_eq!(got.data, payload);
    assert_eq!(got.error, Some(false));
}

#[test]
fn frames_back_to_back_are_checked_independently() {
    let width = UnitWidth::W16;
    let first = payload(width, 12);
    let second: Vec<u32> = first.iter().map(|u| u ^ 0x0101).collect();
    let mut bad = Frame::with_crc(width, &second).unwrap();
    bad[3].data ^= 0x0004;

    let good = Frame::with_crc(width, &first).unwrap();

    let mut checker = CrcChecker::new(width);
    let got = run(&mut checker, &good, |_| true, |_| true);
    assert_eq!(got.error, Some(false));
    let got = run(&mut checker, &bad, |_| true, |_| true);
    assert_eq!(got.error, Some(true));
    assert_eq!(got.data.len(), second.len());
    let got = run(&mut checker, &good, |_| true, |_| true);
    assert_eq!(got.data, first);
    assert_eq!(got.error, Some(false));

    assert_eq!(checker.frames(), 3);
    assert_eq!(checker.crc_errors(), 1);
}

#[test]
fn pixel_frame_round_trip() {
    let pixels: Vec<(u8, u8)> = (0..=255u8).map(|i| (i, i.wrapping_add(0x80))).collect();
    let frame = Frame::from_pixels(&pixels).unwrap();
    let mut checker = CrcChecker::new(UnitWidth::W16);
    let got = run(&mut checker, &frame.records(), |_| true, |_| true);
    assert_eq!(got.data, frame.payload());
    assert_eq!(got.error, Some(false));
}
