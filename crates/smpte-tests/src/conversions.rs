//! Scenario tests for parsing, formatting and cross-rate comparison.

use smpte_core::{grammar, Decimal, SmpteFrameRate, TimeCode, TimecodeError};

// ── Helpers ────────────────────────────────────────────────────

fn tc(input: &str, rate: SmpteFrameRate) -> TimeCode {
    TimeCode::from_timecode(input, rate).unwrap()
}

const DROP: SmpteFrameRate = SmpteFrameRate::Smpte2997Drop;
const NON_DROP: SmpteFrameRate = SmpteFrameRate::Smpte2997NonDrop;
const PAL: SmpteFrameRate = SmpteFrameRate::Smpte25;

// ── Grammar ────────────────────────────────────────────────────

#[test]
fn validation_rejects_out_of_range_segments() {
    assert!(!grammar::validate("24:00:00:12"));
    assert!(!grammar::validate("01:60:10:10"));
    assert!(grammar::validate("23:38:10:10"));
}

#[test]
fn parse_errors_are_distinguished() {
    assert!(matches!(
        TimeCode::from_timecode("1:2:3:4", DROP),
        Err(TimecodeError::Format { .. })
    ));
    assert!(matches!(
        TimeCode::from_timecode("00:00:61:00", DROP),
        Err(TimecodeError::Range { .. })
    ));
    assert!(matches!(
        TimeCode::from_timecode("00:00:00:27", PAL),
        Err(TimecodeError::FrameOutOfRange { frames: 27, .. })
    ));
}

#[test]
fn every_rate_formats_its_last_frame() {
    let cases = [
        (SmpteFrameRate::Smpte2398, "23:59:59:23"),
        (SmpteFrameRate::Smpte24, "23:59:59:23"),
        (SmpteFrameRate::Smpte25, "23:59:59:24"),
        (SmpteFrameRate::Smpte2997Drop, "23:59:59;29"),
        (SmpteFrameRate::Smpte2997NonDrop, "23:59:59:29"),
        (SmpteFrameRate::Smpte30, "23:59:59:29"),
        (SmpteFrameRate::Smpte50, "23:59:59:49"),
        (SmpteFrameRate::Smpte5994Drop, "23:59:59;59"),
        (SmpteFrameRate::Smpte5994NonDrop, "23:59:59:59"),
        (SmpteFrameRate::Smpte60, "23:59:59:59"),
    ];
    for (rate, expected) in cases {
        let max = TimeCode::max_value(rate);
        assert_eq!(max.to_string(), expected, "{rate}");
        assert_eq!(max.total_frames(), rate.spec().frames_per_day() - 1);
        assert_eq!(tc(expected, rate).absolute_time(), rate.max_value());
    }
}

// ── Absolute time ──────────────────────────────────────────────

#[test]
fn seconds_select_the_containing_frame() {
    assert_eq!(
        TimeCode::from_seconds(37.8378, NON_DROP).unwrap().to_string(),
        "00:00:37:24"
    );
    assert_eq!(
        TimeCode::from_seconds(8304.963333333335, DROP).unwrap().to_string(),
        "02:18:25;00"
    );
}

#[test]
fn totals_in_hours_and_minutes() {
    let t = TimeCode::from_hours(1, 30, 0, 0, NON_DROP).unwrap();
    assert_eq!(t.total_hours(), 1.5);
    assert_eq!(t.total_minutes(), 90.0);

    let t = TimeCode::from_total_hours(1.5, SmpteFrameRate::Smpte30).unwrap();
    assert_eq!(t.total_hours(), 1.5);
    assert_eq!(t.to_string(), "01:30:00:00");
}

#[test]
fn precise_and_rounded_seconds() {
    let t = tc("00:00:00:01", NON_DROP);
    assert_eq!(t.absolute_time(), Decimal::new(1001, 30000));
    assert_eq!(t.total_seconds(), 0.0333667);
    assert!((t.total_seconds_precise() - 1001.0 / 30000.0).abs() < 1e-15);
}

#[test]
fn day_segment_survives_formatting() {
    let t = TimeCode::from_days(3, 1, 2, 3, 4, PAL).unwrap();
    assert_eq!(t.to_string(), "03:01:02:03:04");
    assert_eq!(t.days(), 3);
    assert_eq!(tc("03:01:02:03:04", PAL), t);
}

// ── Cross-rate comparison ──────────────────────────────────────

#[test]
fn drop_and_non_drop_labels_of_same_instant_are_equal() {
    let drop = tc("00:12:33:26", DROP);
    let non_drop = tc("00:12:33:04", NON_DROP);
    assert_eq!(drop, non_drop);
    assert_eq!(drop.total_frames(), non_drop.total_frames());
}

#[test]
fn ordering_against_pal() {
    let pal = tc("00:12:33:23", PAL);
    assert!(tc("00:12:33:26", DROP) <= pal);
    assert!(tc("00:12:31:26", DROP) <= tc("00:12:33:22", PAL));
    assert!(!(tc("00:12:35:26", DROP) <= tc("00:12:33:22", PAL)));

    let pal = tc("00:12:33:22", PAL);
    assert!(tc("00:12:33:26", DROP) >= pal);
    assert!(tc("00:12:35:26", DROP) >= pal);
    assert!(!(tc("00:12:31:26", DROP) >= pal));
}

#[test]
fn sorting_mixed_rates() {
    let mut timecodes = vec![
        tc("00:00:02:00", PAL),
        tc("00:00:01:00", SmpteFrameRate::Smpte60),
        tc("00:00:01:15", SmpteFrameRate::Smpte30),
    ];
    timecodes.sort();
    let seconds: Vec<f64> = timecodes.iter().map(TimeCode::total_seconds).collect();
    assert_eq!(seconds, vec![1.0, 1.5, 2.0]);
}
