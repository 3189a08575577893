//! Scenario tests for checked timecode arithmetic.
//!
//! Covers sums and differences at every rate family, the in-place edit
//! chain used by the sample program, and the 24 hour limit.

use smpte_core::{SmpteFrameRate, TimeCode, TimecodeError};

// ── Helpers ────────────────────────────────────────────────────

fn tc(input: &str, rate: SmpteFrameRate) -> TimeCode {
    TimeCode::from_timecode(input, rate).unwrap()
}

fn sum(a: &str, b: &str, rate: SmpteFrameRate) -> String {
    (tc(a, rate) + tc(b, rate)).unwrap().to_string()
}

// ── Sums per rate ──────────────────────────────────────────────

#[test]
fn add_at_30fps() {
    assert_eq!(
        sum("00:01:00:00", "00:01:00:22", SmpteFrameRate::Smpte30),
        "00:02:00:22"
    );
}

#[test]
fn add_at_29_97_non_drop_carries_seconds() {
    let rate = SmpteFrameRate::Smpte2997NonDrop;
    assert_eq!(sum("00:01:00:29", "00:00:00:02", rate), "00:01:01:01");
}

#[test]
fn add_at_29_97_drop() {
    assert_eq!(
        sum("00:01:00;29", "00:01:00;02", SmpteFrameRate::Smpte2997Drop),
        "00:02:01;01"
    );
}

#[test]
fn add_at_25_and_23_98() {
    assert_eq!(
        sum("00:00:10:13", "00:00:12:22", SmpteFrameRate::Smpte25),
        "00:00:23:10"
    );
    assert_eq!(
        sum("00:00:10:13", "00:00:12:22", SmpteFrameRate::Smpte2398),
        "00:00:23:11"
    );
    assert_eq!(
        sum("15:54:25:12", "01:42:35:15", SmpteFrameRate::Smpte2398),
        "17:37:01:03"
    );
}

#[test]
fn add_across_ten_minute_boundary_at_high_rates() {
    let cases = [
        (SmpteFrameRate::Smpte5994Drop, "00:10:00;05"),
        (SmpteFrameRate::Smpte5994NonDrop, "00:10:00:05"),
        (SmpteFrameRate::Smpte50, "00:10:00:15"),
        (SmpteFrameRate::Smpte60, "00:10:00:05"),
    ];
    for (rate, expected) in cases {
        assert_eq!(sum("00:09:59:40", "00:00:00:25", rate), expected, "{rate}");
    }
}

// ── Chained edits ──────────────────────────────────────────────

#[test]
fn drop_frame_add_then_sub() {
    let rate = SmpteFrameRate::Smpte2997Drop;
    let total = (tc("00:58:12:15", rate) + tc("01:22:12:15", rate))
        .and_then(|t| t - tc("00:02:00:00", rate))
        .unwrap();
    assert_eq!(total.to_string(), "02:18:25;00");
    assert_eq!(
        total,
        TimeCode::from_seconds(8304.963333333335, rate).unwrap()
    );
}

#[test]
fn drop_frame_three_term_sum() {
    let rate = SmpteFrameRate::Smpte2997Drop;
    let total = (tc("00:01:00:02", rate) + tc("00:10:00:00", rate))
        .and_then(|t| t + tc("01:00:00:00", rate))
        .unwrap();
    assert_eq!(total.to_string(), "01:11:00;02");
}

#[test]
fn in_place_edit_chain() {
    let mut tc = tc("05:01:20;18", SmpteFrameRate::Smpte2997Drop);
    tc.add_seconds(10.5).unwrap();
    tc.add_frames(20).unwrap();
    tc.sub_seconds(1.0).unwrap();
    tc.add_timecode("01:01:01;01").unwrap();

    assert_eq!(tc.to_string(), "06:02:31;23");
    assert_eq!(tc.total_frames(), 651_901);
}

#[test]
fn one_frame_step_compares_equal_to_next_label() {
    let rate = SmpteFrameRate::Smpte2997NonDrop;
    let mut tc = tc("01:29:45:15", rate);
    tc.add_frames(1).unwrap();
    assert_eq!(tc, TimeCode::from_timecode("01:29:45:16", rate).unwrap());
}

#[test]
fn drop_frame_skips_two_labels_each_minute() {
    let rate = SmpteFrameRate::Smpte2997Drop;
    let mut tc = tc("00:00:59:29", rate);
    tc.add_frames(1).unwrap();
    assert_eq!(tc.to_string(), "00:01:00;02");

    let mut tc = self::tc("00:09:59;29", rate);
    tc.add_frames(1).unwrap();
    assert_eq!(tc.to_string(), "00:10:00;00");
}

// ── Limits ─────────────────────────────────────────────────────

#[test]
fn sum_past_one_day_overflows() {
    let rate = SmpteFrameRate::Smpte30;
    let a = TimeCode::from_hours(12, 1, 0, 0, rate).unwrap();
    let b = TimeCode::from_hours(12, 1, 0, 22, rate).unwrap();

    match a + b {
        Err(TimecodeError::Overflow { value, max }) => {
            assert!(value > max);
            assert_eq!(max, rate.max_value());
        }
        other => panic!("expected overflow, got {other:?}"),
    }
}

#[test]
fn difference_below_zero_underflows() {
    let rate = SmpteFrameRate::Smpte30;
    let one = tc("00:00:00:01", rate);
    let four = tc("00:00:00:04", rate);

    assert_eq!((one - one).unwrap().to_string(), "00:00:00:00");
    assert!(matches!(one - four, Err(TimecodeError::Underflow { .. })));
}

#[test]
fn failed_edit_keeps_previous_value() {
    let rate = SmpteFrameRate::Smpte2997Drop;
    let mut tc = TimeCode::max_value(rate);
    assert!(tc.add_seconds(1.0).is_err());
    assert_eq!(tc.to_string(), "23:59:59;29");

    let mut tc = self::tc("00:00:01;00", rate);
    assert!(tc.sub_timecode("00:00:02;00").is_err());
    assert_eq!(tc.to_string(), "00:00:01;00");
}

#[test]
fn limits_tolerate_sub_precision_excess() {
    let rate = SmpteFrameRate::Smpte25;
    let nanosecond = TimeCode::from_seconds(1e-9, rate).unwrap();

    let past_max = (TimeCode::max_value(rate) + nanosecond).unwrap();
    assert_eq!(past_max.to_string(), "23:59:59:24");

    let below_zero = (TimeCode::zero(rate) - nanosecond).unwrap();
    assert_eq!(below_zero.to_string(), "00:00:00:00");
    assert_eq!(below_zero.total_frames(), 0);

    let step = TimeCode::from_seconds(1e-7, rate).unwrap();
    assert!(matches!(
        TimeCode::max_value(rate) + step,
        Err(TimecodeError::Overflow { .. })
    ));
    assert!(matches!(
        TimeCode::zero(rate) - step,
        Err(TimecodeError::Underflow { .. })
    ));
}
