//! Interop tests: 27 MHz / PCR clock ticks and JSON embedding.

use serde::{Deserialize, Serialize};
use smpte_core::{
    smpte12m_to_ticks_27mhz, ticks_27mhz_to_smpte12m, SmpteFrameRate, TimeCode,
};

const TICKS: i64 = 156_523_374_000;

// ── 27 MHz ticks ───────────────────────────────────────────────

#[test]
fn ticks_render_at_each_rate() {
    let cases = [
        (SmpteFrameRate::Smpte2997Drop, "01:36:37;05"),
        (SmpteFrameRate::Smpte2997NonDrop, "01:36:31:11"),
        (SmpteFrameRate::Smpte2398, "01:36:31:08"),
        (SmpteFrameRate::Smpte24, "01:36:37:03"),
        (SmpteFrameRate::Smpte25, "01:36:37:04"),
        (SmpteFrameRate::Smpte30, "01:36:37:04"),
    ];
    for (rate, expected) in cases {
        assert_eq!(ticks_27mhz_to_smpte12m(TICKS, rate), expected, "{rate}");
        let tc = TimeCode::from_ticks_27mhz(TICKS, rate).unwrap();
        assert_eq!(tc.to_string(), expected, "{rate}");
    }
}

#[test]
fn frame_start_ticks_round_trip() {
    let ticks = smpte12m_to_ticks_27mhz("01:36:37:04", SmpteFrameRate::Smpte30).unwrap();
    assert_eq!(ticks, 156_522_600_000);
    assert_eq!(
        ticks_27mhz_to_smpte12m(ticks, SmpteFrameRate::Smpte30),
        "01:36:37:04"
    );

    for rate in SmpteFrameRate::ALL {
        let label = ticks_27mhz_to_smpte12m(TICKS, rate);
        let start = smpte12m_to_ticks_27mhz(&label, rate).unwrap();
        assert!(start <= TICKS, "{rate}");
        assert_eq!(ticks_27mhz_to_smpte12m(start, rate), label, "{rate}");
    }
}

#[test]
fn timecode_exports_clock_values() {
    let tc = TimeCode::from_ticks_27mhz(TICKS, SmpteFrameRate::Smpte2997Drop).unwrap();
    assert_eq!(tc.to_ticks_27mhz(), TICKS);
    assert_eq!(tc.to_ticks_pcr(), TICKS / 300);

    let one_hour = TimeCode::from_hours(1, 0, 0, 0, SmpteFrameRate::Smpte25).unwrap();
    assert_eq!(one_hour.to_ticks_pcr(), 324_000_000);
    assert_eq!(one_hour.to_ticks_27mhz(), 97_200_000_000);
}

// ── JSON embedding ─────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct Marker {
    name: String,
    position: TimeCode,
}

#[test]
fn timecode_embeds_in_json_documents() {
    let marker = Marker {
        name: "slate".to_string(),
        position: "00:12:33;26@29.97".parse().unwrap(),
    };
    let json = serde_json::to_string(&marker).unwrap();
    assert!(json.contains("Smpte2997Drop"));

    let decoded: Marker = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded.name, "slate");
    assert_eq!(decoded.position, marker.position);
    assert_eq!(decoded.position.to_string(), "00:12:33;26");
}

#[test]
fn json_documents_cannot_smuggle_invalid_times() {
    let json = r#"{"name":"bad","position":{"absolute_time":[-30,1],"frame_rate":"Smpte30"}}"#;
    assert!(serde_json::from_str::<Marker>(json).is_err());

    let json = r#"{"name":"ok","position":{"absolute_time":[1001,30],"frame_rate":"Smpte30"}}"#;
    let marker: Marker = serde_json::from_str(json).unwrap();
    assert_eq!(marker.position.to_string(), "00:00:33:11");
}
