//! SMPTE timecode tool
//!
//! Inspects, converts and combines SMPTE 12M timecodes from the command line.

use anyhow::{bail, Context, Result};
use smpte_core::{ticks_27mhz_to_smpte12m, SmpteFrameRate, TimeCode};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const USAGE: &str = "\
usage:
  smpte info <timecode[@rate]>
  smpte add <timecode[@rate]> <timecode>
  smpte sub <timecode[@rate]> <timecode>
  smpte ticks <ticks-27mhz> <rate[df]>
  smpte demo";

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["info", timecode] => print_info(&parse_timecode(timecode)?),
        ["add", left, right] => {
            let left = parse_timecode(left)?;
            let right = TimeCode::from_timecode(right, left.frame_rate())
                .with_context(|| format!("invalid right operand {right:?}"))?;
            print_info(&(left + right)?);
        }
        ["sub", left, right] => {
            let left = parse_timecode(left)?;
            let right = TimeCode::from_timecode(right, left.frame_rate())
                .with_context(|| format!("invalid right operand {right:?}"))?;
            print_info(&(left - right)?);
        }
        ["ticks", ticks, rate] => {
            let ticks: i64 = ticks
                .parse()
                .with_context(|| format!("invalid tick count {ticks:?}"))?;
            let rate = parse_rate(rate)?;
            println!("{}", ticks_27mhz_to_smpte12m(ticks, rate));
        }
        ["demo"] => run_demo()?,
        _ => bail!("{USAGE}"),
    }

    Ok(())
}

fn parse_timecode(input: &str) -> Result<TimeCode> {
    let tc: TimeCode = input
        .parse()
        .with_context(|| format!("invalid timecode {input:?}"))?;
    debug!(%tc, rate = %tc.frame_rate(), "parsed timecode");
    Ok(tc)
}

/// Rate labels take a `df` suffix for drop-frame, e.g. `29.97df`.
fn parse_rate(label: &str) -> Result<SmpteFrameRate> {
    let lower = label.to_ascii_lowercase();
    let (label, drop_frame) = match lower.strip_suffix("df") {
        Some(base) => (base, true),
        None => (lower.as_str(), false),
    };
    Ok(SmpteFrameRate::from_label(label, drop_frame)?)
}

fn print_info(tc: &TimeCode) {
    println!("timecode:      {tc}");
    println!("rate:          {}", tc.frame_rate());
    println!("frames:        {}", tc.total_frames());
    println!("seconds:       {}", tc.absolute_time());
    println!("ticks (90kHz): {}", tc.to_ticks_pcr());
    println!("ticks (27MHz): {}", tc.to_ticks_27mhz());
}

/// Walks through a chain of in-place edits on a 29.97 drop-frame timecode.
fn run_demo() -> Result<()> {
    let expected = "06:02:31;23";

    let mut tc = TimeCode::from_timecode("05:01:20;18", SmpteFrameRate::Smpte2997Drop)?;
    tc.add_seconds(10.5)?;
    tc.add_frames(20)?;
    tc.sub_seconds(1.0)?;
    tc.add_timecode("01:01:01;01")?;

    if tc.to_string() != expected {
        bail!(
            "timecode doesn't match: expected {expected:?}, got {:?}",
            tc.to_string()
        );
    }
    info!(%tc, "timecode matches");
    print_info(&tc);
    Ok(())
}
