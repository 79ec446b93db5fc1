//! pinch_trace: replay a recorded landmark trace through the pinch detector.
//!
//! Input is JSON lines, one `TrackingResult` per frame, from a file argument
//! or stdin.  Output is one line per frame.

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use anyhow::{ensure, Context, Result};
use hand_landmarks::{is_valid_threshold, replay, PinchDetector, PINCH_THRESHOLD};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let mut path = None;
    let mut threshold = PINCH_THRESHOLD;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--threshold" => {
                let raw = args.next().context("--threshold needs a value")?;
                threshold = raw.parse()
                    .with_context(|| format!("invalid threshold {:?}", raw))?;
                ensure!(is_valid_threshold(threshold), "threshold {} is outside (0, 1)", threshold);
            }
            _ => path = Some(arg),
        }
    }

    let reader: Box<dyn BufRead> = match &path {
        Some(p) => Box::new(BufReader::new(
            File::open(p).with_context(|| format!("opening trace {}", p))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut detector = PinchDetector::with_threshold(threshold);
    let frames = replay(reader, &mut detector).context("reading trace")?;

    println!("{:>6}  {:<5}  {:<8}  {}", "frame", "hand", "pinching", "released");
    for f in &frames {
        println!(
            "{:>6}  {:<5}  {:<8}  {}",
            f.line,
            if f.hand_seen { "yes" } else { "-" },
            f.signal.is_pinching,
            if f.signal.just_released { "RELEASE" } else { "" },
        );
    }

    let releases = frames.iter().filter(|f| f.signal.just_released).count();
    println!("\n  {} release(s) at threshold {}", releases, detector.threshold());
    Ok(())
}
