//! pinch_builder: interactive entry point.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use pinch_builder::app::run;
use pinch_builder::config::AppConfig;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Pinch Builder: pinch, release, place a cube         ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Mouse simulation  (use --features leap for hardware)");
    println!();

    if let Err(e) = load_config().and_then(|cfg| {
        println!();
        println!("  Opening visualizer window…");
        println!();
        run(cfg)
    }) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn load_config() -> Result<AppConfig> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if let Some(i) = args.iter().position(|a| a == "--config") {
        let path = args.get(i + 1).map(PathBuf::from).context("--config needs a path")?;
        println!("  Config: {}", path.display());
        return AppConfig::from_file(&path);
    }

    if args.iter().any(|a| a == "--quick") {
        println!("  Quick-start: threshold 0.045, cell 1.0, distance 6.0");
        return Ok(AppConfig::default());
    }

    Ok(AppConfig::interactive())
}
