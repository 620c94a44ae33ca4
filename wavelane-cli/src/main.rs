//! Wavelane CLI Application
//!
//! Command-line host for the wavelane-core library. It plays the role of the
//! simulation loop:
//! - Reads a trace of value vectors (one per tick)
//! - Keeps the WaveJSON description up to date
//! - Drives the incremental updater against an in-memory diagram
//! - Reports which update path each tick took and checks for drift

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

mod config;
mod replay;
mod report;
mod trace;

use config::AppConfig;
use replay::Replay;

/// Wavelane - Replay value traces onto an incrementally updated timing diagram
#[derive(Parser, Debug)]
#[command(name = "wavelane")]
#[command(about = "Replay value traces onto an incrementally updated timing diagram", long_about = None)]
#[command(version)]
struct Args {
    /// Trace file: one comma-separated value vector (h, l, X, .) per line
    #[arg(short, long, value_name = "FILE")]
    trace: Option<PathBuf>,

    /// Signal names, one per lane (default: s0, s1, ...)
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    signals: Vec<String>,

    /// Number of ticks kept in the diagram
    #[arg(long, value_name = "TICKS")]
    buffer_len: Option<usize>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the final WaveJSON description to this file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Compare the final diagram against a full refresh
    #[arg(long)]
    verify: bool,

    /// Fall back to a full refresh when lane and value counts differ
    #[arg(long)]
    strict: bool,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Wavelane CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using wavelane-core v{}", wavelane_core::VERSION);

    let config = resolve_config(&args)?;

    let Some(trace_path) = config.replay.trace.clone() else {
        println!("Wavelane - No trace specified");
        println!("\nQuick Start:");
        println!("  wavelane --trace counter.trace");
        println!("  wavelane --trace counter.trace --signals clk,q0,q1 --verify");
        println!("\nWith a config file:");
        println!("  wavelane --config wavelane.toml");
        println!("\nUse --help for more options");
        return Ok(());
    };

    replay_mode(&config, &trace_path, args.verify, args.quiet)
}

/// Merge the optional config file with command line overrides
fn resolve_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    if let Some(trace) = &args.trace {
        config.replay.trace = Some(trace.clone());
    }
    if !args.signals.is_empty() {
        config.replay.signals = args.signals.clone();
    }
    if let Some(buffer_len) = args.buffer_len {
        config.replay.buffer_len = buffer_len;
    }
    if let Some(output) = &args.output {
        config.replay.output = Some(output.clone());
    }
    if args.strict {
        config.updater.strict_lane_count = true;
    }

    config::validate(&config)?;
    Ok(config)
}

/// Replay a trace file and print the summary
fn replay_mode(config: &AppConfig, trace_path: &Path, verify: bool, quiet: bool) -> Result<()> {
    let started = chrono::Local::now();

    log::info!("Loading trace: {:?}", trace_path);
    let trace = trace::load_trace(trace_path)?;

    let signals = if config.replay.signals.is_empty() {
        (0..trace.width).map(|i| format!("s{}", i)).collect()
    } else if config.replay.signals.len() == trace.width {
        config.replay.signals.clone()
    } else {
        bail!(
            "{} signal names given but the trace has {} values per tick",
            config.replay.signals.len(),
            trace.width
        );
    };

    let mut replay = Replay::new(signals, config);
    replay.run(&trace)?;

    if !quiet {
        print!("{}", report::Summary::new(&replay, started, chrono::Local::now()));
    }

    if let Some(output) = &config.replay.output {
        let json = replay.diagram().description().to_json()?;
        fs::write(output, json)
            .with_context(|| format!("Failed to write WaveJSON: {:?}", output))?;
        log::info!("WaveJSON written to {:?}", output);
    }

    if verify {
        let drift = replay.verify();
        if !drift.is_empty() {
            bail!(
                "Diagram drifted from a full refresh at {} ticks, first at lane {} tick {}",
                drift.len(),
                drift[0].0,
                drift[0].1
            );
        }
        log::info!("Verification passed: diagram matches a full refresh");
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let args = Args::parse_from([
            "wavelane",
            "--trace",
            "run.trace",
            "--signals",
            "clk,q",
            "--buffer-len",
            "8",
            "--strict",
        ]);
        let config = resolve_config(&args).unwrap();

        assert_eq!(config.replay.trace, Some(PathBuf::from("run.trace")));
        assert_eq!(config.replay.signals, ["clk", "q"]);
        assert_eq!(config.replay.buffer_len, 8);
        assert!(config.updater.strict_lane_count);
    }

    #[test]
    fn test_zero_buffer_rejected() {
        let args = Args::parse_from(["wavelane", "--buffer-len", "0"]);
        assert!(resolve_config(&args).is_err());
    }

    #[test]
    fn test_replay_writes_wave_json() {
        let dir = tempfile::tempdir().unwrap();
        let trace_path = dir.path().join("run.trace");
        let output = dir.path().join("wave.json");
        fs::write(&trace_path, "h,l\nl,l\nh,.\nl,h\nh,h\n").unwrap();

        let mut config = AppConfig::default();
        config.replay.buffer_len = 2;
        config.replay.output = Some(output.clone());

        replay_mode(&config, &trace_path, true, true).unwrap();

        let json = fs::read_to_string(&output).unwrap();
        let wave = wavelane_core::WaveJson::from_json(&json).unwrap();
        assert_eq!(wave.signals()[0].name(), "s0");
        assert_eq!(wave.num_ticks(), 2);
    }

    #[test]
    fn test_signal_count_must_match_trace() {
        let dir = tempfile::tempdir().unwrap();
        let trace_path = dir.path().join("run.trace");
        fs::write(&trace_path, "h,l\n").unwrap();

        let mut config = AppConfig::default();
        config.replay.signals = vec!["only".to_string()];

        assert!(replay_mode(&config, &trace_path, false, true).is_err());
    }
}
