//! # framename - Main Entry Point
//!
//! Replays a recorded profiling session through the frame name formatter and
//! prints the resulting names, one trace per block. Useful for checking how
//! a style or filter combination will render before running the profiler.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::io::{BufWriter, Write};
use std::sync::Arc;

use framename::cache::MethodNameCache;
use framename::cli::Args;
use framename::replay::replay;
use framename::session::Session;

// Exit codes (clap exits with 2 on its own for usage errors)
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            EXIT_ERROR
        }
    });
}

fn run() -> Result<()> {
    let args = Args::parse();

    let session = Session::from_file(&args.session)?;
    info!(
        "Loaded {} traces ({} frames) from {}",
        session.traces.len(),
        session.frame_count(),
        args.session.display()
    );

    let config = args.formatter_config().context("Failed to decode filter patterns")?;
    let cache = Arc::new(MethodNameCache::new());

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let stats = replay(&session, config, cache, args.matching, &mut out)?;
    out.flush().context("Failed to write output")?;

    if !args.quiet {
        eprintln!(
            "{} traces: {} kept ({} frames), {} excluded, {} not included",
            stats.traces, stats.kept, stats.frames, stats.excluded, stats.not_included
        );
    }

    Ok(())
}
