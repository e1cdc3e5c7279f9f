//! Offline replay of a recorded session through the formatter
//!
//! Each trace is kept or dropped the way the profiler applies its filters:
//! with an include list, at least one frame must match it; a trace with any
//! frame matching the exclude list is dropped. Matching always uses the
//! clean `for_matching` names. Kept traces are listed innermost frame last:
//!
//! ```text
//! trace 0
//!   [main tid=42]
//!   java.lang.Thread.run_[j]
//! ```

use anyhow::Result;
use log::debug;
use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::cache::MethodNameCache;
use crate::formatter::{Collaborators, FormatterConfig, FrameNameFormatter};
use crate::frame::Frame;
use crate::session::Session;

/// Counters reported after a replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub traces: usize,
    pub kept: usize,
    pub excluded: usize,
    pub not_included: usize,
    pub frames: usize,
}

/// Format every trace of `session`, writing kept traces to `out`
///
/// With `matching`, the names written are the ones used for filtering.
///
/// # Errors
/// Returns an error only if writing to `out` fails.
pub fn replay<W: Write>(
    session: &Session,
    config: FormatterConfig,
    cache: Arc<MethodNameCache>,
    matching: bool,
    out: &mut W,
) -> Result<ReplayStats> {
    let thread_names = Mutex::new(session.thread_names());
    let collaborators = Collaborators {
        introspection: session,
        libraries: session,
        classes: &session.classes,
        thread_names: &thread_names,
    };
    let formatter = FrameNameFormatter::new(config, collaborators, cache);

    let mut stats = ReplayStats { traces: session.traces.len(), ..ReplayStats::default() };

    for (index, trace) in session.traces.iter().enumerate() {
        let frames: Vec<Frame> =
            trace.iter().map(|raw| Frame::decode(raw, |h| session.text(h))).collect();

        if formatter.has_include_list() || formatter.has_exclude_list() {
            let match_names: Vec<String> = frames.iter().map(|f| formatter.name(f, true)).collect();

            if formatter.has_include_list() && !match_names.iter().any(|n| formatter.include(n)) {
                debug!("Trace {index} matches no include pattern");
                stats.not_included += 1;
                continue;
            }
            if match_names.iter().any(|n| formatter.exclude(n)) {
                debug!("Trace {index} matches an exclude pattern");
                stats.excluded += 1;
                continue;
            }
        }

        writeln!(out, "trace {index}")?;
        for frame in &frames {
            writeln!(out, "  {}", formatter.name(frame, matching))?;
        }
        stats.kept += 1;
        stats.frames += frames.len();
    }

    Ok(stats)
}
