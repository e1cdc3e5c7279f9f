//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

use crate::domain::{Epoch, FilterError};
use crate::filter::FilterBuffer;
use crate::formatter::FormatterConfig;
use crate::style::Style;

#[derive(Parser, Debug)]
#[command(
    name = "framename",
    about = "Format recorded profiler frames into readable names",
    after_help = "\
STYLE OPTIONS:
    simple-names, dotted-names, signatures, annotate-tier,
    library-names, no-semicolon, include-modifiers

EXAMPLES:
    framename session.json                                 Default names
    framename session.json -s dotted-names,annotate-tier   Dotted names with tier tags
    framename session.json -I 'java/*' -X '*Unsafe*'       Filter traces"
)]
pub struct Args {
    /// Recorded session file (JSON)
    #[arg(value_name = "SESSION")]
    pub session: PathBuf,

    /// Comma-separated style options
    #[arg(short, long, default_value = "")]
    pub style: Style,

    /// Keep only traces with a frame matching PATTERN (repeatable)
    #[arg(short = 'I', long = "include", value_name = "PATTERN")]
    pub include: Vec<String>,

    /// Drop traces with a frame matching PATTERN (repeatable)
    #[arg(short = 'X', long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Session counter used to age cached method names
    #[arg(long, default_value = "0")]
    pub epoch: i64,

    /// Sessions a cached method name survives unused (0 = clear after each session)
    #[arg(long, default_value = "0")]
    pub mcache: u8,

    /// Print the names used for filter matching instead of display names
    #[arg(long)]
    pub matching: bool,

    /// Suppress the summary line
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Encode include/exclude patterns the way the profiler's argument parser does
    #[must_use]
    pub fn filter_buffer(&self) -> FilterBuffer {
        let mut buffer = FilterBuffer::new();
        for pattern in &self.include {
            buffer.append_include(pattern);
        }
        for pattern in &self.exclude {
            buffer.append_exclude(pattern);
        }
        buffer
    }

    /// Build the formatter configuration
    ///
    /// # Errors
    /// Returns an error if the encoded filter buffer cannot be decoded.
    pub fn formatter_config(&self) -> Result<FormatterConfig, FilterError> {
        let buffer = self.filter_buffer();
        let epoch = Epoch::from_counter(self.epoch);
        FormatterConfig::new(self.style, epoch, self.mcache).with_filter_buffer(
            buffer.as_bytes(),
            buffer.include_head(),
            buffer.exclude_head(),
        )
    }
}
