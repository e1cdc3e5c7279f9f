//! Name style flags
//!
//! The style is an integer bitset handed over by the profiler's argument
//! parser. Unrecognized bits are dropped on conversion so that newer
//! profilers can pass options this formatter does not know about.

use bitflags::bitflags;
use std::str::FromStr;

use crate::domain::StyleError;

bitflags! {
    /// Rendering options for frame names
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Style: u32 {
        /// Strip package prefixes (`java/lang/String` → `String`)
        const SIMPLE_NAMES = 0x01;
        /// Use `.` as package separator
        const DOTTED_NAMES = 0x02;
        /// Append the method signature
        const SIGNATURES = 0x04;
        /// Append a compile-tier suffix (`_[j]`, `_[i]`, ...)
        const ANNOTATE_TIER = 0x08;
        /// Annotate native symbols with their owning library
        const LIBRARY_NAMES = 0x10;
        /// Replace `;` with `|` inside signatures
        const NO_SEMICOLON = 0x20;
        /// Prepend access-modifier keywords
        const INCLUDE_MODIFIERS = 0x40;
    }
}

/// Option names accepted on the command line, in bit order
const STYLE_NAMES: &[(&str, Style)] = &[
    ("simple-names", Style::SIMPLE_NAMES),
    ("dotted-names", Style::DOTTED_NAMES),
    ("signatures", Style::SIGNATURES),
    ("annotate-tier", Style::ANNOTATE_TIER),
    ("library-names", Style::LIBRARY_NAMES),
    ("no-semicolon", Style::NO_SEMICOLON),
    ("include-modifiers", Style::INCLUDE_MODIFIERS),
];

impl Style {
    /// Convert a raw bitset, ignoring unknown bits
    #[must_use]
    pub fn from_raw(bits: u32) -> Self {
        Self::from_bits_truncate(bits)
    }

    /// Look up a single command-line option such as `dotted-names`
    #[must_use]
    pub fn from_option_name(name: &str) -> Option<Self> {
        STYLE_NAMES.iter().find(|(n, _)| *n == name).map(|(_, s)| *s)
    }
}

impl FromStr for Style {
    type Err = StyleError;

    /// Parse a comma-separated option list such as `signatures,dotted-names`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .try_fold(Style::empty(), |acc, name| {
                Style::from_option_name(name)
                    .map(|flag| acc | flag)
                    .ok_or_else(|| StyleError(name.to_owned()))
            })
    }
}
