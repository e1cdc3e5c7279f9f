//! Include/exclude filter lists and their wire format.
//!
//! The profiler's argument parser stores every `include=`/`exclude=` value
//! in one shared byte buffer. Each pattern is NUL-terminated and immediately
//! preceded by a 4-byte native-endian `i32` holding the buffer offset of the
//! previous pattern in the same list, so a list is a backwards-linked chain
//! whose head offset is kept outside the buffer:
//!
//! ```text
//! offset:  0    4           12   16          24
//!          ┌────┬───────────┬────┬───────────┐
//!          │ 0  │ java/*\0  │ 4  │ *Foo\0    │
//!          └────┴───────────┴────┴───────────┘
//!            ▲ end of chain   ▲ link to "java/*"     head = 16
//! ```
//!
//! An offset of 0 terminates the chain. Decoding walks from the head, so the
//! resulting [`Filter`] lists the most recently appended pattern first.
//! Filtering only asks whether *any* pattern matches, so the order never
//! changes a decision.

use log::debug;

use crate::domain::FilterError;
use crate::matcher::Matcher;

/// Size of the link that precedes every pattern
const LINK_SIZE: usize = std::mem::size_of::<i32>();

/// An ordered list of compiled patterns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    matchers: Vec<Matcher>,
}

impl Filter {
    /// Build a filter from plain pattern strings, keeping their order
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self { matchers: patterns.into_iter().map(|p| Matcher::new(p.as_ref())).collect() }
    }

    /// Decode a pattern chain starting at `head`
    ///
    /// # Errors
    /// Returns an error if a link points outside `buf`, a pattern is not
    /// NUL-terminated or not UTF-8, or the chain never reaches offset 0.
    pub fn from_chain(buf: &[u8], head: i32) -> Result<Self, FilterError> {
        let mut matchers = Vec::new();
        let mut offset = head;
        // Every pattern occupies at least a link and a terminator
        let max_hops = buf.len() / (LINK_SIZE + 1);

        while offset != 0 {
            if matchers.len() >= max_hops {
                return Err(FilterError::Cycle { hops: matchers.len() });
            }

            let start = usize::try_from(offset)
                .ok()
                .filter(|&start| start >= LINK_SIZE && start < buf.len())
                .ok_or(FilterError::OffsetOutOfBounds { offset, len: buf.len() })?;

            let len = buf[start..]
                .iter()
                .position(|&b| b == 0)
                .ok_or(FilterError::Unterminated { offset })?;
            let pattern = std::str::from_utf8(&buf[start..start + len])
                .map_err(|_| FilterError::InvalidUtf8 { offset })?;
            matchers.push(Matcher::new(pattern));

            let mut link = [0u8; LINK_SIZE];
            link.copy_from_slice(&buf[start - LINK_SIZE..start]);
            offset = i32::from_ne_bytes(link);
        }

        debug!("Decoded {} filter patterns from chain head {}", matchers.len(), head);
        Ok(Self { matchers })
    }

    /// True if any pattern matches; always false for an empty filter
    #[must_use]
    pub fn matches_any(&self, name: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(name))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Matcher> {
        self.matchers.iter()
    }
}

/// Writer for the shared include/exclude buffer
///
/// Mirrors what the profiler's argument parser produces: both lists live in
/// one buffer and each keeps its own head offset.
#[derive(Debug, Clone, Default)]
pub struct FilterBuffer {
    buf: Vec<u8>,
    include: i32,
    exclude: i32,
}

impl FilterBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_include(&mut self, pattern: &str) {
        self.include = self.append(self.include, pattern);
    }

    pub fn append_exclude(&mut self, pattern: &str) {
        self.exclude = self.append(self.exclude, pattern);
    }

    fn append(&mut self, prev: i32, pattern: &str) -> i32 {
        self.buf.extend_from_slice(&prev.to_ne_bytes());
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let head = self.buf.len() as i32;
        self.buf.extend_from_slice(pattern.as_bytes());
        self.buf.push(0);
        head
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Head offset of the include chain (0 if empty)
    #[must_use]
    pub fn include_head(&self) -> i32 {
        self.include
    }

    /// Head offset of the exclude chain (0 if empty)
    #[must_use]
    pub fn exclude_head(&self) -> i32 {
        self.exclude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_chain() {
        let filter = Filter::from_chain(&[], 0).unwrap();
        assert!(filter.is_empty());
        assert!(!filter.matches_any("anything"));
    }

    #[test]
    fn test_chain_order_is_reverse_of_append() {
        let mut fb = FilterBuffer::new();
        fb.append_include("first");
        fb.append_include("second*");
        fb.append_include("*third");

        let filter = Filter::from_chain(fb.as_bytes(), fb.include_head()).unwrap();
        let patterns: Vec<&str> = filter.iter().map(Matcher::pattern).collect();
        assert_eq!(patterns, vec!["third", "second", "first"]);
    }

    #[test]
    fn test_interleaved_lists_stay_separate() {
        let mut fb = FilterBuffer::new();
        fb.append_include("java/*");
        fb.append_exclude("*Unsafe*");
        fb.append_include("jdk/*");

        let include = Filter::from_chain(fb.as_bytes(), fb.include_head()).unwrap();
        let exclude = Filter::from_chain(fb.as_bytes(), fb.exclude_head()).unwrap();

        assert_eq!(include.len(), 2);
        assert_eq!(exclude.len(), 1);
        assert!(include.matches_any("jdk/internal/Foo"));
        assert!(!include.matches_any("sun/misc/Unsafe"));
        assert!(exclude.matches_any("sun/misc/Unsafe.park"));
    }

    #[test]
    fn test_offset_out_of_bounds() {
        let err = Filter::from_chain(&[0; 8], 64).unwrap_err();
        assert_eq!(err, FilterError::OffsetOutOfBounds { offset: 64, len: 8 });

        let err = Filter::from_chain(&[0; 8], -4).unwrap_err();
        assert_eq!(err, FilterError::OffsetOutOfBounds { offset: -4, len: 8 });
    }

    #[test]
    fn test_unterminated_pattern() {
        let mut buf = 0i32.to_ne_bytes().to_vec();
        buf.extend_from_slice(b"abc");
        let err = Filter::from_chain(&buf, 4).unwrap_err();
        assert_eq!(err, FilterError::Unterminated { offset: 4 });
    }

    #[test]
    fn test_self_referencing_chain_is_rejected() {
        let mut buf = 4i32.to_ne_bytes().to_vec();
        buf.extend_from_slice(b"loop\0");
        let err = Filter::from_chain(&buf, 4).unwrap_err();
        assert!(matches!(err, FilterError::Cycle { .. }));
    }

    #[test]
    fn test_from_patterns_keeps_order() {
        let filter = Filter::from_patterns(["a*", "*b"]);
        let patterns: Vec<&str> = filter.iter().map(Matcher::pattern).collect();
        assert_eq!(patterns, vec!["a", "b"]);
        assert!(filter.matches_any("ab"));
    }
}
