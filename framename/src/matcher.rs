//! Glob-lite pattern matching for include/exclude filters.
//!
//! A pattern may be anchored with `*` on either side:
//!
//! | Pattern  | Kind       | Matches                          |
//! |----------|------------|----------------------------------|
//! | `Foo`    | `Equals`   | exactly `Foo`                    |
//! | `Foo*`   | `Prefix`   | anything starting with `Foo`     |
//! | `*Foo`   | `Suffix`   | anything ending with `Foo`       |
//! | `*Foo*`  | `Contains` | anything containing `Foo`        |
//!
//! Comparisons are exact and case-sensitive. There is no other wildcard
//! syntax; a `*` in the middle of a pattern is a literal character.

/// How a stored pattern is compared against a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Equals,
    Contains,
    Prefix,
    Suffix,
}

/// A single compiled filter pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    kind: MatchKind,
    pattern: String,
}

impl Matcher {
    /// Compile a pattern, stripping its `*` anchors
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        let (mut kind, rest) = match pattern.strip_prefix('*') {
            Some(rest) => (MatchKind::Suffix, rest),
            None => (MatchKind::Equals, pattern),
        };

        let rest = match rest.strip_suffix('*') {
            Some(stripped) => {
                kind = match kind {
                    MatchKind::Equals => MatchKind::Prefix,
                    _ => MatchKind::Contains,
                };
                stripped
            }
            None => rest,
        };

        Self { kind, pattern: rest.to_owned() }
    }

    #[must_use]
    pub fn kind(&self) -> MatchKind {
        self.kind
    }

    /// The pattern with anchors removed
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        match self.kind {
            MatchKind::Equals => candidate == self.pattern,
            MatchKind::Contains => candidate.contains(self.pattern.as_str()),
            MatchKind::Prefix => candidate.starts_with(self.pattern.as_str()),
            MatchKind::Suffix => candidate.ends_with(self.pattern.as_str()),
        }
    }
}
