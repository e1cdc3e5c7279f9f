//! Domain types providing compile-time safety and self-documentation
//!
//! These newtype wrappers keep the different integers carried by a frame
//! record apart: a method identity is never a class id, and a class id is
//! never a thread id, even though the walker stores all of them in the same
//! field.

use std::fmt;

/// Method identity
///
/// Opaque, fixed-width handle issued by the managed runtime. Stable for the
/// lifetime of the method, which is what makes it usable as a cache key
/// across profiling sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId(pub u64);

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "method@0x{:x}", self.0)
    }
}

/// Class id from the class snapshot
///
/// Numeric key of allocation, lock and park frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub u32);

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class#{}", self.0)
    }
}

/// Handle to a declaring class, as returned by introspection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassRef(pub u64);

/// Thread ID
///
/// OS thread id carried by synthetic thread-id root frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tid(pub i32);

impl fmt::Display for Tid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tid={}", self.0)
    }
}

/// Profiling session counter used to age cache entries
///
/// Wraps modulo 256; ages are computed with wrapping arithmetic so that a
/// wrapped counter still yields the right distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Epoch(pub u8);

impl Epoch {
    /// Build an epoch from an unbounded session counter
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_counter(counter: i64) -> Self {
        Epoch(counter as u8)
    }

    /// Number of sessions elapsed since `stored`, modulo 256
    #[must_use]
    pub fn age_of(self, stored: Epoch) -> u8 {
        self.0.wrapping_sub(stored.0)
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "epoch:{}", self.0)
    }
}
