//! Structured error types for framename
//!
//! Using thiserror for automatic Display implementation and error chaining.
//! None of these errors abort a formatting session: introspection failures
//! are rendered into the frame name, and filter errors can only surface
//! while a formatter is being constructed.

use thiserror::Error;

/// Failure reported by the managed-runtime introspection interface
///
/// Carries the runtime's numeric error code verbatim.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("introspection failed with code {code}")]
pub struct IntrospectionError {
    pub code: i32,
}

impl IntrospectionError {
    #[must_use]
    pub fn new(code: i32) -> Self {
        Self { code }
    }
}

/// Malformed include/exclude pattern chain
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("pattern offset {offset} is outside the {len}-byte filter buffer")]
    OffsetOutOfBounds { offset: i32, len: usize },

    #[error("pattern at offset {offset} is not NUL-terminated")]
    Unterminated { offset: i32 },

    #[error("pattern at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: i32 },

    #[error("pattern chain does not terminate after {hops} links")]
    Cycle { hops: usize },
}

/// Unrecognized style option name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown style option '{0}'")]
pub struct StyleError(pub String);
