//! Identities and errors shared across the formatter
//!
//! - [`types`]: newtypes for the integers packed into a frame record
//! - [`errors`]: failures reported by collaborators and by filter decoding

pub mod errors;
pub mod types;

pub use types::{ClassId, ClassRef, Epoch, MethodId, Tid};

pub use errors::{FilterError, IntrospectionError, StyleError};
