//! # Managed Frame Names
//!
//! Resolution of managed (bytecode) methods and classes into display names.
//!
//! - [`introspection`]: the runtime-facing traits ([`Introspection`], [`ClassRegistry`])
//! - [`class_name`]: descriptor → class/array name, with simple/dotted styles
//! - [`method`]: method identity → `[modifiers ]Class.method[signature]`

pub mod class_name;
pub mod introspection;
pub mod method;

pub use class_name::{class_or_array_name, declaring_class_name};
pub use introspection::{ClassRegistry, Introspection, MethodInfo, Modifiers};
pub use method::ManagedNameResolver;
