//! # Native Symbol Resolution
//!
//! Native frames reach the formatter as raw linker symbols. This module
//! turns them into readable names:
//!
//! ```text
//! _ZN5tokio7runtime4park5Inner4park17h1c2d3e4f5a6b7c8dE
//!   → tokio::runtime::park::Inner::park
//!   → tokio::runtime::park::Inner::park (libapp.so)   with library-names
//! ```
//!
//! Library lookup is delegated to a [`LibraryResolver`] supplied by the
//! profiler; it is only consulted when the `library-names` style is set.

pub mod native;

pub use native::{demangle, LibraryResolver, NativeSymbolResolver, NoLibraries};
