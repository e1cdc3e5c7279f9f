//! # framename - Profiler Frame Name Formatting
//!
//! Turns the raw `(method_id, bci)` records captured by a sampling
//! profiler's stack walker into readable, filterable names.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                Stack Walker (framename-common)               │
//! │                 RawFrame { method_id, bci }                  │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ Frame::decode
//!                                ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     FrameNameFormatter                       │
//! │                                                              │
//! │  Native ──────► NativeSymbolResolver ──► LibraryResolver     │
//! │  Managed ─────► MethodNameCache ──► ManagedNameResolver      │
//! │                                         └──► Introspection   │
//! │  ClassEvent ──► class snapshot ──► class_or_array_name       │
//! │  ThreadId ────► thread registry (caller's lock)              │
//! │                                                              │
//! │  include()/exclude() ──► Filter ──► Matcher                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`frame`]: the [`Frame`](frame::Frame) sum type and raw-record decoding
//! - [`formatter`]: the facade, one instance per profiling dump
//! - [`cache`]: process-lifetime method name cache, aged by session epoch
//! - [`managed`]: method/class name rendering through runtime introspection
//! - [`symbolization`]: native symbol demangling and library annotation
//! - [`matcher`] / [`filter`]: include/exclude patterns and their wire format
//! - [`style`]: name style flags
//! - [`locale`]: scoped "C" numeric locale for the formatting session
//! - [`session`] / [`replay`] / [`cli`]: offline replay of recorded sessions
//! - [`domain`]: newtypes and error types
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! let cache = Arc::new(MethodNameCache::new());
//! let config = FormatterConfig::new(Style::DOTTED_NAMES, Epoch(epoch), 5);
//! let formatter = FrameNameFormatter::new(config, collaborators, Arc::clone(&cache));
//!
//! for raw in trace {
//!     let frame = Frame::decode(raw, |handle| symbols.text(handle));
//!     println!("{}", formatter.name(&frame, false));
//! }
//! // Dropping the formatter ages the cache and restores the locale
//! ```

pub mod cache;
pub mod cli;
pub mod domain;
pub mod filter;
pub mod formatter;
pub mod frame;
pub mod locale;
pub mod managed;
pub mod matcher;
pub mod replay;
pub mod session;
pub mod style;
pub mod symbolization;

pub use cache::MethodNameCache;
pub use formatter::{Collaborators, FormatterConfig, FrameNameFormatter, ThreadNames};
pub use frame::{ClassEventKind, Frame};
pub use style::Style;
