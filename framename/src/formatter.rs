//! # Frame Name Formatter
//!
//! The facade that turns a decoded [`Frame`] into a display string. One
//! formatter is built per profiling dump; it snapshots the class table,
//! compiles the include/exclude filters, and shares the process-wide
//! [`MethodNameCache`] with every other formatter.
//!
//! ## Dispatch
//!
//! | Frame        | Display                           | For matching          |
//! |--------------|-----------------------------------|-----------------------|
//! | `Unknown`    | `[unknown]`                       | same                  |
//! | `Native`     | demangled symbol `(library)`      | same                  |
//! | `ClassEvent` | dotted class name + `_[i]`/`_[k]` | no suffix             |
//! | `ThreadId`   | `[name tid=N]` / `[tid=N]`        | name or empty string  |
//! | `Error`      | `[message]`                       | same                  |
//! | `Managed`    | cached `Class.method` + tier tag  | no tier tag           |
//!
//! Matching names are the "clean" variant: annotations that only exist for
//! display never influence include/exclude decisions.
//!
//! ## Lifecycle
//!
//! Construction switches the calling thread to the "C" numeric locale; drop
//! ages the shared cache and then restores the locale.

use log::{debug, info};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use framename_common::FrameTypeId;

use crate::cache::MethodNameCache;
use crate::domain::{Epoch, FilterError, Tid};
use crate::filter::Filter;
use crate::frame::{ClassEventKind, Frame};
use crate::locale::NumericLocaleGuard;
use crate::managed::{class_or_array_name, ClassRegistry, Introspection, ManagedNameResolver};
use crate::style::Style;
use crate::symbolization::{LibraryResolver, NativeSymbolResolver};

/// Thread id → display name, owned and mutated by the profiler
pub type ThreadNames = HashMap<Tid, String>;

/// Per-session formatter settings
#[derive(Debug, Clone, Default)]
pub struct FormatterConfig {
    pub style: Style,
    /// Session counter used to age cache entries
    pub epoch: Epoch,
    /// Sessions a cached name survives unused; 0 clears the cache at teardown
    pub max_cache_age: u8,
    pub include: Filter,
    pub exclude: Filter,
}

impl FormatterConfig {
    #[must_use]
    pub fn new(style: Style, epoch: Epoch, max_cache_age: u8) -> Self {
        Self { style, epoch, max_cache_age, ..Self::default() }
    }

    /// Load include/exclude lists from the argument parser's shared buffer
    ///
    /// # Errors
    /// Returns an error if either pattern chain is malformed.
    pub fn with_filter_buffer(
        mut self,
        buf: &[u8],
        include_head: i32,
        exclude_head: i32,
    ) -> Result<Self, FilterError> {
        self.include = Filter::from_chain(buf, include_head)?;
        self.exclude = Filter::from_chain(buf, exclude_head)?;
        Ok(self)
    }
}

/// External systems the formatter reads from
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub introspection: &'a dyn Introspection,
    pub libraries: &'a dyn LibraryResolver,
    pub classes: &'a dyn ClassRegistry,
    /// Read only while holding the lock
    pub thread_names: &'a Mutex<ThreadNames>,
}

/// Renders frames for display and for include/exclude matching
pub struct FrameNameFormatter<'a> {
    style: Style,
    epoch: Epoch,
    max_cache_age: u8,
    include: Filter,
    exclude: Filter,
    class_names: HashMap<u32, String>,
    cache: Arc<MethodNameCache>,
    native: NativeSymbolResolver<'a>,
    managed: ManagedNameResolver<'a>,
    thread_names: &'a Mutex<ThreadNames>,
    // Dropped after `Drop::drop` has aged the cache
    _locale: NumericLocaleGuard,
}

impl<'a> FrameNameFormatter<'a> {
    pub fn new(
        config: FormatterConfig,
        collaborators: Collaborators<'a>,
        cache: Arc<MethodNameCache>,
    ) -> Self {
        let locale = NumericLocaleGuard::acquire();
        let class_names = collaborators.classes.collect_class_names();

        info!(
            "Frame name session {}: {} classes, {} include / {} exclude patterns, {} cached",
            config.epoch,
            class_names.len(),
            config.include.len(),
            config.exclude.len(),
            cache.len()
        );

        Self {
            style: config.style,
            epoch: config.epoch,
            max_cache_age: config.max_cache_age,
            include: config.include,
            exclude: config.exclude,
            class_names,
            cache,
            native: NativeSymbolResolver::new(collaborators.libraries, config.style),
            managed: ManagedNameResolver::new(collaborators.introspection, config.style),
            thread_names: collaborators.thread_names,
            _locale: locale,
        }
    }

    /// Render a frame
    ///
    /// With `for_matching`, display-only annotations are left out so the
    /// result can be fed to [`include`](Self::include) and
    /// [`exclude`](Self::exclude).
    #[must_use]
    pub fn name(&self, frame: &Frame, for_matching: bool) -> String {
        match frame {
            Frame::Unknown => "[unknown]".to_owned(),
            Frame::Native { symbol } => self.native.decode(symbol),
            Frame::ClassEvent { kind, class } => {
                let mut name = match self.class_names.get(&class.0) {
                    Some(descriptor) => {
                        class_or_array_name(descriptor, self.style | Style::DOTTED_NAMES)
                    }
                    None => format!("[{class}]"),
                };
                if !for_matching && !self.style.contains(Style::DOTTED_NAMES) {
                    let suffix = match kind {
                        ClassEventKind::AllocSlowPath => "_[k]",
                        _ => "_[i]",
                    };
                    name.push_str(suffix);
                }
                name
            }
            Frame::ThreadId(tid) => self.thread_name(*tid, for_matching),
            Frame::Error { message } => format!("[{message}]"),
            Frame::Managed { method, tier, .. } => {
                let name = self
                    .cache
                    .lookup_or_insert(*method, self.epoch, || self.managed.resolve_method(*method));
                match self.type_suffix(*tier) {
                    Some(suffix) if !for_matching => name + suffix,
                    _ => name,
                }
            }
        }
    }

    fn thread_name(&self, tid: Tid, for_matching: bool) -> String {
        // A panicking writer cannot leave a half-updated name behind
        let names = self.thread_names.lock().unwrap_or_else(PoisonError::into_inner);
        let registered = names.get(&tid);

        if for_matching {
            return registered.cloned().unwrap_or_default();
        }
        match registered {
            Some(name) => format!("[{name} tid={}]", tid.0),
            None => format!("[tid={}]", tid.0),
        }
    }

    /// Display tag for a compile tier, only with `annotate-tier`
    #[must_use]
    pub fn type_suffix(&self, tier: Option<FrameTypeId>) -> Option<&'static str> {
        if !self.style.contains(Style::ANNOTATE_TIER) {
            return None;
        }
        match tier? {
            FrameTypeId::Interpreted => Some("_[0]"),
            FrameTypeId::JitCompiled => Some("_[j]"),
            FrameTypeId::Inlined => Some("_[i]"),
            FrameTypeId::C1Compiled => Some("_[1]"),
            _ => None,
        }
    }

    #[must_use]
    pub fn has_include_list(&self) -> bool {
        !self.include.is_empty()
    }

    #[must_use]
    pub fn has_exclude_list(&self) -> bool {
        !self.exclude.is_empty()
    }

    /// True if any include pattern matches
    #[must_use]
    pub fn include(&self, frame_name: &str) -> bool {
        self.include.matches_any(frame_name)
    }

    /// True if any exclude pattern matches
    #[must_use]
    pub fn exclude(&self, frame_name: &str) -> bool {
        self.exclude.matches_any(frame_name)
    }

    #[must_use]
    pub fn style(&self) -> Style {
        self.style
    }
}

impl Drop for FrameNameFormatter<'_> {
    fn drop(&mut self) {
        if self.max_cache_age == 0 {
            self.cache.clear();
        } else {
            // Keep fresh names for the next session
            let removed = self.cache.prune(self.epoch, self.max_cache_age);
            debug!(
                "Session {} kept {} cached names, evicted {removed}",
                self.epoch,
                self.cache.len()
            );
        }
    }
}
