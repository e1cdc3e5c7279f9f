//! Native symbol decoding
//!
//! Native frames carry a raw linker symbol. Rust symbols are demangled with
//! `rustc-demangle` (hash dropped), Itanium C++ symbols with `cpp_demangle`.
//! Everything else, including symbols both demanglers reject, is shown
//! verbatim. With [`Style::LIBRARY_NAMES`] the owning library is appended in
//! parentheses.

use cpp_demangle::{DemangleOptions, Symbol};
use rustc_demangle::try_demangle;

use crate::style::Style;

/// Maps a native symbol to the library that defines it
///
/// Implemented by the profiler's code-cache/library table. A `None` answer
/// is not an error; the annotation is simply omitted.
pub trait LibraryResolver {
    fn library_for(&self, symbol: &str) -> Option<String>;
}

/// Resolver for sessions without library information
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLibraries;

impl LibraryResolver for NoLibraries {
    fn library_for(&self, _symbol: &str) -> Option<String> {
        None
    }
}

/// Prefix shared by Itanium C++ and legacy Rust symbols
const ITANIUM_PREFIX: &str = "_Z";

/// Prefix of Rust v0 symbols
const RUST_V0_PREFIX: &str = "_R";

/// Decodes native symbol names for display
pub struct NativeSymbolResolver<'a> {
    libraries: &'a dyn LibraryResolver,
    style: Style,
}

impl<'a> NativeSymbolResolver<'a> {
    pub fn new(libraries: &'a dyn LibraryResolver, style: Style) -> Self {
        Self { libraries, style }
    }

    /// Render a native symbol, demangled and optionally library-annotated
    #[must_use]
    pub fn decode(&self, name: &str) -> String {
        let library = if self.style.contains(Style::LIBRARY_NAMES) {
            self.libraries.library_for(name)
        } else {
            None
        };

        let base = demangle(name).unwrap_or_else(|| name.to_owned());
        match library {
            Some(lib) => format!("{base} ({lib})"),
            None => base,
        }
    }
}

/// Demangle a symbol if it looks mangled
///
/// `_Z` names are tried as legacy Rust first, so the trailing hash of a Rust
/// symbol is dropped, and as C++ otherwise.
#[must_use]
pub fn demangle(name: &str) -> Option<String> {
    if !name.starts_with(ITANIUM_PREFIX) && !name.starts_with(RUST_V0_PREFIX) {
        return None;
    }
    if let Ok(rust) = try_demangle(name) {
        return Some(format!("{rust:#}"));
    }
    if name.starts_with(ITANIUM_PREFIX) {
        return demangle_cpp(name);
    }
    None
}

fn demangle_cpp(name: &str) -> Option<String> {
    let symbol = Symbol::new(name).ok()?;
    symbol.demangle(&DemangleOptions::default()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Libs(HashMap<&'static str, &'static str>);

    impl LibraryResolver for Libs {
        fn library_for(&self, symbol: &str) -> Option<String> {
            self.0.get(symbol).map(|s| (*s).to_string())
        }
    }

    const MANGLED: &str = "_ZN4core3fmt9Formatter3pad17h0123456789abcdefE";

    #[test]
    fn test_plain_symbol_unchanged() {
        let resolver = NativeSymbolResolver::new(&NoLibraries, Style::empty());
        assert_eq!(resolver.decode("malloc"), "malloc");
    }

    #[test]
    fn test_demangle_strips_hash() {
        let resolver = NativeSymbolResolver::new(&NoLibraries, Style::empty());
        assert_eq!(resolver.decode(MANGLED), "core::fmt::Formatter::pad");
    }

    #[test]
    fn test_demangle_cpp_function() {
        let resolver = NativeSymbolResolver::new(&NoLibraries, Style::empty());
        assert_eq!(resolver.decode("_ZN2os5sleepEP6Threadlb"), "os::sleep(Thread*, long, bool)");
        assert_eq!(resolver.decode("_Z3fooi"), "foo(int)");
    }

    #[test]
    fn test_demangle_cpp_template() {
        let resolver = NativeSymbolResolver::new(&NoLibraries, Style::empty());
        let name = resolver.decode("_ZNSt6vectorIiSaIiEE9push_backERKi");
        assert!(name.starts_with("std::vector<int, std::allocator<int>"), "{name}");
        assert!(name.ends_with("::push_back(int const&)"), "{name}");
    }

    #[test]
    fn test_demangle_cpp_with_library() {
        let libs = Libs(HashMap::from([("_ZN2os5sleepEP6Threadlb", "libjvm.so")]));
        let resolver = NativeSymbolResolver::new(&libs, Style::LIBRARY_NAMES);
        assert_eq!(
            resolver.decode("_ZN2os5sleepEP6Threadlb"),
            "os::sleep(Thread*, long, bool) (libjvm.so)"
        );
    }

    #[test]
    fn test_demangle_failure_falls_back_to_raw() {
        let resolver = NativeSymbolResolver::new(&NoLibraries, Style::empty());
        assert_eq!(resolver.decode("_Zgarbage"), "_Zgarbage");
    }

    #[test]
    fn test_library_annotation() {
        let libs = Libs(HashMap::from([("malloc", "libc.so.6"), (MANGLED, "libstd.so")]));
        let resolver = NativeSymbolResolver::new(&libs, Style::LIBRARY_NAMES);
        assert_eq!(resolver.decode("malloc"), "malloc (libc.so.6)");
        assert_eq!(resolver.decode(MANGLED), "core::fmt::Formatter::pad (libstd.so)");
        assert_eq!(resolver.decode("free"), "free");
    }

    #[test]
    fn test_library_ignored_without_style() {
        let libs = Libs(HashMap::from([("malloc", "libc.so.6")]));
        let resolver = NativeSymbolResolver::new(&libs, Style::empty());
        assert_eq!(resolver.decode("malloc"), "malloc");
    }
}
