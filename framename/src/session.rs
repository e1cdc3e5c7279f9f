//! Recorded profiling sessions for offline replay
//!
//! A session file captures everything the formatter would normally query
//! from a live runtime: the class table, method metadata, native library
//! ownership, thread names, and the raw frames produced by the walker.
//!
//! ```json
//! {
//!   "classes":   { "3": "java/lang/String" },
//!   "methods":   { "4096": { "name": "run", "signature": "()V",
//!                            "class": "Ljava/lang/Thread;", "modifiers": 1 } },
//!   "errors":    { "8192": 23 },
//!   "libraries": { "malloc": "libc.so.6" },
//!   "strings":   { "16": "malloc" },
//!   "threads":   { "42": "main" },
//!   "traces":    [ [ { "method_id": 42, "bci": -16 },
//!                    { "method_id": 4096, "bci": 0 } ] ]
//! }
//! ```
//!
//! `strings` holds the text behind native-symbol and error-frame handles.
//! `errors` forces an introspection failure code for a method id.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use framename_common::RawFrame;

use crate::domain::{ClassRef, IntrospectionError, MethodId, Tid};
use crate::formatter::ThreadNames;
use crate::managed::{Introspection, MethodInfo, Modifiers};
use crate::symbolization::LibraryResolver;

/// Error code reported for method ids the session knows nothing about
pub const INVALID_METHOD_ID: i32 = 23;

/// Method metadata as recorded from the runtime
#[derive(Debug, Clone, Deserialize)]
pub struct RecordedMethod {
    pub name: String,
    #[serde(default)]
    pub signature: String,
    /// Declaring class descriptor (`Lpkg/Name;`)
    pub class: String,
    #[serde(default)]
    pub modifiers: u32,
}

/// A recorded session, loaded from JSON
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Session {
    pub classes: HashMap<u32, String>,
    pub methods: HashMap<u64, RecordedMethod>,
    pub errors: HashMap<u64, i32>,
    pub libraries: HashMap<String, String>,
    pub strings: HashMap<u64, String>,
    pub threads: HashMap<i32, String>,
    pub traces: Vec<Vec<RawFrame>>,
}

impl Session {
    /// Parse a session file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid session.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid session file {}", path.display()))
    }

    /// Parse a session from a JSON string
    ///
    /// # Errors
    /// Returns an error if the JSON does not describe a session.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Text behind a native-symbol or error handle
    #[must_use]
    pub fn text(&self, handle: u64) -> Option<String> {
        self.strings.get(&handle).cloned()
    }

    /// Thread registry seeded from the recorded names
    #[must_use]
    pub fn thread_names(&self) -> ThreadNames {
        self.threads.iter().map(|(tid, name)| (Tid(*tid), name.clone())).collect()
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.traces.iter().map(Vec::len).sum()
    }
}

impl Introspection for Session {
    fn method_info(&self, method: MethodId) -> Result<MethodInfo, IntrospectionError> {
        if let Some(code) = self.errors.get(&method.0) {
            return Err(IntrospectionError::new(*code));
        }
        let recorded = self
            .methods
            .get(&method.0)
            .ok_or(IntrospectionError::new(INVALID_METHOD_ID))?;
        Ok(MethodInfo {
            name: recorded.name.clone(),
            signature: recorded.signature.clone(),
            // Each recorded method carries its own class descriptor
            declaring_class: ClassRef(method.0),
        })
    }

    fn class_descriptor(&self, class: ClassRef) -> Result<String, IntrospectionError> {
        self.methods
            .get(&class.0)
            .map(|m| m.class.clone())
            .ok_or(IntrospectionError::new(INVALID_METHOD_ID))
    }

    fn modifiers(&self, method: MethodId) -> Result<Modifiers, IntrospectionError> {
        self.methods
            .get(&method.0)
            .map(|m| Modifiers::from_bits_truncate(m.modifiers))
            .ok_or(IntrospectionError::new(INVALID_METHOD_ID))
    }
}

impl LibraryResolver for Session {
    fn library_for(&self, symbol: &str) -> Option<String> {
        self.libraries.get(symbol).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SESSION: &str = r#"{
        "methods": {
            "4096": {
                "name": "run", "signature": "()V", "class": "Ljava/lang/Thread;", "modifiers": 9
            }
        },
        "errors": { "8192": 112 },
        "threads": { "42": "main" },
        "traces": [ [ { "method_id": 42, "bci": -16 }, { "method_id": 4096, "bci": 3 } ] ]
    }"#;

    #[test]
    fn test_parse_session() {
        let session = Session::from_json(SESSION).unwrap();
        assert_eq!(session.traces.len(), 1);
        assert_eq!(session.frame_count(), 2);
        assert_eq!(session.traces[0][0], RawFrame::new(42, -16));
        assert_eq!(session.thread_names().get(&Tid(42)).map(String::as_str), Some("main"));
        assert!(session.classes.is_empty());
    }

    #[test]
    fn test_introspection_answers() {
        let session = Session::from_json(SESSION).unwrap();
        let info = session.method_info(MethodId(4096)).unwrap();
        assert_eq!(info.name, "run");
        assert_eq!(session.class_descriptor(info.declaring_class).unwrap(), "Ljava/lang/Thread;");
        let modifiers = session.modifiers(MethodId(4096)).unwrap();
        assert_eq!(modifiers, Modifiers::PUBLIC | Modifiers::STATIC);
    }

    #[test]
    fn test_introspection_errors() {
        let session = Session::from_json(SESSION).unwrap();
        assert_eq!(session.method_info(MethodId(8192)).unwrap_err().code, 112);
        assert_eq!(session.method_info(MethodId(1)).unwrap_err().code, INVALID_METHOD_ID);
    }

    #[test]
    fn test_invalid_json() {
        assert!(Session::from_json("{ \"traces\": 5 }").is_err());
    }
}
