//! Boundary to the managed runtime's introspection interface

use bitflags::bitflags;
use std::collections::HashMap;

use crate::domain::{ClassRef, IntrospectionError, MethodId};

bitflags! {
    /// Method access and property flags, using the class-file bit values
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u32 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SYNCHRONIZED = 0x0020;
        const BRIDGE = 0x0040;
        const VARARGS = 0x0080;
        const NATIVE = 0x0100;
        const ABSTRACT = 0x0400;
        const STRICT = 0x0800;
        const SYNTHETIC = 0x1000;
    }
}

/// Keywords in the order they are written in front of a method name
const MODIFIER_KEYWORDS: &[(Modifiers, &str)] = &[
    (Modifiers::PUBLIC, "public"),
    (Modifiers::PRIVATE, "private"),
    (Modifiers::PROTECTED, "protected"),
    (Modifiers::ABSTRACT, "abstract"),
    (Modifiers::STATIC, "static"),
    (Modifiers::FINAL, "final"),
    (Modifiers::SYNCHRONIZED, "synchronized"),
    (Modifiers::NATIVE, "native"),
    (Modifiers::STRICT, "strict"),
    (Modifiers::BRIDGE, "bridge"),
    (Modifiers::VARARGS, "varargs"),
    (Modifiers::SYNTHETIC, "synthetic"),
];

impl Modifiers {
    /// Render the set as space-terminated keywords (`"public static "`)
    #[must_use]
    pub fn keywords(self) -> String {
        MODIFIER_KEYWORDS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .fold(String::new(), |mut out, (_, keyword)| {
                out.push_str(keyword);
                out.push(' ');
                out
            })
    }
}

/// Name and signature of a method plus its declaring class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: String,
    pub signature: String,
    pub declaring_class: ClassRef,
}

/// Queries answered by the managed runtime
///
/// Calls may block on runtime-internal synchronization. Failures carry the
/// runtime's error code and never abort formatting.
pub trait Introspection {
    fn method_info(&self, method: MethodId) -> Result<MethodInfo, IntrospectionError>;

    /// Type descriptor of a class, such as `Ljava/lang/String;`
    fn class_descriptor(&self, class: ClassRef) -> Result<String, IntrospectionError>;

    fn modifiers(&self, method: MethodId) -> Result<Modifiers, IntrospectionError>;
}

/// Source of the class-id → descriptor snapshot taken at formatter construction
pub trait ClassRegistry {
    fn collect_class_names(&self) -> HashMap<u32, String>;
}

impl ClassRegistry for HashMap<u32, String> {
    fn collect_class_names(&self) -> HashMap<u32, String> {
        self.clone()
    }
}
