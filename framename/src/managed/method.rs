//! Managed method name rendering
//!
//! A resolved method renders as
//!
//! ```text
//! [modifiers ]<class>.<method>[<signature>]
//! public static java.lang.Thread.sleep(J)V
//! ```
//!
//! Every piece except the method name is controlled by [`Style`].

use log::{debug, warn};

use super::class_name::declaring_class_name;
use super::introspection::{Introspection, Modifiers};
use crate::domain::{IntrospectionError, MethodId};
use crate::style::Style;

/// Renders managed method names through the runtime's introspection interface
pub struct ManagedNameResolver<'a> {
    introspection: &'a dyn Introspection,
    style: Style,
}

impl<'a> ManagedNameResolver<'a> {
    pub fn new(introspection: &'a dyn Introspection, style: Style) -> Self {
        Self { introspection, style }
    }

    /// Render a method name, or an `[introspection-error <code>]` placeholder
    #[must_use]
    pub fn resolve_method(&self, method: MethodId) -> String {
        self.try_resolve(method).unwrap_or_else(|err| {
            warn!("Could not resolve {method}: {err}");
            format!("[introspection-error {}]", err.code)
        })
    }

    fn try_resolve(&self, method: MethodId) -> Result<String, IntrospectionError> {
        let info = self.introspection.method_info(method)?;
        let descriptor = self.introspection.class_descriptor(info.declaring_class)?;

        let mut name = String::new();
        if self.style.contains(Style::INCLUDE_MODIFIERS) {
            // A failed modifier query still leaves a usable name
            let modifiers = self.introspection.modifiers(method).unwrap_or_else(|err| {
                debug!("No modifiers for {method}: {err}");
                Modifiers::empty()
            });
            name.push_str(&modifiers.keywords());
        }

        name.push_str(&declaring_class_name(&descriptor, self.style));
        name.push('.');
        name.push_str(&info.name);

        if self.style.contains(Style::SIGNATURES) {
            if self.style.contains(Style::NO_SEMICOLON) {
                name.push_str(&info.signature.replace(';', "|"));
            } else {
                name.push_str(&info.signature);
            }
        }

        Ok(name)
    }
}
