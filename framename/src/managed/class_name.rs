//! Class and array name rendering
//!
//! Type descriptors use `/` as package separator, `L...;` around object
//! types and one leading `[` per array dimension:
//!
//! ```text
//! java/lang/String          → java/lang/String
//! [[I                       → int[][]
//! [Ljava/lang/Object;       → java/lang/Object[]
//! ```
//!
//! A `/` followed by a digit is not a package separator: it introduces the
//! numeric suffix of a hidden or anonymous class (`Foo$$Lambda/0x1234`) and
//! is left untouched by both `simple-names` and `dotted-names`.

use crate::style::Style;

/// Render a class descriptor or array descriptor for display
///
/// With zero array dimensions the descriptor is taken verbatim; callers pass
/// object names without the `L...;` wrapper.
#[must_use]
pub fn class_or_array_name(descriptor: &str, style: Style) -> String {
    let element = descriptor.trim_start_matches('[');
    let dimensions = descriptor.len() - element.len();

    let mut name = if dimensions == 0 {
        element.to_owned()
    } else {
        let mut base = match element.as_bytes().first() {
            Some(b'B') => "byte".to_owned(),
            Some(b'C') => "char".to_owned(),
            Some(b'I') => "int".to_owned(),
            Some(b'J') => "long".to_owned(),
            Some(b'S') => "short".to_owned(),
            Some(b'Z') => "boolean".to_owned(),
            Some(b'F') => "float".to_owned(),
            Some(b'D') => "double".to_owned(),
            _ => strip_enclosing(element).to_owned(),
        };
        base.push_str(&"[]".repeat(dimensions));
        base
    };

    if style.contains(Style::SIMPLE_NAMES) {
        let start = (0..name.len())
            .rev()
            .find(|&i| is_package_separator(&name, i))
            .map_or(0, |i| i + 1);
        name.drain(..start);
    }

    if style.contains(Style::DOTTED_NAMES) {
        name = name
            .char_indices()
            .map(|(i, c)| if is_package_separator(&name, i) { '.' } else { c })
            .collect();
    }

    name
}

/// Render the declaring class of a method from its `Lpkg/Name;` descriptor
#[must_use]
pub fn declaring_class_name(descriptor: &str, style: Style) -> String {
    let inner = descriptor
        .strip_prefix('L')
        .and_then(|d| d.strip_suffix(';'))
        .unwrap_or(descriptor);
    class_or_array_name(inner, style)
}

/// Drop the first and last character (`Lpkg/Name;` → `pkg/Name`)
fn strip_enclosing(element: &str) -> &str {
    let mut chars = element.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

fn is_package_separator(name: &str, i: usize) -> bool {
    let bytes = name.as_bytes();
    bytes[i] == b'/' && !bytes.get(i + 1).is_some_and(u8::is_ascii_digit)
}
