//! Message selector rules.
//!
//! Parameters are addressed by the host through message selectors derived
//! from their names. Selectors are the ASCII lower-cased parameter name, so
//! `"FFTSize"` is set with the `fftsize` message and appears as the
//! `@fftsize` tag in creation arguments.

/// Selectors the adapter registers for itself.
///
/// A parameter whose selector matches one of these would shadow an adapter
/// command, so the derive macro rejects such names.
pub const RESERVED_SELECTORS: &[&str] = &["reset", "warnings", "bang", "signal", "dsp"];

/// Prefix that marks a symbol as an attribute tag.
pub const TAG_PREFIX: u8 = b'@';

/// Host message selector for a parameter name.
pub fn selector_name(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Compare a parameter name against a received selector.
///
/// Equivalent to `selector_name(name) == selector` without allocating.
#[inline]
pub fn selector_eq(name: &str, selector: &str) -> bool {
    name.len() == selector.len()
        && name
            .bytes()
            .zip(selector.bytes())
            .all(|(a, b)| a.to_ascii_lowercase() == b)
}

/// Returns true if `text` is an attribute tag: `@` followed by at least one character.
#[inline]
pub const fn is_tag_text(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() > 1 && bytes[0] == TAG_PREFIX
}

/// Strip the tag prefix, returning `None` if `text` is not a tag.
#[inline]
pub fn tag_name(text: &str) -> Option<&str> {
    if is_tag_text(text) {
        Some(&text[1..])
    } else {
        None
    }
}
