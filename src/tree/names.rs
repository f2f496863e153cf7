//! Sibling name comparison

use unicode_normalization::UnicodeNormalization;

/// Comparison key for a display name: NFC-normalized and lowercased.
///
/// Two names collide among siblings exactly when their keys are equal.
pub fn name_key(name: &str) -> String {
    name.nfc().collect::<String>().to_lowercase()
}

/// Case-insensitive name equality
pub fn names_match(a: &str, b: &str) -> bool {
    name_key(a) == name_key(b)
}
