use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Non-index keys that grammars use for annotations inside capture objects.
pub const SPECIAL_KEYS: [&str; 2] = ["comment", "//"];

/// Category of a single capture object key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyClass {
    /// A capture group index such as `"0"` or `"12"`
    Numeric,
    /// A recognized metadata key
    Special,
    Invalid,
}

/// Classify a capture object key.
///
/// The empty string has no digits and is not a metadata key, so it is invalid.
pub fn classify_key(key: &str) -> KeyClass {
    if is_group_index(key) {
        KeyClass::Numeric
    } else if SPECIAL_KEYS.contains(&key) {
        KeyClass::Special
    } else {
        KeyClass::Invalid
    }
}

fn is_group_index(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

/// A numeric capture key, ordered by the integer it spells rather than by text.
///
/// Comparison works on the digits directly, so keys of any length are fine.
/// Different spellings of the same integer (`"1"` and `"01"`) stay distinct and
/// fall back to text order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NumericKey(String);

impl NumericKey {
    /// Returns `None` unless `key` classifies as [`KeyClass::Numeric`].
    pub fn new(key: &str) -> Option<Self> {
        is_group_index(key).then(|| NumericKey(key.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The integer without leading zeros, e.g. `"007"` becomes `"7"`.
    pub fn normalized(&self) -> &str {
        let trimmed = self.0.trim_start_matches('0');
        if trimmed.is_empty() {
            "0"
        } else {
            trimmed
        }
    }
}

impl Ord for NumericKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.normalized(), other.normalized());
        a.len()
            .cmp(&b.len())
            .then_with(|| a.cmp(b))
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for NumericKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for NumericKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
