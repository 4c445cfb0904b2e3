use crate::classify::{classify_key, KeyClass, NumericKey};
use crate::locator::find_capture_objects;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;

/// Path label for the document root
pub const ROOT_LABEL: &str = "root";

/// An invalid key found in a capture object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub location: String,
    pub invalid_key: String,
    /// Every key of the containing capture object, in document order
    pub all_keys: Vec<String>,
}

/// Outcome of analysing one grammar file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FileResult {
    pub captures_found: usize,
    pub numeric_keys: BTreeSet<NumericKey>,
    pub special_keys: BTreeSet<String>,
    pub violations: Vec<Violation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileResult {
    fn failed(message: String) -> Self {
        FileResult {
            error: Some(message),
            ..FileResult::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }
}

/// Analyse the grammar file at `path`.
///
/// Read and parse failures are recorded in [`FileResult::error`] rather than
/// returned, so one broken file never stops a scan.
pub fn analyze_file(path: &Path) -> FileResult {
    log::debug!("Analysing {}", path.display());
    match std::fs::read_to_string(path) {
        Ok(content) => analyze_str(&path.display().to_string(), &content),
        Err(e) => FileResult::failed(format!("Failed to parse JSON: {e}")),
    }
}

/// Analyse grammar source text. `source` names the document in log output.
pub fn analyze_str(source: &str, content: &str) -> FileResult {
    match parse_document(content) {
        Ok(document) => analyze_value(source, &document),
        Err(e) => FileResult::failed(format!("Failed to parse JSON: {e}")),
    }
}

/// Parse JSON without serde_json's nesting limit. The stack grows on demand
/// while deserializing, so deeply nested grammars parse like any other.
pub fn parse_document(content: &str) -> serde_json::Result<Value> {
    let mut deserializer = serde_json::Deserializer::from_str(content);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}

/// Analyse an already parsed grammar document.
pub fn analyze_value(source: &str, document: &Value) -> FileResult {
    let captures = find_capture_objects(document, ROOT_LABEL);
    let mut result = FileResult {
        captures_found: captures.len(),
        ..FileResult::default()
    };

    for capture in &captures {
        for key in capture.object.keys() {
            match classify_key(key) {
                KeyClass::Numeric => {
                    if let Some(numeric) = NumericKey::new(key) {
                        result.numeric_keys.insert(numeric);
                    }
                }
                KeyClass::Special => {
                    log::info!("Special capture key '{key}' in {source}");
                    result.special_keys.insert(key.clone());
                }
                KeyClass::Invalid => result.violations.push(Violation {
                    location: capture.path.clone(),
                    invalid_key: key.clone(),
                    all_keys: capture.keys(),
                }),
            }
        }
    }

    result
}
