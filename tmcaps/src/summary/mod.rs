use crate::analysis::FileResult;
use crate::classify::NumericKey;
use serde::Serialize;
use std::collections::BTreeSet;

/// A file whose capture objects contain at least one invalid key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlaggedFile {
    pub name: String,
    pub result: FileResult,
}

/// A file that could not be read or parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFile {
    pub name: String,
    pub error: String,
}

/// Totals across every analysed grammar file.
///
/// Built by folding one [`FileResult`] at a time through [`Summary::record`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub files_analyzed: usize,
    pub total_captures: usize,
    pub total_violations: usize,
    pub numeric_keys: BTreeSet<NumericKey>,
    pub special_keys: BTreeSet<String>,
    pub files_with_violations: Vec<FlaggedFile>,
    pub failed_files: Vec<FailedFile>,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file's result into the totals.
    ///
    /// A file that failed to parse is counted as analysed but contributes no
    /// captures, keys or violations.
    pub fn record(&mut self, name: &str, result: FileResult) {
        self.files_analyzed += 1;

        if let Some(error) = &result.error {
            self.failed_files.push(FailedFile {
                name: name.to_string(),
                error: error.clone(),
            });
            return;
        }

        self.total_captures += result.captures_found;
        self.total_violations += result.violations.len();
        self.numeric_keys.extend(result.numeric_keys.iter().cloned());
        self.special_keys.extend(result.special_keys.iter().cloned());

        if result.has_violations() {
            self.files_with_violations.push(FlaggedFile {
                name: name.to_string(),
                result,
            });
        }
    }

    /// True when no invalid capture key was found anywhere
    pub fn passed(&self) -> bool {
        self.total_violations == 0
    }

    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            0
        } else {
            1
        }
    }

    /// Smallest and largest numeric key seen, by integer value.
    pub fn numeric_range(&self) -> Option<(&NumericKey, &NumericKey)> {
        let min = self.numeric_keys.first()?;
        let max = self.numeric_keys.last()?;
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_str;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_summary_passes() {
        let summary = Summary::new();
        assert!(summary.passed());
        assert_eq!(summary.exit_code(), 0);
        assert!(summary.numeric_range().is_none());
    }

    #[test]
    fn test_record_clean_files() {
        let mut summary = Summary::new();
        summary.record("a.json", analyze_str("a.json", r#"{ "captures": { "1": {}, "comment": "" } }"#));
        summary.record("b.json", analyze_str("b.json", r#"{ "patterns": [{ "captures": { "10": {} } }, { "captures": { "2": {} } }] }"#));

        assert_eq!(summary.files_analyzed, 2);
        assert_eq!(summary.total_captures, 3);
        assert_eq!(summary.total_violations, 0);
        assert_eq!(
            summary.numeric_keys.iter().map(NumericKey::as_str).collect::<Vec<_>>(),
            vec!["1", "2", "10"]
        );
        assert_eq!(summary.special_keys.iter().collect::<Vec<_>>(), vec!["comment"]);
        assert!(summary.files_with_violations.is_empty());
        assert_eq!(summary.exit_code(), 0);

        let (min, max) = summary.numeric_range().unwrap();
        assert_eq!((min.normalized(), max.normalized()), ("1", "10"));
    }

    #[test]
    fn test_single_violation_flips_exit_code() {
        let mut summary = Summary::new();
        summary.record("a.json", analyze_str("a.json", r#"{ "captures": { "1": {} } }"#));
        assert_eq!(summary.exit_code(), 0);

        summary.record("b.json", analyze_str("b.json", r#"{ "endCaptures": { "oops": {} } }"#));
        assert!(!summary.passed());
        assert_eq!(summary.exit_code(), 1);
        assert_eq!(summary.total_violations, 1);
        assert_eq!(summary.files_with_violations.len(), 1);
        assert_eq!(summary.files_with_violations[0].name, "b.json");
        assert_eq!(
            summary.files_with_violations[0].result.violations[0].invalid_key,
            "oops"
        );
    }

    #[test]
    fn test_failed_file_counted_but_not_aggregated() {
        let mut summary = Summary::new();
        summary.record("bad.json", analyze_str("bad.json", "not json"));
        summary.record("good.json", analyze_str("good.json", r#"{ "captures": { "0": {} } }"#));

        assert_eq!(summary.files_analyzed, 2);
        assert_eq!(summary.total_captures, 1);
        assert_eq!(summary.failed_files.len(), 1);
        assert_eq!(summary.failed_files[0].name, "bad.json");
        assert!(summary.passed());
    }
}
