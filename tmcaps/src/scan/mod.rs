use crate::analysis::analyze_file;
use crate::error::{Result, TmCapsError};
use crate::report;
use crate::summary::Summary;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Grammar collection location, relative to the working directory
pub const DEFAULT_GRAMMAR_DIR: &str = "./grammars-themes/packages/tm-grammars/grammars";

/// List the `.json` files directly inside `dir`, in lexical path order.
pub fn find_grammar_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/*.json", glob::Pattern::escape(&dir.display().to_string()));
    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .map_err(|e| TmCapsError::Glob(e.to_string()))?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("Skipping unreadable entry: {e}");
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Analyse every grammar file in `dir`, streaming progress lines to `out`.
///
/// Fails only when the directory is missing or holds no `.json` files; broken
/// grammar files are recorded in the returned [`Summary`].
pub fn verify_directory(dir: &Path, out: &mut impl Write) -> Result<Summary> {
    if !dir.exists() {
        return Err(TmCapsError::GrammarDirNotFound(dir.to_path_buf()));
    }

    let display_dir = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
    report::write_header(out, &display_dir)?;

    let files = find_grammar_files(dir)?;
    if files.is_empty() {
        return Err(TmCapsError::NoGrammarFiles(dir.to_path_buf()));
    }
    report::write_file_count(out, files.len())?;

    let mut summary = Summary::new();
    for path in &files {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let result = analyze_file(path);
        report::write_file_status(out, &name, &result)?;
        summary.record(&name, result);
    }

    log::debug!(
        "Analysed {} files, {} violations",
        summary.files_analyzed,
        summary.total_violations
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    fn run(dir: &Path) -> (Result<Summary>, String) {
        let mut buf = Vec::new();
        let result = verify_directory(dir, &mut buf);
        (result, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let (result, output) = run(&tmp.path().join("nope"));

        assert!(matches!(result, Err(TmCapsError::GrammarDirNotFound(_))));
        assert!(output.is_empty());
    }

    #[test]
    fn test_directory_without_json_is_fatal() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "readme.md", "# grammars");
        write(tmp.path(), "data.jsonc", "{}");

        let (result, output) = run(tmp.path());
        assert!(matches!(result, Err(TmCapsError::NoGrammarFiles(_))));
        assert!(!output.contains("Found"));
    }

    #[test]
    fn test_lists_json_files_in_lexical_order() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "zig.json", "{}");
        write(tmp.path(), "abap.json", "{}");
        write(tmp.path(), "c.json", "{}");
        write(tmp.path(), "notes.txt", "");
        std::fs::create_dir(tmp.path().join("nested.json")).unwrap();
        write(&tmp.path().join("nested.json"), "inner.json", "{}");

        let names: Vec<String> = find_grammar_files(tmp.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["abap.json", "c.json", "zig.json"]);
    }

    #[test]
    fn test_clean_corpus_passes() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.json", r#"{ "patterns": [{ "captures": { "1": {} } }] }"#);
        write(tmp.path(), "b.json", r#"{ "repository": { "x": { "beginCaptures": { "0": {}, "comment": "c" } } } }"#);

        let (result, output) = run(tmp.path());
        let summary = result.unwrap();

        assert_eq!(summary.files_analyzed, 2);
        assert_eq!(summary.total_captures, 2);
        assert_eq!(summary.exit_code(), 0);
        assert!(output.contains("📋 Found 2 grammar files"));
        assert!(output.contains("✅ a.json: 1 captures, no violations"));
        assert!(output.contains("✅ b.json: 1 captures, no violations"));
    }

    #[test]
    fn test_one_invalid_key_fails_corpus() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.json", r#"{ "captures": { "1": {} } }"#);
        write(tmp.path(), "b.json", r#"{ "captures": { "1": {} } }"#);
        assert_eq!(run(tmp.path()).0.unwrap().exit_code(), 0);

        write(tmp.path(), "b.json", r#"{ "captures": { "1": {}, "name": {} } }"#);
        let (result, output) = run(tmp.path());
        let summary = result.unwrap();

        assert_eq!(summary.exit_code(), 1);
        assert_eq!(summary.files_with_violations[0].name, "b.json");
        assert!(output.contains("⚠️  b.json: 1 captures, 1 violations"));
    }

    #[test]
    fn test_malformed_file_does_not_stop_scan() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.json", "{ broken");
        write(tmp.path(), "b.json", r#"{ "captures": { "2": {} } }"#);

        let (result, output) = run(tmp.path());
        let summary = result.unwrap();

        assert_eq!(summary.files_analyzed, 2);
        assert_eq!(summary.total_captures, 1);
        assert_eq!(summary.failed_files.len(), 1);
        assert_eq!(summary.exit_code(), 0);

        let a_line = output.find("❌ a.json: Failed to parse JSON").unwrap();
        let b_line = output.find("✅ b.json").unwrap();
        assert!(a_line < b_line);
    }
}
