//! Rendering of scan progress and the final compliance report.
//!
//! The text report goes to any [`Write`] sink so the CLI can stream it to
//! stdout while tests capture it in a buffer. The JSON and YAML renderings
//! serialize the whole [`Summary`] in one document.

use crate::analysis::FileResult;
use crate::classify::NumericKey;
use crate::error::Result;
use crate::summary::Summary;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

const RULE_WIDTH: usize = 60;
const DETAIL_RULE_WIDTH: usize = 40;

pub fn write_header(out: &mut impl Write, grammar_dir: &Path) -> Result<()> {
    writeln!(out, "🔍 Verifying capture key formats in TextMate grammars...")?;
    writeln!(out, "📁 Scanning directory: {}", grammar_dir.display())?;
    writeln!(out)?;
    Ok(())
}

pub fn write_file_count(out: &mut impl Write, count: usize) -> Result<()> {
    writeln!(out, "📋 Found {count} grammar files")?;
    writeln!(out)?;
    Ok(())
}

/// One status line per analysed file
pub fn write_file_status(out: &mut impl Write, name: &str, result: &FileResult) -> Result<()> {
    if let Some(error) = &result.error {
        writeln!(out, "❌ {name}: {error}")?;
    } else if result.has_violations() {
        writeln!(
            out,
            "⚠️  {name}: {} captures, {} violations",
            result.captures_found,
            result.violations.len()
        )?;
    } else {
        writeln!(out, "✅ {name}: {} captures, no violations", result.captures_found)?;
    }
    Ok(())
}

/// Summary block, key inventories, violation details and the conclusion.
pub fn write_summary(out: &mut impl Write, summary: &Summary) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "📊 VERIFICATION SUMMARY")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "Grammar files analyzed: {}", summary.files_analyzed)?;
    writeln!(out, "Total capture objects found: {}", summary.total_captures)?;
    writeln!(out, "Total violations found: {}", summary.total_violations)?;
    writeln!(out, "Files with violations: {}", summary.files_with_violations.len())?;
    if !summary.failed_files.is_empty() {
        writeln!(out, "Files that failed to parse: {}", summary.failed_files.len())?;
    }
    writeln!(out)?;

    if !summary.numeric_keys.is_empty() {
        let keys: Vec<&str> = summary.numeric_keys.iter().map(NumericKey::as_str).collect();
        writeln!(out, "✅ Numeric keys found: {keys:?}")?;
    }
    if !summary.special_keys.is_empty() {
        let keys: Vec<&str> = summary.special_keys.iter().map(String::as_str).collect();
        writeln!(out, "ℹ️  Special keys found: {keys:?}")?;
    }

    if summary.passed() {
        write_success(out, summary)
    } else {
        write_violation_details(out, summary)
    }
}

fn write_violation_details(out: &mut impl Write, summary: &Summary) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "❌ VIOLATIONS DETAILS:")?;
    writeln!(out, "{}", "-".repeat(DETAIL_RULE_WIDTH))?;

    for flagged in &summary.files_with_violations {
        writeln!(out)?;
        writeln!(out, "📄 {}:", flagged.name)?;
        for violation in &flagged.result.violations {
            writeln!(out, "  Location: {}", violation.location)?;
            writeln!(out, "  Invalid key: '{}'", violation.invalid_key)?;
            writeln!(out, "  All keys in object: {:?}", violation.all_keys)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "🚨 CONCLUSION: Non-numeric capture keys found!")?;
    writeln!(out, "   Capture keys cannot all be converted to group indices.")?;
    Ok(())
}

fn write_success(out: &mut impl Write, summary: &Summary) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "🎉 CONCLUSION: All capture keys are numeric or special metadata!")?;
    writeln!(out, "   Every non-metadata capture key converts to a group index.")?;
    if let Some((min, max)) = summary.numeric_range() {
        writeln!(
            out,
            "   Numeric key range: {} to {}",
            min.normalized(),
            max.normalized()
        )?;
    }
    Ok(())
}

#[derive(Serialize)]
struct MachineReport<'a> {
    grammar_dir: String,
    passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    numeric_range: Option<[&'a str; 2]>,
    #[serde(flatten)]
    summary: &'a Summary,
}

impl<'a> MachineReport<'a> {
    fn new(grammar_dir: &Path, summary: &'a Summary) -> Self {
        MachineReport {
            grammar_dir: grammar_dir.display().to_string(),
            passed: summary.passed(),
            numeric_range: summary
                .numeric_range()
                .map(|(min, max)| [min.normalized(), max.normalized()]),
            summary,
        }
    }
}

/// Pretty-printed JSON rendering of the whole summary
pub fn to_json(grammar_dir: &Path, summary: &Summary) -> Result<String> {
    Ok(serde_json::to_string_pretty(&MachineReport::new(grammar_dir, summary))?)
}

/// YAML rendering of the whole summary
pub fn to_yaml(grammar_dir: &Path, summary: &Summary) -> Result<String> {
    Ok(serde_yaml::to_string(&MachineReport::new(grammar_dir, summary))?)
}
