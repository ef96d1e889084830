use crate::checker::diagnostic::SpellingDiagnostic;
use crate::CheckResult;
use anyhow::Result;
use colored::*;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonFix<'a> {
    value: &'a str,
    kind: String,
}

#[derive(Debug, Serialize)]
struct JsonDiagnostic<'a> {
    file: String,
    line: usize,
    column: usize,
    word: &'a str,
    containing_value: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<&'a str>,
    message: String,
    fixes: Vec<JsonFix<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    files_checked: usize,
    total_errors: usize,
    diagnostics: Vec<JsonDiagnostic<'a>>,
}

/// Print every diagnostic of `results`. JSON output is a single document.
pub fn print_results(
    results: &[CheckResult],
    culture: &str,
    colored_output: bool,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for result in results {
                print_text_diagnostics(result, culture, colored_output);
            }
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", render_json(results, culture)?);
            Ok(())
        }
    }
}

fn print_text_diagnostics(result: &CheckResult, culture: &str, colored_output: bool) {
    if result.diagnostics.is_empty() {
        return;
    }

    let file_name = result.path.display().to_string();
    if colored_output {
        println!("\n{}", file_name.bold().underline());
    } else {
        println!("\n{}", file_name);
    }

    for diag in &result.diagnostics {
        let message = diag.message(culture);
        if colored_output {
            let highlighted = message.replace(
                &format!("'{}'", diag.value),
                &format!("'{}'", diag.value.red().bold()),
            );
            println!("  {}", highlighted);
        } else {
            println!("  {}", message);
        }

        if let Some(fixes) = format_fixes(diag, colored_output) {
            if colored_output {
                println!("    {} {}", "→".dimmed(), fixes);
            } else {
                println!("    → {}", fixes);
            }
        }
    }
}

fn format_fixes(diag: &SpellingDiagnostic, colored_output: bool) -> Option<String> {
    if diag.fixes.is_empty() {
        return None;
    }

    let separator = if colored_output {
        ", ".dimmed().to_string()
    } else {
        ", ".to_string()
    };
    let fixes = diag
        .fixes
        .iter()
        .take(5)
        .map(|fix| {
            if colored_output {
                fix.value.green().to_string()
            } else {
                fix.value.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(&separator);
    Some(fixes)
}

fn render_json(results: &[CheckResult], culture: &str) -> Result<String> {
    let diagnostics: Vec<JsonDiagnostic> = results
        .iter()
        .flat_map(|r| r.diagnostics.iter())
        .map(|d| JsonDiagnostic {
            file: d.location.path.display().to_string(),
            line: d.location.line,
            column: d.location.column,
            word: &d.value,
            containing_value: &d.containing_value,
            identifier: d.identifier.as_ref().map(|i| i.name.as_str()),
            message: d.message(culture),
            fixes: d
                .fixes
                .iter()
                .map(|f| JsonFix {
                    value: &f.value,
                    kind: f.kind.to_string(),
                })
                .collect(),
        })
        .collect();

    let output = JsonOutput {
        files_checked: results.len(),
        total_errors: diagnostics.len(),
        diagnostics,
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

pub fn print_check_summary(total_errors: usize, files_checked: usize, colored: bool) {
    let file_word = if files_checked == 1 { "file" } else { "files" };

    println!();
    if total_errors == 0 {
        if colored {
            println!("{}", "✓ No spelling errors found!".green().bold());
        } else {
            println!("✓ No spelling errors found!");
        }
    } else {
        let error_word = if total_errors == 1 { "error" } else { "errors" };
        if colored {
            println!(
                "{} {} {} found in {} {}",
                "✗".red().bold(),
                total_errors.to_string().red().bold(),
                error_word,
                files_checked,
                file_word
            );
        } else {
            println!(
                "✗ {} {} found in {} {}",
                total_errors, error_word, files_checked, file_word
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::diagnostic::SourceSpan;
    use crate::dict::{SpellingFix, SpellingFixKind};
    use std::path::{Path, PathBuf};

    fn result() -> CheckResult {
        CheckResult {
            path: PathBuf::from("src/lib.rs"),
            diagnostics: vec![SpellingDiagnostic {
                value: "Lenght".to_string(),
                containing_value: "maxLenght".to_string(),
                location: SourceSpan::new(Path::new("src/lib.rs"), 3, 8, 20),
                index: 3,
                identifier: None,
                fixes: vec![SpellingFix::new("Length", SpellingFixKind::Predefined)],
            }],
        }
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!(OutputFormat::Text.to_string(), "text");
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_json_rendering() {
        let json = render_json(&[result()], "en-US").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["files_checked"], 1);
        assert_eq!(value["total_errors"], 1);
        let diag = &value["diagnostics"][0];
        assert_eq!(diag["word"], "Lenght");
        assert_eq!(diag["message"], "src/lib.rs(3,8): Fix spelling of 'Lenght'");
        assert_eq!(diag["fixes"][0]["kind"], "predefined");
        assert!(diag.get("identifier").is_none());
    }

    #[test]
    fn test_plain_fixes() {
        let r = result();
        assert_eq!(format_fixes(&r.diagnostics[0], false), Some("Length".to_string()));
    }
}
