#![forbid(unsafe_code)]

//! Catalog audit tool.
//!
//! Loads `.ts` translation catalogs and reports completeness statistics,
//! duplicate keys, and placeholder-parity findings, pinpointed by the
//! provenance locations the runtime lookup path never reads.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.

use std::env;
use std::path::PathBuf;
use std::process;

use serde::Serialize;

use lingua_catalog::{
    CompletenessReport, Location, TranslationStatus, placeholder_indices,
};
use lingua_ts::{CatalogLoadError, LoadWarning, load_file_with_warnings};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
lingua-lint — translation catalog audit

USAGE:
    lingua-lint [OPTIONS] <FILE>...

OPTIONS:
    --json           Emit the report as JSON on stdout
    --strict         Exit with status 1 when any finding is reported
    --help, -h       Show this help message
    --version, -V    Show version

CHECKS:
    completeness     Finished/unfinished/vanished counts per context
    duplicates       Repeated (source, comment) keys within one context
    placeholders     Finished translations whose %N tokens differ from
                     the source's

Set LINGUA_LINT_LOG (or RUST_LOG) to adjust diagnostic verbosity.
";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

#[derive(Debug, PartialEq, Eq)]
struct Options {
    files: Vec<PathBuf>,
    json: bool,
    strict: bool,
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut files = Vec::new();
    let mut json = false;
    let mut strict = false;
    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--json" => json = true,
            "--strict" => strict = true,
            other if other.starts_with('-') => {
                return Err(format!("unknown option: {other}"));
            }
            file => files.push(PathBuf::from(file)),
        }
    }
    if files.is_empty() {
        return Err("no catalog files given".into());
    }
    Ok(Command::Run(Options {
        files,
        json,
        strict,
    }))
}

/// One audit finding.
#[derive(Debug, Clone, Serialize)]
struct Finding {
    /// Check that produced the finding.
    kind: FindingKind,
    /// Owning context.
    context: String,
    /// Source text of the entry.
    source: String,
    /// Human-readable detail.
    detail: String,
    /// Provenance sites, when the catalog carries them.
    locations: Vec<Location>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
enum FindingKind {
    DuplicateKey,
    PlaceholderMismatch,
}

/// Full audit result for one file.
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    completeness: CompletenessReport,
    findings: Vec<Finding>,
}

fn audit_file(path: &PathBuf) -> Result<FileReport, CatalogLoadError> {
    let outcome = load_file_with_warnings(path)?;
    let catalog = outcome.catalog;

    let mut findings = Vec::new();
    for warning in &outcome.warnings {
        let LoadWarning::DuplicateMessage {
            context,
            source,
            line,
        } = warning;
        findings.push(Finding {
            kind: FindingKind::DuplicateKey,
            context: context.clone(),
            source: source.clone(),
            detail: format!("repeated key, later entry at line {line} wins"),
            locations: Vec::new(),
        });
    }

    for context in catalog.contexts() {
        for entry in context.entries() {
            if entry.status != TranslationStatus::Finished || entry.translation.is_empty() {
                continue;
            }
            let in_source = placeholder_indices(&entry.source);
            let in_translation = placeholder_indices(&entry.translation);
            if in_source != in_translation {
                findings.push(Finding {
                    kind: FindingKind::PlaceholderMismatch,
                    context: context.name().to_string(),
                    source: entry.source.clone(),
                    detail: format!(
                        "source uses {}, translation uses {}",
                        describe(&in_source),
                        describe(&in_translation)
                    ),
                    locations: entry.locations.to_vec(),
                });
            }
        }
    }

    Ok(FileReport {
        file: path.display().to_string(),
        completeness: catalog.completeness(),
        findings,
    })
}

fn describe(indices: &[u8]) -> String {
    if indices.is_empty() {
        return "no placeholders".to_string();
    }
    let tokens: Vec<String> = indices.iter().map(|i| format!("%{i}")).collect();
    tokens.join(" ")
}

fn print_text_report(report: &FileReport) {
    let c = &report.completeness;
    println!("{}", report.file);
    println!(
        "  language {}  contexts {}  messages {}",
        if c.language.is_empty() { "?" } else { &c.language },
        c.contexts.len(),
        c.total
    );
    println!(
        "  finished {}  unfinished {}  vanished {}  ({:.1}% complete)",
        c.finished, c.unfinished, c.vanished, c.percent_finished
    );
    for ctx in &c.contexts {
        if ctx.unfinished > 0 {
            println!(
                "    {} {:.0}% ({}/{})",
                ctx.context,
                ctx.percent_finished,
                ctx.finished,
                ctx.finished + ctx.unfinished
            );
        }
    }
    for finding in &report.findings {
        let kind = match finding.kind {
            FindingKind::DuplicateKey => "duplicate",
            FindingKind::PlaceholderMismatch => "placeholders",
        };
        println!(
            "  \u{2717} [{kind}] {} \"{}\" ({})",
            finding.context, finding.source, finding.detail
        );
        for location in &finding.locations {
            println!("      at {}:{}", location.filename, location.line);
        }
    }
}

fn run(options: &Options) -> i32 {
    let mut reports = Vec::new();
    let mut failed = false;
    for file in &options.files {
        match audit_file(file) {
            Ok(report) => reports.push(report),
            Err(err) => {
                eprintln!("lingua-lint: {err}");
                failed = true;
            }
        }
    }

    if options.json {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("lingua-lint: failed to serialize report: {err}");
                failed = true;
            }
        }
    } else {
        for report in &reports {
            print_text_report(report);
        }
    }

    let findings = reports.iter().map(|r| r.findings.len()).sum::<usize>();
    if failed {
        1
    } else if options.strict && findings > 0 {
        1
    } else {
        0
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_env("LINGUA_LINT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let args: Vec<String> = env::args().skip(1).collect();
    match parse_args(&args) {
        Ok(Command::Help) => print!("{HELP_TEXT}"),
        Ok(Command::Version) => println!("lingua-lint {VERSION}"),
        Ok(Command::Run(options)) => process::exit(run(&options)),
        Err(message) => {
            eprintln!("lingua-lint: {message}");
            eprintln!("Try 'lingua-lint --help'.");
            process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_args_basic() {
        let cmd = parse_args(&args(&["--json", "a.ts", "b.ts"])).unwrap();
        assert_eq!(
            cmd,
            Command::Run(Options {
                files: vec!["a.ts".into(), "b.ts".into()],
                json: true,
                strict: false,
            })
        );
    }

    #[test]
    fn parse_args_help_and_version_win() {
        assert_eq!(parse_args(&args(&["a.ts", "--help"])).unwrap(), Command::Help);
        assert_eq!(parse_args(&args(&["-V"])).unwrap(), Command::Version);
    }

    #[test]
    fn parse_args_rejects_unknown_and_empty() {
        assert!(parse_args(&args(&["--wat"])).is_err());
        assert!(parse_args(&args(&["--strict"])).is_err());
    }

    fn write_catalog(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_xx.ts");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn audit_reports_placeholder_mismatch() {
        let (_dir, path) = write_catalog(
            r#"<TS language="xx"><context><name>StatusBar</name>
            <message>
                <location filename="../statusbar.cpp" line="40"/>
                <source>%1 FPS (%2)</source>
                <translation>%1 FPS</translation>
            </message>
            <message>
                <source>Good</source>
                <translation>Bon</translation>
            </message>
            </context></TS>"#,
        );
        let report = audit_file(&path).unwrap();
        assert_eq!(report.findings.len(), 1);
        let finding = &report.findings[0];
        assert_eq!(finding.kind, FindingKind::PlaceholderMismatch);
        assert_eq!(finding.context, "StatusBar");
        assert_eq!(finding.locations.len(), 1);
        assert!(finding.detail.contains("%1 %2"));
    }

    #[test]
    fn audit_reports_duplicates() {
        let (_dir, path) = write_catalog(
            r#"<TS language="xx"><context><name>C</name>
            <message><source>Save</source><translation>a</translation></message>
            <message><source>Save</source><translation>b</translation></message>
            </context></TS>"#,
        );
        let report = audit_file(&path).unwrap();
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].kind, FindingKind::DuplicateKey);
    }

    #[test]
    fn audit_skips_unfinished_in_placeholder_check() {
        let (_dir, path) = write_catalog(
            r#"<TS language="xx"><context><name>C</name>
            <message><source>%1 of %2</source><translation type="unfinished">%1</translation></message>
            </context></TS>"#,
        );
        let report = audit_file(&path).unwrap();
        assert!(report.findings.is_empty());
    }

    #[test]
    fn audit_completeness_counts() {
        let (_dir, path) = write_catalog(
            r#"<TS language="xx"><context><name>C</name>
            <message><source>A</source><translation>a</translation></message>
            <message><source>B</source><translation type="unfinished"></translation></message>
            <message><source>D</source><translation type="vanished">d</translation></message>
            </context></TS>"#,
        );
        let report = audit_file(&path).unwrap();
        let c = &report.completeness;
        assert_eq!((c.finished, c.unfinished, c.vanished), (1, 1, 1));
        assert!((c.percent_finished - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn report_serializes_to_json() {
        let (_dir, path) = write_catalog(
            r#"<TS language="xx"><context><name>C</name>
            <message><source>%1</source><translation>plain</translation></message>
            </context></TS>"#,
        );
        let report = audit_file(&path).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"placeholder-mismatch\""));
        assert!(json.contains("\"completeness\""));
    }

    #[test]
    fn run_strict_fails_on_findings() {
        let (_dir, path) = write_catalog(
            r#"<TS language="xx"><context><name>C</name>
            <message><source>%1</source><translation>plain</translation></message>
            </context></TS>"#,
        );
        let lenient = Options {
            files: vec![path.clone()],
            json: false,
            strict: false,
        };
        let strict = Options {
            files: vec![path],
            json: false,
            strict: true,
        };
        assert_eq!(run(&lenient), 0);
        assert_eq!(run(&strict), 1);
    }

    #[test]
    fn run_reports_missing_file() {
        let options = Options {
            files: vec![PathBuf::from("/definitely/absent.ts")],
            json: false,
            strict: false,
        };
        assert_eq!(run(&options), 1);
    }

    #[test]
    fn describe_formats_token_lists() {
        assert_eq!(describe(&[]), "no placeholders");
        assert_eq!(describe(&[1, 3]), "%1 %3");
    }
}
