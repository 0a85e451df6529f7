mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use checker__driver::{CheckOptions, check_target};
use checker__reports::{CheckerFailure, JsonReport, RenderedDiagnostic, ReportFormat};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(version, about = "Checks Go schema field references against declared field names")]
struct CommandLine {
    #[command(subcommand)]
    command: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Report accessor calls that name undeclared schema fields.
    Check {
        /// Directory to walk, or a single `.go` file.
        #[arg(default_value = ".")]
        path: PathBuf,
        #[arg(long, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
        /// Glob over workspace-relative paths of files to skip. Repeatable.
        #[arg(long = "exclude", value_name = "GLOB")]
        exclude_patterns: Vec<String>,
        /// Leave out `_test.go` files.
        #[arg(long)]
        no_tests: bool,
    },
}

fn main() -> ExitCode {
    logging::init_tracing();

    let CommandLine {
        command:
            Mode::Check {
                path,
                format,
                exclude_patterns,
                no_tests,
            },
    } = CommandLine::parse();
    let options = CheckOptions {
        target: path,
        include_tests: !no_tests,
        exclude_patterns,
    };

    match (check_target(&options), format) {
        (Ok(checked), ReportFormat::Text) => report_text_diagnostics(&checked.diagnostics),
        (Ok(checked), ReportFormat::Json) => {
            report_json(&JsonReport::from_diagnostics(&checked.diagnostics))
        }
        (Err(failure), ReportFormat::Text) => report_text_failure(&failure),
        (Err(failure), ReportFormat::Json) => report_json(&JsonReport::from_failure(&failure)),
    }
}

fn report_text_diagnostics(diagnostics: &[RenderedDiagnostic]) -> ExitCode {
    if diagnostics.is_empty() {
        println!("ok");
        return ExitCode::SUCCESS;
    }
    for diagnostic in diagnostics {
        eprintln!("{}", diagnostic.to_text());
    }
    ExitCode::FAILURE
}

fn report_text_failure(failure: &CheckerFailure) -> ExitCode {
    eprintln!("{}", failure.to_text());
    ExitCode::FAILURE
}

fn report_json(report: &JsonReport<'_>) -> ExitCode {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{json}"),
        Err(error) => {
            eprintln!("error: failed to serialize report: {error}");
            return ExitCode::FAILURE;
        }
    }
    if report.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
