use checker__reports::{
    CheckerFailure, CheckerFailureDetail, CheckerFailureKind, DiagnosticPhase, JsonReport,
    RenderedDiagnostic, ReportFormat,
};
use checker__source::Span;
use serde_json::json;

fn diagnostic(source_line: &str, line: usize, column: usize) -> RenderedDiagnostic {
    RenderedDiagnostic {
        phase: DiagnosticPhase::FieldReferences,
        path: "provider/resource.go".to_string(),
        message: "schema field/component 'nmae' not found in package".to_string(),
        span: Span {
            start: 40,
            end: 46,
            line,
            column,
        },
        source_line: source_line.to_string(),
    }
}

#[test]
fn parses_report_formats() {
    assert_eq!("text".parse::<ReportFormat>(), Ok(ReportFormat::Text));
    assert_eq!("json".parse::<ReportFormat>(), Ok(ReportFormat::Json));
    assert_eq!(
        "yaml".parse::<ReportFormat>(),
        Err("invalid report format 'yaml'".to_string())
    );
    assert_eq!(ReportFormat::Json.to_string(), "json");
}

#[test]
fn text_rendering_points_at_the_column() {
    let rendered = diagnostic("    d.Get(\"nmae\")", 8, 11).to_text();
    assert_eq!(
        rendered,
        "provider/resource.go:8:11: error: schema field/component 'nmae' not found in package\n\
         \x20     d.Get(\"nmae\")\n\
         \x20           ^"
    );
}

#[test]
fn caret_indent_keeps_tabs_and_counts_multibyte_characters_once() {
    let rendered = diagnostic("\td.Get(\"nmae\")", 8, 8).to_text();
    assert!(rendered.ends_with("\n  \t      ^"), "{rendered:?}");

    // `é` is two bytes, so the literal after it starts at byte column 8.
    let rendered = diagnostic("é = f(\"x\")", 1, 8).to_text();
    assert!(rendered.ends_with("\n        ^"), "{rendered:?}");
}

#[test]
fn empty_source_line_has_no_caret() {
    let rendered = diagnostic("", 1, 1).to_text();
    assert!(rendered.ends_with("not found in package\n  "), "{rendered:?}");
}

#[test]
fn diagnostics_serialize_without_source_line() {
    let value = serde_json::to_value(diagnostic("d.Get(\"nmae\")", 8, 8)).unwrap();
    assert_eq!(
        value,
        json!({
            "phase": "field_references",
            "path": "provider/resource.go",
            "message": "schema field/component 'nmae' not found in package",
            "span": {"start": 40, "end": 46, "line": 8, "column": 8},
        })
    );
}

#[test]
fn json_report_for_diagnostics() {
    let diagnostics = vec![diagnostic("x", 1, 1)];
    let value = serde_json::to_value(JsonReport::from_diagnostics(&diagnostics)).unwrap();
    assert_eq!(value["ok"], json!(false));
    assert_eq!(value["diagnostics"].as_array().unwrap().len(), 1);
    assert!(value.get("error").is_none());

    let clean = serde_json::to_value(JsonReport::from_diagnostics(&[])).unwrap();
    assert_eq!(clean, json!({"ok": true, "diagnostics": []}));
}

#[test]
fn json_report_for_failure() {
    let failure = CheckerFailure {
        kind: CheckerFailureKind::WorkspaceDiscoveryFailed,
        message: "workspace discovery failed".to_string(),
        path: None,
        details: vec![CheckerFailureDetail {
            message: "failed to read directory: permission denied".to_string(),
            path: Some("locked".to_string()),
        }],
    };

    let value = serde_json::to_value(JsonReport::from_failure(&failure)).unwrap();

    assert_eq!(
        value,
        json!({
            "ok": false,
            "diagnostics": [],
            "error": {
                "kind": "workspace_discovery_failed",
                "message": "workspace discovery failed",
                "details": [
                    {"message": "failed to read directory: permission denied", "path": "locked"},
                ],
            },
        })
    );
    assert_eq!(
        failure.to_text(),
        "error: workspace discovery failed\n  locked: failed to read directory: permission denied"
    );
}

#[test]
fn failure_text_includes_path() {
    let failure = CheckerFailure {
        kind: CheckerFailureKind::TargetNotFound,
        message: "check target not found".to_string(),
        path: Some("missing".to_string()),
        details: Vec::new(),
    };
    assert_eq!(failure.to_text(), "error: check target not found: missing");
}
