use anyhow::{Context, Result};
use runwatch_core::models::{AnnotatedError, MonitorSummary, RunResult};

pub fn render_errors(out: &mut String, errors: &[AnnotatedError]) {
    for error in errors {
        out.push_str(&format!("Error #{}\n", error.error_number));
        out.push_str(&format!("Job/Step: {}\n", error.occurrence.job_step));
        out.push_str(&format!("Log Line: {}\n", error.occurrence.line_number));
        out.push_str(&format!("Error: {}\n", error.occurrence.text));
        out.push_str(&format!("Suggestion:\n{}\n\n", error.suggestion));
    }
}

pub fn render_run_result(out: &mut String, result: &RunResult) {
    out.push_str(&format!("Workflow failed: {}\n", result.workflow_name));
    out.push_str(&format!("Run ID: {}\n\n", result.run_id));
    if result.errors.is_empty() {
        out.push_str("No error lines found in the logs.\n\n");
    }
    render_errors(out, &result.errors);
}

/// Plain-text report: each failed run with its errors, then the counters.
pub fn render_text(summary: &MonitorSummary) -> String {
    let mut out = String::new();
    for result in &summary.results {
        render_run_result(&mut out, result);
    }
    out.push_str("================ SUMMARY ================\n");
    out.push_str(&format!("Total Workflows: {}\n", summary.total_workflows));
    out.push_str(&format!("Passed: {}\n", summary.passed_count));
    out.push_str(&format!("Failed: {}\n", summary.failed_count));
    if summary.unavailable_count > 0 {
        out.push_str(&format!("Skipped: {}\n", summary.unavailable_count));
    }
    for missing in &summary.missing_logs {
        out.push_str(&format!(
            "Logs unavailable: {} (run {})\n",
            missing.workflow_name, missing.run_id
        ));
    }
    out.push_str("=========================================\n");
    out
}

pub fn render_json(summary: &MonitorSummary) -> Result<String> {
    serde_json::to_string_pretty(summary).context("Failed to serialize summary")
}

#[cfg(test)]
mod tests {
    use runwatch_core::models::{ErrorOccurrence, MissingLogs, Suggestion};

    use super::*;

    fn summary() -> MonitorSummary {
        MonitorSummary {
            total_workflows: 4,
            passed_count: 1,
            failed_count: 2,
            unavailable_count: 1,
            results: vec![RunResult {
                workflow_name: "CI".to_string(),
                run_id: 42,
                errors: vec![AnnotatedError {
                    error_number: 1,
                    occurrence: ErrorOccurrence {
                        job_step: "build/4_Run tests".to_string(),
                        line_number: 17,
                        text: "ZeroDivisionError: division by zero".to_string(),
                    },
                    suggestion: Suggestion::new("the divisor is zero", "guard the division"),
                }],
            }],
            missing_logs: vec![MissingLogs { workflow_name: "Deploy".to_string(), run_id: 7 }],
        }
    }

    #[test]
    fn test_render_text() {
        assert_eq!(
            render_text(&summary()),
            "Workflow failed: CI\n\
             Run ID: 42\n\
             \n\
             Error #1\n\
             Job/Step: build/4_Run tests\n\
             Log Line: 17\n\
             Error: ZeroDivisionError: division by zero\n\
             Suggestion:\n\
             Cause: the divisor is zero\n\
             Fix: guard the division\n\
             \n\
             ================ SUMMARY ================\n\
             Total Workflows: 4\n\
             Passed: 1\n\
             Failed: 2\n\
             Skipped: 1\n\
             Logs unavailable: Deploy (run 7)\n\
             =========================================\n"
        );
    }

    #[test]
    fn test_render_text_all_passed() {
        let summary = MonitorSummary { total_workflows: 2, passed_count: 2, ..Default::default() };
        assert_eq!(
            render_text(&summary),
            "================ SUMMARY ================\n\
             Total Workflows: 2\n\
             Passed: 2\n\
             Failed: 0\n\
             =========================================\n"
        );
    }

    #[test]
    fn test_render_json() {
        let json: serde_json::Value =
            serde_json::from_str(&render_json(&summary()).unwrap()).unwrap();
        assert_eq!(json["total_workflows"], 4);
        let error = &json["results"][0]["errors"][0];
        assert_eq!(error["error_number"], 1);
        assert_eq!(error["job_step"], "build/4_Run tests");
        assert_eq!(error["line_number"], 17);
        assert_eq!(error["suggestion"]["fix"], "guard the division");
        assert_eq!(json["missing_logs"][0]["run_id"], 7);
    }
}
