use std::collections::HashSet;

use runwatch_core::models::{ErrorOccurrence, RawLogLine};

use crate::patterns::{LineClass, classify_line, normalize_error_line};

/// Collects the distinct error lines of a log, in encounter order.
///
/// Errors are compared case-insensitively after normalization; the first
/// occurrence keeps its file and line number.
pub fn extract_errors(lines: &[RawLogLine]) -> Vec<ErrorOccurrence> {
    let mut seen = HashSet::new();
    let mut errors = Vec::new();
    for line in lines {
        if !matches!(classify_line(&line.text), LineClass::Error(_)) {
            continue;
        }
        let text = normalize_error_line(&line.text);
        if !seen.insert(text.to_lowercase()) {
            continue;
        }
        errors.push(ErrorOccurrence {
            job_step: job_step_name(&line.source_name).to_string(),
            line_number: line.line_number,
            text: text.into_owned(),
        });
    }
    tracing::debug!("Extracted {} distinct errors from {} lines", errors.len(), lines.len());
    errors
}

fn job_step_name(source_name: &str) -> &str {
    source_name.strip_suffix(".txt").unwrap_or(source_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(source_name: &str, text: &str) -> Vec<RawLogLine> {
        text.lines()
            .enumerate()
            .map(|(idx, line)| RawLogLine {
                source_name: source_name.to_string(),
                line_number: idx + 1,
                text: line.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let lines = log(
            "build/3_Test.txt",
            "setup\n\
             ModuleNotFoundError: No module named 'foo'\n\
             retrying\n\
             modulenotfounderror: no module named 'FOO'\n\
             MODULENOTFOUNDERROR: NO MODULE NAMED 'FOO'\n",
        );
        let errors = extract_errors(&lines);
        assert_eq!(errors, vec![ErrorOccurrence {
            job_step: "build/3_Test".to_string(),
            line_number: 2,
            text: "ModuleNotFoundError: No module named 'foo'".to_string(),
        }]);
    }

    #[test]
    fn test_dedup_after_normalization() {
        let lines = log(
            "0_test.txt",
            "2024-05-01T12:00:00.000Z ##[error] Something broke\n\
             2024-05-01T12:00:05.000Z ##[error]something broke\n\
             Something broke\n",
        );
        let errors = extract_errors(&lines);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].text, "Something broke");
        assert_eq!(errors[0].line_number, 1);
    }

    #[test]
    fn test_noise_takes_precedence() {
        let lines = log(
            "0_test.txt",
            "Process completed with exit code ERROR\n\
             2024-05-01T12:00:00.000Z ##[error]Process completed with exit code 1.\n\
             Job defined at: octo/widgets/.github/workflows/ci.yml@refs/heads/main (Exception)\n",
        );
        assert!(extract_errors(&lines).is_empty());
    }

    #[test]
    fn test_dedup_is_per_call_across_files() {
        let mut lines = log("0_lint.txt", "warning: unused import\nERROR: lint failed\n");
        lines.extend(log("1_test.txt", "error: lint failed\nZeroDivisionError: division by zero"));
        let errors = extract_errors(&lines);
        let flat = errors
            .iter()
            .map(|e| (e.job_step.as_str(), e.line_number, e.text.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(flat, vec![
            ("0_lint", 2, "ERROR: lint failed"),
            ("1_test", 2, "ZeroDivisionError: division by zero"),
        ]);
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_errors(&[]).is_empty());
    }

    #[test]
    fn test_job_step_name() {
        assert_eq!(job_step_name("build/1_Set up job.txt"), "build/1_Set up job");
        assert_eq!(job_step_name("0_build.txt"), "0_build");
        assert_eq!(job_step_name("notes.log"), "notes.log");
    }
}
