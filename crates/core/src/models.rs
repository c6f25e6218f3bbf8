use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::util::extract_github_url;

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for Repository {
    type Err = String;

    /// Accepts either `owner/name` or a GitHub repository URL.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((owner, name)) = extract_github_url(s) {
            return Ok(Self { owner: owner.to_string(), name: name.to_string() });
        }
        match s.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self { owner: owner.to_string(), name: name.to_string() })
            }
            _ => Err(format!("Invalid repository '{s}', expected owner/name")),
        }
    }
}

/// The repository and branch a monitoring pass inspects.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct MonitorTarget {
    pub repository: Repository,
    pub branch: String,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct WorkflowRef {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Conclusion {
    Success,
    Failure,
    Other(String),
}

impl Conclusion {
    /// Maps a raw conclusion string. Runs still in progress have none.
    pub fn from_raw(value: Option<&str>) -> Self {
        match value {
            Some("success") => Self::Success,
            Some("failure") => Self::Failure,
            Some(other) => Self::Other(other.to_string()),
            None => Self::Other("pending".to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Other(other) => other,
        }
    }
}

impl fmt::Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct RunRef {
    pub id: u64,
    pub conclusion: Conclusion,
}

/// One line of one file inside a log archive.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RawLogLine {
    pub source_name: String,
    pub line_number: usize,
    pub text: String,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct ErrorOccurrence {
    pub job_step: String,
    pub line_number: usize,
    pub text: String,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Suggestion {
    pub cause: String,
    pub fix: String,
}

impl Suggestion {
    pub fn new(cause: impl Into<String>, fix: impl Into<String>) -> Self {
        Self { cause: cause.into(), fix: fix.into() }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cause: {}\nFix: {}", self.cause, self.fix)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct AnnotatedError {
    pub error_number: usize,
    #[serde(flatten)]
    pub occurrence: ErrorOccurrence,
    pub suggestion: Suggestion,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct RunResult {
    pub workflow_name: String,
    pub run_id: u64,
    pub errors: Vec<AnnotatedError>,
}

/// A failing run whose log archive could not be downloaded or read.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct MissingLogs {
    pub workflow_name: String,
    pub run_id: u64,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct MonitorSummary {
    pub total_workflows: usize,
    pub passed_count: usize,
    pub failed_count: usize,
    /// Workflows with no run or a conclusion other than success/failure.
    pub unavailable_count: usize,
    pub results: Vec<RunResult>,
    pub missing_logs: Vec<MissingLogs>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repository() {
        let cases: &[(&str, Option<(&str, &str)>)] = &[
            ("octo/widgets", Some(("octo", "widgets"))),
            ("https://github.com/octo/widgets", Some(("octo", "widgets"))),
            ("https://github.com/octo/widgets.git", Some(("octo", "widgets"))),
            ("octo", None),
            ("octo/", None),
            ("/widgets", None),
            ("octo/widgets/actions", None),
        ];
        for &(input, expected) in cases {
            let parsed = input.parse::<Repository>().ok();
            assert_eq!(
                parsed.as_ref().map(|r| (r.owner.as_str(), r.name.as_str())),
                expected,
                "{input}"
            );
        }
    }

    #[test]
    fn test_conclusion_from_raw() {
        assert_eq!(Conclusion::from_raw(Some("success")), Conclusion::Success);
        assert_eq!(Conclusion::from_raw(Some("failure")), Conclusion::Failure);
        assert_eq!(
            Conclusion::from_raw(Some("cancelled")),
            Conclusion::Other("cancelled".to_string())
        );
        assert_eq!(Conclusion::from_raw(None).as_str(), "pending");
    }

    #[test]
    fn test_suggestion_display() {
        let suggestion = Suggestion::new("the cache is stale", "clear the cache");
        assert_eq!(suggestion.to_string(), "Cause: the cache is stale\nFix: clear the cache");
    }
}
