use std::fmt;

use thiserror::Error;

/// Machine-readable error codes for script-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    DatasetNotFound,
    MissingColumn,
    MalformedCsv,
    EmptyDataset,
    EmptyGraph,
    OutputWriteFailed,
    VizRenderFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::DatasetNotFound => "E2001",
            Self::MissingColumn => "E2002",
            Self::MalformedCsv => "E2003",
            Self::EmptyDataset => "E2004",
            Self::EmptyGraph => "E3001",
            Self::OutputWriteFailed => "E5001",
            Self::VizRenderFailed => "E5002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::DatasetNotFound => "Dataset file not found",
            Self::MissingColumn => "Required CSV column missing",
            Self::MalformedCsv => "Malformed CSV row",
            Self::EmptyDataset => "No rows matched the label filter",
            Self::EmptyGraph => "No edges survived the weight threshold",
            Self::OutputWriteFailed => "Output file write failed",
            Self::VizRenderFailed => "Visualization render failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in castnet.toml and retry."),
            Self::DatasetNotFound => {
                Some("Check --file and --data-dir; the input CSV must exist.")
            }
            Self::MissingColumn => {
                Some("The input CSV needs both `label` and `text` header columns.")
            }
            Self::MalformedCsv => Some("Repair or remove the malformed row and retry."),
            Self::EmptyDataset => Some("Check the --label value against the dataset's labels."),
            Self::EmptyGraph => Some("Lower --edges to admit weaker co-occurrence edges."),
            Self::OutputWriteFailed => Some("Check disk space and write permissions."),
            Self::VizRenderFailed => {
                Some("Install Graphviz (`neato`) or rerun with --no-viz.")
            }
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A pipeline failure carrying a stable [`ErrorCode`] plus context detail.
#[derive(Debug, Error)]
#[error("{}: {detail}", code.message())]
pub struct CastnetError {
    /// Stable classification of the failure.
    pub code: ErrorCode,
    /// Run-specific detail (paths, column names, row numbers).
    pub detail: String,
}

impl CastnetError {
    /// Build an error from a code and run-specific detail.
    pub fn new(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CastnetError, ErrorCode};
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::ConfigParseError,
            ErrorCode::DatasetNotFound,
            ErrorCode::MissingColumn,
            ErrorCode::MalformedCsv,
            ErrorCode::EmptyDataset,
            ErrorCode::EmptyGraph,
            ErrorCode::OutputWriteFailed,
            ErrorCode::VizRenderFailed,
            ErrorCode::InternalUnexpected,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::MissingColumn.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn error_display_includes_detail() {
        let err = CastnetError::new(ErrorCode::DatasetNotFound, "data/news.csv");
        let rendered = err.to_string();
        assert!(rendered.contains("Dataset file not found"));
        assert!(rendered.contains("data/news.csv"));
    }
}
