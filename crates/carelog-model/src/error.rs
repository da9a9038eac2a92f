use thiserror::Error;

/// Structural failures that abort a whole pipeline request.
///
/// Row-level anomalies (an unreadable duration, a volume without a unit)
/// never surface here; they degrade to a zero contribution instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("missing required column: {column}")]
    MissingColumn { column: String },
    #[error("unparseable start date {token:?} in row {row}")]
    DateParseFailure { token: String, row: usize },
    #[error("unknown chart selector: {value}")]
    InvalidSelector { value: String },
}

impl PipelineError {
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    pub fn invalid_selector(value: impl Into<String>) -> Self {
        Self::InvalidSelector {
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
