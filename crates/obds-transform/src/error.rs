use thiserror::Error;

/// Format errors raised while normalizing a registry date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("invalid date `{value}`: expected DD.MM.YYYY")]
    Pattern { value: String },

    #[error("invalid date `{value}`: {source}")]
    Calendar {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl DateError {
    /// The raw value that failed to parse.
    pub fn value(&self) -> &str {
        match self {
            Self::Pattern { value } | Self::Calendar { value, .. } => value,
        }
    }
}
