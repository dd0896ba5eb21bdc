use obds_model::{ModelError, ResourceKind};
use obds_transform::DateError;
use thiserror::Error;

/// Failure while mapping a single report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("field `{field}`: {source}")]
    Date {
        field: String,
        #[source]
        source: DateError,
    },

    #[error("no pseudonym for resource kind {0}")]
    NoPseudonym(ResourceKind),
}

/// Failure attributed to one record of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("report could not be consolidated: {0}")]
    Consolidation(#[source] ModelError),

    #[error("report {report_id}: {source}")]
    Mapping {
        report_id: String,
        #[source]
        source: MappingError,
    },
}

impl PipelineError {
    /// Report id of the failing record, when known.
    pub fn report_id(&self) -> Option<&str> {
        match self {
            Self::Consolidation(ModelError::MissingField { report_id, .. }) => report_id.as_deref(),
            Self::Mapping { report_id, .. } => Some(report_id),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
