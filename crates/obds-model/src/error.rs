use std::fmt;

use thiserror::Error;

/// Required report fields read by the accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportField {
    PatientId,
    TumorId,
    ReportReason,
    ReportId,
}

impl ReportField {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PatientId => "patient id",
            Self::TumorId => "tumor id",
            Self::ReportReason => "report reason",
            Self::ReportId => "report id",
        }
    }
}

impl fmt::Display for ReportField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error(
        "report {}: missing required field `{field}`",
        .report_id.as_deref().unwrap_or("<unknown>")
    )]
    MissingField {
        field: ReportField,
        /// Report id when it could be read, for locating the source record.
        report_id: Option<String>,
    },
}

impl ModelError {
    pub(crate) fn missing(field: ReportField, report_id: Option<&str>) -> Self {
        Self::MissingField {
            field,
            report_id: report_id.map(str::to_string),
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
