//! Data model for consolidating oBDS cancer registry reports.

pub mod error;
pub mod options;
pub mod reason;
pub mod report;
pub mod resource;

pub use error::{ModelError, ReportField, Result};
pub use options::{IdentifierSalts, MapperSettings};
pub use report::{
    PatientMasterData, PatientSection, ReportBuilder, ReportDocument, ReportSection, SenderInfo,
    TumorAssignment, VersionedReport,
};
pub use resource::ResourceKind;
