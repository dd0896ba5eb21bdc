//! Report consolidation and mapping core.
//!
//! - **consolidate**: latest-version selection and priority ordering
//! - **mapper**: the [`ReportMapper`] seam for caller mapping policy
//! - **pipeline**: one batch from raw reports to a transaction bundle
//! - **patient**: reference mapper producing pseudonymized patients

pub mod consolidate;
pub mod error;
pub mod mapper;
pub mod patient;
pub mod pipeline;

pub use consolidate::{CanonicalReportSet, prioritise_latest_reports};
pub use error::{MappingError, PipelineError, Result};
pub use mapper::{MappingContext, ReportMapper};
pub use patient::PatientMapper;
pub use pipeline::{BatchOutcome, FailurePolicy, process_batch};
