//! The seam between consolidation and caller-supplied mapping policy.
//!
//! Which resources are built from which report reason is decided by a
//! [`ReportMapper`]. The pipeline hands every canonical report to the
//! mapper together with a [`MappingContext`] that carries the shared
//! hashing, date and provenance helpers.

use obds_model::{MapperSettings, ResourceKind, VersionedReport};
use obds_output::OutputResource;
use obds_transform::{
    DayPrecisionDateTime, IdentifierHasher, Pseudonym, normalize_adt_date, profile_meta_source,
};

use crate::error::MappingError;

/// Builds output resources from one canonical report.
pub trait ReportMapper: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Maps `report` to zero or more resources.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] when a required field is missing or a
    /// field cannot be parsed. The failure is confined to this report.
    fn map_report(
        &self,
        report: &VersionedReport,
        context: &MappingContext<'_>,
    ) -> Result<Vec<OutputResource>, MappingError>;
}

/// Shared helpers available to every mapper call.
#[derive(Debug, Clone, Copy)]
pub struct MappingContext<'a> {
    pub settings: &'a MapperSettings,
    pub hasher: &'a IdentifierHasher,
}

impl<'a> MappingContext<'a> {
    pub fn new(settings: &'a MapperSettings, hasher: &'a IdentifierHasher) -> Self {
        Self { settings, hasher }
    }

    /// Pseudonym for `raw_id`; kinds without a hash are a mapping error.
    pub fn pseudonym(&self, kind: ResourceKind, raw_id: &str) -> Result<Pseudonym, MappingError> {
        self.hasher
            .hash(kind, raw_id)
            .ok_or(MappingError::NoPseudonym(kind))
    }

    /// Normalizes a registry date, naming `field` in any error.
    pub fn date(
        &self,
        field: &str,
        value: Option<&str>,
    ) -> Result<Option<DayPrecisionDateTime>, MappingError> {
        normalize_adt_date(value).map_err(|source| MappingError::Date {
            field: field.to_string(),
            source,
        })
    }

    /// `meta.source` for resources mapped from `report`.
    pub fn meta_source(&self, report: &VersionedReport) -> String {
        profile_meta_source(
            report.sender_id(),
            report.software_id(),
            &self.settings.app_version,
        )
    }
}
