//! Command building blocks shared by the binary and its tests.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use obds_core::{BatchOutcome, FailurePolicy, PatientMapper, prioritise_latest_reports, process_batch};
use obds_model::{MapperSettings, ModelError, ResourceKind, VersionedReport};
use obds_output::ResourceBundle;
use obds_transform::{DateError, IdentifierHasher, Pseudonym, normalize_adt_date};
use serde::Serialize;
use tracing::{debug, info};

use crate::logging::redact_value;

/// One canonical report as shown by `consolidate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsolidatedRow {
    pub report_id: String,
    pub reason: String,
    pub version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_id: Option<u64>,
    /// Patient pseudonym; the raw patient id is never printed.
    pub patient: Option<String>,
}

/// Canonical reports in processing order plus the records that were rejected.
pub fn consolidation_rows(
    reports: &[VersionedReport],
    settings: &MapperSettings,
) -> (Vec<ConsolidatedRow>, Vec<ModelError>) {
    let canonical = prioritise_latest_reports(
        reports,
        settings.priority_order.as_slice(),
        settings.report_filter.as_ref(),
    );
    let hasher = IdentifierHasher::new(settings.salts.clone());
    let rows = canonical
        .iter()
        .map(|report| ConsolidatedRow {
            report_id: report.report_id().unwrap_or_default().to_string(),
            reason: report.report_reason().unwrap_or_default().to_string(),
            version: report.version_number,
            export_id: report.export_id,
            patient: report
                .patient_id()
                .ok()
                .and_then(|id| hasher.hash(ResourceKind::Patient, id))
                .map(Pseudonym::into_string),
        })
        .collect();
    (rows, canonical.rejected)
}

/// Applies `--priority` and `--filter` overrides; empty lists keep the settings.
#[must_use]
pub fn override_settings(
    settings: MapperSettings,
    priority: &[String],
    filter: &[String],
) -> MapperSettings {
    let mut settings = settings;
    if !priority.is_empty() {
        settings = settings.with_priority_order(priority.iter().cloned());
    }
    if !filter.is_empty() {
        settings = settings.with_report_filter(filter.iter().cloned());
    }
    settings
}

/// Pseudonym for `raw_id` as a resource of the named kind.
pub fn pseudonymize(kind_name: &str, raw_id: &str, settings: &MapperSettings) -> Result<Pseudonym> {
    let kind = ResourceKind::parse(kind_name);
    let hasher = IdentifierHasher::new(settings.salts.clone());
    match hasher.hash(kind, raw_id) {
        Some(pseudonym) => {
            debug!(kind = %kind, id = redact_value(raw_id), "pseudonymized identifier");
            Ok(pseudonym)
        }
        None => bail!("no hash for kind `{kind_name}`"),
    }
}

/// ISO date for a registry date, or `"absent"` for a blank one.
pub fn render_date(value: &str) -> std::result::Result<String, DateError> {
    Ok(normalize_adt_date(Some(value))?
        .map_or_else(|| "absent".to_string(), |date| date.to_fhir_string()))
}

/// Runs the patient mapper over one batch.
pub fn bundle_reports(
    reports: &[VersionedReport],
    settings: &MapperSettings,
    fail_fast: bool,
) -> Result<BatchOutcome> {
    let policy = if fail_fast {
        FailurePolicy::FailFast
    } else {
        FailurePolicy::Continue
    };
    process_batch(reports, &PatientMapper, settings, policy).context("process batch")
}

/// Writes the bundle as pretty JSON to `output`, or stdout when `None`.
pub fn write_bundle(bundle: &ResourceBundle, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(bundle).context("serialize bundle")?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), entries = bundle.len(), "wrote bundle");
        }
        None => println!("{json}"),
    }
    Ok(())
}
