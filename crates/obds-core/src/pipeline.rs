//! Batch processing: consolidate, map and assemble one delivered batch.
//!
//! A batch is typically every known report version for one patient. The
//! pipeline is synchronous and keeps no state between calls; ordering across
//! batches for the same key is the delivery layer's concern.

use std::collections::HashSet;
use std::time::Instant;

use obds_model::{MapperSettings, VersionedReport};
use obds_output::{OutputResource, ResourceBundle, assemble};
use obds_transform::IdentifierHasher;
use tracing::{debug, info, info_span, warn};

use crate::consolidate::prioritise_latest_reports;
use crate::error::{PipelineError, Result};
use crate::mapper::{MappingContext, ReportMapper};

/// What to do when a single record fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Record the failure and continue with the next report.
    #[default]
    Continue,
    /// Abort the batch on the first failure.
    FailFast,
}

/// Outcome of one batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    /// `None` when no report produced a resource.
    pub bundle: Option<ResourceBundle>,
    /// Per-record failures; empty under [`FailurePolicy::FailFast`].
    pub failures: Vec<PipelineError>,
    /// Number of canonical reports handed to the mapper.
    pub mapped_reports: usize,
}

impl BatchOutcome {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Keeps the first resource per upsert address; a transaction may not
/// touch the same resource twice.
fn push_unique(
    resources: &mut Vec<OutputResource>,
    seen: &mut HashSet<String>,
    resource: OutputResource,
) {
    let address = resource.address();
    if seen.insert(address) {
        resources.push(resource);
    } else {
        debug!(
            resource_type = %resource.resource_type,
            "resource already in bundle, keeping the higher priority one"
        );
    }
}

/// Consolidates `reports`, maps every canonical report with `mapper` and
/// assembles the resulting resources into one transaction bundle.
///
/// # Errors
///
/// Only under [`FailurePolicy::FailFast`]: the first consolidation or
/// mapping failure is returned.
pub fn process_batch<M>(
    reports: &[VersionedReport],
    mapper: &M,
    settings: &MapperSettings,
    policy: FailurePolicy,
) -> Result<BatchOutcome>
where
    M: ReportMapper + ?Sized,
{
    let span = info_span!("batch", mapper = mapper.name(), reports = reports.len());
    let _guard = span.enter();
    let start = Instant::now();

    let canonical = prioritise_latest_reports(
        reports,
        settings.priority_order.as_slice(),
        settings.report_filter.as_ref(),
    );

    let mut failures: Vec<PipelineError> = Vec::new();
    for rejected in canonical.rejected.iter().cloned() {
        let error = PipelineError::Consolidation(rejected);
        if policy == FailurePolicy::FailFast {
            return Err(error);
        }
        failures.push(error);
    }

    let hasher = IdentifierHasher::new(settings.salts.clone());
    let context = MappingContext::new(settings, &hasher);
    let mut resources = Vec::new();
    let mut seen = HashSet::new();

    for report in canonical.iter() {
        // Consolidation already proved the report id is present.
        let report_id = report.report_id().unwrap_or_default().to_string();
        match mapper.map_report(report, &context) {
            Ok(mapped) => {
                debug!(report_id = %report_id, resources = mapped.len(), "mapped report");
                for resource in mapped {
                    push_unique(&mut resources, &mut seen, resource);
                }
            }
            Err(source) => {
                let error = PipelineError::Mapping { report_id, source };
                if policy == FailurePolicy::FailFast {
                    return Err(error);
                }
                warn!(error = %error, "report skipped");
                failures.push(error);
            }
        }
    }

    let bundle = (!resources.is_empty()).then(|| assemble(resources));
    info!(
        canonical = canonical.len(),
        entries = bundle.as_ref().map_or(0, ResourceBundle::len),
        failures = failures.len(),
        duration_ms = start.elapsed().as_millis(),
        "batch complete"
    );

    Ok(BatchOutcome {
        bundle,
        failures,
        mapped_reports: canonical.len(),
    })
}
