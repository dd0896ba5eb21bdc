//! Latest-version consolidation of versioned reports.
//!
//! A registry batch holds every submitted version of each report. Only the
//! newest version of a logical report may be mapped, otherwise superseded
//! data would overwrite current data downstream. Consolidation:
//!
//! 1. drops reports whose reason is not in the optional filter,
//! 2. keeps the highest version per report id (a candidate replaces the
//!    current one only when its version is strictly greater, so on equal
//!    versions the first record in input order is kept and a warning logged),
//! 3. orders the survivors by the rank of their reason in the priority list,
//!    unlisted reasons last. The sort is stable and the pre-sort order is
//!    first-seen order of the report ids.
//!
//! Records missing a report id or reason cannot be placed and are returned
//! as rejections instead of aborting the batch.

use std::collections::{BTreeSet, HashMap};

use obds_model::{ModelError, VersionedReport};
use tracing::{debug, info, warn};

/// Consolidation result: canonical reports in priority order plus the
/// records that could not be consolidated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalReportSet<'a> {
    pub reports: Vec<&'a VersionedReport>,
    pub rejected: Vec<ModelError>,
}

impl<'a> CanonicalReportSet<'a> {
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a VersionedReport> + '_ {
        self.reports.iter().copied()
    }
}

/// Rank of each reason in `priority_order`; the first occurrence wins.
fn priority_ranks<S: AsRef<str>>(priority_order: &[S]) -> HashMap<&str, usize> {
    let mut ranks = HashMap::with_capacity(priority_order.len());
    for (index, reason) in priority_order.iter().enumerate() {
        ranks.entry(reason.as_ref()).or_insert(index);
    }
    ranks
}

/// Collapses `reports` to the latest version per report id, filtered and
/// ordered by report reason.
pub fn prioritise_latest_reports<'a, S>(
    reports: &'a [VersionedReport],
    priority_order: &[S],
    filter: Option<&BTreeSet<String>>,
) -> CanonicalReportSet<'a>
where
    S: AsRef<str>,
{
    let mut latest: Vec<(&'a str, &'a VersionedReport)> = Vec::new();
    let mut positions: HashMap<&'a str, usize> = HashMap::new();
    let mut rejected = Vec::new();

    for report in reports {
        let (report_id, reason) = match (report.report_id(), report.report_reason()) {
            (Ok(report_id), Ok(reason)) => (report_id, reason),
            (Err(err), _) | (_, Err(err)) => {
                warn!(error = %err, "report cannot be consolidated");
                rejected.push(err);
                continue;
            }
        };
        if let Some(filter) = filter
            && !filter.contains(reason)
        {
            continue;
        }
        match positions.get(report_id) {
            None => {
                positions.insert(report_id, latest.len());
                latest.push((reason, report));
            }
            Some(&position) => {
                let current = latest[position].1;
                if report.version_number > current.version_number {
                    debug!(
                        report_id,
                        version = report.version_number,
                        superseded = current.version_number,
                        "newer report version"
                    );
                    latest[position] = (reason, report);
                } else if report.version_number == current.version_number {
                    warn!(
                        report_id,
                        version = report.version_number,
                        "duplicate report version, keeping the first one seen"
                    );
                }
            }
        }
    }

    let ranks = priority_ranks(priority_order);
    latest.sort_by_key(|(reason, _)| ranks.get(reason).copied().unwrap_or(usize::MAX));

    info!(
        input = reports.len(),
        canonical = latest.len(),
        rejected = rejected.len(),
        "consolidated reports"
    );

    CanonicalReportSet {
        reports: latest.into_iter().map(|(_, report)| report).collect(),
        rejected,
    }
}

#[cfg(test)]
mod tests {
    use obds_model::ReportBuilder;

    use super::*;

    fn report(id: &str, version: u32, reason: &str) -> VersionedReport {
        ReportBuilder::new(id, version)
            .patient_id("000000001")
            .tumor_id("1")
            .reason(reason)
            .build()
    }

    fn ids_and_versions(set: &CanonicalReportSet<'_>) -> Vec<(String, u32)> {
        set.iter()
            .map(|r| (r.report_id().unwrap().to_string(), r.version_number))
            .collect()
    }

    #[test]
    fn ranks_keep_first_occurrence() {
        let ranks = priority_ranks(&["a", "b", "a"]);
        assert_eq!(ranks.get("a"), Some(&0));
        assert_eq!(ranks.get("b"), Some(&1));
    }

    #[test]
    fn older_version_after_newer_does_not_replace() {
        let reports = vec![report("1", 3, "diagnosis"), report("1", 2, "diagnosis")];
        let set = prioritise_latest_reports::<&str>(&reports, &[], None);
        assert_eq!(ids_and_versions(&set), vec![("1".to_string(), 3)]);
    }

    #[test]
    fn equal_versions_keep_first_seen() {
        let first = report("1", 2, "diagnosis");
        let second = report("1", 2, "treatment-end");
        let reports = vec![first.clone(), second];
        let set = prioritise_latest_reports::<&str>(&reports, &[], None);
        assert_eq!(set.reports, vec![&first]);
    }

    #[test]
    fn empty_priority_keeps_first_seen_order() {
        let reports = vec![
            report("b", 1, "status-change"),
            report("a", 1, "diagnosis"),
            report("b", 2, "status-change"),
        ];
        let set = prioritise_latest_reports::<&str>(&reports, &[], None);
        assert_eq!(
            ids_and_versions(&set),
            vec![("b".to_string(), 2), ("a".to_string(), 1)]
        );
    }

    #[test]
    fn rejects_records_without_report_id() {
        let broken = ReportBuilder::new("", 1).reason("diagnosis").build();
        let reports = vec![broken, report("1", 1, "diagnosis")];
        let set = prioritise_latest_reports(&reports, &["diagnosis"], None);
        assert_eq!(set.len(), 1);
        assert_eq!(set.rejected.len(), 1);
    }
}
