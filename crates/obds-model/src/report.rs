//! Versioned oBDS report records and their field accessors.
//!
//! A [`VersionedReport`] is one submission event exported from the cancer
//! registry. Resubmissions of the same logical report share a report id and
//! carry a higher version number; a record is never mutated in place.
//!
//! The document structure mirrors the registry export after XML parsing:
//!
//! ```text
//! document
//! ├── sender            (sender id, software id)
//! └── patient
//!     ├── master_data   (patient id, ...)
//!     └── report        (report id, report reason, ...)
//!         └── tumor_assignment (tumor id, ...)
//! ```
//!
//! Fields not needed for consolidation are kept in the `details` maps so
//! mapping code can reach them without this crate modelling every element.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ModelError, ReportField, Result};

/// One submitted report instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedReport {
    /// Export row identifier assigned by the registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_id: Option<u64>,
    /// Resubmission counter, strictly increasing per report id.
    pub version_number: u32,
    pub document: ReportDocument,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<SenderInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<PatientSection>,
}

/// Registry header identifying who produced the export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub software_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_data: Option<PatientMasterData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientMasterData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[serde(flatten)]
    pub details: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tumor_assignment: Option<TumorAssignment>,
    #[serde(flatten)]
    pub details: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TumorAssignment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tumor_id: Option<String>,
    #[serde(flatten)]
    pub details: BTreeMap<String, Value>,
}

/// Blank values count as missing; present values are returned as delivered.
fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

impl VersionedReport {
    fn report_section(&self) -> Option<&ReportSection> {
        self.document.patient.as_ref()?.report.as_ref()
    }

    /// Report id when present, used to give errors a locatable context.
    fn report_id_hint(&self) -> Option<&str> {
        present(self.report_section()?.report_id.as_ref())
    }

    fn require<'a>(&self, value: Option<&'a str>, field: ReportField) -> Result<&'a str> {
        value.ok_or_else(|| ModelError::missing(field, self.report_id_hint()))
    }

    pub fn patient_id(&self) -> Result<&str> {
        let value = self
            .document
            .patient
            .as_ref()
            .and_then(|patient| patient.master_data.as_ref())
            .and_then(|master| present(master.patient_id.as_ref()));
        self.require(value, ReportField::PatientId)
    }

    pub fn tumor_id(&self) -> Result<&str> {
        let value = self
            .report_section()
            .and_then(|report| report.tumor_assignment.as_ref())
            .and_then(|tumor| present(tumor.tumor_id.as_ref()));
        self.require(value, ReportField::TumorId)
    }

    pub fn report_reason(&self) -> Result<&str> {
        let value = self
            .report_section()
            .and_then(|report| present(report.report_reason.as_ref()));
        self.require(value, ReportField::ReportReason)
    }

    pub fn report_id(&self) -> Result<&str> {
        self.require(self.report_id_hint(), ReportField::ReportId)
    }

    /// Optional string element of the patient master data, e.g. `birth_date`.
    pub fn patient_detail(&self, key: &str) -> Option<&str> {
        self.document
            .patient
            .as_ref()?
            .master_data
            .as_ref()?
            .details
            .get(key)?
            .as_str()
    }

    pub fn sender_id(&self) -> Option<&str> {
        present(self.document.sender.as_ref()?.sender_id.as_ref())
    }

    pub fn software_id(&self) -> Option<&str> {
        present(self.document.sender.as_ref()?.software_id.as_ref())
    }
}

/// Builder for test fixtures and adapters that already hold the flat fields.
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    export_id: Option<u64>,
    version_number: u32,
    patient_id: Option<String>,
    tumor_id: Option<String>,
    report_id: Option<String>,
    report_reason: Option<String>,
    sender: Option<SenderInfo>,
    patient_details: BTreeMap<String, Value>,
}

impl ReportBuilder {
    pub fn new(report_id: impl Into<String>, version_number: u32) -> Self {
        Self {
            report_id: Some(report_id.into()),
            version_number,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn export_id(mut self, export_id: u64) -> Self {
        self.export_id = Some(export_id);
        self
    }

    #[must_use]
    pub fn patient_id(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = Some(patient_id.into());
        self
    }

    #[must_use]
    pub fn tumor_id(mut self, tumor_id: impl Into<String>) -> Self {
        self.tumor_id = Some(tumor_id.into());
        self
    }

    #[must_use]
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.report_reason = Some(reason.into());
        self
    }

    #[must_use]
    pub fn patient_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.patient_details
            .insert(key.into(), Value::String(value.into()));
        self
    }

    #[must_use]
    pub fn sender(mut self, sender_id: impl Into<String>, software_id: impl Into<String>) -> Self {
        self.sender = Some(SenderInfo {
            sender_id: Some(sender_id.into()),
            software_id: Some(software_id.into()),
        });
        self
    }

    pub fn build(self) -> VersionedReport {
        let tumor_assignment = self.tumor_id.map(|tumor_id| TumorAssignment {
            tumor_id: Some(tumor_id),
            details: BTreeMap::new(),
        });
        VersionedReport {
            export_id: self.export_id,
            version_number: self.version_number,
            document: ReportDocument {
                sender: self.sender,
                patient: Some(PatientSection {
                    master_data: Some(PatientMasterData {
                        patient_id: self.patient_id,
                        details: self.patient_details,
                    }),
                    report: Some(ReportSection {
                        report_id: self.report_id,
                        report_reason: self.report_reason,
                        tumor_assignment,
                        details: BTreeMap::new(),
                    }),
                }),
            },
        }
    }
}
