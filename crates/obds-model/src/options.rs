//! Configuration values consumed by the mapping core.
//!
//! The core never reads files; callers deserialize [`MapperSettings`] from
//! whatever source they use (the CLI reads TOML) and pass it in.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::reason::DEFAULT_PRIORITY;
use crate::resource::ResourceKind;

/// Per-resource-kind salts for identifier pseudonymization.
///
/// Salts are typically the identifier system URIs of the target FHIR
/// server, so the same raw id hashes differently per resource type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentifierSalts {
    pub patient_id: String,
    pub condition_id: String,
    pub observation_id: String,
    pub medication_statement_id: String,
    pub procedure_id: String,
}

impl Default for IdentifierSalts {
    fn default() -> Self {
        Self {
            patient_id: "urn:obds-to-fhir:sid:patient-id".to_string(),
            condition_id: "urn:obds-to-fhir:sid:condition-id".to_string(),
            observation_id: "urn:obds-to-fhir:sid:observation-id".to_string(),
            medication_statement_id: "urn:obds-to-fhir:sid:medication-statement-id".to_string(),
            procedure_id: "urn:obds-to-fhir:sid:procedure-id".to_string(),
        }
    }
}

impl IdentifierSalts {
    /// Salt for a kind; `None` for kinds that are not salted.
    pub fn salt_for(&self, kind: ResourceKind) -> Option<&str> {
        match kind {
            ResourceKind::Patient => Some(&self.patient_id),
            ResourceKind::Condition => Some(&self.condition_id),
            ResourceKind::Observation => Some(&self.observation_id),
            ResourceKind::MedicationStatement => Some(&self.medication_statement_id),
            ResourceKind::Procedure => Some(&self.procedure_id),
            ResourceKind::Surrogate | ResourceKind::Unknown => None,
        }
    }
}

/// Options controlling consolidation and mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperSettings {
    /// Application version stamped into `meta.source`.
    pub app_version: String,
    pub salts: IdentifierSalts,
    /// Report reasons in processing order; unlisted reasons sort last.
    pub priority_order: Vec<String>,
    /// Report reasons to keep. `None` keeps every reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_filter: Option<BTreeSet<String>>,
    /// Identifier system for patient identifiers on mapped resources.
    pub patient_identifier_system: String,
}

impl Default for MapperSettings {
    fn default() -> Self {
        Self {
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            salts: IdentifierSalts::default(),
            priority_order: DEFAULT_PRIORITY.iter().map(|r| (*r).to_string()).collect(),
            report_filter: None,
            patient_identifier_system: "urn:obds-to-fhir:sid:patient-id".to_string(),
        }
    }
}

impl MapperSettings {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = version.into();
        self
    }

    #[must_use]
    pub fn with_salts(mut self, salts: IdentifierSalts) -> Self {
        self.salts = salts;
        self
    }

    #[must_use]
    pub fn with_priority_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.priority_order = order.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_report_filter<I, S>(mut self, reasons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.report_filter = Some(reasons.into_iter().map(Into::into).collect());
        self
    }
}
