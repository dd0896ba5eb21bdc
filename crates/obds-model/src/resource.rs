//! Resource kinds recognised by the identifier hasher and bundle assembler.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of resource kinds.
///
/// `Surrogate` hashes without a salt; `Unknown` never produces a pseudonym.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    Patient,
    Condition,
    Observation,
    MedicationStatement,
    Procedure,
    Surrogate,
    Unknown,
}

impl ResourceKind {
    pub const ALL: [Self; 7] = [
        Self::Patient,
        Self::Condition,
        Self::Observation,
        Self::MedicationStatement,
        Self::Procedure,
        Self::Surrogate,
        Self::Unknown,
    ];

    /// FHIR resource type name (`"MedicationStatement"`, ...).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Patient => "Patient",
            Self::Condition => "Condition",
            Self::Observation => "Observation",
            Self::MedicationStatement => "MedicationStatement",
            Self::Procedure => "Procedure",
            Self::Surrogate => "Surrogate",
            Self::Unknown => "Unknown",
        }
    }

    /// Parses a kind name, ignoring case, `-` and `_`.
    ///
    /// Anything unrecognised maps to [`ResourceKind::Unknown`].
    pub fn parse(value: &str) -> Self {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "patient" => Self::Patient,
            "condition" => Self::Condition,
            "observation" => Self::Observation,
            "medicationstatement" => Self::MedicationStatement,
            "procedure" => Self::Procedure,
            "surrogate" => Self::Surrogate,
            _ => Self::Unknown,
        }
    }
}

impl From<&str> for ResourceKind {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
