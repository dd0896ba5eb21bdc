//! Deterministic identifier pseudonymization.
//!
//! A pseudonym is the lowercase hex SHA-256 of `"{salt}|{raw_id}"`, where
//! the salt depends on the resource kind. Surrogate ids are hashed without a
//! salt. The same input always yields the same pseudonym, so reprocessing a
//! report updates the existing resource instead of creating a new one.

use std::fmt;

use obds_model::{IdentifierSalts, ResourceKind};
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// A 64 character lowercase hex digest standing in for a raw identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pseudonym(String);

impl Pseudonym {
    pub const LEN: usize = 64;

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Pseudonym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Pseudonym {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl From<Pseudonym> for String {
    fn from(value: Pseudonym) -> Self {
        value.0
    }
}

/// Hashes raw identifiers with per-kind salts.
#[derive(Debug, Clone, Default)]
pub struct IdentifierHasher {
    salts: IdentifierSalts,
}

impl IdentifierHasher {
    pub fn new(salts: IdentifierSalts) -> Self {
        Self { salts }
    }

    pub fn salts(&self) -> &IdentifierSalts {
        &self.salts
    }

    /// Pseudonym for `raw_id` as a resource of `kind`.
    ///
    /// Returns `None` for [`ResourceKind::Unknown`]; callers must decide
    /// what a missing pseudonym means for them.
    pub fn hash(&self, kind: ResourceKind, raw_id: &str) -> Option<Pseudonym> {
        if kind == ResourceKind::Surrogate {
            return Some(Self::hash_surrogate(raw_id));
        }
        let salt = self.salts.salt_for(kind)?;
        let input = format!("{salt}|{raw_id}");
        Some(Pseudonym(sha256_hex(input.as_bytes())))
    }

    /// Unsalted pseudonym, used for ids composed from other pseudonyms.
    pub fn hash_surrogate(raw_id: &str) -> Pseudonym {
        Pseudonym(sha256_hex(raw_id.as_bytes()))
    }
}
