//! Tests for identifier pseudonymization.

use obds_model::{IdentifierSalts, ResourceKind};
use obds_transform::{IdentifierHasher, Pseudonym};
use proptest::prelude::*;

fn hasher() -> IdentifierHasher {
    IdentifierHasher::new(IdentifierSalts::default())
}

#[test]
fn same_input_same_pseudonym() {
    let hasher = hasher();
    assert_eq!(
        hasher.hash(ResourceKind::Patient, "X"),
        hasher.hash(ResourceKind::Patient, "X")
    );
}

#[test]
fn different_ids_differ() {
    let hasher = hasher();
    assert_ne!(
        hasher.hash(ResourceKind::Patient, "X"),
        hasher.hash(ResourceKind::Patient, "Y")
    );
}

#[test]
fn kinds_use_different_salts() {
    let hasher = hasher();
    let patient = hasher.hash(ResourceKind::Patient, "X").unwrap();
    let condition = hasher.hash(ResourceKind::Condition, "X").unwrap();
    let surrogate = hasher.hash(ResourceKind::Surrogate, "X").unwrap();
    assert_ne!(patient, condition);
    assert_ne!(patient, surrogate);
}

#[test]
fn independent_hashers_agree() {
    let first = IdentifierHasher::new(IdentifierSalts::default());
    let second = IdentifierHasher::new(IdentifierSalts::default());
    assert_eq!(
        first.hash(ResourceKind::Procedure, "000123456"),
        second.hash(ResourceKind::Procedure, "000123456")
    );
}

proptest! {
    #[test]
    fn pseudonyms_are_lowercase_hex(raw in "\\PC{1,40}") {
        let pseudonym = hasher().hash(ResourceKind::Observation, &raw).unwrap();
        prop_assert_eq!(pseudonym.as_str().len(), Pseudonym::LEN);
        prop_assert!(pseudonym
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn distinct_ids_have_distinct_pseudonyms(a in "[0-9A-Z]{1,12}", b in "[0-9A-Z]{1,12}") {
        prop_assume!(a != b);
        let hasher = hasher();
        prop_assert_ne!(
            hasher.hash(ResourceKind::Patient, &a),
            hasher.hash(ResourceKind::Patient, &b)
        );
    }
}
