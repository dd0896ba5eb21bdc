//! Transaction bundles with idempotent upsert entries.
//!
//! Every entry addresses its resource by `"{type}/{id}"` and requests a
//! `PUT` to that address. Applying the same bundle twice rewrites identical
//! content instead of creating duplicates, which makes reprocessing a batch
//! safe.

use serde::{Deserialize, Serialize};

use crate::resource::OutputResource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleType {
    #[default]
    Transaction,
}

/// Request method of a bundle entry. Only replace-or-create is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    #[default]
    Put,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleEntryRequest {
    pub method: HttpVerb,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    pub full_url: String,
    pub resource: OutputResource,
    pub request: BundleEntryRequest,
}

impl BundleEntry {
    pub fn upsert(resource: OutputResource) -> Self {
        let address = resource.address();
        Self {
            full_url: address.clone(),
            resource,
            request: BundleEntryRequest {
                method: HttpVerb::Put,
                url: address,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "resourceType", rename = "Bundle")]
pub struct ResourceBundle {
    #[serde(rename = "type")]
    pub bundle_type: BundleType,
    #[serde(default)]
    pub entry: Vec<BundleEntry>,
}

impl ResourceBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `resource` as an upsert entry.
    pub fn push(&mut self, resource: OutputResource) -> &mut Self {
        self.entry.push(BundleEntry::upsert(resource));
        self
    }

    pub fn entries(&self) -> &[BundleEntry] {
        &self.entry
    }

    pub fn len(&self) -> usize {
        self.entry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_empty()
    }

    /// Entry addresses in bundle order.
    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.entry.iter().map(|entry| entry.full_url.as_str())
    }
}

/// Wraps resources into a transaction bundle, preserving input order.
pub fn assemble<I>(resources: I) -> ResourceBundle
where
    I: IntoIterator<Item = OutputResource>,
{
    ResourceBundle {
        bundle_type: BundleType::Transaction,
        entry: resources.into_iter().map(BundleEntry::upsert).collect(),
    }
}
