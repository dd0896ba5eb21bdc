//! Output resources and idempotent transaction bundles.

pub mod bundle;
pub mod resource;

pub use bundle::{
    BundleEntry, BundleEntryRequest, BundleType, HttpVerb, ResourceBundle, assemble,
};
pub use resource::OutputResource;
