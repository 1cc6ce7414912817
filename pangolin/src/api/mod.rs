//! Typed client for the Pangolin management API
//!
//! One module per entity, layered on the shared JSON/HTTP transport in
//! [`client`]. All endpoints speak the uniform response envelope; write-once
//! field suppression on update lives here rather than in the adapters.

pub mod client;
pub mod error;
pub mod org;
pub mod resource;
pub mod role;
pub mod site;
pub mod site_resource;
pub mod target;

#[cfg(test)]
pub mod test_helpers;

pub use client::{ApiEnvelope, Client};
pub use error::ApiError;
pub use org::Organization;
pub use resource::AppResource;
pub use role::{Role, DEFAULT_REPLACEMENT_ROLE_ID};
pub use site::{Site, SiteCreate};
pub use site_resource::{SiteResource, SiteResourceWrite};
pub use target::{Target, TargetWrite};
