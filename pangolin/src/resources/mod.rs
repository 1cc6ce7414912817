//! Managed resource adapters

pub mod app_resource;
pub mod organization;
pub mod role;
pub mod site_resource;
pub mod target;

pub use app_resource::AppResource;
pub use organization::OrganizationResource;
pub use role::RoleResource;
pub use site_resource::SiteResource;
pub use target::TargetResource;
