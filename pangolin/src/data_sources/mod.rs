//! Name-lookup data sources

pub mod role;
pub mod site;

pub use role::RoleDataSource;
pub use site::SiteDataSource;
