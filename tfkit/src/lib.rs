//! tfkit - plugin framework for infrastructure-as-code providers in Rust
//!
//! Declarative schemas with tri-state attribute values (known / null /
//! unknown), plan modifiers and validators, and the Provider / Resource /
//! DataSource traits an infrastructure host drives through its plan/apply
//! lifecycle. The host's wire-protocol server is an external collaborator;
//! this crate defines the interfaces it calls.

// Core modules
pub mod context;
pub mod error;
pub mod schema;
pub mod types;

// Provider API modules
pub mod data_source;
pub mod provider;
pub mod resource;

// Helper modules
pub mod defaults;
pub mod import;
pub mod plan_modifier;
pub mod validator;

// Re-exports for convenience
pub use context::Context;
pub use data_source::{DataSource, DataSourceWithConfigure};
pub use error::{Result, TfkitError};
pub use import::import_state_passthrough_id;
pub use provider::{ConfigureProviderRequest, ConfigureProviderResponse, Provider};
pub use resource::{Resource, ResourceWithConfigure, ResourceWithImportState};
pub use schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
pub use types::{
    AttributePath, Config, Diagnostic, DiagnosticSeverity, Dynamic, DynamicValue, State,
};
