//! Provider trait and related types
//!
//! A provider parses its own configuration once, builds the shared
//! transport, and hands it to resources and data sources through the
//! configure hooks. The host's plugin-protocol server drives this trait;
//! serving it is outside this crate.

use crate::context::Context;
use crate::data_source::DataSourceWithConfigure;
use crate::resource::ResourceWithConfigure;
use crate::schema::Schema;
use crate::types::{Diagnostic, DynamicValue};
use crate::Result;
use async_trait::async_trait;
use std::any::Any;
use std::sync::Arc;

#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider type name, the prefix of every resource and data source
    /// type name (e.g., "pangolin")
    fn type_name(&self) -> &str;

    /// Called to get the provider-level configuration schema
    async fn schema(&self, ctx: Context, request: ProviderSchemaRequest) -> ProviderSchemaResponse;

    /// Called once before any resource or data source operation.
    /// A successful configure returns the provider data shared by all
    /// adapters (typically an Arc-wrapped API client).
    async fn configure(
        &mut self,
        ctx: Context,
        request: ConfigureProviderRequest,
    ) -> ConfigureProviderResponse;

    /// Instantiate the resource registered under `type_name`
    async fn create_resource(&self, type_name: &str) -> Result<Box<dyn ResourceWithConfigure>>;

    /// Instantiate the data source registered under `type_name`
    async fn create_data_source(
        &self,
        type_name: &str,
    ) -> Result<Box<dyn DataSourceWithConfigure>>;

    /// Type names of every managed resource
    fn resource_type_names(&self) -> Vec<String>;

    /// Type names of every data source
    fn data_source_type_names(&self) -> Vec<String>;
}

pub struct ProviderSchemaRequest;

pub struct ProviderSchemaResponse {
    pub schema: Schema,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct ConfigureProviderRequest {
    pub config: DynamicValue,
}

pub struct ConfigureProviderResponse {
    pub provider_data: Option<Arc<dyn Any + Send + Sync>>,
    pub diagnostics: Vec<Diagnostic>,
}
