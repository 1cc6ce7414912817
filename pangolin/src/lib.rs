//! Terraform-style provider for the Pangolin network-access service
//!
//! The provider parses `{base_url, token}` once, builds the shared API
//! client, and hands it to every resource and data source adapter through
//! the configure hooks.

pub mod api;
pub mod data_sources;
pub mod provider_data;
pub mod resources;

use async_trait::async_trait;
use std::sync::Arc;
use tfkit::context::Context;
use tfkit::data_source::DataSourceWithConfigure;
use tfkit::provider::{
    ConfigureProviderRequest, ConfigureProviderResponse, Provider, ProviderSchemaRequest,
    ProviderSchemaResponse,
};
use tfkit::resource::ResourceWithConfigure;
use tfkit::schema::{AttributeBuilder, AttributeType, SchemaBuilder};
use tfkit::types::{AttributePath, Diagnostic};
use tfkit::TfkitError;

use provider_data::PangolinProviderData;

/// Base URL used when neither the config nor the environment names one.
pub const DEFAULT_BASE_URL: &str = "https://api.pangolin.net/v1";

pub const BASE_URL_ENV: &str = "PANGOLIN_BASE_URL";
pub const TOKEN_ENV: &str = "PANGOLIN_TOKEN";

#[derive(Default)]
pub struct PangolinProvider;

impl PangolinProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Provider for PangolinProvider {
    fn type_name(&self) -> &str {
        "pangolin"
    }

    async fn schema(
        &self,
        _ctx: Context,
        _request: ProviderSchemaRequest,
    ) -> ProviderSchemaResponse {
        let schema = SchemaBuilder::new()
            .version(0)
            .attribute(
                AttributeBuilder::new("base_url", AttributeType::String)
                    .description(
                        "Pangolin API base URL. Can also be set via the PANGOLIN_BASE_URL \
                         environment variable. Defaults to https://api.pangolin.net/v1",
                    )
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("token", AttributeType::String)
                    .description(
                        "Pangolin API token. Can also be set via the PANGOLIN_TOKEN \
                         environment variable.",
                    )
                    .required()
                    .sensitive()
                    .build(),
            )
            .build();

        ProviderSchemaResponse {
            schema,
            diagnostics: vec![],
        }
    }

    async fn configure(
        &mut self,
        _ctx: Context,
        request: ConfigureProviderRequest,
    ) -> ConfigureProviderResponse {
        let mut diagnostics = vec![];

        let mut base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        if let Ok(configured) = request.config.get_string(&AttributePath::new("base_url")) {
            base_url = configured;
        }

        let mut token = std::env::var(TOKEN_ENV).unwrap_or_default();
        if let Ok(configured) = request.config.get_string(&AttributePath::new("token")) {
            token = configured;
        }

        if token.is_empty() {
            diagnostics.push(Diagnostic::error(
                "Missing API Token",
                "Pangolin API token must be provided via the 'token' attribute or \
                 PANGOLIN_TOKEN environment variable.",
            ));
            return ConfigureProviderResponse {
                provider_data: None,
                diagnostics,
            };
        }

        match api::Client::new(&base_url, &token) {
            Ok(client) => {
                tracing::info!(%base_url, "configured pangolin provider");
                let data = PangolinProviderData::new(client);
                ConfigureProviderResponse {
                    provider_data: Some(Arc::new(data)),
                    diagnostics,
                }
            }
            Err(e) => {
                diagnostics.push(Diagnostic::error(
                    "Failed to create API client",
                    e.to_string(),
                ));
                ConfigureProviderResponse {
                    provider_data: None,
                    diagnostics,
                }
            }
        }
    }

    async fn create_resource(
        &self,
        type_name: &str,
    ) -> tfkit::Result<Box<dyn ResourceWithConfigure>> {
        match type_name {
            "pangolin_organization" => Ok(Box::new(resources::OrganizationResource::new())),
            "pangolin_role" => Ok(Box::new(resources::RoleResource::new())),
            "pangolin_resource" => Ok(Box::new(resources::AppResource::new())),
            "pangolin_site_resource" => Ok(Box::new(resources::SiteResource::new())),
            "pangolin_target" => Ok(Box::new(resources::TargetResource::new())),
            _ => Err(TfkitError::ResourceNotFound(type_name.to_string())),
        }
    }

    async fn create_data_source(
        &self,
        type_name: &str,
    ) -> tfkit::Result<Box<dyn DataSourceWithConfigure>> {
        match type_name {
            "pangolin_role" => Ok(Box::new(data_sources::RoleDataSource::new())),
            "pangolin_site" => Ok(Box::new(data_sources::SiteDataSource::new())),
            _ => Err(TfkitError::DataSourceNotFound(type_name.to_string())),
        }
    }

    fn resource_type_names(&self) -> Vec<String> {
        vec![
            "pangolin_organization".to_string(),
            "pangolin_role".to_string(),
            "pangolin_resource".to_string(),
            "pangolin_site_resource".to_string(),
            "pangolin_target".to_string(),
        ]
    }

    fn data_source_type_names(&self) -> Vec<String> {
        vec!["pangolin_role".to_string(), "pangolin_site".to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tfkit::types::DynamicValue;

    fn configure_request(config: DynamicValue) -> ConfigureProviderRequest {
        ConfigureProviderRequest { config }
    }

    #[tokio::test]
    #[serial]
    async fn provider_configures_from_env_vars() {
        std::env::set_var(BASE_URL_ENV, "https://pangolin.example.com/v1");
        std::env::set_var(TOKEN_ENV, "env-token");

        let mut provider = PangolinProvider::new();
        let response = provider
            .configure(Context::new(), configure_request(DynamicValue::object()))
            .await;

        assert!(response.diagnostics.is_empty());
        assert!(response.provider_data.is_some());

        std::env::remove_var(BASE_URL_ENV);
        std::env::remove_var(TOKEN_ENV);
    }

    #[tokio::test]
    #[serial]
    async fn provider_config_overrides_env() {
        std::env::set_var(BASE_URL_ENV, "https://env.example.com/v1");
        std::env::set_var(TOKEN_ENV, "env-token");

        let mut config = DynamicValue::object();
        config
            .set_string(
                &AttributePath::new("base_url"),
                "https://config.example.com/v1".to_string(),
            )
            .unwrap();
        config
            .set_string(&AttributePath::new("token"), "config-token".to_string())
            .unwrap();

        let mut provider = PangolinProvider::new();
        let response = provider
            .configure(Context::new(), configure_request(config))
            .await;

        assert!(response.diagnostics.is_empty());
        assert!(response.provider_data.is_some());

        std::env::remove_var(BASE_URL_ENV);
        std::env::remove_var(TOKEN_ENV);
    }

    #[tokio::test]
    #[serial]
    async fn provider_requires_a_token() {
        std::env::remove_var(BASE_URL_ENV);
        std::env::remove_var(TOKEN_ENV);

        let mut provider = PangolinProvider::new();
        let response = provider
            .configure(Context::new(), configure_request(DynamicValue::object()))
            .await;

        assert_eq!(response.diagnostics.len(), 1);
        assert!(response.diagnostics[0].summary.contains("Missing API Token"));
        assert!(response.provider_data.is_none());
    }

    #[tokio::test]
    #[serial]
    async fn provider_rejects_invalid_base_url() {
        std::env::remove_var(BASE_URL_ENV);

        let mut config = DynamicValue::object();
        config
            .set_string(&AttributePath::new("base_url"), "not a url".to_string())
            .unwrap();
        config
            .set_string(&AttributePath::new("token"), "token".to_string())
            .unwrap();

        let mut provider = PangolinProvider::new();
        let response = provider
            .configure(Context::new(), configure_request(config))
            .await;

        assert_eq!(response.diagnostics.len(), 1);
        assert!(response.diagnostics[0]
            .summary
            .contains("Failed to create API client"));
    }

    #[tokio::test]
    async fn provider_creates_known_resources() {
        let provider = PangolinProvider::new();

        for name in provider.resource_type_names() {
            assert!(provider.create_resource(&name).await.is_ok());
        }

        let unknown = provider.create_resource("pangolin_unknown").await;
        assert!(unknown.is_err());
    }

    #[tokio::test]
    async fn provider_creates_known_data_sources() {
        let provider = PangolinProvider::new();

        for name in provider.data_source_type_names() {
            assert!(provider.create_data_source(&name).await.is_ok());
        }

        let unknown = provider.create_data_source("pangolin_unknown").await;
        assert!(unknown.is_err());
    }

    #[tokio::test]
    async fn provider_schema_marks_token_sensitive() {
        let provider = PangolinProvider::new();
        let response = provider.schema(Context::new(), ProviderSchemaRequest).await;

        let token = response.schema.attribute("token").unwrap();
        assert!(token.required);
        assert!(token.sensitive);

        let base_url = response.schema.attribute("base_url").unwrap();
        assert!(base_url.optional);
    }
}
