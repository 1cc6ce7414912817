//! Site data source: fetch a site by name

use async_trait::async_trait;
use tfkit::context::Context;
use tfkit::data_source::{
    ConfigureDataSourceRequest, ConfigureDataSourceResponse, DataSource,
    DataSourceMetadataRequest, DataSourceMetadataResponse, DataSourceSchemaRequest,
    DataSourceSchemaResponse, DataSourceWithConfigure, ReadDataSourceRequest,
    ReadDataSourceResponse, ValidateDataSourceConfigRequest, ValidateDataSourceConfigResponse,
};
use tfkit::schema::{validate_config, AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfkit::types::{AttributePath, Diagnostic, DynamicValue};

use crate::provider_data::PangolinProviderData;

#[derive(Default)]
pub struct SiteDataSource {
    provider_data: Option<PangolinProviderData>,
}

impl SiteDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn build_schema() -> Schema {
        SchemaBuilder::new()
            .version(0)
            .description("Fetch a site by name.")
            .attribute(
                AttributeBuilder::new("id", AttributeType::Number)
                    .description("The ID of the site.")
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("org_id", AttributeType::String)
                    .description("The ID of the organization.")
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("name", AttributeType::String)
                    .description("The name of the site.")
                    .required()
                    .build(),
            )
            .build()
    }
}

#[async_trait]
impl DataSource for SiteDataSource {
    fn type_name(&self) -> &str {
        "pangolin_site"
    }

    async fn metadata(
        &self,
        _ctx: Context,
        _request: DataSourceMetadataRequest,
    ) -> DataSourceMetadataResponse {
        DataSourceMetadataResponse {
            type_name: self.type_name().to_string(),
        }
    }

    async fn schema(
        &self,
        _ctx: Context,
        _request: DataSourceSchemaRequest,
    ) -> DataSourceSchemaResponse {
        DataSourceSchemaResponse {
            schema: Self::build_schema(),
            diagnostics: vec![],
        }
    }

    async fn validate(
        &self,
        _ctx: Context,
        request: ValidateDataSourceConfigRequest,
    ) -> ValidateDataSourceConfigResponse {
        ValidateDataSourceConfigResponse {
            diagnostics: validate_config(&Self::build_schema(), &request.config),
        }
    }

    async fn read(&self, _ctx: Context, request: ReadDataSourceRequest) -> ReadDataSourceResponse {
        let mut diagnostics = vec![];

        let provider_data = match &self.provider_data {
            Some(data) => data,
            None => {
                diagnostics.push(Diagnostic::error(
                    "Provider not configured",
                    "Provider data was not properly configured",
                ));
                return ReadDataSourceResponse {
                    state: None,
                    diagnostics,
                };
            }
        };

        let org_id = match request.config.get_string(&AttributePath::new("org_id")) {
            Ok(id) => id,
            Err(_) => {
                diagnostics.push(Diagnostic::error(
                    "Missing org_id",
                    "The 'org_id' attribute is required",
                ));
                return ReadDataSourceResponse {
                    state: None,
                    diagnostics,
                };
            }
        };

        let name = match request.config.get_string(&AttributePath::new("name")) {
            Ok(name) => name,
            Err(_) => {
                diagnostics.push(Diagnostic::error(
                    "Missing name",
                    "The 'name' attribute is required",
                ));
                return ReadDataSourceResponse {
                    state: None,
                    diagnostics,
                };
            }
        };

        let sites = match provider_data.client.list_sites(&org_id).await {
            Ok(sites) => sites,
            Err(e) => {
                diagnostics.push(Diagnostic::error("Error listing sites", e.to_string()));
                return ReadDataSourceResponse {
                    state: None,
                    diagnostics,
                };
            }
        };

        for site in sites {
            if site.name == name {
                let mut state = DynamicValue::object();
                let _ = state.set_i64(&AttributePath::new("id"), site.id);
                let _ = state.set_string(&AttributePath::new("org_id"), org_id);
                let _ = state.set_string(&AttributePath::new("name"), site.name);
                return ReadDataSourceResponse {
                    state: Some(state),
                    diagnostics,
                };
            }
        }

        diagnostics.push(Diagnostic::error(
            "Site not found",
            format!(
                "Could not find site with name {:?} in organization {:?}",
                name, org_id
            ),
        ));
        ReadDataSourceResponse {
            state: None,
            diagnostics,
        }
    }
}

#[async_trait]
impl DataSourceWithConfigure for SiteDataSource {
    async fn configure(
        &mut self,
        _ctx: Context,
        request: ConfigureDataSourceRequest,
    ) -> ConfigureDataSourceResponse {
        match PangolinProviderData::from_provider_data(request.provider_data) {
            Ok(data) => {
                self.provider_data = Some(data);
                ConfigureDataSourceResponse {
                    diagnostics: vec![],
                }
            }
            Err(diag) => ConfigureDataSourceResponse {
                diagnostics: vec![diag],
            },
        }
    }
}
