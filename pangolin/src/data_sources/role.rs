//! Role data source: fetch an organization role by name

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
pub struct RoleDataSource {
    provider_data: Option<PangolinProviderData>,
}

impl RoleDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn build_schema() -> Schema {
        SchemaBuilder::new()
            .version(0)
            .description("Fetch an organization role by name.")
            .attribute(
                AttributeBuilder::new("id", AttributeType::Number)
                    .description("The ID of the role.")
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
                    .description("The name of the role.")
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("description", AttributeType::String)
                    .description("The description of the role.")
                    .computed()
                    .build(),
            )
            .build()
    }
}

#[async_trait]
impl DataSource for RoleDataSource {
    fn type_name(&self) -> &str {
        "pangolin_role"
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

        let roles = match provider_data.client.list_roles(&org_id).await {
            Ok(roles) => roles,
            Err(e) => {
                diagnostics.push(Diagnostic::error("Error listing roles", e.to_string()));
                return ReadDataSourceResponse {
                    state: None,
                    diagnostics,
                };
            }
        };

        for role in roles {
            if role.name == name {
                let mut state = DynamicValue::object();
                let _ = state.set_i64(&AttributePath::new("id"), role.id);
                let _ = state.set_string(&AttributePath::new("org_id"), org_id);
                let _ = state.set_string(&AttributePath::new("name"), role.name);
                let _ =
                    state.set_string(&AttributePath::new("description"), role.description);
                return ReadDataSourceResponse {
                    state: Some(state),
                    diagnostics,
                };
            }
        }

        diagnostics.push(Diagnostic::error(
            "Role not found",
            format!(
                "Could not find role with name {:?} in organization {:?}",
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
impl DataSourceWithConfigure for RoleDataSource {
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
