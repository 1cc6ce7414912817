//! Backend target resource implementation
//!
//! The API only accepts `{siteId, ip, port, enabled}` on writes; the
//! health-check and routing attributes are carried in state as declared.

use async_trait::async_trait;
use tfkit::context::Context;
use tfkit::defaults::StaticDefault;
use tfkit::plan_modifier::{RequiresReplace, UseStateForUnknown};
use tfkit::resource::{
    ConfigureResourceRequest, ConfigureResourceResponse, CreateResourceRequest,
    CreateResourceResponse, DeleteResourceRequest, DeleteResourceResponse,
    ImportResourceStateRequest, ImportResourceStateResponse, ImportedResource,
    ReadResourceRequest, ReadResourceResponse, Resource, ResourceMetadataRequest,
    ResourceMetadataResponse, ResourceSchemaRequest, ResourceSchemaResponse,
    ResourceWithConfigure, ResourceWithImportState, UpdateResourceRequest,
    UpdateResourceResponse, ValidateResourceConfigRequest, ValidateResourceConfigResponse,
};
use tfkit::schema::{validate_config, AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfkit::types::{AttributePath, Diagnostic, DynamicValue};

use crate::api;
use crate::provider_data::PangolinProviderData;

#[derive(Default)]
pub struct TargetResource {
    provider_data: Option<PangolinProviderData>,
}

impl TargetResource {
    pub fn new() -> Self {
        Self::default()
    }

    fn build_schema() -> Schema {
        SchemaBuilder::new()
            .version(0)
            .description("Manages a backend target for a resource.")
            .attribute(
                AttributeBuilder::new("id", AttributeType::Number)
                    .description("The ID of the target.")
                    .computed()
                    .plan_modifier(UseStateForUnknown::create())
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("resource_id", AttributeType::Number)
                    .description("The ID of the resource this target belongs to.")
                    .required()
                    .plan_modifier(RequiresReplace::create())
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("site_id", AttributeType::Number)
                    .description("The ID of the site.")
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("ip", AttributeType::String)
                    .description("The IP address of the target.")
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("port", AttributeType::Number)
                    .description("The port of the target.")
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("method", AttributeType::String)
                    .description("The load balancing method.")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("enabled", AttributeType::Bool)
                    .description("Whether the target is enabled.")
                    .optional()
                    .computed()
                    .default(StaticDefault::bool(true))
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("hc_enabled", AttributeType::Bool)
                    .description("Whether health checks are enabled.")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("hc_path", AttributeType::String)
                    .description("The health check path.")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("hc_scheme", AttributeType::String)
                    .description("The health check scheme (http or https).")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("hc_mode", AttributeType::String)
                    .description("The health check mode.")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("hc_hostname", AttributeType::String)
                    .description("The health check hostname.")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("hc_port", AttributeType::Number)
                    .description("The health check port.")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("hc_interval", AttributeType::Number)
                    .description("The health check interval.")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("hc_unhealthy_interval", AttributeType::Number)
                    .description("The health check unhealthy interval.")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("hc_timeout", AttributeType::Number)
                    .description("The health check timeout.")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("hc_follow_redirects", AttributeType::Bool)
                    .description("Whether to follow redirects during health checks.")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("hc_method", AttributeType::String)
                    .description("The health check method.")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("hc_status", AttributeType::Number)
                    .description("The expected health check status code.")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("hc_tls_server_name", AttributeType::String)
                    .description("The TLS server name for health checks.")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("path", AttributeType::String)
                    .description("The path for the target.")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("path_match_type", AttributeType::String)
                    .description("The path match type.")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("rewrite_path", AttributeType::String)
                    .description("The rewrite path.")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("rewrite_path_type", AttributeType::String)
                    .description("The rewrite path type.")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("priority", AttributeType::Number)
                    .description("The priority of the target.")
                    .optional()
                    .build(),
            )
            .build()
    }

    fn write_from_plan(plan: &DynamicValue) -> Result<api::TargetWrite, Diagnostic> {
        let site_id = plan.get_i64(&AttributePath::new("site_id")).map_err(|_| {
            Diagnostic::error("Missing site_id", "The 'site_id' attribute is required")
        })?;
        let ip = plan
            .get_string(&AttributePath::new("ip"))
            .map_err(|_| Diagnostic::error("Missing ip", "The 'ip' attribute is required"))?;
        let port = plan
            .get_i64(&AttributePath::new("port"))
            .map_err(|_| Diagnostic::error("Missing port", "The 'port' attribute is required"))?;

        Ok(api::TargetWrite {
            site_id,
            ip,
            port,
            enabled: plan
                .get_bool(&AttributePath::new("enabled"))
                .unwrap_or(true),
        })
    }
}

#[async_trait]
impl Resource for TargetResource {
    fn type_name(&self) -> &str {
        "pangolin_target"
    }

    async fn metadata(
        &self,
        _ctx: Context,
        _request: ResourceMetadataRequest,
    ) -> ResourceMetadataResponse {
        ResourceMetadataResponse {
            type_name: self.type_name().to_string(),
        }
    }

    async fn schema(
        &self,
        _ctx: Context,
        _request: ResourceSchemaRequest,
    ) -> ResourceSchemaResponse {
        ResourceSchemaResponse {
            schema: Self::build_schema(),
            diagnostics: vec![],
        }
    }

    async fn validate(
        &self,
        _ctx: Context,
        request: ValidateResourceConfigRequest,
    ) -> ValidateResourceConfigResponse {
        ValidateResourceConfigResponse {
            diagnostics: validate_config(&Self::build_schema(), &request.config),
        }
    }

    async fn create(
        &self,
        _ctx: Context,
        request: CreateResourceRequest,
    ) -> CreateResourceResponse {
        let mut diagnostics = vec![];

        let provider_data = match &self.provider_data {
            Some(data) => data,
            None => {
                diagnostics.push(Diagnostic::error(
                    "Provider not configured",
                    "Provider data was not properly configured",
                ));
                return CreateResourceResponse {
                    new_state: request.planned_state,
                    diagnostics,
                };
            }
        };

        let resource_id = match request
            .planned_state
            .get_i64(&AttributePath::new("resource_id"))
        {
            Ok(id) => id,
            Err(_) => {
                diagnostics.push(Diagnostic::error(
                    "Missing resource_id",
                    "The 'resource_id' attribute is required",
                ));
                return CreateResourceResponse {
                    new_state: request.planned_state,
                    diagnostics,
                };
            }
        };

        let write = match Self::write_from_plan(&request.planned_state) {
            Ok(write) => write,
            Err(diag) => {
                diagnostics.push(diag);
                return CreateResourceResponse {
                    new_state: request.planned_state,
                    diagnostics,
                };
            }
        };

        match provider_data.client.create_target(resource_id, &write).await {
            Ok(created) => {
                let mut new_state = request.planned_state.clone();
                let _ = new_state.set_i64(&AttributePath::new("id"), created.id);
                let _ = new_state.set_bool(&AttributePath::new("enabled"), created.enabled);
                CreateResourceResponse {
                    new_state,
                    diagnostics,
                }
            }
            Err(e) => {
                diagnostics.push(Diagnostic::error("Error creating target", e.to_string()));
                CreateResourceResponse {
                    new_state: request.planned_state,
                    diagnostics,
                }
            }
        }
    }

    async fn read(&self, _ctx: Context, request: ReadResourceRequest) -> ReadResourceResponse {
        let mut diagnostics = vec![];

        let target_id = match request.current_state.get_i64(&AttributePath::new("id")) {
            Ok(id) => id,
            Err(_) => {
                return ReadResourceResponse {
                    new_state: None,
                    diagnostics,
                };
            }
        };

        let provider_data = match &self.provider_data {
            Some(data) => data,
            None => {
                diagnostics.push(Diagnostic::error(
                    "Provider not configured",
                    "Provider data was not properly configured",
                ));
                return ReadResourceResponse {
                    new_state: Some(request.current_state),
                    diagnostics,
                };
            }
        };

        match provider_data.client.get_target(target_id).await {
            Ok(target) => {
                let mut new_state = request.current_state.clone();
                let _ = new_state.set_i64(&AttributePath::new("site_id"), target.site_id);
                let _ = new_state.set_string(&AttributePath::new("ip"), target.ip);
                let _ = new_state.set_i64(&AttributePath::new("port"), target.port);
                let _ = new_state.set_bool(&AttributePath::new("enabled"), target.enabled);
                ReadResourceResponse {
                    new_state: Some(new_state),
                    diagnostics,
                }
            }
            Err(e) => {
                diagnostics.push(Diagnostic::error("Error reading target", e.to_string()));
                ReadResourceResponse {
                    new_state: Some(request.current_state),
                    diagnostics,
                }
            }
        }
    }

    async fn update(
        &self,
        _ctx: Context,
        request: UpdateResourceRequest,
    ) -> UpdateResourceResponse {
        let mut diagnostics = vec![];

        let provider_data = match &self.provider_data {
            Some(data) => data,
            None => {
                diagnostics.push(Diagnostic::error(
                    "Provider not configured",
                    "Provider data was not properly configured",
                ));
                return UpdateResourceResponse {
                    new_state: request.planned_state,
                    diagnostics,
                };
            }
        };

        let prior_id = match request.prior_state.get_i64(&AttributePath::new("id")) {
            Ok(id) => id,
            Err(_) => {
                diagnostics.push(Diagnostic::error(
                    "Missing id",
                    "Prior state does not contain a target id",
                ));
                return UpdateResourceResponse {
                    new_state: request.prior_state,
                    diagnostics,
                };
            }
        };

        let write = match Self::write_from_plan(&request.planned_state) {
            Ok(write) => write,
            Err(diag) => {
                diagnostics.push(diag);
                return UpdateResourceResponse {
                    new_state: request.prior_state,
                    diagnostics,
                };
            }
        };

        match provider_data.client.update_target(prior_id, &write).await {
            Ok(_) => {
                let mut new_state = request.planned_state.clone();
                let _ = new_state.set_i64(&AttributePath::new("id"), prior_id);
                UpdateResourceResponse {
                    new_state,
                    diagnostics,
                }
            }
            Err(e) => {
                diagnostics.push(Diagnostic::error("Error updating target", e.to_string()));
                UpdateResourceResponse {
                    new_state: request.prior_state,
                    diagnostics,
                }
            }
        }
    }

    async fn delete(
        &self,
        _ctx: Context,
        request: DeleteResourceRequest,
    ) -> DeleteResourceResponse {
        let mut diagnostics = vec![];

        let provider_data = match &self.provider_data {
            Some(data) => data,
            None => return DeleteResourceResponse { diagnostics },
        };

        let target_id = match request.prior_state.get_i64(&AttributePath::new("id")) {
            Ok(id) => id,
            Err(_) => return DeleteResourceResponse { diagnostics },
        };

        if let Err(e) = provider_data.client.delete_target(target_id).await {
            diagnostics.push(Diagnostic::error("Error deleting target", e.to_string()));
        }

        DeleteResourceResponse { diagnostics }
    }
}

#[async_trait]
impl ResourceWithConfigure for TargetResource {
    async fn configure(
        &mut self,
        _ctx: Context,
        request: ConfigureResourceRequest,
    ) -> ConfigureResourceResponse {
        match PangolinProviderData::from_provider_data(request.provider_data) {
            Ok(data) => {
                self.provider_data = Some(data);
                ConfigureResourceResponse {
                    diagnostics: vec![],
                }
            }
            Err(diag) => ConfigureResourceResponse {
                diagnostics: vec![diag],
            },
        }
    }
}

#[async_trait]
impl ResourceWithImportState for TargetResource {
    async fn import_state(
        &self,
        _ctx: Context,
        request: ImportResourceStateRequest,
    ) -> ImportResourceStateResponse {
        let mut response = ImportResourceStateResponse {
            imported_resources: vec![],
            diagnostics: vec![],
        };

        // Import format: id
        let target_id: i64 = match request.id.parse() {
            Ok(id) => id,
            Err(_) => {
                response.diagnostics.push(Diagnostic::error(
                    "Unexpected Import Identifier",
                    format!("Expected id to be an integer. Got: {:?}", request.id),
                ));
                return response;
            }
        };

        let mut state = DynamicValue::object();
        let _ = state.set_i64(&AttributePath::new("id"), target_id);

        response.imported_resources.push(ImportedResource {
            type_name: request.type_name,
            state,
        });
        response
    }
}
