//! App-style resource implementation (HTTP or raw TCP/UDP)
//!
//! The API rejects `enabled` on create, so create is two-phase: the
//! resource is created without it, and a follow-up update pins the planned
//! value when the plan carries one.

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
use tfkit::validator::OneOf;

use crate::api;
use crate::provider_data::PangolinProviderData;

#[derive(Default)]
pub struct AppResource {
    provider_data: Option<PangolinProviderData>,
}

impl AppResource {
    pub fn new() -> Self {
        Self::default()
    }

    fn build_schema() -> Schema {
        SchemaBuilder::new()
            .version(0)
            .description("Manages an app-style resource (HTTP/TCP/UDP).")
            .attribute(
                AttributeBuilder::new("id", AttributeType::Number)
                    .description("The ID of the resource.")
                    .computed()
                    .plan_modifier(UseStateForUnknown::create())
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("enabled", AttributeType::Bool)
                    .description("Whether the resource is enabled or not.")
                    .optional()
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("org_id", AttributeType::String)
                    .description("The ID of the organization.")
                    .required()
                    .plan_modifier(RequiresReplace::create())
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("name", AttributeType::String)
                    .description("The name of the resource.")
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("protocol", AttributeType::String)
                    .description("The protocol of the resource (tcp or udp).")
                    .required()
                    .validator(OneOf::create(&["tcp", "udp"]))
                    .plan_modifier(RequiresReplace::create())
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("http", AttributeType::Bool)
                    .description("Whether the resource is an HTTP resource.")
                    .optional()
                    .computed()
                    .default(StaticDefault::bool(true))
                    .plan_modifier(RequiresReplace::create())
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("proxy_port", AttributeType::Number)
                    .description("The port to proxy for raw resources (when http is set to false).")
                    .optional()
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("subdomain", AttributeType::String)
                    .description("The subdomain for the resource.")
                    .optional()
                    .computed()
                    .plan_modifier(UseStateForUnknown::create())
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("domain_id", AttributeType::String)
                    .description("The ID of the domain.")
                    .optional()
                    .computed()
                    .plan_modifier(UseStateForUnknown::create())
                    .build(),
            )
            .build()
    }

    fn model_from_plan(plan: &DynamicValue) -> Result<api::AppResource, Diagnostic> {
        let name = plan
            .get_string(&AttributePath::new("name"))
            .map_err(|_| Diagnostic::error("Missing name", "The 'name' attribute is required"))?;

        Ok(api::AppResource {
            id: None,
            enabled: plan.get_bool(&AttributePath::new("enabled")).ok(),
            name,
            protocol: plan.get_string(&AttributePath::new("protocol")).ok(),
            http: plan.get_bool(&AttributePath::new("http")).ok(),
            proxy_port: plan.get_i64(&AttributePath::new("proxy_port")).ok(),
            subdomain: plan.get_string(&AttributePath::new("subdomain")).ok(),
            domain_id: plan.get_string(&AttributePath::new("domain_id")).ok(),
        })
    }

    fn write_computed(state: &mut DynamicValue, resource: &api::AppResource) {
        let _ = match resource.proxy_port {
            Some(port) => state.set_i64(&AttributePath::new("proxy_port"), port),
            None => state.set_null(&AttributePath::new("proxy_port")),
        };
        let _ = match &resource.subdomain {
            Some(subdomain) => {
                state.set_string(&AttributePath::new("subdomain"), subdomain.clone())
            }
            None => state.set_null(&AttributePath::new("subdomain")),
        };
        let _ = match &resource.domain_id {
            Some(domain_id) => {
                state.set_string(&AttributePath::new("domain_id"), domain_id.clone())
            }
            None => state.set_null(&AttributePath::new("domain_id")),
        };
    }

    fn set_enabled(state: &mut DynamicValue, enabled: Option<bool>) {
        let _ = match enabled {
            Some(enabled) => state.set_bool(&AttributePath::new("enabled"), enabled),
            None => state.set_null(&AttributePath::new("enabled")),
        };
    }
}

#[async_trait]
impl Resource for AppResource {
    fn type_name(&self) -> &str {
        "pangolin_resource"
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
        let config = &request.config;
        let mut diagnostics = validate_config(&Self::build_schema(), config);

        // The cross-field rules branch on the http flag; until it is known
        // there is nothing to decide.
        let http_path = AttributePath::new("http");
        if !config.is_known_at(&http_path) {
            return ValidateResourceConfigResponse { diagnostics };
        }
        let http = config.get_bool(&http_path).unwrap_or(true);

        if http {
            for key in ["domain_id", "subdomain"] {
                let path = AttributePath::new(key);
                if config.is_unknown_at(&path) {
                    continue;
                }
                if config.is_null_at(&path) {
                    diagnostics.push(Diagnostic::error(
                        format!("Missing required param `{}`", key),
                        format!("`{}` is required for an http resource.", key),
                    ));
                }
            }

            let proxy_port_path = AttributePath::new("proxy_port");
            if config.is_known_at(&proxy_port_path) {
                diagnostics.push(Diagnostic::error(
                    "Forbidden param `proxy_port`",
                    "`proxy_port` is forbidden for an http resource.",
                ));
            }

            let protocol_path = AttributePath::new("protocol");
            if !config.is_unknown_at(&protocol_path)
                && config
                    .get_string(&protocol_path)
                    .map(|p| p == "udp")
                    .unwrap_or(false)
            {
                diagnostics.push(Diagnostic::error(
                    "Forbidden value for param `protocol`",
                    "Protocol cannot be set to udp for an http resource.",
                ));
            }
        } else {
            let proxy_port_path = AttributePath::new("proxy_port");
            if !config.is_unknown_at(&proxy_port_path) && config.is_null_at(&proxy_port_path) {
                diagnostics.push(Diagnostic::error(
                    "Missing required param `proxy_port`",
                    "`proxy_port` is required for a raw resource.",
                ));
            }

            for key in ["domain_id", "subdomain"] {
                let path = AttributePath::new(key);
                if config.is_known_at(&path) {
                    diagnostics.push(Diagnostic::error(
                        format!("Forbidden param `{}`", key),
                        format!("`{}` is forbidden for a raw resource.", key),
                    ));
                }
            }
        }

        ValidateResourceConfigResponse { diagnostics }
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

        let org_id = match request.planned_state.get_string(&AttributePath::new("org_id")) {
            Ok(id) => id,
            Err(_) => {
                diagnostics.push(Diagnostic::error(
                    "Missing org_id",
                    "The 'org_id' attribute is required",
                ));
                return CreateResourceResponse {
                    new_state: request.planned_state,
                    diagnostics,
                };
            }
        };

        let model = match Self::model_from_plan(&request.planned_state) {
            Ok(model) => model,
            Err(diag) => {
                diagnostics.push(diag);
                return CreateResourceResponse {
                    new_state: request.planned_state,
                    diagnostics,
                };
            }
        };

        let created = match provider_data
            .client
            .create_app_resource(&org_id, &model)
            .await
        {
            Ok(created) => created,
            Err(e) => {
                diagnostics.push(Diagnostic::error("Error creating resource", e.to_string()));
                return CreateResourceResponse {
                    new_state: request.planned_state,
                    diagnostics,
                };
            }
        };

        let created_id = created.id.unwrap_or_default();
        let mut new_state = request.planned_state.clone();
        let _ = new_state.set_i64(&AttributePath::new("id"), created_id);
        Self::write_computed(&mut new_state, &created);

        // The server picks the initial enabled value; a planned value needs
        // a follow-up update to stick.
        if request
            .planned_state
            .is_known_at(&AttributePath::new("enabled"))
        {
            match provider_data
                .client
                .update_app_resource(created_id, &model)
                .await
            {
                Ok(updated) => Self::set_enabled(&mut new_state, updated.enabled),
                Err(e) => {
                    diagnostics
                        .push(Diagnostic::error("Error updating resource", e.to_string()));
                    return CreateResourceResponse {
                        new_state,
                        diagnostics,
                    };
                }
            }
        } else {
            Self::set_enabled(&mut new_state, created.enabled);
        }

        CreateResourceResponse {
            new_state,
            diagnostics,
        }
    }

    async fn read(&self, _ctx: Context, request: ReadResourceRequest) -> ReadResourceResponse {
        let mut diagnostics = vec![];

        let resource_id = match request.current_state.get_i64(&AttributePath::new("id")) {
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

        match provider_data.client.get_app_resource(resource_id).await {
            Ok(resource) => {
                let mut new_state = request.current_state.clone();

                if let Some(id) = resource.id {
                    let _ = new_state.set_i64(&AttributePath::new("id"), id);
                }
                let _ = new_state.set_string(&AttributePath::new("name"), resource.name.clone());
                let _ = match &resource.protocol {
                    Some(protocol) => {
                        new_state.set_string(&AttributePath::new("protocol"), protocol.clone())
                    }
                    None => new_state.set_null(&AttributePath::new("protocol")),
                };
                let _ = match resource.http {
                    Some(http) => new_state.set_bool(&AttributePath::new("http"), http),
                    None => new_state.set_null(&AttributePath::new("http")),
                };
                Self::set_enabled(&mut new_state, resource.enabled);
                Self::write_computed(&mut new_state, &resource);

                ReadResourceResponse {
                    new_state: Some(new_state),
                    diagnostics,
                }
            }
            Err(e) => {
                diagnostics.push(Diagnostic::error("Error reading resource", e.to_string()));
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
                    "Prior state does not contain a resource id",
                ));
                return UpdateResourceResponse {
                    new_state: request.prior_state,
                    diagnostics,
                };
            }
        };

        let model = match Self::model_from_plan(&request.planned_state) {
            Ok(model) => model,
            Err(diag) => {
                diagnostics.push(diag);
                return UpdateResourceResponse {
                    new_state: request.prior_state,
                    diagnostics,
                };
            }
        };

        match provider_data
            .client
            .update_app_resource(prior_id, &model)
            .await
        {
            Ok(updated) => {
                let mut new_state = request.planned_state.clone();
                let _ = new_state.set_i64(&AttributePath::new("id"), prior_id);
                Self::set_enabled(&mut new_state, updated.enabled);
                Self::write_computed(&mut new_state, &updated);
                UpdateResourceResponse {
                    new_state,
                    diagnostics,
                }
            }
            Err(e) => {
                diagnostics.push(Diagnostic::error("Error updating resource", e.to_string()));
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

        let resource_id = match request.prior_state.get_i64(&AttributePath::new("id")) {
            Ok(id) => id,
            Err(_) => return DeleteResourceResponse { diagnostics },
        };

        if let Err(e) = provider_data.client.delete_app_resource(resource_id).await {
            diagnostics.push(Diagnostic::error("Error deleting resource", e.to_string()));
        }

        DeleteResourceResponse { diagnostics }
    }
}

#[async_trait]
impl ResourceWithConfigure for AppResource {
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
impl ResourceWithImportState for AppResource {
    async fn import_state(
        &self,
        _ctx: Context,
        request: ImportResourceStateRequest,
    ) -> ImportResourceStateResponse {
        let mut response = ImportResourceStateResponse {
            imported_resources: vec![],
            diagnostics: vec![],
        };

        // Import format: org_id/id
        let parts: Vec<&str> = request.id.split('/').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            response.diagnostics.push(Diagnostic::error(
                "Unexpected Import Identifier",
                format!(
                    "Expected import identifier with format: org_id/id. Got: {:?}",
                    request.id
                ),
            ));
            return response;
        }

        let resource_id: i64 = match parts[1].parse() {
            Ok(id) => id,
            Err(_) => {
                response.diagnostics.push(Diagnostic::error(
                    "Unexpected Import Identifier",
                    format!("Expected id to be an integer. Got: {:?}", parts[1]),
                ));
                return response;
            }
        };

        let mut state = DynamicValue::object();
        let _ = state.set_string(&AttributePath::new("org_id"), parts[0].to_string());
        let _ = state.set_i64(&AttributePath::new("id"), resource_id);

        response.imported_resources.push(ImportedResource {
            type_name: request.type_name,
            state,
        });
        response
    }
}
