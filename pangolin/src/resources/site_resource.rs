//! Site resource implementation (Host or CIDR mode)
//!
//! Membership is submitted inline on create/update but read back through
//! three separate endpoints; those reads are best-effort and a failed one
//! leaves the prior state list untouched.

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
use tfkit::types::{AttributePath, Diagnostic, Dynamic, DynamicValue};
use tfkit::validator::{OneOf, RegexMatches};

use crate::api;
use crate::provider_data::PangolinProviderData;

const ALIAS_PATTERN: &str = r"^(?:[a-zA-Z0-9*?](?:[a-zA-Z0-9*?-]{0,61}[a-zA-Z0-9*?])?\.)+[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?$";

#[derive(Default)]
pub struct SiteResource {
    provider_data: Option<PangolinProviderData>,
}

impl SiteResource {
    pub fn new() -> Self {
        Self::default()
    }

    fn build_schema() -> Schema {
        SchemaBuilder::new()
            .version(0)
            .description("Manages a site resource (Host or CIDR mode).")
            .attribute(
                AttributeBuilder::new("id", AttributeType::Number)
                    .description("The ID of the site resource.")
                    .computed()
                    .plan_modifier(UseStateForUnknown::create())
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("nice_id", AttributeType::String)
                    .description("The human-readable ID of the site resource.")
                    .computed()
                    .plan_modifier(UseStateForUnknown::create())
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
                    .description("The name of the site resource.")
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("mode", AttributeType::String)
                    .description("The mode of the resource (host or cidr).")
                    .required()
                    .validator(OneOf::create(&["host", "cidr"]))
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("site_id", AttributeType::Number)
                    .description("The ID of the site.")
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("destination", AttributeType::String)
                    .description("The destination address or CIDR.")
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("enabled", AttributeType::Bool)
                    .description("Whether the resource is enabled.")
                    .optional()
                    .computed()
                    .default(StaticDefault::bool(true))
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("alias", AttributeType::String)
                    .description("The alias for the resource.")
                    .optional()
                    .validator(RegexMatches::create(
                        ALIAS_PATTERN,
                        "Alias must be a fully qualified domain name with optional wildcards",
                    ))
                    .build(),
            )
            .attribute(
                AttributeBuilder::new(
                    "user_ids",
                    AttributeType::List(Box::new(AttributeType::String)),
                )
                .description("The list of user IDs allowed to access this resource.")
                .optional()
                .computed()
                .build(),
            )
            .attribute(
                AttributeBuilder::new(
                    "role_ids",
                    AttributeType::List(Box::new(AttributeType::Number)),
                )
                .description("The list of role IDs allowed to access this resource.")
                .optional()
                .computed()
                .build(),
            )
            .attribute(
                AttributeBuilder::new(
                    "client_ids",
                    AttributeType::List(Box::new(AttributeType::Number)),
                )
                .description("The list of client IDs allowed to access this resource.")
                .optional()
                .computed()
                .build(),
            )
            .attribute(
                AttributeBuilder::new("tcp_port_range_string", AttributeType::String)
                    .description("The TCP port range allowed (e.g., '80,443' or '*').")
                    .optional()
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("udp_port_range_string", AttributeType::String)
                    .description("The UDP port range allowed (e.g., '53' or '*').")
                    .optional()
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("disable_icmp", AttributeType::Bool)
                    .description("Whether to disable ICMP for this resource.")
                    .optional()
                    .computed()
                    .build(),
            )
            .build()
    }

    fn string_list(plan: &DynamicValue, name: &str) -> Result<Vec<String>, Diagnostic> {
        let path = AttributePath::new(name);
        if !plan.is_known_at(&path) {
            return Ok(vec![]);
        }
        let mut out = Vec::new();
        for element in plan.get_list(&path).unwrap_or_default() {
            match element {
                Dynamic::String(s) => out.push(s),
                _ => {
                    return Err(Diagnostic::error(
                        format!("Invalid `{}`", name),
                        format!("`{}` must be a list of strings", name),
                    ))
                }
            }
        }
        Ok(out)
    }

    fn int_list(plan: &DynamicValue, name: &str) -> Result<Vec<i64>, Diagnostic> {
        let path = AttributePath::new(name);
        if !plan.is_known_at(&path) {
            return Ok(vec![]);
        }
        let mut out = Vec::new();
        for element in plan.get_list(&path).unwrap_or_default() {
            match element {
                Dynamic::Number(n) => out.push(n as i64),
                _ => {
                    return Err(Diagnostic::error(
                        format!("Invalid `{}`", name),
                        format!("`{}` must be a list of numbers", name),
                    ))
                }
            }
        }
        Ok(out)
    }

    fn write_from_plan(plan: &DynamicValue) -> Result<api::SiteResourceWrite, Diagnostic> {
        let name = plan
            .get_string(&AttributePath::new("name"))
            .map_err(|_| Diagnostic::error("Missing name", "The 'name' attribute is required"))?;
        let mode = plan
            .get_string(&AttributePath::new("mode"))
            .map_err(|_| Diagnostic::error("Missing mode", "The 'mode' attribute is required"))?;
        let site_id = plan.get_i64(&AttributePath::new("site_id")).map_err(|_| {
            Diagnostic::error("Missing site_id", "The 'site_id' attribute is required")
        })?;
        let destination = plan
            .get_string(&AttributePath::new("destination"))
            .map_err(|_| {
                Diagnostic::error(
                    "Missing destination",
                    "The 'destination' attribute is required",
                )
            })?;

        Ok(api::SiteResourceWrite {
            name,
            mode,
            site_id,
            destination,
            enabled: plan
                .get_bool(&AttributePath::new("enabled"))
                .unwrap_or(true),
            user_ids: Self::string_list(plan, "user_ids")?,
            role_ids: Self::int_list(plan, "role_ids")?,
            client_ids: Self::int_list(plan, "client_ids")?,
            alias: plan.get_string(&AttributePath::new("alias")).ok(),
        })
    }
}

#[async_trait]
impl Resource for SiteResource {
    fn type_name(&self) -> &str {
        "pangolin_site_resource"
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

        match provider_data
            .client
            .create_site_resource(&org_id, &write)
            .await
        {
            Ok(created) => {
                let mut new_state = request.planned_state.clone();
                let _ = new_state.set_i64(&AttributePath::new("id"), created.id);
                let _ = new_state.set_string(&AttributePath::new("nice_id"), created.nice_id);
                CreateResourceResponse {
                    new_state,
                    diagnostics,
                }
            }
            Err(e) => {
                diagnostics.push(Diagnostic::error(
                    "Error creating site resource",
                    e.to_string(),
                ));
                CreateResourceResponse {
                    new_state: request.planned_state,
                    diagnostics,
                }
            }
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

        let resource = match provider_data.client.get_site_resource(resource_id).await {
            Ok(resource) => resource,
            Err(e) => {
                diagnostics.push(Diagnostic::error(
                    "Error reading site resource",
                    e.to_string(),
                ));
                return ReadResourceResponse {
                    new_state: Some(request.current_state),
                    diagnostics,
                };
            }
        };

        let mut new_state = request.current_state.clone();
        let _ = new_state.set_string(&AttributePath::new("name"), resource.name);
        let _ = new_state.set_string(&AttributePath::new("mode"), resource.mode);
        let _ = new_state.set_string(&AttributePath::new("destination"), resource.destination);
        let _ = new_state.set_bool(&AttributePath::new("enabled"), resource.enabled);
        let _ = match resource.alias {
            Some(alias) => new_state.set_string(&AttributePath::new("alias"), alias),
            None => new_state.set_null(&AttributePath::new("alias")),
        };
        let _ = new_state.set_string(
            &AttributePath::new("tcp_port_range_string"),
            resource.tcp_port_range_string,
        );
        let _ = new_state.set_string(
            &AttributePath::new("udp_port_range_string"),
            resource.udp_port_range_string,
        );
        let _ = new_state.set_bool(&AttributePath::new("disable_icmp"), resource.disable_icmp);

        // Best-effort membership fan-out: a failed read keeps the prior list.
        let client = &provider_data.client;
        let (role_ids, user_ids, client_ids) = futures::join!(
            client.get_site_resource_roles(resource_id),
            client.get_site_resource_users(resource_id),
            client.get_site_resource_clients(resource_id),
        );

        if let Ok(role_ids) = role_ids {
            let _ = new_state.set_list(
                &AttributePath::new("role_ids"),
                role_ids
                    .into_iter()
                    .map(|id| Dynamic::Number(id as f64))
                    .collect(),
            );
        }
        if let Ok(user_ids) = user_ids {
            let _ = new_state.set_list(
                &AttributePath::new("user_ids"),
                user_ids.into_iter().map(Dynamic::String).collect(),
            );
        }
        if let Ok(client_ids) = client_ids {
            let _ = new_state.set_list(
                &AttributePath::new("client_ids"),
                client_ids
                    .into_iter()
                    .map(|id| Dynamic::Number(id as f64))
                    .collect(),
            );
        }

        ReadResourceResponse {
            new_state: Some(new_state),
            diagnostics,
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
                    "Prior state does not contain a site resource id",
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

        match provider_data
            .client
            .update_site_resource(prior_id, &write)
            .await
        {
            Ok(_) => {
                let mut new_state = request.planned_state.clone();
                let _ = new_state.set_i64(&AttributePath::new("id"), prior_id);
                if let Ok(nice_id) = request.prior_state.get_string(&AttributePath::new("nice_id"))
                {
                    let _ = new_state.set_string(&AttributePath::new("nice_id"), nice_id);
                }
                UpdateResourceResponse {
                    new_state,
                    diagnostics,
                }
            }
            Err(e) => {
                diagnostics.push(Diagnostic::error(
                    "Error updating site resource",
                    e.to_string(),
                ));
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

        if let Err(e) = provider_data.client.delete_site_resource(resource_id).await {
            diagnostics.push(Diagnostic::error(
                "Error deleting site resource",
                e.to_string(),
            ));
        }

        DeleteResourceResponse { diagnostics }
    }
}

#[async_trait]
impl ResourceWithConfigure for SiteResource {
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
impl ResourceWithImportState for SiteResource {
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
