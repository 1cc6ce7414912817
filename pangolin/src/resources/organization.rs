//! Organization resource implementation

use async_trait::async_trait;
use tfkit::context::Context;
use tfkit::plan_modifier::{RequiresReplace, UseStateForUnknown};
use tfkit::resource::{
    ConfigureResourceRequest, ConfigureResourceResponse, CreateResourceRequest,
    CreateResourceResponse, DeleteResourceRequest, DeleteResourceResponse,
    ImportResourceStateRequest, ImportResourceStateResponse, ReadResourceRequest,
    ReadResourceResponse, Resource, ResourceMetadataRequest, ResourceMetadataResponse,
    ResourceSchemaRequest, ResourceSchemaResponse, ResourceWithConfigure,
    ResourceWithImportState, UpdateResourceRequest, UpdateResourceResponse,
    ValidateResourceConfigRequest, ValidateResourceConfigResponse,
};
use tfkit::schema::{validate_config, AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfkit::types::{AttributePath, Diagnostic, DynamicValue};
use tfkit::import_state_passthrough_id;

use crate::api::Organization;
use crate::provider_data::PangolinProviderData;

#[derive(Default)]
pub struct OrganizationResource {
    provider_data: Option<PangolinProviderData>,
}

impl OrganizationResource {
    pub fn new() -> Self {
        Self::default()
    }

    fn build_schema() -> Schema {
        SchemaBuilder::new()
            .version(0)
            .description("Manages organizations.")
            .attribute(
                AttributeBuilder::new("id", AttributeType::String)
                    .description("The ID of the organization, chosen at create time.")
                    .required()
                    .plan_modifier(UseStateForUnknown::create())
                    .plan_modifier(RequiresReplace::create())
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("name", AttributeType::String)
                    .description("The name of the organization.")
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("subnet", AttributeType::String)
                    .description("The subnet. Set at create, never updated in place.")
                    .required()
                    .plan_modifier(RequiresReplace::create())
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("utility_subnet", AttributeType::String)
                    .description("The utility subnet. Set at create, never updated in place.")
                    .required()
                    .plan_modifier(RequiresReplace::create())
                    .build(),
            )
            .build()
    }

    fn org_from_plan(plan: &DynamicValue) -> Result<Organization, Diagnostic> {
        let id = plan
            .get_string(&AttributePath::new("id"))
            .map_err(|_| Diagnostic::error("Missing id", "The 'id' attribute is required"))?;
        let name = plan
            .get_string(&AttributePath::new("name"))
            .map_err(|_| Diagnostic::error("Missing name", "The 'name' attribute is required"))?;

        Ok(Organization {
            id: Some(id),
            name,
            subnet: plan.get_string(&AttributePath::new("subnet")).ok(),
            utility_subnet: plan.get_string(&AttributePath::new("utility_subnet")).ok(),
        })
    }
}

#[async_trait]
impl Resource for OrganizationResource {
    fn type_name(&self) -> &str {
        "pangolin_organization"
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

        let org = match Self::org_from_plan(&request.planned_state) {
            Ok(org) => org,
            Err(diag) => {
                diagnostics.push(diag);
                return CreateResourceResponse {
                    new_state: request.planned_state,
                    diagnostics,
                };
            }
        };

        if let Err(e) = provider_data.client.create_organization(&org).await {
            diagnostics.push(Diagnostic::error(
                "Error creating organization",
                e.to_string(),
            ));
        }

        CreateResourceResponse {
            new_state: request.planned_state,
            diagnostics,
        }
    }

    async fn read(&self, _ctx: Context, request: ReadResourceRequest) -> ReadResourceResponse {
        let mut diagnostics = vec![];

        let org_id = match request.current_state.get_string(&AttributePath::new("id")) {
            Ok(id) => id,
            Err(_) => {
                // Without an id the state is unusable; have the host recreate
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

        match provider_data.client.get_organization(&org_id).await {
            Ok(org) => {
                let mut new_state = request.current_state.clone();

                if let Some(id) = org.id {
                    let _ = new_state.set_string(&AttributePath::new("id"), id);
                }
                let _ = new_state.set_string(&AttributePath::new("name"), org.name);
                let _ = match org.subnet {
                    Some(subnet) => new_state.set_string(&AttributePath::new("subnet"), subnet),
                    None => new_state.set_null(&AttributePath::new("subnet")),
                };
                let _ = match org.utility_subnet {
                    Some(subnet) => {
                        new_state.set_string(&AttributePath::new("utility_subnet"), subnet)
                    }
                    None => new_state.set_null(&AttributePath::new("utility_subnet")),
                };

                ReadResourceResponse {
                    new_state: Some(new_state),
                    diagnostics,
                }
            }
            Err(e) => {
                diagnostics.push(Diagnostic::error(
                    "Error reading organization",
                    e.to_string(),
                ));
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

        let prior_id = match request.prior_state.get_string(&AttributePath::new("id")) {
            Ok(id) => id,
            Err(_) => {
                diagnostics.push(Diagnostic::error(
                    "Missing id",
                    "Prior state does not contain an organization id",
                ));
                return UpdateResourceResponse {
                    new_state: request.prior_state,
                    diagnostics,
                };
            }
        };

        let org = match Self::org_from_plan(&request.planned_state) {
            Ok(org) => org,
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
            .update_organization(&prior_id, &org)
            .await
        {
            Ok(_) => {
                let mut new_state = request.planned_state.clone();
                let _ = new_state.set_string(&AttributePath::new("id"), prior_id);
                UpdateResourceResponse {
                    new_state,
                    diagnostics,
                }
            }
            Err(e) => {
                diagnostics.push(Diagnostic::error(
                    "Error updating organization",
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

        let org_id = match request.prior_state.get_string(&AttributePath::new("id")) {
            Ok(id) => id,
            Err(_) => return DeleteResourceResponse { diagnostics },
        };

        if let Err(e) = provider_data.client.delete_organization(&org_id).await {
            diagnostics.push(Diagnostic::error(
                "Error deleting organization",
                e.to_string(),
            ));
        }

        DeleteResourceResponse { diagnostics }
    }
}

#[async_trait]
impl ResourceWithConfigure for OrganizationResource {
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
impl ResourceWithImportState for OrganizationResource {
    async fn import_state(
        &self,
        ctx: Context,
        request: ImportResourceStateRequest,
    ) -> ImportResourceStateResponse {
        let mut response = ImportResourceStateResponse {
            imported_resources: vec![],
            diagnostics: vec![],
        };

        // Import format: org_id
        import_state_passthrough_id(&ctx, AttributePath::new("id"), &request, &mut response);
        response
    }
}
