//! Import helpers for simplifying resource import implementations

use crate::context::Context;
use crate::resource::{ImportResourceStateRequest, ImportResourceStateResponse, ImportedResource};
use crate::types::{AttributePath, Diagnostic, DynamicValue};

/// Sets the import ID to a specific attribute in state.
///
/// This is useful for simple resources where the import ID maps directly to
/// a single string attribute in the resource state.
///
/// Example: ID "my-org" -> state.id = "my-org"
pub fn import_state_passthrough_id(
    _ctx: &Context,
    attr_path: AttributePath,
    request: &ImportResourceStateRequest,
    response: &mut ImportResourceStateResponse,
) {
    let mut state = DynamicValue::object();

    if let Err(e) = state.set_string(&attr_path, request.id.clone()) {
        response.diagnostics.push(
            Diagnostic::error(
                "Failed to set import ID",
                format!(
                    "Could not set attribute {:?} to value {:?}: {}",
                    attr_path, request.id, e
                ),
            )
            .with_attribute(attr_path),
        );
        return;
    }

    response.imported_resources.push(ImportedResource {
        type_name: request.type_name.clone(),
        state,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_sets_id_attribute() {
        let ctx = Context::new();
        let request = ImportResourceStateRequest {
            type_name: "pangolin_organization".to_string(),
            id: "my-org".to_string(),
        };
        let mut response = ImportResourceStateResponse {
            imported_resources: vec![],
            diagnostics: vec![],
        };

        import_state_passthrough_id(&ctx, AttributePath::new("id"), &request, &mut response);

        assert!(response.diagnostics.is_empty());
        assert_eq!(response.imported_resources.len(), 1);
        let state = &response.imported_resources[0].state;
        assert_eq!(state.get_string(&AttributePath::new("id")).unwrap(), "my-org");
    }
}
