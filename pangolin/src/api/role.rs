//! Role API operations
//!
//! Role ids are server-assigned. Deleting a role re-homes its members into a
//! replacement role which the API requires in the request body.

use serde::{Deserialize, Serialize};

use super::client::Client;
use super::error::ApiError;

/// Replacement role named in every delete request. Id 2 is the standard
/// "Member" role in a fresh organization.
pub const DEFAULT_REPLACEMENT_ROLE_ID: i64 = 2;

#[derive(Debug, Clone, Deserialize)]
pub struct Role {
    #[serde(rename = "roleId", default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize)]
struct RoleBody<'a> {
    name: &'a str,
    description: &'a str,
}

#[derive(Debug, Deserialize)]
struct RolesWrapper {
    #[serde(default)]
    roles: Vec<Role>,
}

impl Client {
    /// PUT /org/{org}/role
    pub async fn create_role(
        &self,
        org_id: &str,
        name: &str,
        description: &str,
    ) -> Result<Role, ApiError> {
        self.put(
            &format!("/org/{}/role", org_id),
            &RoleBody { name, description },
        )
        .await
    }

    /// GET /role/{id}
    pub async fn get_role(&self, role_id: i64) -> Result<Role, ApiError> {
        self.get(&format!("/role/{}", role_id)).await
    }

    /// POST /role/{id}
    pub async fn update_role(
        &self,
        role_id: i64,
        name: &str,
        description: &str,
    ) -> Result<Role, ApiError> {
        self.post(
            &format!("/role/{}", role_id),
            &RoleBody { name, description },
        )
        .await
    }

    /// DELETE /role/{id} with the default replacement role
    pub async fn delete_role(&self, role_id: i64) -> Result<(), ApiError> {
        self.delete_role_with_replacement(role_id, DEFAULT_REPLACEMENT_ROLE_ID)
            .await
    }

    /// DELETE /role/{id} naming the role that takes over the members
    pub async fn delete_role_with_replacement(
        &self,
        role_id: i64,
        replacement_role_id: i64,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({ "roleId": replacement_role_id.to_string() });
        self.delete_with_body(&format!("/role/{}", role_id), &body)
            .await
    }

    /// GET /org/{org}/roles
    pub async fn list_roles(&self, org_id: &str) -> Result<Vec<Role>, ApiError> {
        let wrapper: RolesWrapper = self.get(&format!("/org/{}/roles", org_id)).await?;
        Ok(wrapper.roles)
    }
}
