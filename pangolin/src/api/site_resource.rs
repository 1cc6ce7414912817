//! Site resource (private resource) API operations
//!
//! The main entity is written through `/private-resource` and read through
//! `/site-resource`. Membership (users, roles, clients) is submitted inline
//! on create/update but read through three separate endpoints.

use serde::{Deserialize, Serialize};

use super::client::Client;
use super::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct SiteResource {
    #[serde(rename = "siteResourceId", default)]
    pub id: i64,
    #[serde(rename = "niceId", default)]
    pub nice_id: String,
    pub name: String,
    pub mode: String,
    #[serde(rename = "siteId")]
    pub site_id: i64,
    pub destination: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(rename = "userIds", default)]
    pub user_ids: Vec<String>,
    #[serde(rename = "roleIds", default)]
    pub role_ids: Vec<i64>,
    #[serde(rename = "clientIds", default)]
    pub client_ids: Vec<i64>,
    #[serde(rename = "tcpPortRangeString", default)]
    pub tcp_port_range_string: String,
    #[serde(rename = "udpPortRangeString", default)]
    pub udp_port_range_string: String,
    #[serde(rename = "disableIcmp", default)]
    pub disable_icmp: bool,
}

/// Write model for create and update. The port-range strings and ICMP flag
/// are server-managed and never part of a write.
#[derive(Debug, Clone, Serialize)]
pub struct SiteResourceWrite {
    pub name: String,
    pub mode: String,
    #[serde(rename = "siteId")]
    pub site_id: i64,
    pub destination: String,
    pub enabled: bool,
    #[serde(rename = "userIds")]
    pub user_ids: Vec<String>,
    #[serde(rename = "roleIds")]
    pub role_ids: Vec<i64>,
    #[serde(rename = "clientIds")]
    pub client_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RoleMembership {
    #[serde(rename = "roleId")]
    role_id: i64,
}

#[derive(Debug, Deserialize)]
struct RolesWrapper {
    #[serde(default)]
    roles: Vec<RoleMembership>,
}

#[derive(Debug, Deserialize)]
struct UserMembership {
    #[serde(rename = "userId")]
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct UsersWrapper {
    #[serde(default)]
    users: Vec<UserMembership>,
}

#[derive(Debug, Deserialize)]
struct ClientMembership {
    #[serde(rename = "clientId")]
    client_id: i64,
}

#[derive(Debug, Deserialize)]
struct ClientsWrapper {
    #[serde(default)]
    clients: Vec<ClientMembership>,
}

impl Client {
    /// PUT /org/{org}/private-resource
    pub async fn create_site_resource(
        &self,
        org_id: &str,
        resource: &SiteResourceWrite,
    ) -> Result<SiteResource, ApiError> {
        self.put(&format!("/org/{}/private-resource", org_id), resource)
            .await
    }

    /// GET /site-resource/{id}
    pub async fn get_site_resource(&self, resource_id: i64) -> Result<SiteResource, ApiError> {
        self.get(&format!("/site-resource/{}", resource_id)).await
    }

    /// POST /site-resource/{id}
    pub async fn update_site_resource(
        &self,
        resource_id: i64,
        resource: &SiteResourceWrite,
    ) -> Result<SiteResource, ApiError> {
        self.post(&format!("/site-resource/{}", resource_id), resource)
            .await
    }

    /// DELETE /site-resource/{id}
    pub async fn delete_site_resource(&self, resource_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/site-resource/{}", resource_id)).await
    }

    /// GET /site-resource/{id}/roles
    ///
    /// Role ids are deduplicated, first occurrence wins.
    pub async fn get_site_resource_roles(&self, resource_id: i64) -> Result<Vec<i64>, ApiError> {
        let wrapper: RolesWrapper = self
            .get(&format!("/site-resource/{}/roles", resource_id))
            .await?;

        let mut ids = Vec::with_capacity(wrapper.roles.len());
        for membership in wrapper.roles {
            if !ids.contains(&membership.role_id) {
                ids.push(membership.role_id);
            }
        }
        Ok(ids)
    }

    /// GET /site-resource/{id}/users - server order, no deduplication
    pub async fn get_site_resource_users(&self, resource_id: i64) -> Result<Vec<String>, ApiError> {
        let wrapper: UsersWrapper = self
            .get(&format!("/site-resource/{}/users", resource_id))
            .await?;
        Ok(wrapper.users.into_iter().map(|u| u.user_id).collect())
    }

    /// GET /site-resource/{id}/clients - server order, no deduplication
    pub async fn get_site_resource_clients(&self, resource_id: i64) -> Result<Vec<i64>, ApiError> {
        let wrapper: ClientsWrapper = self
            .get(&format!("/site-resource/{}/clients", resource_id))
            .await?;
        Ok(wrapper.clients.into_iter().map(|c| c.client_id).collect())
    }
}
