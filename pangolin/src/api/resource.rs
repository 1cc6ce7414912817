//! App-style resource API operations (HTTP or raw TCP/UDP)
//!
//! The API rejects `enabled` on create, so create always suppresses it; the
//! adapter issues a follow-up update when the plan pins a value. `http` and
//! `protocol` are write-once and suppressed on update.

use serde::{Deserialize, Serialize};

use super::client::Client;
use super::error::ApiError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppResource {
    #[serde(rename = "resourceId", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http: Option<bool>,
    #[serde(rename = "proxyPort", skip_serializing_if = "Option::is_none")]
    pub proxy_port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    #[serde(rename = "domainId", skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,
}

impl Client {
    /// PUT /org/{org}/resource - `enabled` is never sent on create
    pub async fn create_app_resource(
        &self,
        org_id: &str,
        resource: &AppResource,
    ) -> Result<AppResource, ApiError> {
        let mut body = resource.clone();
        body.id = None;
        body.enabled = None;
        self.put(&format!("/org/{}/resource", org_id), &body).await
    }

    /// GET /resource/{id}
    pub async fn get_app_resource(&self, resource_id: i64) -> Result<AppResource, ApiError> {
        self.get(&format!("/resource/{}", resource_id)).await
    }

    /// POST /resource/{id} - `http` and `protocol` are never sent on update
    pub async fn update_app_resource(
        &self,
        resource_id: i64,
        resource: &AppResource,
    ) -> Result<AppResource, ApiError> {
        let mut body = resource.clone();
        body.id = None;
        body.http = None;
        body.protocol = None;
        self.post(&format!("/resource/{}", resource_id), &body).await
    }

    /// DELETE /resource/{id}
    pub async fn delete_app_resource(&self, resource_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/resource/{}", resource_id)).await
    }
}
