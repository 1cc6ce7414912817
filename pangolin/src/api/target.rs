//! Backend target API operations
//!
//! The write path sends exactly `{siteId, ip, port, enabled}`; everything
//! else on the model (health-check bundle, path/rewrite, priority) is only
//! read back.

use serde::{Deserialize, Serialize};

use super::client::Client;
use super::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct Target {
    #[serde(rename = "targetId", default)]
    pub id: i64,
    #[serde(rename = "siteId")]
    pub site_id: i64,
    pub ip: String,
    pub port: i64,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(rename = "hcEnabled", default)]
    pub hc_enabled: Option<bool>,
    #[serde(rename = "hcPath", default)]
    pub hc_path: Option<String>,
    #[serde(rename = "hcScheme", default)]
    pub hc_scheme: Option<String>,
    #[serde(rename = "hcMode", default)]
    pub hc_mode: Option<String>,
    #[serde(rename = "hcHostname", default)]
    pub hc_hostname: Option<String>,
    #[serde(rename = "hcPort", default)]
    pub hc_port: Option<i64>,
    #[serde(rename = "hcInterval", default)]
    pub hc_interval: Option<i64>,
    #[serde(rename = "hcUnhealthyInterval", default)]
    pub hc_unhealthy_interval: Option<i64>,
    #[serde(rename = "hcTimeout", default)]
    pub hc_timeout: Option<i64>,
    #[serde(rename = "hcHeaders", default)]
    pub hc_headers: Vec<TargetHeader>,
    #[serde(rename = "hcFollowRedirects", default)]
    pub hc_follow_redirects: Option<bool>,
    #[serde(rename = "hcMethod", default)]
    pub hc_method: Option<String>,
    #[serde(rename = "hcStatus", default)]
    pub hc_status: Option<i64>,
    #[serde(rename = "hcTlsServerName", default)]
    pub hc_tls_server_name: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(rename = "pathMatchType", default)]
    pub path_match_type: Option<String>,
    #[serde(rename = "rewritePath", default)]
    pub rewrite_path: Option<String>,
    #[serde(rename = "rewritePathType", default)]
    pub rewrite_path_type: Option<String>,
    #[serde(default)]
    pub priority: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetHeader {
    pub name: String,
    pub value: String,
}

/// Write model for create and update: the only fields the API accepts.
#[derive(Debug, Clone, Serialize)]
pub struct TargetWrite {
    #[serde(rename = "siteId")]
    pub site_id: i64,
    pub ip: String,
    pub port: i64,
    pub enabled: bool,
}

impl Client {
    /// PUT /resource/{id}/target
    pub async fn create_target(
        &self,
        resource_id: i64,
        target: &TargetWrite,
    ) -> Result<Target, ApiError> {
        self.put(&format!("/resource/{}/target", resource_id), target)
            .await
    }

    /// GET /target/{id}
    pub async fn get_target(&self, target_id: i64) -> Result<Target, ApiError> {
        self.get(&format!("/target/{}", target_id)).await
    }

    /// POST /target/{id}
    pub async fn update_target(
        &self,
        target_id: i64,
        target: &TargetWrite,
    ) -> Result<Target, ApiError> {
        self.post(&format!("/target/{}", target_id), target).await
    }

    /// DELETE /target/{id}
    pub async fn delete_target(&self, target_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/target/{}", target_id)).await
    }
}
