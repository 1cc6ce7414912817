//! Site API operations
//!
//! Sites are created with an auxiliary `{type, newtId, secret}` triple whose
//! values are opaque to this client and passed through verbatim.

use serde::{Deserialize, Serialize};

use super::client::Client;
use super::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct Site {
    #[serde(rename = "siteId")]
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteCreate {
    pub name: String,
    #[serde(rename = "type")]
    pub site_type: String,
    #[serde(rename = "newtId")]
    pub newt_id: String,
    pub secret: String,
}

#[derive(Debug, Deserialize)]
struct SitesWrapper {
    #[serde(default)]
    sites: Vec<Site>,
}

impl Client {
    /// PUT /org/{org}/site
    pub async fn create_site(&self, org_id: &str, site: &SiteCreate) -> Result<Site, ApiError> {
        self.put(&format!("/org/{}/site", org_id), site).await
    }

    /// GET /org/{org}/sites
    pub async fn list_sites(&self, org_id: &str) -> Result<Vec<Site>, ApiError> {
        let wrapper: SitesWrapper = self.get(&format!("/org/{}/sites", org_id)).await?;
        Ok(wrapper.sites)
    }
}
