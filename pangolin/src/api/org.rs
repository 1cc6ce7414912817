//! Organization API operations
//!
//! Organization responses come back wrapped in an `{org: …}` object.
//! `subnet` and `utilitySubnet` are write-once: sent on create, suppressed
//! on update, read back from the server.

use serde::{Deserialize, Serialize};

use super::client::Client;
use super::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    #[serde(rename = "orgId", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet: Option<String>,
    #[serde(rename = "utilitySubnet", skip_serializing_if = "Option::is_none")]
    pub utility_subnet: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrgWrapper {
    org: Organization,
}

impl Client {
    /// PUT /org
    pub async fn create_organization(&self, org: &Organization) -> Result<Organization, ApiError> {
        let wrapper: OrgWrapper = self.put("/org", org).await?;
        Ok(wrapper.org)
    }

    /// GET /org/{id}
    pub async fn get_organization(&self, org_id: &str) -> Result<Organization, ApiError> {
        let wrapper: OrgWrapper = self.get(&format!("/org/{}", org_id)).await?;
        Ok(wrapper.org)
    }

    /// POST /org/{id} - subnet and utilitySubnet are never sent on update
    pub async fn update_organization(
        &self,
        org_id: &str,
        org: &Organization,
    ) -> Result<Organization, ApiError> {
        let body = Organization {
            id: None,
            name: org.name.clone(),
            subnet: None,
            utility_subnet: None,
        };
        let wrapper: OrgWrapper = self.post(&format!("/org/{}", org_id), &body).await?;
        Ok(wrapper.org)
    }

    /// DELETE /org/{id}
    pub async fn delete_organization(&self, org_id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/org/{}", org_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::{create_test_client, envelope};
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[tokio::test]
    async fn create_sends_subnets_and_unwraps_org() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("PUT", "/org")
            .match_body(Matcher::Json(json!({
                "orgId": "my-org",
                "name": "My Org",
                "subnet": "100.90.128.0/24",
                "utilitySubnet": "100.90.129.0/24",
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(envelope(json!({
                "org": {
                    "orgId": "my-org",
                    "name": "My Org",
                    "subnet": "100.90.128.0/24",
                    "utilitySubnet": "100.90.129.0/24",
                }
            })))
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let org = client
            .create_organization(&Organization {
                id: Some("my-org".to_string()),
                name: "My Org".to_string(),
                subnet: Some("100.90.128.0/24".to_string()),
                utility_subnet: Some("100.90.129.0/24".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(org.id.as_deref(), Some("my-org"));
        assert_eq!(org.subnet.as_deref(), Some("100.90.128.0/24"));
    }

    #[tokio::test]
    async fn update_suppresses_write_once_subnets() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/org/my-org")
            .match_body(Matcher::Json(json!({"name": "Renamed"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(envelope(json!({
                "org": {
                    "orgId": "my-org",
                    "name": "Renamed",
                    "subnet": "100.90.128.0/24",
                    "utilitySubnet": "100.90.129.0/24",
                }
            })))
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let org = client
            .update_organization(
                "my-org",
                &Organization {
                    id: Some("my-org".to_string()),
                    name: "Renamed".to_string(),
                    subnet: Some("10.0.0.0/8".to_string()),
                    utility_subnet: Some("10.1.0.0/16".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(org.name, "Renamed");
    }

    #[tokio::test]
    async fn get_handles_null_subnets() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/org/my-org")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(envelope(json!({
                "org": {"orgId": "my-org", "name": "My Org", "subnet": null, "utilitySubnet": null}
            })))
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let org = client.get_organization("my-org").await.unwrap();

        assert!(org.subnet.is_none());
        assert!(org.utility_subnet.is_none());
    }
}
