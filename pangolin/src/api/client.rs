use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::error::ApiError;

/// Whole-request deadline applied to every API call.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Pangolin API client.
///
/// Cheap to clone and safe for concurrent use; the base URL and token are
/// read-only after construction.
#[derive(Clone, Debug)]
pub struct Client {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

/// The uniform wrapper the Pangolin API puts around every response.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub data: serde_json::Value,
    pub success: bool,
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub stack: Option<serde_json::Value>,
}

impl Client {
    pub fn new(base_url: &str, token: &str) -> Result<Self, ApiError> {
        Url::parse(base_url).map_err(|source| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url: base_url.trim_end_matches('/').to_string(),
                token: token.to_string(),
            }),
        })
    }

    /// Execute a request and unwrap the response envelope, returning the raw
    /// `data` field for the caller to decode.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, ApiError> {
        let url = format!("{}{}", self.inner.base_url, path);

        tracing::debug!(%method, %url, "pangolin API request");

        let mut request = self
            .inner
            .http
            .request(method, &url)
            .header(AUTHORIZATION, format!("Bearer {}", self.inner.token))
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return match serde_json::from_str::<ApiEnvelope>(&text) {
                Ok(envelope) => Err(ApiError::Api {
                    status: status.as_u16(),
                    message: envelope.message,
                }),
                Err(_) => Err(ApiError::Protocol {
                    status: status.as_u16(),
                    body: text,
                }),
            };
        }

        let envelope: ApiEnvelope = serde_json::from_str(&text).map_err(|e| {
            tracing::error!("response did not match the API envelope: {}, body: {}", e, text);
            ApiError::Parse(format!("response did not match the API envelope: {}", e))
        })?;

        if !envelope.success || envelope.error {
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: envelope.message,
            });
        }

        Ok(envelope.data)
    }

    /// Execute a GET request and decode the envelope's data field
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let data = self.request(Method::GET, path, None).await?;
        decode(data)
    }

    /// Execute a PUT (create) request and decode the envelope's data field
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let data = self.request(Method::PUT, path, Some(encode(body)?)).await?;
        decode(data)
    }

    /// Execute a POST (update) request and decode the envelope's data field
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let data = self.request(Method::POST, path, Some(encode(body)?)).await?;
        decode(data)
    }

    /// Execute a DELETE request, ignoring the response body
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.request(Method::DELETE, path, None).await.map(|_| ())
    }

    /// Execute a DELETE request carrying a JSON body, ignoring the response
    pub async fn delete_with_body<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        self.request(Method::DELETE, path, Some(encode(body)?))
            .await
            .map(|_| ())
    }
}

fn encode<B: Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))
}

fn decode<T: DeserializeOwned>(data: serde_json::Value) -> Result<T, ApiError> {
    serde_json::from_value(data)
        .map_err(|e| ApiError::Parse(format!("failed to decode response data: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::create_test_client;
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn request_unwraps_envelope_data() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/ping")
            .match_header("authorization", "Bearer test-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {"pong": true}, "success": true, "error": false, "message": "ok", "status": 200}"#)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let data = client.request(Method::GET, "/ping", None).await.unwrap();

        assert_eq!(data, serde_json::json!({"pong": true}));
    }

    #[tokio::test]
    async fn success_false_on_2xx_is_an_api_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/ping")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": null, "success": false, "error": true, "message": "something failed", "status": 200}"#)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let err = client.request(Method::GET, "/ping", None).await.unwrap_err();

        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 200);
                assert_eq!(message, "something failed");
            }
            other => panic!("expected ApiError::Api, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_2xx_with_envelope_surfaces_message() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/ping")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": null, "success": false, "error": true, "message": "not found", "status": 404}"#)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let err = client.request(Method::GET, "/ping", None).await.unwrap_err();

        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "not found");
            }
            other => panic!("expected ApiError::Api, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_2xx_with_unparseable_body_surfaces_raw_body() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/ping")
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let err = client.request(Method::GET, "/ping", None).await.unwrap_err();

        match err {
            ApiError::Protocol { status, body } => {
                assert_eq!(status, 502);
                assert!(body.contains("Bad Gateway"));
            }
            other => panic!("expected ApiError::Protocol, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_envelope_on_2xx_is_an_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/ping")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"unexpected": "shape"}"#)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let err = client.request(Method::GET, "/ping", None).await.unwrap_err();

        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[test]
    fn new_rejects_invalid_base_url() {
        let err = Client::new("not a url", "token").unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn new_trims_trailing_slash() {
        let client = Client::new("https://api.example.com/v1/", "token").unwrap();
        assert_eq!(client.inner.base_url, "https://api.example.com/v1");
    }
}
