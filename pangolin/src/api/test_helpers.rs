//! Test helpers for the Pangolin API

pub fn create_test_client(url: &str) -> super::Client {
    super::Client::new(url, "test-token").unwrap()
}

/// Wraps a payload in the standard success envelope.
pub fn envelope(data: serde_json::Value) -> String {
    serde_json::json!({
        "data": data,
        "success": true,
        "error": false,
        "message": "ok",
        "status": 200,
    })
    .to_string()
}
