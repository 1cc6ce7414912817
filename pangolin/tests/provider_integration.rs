//! End-to-end adapter scenarios against a mock Pangolin API

use mockito::{Matcher, Server};
use serde_json::json;
use std::any::Any;
use std::sync::Arc;

use pangolin::api::Client;
use pangolin::provider_data::PangolinProviderData;
use pangolin::resources::{
    AppResource, OrganizationResource, RoleResource, SiteResource, TargetResource,
};
use pangolin::PangolinProvider;
use tfkit::context::Context;
use tfkit::data_source::{
    ConfigureDataSourceRequest, DataSource, DataSourceWithConfigure, ReadDataSourceRequest,
};
use tfkit::provider::{ConfigureProviderRequest, Provider};
use tfkit::resource::{
    ConfigureResourceRequest, CreateResourceRequest, DeleteResourceRequest,
    ImportResourceStateRequest, ReadResourceRequest, Resource, ResourceWithConfigure,
    ResourceWithImportState, UpdateResourceRequest, ValidateResourceConfigRequest,
};
use tfkit::types::{AttributePath, DiagnosticSeverity, Dynamic, DynamicValue};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn path(name: &str) -> AttributePath {
    AttributePath::new(name)
}

fn provider_data(server: &Server) -> Option<Arc<dyn Any + Send + Sync>> {
    let client = Client::new(&server.url(), "test-token").unwrap();
    Some(Arc::new(PangolinProviderData::new(client)))
}

async fn configure<R: ResourceWithConfigure>(resource: &mut R, server: &Server) {
    let response = resource
        .configure(
            Context::new(),
            ConfigureResourceRequest {
                provider_data: provider_data(server),
            },
        )
        .await;
    assert!(response.diagnostics.is_empty());
}

fn envelope(data: serde_json::Value) -> String {
    json!({
        "data": data,
        "success": true,
        "error": false,
        "message": "ok",
        "status": 200,
    })
    .to_string()
}

// S1: creating an HTTP app resource with enabled=false issues a create
// without `enabled` followed by one update pinning it.
#[tokio::test]
async fn app_resource_create_with_enabled_is_two_phase() {
    init_tracing();
    let mut server = Server::new_async().await;

    let create_mock = server
        .mock("PUT", "/org/o1/resource")
        .match_header("authorization", "Bearer test-token")
        .match_body(Matcher::Json(json!({
            "name": "n",
            "protocol": "tcp",
            "http": true,
            "subdomain": "s",
            "domainId": "d",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!({
            "resourceId": 5,
            "enabled": true,
            "name": "n",
            "protocol": "tcp",
            "http": true,
            "subdomain": "s",
            "domainId": "d",
        })))
        .create_async()
        .await;

    let update_mock = server
        .mock("POST", "/resource/5")
        .match_body(Matcher::Json(json!({
            "enabled": false,
            "name": "n",
            "subdomain": "s",
            "domainId": "d",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!({
            "resourceId": 5,
            "enabled": false,
            "name": "n",
            "protocol": "tcp",
            "http": true,
            "subdomain": "s",
            "domainId": "d",
        })))
        .create_async()
        .await;

    let mut resource = AppResource::new();
    configure(&mut resource, &server).await;

    let mut plan = DynamicValue::object();
    plan.set_string(&path("org_id"), "o1".to_string()).unwrap();
    plan.set_string(&path("name"), "n".to_string()).unwrap();
    plan.set_string(&path("protocol"), "tcp".to_string()).unwrap();
    plan.set_bool(&path("http"), true).unwrap();
    plan.set_string(&path("subdomain"), "s".to_string()).unwrap();
    plan.set_string(&path("domain_id"), "d".to_string()).unwrap();
    plan.set_bool(&path("enabled"), false).unwrap();
    plan.mark_unknown(&path("id")).unwrap();

    let response = resource
        .create(
            Context::new(),
            CreateResourceRequest {
                type_name: "pangolin_resource".to_string(),
                planned_state: plan.clone(),
                config: plan,
            },
        )
        .await;

    assert!(response.diagnostics.is_empty());
    create_mock.assert_async().await;
    update_mock.assert_async().await;

    assert_eq!(response.new_state.get_i64(&path("id")).unwrap(), 5);
    assert!(!response.new_state.get_bool(&path("enabled")).unwrap());
    assert_eq!(response.new_state.get_string(&path("subdomain")).unwrap(), "s");
}

// A plan without `enabled` takes the server's create-time default and
// issues no follow-up update.
#[tokio::test]
async fn app_resource_create_without_enabled_is_single_phase() {
    let mut server = Server::new_async().await;

    let create_mock = server
        .mock("PUT", "/org/o1/resource")
        .match_body(Matcher::Json(json!({
            "name": "db",
            "protocol": "tcp",
            "http": false,
            "proxyPort": 5432,
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!({
            "resourceId": 6,
            "enabled": true,
            "name": "db",
            "protocol": "tcp",
            "http": false,
            "proxyPort": 5432,
        })))
        .expect(1)
        .create_async()
        .await;

    let update_mock = server
        .mock("POST", "/resource/6")
        .expect(0)
        .create_async()
        .await;

    let mut resource = AppResource::new();
    configure(&mut resource, &server).await;

    let mut plan = DynamicValue::object();
    plan.set_string(&path("org_id"), "o1".to_string()).unwrap();
    plan.set_string(&path("name"), "db".to_string()).unwrap();
    plan.set_string(&path("protocol"), "tcp".to_string()).unwrap();
    plan.set_bool(&path("http"), false).unwrap();
    plan.set_i64(&path("proxy_port"), 5432).unwrap();
    plan.mark_unknown(&path("enabled")).unwrap();
    plan.mark_unknown(&path("id")).unwrap();

    let response = resource
        .create(
            Context::new(),
            CreateResourceRequest {
                type_name: "pangolin_resource".to_string(),
                planned_state: plan.clone(),
                config: plan,
            },
        )
        .await;

    assert!(response.diagnostics.is_empty());
    create_mock.assert_async().await;
    update_mock.assert_async().await;

    assert_eq!(response.new_state.get_i64(&path("id")).unwrap(), 6);
    assert!(response.new_state.get_bool(&path("enabled")).unwrap());
}

// S2: the cross-field matrix emits one diagnostic per violated rule.
#[tokio::test]
async fn app_resource_validation_matrix() {
    let resource = AppResource::new();

    let mut config = DynamicValue::object();
    config.set_string(&path("org_id"), "o".to_string()).unwrap();
    config.set_string(&path("name"), "n".to_string()).unwrap();
    config.set_bool(&path("http"), true).unwrap();
    config.set_string(&path("protocol"), "udp".to_string()).unwrap();
    config.set_null(&path("subdomain")).unwrap();
    config.set_null(&path("domain_id")).unwrap();
    config.set_i64(&path("proxy_port"), 8080).unwrap();

    let response = resource
        .validate(
            Context::new(),
            ValidateResourceConfigRequest {
                type_name: "pangolin_resource".to_string(),
                config,
            },
        )
        .await;

    let summaries: Vec<&str> = response
        .diagnostics
        .iter()
        .map(|d| d.summary.as_str())
        .collect();
    assert_eq!(summaries.len(), 4);
    assert!(summaries.contains(&"Missing required param `subdomain`"));
    assert!(summaries.contains(&"Missing required param `domain_id`"));
    assert!(summaries.contains(&"Forbidden param `proxy_port`"));
    assert!(summaries.contains(&"Forbidden value for param `protocol`"));
    assert!(response
        .diagnostics
        .iter()
        .all(|d| d.severity == DiagnosticSeverity::Error));
}

#[tokio::test]
async fn app_resource_validation_accepts_a_valid_http_config() {
    let resource = AppResource::new();

    let mut config = DynamicValue::object();
    config.set_string(&path("org_id"), "o".to_string()).unwrap();
    config.set_string(&path("name"), "n".to_string()).unwrap();
    config.set_bool(&path("http"), true).unwrap();
    config.set_string(&path("protocol"), "tcp".to_string()).unwrap();
    config.set_string(&path("subdomain"), "web".to_string()).unwrap();
    config.set_string(&path("domain_id"), "dom-1".to_string()).unwrap();

    let response = resource
        .validate(
            Context::new(),
            ValidateResourceConfigRequest {
                type_name: "pangolin_resource".to_string(),
                config,
            },
        )
        .await;

    assert!(response.diagnostics.is_empty());
}

#[tokio::test]
async fn app_resource_validation_raw_mode() {
    let resource = AppResource::new();

    let mut config = DynamicValue::object();
    config.set_string(&path("org_id"), "o".to_string()).unwrap();
    config.set_string(&path("name"), "n".to_string()).unwrap();
    config.set_bool(&path("http"), false).unwrap();
    config.set_string(&path("protocol"), "udp".to_string()).unwrap();
    config.set_string(&path("subdomain"), "web".to_string()).unwrap();
    config.set_null(&path("proxy_port")).unwrap();

    let response = resource
        .validate(
            Context::new(),
            ValidateResourceConfigRequest {
                type_name: "pangolin_resource".to_string(),
                config,
            },
        )
        .await;

    let summaries: Vec<&str> = response
        .diagnostics
        .iter()
        .map(|d| d.summary.as_str())
        .collect();
    assert!(summaries.contains(&"Missing required param `proxy_port`"));
    assert!(summaries.contains(&"Forbidden param `subdomain`"));
    assert!(!summaries.contains(&"Forbidden param `domain_id`"));
}

// An unknown http flag makes the whole matrix undecidable.
#[tokio::test]
async fn app_resource_validation_skips_unknown_http() {
    let resource = AppResource::new();

    let mut config = DynamicValue::object();
    config.set_string(&path("org_id"), "o".to_string()).unwrap();
    config.set_string(&path("name"), "n".to_string()).unwrap();
    config.mark_unknown(&path("http")).unwrap();
    config.set_i64(&path("proxy_port"), 8080).unwrap();
    config.set_string(&path("subdomain"), "web".to_string()).unwrap();

    let response = resource
        .validate(
            Context::new(),
            ValidateResourceConfigRequest {
                type_name: "pangolin_resource".to_string(),
                config,
            },
        )
        .await;

    assert!(response.diagnostics.is_empty());
}

// S3: every role delete carries the replacement role body.
#[tokio::test]
async fn role_delete_names_the_replacement_role() {
    let mut server = Server::new_async().await;

    let delete_mock = server
        .mock("DELETE", "/role/7")
        .match_body(Matcher::Json(json!({"roleId": "2"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!(null)))
        .create_async()
        .await;

    let mut resource = RoleResource::new();
    configure(&mut resource, &server).await;

    let mut state = DynamicValue::object();
    state.set_string(&path("org_id"), "o".to_string()).unwrap();
    state.set_i64(&path("id"), 7).unwrap();
    state.set_string(&path("name"), "Ops".to_string()).unwrap();

    let response = resource
        .delete(
            Context::new(),
            DeleteResourceRequest {
                type_name: "pangolin_role".to_string(),
                prior_state: state,
            },
        )
        .await;

    assert!(response.diagnostics.is_empty());
    delete_mock.assert_async().await;
}

// S4: a failed membership read refreshes the scalar fields but keeps the
// prior membership list, without surfacing an error.
#[tokio::test]
async fn site_resource_read_swallows_membership_failures() {
    init_tracing();
    let mut server = Server::new_async().await;

    let _main = server
        .mock("GET", "/site-resource/1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!({
            "siteResourceId": 1,
            "niceId": "intranet-x2",
            "name": "renamed",
            "mode": "host",
            "siteId": 4,
            "destination": "10.0.0.5",
            "enabled": true,
            "tcpPortRangeString": "80,443",
            "udpPortRangeString": "*",
            "disableIcmp": false,
        })))
        .create_async()
        .await;

    let _roles = server
        .mock("GET", "/site-resource/1/roles")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let _users = server
        .mock("GET", "/site-resource/1/users")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!({"users": [{"userId": "u9"}]})))
        .create_async()
        .await;

    let _clients = server
        .mock("GET", "/site-resource/1/clients")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!({"clients": []})))
        .create_async()
        .await;

    let mut resource = SiteResource::new();
    configure(&mut resource, &server).await;

    let mut state = DynamicValue::object();
    state.set_i64(&path("id"), 1).unwrap();
    state.set_string(&path("nice_id"), "intranet-x2".to_string()).unwrap();
    state.set_string(&path("org_id"), "o".to_string()).unwrap();
    state.set_string(&path("name"), "intranet".to_string()).unwrap();
    state.set_string(&path("mode"), "host".to_string()).unwrap();
    state.set_i64(&path("site_id"), 4).unwrap();
    state.set_string(&path("destination"), "10.0.0.5".to_string()).unwrap();
    state.set_bool(&path("enabled"), true).unwrap();
    state
        .set_list(
            &path("role_ids"),
            vec![Dynamic::Number(1.0), Dynamic::Number(2.0)],
        )
        .unwrap();

    let response = resource
        .read(
            Context::new(),
            ReadResourceRequest {
                type_name: "pangolin_site_resource".to_string(),
                current_state: state,
            },
        )
        .await;

    assert!(response.diagnostics.is_empty());
    let new_state = response.new_state.unwrap();

    assert_eq!(new_state.get_string(&path("name")).unwrap(), "renamed");
    // prior membership kept for the failed endpoint
    assert_eq!(
        new_state.get_list(&path("role_ids")).unwrap(),
        vec![Dynamic::Number(1.0), Dynamic::Number(2.0)]
    );
    // refreshed for the ones that worked
    assert_eq!(
        new_state.get_list(&path("user_ids")).unwrap(),
        vec![Dynamic::String("u9".to_string())]
    );
    assert_eq!(new_state.get_list(&path("client_ids")).unwrap(), vec![]);
}

// S5: role-by-name lookup that finds nothing names the search key.
#[tokio::test]
async fn role_data_source_not_found() {
    let mut server = Server::new_async().await;

    let list_mock = server
        .mock("GET", "/org/o/roles")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!({
            "roles": [{"roleId": 1, "name": "Admin", "description": ""}]
        })))
        .expect(1)
        .create_async()
        .await;

    let provider = PangolinProvider::new();
    let mut data_source = provider.create_data_source("pangolin_role").await.unwrap();
    let response = data_source
        .configure(
            Context::new(),
            ConfigureDataSourceRequest {
                provider_data: provider_data(&server),
            },
        )
        .await;
    assert!(response.diagnostics.is_empty());

    let mut config = DynamicValue::object();
    config.set_string(&path("org_id"), "o".to_string()).unwrap();
    config.set_string(&path("name"), "X".to_string()).unwrap();

    let response = data_source
        .read(
            Context::new(),
            ReadDataSourceRequest {
                type_name: "pangolin_role".to_string(),
                config,
            },
        )
        .await;

    list_mock.assert_async().await;
    assert!(response.state.is_none());
    assert_eq!(response.diagnostics.len(), 1);
    assert!(response.diagnostics[0].detail.contains("\"X\""));
    assert!(response.diagnostics[0].detail.contains("\"o\""));
}

// S6: malformed import keys produce a diagnostic and no state.
#[tokio::test]
async fn role_import_rejects_malformed_keys() {
    let resource = RoleResource::new();

    let response = resource
        .import_state(
            Context::new(),
            ImportResourceStateRequest {
                type_name: "pangolin_role".to_string(),
                id: "only-one-part".to_string(),
            },
        )
        .await;

    assert!(response.imported_resources.is_empty());
    assert_eq!(response.diagnostics.len(), 1);
    assert!(response.diagnostics[0].detail.contains("org_id/role_id"));

    let response = resource
        .import_state(
            Context::new(),
            ImportResourceStateRequest {
                type_name: "pangolin_role".to_string(),
                id: "org/not-a-number".to_string(),
            },
        )
        .await;

    assert!(response.imported_resources.is_empty());
    assert!(response.diagnostics[0].detail.contains("integer"));

    let response = resource
        .import_state(
            Context::new(),
            ImportResourceStateRequest {
                type_name: "pangolin_role".to_string(),
                id: "org//".to_string(),
            },
        )
        .await;

    assert!(response.imported_resources.is_empty());
    assert_eq!(response.diagnostics.len(), 1);
}

#[tokio::test]
async fn role_import_parses_a_well_formed_key() {
    let resource = RoleResource::new();

    let response = resource
        .import_state(
            Context::new(),
            ImportResourceStateRequest {
                type_name: "pangolin_role".to_string(),
                id: "my-org/7".to_string(),
            },
        )
        .await;

    assert!(response.diagnostics.is_empty());
    let state = &response.imported_resources[0].state;
    assert_eq!(state.get_string(&path("org_id")).unwrap(), "my-org");
    assert_eq!(state.get_i64(&path("id")).unwrap(), 7);
}

// Round-trip: create followed by read reproduces the configured values and
// fills the computed id.
#[tokio::test]
async fn role_create_then_read_round_trips() {
    let mut server = Server::new_async().await;

    let _create = server
        .mock("PUT", "/org/o/role")
        .match_body(Matcher::Json(json!({"name": "Ops", "description": "Operators"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!({"roleId": 9, "name": "Ops", "description": "Operators"})))
        .create_async()
        .await;

    let _read = server
        .mock("GET", "/role/9")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!({"roleId": 9, "name": "Ops", "description": "Operators"})))
        .create_async()
        .await;

    let mut resource = RoleResource::new();
    configure(&mut resource, &server).await;

    let mut plan = DynamicValue::object();
    plan.set_string(&path("org_id"), "o".to_string()).unwrap();
    plan.set_string(&path("name"), "Ops".to_string()).unwrap();
    plan.set_string(&path("description"), "Operators".to_string()).unwrap();
    plan.mark_unknown(&path("id")).unwrap();

    let created = resource
        .create(
            Context::new(),
            CreateResourceRequest {
                type_name: "pangolin_role".to_string(),
                planned_state: plan.clone(),
                config: plan,
            },
        )
        .await;
    assert!(created.diagnostics.is_empty());
    assert_eq!(created.new_state.get_i64(&path("id")).unwrap(), 9);

    let read = resource
        .read(
            Context::new(),
            ReadResourceRequest {
                type_name: "pangolin_role".to_string(),
                current_state: created.new_state.clone(),
            },
        )
        .await;
    assert!(read.diagnostics.is_empty());
    assert_eq!(read.new_state.unwrap(), created.new_state);
}

// Idempotent update: replaying the settled state leaves it unchanged.
#[tokio::test]
async fn organization_update_with_settled_state_is_idempotent() {
    let mut server = Server::new_async().await;

    let update_mock = server
        .mock("POST", "/org/my-org")
        .match_body(Matcher::Json(json!({"name": "My Org"})))
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

    let mut resource = OrganizationResource::new();
    configure(&mut resource, &server).await;

    let mut state = DynamicValue::object();
    state.set_string(&path("id"), "my-org".to_string()).unwrap();
    state.set_string(&path("name"), "My Org".to_string()).unwrap();
    state.set_string(&path("subnet"), "100.90.128.0/24".to_string()).unwrap();
    state
        .set_string(&path("utility_subnet"), "100.90.129.0/24".to_string())
        .unwrap();

    let response = resource
        .update(
            Context::new(),
            UpdateResourceRequest {
                type_name: "pangolin_organization".to_string(),
                prior_state: state.clone(),
                planned_state: state.clone(),
                config: state.clone(),
            },
        )
        .await;

    assert!(response.diagnostics.is_empty());
    update_mock.assert_async().await;
    assert_eq!(response.new_state, state);
}

// Target writes carry exactly the four accepted fields; the declared
// routing attributes ride along in state untouched.
#[tokio::test]
async fn target_create_keeps_declared_extras_in_state() {
    let mut server = Server::new_async().await;

    let create_mock = server
        .mock("PUT", "/resource/42/target")
        .match_body(Matcher::Json(json!({
            "siteId": 4,
            "ip": "10.0.0.9",
            "port": 8080,
            "enabled": true,
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!({
            "targetId": 88,
            "siteId": 4,
            "ip": "10.0.0.9",
            "port": 8080,
            "enabled": true,
        })))
        .create_async()
        .await;

    let mut resource = TargetResource::new();
    configure(&mut resource, &server).await;

    let mut plan = DynamicValue::object();
    plan.set_i64(&path("resource_id"), 42).unwrap();
    plan.set_i64(&path("site_id"), 4).unwrap();
    plan.set_string(&path("ip"), "10.0.0.9".to_string()).unwrap();
    plan.set_i64(&path("port"), 8080).unwrap();
    plan.set_bool(&path("enabled"), true).unwrap();
    plan.set_string(&path("hc_path"), "/healthz".to_string()).unwrap();
    plan.set_i64(&path("priority"), 10).unwrap();
    plan.mark_unknown(&path("id")).unwrap();

    let response = resource
        .create(
            Context::new(),
            CreateResourceRequest {
                type_name: "pangolin_target".to_string(),
                planned_state: plan.clone(),
                config: plan,
            },
        )
        .await;

    assert!(response.diagnostics.is_empty());
    create_mock.assert_async().await;
    assert_eq!(response.new_state.get_i64(&path("id")).unwrap(), 88);
    assert_eq!(
        response.new_state.get_string(&path("hc_path")).unwrap(),
        "/healthz"
    );
    assert_eq!(response.new_state.get_i64(&path("priority")).unwrap(), 10);
}

#[tokio::test]
async fn target_import_takes_a_bare_integer() {
    let resource = TargetResource::new();

    let response = resource
        .import_state(
            Context::new(),
            ImportResourceStateRequest {
                type_name: "pangolin_target".to_string(),
                id: "88".to_string(),
            },
        )
        .await;
    assert!(response.diagnostics.is_empty());
    assert_eq!(
        response.imported_resources[0]
            .state
            .get_i64(&path("id"))
            .unwrap(),
        88
    );

    let response = resource
        .import_state(
            Context::new(),
            ImportResourceStateRequest {
                type_name: "pangolin_target".to_string(),
                id: "eighty-eight".to_string(),
            },
        )
        .await;
    assert!(response.imported_resources.is_empty());
    assert_eq!(response.diagnostics.len(), 1);
}

// Full provider flow: configure, instantiate through the registry, apply.
#[tokio::test]
async fn provider_lifecycle_with_mock_server() {
    let mut server = Server::new_async().await;

    let _create = server
        .mock("PUT", "/org/o/role")
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!({"roleId": 3, "name": "Dev", "description": ""})))
        .create_async()
        .await;

    let mut provider = PangolinProvider::new();
    let mut provider_config = DynamicValue::object();
    provider_config
        .set_string(&path("base_url"), server.url())
        .unwrap();
    provider_config
        .set_string(&path("token"), "test-token".to_string())
        .unwrap();

    let configured = provider
        .configure(
            Context::new(),
            ConfigureProviderRequest {
                config: provider_config,
            },
        )
        .await;
    assert!(configured.diagnostics.is_empty());

    let mut resource = provider.create_resource("pangolin_role").await.unwrap();
    let response = resource
        .configure(
            Context::new(),
            ConfigureResourceRequest {
                provider_data: configured.provider_data,
            },
        )
        .await;
    assert!(response.diagnostics.is_empty());

    let mut plan = DynamicValue::object();
    plan.set_string(&path("org_id"), "o".to_string()).unwrap();
    plan.set_string(&path("name"), "Dev".to_string()).unwrap();
    plan.mark_unknown(&path("id")).unwrap();

    let created = resource
        .create(
            Context::new(),
            CreateResourceRequest {
                type_name: "pangolin_role".to_string(),
                planned_state: plan.clone(),
                config: plan,
            },
        )
        .await;

    assert!(created.diagnostics.is_empty());
    assert_eq!(created.new_state.get_i64(&path("id")).unwrap(), 3);
}
