use devkit_client::{
    ApiClient, AuthGuard, ClientConfig, GuardDecision, HashLocation, Location, MemoryTokenStore,
    RouteTable, Router, TokenStore,
};
use httpmock::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig {
        base_url: server.base_url(),
        ..ClientConfig::default()
    }
}

#[tokio::test]
async fn test_successful_request_strips_envelope() {
    let server = MockServer::start();
    let reports = server.mock(|when, then| {
        when.method(GET)
            .path("/api/reports")
            .header("Authorization", "Bearer abc123");
        then.status(200).json_body(json!({"ok": true}));
    });

    let store = Arc::new(MemoryTokenStore::with_token("token", "abc123"));
    let client = ApiClient::builder(&config_for(&server), store).build().unwrap();

    assert_eq!(client.get("/reports").await.unwrap(), json!({"ok": true}));
    reports.assert();
}

#[tokio::test]
async fn test_anonymous_request_has_no_authorization_header() {
    let server = MockServer::start();
    let with_header = server.mock(|when, then| {
        when.method(GET)
            .path("/api/timestamp/current")
            .header_exists("Authorization");
        then.status(500);
    });
    let anonymous = server.mock(|when, then| {
        when.method(GET).path("/api/timestamp/current");
        then.status(200).json_body(json!({"success": true, "data": {"timestamp": 1700000000}}));
    });

    let client = ApiClient::builder(&config_for(&server), Arc::new(MemoryTokenStore::new()))
        .build()
        .unwrap();

    let body = client.get("/timestamp/current").await.unwrap();

    assert_eq!(body["data"]["timestamp"], json!(1700000000));
    with_header.assert_hits(0);
    anonymous.assert();
}

#[tokio::test]
async fn test_unauthorized_redirects_router_to_login() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/reports");
        then.status(401);
    });

    let config = config_for(&server);
    let store = Arc::new(MemoryTokenStore::with_token("token", "abc123"));
    let router = Arc::new(Router::new(
        RouteTable::standard(&config.login_route),
        AuthGuard::new(store.clone(), &config),
    ));
    router.navigate("/cron?expr=0").unwrap();

    let client = ApiClient::builder(&config, store.clone())
        .navigator(router.clone())
        .location(router.clone())
        .build()
        .unwrap();

    let err = client.get("/reports").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(store.get("token").unwrap(), None);
    assert_eq!(router.current().path, "/login");
    assert_eq!(
        router.current().query_param("redirect").as_deref(),
        Some("/cron?expr=0")
    );
}

#[tokio::test]
async fn test_unauthorized_without_location_uses_fallback() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/reports");
        then.status(401);
    });

    let store = Arc::new(MemoryTokenStore::with_token("token", "abc123"));
    let location = Arc::new(HashLocation::new());
    let client = ApiClient::builder(&config_for(&server), store.clone())
        .location(location.clone())
        .build()
        .unwrap();

    assert!(client.get("/reports").await.is_err());
    assert_eq!(store.get("token").unwrap(), None);
    assert_eq!(
        location.assigned(),
        vec!["#/login?redirect=%2Fdata-construction".to_string()]
    );
}

#[tokio::test]
async fn test_configured_fallback_redirect() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/reports");
        then.status(401);
    });

    let config = ClientConfig {
        fallback_redirect: "/md5".to_string(),
        ..config_for(&server)
    };
    let location = Arc::new(HashLocation::new());
    let client = ApiClient::builder(&config, Arc::new(MemoryTokenStore::with_token("token", "t")))
        .location(location.clone())
        .build()
        .unwrap();

    assert!(client.get("/reports").await.is_err());
    assert_eq!(location.assigned(), vec!["#/login?redirect=%2Fmd5".to_string()]);
}

#[test]
fn test_empty_token_navigation_scenario() {
    let config = ClientConfig::default();
    let store = Arc::new(MemoryTokenStore::with_token("token", ""));
    let guard = AuthGuard::new(store, &config);
    let table = RouteTable::standard(&config.login_route);
    let route = table.resolve("/data-construction").unwrap();

    assert_eq!(
        guard.check(route, &Location::parse("/data-construction")),
        GuardDecision::Redirect("/login?redirect=%2Fdata-construction".to_string())
    );
}
