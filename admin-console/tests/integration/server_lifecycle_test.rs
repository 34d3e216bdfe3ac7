//! 実ポートで起動したサーバーに対する結合テスト

use admin_console::audit::types::EventType;
use reqwest::StatusCode;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::console::{audit_logs, bearer_for, create_test_state};
use crate::support::http::spawn_console;

#[tokio::test]
async fn health_endpoint_over_tcp() {
    let tenant = MockServer::start().await;
    let (state, _db_pool) = create_test_state(&tenant.uri()).await;
    let server = spawn_console(state).await;

    let response = reqwest::get(server.url("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn start_is_audited_then_proxied_over_tcp() {
    let tenant = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tenants/update/start"))
        .and(query_param("envType", "prod"))
        .respond_with(
            ResponseTemplate::new(202)
                .insert_header("location", "/api/tenants/update")
                .set_body_string("accepted"),
        )
        .expect(1)
        .mount(&tenant)
        .await;
    let (state, db_pool) = create_test_state(&tenant.uri()).await;
    let server = spawn_console(state).await;
    let identity_id = Uuid::new_v4();

    let response = reqwest::Client::new()
        .post(server.url("/api/tenants/update/start?envType=prod"))
        .header("authorization", bearer_for(identity_id))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(
        response.headers().get("location").unwrap(),
        "/api/tenants/update"
    );
    assert_eq!(response.text().await.unwrap(), "accepted");

    let logs = audit_logs(&db_pool).await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].event_type, EventType::StartTenantUpdate);
    assert_eq!(logs[0].identity_id, identity_id);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn server_stops_on_shutdown_request() {
    let tenant = MockServer::start().await;
    let (state, _db_pool) = create_test_state(&tenant.uri()).await;
    let server = spawn_console(state).await;
    let url = server.url("/health");

    tokio::time::timeout(std::time::Duration::from_secs(5), server.stop())
        .await
        .expect("server did not stop in time")
        .unwrap();

    assert!(reqwest::get(url).await.is_err());
}
