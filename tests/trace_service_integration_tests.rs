use std::sync::mpsc;
use std::time::Duration;

use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use tracer::api::{ApiError, HttpTraceService, TraceService};
use tracer::core::action::{Action, Command, Payload};
use tracer::core::config::ResolvedConfig;
use tracer::core::query::QueryContext;
use tracer::scheduler::Scheduler;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

const TOKEN: &str = "tok123";

fn service_for(server: &MockServer) -> HttpTraceService {
    HttpTraceService::new(server.uri(), Duration::from_secs(5)).unwrap()
}

fn person_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "mykad": "900101-01-1234",
        "address": "12 Jalan Ampang",
        "gender": "F"
    })
}

// ============================================================================
// Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_name_search_posts_term_and_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/trace/name"))
        .and(header("X-API-Token", TOKEN))
        .and(body_json(json!({"name": "Ali", "page": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 42, "name": "Ali Bin Abu", "mykad": "900101-01-1234"},
                {"id": 43, "name": "Ali Bin Ahmad", "mykad": "910202-02-5678"}
            ],
            "message": "ok",
            "user": {
                "id": 1,
                "name": "ops",
                "role": "user",
                "balance": 12.5,
                "subscriptions": [
                    {"plan": "pro", "active": true, "expired_at": "2026-12-31T00:00:00Z"}
                ]
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = service_for(&mock_server)
        .search_by_name(TOKEN, "Ali", 2)
        .await
        .unwrap();

    assert_eq!(response.data.len(), 2);
    assert_eq!(response.data[0].id, 42);
    let account = response.user.unwrap();
    assert_eq!(account.name, "ops");
    assert_eq!(account.active_subscription().unwrap().plan, "pro");
}

#[tokio::test]
async fn test_id_lookup_posts_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/trace/id"))
        .and(header("X-API-Token", TOKEN))
        .and(body_json(json!({"id": 42})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": [person_json(42, "Siti")], "message": "ok"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = service_for(&mock_server).lookup_by_id(TOKEN, 42).await.unwrap();

    assert_eq!(response.data[0].name, "Siti");
    assert_eq!(response.data[0].address, "12 Jalan Ampang");
    assert!(response.user.is_none());
}

#[tokio::test]
async fn test_identity_number_lookup_posts_nric() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/trace/nric"))
        .and(body_json(json!({"nric": "900101011234"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": [person_json(5, "Siti")]})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = service_for(&mock_server)
        .lookup_by_identity_number(TOKEN, "900101011234")
        .await
        .unwrap();

    assert_eq!(response.data[0].id, 5);
}

#[tokio::test]
async fn test_relations_posts_id_and_offset() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/trace/relations"))
        .and(body_json(json!({"id": 7, "offset": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [person_json(8, "Aminah")],
            "relationships": {"user_id": 7, "related_user_id": 8, "relation": "sibling"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = service_for(&mock_server)
        .fetch_relations(TOKEN, 7, 1)
        .await
        .unwrap();

    assert_eq!(response.relationships.relation, "sibling");
    assert_eq!(response.relationships.related_user_id, 8);
    assert_eq!(response.data[0].name, "Aminah");
}

#[tokio::test]
async fn test_history_posts_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/history"))
        .and(body_json(json!({"page": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "type": "name",
                "email": "ops@example.com",
                "query": "Ali",
                "result_summary": "2 results",
                "cost": 0.5
            }],
            "message": "ok"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = service_for(&mock_server).fetch_history(TOKEN, 1).await.unwrap();

    assert_eq!(response.data[0].kind, "name");
    assert_eq!(response.data[0].result, "2 results");
}

#[tokio::test]
async fn test_empty_data_is_not_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/trace/name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "no results"})))
        .mount(&mock_server)
        .await;

    let response = service_for(&mock_server)
        .search_by_name(TOKEN, "Nobody", 1)
        .await
        .unwrap();

    assert!(response.data.is_empty());
}

// ============================================================================
// Error Tests
// ============================================================================

#[tokio::test]
async fn test_non_ok_status_carries_code_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/trace/id"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
        .mount(&mock_server)
        .await;

    let result = service_for(&mock_server).lookup_by_id(TOKEN, 42).await;

    let err = result.unwrap_err();
    assert_eq!(
        err,
        ApiError::Api {
            status: 401,
            message: "invalid token".to_string()
        }
    );
    assert_eq!(err.to_string(), "API returned non-OK status: 401 - invalid token");
}

#[tokio::test]
async fn test_malformed_json_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let result = service_for(&mock_server).fetch_history(TOKEN, 1).await;

    let err = assert_err!(result);
    assert!(matches!(err, ApiError::Parse(_)));
}

#[tokio::test]
async fn test_missing_token_never_reaches_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = service_for(&mock_server).search_by_name("", "Ali", 1).await;

    assert_eq!(result.unwrap_err(), ApiError::MissingToken);
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Nothing listens on port 9 (discard) in test environments.
    let service = HttpTraceService::new("http://127.0.0.1:9".to_string(), Duration::from_secs(2)).unwrap();

    let result = service.fetch_history(TOKEN, 1).await;

    assert!(matches!(result, Err(ApiError::Network(_))));
}

// ============================================================================
// Scheduler Tests
// ============================================================================

#[tokio::test]
async fn test_scheduler_round_trip_through_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/trace/relations"))
        .and(header("X-API-Token", TOKEN))
        .and(body_json(json!({"id": 7, "offset": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [person_json(8, "Aminah")],
            "relationships": {"user_id": 7, "related_user_id": 8, "relation": "sibling"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ResolvedConfig {
        base_url: format!("{}/", mock_server.uri()),
        ..ResolvedConfig::default()
    };
    let (tx, rx) = mpsc::channel();
    let scheduler = Scheduler::new(&config, tx).unwrap();

    let handle = scheduler.schedule(Command {
        query: QueryContext::Relations { id: 7, offset: 1 },
        token: TOKEN.to_string(),
    });
    assert_ok!(handle.await);

    match rx.try_recv() {
        Ok(Action::Completed(completion)) => {
            assert_eq!(completion.query, QueryContext::Relations { id: 7, offset: 1 });
            match completion.outcome {
                Ok(Payload::Relations { records, relation, .. }) => {
                    assert_eq!(records[0].id, 8);
                    assert_eq!(relation.relation, "sibling");
                }
                other => panic!("Expected relations payload, got {:?}", other),
            }
        }
        other => panic!("Expected a completion, got {:?}", other),
    }
}

#[tokio::test]
async fn test_scheduler_reports_server_errors_as_completions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let config = ResolvedConfig {
        base_url: mock_server.uri(),
        ..ResolvedConfig::default()
    };
    let (tx, rx) = mpsc::channel();
    let scheduler = Scheduler::new(&config, tx).unwrap();

    let handle = scheduler.schedule(Command {
        query: QueryContext::history(),
        token: TOKEN.to_string(),
    });
    assert_ok!(handle.await);

    match rx.try_recv() {
        Ok(Action::Completed(completion)) => {
            assert_eq!(
                completion.outcome.unwrap_err().to_string(),
                "API returned non-OK status: 500 - boom"
            );
        }
        other => panic!("Expected a completion, got {:?}", other),
    }
}
