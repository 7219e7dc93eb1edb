use httpmock::prelude::*;
use n8n_bridge::{BridgeError, ConnectionConfig, WorkflowApi, WorkflowClient, WorkflowRequest};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

fn client_for(server: &MockServer) -> WorkflowClient {
    WorkflowClient::new(ConnectionConfig::new(server.base_url(), "test-api-key"))
}

#[tokio::test]
async fn test_execute_workflow_sends_payload_and_api_key() {
    let server = MockServer::start();

    let execute_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/workflows/wf-42/execute")
            .header("x-n8n-api-key", "test-api-key")
            .header("content-type", "application/json")
            .json_body(json!({"customer": "acme", "items": [1, 2, 3]}));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"executionId": "e-1", "finished": true}));
    });

    let client = client_for(&server);
    let request = WorkflowRequest::new("wf-42", json!({"customer": "acme", "items": [1, 2, 3]}));
    let result = assert_ok!(client.execute_workflow(&request).await);

    execute_mock.assert();
    assert_eq!(result, json!({"executionId": "e-1", "finished": true}));
}

#[tokio::test]
async fn test_execute_workflow_not_found_skips_body_parsing() {
    let server = MockServer::start();

    let execute_mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1/workflows/missing/execute");
        then.status(404).body("<html>definitely not json</html>");
    });

    let client = client_for(&server);
    let err = assert_err!(
        client
            .execute_workflow(&WorkflowRequest::new("missing", json!({})))
            .await
    );

    execute_mock.assert();
    match err {
        BridgeError::RemoteApiError {
            status,
            status_text,
        } => {
            assert_eq!(status, 404);
            assert_eq!(status_text, "Not Found");
        }
        other => panic!("expected RemoteApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_success_status_with_error_payload_is_returned_as_is() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/api/v1/workflows/wf-1/execute");
        then.status(200)
            .json_body(json!({"error": "workflow has no trigger"}));
    });

    let client = client_for(&server);
    let result = assert_ok!(
        client
            .execute_workflow(&WorkflowRequest::new("wf-1", json!(null)))
            .await
    );

    assert_eq!(result, json!({"error": "workflow has no trigger"}));
}

#[tokio::test]
async fn test_malformed_success_body_is_classified() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/api/v1/workflows/wf-1/execute");
        then.status(200).body("OK");
    });

    let client = client_for(&server);
    let err = assert_err!(
        client
            .execute_workflow(&WorkflowRequest::new("wf-1", json!({})))
            .await
    );

    assert!(matches!(err, BridgeError::MalformedResponseError { .. }));
}

#[tokio::test]
async fn test_trigger_webhook_without_api_key() {
    let server = MockServer::start();

    let webhook_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/webhook/order-created")
            .header("content-type", "application/json")
            .json_body(json!({"orderId": 7}))
            .matches(|req| {
                req.headers.as_ref().map_or(true, |headers| {
                    headers
                        .iter()
                        .all(|(name, _)| !name.eq_ignore_ascii_case("x-n8n-api-key"))
                })
            });
        then.status(200).json_body(json!({"received": true}));
    });

    let client = client_for(&server);
    let result = assert_ok!(
        client
            .trigger_webhook(&server.url("/webhook/order-created"), &json!({"orderId": 7}))
            .await
    );

    webhook_mock.assert();
    assert_eq!(result, json!({"received": true}));
}

#[tokio::test]
async fn test_trigger_webhook_failure_is_webhook_error() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/webhook/broken");
        then.status(500);
    });

    let client = client_for(&server);
    let err = assert_err!(
        client
            .trigger_webhook(&server.url("/webhook/broken"), &json!({}))
            .await
    );

    assert!(matches!(
        err,
        BridgeError::WebhookError { status: 500, ref status_text } if status_text == "Internal Server Error"
    ));
}

#[tokio::test]
async fn test_list_workflows_returns_data_array() {
    let server = MockServer::start();

    let list_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/workflows")
            .header("x-n8n-api-key", "test-api-key");
        then.status(200)
            .json_body(json!({"data": [{"id": "w1"}], "nextCursor": null}));
    });

    let client = client_for(&server);
    let workflows = assert_ok!(client.list_workflows().await);

    list_mock.assert();
    assert_eq!(workflows, vec![json!({"id": "w1"})]);
}

#[tokio::test]
async fn test_list_workflows_without_data_is_empty() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/v1/workflows");
        then.status(200).json_body(json!({}));
    });

    let client = client_for(&server);
    let workflows = assert_ok!(client.list_workflows().await);

    assert!(workflows.is_empty());
}

#[tokio::test]
async fn test_list_workflows_unauthorized() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/v1/workflows");
        then.status(401).body("unauthorized");
    });

    let client = client_for(&server);
    let err = assert_err!(client.list_workflows().await);

    assert_eq!(err.status(), Some(401));
    assert!(matches!(err, BridgeError::RemoteApiError { .. }));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // 1 號埠不會有服務在聽
    let client = WorkflowClient::new(ConnectionConfig::new("http://127.0.0.1:1", "k"));
    let api: &dyn WorkflowApi = &client;

    let err = assert_err!(api.list_workflows().await);

    assert!(matches!(err, BridgeError::TransportError(_)));
}
