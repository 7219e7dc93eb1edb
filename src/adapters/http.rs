use crate::core::{WorkflowApi, WorkflowRequest};
use crate::utils::error::{BridgeError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

pub const API_KEY_HEADER: &str = "X-N8N-API-KEY";

/// 遠端 n8n 實例的連線設定，建立後不可變
#[derive(Clone)]
pub struct ConnectionConfig {
    base_url: String,
    api_key: String,
}

impl ConnectionConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .finish()
    }
}

impl Validate for ConnectionConfig {
    fn validate(&self) -> Result<()> {
        validate_url("connection.base_url", &self.base_url)?;
        validate_non_empty_string("connection.api_key", &self.api_key)?;
        Ok(())
    }
}

/// 失敗時要歸類成哪一種錯誤
#[derive(Debug, Clone, Copy)]
enum Endpoint {
    Api,
    Webhook,
}

#[derive(Debug, Clone)]
pub struct WorkflowClient {
    config: ConnectionConfig,
    client: Client,
}

impl WorkflowClient {
    pub fn new(config: ConnectionConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// 使用呼叫端自訂的 reqwest Client（例如設定逾時）
    pub fn with_client(config: ConnectionConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn workflows_url(&self) -> String {
        format!("{}/api/v1/workflows", self.config.base_url)
    }
}

#[async_trait]
impl WorkflowApi for WorkflowClient {
    async fn execute_workflow(&self, request: &WorkflowRequest) -> Result<Value> {
        let url = format!("{}/{}/execute", self.workflows_url(), request.workflow_id);
        tracing::debug!("📡 POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.config.api_key)
            .body(serde_json::to_vec(&request.data)?)
            .send()
            .await?;

        let response = ensure_success(response, Endpoint::Api)?;
        read_json(response).await
    }

    async fn trigger_webhook(&self, webhook_url: &str, payload: &Value) -> Result<Value> {
        tracing::debug!("📡 POST {}", webhook_url);

        let response = self
            .client
            .post(webhook_url)
            .header(CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(payload)?)
            .send()
            .await?;

        let response = ensure_success(response, Endpoint::Webhook)?;
        read_json(response).await
    }

    async fn list_workflows(&self) -> Result<Vec<Value>> {
        let url = self.workflows_url();
        tracing::debug!("📡 GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await?;

        let response = ensure_success(response, Endpoint::Api)?;
        let workflows = workflows_from_body(read_json(response).await?)?;
        tracing::debug!("📡 Listed {} workflows", workflows.len());
        Ok(workflows)
    }
}

/// 非 2xx 直接回報錯誤，不讀取錯誤回應內容
fn ensure_success(response: Response, endpoint: Endpoint) -> Result<Response> {
    let status = response.status();
    tracing::debug!("📡 Response status: {}", status);

    if status.is_success() {
        return Ok(response);
    }

    let status_text = status_text(status);
    tracing::warn!(
        "❌ {:?} request to {} failed: {} {}",
        endpoint,
        response.url(),
        status.as_u16(),
        status_text
    );

    Err(match endpoint {
        Endpoint::Api => BridgeError::RemoteApiError {
            status: status.as_u16(),
            status_text,
        },
        Endpoint::Webhook => BridgeError::WebhookError {
            status: status.as_u16(),
            status_text,
        },
    })
}

fn status_text(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_string()
}

async fn read_json(response: Response) -> Result<Value> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|source| BridgeError::MalformedResponseError { source })
}

/// 取出 `data` 陣列；沒有 `data` 時視為空清單
fn workflows_from_body(body: Value) -> Result<Vec<Value>> {
    let data = match body {
        Value::Object(mut obj) => obj.remove("data"),
        _ => None,
    };

    match data {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(data) => serde_json::from_value(data)
            .map_err(|source| BridgeError::MalformedResponseError { source }),
    }
}
