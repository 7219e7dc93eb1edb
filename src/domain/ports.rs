use crate::domain::model::{ExecutionItem, Record, WorkflowRequest};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// 宿主提供的節點參數查詢 (`getNodeParameter`)
pub trait ParameterLookup: Send + Sync {
    fn parameter(&self, name: &str, item_index: usize) -> Option<&Value>;
}

/// 宿主提供的輸出包裝 (`returnJsonArray`)
pub trait OutputWrapper: Send + Sync {
    fn wrap(&self, records: Vec<Record>) -> Vec<ExecutionItem>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonArrayWrapper;

impl OutputWrapper for JsonArrayWrapper {
    fn wrap(&self, records: Vec<Record>) -> Vec<ExecutionItem> {
        records
            .into_iter()
            .map(|json| ExecutionItem { json })
            .collect()
    }
}

#[async_trait]
pub trait WorkflowApi: Send + Sync {
    async fn execute_workflow(&self, request: &WorkflowRequest) -> Result<Value>;
    async fn trigger_webhook(&self, webhook_url: &str, payload: &Value) -> Result<Value>;
    async fn list_workflows(&self) -> Result<Vec<Value>>;
}
