use crate::utils::error::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// 單筆資料：字串鍵對應任意 JSON 值，保留欄位順序
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: Map<String, Value>,
}

impl Record {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// 從 JSON 物件建立記錄；接受裸物件或 `{ "json": {...} }` 包裝
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(mut obj) => {
                let is_envelope =
                    obj.len() == 1 && matches!(obj.get("json"), Some(Value::Object(_)));
                if is_envelope {
                    if let Some(Value::Object(inner)) = obj.remove("json") {
                        return Ok(Self::new(inner));
                    }
                }
                Ok(Self::new(obj))
            }
            other => Err(BridgeError::ConfigValidationError {
                field: "input".to_string(),
                message: format!(
                    "Expected a JSON object per item, got {}",
                    crate::utils::error::json_type_name(&other)
                ),
            }),
        }
    }

    /// 從 JSON 陣列建立整批記錄；任一項目不合法則整批失敗
    pub fn batch_from_json(value: Value) -> Result<Vec<Self>> {
        match value {
            Value::Array(items) => items.into_iter().map(Self::from_json).collect(),
            other => Err(BridgeError::ConfigValidationError {
                field: "input".to_string(),
                message: format!(
                    "Expected a JSON array of items, got {}",
                    crate::utils::error::json_type_name(&other)
                ),
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// 新增或覆寫欄位（後寫入者優先，既有欄位保留原位置）
    pub fn with_field(mut self, key: &str, value: Value) -> Self {
        self.data.insert(key.to_string(), value);
        self
    }
}

/// 宿主的項目包裝格式 (`INodeExecutionData`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionItem {
    pub json: Record,
}

/// 一次工作流程執行請求：工作流程 ID 與任意 JSON 負載
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRequest {
    pub workflow_id: String,
    pub data: Value,
}

impl WorkflowRequest {
    pub fn new(workflow_id: impl Into<String>, data: Value) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            data,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Operation {
    #[default]
    #[serde(rename = "transform")]
    Transform,
    #[serde(rename = "processText")]
    ProcessText,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Transform => "transform",
            Operation::ProcessText => "processText",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "transform" => Ok(Operation::Transform),
            "processText" => Ok(Operation::ProcessText),
            other => Err(BridgeError::UnknownOperation {
                value: other.to_string(),
            }),
        }
    }
}
