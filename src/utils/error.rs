use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("n8n API error: {status} {status_text}")]
    RemoteApiError { status: u16, status_text: String },

    #[error("Webhook error: {status} {status_text}")]
    WebhookError { status: u16, status_text: String },

    #[error("Parameter '{name}' at item {index} must be a {expected}, got {found}")]
    ParameterTypeError {
        name: String,
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Unknown operation: {value}")]
    UnknownOperation { value: String },

    #[error("Malformed response body: {source}")]
    MalformedResponseError {
        #[source]
        source: serde_json::Error,
    },

    #[error("HTTP transport failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl BridgeError {
    /// HTTP 狀態碼（僅限遠端回應錯誤）
    pub fn status(&self) -> Option<u16> {
        match self {
            BridgeError::RemoteApiError { status, .. } | BridgeError::WebhookError { status, .. } => {
                Some(*status)
            }
            BridgeError::TransportError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// JSON 值的型別名稱，用於錯誤訊息
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
