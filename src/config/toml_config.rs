use crate::adapters::http::ConnectionConfig;
use crate::core::node::{NodeParameters, OPERATION_PARAMETER};
use crate::core::transformer::MESSAGE_PARAMETER;
use crate::core::Operation;
use crate::utils::error::{BridgeError, Result};
use crate::utils::validation::{validate_required_field, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub connection: ConnectionSection,
    #[serde(default)]
    pub node: NodeSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectionSection {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeSection {
    pub operation: Option<Operation>,
    pub message: Option<String>,
}

impl BridgeConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BridgeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BridgeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${N8N_API_KEY})；找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BridgeError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 命令列參數優先於檔案內容
    pub fn merge_connection(&mut self, base_url: Option<String>, api_key: Option<String>) {
        if base_url.is_some() {
            self.connection.base_url = base_url;
        }
        if api_key.is_some() {
            self.connection.api_key = api_key;
        }
    }

    pub fn connection_config(&self) -> Result<ConnectionConfig> {
        let base_url = validate_required_field("connection.base_url", &self.connection.base_url)?;
        let api_key = validate_required_field("connection.api_key", &self.connection.api_key)?;
        let config = ConnectionConfig::new(base_url.clone(), api_key.clone());
        config.validate()?;
        Ok(config)
    }

    pub fn operation(&self) -> Operation {
        self.node.operation.unwrap_or_default()
    }

    /// 組出節點參數；命令列的 operation/message 優先於 `[node]`
    pub fn node_parameters(
        &self,
        operation: Option<String>,
        message: Option<String>,
    ) -> NodeParameters {
        let operation = operation.unwrap_or_else(|| self.operation().to_string());
        let params = NodeParameters::new().with(OPERATION_PARAMETER, Value::String(operation));

        match message.or_else(|| self.node.message.clone()) {
            Some(message) => params.with(MESSAGE_PARAMETER, Value::String(message)),
            None => params,
        }
    }
}
