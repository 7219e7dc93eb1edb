use crate::core::transformer::{BatchTransformer, MESSAGE_PARAMETER};
use crate::core::{Clock, ExecutionItem, Operation, OutputWrapper, ParameterLookup, Record};
use crate::utils::error::{json_type_name, BridgeError, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

pub const OPERATION_PARAMETER: &str = "operation";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub display_name: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub group: Vec<&'static str>,
    pub version: u32,
    pub subtitle: &'static str,
    pub description: &'static str,
    pub defaults: NodeDefaults,
    pub inputs: Vec<&'static str>,
    pub outputs: Vec<&'static str>,
    pub properties: Vec<NodeProperty>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeDefaults {
    pub name: &'static str,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperty {
    pub display_name: &'static str,
    pub name: &'static str,
    pub r#type: &'static str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub no_data_expression: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<PropertyOption>,
    pub default: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_options: Option<DisplayOptions>,
}

/// 宿主依目前參數決定是否顯示此欄位
#[derive(Debug, Clone, Serialize)]
pub struct DisplayOptions {
    pub show: DisplayConditions,
}

#[derive(Debug, Clone, Serialize)]
pub struct DisplayConditions {
    pub operation: Vec<Operation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertyOption {
    pub name: &'static str,
    pub value: Operation,
    pub description: &'static str,
    pub action: &'static str,
}

/// 節點層級參數，另可針對個別項目覆寫
#[derive(Debug, Clone, Default)]
pub struct NodeParameters {
    values: HashMap<String, Value>,
    per_item: HashMap<usize, HashMap<String, Value>>,
}

impl NodeParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: Value) -> Self {
        self.values.insert(name.to_string(), value);
        self
    }

    pub fn with_item(mut self, item_index: usize, name: &str, value: Value) -> Self {
        self.per_item
            .entry(item_index)
            .or_default()
            .insert(name.to_string(), value);
        self
    }
}

impl ParameterLookup for NodeParameters {
    fn parameter(&self, name: &str, item_index: usize) -> Option<&Value> {
        self.per_item
            .get(&item_index)
            .and_then(|params| params.get(name))
            .or_else(|| self.values.get(name))
    }
}

/// 宿主每批次呼叫一次的外掛節點
pub struct ExampleNode<C: Clock> {
    transformer: BatchTransformer<C>,
}

impl<C: Clock> ExampleNode<C> {
    pub fn new(clock: C) -> Self {
        Self {
            transformer: BatchTransformer::new(clock),
        }
    }

    pub fn description() -> NodeDescription {
        NodeDescription {
            display_name: "Example Node",
            name: "exampleNode",
            icon: "file:example.svg",
            group: vec!["transform"],
            version: 1,
            subtitle: "={{$parameter[\"operation\"]}}",
            description: "Example node for Cursor + n8n integration",
            defaults: NodeDefaults {
                name: "Example Node",
            },
            inputs: vec!["main"],
            outputs: vec!["main"],
            properties: vec![
                NodeProperty {
                    display_name: "Operation",
                    name: OPERATION_PARAMETER,
                    r#type: "options",
                    no_data_expression: true,
                    options: vec![
                        PropertyOption {
                            name: "Transform Data",
                            value: Operation::Transform,
                            description: "Transform incoming data",
                            action: "Transform data",
                        },
                        PropertyOption {
                            name: "Process Text",
                            value: Operation::ProcessText,
                            description: "Process text data",
                            action: "Process text",
                        },
                    ],
                    default: Value::String(Operation::default().to_string()),
                    ..Default::default()
                },
                NodeProperty {
                    display_name: "Message",
                    name: MESSAGE_PARAMETER,
                    r#type: "string",
                    default: Value::String(String::new()),
                    placeholder: Some("Enter your message"),
                    description: Some("The message to process"),
                    display_options: Some(DisplayOptions {
                        show: DisplayConditions {
                            operation: vec![Operation::ProcessText],
                        },
                    }),
                    ..Default::default()
                },
            ],
        }
    }

    /// 執行一批項目，回傳恰好一組輸出
    pub fn execute(
        &self,
        items: &[Record],
        params: &dyn ParameterLookup,
        wrapper: &dyn OutputWrapper,
    ) -> Result<Vec<Vec<ExecutionItem>>> {
        let operation = resolve_operation(params)?;
        tracing::debug!(
            "🧩 exampleNode: executing '{}' on {} items",
            operation,
            items.len()
        );

        let records = self.transformer.transform(items, operation, params)?;
        Ok(vec![wrapper.wrap(records)])
    }
}

/// operation 只在第 0 筆解析一次，套用整批
fn resolve_operation(params: &dyn ParameterLookup) -> Result<Operation> {
    match params.parameter(OPERATION_PARAMETER, 0) {
        None => Ok(Operation::default()),
        Some(Value::String(value)) => value.parse(),
        Some(other) => Err(BridgeError::ParameterTypeError {
            name: OPERATION_PARAMETER.to_string(),
            index: 0,
            expected: "string",
            found: json_type_name(other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{JsonArrayWrapper, SystemClock};
    use serde_json::json;

    fn node() -> ExampleNode<SystemClock> {
        ExampleNode::new(SystemClock)
    }

    fn items(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record::default().with_field("id", json!(i)))
            .collect()
    }

    #[test]
    fn test_execute_defaults_to_transform() {
        let node = node();
        let output = node
            .execute(&items(3), &NodeParameters::new(), &JsonArrayWrapper)
            .unwrap();

        assert_eq!(output.len(), 1);
        assert_eq!(output[0].len(), 3);
        for (i, item) in output[0].iter().enumerate() {
            assert_eq!(item.json.get("id"), Some(&json!(i)));
            assert_eq!(item.json.get("processed"), Some(&json!(true)));
        }
    }

    #[test]
    fn test_execute_process_text_with_item_override() {
        let node = node();
        let params = NodeParameters::new()
            .with(OPERATION_PARAMETER, json!("processText"))
            .with(MESSAGE_PARAMETER, json!("hello"))
            .with_item(1, MESSAGE_PARAMETER, json!("bye"));

        let output = node.execute(&items(2), &params, &JsonArrayWrapper).unwrap();

        assert_eq!(output[0][0].json.get("processedMessage"), Some(&json!("HELLO")));
        assert_eq!(output[0][1].json.get("processedMessage"), Some(&json!("BYE")));
    }

    #[test]
    fn test_execute_rejects_unknown_operation() {
        let node = node();
        let params = NodeParameters::new().with(OPERATION_PARAMETER, json!("delete"));

        let result = node.execute(&items(2), &params, &JsonArrayWrapper);

        assert!(matches!(
            result,
            Err(BridgeError::UnknownOperation { value }) if value == "delete"
        ));
    }

    #[test]
    fn test_execute_rejects_non_string_operation() {
        let node = node();
        let params = NodeParameters::new().with(OPERATION_PARAMETER, json!(1));

        assert!(matches!(
            node.execute(&items(1), &params, &JsonArrayWrapper),
            Err(BridgeError::ParameterTypeError { index: 0, .. })
        ));
    }

    #[test]
    fn test_description_matches_node_properties() {
        let description = serde_json::to_value(ExampleNode::<SystemClock>::description()).unwrap();

        assert_eq!(description["name"], json!("exampleNode"));
        assert_eq!(description["icon"], json!("file:example.svg"));
        assert_eq!(description["subtitle"], json!("={{$parameter[\"operation\"]}}"));
        assert_eq!(description["defaults"], json!({"name": "Example Node"}));

        let operation = &description["properties"][0];
        assert_eq!(operation["default"], json!("transform"));
        assert_eq!(operation["noDataExpression"], json!(true));
        assert_eq!(operation["options"][1]["value"], json!("processText"));
        assert_eq!(operation["options"][1]["action"], json!("Process text"));
        assert!(operation.get("displayOptions").is_none());

        let message = &description["properties"][1];
        assert_eq!(message["placeholder"], json!("Enter your message"));
        assert_eq!(message["description"], json!("The message to process"));
        assert_eq!(
            message["displayOptions"],
            json!({"show": {"operation": ["processText"]}})
        );
        assert!(message.get("noDataExpression").is_none());
        assert!(message.get("options").is_none());
    }
}
