use crate::core::{Clock, Operation, ParameterLookup, Record};
use crate::utils::error::{json_type_name, BridgeError, Result};
use chrono::SecondsFormat;
use serde_json::Value;

pub const PROCESSED_BY: &str = "Cursor + n8n Integration";
pub const MESSAGE_PARAMETER: &str = "message";

/// 每批次的逐筆轉換；輸出長度與順序和輸入一致
pub struct BatchTransformer<C: Clock> {
    clock: C,
}

impl<C: Clock> BatchTransformer<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn transform(
        &self,
        records: &[Record],
        operation: Operation,
        params: &dyn ParameterLookup,
    ) -> Result<Vec<Record>> {
        let mut output = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let processed = match operation {
                Operation::Transform => self.mark_processed(record),
                Operation::ProcessText => {
                    let message = resolve_message(params, index)?;
                    self.process_text(record, message)
                }
            };
            output.push(processed);
        }

        tracing::debug!(
            "🔄 Transformed {} records with operation '{}'",
            output.len(),
            operation
        );
        Ok(output)
    }

    fn timestamp(&self) -> Value {
        Value::String(self.clock.now().to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    fn mark_processed(&self, record: &Record) -> Record {
        record
            .clone()
            .with_field("processed", Value::Bool(true))
            .with_field("timestamp", self.timestamp())
            .with_field("processedBy", Value::String(PROCESSED_BY.to_string()))
    }

    fn process_text(&self, record: &Record, message: &str) -> Record {
        record
            .clone()
            .with_field("originalMessage", Value::String(message.to_string()))
            .with_field("processedMessage", Value::String(message.to_uppercase()))
            .with_field("messageLength", Value::from(message.len()))
            .with_field("timestamp", self.timestamp())
    }
}

/// 取得第 `index` 筆的 message 參數；缺省為空字串，非字串則整批失敗
fn resolve_message(params: &dyn ParameterLookup, index: usize) -> Result<&str> {
    match params.parameter(MESSAGE_PARAMETER, index) {
        None => Ok(""),
        Some(Value::String(message)) => Ok(message),
        Some(other) => Err(BridgeError::ParameterTypeError {
            name: MESSAGE_PARAMETER.to_string(),
            index,
            expected: "string",
            found: json_type_name(other),
        }),
    }
}
