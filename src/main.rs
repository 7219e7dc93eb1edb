use anyhow::{Context, Result};
use clap::Parser;
use n8n_bridge::config::Command;
use n8n_bridge::core::{JsonArrayWrapper, SystemClock};
use n8n_bridge::utils::{logger, validation::validate_url};
use n8n_bridge::{
    BridgeConfig, CliConfig, ConnectionConfig, ExampleNode, Record, WorkflowApi, WorkflowClient,
    WorkflowRequest,
};
use serde_json::Value;
use std::path::Path;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting n8n-bridge");
    tracing::debug!("CLI config: {:?}", cli.command);

    if let Err(e) = run(cli).await {
        tracing::error!("❌ {:#}", e);
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: CliConfig) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => BridgeConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => BridgeConfig::default(),
    };
    config.merge_connection(cli.base_url.clone(), cli.api_key.clone());

    let output = match cli.command {
        Command::Transform {
            input,
            operation,
            message,
        } => run_transform(&config, &input, operation, message)?,
        Command::Execute {
            workflow_id,
            payload,
        } => {
            let client = WorkflowClient::new(config.connection_config()?);
            let request = WorkflowRequest::new(workflow_id, parse_payload(&payload)?);
            client.execute_workflow(&request).await?
        }
        Command::Webhook { url, payload } => {
            validate_url("url", &url)?;
            // webhook 不帶 API key，連線設定可以不完整
            let connection = ConnectionConfig::new(
                config.connection.base_url.clone().unwrap_or_default(),
                config.connection.api_key.clone().unwrap_or_default(),
            );
            let client = WorkflowClient::new(connection);
            client.trigger_webhook(&url, &parse_payload(&payload)?).await?
        }
        Command::List => {
            let client = WorkflowClient::new(config.connection_config()?);
            Value::Array(client.list_workflows().await?)
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run_transform(
    config: &BridgeConfig,
    input: &Path,
    operation: Option<String>,
    message: Option<String>,
) -> Result<Value> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let records = Record::batch_from_json(serde_json::from_str(&content)?)
        .with_context(|| format!("invalid items in {}", input.display()))?;
    let params = config.node_parameters(operation, message);

    let output = ExampleNode::new(SystemClock).execute(&records, &params, &JsonArrayWrapper)?;
    tracing::info!("✅ Processed {} items", records.len());
    Ok(serde_json::to_value(output)?)
}

fn parse_payload(payload: &str) -> Result<Value> {
    serde_json::from_str(payload).context("payload must be valid JSON")
}
