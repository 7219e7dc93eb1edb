use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "n8n-bridge")]
#[command(about = "Run the example n8n node locally and call a remote n8n instance")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, env = "N8N_BASE_URL")]
    pub base_url: Option<String>,

    #[arg(long, global = true, env = "N8N_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the example node over a JSON array of items
    Transform {
        #[arg(long)]
        input: PathBuf,

        /// transform | processText
        #[arg(long)]
        operation: Option<String>,

        #[arg(long)]
        message: Option<String>,
    },
    /// Execute a workflow by id
    Execute {
        workflow_id: String,

        #[arg(long, default_value = "{}")]
        payload: String,
    },
    /// Trigger a webhook URL
    Webhook {
        url: String,

        #[arg(long, default_value = "{}")]
        payload: String,
    },
    /// List workflows
    List,
}
