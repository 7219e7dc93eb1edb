pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::{ConnectionConfig, WorkflowClient};
pub use config::BridgeConfig;
pub use core::{
    node::{ExampleNode, NodeParameters},
    transformer::BatchTransformer,
    ExecutionItem, Operation, Record, WorkflowApi, WorkflowRequest,
};
pub use utils::error::{BridgeError, Result};
