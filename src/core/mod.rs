pub mod node;
pub mod transformer;

pub use crate::domain::model::{ExecutionItem, Operation, Record, WorkflowRequest};
pub use crate::domain::ports::{
    Clock, JsonArrayWrapper, OutputWrapper, ParameterLookup, SystemClock, WorkflowApi,
};
pub use crate::utils::error::Result;
