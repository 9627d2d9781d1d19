pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod layout;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{ConvertArgs, RenderArgs};

pub use crate::adapters::LocalStorage;
pub use crate::config::ChartConfig;
pub use crate::core::{ConvertPipeline, PipelineEngine, RenderPipeline, TaskSource};
pub use crate::domain::model::{TaskKind, TaskRecord, TaskSet};
pub use crate::utils::error::{GanttError, Result};
