pub mod convert_pipeline;
pub mod engine;
pub mod render_pipeline;
pub mod sample;

pub use crate::domain::model::{TaskKind, TaskRecord, TaskSet};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
pub use convert_pipeline::{ConversionSummary, ConvertPipeline};
pub use engine::PipelineEngine;
pub use render_pipeline::{RenderPipeline, RenderReport, RenderSummary, TaskSource};

#[cfg(test)]
pub(crate) mod test_support;
