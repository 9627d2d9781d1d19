use crate::adapters::svg::render_svg;
use crate::adapters::task_source::{load_tasks, InputFormat};
use crate::core::sample::sample_tasks;
use crate::core::{ConfigProvider, Pipeline, Storage, TaskSet};
use crate::layout::{build_layout, ChartLayout};
use crate::utils::error::{GanttError, Result};
use crate::utils::validation::normalize_rows;
use std::path::Path;

/// Where the render pipeline reads its tasks from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskSource {
    File { path: String, format: InputFormat },
    Sample,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFormat {
    Svg,
    Json,
}

impl ChartFormat {
    pub fn from_path(path: &str) -> Result<Self> {
        match Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("svg") => Ok(Self::Svg),
            Some("json") => Ok(Self::Json),
            _ => Err(GanttError::UnsupportedFormatError {
                path: path.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    pub title: String,
    pub first_month: u32,
    pub last_month: u32,
    pub task_count: usize,
    pub milestone_count: usize,
}

impl RenderSummary {
    pub fn from_tasks(title: &str, tasks: &TaskSet) -> Self {
        let (first_month, last_month) = tasks.month_range().unwrap_or((0, 0));
        Self {
            title: title.to_string(),
            first_month,
            last_month,
            task_count: tasks.task_count(),
            milestone_count: tasks.milestone_count(),
        }
    }
}

pub struct RenderArtifact {
    pub layout: ChartLayout,
    pub summary: RenderSummary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReport {
    pub output_path: String,
    pub format: ChartFormat,
    pub bytes_written: usize,
    pub summary: RenderSummary,
}

pub struct RenderPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    source: TaskSource,
}

impl<S: Storage, C: ConfigProvider> RenderPipeline<S, C> {
    pub fn new(storage: S, config: C, source: TaskSource) -> Self {
        Self {
            storage,
            config,
            source,
        }
    }
}

fn not_found(kind: &str, path: &str) -> GanttError {
    GanttError::IoError(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("{} file '{}' not found.", kind, path),
    ))
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for RenderPipeline<S, C> {
    type Intermediate = TaskSet;
    type Artifact = RenderArtifact;
    type Report = RenderReport;

    async fn extract(&self) -> Result<TaskSet> {
        match &self.source {
            TaskSource::File { path, format } => {
                let kind = match format {
                    InputFormat::Csv => "CSV",
                    InputFormat::Yaml => "YAML",
                };
                if !self.storage.exists(path) {
                    return Err(not_found(kind, path));
                }
                tracing::info!("Loading data from {} file: {}", kind, path);
                let bytes = self.storage.read_file(path).await?;
                let rows = load_tasks(&bytes, *format)?;
                normalize_rows(rows)
            }
            TaskSource::Sample => {
                tracing::info!("Using sample data (no file specified)");
                sample_tasks()
            }
        }
    }

    async fn transform(&self, tasks: TaskSet) -> Result<RenderArtifact> {
        let options = self.config.layout_options();
        let layout = build_layout(&tasks, self.config.title(), &options);
        tracing::debug!(
            "Laid out {} bars, {} marker segments, {} work-package bands",
            layout.bars.len(),
            layout.markers.len(),
            layout.bands.len()
        );

        Ok(RenderArtifact {
            summary: RenderSummary::from_tasks(self.config.title(), &tasks),
            layout,
        })
    }

    async fn load(&self, artifact: RenderArtifact) -> Result<RenderReport> {
        let output_path = self.config.output_path().to_string();
        let format = ChartFormat::from_path(&output_path)?;

        let content = match format {
            ChartFormat::Svg => render_svg(&artifact.layout, &self.config.svg_options())?,
            ChartFormat::Json => serde_json::to_string_pretty(&artifact.layout)?,
        };

        tracing::info!("Saving chart to: {}", output_path);
        self.storage
            .write_file(&output_path, content.as_bytes())
            .await?;

        Ok(RenderReport {
            output_path,
            format,
            bytes_written: content.len(),
            summary: artifact.summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use crate::core::test_support::MockStorage;
    use crate::core::PipelineEngine;

    const CSV: &str = "\
Task,Work Package,Start,End,Type,Related WPs
Requirements,WP1: Design,1,3,Task,
Prototype,WP2: Build,3,7,Task,
Design Frozen,WP1: Design,3,3,Milestone,WP1
";

    fn config(output: &str) -> ChartConfig {
        let mut config = ChartConfig::default();
        config.chart.title = "Pilot".to_string();
        config.output.path = output.to_string();
        config
    }

    fn csv_source() -> TaskSource {
        TaskSource::File {
            path: "plan.csv".to_string(),
            format: InputFormat::Csv,
        }
    }

    #[tokio::test]
    async fn test_extract_csv() {
        let storage = MockStorage::new().with_file("plan.csv", CSV).await;
        let pipeline = RenderPipeline::new(storage, config("chart.svg"), csv_source());

        let tasks = pipeline.extract().await.unwrap();
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks.milestone_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_input_file() {
        let pipeline = RenderPipeline::new(MockStorage::new(), config("chart.svg"), csv_source());
        let err = pipeline.extract().await.unwrap_err();
        assert_eq!(err.to_string(), "IO error: CSV file 'plan.csv' not found.");
    }

    #[tokio::test]
    async fn test_sample_source() {
        let pipeline =
            RenderPipeline::new(MockStorage::new(), config("chart.svg"), TaskSource::Sample);
        let tasks = pipeline.extract().await.unwrap();
        assert_eq!(tasks.len(), 23);
    }

    #[tokio::test]
    async fn test_engine_writes_svg() {
        let storage = MockStorage::new().with_file("plan.csv", CSV).await;
        let pipeline = RenderPipeline::new(storage.clone(), config("out/chart.svg"), csv_source());

        let report = PipelineEngine::new(pipeline).run().await.unwrap();

        assert_eq!(report.output_path, "out/chart.svg");
        assert_eq!(report.format, ChartFormat::Svg);
        assert_eq!(
            report.summary,
            RenderSummary {
                title: "Pilot".to_string(),
                first_month: 1,
                last_month: 7,
                task_count: 2,
                milestone_count: 1,
            }
        );
        let svg = storage.get_text("out/chart.svg").await.unwrap();
        assert_eq!(svg.len(), report.bytes_written);
        assert!(svg.contains(">Pilot</text>"));
        assert!(svg.contains(">Requirements</tspan>"));
    }

    #[tokio::test]
    async fn test_engine_writes_layout_json() {
        let storage = MockStorage::new().with_file("plan.csv", CSV).await;
        let pipeline = RenderPipeline::new(storage.clone(), config("chart.json"), csv_source());

        PipelineEngine::new(pipeline).run().await.unwrap();

        let json = storage.get_text("chart.json").await.unwrap();
        let layout: ChartLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(layout.title, "Pilot");
        assert_eq!(layout.bars.len(), 2);
        assert_eq!(layout.bands.len(), 2);
    }

    #[tokio::test]
    async fn test_unsupported_output_format() {
        let storage = MockStorage::new().with_file("plan.csv", CSV).await;
        let pipeline = RenderPipeline::new(storage, config("chart.png"), csv_source());
        let err = PipelineEngine::new(pipeline).run().await.unwrap_err();
        assert!(matches!(err, GanttError::UnsupportedFormatError { .. }));
    }

    #[tokio::test]
    async fn test_invalid_rows_stop_the_pipeline() {
        let csv = "Task,Work Package,Start,End,Type\nA,WP1,5,2,Task\n";
        let storage = MockStorage::new().with_file("plan.csv", csv).await;
        let pipeline = RenderPipeline::new(storage.clone(), config("chart.svg"), csv_source());

        let err = PipelineEngine::new(pipeline).run().await.unwrap_err();
        assert!(err.to_string().contains("Row 1"));
        assert!(storage.get_file("chart.svg").await.is_none());
    }
}
