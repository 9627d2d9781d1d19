use crate::adapters::converter_source::{read_milestones_csv, read_task_csv};
use crate::adapters::yaml_sink::{serialize, DocumentFormat};
use crate::core::{Pipeline, Storage, TaskKind, TaskSet};
use crate::utils::error::{GanttError, Result};
use crate::utils::validation::validate_tasks;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub input_path: String,
    pub output_path: String,
    pub format: DocumentFormat,
    pub total_tasks: usize,
    pub milestones_added: usize,
    /// Sorted, de-duplicated.
    pub work_packages: Vec<String>,
    pub month_range: Option<(u32, u32)>,
}

pub struct ConvertedDocument {
    pub content: String,
    pub format: DocumentFormat,
    pub tasks: TaskSet,
    pub milestones_added: usize,
}

pub struct ExtractedTasks {
    pub tasks: TaskSet,
    pub milestones_added: usize,
}

/// CSV task export (plus optional milestones export) to the renderer schema.
pub struct ConvertPipeline<S: Storage> {
    storage: S,
    input_path: String,
    milestones_path: Option<String>,
    output_path: String,
    default_kind: TaskKind,
}

impl<S: Storage> ConvertPipeline<S> {
    pub fn new(storage: S, input_path: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            storage,
            input_path: input_path.into(),
            milestones_path: None,
            output_path: output_path.into(),
            default_kind: TaskKind::Task,
        }
    }

    pub fn with_milestones(mut self, path: Option<String>) -> Self {
        self.milestones_path = path;
        self
    }

    pub fn with_default_kind(mut self, kind: TaskKind) -> Self {
        self.default_kind = kind;
        self
    }

    async fn read_existing(&self, kind: &str, path: &str) -> Result<Vec<u8>> {
        if !self.storage.exists(path) {
            return Err(GanttError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} file '{}' not found.", kind, path),
            )));
        }
        self.storage.read_file(path).await
    }
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for ConvertPipeline<S> {
    type Intermediate = ExtractedTasks;
    type Artifact = ConvertedDocument;
    type Report = ConversionSummary;

    async fn extract(&self) -> Result<ExtractedTasks> {
        let bytes = self.read_existing("CSV", &self.input_path).await?;
        let mut tasks = TaskSet::new(read_task_csv(&bytes, self.default_kind)?);
        tracing::info!("Read {} tasks from {}", tasks.len(), self.input_path);

        let mut milestones_added = 0;
        if let Some(path) = &self.milestones_path {
            tracing::info!("Loading milestones from: {}", path);
            let bytes = self.read_existing("Milestones", path).await?;
            let milestones = read_milestones_csv(&bytes)?;
            milestones_added = milestones.len();
            tasks.extend(milestones);
            tracing::info!("Added {} milestones", milestones_added);
        }

        Ok(ExtractedTasks {
            tasks,
            milestones_added,
        })
    }

    async fn transform(&self, data: ExtractedTasks) -> Result<ConvertedDocument> {
        validate_tasks(&data.tasks.tasks)?;
        let format = DocumentFormat::from_path(&self.output_path);
        let content = serialize(&data.tasks, format)?;

        Ok(ConvertedDocument {
            content,
            format,
            tasks: data.tasks,
            milestones_added: data.milestones_added,
        })
    }

    async fn load(&self, document: ConvertedDocument) -> Result<ConversionSummary> {
        self.storage
            .write_file(&self.output_path, document.content.as_bytes())
            .await?;
        tracing::info!(
            "✓ Successfully converted {} tasks to {}",
            document.tasks.len(),
            self.output_path
        );

        let mut work_packages: Vec<String> = document
            .tasks
            .work_packages()
            .into_iter()
            .map(str::to_string)
            .collect();
        work_packages.sort();

        Ok(ConversionSummary {
            input_path: self.input_path.clone(),
            output_path: self.output_path.clone(),
            format: document.format,
            total_tasks: document.tasks.len(),
            milestones_added: document.milestones_added,
            work_packages,
            month_range: document.tasks.month_range(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::task_source::load_tasks_yaml;
    use crate::core::test_support::MockStorage;
    use crate::core::PipelineEngine;
    use crate::utils::validation::normalize_rows;

    const TASKS: &str = "\
Task Number,Task Name,Task Start Month,Task End Month,Work Package
T2.1,Prototype,3,8,WP2: Build
T1.1,Requirements,1,3,WP1: Design
T1.2,Review,4,4,WP1: Design
";

    const MILESTONES: &str = "\
Milestone number,Milestone name,Due date (in month),Related WP(s)
MS1,Design Frozen,4,\"WP1, WP2\"
";

    #[tokio::test]
    async fn test_convert_with_milestones() {
        let storage = MockStorage::new()
            .with_file("tasks.csv", TASKS)
            .await
            .with_file("ms.csv", MILESTONES)
            .await;
        let pipeline = ConvertPipeline::new(storage.clone(), "tasks.csv", "tasks.yaml")
            .with_milestones(Some("ms.csv".to_string()));

        let summary = PipelineEngine::new(pipeline).run().await.unwrap();

        assert_eq!(summary.total_tasks, 4);
        assert_eq!(summary.milestones_added, 1);
        assert_eq!(summary.format, DocumentFormat::Yaml);
        assert_eq!(
            summary.work_packages,
            vec!["Milestones", "WP1: Design", "WP2: Build"]
        );
        assert_eq!(summary.month_range, Some((1, 8)));

        // 轉出的 YAML 必須能直接餵給繪圖器
        let yaml = storage.get_text("tasks.yaml").await.unwrap();
        let tasks = normalize_rows(load_tasks_yaml(yaml.as_bytes()).unwrap()).unwrap();
        assert_eq!(tasks.len(), 4);
        assert_eq!(tasks.tasks[2].kind, TaskKind::Milestone);
        assert_eq!(tasks.tasks[3].related_wps.as_deref(), Some("WP1, WP2"));
    }

    #[tokio::test]
    async fn test_convert_to_json() {
        let storage = MockStorage::new().with_file("tasks.csv", TASKS).await;
        let pipeline = ConvertPipeline::new(storage.clone(), "tasks.csv", "tasks.json")
            .with_default_kind(TaskKind::Milestone);

        let summary = PipelineEngine::new(pipeline).run().await.unwrap();
        assert_eq!(summary.format, DocumentFormat::Json);

        let json: serde_json::Value =
            serde_json::from_str(&storage.get_text("tasks.json").await.unwrap()).unwrap();
        assert_eq!(json["tasks"].as_array().unwrap().len(), 3);
        assert_eq!(json["tasks"][0]["Type"], "Milestone");
    }

    #[tokio::test]
    async fn test_missing_milestones_file() {
        let storage = MockStorage::new().with_file("tasks.csv", TASKS).await;
        let pipeline = ConvertPipeline::new(storage.clone(), "tasks.csv", "tasks.yaml")
            .with_milestones(Some("missing.csv".to_string()));

        let err = PipelineEngine::new(pipeline).run().await.unwrap_err();
        assert!(err
            .to_string()
            .contains("Milestones file 'missing.csv' not found."));
        assert!(storage.get_file("tasks.yaml").await.is_none());
    }

    #[tokio::test]
    async fn test_header_only_csv_has_no_data() {
        let csv = "Task Number,Task Name,Task Start Month,Task End Month,Work Package\n";
        let storage = MockStorage::new().with_file("tasks.csv", csv).await;
        let pipeline = ConvertPipeline::new(storage.clone(), "tasks.csv", "tasks.yaml");

        let err = PipelineEngine::new(pipeline).run().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: No data loaded. Please check your file format."
        );
        assert!(storage.get_file("tasks.yaml").await.is_none());
    }

    #[tokio::test]
    async fn test_reversed_months_rejected() {
        let csv = "Task Number,Task Name,Task Start Month,Task End Month,Work Package\nT1,A,6,2,WP1\n";
        let storage = MockStorage::new().with_file("tasks.csv", csv).await;
        let pipeline = ConvertPipeline::new(storage, "tasks.csv", "tasks.yaml");

        let err = PipelineEngine::new(pipeline).run().await.unwrap_err();
        assert!(err.to_string().contains("after end month"));
    }
}
