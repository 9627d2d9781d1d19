use crate::domain::model::{TaskRecord, TaskSet};
use crate::utils::error::Result;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// `.json` 輸出 JSON，其餘一律 YAML
    pub fn from_path(path: &str) -> Self {
        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

#[derive(Serialize)]
struct TaskDocument<'a> {
    tasks: &'a [TaskRecord],
}

pub fn to_yaml(tasks: &TaskSet) -> Result<String> {
    Ok(serde_yaml::to_string(&TaskDocument { tasks: &tasks.tasks })?)
}

pub fn to_json(tasks: &TaskSet) -> Result<String> {
    Ok(serde_json::to_string_pretty(&TaskDocument { tasks: &tasks.tasks })?)
}

pub fn serialize(tasks: &TaskSet, format: DocumentFormat) -> Result<String> {
    match format {
        DocumentFormat::Yaml => to_yaml(tasks),
        DocumentFormat::Json => to_json(tasks),
    }
}
