use crate::domain::model::RawTaskRow;
use crate::utils::error::{GanttError, Result};
use csv::StringRecord;
use std::path::Path;

pub const RENDER_COLUMNS: [&str; 5] = ["Task", "Work Package", "Start", "End", "Type"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Yaml,
}

/// 依副檔名判斷輸入格式
pub fn detect_format(path: &str) -> Result<InputFormat> {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("csv") => Ok(InputFormat::Csv),
        Some("yaml") | Some("yml") => Ok(InputFormat::Yaml),
        _ => Err(GanttError::UnsupportedFormatError {
            path: path.to_string(),
        }),
    }
}

pub(crate) fn csv_reader(bytes: &[u8]) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(bytes)
}

/// Fail with the full list of missing and available headers.
pub(crate) fn require_columns(headers: &StringRecord, required: &[&str]) -> Result<()> {
    let missing: Vec<String> = required
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    Err(GanttError::MissingColumnsError {
        missing,
        available: headers.iter().map(str::to_string).collect(),
    })
}

pub fn load_tasks_csv(bytes: &[u8]) -> Result<Vec<RawTaskRow>> {
    let mut reader = csv_reader(bytes);
    let headers = reader.headers()?.clone();
    require_columns(&headers, &RENDER_COLUMNS)?;

    let mut rows = Vec::new();
    for result in reader.deserialize::<RawTaskRow>() {
        rows.push(result?);
    }
    tracing::debug!("Parsed {} CSV rows", rows.len());
    Ok(rows)
}

/// Accepts either a bare list of tasks or a mapping with a `tasks` list.
pub fn load_tasks_yaml(bytes: &[u8]) -> Result<Vec<RawTaskRow>> {
    let doc: serde_yaml::Value = serde_yaml::from_slice(bytes)?;

    let list = if doc.is_sequence() {
        doc
    } else if let Some(tasks) = doc.get("tasks").filter(|t| t.is_sequence()) {
        tasks.clone()
    } else {
        return Err(GanttError::validation(
            "YAML file must contain either a list of tasks or a 'tasks' key with a list",
        ));
    };

    let rows: Vec<RawTaskRow> = serde_yaml::from_value(list)?;
    tracing::debug!("Parsed {} YAML rows", rows.len());
    Ok(rows)
}

pub fn load_tasks(bytes: &[u8], format: InputFormat) -> Result<Vec<RawTaskRow>> {
    match format {
        InputFormat::Csv => load_tasks_csv(bytes),
        InputFormat::Yaml => load_tasks_yaml(bytes),
    }
}
