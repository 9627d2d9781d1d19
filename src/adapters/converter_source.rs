//! Readers for the planning spreadsheet exports consumed by `csv-to-yaml`.

use super::task_source::{csv_reader, require_columns};
use crate::domain::model::{MonthValue, TaskKind, TaskRecord};
use crate::utils::error::{GanttError, Result};
use serde::Deserialize;

pub const TASK_COLUMNS: [&str; 5] = [
    "Task Number",
    "Task Name",
    "Task Start Month",
    "Task End Month",
    "Work Package",
];

pub const MILESTONE_COLUMNS: [&str; 3] =
    ["Milestone number", "Milestone name", "Due date (in month)"];

pub const DEFAULT_WORK_PACKAGE: &str = "WP1: Default";
pub const MILESTONE_WORK_PACKAGE: &str = "Milestones";

#[derive(Debug, Deserialize)]
struct TaskRow {
    #[serde(rename = "Task Number", default)]
    number: Option<String>,
    #[serde(rename = "Task Name", default)]
    name: Option<String>,
    #[serde(rename = "Task Start Month", default)]
    start: Option<MonthValue>,
    #[serde(rename = "Task End Month", default)]
    end: Option<MonthValue>,
    #[serde(rename = "Work Package", default)]
    work_package: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MilestoneRow {
    #[serde(rename = "Milestone number", default)]
    number: Option<String>,
    #[serde(rename = "Milestone name", default)]
    name: Option<String>,
    #[serde(rename = "Due date (in month)", default)]
    due: Option<MonthValue>,
    #[serde(rename = "Related WP(s)", default)]
    related: Option<String>,
}

fn month(row: usize, column: &str, value: Option<&MonthValue>) -> Result<u32> {
    let value = value.ok_or_else(|| {
        GanttError::validation(format!("Row {}: Missing value for column '{}'", row, column))
    })?;
    value.to_month().ok_or_else(|| {
        GanttError::validation(format!(
            "Row {}: '{}' is not a valid month for column '{}'",
            row, value, column
        ))
    })
}

fn display_name(number: Option<&str>, name: Option<&str>) -> String {
    format!(
        "{} - {}",
        number.unwrap_or_default().trim(),
        name.unwrap_or_default().trim()
    )
}

/// Task list export. Rows whose start equals their end become milestones.
pub fn read_task_csv(bytes: &[u8], default_kind: TaskKind) -> Result<Vec<TaskRecord>> {
    let mut reader = csv_reader(bytes);
    let headers = reader.headers()?.clone();
    require_columns(&headers, &TASK_COLUMNS)?;

    let mut tasks = Vec::new();
    for (idx, result) in reader.deserialize::<TaskRow>().enumerate() {
        let row = result?;
        let line = idx + 1;
        let start = month(line, "Task Start Month", row.start.as_ref())?;
        let end = month(line, "Task End Month", row.end.as_ref())?;

        let work_package = row
            .work_package
            .as_deref()
            .map(str::trim)
            .filter(|wp| !wp.is_empty())
            .unwrap_or(DEFAULT_WORK_PACKAGE)
            .to_string();

        tasks.push(TaskRecord {
            name: display_name(row.number.as_deref(), row.name.as_deref()),
            work_package,
            start,
            end,
            kind: if start == end {
                TaskKind::Milestone
            } else {
                default_kind
            },
            related_wps: None,
        });
    }

    tracing::debug!("Read {} task rows", tasks.len());
    Ok(tasks)
}

pub fn read_milestones_csv(bytes: &[u8]) -> Result<Vec<TaskRecord>> {
    let mut reader = csv_reader(bytes);
    let headers = reader.headers()?.clone();
    require_columns(&headers, &MILESTONE_COLUMNS)?;

    let mut milestones = Vec::new();
    for (idx, result) in reader.deserialize::<MilestoneRow>().enumerate() {
        let row = result?;
        let due = month(idx + 1, "Due date (in month)", row.due.as_ref())?;

        milestones.push(TaskRecord {
            name: display_name(row.number.as_deref(), row.name.as_deref()),
            work_package: MILESTONE_WORK_PACKAGE.to_string(),
            start: due,
            end: due,
            kind: TaskKind::Milestone,
            related_wps: row
                .related
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
        });
    }

    tracing::debug!("Read {} milestone rows", milestones.len());
    Ok(milestones)
}
