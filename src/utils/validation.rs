use crate::domain::model::{RawTaskRow, TaskKind, TaskRecord, TaskSet, MAX_MONTH};
use crate::utils::error::{GanttError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn missing(row: usize, column: &str) -> GanttError {
    GanttError::validation(format!("Row {}: Missing value for column '{}'", row, column))
}

fn required_text(row: usize, column: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(missing(row, column)),
    }
}

/// Turn loosely typed input rows into task records, reporting the first
/// missing or malformed cell by 1-based row number.
pub fn normalize_rows(rows: Vec<RawTaskRow>) -> Result<TaskSet> {
    if rows.is_empty() {
        return Err(GanttError::validation(
            "No data loaded. Please check your file format.",
        ));
    }

    let mut tasks = Vec::with_capacity(rows.len());
    for (idx, raw) in rows.into_iter().enumerate() {
        let row = idx + 1;
        let name = required_text(row, "Task", raw.task)?;
        let work_package = required_text(row, "Work Package", raw.work_package)?;

        let start_raw = raw.start.ok_or_else(|| missing(row, "Start"))?;
        let end_raw = raw.end.ok_or_else(|| missing(row, "End"))?;
        let kind_raw = required_text(row, "Type", raw.kind)?;

        let start = start_raw.to_month().ok_or_else(|| {
            GanttError::validation(format!("Row {}: Invalid month '{}' in column 'Start'", row, start_raw))
        })?;
        let end = end_raw.to_month().ok_or_else(|| {
            GanttError::validation(format!("Row {}: Invalid month '{}' in column 'End'", row, end_raw))
        })?;
        let kind = TaskKind::parse(&kind_raw).ok_or_else(|| {
            GanttError::validation(format!(
                "Row {}: Unknown type '{}' (expected 'Task' or 'Milestone')",
                row, kind_raw
            ))
        })?;

        tasks.push(TaskRecord {
            name,
            work_package,
            start,
            end,
            kind,
            related_wps: raw
                .related_wps
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
        });
    }

    let set = TaskSet::new(tasks);
    validate_tasks(&set.tasks)?;
    Ok(set)
}

/// Record-level invariants: required text present and `start <= end`.
pub fn validate_tasks(tasks: &[TaskRecord]) -> Result<()> {
    if tasks.is_empty() {
        return Err(GanttError::validation(
            "No data loaded. Please check your file format.",
        ));
    }

    for (idx, task) in tasks.iter().enumerate() {
        let row = idx + 1;
        if task.name.trim().is_empty() {
            return Err(missing(row, "Task"));
        }
        if task.work_package.trim().is_empty() {
            return Err(missing(row, "Work Package"));
        }
        if task.start > task.end {
            return Err(GanttError::validation(format!(
                "Row {}: Start month {} is after end month {}",
                row, task.start, task.end
            )));
        }
        if task.end > MAX_MONTH {
            return Err(GanttError::validation(format!(
                "Row {}: End month {} is beyond the last supported month {}",
                row, task.end, MAX_MONTH
            )));
        }
    }

    tracing::info!("✓ Data validation passed. Loaded {} items.", tasks.len());
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(GanttError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(GanttError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(GanttError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<String> = allowed_extensions
        .iter()
        .map(|e| e.to_ascii_lowercase())
        .collect();

    for file in files {
        match std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(extension) if allowed_set.contains(&extension.to_ascii_lowercase()) => {}
            Some(extension) => {
                return Err(GanttError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
            None => {
                return Err(GanttError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: "File has no extension or invalid filename".to_string(),
                });
            }
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GanttError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(GanttError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
