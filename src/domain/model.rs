use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest month a task may end in and the chart axis may show.
pub const MAX_MONTH: u32 = 600;

/// 任務種類：一般任務畫成橫條，里程碑畫成垂直標記
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    Task,
    Milestone,
}

impl TaskKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Task" => Some(Self::Task),
            "Milestone" => Some(Self::Milestone),
            _ => None,
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task => f.write_str("Task"),
            Self::Milestone => f.write_str("Milestone"),
        }
    }
}

/// One row of the renderer schema. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(rename = "Task")]
    pub name: String,
    #[serde(rename = "Work Package")]
    pub work_package: String,
    #[serde(rename = "Start")]
    pub start: u32,
    #[serde(rename = "End")]
    pub end: u32,
    #[serde(rename = "Type")]
    pub kind: TaskKind,
    #[serde(rename = "Related WPs", default, skip_serializing_if = "Option::is_none")]
    pub related_wps: Option<String>,
}

impl TaskRecord {
    pub fn duration(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_milestone(&self) -> bool {
        self.kind == TaskKind::Milestone
    }
}

/// 月份欄位的原始值；YAML 可能是整數或浮點數，CSV 一律是字串
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MonthValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl MonthValue {
    pub fn to_month(&self) -> Option<u32> {
        match self {
            Self::Integer(v) => u32::try_from(*v).ok(),
            Self::Float(v) if v.fract() == 0.0 && *v >= 0.0 && *v <= u32::MAX as f64 => {
                Some(*v as u32)
            }
            Self::Float(_) => None,
            Self::Text(s) => {
                let s = s.trim();
                s.parse::<u32>().ok().or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .and_then(|v| Self::Float(v).to_month())
                })
            }
        }
    }
}

impl fmt::Display for MonthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A text cell as YAML may type it: `Task: 2024` is still a task name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum ScalarText {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for ScalarText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{}", v),
            Self::Integer(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Text(v) => write!(f, "{}", v),
        }
    }
}

fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<ScalarText>::deserialize(deserializer)?.map(|v| v.to_string()))
}

/// Unvalidated renderer row as it comes out of CSV or YAML.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawTaskRow {
    #[serde(rename = "Task", default, deserialize_with = "scalar_text")]
    pub task: Option<String>,
    #[serde(rename = "Work Package", default, deserialize_with = "scalar_text")]
    pub work_package: Option<String>,
    #[serde(rename = "Start", default)]
    pub start: Option<MonthValue>,
    #[serde(rename = "End", default)]
    pub end: Option<MonthValue>,
    #[serde(rename = "Type", default, deserialize_with = "scalar_text")]
    pub kind: Option<String>,
    #[serde(rename = "Related WPs", default, deserialize_with = "scalar_text")]
    pub related_wps: Option<String>,
}

/// Ordered collection of task records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskSet {
    pub tasks: Vec<TaskRecord>,
}

impl TaskSet {
    pub fn new(tasks: Vec<TaskRecord>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskRecord> {
        self.tasks.iter()
    }

    /// 工作包名稱，依首次出現順序
    pub fn work_packages(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for task in &self.tasks {
            if !seen.contains(&task.work_package.as_str()) {
                seen.push(&task.work_package);
            }
        }
        seen
    }

    pub fn month_range(&self) -> Option<(u32, u32)> {
        let min = self.tasks.iter().map(|t| t.start).min()?;
        let max = self.tasks.iter().map(|t| t.end).max()?;
        Some((min, max))
    }

    pub fn task_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_milestone()).count()
    }

    pub fn milestone_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_milestone()).count()
    }

    pub fn extend(&mut self, other: impl IntoIterator<Item = TaskRecord>) {
        self.tasks.extend(other);
    }
}

impl From<Vec<TaskRecord>> for TaskSet {
    fn from(tasks: Vec<TaskRecord>) -> Self {
        Self::new(tasks)
    }
}
