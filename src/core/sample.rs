use crate::adapters::task_source::load_tasks_yaml;
use crate::domain::model::TaskSet;
use crate::utils::error::Result;
use crate::utils::validation::normalize_rows;

/// Demo project rendered when no input file is given.
pub const SAMPLE_YAML: &str = include_str!("../../data/sample_data.yaml");

pub fn sample_tasks() -> Result<TaskSet> {
    normalize_rows(load_tasks_yaml(SAMPLE_YAML.as_bytes())?)
}
