use crate::adapters::svg::SvgOptions;
use crate::core::ConfigProvider;
use crate::domain::model::MAX_MONTH;
use crate::layout::LayoutOptions;
use crate::utils::error::{GanttError, Result};
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_OUTPUT: &str = "gantt_chart.svg";
pub const OUTPUT_EXTENSIONS: [&str; 2] = ["svg", "json"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub chart: ChartSection,
    pub axis: AxisSection,
    pub labels: LabelSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSection {
    pub title: String,
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
    pub font_family: Option<String>,
}

impl Default for ChartSection {
    fn default() -> Self {
        Self {
            title: String::new(),
            width_in: 16.0,
            height_in: 10.0,
            dpi: 300,
            font_family: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisSection {
    pub min_month: u32,
    pub max_month: u32,
    pub auto_extend: bool,
    /// Calendar month shown for month 1, e.g. "2026-01-01".
    pub start_date: Option<NaiveDate>,
}

impl Default for AxisSection {
    fn default() -> Self {
        Self {
            min_month: 0,
            max_month: 36,
            auto_extend: true,
            start_date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSection {
    pub wrap_width: usize,
    pub milestone_gap: f64,
    pub milestone_rows: usize,
    pub stripe_height: f64,
}

impl Default for LabelSection {
    fn default() -> Self {
        Self {
            wrap_width: 20,
            milestone_gap: 4.0,
            milestone_rows: 3,
            stripe_height: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub path: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT.to_string(),
        }
    }
}

impl ChartConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GanttError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GanttError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PROJECT_NAME})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GanttError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_file_extensions(
            "output.path",
            std::slice::from_ref(&self.output.path),
            &OUTPUT_EXTENSIONS,
        )?;
        validation::validate_range("chart.dpi", self.chart.dpi, 1, 2400)?;
        validation::validate_range("chart.width_in", self.chart.width_in, 1.0, 200.0)?;
        validation::validate_range("chart.height_in", self.chart.height_in, 1.0, 200.0)?;

        validation::validate_range("axis.max_month", self.axis.max_month, 1, MAX_MONTH)?;
        if self.axis.min_month > self.axis.max_month {
            return Err(GanttError::InvalidConfigValueError {
                field: "axis.min_month".to_string(),
                value: self.axis.min_month.to_string(),
                reason: format!("must not exceed axis.max_month ({})", self.axis.max_month),
            });
        }

        validation::validate_positive_number("labels.wrap_width", self.labels.wrap_width, 1)?;
        validation::validate_positive_number(
            "labels.milestone_rows",
            self.labels.milestone_rows,
            1,
        )?;
        validation::validate_range("labels.milestone_gap", self.labels.milestone_gap, 0.0, 1000.0)?;
        validation::validate_range("labels.stripe_height", self.labels.stripe_height, 0.01, 10.0)?;

        if let Some(family) = &self.chart.font_family {
            validation::validate_non_empty_string("chart.font_family", family)?;
        }

        Ok(())
    }
}

impl ConfigProvider for ChartConfig {
    fn title(&self) -> &str {
        &self.chart.title
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            min_month: self.axis.min_month,
            max_month: self.axis.max_month,
            auto_extend: self.axis.auto_extend,
            wrap_width: self.labels.wrap_width,
            milestone_gap: self.labels.milestone_gap,
            milestone_rows: self.labels.milestone_rows,
            stripe_height: self.labels.stripe_height,
            start_date: self.axis.start_date,
            ..LayoutOptions::default()
        }
    }

    fn svg_options(&self) -> SvgOptions {
        let defaults = SvgOptions::default();
        SvgOptions {
            width_in: self.chart.width_in,
            height_in: self.chart.height_in,
            dpi: self.chart.dpi,
            font_family: self
                .chart
                .font_family
                .clone()
                .unwrap_or(defaults.font_family),
        }
    }
}

impl Validate for ChartConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
