use super::toml_config::ChartConfig;
use crate::adapters::task_source::{detect_format, InputFormat};
use crate::core::TaskSource;
use crate::domain::model::TaskKind;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::path::Path;

#[derive(Debug, Clone, Parser)]
#[command(name = "gantt")]
#[command(about = "Generate a Gantt chart from project data")]
#[command(after_help = "Examples:
  gantt                                   # Use sample data
  gantt -c project_data.csv               # Load from CSV file
  gantt -y project_data.yaml              # Load from YAML file
  gantt -i plan.yml -o plan.json          # Detect input format, dump the layout
  gantt -c data.csv -t \"My Project\" -o output.svg")]
pub struct RenderArgs {
    /// Path to CSV file containing project data
    #[arg(short = 'c', long, conflicts_with_all = ["yaml", "input"])]
    pub csv: Option<String>,

    /// Path to YAML file containing project data
    #[arg(short = 'y', long, conflicts_with = "input")]
    pub yaml: Option<String>,

    /// Input file; format detected from the extension
    #[arg(short = 'i', long)]
    pub input: Option<String>,

    /// Title for the Gantt chart
    #[arg(short = 't', long)]
    pub title: Option<String>,

    /// Output file (.svg image or .json layout)
    #[arg(short = 'o', long)]
    pub output: Option<String>,

    /// DPI used for the image's pixel size
    #[arg(long)]
    pub dpi: Option<u32>,

    /// Path to TOML chart configuration file
    #[arg(long)]
    pub config: Option<String>,

    /// Calendar date of month 1 (YYYY-MM-DD); ticks show month names
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Last month shown on the axis
    #[arg(long)]
    pub max_month: Option<u32>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Load and validate the data without writing a chart
    #[arg(long)]
    pub dry_run: bool,
}

impl RenderArgs {
    pub fn source(&self) -> Result<TaskSource> {
        if let Some(path) = &self.csv {
            return Ok(TaskSource::File {
                path: path.clone(),
                format: InputFormat::Csv,
            });
        }
        if let Some(path) = &self.yaml {
            return Ok(TaskSource::File {
                path: path.clone(),
                format: InputFormat::Yaml,
            });
        }
        if let Some(path) = &self.input {
            return Ok(TaskSource::File {
                path: path.clone(),
                format: detect_format(path)?,
            });
        }
        Ok(TaskSource::Sample)
    }

    /// 載入設定檔 (若有) 並套用命令列覆蓋
    pub fn chart_config(&self) -> Result<ChartConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading chart configuration from: {}", path);
                ChartConfig::from_file(path)?
            }
            None => ChartConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut ChartConfig) {
        if let Some(title) = &self.title {
            config.chart.title = title.clone();
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(dpi) = self.dpi {
            config.chart.dpi = dpi;
        }
        if let Some(start) = self.start_date {
            config.axis.start_date = Some(start);
        }
        if let Some(max_month) = self.max_month {
            config.axis.max_month = max_month;
        }
    }
}

impl Validate for RenderArgs {
    fn validate(&self) -> Result<()> {
        let paths = [
            ("csv", &self.csv),
            ("yaml", &self.yaml),
            ("input", &self.input),
            ("config", &self.config),
        ];
        for (flag, path) in paths {
            if let Some(path) = path {
                validation::validate_path(flag, path)?;
            }
        }
        if let Some(dpi) = self.dpi {
            validation::validate_range("dpi", dpi, 1, 2400)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    #[value(name = "Task")]
    Task,
    #[value(name = "Milestone")]
    Milestone,
}

impl From<KindArg> for TaskKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Task => TaskKind::Task,
            KindArg::Milestone => TaskKind::Milestone,
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "csv-to-yaml")]
#[command(about = "Convert CSV task data to YAML format for Gantt chart")]
#[command(after_help = "Examples:
  csv-to-yaml tasks.csv                     # Convert to tasks.yaml
  csv-to-yaml tasks.csv -o output.yaml      # Specify output file
  csv-to-yaml tasks.csv -m milestones.csv   # Include milestones file")]
pub struct ConvertArgs {
    /// Path to CSV file containing task data
    pub csv_file: String,

    /// Output YAML file path (default: <input name>.yaml)
    #[arg(short = 'o', long)]
    pub output: Option<String>,

    /// Default task type
    #[arg(long, value_enum, default_value_t = KindArg::Task)]
    pub task_type: KindArg,

    /// Milestones CSV with columns: Milestone number, Milestone name, Due date (in month)
    #[arg(short = 'm', long)]
    pub milestones: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl ConvertArgs {
    /// 預設輸出檔名：輸入檔名去掉副檔名後加上 .yaml，放在目前目錄
    pub fn output_path(&self) -> String {
        match &self.output {
            Some(path) => path.clone(),
            None => {
                let stem = Path::new(&self.csv_file)
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("tasks");
                format!("{}.yaml", stem)
            }
        }
    }
}

impl Validate for ConvertArgs {
    fn validate(&self) -> Result<()> {
        validation::validate_path("csv_file", &self.csv_file)?;
        if let Some(milestones) = &self.milestones {
            validation::validate_path("milestones", milestones)?;
        }
        validation::validate_path("output", &self.output_path())
    }
}
