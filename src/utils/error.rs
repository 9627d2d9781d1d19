use thiserror::Error;

#[derive(Error, Debug)]
pub enum GanttError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required columns: {}. Available columns: {}", .missing.join(", "), .available.join(", "))]
    MissingColumnsError {
        missing: Vec<String>,
        available: Vec<String>,
    },

    #[error("Unsupported file format: {path}")]
    UnsupportedFormatError { path: String },

    #[error("Chart output error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl GanttError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn processing(message: impl Into<String>) -> Self {
        Self::ProcessingError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CsvError(_) | Self::YamlError(_) | Self::MissingColumnsError { .. } => {
                ErrorCategory::Input
            }
            Self::ValidationError { .. } => ErrorCategory::Data,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::UnsupportedFormatError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) | Self::ProcessingError { .. } => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 對應的程序結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::CsvError(_) => "Check that the file is valid comma-separated text with a header row".to_string(),
            Self::YamlError(_) => {
                "Check the YAML syntax; the document must be a task list or a 'tasks' key with a list".to_string()
            }
            Self::MissingColumnsError { missing, .. } => {
                format!("Add the missing header(s) to the first row: {}", missing.join(", "))
            }
            Self::ValidationError { .. } => {
                "Fix the reported row so every task has a name, a work package and start <= end".to_string()
            }
            Self::ProcessingError { .. } => "Rerun with --verbose and report the failing chart".to_string(),
            Self::ConfigError { .. } => {
                "Review the command-line flags and the chart configuration file".to_string()
            }
            Self::InvalidConfigValueError { field, .. } => {
                format!("Provide a valid value for {}", field)
            }
            Self::UnsupportedFormatError { .. } => {
                "Use .csv, .yaml or .yml for input and .svg or .json for output".to_string()
            }
            Self::IoError(_) => "Check that the path exists and is readable/writable".to_string(),
            Self::SerializationError(_) => "This is likely a bug; rerun with --verbose and report it".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Could not read the task file: {}", self),
            ErrorCategory::Data => format!("The task data is invalid: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, GanttError>;
