use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Directory walk error: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Worker task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Io,
    Processing,
    Validation,
    System,
}

impl FixError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FixError::IoError(_) | FixError::WalkError(_) => ErrorCategory::Io,
            FixError::RegexError(_)
            | FixError::SerializationError(_)
            | FixError::ProcessingError { .. } => ErrorCategory::Processing,
            FixError::TaskError(_) => ErrorCategory::System,
            FixError::ConfigError { .. }
            | FixError::ConfigValidationError { .. }
            | FixError::InvalidConfigValueError { .. }
            | FixError::MissingConfigError { .. } => ErrorCategory::Configuration,
            FixError::ValidationError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 設定錯誤可以由使用者直接修正
            FixError::ConfigError { .. }
            | FixError::ConfigValidationError { .. }
            | FixError::InvalidConfigValueError { .. }
            | FixError::MissingConfigError { .. }
            | FixError::ValidationError { .. } => ErrorSeverity::Medium,

            FixError::IoError(_) | FixError::WalkError(_) | FixError::ProcessingError { .. } => {
                ErrorSeverity::High
            }

            FixError::RegexError(_) | FixError::SerializationError(_) | FixError::TaskError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            FixError::IoError(_) => {
                "Check that the target directory exists and you have read/write permission".to_string()
            }
            FixError::WalkError(_) => {
                "Check for unreadable directories or broken symlinks under the scan root".to_string()
            }
            FixError::RegexError(_) => {
                "This is an internal pattern error; please report it".to_string()
            }
            FixError::SerializationError(_) => {
                "The summary report could not be serialized; please report it".to_string()
            }
            FixError::TaskError(_) => {
                "A rewrite worker crashed; re-run with --threads 1 to isolate the file".to_string()
            }
            FixError::ConfigError { .. }
            | FixError::ConfigValidationError { .. }
            | FixError::InvalidConfigValueError { .. }
            | FixError::MissingConfigError { .. } => {
                "Fix the configuration value and run again".to_string()
            }
            FixError::ProcessingError { .. } => {
                "Re-run with --dry-run and --verbose to see which file fails".to_string()
            }
            FixError::ValidationError { .. } => {
                "Check the command line arguments and run again".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FixError::IoError(e) => format!("File system problem: {}", e),
            FixError::WalkError(e) => format!("Could not walk the directory tree: {}", e),
            FixError::ConfigError { message }
            | FixError::ProcessingError { message }
            | FixError::ValidationError { message } => message.clone(),
            FixError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            FixError::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' is not a valid value for {}: {}", value, field, reason)
            }
            FixError::MissingConfigError { field } => {
                format!("Required configuration field '{}' is missing", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FixError>;
