use std::panic::Location;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AstroError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Vector store error: {message}")]
    VectorStoreError { message: String },

    #[error("LLM request failed: {message}")]
    LlmError { message: String },

    #[error("Birth chart error: {message}")]
    ChartError { message: String },

    #[error("Failed to read document {path}: {message}")]
    DocumentError { path: String, message: String },

    /// Wraps another error with the call site that raised it.
    #[error("Error occurred in {file} at line {line} - {source}")]
    Located {
        file: &'static str,
        line: u32,
        #[source]
        source: Box<AstroError>,
    },
}

pub type Result<T> = std::result::Result<T, AstroError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Io,
    Configuration,
    Data,
    Chart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a run that failed with this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Critical => 3,
        }
    }
}

impl AstroError {
    /// Attach the caller's file and line. Already located errors are returned as-is.
    #[track_caller]
    pub fn located(self) -> Self {
        if matches!(self, Self::Located { .. }) {
            return self;
        }
        let caller = Location::caller();
        Self::Located {
            file: caller.file(),
            line: caller.line(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any location wrappers.
    pub fn root(&self) -> &AstroError {
        match self {
            Self::Located { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.root() {
            Self::ApiError(_) | Self::LlmError { .. } => ErrorCategory::Network,
            Self::IoError(_) => ErrorCategory::Io,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => ErrorCategory::Configuration,
            Self::SerializationError(_)
            | Self::VectorStoreError { .. }
            | Self::DocumentError { .. } => ErrorCategory::Data,
            Self::ChartError { .. } => ErrorCategory::Chart,
            Self::Located { .. } => unreachable!("root() never returns a located error"),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Io | ErrorCategory::Chart => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.root() {
            Self::ApiError(_) => {
                "Check that the LLM and embedding services are reachable and retry".to_string()
            }
            Self::LlmError { .. } => {
                "Verify the model name and API key, then retry the request".to_string()
            }
            Self::IoError(_) => "Check that the file exists and is readable".to_string(),
            Self::MissingConfigError { field } => {
                format!("Provide a value for '{}' in the config file or environment", field)
            }
            Self::InvalidConfigValueError { field, .. }
            | Self::ConfigValidationError { field, .. } => {
                format!("Fix the value of '{}' in your configuration", field)
            }
            Self::ConfigError { .. } => "Review the configuration file".to_string(),
            Self::VectorStoreError { .. } | Self::SerializationError(_) => {
                "Rebuild the vector index with `astro-insight index`".to_string()
            }
            Self::ChartError { .. } => "Report this chart failure with the input used".to_string(),
            Self::DocumentError { path, .. } => {
                format!("Check that {} is a readable text or PDF document", path)
            }
            Self::Located { .. } => unreachable!("root() never returns a located error"),
        }
    }

    /// Message for end users, without source locations.
    pub fn user_friendly_message(&self) -> String {
        match self.root() {
            Self::ApiError(_) => "Could not reach an external service".to_string(),
            Self::LlmError { message } => format!("The language model request failed: {}", message),
            Self::IoError(e) => format!("File access failed: {}", e),
            Self::MissingConfigError { field } => format!("Missing configuration: {}", field),
            Self::VectorStoreError { message } => format!("Knowledge base unavailable: {}", message),
            other => other.to_string(),
        }
    }
}

/// Location-capturing conversion for any result whose error converts into [`AstroError`].
pub trait ResultExt<T> {
    fn located(self) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<AstroError>,
{
    #[track_caller]
    fn located(self) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(e) => {
                let err: AstroError = e.into();
                Err(err.located())
            }
        }
    }
}
