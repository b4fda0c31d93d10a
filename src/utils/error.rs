use thiserror::Error;

#[derive(Error, Debug)]
pub enum CourseError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Course service returned HTTP {status} for {url}")]
    HttpStatusError { status: u16, url: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Invalid course record: {message}")]
    InvalidRecordError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
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

impl ErrorSeverity {
    /// Process exit status for a run that ended with this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl CourseError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CourseError::ApiError(_) | CourseError::HttpStatusError { .. } => {
                ErrorCategory::Network
            }
            CourseError::SerializationError(_) | CourseError::InvalidRecordError { .. } => {
                ErrorCategory::Data
            }
            CourseError::UrlError(_)
            | CourseError::ConfigError { .. }
            | CourseError::ConfigValidationError { .. }
            | CourseError::InvalidConfigValueError { .. }
            | CourseError::MissingConfigError { .. } => ErrorCategory::Configuration,
            CourseError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        if self.is_retryable() {
            return ErrorSeverity::Medium;
        }
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Transport failures, timeouts, 5xx and 429 are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            CourseError::ApiError(e) => {
                if e.is_decode() || e.is_builder() {
                    return false;
                }
                match e.status() {
                    Some(status) => status.is_server_error() || status.as_u16() == 429,
                    None => true,
                }
            }
            CourseError::HttpStatusError { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CourseError::ApiError(_) => {
                "Check network connectivity and that the course service is reachable"
            }
            CourseError::HttpStatusError { status, .. } if *status >= 500 => {
                "The course service is having trouble; try again in a moment"
            }
            CourseError::HttpStatusError { .. } => {
                "Check the API base URL and any configured request headers"
            }
            CourseError::SerializationError(_) | CourseError::InvalidRecordError { .. } => {
                "The course service returned data in an unexpected shape; check the service version"
            }
            CourseError::UrlError(_) => "Check that api_base_url is a valid http(s) URL",
            CourseError::IoError(_) => "Check file paths and permissions",
            CourseError::ConfigError { .. }
            | CourseError::ConfigValidationError { .. }
            | CourseError::InvalidConfigValueError { .. }
            | CourseError::MissingConfigError { .. } => {
                "Review the configuration file or command-line arguments"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network if self.is_retryable() => {
                "We couldn't load this course right now. Please try again.".to_string()
            }
            ErrorCategory::Network => format!("The course could not be loaded: {}", self),
            ErrorCategory::Data => {
                "The course data we received was invalid. Please try again later.".to_string()
            }
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, CourseError>;
