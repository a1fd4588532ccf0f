use thiserror::Error;

/// Generic message shown when the identity service gives no usable reason.
pub const MAGIC_LINK_FALLBACK_MESSAGE: &str = "Unable to send magic link";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing environment variable: {key}")]
    MissingConfigError { key: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },

    #[error("{message}")]
    ValidationError { field: String, message: String },

    #[error("{message}")]
    AuthRequestError { status: Option<u16>, message: String },

    #[error("Magic link request could not be delivered: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    AuthRequest,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AppError {
    pub fn missing_config(key: impl Into<String>) -> Self {
        Self::MissingConfigError { key: key.into() }
    }

    pub fn auth_request(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::AuthRequestError {
            status,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigParseError { .. } => ErrorCategory::Configuration,
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::AuthRequestError { .. } | Self::TransportError(_) => ErrorCategory::AuthRequest,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::AuthRequest => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn is_configuration(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }

    /// Message suitable for the sign-in form.
    ///
    /// Transport failures carry reqwest internals (URLs, socket errors), so
    /// they collapse to the generic fallback.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::AuthRequestError { message, .. } if !message.trim().is_empty() => {
                message.clone()
            }
            Self::AuthRequestError { .. } | Self::TransportError(_) => {
                MAGIC_LINK_FALLBACK_MESSAGE.to_string()
            }
            Self::ValidationError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MissingConfigError { .. } => {
                "Set the named environment variable (or the matching key in the config file) and restart"
            }
            Self::InvalidConfigValueError { .. } | Self::ConfigParseError { .. } => {
                "Fix the configuration value and restart"
            }
            Self::ValidationError { .. } => "Correct the highlighted field and submit again",
            Self::AuthRequestError { status: Some(429), .. } => {
                "Wait a minute before requesting another magic link"
            }
            Self::AuthRequestError { .. } => "Check the email address and try again",
            Self::TransportError(_) => "Check network connectivity to the identity service",
            Self::IoError(_) => "Check file paths and permissions",
            Self::SerializationError(_) => "Report this as a bug",
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
