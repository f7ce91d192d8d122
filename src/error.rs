//! Error handling for domain-sweep

use thiserror::Error;

/// Main error type for domain-sweep
#[derive(Error, Debug, Clone)]
pub enum SweepError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Usage error: {message}")]
    Usage { message: String },

    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
        url: Option<String>,
    },

    #[error("Timeout error: {operation} timed out after {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    #[error("CSV error: {message}")]
    Csv {
        message: String,
        path: Option<String>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SweepError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a usage error (bad or conflicting command line input)
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(
        message: impl Into<String>,
        status_code: Option<u16>,
        url: Option<String>,
    ) -> Self {
        Self::Network {
            message: message.into(),
            status_code,
            url,
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Io {
            message: message.into(),
            path,
        }
    }

    /// Create a CSV error
    pub fn csv(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Csv {
            message: message.into(),
            path,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether a lookup failing with this error is worth another attempt
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Network { status_code, .. } => match status_code {
                None => true,
                Some(code) => matches!(code, 429 | 500 | 502 | 503 | 504),
            },
            _ => false,
        }
    }

    /// Process exit code for a fatal error
    pub fn exit_code(&self) -> i32 {
        match self {
            // Io only arises from reading word lists; report writes surface as Csv.
            Self::Config { .. } | Self::Usage { .. } | Self::Validation { .. } | Self::Io { .. } => 2,
            _ => 1,
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message } => {
                format!("❌ Configuration problem: {}\n💡 Check your arguments or .env file", message)
            }
            Self::Usage { message } => {
                format!("❌ Command error: {}\n💡 Use --help for usage information", message)
            }
            Self::Network { message, status_code, .. } => {
                let status = status_code.map_or(String::new(), |c| format!(" ({})", c));
                format!("❌ Network error{}: {}\n💡 Check your internet connection", status, message)
            }
            Self::Timeout { operation, timeout_ms } => {
                format!(
                    "⏱️  Operation '{}' timed out after {}ms\n💡 Try increasing --timeout-secs",
                    operation, timeout_ms
                )
            }
            Self::Validation { message } => {
                format!("❌ Validation error: {}\n💡 Check your input format", message)
            }
            Self::Io { message, path } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!("❌ File error{}: {}\n💡 Check file permissions and paths", path_info, message)
            }
            Self::Csv { message, path } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!("❌ Report error{}: {}\n💡 Check the --out path", path_info, message)
            }
            Self::Internal { message } => {
                format!("❌ Internal error: {}\n💡 This is a bug, please report it", message)
            }
        }
    }
}

impl From<csv::Error> for SweepError {
    fn from(err: csv::Error) -> Self {
        Self::csv(err.to_string(), None)
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SweepError>;

/// Helper macros for common error patterns
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::SweepError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::SweepError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! usage_error {
    ($msg:expr) => {
        $crate::error::SweepError::usage($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::SweepError::usage(format!($fmt, $($arg)*))
    };
}
