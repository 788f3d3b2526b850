use std::fmt;
use thiserror::Error;

/// 取消政策批次失效的原因
#[derive(Debug, Clone, PartialEq)]
pub enum PolicyViolation {
    NegativeFee { amount: f64 },
    CurrencyMismatch { expected: String, found: String },
    FeeExceedsPrice { fee: f64, price: f64 },
}

impl fmt::Display for PolicyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyViolation::NegativeFee { amount } => {
                write!(f, "negative cancellation fee {}", amount)
            }
            PolicyViolation::CurrencyMismatch { expected, found } => {
                write!(f, "fee currency {} does not match price currency {}", found, expected)
            }
            PolicyViolation::FeeExceedsPrice { fee, price } => {
                write!(f, "cancellation fee {} exceeds price {}", fee, price)
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Gateway returned HTTP {status} for {url}")]
    GatewayStatus { status: u16, url: String },

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid cancellation policy batch: {0}")]
    InvalidPolicyBatch(PolicyViolation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl QuoteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            QuoteError::ApiError(_) | QuoteError::GatewayStatus { .. } => ErrorCategory::Network,
            QuoteError::UrlError(_)
            | QuoteError::ConfigValidationError { .. }
            | QuoteError::InvalidConfigValueError { .. }
            | QuoteError::MissingConfigError { .. } => ErrorCategory::Configuration,
            QuoteError::SerializationError(_) | QuoteError::InvalidPolicyBatch(_) => {
                ErrorCategory::Data
            }
            QuoteError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            QuoteError::InvalidPolicyBatch(_) => ErrorSeverity::Low,
            // 網路問題通常重試即可
            QuoteError::ApiError(_) | QuoteError::GatewayStatus { .. } => ErrorSeverity::Medium,
            QuoteError::UrlError(_)
            | QuoteError::ConfigValidationError { .. }
            | QuoteError::InvalidConfigValueError { .. }
            | QuoteError::MissingConfigError { .. }
            | QuoteError::SerializationError(_) => ErrorSeverity::High,
            QuoteError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the quote gateway is reachable and retry",
            ErrorCategory::Configuration => "Review the command line flags or the TOML config file",
            ErrorCategory::Data => "The gateway returned unexpected data; contact the provider",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            QuoteError::ApiError(e) if e.is_timeout() => {
                "The quote gateway did not answer in time".to_string()
            }
            QuoteError::ApiError(_) => "Could not contact the quote gateway".to_string(),
            QuoteError::GatewayStatus { status, .. } => {
                format!("The quote gateway answered with HTTP {}", status)
            }
            QuoteError::SerializationError(_) => {
                "The quote gateway response could not be read".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QuoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_batch_is_low_severity_data_error() {
        let err = QuoteError::InvalidPolicyBatch(PolicyViolation::NegativeFee { amount: -0.1 });
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(
            err.to_string(),
            "Invalid cancellation policy batch: negative cancellation fee -0.1"
        );
    }

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = QuoteError::MissingConfigError {
            field: "gateway.endpoint".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("gateway.endpoint"));
    }

    #[test]
    fn test_gateway_status_message() {
        let err = QuoteError::GatewayStatus {
            status: 503,
            url: "http://localhost/quote/2030-01-01".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(
            err.user_friendly_message(),
            "The quote gateway answered with HTTP 503"
        );
    }
}
