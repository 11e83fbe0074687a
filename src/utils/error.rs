use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Base64 decoding error: {0}")]
    Base64Error(#[from] base64::DecodeError),

    #[error("Template error: {0}")]
    TemplateError(#[from] tera::Error),

    #[error("Invalid webhook payload: {message}")]
    InvalidPayloadError { message: String },

    #[error("Invalid cipher key: got {actual} bytes, expected 16, 24 or 32")]
    KeyLengthError { actual: usize },

    #[error("Token decryption failed: {message}")]
    DecryptError { message: String },

    #[error("QR encoding failed: {message}")]
    BarcodeError { message: String },

    #[error("Image encoding failed: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Email error: {message}")]
    MailError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl BookingError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BookingError::MailError { .. } | BookingError::IoError(_) => ErrorSeverity::Medium,
            BookingError::SerializationError(_)
            | BookingError::Base64Error(_)
            | BookingError::InvalidPayloadError { .. }
            | BookingError::DecryptError { .. }
            | BookingError::BarcodeError { .. }
            | BookingError::ImageError(_)
            | BookingError::TemplateError(_) => ErrorSeverity::High,
            BookingError::KeyLengthError { .. }
            | BookingError::ConfigError { .. }
            | BookingError::MissingConfigError { .. }
            | BookingError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Short message for terminal output, without library error details.
    pub fn user_friendly_message(&self) -> String {
        match self {
            BookingError::KeyLengthError { actual } => {
                format!("The AES key is {} bytes long; 16, 24 or 32 are supported", actual)
            }
            BookingError::MissingConfigError { field } => {
                format!("Missing configuration: {}", field)
            }
            BookingError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration for {}: {}", field, reason)
            }
            BookingError::ConfigError { .. } => "The configuration could not be read".to_string(),
            BookingError::MailError { .. } => "The confirmation email could not be sent".to_string(),
            BookingError::DecryptError { .. } | BookingError::Base64Error(_) => {
                "The token could not be decrypted".to_string()
            }
            BookingError::BarcodeError { .. } | BookingError::ImageError(_) => {
                "The QR code could not be generated".to_string()
            }
            BookingError::SerializationError(_) | BookingError::InvalidPayloadError { .. } => {
                "The order payload could not be read".to_string()
            }
            BookingError::TemplateError(_) => "The email template could not be rendered".to_string(),
            BookingError::IoError(e) => format!("File error: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BookingError::KeyLengthError { .. } => {
                "Set AES_KEY to a secret of exactly 16, 24 or at least 32 bytes"
            }
            BookingError::MissingConfigError { .. } | BookingError::ConfigError { .. } => {
                "Check the environment variables or the TOML configuration file"
            }
            BookingError::InvalidConfigValueError { .. } => "Correct the reported configuration value",
            BookingError::MailError { .. } => "Check SMTP credentials and network access, then retry",
            BookingError::DecryptError { .. } | BookingError::Base64Error(_) => {
                "Make sure the token was sealed with the same key"
            }
            BookingError::BarcodeError { .. } => "The token is too long for a QR symbol",
            BookingError::SerializationError(_) | BookingError::InvalidPayloadError { .. } => {
                "Check that the payload is valid order JSON"
            }
            BookingError::TemplateError(_) => "Check the email template syntax",
            BookingError::ImageError(_) | BookingError::IoError(_) => "Retry the operation",
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
