use crate::config::{
    AppConfig, CipherConfig, MailConfig, DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT,
    DEFAULT_SMTP_TIMEOUT_SECONDS, DEFAULT_SUBJECT,
};
use crate::utils::error::{BookingError, Result};
use secrecy::SecretString;
use std::env;

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|_| BookingError::MissingConfigError {
        field: name.to_string(),
    })
}

fn parsed<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| BookingError::InvalidConfigValueError {
                field: name.to_string(),
                value: raw.clone(),
                reason: "not a valid number".to_string(),
            }),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    /// Reads the Lambda environment:
    ///
    /// | variable | default |
    /// |---|---|
    /// | `AES_KEY` | required |
    /// | `GMAIL_USER` | required |
    /// | `GMAIL_APP_PASSWORD` | required |
    /// | `SMTP_HOST` | `smtp.gmail.com` |
    /// | `SMTP_PORT` | `465` |
    /// | `SMTP_TIMEOUT_SECONDS` | `10` |
    /// | `EMAIL_FROM` | `GMAIL_USER` |
    /// | `EMAIL_SUBJECT` | `Your Booking QR Code` |
    /// | `EMAIL_TEMPLATE_PATH` | built-in template |
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            cipher: CipherConfig {
                aes_key: SecretString::new(required("AES_KEY")?),
            },
            mail: MailConfig {
                smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| DEFAULT_SMTP_HOST.to_string()),
                smtp_port: parsed("SMTP_PORT", DEFAULT_SMTP_PORT)?,
                username: required("GMAIL_USER")?.trim().to_string(),
                password: SecretString::new(required("GMAIL_APP_PASSWORD")?.trim().to_string()),
                from: env::var("EMAIL_FROM").ok(),
                subject: env::var("EMAIL_SUBJECT").unwrap_or_else(|_| DEFAULT_SUBJECT.to_string()),
                timeout_seconds: parsed("SMTP_TIMEOUT_SECONDS", DEFAULT_SMTP_TIMEOUT_SECONDS)?,
                template_path: env::var("EMAIL_TEMPLATE_PATH").ok(),
            },
        })
    }
}
