#[cfg(feature = "cli")]
pub mod cli;
pub mod env;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_email_address, validate_non_empty_string, validate_path, validate_range, Validate,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 465;
pub const DEFAULT_SMTP_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_SUBJECT: &str = "Your Booking QR Code";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub cipher: CipherConfig,
    pub mail: MailConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CipherConfig {
    /// Only the first 32 bytes are used; see `SealingKey::from_secret`.
    pub aes_key: SecretString,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub username: String,
    pub password: SecretString,
    /// Sender address; the SMTP username when unset.
    pub from: Option<String>,
    #[serde(default = "default_subject")]
    pub subject: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Replaces the built-in confirmation template.
    pub template_path: Option<String>,
}

fn default_smtp_host() -> String {
    DEFAULT_SMTP_HOST.to_string()
}

fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}

fn default_subject() -> String {
    DEFAULT_SUBJECT.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_SMTP_TIMEOUT_SECONDS
}

impl MailConfig {
    pub fn sender(&self) -> &str {
        self.from.as_deref().unwrap_or(&self.username).trim()
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        // Fails with KeyLengthError before any webhook is accepted.
        crate::core::sealer::SealingKey::from_secret(self.cipher.aes_key.expose_secret())?;
        self.mail.validate()?;

        tracing::info!("✅ Configuration validation passed");
        Ok(())
    }
}

impl Validate for MailConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("mail.smtp_host", &self.smtp_host)?;
        validate_range("mail.smtp_port", self.smtp_port, 1, u16::MAX)?;
        validate_non_empty_string("mail.username", &self.username)?;
        validate_email_address("mail.from", self.sender())?;
        validate_non_empty_string("mail.password", self.password.expose_secret())?;
        validate_non_empty_string("mail.subject", &self.subject)?;
        validate_range("mail.timeout_seconds", self.timeout_seconds, 1, 300)?;

        if let Some(path) = &self.template_path {
            validate_path("mail.template_path", path)?;
        }

        Ok(())
    }
}
