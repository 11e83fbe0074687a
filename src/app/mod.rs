pub mod email;
pub mod webhook;

use crate::adapters::SmtpMailer;
use crate::config::AppConfig;
use crate::core::pipeline::BookingPipeline;
use crate::utils::error::Result;
use email::EmailComposer;
use secrecy::ExposeSecret;
use webhook::WebhookHandler;

/// Wires the production handler from configuration.
pub fn build_handler(config: &AppConfig) -> Result<WebhookHandler<SmtpMailer>> {
    let pipeline = BookingPipeline::from_secret(config.cipher.aes_key.expose_secret())?;
    tracing::debug!("Token sealer ready (AES-{})", pipeline.sealer().key_bits());

    let composer = match &config.mail.template_path {
        Some(path) => EmailComposer::from_template_file(config.mail.subject.clone(), path)?,
        None => EmailComposer::new(config.mail.subject.clone())?,
    };

    Ok(WebhookHandler::new(
        pipeline,
        composer,
        SmtpMailer::new(config.mail.clone()),
    ))
}
