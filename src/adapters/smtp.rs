use crate::config::MailConfig;
use crate::domain::model::OutgoingEmail;
use crate::domain::ports::Mailer;
use crate::utils::error::{BookingError, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Content-ID the template's `<img src="cid:qr_code.png">` points at.
pub const QR_CONTENT_ID: &str = "qr_code.png";

type Transport = AsyncSmtpTransport<Tokio1Executor>;

fn mail_error(context: &str, e: impl std::fmt::Display) -> BookingError {
    BookingError::MailError {
        message: format!("{}: {}", context, e),
    }
}

/// Builds the `multipart/related` message: the HTML body plus the QR image
/// as an inline part.
pub fn build_message(from: &str, email: &OutgoingEmail) -> Result<Message> {
    let from: Mailbox = from.parse().map_err(|e| mail_error("invalid sender", e))?;
    let to: Mailbox = email
        .to
        .trim()
        .parse()
        .map_err(|e| mail_error("invalid recipient", e))?;
    let png = ContentType::parse("image/png").map_err(|e| mail_error("content type", e))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.clone())
        .multipart(
            MultiPart::related()
                .singlepart(SinglePart::html(email.html.clone()))
                .singlepart(
                    Attachment::new_inline(QR_CONTENT_ID.to_string()).body(email.qr_png.clone(), png),
                ),
        )
        .map_err(|e| mail_error("failed to build message", e))
}

/// SMTP mailer over implicit TLS. The transport is created on first use,
/// kept for later invocations and rebuilt once if a send fails.
pub struct SmtpMailer {
    config: MailConfig,
    transport: Mutex<Option<Arc<Transport>>>,
}

impl SmtpMailer {
    pub fn new(config: MailConfig) -> Self {
        Self {
            config,
            transport: Mutex::new(None),
        }
    }

    fn connect(&self) -> Result<Transport> {
        tracing::info!(
            "Opening SMTP transport to {}:{}",
            self.config.smtp_host,
            self.config.smtp_port
        );

        let credentials = Credentials::new(
            self.config.username.trim().to_string(),
            self.config.password.expose_secret().trim().to_string(),
        );

        Ok(Transport::relay(&self.config.smtp_host)
            .map_err(|e| mail_error("invalid SMTP relay", e))?
            .port(self.config.smtp_port)
            .credentials(credentials)
            .timeout(Some(Duration::from_secs(self.config.timeout_seconds)))
            .build())
    }

    async fn transport(&self) -> Result<Arc<Transport>> {
        let mut slot = self.transport.lock().await;
        if let Some(transport) = slot.as_ref() {
            return Ok(Arc::clone(transport));
        }
        let transport = Arc::new(self.connect()?);
        *slot = Some(Arc::clone(&transport));
        Ok(transport)
    }

    async fn reset(&self) {
        self.transport.lock().await.take();
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<()> {
        let message = build_message(self.config.sender(), &email)?;

        let transport = self.transport().await?;
        if let Err(first) = transport.send(message.clone()).await {
            tracing::warn!("SMTP send failed ({}), reconnecting", first);
            self.reset().await;

            let transport = self.transport().await?;
            transport
                .send(message)
                .await
                .map_err(|e| mail_error("SMTP send failed after reconnect", e))?;
        }

        tracing::info!("📧 Email sent to {}", email.to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::net::TcpListener;

    fn outgoing() -> OutgoingEmail {
        OutgoingEmail {
            to: "ada@example.com".to_string(),
            subject: "Your Booking QR Code".to_string(),
            html: "<img src=\"cid:qr_code.png\">".to_string(),
            qr_png: b"\x89PNG\r\n\x1a\n".to_vec(),
        }
    }

    #[test]
    fn test_build_message_is_related_multipart_with_inline_qr() {
        let message = build_message("tickets@example.com", &outgoing()).unwrap();
        let raw = String::from_utf8_lossy(&message.formatted()).to_string();

        assert!(raw.contains("Subject: Your Booking QR Code"));
        assert!(raw.contains("multipart/related"));
        assert!(raw.contains("Content-ID: <qr_code.png>"));
        assert!(raw.contains("Content-Disposition: inline"));
        assert!(raw.contains("image/png"));
    }

    #[test]
    fn test_build_message_rejects_bad_recipient() {
        let mut email = outgoing();
        email.to = "not an address".to_string();
        assert!(matches!(
            build_message("tickets@example.com", &email),
            Err(BookingError::MailError { .. })
        ));
    }

    #[tokio::test]
    async fn test_failed_send_reconnects_once() {
        // Accepts every connection and closes it before the TLS handshake.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let accepted = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&accepted);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                drop(stream);
            }
        });

        let mailer = SmtpMailer::new(MailConfig {
            smtp_host: "127.0.0.1".to_string(),
            smtp_port: port,
            username: "tickets@example.com".to_string(),
            password: SecretString::new("app-password".to_string()),
            from: None,
            subject: "Your Booking QR Code".to_string(),
            timeout_seconds: 2,
            template_path: None,
        });

        let result = mailer.send(outgoing()).await;

        match result {
            Err(BookingError::MailError { message }) => {
                assert!(message.contains("after reconnect"), "{}", message)
            }
            other => panic!("expected mail error, got {:?}", other),
        }
        assert_eq!(accepted.load(Ordering::SeqCst), 2);
    }
}
