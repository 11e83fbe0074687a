use crate::app::email::{ConfirmationEmail, EmailComposer};
use crate::core::pipeline::BookingPipeline;
use crate::domain::model::{scalar_text, OrderPayload};
use crate::domain::ports::Mailer;
use crate::utils::error::{BookingError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// The parts of an API Gateway proxy event the handler reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub status_code: u16,
    pub body: String,
}

impl WebhookResponse {
    pub fn ok() -> Self {
        Self {
            status_code: 200,
            body: "OK".to_string(),
        }
    }

    pub fn no_email() -> Self {
        Self {
            status_code: 400,
            body: "No email".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Sent { to: String, token: String },
    MissingEmail,
}

pub fn decode_body(request: &WebhookRequest) -> Result<String> {
    let raw = request.body.clone().unwrap_or_default();
    if !request.is_base64_encoded {
        return Ok(raw);
    }

    let bytes = STANDARD.decode(raw.trim())?;
    String::from_utf8(bytes).map_err(|e| BookingError::InvalidPayloadError {
        message: format!("webhook body is not UTF-8: {}", e),
    })
}

/// Order webhook entry point: booking pass, confirmation email, send.
pub struct WebhookHandler<M: Mailer> {
    pipeline: BookingPipeline,
    composer: EmailComposer,
    mailer: M,
}

impl<M: Mailer> WebhookHandler<M> {
    pub fn new(pipeline: BookingPipeline, composer: EmailComposer, mailer: M) -> Self {
        Self {
            pipeline,
            composer,
            mailer,
        }
    }

    pub fn mailer(&self) -> &M {
        &self.mailer
    }

    /// Runs the whole flow and surfaces every failure.
    pub async fn process(&self, request: &WebhookRequest) -> Result<Outcome> {
        let body = decode_body(request)?;
        let order: OrderPayload = serde_json::from_str(&body)?;
        let order_number = scalar_text(&order.number).unwrap_or_else(|| "N/A".to_string());
        tracing::info!(
            "Order {} received with {} line items",
            order_number,
            order.line_items.len()
        );

        let pass = self.pipeline.run(&order)?;

        let recipient = order
            .billing
            .as_ref()
            .and_then(|billing| billing.email.as_deref())
            .map(str::trim)
            .filter(|email| !email.is_empty());
        let Some(to) = recipient else {
            tracing::warn!("Order {} has no billing email", order_number);
            return Ok(Outcome::MissingEmail);
        };

        let confirmation = ConfirmationEmail::new(&order, &pass);
        let email = self.composer.compose(to, &confirmation, pass.qr_png)?;
        self.mailer.send(email).await?;

        Ok(Outcome::Sent {
            to: to.to_string(),
            token: pass.token,
        })
    }

    /// Webhook response policy: an order without a billing email gets a
    /// 400, everything else a 200, including internal failures. A non-2xx
    /// reply makes the store retry the delivery, and after repeated failures
    /// disable the webhook.
    pub async fn handle(&self, request: &WebhookRequest) -> WebhookResponse {
        tracing::info!("Webhook invoked");

        match self.process(request).await {
            Ok(Outcome::Sent { to, .. }) => {
                tracing::info!("✅ Booking confirmation sent to {}", to);
                WebhookResponse::ok()
            }
            Ok(Outcome::MissingEmail) => WebhookResponse::no_email(),
            Err(e) => {
                tracing::error!(
                    "❌ Webhook processing failed: {} (Severity: {:?})",
                    e,
                    e.severity()
                );
                tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                WebhookResponse::ok()
            }
        }
    }
}
