use crate::domain::model::{scalar_text, Address, BookingPass, OrderPayload, OutgoingEmail};
use crate::utils::error::Result;
use chrono::Datelike;
use serde::Serialize;
use tera::{Context, Tera};

const TEMPLATE_NAME: &str = "confirmation.html";
const DEFAULT_TEMPLATE: &str = include_str!("../../templates/confirmation.html");

/// Values substituted into the confirmation template.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmationEmail {
    pub first_name: String,
    pub last_name: String,
    pub order_number: String,
    pub date_created: String,
    pub entry_time: String,
    pub start_time: String,
    pub end_time: String,
    pub total: String,
    pub currency: String,
    pub line_items: Vec<ItemRow>,
    pub billing_address: String,
    pub shipping_address: String,
    pub payment_method: String,
    pub year: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemRow {
    pub name: String,
    pub quantity: String,
    pub total: String,
}

impl ConfirmationEmail {
    pub fn new(order: &OrderPayload, pass: &BookingPass) -> Self {
        let billing = order.billing.clone().unwrap_or_default();

        Self {
            first_name: billing.first_name.clone(),
            last_name: billing.last_name.clone(),
            order_number: scalar_text(&order.number).unwrap_or_else(|| "N/A".to_string()),
            date_created: format_created_date(order.date_created.as_deref().unwrap_or_default()),
            entry_time: pass.entry_time.clone(),
            start_time: pass.window.start.clone(),
            end_time: pass.window.end.clone(),
            total: scalar_text(&order.total).unwrap_or_else(|| "0".to_string()),
            currency: order.currency.clone().unwrap_or_default(),
            line_items: order
                .line_items
                .iter()
                .map(|item| ItemRow {
                    name: item.name.clone(),
                    quantity: scalar_text(&item.quantity).unwrap_or_else(|| "0".to_string()),
                    total: scalar_text(&item.total).unwrap_or_default(),
                })
                .collect(),
            billing_address: format_address(order.billing.as_ref()),
            shipping_address: format_address(order.shipping.as_ref()),
            payment_method: order
                .payment_method_title
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
            year: chrono::Utc::now().year(),
        }
    }
}

/// `2025-06-01T12:30:45` style timestamps, cut to the second and with the
/// `T` replaced by a space.
pub fn format_created_date(raw: &str) -> String {
    raw.chars().take(19).collect::<String>().replace('T', " ")
}

/// One-line address from the non-empty parts, or `N/A` when there is none.
pub fn format_address(address: Option<&Address>) -> String {
    let Some(addr) = address else {
        return "N/A".to_string();
    };

    let joined = [
        &addr.first_name,
        &addr.last_name,
        &addr.address_1,
        &addr.address_2,
        &addr.city,
        &addr.state,
        &addr.postcode,
        &addr.country,
    ]
    .iter()
    .map(|part| part.trim())
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(", ");

    if joined.is_empty() {
        "N/A".to_string()
    } else {
        joined
    }
}

/// Renders confirmation emails. Values are HTML-escaped by the template
/// engine.
pub struct EmailComposer {
    tera: Tera,
    subject: String,
}

impl EmailComposer {
    pub fn new(subject: impl Into<String>) -> Result<Self> {
        Self::with_template(subject, DEFAULT_TEMPLATE)
    }

    pub fn with_template(subject: impl Into<String>, template: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, template)?;
        Ok(Self {
            tera,
            subject: subject.into(),
        })
    }

    pub fn from_template_file(subject: impl Into<String>, path: &str) -> Result<Self> {
        let template = std::fs::read_to_string(path)?;
        tracing::info!("Using email template from {}", path);
        Self::with_template(subject, &template)
    }

    pub fn render(&self, email: &ConfirmationEmail) -> Result<String> {
        let context = Context::from_serialize(email)?;
        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }

    pub fn compose(&self, to: &str, email: &ConfirmationEmail, qr_png: Vec<u8>) -> Result<OutgoingEmail> {
        Ok(OutgoingEmail {
            to: to.to_string(),
            subject: self.subject.clone(),
            html: self.render(email)?,
            qr_png,
        })
    }
}
