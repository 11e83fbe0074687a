use serde::{Deserialize, Serialize};

/// The slice of a WooCommerce `order.created` body this service reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderPayload {
    pub number: serde_json::Value,
    pub currency: Option<String>,
    pub total: serde_json::Value,
    pub date_created: Option<String>,
    pub payment_method_title: Option<String>,
    pub billing: Option<Address>,
    pub shipping: Option<Address>,
    pub line_items: Vec<LineItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    pub address_1: String,
    pub address_2: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub country: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    pub name: String,
    pub quantity: serde_json::Value,
    pub total: serde_json::Value,
    pub meta_data: Vec<MetaEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaEntry {
    pub key: String,
    pub value: serde_json::Value,
}

/// Start and end of a booking, in the `DD/MM/YYYY HH:MM` form customers see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingWindow {
    pub start: String,
    pub end: String,
}

/// Everything the email step needs once the pipeline has run.
#[derive(Debug, Clone)]
pub struct BookingPass {
    pub window: BookingWindow,
    pub entry_time: String,
    pub token: String,
    pub qr_png: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub qr_png: Vec<u8>,
}

/// Renders a JSON scalar as text. Strings come back verbatim, numbers and
/// booleans in their JSON form; null, arrays and objects have no text form.
pub fn scalar_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
