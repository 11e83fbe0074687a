#![allow(dead_code)]

use async_trait::async_trait;
use booking_pass::domain::model::OutgoingEmail;
use booking_pass::domain::ports::Mailer;
use booking_pass::utils::error::{BookingError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

pub const TEST_KEY: &str = "0123456789abcdef";

/// Reads the first QR symbol found in a PNG.
pub fn decode_qr(png: &[u8]) -> String {
    let img = image::load_from_memory(png)
        .expect("PNG should load")
        .to_luma8();
    let (width, height) = img.dimensions();

    let mut prepared =
        rqrr::PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
            img.get_pixel(x as u32, y as u32)[0]
        });
    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1, "expected exactly one QR symbol");

    let (_meta, content) = grids[0].decode().expect("QR symbol should decode");
    content
}

#[derive(Clone, Default)]
pub struct MockMailer {
    sent: Arc<Mutex<Vec<OutgoingEmail>>>,
    failures_left: Arc<AtomicUsize>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next `count` sends fail with a mail error.
    pub fn failing(count: usize) -> Self {
        let mailer = Self::default();
        mailer.failures_left.store(count, Ordering::SeqCst);
        mailer
    }

    pub async fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<()> {
        let remaining = self.failures_left.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_left.store(remaining - 1, Ordering::SeqCst);
            return Err(BookingError::MailError {
                message: "connection refused".to_string(),
            });
        }

        self.sent.lock().await.push(email);
        Ok(())
    }
}

pub fn order_json(email: Option<&str>) -> serde_json::Value {
    let mut order = serde_json::json!({
        "id": 727,
        "number": "727",
        "status": "processing",
        "currency": "EUR",
        "total": "60.00",
        "date_created": "2025-05-20T09:15:02",
        "payment_method_title": "Credit Card (Stripe)",
        "billing": {
            "first_name": "Grace",
            "last_name": "Hopper",
            "address_1": "1 Harbour St",
            "address_2": "",
            "city": "Valletta",
            "state": "",
            "postcode": "VLT 1000",
            "country": "MT"
        },
        "shipping": {
            "first_name": "Grace",
            "last_name": "Hopper",
            "address_1": "",
            "city": "",
            "country": ""
        },
        "line_items": [
            {
                "id": 31,
                "name": "Harbour cruise",
                "quantity": 2,
                "total": "60.00",
                "meta_data": [
                    {"id": 1, "key": "phive_booked_persons", "value": ["2"]},
                    {"id": 2, "key": "phive_display_time_from", "value": ["01/01/2025 10:00"]},
                    {"id": 3, "key": "phive_display_time_to", "value": ["01/01/2025 12:00"]}
                ]
            }
        ]
    });

    if let Some(email) = email {
        order["billing"]["email"] = serde_json::Value::String(email.to_string());
    }
    order
}
