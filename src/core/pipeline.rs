use crate::core::barcode::render_qr_png;
use crate::core::metadata::extract_booking_window;
use crate::core::sealer::TokenSealer;
use crate::core::token::{encode_token, entry_time};
use crate::domain::model::{BookingPass, OrderPayload};
use crate::utils::error::Result;

/// Turns an order into a scannable booking pass. Stateless apart from the
/// sealer's key, so one pipeline serves every invocation.
#[derive(Debug, Clone)]
pub struct BookingPipeline {
    sealer: TokenSealer,
}

impl BookingPipeline {
    pub fn new(sealer: TokenSealer) -> Self {
        Self { sealer }
    }

    pub fn from_secret(secret: &str) -> Result<Self> {
        Ok(Self::new(TokenSealer::from_secret(secret)?))
    }

    pub fn sealer(&self) -> &TokenSealer {
        &self.sealer
    }

    pub fn run(&self, order: &OrderPayload) -> Result<BookingPass> {
        let window = extract_booking_window(&order.line_items);
        tracing::debug!("Booking window: {} -> {}", window.start, window.end);

        let plaintext = encode_token(&window.start, &window.end);
        let token = self.sealer.seal_token(&plaintext);
        let qr_png = render_qr_png(&token)?;

        tracing::info!(
            "Booking pass ready: {} byte token, {} byte QR image",
            token.len(),
            qr_png.len()
        );

        Ok(BookingPass {
            entry_time: entry_time(&window.start),
            window,
            token,
            qr_png,
        })
    }
}
