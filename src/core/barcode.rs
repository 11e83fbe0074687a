use crate::utils::error::{BookingError, Result};
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};
use std::io::Cursor;

/// Pixel size of one QR module.
pub const MODULE_PIXELS: u32 = 10;

/// Encodes `data` as a QR symbol and returns it as a black-on-white PNG.
///
/// The smallest symbol version that fits at error-correction level M is
/// chosen. Data that does not fit the largest version is an error.
pub fn render_qr_png(data: &str) -> Result<Vec<u8>> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M).map_err(|e| {
        BookingError::BarcodeError {
            message: format!("{} ({} bytes)", e, data.len()),
        }
    })?;

    tracing::debug!(
        "QR symbol {:?} ({}x{} modules) for {} bytes",
        code.version(),
        code.width(),
        code.width(),
        data.len()
    );

    let image = code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
        .dark_color(Luma([0u8]))
        .light_color(Luma([255u8]))
        .build();

    let mut png = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(image).write_to(&mut png, ImageFormat::Png)?;
    Ok(png.into_inner())
}
