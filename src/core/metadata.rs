use crate::domain::model::{scalar_text, BookingWindow, LineItem, MetaEntry};
use serde_json::Value;

pub const START_TIME_KEY: &str = "phive_display_time_from";
pub const END_TIME_KEY: &str = "phive_display_time_to";

/// Substituted for both ends of the window when either one is missing.
pub const DEFAULT_BOOKING_TIME: &str = "01/01/2025 00:00";

/// Looks up `key` in a line item's metadata. The first entry with that key
/// decides the result: a non-empty array yields its first element, a scalar
/// yields itself, anything else (empty array, null, object) yields `None`.
pub fn extract_meta_value<'a>(meta: &'a [MetaEntry], key: &str) -> Option<&'a Value> {
    let entry = meta.iter().find(|entry| entry.key == key)?;

    match &entry.value {
        Value::Array(values) => values.first(),
        Value::Null | Value::Object(_) => None,
        scalar => Some(scalar),
    }
}

fn meta_text(meta: &[MetaEntry], key: &str) -> Option<String> {
    extract_meta_value(meta, key)
        .and_then(scalar_text)
        .filter(|text| !text.trim().is_empty())
}

/// Resolves the booking window across all line items. For each side the
/// first item that carries a usable value wins; scanning stops once both
/// sides are known. If either side is still missing, both fall back to
/// [`DEFAULT_BOOKING_TIME`].
pub fn extract_booking_window(line_items: &[LineItem]) -> BookingWindow {
    let mut start: Option<String> = None;
    let mut end: Option<String> = None;

    for item in line_items {
        if start.is_none() {
            start = meta_text(&item.meta_data, START_TIME_KEY);
        }
        if end.is_none() {
            end = meta_text(&item.meta_data, END_TIME_KEY);
        }
        if start.is_some() && end.is_some() {
            break;
        }
    }

    match (start, end) {
        (Some(start), Some(end)) => BookingWindow { start, end },
        (start, end) => {
            tracing::warn!(
                "Booking times incomplete (start: {:?}, end: {:?}), using default window",
                start,
                end
            );
            BookingWindow {
                start: DEFAULT_BOOKING_TIME.to_string(),
                end: DEFAULT_BOOKING_TIME.to_string(),
            }
        }
    }
}
