use chrono::{Duration, NaiveDateTime};
use regex::Regex;

pub const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M";
pub const PACKED_FORMAT: &str = "%Y%m%d%H%M%S";

/// Packed value used when a booking time cannot be parsed.
pub const EPOCH_PACKED: &str = "19700101000000";

/// Doors open this many minutes before the booked start.
pub const ENTRY_LEAD_MINUTES: i64 = 10;

/// Accepted shape of a display time. `%Y` alone would also take short or
/// signed years, which do not fit the 14-digit packed field.
const DISPLAY_SHAPE: &str = r"^[0-9]{1,2}/[0-9]{1,2}/[0-9]{4} [0-9]{1,2}:[0-9]{1,2}$";

pub fn parse_display_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    let shape = Regex::new(DISPLAY_SHAPE).ok()?;
    if !shape.is_match(raw) {
        return None;
    }
    NaiveDateTime::parse_from_str(raw, DISPLAY_FORMAT).ok()
}

/// `DD/MM/YYYY HH:MM` to `YYYYMMDDhhmmss`, or [`EPOCH_PACKED`] when the
/// input does not parse.
pub fn pack_timestamp(raw: &str) -> String {
    match parse_display_time(raw) {
        Some(dt) => dt.format(PACKED_FORMAT).to_string(),
        None => {
            tracing::warn!("Unparsable booking time {:?}, packing as epoch", raw);
            EPOCH_PACKED.to_string()
        }
    }
}

/// Scanner plaintext: nine comma-separated fields, only the third and the
/// fourth are filled.
pub fn encode_token(start: &str, end: &str) -> String {
    format!(
        "[,,{},{},,,,,]",
        pack_timestamp(start),
        pack_timestamp(end)
    )
}

/// Entry time shown to the customer. Falls back to the raw start text when
/// it cannot be parsed.
pub fn entry_time(start: &str) -> String {
    match parse_display_time(start) {
        Some(dt) => (dt - Duration::minutes(ENTRY_LEAD_MINUTES))
            .format(DISPLAY_FORMAT)
            .to_string(),
        None => start.to_string(),
    }
}
