use crate::error::QuoteError;
use crate::rates::parse_rate_table_str;
use crate::rates::schema::RateTable;

const STANDARD_JSON: &str = include_str!("../../../../rates/standard.json");

/// Available predefined rate tables.
pub const PRESETS: &[&str] = &["standard"];

/// Preset used when the caller names none.
pub const DEFAULT_PRESET: &str = "standard";

/// Load a predefined rate table by name.
pub fn load_preset(name: &str) -> Result<RateTable, QuoteError> {
    match name {
        "standard" => parse_rate_table_str(STANDARD_JSON),
        _ => Err(QuoteError::UnknownPreset {
            name: name.to_string(),
            available: PRESETS.join(", "),
        }),
    }
}
