use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("{0}")]
    InvalidDimension(String),

    #[error("invalid form field: {0}")]
    InvalidField(String),

    #[error("please select a valid material ('{material}' is not in the rate table)")]
    InvalidMaterial { material: String },

    #[error("we can't build decks 20 feet or higher without additional information (height {height} ft)")]
    HeightExceedsLimit { height: Decimal },

    #[error("stair width must be at least 3 ft if specified (got {width} ft)")]
    StairWidthTooNarrow { width: Decimal },

    #[error("rail infill '{infill}' requires a rail material")]
    InfillWithoutMaterial { infill: String },

    #[error("{0} is too large to price, please check the deck dimensions")]
    AmountTooLarge(String),

    #[error("{0}")]
    EstimateRejected(String),

    #[error("failed to load rate table from {path}: {reason}")]
    RateTableLoad { path: PathBuf, reason: String },

    #[error("invalid rate table: {0}")]
    RateTableInvalid(String),

    #[error("unknown rate preset '{name}'. Available: {available}")]
    UnknownPreset { name: String, available: String },

    #[error("unknown finish level '{0}' (expected 1-5)")]
    UnknownFinish(String),

    #[error("please complete customer and estimate before saving: {0}")]
    QuoteIncomplete(String),

    #[error("estimate must be saved before it can be accepted")]
    QuoteNotSaved,

    #[error("estimate {estimate_id} expired on {expired_on}")]
    QuoteExpired { estimate_id: u32, expired_on: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
