use deckquote_core::error::QuoteError;
use deckquote_core::pricing::EstimateOutcome;

pub fn print(outcome: &EstimateOutcome) -> Result<(), QuoteError> {
    let json = serde_json::to_string_pretty(outcome)?;
    println!("{json}");
    Ok(())
}
