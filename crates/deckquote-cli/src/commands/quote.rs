use chrono::Utc;
use deckquote_core::quote::Quote;
use std::path::Path;

pub fn accept(file: &Path) -> Result<(), deckquote_core::error::QuoteError> {
    let json = std::fs::read_to_string(file)?;
    let mut quote: Quote = serde_json::from_str(&json)?;

    quote.accept(Utc::now())?;

    std::fs::write(file, serde_json::to_string_pretty(&quote)?)?;
    if let Some(id) = quote.estimate_id {
        println!("Estimate {id} accepted.");
    }
    Ok(())
}
