use deckquote_core::intake::{parse_form, parse_pairs};
use std::path::PathBuf;

pub fn run(
    fields: &[String],
    rate_file: Option<PathBuf>,
    preset: Option<String>,
    output_format: &str,
    output_file: Option<PathBuf>,
    customer: Option<String>,
    verbose: bool,
) -> Result<(), deckquote_core::error::QuoteError> {
    let rates = super::load_rates(rate_file, preset)?;

    // Form errors stop here, before anything is priced
    let form = parse_pairs(fields)?;
    let project = parse_form(&form)?;

    super::deliver(project, &rates, output_format, output_file, customer, verbose)
}
