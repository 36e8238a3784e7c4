use deckquote_core::model::ProjectSpec;
use std::path::{Path, PathBuf};

pub fn run(
    input_file: &Path,
    rate_file: Option<PathBuf>,
    preset: Option<String>,
    output_format: &str,
    output_file: Option<PathBuf>,
    customer: Option<String>,
    verbose: bool,
) -> Result<(), deckquote_core::error::QuoteError> {
    let rates = super::load_rates(rate_file, preset)?;

    let json = std::fs::read_to_string(input_file)?;
    let project: ProjectSpec = serde_json::from_str(&json)?;
    tracing::debug!(file = %input_file.display(), "loaded project");

    super::deliver(project, &rates, output_format, output_file, customer, verbose)
}
