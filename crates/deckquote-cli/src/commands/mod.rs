pub mod finishes;
pub mod form;
pub mod price;
pub mod quote;
pub mod rates;

use chrono::Utc;
use deckquote_core::error::QuoteError;
use deckquote_core::model::ProjectSpec;
use deckquote_core::quote::{Customer, Quote};
use deckquote_core::rates::builtin;
use deckquote_core::rates::schema::RateTable;
use std::path::{Path, PathBuf};

use crate::output;

/// Load the rate table from a file, a named preset, or the default preset.
pub fn load_rates(file: Option<PathBuf>, preset: Option<String>) -> Result<RateTable, QuoteError> {
    match (file, preset) {
        (Some(path), _) => deckquote_core::rates::load_rate_table(&path),
        (None, Some(name)) => builtin::load_preset(&name),
        (None, None) => builtin::load_preset(builtin::DEFAULT_PRESET),
    }
}

/// Price a project, print it, and optionally write the quote to disk.
///
/// A rejected estimate is printed (as JSON when asked) and returned as an
/// error, so nothing is written.
pub fn deliver(
    project: ProjectSpec,
    rates: &RateTable,
    output_format: &str,
    output_file: Option<PathBuf>,
    customer: Option<String>,
    verbose: bool,
) -> Result<(), QuoteError> {
    let customer = Customer {
        first_name: customer.unwrap_or_default(),
        ..Default::default()
    };
    let mut quote = Quote::new(project, customer, rates);

    match output_format {
        "json" => output::json::print(&quote.outcome)?,
        _ => output::table::print(&quote.project, &quote.outcome, rates, verbose),
    }
    quote.outcome.ensure_priced()?;

    let Some(path) = output_file else {
        return Ok(());
    };

    if !quote.customer.first_name.is_empty() {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let id = quote.save(saved_ids(dir, &path), Utc::now())?;
        eprintln!("Saved as estimate {id}");
    }

    let json = serde_json::to_string_pretty(&quote)?;
    std::fs::write(&path, json)?;
    eprintln!("Quote written to {}", path.display());
    Ok(())
}

/// Estimate ids of quotes already saved next to `target`. Files that are
/// not quotes are skipped, as is `target` itself since it gets overwritten.
fn saved_ids(dir: &Path, target: &Path) -> Vec<u32> {
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")))
        .filter(|p| p.file_name() != target.file_name())
        .filter_map(|p| std::fs::read_to_string(&p).ok())
        .filter_map(|text| serde_json::from_str::<Quote>(&text).ok())
        .filter_map(|q| q.estimate_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckquote_core::intake::{parse_form, parse_pairs};

    fn form_project(pairs: &[&str]) -> ProjectSpec {
        parse_form(&parse_pairs(pairs).unwrap()).unwrap()
    }

    #[test]
    fn test_rejected_estimate_is_an_error_and_not_written() {
        let rates = load_rates(None, None).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("quote.json");

        let project = form_project(&["length=20", "width=12", "height=25", "material=cedar"]);
        let err = deliver(project, &rates, "json", Some(out.clone()), None, false).unwrap_err();

        assert!(matches!(err, QuoteError::EstimateRejected(_)));
        assert!(err.to_string().contains("20 feet or higher"));
        assert!(!out.exists());
    }

    #[test]
    fn test_unknown_material_is_not_written() {
        let rates = load_rates(None, None).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("quote.json");

        let project = form_project(&["length=20", "width=12", "height=3", "material=teak"]);
        assert!(deliver(project, &rates, "table", Some(out.clone()), None, false).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn test_out_of_range_dimensions_are_rejected() {
        let rates = load_rates(None, None).unwrap();
        let project = form_project(&[
            "length=1e20",
            "width=1e10",
            "height=3",
            "material=cedar",
        ]);
        let err = deliver(project, &rates, "json", None, None, false).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_priced_quote_saved_after_existing_ids() {
        let rates = load_rates(None, None).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let first = dir.path().join("first.json");
        let project = form_project(&["length=20", "width=12", "height=3", "material=cedar"]);
        deliver(project.clone(), &rates, "json", Some(first.clone()), Some("Ana".into()), false)
            .unwrap();
        let saved: Quote = serde_json::from_str(&std::fs::read_to_string(&first).unwrap()).unwrap();
        assert_eq!(saved.estimate_id, Some(1000));

        let second = dir.path().join("second.json");
        deliver(project, &rates, "json", Some(second.clone()), Some("Ben".into()), false).unwrap();
        let saved: Quote =
            serde_json::from_str(&std::fs::read_to_string(&second).unwrap()).unwrap();
        assert_eq!(saved.estimate_id, Some(1001));
    }
}
