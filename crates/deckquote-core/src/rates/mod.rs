pub mod builtin;
pub mod schema;

use crate::error::QuoteError;
use rust_decimal::Decimal;
use schema::RateTable;
use std::collections::BTreeMap;
use std::path::Path;

/// Load a rate table from a JSON file.
pub fn load_rate_table(path: &Path) -> Result<RateTable, QuoteError> {
    let content = std::fs::read_to_string(path).map_err(|e| QuoteError::RateTableLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_rate_table(&content, path)
}

/// Parse a rate table from a JSON string.
pub fn parse_rate_table(json: &str, source: &Path) -> Result<RateTable, QuoteError> {
    let rates: RateTable = serde_json::from_str(json).map_err(|e| QuoteError::RateTableLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_rate_table(&rates)?;
    tracing::debug!(
        name = %rates.name,
        version = %rates.version,
        source = %source.display(),
        "loaded rate table"
    );
    Ok(rates)
}

/// Parse a rate table from a JSON string (no file path context).
pub fn parse_rate_table_str(json: &str) -> Result<RateTable, QuoteError> {
    let rates: RateTable = serde_json::from_str(json).map_err(QuoteError::Json)?;
    validate_rate_table(&rates)?;
    tracing::debug!(name = %rates.name, version = %rates.version, "loaded rate table");
    Ok(rates)
}

/// Validate that a rate table is well-formed.
pub fn validate_rate_table(rates: &RateTable) -> Result<(), QuoteError> {
    if rates.deck_materials.is_empty() {
        return Err(QuoteError::RateTableInvalid(
            "deck_materials must not be empty".into(),
        ));
    }

    check_rates("deck_materials", &rates.deck_materials)?;
    check_rates("rail_materials", &rates.rail_materials)?;
    check_rates("rail_infills", &rates.rail_infills)?;

    if rates.demo_cost < Decimal::ZERO {
        return Err(QuoteError::RateTableInvalid(format!(
            "demo_cost must not be negative (got {})",
            rates.demo_cost
        )));
    }

    if rates.fascia_cost < Decimal::ZERO {
        return Err(QuoteError::RateTableInvalid(format!(
            "fascia_cost must not be negative (got {})",
            rates.fascia_cost
        )));
    }

    Ok(())
}

fn check_rates(section: &str, entries: &BTreeMap<String, Decimal>) -> Result<(), QuoteError> {
    for (key, rate) in entries {
        if key.trim().is_empty() {
            return Err(QuoteError::RateTableInvalid(format!(
                "{} contains an empty key",
                section
            )));
        }
        if *rate < Decimal::ZERO {
            return Err(QuoteError::RateTableInvalid(format!(
                "{} '{}' has a negative rate ({})",
                section, key, rate
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_valid_rate_table() {
        let json = r#"{
            "name": "Test",
            "version": "1.0",
            "deck_materials": { "cedar": "40" },
            "rail_materials": { "wood": "35" },
            "rail_infills": { "balusters": "10" },
            "demo_cost": "5",
            "fascia_cost": "12.50"
        }"#;
        let rates = parse_rate_table_str(json).unwrap();
        assert_eq!(rates.name, "Test");
        assert_eq!(rates.deck_rate("cedar"), Some(dec!(40)));
        assert_eq!(rates.fascia_cost, dec!(12.50));
        assert!(rates.material_labels.is_empty());
    }

    #[test]
    fn test_missing_keys_resolve_to_zero() {
        let json = r#"{
            "name": "Test",
            "version": "1.0",
            "deck_materials": { "cedar": "40" },
            "demo_cost": "5",
            "fascia_cost": "12"
        }"#;
        let rates = parse_rate_table_str(json).unwrap();
        assert_eq!(rates.deck_rate("teak"), None);
        assert_eq!(rates.rail_rate("glass"), Decimal::ZERO);
        assert_eq!(rates.infill_rate("cable"), Decimal::ZERO);
    }

    #[test]
    fn test_empty_deck_materials_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "deck_materials": {},
            "demo_cost": "5",
            "fascia_cost": "12"
        }"#;
        assert!(matches!(
            parse_rate_table_str(json),
            Err(QuoteError::RateTableInvalid(_))
        ));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "deck_materials": { "cedar": "40" },
            "rail_infills": { "glass": "-1" },
            "demo_cost": "5",
            "fascia_cost": "12"
        }"#;
        let err = parse_rate_table_str(json).unwrap_err();
        assert!(err.to_string().contains("glass"));
    }

    #[test]
    fn test_negative_demo_cost_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "deck_materials": { "cedar": "40" },
            "demo_cost": "-5",
            "fascia_cost": "12"
        }"#;
        assert!(parse_rate_table_str(json).is_err());
    }

    #[test]
    fn test_label_falls_back_to_key() {
        let mut rates = parse_rate_table_str(
            r#"{ "name": "T", "version": "1", "deck_materials": { "cedar": "40" },
                 "demo_cost": "5", "fascia_cost": "12" }"#,
        )
        .unwrap();
        assert_eq!(rates.label("cedar"), "cedar");
        rates
            .material_labels
            .insert("cedar".into(), "Western Red Cedar".into());
        assert_eq!(rates.label("cedar"), "Western Red Cedar");
    }
}
