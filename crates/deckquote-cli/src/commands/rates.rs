use deckquote_core::present::format_cost;
use deckquote_core::rates::builtin;
use deckquote_core::rates::schema::RateTable;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::path::Path;

pub fn list() -> Result<(), deckquote_core::error::QuoteError> {
    println!("Available predefined rate tables:\n");
    for name in builtin::PRESETS {
        let rates = builtin::load_preset(name)?;
        println!("  {:<10} {} (v{})", name, rates.name, rates.version);
        if let Some(ref desc) = rates.description {
            println!("             {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), deckquote_core::error::QuoteError> {
    let rates = builtin::load_preset(preset)?;

    println!("{} (version {})\n", rates.name, rates.version);
    if let Some(ref desc) = rates.description {
        println!("{}\n", desc);
    }

    print_section(&rates, "Deck materials", "sq ft", &rates.deck_materials);
    print_section(&rates, "Rail materials", "ft", &rates.rail_materials);
    print_section(&rates, "Rail infills", "ft", &rates.rail_infills);

    println!("Flat rates:\n");
    println!("  {:<24}  {}/sq ft", "Demolition", format_cost(rates.demo_cost));
    println!("  {:<24}  {}/ft", "Fascia", format_cost(rates.fascia_cost));
    println!();

    println!("Decks 5 ft and higher add 1% per foot above 4 ft to the deck line.");
    println!("Decks 20 ft and higher cannot be priced.");
    println!("Sales tax of 8.7% is added to the subtotal.\n");

    Ok(())
}

fn print_section(
    rates: &RateTable,
    title: &str,
    unit: &str,
    section: &BTreeMap<String, Decimal>,
) {
    if section.is_empty() {
        return;
    }
    println!("{}:\n", title);

    let max_key = section.keys().map(|k| k.len()).max().unwrap_or(10);
    for (key, rate) in section {
        println!(
            "  {:<width$}  {:<24}  {}/{}",
            key,
            rates.label(key),
            format_cost(*rate),
            unit,
            width = max_key
        );
    }
    println!();
}

pub fn schema() -> Result<(), deckquote_core::error::QuoteError> {
    print!(
        r#"JSON Rate Table Schema
======================

A rate table holds the unit costs used to price a deck. When you run
`deckquote price`, every line of the estimate is computed from these rates.

Top-level fields:
  name            (string, required)  Human-readable name of the table
  description     (string, optional)  What this table is for
  version         (string, required)  Version identifier (e.g., "2025.1")
  deck_materials  (object, required)  Deck material key -> cost per sq ft.
                                      Must contain at least one material.
  rail_materials  (object, optional)  Rail material key -> cost per linear ft.
  rail_infills    (object, optional)  Infill key -> cost per linear ft, added
                                      to the rail material rate. A rail
                                      without an infill uses "balusters".
  demo_cost       (string, required)  Demolition cost per sq ft removed.
  fascia_cost     (string, required)  Fascia and toe-kick cost per linear ft.
  material_labels (object, optional)  Key -> display name, used in the
                                      scope-of-work text.

Rail materials and infills missing from the table price at 0. Deck
materials missing from the table reject the estimate.

Example:
{{
  "name": "Lakeside rates",
  "version": "1.0",
  "deck_materials": {{
    "cedar": "42",
    "timberTechPrime": "50"
  }},
  "rail_materials": {{
    "aluminum": "68"
  }},
  "rail_infills": {{
    "balusters": "10",
    "glass": "58"
  }},
  "demo_cost": "5.5",
  "fascia_cost": "12",
  "material_labels": {{
    "timberTechPrime": "TimberTech Prime"
  }}
}}

Note: rates must be quoted strings, not bare numbers, to preserve exact
decimal precision (e.g., "5.5" not 5.5).
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), deckquote_core::error::QuoteError> {
    let rates = deckquote_core::rates::load_rate_table(file)?;

    println!("Rate table '{}' (v{}) is valid.", rates.name, rates.version);
    println!("  Deck materials: {}", rates.deck_materials.len());
    println!("  Rail materials: {}", rates.rail_materials.len());
    println!("  Rail infills: {}", rates.rail_infills.len());

    // Potential issues, not errors
    let mut warnings: Vec<String> = Vec::new();
    if !rates.rail_materials.is_empty() && !rates.rail_infills.contains_key("balusters") {
        warnings.push(
            "no 'balusters' infill: rails without an infill price the infill at 0".to_string(),
        );
    }
    for (section, map) in [
        ("deck_materials", &rates.deck_materials),
        ("rail_materials", &rates.rail_materials),
        ("rail_infills", &rates.rail_infills),
    ] {
        for (key, rate) in map {
            if rate.is_zero() {
                warnings.push(format!("{} '{}' has a zero rate", section, key));
            }
        }
    }
    for key in rates.material_labels.keys() {
        let known = rates.deck_materials.contains_key(key)
            || rates.rail_materials.contains_key(key)
            || rates.rail_infills.contains_key(key);
        if !known {
            warnings.push(format!("label for unknown key '{}'", key));
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
