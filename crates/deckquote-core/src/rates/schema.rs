use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unit costs used by every pricing calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateTable {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Deck material -> cost per square foot.
    pub deck_materials: BTreeMap<String, Decimal>,
    /// Rail material -> cost per linear foot.
    #[serde(default)]
    pub rail_materials: BTreeMap<String, Decimal>,
    /// Rail infill -> cost per linear foot, added on top of the rail material.
    #[serde(default)]
    pub rail_infills: BTreeMap<String, Decimal>,
    /// Demolition cost per square foot of removed structure.
    pub demo_cost: Decimal,
    /// Fascia cost per linear foot.
    pub fascia_cost: Decimal,
    /// Display names for material and infill keys.
    #[serde(default)]
    pub material_labels: BTreeMap<String, String>,
}

impl RateTable {
    /// Deck rate for a material, or `None` when the material is not offered.
    pub fn deck_rate(&self, material: &str) -> Option<Decimal> {
        self.deck_materials.get(material).copied()
    }

    /// Rail rate for a material. Unknown materials cost nothing.
    pub fn rail_rate(&self, material: &str) -> Decimal {
        self.rail_materials.get(material).copied().unwrap_or_else(|| {
            if !material.is_empty() {
                tracing::warn!(material, "rail material not in rate table, using 0");
            }
            Decimal::ZERO
        })
    }

    /// Infill rate. Unknown infills cost nothing.
    pub fn infill_rate(&self, infill: &str) -> Decimal {
        self.rail_infills.get(infill).copied().unwrap_or_else(|| {
            if !infill.is_empty() {
                tracing::warn!(infill, "rail infill not in rate table, using 0");
            }
            Decimal::ZERO
        })
    }

    /// Display label for a key, falling back to the key itself.
    pub fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.material_labels
            .get(key)
            .map(|s| s.as_str())
            .unwrap_or(key)
    }
}
