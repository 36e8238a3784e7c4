use crate::error::QuoteError;
use crate::model::ProjectSpec;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decks lower than this do not get rails from a finish preset.
pub const RAIL_MIN_HEIGHT: Decimal = Decimal::from_parts(25, 0, 0, false, 1);

/// Packaged material choices offered by the quick deck form, cheapest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishLevel {
    Economy,
    Cedar,
    Composite,
    Premium,
    Signature,
}

pub const FINISH_LEVELS: [FinishLevel; 5] = [
    FinishLevel::Economy,
    FinishLevel::Cedar,
    FinishLevel::Composite,
    FinishLevel::Premium,
    FinishLevel::Signature,
];

/// Everything a finish level decides for the customer.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishPreset {
    pub material: &'static str,
    pub rail_material: &'static str,
    pub rail_infill: &'static str,
    pub has_fascia: bool,
    pub stair_width: Decimal,
    pub stair_rail_count: u8,
    pub has_stair_fascia: bool,
    pub has_stair_toe_kick: bool,
}

impl fmt::Display for FinishLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinishLevel::Economy => write!(f, "Economy"),
            FinishLevel::Cedar => write!(f, "Cedar"),
            FinishLevel::Composite => write!(f, "Composite"),
            FinishLevel::Premium => write!(f, "Premium"),
            FinishLevel::Signature => write!(f, "Signature"),
        }
    }
}

impl FinishLevel {
    /// Parse the `finish` form value ("1" to "5").
    pub fn from_form(value: &str) -> Result<FinishLevel, QuoteError> {
        match value.trim() {
            "1" => Ok(FinishLevel::Economy),
            "2" => Ok(FinishLevel::Cedar),
            "3" => Ok(FinishLevel::Composite),
            "4" => Ok(FinishLevel::Premium),
            "5" => Ok(FinishLevel::Signature),
            other => Err(QuoteError::UnknownFinish(other.to_string())),
        }
    }

    pub fn number(self) -> u8 {
        match self {
            FinishLevel::Economy => 1,
            FinishLevel::Cedar => 2,
            FinishLevel::Composite => 3,
            FinishLevel::Premium => 4,
            FinishLevel::Signature => 5,
        }
    }

    pub fn preset(self) -> FinishPreset {
        let three = Decimal::from(3);
        let four = Decimal::from(4);
        match self {
            FinishLevel::Economy => FinishPreset {
                material: "outdoorWood",
                rail_material: "wood",
                rail_infill: "balusters",
                has_fascia: false,
                stair_width: three,
                stair_rail_count: 2,
                has_stair_fascia: false,
                has_stair_toe_kick: false,
            },
            FinishLevel::Cedar => FinishPreset {
                material: "cedar",
                rail_material: "wood",
                rail_infill: "balusters",
                has_fascia: false,
                stair_width: three,
                stair_rail_count: 2,
                has_stair_fascia: false,
                has_stair_toe_kick: false,
            },
            FinishLevel::Composite => FinishPreset {
                material: "timberTechPrime",
                rail_material: "aluminum",
                rail_infill: "balusters",
                has_fascia: false,
                stair_width: Decimal::from_parts(35, 0, 0, false, 1),
                stair_rail_count: 2,
                has_stair_fascia: false,
                has_stair_toe_kick: true,
            },
            // TODO: picture framing, joist spacing and butyl tape options
            FinishLevel::Premium => FinishPreset {
                material: "timberTechProReserve",
                rail_material: "aluminum",
                rail_infill: "cable",
                has_fascia: true,
                stair_width: four,
                stair_rail_count: 2,
                has_stair_fascia: false,
                has_stair_toe_kick: true,
            },
            FinishLevel::Signature => FinishPreset {
                material: "timberTechProLegacy",
                rail_material: "composite",
                rail_infill: "glass",
                has_fascia: true,
                stair_width: four,
                stair_rail_count: 2,
                has_stair_fascia: true,
                has_stair_toe_kick: true,
            },
        }
    }

    /// Overwrite the material and add-on choices in `spec` with this level's
    /// preset. Low decks lose their rails; stairs are dropped unless asked for.
    pub fn apply(self, spec: &mut ProjectSpec, has_stairs: bool) {
        let preset = self.preset();
        spec.material = preset.material.to_string();
        spec.rail_material = preset.rail_material.to_string();
        spec.rail_infill = preset.rail_infill.to_string();
        spec.has_fascia = preset.has_fascia;
        spec.stair_width = preset.stair_width;
        spec.stair_rail_count = preset.stair_rail_count;
        spec.has_stair_fascia = preset.has_stair_fascia;
        spec.has_stair_toe_kick = preset.has_stair_toe_kick;

        if spec.height < RAIL_MIN_HEIGHT {
            spec.rail_material.clear();
            spec.rail_infill.clear();
            spec.stair_rail_count = 0;
        }

        if !has_stairs {
            spec.stair_width = Decimal::ZERO;
            spec.stair_rail_count = 0;
            spec.has_stair_fascia = false;
            spec.has_stair_toe_kick = false;
        }

        tracing::debug!(finish = %self, has_stairs, "applied finish preset");
    }
}
