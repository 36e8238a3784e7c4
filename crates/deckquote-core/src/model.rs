use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maximum number of stair sides that can carry a rail.
pub const MAX_STAIR_RAIL_SIDES: u8 = 2;

/// A deck project as described by the customer, in feet.
///
/// Built fresh for every pricing request and never changed once priced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectSpec {
    /// Free-text note from the customer ("back yard, off the kitchen").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub length: Decimal,
    pub width: Decimal,
    #[serde(default)]
    pub height: Decimal,
    /// Deck material key into the rate table.
    pub material: String,
    /// Rail material key. Empty means no rails.
    #[serde(default)]
    pub rail_material: String,
    #[serde(default)]
    pub rail_infill: String,
    /// Stair width. Zero means no stairs.
    #[serde(default)]
    pub stair_width: Decimal,
    /// Number of stair sides with a rail (0, 1 or 2).
    #[serde(default)]
    pub stair_rail_count: u8,
    #[serde(default)]
    pub has_demo: bool,
    #[serde(default)]
    pub has_fascia: bool,
    #[serde(default)]
    pub has_stair_fascia: bool,
    #[serde(default)]
    pub has_stair_toe_kick: bool,
}

impl ProjectSpec {
    /// Deck surface, or `None` when it does not fit in a `Decimal`.
    pub fn deck_area(&self) -> Option<Decimal> {
        self.length.checked_mul(self.width)
    }

    pub fn has_stairs(&self) -> bool {
        self.stair_width > Decimal::ZERO
    }

    pub fn has_rails(&self) -> bool {
        !self.rail_material.is_empty()
    }

    /// Stair rail sides, clamped to what a staircase can have.
    pub fn stair_rail_sides(&self) -> u8 {
        self.stair_rail_count.min(MAX_STAIR_RAIL_SIDES)
    }
}
