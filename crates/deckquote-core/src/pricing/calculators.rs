//! Stand-alone line-item calculators.
//!
//! Each function prices one part of a deck from plain dimensions and rates.
//! None of them look at the rest of the project; the engine decides which
//! ones apply and in what order. Arithmetic is checked: a product or sum
//! outside the `Decimal` range rejects the request with `AmountTooLarge`.

use crate::error::QuoteError;
use crate::model::MAX_STAIR_RAIL_SIDES;
use crate::rates::schema::RateTable;
use rust_decimal::Decimal;

/// Decks at or above this height need an engineering review.
pub const HEIGHT_LIMIT: Decimal = Decimal::from_parts(20, 0, 0, false, 0);
/// Height at which the per-foot surcharge starts to apply.
pub const SURCHARGE_FROM_HEIGHT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);
/// Surcharge is counted per foot above this height.
pub const SURCHARGE_BASE_HEIGHT: Decimal = Decimal::from_parts(4, 0, 0, false, 0);
/// 1% per foot.
pub const SURCHARGE_PER_FOOT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
/// Steps per foot of rise, for a 7 inch riser.
pub const STEPS_PER_FOOT: Decimal = Decimal::from_parts(16, 0, 0, false, 1);
pub const MIN_STAIR_WIDTH: Decimal = Decimal::from_parts(3, 0, 0, false, 0);
/// Stair framing factor over flat decking. Also used for stair fascia and
/// demolition stair area.
pub const STAIR_ADJUST: Decimal = Decimal::from_parts(15, 0, 0, false, 1);
/// Stair rail factor. Differs from `STAIR_ADJUST`; keep both until product
/// confirms whether they should match.
pub const STAIR_RAIL_ADJUST: Decimal = Decimal::from_parts(14, 0, 0, false, 1);
pub const STAIR_FASCIA_SIDES: Decimal = Decimal::from_parts(2, 0, 0, false, 0);
/// Rail height used to turn rail footage into demolition area.
pub const RAIL_AREA_HEIGHT: Decimal = Decimal::from_parts(3, 0, 0, false, 0);
/// Washington combined state and local rate.
pub const SALES_TAX_RATE: Decimal = Decimal::from_parts(87, 0, 0, false, 3);
/// Infill used when a rail material is chosen without one.
pub const DEFAULT_INFILL: &str = "balusters";

/// `a * b`, or `AmountTooLarge` naming `what` when it leaves the `Decimal` range.
pub(crate) fn mul(a: Decimal, b: Decimal, what: &str) -> Result<Decimal, QuoteError> {
    a.checked_mul(b)
        .ok_or_else(|| QuoteError::AmountTooLarge(what.to_string()))
}

pub(crate) fn add(a: Decimal, b: Decimal, what: &str) -> Result<Decimal, QuoteError> {
    a.checked_add(b)
        .ok_or_else(|| QuoteError::AmountTooLarge(what.to_string()))
}

/// Three sides of the deck: two lengths and the far width. The house is the
/// fourth side.
pub fn perimeter(length: Decimal, width: Decimal) -> Result<Decimal, QuoteError> {
    add(mul(Decimal::TWO, length, "perimeter")?, width, "perimeter")
}

/// Number of steps for a given deck height, rounded up.
pub fn step_count(height: Decimal) -> Result<Decimal, QuoteError> {
    Ok(mul(height, STEPS_PER_FOOT, "step count")?.ceil())
}

/// Multiplier applied to the deck cost for tall decks.
pub fn height_multiplier(height: Decimal) -> Decimal {
    if height >= SURCHARGE_FROM_HEIGHT {
        Decimal::ONE + SURCHARGE_PER_FOOT * (height - SURCHARGE_BASE_HEIGHT)
    } else {
        Decimal::ONE
    }
}

pub fn deck_cost(
    length: Decimal,
    width: Decimal,
    height: Decimal,
    material: &str,
    rates: &RateTable,
) -> Result<Decimal, QuoteError> {
    let rate = rates
        .deck_rate(material)
        .ok_or_else(|| QuoteError::InvalidMaterial {
            material: material.to_string(),
        })?;

    if height >= HEIGHT_LIMIT {
        return Err(QuoteError::HeightExceedsLimit { height });
    }

    let area = mul(length, width, "deck area")?;
    let cost = mul(area, rate, "deck cost")?;
    mul(cost, height_multiplier(height), "deck cost")
}

/// Rail footage, the infill actually used, and the resulting cost.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RailRun {
    pub feet: Decimal,
    pub infill: String,
    pub cost: Decimal,
}

/// Price the deck rails. The stair opening is cut out of the run.
///
/// Rails are all-or-nothing: infill without a material is rejected, and a
/// material without infill gets balusters.
pub fn rail_cost(
    length: Decimal,
    width: Decimal,
    stair_width: Decimal,
    rail_material: &str,
    rail_infill: &str,
    rates: &RateTable,
) -> Result<RailRun, QuoteError> {
    if rail_material.is_empty() {
        if !rail_infill.is_empty() {
            return Err(QuoteError::InfillWithoutMaterial {
                infill: rail_infill.to_string(),
            });
        }
        return Ok(RailRun::default());
    }

    let infill = if rail_infill.is_empty() {
        DEFAULT_INFILL
    } else {
        rail_infill
    };
    let feet = (perimeter(length, width)? - stair_width).max(Decimal::ZERO);
    let rate = add(
        rates.rail_rate(rail_material),
        rates.infill_rate(infill),
        "rail rate",
    )?;
    let cost = mul(feet, rate, "rail cost")?;

    Ok(RailRun {
        feet,
        infill: infill.to_string(),
        cost,
    })
}

pub fn stair_cost(
    height: Decimal,
    stair_width: Decimal,
    material_rate: Decimal,
) -> Result<Decimal, QuoteError> {
    if stair_width.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if stair_width < MIN_STAIR_WIDTH {
        return Err(QuoteError::StairWidthTooNarrow { width: stair_width });
    }
    let area = mul(step_count(height)?, stair_width, "stair area")?;
    let cost = mul(material_rate, area, "stair cost")?;
    mul(cost, STAIR_ADJUST, "stair cost")
}

/// Price stair rails. Rail length per side follows the stair run, not the
/// rounded step count.
pub fn stair_rail_cost(
    height: Decimal,
    rail_material: &str,
    sides: u8,
    rates: &RateTable,
) -> Result<Decimal, QuoteError> {
    if rail_material.is_empty() || sides == 0 {
        return Ok(Decimal::ZERO);
    }
    let sides = Decimal::from(sides.min(MAX_STAIR_RAIL_SIDES));
    let length = mul(height, STEPS_PER_FOOT, "stair rail length")?;
    let feet = mul(sides, length, "stair rail length")?;
    let cost = mul(feet, rates.rail_rate(rail_material), "stair rail cost")?;
    mul(cost, STAIR_RAIL_ADJUST, "stair rail cost")
}

pub fn fascia_cost(
    length: Decimal,
    width: Decimal,
    fascia_rate: Decimal,
) -> Result<Decimal, QuoteError> {
    mul(perimeter(length, width)?, fascia_rate, "fascia cost")
}

/// Fascia on both stringers.
pub fn stair_fascia_cost(height: Decimal, fascia_rate: Decimal) -> Result<Decimal, QuoteError> {
    let cost = mul(step_count(height)?, fascia_rate, "stair fascia cost")?;
    mul(cost, STAIR_ADJUST * STAIR_FASCIA_SIDES, "stair fascia cost")
}

/// Fascia board across each riser.
pub fn stair_toe_kick_cost(
    height: Decimal,
    stair_width: Decimal,
    fascia_rate: Decimal,
) -> Result<Decimal, QuoteError> {
    let feet = mul(step_count(height)?, stair_width, "toe-kick length")?;
    mul(feet, fascia_rate, "toe-kick cost")
}

/// Everything that gets torn out when the old structure is removed.
#[derive(Debug, Clone, Default)]
pub struct DemolitionScope {
    pub deck_area: Decimal,
    pub rail_feet: Decimal,
    pub height: Decimal,
    pub stair_width: Decimal,
    pub has_rails: bool,
    pub has_stairs: bool,
    pub has_stair_rails: bool,
}

impl DemolitionScope {
    pub fn rail_area(&self) -> Result<Decimal, QuoteError> {
        if self.has_rails {
            mul(self.rail_feet, RAIL_AREA_HEIGHT, "rail demolition area")
        } else {
            Ok(Decimal::ZERO)
        }
    }

    pub fn stair_area(&self) -> Result<Decimal, QuoteError> {
        if self.has_stairs {
            self.stair_footprint()
        } else {
            Ok(Decimal::ZERO)
        }
    }

    pub fn stair_rail_area(&self) -> Result<Decimal, QuoteError> {
        if self.has_stair_rails {
            self.stair_footprint()
        } else {
            Ok(Decimal::ZERO)
        }
    }

    pub fn total_area(&self) -> Result<Decimal, QuoteError> {
        [self.rail_area()?, self.stair_area()?, self.stair_rail_area()?]
            .into_iter()
            .try_fold(self.deck_area, |total, area| {
                add(total, area, "demolition area")
            })
    }

    fn stair_footprint(&self) -> Result<Decimal, QuoteError> {
        let area = mul(self.height, self.stair_width, "stair demolition area")?;
        mul(area, STAIR_ADJUST, "stair demolition area")
    }
}

pub fn demo_cost(scope: &DemolitionScope, demo_rate: Decimal) -> Result<Decimal, QuoteError> {
    mul(scope.total_area()?, demo_rate, "demolition cost")
}

pub fn sales_tax(subtotal: Decimal) -> Result<Decimal, QuoteError> {
    mul(subtotal, SALES_TAX_RATE, "sales tax")
}
