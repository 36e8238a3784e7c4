use crate::error::QuoteError;
use crate::model::ProjectSpec;
use crate::pricing::calculators::{self, DemolitionScope, RailRun};
use crate::pricing::outcome::{EstimateOutcome, LineItem, LineKind, PricedEstimate};
use crate::rates::schema::RateTable;
use rust_decimal::Decimal;

pub(crate) const LENGTH_MESSAGE: &str = "Deck Length must be a positive number";
pub(crate) const WIDTH_MESSAGE: &str = "Deck Width must be a positive number";
pub(crate) const HEIGHT_MESSAGE: &str = "Deck Height must be a non-negative number";
pub(crate) const STAIR_WIDTH_MESSAGE: &str = "Stair Width must be a non-negative number";

/// Price a project, stopping at the first calculator that rejects it.
pub fn price(spec: &ProjectSpec, rates: &RateTable) -> Result<PricedEstimate, QuoteError> {
    validate_dimensions(spec)?;

    let deck_cost = calculators::deck_cost(
        spec.length,
        spec.width,
        spec.height,
        &spec.material,
        rates,
    )?;
    let deck_area = spec
        .deck_area()
        .ok_or_else(|| QuoteError::AmountTooLarge("deck area".into()))?;
    tracing::debug!(%deck_cost, material = %spec.material, "priced deck");

    // deck_cost already rejected unknown materials
    let material_rate = rates.deck_rate(&spec.material).unwrap_or(Decimal::ZERO);
    let stair_cost = calculators::stair_cost(spec.height, spec.stair_width, material_rate)?;
    tracing::debug!(%stair_cost, stair_width = %spec.stair_width, "priced stairs");

    let rail = calculators::rail_cost(
        spec.length,
        spec.width,
        spec.stair_width,
        &spec.rail_material,
        &spec.rail_infill,
        rates,
    )?;
    tracing::debug!(rail_cost = %rail.cost, rail_feet = %rail.feet, "priced rails");

    let has_stairs = spec.has_stairs();
    let steps = if has_stairs {
        calculators::step_count(spec.height)?
    } else {
        Decimal::ZERO
    };

    let stair_rail_cost = if has_stairs {
        calculators::stair_rail_cost(
            spec.height,
            &spec.rail_material,
            spec.stair_rail_sides(),
            rates,
        )?
    } else {
        Decimal::ZERO
    };

    let stair_fascia_cost = if has_stairs && spec.has_stair_fascia {
        calculators::stair_fascia_cost(spec.height, rates.fascia_cost)?
    } else {
        Decimal::ZERO
    };

    let stair_toe_kick_cost = if has_stairs && spec.has_stair_toe_kick {
        calculators::stair_toe_kick_cost(spec.height, spec.stair_width, rates.fascia_cost)?
    } else {
        Decimal::ZERO
    };

    let (fascia_feet, fascia_cost) = if spec.has_fascia {
        (
            calculators::perimeter(spec.length, spec.width)?,
            calculators::fascia_cost(spec.length, spec.width, rates.fascia_cost)?,
        )
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    let demolition = DemolitionScope {
        deck_area,
        rail_feet: rail.feet,
        height: spec.height,
        stair_width: spec.stair_width,
        has_rails: rail.cost > Decimal::ZERO,
        has_stairs: stair_cost > Decimal::ZERO,
        has_stair_rails: stair_rail_cost > Decimal::ZERO,
    };
    let demo_cost = if spec.has_demo {
        calculators::demo_cost(&demolition, rates.demo_cost)?
    } else {
        Decimal::ZERO
    };

    let mut estimate = PricedEstimate {
        deck_area,
        rail_feet: rail.feet,
        rail_infill: rail.infill.clone(),
        fascia_feet,
        steps,
        deck_cost,
        rail_cost: rail.cost,
        stair_cost,
        stair_rail_cost,
        fascia_cost,
        stair_fascia_cost,
        stair_toe_kick_cost,
        demo_cost,
        subtotal: Decimal::ZERO,
        sales_tax: Decimal::ZERO,
        total: Decimal::ZERO,
        lines: Vec::new(),
    };

    estimate.subtotal = estimate
        .line_total()
        .ok_or_else(|| QuoteError::AmountTooLarge("subtotal".into()))?;
    estimate.sales_tax = calculators::sales_tax(estimate.subtotal)?;
    estimate.total = calculators::add(estimate.subtotal, estimate.sales_tax, "total")?;
    estimate.lines = build_lines(spec, rates, &estimate, &rail, &demolition)?;

    Ok(estimate)
}

/// Price a project and fold any rejection into a single message.
pub fn evaluate(spec: &ProjectSpec, rates: &RateTable) -> EstimateOutcome {
    match price(spec, rates) {
        Ok(estimate) => {
            tracing::info!(
                subtotal = %estimate.subtotal,
                total = %estimate.total,
                lines = estimate.lines.len(),
                "estimate priced"
            );
            EstimateOutcome::Priced(estimate)
        }
        Err(e) => {
            tracing::info!(error = %e, "estimate rejected");
            EstimateOutcome::Rejected {
                error: e.to_string(),
            }
        }
    }
}

fn validate_dimensions(spec: &ProjectSpec) -> Result<(), QuoteError> {
    if spec.length <= Decimal::ZERO {
        return Err(QuoteError::InvalidDimension(LENGTH_MESSAGE.into()));
    }
    if spec.width <= Decimal::ZERO {
        return Err(QuoteError::InvalidDimension(WIDTH_MESSAGE.into()));
    }
    if spec.height < Decimal::ZERO {
        return Err(QuoteError::InvalidDimension(HEIGHT_MESSAGE.into()));
    }
    if spec.stair_width < Decimal::ZERO {
        return Err(QuoteError::InvalidDimension(STAIR_WIDTH_MESSAGE.into()));
    }
    Ok(())
}

/// Build the per-line explanations for every part that applies.
fn build_lines(
    spec: &ProjectSpec,
    rates: &RateTable,
    estimate: &PricedEstimate,
    rail: &RailRun,
    demolition: &DemolitionScope,
) -> Result<Vec<LineItem>, QuoteError> {
    let mut lines = Vec::new();
    let fascia_rate = rates.fascia_cost.normalize();

    let deck_rate = rates.deck_rate(&spec.material).unwrap_or(Decimal::ZERO);
    let multiplier = calculators::height_multiplier(spec.height);
    let deck_reason = if multiplier > Decimal::ONE {
        format!(
            "{} sq ft x ${}/sq ft {} x {} height surcharge ({} ft high)",
            estimate.deck_area.normalize(),
            deck_rate.normalize(),
            spec.material,
            multiplier.normalize(),
            spec.height.normalize()
        )
    } else {
        format!(
            "{} sq ft x ${}/sq ft {}",
            estimate.deck_area.normalize(),
            deck_rate.normalize(),
            spec.material
        )
    };
    lines.push(LineItem {
        kind: LineKind::Deck,
        cost: estimate.deck_cost,
        reason: deck_reason,
    });

    if spec.has_rails() {
        let opening = if spec.has_stairs() {
            format!(" - {} ft stair opening", spec.stair_width.normalize())
        } else {
            String::new()
        };
        lines.push(LineItem {
            kind: LineKind::Rail,
            cost: estimate.rail_cost,
            reason: format!(
                "{} ft (2 x {} + {}{}) x (${} {} + ${} {})/ft",
                rail.feet.normalize(),
                spec.length.normalize(),
                spec.width.normalize(),
                opening,
                rates.rail_rate(&spec.rail_material).normalize(),
                spec.rail_material,
                rates.infill_rate(&rail.infill).normalize(),
                rail.infill
            ),
        });
    }

    if spec.has_stairs() {
        lines.push(LineItem {
            kind: LineKind::Stair,
            cost: estimate.stair_cost,
            reason: format!(
                "{} steps x {} ft wide x ${}/sq ft x {} stair framing",
                estimate.steps.normalize(),
                spec.stair_width.normalize(),
                deck_rate.normalize(),
                calculators::STAIR_ADJUST
            ),
        });

        let sides = spec.stair_rail_sides();
        if spec.has_rails() && sides > 0 {
            lines.push(LineItem {
                kind: LineKind::StairRail,
                cost: estimate.stair_rail_cost,
                reason: format!(
                    "{} side(s) x {} ft x ${}/ft {} x {} stair rail",
                    sides,
                    (spec.height * calculators::STEPS_PER_FOOT).normalize(),
                    rates.rail_rate(&spec.rail_material).normalize(),
                    spec.rail_material,
                    calculators::STAIR_RAIL_ADJUST
                ),
            });
        }

        if spec.has_stair_fascia {
            lines.push(LineItem {
                kind: LineKind::StairFascia,
                cost: estimate.stair_fascia_cost,
                reason: format!(
                    "{} steps x ${}/ft x {} x {} sides",
                    estimate.steps.normalize(),
                    fascia_rate,
                    calculators::STAIR_ADJUST,
                    calculators::STAIR_FASCIA_SIDES
                ),
            });
        }

        if spec.has_stair_toe_kick {
            lines.push(LineItem {
                kind: LineKind::StairToeKick,
                cost: estimate.stair_toe_kick_cost,
                reason: format!(
                    "{} risers x {} ft x ${}/ft",
                    estimate.steps.normalize(),
                    spec.stair_width.normalize(),
                    fascia_rate
                ),
            });
        }
    }

    if spec.has_fascia {
        lines.push(LineItem {
            kind: LineKind::Fascia,
            cost: estimate.fascia_cost,
            reason: format!(
                "{} ft x ${}/ft",
                estimate.fascia_feet.normalize(),
                fascia_rate
            ),
        });
    }

    if spec.has_demo {
        lines.push(LineItem {
            kind: LineKind::Demolition,
            cost: estimate.demo_cost,
            reason: format!(
                "{} sq ft removed (deck {}, rails {}, stairs {}, stair rails {}) x ${}/sq ft",
                demolition.total_area()?.normalize(),
                demolition.deck_area.normalize(),
                demolition.rail_area()?.normalize(),
                demolition.stair_area()?.normalize(),
                demolition.stair_rail_area()?.normalize(),
                rates.demo_cost.normalize()
            ),
        });
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn make_rates() -> RateTable {
        RateTable {
            name: "Test".into(),
            description: None,
            version: "1.0".into(),
            deck_materials: BTreeMap::from([("cedar".into(), dec!(40))]),
            rail_materials: BTreeMap::from([("wood".into(), dec!(35))]),
            rail_infills: BTreeMap::from([("balusters".into(), dec!(10))]),
            demo_cost: dec!(5),
            fascia_cost: dec!(12),
            material_labels: BTreeMap::new(),
        }
    }

    fn base_spec() -> ProjectSpec {
        ProjectSpec {
            length: dec!(20),
            width: dec!(12),
            height: dec!(3),
            material: "cedar".into(),
            ..Default::default()
        }
    }

    fn full_spec() -> ProjectSpec {
        ProjectSpec {
            rail_material: "wood".into(),
            stair_width: dec!(4),
            stair_rail_count: 2,
            has_demo: true,
            has_fascia: true,
            has_stair_fascia: true,
            has_stair_toe_kick: true,
            ..base_spec()
        }
    }

    #[test]
    fn test_plain_deck() {
        let est = price(&base_spec(), &make_rates()).unwrap();
        assert_eq!(est.deck_cost, dec!(9600));
        assert_eq!(est.subtotal, dec!(9600));
        assert_eq!(est.sales_tax, dec!(835.20));
        assert_eq!(est.total, dec!(10435.20));
        assert_eq!(est.lines.len(), 1);
    }

    #[test]
    fn test_deck_with_stairs() {
        let spec = ProjectSpec {
            stair_width: dec!(4),
            ..base_spec()
        };
        let est = price(&spec, &make_rates()).unwrap();
        assert_eq!(est.steps, dec!(5));
        assert_eq!(est.stair_cost, dec!(1200));
        assert_eq!(est.subtotal, dec!(10800));
    }

    #[test]
    fn test_every_line_item() {
        let est = price(&full_spec(), &make_rates()).unwrap();
        assert_eq!(est.deck_cost, dec!(9600));
        assert_eq!(est.rail_feet, dec!(48));
        assert_eq!(est.rail_cost, dec!(2160));
        assert_eq!(est.stair_cost, dec!(1200));
        assert_eq!(est.stair_rail_cost, dec!(470.4));
        assert_eq!(est.fascia_feet, dec!(52));
        assert_eq!(est.fascia_cost, dec!(624));
        assert_eq!(est.stair_fascia_cost, dec!(180));
        assert_eq!(est.stair_toe_kick_cost, dec!(240));
        assert_eq!(est.demo_cost, dec!(2100));
        assert_eq!(Some(est.subtotal), est.line_total());
        assert_eq!(est.subtotal, dec!(16574.4));
        assert_eq!(est.lines.len(), 8);
        let line_sum: Decimal = est.lines.iter().map(|l| l.cost).sum();
        assert_eq!(line_sum, est.subtotal);
    }

    #[test]
    fn test_no_stairs_zeroes_stair_lines() {
        let spec = ProjectSpec {
            stair_width: Decimal::ZERO,
            ..full_spec()
        };
        let est = price(&spec, &make_rates()).unwrap();
        assert_eq!(est.stair_cost, Decimal::ZERO);
        assert_eq!(est.stair_rail_cost, Decimal::ZERO);
        assert_eq!(est.stair_fascia_cost, Decimal::ZERO);
        assert_eq!(est.stair_toe_kick_cost, Decimal::ZERO);
        assert_eq!(est.steps, Decimal::ZERO);
        assert!(est.line(LineKind::Stair).is_none());
    }

    #[test]
    fn test_no_rail_material_zeroes_rail_lines() {
        let spec = ProjectSpec {
            rail_material: String::new(),
            ..full_spec()
        };
        let est = price(&spec, &make_rates()).unwrap();
        assert_eq!(est.rail_cost, Decimal::ZERO);
        assert_eq!(est.stair_rail_cost, Decimal::ZERO);
        assert_eq!(est.rail_feet, Decimal::ZERO);
        assert!(est.line(LineKind::Rail).is_none());
    }

    #[test]
    fn test_first_failure_wins() {
        // Both the material and the stair width are bad; the deck goes first.
        let spec = ProjectSpec {
            material: "teak".into(),
            stair_width: dec!(2),
            ..base_spec()
        };
        assert!(matches!(
            price(&spec, &make_rates()),
            Err(QuoteError::InvalidMaterial { .. })
        ));

        // Narrow stairs are reported before rail problems.
        let spec = ProjectSpec {
            stair_width: dec!(2),
            rail_infill: "balusters".into(),
            ..base_spec()
        };
        assert!(matches!(
            price(&spec, &make_rates()),
            Err(QuoteError::StairWidthTooNarrow { .. })
        ));
    }

    #[test]
    fn test_dimension_validation() {
        let spec = ProjectSpec {
            length: Decimal::ZERO,
            ..base_spec()
        };
        let err = price(&spec, &make_rates()).unwrap_err();
        assert_eq!(err.to_string(), LENGTH_MESSAGE);

        let spec = ProjectSpec {
            height: dec!(-1),
            ..base_spec()
        };
        let err = price(&spec, &make_rates()).unwrap_err();
        assert_eq!(err.to_string(), HEIGHT_MESSAGE);
    }

    #[test]
    fn test_evaluate_rejection_carries_only_message() {
        let spec = ProjectSpec {
            height: dec!(20),
            ..base_spec()
        };
        let outcome = evaluate(&spec, &make_rates());
        assert!(!outcome.is_priced());
        assert!(outcome.estimate().is_none());
        assert!(outcome.error().unwrap().contains("20 feet"));
    }

    #[test]
    fn test_pricing_is_repeatable() {
        let rates = make_rates();
        let spec = full_spec();
        assert_eq!(evaluate(&spec, &rates), evaluate(&spec, &rates));
    }

    #[test]
    fn test_out_of_range_dimensions_rejected() {
        let spec = ProjectSpec {
            length: dec!(100000000000000000000),
            width: dec!(10000000000),
            ..base_spec()
        };
        let outcome = evaluate(&spec, &make_rates());
        assert!(!outcome.is_priced());
        assert!(outcome.error().unwrap().contains("deck area is too large"));
    }

    #[test]
    fn test_out_of_range_add_on_rejected() {
        // The deck itself fits; the demolition area pushes past the range.
        let spec = ProjectSpec {
            length: dec!(10000000000000),
            width: dec!(10000000000000),
            height: Decimal::ZERO,
            has_demo: true,
            ..base_spec()
        };
        let rates = RateTable {
            deck_materials: BTreeMap::from([("cedar".into(), dec!(1))]),
            demo_cost: dec!(100000000000000),
            ..make_rates()
        };
        assert!(matches!(
            price(&spec, &rates),
            Err(QuoteError::AmountTooLarge(ref what)) if what == "demolition cost"
        ));
    }

    #[test]
    fn test_reasons_describe_formulas() {
        let est = price(&full_spec(), &make_rates()).unwrap();
        let rail = est.line(LineKind::Rail).unwrap();
        assert!(rail.reason.contains("48 ft"));
        assert!(rail.reason.contains("stair opening"));
        let stair_rail = est.line(LineKind::StairRail).unwrap();
        assert!(stair_rail.reason.contains("1.4"));
    }
}
