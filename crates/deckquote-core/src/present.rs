use crate::model::ProjectSpec;
use crate::pricing::outcome::PricedEstimate;
use crate::rates::schema::RateTable;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format a cost as dollars with thousands separators, e.g. `$13,680.00`.
pub fn format_cost(cost: Decimal) -> String {
    let rounded = cost.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (int_part, dec_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut with_commas = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(digit);
    }

    format!("{sign}${with_commas}.{dec_part}")
}

/// Scope-of-work sentence shown at the top of an estimate.
pub fn describe_deck(spec: &ProjectSpec, estimate: &PricedEstimate, rates: &RateTable) -> String {
    format!(
        "Supply and install concrete footings with premium pressure treated lumber. \
         Supply and install {:.1} sq ft of {} deck. \
         Deck size approximately {:.1} x {:.1} ft, {:.1} ft high.",
        estimate.deck_area,
        rates.label(&spec.material),
        spec.length,
        spec.width,
        spec.height
    )
}
