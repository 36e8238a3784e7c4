pub mod error;
pub mod intake;
pub mod model;
pub mod present;
pub mod pricing;
pub mod quote;
pub mod rates;

use error::QuoteError;
use model::ProjectSpec;
use pricing::outcome::{EstimateOutcome, PricedEstimate};
use rates::schema::RateTable;

/// Main API entry point: price a deck project against a rate table.
///
/// Validation runs in a fixed order (dimensions, deck, stairs, rails) and
/// the first failure is returned. Add-ons never fail.
pub fn price_project(
    spec: &ProjectSpec,
    rates: &RateTable,
) -> Result<PricedEstimate, QuoteError> {
    pricing::price(spec, rates)
}

/// Price a project and fold any failure into a rejected outcome, the way
/// the estimate page shows it.
pub fn evaluate_project(spec: &ProjectSpec, rates: &RateTable) -> EstimateOutcome {
    pricing::evaluate(spec, rates)
}
