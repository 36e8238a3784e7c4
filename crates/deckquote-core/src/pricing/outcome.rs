use crate::error::QuoteError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The parts of a deck that are priced separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Deck,
    Rail,
    Stair,
    StairRail,
    Fascia,
    StairFascia,
    StairToeKick,
    Demolition,
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineKind::Deck => write!(f, "Deck"),
            LineKind::Rail => write!(f, "Rails"),
            LineKind::Stair => write!(f, "Stairs"),
            LineKind::StairRail => write!(f, "Stair rails"),
            LineKind::Fascia => write!(f, "Fascia"),
            LineKind::StairFascia => write!(f, "Stair fascia"),
            LineKind::StairToeKick => write!(f, "Stair toe-kick"),
            LineKind::Demolition => write!(f, "Demolition"),
        }
    }
}

/// One priced part of the estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub kind: LineKind,
    pub cost: Decimal,
    /// Human-readable account of how the cost was worked out.
    pub reason: String,
}

/// A fully priced deck estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedEstimate {
    /// Deck surface in square feet.
    pub deck_area: Decimal,
    /// Rail run in linear feet, after the stair opening.
    pub rail_feet: Decimal,
    /// Infill actually priced (defaulted when rails were chosen without one).
    pub rail_infill: String,
    /// Fascia run in linear feet (zero when fascia is not included).
    pub fascia_feet: Decimal,
    /// Stair steps (zero without stairs).
    pub steps: Decimal,
    pub deck_cost: Decimal,
    pub rail_cost: Decimal,
    pub stair_cost: Decimal,
    pub stair_rail_cost: Decimal,
    pub fascia_cost: Decimal,
    pub stair_fascia_cost: Decimal,
    pub stair_toe_kick_cost: Decimal,
    pub demo_cost: Decimal,
    pub subtotal: Decimal,
    pub sales_tax: Decimal,
    pub total: Decimal,
    /// Active line items, in pricing order.
    pub lines: Vec<LineItem>,
}

impl PricedEstimate {
    /// Sum of every cost line, or `None` if it overflows.
    pub fn line_total(&self) -> Option<Decimal> {
        [
            self.rail_cost,
            self.stair_cost,
            self.stair_rail_cost,
            self.fascia_cost,
            self.stair_fascia_cost,
            self.stair_toe_kick_cost,
            self.demo_cost,
        ]
        .into_iter()
        .try_fold(self.deck_cost, |total, cost| total.checked_add(cost))
    }

    pub fn line(&self, kind: LineKind) -> Option<&LineItem> {
        self.lines.iter().find(|l| l.kind == kind)
    }
}

/// Result of pricing one request: either a full estimate or the single
/// message explaining why it was rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EstimateOutcome {
    Priced(PricedEstimate),
    Rejected { error: String },
}

impl EstimateOutcome {
    pub fn estimate(&self) -> Option<&PricedEstimate> {
        match self {
            EstimateOutcome::Priced(estimate) => Some(estimate),
            EstimateOutcome::Rejected { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            EstimateOutcome::Priced(_) => None,
            EstimateOutcome::Rejected { error } => Some(error),
        }
    }

    pub fn is_priced(&self) -> bool {
        matches!(self, EstimateOutcome::Priced(_))
    }

    /// The priced estimate, or the rejection message as an error.
    pub fn ensure_priced(&self) -> Result<&PricedEstimate, QuoteError> {
        match self {
            EstimateOutcome::Priced(estimate) => Ok(estimate),
            EstimateOutcome::Rejected { error } => {
                Err(QuoteError::EstimateRejected(error.clone()))
            }
        }
    }
}
