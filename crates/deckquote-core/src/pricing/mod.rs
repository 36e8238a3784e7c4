pub mod calculators;
pub mod engine;
pub mod outcome;

pub use engine::{evaluate, price};
pub use outcome::{EstimateOutcome, LineItem, LineKind, PricedEstimate};
