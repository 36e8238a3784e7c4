//! Save and accept lifecycle for a customer's estimate.
//!
//! The engine prices; a [`Quote`] remembers what was priced, who it is for,
//! and whether the customer has committed to it. Storage belongs to the
//! caller: this module only decides ids, dates and which transitions are
//! allowed.

use crate::error::QuoteError;
use crate::model::ProjectSpec;
use crate::pricing::engine::evaluate;
use crate::pricing::outcome::EstimateOutcome;
use crate::rates::schema::RateTable;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Estimate ids start here when nothing has been saved yet.
pub const FIRST_ESTIMATE_ID: u32 = 1000;
/// How long a saved estimate stays open for acceptance.
pub const QUOTE_VALIDITY_DAYS: i64 = 30;

/// Contact details collected on the customer page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone_number: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate_id: Option<u32>,
    pub project: ProjectSpec,
    pub outcome: EstimateOutcome,
    #[serde(default)]
    pub customer: Customer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<DateTime<Utc>>,
}

/// Next id after the highest one already in use.
pub fn next_estimate_id<I>(existing: I) -> u32
where
    I: IntoIterator<Item = u32>,
{
    existing
        .into_iter()
        .max()
        .map(|max| max.saturating_add(1))
        .unwrap_or(FIRST_ESTIMATE_ID)
        .max(FIRST_ESTIMATE_ID)
}

impl Quote {
    /// Price a project for a customer. The quote starts unsaved.
    pub fn new(project: ProjectSpec, customer: Customer, rates: &RateTable) -> Quote {
        let outcome = evaluate(&project, rates);
        Quote {
            estimate_id: None,
            project,
            outcome,
            customer,
            saved_at: None,
            expires_at: None,
            accepted_at: None,
        }
    }

    /// Replace the project and price it again. Any earlier save or
    /// acceptance no longer applies to the new numbers.
    pub fn reprice(&mut self, project: ProjectSpec, rates: &RateTable) {
        self.outcome = evaluate(&project, rates);
        self.project = project;
        self.estimate_id = None;
        self.saved_at = None;
        self.expires_at = None;
        self.accepted_at = None;
    }

    pub fn total(&self) -> Option<Decimal> {
        self.outcome.estimate().map(|e| e.total)
    }

    pub fn is_saved(&self) -> bool {
        self.saved_at.is_some()
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted_at.is_some()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires| now >= expires)
    }

    /// Save the quote under the next free estimate id and start the
    /// acceptance window.
    pub fn save<I>(&mut self, existing_ids: I, now: DateTime<Utc>) -> Result<u32, QuoteError>
    where
        I: IntoIterator<Item = u32>,
    {
        match self.total() {
            Some(total) if total > Decimal::ZERO => {}
            _ => {
                return Err(QuoteError::QuoteIncomplete(
                    "the estimate has not been priced".into(),
                ))
            }
        }
        if self.customer.first_name.trim().is_empty() {
            return Err(QuoteError::QuoteIncomplete(
                "customer first name is missing".into(),
            ));
        }

        let id = next_estimate_id(existing_ids);
        self.estimate_id = Some(id);
        self.saved_at = Some(now);
        self.expires_at = Some(now + Duration::days(QUOTE_VALIDITY_DAYS));
        self.accepted_at = None;

        tracing::info!(
            estimate_id = id,
            saved_at = %now,
            expires_at = ?self.expires_at,
            "estimate saved"
        );
        Ok(id)
    }

    /// Record the customer's acceptance of a saved, unexpired quote.
    pub fn accept(&mut self, now: DateTime<Utc>) -> Result<(), QuoteError> {
        let (Some(id), Some(expires_at)) = (self.estimate_id, self.expires_at) else {
            return Err(QuoteError::QuoteNotSaved);
        };
        if now >= expires_at {
            return Err(QuoteError::QuoteExpired {
                estimate_id: id,
                expired_on: expires_at.format("%Y-%m-%d").to_string(),
            });
        }
        self.accepted_at = Some(now);
        tracing::info!(estimate_id = id, accepted_at = %now, "estimate accepted");
        Ok(())
    }
}
