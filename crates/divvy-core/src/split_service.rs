//! Share computation and validation for expense authoring.

use std::collections::HashMap;

use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use divvy_domain::{money, Person};

/// Produces and validates split mappings before an expense is committed.
pub struct SplitService;

impl SplitService {
    /// Divides `amount` evenly across the roster, one entry per person.
    ///
    /// Shares are left unrounded; a 10.00 bill over three people yields
    /// three shares of 3.3333… that still sum to the amount. Fails instead
    /// of dividing by zero when the roster is empty.
    pub fn equal_split(amount: f64, people: &[Person]) -> CoreResult<HashMap<Uuid, f64>> {
        if people.is_empty() {
            return Err(CoreError::InvalidInput(
                "cannot split across an empty roster".into(),
            ));
        }
        if amount <= 0.0 {
            return Err(CoreError::InvalidInput(
                "split amount must be positive".into(),
            ));
        }
        let share = amount / people.len() as f64;
        Ok(people.iter().map(|person| (person.id, share)).collect())
    }

    /// Checks that custom shares add up to the expense amount, within a
    /// cent.
    pub fn validate(amount: f64, splits: &HashMap<Uuid, f64>) -> CoreResult<()> {
        let actual: f64 = splits.values().sum();
        if money::approx_eq(actual, amount) {
            Ok(())
        } else {
            Err(CoreError::SplitMismatch {
                expected: amount,
                actual,
            })
        }
    }
}
