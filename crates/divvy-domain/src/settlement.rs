//! Derived balance and settlement types.
//!
//! Both are ephemeral: recomputed from the current people/expense snapshot
//! on every read, never stored.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{money, person::Person};

/// Net position per person id, plus the ids that appeared in expense data
/// without a matching roster entry.
///
/// A positive balance means the person is owed money; negative means they
/// owe. `orphaned` is how tolerated dangling references surface to callers
/// instead of disappearing into the totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub balances: HashMap<Uuid, f64>,
    #[serde(default)]
    pub orphaned: Vec<Uuid>,
}

impl BalanceSheet {
    /// Balance for `id`, zero when untracked.
    pub fn balance(&self, id: Uuid) -> f64 {
        self.balances.get(&id).copied().unwrap_or(0.0)
    }

    /// True when every tracked balance is within a cent of zero.
    pub fn is_settled(&self) -> bool {
        self.balances.values().all(|value| money::approx_zero(*value))
    }

    /// Sum of positive balances.
    pub fn total_credit(&self) -> f64 {
        self.balances.values().filter(|value| **value > 0.0).sum()
    }

    /// Sum of negative balances, as a positive magnitude.
    pub fn total_debt(&self) -> f64 {
        -self
            .balances
            .values()
            .filter(|value| **value < 0.0)
            .sum::<f64>()
    }
}

/// A suggested one-way payment that reduces both parties' balances.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settlement {
    pub from: Person,
    pub to: Person,
    pub amount: f64,
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pays {} {:.2}", self.from.name, self.to.name, self.amount)
    }
}
