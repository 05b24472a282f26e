//! Domain models for shared expenses and their splits.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
/// Describes how an expense's amount was divided across participants.
pub enum SplitMode {
    /// Evenly across every participant at authoring time.
    #[default]
    Equal,
    /// Caller-specified shares, validated to sum to the amount.
    Custom,
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SplitMode::Equal => "Equal",
            SplitMode::Custom => "Custom",
        };
        f.write_str(label)
    }
}

/// A shared expense paid by one person and divided across participants.
///
/// `payer` and the keys of `splits` reference [`crate::Person`] records by
/// id only; names are resolved by lookup at presentation time, so renames
/// never stale a stored expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub payer: Uuid,
    #[serde(default)]
    pub splits: HashMap<Uuid, f64>,
    #[serde(default)]
    pub split_mode: SplitMode,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        payer: Uuid,
        splits: HashMap<Uuid, f64>,
        split_mode: SplitMode,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_string(),
            amount,
            payer,
            splits,
            split_mode,
            created_at: Utc::now(),
        }
    }

    /// Sum of all shares. Must stay within a cent of `amount`.
    pub fn split_total(&self) -> f64 {
        self.splits.values().sum()
    }

    /// True when the person paid or owes a share of this expense.
    pub fn involves(&self, person_id: Uuid) -> bool {
        self.payer == person_id || self.splits.contains_key(&person_id)
    }
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Expense {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        format!("{} ({:.2}, {})", self.name, self.amount, self.split_mode)
    }
}
