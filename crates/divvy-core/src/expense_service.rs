//! Validated mutations and queries for shared expenses.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::split_service::SplitService;
use divvy_domain::{Expense, Group, SplitMode};

/// Caller-supplied fields for creating or updating an expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub name: String,
    pub amount: f64,
    pub payer: Uuid,
    pub splits: HashMap<Uuid, f64>,
    pub split_mode: SplitMode,
}

/// Provides validated mutations for [`Expense`] entries in a [`Group`].
///
/// Every write path runs the full precondition check, so the balance and
/// settlement calculators only ever see expenses whose payer and split keys
/// resolve and whose shares sum to the amount.
pub struct ExpenseService;

impl ExpenseService {
    /// Validates `draft` and appends it as a new expense.
    pub fn add(group: &mut Group, draft: ExpenseDraft) -> CoreResult<Uuid> {
        Self::validate(group, &draft)?;
        let expense = Expense::new(
            draft.name,
            draft.amount,
            draft.payer,
            draft.splits,
            draft.split_mode,
        );
        let id = group.add_expense(expense);
        debug!(expense = %id, "expense added");
        Ok(id)
    }

    /// Validates `draft` and overwrites the expense's fields in place. The
    /// id and creation timestamp are preserved.
    pub fn update(group: &mut Group, id: Uuid, draft: ExpenseDraft) -> CoreResult<()> {
        Self::validate(group, &draft)?;
        let expense = group
            .expense_mut(id)
            .ok_or(CoreError::ExpenseNotFound(id))?;
        expense.name = draft.name.trim().to_string();
        expense.amount = draft.amount;
        expense.payer = draft.payer;
        expense.splits = draft.splits;
        expense.split_mode = draft.split_mode;
        group.touch();
        debug!(expense = %id, "expense updated");
        Ok(())
    }

    /// Removes an expense by id.
    pub fn remove(group: &mut Group, id: Uuid) -> CoreResult<()> {
        let before = group.expenses.len();
        group.expenses.retain(|expense| expense.id != id);
        if group.expenses.len() == before {
            return Err(CoreError::ExpenseNotFound(id));
        }
        group.touch();
        debug!(expense = %id, "expense removed");
        Ok(())
    }

    /// Sum of all expense amounts in the group.
    pub fn total(group: &Group) -> f64 {
        group.expenses.iter().map(|expense| expense.amount).sum()
    }

    /// Expenses paid by `person_id`, in insertion order.
    pub fn paid_by(group: &Group, person_id: Uuid) -> Vec<&Expense> {
        group
            .expenses
            .iter()
            .filter(|expense| expense.payer == person_id)
            .collect()
    }

    fn validate(group: &Group, draft: &ExpenseDraft) -> CoreResult<()> {
        if group.people.is_empty() {
            return Err(CoreError::InvalidInput(
                "cannot add an expense to a group without people".into(),
            ));
        }
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(CoreError::InvalidInput("expense name cannot be empty".into()));
        }
        if draft.amount <= 0.0 {
            return Err(CoreError::InvalidInput(
                "expense amount must be positive".into(),
            ));
        }
        if group.person(draft.payer).is_none() {
            return Err(CoreError::DanglingReference {
                expense: name.to_string(),
                person: draft.payer,
            });
        }
        for &person_id in draft.splits.keys() {
            if group.person(person_id).is_none() {
                return Err(CoreError::DanglingReference {
                    expense: name.to_string(),
                    person: person_id,
                });
            }
        }
        SplitService::validate(draft.amount, &draft.splits)
    }
}
