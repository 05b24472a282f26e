//! Derives net balances from a people/expense snapshot.

use std::collections::{HashMap, HashSet};

use tracing::warn;
use uuid::Uuid;

use divvy_domain::{BalanceSheet, Expense, Person};

/// Computes each person's signed net position.
///
/// Pure function of its arguments: reads the snapshot, allocates a fresh
/// [`BalanceSheet`], holds no state across calls.
pub struct BalanceService;

impl BalanceService {
    /// Credits every payer with the full expense amount, then debits each
    /// split participant by their share. Accumulation is commutative, so
    /// expense order never changes the final sums.
    ///
    /// Ids that appear as payer or split key without a roster entry still
    /// accumulate a balance, and are reported through
    /// [`BalanceSheet::orphaned`] so callers can flag them.
    pub fn calculate(people: &[Person], expenses: &[Expense]) -> BalanceSheet {
        let roster: HashSet<Uuid> = people.iter().map(|person| person.id).collect();
        let mut balances: HashMap<Uuid, f64> = HashMap::with_capacity(people.len());
        for person in people {
            balances.insert(person.id, 0.0);
        }

        let mut orphaned: Vec<Uuid> = Vec::new();
        for expense in expenses {
            if !roster.contains(&expense.payer) {
                flag_orphan(&mut orphaned, expense.payer, expense.id);
            }
            *balances.entry(expense.payer).or_insert(0.0) += expense.amount;

            for (&person_id, &share) in &expense.splits {
                if !roster.contains(&person_id) {
                    flag_orphan(&mut orphaned, person_id, expense.id);
                }
                *balances.entry(person_id).or_insert(0.0) -= share;
            }
        }

        // Split maps iterate in hash order; sort so callers see a stable list.
        orphaned.sort();
        BalanceSheet { balances, orphaned }
    }
}

fn flag_orphan(orphaned: &mut Vec<Uuid>, person: Uuid, expense: Uuid) {
    if !orphaned.contains(&person) {
        warn!(
            person = %person,
            expense = %expense,
            "expense references a person missing from the roster"
        );
        orphaned.push(person);
    }
}
