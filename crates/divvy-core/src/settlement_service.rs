//! Greedy debtor-to-creditor settlement planning.

use std::cmp::Ordering;

use tracing::warn;

use divvy_domain::{money, BalanceSheet, Person, Settlement};

/// Plans a short list of transfers that zeroes out a balance sheet.
///
/// Matches the largest outstanding debt against the largest outstanding
/// credit until one side runs dry. Emits at most `debts + credits - 1`
/// transfers; a good heuristic, not a provably minimal schedule.
pub struct SettlementService;

impl SettlementService {
    /// Builds the transfer list for `sheet`, resolving ids to `people`.
    ///
    /// Entries within a cent of zero are already settled and skipped.
    /// Entries that cannot be resolved to a roster person are skipped too;
    /// the balance calculator has already flagged those ids as orphaned.
    pub fn plan(sheet: &BalanceSheet, people: &[Person]) -> Vec<Settlement> {
        let mut debts: Vec<(Person, f64)> = Vec::new();
        let mut credits: Vec<(Person, f64)> = Vec::new();

        // Walk the roster, not the map, so ties break in roster order and
        // the plan is deterministic.
        for person in people {
            let balance = sheet.balance(person.id);
            if balance < -money::CURRENCY_EPSILON {
                debts.push((person.clone(), -balance));
            } else if balance > money::CURRENCY_EPSILON {
                credits.push((person.clone(), balance));
            }
        }

        for (id, balance) in &sheet.balances {
            if !money::approx_zero(*balance) && people.iter().all(|person| person.id != *id) {
                warn!(person = %id, balance, "skipping balance entry with no roster person");
            }
        }

        debts.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        credits.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let mut settlements = Vec::new();
        let mut i = 0;
        let mut j = 0;
        while i < debts.len() && j < credits.len() {
            let transfer = debts[i].1.min(credits[j].1);
            settlements.push(Settlement {
                from: debts[i].0.clone(),
                to: credits[j].0.clone(),
                amount: money::round_to_cents(transfer),
            });

            debts[i].1 -= transfer;
            credits[j].1 -= transfer;
            if debts[i].1 < money::CURRENCY_EPSILON {
                i += 1;
            }
            if credits[j].1 < money::CURRENCY_EPSILON {
                j += 1;
            }
        }

        settlements
    }
}
