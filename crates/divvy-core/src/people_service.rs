//! Validated mutations for the people roster.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use divvy_domain::{Group, Person, SplitMode};

/// Strategy applied when removing a person still referenced by expenses.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum RemovalPolicy {
    /// Refuse the removal while any expense references the person.
    #[default]
    Reject,
    /// Drop expenses the person paid, hand their remaining shares to the
    /// other participants, and re-divide equal-mode expenses.
    Cascade,
    /// Remove the person only. Their references stay behind and surface as
    /// orphaned entries on the next balance calculation.
    Detach,
}

/// Provides validated mutations for [`Person`] entries in a [`Group`].
pub struct PeopleService;

impl PeopleService {
    /// Adds a person after validating the name, then re-divides every
    /// equal-mode expense across the enlarged roster. Custom splits are
    /// left untouched.
    pub fn add(group: &mut Group, name: &str) -> CoreResult<Uuid> {
        let trimmed = name.trim();
        Self::validate_name(group, None, trimmed)?;
        let id = group.add_person(Person::new(trimmed));
        redistribute_equal_splits(group);
        debug!(person = %id, "person added");
        Ok(id)
    }

    /// Renames a person in place. Expenses keep referencing the same id, so
    /// nothing else changes.
    pub fn rename(group: &mut Group, id: Uuid, name: &str) -> CoreResult<()> {
        let trimmed = name.trim();
        Self::validate_name(group, Some(id), trimmed)?;
        let person = group
            .person_mut(id)
            .ok_or(CoreError::PersonNotFound(id))?;
        person.name = trimmed.to_string();
        group.touch();
        Ok(())
    }

    /// Removes a person according to `policy`.
    pub fn remove(group: &mut Group, id: Uuid, policy: RemovalPolicy) -> CoreResult<()> {
        if group.person(id).is_none() {
            return Err(CoreError::PersonNotFound(id));
        }

        match policy {
            RemovalPolicy::Reject => {
                if group.expenses.iter().any(|expense| expense.involves(id)) {
                    return Err(CoreError::PersonInUse(id));
                }
                group.people.retain(|person| person.id != id);
            }
            RemovalPolicy::Cascade => {
                group.people.retain(|person| person.id != id);
                if group.people.is_empty() {
                    group.expenses.clear();
                } else {
                    group.expenses.retain(|expense| expense.payer != id);
                    reassign_shares(group, id);
                    redistribute_equal_splits(group);
                }
            }
            RemovalPolicy::Detach => {
                group.people.retain(|person| person.id != id);
            }
        }

        group.touch();
        debug!(person = %id, ?policy, "person removed");
        Ok(())
    }

    fn validate_name(group: &Group, exclude: Option<Uuid>, candidate: &str) -> CoreResult<()> {
        if candidate.is_empty() {
            return Err(CoreError::InvalidInput("person name cannot be empty".into()));
        }
        let normalized = candidate.to_lowercase();
        let duplicate = group.people.iter().any(|person| {
            person.name.to_lowercase() == normalized && exclude != Some(person.id)
        });
        if duplicate {
            Err(CoreError::InvalidInput(format!(
                "person `{candidate}` already exists"
            )))
        } else {
            Ok(())
        }
    }
}

/// Re-divides every equal-mode expense across the current roster.
fn redistribute_equal_splits(group: &mut Group) {
    if group.people.is_empty() {
        return;
    }
    let roster: Vec<Uuid> = group.people.iter().map(|person| person.id).collect();
    for expense in &mut group.expenses {
        if expense.split_mode != SplitMode::Equal {
            continue;
        }
        let share = expense.amount / roster.len() as f64;
        expense.splits = roster.iter().map(|&id| (id, share)).collect();
    }
}

/// Hands a removed person's custom shares to the expense's remaining
/// participants, keeping each split total equal to its amount. An expense
/// left with no participants falls back to an equal division of the roster.
fn reassign_shares(group: &mut Group, removed: Uuid) {
    let roster: Vec<Uuid> = group.people.iter().map(|person| person.id).collect();
    for expense in &mut group.expenses {
        let Some(share) = expense.splits.remove(&removed) else {
            continue;
        };
        if expense.split_mode == SplitMode::Equal {
            continue; // re-divided wholesale afterwards
        }
        if expense.splits.is_empty() {
            let fallback = expense.amount / roster.len() as f64;
            expense.splits = roster.iter().map(|&id| (id, fallback)).collect();
            continue;
        }
        let top_up = share / expense.splits.len() as f64;
        for value in expense.splits.values_mut() {
            *value += top_up;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use divvy_domain::{money, Expense};

    use super::*;
    use crate::balance_service::BalanceService;

    fn group_of(names: &[&str]) -> Group {
        let mut group = Group::new("Trip");
        for name in names {
            PeopleService::add(&mut group, name).expect("add person");
        }
        group
    }

    fn push_equal_expense(group: &mut Group, name: &str, amount: f64, payer: Uuid) {
        let share = amount / group.people.len() as f64;
        let splits = group.people.iter().map(|p| (p.id, share)).collect();
        group.add_expense(Expense::new(name, amount, payer, splits, SplitMode::Equal));
    }

    #[test]
    fn add_rejects_blank_and_duplicate_names() {
        let mut group = group_of(&["Alice"]);

        let blank = PeopleService::add(&mut group, "   ").expect_err("blank must fail");
        assert!(matches!(blank, CoreError::InvalidInput(_)));

        let dup = PeopleService::add(&mut group, "alice").expect_err("duplicate must fail");
        assert!(
            matches!(dup, CoreError::InvalidInput(ref message) if message.contains("already exists")),
            "unexpected error: {dup:?}"
        );
    }

    #[test]
    fn add_re_divides_equal_expenses_across_new_roster() {
        let mut group = group_of(&["Alice", "Bob"]);
        let payer = group.people[0].id;
        push_equal_expense(&mut group, "Dinner", 90.0, payer);

        let cara = PeopleService::add(&mut group, "Cara").expect("add person");

        let expense = &group.expenses[0];
        assert_eq!(expense.splits.len(), 3);
        assert!(money::approx_eq(expense.splits[&cara], 30.0));
        assert!(money::approx_eq(expense.split_total(), 90.0));
    }

    #[test]
    fn add_leaves_custom_splits_untouched() {
        let mut group = group_of(&["Alice", "Bob"]);
        let (alice, bob) = (group.people[0].id, group.people[1].id);
        let splits = HashMap::from([(alice, 70.0), (bob, 30.0)]);
        group.add_expense(Expense::new("Gift", 100.0, alice, splits, SplitMode::Custom));

        PeopleService::add(&mut group, "Cara").expect("add person");

        let expense = &group.expenses[0];
        assert_eq!(expense.splits.len(), 2);
        assert_eq!(expense.splits[&alice], 70.0);
    }

    #[test]
    fn rename_updates_in_place() {
        let mut group = group_of(&["Alice"]);
        let id = group.people[0].id;

        PeopleService::rename(&mut group, id, "  Alicia ").expect("rename succeeds");

        assert_eq!(group.person(id).expect("person exists").name, "Alicia");
    }

    #[test]
    fn rename_unknown_person_fails() {
        let mut group = group_of(&["Alice"]);
        let err = PeopleService::rename(&mut group, Uuid::new_v4(), "Nobody")
            .expect_err("unknown id must fail");
        assert!(matches!(err, CoreError::PersonNotFound(_)));
    }

    #[test]
    fn reject_policy_blocks_removal_while_referenced() {
        let mut group = group_of(&["Alice", "Bob"]);
        let bob = group.people[1].id;
        let payer = group.people[0].id;
        push_equal_expense(&mut group, "Dinner", 40.0, payer);

        let err = PeopleService::remove(&mut group, bob, RemovalPolicy::Reject)
            .expect_err("referenced person must not be removable");
        assert!(matches!(err, CoreError::PersonInUse(id) if id == bob));
        assert_eq!(group.people.len(), 2);
    }

    #[test]
    fn reject_policy_removes_unreferenced_person() {
        let mut group = group_of(&["Alice", "Bob"]);
        let bob = group.people[1].id;

        PeopleService::remove(&mut group, bob, RemovalPolicy::Reject).expect("removal succeeds");

        assert_eq!(group.people.len(), 1);
        assert!(group.person(bob).is_none());
    }

    #[test]
    fn cascade_drops_paid_expenses_and_re_divides_the_rest() {
        let mut group = group_of(&["Alice", "Bob", "Cara"]);
        let (alice, bob) = (group.people[0].id, group.people[1].id);
        push_equal_expense(&mut group, "Dinner", 90.0, alice);
        push_equal_expense(&mut group, "Taxi", 30.0, bob);

        PeopleService::remove(&mut group, bob, RemovalPolicy::Cascade).expect("removal succeeds");

        assert_eq!(group.expenses.len(), 1, "Bob's expense is dropped");
        let dinner = &group.expenses[0];
        assert_eq!(dinner.splits.len(), 2);
        assert!(money::approx_eq(dinner.splits[&alice], 45.0));
        assert!(money::approx_eq(dinner.split_total(), 90.0));
    }

    #[test]
    fn cascade_hands_custom_shares_to_remaining_participants() {
        let mut group = group_of(&["Alice", "Bob", "Cara"]);
        let (alice, bob, cara) = (
            group.people[0].id,
            group.people[1].id,
            group.people[2].id,
        );
        let splits = HashMap::from([(alice, 50.0), (bob, 30.0), (cara, 20.0)]);
        group.add_expense(Expense::new("Hotel", 100.0, alice, splits, SplitMode::Custom));

        PeopleService::remove(&mut group, bob, RemovalPolicy::Cascade).expect("removal succeeds");

        let hotel = &group.expenses[0];
        assert!(money::approx_eq(hotel.splits[&alice], 65.0));
        assert!(money::approx_eq(hotel.splits[&cara], 35.0));
        assert!(money::approx_eq(hotel.split_total(), 100.0));
    }

    #[test]
    fn cascade_clears_expenses_when_roster_empties() {
        let mut group = group_of(&["Alice"]);
        let alice = group.people[0].id;
        push_equal_expense(&mut group, "Solo", 10.0, alice);

        PeopleService::remove(&mut group, alice, RemovalPolicy::Cascade).expect("removal succeeds");

        assert!(group.people.is_empty());
        assert!(group.expenses.is_empty());
    }

    #[test]
    fn detach_leaves_references_to_surface_as_orphans() {
        let mut group = group_of(&["Alice", "Bob"]);
        let bob = group.people[1].id;
        let payer = group.people[0].id;
        push_equal_expense(&mut group, "Dinner", 40.0, payer);

        PeopleService::remove(&mut group, bob, RemovalPolicy::Detach).expect("removal succeeds");

        assert!(group.person(bob).is_none());
        let sheet = BalanceService::calculate(&group.people, &group.expenses);
        assert_eq!(sheet.orphaned, vec![bob]);
        assert!(money::approx_eq(sheet.balance(bob), -20.0));
    }
}
