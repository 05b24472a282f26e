//! divvy-domain
//!
//! Pure domain models (Person, Expense, Group, balances, settlements).
//! No I/O, no services, no storage. Only data types, core enums, and
//! currency helpers.

pub mod common;
pub mod expense;
pub mod group;
pub mod money;
pub mod person;
pub mod settlement;

pub use common::*;
pub use expense::*;
pub use group::*;
pub use person::*;
pub use settlement::*;
