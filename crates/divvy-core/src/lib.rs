//! divvy-core
//!
//! Business logic and services for the bill-splitting engine.
//! Depends on divvy-domain. No CLI, no terminal I/O, no storage.

pub mod balance_service;
pub mod error;
pub mod expense_service;
pub mod people_service;
pub mod settlement_service;
pub mod split_service;

pub use balance_service::*;
pub use error::{CoreError, CoreResult};
pub use expense_service::*;
pub use people_service::*;
pub use settlement_service::*;
pub use split_service::*;
