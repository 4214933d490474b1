//! Envelope-budgeting ledger engine
//!
//! Core computation for a monthly envelope budget: per-category
//! {budgeted, activity, balance} triads with month-to-month carry,
//! credit-card payment tracking, the budget-wide unassigned-income pool,
//! and a normalized transaction register with running balances.
//!
//! The crate is organized into the following modules:
//!
//! - `models`: raw records and value types (ids, money, month keys)
//! - `engine`: pure derivation over the record collections
//! - `store`: the persistence boundary trait and an in-memory store
//! - `ledger`: the per-budget facade exposing money-movement commands
//! - `expr`: arithmetic evaluation for free-text assignment inputs
//! - `error`: the crate error hierarchy
//!
//! # Example
//!
//! ```rust,ignore
//! use envelope_ledger::{Ledger, MonthKey};
//!
//! let mut ledger = Ledger::from_store(&store, budget_id)?;
//! let view = ledger.month_view(MonthKey::new(2024, 0));
//! let pool = ledger.available_to_budget()?;
//! ```

pub mod engine;
pub mod error;
pub mod expr;
pub mod ledger;
pub mod models;
pub mod store;

pub use error::{LedgerError, LedgerResult};
pub use ledger::{AssignOutcome, Ledger, MoveOutcome};
pub use models::{
    Account, AccountId, AccountType, BudgetId, Category, CategoryGroup, CategoryGroupId,
    CategoryId, CategoryKind, CategorySet, Money, MonthKey, Payee, PayeeId, Transaction,
    TransactionId,
};
pub use store::{BudgetStore, MemoryStore, TransactionPatch};
