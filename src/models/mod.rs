//! Core data models
//!
//! Raw records as the persistence collaborator stores them, plus the value
//! types (ids, money, month keys) the engine computes with. Derived views
//! (category triads, normalized register rows) live in `engine`.

pub mod account;
pub mod category;
pub mod ids;
pub mod money;
pub mod month;
pub mod payee;
pub mod transaction;

pub use account::{Account, AccountType};
pub use category::{Category, CategoryGroup, CategoryKind, CategorySet};
pub use ids::{AccountId, BudgetId, CategoryGroupId, CategoryId, PayeeId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use month::{MonthKey, MonthKeyParseError};
pub use payee::Payee;
pub use transaction::Transaction;
