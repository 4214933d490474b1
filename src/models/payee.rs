//! Payee model
//!
//! A payee with `transfer_account_id` set is a transfer pseudo-payee:
//! selecting it on a transaction means the counterpart lives on another
//! account rather than in a spending category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, BudgetId, PayeeId};

/// Someone money is paid to or received from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payee {
    /// Unique identifier
    pub id: PayeeId,

    /// The budget this payee belongs to
    pub budget_id: BudgetId,

    /// Payee name
    pub name: String,

    /// Set when this payee represents a transfer to the given account
    pub transfer_account_id: Option<AccountId>,

    /// Soft-delete flag
    #[serde(default)]
    pub deleted: bool,

    /// When the payee was created
    pub created_at: DateTime<Utc>,

    /// When the payee was last modified
    pub updated_at: DateTime<Utc>,
}

impl Payee {
    /// Create a new ordinary payee
    pub fn new(budget_id: BudgetId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: PayeeId::new(),
            budget_id,
            name: name.into(),
            transfer_account_id: None,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create the transfer pseudo-payee for an account
    pub fn transfer_to(budget_id: BudgetId, account_id: AccountId, account_name: &str) -> Self {
        let mut payee = Self::new(budget_id, format!("Transfer: {}", account_name));
        payee.transfer_account_id = Some(account_id);
        payee
    }

    /// Check if this payee represents an account-to-account transfer
    pub fn is_transfer(&self) -> bool {
        self.transfer_account_id.is_some()
    }
}

impl fmt::Display for Payee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
