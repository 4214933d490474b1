//! Account model
//!
//! Budget accounts (checking, savings, credit card) feed category activity;
//! tracking accounts (asset, liability) only affect net worth. Balances are
//! derived from transactions and never stored on the record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, BudgetId, PayeeId};

/// The kind of account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountType {
    Checking,
    Savings,
    CreditCard,
    Asset,
    Liability,
}

impl AccountType {
    /// Budget accounts participate in envelope budgeting
    pub fn is_budget(&self) -> bool {
        matches!(self, Self::Checking | Self::Savings | Self::CreditCard)
    }

    /// Tracking accounts sit outside the budget
    pub fn is_tracking(&self) -> bool {
        matches!(self, Self::Asset | Self::Liability)
    }

    pub fn is_credit_card(&self) -> bool {
        matches!(self, Self::CreditCard)
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Checking => "Checking",
            Self::Savings => "Savings",
            Self::CreditCard => "Credit Card",
            Self::Asset => "Asset",
            Self::Liability => "Liability",
        };
        f.write_str(name)
    }
}

/// A tracked account within a budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// The budget this account belongs to
    pub budget_id: BudgetId,

    /// Account name
    pub name: String,

    /// Account kind
    #[serde(rename = "type")]
    pub kind: AccountType,

    /// Closed is a soft-disable, not deletion
    #[serde(default)]
    pub closed: bool,

    /// Soft-delete flag
    #[serde(default)]
    pub deleted: bool,

    /// The transfer pseudo-payee that targets this account
    pub transfer_payee_id: Option<PayeeId>,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last modified
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new open account
    pub fn new(budget_id: BudgetId, name: impl Into<String>, kind: AccountType) -> Self {
        let now = Utc::now();
        Self {
            id: AccountId::new(),
            budget_id,
            name: name.into(),
            kind,
            closed: false,
            deleted: false,
            transfer_payee_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// An open budget account contributes activity to categories
    pub fn is_open_budget_account(&self) -> bool {
        self.kind.is_budget() && !self.closed && !self.deleted
    }

    /// An open tracking account
    pub fn is_open_tracking_account(&self) -> bool {
        self.kind.is_tracking() && !self.closed && !self.deleted
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}
