//! Transaction model
//!
//! Amounts are signed: positive is an inflow, negative an outflow. A
//! transfer is a pair of transactions whose `transfer_transaction_id`
//! fields point at each other; both legs carry no category.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, BudgetId, CategoryId, PayeeId, TransactionId};
use super::money::Money;
use super::month::MonthKey;

/// A single ledger entry on an account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The budget this transaction belongs to
    pub budget_id: BudgetId,

    /// The account this transaction belongs to
    pub account_id: AccountId,

    /// The payee (a transfer pseudo-payee for transfer legs)
    pub payee_id: PayeeId,

    /// Spending category; `None` for transfer legs
    pub category_id: Option<CategoryId>,

    /// Signed amount: positive inflow, negative outflow
    pub amount: Money,

    /// Transaction date
    pub date: NaiveDate,

    /// Free-form note
    pub note: Option<String>,

    /// The mirror transaction of a transfer pair
    pub transfer_transaction_id: Option<TransactionId>,

    /// The account holding the mirror transaction
    pub transfer_account_id: Option<AccountId>,

    /// Soft-delete flag
    #[serde(default)]
    pub deleted: bool,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,

    /// When the transaction was last modified
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new uncategorized transaction
    pub fn new(
        budget_id: BudgetId,
        account_id: AccountId,
        payee_id: PayeeId,
        date: NaiveDate,
        amount: Money,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            budget_id,
            account_id,
            payee_id,
            category_id: None,
            amount,
            date,
            note: None,
            transfer_transaction_id: None,
            transfer_account_id: None,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Assign a spending category
    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Create a linked transfer pair between two accounts
    ///
    /// The first leg is the outflow from `from_account`; the second is the
    /// mirrored inflow on `to_account`. Both legs stay uncategorized.
    pub fn transfer_pair(
        budget_id: BudgetId,
        from_account: AccountId,
        to_account: AccountId,
        from_payee: PayeeId,
        to_payee: PayeeId,
        date: NaiveDate,
        amount: Money,
    ) -> (Self, Self) {
        let mut from_leg = Self::new(budget_id, from_account, from_payee, date, -amount);
        let mut to_leg = Self::new(budget_id, to_account, to_payee, date, amount);
        from_leg.transfer_transaction_id = Some(to_leg.id);
        from_leg.transfer_account_id = Some(to_account);
        to_leg.transfer_transaction_id = Some(from_leg.id);
        to_leg.transfer_account_id = Some(from_account);
        (from_leg, to_leg)
    }

    /// Check if this is one leg of a transfer
    pub fn is_transfer(&self) -> bool {
        self.transfer_transaction_id.is_some()
    }

    /// Check if this is an inflow (non-negative amount)
    pub fn is_inflow(&self) -> bool {
        !self.amount.is_negative()
    }

    /// Check if this is an outflow
    pub fn is_outflow(&self) -> bool {
        self.amount.is_negative()
    }

    /// The budgeting month this transaction falls into
    pub fn month_key(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} on {}", self.date, self.amount, self.account_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_inflow_outflow() {
        let budget = BudgetId::new();
        let acc = AccountId::new();
        let payee = PayeeId::new();
        let t = Transaction::new(budget, acc, payee, date(2024, 1, 15), Money::from_cents(-5000));
        assert!(t.is_outflow());
        assert!(!t.is_transfer());

        let t = Transaction::new(budget, acc, payee, date(2024, 1, 15), Money::zero());
        assert!(t.is_inflow());
    }

    #[test]
    fn test_month_key() {
        let t = Transaction::new(
            BudgetId::new(),
            AccountId::new(),
            PayeeId::new(),
            date(2024, 1, 31),
            Money::from_cents(100),
        );
        assert_eq!(t.month_key(), MonthKey::new(2024, 0));
    }

    #[test]
    fn test_transfer_pair_linkage() {
        let budget = BudgetId::new();
        let from = AccountId::new();
        let to = AccountId::new();
        let (from_leg, to_leg) = Transaction::transfer_pair(
            budget,
            from,
            to,
            PayeeId::new(),
            PayeeId::new(),
            date(2024, 2, 1),
            Money::from_cents(10000),
        );

        assert_eq!(from_leg.amount, -to_leg.amount);
        assert_eq!(from_leg.transfer_transaction_id, Some(to_leg.id));
        assert_eq!(to_leg.transfer_transaction_id, Some(from_leg.id));
        assert_eq!(from_leg.transfer_account_id, Some(to));
        assert_eq!(to_leg.transfer_account_id, Some(from));
        assert!(from_leg.category_id.is_none() && to_leg.category_id.is_none());
    }
}
