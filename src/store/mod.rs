//! Persistence boundary
//!
//! The engine reads four budget-scoped collections and issues two writes:
//! a category's budgeted-map entry and a partial transaction update. How
//! records are actually stored, streamed, or synced belongs to the
//! embedding application; [`MemoryStore`] is the reference implementation.

mod memory;

pub use memory::MemoryStore;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::LedgerResult;
use crate::models::{
    Account, BudgetId, Category, CategoryGroup, CategoryId, Money, MonthKey, Payee, PayeeId,
    Transaction, TransactionId,
};

/// Partial update to a transaction
///
/// Only the present fields change. `category_id` and `note` are doubly
/// optional so a patch can distinguish "leave alone" from "clear".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionPatch {
    pub id: TransactionId,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub payee_id: Option<PayeeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Option<CategoryId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Option<String>>,
    pub deleted: Option<bool>,
}

impl TransactionPatch {
    /// A patch that changes nothing
    pub fn for_transaction(id: TransactionId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Apply this patch to a transaction record
    pub fn apply(&self, txn: &mut Transaction) {
        if let Some(amount) = self.amount {
            txn.amount = amount;
        }
        if let Some(date) = self.date {
            txn.date = date;
        }
        if let Some(payee_id) = self.payee_id {
            txn.payee_id = payee_id;
        }
        if let Some(ref category_id) = self.category_id {
            txn.category_id = *category_id;
        }
        if let Some(ref note) = self.note {
            txn.note = note.clone();
        }
        if let Some(deleted) = self.deleted {
            txn.deleted = deleted;
        }
        txn.updated_at = chrono::Utc::now();
    }
}

/// Budget-scoped persistence collaborator
///
/// Read contracts: deleted records are excluded; transactions come back
/// ordered date-desc then last-updated-desc (the order the register view
/// preserves).
pub trait BudgetStore {
    fn accounts(&self, budget_id: BudgetId) -> LedgerResult<Vec<Account>>;

    fn category_groups(&self, budget_id: BudgetId) -> LedgerResult<Vec<CategoryGroup>>;

    fn categories(&self, budget_id: BudgetId) -> LedgerResult<Vec<Category>>;

    fn payees(&self, budget_id: BudgetId) -> LedgerResult<Vec<Payee>>;

    fn transactions(&self, budget_id: BudgetId) -> LedgerResult<Vec<Transaction>>;

    /// Persist one entry of a category's budgeted map
    fn update_category_budgeted(
        &mut self,
        budget_id: BudgetId,
        category_id: CategoryId,
        month: MonthKey,
        amount: Money,
    ) -> LedgerResult<()>;

    /// Apply a partial update to a transaction
    fn update_transaction(
        &mut self,
        budget_id: BudgetId,
        patch: &TransactionPatch,
    ) -> LedgerResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountId;

    #[test]
    fn test_patch_apply_distinguishes_clear_from_leave() {
        let mut txn = Transaction::new(
            BudgetId::new(),
            AccountId::new(),
            PayeeId::new(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            Money::from_cents(-500),
        )
        .with_category(CategoryId::new());

        // leave category alone
        let mut patch = TransactionPatch::for_transaction(txn.id);
        patch.amount = Some(Money::from_cents(-700));
        patch.apply(&mut txn);
        assert_eq!(txn.amount, Money::from_cents(-700));
        assert!(txn.category_id.is_some());

        // clear it explicitly
        let mut patch = TransactionPatch::for_transaction(txn.id);
        patch.category_id = Some(None);
        patch.apply(&mut txn);
        assert!(txn.category_id.is_none());
    }
}
