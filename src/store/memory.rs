//! In-memory store
//!
//! Reference implementation of [`BudgetStore`] backed by plain vectors.
//! Used by the test suite and by embedders that keep their own sync layer
//! and just need somewhere to stage records.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Account, BudgetId, Category, CategoryGroup, CategoryId, Money, MonthKey, Payee, Transaction,
};
use crate::store::{BudgetStore, TransactionPatch};

/// Vector-backed [`BudgetStore`]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    accounts: Vec<Account>,
    category_groups: Vec<CategoryGroup>,
    categories: Vec<Category>,
    payees: Vec<Payee>,
    transactions: Vec<Transaction>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_account(&mut self, account: Account) {
        self.accounts.push(account);
    }

    pub fn insert_category_group(&mut self, group: CategoryGroup) {
        self.category_groups.push(group);
    }

    pub fn insert_category(&mut self, category: Category) {
        self.categories.push(category);
    }

    pub fn insert_payee(&mut self, payee: Payee) {
        self.payees.push(payee);
    }

    pub fn insert_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Direct read of a category's stored assignment, for tests
    pub fn stored_budgeted(&self, category_id: CategoryId, month: MonthKey) -> Option<Money> {
        self.categories
            .iter()
            .find(|cat| cat.id == category_id)
            .and_then(|cat| cat.budgeted_for(month))
    }
}

impl BudgetStore for MemoryStore {
    fn accounts(&self, budget_id: BudgetId) -> LedgerResult<Vec<Account>> {
        Ok(self
            .accounts
            .iter()
            .filter(|acc| acc.budget_id == budget_id && !acc.deleted)
            .cloned()
            .collect())
    }

    fn category_groups(&self, budget_id: BudgetId) -> LedgerResult<Vec<CategoryGroup>> {
        Ok(self
            .category_groups
            .iter()
            .filter(|group| group.budget_id == budget_id && !group.deleted)
            .cloned()
            .collect())
    }

    fn categories(&self, budget_id: BudgetId) -> LedgerResult<Vec<Category>> {
        Ok(self
            .categories
            .iter()
            .filter(|cat| cat.budget_id == budget_id && !cat.deleted)
            .cloned()
            .collect())
    }

    fn payees(&self, budget_id: BudgetId) -> LedgerResult<Vec<Payee>> {
        Ok(self
            .payees
            .iter()
            .filter(|payee| payee.budget_id == budget_id && !payee.deleted)
            .cloned()
            .collect())
    }

    fn transactions(&self, budget_id: BudgetId) -> LedgerResult<Vec<Transaction>> {
        let mut transactions: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|txn| txn.budget_id == budget_id && !txn.deleted)
            .cloned()
            .collect();
        // newest first: date desc, then last-updated desc
        transactions.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.updated_at.cmp(&a.updated_at))
        });
        Ok(transactions)
    }

    fn update_category_budgeted(
        &mut self,
        budget_id: BudgetId,
        category_id: CategoryId,
        month: MonthKey,
        amount: Money,
    ) -> LedgerResult<()> {
        let category = self
            .categories
            .iter_mut()
            .find(|cat| cat.budget_id == budget_id && cat.id == category_id)
            .ok_or_else(|| LedgerError::category_not_found(category_id.to_string()))?;
        category.set_budgeted(month, amount);
        Ok(())
    }

    fn update_transaction(
        &mut self,
        budget_id: BudgetId,
        patch: &TransactionPatch,
    ) -> LedgerResult<()> {
        let transaction = self
            .transactions
            .iter_mut()
            .find(|txn| txn.budget_id == budget_id && txn.id == patch.id)
            .ok_or_else(|| LedgerError::transaction_not_found(patch.id.to_string()))?;
        patch.apply(transaction);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountType, PayeeId};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_reads_are_budget_scoped_and_skip_deleted() {
        let mine = BudgetId::new();
        let theirs = BudgetId::new();
        let mut store = MemoryStore::new();
        store.insert_account(Account::new(mine, "Checking", AccountType::Checking));
        store.insert_account(Account::new(theirs, "Other", AccountType::Checking));
        let mut closed_out = Account::new(mine, "Old", AccountType::Savings);
        closed_out.deleted = true;
        store.insert_account(closed_out);

        let accounts = store.accounts(mine).unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].name, "Checking");
    }

    #[test]
    fn test_transactions_ordered_newest_first() {
        let budget = BudgetId::new();
        let acc = Account::new(budget, "Checking", AccountType::Checking);
        let payee = PayeeId::new();
        let mut store = MemoryStore::new();
        store.insert_account(acc.clone());

        for (day, cents) in [(5, -100), (20, -200), (12, -300)] {
            store.insert_transaction(Transaction::new(
                budget,
                acc.id,
                payee,
                date(2024, 1, day),
                Money::from_cents(cents),
            ));
        }

        let txns = store.transactions(budget).unwrap();
        let days: Vec<u32> = txns
            .iter()
            .map(|txn| chrono::Datelike::day(&txn.date))
            .collect();
        assert_eq!(days, vec![20, 12, 5]);
    }

    #[test]
    fn test_update_category_budgeted() {
        let budget = BudgetId::new();
        let month = MonthKey::new(2024, 0);
        let cat = Category::new(budget, crate::models::CategoryGroupId::new(), "Rent", month);
        let id = cat.id;
        let mut store = MemoryStore::new();
        store.insert_category(cat);

        store
            .update_category_budgeted(budget, id, month, Money::from_cents(90000))
            .unwrap();
        assert_eq!(store.stored_budgeted(id, month), Some(Money::from_cents(90000)));

        let missing = store.update_category_budgeted(
            budget,
            CategoryId::new(),
            month,
            Money::zero(),
        );
        assert!(missing.unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_transaction_patch() {
        let budget = BudgetId::new();
        let acc = Account::new(budget, "Checking", AccountType::Checking);
        let txn = Transaction::new(
            budget,
            acc.id,
            PayeeId::new(),
            date(2024, 1, 5),
            Money::from_cents(-500),
        );
        let id = txn.id;
        let mut store = MemoryStore::new();
        store.insert_transaction(txn);

        let mut patch = TransactionPatch::for_transaction(id);
        patch.deleted = Some(true);
        store.update_transaction(budget, &patch).unwrap();

        // deleted records drop out of reads
        assert!(store.transactions(budget).unwrap().is_empty());
    }
}
