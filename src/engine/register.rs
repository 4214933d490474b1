//! Transaction register normalization
//!
//! Turns the raw transaction list into display-ready rows: newest-first
//! order preserved from upstream, a running balance per line, the signed
//! amount split into inflow/outflow columns, and payee/category/account
//! names resolved.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::engine::classify;
use crate::models::{
    Account, AccountId, CategoryId, CategorySet, Money, Payee, PayeeId, Transaction, TransactionId,
};

/// A display-ready register row
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTransaction {
    pub id: TransactionId,
    pub date: NaiveDate,
    pub account_id: AccountId,
    pub account_name: String,
    pub payee_id: PayeeId,
    pub payee_name: String,
    pub category_id: Option<CategoryId>,
    /// `None` for transfer legs
    pub category_name: Option<String>,
    /// Set when the amount is non-negative; mutually exclusive with outflow
    pub inflow: Option<Money>,
    /// Absolute value of a negative amount
    pub outflow: Option<Money>,
    /// Running account balance as of this row
    pub balance: Money,
    pub note: Option<String>,
    pub transfer_transaction_id: Option<TransactionId>,
    pub transfer_account_id: Option<AccountId>,
}

/// Normalize a newest-first transaction list into register rows
///
/// `transactions` must already be ordered date-desc then last-updated-desc
/// (the store's contract); this function preserves that order. The first
/// row's balance is its account's current total balance; each later (older)
/// row removes the effect of the row above it.
pub fn normalize(
    transactions: &[Transaction],
    accounts: &[Account],
    payees: &[Payee],
    categories: &CategorySet,
    account_filter: Option<AccountId>,
) -> Vec<NormalizedTransaction> {
    let balances = classify::account_balances(accounts, transactions);
    let account_names: HashMap<AccountId, &str> = accounts
        .iter()
        .map(|acc| (acc.id, acc.name.as_str()))
        .collect();
    let payee_names: HashMap<PayeeId, &str> = payees
        .iter()
        .map(|payee| (payee.id, payee.name.as_str()))
        .collect();

    let mut rows: Vec<NormalizedTransaction> = Vec::new();
    let mut prev_amount = Money::zero();

    for txn in transactions
        .iter()
        .filter(|txn| account_filter.map(|id| txn.account_id == id).unwrap_or(true))
    {
        let balance = match rows.last() {
            Some(prev_row) => prev_row.balance - prev_amount,
            None => balances.get(&txn.account_id).copied().unwrap_or_default(),
        };

        let (inflow, outflow) = if txn.amount.is_negative() {
            (None, Some(txn.amount.abs()))
        } else {
            (Some(txn.amount), None)
        };

        rows.push(NormalizedTransaction {
            id: txn.id,
            date: txn.date,
            account_id: txn.account_id,
            account_name: account_names
                .get(&txn.account_id)
                .map(|name| name.to_string())
                .unwrap_or_default(),
            payee_id: txn.payee_id,
            payee_name: payee_names
                .get(&txn.payee_id)
                .map(|name| name.to_string())
                .unwrap_or_default(),
            category_id: txn.category_id,
            category_name: txn
                .category_id
                .and_then(|id| categories.get(id))
                .map(|cat| cat.name.clone()),
            inflow,
            outflow,
            balance,
            note: txn.note.clone(),
            transfer_transaction_id: txn.transfer_transaction_id,
            transfer_account_id: txn.transfer_account_id,
        });
        prev_amount = txn.amount;
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountType, BudgetId, Category, CategoryGroupId, MonthKey};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct Fixture {
        checking: Account,
        payee: Payee,
        categories: CategorySet,
        groceries_id: CategoryId,
        /// newest-first, as the store hands them out
        transactions: Vec<Transaction>,
    }

    impl Fixture {
        fn new() -> Self {
            let budget = BudgetId::new();
            let checking = Account::new(budget, "Checking", AccountType::Checking);
            let payee = Payee::new(budget, "Grocery Store");
            let groceries = Category::new(
                budget,
                CategoryGroupId::new(),
                "Groceries",
                MonthKey::new(2024, 0),
            );
            let groceries_id = groceries.id;

            let older = Transaction::new(
                budget,
                checking.id,
                payee.id,
                date(2024, 1, 2),
                Money::from_cents(100000),
            );
            let newer = Transaction::new(
                budget,
                checking.id,
                payee.id,
                date(2024, 1, 10),
                Money::from_cents(-2500),
            )
            .with_category(groceries_id);

            Self {
                checking,
                payee,
                categories: CategorySet::from_vec(vec![groceries]),
                groceries_id,
                transactions: vec![newer, older],
            }
        }
    }

    #[test]
    fn test_running_balance_walks_backward() {
        let fx = Fixture::new();
        let rows = normalize(
            &fx.transactions,
            &[fx.checking.clone()],
            &[fx.payee.clone()],
            &fx.categories,
            None,
        );

        assert_eq!(rows.len(), 2);
        // newest row shows the account's current balance: 1000 - 25
        assert_eq!(rows[0].balance, Money::from_cents(97500));
        // older row removes the newer transaction's effect
        assert_eq!(rows[1].balance, Money::from_cents(100000));
    }

    #[test]
    fn test_inflow_outflow_split() {
        let fx = Fixture::new();
        let rows = normalize(
            &fx.transactions,
            &[fx.checking.clone()],
            &[fx.payee.clone()],
            &fx.categories,
            None,
        );

        assert_eq!(rows[0].outflow, Some(Money::from_cents(2500)));
        assert_eq!(rows[0].inflow, None);
        assert_eq!(rows[1].inflow, Some(Money::from_cents(100000)));
        assert_eq!(rows[1].outflow, None);
    }

    #[test]
    fn test_name_resolution() {
        let fx = Fixture::new();
        let rows = normalize(
            &fx.transactions,
            &[fx.checking.clone()],
            &[fx.payee.clone()],
            &fx.categories,
            None,
        );

        assert_eq!(rows[0].account_name, "Checking");
        assert_eq!(rows[0].payee_name, "Grocery Store");
        assert_eq!(rows[0].category_name.as_deref(), Some("Groceries"));
        assert_eq!(rows[0].category_id, Some(fx.groceries_id));
        // uncategorized row resolves to no category name
        assert_eq!(rows[1].category_name, None);
    }

    #[test]
    fn test_account_filter() {
        let mut fx = Fixture::new();
        let other = Account::new(fx.checking.budget_id, "Savings", AccountType::Savings);
        fx.transactions.push(Transaction::new(
            fx.checking.budget_id,
            other.id,
            fx.payee.id,
            date(2024, 1, 1),
            Money::from_cents(5000),
        ));

        let rows = normalize(
            &fx.transactions,
            &[fx.checking.clone(), other.clone()],
            &[fx.payee.clone()],
            &fx.categories,
            Some(other.id),
        );

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].account_name, "Savings");
        assert_eq!(rows[0].balance, Money::from_cents(5000));
    }

    #[test]
    fn test_ledger_tail_identity() {
        // balance[N-1] == account.balance - sum(amount[0..N-2])
        let fx = Fixture::new();
        let rows = normalize(
            &fx.transactions,
            &[fx.checking.clone()],
            &[fx.payee.clone()],
            &fx.categories,
            None,
        );
        let account_balance = Money::from_cents(97500);
        let all_but_last: Money = fx.transactions[..fx.transactions.len() - 1]
            .iter()
            .map(|txn| txn.amount)
            .sum();
        assert_eq!(rows.last().unwrap().balance, account_balance - all_but_last);
    }
}
