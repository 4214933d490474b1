//! Transaction classification and filtering
//!
//! Slice-in, borrowed-out filters over the raw transaction list: by month,
//! by category ids, by account ids. Credit-card-payment categories scope
//! their activity by the card accounts' ids instead of their own category
//! id; the helpers here centralize that dispatch.

use std::collections::HashMap;

use crate::models::{Account, AccountId, Category, CategoryId, Money, MonthKey, Transaction};

/// Ids of every credit-card account in the budget
pub fn credit_card_account_ids(accounts: &[Account]) -> Vec<AccountId> {
    accounts
        .iter()
        .filter(|acc| acc.kind.is_credit_card() && !acc.deleted)
        .map(|acc| acc.id)
        .collect()
}

/// Open budget accounts (checking, savings, credit card)
pub fn budget_accounts(accounts: &[Account]) -> Vec<&Account> {
    accounts
        .iter()
        .filter(|acc| acc.is_open_budget_account())
        .collect()
}

/// Open tracking accounts (asset, liability)
pub fn tracking_accounts(accounts: &[Account]) -> Vec<&Account> {
    accounts
        .iter()
        .filter(|acc| acc.is_open_tracking_account())
        .collect()
}

/// Transactions dated within the given budgeting month
pub fn transactions_in_month(transactions: &[Transaction], month: MonthKey) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|txn| month.contains(txn.date))
        .collect()
}

/// Narrow a transaction list to the given category ids
pub fn for_categories<'a>(
    transactions: &[&'a Transaction],
    category_ids: &[CategoryId],
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|txn| {
            txn.category_id
                .map(|id| category_ids.contains(&id))
                .unwrap_or(false)
        })
        .copied()
        .collect()
}

/// Narrow a transaction list to the given account ids
pub fn for_accounts<'a>(
    transactions: &[&'a Transaction],
    account_ids: &[AccountId],
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|txn| account_ids.contains(&txn.account_id))
        .copied()
        .collect()
}

/// The transactions that count toward a category's activity for one month
///
/// Credit-card-payment categories see every transaction on the card
/// accounts (category ignored); ordinary categories see their own
/// categorized transactions. A card purchase categorized under "Groceries"
/// therefore counts twice, once per view, which is the intended
/// dual-accounting of money reserved for the card payment.
pub fn scoped_for_category<'a>(
    month_transactions: &[&'a Transaction],
    category: &Category,
    credit_card_accounts: &[AccountId],
) -> Vec<&'a Transaction> {
    if category.is_credit_card_payment() {
        for_accounts(month_transactions, credit_card_accounts)
    } else {
        for_categories(month_transactions, &[category.id])
    }
}

/// Signed sum of a borrowed transaction list
pub fn sum_amounts(transactions: &[&Transaction]) -> Money {
    transactions.iter().map(|txn| txn.amount).sum()
}

/// Derived balance per account: the sum of its transactions' amounts
pub fn account_balances(
    accounts: &[Account],
    transactions: &[Transaction],
) -> HashMap<AccountId, Money> {
    let mut balances: HashMap<AccountId, Money> =
        accounts.iter().map(|acc| (acc.id, Money::zero())).collect();
    for txn in transactions {
        if let Some(balance) = balances.get_mut(&txn.account_id) {
            *balance += txn.amount;
        }
    }
    balances
}
