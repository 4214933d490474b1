//! Category balance engine
//!
//! Computes the per-category, per-month {budgeted, activity, balance}
//! triad. A category's balance carries forward month to month: the first
//! budgeted month stands alone, and every later month adds that month's
//! assignment and activity to the previous month's balance.
//!
//! The engine is built fresh per recomputation pass and owns its memo
//! table; it never writes derived values back onto category records. The
//! only mutable budget state is the category's budgeted map, which this
//! module never touches.

use std::collections::HashMap;

use tracing::trace;

use crate::engine::classify;
use crate::models::{
    Account, AccountId, Category, CategoryId, CategorySet, Money, MonthKey, Transaction,
};

/// One pass of derived-balance computation over a fixed transaction set
pub struct BalanceEngine<'a> {
    transactions: &'a [Transaction],
    credit_card_accounts: Vec<AccountId>,
    floor: MonthKey,
    memo: HashMap<(CategoryId, MonthKey), Money>,
}

impl<'a> BalanceEngine<'a> {
    /// Create an engine over the budget's accounts and transactions
    ///
    /// `floor` is the budget's first meaningful month; the carry-forward
    /// recurrence never descends below it. Credit-card-payment categories
    /// would otherwise recurse without bound, since their recursive branch
    /// does not require a previous budgeted value.
    pub fn new(accounts: &[Account], transactions: &'a [Transaction], floor: MonthKey) -> Self {
        Self {
            transactions,
            credit_card_accounts: classify::credit_card_account_ids(accounts),
            floor,
            memo: HashMap::new(),
        }
    }

    /// The floor month the recurrence bottoms out at
    pub fn floor(&self) -> MonthKey {
        self.floor
    }

    /// Signed net transaction amount for the category in the given month
    pub fn activity(&self, month: MonthKey, category: &Category) -> Money {
        let month_transactions = classify::transactions_in_month(self.transactions, month);
        let scoped =
            classify::scoped_for_category(&month_transactions, category, &self.credit_card_accounts);
        classify::sum_amounts(&scoped)
    }

    /// Month-carried balance for the category in the given month
    ///
    /// Base case: the previous month never had an explicit assignment (and
    /// the category is not a credit-card-payment category), or the previous
    /// month is before the floor. Otherwise the previous month's balance is
    /// computed on demand, memoized, and carried forward.
    pub fn balance(&mut self, month: MonthKey, category: &Category) -> Money {
        if let Some(&memoized) = self.memo.get(&(category.id, month)) {
            return memoized;
        }

        let prev = month.prev();
        let stands_alone = (category.budgeted_for(prev).is_none()
            && !category.is_credit_card_payment())
            || prev < self.floor;

        let assigned = category.budgeted_for(month).unwrap_or_default();
        let activity = self.activity(month, category);

        let balance = if stands_alone {
            assigned + activity
        } else {
            let carried = self.balance(prev, category);
            carried + assigned + activity
        };

        trace!(
            month = %month,
            category = %category.name,
            balance = %balance,
            stands_alone,
            "computed category balance"
        );
        self.memo.insert((category.id, month), balance);
        balance
    }
}

/// The earliest month any budget data exists for
///
/// Used as the default recurrence floor when the budget does not configure
/// one explicitly.
pub fn genesis_month(categories: &CategorySet, transactions: &[Transaction]) -> Option<MonthKey> {
    let earliest_budgeted = categories
        .iter()
        .filter_map(|cat| cat.earliest_budgeted_month())
        .min();
    let earliest_transaction = transactions.iter().map(|txn| txn.month_key()).min();
    match (earliest_budgeted, earliest_transaction) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}
