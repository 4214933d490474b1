//! Budget facade
//!
//! Owns one budget's loaded record collections and exposes the money
//! movement commands on top of the engine: building the monthly view,
//! assigning to categories, moving between envelopes, and editing
//! transactions with transfer-leg mirroring. Every mutation is computed
//! first, persisted through the store, and only then applied to the
//! in-memory copies.

use tracing::{info, warn};

use crate::engine::{
    self, genesis_month, verify_transfer_pairs, BalanceEngine, CategoryGroupData, CollapseState,
    NormalizedTransaction,
};
use crate::error::{LedgerError, LedgerResult};
use crate::expr;
use crate::models::{
    Account, AccountId, BudgetId, Category, CategoryGroup, CategoryGroupId, CategoryId,
    CategorySet, Money, MonthKey, Payee, Transaction,
};
use crate::store::{BudgetStore, TransactionPatch};

/// Result of a category-to-category move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied,
    /// The amount was non-positive or exceeded the source balance;
    /// nothing changed
    Rejected,
}

/// Result of setting a category's assigned amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOutcome {
    Applied,
    /// The new amount equals the current one, or the input failed to
    /// parse; nothing changed
    Unchanged,
    /// The increase exceeded the unassigned pool; nothing changed
    Rejected {
        requested: Money,
        available: Money,
    },
}

/// One budget's records plus the commands that operate on them
#[derive(Debug)]
pub struct Ledger {
    budget_id: BudgetId,
    accounts: Vec<Account>,
    groups: Vec<CategoryGroup>,
    categories: CategorySet,
    payees: Vec<Payee>,
    transactions: Vec<Transaction>,
    collapse: CollapseState,
    floor: MonthKey,
}

impl Ledger {
    /// Load a budget's collections and verify their integrity
    ///
    /// The recurrence floor defaults to the earliest month any budget data
    /// exists for, or the current month for an empty budget.
    pub fn from_store<S: BudgetStore>(store: &S, budget_id: BudgetId) -> LedgerResult<Self> {
        let accounts = store.accounts(budget_id)?;
        let groups = store.category_groups(budget_id)?;
        let categories = CategorySet::from_vec(store.categories(budget_id)?);
        let payees = store.payees(budget_id)?;
        let transactions = store.transactions(budget_id)?;

        verify_transfer_pairs(&transactions)?;

        let floor =
            genesis_month(&categories, &transactions).unwrap_or_else(MonthKey::current);
        info!(
            budget = %budget_id,
            accounts = accounts.len(),
            categories = categories.len(),
            transactions = transactions.len(),
            floor = %floor,
            "loaded budget"
        );

        Ok(Self {
            budget_id,
            accounts,
            groups,
            categories,
            payees,
            transactions,
            collapse: CollapseState::new(),
            floor,
        })
    }

    /// Override the recurrence floor
    pub fn with_floor(mut self, floor: MonthKey) -> Self {
        self.floor = floor;
        self
    }

    pub fn budget_id(&self) -> BudgetId {
        self.budget_id
    }

    pub fn floor(&self) -> MonthKey {
        self.floor
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Open budget accounts (checking, savings, credit card)
    pub fn budget_accounts(&self) -> Vec<&Account> {
        engine::classify::budget_accounts(&self.accounts)
    }

    /// Open tracking accounts (asset, liability)
    pub fn tracking_accounts(&self) -> Vec<&Account> {
        engine::classify::tracking_accounts(&self.accounts)
    }

    pub fn payees(&self) -> &[Payee] {
        &self.payees
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(id)
    }

    /// The budget's inflow category
    pub fn inflow_category(&self) -> LedgerResult<&Category> {
        self.categories
            .iter()
            .find(|cat| cat.is_inflow())
            .ok_or_else(|| LedgerError::category_not_found("Inflow: Ready to Assign"))
    }

    /// Build the category-group view for one month
    ///
    /// Zero-fills the viewed month's missing assignments in place.
    pub fn month_view(&mut self, month: MonthKey) -> Vec<CategoryGroupData> {
        engine::build_month_view(
            month,
            &self.groups,
            &mut self.categories,
            &self.transactions,
            &self.accounts,
            &self.collapse,
            self.floor,
        )
    }

    /// Unassigned income available for budgeting
    pub fn available_to_budget(&self) -> LedgerResult<Money> {
        let inflow_id = self.inflow_category()?.id;
        Ok(engine::available_to_budget(
            inflow_id,
            &self.categories,
            &self.transactions,
        ))
    }

    /// Display-ready register rows, optionally filtered to one account
    pub fn register(&self, account: Option<AccountId>) -> Vec<NormalizedTransaction> {
        engine::normalize(
            &self.transactions,
            &self.accounts,
            &self.payees,
            &self.categories,
            account,
        )
    }

    /// Month-carried balance for one category
    pub fn category_balance(&self, month: MonthKey, id: CategoryId) -> LedgerResult<Money> {
        let category = self
            .categories
            .get(id)
            .ok_or_else(|| LedgerError::category_not_found(id.to_string()))?;
        let mut engine = BalanceEngine::new(&self.accounts, &self.transactions, self.floor);
        Ok(engine.balance(month, category))
    }

    /// Largest amount a move out of `from` can carry this month
    pub fn clamp_move_amount(
        &self,
        from: CategoryId,
        month: MonthKey,
        requested: Money,
    ) -> LedgerResult<Money> {
        let balance = self.category_balance(month, from)?;
        Ok(requested.min(balance).max(Money::zero()))
    }

    /// Move an amount between two categories' assignments for a month
    ///
    /// Rejected without side effects when the source and destination are
    /// the same category, the amount is non-positive, or the amount
    /// exceeds the source category's balance. Both new assignments are
    /// computed up front and committed together; a failed second write
    /// rolls the first one back.
    pub fn move_money<S: BudgetStore>(
        &mut self,
        store: &mut S,
        from: CategoryId,
        to: CategoryId,
        month: MonthKey,
        amount: Money,
    ) -> LedgerResult<MoveOutcome> {
        if from == to {
            warn!(%from, %month, "rejected move onto the same category");
            return Ok(MoveOutcome::Rejected);
        }

        let from_balance = self.category_balance(month, from)?;
        let from_is_inflow = self
            .categories
            .get(from)
            .map(|cat| cat.is_inflow())
            .unwrap_or(false);
        let to_category = self
            .categories
            .get(to)
            .ok_or_else(|| LedgerError::category_not_found(to.to_string()))?;
        if from_is_inflow || to_category.is_inflow() {
            return Err(LedgerError::Validation(
                "the inflow category cannot hold a per-month assignment".into(),
            ));
        }

        if !amount.is_positive() || amount > from_balance {
            warn!(
                %from, %to, %month, %amount, balance = %from_balance,
                "rejected move"
            );
            return Ok(MoveOutcome::Rejected);
        }

        let from_current = self
            .categories
            .get(from)
            .and_then(|cat| cat.budgeted_for(month))
            .unwrap_or_default();
        let to_current = to_category.budgeted_for(month).unwrap_or_default();
        let new_from = from_current - amount;
        let new_to = to_current + amount;

        store.update_category_budgeted(self.budget_id, from, month, new_from)?;
        if let Err(err) = store.update_category_budgeted(self.budget_id, to, month, new_to) {
            warn!(%from, %to, %month, "second move write failed, rolling back");
            if let Err(rollback_err) =
                store.update_category_budgeted(self.budget_id, from, month, from_current)
            {
                return Err(LedgerError::DataInconsistency(format!(
                    "move rollback failed, category {} may hold a partial assignment: \
                     {} (after: {})",
                    from, rollback_err, err
                )));
            }
            return Err(err);
        }

        if let Some(cat) = self.categories.get_mut(from) {
            cat.set_budgeted(month, new_from);
        }
        if let Some(cat) = self.categories.get_mut(to) {
            cat.set_budgeted(month, new_to);
        }
        info!(%from, %to, %month, %amount, "moved between categories");
        Ok(MoveOutcome::Applied)
    }

    /// Set a category's assigned amount for a month
    ///
    /// An increase is applied only while it fits in the unassigned pool;
    /// decreases always apply.
    pub fn assign_budgeted<S: BudgetStore>(
        &mut self,
        store: &mut S,
        category_id: CategoryId,
        month: MonthKey,
        new_amount: Money,
    ) -> LedgerResult<AssignOutcome> {
        let available = self.available_to_budget()?;
        let category = self
            .categories
            .get(category_id)
            .ok_or_else(|| LedgerError::category_not_found(category_id.to_string()))?;
        if category.is_inflow() {
            return Err(LedgerError::Validation(
                "the inflow category cannot hold a per-month assignment".into(),
            ));
        }
        let current = category.budgeted_for(month).unwrap_or_default();
        let diff = new_amount - current;

        if diff.is_zero() {
            return Ok(AssignOutcome::Unchanged);
        }
        if diff > available {
            warn!(
                category = %category.name, %month, requested = %diff, %available,
                "rejected assignment"
            );
            return Ok(AssignOutcome::Rejected {
                requested: diff,
                available,
            });
        }

        store.update_category_budgeted(self.budget_id, category_id, month, new_amount)?;
        if let Some(cat) = self.categories.get_mut(category_id) {
            cat.set_budgeted(month, new_amount);
        }
        info!(%category_id, %month, amount = %new_amount, "assigned to category");
        Ok(AssignOutcome::Applied)
    }

    /// Set a category's assignment from a free-text arithmetic expression
    ///
    /// Malformed input leaves the current assignment in place rather than
    /// surfacing an error.
    pub fn assign_budgeted_expr<S: BudgetStore>(
        &mut self,
        store: &mut S,
        category_id: CategoryId,
        month: MonthKey,
        input: &str,
    ) -> LedgerResult<AssignOutcome> {
        match expr::evaluate_money(input) {
            Ok(amount) => self.assign_budgeted(store, category_id, month, amount),
            Err(err) => {
                warn!(%category_id, %month, input, %err, "unparseable assignment input");
                Ok(AssignOutcome::Unchanged)
            }
        }
    }

    /// Apply a partial transaction update, mirroring onto a transfer leg
    ///
    /// Amount, date, and deletion changes propagate to the counterpart
    /// (with the amount negated) so the pair stays consistent. Transfer
    /// legs cannot be categorized.
    pub fn apply_transaction_patch<S: BudgetStore>(
        &mut self,
        store: &mut S,
        patch: &TransactionPatch,
    ) -> LedgerResult<()> {
        let txn = self
            .transactions
            .iter()
            .find(|txn| txn.id == patch.id)
            .ok_or_else(|| LedgerError::transaction_not_found(patch.id.to_string()))?;

        if txn.is_transfer() && matches!(patch.category_id, Some(Some(_))) {
            return Err(LedgerError::Validation(
                "transfer legs cannot be categorized".into(),
            ));
        }

        let mirror = txn.transfer_transaction_id.map(|counterpart_id| {
            let mut mirror = TransactionPatch::for_transaction(counterpart_id);
            mirror.amount = patch.amount.map(|amount| -amount);
            mirror.date = patch.date;
            mirror.deleted = patch.deleted;
            mirror
        });

        store.update_transaction(self.budget_id, patch)?;
        if let Some(ref mirror) = mirror {
            store.update_transaction(self.budget_id, mirror)?;
        }

        if let Some(txn) = self.transactions.iter_mut().find(|txn| txn.id == patch.id) {
            patch.apply(txn);
        }
        if let Some(ref mirror) = mirror {
            if let Some(txn) = self.transactions.iter_mut().find(|txn| txn.id == mirror.id) {
                mirror.apply(txn);
            }
            info!(transaction = %patch.id, counterpart = %mirror.id, "mirrored transfer edit");
        }

        self.transactions.retain(|txn| !txn.deleted);
        self.transactions.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.updated_at.cmp(&a.updated_at))
        });
        Ok(())
    }

    /// Flip one group's collapsed state
    pub fn toggle_group(&mut self, group_id: CategoryGroupId) {
        self.collapse.toggle(group_id);
    }

    /// Collapse or expand every group
    pub fn set_all_collapsed(&mut self, collapsed: bool) {
        self.collapse.set_all(collapsed);
    }
}
