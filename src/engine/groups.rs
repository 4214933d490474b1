//! Category group aggregation
//!
//! Drives the balance engine over every category in every group for the
//! selected month and rolls the results up into the per-group view the
//! budget screen renders. Hidden categories are pulled out of their home
//! groups into a synthesized, always-collapsed "Hidden" group; the master
//! bookkeeping group is never aggregated.

use std::collections::HashMap;

use crate::engine::balance::BalanceEngine;
use crate::models::{
    Account, Category, CategoryGroup, CategoryGroupId, CategoryId, CategoryKind, CategorySet,
    Money, MonthKey, Transaction,
};

/// One category's derived triad for the selected month
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub id: CategoryId,
    pub group_id: CategoryGroupId,
    pub name: String,
    pub kind: CategoryKind,
    pub hidden: bool,
    /// Assigned amount for the month (zero-filled if never set)
    pub budgeted: Money,
    /// Net transaction amount for the month
    pub activity: Money,
    /// Month-carried balance
    pub balance: Money,
    /// Transient UI affordance; reset on every rebuild
    pub show_budget_input: bool,
}

/// A group's slice of the monthly budget view
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroupData {
    /// `None` for the synthesized Hidden group
    pub id: Option<CategoryGroupId>,
    pub name: String,
    /// Sum of member rows' assignments
    pub budgeted: Money,
    /// Sum of member rows' activity
    pub activity: Money,
    /// Sum of member rows' balances
    pub balance: Money,
    pub collapsed: bool,
    pub categories: Vec<CategoryRow>,
}

/// Per-group collapse state plus the bulk default for new groups
#[derive(Debug, Clone, Default)]
pub struct CollapseState {
    default_collapsed: bool,
    overrides: HashMap<CategoryGroupId, bool>,
}

impl CollapseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective collapse state for a group
    pub fn is_collapsed(&self, group_id: CategoryGroupId) -> bool {
        self.overrides
            .get(&group_id)
            .copied()
            .unwrap_or(self.default_collapsed)
    }

    /// Flip one group without touching the others
    pub fn toggle(&mut self, group_id: CategoryGroupId) {
        let flipped = !self.is_collapsed(group_id);
        self.overrides.insert(group_id, flipped);
    }

    /// Collapse or expand every group and record the intent for
    /// subsequently-created groups
    pub fn set_all(&mut self, collapsed: bool) {
        self.overrides.clear();
        self.default_collapsed = collapsed;
    }

    pub fn default_collapsed(&self) -> bool {
        self.default_collapsed
    }
}

/// Transient patch applied to one row of a built view
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryRowPatch {
    pub show_budget_input: Option<bool>,
}

/// Build the full category-group view for one month
///
/// The only record mutation is the lazy zero-fill: a viewed month with no
/// explicit assignment gets `budgeted[month] = 0` written into the
/// category, so the persisted map never has holes for viewed months.
/// Everything else lands in fresh output structures.
pub fn build_month_view(
    month: MonthKey,
    groups: &[CategoryGroup],
    categories: &mut CategorySet,
    transactions: &[Transaction],
    accounts: &[Account],
    collapse: &CollapseState,
    floor: MonthKey,
) -> Vec<CategoryGroupData> {
    zero_fill_month(month, categories);

    let mut engine = BalanceEngine::new(accounts, transactions, floor);
    let mut view = Vec::with_capacity(groups.len() + 1);

    for group in groups {
        if group.master || group.deleted {
            continue;
        }
        let rows: Vec<CategoryRow> = categories
            .iter()
            .filter(|cat| {
                cat.category_group_id == group.id && !cat.hidden && !cat.deleted && !cat.is_inflow()
            })
            .map(|cat| build_row(month, cat, &mut engine))
            .collect();
        view.push(roll_up(
            Some(group.id),
            group.name.clone(),
            collapse.is_collapsed(group.id),
            rows,
        ));
    }

    let hidden_rows: Vec<CategoryRow> = categories
        .iter()
        .filter(|cat| cat.hidden && !cat.deleted && !cat.is_inflow())
        .map(|cat| build_row(month, cat, &mut engine))
        .collect();
    view.push(roll_up(None, "Hidden".into(), true, hidden_rows));

    view
}

/// Apply a transient patch to one row of a built view
///
/// Returns false when the row is not present. The patch never touches the
/// underlying records, so the next rebuild recomputes from scratch.
pub fn patch_category(
    view: &mut [CategoryGroupData],
    group_id: Option<CategoryGroupId>,
    category_id: CategoryId,
    patch: CategoryRowPatch,
) -> bool {
    let Some(group) = view.iter_mut().find(|group| group.id == group_id) else {
        return false;
    };
    let Some(row) = group.categories.iter_mut().find(|row| row.id == category_id) else {
        return false;
    };
    if let Some(show) = patch.show_budget_input {
        row.show_budget_input = show;
    }
    true
}

fn zero_fill_month(month: MonthKey, categories: &mut CategorySet) {
    let missing: Vec<CategoryId> = categories
        .iter()
        .filter(|cat| !cat.deleted && !cat.is_inflow() && cat.budgeted_for(month).is_none())
        .map(|cat| cat.id)
        .collect();
    for id in missing {
        if let Some(cat) = categories.get_mut(id) {
            cat.set_budgeted(month, Money::zero());
        }
    }
}

fn build_row(month: MonthKey, category: &Category, engine: &mut BalanceEngine<'_>) -> CategoryRow {
    CategoryRow {
        id: category.id,
        group_id: category.category_group_id,
        name: category.name.clone(),
        kind: category.kind,
        hidden: category.hidden,
        budgeted: category.budgeted_for(month).unwrap_or_default(),
        activity: engine.activity(month, category),
        balance: engine.balance(month, category),
        show_budget_input: false,
    }
}

fn roll_up(
    id: Option<CategoryGroupId>,
    name: String,
    collapsed: bool,
    rows: Vec<CategoryRow>,
) -> CategoryGroupData {
    CategoryGroupData {
        id,
        name,
        budgeted: rows.iter().map(|row| row.budgeted).sum(),
        activity: rows.iter().map(|row| row.activity).sum(),
        balance: rows.iter().map(|row| row.balance).sum(),
        collapsed,
        categories: rows,
    }
}
