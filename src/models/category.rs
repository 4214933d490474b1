//! Category and CategoryGroup models
//!
//! Categories carry the only authoritative budgeting state: the per-month
//! `budgeted` map. Activity and carried balances are derived views and are
//! computed by the engine, never stored here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::ids::{BudgetId, CategoryGroupId, CategoryId};
use super::money::Money;
use super::month::MonthKey;

/// What a category's balance means
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum CategoryKind {
    /// A normal spending envelope
    #[default]
    Ordinary,
    /// Tracks money set aside to pay off a credit card; its activity comes
    /// from the card account's transactions rather than its own category id
    CreditCardPayment,
    /// The budget-wide "available to budget" bucket; holds a single scalar
    /// rather than per-month assignments
    Inflow,
}

impl CategoryKind {
    /// Classify a legacy record by name
    ///
    /// Upstream data marked credit-card-payment categories only by a name
    /// containing "credit"; new records should set the kind explicitly.
    pub fn classify(name: &str) -> Self {
        if name.to_lowercase().contains("credit") {
            Self::CreditCardPayment
        } else {
            Self::Ordinary
        }
    }
}

/// A group of related categories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryGroup {
    /// Unique identifier
    pub id: CategoryGroupId,

    /// The budget this group belongs to
    pub budget_id: BudgetId,

    /// Group name
    pub name: String,

    /// Whether this group is hidden
    #[serde(default)]
    pub hidden: bool,

    /// Soft-delete flag
    #[serde(default)]
    pub deleted: bool,

    /// The internal bookkeeping group holding the inflow category; never
    /// aggregated or rendered like a normal group
    #[serde(default)]
    pub master: bool,

    /// When the group was created
    pub created_at: DateTime<Utc>,

    /// When the group was last modified
    pub updated_at: DateTime<Utc>,
}

impl CategoryGroup {
    /// Create a new visible group
    pub fn new(budget_id: BudgetId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryGroupId::new(),
            budget_id,
            name: name.into(),
            hidden: false,
            deleted: false,
            master: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create the internal bookkeeping group for a budget
    pub fn master(budget_id: BudgetId) -> Self {
        let mut group = Self::new(budget_id, "Master Category Group");
        group.master = true;
        group
    }
}

impl fmt::Display for CategoryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A budget category within a group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// The budget this category belongs to
    pub budget_id: BudgetId,

    /// The group this category belongs to
    pub category_group_id: CategoryGroupId,

    /// Category name
    pub name: String,

    /// Balance semantics for this category
    #[serde(default)]
    pub kind: CategoryKind,

    /// Whether this category is hidden (shown under the Hidden pseudo-group)
    #[serde(default)]
    pub hidden: bool,

    /// Soft-delete flag
    #[serde(default)]
    pub deleted: bool,

    /// Assigned amount per month; the only persisted, mutable budget state.
    /// Empty for `CategoryKind::Inflow`.
    #[serde(default)]
    pub budgeted: BTreeMap<MonthKey, Money>,

    /// Notes about this category
    pub note: Option<String>,

    /// When the category was created
    pub created_at: DateTime<Utc>,

    /// When the category was last modified
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category, seeding a zero assignment for the given month
    pub fn new(
        budget_id: BudgetId,
        group_id: CategoryGroupId,
        name: impl Into<String>,
        month: MonthKey,
    ) -> Self {
        let name = name.into();
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            budget_id,
            category_group_id: group_id,
            kind: CategoryKind::classify(&name),
            name,
            hidden: false,
            deleted: false,
            budgeted: BTreeMap::from([(month, Money::zero())]),
            note: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create the inflow category inside the master group
    pub fn inflow(budget_id: BudgetId, master_group_id: CategoryGroupId) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            budget_id,
            category_group_id: master_group_id,
            name: "Inflow: Ready to Assign".into(),
            kind: CategoryKind::Inflow,
            hidden: false,
            deleted: false,
            budgeted: BTreeMap::new(),
            note: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_credit_card_payment(&self) -> bool {
        self.kind == CategoryKind::CreditCardPayment
    }

    pub fn is_inflow(&self) -> bool {
        self.kind == CategoryKind::Inflow
    }

    /// The explicit assignment for a month, if one was ever recorded
    pub fn budgeted_for(&self, month: MonthKey) -> Option<Money> {
        self.budgeted.get(&month).copied()
    }

    /// Record an assignment for a month
    pub fn set_budgeted(&mut self, month: MonthKey, amount: Money) {
        self.budgeted.insert(month, amount);
        self.updated_at = Utc::now();
    }

    /// Sum of every per-month assignment
    pub fn total_budgeted(&self) -> Money {
        self.budgeted.values().copied().sum()
    }

    /// The first month this category ever had an assignment
    pub fn earliest_budgeted_month(&self) -> Option<MonthKey> {
        self.budgeted.keys().next().copied()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Owned category collection with id lookup
///
/// The engine addresses categories by id through this arena instead of
/// holding aliased references, so the budgeted map has exactly one owner.
#[derive(Debug, Clone, Default)]
pub struct CategorySet {
    items: Vec<Category>,
    index: HashMap<CategoryId, usize>,
}

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(categories: Vec<Category>) -> Self {
        let mut set = Self::new();
        for category in categories {
            set.insert(category);
        }
        set
    }

    /// Insert or replace a category
    pub fn insert(&mut self, category: Category) {
        match self.index.get(&category.id) {
            Some(&pos) => self.items[pos] = category,
            None => {
                self.index.insert(category.id, self.items.len());
                self.items.push(category);
            }
        }
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.index.get(&id).map(|&pos| &self.items[pos])
    }

    pub fn get_mut(&mut self, id: CategoryId) -> Option<&mut Category> {
        self.index.get(&id).map(|&pos| &mut self.items[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
