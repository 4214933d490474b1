//! Inflow reconciliation
//!
//! The budget-wide "available to budget" amount: everything that ever
//! arrived as income, minus everything assigned to any category in any
//! month. The inflow category carries this single scalar instead of a
//! per-month map.

use crate::engine::classify;
use crate::models::{CategoryId, CategorySet, Money, Transaction};

/// Unassigned income available for budgeting
///
/// `totalInflowActivity - totalBudgetedEverywhere`, where the budgeted
/// total spans every month of every non-inflow category, not just the
/// selected one. Exact at whole cents, so no rounding step is needed.
pub fn available_to_budget(
    inflow_category_id: CategoryId,
    categories: &CategorySet,
    transactions: &[Transaction],
) -> Money {
    let total_budgeted: Money = categories
        .iter()
        .filter(|cat| cat.id != inflow_category_id && !cat.is_inflow())
        .map(|cat| cat.total_budgeted())
        .sum();

    let all: Vec<&Transaction> = transactions.iter().collect();
    let inflow_activity = classify::sum_amounts(&classify::for_categories(&all, &[inflow_category_id]));

    inflow_activity - total_budgeted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Account, AccountType, BudgetId, Category, CategoryGroup, MonthKey, PayeeId, Transaction,
    };
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_available_to_budget() {
        let budget = BudgetId::new();
        let master = CategoryGroup::master(budget);
        let bills = CategoryGroup::new(budget, "Bills");
        let checking = Account::new(budget, "Checking", AccountType::Checking);

        let inflow = Category::inflow(budget, master.id);
        let jan = MonthKey::new(2024, 0);
        let feb = jan.next();
        let mut rent = Category::new(budget, bills.id, "Rent", jan);
        rent.set_budgeted(jan, Money::from_cents(90000));
        rent.set_budgeted(feb, Money::from_cents(90000));
        let mut fuel = Category::new(budget, bills.id, "Fuel", jan);
        fuel.set_budgeted(jan, Money::from_cents(5000));

        let paycheck = Transaction::new(
            budget,
            checking.id,
            PayeeId::new(),
            date(2024, 1, 1),
            Money::from_cents(250000),
        )
        .with_category(inflow.id);
        // categorized spending does not reduce the pool
        let groceries_spend = Transaction::new(
            budget,
            checking.id,
            PayeeId::new(),
            date(2024, 1, 5),
            Money::from_cents(-12000),
        )
        .with_category(rent.id);

        let inflow_id = inflow.id;
        let categories = CategorySet::from_vec(vec![inflow, rent, fuel]);

        // 2500 income - (900 + 900 + 50) budgeted across all months
        assert_eq!(
            available_to_budget(inflow_id, &categories, &[paycheck, groceries_spend]),
            Money::from_cents(65000)
        );
    }

    #[test]
    fn test_empty_budget_is_zero() {
        let budget = BudgetId::new();
        let master = CategoryGroup::master(budget);
        let inflow = Category::inflow(budget, master.id);
        let inflow_id = inflow.id;
        let categories = CategorySet::from_vec(vec![inflow]);
        assert_eq!(
            available_to_budget(inflow_id, &categories, &[]),
            Money::zero()
        );
    }
}
