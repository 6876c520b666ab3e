//! Budget registry: one planned line per category plus the expense log.

use crate::model::budget::{
    AlertSeverity, BudgetAlert, BudgetCategory, BudgetCategorySummary, BudgetItem, BudgetSummary,
    Expense, NewExpense,
};
use chrono::Utc;
use log::{info, warn};
use std::collections::BTreeMap;
use uuid::Uuid;

const DANGER_UTILIZATION: f64 = 90.0;
const WARNING_UTILIZATION: f64 = 75.0;

/// Budget line items keyed by category and the append-only expense log.
///
/// # Invariants
/// - At most one item per category; [`BudgetRegistry::set_budget`] upserts.
/// - `actual_spent` is an additive fold over expenses at creation time. An
///   expense whose category has no budget line still enters the log, but
///   its spending increment is dropped.
#[derive(Debug, Default)]
pub struct BudgetRegistry {
    items: Vec<BudgetItem>,
    expenses: Vec<Expense>,
}

impl BudgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[BudgetItem] {
        &self.items
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Creates or updates the budget line for `category`.
    ///
    /// An existing line keeps its id and accumulated `actual_spent`; only
    /// the planned amount and description are replaced.
    pub fn set_budget(
        &mut self,
        category: BudgetCategory,
        planned_amount: f64,
        description: impl Into<String>,
    ) -> BudgetItem {
        let now = Utc::now();
        let description = description.into();
        let item = match self.items.iter_mut().find(|item| item.category == category) {
            Some(item) => {
                item.planned_amount = planned_amount;
                item.description = description;
                item.last_updated = now;
                item.clone()
            }
            None => {
                let item = BudgetItem {
                    id: Uuid::new_v4(),
                    category,
                    planned_amount,
                    description,
                    actual_spent: 0.0,
                    last_updated: now,
                };
                self.items.push(item.clone());
                item
            }
        };
        info!(
            "event=budget_set module=registry status=ok category={category} planned={planned_amount}"
        );
        item
    }

    /// Records one expense and folds its amount into the matching budget
    /// line's `actual_spent`.
    ///
    /// With no category, or a category that has no budget line yet, the
    /// expense still enters the log but the increment is dropped; a later
    /// `set_budget` for that category does not pick it up retroactively.
    pub fn add_expense(&mut self, input: NewExpense) -> Option<Expense> {
        let category = match input.category {
            Some(category) => category,
            None => {
                warn!("event=expense_add module=registry status=rejected error_code=no_category");
                return None;
            }
        };
        let expense = Expense {
            id: Uuid::new_v4(),
            category,
            amount: input.amount,
            description: input.description,
            date: input.date.unwrap_or_else(Utc::now),
            vendor: input.vendor,
            approved: input.approved,
            task_id: input.task_id,
        };

        match self.items.iter_mut().find(|item| item.category == category) {
            Some(item) => {
                item.actual_spent += expense.amount;
                item.last_updated = Utc::now();
            }
            None => {
                warn!(
                    "event=expense_add module=registry status=unbudgeted category={category} amount={}",
                    expense.amount
                );
            }
        }

        self.expenses.push(expense.clone());
        info!(
            "event=expense_add module=registry status=ok category={category} amount={}",
            expense.amount
        );
        Some(expense)
    }

    /// Total spending per category, folded over the expense log. Unbudgeted
    /// categories appear here too; categories with no expenses are absent.
    pub fn expenses_by_category(&self) -> BTreeMap<BudgetCategory, f64> {
        let mut totals = BTreeMap::new();
        for expense in &self.expenses {
            *totals.entry(expense.category).or_insert(0.0) += expense.amount;
        }
        totals
    }

    /// Registry-wide totals plus the per-category breakdown, in item
    /// insertion order.
    pub fn summary(&self) -> BudgetSummary {
        let total_planned: f64 = self.items.iter().map(|item| item.planned_amount).sum();
        let total_spent: f64 = self.items.iter().map(|item| item.actual_spent).sum();
        let utilization_percent = if total_planned > 0.0 {
            round_one_decimal(total_spent / total_planned * 100.0)
        } else {
            0.0
        };

        let categories = self
            .items
            .iter()
            .map(|item| BudgetCategorySummary {
                category: item.category,
                description: item.description.clone(),
                planned_amount: item.planned_amount,
                actual_spent: item.actual_spent,
                variance: item.variance(),
                utilization_percent: round_one_decimal(item.utilization_percent()),
            })
            .collect();

        BudgetSummary {
            total_planned,
            total_spent,
            total_variance: total_planned - total_spent,
            utilization_percent,
            categories,
        }
    }

    /// Utilization alerts for lines running hot: above 90% is danger, above
    /// 75% is warning. Lines at or below 75% emit nothing.
    pub fn alerts(&self) -> Vec<BudgetAlert> {
        self.items
            .iter()
            .filter_map(|item| {
                let utilization = item.utilization_percent();
                let severity = if utilization > DANGER_UTILIZATION {
                    AlertSeverity::Danger
                } else if utilization > WARNING_UTILIZATION {
                    AlertSeverity::Warning
                } else {
                    return None;
                };
                Some(BudgetAlert {
                    severity,
                    category: item.category,
                    message: format!(
                        "{} budget is {:.1}% utilized",
                        item.category,
                        round_one_decimal(utilization)
                    ),
                    utilization_percent: round_one_decimal(utilization),
                })
            })
            .collect()
    }

    /// Spending per calendar month, keyed `YYYY-MM`, summed over the
    /// expense log.
    pub fn monthly_spending(&self) -> BTreeMap<String, f64> {
        let mut months = BTreeMap::new();
        for expense in &self.expenses {
            let key = expense.date.format("%Y-%m").to_string();
            *months.entry(key).or_insert(0.0) += expense.amount;
        }
        months
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(category: BudgetCategory, amount: f64) -> NewExpense {
        NewExpense {
            category: Some(category),
            amount,
            description: "test expense".to_string(),
            ..NewExpense::default()
        }
    }

    #[test]
    fn set_budget_upserts_by_category_and_keeps_spent() {
        let mut registry = BudgetRegistry::new();
        let first = registry.set_budget(BudgetCategory::Software, 1000.0, "licenses");
        registry.add_expense(expense(BudgetCategory::Software, 200.0));

        let second = registry.set_budget(BudgetCategory::Software, 2000.0, "licenses v2");
        assert_eq!(registry.items().len(), 1);
        assert_eq!(second.id, first.id);
        assert_eq!(second.planned_amount, 2000.0);
        assert_eq!(second.actual_spent, 200.0);
    }

    #[test]
    fn unbudgeted_expense_enters_log_but_not_totals() {
        let mut registry = BudgetRegistry::new();
        registry.add_expense(expense(BudgetCategory::Marketing, 50.0));

        assert_eq!(registry.expenses().len(), 1);
        assert_eq!(registry.summary().total_spent, 0.0);

        // A later budget line does not pick up the earlier expense.
        registry.set_budget(BudgetCategory::Marketing, 500.0, "ads");
        assert_eq!(registry.summary().total_spent, 0.0);
    }

    #[test]
    fn expense_without_category_is_rejected() {
        let mut registry = BudgetRegistry::new();
        let result = registry.add_expense(NewExpense {
            amount: 10.0,
            ..NewExpense::default()
        });
        assert!(result.is_none());
        assert!(registry.expenses().is_empty());
    }

    #[test]
    fn expenses_by_category_folds_totals() {
        let mut registry = BudgetRegistry::new();
        registry.set_budget(BudgetCategory::Personnel, 1000.0, "team");
        registry.add_expense(expense(BudgetCategory::Personnel, 100.0));
        registry.add_expense(expense(BudgetCategory::Personnel, 50.0));
        registry.add_expense(expense(BudgetCategory::Software, 25.0));

        let totals = registry.expenses_by_category();
        assert_eq!(totals.get(&BudgetCategory::Personnel), Some(&150.0));
        assert_eq!(totals.get(&BudgetCategory::Software), Some(&25.0));
        assert_eq!(totals.get(&BudgetCategory::Marketing), None);
    }

    #[test]
    fn summary_rounds_utilization_to_one_decimal() {
        let mut registry = BudgetRegistry::new();
        registry.set_budget(BudgetCategory::Equipment, 300.0, "hardware");
        registry.add_expense(expense(BudgetCategory::Equipment, 100.0));

        let summary = registry.summary();
        assert_eq!(summary.utilization_percent, 33.3);
        assert_eq!(summary.categories[0].utilization_percent, 33.3);
        assert_eq!(summary.total_variance, 200.0);
    }

    #[test]
    fn alerts_split_at_75_and_90_percent() {
        let mut registry = BudgetRegistry::new();
        registry.set_budget(BudgetCategory::Personnel, 100.0, "team");
        registry.set_budget(BudgetCategory::Software, 100.0, "licenses");
        registry.set_budget(BudgetCategory::Operations, 100.0, "ops");
        registry.add_expense(expense(BudgetCategory::Personnel, 95.0));
        registry.add_expense(expense(BudgetCategory::Software, 80.0));
        registry.add_expense(expense(BudgetCategory::Operations, 75.0));

        let alerts = registry.alerts();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].severity, AlertSeverity::Danger);
        assert_eq!(alerts[0].category, BudgetCategory::Personnel);
        assert_eq!(alerts[1].severity, AlertSeverity::Warning);
        assert_eq!(alerts[1].category, BudgetCategory::Software);
    }

    #[test]
    fn monthly_spending_groups_by_calendar_month() {
        use chrono::TimeZone;

        let mut registry = BudgetRegistry::new();
        registry.set_budget(BudgetCategory::Software, 1000.0, "licenses");
        for (day, amount) in [(3, 40.0), (20, 60.0)] {
            registry.add_expense(NewExpense {
                category: Some(BudgetCategory::Software),
                amount,
                date: Utc.with_ymd_and_hms(2026, 5, day, 12, 0, 0).single(),
                ..NewExpense::default()
            });
        }
        registry.add_expense(NewExpense {
            category: Some(BudgetCategory::Software),
            amount: 25.0,
            date: Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).single(),
            ..NewExpense::default()
        });

        let months = registry.monthly_spending();
        assert_eq!(months.get("2026-05"), Some(&100.0));
        assert_eq!(months.get("2026-06"), Some(&25.0));
    }
}
