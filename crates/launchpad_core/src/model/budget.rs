//! Budget line items and the immutable expense log.
//!
//! # Invariants
//! - At most one [`BudgetItem`] exists per [`BudgetCategory`]; the registry
//!   upserts by category, not by id.
//! - An [`Expense`] is immutable once created. Spending totals are an
//!   additive fold over expenses at creation time, not a recomputation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Fixed budget category set. Upsert key for budget items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BudgetCategory {
    Personnel,
    Equipment,
    Software,
    Marketing,
    Operations,
    Contingency,
}

impl BudgetCategory {
    pub const ALL: [BudgetCategory; 6] = [
        BudgetCategory::Personnel,
        BudgetCategory::Equipment,
        BudgetCategory::Software,
        BudgetCategory::Marketing,
        BudgetCategory::Operations,
        BudgetCategory::Contingency,
    ];
}

impl Display for BudgetCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BudgetCategory::Personnel => "Personnel",
            BudgetCategory::Equipment => "Equipment",
            BudgetCategory::Software => "Software",
            BudgetCategory::Marketing => "Marketing",
            BudgetCategory::Operations => "Operations",
            BudgetCategory::Contingency => "Contingency",
        };
        write!(f, "{label}")
    }
}

/// Planned-versus-actual budget line for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItem {
    pub id: Uuid,
    pub category: BudgetCategory,
    pub planned_amount: f64,
    pub description: String,
    pub actual_spent: f64,
    pub last_updated: DateTime<Utc>,
}

impl BudgetItem {
    /// Remaining budget: planned minus spent. Negative when overspent.
    pub fn variance(&self) -> f64 {
        self.planned_amount - self.actual_spent
    }

    /// Variance as a percentage of the planned amount. Zero when nothing is
    /// planned.
    pub fn variance_percent(&self) -> f64 {
        if self.planned_amount > 0.0 {
            self.variance() / self.planned_amount * 100.0
        } else {
            0.0
        }
    }

    /// Spent as a percentage of planned. Zero when nothing is planned.
    pub fn utilization_percent(&self) -> f64 {
        if self.planned_amount > 0.0 {
            self.actual_spent / self.planned_amount * 100.0
        } else {
            0.0
        }
    }
}

/// One immutable expense. There is no edit or delete path; reordering or
/// removing expenses would desynchronize the additive spending totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub category: BudgetCategory,
    pub amount: f64,
    pub description: String,
    pub date: DateTime<Utc>,
    pub vendor: String,
    pub approved: bool,
    /// Optional back-reference to a task id. Lookup only, not ownership.
    pub task_id: Option<String>,
}

/// User input for recording one expense. The registry assigns id and
/// defaults the date to now when absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewExpense {
    pub category: Option<BudgetCategory>,
    pub amount: f64,
    pub description: String,
    pub date: Option<DateTime<Utc>>,
    pub vendor: String,
    pub approved: bool,
    pub task_id: Option<String>,
}

/// Alert severity emitted by budget utilization checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    /// Utilization above 75% and at or below 90%.
    Warning,
    /// Utilization above 90%.
    Danger,
}

/// On-demand budget alert. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlert {
    pub severity: AlertSeverity,
    pub category: BudgetCategory,
    pub message: String,
    pub utilization_percent: f64,
}

/// Per-category breakdown row inside [`BudgetSummary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetCategorySummary {
    pub category: BudgetCategory,
    pub description: String,
    pub planned_amount: f64,
    pub actual_spent: f64,
    pub variance: f64,
    pub utilization_percent: f64,
}

/// Registry-wide totals plus the per-category breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub total_planned: f64,
    pub total_spent: f64,
    pub total_variance: f64,
    /// Spent over planned, rounded to one decimal. Zero when nothing is
    /// planned.
    pub utilization_percent: f64,
    pub categories: Vec<BudgetCategorySummary>,
}
