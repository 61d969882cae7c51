//! Derived views over the expense collection.
//!
//! Everything here is pure: functions take a snapshot and recompute on
//! every call. Dataset sizes are personal-scale, so there is no caching
//! layer.

use std::cmp::Reverse;
use std::collections::HashMap;

use shared::{
    CategorySlice, CategoryTotal, DashboardSummary, Expense, MonthlySeries, SpendingCharts,
};

use super::categories::{color_for_category, icon_for_category};

/// How many transactions the dashboard lists when the caller does not say.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Stateless computation service for dashboard and chart data.
#[derive(Clone, Default)]
pub struct InsightsService;

impl InsightsService {
    pub fn new() -> Self {
        Self
    }

    /// Sum of all recorded amounts. An empty collection sums to zero.
    pub fn total_spending(&self, expenses: &[Expense]) -> f64 {
        expenses.iter().map(|expense| expense.amount).sum()
    }

    /// Summed amount per category label, in first-occurrence order.
    pub fn category_totals(&self, expenses: &[Expense]) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        for expense in expenses {
            match totals
                .iter_mut()
                .find(|entry| entry.category == expense.category)
            {
                Some(entry) => entry.total += expense.amount,
                None => totals.push(CategoryTotal {
                    icon: icon_for_category(&expense.category).to_string(),
                    category: expense.category.clone(),
                    total: expense.amount,
                }),
            }
        }
        totals
    }

    /// Monthly sums as parallel label/value sequences, oldest month first.
    ///
    /// Labels use the `"{month}-{year}"` key format, but ordering is by
    /// calendar month, so "9-2024" precedes "10-2024" even though string
    /// order disagrees. Records whose date does not parse are left out of
    /// the grouping.
    pub fn monthly_totals(&self, expenses: &[Expense]) -> MonthlySeries {
        let mut totals: HashMap<(i32, u32), f64> = HashMap::new();
        for expense in expenses {
            if let Some(key) = expense.month_key() {
                *totals.entry(key).or_insert(0.0) += expense.amount;
            }
        }

        let mut months: Vec<(i32, u32)> = totals.keys().copied().collect();
        months.sort();

        let labels = months
            .iter()
            .map(|(year, month)| format!("{}-{}", month, year))
            .collect();
        let values = months.iter().map(|key| totals[key]).collect();

        MonthlySeries { labels, values }
    }

    /// The `limit` most recently dated records, most recent first.
    ///
    /// Ties keep their relative collection order; records with unparseable
    /// dates rank as oldest. Fewer than `limit` records returns all of
    /// them.
    pub fn recent_expenses(&self, expenses: &[Expense], limit: usize) -> Vec<Expense> {
        let mut recent = expenses.to_vec();
        recent.sort_by_key(|expense| Reverse(expense.parsed_date()));
        recent.truncate(limit);
        recent
    }

    /// Everything the dashboard renders, in one pass over a snapshot.
    pub fn dashboard_summary(&self, expenses: &[Expense], recent_limit: usize) -> DashboardSummary {
        DashboardSummary {
            total_spending: self.total_spending(expenses),
            category_totals: self.category_totals(expenses),
            recent_transactions: self.recent_expenses(expenses, recent_limit),
        }
    }

    /// Chart-ready series: pie slices with palette colors plus the monthly
    /// trend line.
    pub fn spending_charts(&self, expenses: &[Expense]) -> SpendingCharts {
        let by_category = self
            .category_totals(expenses)
            .into_iter()
            .map(|entry| CategorySlice {
                color: color_for_category(&entry.category).to_string(),
                category: entry.category,
                total: entry.total,
            })
            .collect();

        SpendingCharts {
            by_category,
            monthly_trend: self.monthly_totals(expenses),
        }
    }
}
