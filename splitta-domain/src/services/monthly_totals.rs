use crate::model::{Expense, Money};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub total: Money,
    pub expense_count: usize,
}

impl MonthlyTotal {
    /// Sortable `YYYY-MM` key.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Human label such as `March 2024`.
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map_or_else(|| self.key(), |date| date.format("%B %Y").to_string())
    }
}

pub struct MonthlyTotals;

impl MonthlyTotals {
    /// Expense totals per calendar month, most recent month first.
    pub fn compute(expenses: &[Expense]) -> Vec<MonthlyTotal> {
        let mut months: BTreeMap<(i32, u32), (Money, usize)> = BTreeMap::new();
        for expense in expenses {
            let entry = months
                .entry((expense.date.year(), expense.date.month()))
                .or_default();
            match entry.0.checked_add(expense.amount) {
                Some(total) => {
                    entry.0 = total;
                    entry.1 += 1;
                }
                None => tracing::warn!(
                    expense = expense.id.0,
                    "leaving expense out of an overflowing monthly total"
                ),
            }
        }

        months
            .into_iter()
            .rev()
            .map(|((year, month), (total, expense_count))| MonthlyTotal {
                year,
                month,
                total,
                expense_count,
            })
            .collect()
    }
}
