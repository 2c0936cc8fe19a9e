use crate::ports::MemberDirectory;
use splitta_domain::{Expense, LedgerSnapshot, Money, Settlement};

pub struct ExpenseHistoryEntry<'a> {
    pub expense: &'a Expense,
    /// `None` once the payer has left the group.
    pub payer_name: Option<&'a str>,
    /// Names of participants still on the roster.
    pub participant_names: Vec<&'a str>,
    pub share: Option<Money>,
}

pub struct SettlementHistoryEntry<'a> {
    pub settlement: &'a Settlement,
    pub from_name: Option<&'a str>,
    pub to_name: Option<&'a str>,
}

/// Expenses newest first. Entries on the same date keep their recorded order.
pub fn expense_history(snapshot: &LedgerSnapshot) -> Vec<ExpenseHistoryEntry<'_>> {
    let mut expenses: Vec<&Expense> = snapshot.expenses.iter().collect();
    expenses.sort_by(|a, b| b.date.cmp(&a.date));

    expenses
        .into_iter()
        .map(|expense| ExpenseHistoryEntry {
            expense,
            payer_name: snapshot.display_name(expense.payer_id),
            participant_names: expense
                .participant_ids
                .iter()
                .filter_map(|&id| snapshot.display_name(id))
                .collect(),
            share: expense.amount.split(expense.participant_ids.len()),
        })
        .collect()
}

pub fn settlement_history(snapshot: &LedgerSnapshot) -> Vec<SettlementHistoryEntry<'_>> {
    let mut settlements: Vec<&Settlement> = snapshot.settlements.iter().collect();
    settlements.sort_by(|a, b| b.date.cmp(&a.date));

    settlements
        .into_iter()
        .map(|settlement| SettlementHistoryEntry {
            settlement,
            from_name: snapshot.display_name(settlement.from_id),
            to_name: snapshot.display_name(settlement.to_id),
        })
        .collect()
}
