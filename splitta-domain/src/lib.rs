#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    Balance, Expense, ExpenseId, LedgerSnapshot, Member, MemberBalances, MemberId, Money,
    Settlement, SettlementId, SettlementPlan, Transfer,
};
pub use services::{
    BalanceAccumulator, BalanceCalculator, MonthlyTotal, MonthlyTotals, SettlementSuggester,
    SplitPolicy,
};
