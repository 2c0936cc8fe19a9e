#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod history;
pub mod ledger_processor;
pub mod model;
pub mod ports;
pub mod validation;

pub use error::{LedgerSourceError, ProcessError, ValidationError};
pub use history::{
    ExpenseHistoryEntry, SettlementHistoryEntry, expense_history, settlement_history,
};
pub use ledger_processor::LedgerProcessor;
pub use model::{
    ExpenseDraft, LedgerReport, MemberDraft, NewExpense, NewMember, NewSettlement,
    SettlementDraft,
};
pub use ports::{LedgerSource, LedgerWriter, MemberDirectory};
pub use validation::{LedgerValidator, MAX_AMOUNT, parse_amount};
