#![warn(clippy::uninlined_format_args)]

use std::fmt;

pub const MEMBER: &str = "Member";
pub const PAID: &str = "Paid";
pub const OWES: &str = "Owes";
pub const NET_BALANCE: &str = "Net Balance";
pub const RECEIVES: &str = "(receives)";
pub const PAYS: &str = "(pays)";
pub const BALANCES: &str = "Balances";
pub const PAYMENT_SUGGESTIONS: &str = "Payment Suggestions";
pub const EVERYONE_SETTLED: &str = "Everyone is settled up!";
pub const UNKNOWN_MEMBER: &str = "Unknown";

pub const DATE: &str = "Date";
pub const DESCRIPTION: &str = "Description";
pub const AMOUNT: &str = "Amount";
pub const PAID_BY: &str = "Paid By";
pub const SPLIT_AMONG: &str = "Split Among";
pub const PER_PERSON: &str = "Per Person";
pub const SETTLEMENT: &str = "Settlement";
pub const MONTH: &str = "Month";
pub const EXPENSES: &str = "Expenses";
pub const TOTAL: &str = "Total";
pub const ID: &str = "ID";
pub const NAME: &str = "Name";

pub const NO_EXPENSES: &str = "No expenses recorded yet.";
pub const NO_SETTLEMENTS: &str = "No settlements recorded yet.";
pub const NO_MEMBERS: &str = "No roommates yet. Add one with `splitta member add <name>`.";

pub struct ShouldPayMessage<'a, A> {
    from: &'a str,
    to: &'a str,
    amount: A,
}

pub struct PaidToMessage<'a> {
    from: &'a str,
    to: &'a str,
}

/// `Asha should pay Ben ₹ 10.00`
pub fn should_pay<'a, A: fmt::Display>(
    from: &'a str,
    to: &'a str,
    amount: A,
) -> ShouldPayMessage<'a, A> {
    ShouldPayMessage { from, to, amount }
}

/// `Asha paid Ben`
pub fn paid_to<'a>(from: &'a str, to: &'a str) -> PaidToMessage<'a> {
    PaidToMessage { from, to }
}

pub fn recorded_settlement(id: u64) -> String {
    format!("Recorded settlement #{id}")
}

pub fn recorded_expense(id: u64) -> String {
    format!("Recorded expense #{id}")
}

pub fn added_member(id: u64, name: &str) -> String {
    format!("Added {name} (id {id})")
}

pub fn removed_member(name: &str) -> String {
    format!("Removed {name}. Their past expenses and settlements stay in the history.")
}

pub fn no_such_suggestion(index: usize, available: usize) -> String {
    format!("There is no suggestion #{index} (the plan has {available})")
}

impl<A: fmt::Display> fmt::Display for ShouldPayMessage<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} should pay {} {}", self.from, self.to, self.amount)
    }
}

impl fmt::Display for PaidToMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} paid {}", self.from, self.to)
    }
}
