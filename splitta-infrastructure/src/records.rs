use splitta_application::{LedgerSourceError, NewExpense, NewMember, NewSettlement};
use splitta_domain::{Expense, LedgerSnapshot, Member, MemberId, Settlement};

pub(crate) fn push_expense(snapshot: &mut LedgerSnapshot, expense: NewExpense) -> Expense {
    let expense = expense.into_record(snapshot.next_expense_id());
    snapshot.expenses.push(expense.clone());
    expense
}

pub(crate) fn push_settlement(
    snapshot: &mut LedgerSnapshot,
    settlement: NewSettlement,
) -> Settlement {
    let settlement = settlement.into_record(snapshot.next_settlement_id());
    snapshot.settlements.push(settlement.clone());
    settlement
}

pub(crate) fn push_member(snapshot: &mut LedgerSnapshot, member: NewMember) -> Member {
    let member = member.into_record(snapshot.next_member_id());
    snapshot.members.push(member.clone());
    member
}

pub(crate) fn take_member(
    snapshot: &mut LedgerSnapshot,
    member_id: MemberId,
) -> Result<Member, LedgerSourceError> {
    let position = snapshot
        .members
        .iter()
        .position(|member| member.id == member_id)
        .ok_or(LedgerSourceError::MemberNotFound(member_id))?;
    Ok(snapshot.members.remove(position))
}
