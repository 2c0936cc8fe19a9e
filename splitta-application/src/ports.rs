use crate::{
    error::LedgerSourceError,
    model::{NewExpense, NewMember, NewSettlement},
};
use splitta_domain::{Expense, LedgerSnapshot, Member, MemberId, Settlement};
use std::collections::HashMap;

/// Supplies immutable snapshots of a group's ledger.
pub trait LedgerSource: Send + Sync {
    fn snapshot(&self) -> Result<LedgerSnapshot, LedgerSourceError>;
}

/// Persists new records. Ids are assigned by the implementation.
pub trait LedgerWriter: Send + Sync {
    fn insert_expense(&self, expense: NewExpense) -> Result<Expense, LedgerSourceError>;

    fn insert_settlement(&self, settlement: NewSettlement)
    -> Result<Settlement, LedgerSourceError>;

    fn insert_member(&self, member: NewMember) -> Result<Member, LedgerSourceError>;

    /// Removes a member from the roster. Historical records keep their references.
    fn remove_member(&self, member_id: MemberId) -> Result<Member, LedgerSourceError>;
}

pub trait MemberDirectory {
    fn display_name(&self, member_id: MemberId) -> Option<&str>;
}

impl MemberDirectory for HashMap<MemberId, String> {
    fn display_name(&self, member_id: MemberId) -> Option<&str> {
        self.get(&member_id).map(String::as_str)
    }
}

impl MemberDirectory for [Member] {
    fn display_name(&self, member_id: MemberId) -> Option<&str> {
        self.iter()
            .find(|member| member.id == member_id)
            .map(|member| member.name.as_str())
    }
}

impl MemberDirectory for Vec<Member> {
    fn display_name(&self, member_id: MemberId) -> Option<&str> {
        self.as_slice().display_name(member_id)
    }
}

impl MemberDirectory for LedgerSnapshot {
    fn display_name(&self, member_id: MemberId) -> Option<&str> {
        self.members.display_name(member_id)
    }
}
