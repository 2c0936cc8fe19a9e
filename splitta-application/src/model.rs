use chrono::NaiveDate;
use splitta_domain::{
    Expense, ExpenseId, Member, MemberBalances, MemberId, Money, Settlement, SettlementId,
    SettlementPlan,
};

/// Raw expense input as typed by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: String,
    pub payer_id: Option<MemberId>,
    pub date: NaiveDate,
    pub participant_ids: Vec<MemberId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementDraft {
    pub from_id: Option<MemberId>,
    pub to_id: Option<MemberId>,
    pub amount: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDraft {
    pub name: String,
}

/// Validated expense waiting for an id from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub description: String,
    pub amount: Money,
    pub payer_id: MemberId,
    pub date: NaiveDate,
    pub participant_ids: Vec<MemberId>,
}

impl NewExpense {
    pub fn into_record(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            description: self.description,
            amount: self.amount,
            payer_id: self.payer_id,
            date: self.date,
            participant_ids: self.participant_ids,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSettlement {
    pub from_id: MemberId,
    pub to_id: MemberId,
    pub amount: Money,
    pub date: NaiveDate,
}

impl NewSettlement {
    pub fn into_record(self, id: SettlementId) -> Settlement {
        Settlement {
            id,
            from_id: self.from_id,
            to_id: self.to_id,
            amount: self.amount,
            date: self.date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub name: String,
}

impl NewMember {
    pub fn into_record(self, id: MemberId) -> Member {
        Member {
            id,
            name: self.name,
        }
    }
}

/// Balances and suggested transfers for one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerReport {
    pub members: Vec<Member>,
    pub balances: MemberBalances,
    pub plan: SettlementPlan,
}
