use crate::{
    error::ValidationError,
    model::{ExpenseDraft, MemberDraft, NewExpense, NewMember, NewSettlement, SettlementDraft},
};
use fxhash::FxHashSet;
use rust_decimal::Decimal;
use splitta_domain::{Member, MemberId, Money};
use std::str::FromStr;

/// Checks drafts against the current roster before they are recorded.
pub struct LedgerValidator<'a> {
    members: &'a [Member],
}

impl<'a> LedgerValidator<'a> {
    pub fn new(members: &'a [Member]) -> Self {
        Self { members }
    }

    pub fn validate_expense(&self, draft: ExpenseDraft) -> Result<NewExpense, ValidationError> {
        if self.members.is_empty() {
            return Err(ValidationError::EmptyRoster);
        }

        let description = draft.description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        let amount = parse_amount(&draft.amount)?;
        let payer_id = draft.payer_id.ok_or(ValidationError::MissingPayer)?;
        self.ensure_member(payer_id)?;

        let mut seen = FxHashSet::default();
        let participant_ids: Vec<MemberId> = draft
            .participant_ids
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect();
        if participant_ids.is_empty() {
            return Err(ValidationError::EmptyParticipants);
        }
        for &participant in &participant_ids {
            self.ensure_member(participant)?;
        }

        Ok(NewExpense {
            description: description.to_string(),
            amount,
            payer_id,
            date: draft.date,
            participant_ids,
        })
    }

    pub fn validate_settlement(
        &self,
        draft: SettlementDraft,
    ) -> Result<NewSettlement, ValidationError> {
        let (Some(from_id), Some(to_id)) = (draft.from_id, draft.to_id) else {
            return Err(ValidationError::MissingSettlementParty);
        };
        if from_id == to_id {
            return Err(ValidationError::SelfSettlement(from_id));
        }
        self.ensure_member(from_id)?;
        self.ensure_member(to_id)?;
        let amount = parse_amount(&draft.amount)?;

        Ok(NewSettlement {
            from_id,
            to_id,
            amount,
            date: draft.date,
        })
    }

    pub fn validate_member(&self, draft: MemberDraft) -> Result<NewMember, ValidationError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyMemberName);
        }
        Ok(NewMember {
            name: name.to_string(),
        })
    }

    fn ensure_member(&self, member_id: MemberId) -> Result<(), ValidationError> {
        if self.members.iter().any(|member| member.id == member_id) {
            Ok(())
        } else {
            Err(ValidationError::UnknownMember(member_id))
        }
    }
}

/// Largest amount a single expense or settlement may carry (10^15).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Parses a user-entered amount: a positive number of whole cents, at most `MAX_AMOUNT`.
pub fn parse_amount(raw: &str) -> Result<Money, ValidationError> {
    let trimmed = raw.trim();
    let value = Decimal::from_str(trimmed)
        .map_err(|_| ValidationError::InvalidAmount(trimmed.to_string()))?;
    if value <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount(trimmed.to_string()));
    }
    if value.normalize().scale() > 2 {
        return Err(ValidationError::TooManyDecimals(trimmed.to_string()));
    }
    if value > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge(trimmed.to_string()));
    }
    Ok(Money::from_decimal(value))
}
