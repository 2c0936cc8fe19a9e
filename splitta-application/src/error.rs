use splitta_domain::MemberId;
use thiserror::Error;

/// Rejections raised before a record reaches the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a description")]
    EmptyDescription,
    #[error("Please enter a valid amount (got '{0}')")]
    InvalidAmount(String),
    #[error("Amount must be greater than zero (got {0})")]
    NonPositiveAmount(String),
    #[error("Amounts can have at most two decimal places (got {0})")]
    TooManyDecimals(String),
    #[error("Amount is too large (got {0})")]
    AmountTooLarge(String),
    #[error("Please select who paid")]
    MissingPayer,
    #[error("Please select at least one person to split the expense with")]
    EmptyParticipants,
    #[error("Please select who paid and who received the settlement")]
    MissingSettlementParty,
    #[error("A settlement needs two different members (got {0} twice)")]
    SelfSettlement(MemberId),
    #[error("Member {0} is not part of this group")]
    UnknownMember(MemberId),
    #[error("Please enter a member name")]
    EmptyMemberName,
    #[error("Please add at least one member first")]
    EmptyRoster,
}

#[derive(Debug, Error)]
pub enum LedgerSourceError {
    #[error("Failed to access ledger: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed ledger document: {0}")]
    Malformed(String),
    #[error("Member {0} does not exist")]
    MemberNotFound(MemberId),
    #[error("Ledger is unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Source(#[from] LedgerSourceError),
}
