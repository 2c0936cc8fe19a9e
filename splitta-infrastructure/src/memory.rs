use crate::records;
use splitta_application::{
    LedgerSource, LedgerSourceError, LedgerWriter, NewExpense, NewMember, NewSettlement,
};
use splitta_domain::{Expense, LedgerSnapshot, Member, MemberId, Settlement};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Ledger kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    snapshot: RwLock<LedgerSnapshot>,
}

impl InMemoryLedger {
    pub fn new(snapshot: LedgerSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, LedgerSnapshot>, LedgerSourceError> {
        self.snapshot
            .read()
            .map_err(|_| LedgerSourceError::Unavailable("ledger lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, LedgerSnapshot>, LedgerSourceError> {
        self.snapshot
            .write()
            .map_err(|_| LedgerSourceError::Unavailable("ledger lock poisoned".to_string()))
    }
}

impl LedgerSource for InMemoryLedger {
    fn snapshot(&self) -> Result<LedgerSnapshot, LedgerSourceError> {
        Ok(self.read()?.clone())
    }
}

impl LedgerWriter for InMemoryLedger {
    fn insert_expense(&self, expense: NewExpense) -> Result<Expense, LedgerSourceError> {
        Ok(records::push_expense(&mut *self.write()?, expense))
    }

    fn insert_settlement(
        &self,
        settlement: NewSettlement,
    ) -> Result<Settlement, LedgerSourceError> {
        Ok(records::push_settlement(&mut *self.write()?, settlement))
    }

    fn insert_member(&self, member: NewMember) -> Result<Member, LedgerSourceError> {
        Ok(records::push_member(&mut *self.write()?, member))
    }

    fn remove_member(&self, member_id: MemberId) -> Result<Member, LedgerSourceError> {
        records::take_member(&mut *self.write()?, member_id)
    }
}
