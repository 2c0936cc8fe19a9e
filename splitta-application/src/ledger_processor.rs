use crate::{
    error::{LedgerSourceError, ProcessError},
    model::{ExpenseDraft, LedgerReport, MemberDraft, SettlementDraft},
    ports::{LedgerSource, LedgerWriter},
    validation::LedgerValidator,
};
use chrono::NaiveDate;
use splitta_domain::{
    BalanceCalculator, Expense, LedgerSnapshot, Member, MemberId, Settlement,
    SettlementSuggester, SplitPolicy, Transfer,
};

#[derive(Clone, Copy)]
pub struct LedgerProcessor<'a> {
    source: &'a dyn LedgerSource,
    writer: &'a dyn LedgerWriter,
    calculator: BalanceCalculator,
    suggester: SettlementSuggester,
}

impl<'a> LedgerProcessor<'a> {
    pub fn new(source: &'a dyn LedgerSource, writer: &'a dyn LedgerWriter) -> Self {
        Self {
            source,
            writer,
            calculator: BalanceCalculator::default(),
            suggester: SettlementSuggester::default(),
        }
    }

    pub fn with_split_policy(mut self, split_policy: SplitPolicy) -> Self {
        self.calculator = BalanceCalculator::new(split_policy);
        self
    }

    pub fn with_suggester(mut self, suggester: SettlementSuggester) -> Self {
        self.suggester = suggester;
        self
    }

    pub fn snapshot(&self) -> Result<LedgerSnapshot, LedgerSourceError> {
        self.source.snapshot()
    }

    pub fn build_report(&self) -> Result<LedgerReport, LedgerSourceError> {
        let snapshot = self.source.snapshot()?;
        Ok(self.report_for(&snapshot))
    }

    /// Balances and suggestions for an already loaded snapshot.
    pub fn report_for(&self, snapshot: &LedgerSnapshot) -> LedgerReport {
        let balances = self.calculator.calculate_snapshot(snapshot);
        let plan = self.suggester.suggest(&balances);

        LedgerReport {
            members: snapshot.members.clone(),
            balances,
            plan,
        }
    }

    /// Report after every current suggestion is applied as a settlement. Nothing is written.
    pub fn simulate_settle_all(&self, date: NaiveDate) -> Result<LedgerReport, LedgerSourceError> {
        let mut snapshot = self.source.snapshot()?;
        let plan = self.report_for(&snapshot).plan;

        for transfer in plan.transfers() {
            let id = snapshot.next_settlement_id();
            snapshot.settlements.push(Settlement {
                id,
                from_id: transfer.from,
                to_id: transfer.to,
                amount: transfer.amount,
                date,
            });
        }

        Ok(self.report_for(&snapshot))
    }

    /// Records a suggested transfer as a settlement, rounded to the currency minor unit.
    pub fn settle(&self, transfer: &Transfer, date: NaiveDate) -> Result<Settlement, ProcessError> {
        self.record_settlement(SettlementDraft {
            from_id: Some(transfer.from),
            to_id: Some(transfer.to),
            amount: transfer.amount.round_dp(2).as_decimal().to_string(),
            date,
        })
    }

    pub fn record_settlement(&self, draft: SettlementDraft) -> Result<Settlement, ProcessError> {
        let snapshot = self.source.snapshot()?;
        let settlement = LedgerValidator::new(&snapshot.members).validate_settlement(draft)?;
        let recorded = self.writer.insert_settlement(settlement)?;
        tracing::info!(
            settlement = recorded.id.0,
            from = recorded.from_id.0,
            to = recorded.to_id.0,
            "recorded settlement"
        );
        Ok(recorded)
    }

    pub fn record_expense(&self, draft: ExpenseDraft) -> Result<Expense, ProcessError> {
        let snapshot = self.source.snapshot()?;
        let expense = LedgerValidator::new(&snapshot.members).validate_expense(draft)?;
        let recorded = self.writer.insert_expense(expense)?;
        tracing::info!(expense = recorded.id.0, "recorded expense");
        Ok(recorded)
    }

    pub fn add_member(&self, draft: MemberDraft) -> Result<Member, ProcessError> {
        let snapshot = self.source.snapshot()?;
        let member = LedgerValidator::new(&snapshot.members).validate_member(draft)?;
        Ok(self.writer.insert_member(member)?)
    }

    pub fn remove_member(&self, member_id: MemberId) -> Result<Member, ProcessError> {
        Ok(self.writer.remove_member(member_id)?)
    }
}
