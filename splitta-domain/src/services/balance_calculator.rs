use crate::{
    model::{
        Balance, Expense, LedgerSnapshot, Member, MemberBalances, MemberId, Money, Settlement,
    },
    services::SplitPolicy,
};
use rust_decimal::Decimal;

/// Folds expenses and settlements into per-member paid/owes totals.
///
/// Contributions addressed to ids outside the initial roster are dropped. A record that
/// would push any total past `BALANCE_LIMIT` is skipped as a whole.
pub struct BalanceAccumulator {
    balances: MemberBalances,
    split_policy: SplitPolicy,
}

impl BalanceAccumulator {
    pub fn new_with_members<I>(members: I, split_policy: SplitPolicy) -> Self
    where
        I: IntoIterator<Item = MemberId>,
    {
        let balances = members
            .into_iter()
            .map(|member| (member, Balance::default()))
            .collect();

        Self {
            balances,
            split_policy,
        }
    }

    pub fn apply_expense(&mut self, expense: &Expense) {
        let participants = &expense.participant_ids;
        let shares = self
            .split_policy
            .shares(expense.amount, participants.len());
        if shares.is_empty() {
            tracing::debug!(expense = expense.id.0, "skipping expense without participants");
            return;
        }

        let mut staged = Vec::with_capacity(participants.len() + 1);
        let applied = self
            .credit_paid(&mut staged, expense.payer_id, expense.amount)
            .and_then(|()| {
                participants.iter().zip(shares).try_for_each(|(participant, share)| {
                    self.credit_owes(&mut staged, *participant, share)
                })
            });
        match applied {
            Some(()) => self.commit(staged),
            None => tracing::warn!(
                expense = expense.id.0,
                "skipping expense that would push a balance out of range"
            ),
        }
    }

    pub fn apply_settlement(&mut self, settlement: &Settlement) {
        let mut staged = Vec::with_capacity(2);
        let applied = self
            .credit_owes(&mut staged, settlement.from_id, -settlement.amount)
            .and_then(|()| self.credit_paid(&mut staged, settlement.to_id, -settlement.amount));
        match applied {
            Some(()) => self.commit(staged),
            None => tracing::warn!(
                settlement = settlement.id.0,
                "skipping settlement that would push a balance out of range"
            ),
        }
    }

    pub fn into_balances(mut self) -> MemberBalances {
        for balance in self.balances.values_mut() {
            // Both totals stay within BALANCE_LIMIT, so the difference cannot overflow.
            balance.net = balance.paid - balance.owes;
        }
        self.balances
    }

    fn credit_paid(&self, staged: &mut Staged, member: MemberId, amount: Money) -> Option<()> {
        match self.stage(staged, member) {
            Some(balance) => balance.paid = bounded_add(balance.paid, amount)?,
            None => drop_unknown(member),
        }
        Some(())
    }

    fn credit_owes(&self, staged: &mut Staged, member: MemberId, amount: Money) -> Option<()> {
        match self.stage(staged, member) {
            Some(balance) => balance.owes = bounded_add(balance.owes, amount)?,
            None => drop_unknown(member),
        }
        Some(())
    }

    /// Working copy of `member`'s balance, `None` for ids outside the roster.
    fn stage<'s>(&self, staged: &'s mut Staged, member: MemberId) -> Option<&'s mut Balance> {
        let index = match staged.iter().position(|(id, _)| *id == member) {
            Some(index) => index,
            None => {
                staged.push((member, *self.balances.get(&member)?));
                staged.len() - 1
            }
        };
        staged.get_mut(index).map(|(_, balance)| balance)
    }

    fn commit(&mut self, staged: Staged) {
        for (member, balance) in staged {
            self.balances.insert(member, balance);
        }
    }
}

type Staged = Vec<(MemberId, Balance)>;

/// Largest magnitude a paid or owes total may reach (10^27).
const BALANCE_LIMIT: Decimal =
    Decimal::from_parts(0xE800_0000, 0x9FD0_803C, 0x033B_2E3C, false, 0);

fn bounded_add(total: Money, amount: Money) -> Option<Money> {
    total
        .checked_add(amount)
        .filter(|sum| sum.abs().as_decimal() <= BALANCE_LIMIT)
}

fn drop_unknown(member: MemberId) {
    tracing::debug!(member = member.0, "dropping contribution for unknown member");
}

/// Balance calculation service
#[derive(Clone, Copy, Debug, Default)]
pub struct BalanceCalculator {
    split_policy: SplitPolicy,
}

impl BalanceCalculator {
    pub fn new(split_policy: SplitPolicy) -> Self {
        Self { split_policy }
    }

    /// Recompute balances from scratch.
    ///
    /// # Arguments
    /// * `members` - Roster; its order is the order of the returned map
    /// * `expenses` - Expenses, applied before any settlement
    /// * `settlements` - Recorded repayments
    ///
    /// # Returns
    /// Paid, owes and net totals for every roster member
    pub fn calculate(
        &self,
        members: &[Member],
        expenses: &[Expense],
        settlements: &[Settlement],
    ) -> MemberBalances {
        let mut accumulator = BalanceAccumulator::new_with_members(
            members.iter().map(|member| member.id),
            self.split_policy,
        );
        for expense in expenses {
            accumulator.apply_expense(expense);
        }
        for settlement in settlements {
            accumulator.apply_settlement(settlement);
        }
        accumulator.into_balances()
    }

    pub fn calculate_snapshot(&self, snapshot: &LedgerSnapshot) -> MemberBalances {
        self.calculate(
            &snapshot.members,
            &snapshot.expenses,
            &snapshot.settlements,
        )
    }
}
