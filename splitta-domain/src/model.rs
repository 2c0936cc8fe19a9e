use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub u64);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettlementId(pub u64);

/// Currency amount backed by a fixed-point decimal.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);
    /// One hundredth of the currency unit.
    pub const MINOR_UNIT: Self = Self(Decimal::from_parts(1, 0, 0, false, 2));

    pub fn new(num: i64, scale: u32) -> Self {
        Self(Decimal::new(num, scale))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Whether the amount lies inside the closed band `[-tolerance, tolerance]`.
    pub fn is_within(self, tolerance: Money) -> bool {
        self.abs() <= tolerance.abs()
    }

    /// Equal share of this amount across `parts` people, `None` when there is nobody to split with.
    pub fn split(self, parts: usize) -> Option<Money> {
        if parts == 0 {
            return None;
        }
        Some(Self(self.0 / Decimal::from(parts)))
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    pub fn round_dp(self, scale: u32) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    pub fn trunc_dp(self, scale: u32) -> Self {
        Self(self.0.round_dp_with_strategy(scale, RoundingStrategy::ToZero))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.round_dp(2).0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    #[serde(default)]
    pub description: String,
    pub amount: Money,
    #[serde(alias = "paidBy")]
    pub payer_id: MemberId,
    pub date: NaiveDate,
    #[serde(alias = "splitAmong", default)]
    pub participant_ids: Vec<MemberId>,
}

/// A recorded repayment from `from_id` to `to_id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub id: SettlementId,
    pub from_id: MemberId,
    pub to_id: MemberId,
    pub amount: Money,
    pub date: NaiveDate,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Balance {
    pub paid: Money,
    pub owes: Money,
    pub net: Money,
}

/// Balances keyed by member, in roster order.
pub type MemberBalances = IndexMap<MemberId, Balance>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    #[serde(rename = "fromId")]
    pub from: MemberId,
    #[serde(rename = "toId")]
    pub to: MemberId,
    pub amount: Money,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SettlementPlan {
    AllSettled,
    Transfers(Vec<Transfer>),
}

impl SettlementPlan {
    pub fn from_transfers(transfers: Vec<Transfer>) -> Self {
        if transfers.is_empty() {
            Self::AllSettled
        } else {
            Self::Transfers(transfers)
        }
    }

    pub fn transfers(&self) -> &[Transfer] {
        match self {
            Self::AllSettled => &[],
            Self::Transfers(transfers) => transfers,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::AllSettled)
    }
}

/// Immutable view of one group's members, expenses and settlements.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub settlements: Vec<Settlement>,
}

impl LedgerSnapshot {
    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|member| member.id == id)
    }

    pub fn member_ids(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.members.iter().map(|member| member.id)
    }

    /// Next unused member id. Ids still referenced by records of removed members are skipped.
    pub fn next_member_id(&self) -> MemberId {
        let highest = self
            .member_ids()
            .chain(self.referenced_member_ids())
            .map(|id| id.0)
            .max()
            .unwrap_or(0);
        MemberId(highest + 1)
    }

    pub fn next_expense_id(&self) -> ExpenseId {
        ExpenseId(self.expenses.iter().map(|e| e.id.0).max().unwrap_or(0) + 1)
    }

    pub fn next_settlement_id(&self) -> SettlementId {
        SettlementId(
            self.settlements
                .iter()
                .map(|s| s.id.0)
                .max()
                .unwrap_or(0)
                + 1,
        )
    }

    fn referenced_member_ids(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.expenses
            .iter()
            .flat_map(|e| std::iter::once(e.payer_id).chain(e.participant_ids.iter().copied()))
            .chain(self.settlements.iter().flat_map(|s| [s.from_id, s.to_id]))
    }

    /// Member ids referenced by records but missing from the roster, in first-seen order.
    pub fn dangling_member_ids(&self) -> Vec<MemberId> {
        let mut dangling = Vec::new();
        for id in self.referenced_member_ids() {
            if self.member(id).is_none() && !dangling.contains(&id) {
                dangling.push(id);
            }
        }
        dangling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case::whole(Money::from_i64(100), "100.00")]
    #[case::cents(Money::new(1250, 2), "12.50")]
    #[case::repeating(Money::from_i64(100).split(3).unwrap(), "33.33")]
    #[case::midpoint(Money::new(5, 3), "0.01")]
    #[case::negative(Money::new(-4567, 2), "-45.67")]
    fn money_display(#[case] money: Money, #[case] expected: &str) {
        assert_eq!(money.to_string(), expected);
    }

    #[test]
    fn split_by_zero_is_none() {
        assert_eq!(Money::from_i64(90).split(0), None);
        assert_eq!(Money::from_i64(90).split(2), Some(Money::from_i64(45)));
    }

    #[test]
    fn minor_unit_is_one_cent() {
        assert_eq!(Money::MINOR_UNIT.as_decimal(), dec!(0.01));
        assert!(Money::new(-1, 2).is_within(Money::MINOR_UNIT));
        assert!(!Money::new(2, 2).is_within(Money::MINOR_UNIT));
    }

    #[test]
    fn scaling_by_a_count_keeps_cents() {
        assert_eq!(Money::new(3333, 2) * Decimal::from(3), Money::new(9999, 2));
        assert_eq!(Money::MINOR_UNIT * Decimal::from(2), Money::new(2, 2));
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        let max = Money::from_decimal(Decimal::MAX);
        assert_eq!(max.checked_add(Money::from_i64(1)), None);
        assert_eq!((-max).checked_sub(Money::from_i64(1)), None);
        assert_eq!(
            Money::from_i64(5).checked_sub(Money::from_i64(7)),
            Some(Money::from_i64(-2))
        );
    }

    #[test]
    fn plan_without_transfers_is_settled() {
        assert_eq!(
            SettlementPlan::from_transfers(Vec::new()),
            SettlementPlan::AllSettled
        );
        assert!(SettlementPlan::AllSettled.transfers().is_empty());
    }

    #[test]
    fn snapshot_accepts_external_field_names() {
        let snapshot: LedgerSnapshot = serde_json::from_str(
            r#"{
                "members": [{"id": 1, "name": "Asha"}, {"id": 2, "name": "Ben"}],
                "expenses": [{
                    "id": 7, "description": "Rent", "amount": 90,
                    "paidBy": 1, "date": "2024-03-01", "splitAmong": [1, 2]
                }],
                "settlements": [{
                    "id": 3, "fromId": 2, "toId": 1, "amount": "45.00", "date": "2024-03-02"
                }]
            }"#,
        )
        .expect("snapshot should parse");

        assert_eq!(snapshot.expenses[0].payer_id, MemberId(1));
        assert_eq!(snapshot.expenses[0].amount, Money::from_i64(90));
        assert_eq!(
            snapshot.expenses[0].participant_ids,
            vec![MemberId(1), MemberId(2)]
        );
        assert_eq!(snapshot.settlements[0].amount.as_decimal(), dec!(45.00));
        assert_eq!(snapshot.next_expense_id(), ExpenseId(8));
        assert_eq!(snapshot.next_settlement_id(), SettlementId(4));
        assert_eq!(snapshot.next_member_id(), MemberId(3));
    }

    #[test]
    fn dangling_ids_are_reported_once() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let snapshot = LedgerSnapshot {
            members: vec![Member {
                id: MemberId(1),
                name: "Asha".to_string(),
            }],
            expenses: vec![Expense {
                id: ExpenseId(1),
                description: "Groceries".to_string(),
                amount: Money::from_i64(30),
                payer_id: MemberId(1),
                date,
                participant_ids: vec![MemberId(1), MemberId(9), MemberId(9)],
            }],
            settlements: vec![Settlement {
                id: SettlementId(1),
                from_id: MemberId(9),
                to_id: MemberId(4),
                amount: Money::from_i64(10),
                date,
            }],
        };

        assert_eq!(snapshot.dangling_member_ids(), vec![MemberId(9), MemberId(4)]);
        assert_eq!(snapshot.next_member_id(), MemberId(10));
    }
}
