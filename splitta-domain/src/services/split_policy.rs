use crate::model::Money;
use rust_decimal::{Decimal, prelude::ToPrimitive};

/// How an expense amount is divided among its participants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SplitPolicy {
    /// Plain decimal division. Repeating fractions stay unreconciled.
    #[default]
    Exact,
    /// Shares are truncated to `scale` decimal places and the leftover minor
    /// units go one each to participants in listed order.
    MinorUnits { scale: u32 },
}

impl SplitPolicy {
    pub fn cents() -> Self {
        Self::MinorUnits { scale: 2 }
    }

    /// Per-participant shares in participant order. Empty when there are no participants.
    pub fn shares(self, amount: Money, participants: usize) -> Vec<Money> {
        let Some(share) = amount.split(participants) else {
            return Vec::new();
        };

        match self {
            Self::Exact => vec![share; participants],
            Self::MinorUnits { scale } => distribute_minor_units(amount, participants, scale),
        }
    }
}

fn distribute_minor_units(amount: Money, participants: usize, scale: u32) -> Vec<Money> {
    let unit = Money::new(1, scale);
    let base = amount.split(participants).unwrap_or_default().trunc_dp(scale);
    let leftover = amount - base * Decimal::from(participants);

    let extra_units = (leftover.as_decimal() / unit.as_decimal())
        .trunc()
        .to_usize()
        .unwrap_or(0);
    // Amounts finer than `scale` leave a residue below one unit.
    let residue = leftover - unit * Decimal::from(extra_units);

    let mut shares: Vec<Money> = (0..participants)
        .map(|idx| if idx < extra_units { base + unit } else { base })
        .collect();
    if let Some(first) = shares.first_mut() {
        *first += residue;
    }
    shares
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::even(SplitPolicy::Exact, Money::from_i64(90), 2, vec![Money::from_i64(45); 2])]
    #[case::nobody(SplitPolicy::Exact, Money::from_i64(90), 0, vec![])]
    #[case::cents_even(SplitPolicy::cents(), Money::from_i64(300), 3, vec![Money::from_i64(100); 3])]
    #[case::cents_remainder(
        SplitPolicy::cents(),
        Money::from_i64(100),
        3,
        vec![Money::new(3334, 2), Money::new(3333, 2), Money::new(3333, 2)]
    )]
    #[case::cents_two_leftover(
        SplitPolicy::cents(),
        Money::new(1001, 2),
        3,
        vec![Money::new(334, 2), Money::new(334, 2), Money::new(333, 2)]
    )]
    #[case::whole_units(
        SplitPolicy::MinorUnits { scale: 0 },
        Money::from_i64(10),
        4,
        vec![Money::from_i64(3), Money::from_i64(3), Money::from_i64(2), Money::from_i64(2)]
    )]
    #[case::sub_unit_residue(
        SplitPolicy::cents(),
        Money::new(10005, 3),
        2,
        vec![Money::new(5005, 3), Money::from_i64(5)]
    )]
    fn shares_cases(
        #[case] policy: SplitPolicy,
        #[case] amount: Money,
        #[case] participants: usize,
        #[case] expected: Vec<Money>,
    ) {
        let shares = policy.shares(amount, participants);
        assert_eq!(shares, expected);
        if participants > 0 && policy != SplitPolicy::Exact {
            assert_eq!(shares.iter().sum::<Money>(), amount);
        }
    }
}
