use crate::model::{MemberBalances, MemberId, Money, SettlementPlan, Transfer};

/// Greedy settlement suggestion service
///
/// Pairs the largest debtor with the largest creditors first. The result keeps the
/// transfer count low in common cases but is not guaranteed to be minimal.
#[derive(Clone, Copy, Debug)]
pub struct SettlementSuggester {
    epsilon: Money,
}

impl Default for SettlementSuggester {
    fn default() -> Self {
        Self::new(Money::MINOR_UNIT)
    }
}

impl SettlementSuggester {
    pub fn new(epsilon: Money) -> Self {
        Self {
            epsilon: epsilon.abs(),
        }
    }

    pub fn epsilon(&self) -> Money {
        self.epsilon
    }

    /// Suggest transfers that bring every net balance within epsilon of zero
    ///
    /// # Arguments
    /// * `balances` - Output of the balance calculator; map order breaks ties
    ///
    /// # Returns
    /// Ordered transfers, or `SettlementPlan::AllSettled` when nothing is outstanding
    pub fn suggest(&self, balances: &MemberBalances) -> SettlementPlan {
        let mut debtors: Vec<(MemberId, Money)> = Vec::new();
        let mut creditors: Vec<(MemberId, Money)> = Vec::new();

        for (&member, balance) in balances {
            if balance.net.is_within(self.epsilon) {
                continue;
            }
            if balance.net.is_negative() {
                debtors.push((member, balance.net.abs()));
            } else {
                creditors.push((member, balance.net));
            }
        }

        // Stable sorts: equal magnitudes keep roster order.
        debtors.sort_by(|a, b| b.1.cmp(&a.1));
        creditors.sort_by(|a, b| b.1.cmp(&a.1));

        let mut transfers = Vec::new();
        for &(debtor, debt) in &debtors {
            let mut remaining = debt;

            for (creditor, credit) in creditors.iter_mut() {
                if remaining <= self.epsilon {
                    break;
                }
                if *credit <= self.epsilon {
                    continue;
                }

                let amount = remaining.min(*credit);
                if amount >= self.epsilon {
                    transfers.push(Transfer {
                        from: debtor,
                        to: *creditor,
                        amount,
                    });
                    remaining -= amount;
                    *credit -= amount;
                }
            }
        }

        tracing::debug!(
            debtors = debtors.len(),
            creditors = creditors.len(),
            transfers = transfers.len(),
            "suggested settlement transfers"
        );

        SettlementPlan::from_transfers(transfers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Balance;
    use rstest::{fixture, rstest};

    #[fixture]
    fn suggester() -> SettlementSuggester {
        SettlementSuggester::default()
    }

    fn balances(nets: &[(u64, Money)]) -> MemberBalances {
        nets.iter()
            .map(|&(id, net)| {
                (
                    MemberId(id),
                    Balance {
                        net,
                        ..Balance::default()
                    },
                )
            })
            .collect()
    }

    fn whole(nets: &[(u64, i64)]) -> MemberBalances {
        balances(
            &nets
                .iter()
                .map(|&(id, net)| (id, Money::from_i64(net)))
                .collect::<Vec<_>>(),
        )
    }

    #[rstest]
    #[case::rent_three_ways(
        whole(&[(1, 200), (2, -100), (3, -100)]),
        vec![(2, 1, 100), (3, 1, 100)]
    )]
    #[case::largest_debtor_first(
        whole(&[(1, -30), (2, -70), (3, 100)]),
        vec![(2, 3, 70), (1, 3, 30)]
    )]
    #[case::debtor_spans_creditors(
        whole(&[(1, 60), (2, 40), (3, -100)]),
        vec![(3, 1, 60), (3, 2, 40)]
    )]
    #[case::creditor_order_not_resorted(
        whole(&[(1, 50), (2, 40), (3, -60), (4, -30)]),
        vec![(3, 1, 50), (3, 2, 10), (4, 2, 30)]
    )]
    #[case::tie_keeps_roster_order(
        whole(&[(4, -50), (2, -50), (7, 100)]),
        vec![(4, 7, 50), (2, 7, 50)]
    )]
    #[case::everyone_even(whole(&[(1, 0), (2, 0)]), vec![])]
    #[case::empty_roster(whole(&[]), vec![])]
    fn suggestion_cases(
        suggester: SettlementSuggester,
        #[case] balances: MemberBalances,
        #[case] expected: Vec<(u64, u64, i64)>,
    ) {
        let plan = suggester.suggest(&balances);

        let expected: Vec<Transfer> = expected
            .into_iter()
            .map(|(from, to, amount)| Transfer {
                from: MemberId(from),
                to: MemberId(to),
                amount: Money::from_i64(amount),
            })
            .collect();
        assert_eq!(plan.transfers(), expected.as_slice());
        assert_eq!(plan.is_settled(), expected.is_empty());
    }

    #[rstest]
    fn balances_inside_tolerance_are_ignored(suggester: SettlementSuggester) {
        let plan = suggester.suggest(&balances(&[
            (1, Money::new(1, 2)),
            (2, Money::new(-1, 2)),
            (3, Money::new(5, 3)),
        ]));

        assert_eq!(plan, SettlementPlan::AllSettled);
    }

    #[rstest]
    fn repeating_fraction_leaves_no_dust(suggester: SettlementSuggester) {
        let third = Money::from_i64(100).split(3).unwrap();
        let plan = suggester.suggest(&balances(&[
            (1, Money::from_i64(100) - third),
            (2, -third),
            (3, -third),
        ]));

        assert_eq!(plan.transfers().len(), 2);
        for transfer in plan.transfers() {
            assert_eq!(transfer.to, MemberId(1));
            assert_eq!(transfer.amount, third);
        }
    }

    #[test]
    fn wider_tolerance_suppresses_small_debts() {
        let suggester = SettlementSuggester::new(Money::from_i64(5));
        let plan = suggester.suggest(&whole(&[(1, 4), (2, -4), (3, 10), (4, -10)]));

        assert_eq!(
            plan.transfers(),
            &[Transfer {
                from: MemberId(4),
                to: MemberId(3),
                amount: Money::from_i64(10),
            }]
        );
    }
}
