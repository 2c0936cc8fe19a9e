use crate::{
    currency::Currency,
    member_label,
    text_table::{Alignment, TextTableBuilder},
};
use splitta_application::{LedgerReport, MemberDirectory};
use splitta_domain::{Balance, Member, MemberBalances, SettlementPlan};
use splitta_i18n as i18n;
use std::borrow::Cow;

pub struct ReportPresenter;

pub struct ReportView {
    pub balance_table: String,
    /// One line per suggested transfer, or the settled-up message.
    pub suggestions: Vec<String>,
}

impl ReportView {
    pub fn to_text(&self) -> String {
        let mut text = format!("{}\n{}\n", i18n::BALANCES, self.balance_table);
        text.push_str(i18n::PAYMENT_SUGGESTIONS);
        text.push('\n');
        for line in &self.suggestions {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}

impl ReportPresenter {
    pub fn render(report: &LedgerReport, currency: &Currency) -> ReportView {
        ReportView {
            balance_table: Self::build_balance_table(&report.balances, &report.members, currency),
            suggestions: Self::build_suggestions(&report.plan, &report.members, currency),
        }
    }

    pub fn build_balance_table(
        balances: &MemberBalances,
        member_directory: &dyn MemberDirectory,
        currency: &Currency,
    ) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
            ])
            .headers(&[
                Cow::Borrowed(i18n::MEMBER),
                Cow::Borrowed(i18n::PAID),
                Cow::Borrowed(i18n::OWES),
                Cow::Borrowed(i18n::NET_BALANCE),
            ]);

        for (&member_id, balance) in balances {
            builder = builder.row([
                Cow::Borrowed(member_label(member_id, member_directory)),
                Cow::Owned(currency.format(balance.paid)),
                Cow::Owned(currency.format(balance.owes)),
                Cow::Owned(format_net(balance, currency)),
            ]);
        }

        builder.build()
    }

    /// Numbered suggestion lines. The numbers are what `settle-suggestion` accepts.
    pub fn build_suggestions(
        plan: &SettlementPlan,
        member_directory: &dyn MemberDirectory,
        currency: &Currency,
    ) -> Vec<String> {
        match plan {
            SettlementPlan::AllSettled => vec![i18n::EVERYONE_SETTLED.to_string()],
            SettlementPlan::Transfers(transfers) => transfers
                .iter()
                .enumerate()
                .map(|(index, transfer)| {
                    let from = member_label(transfer.from, member_directory);
                    let to = member_label(transfer.to, member_directory);
                    format!(
                        "{}. {}",
                        index + 1,
                        i18n::should_pay(from, to, currency.format(transfer.amount))
                    )
                })
                .collect(),
        }
    }

    pub fn build_roster_table(members: &[Member]) -> String {
        TextTableBuilder::new()
            .alignments(&[Alignment::Right, Alignment::Left])
            .headers(&[Cow::Borrowed(i18n::ID), Cow::Borrowed(i18n::NAME)])
            .rows(members.iter().map(|member| {
                [
                    Cow::Owned(member.id.0.to_string()),
                    Cow::Borrowed(member.name.as_str()),
                ]
            }))
            .build()
    }
}

fn format_net(balance: &Balance, currency: &Currency) -> String {
    let amount = currency.format(balance.net.abs());
    if balance.net.is_positive() {
        format!("{amount} {}", i18n::RECEIVES)
    } else if balance.net.is_negative() {
        format!("{amount} {}", i18n::PAYS)
    } else {
        amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use splitta_domain::{MemberId, Money, Transfer};

    #[fixture]
    fn report() -> LedgerReport {
        let members = vec![
            Member {
                id: MemberId(1),
                name: "Asha".to_string(),
            },
            Member {
                id: MemberId(2),
                name: "Ben".to_string(),
            },
            Member {
                id: MemberId(3),
                name: "Chitra".to_string(),
            },
        ];
        let mut balances = MemberBalances::new();
        balances.insert(
            MemberId(1),
            Balance {
                paid: Money::from_i64(900),
                owes: Money::from_i64(300),
                net: Money::from_i64(600),
            },
        );
        balances.insert(
            MemberId(2),
            Balance {
                paid: Money::ZERO,
                owes: Money::from_i64(300),
                net: Money::from_i64(-300),
            },
        );
        balances.insert(MemberId(3), Balance::default());

        LedgerReport {
            members,
            balances,
            plan: SettlementPlan::Transfers(vec![Transfer {
                from: MemberId(2),
                to: MemberId(1),
                amount: Money::from_i64(300),
            }]),
        }
    }

    #[rstest]
    fn balance_table_marks_direction(report: LedgerReport) {
        let view = ReportPresenter::render(&report, &Currency::default());

        let lines: Vec<&str> = view.balance_table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Member"));
        assert!(lines[2].starts_with("Asha"));
        assert!(lines[2].ends_with("₹ 600.00 (receives)"));
        assert!(lines[3].ends_with("₹ 300.00 (pays)"));
        assert!(lines[4].ends_with("₹ 0.00"));
    }

    #[rstest]
    fn suggestions_are_numbered(report: LedgerReport) {
        let view = ReportPresenter::render(&report, &Currency::default());
        assert_eq!(view.suggestions, vec!["1. Ben should pay Asha ₹ 300.00"]);
    }

    #[rstest]
    fn settled_plan_renders_sentinel_message(mut report: LedgerReport) {
        report.plan = SettlementPlan::AllSettled;
        let view = ReportPresenter::render(&report, &Currency::default());

        assert_eq!(view.suggestions, vec!["Everyone is settled up!"]);
        assert!(view.to_text().ends_with("Payment Suggestions\nEveryone is settled up!\n"));
    }

    #[rstest]
    fn removed_members_show_as_unknown(mut report: LedgerReport) {
        report.members.remove(1);
        let view = ReportPresenter::render(&report, &Currency::default());
        assert_eq!(view.suggestions, vec!["1. Unknown should pay Asha ₹ 300.00"]);
    }

    #[rstest]
    fn roster_lists_ids(report: LedgerReport) {
        let table = ReportPresenter::build_roster_table(&report.members);
        assert!(table.contains(" 3 | Chitra"));
    }
}
