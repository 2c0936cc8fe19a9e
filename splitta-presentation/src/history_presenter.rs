use crate::{
    currency::Currency,
    text_table::{Alignment, TextTableBuilder},
};
use chrono::NaiveDate;
use splitta_application::{ExpenseHistoryEntry, SettlementHistoryEntry};
use splitta_domain::MonthlyTotal;
use splitta_i18n as i18n;
use std::borrow::Cow;

pub struct HistoryPresenter;

impl HistoryPresenter {
    pub fn render_expenses(entries: &[ExpenseHistoryEntry<'_>], currency: &Currency) -> String {
        if entries.is_empty() {
            return format!("{}\n", i18n::NO_EXPENSES);
        }

        TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Left,
                Alignment::Left,
                Alignment::Right,
                Alignment::Left,
                Alignment::Right,
            ])
            .headers(&[
                Cow::Borrowed(i18n::DATE),
                Cow::Borrowed(i18n::DESCRIPTION),
                Cow::Borrowed(i18n::PAID_BY),
                Cow::Borrowed(i18n::AMOUNT),
                Cow::Borrowed(i18n::SPLIT_AMONG),
                Cow::Borrowed(i18n::PER_PERSON),
            ])
            .rows(entries.iter().map(|entry| {
                [
                    Cow::Owned(format_date(entry.expense.date)),
                    Cow::Borrowed(entry.expense.description.as_str()),
                    Cow::Borrowed(entry.payer_name.unwrap_or(i18n::UNKNOWN_MEMBER)),
                    Cow::Owned(currency.format(entry.expense.amount)),
                    Cow::Owned(entry.participant_names.join(", ")),
                    entry
                        .share
                        .map_or(Cow::Borrowed(""), |share| Cow::Owned(currency.format(share))),
                ]
            }))
            .build()
    }

    pub fn render_settlements(
        entries: &[SettlementHistoryEntry<'_>],
        currency: &Currency,
    ) -> String {
        if entries.is_empty() {
            return format!("{}\n", i18n::NO_SETTLEMENTS);
        }

        TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Left, Alignment::Right])
            .headers(&[
                Cow::Borrowed(i18n::DATE),
                Cow::Borrowed(i18n::SETTLEMENT),
                Cow::Borrowed(i18n::AMOUNT),
            ])
            .rows(entries.iter().map(|entry| {
                let from = entry.from_name.unwrap_or(i18n::UNKNOWN_MEMBER);
                let to = entry.to_name.unwrap_or(i18n::UNKNOWN_MEMBER);
                [
                    Cow::Owned(format_date(entry.settlement.date)),
                    Cow::Owned(i18n::paid_to(from, to).to_string()),
                    Cow::Owned(currency.format(entry.settlement.amount)),
                ]
            }))
            .build()
    }

    pub fn render_monthly(totals: &[MonthlyTotal], currency: &Currency) -> String {
        if totals.is_empty() {
            return format!("{}\n", i18n::NO_EXPENSES);
        }

        TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Right, Alignment::Right])
            .headers(&[
                Cow::Borrowed(i18n::MONTH),
                Cow::Borrowed(i18n::EXPENSES),
                Cow::Borrowed(i18n::TOTAL),
            ])
            .rows(totals.iter().map(|month| {
                [
                    Cow::Owned(month.label()),
                    Cow::Owned(month.expense_count.to_string()),
                    Cow::Owned(currency.format(month.total)),
                ]
            }))
            .build()
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
