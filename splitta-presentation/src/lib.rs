#![warn(clippy::uninlined_format_args)]

pub mod currency;
pub mod history_presenter;
pub mod report_presenter;
pub mod text_table;

pub use currency::Currency;
pub use history_presenter::HistoryPresenter;
pub use report_presenter::{ReportPresenter, ReportView};

use splitta_application::MemberDirectory;
use splitta_domain::MemberId;

/// Display name for a member, or the placeholder used for members who left the group.
pub(crate) fn member_label<'a>(
    member_id: MemberId,
    member_directory: &'a dyn MemberDirectory,
) -> &'a str {
    member_directory
        .display_name(member_id)
        .unwrap_or(splitta_i18n::UNKNOWN_MEMBER)
}
