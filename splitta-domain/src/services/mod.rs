pub mod balance_calculator;
pub mod monthly_totals;
pub mod settlement_suggester;
pub mod split_policy;

pub use balance_calculator::{BalanceAccumulator, BalanceCalculator};
pub use monthly_totals::{MonthlyTotal, MonthlyTotals};
pub use settlement_suggester::SettlementSuggester;
pub use split_policy::SplitPolicy;
