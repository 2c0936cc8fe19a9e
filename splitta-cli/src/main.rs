#![warn(clippy::uninlined_format_args)]

mod bootstrap;

use anyhow::{Context, bail};
use bootstrap::{AppConfig, init_logging, parse_tolerance};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use splitta_application::{
    ExpenseDraft, LedgerProcessor, MemberDraft, SettlementDraft, expense_history,
    settlement_history,
};
use splitta_domain::{MemberId, MonthlyTotals, SettlementSuggester, SplitPolicy};
use splitta_i18n as i18n;
use splitta_infrastructure::JsonLedgerStore;
use splitta_presentation::{Currency, HistoryPresenter, ReportPresenter};
use std::{path::PathBuf, process};

#[derive(Parser, Debug)]
#[command(name = "splitta", version, about = "Shared expense tracker for roommates")]
struct Cli {
    /// Ledger file (defaults to $SPLITTA_LEDGER, then ./splitta.json)
    #[arg(short, long, global = true)]
    ledger: Option<PathBuf>,

    /// Currency symbol used in output
    #[arg(long, global = true)]
    currency_symbol: Option<String>,

    /// Balances within this amount of zero count as settled
    #[arg(long, global = true)]
    epsilon: Option<String>,

    /// How an expense is divided among its participants
    #[arg(long, global = true, value_enum)]
    split_policy: Option<PolicyArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Exact,
    Cents,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
enum HistoryView {
    #[default]
    Expenses,
    Monthly,
    Settlements,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an empty ledger file
    Init,
    /// Show balances and payment suggestions
    Report,
    /// Show recorded expenses, settlements or monthly totals
    History {
        #[arg(long, value_enum, default_value_t)]
        view: HistoryView,
    },
    /// Record a payment between two members
    Settle(SettleArgs),
    /// Record one of the current payment suggestions (numbered as in `report`)
    SettleSuggestion {
        index: usize,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show the report as it would be after every suggestion is paid. Nothing is written.
    Simulate,
    #[command(subcommand)]
    Expense(ExpenseCommand),
    #[command(subcommand)]
    Member(MemberCommand),
}

#[derive(Args, Debug)]
struct SettleArgs {
    #[arg(long)]
    from: u64,
    #[arg(long)]
    to: u64,
    #[arg(long)]
    amount: String,
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
enum ExpenseCommand {
    /// Record an expense. Without --participants it is split among everyone.
    Add {
        #[arg(short, long)]
        description: String,
        #[arg(short, long)]
        amount: String,
        #[arg(short, long)]
        payer: u64,
        #[arg(long, value_delimiter = ',')]
        participants: Vec<u64>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Subcommand, Debug)]
enum MemberCommand {
    Add { name: String },
    Remove { id: u64 },
    List,
}

fn main() {
    init_logging();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;
    let store = JsonLedgerStore::open(&config.ledger_path);

    if let Command::Init = cli.command {
        if store.init()? {
            println!("Created {}", store.path().display());
        } else {
            println!("{} already exists", store.path().display());
        }
        return Ok(());
    }

    let processor = LedgerProcessor::new(&store, &store)
        .with_split_policy(config.split_policy)
        .with_suggester(SettlementSuggester::new(config.epsilon));
    let currency = &config.currency;
    let context = || format!("ledger {}", store.path().display());

    match cli.command {
        Command::Init => {}
        Command::Report => {
            let report = processor.build_report().with_context(context)?;
            if report.members.is_empty() {
                println!("{}", i18n::NO_MEMBERS);
            } else {
                print!("{}", ReportPresenter::render(&report, currency).to_text());
            }
        }
        Command::History { view } => {
            let snapshot = processor.snapshot().with_context(context)?;
            let output = match view {
                HistoryView::Expenses => {
                    HistoryPresenter::render_expenses(&expense_history(&snapshot), currency)
                }
                HistoryView::Monthly => HistoryPresenter::render_monthly(
                    &MonthlyTotals::compute(&snapshot.expenses),
                    currency,
                ),
                HistoryView::Settlements => {
                    HistoryPresenter::render_settlements(&settlement_history(&snapshot), currency)
                }
            };
            print!("{output}");
        }
        Command::Settle(args) => {
            let settlement = processor.record_settlement(SettlementDraft {
                from_id: Some(MemberId(args.from)),
                to_id: Some(MemberId(args.to)),
                amount: args.amount,
                date: args.date.unwrap_or_else(today),
            })?;
            println!("{}", i18n::recorded_settlement(settlement.id.0));
        }
        Command::SettleSuggestion { index, date } => {
            let report = processor.build_report().with_context(context)?;
            let transfers = report.plan.transfers();
            let Some(transfer) = index.checked_sub(1).and_then(|i| transfers.get(i)) else {
                bail!(i18n::no_such_suggestion(index, transfers.len()));
            };
            let settlement = processor.settle(transfer, date.unwrap_or_else(today))?;
            println!("{}", i18n::recorded_settlement(settlement.id.0));
        }
        Command::Simulate => {
            let report = processor.simulate_settle_all(today()).with_context(context)?;
            print!("{}", ReportPresenter::render(&report, currency).to_text());
        }
        Command::Expense(ExpenseCommand::Add {
            description,
            amount,
            payer,
            participants,
            date,
        }) => {
            let participant_ids = if participants.is_empty() {
                processor
                    .snapshot()
                    .with_context(context)?
                    .member_ids()
                    .collect()
            } else {
                participants.into_iter().map(MemberId).collect()
            };
            let expense = processor.record_expense(ExpenseDraft {
                description,
                amount,
                payer_id: Some(MemberId(payer)),
                date: date.unwrap_or_else(today),
                participant_ids,
            })?;
            println!("{}", i18n::recorded_expense(expense.id.0));
        }
        Command::Member(MemberCommand::Add { name }) => {
            let member = processor.add_member(MemberDraft { name })?;
            println!("{}", i18n::added_member(member.id.0, &member.name));
        }
        Command::Member(MemberCommand::Remove { id }) => {
            let member = processor.remove_member(MemberId(id))?;
            println!("{}", i18n::removed_member(&member.name));
        }
        Command::Member(MemberCommand::List) => {
            let snapshot = processor.snapshot().with_context(context)?;
            if snapshot.members.is_empty() {
                println!("{}", i18n::NO_MEMBERS);
            } else {
                print!("{}", ReportPresenter::build_roster_table(&snapshot.members));
            }
        }
    }

    Ok(())
}

/// Environment settings with command-line flags applied on top.
fn resolve_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::from_env().context("invalid configuration")?;

    if let Some(path) = &cli.ledger {
        config.ledger_path = path.clone();
    }
    if let Some(symbol) = &cli.currency_symbol {
        config.currency = Currency::new(config.currency.code, symbol.clone());
    }
    if let Some(raw) = &cli.epsilon {
        config.epsilon = parse_tolerance("--epsilon", raw)?;
    }
    if let Some(policy) = cli.split_policy {
        config.split_policy = match policy {
            PolicyArg::Exact => SplitPolicy::Exact,
            PolicyArg::Cents => SplitPolicy::cents(),
        };
    }

    tracing::debug!(
        ledger = %config.ledger_path.display(),
        policy = ?config.split_policy,
        epsilon = %config.epsilon,
        "resolved configuration"
    );
    Ok(config)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
