//! Command-line adapter over the schedule and calendar services.

pub mod output;

use std::{
    env,
    io::{self, BufRead},
};

use strsim::levenshtein;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    config::{Config, ConfigError, ConfigManager},
    core::services::{CalendarService, ScheduleService, ServiceError},
    currency::{format_currency_brl, parse_brl, MoneyParseError},
    display::{format_date_br, format_period},
    documents::DocumentError,
    errors::{ScheduleError, StoreError},
    payments::{Counterparty, LifecycleStatus},
    schedule::{Granularity, PlanForm},
    storage::JsonEventStore,
};

const SCRIPT_ENV: &str = "COMMISH_CLI_SCRIPT";
const COMMANDS: [&str; 5] = ["schedule", "add", "calendar", "status", "help"];
const MAX_SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("Unknown command `{command}`{}", suggestion_suffix(.suggestion))]
    UnknownCommand {
        command: String,
        suggestion: Option<&'static str>,
    },
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Money(#[from] MoneyParseError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Could not split command line: {0}")]
    Split(#[from] shell_words::ParseError),
    #[error("{0} script command(s) failed")]
    ScriptFailures(usize),
}

fn suggestion_suffix(suggestion: &Option<&'static str>) -> String {
    suggestion
        .map(|best| format!(" (did you mean `{best}`?)"))
        .unwrap_or_default()
}

fn suggest(command: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .map(|candidate| (levenshtein(candidate, command), *candidate))
        .min_by_key(|(distance, _)| *distance)
        .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
        .map(|(_, candidate)| candidate)
}

struct CliContext {
    config: Config,
    store: JsonEventStore,
}

impl CliContext {
    fn load() -> Result<Self, CliError> {
        let config = ConfigManager::new()?.load()?;
        let store = JsonEventStore::new(config.data_dir.clone())?;
        Ok(Self { config, store })
    }
}

/// Runs one command from the process arguments, or every line of stdin when
/// `COMMISH_CLI_SCRIPT=1`.
pub fn run_cli() -> Result<(), CliError> {
    let context = CliContext::load()?;
    if env::var(SCRIPT_ENV).map(|v| v == "1").unwrap_or(false) {
        return run_script(&context);
    }
    let args: Vec<String> = env::args().skip(1).collect();
    run_command(&context, &args)
}

fn run_script(context: &CliContext) -> Result<(), CliError> {
    let mut failures = 0usize;
    for line in io::stdin().lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let args = match shell_words::split(trimmed) {
            Ok(args) => args,
            Err(err) => {
                failures += 1;
                output::print_error(CliError::Split(err));
                continue;
            }
        };
        if args.first().map(String::as_str) == Some("exit") {
            break;
        }
        if let Err(err) = run_command(context, &args) {
            failures += 1;
            output::print_error(err);
        }
    }
    if failures > 0 {
        return Err(CliError::ScriptFailures(failures));
    }
    Ok(())
}

fn run_command(context: &CliContext, args: &[String]) -> Result<(), CliError> {
    let Some((command, rest)) = args.split_first() else {
        print_usage();
        return Ok(());
    };
    match command.as_str() {
        "schedule" => cmd_schedule(context, rest),
        "add" => cmd_add(context, rest),
        "calendar" => cmd_calendar(context, rest),
        "status" => cmd_status(context, rest),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => Err(CliError::UnknownCommand {
            command: other.to_string(),
            suggestion: suggest(other),
        }),
    }
}

fn arg<'a>(args: &'a [String], idx: usize, name: &str) -> Result<&'a str, CliError> {
    args.get(idx)
        .map(String::as_str)
        .ok_or_else(|| CliError::Usage(format!("missing <{name}>; run `commish_cli help`")))
}

fn cmd_schedule(context: &CliContext, args: &[String]) -> Result<(), CliError> {
    let form = PlanForm::new(
        arg(args, 0, "start")?,
        arg(args, 1, "kind")?,
        args.get(2).map(String::as_str).unwrap_or("1"),
    );
    let plan = form.parse(context.config.max_installments)?;
    let dates = plan.schedule()?;
    output::print_section(format!("{} x{}", plan.kind().label(), dates.len()));
    for (idx, date) in dates.iter().enumerate() {
        output::print_info(format!("{:>2}/{}  {}", idx + 1, dates.len(), format_date_br(*date)));
    }
    output::print_info(format!("Final: {}", format_date_br(plan.final_date()?)));
    Ok(())
}

fn cmd_add(context: &CliContext, args: &[String]) -> Result<(), CliError> {
    let owner = arg(args, 0, "owner")?;
    let name = arg(args, 1, "name")?;
    let amount = parse_brl(arg(args, 2, "amount")?)?;
    let form = PlanForm::new(
        arg(args, 3, "start")?,
        arg(args, 4, "kind")?,
        arg(args, 5, "count")?,
    );
    let counterparty = Counterparty::from_document(name, arg(args, 6, "cpf|cnpj")?)?;
    let ids = ScheduleService::create_from_form(
        &context.store,
        &context.config,
        owner,
        counterparty,
        amount,
        &form,
    )?;
    output::print_success(format!(
        "Created {} payment(s) of {} for {}",
        ids.len(),
        format_currency_brl(amount),
        name
    ));
    Ok(())
}

fn cmd_calendar(context: &CliContext, args: &[String]) -> Result<(), CliError> {
    let owner = arg(args, 0, "owner")?;
    let granularity = match args.get(1).map(String::as_str) {
        None | Some("month") => Granularity::Month,
        Some("week") => Granularity::Week,
        Some(other) => {
            return Err(CliError::Usage(format!(
                "unknown granularity `{other}` (expected month or week)"
            )))
        }
    };
    let buckets = CalendarService::view(&context.store, owner, granularity)?;
    if buckets.is_empty() {
        output::print_info("No open payments.");
        return Ok(());
    }
    for bucket in &buckets {
        output::print_section(format_period(bucket.period));
        for event in &bucket.events {
            let due = event.due_date.map(format_date_br).unwrap_or_default();
            output::print_info(format!(
                "  {due}  {}  {}  {}  {}  {}",
                event.counterparty.name(),
                format_currency_brl(event.amount),
                event.installment_label(),
                event.lifecycle_status.label(),
                event.id
            ));
        }
        output::print_info(format!("  Total: {}", format_currency_brl(bucket.total)));
    }
    let total = CalendarService::upcoming_total(&context.store, owner)?;
    output::print_success(format!("Open total: {}", format_currency_brl(total)));
    Ok(())
}

fn parse_status(raw: &str) -> Result<LifecycleStatus, CliError> {
    match raw.trim().to_lowercase().as_str() {
        "active" | "ativo" => Ok(LifecycleStatus::Active),
        "pending" | "pendente" => Ok(LifecycleStatus::Pending),
        "paid" | "pago" => Ok(LifecycleStatus::Paid),
        "overdue" | "atrasado" => Ok(LifecycleStatus::Overdue),
        "finalized" | "finalizado" => Ok(LifecycleStatus::Finalized),
        other => Err(CliError::Usage(format!("unknown status `{other}`"))),
    }
}

fn cmd_status(context: &CliContext, args: &[String]) -> Result<(), CliError> {
    let owner = arg(args, 0, "owner")?;
    let raw_id = arg(args, 1, "event-id")?;
    let event_id = Uuid::parse_str(raw_id)
        .map_err(|_| CliError::Usage(format!("`{raw_id}` is not an event id")))?;
    let status = parse_status(arg(args, 2, "status")?)?;
    ScheduleService::set_status(&context.store, owner, event_id, status)?;
    output::print_success(format!("Event {event_id} is now {}", status.label()));
    Ok(())
}

fn print_usage() {
    eprintln!(
        "Usage: commish_cli <command>\n\
         Commands:\n  \
         schedule <YYYY-MM-DD> <single|weekly|monthly> [count]\n  \
         add <owner> <name> <amount> <YYYY-MM-DD> <kind> <count> <cpf|cnpj>\n  \
         calendar <owner> [month|week]\n  \
         status <owner> <event-id> <active|pending|paid|overdue|finalized>\n\
         Set {SCRIPT_ENV}=1 to read commands from stdin."
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_close_commands() {
        assert_eq!(suggest("calender"), Some("calendar"));
        assert_eq!(suggest("schedul"), Some("schedule"));
        assert_eq!(suggest("zzzzzzzzzz"), None);
    }

    #[test]
    fn unknown_command_message_includes_suggestion() {
        let err = CliError::UnknownCommand {
            command: "ad".into(),
            suggestion: suggest("ad"),
        };
        assert_eq!(err.to_string(), "Unknown command `ad` (did you mean `add`?)");
    }

    #[test]
    fn parses_statuses_in_both_languages() {
        assert_eq!(parse_status("Pago").unwrap(), LifecycleStatus::Paid);
        assert_eq!(parse_status("overdue").unwrap(), LifecycleStatus::Overdue);
        assert!(parse_status("lost").is_err());
    }
}
