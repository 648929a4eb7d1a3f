use super::GlobalArgs;
use crate::{
    libs::{
        allocator::{log_as_requested, Fit, LogRequest},
        duration::format_duration,
        messages::Message,
        record::{validate_record, Record, DEFAULT_CATEGORY},
    },
    msg_info, msg_success, msg_warning,
};
use anyhow::Result;
use clap::{ArgAction, Args};

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Jira ticket, e.g. PROJ-123, or a configured alias
    #[arg(required = true)]
    ticket: String,

    /// Time spent, e.g. "1h 30m" or "2d"
    #[arg(short, long, default_value = "1h")]
    time: String,

    /// Worklog comment
    #[arg(short, long, default_value = "")]
    message: String,

    /// Start of the entry, now by default
    #[arg(short, long)]
    date: Option<String>,

    /// Fit the entry into the daily cap
    #[arg(short = 'f', long, default_value_t = true, action = ArgAction::Set)]
    auto_fitting: bool,
}

pub fn cmd(log_args: LogArgs, global: &GlobalArgs) -> Result<()> {
    let (config, mut store) = global.load()?;
    let format = config.time_format();

    let (ticket, category) = config.resolve_ticket(&log_args.ticket)?;
    if category != DEFAULT_CATEGORY {
        msg_info!(Message::AliasResolved {
            alias: category.clone(),
            ticket: ticket.clone(),
        });
    }

    let request = LogRequest {
        ticket,
        time_spent: log_args.time,
        comment: log_args.message,
        started_ts: log_args.date.unwrap_or_else(|| format.now()),
        category,
    };
    validate_record(
        &Record::new(
            &request.ticket,
            &request.time_spent,
            &request.comment,
            &request.started_ts,
            &request.category,
        ),
        &config.project_key_pattern,
        &format,
    )?;

    let record = match log_args.auto_fitting {
        true => {
            let auto_fit = config.auto_fit();
            let allocation = auto_fit.allocate(&mut store, &request)?;
            match allocation.fit {
                Fit::Trimmed { logged, .. } => msg_info!(Message::TimeSpentTrimmed {
                    logged: format_duration(logged),
                    cap: format_duration(auto_fit.daily_cap()),
                }),
                Fit::Distributed { adjusted, per_record } => msg_warning!(Message::DayRedistributed {
                    adjusted,
                    per_record: format_duration(per_record),
                }),
            }
            allocation.record
        }
        false => log_as_requested(&mut store, &request)?,
    };

    store.write()?;
    tracing::debug!(index = record.index, path = %store.path().display(), "Record written");

    msg_success!(Message::RecordLogged {
        ticket: record.ticket,
        time_spent: record.time_spent,
        started: record.started_ts,
    });
    Ok(())
}
