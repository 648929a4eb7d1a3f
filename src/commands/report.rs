use super::GlobalArgs;
use crate::{
    libs::{
        messages::Message,
        report::{DailyReport, MonthlyReport},
        view::View,
    },
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// List every record of the file, not only today's
    #[arg(short, long)]
    all: bool,
}

pub fn cmd(report_args: ReportArgs, global: &GlobalArgs) -> Result<()> {
    let (config, store) = global.load()?;
    let format = config.time_format();
    let file_name = store
        .path()
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    if store.is_empty() {
        msg_info!(Message::NoRecords(file_name));
        return Ok(());
    }

    let today = format.today();
    let daily = DailyReport::new(store.records(), &format, &today, report_args.all);
    msg_print!(Message::DailyReportHeader(today), true);
    View::daily(&daily)?;

    let monthly = MonthlyReport::new(store.records(), &format);
    msg_print!(Message::MonthlyReportHeader(file_name.clone()), true);
    View::monthly(&monthly, &file_name, &format)?;

    Ok(())
}
