use super::duration::{format_duration, TimeFormat};
use super::report::{DailyReport, MonthlyReport};
use anyhow::Result;
use prettytable::{format::consts::FORMAT_BOX_CHARS, row, Table};

pub struct View {}

impl View {
    pub fn daily(report: &DailyReport) -> Result<()> {
        let mut table = Table::new();
        table.set_format(*FORMAT_BOX_CHARS);

        table.set_titles(row!["STARTED AT", "TICKET", "TIME TRACKED", "COMMENT", "PUSHED"]);
        for record in &report.rows {
            table.add_row(row![
                record.started_ts,
                record.ticket,
                record.time_spent,
                record.comment,
                if record.is_pushed() { "Y" } else { "N" }
            ]);
        }
        table.add_row(row![
            format!("today: {}", report.today),
            "",
            format!(
                "{} ({})",
                format_duration(report.total_minutes),
                format_duration(report.minutes_today)
            ),
            "",
            format!("{}/{}", report.pushed_today, report.tasks_today)
        ]);
        table.printstd();

        Ok(())
    }

    pub fn monthly(report: &MonthlyReport, file_name: &str, time_format: &TimeFormat) -> Result<()> {
        let mut table = Table::new();
        table.set_format(*FORMAT_BOX_CHARS);

        table.set_titles(row!["WEEK", "TOTAL TASKS", "TOTAL TIME"]);
        for week in &report.weeks {
            table.add_row(row![
                format!(
                    "{} - {}",
                    time_format.format_date(&week.week_start),
                    time_format.format_date(&week.week_end)
                ),
                format!("{} ({} pushed)", week.total_tasks, week.pushed_tasks),
                format_duration(week.total_minutes)
            ]);
        }
        table.add_row(row![
            format!("Total for: {}", file_name),
            format!("{} ({} pushed)", report.total_tasks(), report.pushed_tasks()),
            format_duration(report.total_minutes())
        ]);
        table.printstd();

        Ok(())
    }
}
