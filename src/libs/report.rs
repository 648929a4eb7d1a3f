//! Summaries of a data file.
//!
//! Reports are derived from a snapshot of the records on every request and
//! never written anywhere. A data file holds one month, so the monthly
//! report is simply the sum of the weekly ones.

use super::duration::TimeFormat;
use super::record::Record;
use chrono::{Datelike, Duration, NaiveDate};

/// Monday and Friday of the work week containing `date`. Weekend days
/// belong to the week that started on the Monday before them.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = date - Duration::days(date.weekday().num_days_from_monday() as i64);
    (start, start + Duration::days(4))
}

fn record_minutes(record: &Record) -> i64 {
    record.minutes().unwrap_or_else(|e| {
        tracing::warn!(index = record.index, error = %e, "Unable to convert TimeSpent to minutes");
        0
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyReport {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_tasks: usize,
    pub pushed_tasks: usize,
    pub total_minutes: i64,
}

impl WeeklyReport {
    fn new(week_start: NaiveDate, week_end: NaiveDate) -> Self {
        Self {
            week_start,
            week_end,
            total_tasks: 0,
            pushed_tasks: 0,
            total_minutes: 0,
        }
    }

    fn add(&mut self, record: &Record) {
        self.total_tasks += 1;
        if record.is_pushed() {
            self.pushed_tasks += 1;
        }
        self.total_minutes += record_minutes(record);
    }
}

/// Weekly groups in the order their first record appears in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyReport {
    pub weeks: Vec<WeeklyReport>,
}

impl MonthlyReport {
    /// Groups records into work weeks.
    ///
    /// # Arguments
    ///
    /// * `records` - Records of one data file
    /// * `format` - Pattern used to read `StartedTs`
    ///
    /// # Returns
    ///
    /// One [`WeeklyReport`] per week that has records. Records whose start
    /// cannot be parsed are skipped with a warning. A duration that cannot be
    /// parsed counts as 0 minutes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jtl::libs::duration::TimeFormat;
    /// use jtl::libs::record::Record;
    /// use jtl::libs::report::MonthlyReport;
    ///
    /// let records = vec![
    ///     Record::new("PROJ-1", "3h", "", "14 Apr 2020 12:00", "jira"),
    ///     Record::new("PROJ-1", "20m", "", "20 Apr 2020 12:00", "jira"),
    /// ];
    /// let report = MonthlyReport::new(&records, &TimeFormat::default());
    /// assert_eq!(report.weeks.len(), 2);
    /// assert_eq!(report.total_minutes(), 200);
    /// ```
    pub fn new(records: &[Record], format: &TimeFormat) -> Self {
        let mut report = Self::default();
        for record in records {
            let day = match format.truncate_to_date(&record.started_ts) {
                Ok(day) => day,
                Err(e) => {
                    tracing::warn!(index = record.index, error = %e, "Skipping record in report");
                    continue;
                }
            };
            let (start, end) = week_bounds(day);
            report.week(start, end).add(record);
        }
        report
    }

    fn week(&mut self, start: NaiveDate, end: NaiveDate) -> &mut WeeklyReport {
        let position = match self.weeks.iter().position(|week| week.week_start == start) {
            Some(position) => position,
            None => {
                self.weeks.push(WeeklyReport::new(start, end));
                self.weeks.len() - 1
            }
        };
        &mut self.weeks[position]
    }

    pub fn total_tasks(&self) -> usize {
        self.weeks.iter().map(|week| week.total_tasks).sum()
    }

    pub fn pushed_tasks(&self) -> usize {
        self.weeks.iter().map(|week| week.pushed_tasks).sum()
    }

    pub fn total_minutes(&self) -> i64 {
        self.weeks.iter().map(|week| week.total_minutes).sum()
    }
}

/// Today's entries plus running totals for the whole file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyReport {
    pub today: String,
    pub tasks_today: usize,
    pub pushed_today: usize,
    pub minutes_today: i64,
    pub total_tasks: usize,
    pub total_minutes: i64,
    /// Rows to display: today's records, or all of them when requested.
    pub rows: Vec<Record>,
}

impl DailyReport {
    /// Builds today's view of the file.
    ///
    /// # Arguments
    ///
    /// * `records` - Records of one data file
    /// * `format` - Patterns used to read `StartedTs` and to format dates
    /// * `today` - Date label in the date pattern, usually
    ///   [`TimeFormat::today`]. Records match when their formatted date equals
    ///   it, so no clock arithmetic is involved.
    /// * `show_all` - Put every record in `rows`, not only today's
    ///
    /// # Returns
    ///
    /// Counters for today and for the whole file, plus the rows to display.
    pub fn new(records: &[Record], format: &TimeFormat, today: &str, show_all: bool) -> Self {
        let mut report = Self {
            today: today.to_string(),
            tasks_today: 0,
            pushed_today: 0,
            minutes_today: 0,
            total_tasks: 0,
            total_minutes: 0,
            rows: Vec::new(),
        };

        for record in records {
            let is_today = format
                .truncate_to_date(&record.started_ts)
                .is_ok_and(|day| format.format_date(&day) == today);
            let minutes = record_minutes(record);

            if is_today {
                report.tasks_today += 1;
                report.minutes_today += minutes;
                if record.is_pushed() {
                    report.pushed_today += 1;
                }
            }
            report.total_tasks += 1;
            report.total_minutes += minutes;

            if show_all || is_today {
                report.rows.push(record.clone());
            }
        }
        report
    }
}
