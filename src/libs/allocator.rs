//! Auto-fitting of new log entries into a working day.
//!
//! Logging a new entry must never let the sum of one day's durations run past
//! the daily cap. While the day still has room, the new entry gets whatever
//! is left of the day but at most the split size, regardless of the
//! requested duration. When the request would not fit, the day is
//! redistributed: every not yet pushed record of the
//! day and the new entry get an equal share of the cap. Pushed records are
//! never touched, Jira already holds their values.
//!
//! In both cases the new entry is chained after the last entry of the day,
//! so entries of a day do not overlap.
//!
//! ```text
//!  day before:   [09:00 2h pushed][11:00 3h][14:00 1h]      wanted 4h, cap 8h
//!  overflow:     6h + 4h >= 8h  →  (8h - 2h) / 3 = 2h each
//!  day after:    [09:00 2h pushed][11:00 2h][13:00 2h][15:00 2h new]
//! ```

use super::duration::{format_duration, parse_duration, TimeFormat, MINUTES_PER_DAY};
use super::error::JtlError;
use super::record::Record;
use super::store::RecordStore;
use chrono::NaiveDate;

/// Everything the `log` command collected for one new entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRequest {
    pub ticket: String,
    pub time_spent: String,
    pub comment: String,
    pub started_ts: String,
    pub category: String,
}

impl LogRequest {
    fn to_record(&self, time_spent: &str, started_ts: &str) -> Record {
        Record::new(&self.ticket, time_spent, &self.comment, started_ts, &self.category)
    }
}

/// How the requested duration was turned into the logged one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fit {
    /// The day had room and the entry got the allowed share of it:
    /// `min(cap - logged, split_size)`.
    Trimmed { requested: i64, logged: i64 },
    /// The day overflowed and `adjusted` unpushed records were rewritten to
    /// `per_record` minutes each, as was the new entry.
    Distributed { adjusted: usize, per_record: i64 },
}

/// Result of a successful allocation. The record is already in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub record: Record,
    pub fit: Fit,
}

#[derive(Debug, Clone)]
pub struct AutoFit {
    daily_cap: i64,
    split_size: i64,
    format: TimeFormat,
}

impl Default for AutoFit {
    fn default() -> Self {
        Self::new(MINUTES_PER_DAY, MINUTES_PER_DAY / 2, TimeFormat::default())
    }
}

impl AutoFit {
    pub fn new(daily_cap: i64, split_size: i64, format: TimeFormat) -> Self {
        Self {
            daily_cap,
            split_size,
            format,
        }
    }

    pub fn daily_cap(&self) -> i64 {
        self.daily_cap
    }

    /// Fits `request` into its day and appends it to `store`.
    ///
    /// The store is sorted by day as a side effect. On error no record is
    /// added or changed.
    ///
    /// # Arguments
    ///
    /// * `store` - All records of the data file. Unpushed records of the
    ///   request's day may be rewritten.
    /// * `request` - The entry to log. Its `started_ts` selects the day and is
    ///   only kept when the day has no entries yet.
    ///
    /// # Returns
    ///
    /// The appended record and the [`Fit`] describing how its duration was
    /// chosen.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jtl::libs::allocator::{AutoFit, Fit, LogRequest};
    /// use jtl::libs::store::RecordStore;
    /// use std::path::Path;
    ///
    /// let mut store = RecordStore::new(Path::new("Apr-2020.csv"));
    /// let request = LogRequest {
    ///     ticket: "PROJ-1".to_string(),
    ///     time_spent: "1h".to_string(),
    ///     comment: String::new(),
    ///     started_ts: "14 Apr 2020 10:00".to_string(),
    ///     category: "jira".to_string(),
    /// };
    ///
    /// let allocation = AutoFit::default().allocate(&mut store, &request)?;
    /// assert_eq!(allocation.record.time_spent, "4h");
    /// assert_eq!(allocation.fit, Fit::Trimmed { requested: 60, logged: 240 });
    /// # Ok::<(), jtl::libs::error::JtlError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// - [`JtlError::DailyCapExceeded`] if the day is full and every record of it is pushed
    /// - [`JtlError::ZeroDurationRejected`] if nothing is left to log
    /// - duration and timestamp parsing errors from the request or the stored records
    pub fn allocate(&self, store: &mut RecordStore, request: &LogRequest) -> Result<Allocation, JtlError> {
        store.sort_by_day(&self.format)?;

        let day = self.format.truncate_to_date(&request.started_ts)?;
        let same_day = self.same_day(store, day);
        let logged = self.minutes_logged_on(store, day)?;
        let wanted = parse_duration(&request.time_spent)?;

        let (minutes, fit) = if wanted + logged >= self.daily_cap {
            let adjustable: Vec<Record> = same_day.iter().filter(|record| !record.is_pushed()).cloned().collect();
            if adjustable.is_empty() {
                return Err(JtlError::DailyCapExceeded {
                    logged: format_duration(logged),
                });
            }

            let pushed = same_day
                .iter()
                .filter(|record| record.is_pushed())
                .map(Record::minutes)
                .sum::<Result<i64, JtlError>>()?;
            // Pushed minutes are part of `logged` but cannot be rewritten, so they
            // come off the share or the day would end above the cap.
            let to_distribute = (logged + wanted).min(self.daily_cap) - pushed;
            let per_record = to_distribute / (adjustable.len() as i64 + 1);
            if per_record <= 0 {
                return Err(JtlError::ZeroDurationRejected);
            }

            let adjusted = adjustable.len();
            self.redistribute(store, adjustable, per_record)?;
            (per_record, Fit::Distributed { adjusted, per_record })
        } else {
            let allowed = (self.daily_cap - logged).min(self.split_size);
            (allowed, Fit::Trimmed { requested: wanted, logged: allowed })
        };

        let time_spent = format_duration(minutes);
        if time_spent == "0m" {
            return Err(JtlError::ZeroDurationRejected);
        }

        let started_ts = match self.same_day(store, day).last() {
            Some(last) => self.format.shift(&last.started_ts, last.minutes()?)?,
            None => request.started_ts.clone(),
        };

        let mut record = request.to_record(&time_spent, &started_ts);
        record.index = store.add(record.clone());
        Ok(Allocation { record, fit })
    }

    /// Sets every record to `per_record` minutes and chains each one after
    /// its predecessor. The first record keeps its start.
    fn redistribute(&self, store: &mut RecordStore, records: Vec<Record>, per_record: i64) -> Result<(), JtlError> {
        let mut previous: Option<Record> = None;
        for mut record in records {
            record.time_spent = format_duration(per_record);
            if let Some(previous) = &previous {
                record.started_ts = self.format.shift(&previous.started_ts, per_record)?;
            }
            store.update(record.clone())?;
            previous = Some(record);
        }
        Ok(())
    }

    fn same_day(&self, store: &RecordStore, day: NaiveDate) -> Vec<Record> {
        store.filter(|record| self.format.truncate_to_date(&record.started_ts).is_ok_and(|d| d == day))
    }

    /// Sums the durations of `day`, walking the sorted store from its end and
    /// stopping as soon as the day is left behind.
    fn minutes_logged_on(&self, store: &RecordStore, day: NaiveDate) -> Result<i64, JtlError> {
        let mut total = 0;
        for record in store.records().iter().rev() {
            let record_day = self.format.truncate_to_date(&record.started_ts)?;
            if record_day > day {
                continue;
            }
            if record_day < day {
                break;
            }
            total += record.minutes()?;
        }
        Ok(total)
    }
}

/// Appends `request` as is, without looking at the rest of the day.
pub fn log_as_requested(store: &mut RecordStore, request: &LogRequest) -> Result<Record, JtlError> {
    if parse_duration(&request.time_spent)? <= 0 {
        return Err(JtlError::ZeroDurationRejected);
    }
    let mut record = request.to_record(&request.time_spent, &request.started_ts);
    record.index = store.add(record.clone());
    Ok(record)
}
