#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use jtl::libs::duration::TimeFormat;
    use jtl::libs::record::Record;
    use jtl::libs::report::{week_bounds, DailyReport, MonthlyReport};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 4, day).unwrap()
    }

    fn records() -> Vec<Record> {
        let mut records = vec![
            Record::new("JIRA-1", "3h", "", "14 Apr 2020 12:00", "jira"),
            Record::new("JIRA-1", "1d 1h 35m", "", "17 Apr 2020 12:00", "jira"),
            Record::new("JIRA-2", "20m", "", "20 Apr 2020 12:00", "jira"),
        ];
        for (index, record) in records.iter_mut().enumerate() {
            record.index = index;
        }
        records
    }

    #[test]
    fn test_week_bounds() {
        assert_eq!(week_bounds(date(14)), (date(13), date(17)));
        assert_eq!(week_bounds(date(13)), (date(13), date(17)));
        assert_eq!(week_bounds(date(20)), (date(20), date(24)));
    }

    #[test]
    fn test_week_bounds_weekend_belongs_to_previous_monday() {
        assert_eq!(week_bounds(date(18)), (date(13), date(17)));
        assert_eq!(week_bounds(date(19)), (date(13), date(17)));
    }

    #[test]
    fn test_monthly_report_groups_by_week() {
        let report = MonthlyReport::new(&records(), &TimeFormat::default());

        assert_eq!(report.weeks.len(), 2);

        let first = &report.weeks[0];
        assert_eq!((first.week_start, first.week_end), (date(13), date(17)));
        assert_eq!(first.total_minutes, 755);
        assert_eq!(first.total_tasks, 2);

        let second = &report.weeks[1];
        assert_eq!((second.week_start, second.week_end), (date(20), date(24)));
        assert_eq!(second.total_minutes, 20);
        assert_eq!(second.total_tasks, 1);

        assert_eq!(report.total_minutes(), 775);
        assert_eq!(report.total_tasks(), 3);
    }

    #[test]
    fn test_monthly_report_counts_pushed() {
        let mut records = records();
        records[1].id = "100028".to_string();

        let report = MonthlyReport::new(&records, &TimeFormat::default());

        assert_eq!(report.weeks[0].pushed_tasks, 1);
        assert_eq!(report.weeks[1].pushed_tasks, 0);
        assert_eq!(report.pushed_tasks(), 1);
    }

    #[test]
    fn test_monthly_report_skips_bad_rows() {
        let mut records = records();
        records.push(Record::new("JIRA-3", "1h", "", "not a date", "jira"));
        records.push(Record::new("JIRA-3", "1x", "", "21 Apr 2020 09:00", "jira"));

        let report = MonthlyReport::new(&records, &TimeFormat::default());

        assert_eq!(report.total_tasks(), 4);
        assert_eq!(report.weeks[1].total_minutes, 20);
    }

    #[test]
    fn test_daily_report() {
        let mut records = records();
        records.push(Record::new("JIRA-2", "40m", "", "17 Apr 2020 15:35", "jira"));
        records[1].id = "100028".to_string();

        let report = DailyReport::new(&records, &TimeFormat::default(), "17 Apr 2020", false);

        assert_eq!(report.tasks_today, 2);
        assert_eq!(report.pushed_today, 1);
        assert_eq!(report.minutes_today, 615);
        assert_eq!(report.total_tasks, 4);
        assert_eq!(report.total_minutes, 815);
        assert_eq!(report.rows.len(), 2);
        assert!(report.rows.iter().all(|record| record.started_ts.starts_with("17 Apr 2020")));
    }

    #[test]
    fn test_daily_report_show_all() {
        let report = DailyReport::new(&records(), &TimeFormat::default(), "01 May 2020", true);

        assert_eq!(report.tasks_today, 0);
        assert_eq!(report.minutes_today, 0);
        assert_eq!(report.rows.len(), 3);
    }
}
