use chrono::{NaiveDate, NaiveTime};
use now::DateTimeNow;

/// This is the standard way of converting a date to a file name in focustally.
pub fn date_to_record_name(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// First and last day of the month `date` belongs to.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let moment = date.and_time(NaiveTime::MIN).and_utc();
    (
        moment.beginning_of_month().date_naive(),
        moment.end_of_month().date_naive(),
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{date_to_record_name, month_bounds};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn record_name() {
        assert_eq!(date_to_record_name(date(2024, 4, 5)), "2024-04-05");
    }

    #[test]
    fn month_bounds_basic() {
        assert_eq!(month_bounds(date(2024, 4, 17)), (date(2024, 4, 1), date(2024, 4, 30)));
        assert_eq!(month_bounds(date(2024, 2, 1)), (date(2024, 2, 1), date(2024, 2, 29)));
        assert_eq!(month_bounds(date(2023, 12, 31)), (date(2023, 12, 1), date(2023, 12, 31)));
    }
}
