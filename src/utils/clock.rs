use chrono::{DateTime, NaiveDate, TimeZone, Utc};

#[cfg(test)]
use mockall::automock;

/// Represents an entity responsible for providing dates across application. This can allow it to
/// be used for testing
#[cfg_attr(test, automock)]
pub trait Clock {
    fn time(&self) -> DateTime<Utc>;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Calendar day the clock is at in `tz`.
pub fn today_in<Tz: TimeZone>(clock: &dyn Clock, tz: &Tz) -> NaiveDate {
    clock.time().with_timezone(tz).date_naive()
}
