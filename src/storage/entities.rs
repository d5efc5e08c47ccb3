use std::{fmt::Display, ops::Deref, str::FromStr};

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Longest session accepted by [FocusSession::validate]. A timer run can't outlast a day.
pub const MAX_SESSION_MINUTES: u32 = 24 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),
    #[error("session id can't be empty")]
    MissingId,
    #[error("session lasted {0} minutes, a single session can't exceed a day")]
    DurationTooLong(u32),
}

/// Work technique used for a session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Pomodoro,
    #[value(name = "deep_work", alias = "deep-work")]
    DeepWork,
    Flow,
    Custom,
    Ambient,
}

impl SessionMode {
    pub const ALL: [SessionMode; 5] = [
        SessionMode::Pomodoro,
        SessionMode::DeepWork,
        SessionMode::Flow,
        SessionMode::Custom,
        SessionMode::Ambient,
    ];
}

impl Display for SessionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionMode::Pomodoro => write!(f, "pomodoro"),
            SessionMode::DeepWork => write!(f, "deep_work"),
            SessionMode::Flow => write!(f, "flow"),
            SessionMode::Custom => write!(f, "custom"),
            SessionMode::Ambient => write!(f, "ambient"),
        }
    }
}

/// Subjective efficiency self-rating. Only values from 1 to 5 can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new_opt(value: u8) -> Option<Rating> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Rating(value))
    }
}

impl TryFrom<u8> for Rating {
    type Error = SessionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new_opt(value).ok_or(SessionError::InvalidRating(value))
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl FromStr for Rating {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = s.trim().parse::<u8>()?;
        Ok(Rating::try_from(v)?)
    }
}

impl Deref for Rating {
    type Target = u8;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

/// One completed timer run. Sessions are written once and never changed afterwards, the only
/// other operation on them is deletion.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FocusSession {
    pub id: String,
    pub mode: SessionMode,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub start_time: DateTime<Utc>,
    pub duration_minutes: u32,
    #[serde(default)]
    pub rating: Option<Rating>,
}

impl FocusSession {
    /// Creates a session with a freshly generated id.
    pub fn new(
        mode: SessionMode,
        start_time: DateTime<Utc>,
        duration_minutes: u32,
        rating: Option<Rating>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            mode,
            start_time,
            duration_minutes,
            rating,
        }
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        if self.id.trim().is_empty() {
            return Err(SessionError::MissingId);
        }
        if self.duration_minutes > MAX_SESSION_MINUTES {
            return Err(SessionError::DurationTooLong(self.duration_minutes));
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(self.duration_minutes as i64)
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.start_time + self.duration()
    }

    /// Calendar day the session is attributed to. A session belongs entirely to the day it started
    /// on, even if it runs past midnight.
    pub fn day_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.start_time.with_timezone(tz).date_naive()
    }

    pub fn with_id(self, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone, Utc};

    use super::{FocusSession, Rating, SessionError, SessionMode};

    #[test]
    fn rating_bounds() {
        assert!(Rating::new_opt(0).is_none());
        assert_eq!(*Rating::new_opt(1).unwrap(), 1);
        assert_eq!(*Rating::new_opt(5).unwrap(), 5);
        assert!(Rating::new_opt(6).is_none());
        assert!("7".parse::<Rating>().is_err());
        assert_eq!(" 3".parse::<Rating>().unwrap(), Rating::new_opt(3).unwrap());
    }

    #[test]
    fn rating_rejected_during_deserialization() {
        let line = r#"{"id":"a","mode":"flow","startTime":0,"durationMinutes":5,"rating":9}"#;
        assert!(serde_json::from_str::<FocusSession>(line).is_err());
    }

    #[test]
    fn negative_duration_rejected_during_deserialization() {
        let line = r#"{"id":"a","mode":"flow","startTime":0,"durationMinutes":-5}"#;
        assert!(serde_json::from_str::<FocusSession>(line).is_err());
    }

    #[test]
    fn session_json_shape() {
        let session = FocusSession::new(
            SessionMode::DeepWork,
            Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            95,
            Rating::new_opt(5),
        )
        .with_id("fixed");
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["mode"], "deep_work");
        assert_eq!(json["startTime"], 1_700_000_000);
        assert_eq!(json["durationMinutes"], 95);
        assert_eq!(json["rating"], 5);

        let unrated = r#"{"id":"b","mode":"ambient","startTime":10,"durationMinutes":0}"#;
        let parsed: FocusSession = serde_json::from_str(unrated).unwrap();
        assert_eq!(parsed.rating, None);
    }

    #[test]
    fn validation() {
        let start = Utc.timestamp_opt(0, 0).unwrap();
        assert_eq!(
            FocusSession::new(SessionMode::Flow, start, 30, None).validate(),
            Ok(())
        );
        assert_eq!(
            FocusSession::new(SessionMode::Flow, start, 30, None)
                .with_id(" ")
                .validate(),
            Err(SessionError::MissingId)
        );
        assert_eq!(
            FocusSession::new(SessionMode::Flow, start, 2000, None).validate(),
            Err(SessionError::DurationTooLong(2000))
        );
    }

    #[test]
    fn late_session_stays_on_start_day() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let start = tz.with_ymd_and_hms(2024, 4, 5, 23, 50, 0).unwrap().to_utc();
        let session = FocusSession::new(SessionMode::Pomodoro, start, 30, None);
        assert_eq!(
            session.day_in(&tz),
            chrono::NaiveDate::from_ymd_opt(2024, 4, 5).unwrap()
        );
        assert_eq!(
            session.end_time().with_timezone(&tz).date_naive(),
            chrono::NaiveDate::from_ymd_opt(2024, 4, 6).unwrap()
        );
    }
}
