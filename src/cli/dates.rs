use anyhow::Result;
use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_english::parse_date_string;
use clap::CommandFactory;

use crate::utils::config::DateStyle;

use super::Args;

pub const DATE_HELP: &str =
    "Examples are \"today\", \"yesterday\", \"friday\", \"15/03/2025\", \"16/03/2025 12:00\"";

/// Parses a human written moment relative to `now`. Errors look like clap validation errors, so the
/// user sees which argument was wrong.
pub fn parse_moment<Tz: TimeZone>(
    input: &str,
    now: DateTime<Tz>,
    style: DateStyle,
    argument: &str,
) -> Result<DateTime<Tz>>
where
    Tz::Offset: Copy,
{
    let validation_error = |reason: String| -> anyhow::Error {
        Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate {argument} \"{input}\": {reason}"),
            )
            .into()
    };

    let moment =
        parse_date_string(input, now, style.into()).map_err(|e| validation_error(e.to_string()))?;

    // A date written out in full has to survive parsing, otherwise the moment lands on another day.
    if let Some(written) = written_date(input, style) {
        if written != moment.date_naive() {
            return Err(validation_error(format!(
                "the date {written} was not understood, write the date before the time"
            )));
        }
    }
    Ok(moment)
}

/// Finds a numeric date like `16/03/2025` in the input, read in the given style.
fn written_date(input: &str, style: DateStyle) -> Option<NaiveDate> {
    let format = match style {
        DateStyle::Uk => "%d/%m/%Y",
        DateStyle::Us => "%m/%d/%Y",
    };
    input
        .split_whitespace()
        .find_map(|token| NaiveDate::parse_from_str(token, format).ok())
}

/// Same as [parse_moment] but only keeps the day. Missing input means the day of `now`.
pub fn parse_day<Tz: TimeZone>(
    input: Option<&str>,
    now: DateTime<Tz>,
    style: DateStyle,
    argument: &str,
) -> Result<NaiveDate>
where
    Tz::Offset: Copy,
{
    match input {
        Some(input) => Ok(parse_moment(input, now, style, argument)?.date_naive()),
        None => Ok(now.date_naive()),
    }
}
