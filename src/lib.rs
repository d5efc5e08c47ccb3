//! Simple to use cli for tracking focus sessions and scoring your days.
//! Completed sessions go into an append-only log, [analytics] turns the log into a per-day
//! summary that the calendar, day and graph views are drawn from.
//!

pub mod analytics;
pub mod cli;
pub mod storage;
pub mod utils;
