//! Focus Score policy. Kept apart from aggregation so the weighting can be tuned without touching
//! how days are assembled.

use serde::Serialize;

use crate::storage::entities::{FocusSession, SessionMode};

/// Highest Focus Score a day can get.
pub const MAX_SCORE: u8 = 100;

/// Rating that neither raises nor lowers the score.
const NEUTRAL_RATING: f64 = 3.;

/// Score change per rating point away from [NEUTRAL_RATING]. A mean of 5 gives x1.2, a mean of 1
/// gives x0.8.
const RATING_WEIGHT: f64 = 0.1;

/// Aggregated values of a single day the score is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FocusTotals {
    pub total_minutes: u64,
    pub session_count: usize,
    pub pomodoros: usize,
    /// Mean over rated sessions only. `None` if nothing was rated.
    pub mean_rating: Option<f64>,
}

impl FocusTotals {
    pub fn from_sessions<'a>(sessions: impl IntoIterator<Item = &'a FocusSession>) -> Self {
        let mut totals = FocusTotals::default();
        let mut rating_sum = 0u32;
        let mut rated = 0u32;
        for session in sessions {
            totals.total_minutes += session.duration_minutes as u64;
            totals.session_count += 1;
            if session.mode == SessionMode::Pomodoro {
                totals.pomodoros += 1;
            }
            if let Some(rating) = session.rating {
                rating_sum += *rating as u32;
                rated += 1;
            }
        }
        if rated > 0 {
            totals.mean_rating = Some(rating_sum as f64 / rated as f64);
        }
        totals
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreOutcome {
    pub score: u8,
    pub goal_met: bool,
}

impl ScoreOutcome {
    pub const EMPTY: ScoreOutcome = ScoreOutcome {
        score: 0,
        goal_met: false,
    };
}

/// Computes the Focus Score and goal attainment of a day.
///
/// The base is the share of the goal reached, capped at 100. It's then scaled by the efficiency
/// multiplier derived from the mean rating and clamped back into `0..=100`. `goal_met` only looks
/// at minutes, so a capped score and a missed goal can't contradict each other.
///
/// A goal of zero minutes is a misconfiguration. Any positive activity satisfies it.
pub fn score(totals: &FocusTotals, goal_minutes: u32) -> ScoreOutcome {
    if totals.total_minutes == 0 {
        return ScoreOutcome::EMPTY;
    }

    let (base, goal_met) = if goal_minutes == 0 {
        (MAX_SCORE as f64, true)
    } else {
        let ratio = totals.total_minutes as f64 / goal_minutes as f64;
        (
            (ratio * 100.).round().min(MAX_SCORE as f64),
            totals.total_minutes >= goal_minutes as u64,
        )
    };

    let adjusted = (base * efficiency_multiplier(totals.mean_rating)).round();

    ScoreOutcome {
        score: adjusted.clamp(0., MAX_SCORE as f64) as u8,
        goal_met,
    }
}

fn efficiency_multiplier(mean_rating: Option<f64>) -> f64 {
    match mean_rating {
        Some(mean) => 1. + (mean - NEUTRAL_RATING) * RATING_WEIGHT,
        None => 1.,
    }
}

#[cfg(test)]
mod tests {
    use super::{score, FocusTotals, ScoreOutcome};

    fn totals(total_minutes: u64, mean_rating: Option<f64>) -> FocusTotals {
        FocusTotals {
            total_minutes,
            session_count: 1,
            pomodoros: 0,
            mean_rating,
        }
    }

    #[test]
    fn no_activity_is_zero() {
        assert_eq!(score(&FocusTotals::default(), 120), ScoreOutcome::EMPTY);
        assert_eq!(score(&FocusTotals::default(), 0), ScoreOutcome::EMPTY);
        assert_eq!(score(&totals(0, Some(5.)), 120), ScoreOutcome::EMPTY);
    }

    #[test]
    fn reaching_goal_gives_full_score() {
        assert_eq!(
            score(&totals(120, None), 120),
            ScoreOutcome {
                score: 100,
                goal_met: true
            }
        );
        assert_eq!(score(&totals(300, Some(4.5)), 120).score, 100);
    }

    #[test]
    fn partial_goal() {
        let outcome = score(&totals(60, None), 120);
        assert_eq!(outcome.score, 50);
        assert!(!outcome.goal_met);

        // 50 * 1.2
        assert_eq!(score(&totals(60, Some(5.)), 120).score, 60);
        // 50 * 0.8
        assert_eq!(score(&totals(60, Some(1.)), 120).score, 40);
    }

    #[test]
    fn high_rating_never_claims_goal() {
        // 110 / 120 rounds to 92, the bonus pushes it to the cap, still the goal isn't met.
        let outcome = score(&totals(110, Some(5.)), 120);
        assert_eq!(outcome.score, 100);
        assert!(!outcome.goal_met);
    }

    #[test]
    fn low_rating_keeps_goal() {
        let outcome = score(&totals(120, Some(1.)), 120);
        assert_eq!(outcome.score, 80);
        assert!(outcome.goal_met);
    }

    #[test]
    fn zero_goal_is_met_by_any_activity() {
        assert_eq!(
            score(&totals(1, None), 0),
            ScoreOutcome {
                score: 100,
                goal_met: true
            }
        );
    }

    #[test]
    fn monotonic_in_minutes_and_rating() {
        let ratings = [None, Some(1.), Some(2.5), Some(3.), Some(4.25), Some(5.)];
        for goal in [0, 1, 25, 120, 480] {
            for rating in ratings {
                let mut previous = 0;
                for minutes in 0..600 {
                    let current = score(&totals(minutes, rating), goal).score;
                    assert!(current >= previous, "{minutes} {goal} {rating:?}");
                    previous = current;
                }
            }
            for minutes in [1, 30, 90, 119, 120, 500] {
                let mut previous = 0;
                for rating in ratings.iter().skip(1) {
                    let current = score(&totals(minutes, *rating), goal).score;
                    assert!(current >= previous, "{minutes} {goal} {rating:?}");
                    previous = current;
                }
            }
        }
    }
}
