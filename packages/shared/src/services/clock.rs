use chrono::{DateTime, Duration, Utc};
use std::sync::RwLock;

use crate::models::position::Side;

/// Source of "now" for clock accounting.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualTimeSource {
    now: RwLock<DateTime<Utc>>,
}

impl ManualTimeSource {
    pub fn new(start: DateTime<Utc>) -> Self {
        ManualTimeSource {
            now: RwLock::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *self.now.write().unwrap_or_else(|e| e.into_inner()) = at;
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap_or_else(|e| e.into_inner())
    }
}

/// Clock state after charging the side to move for its thinking time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockCharge {
    pub white_time: f64,
    pub black_time: f64,
    pub punched_at: DateTime<Utc>,
    /// Side whose clock has run out, if any. Its time is exactly 0.
    pub flagged: Option<Side>,
}

/// Seconds between `last_move_at` and `now`; clock skew never yields a
/// negative interval.
pub fn elapsed_seconds(last_move_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - last_move_at)
        .to_std()
        .map(|elapsed| elapsed.as_secs_f64())
        .unwrap_or(0.0)
}

/// Deducts the time spent since the last accepted move from the side about
/// to move. The first move of a match (no timestamp yet) costs nothing.
pub fn charge(
    side_to_move: Side,
    white_time: f64,
    black_time: f64,
    last_move_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> ClockCharge {
    let elapsed = last_move_at.map_or(0.0, |last| elapsed_seconds(last, now));

    let (mut white_time, mut black_time) = match side_to_move {
        Side::White => ((white_time - elapsed).max(0.0), black_time),
        Side::Black => (white_time, (black_time - elapsed).max(0.0)),
    };

    let flagged = [side_to_move, side_to_move.opponent()]
        .into_iter()
        .find(|side| match side {
            Side::White => white_time <= 0.0,
            Side::Black => black_time <= 0.0,
        });

    match flagged {
        Some(Side::White) => white_time = 0.0,
        Some(Side::Black) => black_time = 0.0,
        None => {}
    }

    ClockCharge {
        white_time,
        black_time,
        punched_at: now,
        flagged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + seconds, 0).unwrap()
    }

    #[test]
    fn test_first_move_is_free() {
        let charge = charge(Side::White, 300.0, 300.0, None, at(500));

        assert_eq!(charge.white_time, 300.0);
        assert_eq!(charge.black_time, 300.0);
        assert_eq!(charge.punched_at, at(500));
        assert!(charge.flagged.is_none());
    }

    #[test]
    fn test_elapsed_time_charged_to_side_to_move() {
        let charge = charge(Side::Black, 300.0, 300.0, Some(at(0)), at(2));

        assert_eq!(charge.white_time, 300.0);
        assert_eq!(charge.black_time, 298.0);
        assert!(charge.flagged.is_none());
    }

    #[test]
    fn test_overrun_flags_and_clamps_to_zero() {
        let charge = charge(Side::White, 10.0, 50.0, Some(at(0)), at(25));

        assert_eq!(charge.flagged, Some(Side::White));
        assert_eq!(charge.white_time, 0.0);
        assert_eq!(charge.black_time, 50.0);
    }

    #[test]
    fn test_existing_zero_clock_flags_even_on_first_move() {
        let charge = charge(Side::White, 0.0, 300.0, None, at(0));

        assert_eq!(charge.flagged, Some(Side::White));
    }

    #[test]
    fn test_opponent_zero_clock_flags_opponent() {
        let charge = charge(Side::White, 100.0, -3.0, Some(at(0)), at(1));

        assert_eq!(charge.flagged, Some(Side::Black));
        assert_eq!(charge.black_time, 0.0);
        assert_eq!(charge.white_time, 99.0);
    }

    #[test]
    fn test_clock_skew_counts_as_no_time() {
        let charge = charge(Side::White, 300.0, 300.0, Some(at(10)), at(5));

        assert_eq!(charge.white_time, 300.0);
    }

    #[test]
    fn test_manual_time_source_advances() {
        let time = ManualTimeSource::new(at(0));
        time.advance(Duration::milliseconds(1500));
        assert_eq!(time.now(), at(0) + Duration::milliseconds(1500));

        time.set(at(90));
        assert_eq!(time.now(), at(90));
    }

    proptest! {
        #[test]
        fn prop_charge_is_prior_minus_elapsed_floored(
            prior in 0.5f64..2000.0,
            other in 0.5f64..2000.0,
            elapsed in 0i64..4000,
            black_to_move in any::<bool>(),
        ) {
            let side = if black_to_move { Side::Black } else { Side::White };
            let (white, black) = if black_to_move { (other, prior) } else { (prior, other) };

            let charge = charge(side, white, black, Some(at(0)), at(elapsed));

            let expected = (prior - elapsed as f64).max(0.0);
            let (moving, waiting) = if black_to_move {
                (charge.black_time, charge.white_time)
            } else {
                (charge.white_time, charge.black_time)
            };
            prop_assert!((moving - expected).abs() < 1e-9);
            prop_assert_eq!(waiting, other);
            prop_assert!(charge.white_time >= 0.0 && charge.black_time >= 0.0);
            prop_assert_eq!(charge.flagged.is_some(), expected <= 0.0);
        }

        #[test]
        fn prop_charge_never_increases_clocks(
            white in 0.5f64..2000.0,
            black in 0.5f64..2000.0,
            first in 0i64..500,
            second in 0i64..500,
        ) {
            let earlier = charge(Side::White, white, black, Some(at(0)), at(first));
            let later = charge(Side::White, white, black, Some(at(0)), at(first + second));

            prop_assert!(later.white_time <= earlier.white_time);
            prop_assert_eq!(later.black_time, earlier.black_time);
        }
    }
}
