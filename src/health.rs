//! Popularity/recency heuristic shown as the health bar on each card.

use chrono::{DateTime, Utc};
use std::fmt;

pub const STARS_PER_POINT: u64 = 10;
pub const STAR_SCORE_CAP: u32 = 70;
pub const ACTIVE_WINDOW_DAYS: i64 = 30;
pub const ACTIVE_BONUS: u32 = 20;
pub const MAINTAINED_WINDOW_DAYS: i64 = 180;
pub const MAINTAINED_BONUS: u32 = 10;
pub const STALE_FLOOR: u32 = 5;
pub const MAX_SCORE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthLabel {
    Active,
    Maintained,
    Stale,
}

impl fmt::Display for HealthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HealthLabel::Active => "Active",
            HealthLabel::Maintained => "Maintained",
            HealthLabel::Stale => "Stale",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthScore {
    /// Always within `0..=MAX_SCORE`.
    pub score: u32,
    pub label: HealthLabel,
}

/// Star component of the score: `min(70, round(stars / 10))`, halves round up.
pub fn base_score(stars: u64) -> u32 {
    let points = stars.saturating_add(STARS_PER_POINT / 2) / STARS_PER_POINT;
    points.min(STAR_SCORE_CAP as u64) as u32
}

/// Whole days between `pushed_at` and `now`, rounded to the nearest day.
fn age_in_days(pushed_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (now - pushed_at).num_seconds() as f64;
    (seconds / 86_400.0).round() as i64
}

pub fn compute(stars: u64, pushed_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> HealthScore {
    let base = base_score(stars);

    if let Some(pushed_at) = pushed_at {
        let days = age_in_days(pushed_at, now);
        if days <= ACTIVE_WINDOW_DAYS {
            return HealthScore {
                score: (base + ACTIVE_BONUS).min(MAX_SCORE),
                label: HealthLabel::Active,
            };
        }
        if days <= MAINTAINED_WINDOW_DAYS {
            return HealthScore {
                score: (base + MAINTAINED_BONUS).min(MAX_SCORE),
                label: HealthLabel::Maintained,
            };
        }
    }

    HealthScore {
        score: base.max(STALE_FLOOR),
        label: HealthLabel::Stale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn days_ago(days: i64) -> Option<DateTime<Utc>> {
        Some(now() - Duration::days(days))
    }

    #[test]
    fn base_score_rounds_and_caps() {
        assert_eq!(base_score(0), 0);
        assert_eq!(base_score(4), 0);
        assert_eq!(base_score(5), 1);
        assert_eq!(base_score(15), 2);
        assert_eq!(base_score(500), 50);
        assert_eq!(base_score(700), 70);
        assert_eq!(base_score(1_000_000), 70);
        assert_eq!(base_score(u64::MAX), 70);
    }

    #[test]
    fn base_score_is_monotonic() {
        let mut previous = 0;
        for stars in 0..1000 {
            let score = base_score(stars);
            assert!(score >= previous);
            previous = score;
        }
    }

    #[test]
    fn popular_and_recent_is_active() {
        let health = compute(500, days_ago(10), now());
        assert_eq!(health, HealthScore { score: 70, label: HealthLabel::Active });
    }

    #[test]
    fn tiny_and_old_is_stale_with_floor() {
        let health = compute(5, days_ago(400), now());
        assert_eq!(health, HealthScore { score: 5, label: HealthLabel::Stale });
    }

    #[test]
    fn window_edges_are_inclusive() {
        assert_eq!(compute(0, days_ago(30), now()).label, HealthLabel::Active);
        assert_eq!(compute(0, days_ago(31), now()).label, HealthLabel::Maintained);
        assert_eq!(compute(0, days_ago(180), now()).label, HealthLabel::Maintained);
        assert_eq!(compute(0, days_ago(181), now()).label, HealthLabel::Stale);
    }

    #[test]
    fn maintained_adds_ten() {
        let health = compute(300, days_ago(90), now());
        assert_eq!(health, HealthScore { score: 40, label: HealthLabel::Maintained });
    }

    #[test]
    fn score_is_capped_at_hundred() {
        // 70 + 20 never exceeds the cap, but the clamp still applies.
        let health = compute(u64::MAX, days_ago(0), now());
        assert_eq!(health.score, 90);
        assert!(health.score <= MAX_SCORE);
    }

    #[test]
    fn missing_timestamp_is_stale() {
        let health = compute(2000, None, now());
        assert_eq!(health, HealthScore { score: 70, label: HealthLabel::Stale });
    }

    #[test]
    fn future_push_counts_as_active() {
        let health = compute(0, Some(now() + Duration::days(2)), now());
        assert_eq!(health.label, HealthLabel::Active);
        assert_eq!(health.score, 20);
    }

    #[test]
    fn score_stays_in_range() {
        for stars in [0, 1, 9, 10, 99, 650, 5000] {
            for days in [0, 15, 30, 45, 180, 365, 4000] {
                let health = compute(stars, days_ago(days), now());
                assert!(health.score <= MAX_SCORE);
            }
        }
    }
}
