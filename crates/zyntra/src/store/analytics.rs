//! Aggregates for the analytics view

use chrono::{DateTime, Duration, Local, NaiveDate};
use serde::Serialize;

use super::ScoreHistoryEntry;
use crate::models::{Activity, ActivityKind};

/// Days shown on the score chart, ending today
pub const CHART_DAYS: i64 = 7;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStats {
    /// Sum of all positive impacts
    pub energy_saved: i64,
    pub focus_streak: usize,
    /// Exercise, meditation and walks
    pub wellness_balance: usize,
    pub weekly_activities: usize,
    /// Percent change against the previous week, 0 without a previous week
    pub activity_trend: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindTotal {
    pub kind: ActivityKind,
    pub count: usize,
    pub minutes: u64,
    pub impact: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    /// Short label such as "Mar 14"
    pub label: String,
    /// Rounded mean of that day's history entries, 0 without entries
    pub score: u8,
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn stats(activities: &[Activity], now: DateTime<Local>) -> ActivityStats {
    let week_ago = now - Duration::days(7);
    let two_weeks_ago = now - Duration::days(14);

    let energy_saved = activities
        .iter()
        .filter(|a| a.is_positive())
        .map(|a| i64::from(a.eco_impact))
        .sum();
    let focus_streak = activities
        .iter()
        .filter(|a| a.kind == ActivityKind::Work)
        .count();
    let wellness_balance = activities
        .iter()
        .filter(|a| a.kind.is_wellness() || a.kind == ActivityKind::Walk)
        .count();

    let current = activities.iter().filter(|a| a.timestamp > week_ago).count();
    let previous = activities
        .iter()
        .filter(|a| a.timestamp > two_weeks_ago && a.timestamp <= week_ago)
        .count();

    let activity_trend = if previous > 0 {
        round_half_up((current as f64 - previous as f64) / previous as f64 * 100.0)
    } else {
        0
    };

    ActivityStats {
        energy_saved,
        focus_streak,
        wellness_balance,
        weekly_activities: current,
        activity_trend,
    }
}

/// Per-kind totals in catalogue order; kinds never logged are left out
pub fn totals_by_kind(activities: &[Activity]) -> Vec<KindTotal> {
    ActivityKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let matching: Vec<&Activity> = activities.iter().filter(|a| a.kind == kind).collect();
            if matching.is_empty() {
                return None;
            }
            Some(KindTotal {
                kind,
                count: matching.len(),
                minutes: matching.iter().map(|a| u64::from(a.duration_minutes)).sum(),
                impact: matching.iter().map(|a| i64::from(a.eco_impact)).sum(),
            })
        })
        .collect()
}

/// Daily average score for the last seven days, oldest first
pub fn score_series(history: &[ScoreHistoryEntry], today: NaiveDate) -> Vec<ChartPoint> {
    (0..CHART_DAYS)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let scores: Vec<f64> = history
                .iter()
                .filter(|h| h.date == date)
                .map(|h| f64::from(h.score))
                .collect();
            let score = if scores.is_empty() {
                0
            } else {
                round_half_up(scores.iter().sum::<f64>() / scores.len() as f64) as u8
            };
            ChartPoint {
                date,
                label: date.format("%b %-d").to_string(),
                score,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap()
    }

    fn logged(kind: ActivityKind, days_ago: i64, impact: i32) -> Activity {
        let ts = now() - Duration::days(days_ago) - Duration::minutes(1);
        Activity {
            id: ts.timestamp_millis(),
            kind,
            duration_minutes: 30,
            notes: None,
            eco_impact: impact,
            timestamp: ts,
            date: ts.date_naive(),
        }
    }

    #[test]
    fn test_stats() {
        let log = vec![
            logged(ActivityKind::Work, 0, 5),
            logged(ActivityKind::Walk, 1, 7),
            logged(ActivityKind::Phone, 2, -5),
            logged(ActivityKind::Meditation, 8, 8),
        ];
        let stats = stats(&log, now());

        assert_eq!(stats.energy_saved, 20);
        assert_eq!(stats.focus_streak, 1);
        assert_eq!(stats.wellness_balance, 2);
        assert_eq!(stats.weekly_activities, 3);
        assert_eq!(stats.activity_trend, 200);
    }

    #[test]
    fn test_trend_without_previous_week() {
        let log = vec![logged(ActivityKind::Work, 0, 5)];
        assert_eq!(stats(&log, now()).activity_trend, 0);
        assert_eq!(stats(&[], now()), ActivityStats::default());
    }

    #[test]
    fn test_negative_trend() {
        let log = vec![
            logged(ActivityKind::Work, 1, 5),
            logged(ActivityKind::Work, 9, 5),
            logged(ActivityKind::Work, 10, 5),
            logged(ActivityKind::Work, 11, 5),
        ];
        assert_eq!(stats(&log, now()).activity_trend, -67);
    }

    #[test]
    fn test_totals_by_kind() {
        let log = vec![
            logged(ActivityKind::Work, 0, 5),
            logged(ActivityKind::Work, 1, 5),
            logged(ActivityKind::Phone, 1, -5),
        ];
        let totals = totals_by_kind(&log);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].kind, ActivityKind::Work);
        assert_eq!(totals[0].count, 2);
        assert_eq!(totals[0].minutes, 60);
        assert_eq!(totals[1].impact, -5);
    }

    #[test]
    fn test_score_series() {
        let today = now().date_naive();
        let entry = |days_ago: i64, score: u8| ScoreHistoryEntry {
            date: today - Duration::days(days_ago),
            score,
            timestamp: now() - Duration::days(days_ago),
        };
        let history = vec![entry(0, 60), entry(0, 65), entry(3, 40), entry(9, 99)];

        let series = score_series(&history, today);
        assert_eq!(series.len(), 7);
        assert_eq!(series[6].date, today);
        assert_eq!(series[6].score, 63);
        assert_eq!(series[3].score, 40);
        assert_eq!(series[0].score, 0);
        assert_eq!(series[6].label, "Mar 14");
    }
}
