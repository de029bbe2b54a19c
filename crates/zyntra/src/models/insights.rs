//! AI insights payload (`GET /wellness/ai-insights`)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Labels cycled over the insight list, in display order
pub const INSIGHT_CATEGORIES: [&str; 6] = [
    "Posture",
    "Ergonomics",
    "Stress",
    "Engagement",
    "Activity",
    "Pain Risk",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Improving,
    Stable,
    Declining,
    Unknown,
}

impl Trend {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::to_ascii_lowercase).as_deref() {
            Some("improving") => Trend::Improving,
            Some("stable") => Trend::Stable,
            Some("declining") => Trend::Declining,
            _ => Trend::Unknown,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Trend::Improving => "Your wellness is getting better!",
            Trend::Stable => "Maintaining consistent wellness",
            Trend::Declining => "Needs attention and improvement",
            Trend::Unknown => "",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiInsights {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub avg_wellness_score: Option<f64>,
    #[serde(default)]
    pub wellness_trend: Option<String>,
    #[serde(default)]
    pub data_period_days: Option<u32>,
    #[serde(default)]
    pub insights: Vec<String>,
}

impl AiInsights {
    pub fn trend(&self) -> Trend {
        Trend::parse(self.wellness_trend.as_deref())
    }

    /// Insights paired with their display category
    pub fn categorized(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.insights
            .iter()
            .enumerate()
            .map(|(i, text)| (INSIGHT_CATEGORIES[i % INSIGHT_CATEGORIES.len()], text.as_str()))
    }
}

/// Score band used to colour wellness numbers
pub fn score_band(score: f64) -> &'static str {
    if score >= 80.0 {
        "excellent"
    } else if score >= 60.0 {
        "good"
    } else if score >= 40.0 {
        "fair"
    } else {
        "poor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_insights() {
        let json = r#"{
            "user_id": 4,
            "username": "maya",
            "generated_at": "2026-10-01T08:00:00Z",
            "avg_wellness_score": 71.25,
            "wellness_trend": "Improving",
            "data_period_days": 7,
            "insights": ["a", "b", "c", "d", "e", "f", "g"]
        }"#;
        let insights: AiInsights = serde_json::from_str(json).unwrap();
        assert_eq!(insights.trend(), Trend::Improving);

        let categories: Vec<_> = insights.categorized().map(|(c, _)| c).collect();
        assert_eq!(categories[0], "Posture");
        assert_eq!(categories[6], "Posture");
    }

    #[test]
    fn test_sparse_insights() {
        let insights: AiInsights = serde_json::from_str("{}").unwrap();
        assert_eq!(insights.trend(), Trend::Unknown);
        assert_eq!(insights.categorized().count(), 0);
    }

    #[test]
    fn test_score_band() {
        assert_eq!(score_band(80.0), "excellent");
        assert_eq!(score_band(79.9), "good");
        assert_eq!(score_band(40.0), "fair");
        assert_eq!(score_band(12.0), "poor");
    }
}
