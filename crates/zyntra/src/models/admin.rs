//! Admin views: employee roster and per-employee wellness dashboards

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Overall risk score at or above which an employee counts as high risk
pub const HIGH_RISK_THRESHOLD: f64 = 7.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub id: i64,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl Employee {
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or(&self.email)
    }
}

/// Body of `GET /api/admins/me/employees`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeRoster {
    #[serde(default)]
    pub employees: Vec<Employee>,
}

/// One day of the 7-day trend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyTrend {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub ergonomic_score: Option<f64>,
    #[serde(default)]
    pub good_posture_percent: Option<f64>,
    #[serde(default)]
    pub slouched_percent: Option<f64>,
    #[serde(default)]
    pub forward_head_percent: Option<f64>,
    #[serde(default)]
    pub stress_level: Option<String>,
    #[serde(default)]
    pub mood_estimate: Option<String>,
    #[serde(default)]
    pub engagement_level: Option<String>,
    #[serde(default)]
    pub sitting_time_minutes: Option<f64>,
    #[serde(default)]
    pub standing_time_minutes: Option<f64>,
    #[serde(default)]
    pub walking_time_minutes: Option<f64>,
    #[serde(default)]
    pub break_count: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskAssessment {
    #[serde(default)]
    pub overall_risk_score: Option<f64>,
    #[serde(default)]
    pub risk_category: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub top_risk_factors: Vec<serde_json::Value>,
    #[serde(default)]
    pub recommended_interventions: Vec<serde_json::Value>,
}

/// Body of `GET /wellness/dashboard?user_id={id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeDashboard {
    #[serde(default)]
    pub avg_wellness_7d: Option<f64>,
    #[serde(default)]
    pub wellness_change_percent: Option<f64>,
    #[serde(default)]
    pub wellness_trend_7d: Vec<DailyTrend>,
    #[serde(default)]
    pub current_risk: Option<RiskAssessment>,
}

impl EmployeeDashboard {
    pub fn latest_trend(&self) -> Option<&DailyTrend> {
        self.wellness_trend_7d.last()
    }

    pub fn is_high_risk(&self) -> bool {
        self.current_risk
            .as_ref()
            .and_then(|r| r.overall_risk_score)
            .map(|score| score >= HIGH_RISK_THRESHOLD)
            .unwrap_or(false)
    }
}

/// Team-wide aggregate shown on the admin overview
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamSummary {
    pub employees: usize,
    pub with_data: usize,
    pub avg_wellness: f64,
    pub avg_ergonomic: f64,
    pub avg_posture: f64,
    pub high_risk: usize,
    pub stress_distribution: BTreeMap<String, usize>,
}

impl TeamSummary {
    /// Aggregate dashboards; employees without a dashboard only count toward `employees`
    pub fn from_dashboards<'a>(
        employees: usize,
        dashboards: impl IntoIterator<Item = &'a EmployeeDashboard>,
    ) -> Self {
        let mut summary = TeamSummary {
            employees,
            ..Default::default()
        };
        let (mut wellness, mut ergonomic, mut posture) = (0.0, 0.0, 0.0);

        for dashboard in dashboards {
            summary.with_data += 1;
            wellness += dashboard.avg_wellness_7d.unwrap_or(0.0);

            if let Some(trend) = dashboard.latest_trend() {
                ergonomic += trend.ergonomic_score.unwrap_or(0.0);
                posture += trend.good_posture_percent.unwrap_or(0.0);
                let stress = trend
                    .stress_level
                    .clone()
                    .unwrap_or_else(|| "moderate".to_string());
                *summary.stress_distribution.entry(stress).or_insert(0) += 1;
            }

            if dashboard.is_high_risk() {
                summary.high_risk += 1;
            }
        }

        if summary.with_data > 0 {
            let n = summary.with_data as f64;
            summary.avg_wellness = wellness / n;
            summary.avg_ergonomic = ergonomic / n;
            summary.avg_posture = posture / n;
        }
        summary
    }
}
