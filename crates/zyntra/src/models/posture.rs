//! Posture analysis payloads (`POST /posture/analyze-cctv-demo`)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostureAnalysis {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub video_filename: Option<String>,
    #[serde(default)]
    pub persons_detected: u32,
    #[serde(default)]
    pub overall_avg_wellness: Option<f64>,
    #[serde(default)]
    pub high_risk_count: u32,
    #[serde(default)]
    pub total_frames_processed: u32,
    #[serde(default)]
    pub analysis_duration_seconds: Option<f64>,
    #[serde(default)]
    pub person_analyses: Vec<PersonAnalysis>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonAnalysis {
    pub person_id: serde_json::Value,
    #[serde(default)]
    pub dominant_posture: Option<String>,
    #[serde(default)]
    pub stress_level: Option<String>,
    #[serde(default)]
    pub mood_estimate: Option<String>,
    #[serde(default)]
    pub overall_wellness_score: Option<f64>,
    #[serde(default)]
    pub avg_ergonomic_score: Option<f64>,
    #[serde(default)]
    pub avg_posture_quality: Option<f64>,
    #[serde(default)]
    pub back_pain_risk: Option<f64>,
    #[serde(default)]
    pub neck_pain_risk: Option<f64>,
    #[serde(default)]
    pub fatigue_indicator: Option<f64>,
    #[serde(default)]
    pub total_frames_detected: u32,
    #[serde(default)]
    pub posture_distribution: BTreeMap<String, f64>,
    #[serde(default)]
    pub activity_distribution: BTreeMap<String, f64>,
}

/// Three-level traffic light used for posture and stress labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Good,
    Fair,
    Poor,
    Unknown,
}

impl Rating {
    /// good / neutral / poor
    pub fn from_posture(label: Option<&str>) -> Self {
        match label.map(str::to_ascii_lowercase).as_deref() {
            Some("good") => Rating::Good,
            Some("neutral") => Rating::Fair,
            Some("poor") => Rating::Poor,
            _ => Rating::Unknown,
        }
    }

    /// low / medium / high, where low stress is good
    pub fn from_stress(label: Option<&str>) -> Self {
        match label.map(str::to_ascii_lowercase).as_deref() {
            Some("low") => Rating::Good,
            Some("medium") | Some("moderate") => Rating::Fair,
            Some("high") => Rating::Poor,
            _ => Rating::Unknown,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Rating::Good => "●",
            Rating::Fair => "◐",
            Rating::Poor => "○",
            Rating::Unknown => "·",
        }
    }
}
