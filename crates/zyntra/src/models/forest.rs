//! Remote wellness snapshot (`GET /wellness/forest`)
//!
//! The backend computes these from posture, stress and ergonomics data.
//! Every field is optional on the wire; accessors apply the defaults the
//! scene mapper expects.

use serde::{Deserialize, Serialize};

/// Score used when an environmental factor is missing
pub const DEFAULT_FACTOR: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Season {
    pub fn emoji(self) -> &'static str {
        match self {
            Season::Spring => "🌸",
            Season::Summer => "☀️",
            Season::Autumn => "🍂",
            Season::Winter => "❄️",
            Season::Unknown => "🌿",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Sunny,
    Clear,
    Cloudy,
    Rainy,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Counts of trees per condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeCounts {
    pub healthy: u32,
    pub growing: u32,
    pub wilting: u32,
    pub dead: u32,
}

impl TreeCounts {
    /// Widened so backend-supplied counts cannot overflow
    pub fn total(&self) -> u64 {
        [self.healthy, self.growing, self.wilting, self.dead]
            .into_iter()
            .map(u64::from)
            .sum()
    }
}

/// Unlockable decorations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SceneFeatures {
    pub flowers: bool,
    pub birds: bool,
    pub butterflies: bool,
    pub stream: bool,
    pub bench: bool,
    pub rocks: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ForestSnapshot {
    #[serde(default)]
    pub season: Season,
    #[serde(default)]
    pub weather: Weather,
    #[serde(default)]
    pub time_of_day: Option<String>,
    #[serde(default)]
    pub forest_health_score: Option<f64>,
    #[serde(default)]
    pub growth_rate: Option<f64>,
    #[serde(default)]
    pub biodiversity_score: Option<f64>,

    #[serde(default)]
    pub total_trees: Option<u32>,
    #[serde(default)]
    pub healthy_trees: Option<u32>,
    #[serde(default)]
    pub growing_trees: Option<u32>,
    #[serde(default)]
    pub wilting_trees: Option<u32>,
    #[serde(default)]
    pub dead_trees: Option<u32>,

    #[serde(default)]
    pub sunlight_level: Option<f64>,
    #[serde(default)]
    pub water_level: Option<f64>,
    #[serde(default)]
    pub soil_quality: Option<f64>,
    #[serde(default)]
    pub air_quality: Option<f64>,

    #[serde(default)]
    pub has_flowers: bool,
    #[serde(default)]
    pub has_birds: bool,
    #[serde(default)]
    pub has_butterflies: bool,
    #[serde(default)]
    pub has_stream: bool,
    #[serde(default)]
    pub has_bench: bool,
    #[serde(default)]
    pub has_rocks: bool,
}

fn factor(value: Option<f64>) -> f64 {
    match value {
        // Zero is treated as missing, like the dashboard does
        Some(v) if v.is_finite() && v > 0.0 => v.clamp(0.0, 100.0),
        _ => DEFAULT_FACTOR,
    }
}

impl ForestSnapshot {
    pub fn tree_counts(&self) -> TreeCounts {
        TreeCounts {
            healthy: self.healthy_trees.unwrap_or(0),
            growing: self.growing_trees.unwrap_or(0),
            wilting: self.wilting_trees.unwrap_or(0),
            dead: self.dead_trees.unwrap_or(0),
        }
    }

    /// Whether the snapshot carries any per-condition tree counts
    pub fn has_tree_counts(&self) -> bool {
        self.tree_counts().total() > 0
    }

    pub fn features(&self) -> SceneFeatures {
        SceneFeatures {
            flowers: self.has_flowers,
            birds: self.has_birds,
            butterflies: self.has_butterflies,
            stream: self.has_stream,
            bench: self.has_bench,
            rocks: self.has_rocks,
        }
    }

    pub fn sunlight(&self) -> f64 {
        factor(self.sunlight_level)
    }

    pub fn water(&self) -> f64 {
        factor(self.water_level)
    }

    pub fn soil(&self) -> f64 {
        factor(self.soil_quality)
    }

    pub fn air(&self) -> f64 {
        factor(self.air_quality)
    }

    /// Forest health normalised to 0..=1, if the backend sent one
    pub fn health_fraction(&self) -> Option<f64> {
        self.forest_health_score
            .filter(|s| s.is_finite())
            .map(|s| (s / 100.0).clamp(0.0, 1.0))
    }

    /// Share of healthy trees, in percent
    pub fn healthy_percent(&self) -> Option<f64> {
        let total = self
            .total_trees
            .map(u64::from)
            .unwrap_or_else(|| self.tree_counts().total());
        if total == 0 {
            return None;
        }
        Some(self.healthy_trees.unwrap_or(0) as f64 / total as f64 * 100.0)
    }
}
