//! Locally logged activities
//!
//! An activity is a single user-reported event with a kind, a duration and
//! a signed impact on the eco score.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ZyntraError};

/// Duration the base impact of every kind is expressed for
pub const BASE_DURATION_MINUTES: u32 = 30;

/// Kinds of activity a user can log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityKind {
    #[serde(alias = "study")]
    Work,
    Exercise,
    Meditation,
    Walk,
    Reading,
    Social,
    Phone,
    Sedentary,
    JunkFood,
    EcoAction,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 10] = [
        ActivityKind::Work,
        ActivityKind::Exercise,
        ActivityKind::Meditation,
        ActivityKind::Walk,
        ActivityKind::Reading,
        ActivityKind::Social,
        ActivityKind::Phone,
        ActivityKind::Sedentary,
        ActivityKind::JunkFood,
        ActivityKind::EcoAction,
    ];

    /// Stable identifier used on the wire and on the command line
    pub fn slug(self) -> &'static str {
        match self {
            ActivityKind::Work => "work",
            ActivityKind::Exercise => "exercise",
            ActivityKind::Meditation => "meditation",
            ActivityKind::Walk => "walk",
            ActivityKind::Reading => "reading",
            ActivityKind::Social => "social",
            ActivityKind::Phone => "phone",
            ActivityKind::Sedentary => "sedentary",
            ActivityKind::JunkFood => "junk-food",
            ActivityKind::EcoAction => "eco-action",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActivityKind::Work => "Work/Study",
            ActivityKind::Exercise => "Exercise",
            ActivityKind::Meditation => "Meditation",
            ActivityKind::Walk => "Walk",
            ActivityKind::Reading => "Reading",
            ActivityKind::Social => "Social Time",
            ActivityKind::Phone => "Phone Use",
            ActivityKind::Sedentary => "Sedentary",
            ActivityKind::JunkFood => "Junk Food",
            ActivityKind::EcoAction => "Eco Action",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            ActivityKind::Work => "💼",
            ActivityKind::Exercise => "🏃",
            ActivityKind::Meditation => "🧘",
            ActivityKind::Walk => "🚶",
            ActivityKind::Reading => "📚",
            ActivityKind::Social => "👥",
            ActivityKind::Phone => "📱",
            ActivityKind::Sedentary => "🛋️",
            ActivityKind::JunkFood => "🍔",
            ActivityKind::EcoAction => "♻️",
        }
    }

    /// Eco impact of a 30 minute session
    pub fn base_impact(self) -> i32 {
        match self {
            ActivityKind::Work => 5,
            ActivityKind::Exercise => 10,
            ActivityKind::Meditation => 8,
            ActivityKind::Walk => 7,
            ActivityKind::Reading => 6,
            ActivityKind::Social => 5,
            ActivityKind::Phone => -5,
            ActivityKind::Sedentary => -3,
            ActivityKind::JunkFood => -4,
            ActivityKind::EcoAction => 12,
        }
    }

    /// Impact scaled by duration, rounded half up (-7.5 rounds to -7)
    pub fn impact_for(self, duration_minutes: u32) -> i32 {
        let scaled =
            self.base_impact() as f64 * duration_minutes as f64 / BASE_DURATION_MINUTES as f64;
        (scaled + 0.5).floor() as i32
    }

    pub fn is_focus(self) -> bool {
        matches!(self, ActivityKind::Work)
    }

    pub fn is_wellness(self) -> bool {
        matches!(self, ActivityKind::Exercise | ActivityKind::Meditation)
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ActivityKind {
    type Err = ZyntraError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        if wanted == "study" {
            return Ok(ActivityKind::Work);
        }
        ActivityKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == wanted)
            .ok_or_else(|| {
                ZyntraError::invalid_param(format!(
                    "Unknown activity '{}'. Expected one of: {}",
                    s,
                    ActivityKind::ALL.map(|k| k.slug()).join(", ")
                ))
            })
    }
}

/// User submission before the store stamps it
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub kind: ActivityKind,
    pub duration_minutes: u32,
    pub notes: Option<String>,
    pub eco_impact: i32,
}

impl NewActivity {
    /// Build a submission with the impact derived from kind and duration
    pub fn new(kind: ActivityKind, duration_minutes: u32) -> Result<Self> {
        if duration_minutes == 0 {
            return Err(ZyntraError::invalid_param(
                "Duration must be at least one minute",
            ));
        }
        Ok(Self {
            kind,
            duration_minutes,
            notes: None,
            eco_impact: kind.impact_for(duration_minutes),
        })
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = if notes.trim().is_empty() {
            None
        } else {
            Some(notes)
        };
        self
    }

    /// Override the computed impact
    pub fn with_impact(mut self, eco_impact: i32) -> Self {
        self.eco_impact = eco_impact;
        self
    }
}

/// A logged activity. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Creation time in epoch milliseconds, strictly increasing
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub eco_impact: i32,
    pub timestamp: DateTime<Local>,
    /// Calendar day in local time
    pub date: NaiveDate,
}

impl Activity {
    pub fn is_positive(&self) -> bool {
        self.eco_impact > 0
    }

    /// Impact rendered with an explicit sign
    pub fn impact_formatted(&self) -> String {
        format!("{:+}", self.eco_impact)
    }
}
