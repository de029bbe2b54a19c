//! Badge rules
//!
//! Each rule is checked against the current score and activity log. A
//! badge is awarded once and never revoked.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::models::{Activity, ActivityKind};

pub const ECO_SAVER_SCORE: u8 = 80;
pub const FOCUS_GUARDIAN_SESSIONS: usize = 10;
pub const WELLNESS_WARRIOR_SESSIONS: usize = 7;

/// An earned badge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub description: String,
    pub earned_at: DateTime<Local>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeRule {
    EcoSaver,
    FocusGuardian,
    WellnessWarrior,
}

impl BadgeRule {
    /// Evaluation order, which is also award order when several qualify at once
    pub const ALL: [BadgeRule; 3] = [
        BadgeRule::EcoSaver,
        BadgeRule::FocusGuardian,
        BadgeRule::WellnessWarrior,
    ];

    pub fn id(self) -> &'static str {
        match self {
            BadgeRule::EcoSaver => "eco-saver",
            BadgeRule::FocusGuardian => "focus-guardian",
            BadgeRule::WellnessWarrior => "wellness-warrior",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BadgeRule::EcoSaver => "Eco Saver",
            BadgeRule::FocusGuardian => "Focus Guardian",
            BadgeRule::WellnessWarrior => "Wellness Warrior",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            BadgeRule::EcoSaver => "🌿",
            BadgeRule::FocusGuardian => "🕊",
            BadgeRule::WellnessWarrior => "💚",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BadgeRule::EcoSaver => "Reached 80+ eco-score",
            BadgeRule::FocusGuardian => "Logged 10+ focus sessions",
            BadgeRule::WellnessWarrior => "Completed 7+ wellness activities",
        }
    }

    pub fn qualifies(self, eco_score: u8, activities: &[Activity]) -> bool {
        match self {
            BadgeRule::EcoSaver => eco_score >= ECO_SAVER_SCORE,
            BadgeRule::FocusGuardian => {
                count(activities, ActivityKind::is_focus) >= FOCUS_GUARDIAN_SESSIONS
            }
            BadgeRule::WellnessWarrior => {
                count(activities, ActivityKind::is_wellness) >= WELLNESS_WARRIOR_SESSIONS
            }
        }
    }

    pub fn award(self, at: DateTime<Local>) -> Badge {
        Badge {
            id: self.id().to_string(),
            name: self.name().to_string(),
            emoji: self.emoji().to_string(),
            description: self.description().to_string(),
            earned_at: at,
        }
    }
}

fn count(activities: &[Activity], pred: fn(ActivityKind) -> bool) -> usize {
    activities.iter().filter(|a| pred(a.kind)).count()
}

/// Badges that qualify now and are not in `earned` yet
pub fn newly_qualified(
    eco_score: u8,
    activities: &[Activity],
    earned: &[Badge],
    at: DateTime<Local>,
) -> Vec<Badge> {
    BadgeRule::ALL
        .into_iter()
        .filter(|rule| !earned.iter().any(|b| b.id == rule.id()))
        .filter(|rule| rule.qualifies(eco_score, activities))
        .map(|rule| rule.award(at))
        .collect()
}
