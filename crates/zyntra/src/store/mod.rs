//! In-memory wellness state
//!
//! `WellnessState` is owned by whoever drives the session and lives for the
//! process lifetime; nothing here touches disk. Actions consume the state
//! and return the next one, and take the current time as an argument so
//! callers (and tests) control the clock.

pub mod analytics;
pub mod badges;

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ZyntraError;
use crate::models::{Activity, NewActivity};

pub use analytics::{ActivityStats, ChartPoint, KindTotal};
pub use badges::{Badge, BadgeRule};

pub const MAX_ECO_SCORE: u8 = 100;
pub const DEFAULT_ECO_SCORE: u8 = 50;
/// Score history keeps only this many most recent entries
pub const HISTORY_LIMIT: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    #[default]
    Day,
    Evening,
    Night,
}

impl TimeOfDay {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeOfDay::Day => "day",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeOfDay {
    type Err = ZyntraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(TimeOfDay::Day),
            "evening" => Ok(TimeOfDay::Evening),
            "night" => Ok(TimeOfDay::Night),
            other => Err(ZyntraError::invalid_param(format!(
                "Unknown time of day '{}'. Expected day, evening or night",
                other
            ))),
        }
    }
}

/// Score snapshot taken after every score change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreHistoryEntry {
    pub date: NaiveDate,
    pub score: u8,
    pub timestamp: DateTime<Local>,
}

/// Mutations the session can dispatch
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    UpdateEcoScore(i32),
    AddActivity(NewActivity),
    CheckBadges,
    ToggleSound,
    SetTimeOfDay(TimeOfDay),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WellnessState {
    eco_score: u8,
    activities: Vec<Activity>,
    score_history: Vec<ScoreHistoryEntry>,
    badges: Vec<Badge>,
    time_of_day: TimeOfDay,
    sound_enabled: bool,
}

impl Default for WellnessState {
    fn default() -> Self {
        Self::new()
    }
}

impl WellnessState {
    pub fn new() -> Self {
        Self {
            eco_score: DEFAULT_ECO_SCORE,
            activities: Vec::new(),
            score_history: Vec::new(),
            badges: Vec::new(),
            time_of_day: TimeOfDay::Day,
            sound_enabled: false,
        }
    }

    pub fn eco_score(&self) -> u8 {
        self.eco_score
    }

    pub fn max_eco_score(&self) -> u8 {
        MAX_ECO_SCORE
    }

    /// Always `eco_score / 100`
    pub fn forest_health(&self) -> f64 {
        f64::from(self.eco_score) / f64::from(MAX_ECO_SCORE)
    }

    /// Most recent first
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Oldest first
    pub fn score_history(&self) -> &[ScoreHistoryEntry] {
        &self.score_history
    }

    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        self.time_of_day
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn has_badge(&self, id: &str) -> bool {
        self.badges.iter().any(|b| b.id == id)
    }

    pub fn apply(self, action: Action, now: DateTime<Local>) -> Self {
        match action {
            Action::UpdateEcoScore(delta) => self.update_eco_score(delta, now),
            Action::AddActivity(input) => self.add_activity(input, now),
            Action::CheckBadges => self.check_badges(now),
            Action::ToggleSound => self.toggle_sound(),
            Action::SetTimeOfDay(value) => self.set_time_of_day(value),
        }
    }

    pub fn apply_now(self, action: Action) -> Self {
        self.apply(action, Local::now())
    }

    /// Clamp the new score to 0..=100 and record it in the history
    pub fn update_eco_score(mut self, delta: i32, now: DateTime<Local>) -> Self {
        let next = i32::from(self.eco_score)
            .saturating_add(delta)
            .clamp(0, i32::from(MAX_ECO_SCORE));
        self.eco_score = next as u8;

        self.score_history.push(ScoreHistoryEntry {
            date: now.date_naive(),
            score: self.eco_score,
            timestamp: now,
        });
        if self.score_history.len() > HISTORY_LIMIT {
            let excess = self.score_history.len() - HISTORY_LIMIT;
            self.score_history.drain(..excess);
        }
        self
    }

    /// Stamp and prepend the activity, apply its impact, then re-check badges
    pub fn add_activity(mut self, input: NewActivity, now: DateTime<Local>) -> Self {
        let mut id = now.timestamp_millis();
        if let Some(latest) = self.activities.first() {
            if id <= latest.id {
                id = latest.id + 1;
            }
        }

        let impact = input.eco_impact;
        let activity = Activity {
            id,
            kind: input.kind,
            duration_minutes: input.duration_minutes,
            notes: input.notes,
            eco_impact: impact,
            timestamp: now,
            date: now.date_naive(),
        };
        self.activities.insert(0, activity);

        self.update_eco_score(impact, now).check_badges(now)
    }

    pub fn add_activity_now(self, input: NewActivity) -> Self {
        self.add_activity(input, Local::now())
    }

    /// Award every badge that qualifies and has not been earned
    pub fn check_badges(mut self, now: DateTime<Local>) -> Self {
        let earned = badges::newly_qualified(self.eco_score, &self.activities, &self.badges, now);
        self.badges.extend(earned);
        self
    }

    pub fn toggle_sound(mut self) -> Self {
        self.sound_enabled = !self.sound_enabled;
        self
    }

    pub fn set_time_of_day(mut self, value: TimeOfDay) -> Self {
        self.time_of_day = value;
        self
    }
}
