//! Scripted forest spirit
//!
//! Replies are canned lines picked by the eco score's mood, mixed with
//! generic insights. The rng is injected so replies are reproducible.

use chrono::{DateTime, Local};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::store::WellnessState;

pub const GREETING: &str = "Hello! I am the Nature Spirit of Zyntra 🌿. I'm here to guide you on your journey to balance and harmony. How are you feeling today?";

pub const QUICK_PROMPTS: [(&str, &str); 4] = [
    ("🌲", "How's my forest?"),
    ("💡", "Give me advice"),
    ("🎯", "What should I focus on?"),
    ("✨", "Tell me something inspiring"),
];

const HIGH: [&str; 4] = [
    "Your forest feels calm today 🌞. The trees are swaying gently in harmony.",
    "✨ What a beautiful energy! Your actions are creating ripples of positivity.",
    "The forest spirits are grateful 🕊️. Keep nurturing this balance!",
    "🌿 I sense strong life force in your forest. You're in perfect harmony.",
];

const MEDIUM: [&str; 4] = [
    "Your forest is stable, but it could use a little more care 🌤️",
    "The trees whisper that they need more attention. Perhaps a walk in nature?",
    "🍃 Balance is near, but not quite there yet. What will you do today?",
    "Your forest shows promise. A few positive actions could make it thrive!",
];

const LOW: [&str; 4] = [
    "Digital fog is rising. Maybe take a short break? 🌧️",
    "⚠️ The forest feels heavy. It's calling for restoration.",
    "I sense imbalance in your energy. Time for self-care?",
    "🌑 Your forest needs urgent attention. What's weighing you down?",
];

const INSIGHTS: [&str; 5] = [
    "I noticed you've been quite active lately. Remember to rest too! 🌙",
    "Your focus sessions are improving the forest's clarity ✨",
    "The trees grow stronger with each mindful choice you make 🌲",
    "Have you considered adding more eco-friendly actions today? ♻️",
    "Your wellness activities are creating beautiful energy patterns 💚",
];

pub const HIGH_MOOD_SCORE: u8 = 70;
pub const LOW_MOOD_SCORE: u8 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    High,
    Medium,
    Low,
}

impl Mood {
    pub fn from_score(eco_score: u8) -> Self {
        if eco_score >= HIGH_MOOD_SCORE {
            Mood::High
        } else if eco_score <= LOW_MOOD_SCORE {
            Mood::Low
        } else {
            Mood::Medium
        }
    }

    pub fn lines(self) -> &'static [&'static str] {
        match self {
            Mood::High => &HIGH,
            Mood::Medium => &MEDIUM,
            Mood::Low => &LOW,
        }
    }
}

/// One reply for the given score: a mood line or a generic insight, evenly
pub fn reply<R: Rng + ?Sized>(eco_score: u8, rng: &mut R) -> &'static str {
    let mood_line = Mood::from_score(eco_score).lines().choose(&mut *rng);
    let insight = INSIGHTS.choose(&mut *rng);
    let pick = if rng.gen_bool(0.5) { mood_line } else { insight };
    pick.copied().unwrap_or(GREETING)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub text: String,
    pub from_user: bool,
    pub at: DateTime<Local>,
}

/// Conversation with the spirit, opened with its greeting
#[derive(Debug, Clone)]
pub struct ForestSpirit {
    transcript: Vec<ChatMessage>,
}

impl ForestSpirit {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            transcript: vec![ChatMessage {
                text: GREETING.to_string(),
                from_user: false,
                at: now,
            }],
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Record the user's message and the spirit's answer. Blank input is ignored.
    pub fn send<R: Rng + ?Sized>(
        &mut self,
        text: &str,
        state: &WellnessState,
        rng: &mut R,
        now: DateTime<Local>,
    ) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.transcript.push(ChatMessage {
            text: text.to_string(),
            from_user: true,
            at: now,
        });
        self.transcript.push(ChatMessage {
            text: reply(state.eco_score(), rng).to_string(),
            from_user: false,
            at: now,
        });
        self.transcript.last()
    }
}
