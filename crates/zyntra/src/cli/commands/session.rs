//! Interactive wellness session
//!
//! The session owns a [`WellnessState`] for the lifetime of the process.
//! Nothing is persisted; quitting discards the forest.

use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};

use super::forest::print_scene;
use crate::chat::{ForestSpirit, QUICK_PROMPTS};
use crate::cli::{bar, print_json, Context};
use crate::error::{Result, ZyntraError};
use crate::models::{ActivityKind, NewActivity};
use crate::scene::SceneParams;
use crate::store::{analytics, Action, TimeOfDay, WellnessState};

const HELP: &str = "\
Commands:
  log <kind> <minutes> [notes]   Log an activity
  score                          Show the eco score
  history                        Show recent score changes
  activities                     List logged activities
  badges                         Show earned badges
  stats                          Activity analytics
  scene                          Describe the forest scene
  time <day|evening|night>       Change the time of day
  sound                          Toggle ambient sound
  chat [message]                 Talk to the forest spirit
  kinds                          List activity kinds
  help                           Show this help
  quit                           Leave the session";

/// What the loop should do after a line
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

pub(crate) struct Session {
    state: WellnessState,
    spirit: ForestSpirit,
    rng: StdRng,
    json: bool,
}

impl Session {
    pub(crate) fn new(seed: u64, json: bool) -> Self {
        Self {
            state: WellnessState::new(),
            spirit: ForestSpirit::new(Local::now()),
            rng: StdRng::seed_from_u64(seed),
            json,
        }
    }

    pub(crate) fn state(&self) -> &WellnessState {
        &self.state
    }

    fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(action, Local::now());
    }

    /// Run one input line
    pub(crate) fn handle(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            "help" | "?" => println!("{}", HELP),
            "log" => self.log(rest)?,
            "score" => self.score()?,
            "history" => self.history()?,
            "activities" => self.activities()?,
            "badges" => self.badges()?,
            "stats" => self.stats()?,
            "scene" => self.scene()?,
            "time" => {
                let value: TimeOfDay = rest.parse()?;
                self.dispatch(Action::SetTimeOfDay(value));
                println!("Time of day set to {}.", value);
            }
            "sound" => {
                self.dispatch(Action::ToggleSound);
                let on = self.state.sound_enabled();
                println!("Ambient sound {}.", if on { "on" } else { "off" });
            }
            "chat" => self.chat(rest),
            "kinds" => {
                for kind in ActivityKind::ALL {
                    println!(
                        "{} {:<11} {:<12} {:+} per 30 min",
                        kind.emoji(),
                        kind.slug(),
                        kind.label(),
                        kind.base_impact()
                    );
                }
            }
            other => {
                return Err(ZyntraError::invalid_param(format!(
                    "Unknown command '{}'. Type 'help' for a list.",
                    other
                )))
            }
        }
        Ok(Flow::Continue)
    }

    fn log(&mut self, args: &str) -> Result<()> {
        let mut parts = args.splitn(3, char::is_whitespace);
        let kind: ActivityKind = parts
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ZyntraError::invalid_param("Usage: log <kind> <minutes> [notes]"))?
            .parse()?;
        let minutes: u32 = parts
            .next()
            .ok_or_else(|| ZyntraError::invalid_param("Usage: log <kind> <minutes> [notes]"))?
            .parse()
            .map_err(|_| ZyntraError::invalid_param("Minutes must be a whole number"))?;
        let mut input = NewActivity::new(kind, minutes)?;
        if let Some(notes) = parts.next() {
            input = input.with_notes(notes.trim());
        }

        let before = self.state.badges().len();
        self.dispatch(Action::AddActivity(input));

        if self.json {
            return print_json(&self.state.activities()[0]);
        }

        let activity = &self.state.activities()[0];
        println!(
            "{} Logged {} min of {} ({} eco). Score is now {}/{}.",
            kind.emoji(),
            activity.duration_minutes,
            kind.label(),
            activity.impact_formatted(),
            self.state.eco_score(),
            self.state.max_eco_score()
        );
        for badge in &self.state.badges()[before..] {
            println!("{} Badge earned: {}! {}", badge.emoji, badge.name, badge.description);
        }
        Ok(())
    }

    fn score(&self) -> Result<()> {
        if self.json {
            return print_json(&serde_json::json!({
                "ecoScore": self.state.eco_score(),
                "maxEcoScore": self.state.max_eco_score(),
                "forestHealth": self.state.forest_health(),
            }));
        }
        let score = self.state.eco_score();
        println!(
            "Eco score:    {} {}/{}",
            bar(f64::from(score), 20),
            score,
            self.state.max_eco_score()
        );
        println!("Forest:       {:.0}% healthy", self.state.forest_health() * 100.0);
        Ok(())
    }

    fn history(&self) -> Result<()> {
        let history = self.state.score_history();
        if self.json {
            return print_json(history);
        }
        if history.is_empty() {
            println!("No score changes yet.");
            return Ok(());
        }
        for entry in history.iter().rev() {
            println!(
                "{}  {:>3}",
                entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                entry.score
            );
        }
        Ok(())
    }

    fn activities(&self) -> Result<()> {
        let activities = self.state.activities();
        if self.json {
            return print_json(activities);
        }
        if activities.is_empty() {
            println!("No activities logged yet. Try: log exercise 30");
            return Ok(());
        }
        println!("{:<8} {:<12} {:>6} {:>6}  {}", "Time", "Activity", "Min", "Eco", "Notes");
        println!("{}", "-".repeat(50));
        for a in activities {
            println!(
                "{:<8} {:<12} {:>6} {:>6}  {}",
                a.timestamp.format("%H:%M"),
                a.kind.label(),
                a.duration_minutes,
                a.impact_formatted(),
                a.notes.as_deref().unwrap_or("")
            );
        }
        Ok(())
    }

    fn badges(&self) -> Result<()> {
        let badges = self.state.badges();
        if self.json {
            return print_json(badges);
        }
        if badges.is_empty() {
            println!("No badges yet. Keep caring for your forest.");
            return Ok(());
        }
        for badge in badges {
            println!(
                "{} {:<18} {}  ({})",
                badge.emoji,
                badge.name,
                badge.description,
                badge.earned_at.format("%b %-d")
            );
        }
        Ok(())
    }

    fn stats(&self) -> Result<()> {
        let now = Local::now();
        let stats = analytics::stats(self.state.activities(), now);
        let totals = analytics::totals_by_kind(self.state.activities());
        let series = analytics::score_series(self.state.score_history(), now.date_naive());

        if self.json {
            return print_json(&serde_json::json!({
                "stats": stats,
                "byKind": totals,
                "scores": series,
            }));
        }

        println!("Analytics");
        println!("{}", "-".repeat(40));
        println!("Energy saved:     {}", stats.energy_saved);
        println!("Focus sessions:   {}", stats.focus_streak);
        println!("Wellness balance: {}", stats.wellness_balance);
        println!("This week:        {} activities ({:+}%)", stats.weekly_activities, stats.activity_trend);

        if !totals.is_empty() {
            println!();
            for t in &totals {
                println!(
                    "{} {:<12} {:>3}x {:>5} min {:>+5}",
                    t.kind.emoji(),
                    t.kind.label(),
                    t.count,
                    t.minutes,
                    t.impact
                );
            }
        }

        println!();
        for point in &series {
            println!("{:<7} {} {}", point.label, bar(f64::from(point.score), 20), point.score);
        }
        Ok(())
    }

    fn scene(&mut self) -> Result<()> {
        let seed = rand::Rng::gen(&mut self.rng);
        let scene = SceneParams::from_state(&self.state, seed);
        if self.json {
            return print_json(&scene);
        }
        print_scene(&scene);
        Ok(())
    }

    fn chat(&mut self, message: &str) {
        if message.is_empty() {
            if let Some(last) = self.spirit.transcript().last() {
                println!("🌿 {}", last.text);
            }
            println!();
            println!("Try one of these:");
            for (emoji, prompt) in QUICK_PROMPTS {
                println!("  {} chat {}", emoji, prompt);
            }
            return;
        }
        if let Some(answer) = self
            .spirit
            .send(message, &self.state, &mut self.rng, Local::now())
        {
            println!("🌿 {}", answer.text);
        }
    }
}

pub async fn run(ctx: &Context, seed: Option<u64>) -> Result<()> {
    let mut session = Session::new(seed.unwrap_or_else(rand::random), ctx.is_json());

    println!("🌳 Zyntra session. Your forest starts at {}/{}.", session.state().eco_score(), session.state().max_eco_score());
    println!("Type 'help' for commands, 'quit' to leave.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("zyntra> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        match session.handle(&line?) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => eprintln!("{}", e.user_message()),
        }
    }

    println!("Goodbye. Your forest rests.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_updates_state() {
        let mut session = Session::new(1, false);
        assert_eq!(session.handle("log exercise 60 morning run").unwrap(), Flow::Continue);

        let state = session.state();
        assert_eq!(state.activities().len(), 1);
        assert_eq!(state.activities()[0].notes.as_deref(), Some("morning run"));
        assert_eq!(state.eco_score(), 70);
    }

    #[test]
    fn test_log_rejects_bad_input() {
        let mut session = Session::new(1, false);
        assert!(session.handle("log").is_err());
        assert!(session.handle("log exercise").is_err());
        assert!(session.handle("log exercise soon").is_err());
        assert!(session.handle("log flying 10").is_err());
        assert!(session.handle("log walk 0").is_err());
        assert!(session.state().activities().is_empty());
    }

    #[test]
    fn test_time_and_sound() {
        let mut session = Session::new(1, false);
        session.handle("time night").unwrap();
        session.handle("sound").unwrap();
        assert_eq!(session.state().time_of_day(), TimeOfDay::Night);
        assert!(session.state().sound_enabled());
        assert!(session.handle("time noon").is_err());
    }

    #[test]
    fn test_quit_and_unknown() {
        let mut session = Session::new(1, false);
        assert_eq!(session.handle("  quit ").unwrap(), Flow::Quit);
        assert_eq!(session.handle("").unwrap(), Flow::Continue);
        assert!(session.handle("dance").is_err());
    }

    #[test]
    fn test_chat_grows_transcript() {
        let mut session = Session::new(1, false);
        session.handle("chat").unwrap();
        assert_eq!(session.spirit.transcript().len(), 1);
        session.handle("chat I feel tired").unwrap();
        assert_eq!(session.spirit.transcript().len(), 3);
    }
}
