//! Posture analysis command

use std::path::PathBuf;

use super::gait::check_video;
use crate::cli::{print_json, Context};
use crate::error::Result;
use crate::models::{PersonAnalysis, Rating};

pub async fn analyze(ctx: &Context, file: PathBuf) -> Result<()> {
    check_video(&file)?;
    let settings = ctx.settings()?;
    let client = ctx.client(&settings)?;

    eprintln!("Analyzing {}...", file.display());
    let analysis = client.analyze_posture(&file).await?;

    if ctx.is_json() {
        return print_json(&analysis);
    }

    println!("Posture Analysis");
    println!("{}", "-".repeat(40));
    println!("Persons detected: {}", analysis.persons_detected);
    if let Some(w) = analysis.overall_avg_wellness {
        println!("Avg wellness:     {:.1}%", w);
    }
    println!("High risk:        {}", analysis.high_risk_count);
    println!("Frames processed: {}", analysis.total_frames_processed);

    for person in &analysis.person_analyses {
        println!();
        print_person(person);
    }

    println!();
    if let Some(name) = &analysis.video_filename {
        println!("Video:    {}", name);
    }
    if let Some(secs) = analysis.analysis_duration_seconds {
        println!("Duration: {:.2}s", secs);
    }
    if let Some(id) = &analysis.session_id {
        println!("Session:  {}", id);
    }
    Ok(())
}

fn print_person(person: &PersonAnalysis) {
    let id = match &person.person_id {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    println!("Person {} ({} frames detected)", id, person.total_frames_detected);

    let posture = person.dominant_posture.as_deref();
    let stress = person.stress_level.as_deref();
    println!(
        "  Posture:   {} {}",
        Rating::from_posture(posture).symbol(),
        posture.unwrap_or("unknown")
    );
    println!(
        "  Stress:    {} {}",
        Rating::from_stress(stress).symbol(),
        stress.unwrap_or("unknown")
    );
    if let Some(mood) = &person.mood_estimate {
        println!("  Mood:      {}", mood);
    }
    if let Some(v) = person.avg_ergonomic_score {
        println!("  Ergonomic: {:.1}%", v);
    }
    if let Some(v) = person.avg_posture_quality {
        println!("  Quality:   {:.1}%", v);
    }
    if let Some(v) = person.fatigue_indicator {
        println!("  Fatigue:   {:.0}%", v * 100.0);
    }
    if let Some(v) = person.overall_wellness_score {
        println!("  Wellness:  {:.1}%", v);
    }
    if let Some(v) = person.neck_pain_risk {
        println!("  Neck risk: {}%", v);
    }
    if let Some(v) = person.back_pain_risk {
        println!("  Back risk: {}%", v);
    }
    if !person.posture_distribution.is_empty() {
        let parts: Vec<String> = person
            .posture_distribution
            .iter()
            .map(|(k, v)| format!("{} {:.0}%", k, v))
            .collect();
        println!("  Postures:  {}", parts.join(", "));
    }
    if !person.activity_distribution.is_empty() {
        let parts: Vec<String> = person
            .activity_distribution
            .iter()
            .map(|(k, v)| format!("{} {:.0}%", k, v))
            .collect();
        println!("  Activity:  {}", parts.join(", "));
    }
}
