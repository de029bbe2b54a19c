//! Forest commands: remote snapshot mapped to scene parameters

use tracing::warn;

use crate::cli::{bar, print_json, Context};
use crate::error::Result;
use crate::models::ForestSnapshot;
use crate::scene::{animation, SceneParams, SceneSource, TreeType};
use crate::store::WellnessState;

/// Show the forest. Without a usable snapshot the local defaults drive the scene.
pub async fn show(ctx: &Context, seed: Option<u64>, offline: bool, at: Option<f64>) -> Result<()> {
    let snapshot = if offline {
        None
    } else {
        fetch_snapshot(ctx).await
    };

    let seed = seed.unwrap_or_else(rand::random);
    let state = WellnessState::new();
    let scene = SceneParams::resolve(snapshot.as_ref(), &state, seed);
    let frame = at.map(|t| animation::frame(&scene, t));

    if ctx.is_json() {
        return print_json(&serde_json::json!({
            "snapshot": snapshot,
            "scene": scene,
            "frame": frame,
        }));
    }

    if let Some(snapshot) = snapshot.as_ref() {
        print_snapshot(snapshot);
        println!();
    }
    print_scene(&scene);

    if let Some(frame) = frame {
        println!();
        println!("Frame at t={:.2}s", frame.elapsed);
        println!("{}", "-".repeat(40));
        if let Some(density) = frame.fog_density {
            println!("Fog density:  {:.4}", density);
        }
        let max_sway = frame
            .tree_sway
            .iter()
            .fold(0.0_f64, |acc, s| acc.max(s.abs()));
        println!("Max sway:     {:.3} rad", max_sway);
        for (i, bird) in frame.birds.iter().enumerate() {
            println!("Bird {}:       ({:.2}, {:.2}, {:.2})", i + 1, bird.x, bird.y, bird.z);
        }
    }

    Ok(())
}

/// Fetch the snapshot, swallowing any failure
pub(crate) async fn fetch_snapshot(ctx: &Context) -> Option<ForestSnapshot> {
    let result: Result<ForestSnapshot> = async {
        let settings = ctx.settings()?;
        ctx.client(&settings)?.forest().await
    }
    .await;

    match result {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!(error = %e, "could not load forest snapshot, using local scene");
            None
        }
    }
}

fn print_snapshot(snapshot: &ForestSnapshot) {
    println!(
        "{} Wellness Forest ({:?}, {:?})",
        snapshot.season.emoji(),
        snapshot.season,
        snapshot.weather
    );
    println!("{}", "-".repeat(40));

    if let Some(score) = snapshot.forest_health_score {
        println!("Health:       {:.1}", score);
    }
    if let Some(rate) = snapshot.growth_rate {
        println!("Growth rate:  {:.1}", rate);
    }
    if let Some(bio) = snapshot.biodiversity_score {
        println!("Biodiversity: {:.1}", bio);
    }

    let counts = snapshot.tree_counts();
    println!(
        "Trees:        {} healthy, {} growing, {} wilting, {} dead",
        counts.healthy, counts.growing, counts.wilting, counts.dead
    );
    if let Some(pct) = snapshot.healthy_percent() {
        println!("Healthy:      {:.0}%", pct);
    }

    println!();
    for (label, value) in [
        ("Sunlight", snapshot.sunlight()),
        ("Water", snapshot.water()),
        ("Soil", snapshot.soil()),
        ("Air", snapshot.air()),
    ] {
        println!("{:<13} {} {:>5.1}", label, bar(value, 20), value);
    }
}

pub(crate) fn print_scene(scene: &SceneParams) {
    let source = match scene.source {
        SceneSource::Local => "local",
        SceneSource::Remote => "remote",
    };
    println!("Scene ({}, seed {})", source, scene.seed);
    println!("{}", "-".repeat(40));
    println!("Health:       {:.2} ({:?})", scene.health, scene.band);
    println!("Time of day:  {}", scene.time_of_day);

    if scene.source == SceneSource::Remote {
        let typed: Vec<String> = TreeType::ALL
            .iter()
            .map(|&kind| format!("{} {:?}", scene.tree_count(kind), kind).to_lowercase())
            .collect();
        println!("Trees:        {}", typed.join(", "));
    } else {
        println!("Trees:        {}", scene.trees.len());
    }
    if let Some(grass) = scene.grass {
        println!("Grass:        {} blades, {}", grass.blades, grass.color);
    }
    println!("Ground:       {}", scene.ground);
    println!(
        "Light:        {:.2} directional {}, {:.2} ambient {}",
        scene.lighting.directional_intensity,
        scene.lighting.directional,
        scene.lighting.ambient_intensity,
        scene.lighting.ambient
    );
    println!("Fog:          {}", scene.lighting.fog.color());

    let mut extras = Vec::new();
    if !scene.flowers.is_empty() {
        extras.push(format!("{} flowers", scene.flowers.len()));
    }
    if scene.birds > 0 {
        extras.push(format!("{} birds", scene.birds));
    }
    if scene.butterflies > 0 {
        extras.push(format!("{} butterflies", scene.butterflies));
    }
    if !scene.fireflies.is_empty() {
        extras.push(format!("{} fireflies", scene.fireflies.len()));
    }
    if !scene.rocks.is_empty() {
        extras.push(format!("{} rocks", scene.rocks.len()));
    }
    if scene.stream {
        extras.push("stream".to_string());
    }
    if scene.bench.is_some() {
        extras.push("bench".to_string());
    }
    if extras.is_empty() {
        println!("Extras:       none unlocked");
    } else {
        println!("Extras:       {}", extras.join(", "));
    }
}
