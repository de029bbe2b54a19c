//! Gait recognition commands

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::cli::{print_json, Context};
use crate::client::api::is_video_file;
use crate::client::{analyze_gait_video, PollConfig};
use crate::error::{Result, ZyntraError};

/// Reject anything that is not an existing video file
pub(crate) fn check_video(file: &Path) -> Result<()> {
    if !file.is_file() {
        return Err(ZyntraError::invalid_param(format!(
            "File not found: {}",
            file.display()
        )));
    }
    if !is_video_file(file) {
        return Err(ZyntraError::invalid_param("Please upload a video file"));
    }
    Ok(())
}

/// Token cancelled on Ctrl-C
pub(crate) fn ctrl_c_token() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });
    token
}

/// Upload a video and wait for recognition to finish
pub async fn analyze(ctx: &Context, file: PathBuf) -> Result<()> {
    check_video(&file)?;
    let settings = ctx.settings()?;
    let client = ctx.client(&settings)?;
    let config = PollConfig::from_settings(&settings);
    let cancel = ctrl_c_token();

    eprintln!("Uploading {}...", file.display());
    let started = Instant::now();
    let quiet = ctx.is_json();

    let analysis = analyze_gait_video(&client, &file, &config, &cancel, |attempt| {
        if !quiet {
            eprint!(
                "\rProcessing video... ({}s elapsed, check {}/{})",
                started.elapsed().as_secs(),
                attempt,
                config.max_attempts
            );
            let _ = io::stderr().flush();
        }
    })
    .await;
    if !quiet {
        eprintln!();
    }
    let analysis = analysis?;

    if ctx.is_json() {
        return print_json(&analysis);
    }

    println!("Gait Analysis");
    println!("{}", "-".repeat(40));
    println!("Log ID:           {}", analysis.log_id);
    println!("Persons detected: {}", analysis.persons_detected);
    println!("Recognized:       {}", analysis.recognized);
    match analysis.processing_seconds {
        Some(secs) => println!("Processing time:  {}s", secs),
        None => println!("Processing time:  N/A"),
    }
    match &analysis.processed_video_url {
        Some(url) => {
            println!();
            println!("Video analyzed and ready to preview!");
            println!("{}", url);
        }
        None => println!("Video analyzed successfully!"),
    }
    Ok(())
}

pub async fn profile(ctx: &Context) -> Result<()> {
    let settings = ctx.settings()?;
    let profile = ctx.client(&settings)?.gait_profile().await?;

    if ctx.is_json() {
        return print_json(&profile);
    }

    println!("Gait Profile");
    println!("{}", "-".repeat(40));
    if let Some(id) = profile.user_id {
        println!("User ID:      {}", id);
    }
    if let Some(n) = profile.sample_count {
        println!("Samples:      {}", n);
    }
    if let Some(at) = &profile.created_at {
        println!("Created:      {}", at);
    }
    if let Some(at) = &profile.updated_at {
        println!("Updated:      {}", at);
    }
    for (key, value) in &profile.extra {
        match value {
            serde_json::Value::String(s) => println!("{:<13} {}", format!("{}:", key), s),
            serde_json::Value::Null => {}
            other => println!("{:<13} {}", format!("{}:", key), other),
        }
    }
    Ok(())
}

pub async fn profile_status(ctx: &Context) -> Result<()> {
    let settings = ctx.settings()?;
    let status = ctx.client(&settings)?.gait_profile_status().await?;

    if ctx.is_json() {
        return print_json(&status);
    }

    println!(
        "Profile: {}",
        if status.has_profile { "enrolled" } else { "not enrolled" }
    );
    if let Some(s) = &status.status {
        println!("Status:  {}", s);
    }
    if let Some(m) = &status.message {
        println!("{}", m);
    }
    Ok(())
}

pub async fn delete_profile(ctx: &Context, yes: bool) -> Result<()> {
    if !yes {
        print!("Delete your gait profile? This cannot be undone. [y/N] ");
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let settings = ctx.settings()?;
    let body = ctx.client(&settings)?.delete_gait_profile().await?;

    if ctx.is_json() {
        return print_json(&body);
    }
    match body.get("message").and_then(|m| m.as_str()) {
        Some(message) => println!("{}", message),
        None => println!("Gait profile deleted."),
    }
    Ok(())
}
