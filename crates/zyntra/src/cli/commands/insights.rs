//! AI insights command

use crate::cli::{bar, print_json, Context};
use crate::error::Result;
use crate::models::insights::score_band;

pub async fn show(ctx: &Context) -> Result<()> {
    let settings = ctx.settings()?;
    let client = ctx.client(&settings)?;

    let insights = client.ai_insights().await?;

    if ctx.is_json() {
        return print_json(&insights);
    }

    let name = insights.username.as_deref().unwrap_or("You");
    println!("AI Wellness Insights for {}", name);
    println!("{}", "-".repeat(40));

    if let Some(at) = insights.generated_at {
        println!("Generated:    {}", at.format("%B %-d, %Y"));
    }
    if let Some(score) = insights.avg_wellness_score {
        println!(
            "Wellness:     {} {:.1} ({})",
            bar(score, 20),
            score,
            score_band(score)
        );
    }
    if let Some(trend) = insights.wellness_trend.as_deref() {
        let note = insights.trend().describe();
        if note.is_empty() {
            println!("Trend:        {}", trend);
        } else {
            println!("Trend:        {} - {}", trend, note);
        }
    }
    if let Some(days) = insights.data_period_days {
        println!("Data period:  {} days", days);
    }

    println!();
    if insights.insights.is_empty() {
        println!("No recommendations yet.");
        return Ok(());
    }
    println!("{} Recommendations", insights.insights.len());
    for (i, (category, text)) in insights.categorized().enumerate() {
        println!();
        println!("#{} [{}]", i + 1, category);
        println!("  {}", text);
    }

    Ok(())
}
