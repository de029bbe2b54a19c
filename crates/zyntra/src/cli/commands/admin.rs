//! Admin commands: roster and team wellness overview

use crate::cli::{bar, print_json, Context};
use crate::error::{Result, ZyntraError};
use crate::models::admin::HIGH_RISK_THRESHOLD;
use crate::models::TeamSummary;

fn require_admin(ctx: &Context) -> Result<()> {
    let session = ctx.store()?.load()?.ok_or(ZyntraError::NotAuthenticated)?;
    if !session.is_admin() {
        return Err(ZyntraError::auth("This command needs an admin account"));
    }
    Ok(())
}

pub async fn employees(ctx: &Context) -> Result<()> {
    require_admin(ctx)?;
    let settings = ctx.settings()?;
    let employees = ctx.client(&settings)?.employees().await?;

    if ctx.is_json() {
        return print_json(&employees);
    }

    if employees.is_empty() {
        println!("No employees found.");
        return Ok(());
    }

    println!("{:<6} {:<24} {:<30}", "ID", "Name", "Email");
    println!("{}", "-".repeat(62));
    for emp in &employees {
        println!("{:<6} {:<24} {:<30}", emp.id, emp.display_name(), emp.email);
    }
    println!();
    println!("{} employees", employees.len());
    Ok(())
}

/// Team overview built from every employee's dashboard
pub async fn dashboard(ctx: &Context) -> Result<()> {
    require_admin(ctx)?;
    let settings = ctx.settings()?;
    let client = ctx.client(&settings)?;

    let employees = client.employees().await?;
    let dashboards = client.employee_dashboards(&employees).await;
    let summary = TeamSummary::from_dashboards(employees.len(), dashboards.values());

    if ctx.is_json() {
        return print_json(&serde_json::json!({
            "summary": summary,
            "dashboards": dashboards,
        }));
    }

    println!("Team Wellness");
    println!("{}", "-".repeat(40));
    println!("Employees:    {} ({} with data)", summary.employees, summary.with_data);
    println!("Wellness:     {} {:.1}", bar(summary.avg_wellness, 20), summary.avg_wellness);
    println!("Ergonomics:   {} {:.1}", bar(summary.avg_ergonomic, 20), summary.avg_ergonomic);
    println!("Good posture: {} {:.1}%", bar(summary.avg_posture, 20), summary.avg_posture);
    println!("High risk:    {} (score >= {})", summary.high_risk, HIGH_RISK_THRESHOLD);
    if !summary.stress_distribution.is_empty() {
        let parts: Vec<String> = summary
            .stress_distribution
            .iter()
            .map(|(level, n)| format!("{} {}", n, level))
            .collect();
        println!("Stress:       {}", parts.join(", "));
    }

    println!();
    println!("{:<24} {:>9} {:>9} {:>8} {:<10}", "Employee", "Wellness", "Change", "Risk", "Stress");
    println!("{}", "-".repeat(64));
    for emp in &employees {
        let Some(dash) = dashboards.get(&emp.id) else {
            println!("{:<24} {:>9}", emp.display_name(), "no data");
            continue;
        };
        let wellness = dash
            .avg_wellness_7d
            .map(|w| format!("{:.1}", w))
            .unwrap_or_else(|| "-".to_string());
        let change = dash
            .wellness_change_percent
            .map(|c| format!("{:+.1}%", c))
            .unwrap_or_else(|| "-".to_string());
        let risk = dash
            .current_risk
            .as_ref()
            .and_then(|r| r.overall_risk_score)
            .map(|r| format!("{:.1}{}", r, if dash.is_high_risk() { "!" } else { "" }))
            .unwrap_or_else(|| "-".to_string());
        let stress = dash
            .latest_trend()
            .and_then(|t| t.stress_level.clone())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<24} {:>9} {:>9} {:>8} {:<10}",
            emp.display_name(),
            wellness,
            change,
            risk,
            stress
        );
    }
    Ok(())
}
