//! Assignments command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::tools::{current_date, SchoologyTools};
use anyhow::Result;

/// Fetch and print upcoming assignments.
pub async fn run_assignments(json: bool, settings: &Settings) -> Result<()> {
    let tools = SchoologyTools::from_settings(settings)?;

    let spinner = Output::spinner("Fetching upcoming assignments...");
    let result = tools.get_upcoming_assignments().await;
    spinner.finish_and_clear();
    let assignments = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&assignments)?);
        return Ok(());
    }

    if assignments.is_empty() {
        Output::success("Nothing upcoming.");
        return Ok(());
    }

    Output::header(&format!("Upcoming assignments ({})", assignments.len()));
    Output::kv("As of", &current_date());
    println!();
    for assignment in &assignments {
        Output::assignment(assignment);
    }

    Ok(())
}
