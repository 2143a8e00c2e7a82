//! Courses command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::tools::SchoologyTools;
use anyhow::Result;

/// Fetch and print enrolled courses.
pub async fn run_courses(json: bool, settings: &Settings) -> Result<()> {
    let tools = SchoologyTools::from_settings(settings)?;

    let spinner = Output::spinner("Fetching courses...");
    let result = tools.get_enrolled_courses().await;
    spinner.finish_and_clear();
    let courses = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&courses)?);
        return Ok(());
    }

    if courses.is_empty() {
        Output::warning("No courses found.");
        return Ok(());
    }

    Output::header(&format!("Enrolled courses ({})", courses.len()));
    for course in &courses {
        Output::course(course);
    }

    Ok(())
}
