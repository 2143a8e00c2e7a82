//! CLI output formatting utilities.

use crate::normalize::{AssignmentRecord, CourseRecord};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a course line.
    pub fn course(course: &CourseRecord) {
        match &course.section {
            Some(section) => println!(
                "  {} {} - {} ({})",
                style("*").cyan(),
                style(&course.title).bold(),
                section,
                style(&course.id).dim()
            ),
            None => println!(
                "  {} {} ({})",
                style("*").cyan(),
                style(&course.title).bold(),
                style(&course.id).dim()
            ),
        }
    }

    /// Print an assignment line.
    pub fn assignment(assignment: &AssignmentRecord) {
        let course = assignment
            .course
            .as_deref()
            .or(assignment.course_id.as_deref())
            .unwrap_or("unknown course");
        println!(
            "  {} {} {}\n    {} {}",
            style("*").cyan(),
            style(&assignment.title).bold(),
            style(format!("[{}]", course)).dim(),
            style("due").dim(),
            style(&assignment.due_at).yellow()
        );
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}
