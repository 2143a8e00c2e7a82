//! Date command implementation.

use crate::tools::current_date;

/// Print the current date and time.
pub fn run_date() {
    println!("{}", current_date());
}
