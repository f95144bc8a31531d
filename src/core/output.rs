//! Colored terminal messages for the CLI.
//!
//! # Design Principles
//! - **Consistent color scheme**: red for errors, yellow for warnings, green for success
//! - **Diagnostics stay in the log**: these helpers only print final outcomes and summaries

use crate::core::diagnostics::Diagnostics;
use colored::*;

/// Prints `✕ Error: <message>` surrounded by blank lines.
pub fn print_error(message: &str) {
    eprintln!("\n{} {}\n", "✕ Error:".red(), message.white());
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "! Warning:".yellow(), message.white());
}

/// Prints `✓ <message>`.
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Prints `<header>:` followed by a blank line.
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

/// Prints a `   label: value` row, label muted.
pub fn print_field(label: &str, value: &str) {
    println!("   {} {}", format!("{label}:").bright_black(), value.blue());
}

/// One line counting the warnings and errors of a run, if there were any.
///
/// The events themselves were already logged as they happened.
pub fn diagnostics_summary(diagnostics: &Diagnostics) -> Option<String> {
    let warnings = diagnostics.warning_count();
    let errors = diagnostics.error_count();
    if warnings == 0 && errors == 0 {
        return None;
    }

    let plural = |count: usize, noun: &str| {
        if count == 1 {
            format!("{count} {noun}")
        } else {
            format!("{count} {noun}s")
        }
    };
    Some(format!(
        "{} and {} reported during the run",
        plural(warnings, "warning"),
        plural(errors, "error")
    ))
}

pub fn print_diagnostics_summary(diagnostics: &Diagnostics) {
    if let Some(summary) = diagnostics_summary(diagnostics) {
        print_warning(&summary);
    }
}
