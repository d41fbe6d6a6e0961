//! CLI output formatting.
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Day
//!
//! ```text
//! Day 11 · Today's moss!
//!     Image: Moss Images/10.jpg (loaded)
//!     Enjoy your free daily dose!
//!     Streak: 3 days · Theme: light 🌙
//! ```
//!
//! ## Check
//!
//! ```text
//! Gallery: Moss Images (199 of 201 images)
//!     Missing: 17, 42
//!     Unexpected: cover.jpg
//!     Undecodable: 88 (Format error decoding Jpeg)
//! ```

use crate::check::CheckReport;
use crate::streak::StreakRecord;
use crate::theme::Theme;
use crate::view::{DisplayState, ImageStatus};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural_days(n: u32) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{n} days")
    }
}

fn status_label(status: ImageStatus) -> &'static str {
    match status {
        ImageStatus::Loading => "loading",
        ImageStatus::Loaded => "loaded",
        ImageStatus::Fallback => "fallback",
    }
}

fn join_numbers(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_display(state: &DisplayState) -> Vec<String> {
    vec![
        format!("Day {} · {}", state.day_number, state.description),
        format!(
            "{}Image: {} ({})",
            indent(1),
            state.image.uri,
            status_label(state.image.status)
        ),
        format!("{}{}", indent(1), state.info),
        format!(
            "{}Streak: {} · Theme: {} {}",
            indent(1),
            plural_days(state.streak),
            state.theme,
            state.theme.icon()
        ),
    ]
}

pub fn print_display(state: &DisplayState) {
    for line in format_display(state) {
        println!("{}", line);
    }
}

pub fn format_streak(record: Option<&StreakRecord>) -> Vec<String> {
    match record {
        Some(r) => vec![
            format!("Streak: {}", plural_days(r.streak)),
            format!("{}Last visit: {}", indent(1), r.last_visit.to_rfc3339()),
        ],
        None => vec!["Streak: no visits recorded".to_string()],
    }
}

pub fn print_streak(record: Option<&StreakRecord>) {
    for line in format_streak(record) {
        println!("{}", line);
    }
}

pub fn format_theme(theme: Theme) -> Vec<String> {
    vec![format!("Theme: {} {}", theme, theme.icon())]
}

pub fn print_theme(theme: Theme) {
    for line in format_theme(theme) {
        println!("{}", line);
    }
}

pub fn format_check_report(root: &str, report: &CheckReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Gallery: {} ({} of {} images)",
        root, report.found, report.expected
    )];
    if !report.missing.is_empty() {
        lines.push(format!(
            "{}Missing: {}",
            indent(1),
            join_numbers(&report.missing)
        ));
    }
    if !report.unexpected.is_empty() {
        lines.push(format!(
            "{}Unexpected: {}",
            indent(1),
            report.unexpected.join(", ")
        ));
    }
    for bad in &report.undecodable {
        lines.push(format!(
            "{}Undecodable: {} ({})",
            indent(1),
            bad.index,
            bad.reason
        ));
    }
    if report.is_ok() {
        lines.push(format!("{}All images present", indent(1)));
    }
    lines
}

pub fn print_check_report(root: &str, report: &CheckReport) {
    for line in format_check_report(root, report) {
        println!("{}", line);
    }
}
