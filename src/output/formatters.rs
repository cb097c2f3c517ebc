//! Formatting utilities for terminal output

use crate::core::{ColorCode, Feedback};

/// Names of the eight wire colors, by index
pub const COLOR_NAMES: [&str; 8] = [
    "beige", "darkblue", "green", "orange", "red", "black", "violet", "white",
];

/// Format feedback as pegs: `●` per red, `○` per white, `·` for the rest
#[must_use]
pub fn feedback_pegs(feedback: Feedback, slots: usize) -> String {
    let red = feedback.red() as usize;
    let white = (feedback.white() as usize).min(slots.saturating_sub(red));
    let mut result = String::with_capacity(slots * 3);
    result.push_str(&"●".repeat(red));
    result.push_str(&"○".repeat(white));
    result.push_str(&"·".repeat(slots.saturating_sub(red + white)));
    result
}

/// Format a code with color names where they exist, falling back to indices
#[must_use]
pub fn code_names(code: &ColorCode) -> String {
    code.pegs()
        .iter()
        .map(|&c| {
            COLOR_NAMES
                .get(c as usize)
                .map_or_else(|| c.to_string(), |name| (*name).to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    // Cast is safe: values are clamped to [0, width]
    let filled = if max > 0.0 {
        ((value / max) * width as f64) as usize
    } else {
        0
    };
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
