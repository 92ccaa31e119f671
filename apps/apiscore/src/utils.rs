//! Supporting helpers: message prefixes and score arithmetic.

use owo_colors::OwoColorize;

/// Whether stderr/stdout decorations should be colored.
pub fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if colors_enabled() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn note_prefix() -> String {
    if colors_enabled() {
        "note:".cyan().bold().to_string()
    } else {
        "note:".to_string()
    }
}

pub fn info_prefix() -> String {
    if colors_enabled() {
        "info:".blue().bold().to_string()
    } else {
        "info:".to_string()
    }
}

/// `100 * passed / total` rounded half-to-even; `None` when `total` is zero.
pub fn percent(passed: usize, total: usize) -> Option<u32> {
    if total == 0 {
        return None;
    }
    let ratio = 100.0 * passed as f64 / total as f64;
    Some(ratio.round_ties_even() as u32)
}
