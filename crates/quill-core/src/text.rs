//! Display helpers derived from post text and dates.

use chrono::{DateTime, Utc};

/// Average reading speed used when none is configured.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Estimated reading time in whole minutes, never less than one.
///
/// Blank text still counts as a single word. A zero rate falls back to
/// [`DEFAULT_WORDS_PER_MINUTE`].
pub fn calculate_reading_time(text: &str, words_per_minute: u32) -> u32 {
    let rate = match words_per_minute {
        0 => DEFAULT_WORDS_PER_MINUTE,
        rate => rate,
    };
    let words = text.split_whitespace().count().max(1);
    let minutes = words.div_ceil(rate as usize);
    u32::try_from(minutes).unwrap_or(u32::MAX).max(1)
}

/// [`calculate_reading_time`] at the default rate.
pub fn reading_time(text: &str) -> u32 {
    calculate_reading_time(text, DEFAULT_WORDS_PER_MINUTE)
}

/// Long calendar date, e.g. "January 5, 2024".
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Cut `text` to `length` characters and append an ellipsis.
///
/// Text that already fits is returned unchanged. The cut counts characters,
/// not words.
pub fn truncate_text(text: &str, length: usize) -> String {
    if text.chars().count() <= length {
        return text.to_string();
    }
    let cut: String = text.chars().take(length).collect();
    format!("{}...", cut.trim_end())
}
