// Utility functions
use chrono::{Local, NaiveDate};

/// Extraction date for records captured now, in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Converts a string to kebab-case, used for report file names.
pub fn to_kebab_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Collapses runs of whitespace into single spaces and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
