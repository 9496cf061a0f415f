//! Chapter and volume numbers.
//!
//! The site gives no reliable numbering, so a number printed in the title
//! wins and the position in the list is the fallback. Lists are newest
//! first: the first entry of `total` gets `total`, the last one gets 1.

use once_cell::sync::Lazy;
use regex::Regex;

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

/// Fallback chapter number of the entry at `index` in a list without volumes.
pub fn flat_chapter_number(index: usize, total: usize) -> f64 {
    total.saturating_sub(index) as f64
}

/// Fallback volume number of the volume group at `index`.
pub fn volume_number(index: usize, total: usize) -> f64 {
    total.saturating_sub(index) as f64
}

/// First run of digits in `text` read as an integer.
///
/// Only the integer part is read, "Chapter 10.5" gives 10.
pub fn first_number(text: &str) -> Option<f64> {
    DIGITS
        .find(text)
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .map(|n| n as f64)
}

/// Number printed in `title`, or `fallback` when there is none.
pub fn number_or(title: &str, fallback: f64) -> f64 {
    first_number(title).unwrap_or(fallback)
}
