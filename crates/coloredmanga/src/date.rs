use chrono::{DateTime, Duration, NaiveDate, Utc};

const DATE_FORMATS: &[&str] = &["%B %d, %Y", "%B %d %Y", "%d %B %Y", "%Y-%m-%d", "%m/%d/%Y"];

/// Parses the release date printed next to a chapter.
///
/// Absolute dates are read as midnight UTC. Fresh chapters are printed
/// relative to `now` ("2 hours ago", "yesterday"). Returns `None` when the
/// text is neither.
pub fn parse_release_date(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
        .or_else(|| parse_relative_date(text, now))
}

fn parse_relative_date(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let text = text.to_lowercase();

    if text.contains("today") || text.contains("just now") {
        return Some(now);
    }
    if text.contains("yesterday") {
        return Some(now - Duration::days(1));
    }
    if !text.contains("ago") {
        return None;
    }

    let number = text
        .split_whitespace()
        .find_map(|word| match word {
            "a" | "an" => Some(1),
            word => word.parse::<i64>().ok(),
        })
        .unwrap_or(1);

    let unit = |words: &[&str]| words.iter().any(|word| text.contains(word));
    let offset = if unit(&["sec"]) {
        Duration::try_seconds(number)
    } else if unit(&["min"]) {
        Duration::try_minutes(number)
    } else if unit(&["hour"]) {
        Duration::try_hours(number)
    } else if unit(&["day"]) {
        Duration::try_days(number)
    } else if unit(&["week"]) {
        Duration::try_weeks(number)
    } else if unit(&["month"]) {
        Duration::try_days(number.checked_mul(30)?)
    } else if unit(&["year"]) {
        Duration::try_days(number.checked_mul(365)?)
    } else {
        None
    }?;

    now.checked_sub_signed(offset)
}
