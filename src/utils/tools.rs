//! Formatting and parsing helpers used by commands

use chrono::{Local, TimeZone, Timelike};
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use regex_lite::Regex;

const SIZES: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

static URL_IN_TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://[^\s]+").expect("static regex"));
static TWELVE_HOUR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0?[1-9]|1[0-2]):([0-5][0-9])(am|pm)$").expect("static regex"));

/// Human readable size, e.g. `1536 -> "1.5 KB"`
pub fn format_bytes(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZES.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    // Halves round away from zero
    let scale = 10f64.powi(decimals as i32);
    let fixed = format!("{:.*}", decimals, (value * scale).round() / scale);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    format!("{} {}", trimmed, SIZES[unit])
}

/// Duration as `"1 d 2 h 3 m 4 s"`, zero parts left out
pub fn runtime(seconds: u64) -> String {
    let parts = [
        (seconds / 86_400, "d"),
        ((seconds % 86_400) / 3_600, "h"),
        ((seconds % 3_600) / 60, "m"),
        (seconds % 60, "s"),
    ];

    parts
        .iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, unit)| format!("{} {}", n, unit))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn get_floor(number: f64) -> i64 {
    number.floor() as i64
}

pub fn get_random<T>(items: &[T]) -> Option<&T> {
    items.choose(&mut rand::thread_rng())
}

/// First http(s) URL in the text
pub fn extract_url(text: &str) -> Option<&str> {
    URL_IN_TEXT.find(text).map(|m| m.as_str())
}

pub fn is_url(text: &str) -> bool {
    url::Url::parse(text)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// `"1:05pm" -> "13:05"`
pub fn convert_to_24_hour(time: &str) -> Option<String> {
    let lower = time.to_lowercase();
    let caps = TWELVE_HOUR.captures(&lower)?;

    let mut hours: u32 = caps[1].parse().ok()?;
    let minutes = &caps[2];
    match &caps[3] {
        "pm" if hours != 12 => hours += 12,
        "am" if hours == 12 => hours = 0,
        _ => {}
    }
    Some(format!("{:02}:{}", hours, minutes))
}

/// `"13:05" -> "1:05PM"`
pub fn convert_to_12_hour(time: &str) -> Option<String> {
    let (hours, minutes) = time.split_once(':')?;
    let mut hour: u32 = hours.trim().parse().ok()?;
    if hour > 23 {
        return None;
    }

    let period = if hour >= 12 { "PM" } else { "AM" };
    if hour > 12 {
        hour -= 12;
    }
    if hour == 0 {
        hour = 12;
    }
    Some(format!("{}:{}{}", hour, minutes, period))
}

/// Millisecond timestamp as local `"h:mmam"`
pub fn format_time(timestamp_ms: i64) -> Option<String> {
    format_time_in(&Local, timestamp_ms)
}

pub fn format_time_in<Tz: TimeZone>(tz: &Tz, timestamp_ms: i64) -> Option<String> {
    let date = tz.timestamp_millis_opt(timestamp_ms).single()?;
    let hours = date.hour();
    let ampm = if hours >= 12 { "pm" } else { "am" };
    let hour12 = match hours % 12 {
        0 => 12,
        h => h,
    };
    Some(format!("{}:{:02}{}", hour12, date.minute(), ampm))
}
