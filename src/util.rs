use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};

pub fn stable_pair(key: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

pub fn format_age(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    if elapsed.num_seconds() < 0 {
        return "in the future".to_owned();
    }

    let days = elapsed.num_days();
    if days == 0 {
        let hours = elapsed.num_hours();
        return match hours {
            0 => "just now".to_owned(),
            1 => "1 hour ago".to_owned(),
            _ => format!("{hours} hours ago"),
        };
    }

    match days {
        1 => "yesterday".to_owned(),
        2..=59 => format!("{days} days ago"),
        60..=729 => format!("{} months ago", days / 30),
        _ => format!("{} years ago", days / 365),
    }
}

pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_owned();
    }

    let mut truncated = label
        .chars()
        .take(max_chars.saturating_sub(1))
        .collect::<String>();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn stable_pair_is_deterministic_and_bounded() {
        let first = stable_pair("rust");
        assert_eq!(first, stable_pair("rust"));
        assert!((-1.0..=1.0).contains(&first.0));
        assert!((-1.0..=1.0).contains(&first.1));
    }

    #[test]
    fn format_age_buckets() {
        let now = Utc::now();
        assert_eq!(format_age(now, now), "just now");
        assert_eq!(format_age(now - Duration::hours(5), now), "5 hours ago");
        assert_eq!(format_age(now - Duration::days(1), now), "yesterday");
        assert_eq!(format_age(now - Duration::days(12), now), "12 days ago");
        assert_eq!(format_age(now - Duration::days(90), now), "3 months ago");
        assert_eq!(format_age(now - Duration::days(800), now), "2 years ago");
        assert_eq!(format_age(now + Duration::days(1), now), "in the future");
    }

    #[test]
    fn truncate_label_keeps_short_text() {
        assert_eq!(truncate_label("Rust", 10), "Rust");
        assert_eq!(truncate_label("Distributed systems", 8), "Distrib…");
    }
}
