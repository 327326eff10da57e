use chrono::{DateTime, Utc};

// Coarse age of a record, e.g. "just now", "5 min", "2 hour"
pub fn time_ago(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String{
    let elapsed = now.signed_duration_since(created_at);

    if elapsed.num_minutes() < 1 {
        "just now".to_string()
    } else if elapsed.num_hours() < 1 {
        format!("{} min", elapsed.num_minutes())
    } else if elapsed.num_days() < 1 {
        format!("{} hour", elapsed.num_hours())
    } else {
        format!("{} day", elapsed.num_days())
    }
}

// e.g. "March 05, 2025"
pub fn long_date(timestamp: DateTime<Utc>) -> String{
    timestamp.format("%B %d, %Y").to_string()
}
