use chrono::{TimeZone, Utc};

fn ago(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

pub fn timestamp_to_elapsed(timestamp: i64) -> String {
    let Some(then) = Utc.timestamp_opt(timestamp, 0).single() else {
        return "just now".to_string();
    };
    let elapsed = Utc::now().signed_duration_since(then);

    if elapsed.num_seconds() < 60 {
        "just now".to_string()
    } else if elapsed.num_minutes() < 60 {
        ago(elapsed.num_minutes(), "minute")
    } else if elapsed.num_hours() < 24 {
        ago(elapsed.num_hours(), "hour")
    } else if elapsed.num_days() < 30 {
        ago(elapsed.num_days(), "day")
    } else if elapsed.num_days() < 365 {
        ago(elapsed.num_days() / 30, "month")
    } else {
        ago(elapsed.num_days() / 365, "year")
    }
}

#[cfg(test)]
mod tests {
    use super::timestamp_to_elapsed;
    use chrono::{Duration, Utc};

    #[test]
    fn formats_coarse_buckets() {
        let now = Utc::now().timestamp();
        assert_eq!(timestamp_to_elapsed(now), "just now");
        assert_eq!(
            timestamp_to_elapsed((Utc::now() - Duration::minutes(1)).timestamp()),
            "1 minute ago"
        );
        assert_eq!(
            timestamp_to_elapsed((Utc::now() - Duration::hours(3)).timestamp()),
            "3 hours ago"
        );
        assert_eq!(
            timestamp_to_elapsed((Utc::now() - Duration::days(400)).timestamp()),
            "1 year ago"
        );
    }
}
