//! Cron schedule humanizer
//!
//! Turns the three schedule shapes the trigger UI actually produces into
//! readable descriptions. Anything else echoes back verbatim. This is a
//! deliberate simplification, not full cron support.

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Describe a 5-field cron expression.
///
/// Recognized shapes, checked in order:
/// - `M H * * *` → "Daily at H:MM"
/// - `M H * * W` → "Every <Weekday> at H:MM" (0=Sunday..6=Saturday)
/// - `M H D * *` → "Monthly on day D at H:MM" (D a plain day number)
///
/// Wrong field counts and any other combination return the input
/// unchanged.
pub fn humanize_cron(expr: &str) -> String {
    let fields: Vec<&str> = expr.split_whitespace().collect();
    let [minute, hour, dom, month, dow] = fields.as_slice() else {
        return expr.to_string();
    };

    let time = match format_time(hour, minute) {
        Some(t) => t,
        None => return expr.to_string(),
    };

    if *dom == "*" && *month == "*" && *dow == "*" {
        return format!("Daily at {time}");
    }

    if *dom == "*" && *month == "*" {
        let day = dow
            .parse::<usize>()
            .ok()
            .and_then(|d| WEEKDAYS.get(d).copied())
            .map(str::to_string)
            .unwrap_or_else(|| dow.to_string());
        return format!("Every {day} at {time}");
    }

    if *month == "*" && *dow == "*" && dom.parse::<u32>().is_ok() {
        return format!("Monthly on day {dom} at {time}");
    }

    expr.to_string()
}

/// "H:MM" from numeric hour and minute fields; `None` if either is not a
/// plain number (e.g. `*/5`).
fn format_time(hour: &str, minute: &str) -> Option<String> {
    let h: u32 = hour.parse().ok()?;
    let m: u32 = minute.parse().ok()?;
    Some(format!("{h}:{m:02}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_shape() {
        assert_eq!(humanize_cron("30 14 * * *"), "Daily at 14:30");
        assert_eq!(humanize_cron("0 0 * * *"), "Daily at 0:00");
    }

    #[test]
    fn weekly_shape() {
        assert_eq!(humanize_cron("0 8 * * 1"), "Every Monday at 8:00");
        assert_eq!(humanize_cron("15 17 * * 5"), "Every Friday at 17:15");
        // Out-of-range weekday index falls back to the raw digit.
        assert_eq!(humanize_cron("0 8 * * 9"), "Every 9 at 8:00");
    }

    #[test]
    fn monthly_shape() {
        assert_eq!(humanize_cron("0 9 15 * *"), "Monthly on day 15 at 9:00");
    }

    #[test]
    fn unrecognized_shapes_echo() {
        assert_eq!(humanize_cron("*/5 * * * *"), "*/5 * * * *");
        // Step values are not a fixed monthly day.
        assert_eq!(humanize_cron("0 9 */2 * *"), "0 9 */2 * *");
        // Fixed month is outside the recognized shapes.
        assert_eq!(humanize_cron("0 8 1 6 *"), "0 8 1 6 *");
        // Two constrained calendar fields.
        assert_eq!(humanize_cron("0 8 15 * 1"), "0 8 15 * 1");
    }

    #[test]
    fn wrong_field_counts_echo() {
        assert_eq!(humanize_cron("0 8 * *"), "0 8 * *");
        assert_eq!(humanize_cron("0 8 * * * *"), "0 8 * * * *");
        assert_eq!(humanize_cron(""), "");
    }
}
