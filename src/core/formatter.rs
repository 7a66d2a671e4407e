use crate::core::models::timestamp::Timestamp;

/// Returns "$1,234.56". Negative amounts keep their sign in front of the dollar.
pub fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, frac)
}

/// Returns a compact duration such as "20m 42s", "3h 5m" or "2d 4h".
pub fn format_seconds(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    let minutes = total / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        let remaining_hours = hours % 24;
        if remaining_hours == 0 {
            format!("{}d", days)
        } else {
            format!("{}d {}h", days, remaining_hours)
        }
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, total % 60)
    } else {
        format!("{}s", total)
    }
}

/// Returns "2017-05-23 17:00 → 17:12 UTC", or the full end date when the
/// window spans more than one day.
pub fn format_window(begin: &Timestamp, end: &Timestamp) -> String {
    let b = begin.as_datetime();
    let e = end.as_datetime();
    if b.date_naive() == e.date_naive() {
        format!("{} → {} UTC", b.format("%Y-%m-%d %H:%M"), e.format("%H:%M"))
    } else {
        format!(
            "{} → {} UTC",
            b.format("%Y-%m-%d %H:%M"),
            e.format("%Y-%m-%d %H:%M")
        )
    }
}

/// Returns "[████░░░░]" where █ is this entry's share of the total.
pub fn format_share_bar(part: f64, total: f64, width: usize) -> String {
    let share = if total > 0.0 {
        (part / total).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (share * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_money_groups_thousands() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(27.12), "$27.12");
        assert_eq!(format_money(5000.0), "$5,000.00");
        assert_eq!(format_money(1234567.891), "$1,234,567.89");
        assert_eq!(format_money(-12.5), "-$12.50");
    }

    #[test]
    fn format_money_no_negative_zero() {
        assert_eq!(format_money(-0.001), "$0.00");
    }

    #[test]
    fn format_seconds_units() {
        assert_eq!(format_seconds(12.0), "12s");
        assert_eq!(format_seconds(1242.0), "20m 42s");
        assert_eq!(format_seconds(3.0 * 3600.0 + 300.0), "3h 5m");
        assert_eq!(format_seconds(48.0 * 3600.0), "2d");
        assert_eq!(format_seconds(52.0 * 3600.0), "2d 4h");
        assert_eq!(format_seconds(-5.0), "0s");
    }

    #[test]
    fn format_window_same_day() {
        let begin = Timestamp::parse("2017-05-23T17:00:00.000").unwrap();
        let end = Timestamp::parse("2017-05-23T17:12:00.000").unwrap();
        assert_eq!(format_window(&begin, &end), "2017-05-23 17:00 → 17:12 UTC");
    }

    #[test]
    fn format_window_spans_days() {
        let begin = Timestamp::parse("2017-05-23T17:00:00.000").unwrap();
        let end = Timestamp::parse("2017-05-24T01:00:00.000").unwrap();
        assert_eq!(
            format_window(&begin, &end),
            "2017-05-23 17:00 → 2017-05-24 01:00 UTC"
        );
    }

    #[test]
    fn format_share_bar_width() {
        assert_eq!(format_share_bar(0.0, 100.0, 8), "[░░░░░░░░]");
        assert_eq!(format_share_bar(100.0, 100.0, 8), "[████████]");
        assert_eq!(format_share_bar(50.0, 100.0, 8), "[████░░░░]");
        assert_eq!(format_share_bar(5.0, 0.0, 4), "[░░░░]");
    }
}
