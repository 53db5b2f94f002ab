//! Display strings in the fixed Vietnamese locale.

use chrono::NaiveDate;

/// Cut `HH:MM:SS` down to `HH:MM`.
///
/// Values that do not look like a clock time are returned unchanged.
#[must_use]
pub fn format_time(visit_time: &str) -> String {
    let trimmed = visit_time.trim();
    let looks_like_clock = trimmed.chars().nth(2) == Some(':') && trimmed.chars().count() >= 5;
    if looks_like_clock {
        trimmed.chars().take(5).collect()
    } else {
        trimmed.to_owned()
    }
}

/// `45 phút`, `2 giờ`, `1 giờ 30 phút`.
#[must_use]
pub fn format_duration(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{minutes} phút");
    }
    let hours = minutes / 60;
    let rest = minutes - hours * 60;
    if rest == 0 {
        format!("{hours} giờ")
    } else {
        format!("{hours} giờ {rest} phút")
    }
}

/// Metres below one kilometre, otherwise kilometres with one decimal.
///
/// Halves round away from zero (`1.25` gives `1.3 km`).
#[must_use]
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0} m", (km * 1000.0).round())
    } else {
        format!("{:.1} km", (km * 10.0).round() / 10.0)
    }
}

/// `6.0tr`, `250k`, `800đ`.
///
/// Halves round up, so `1 250 000` is `1.3tr`.
#[must_use]
pub fn format_currency(amount: i64) -> String {
    if amount >= 1_000_000 {
        let tenths = (amount + 50_000) / 100_000;
        format!("{}.{}tr", tenths / 10, tenths % 10)
    } else if amount >= 1_000 {
        format!("{}k", (amount + 500) / 1_000)
    } else {
        format!("{amount}đ")
    }
}

/// Google rating with one decimal.
#[must_use]
pub fn format_rating(rating: f64) -> String {
    format!("{rating:.1}")
}

/// `dd/mm/yyyy`.
#[must_use]
pub fn format_date_vi(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Meal markers get a Vietnamese label; other notes pass through.
#[must_use]
pub fn translate_notes(notes: &str) -> String {
    match notes.trim().to_lowercase().as_str() {
        "breakfast" => "🥐 Bữa sáng".to_owned(),
        "lunch" => "🍜 Bữa trưa".to_owned(),
        "dinner" => "🍽 Bữa tối".to_owned(),
        _ => notes.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(format_duration(0), "0 phút");
        assert_eq!(format_duration(45), "45 phút");
        assert_eq!(format_duration(60), "1 giờ");
        assert_eq!(format_duration(90), "1 giờ 30 phút");
        assert_eq!(format_duration(120), "2 giờ");
    }

    #[test]
    fn distances() {
        assert_eq!(format_distance(0.5), "500 m");
        assert_eq!(format_distance(0.0004), "0 m");
        assert_eq!(format_distance(1.0), "1.0 km");
        assert_eq!(format_distance(2.345), "2.3 km");
        assert_eq!(format_distance(1.25), "1.3 km");
        assert_eq!(format_distance(12.75), "12.8 km");
    }

    #[test]
    fn currency() {
        assert_eq!(format_currency(6_000_000), "6.0tr");
        assert_eq!(format_currency(1_260_000), "1.3tr");
        assert_eq!(format_currency(1_250_000), "1.3tr");
        assert_eq!(format_currency(1_249_999), "1.2tr");
        assert_eq!(format_currency(999_500), "1000k");
        assert_eq!(format_currency(250_000), "250k");
        assert_eq!(format_currency(1_500), "2k");
        assert_eq!(format_currency(800), "800đ");
        assert_eq!(format_currency(0), "0đ");
    }

    #[test]
    fn times_truncate_seconds() {
        assert_eq!(format_time("07:05:00"), "07:05");
        assert_eq!(format_time("19:30"), "19:30");
        assert_eq!(format_time("soon"), "soon");
    }

    #[test]
    fn notes_translation() {
        assert_eq!(translate_notes("Breakfast"), "🥐 Bữa sáng");
        assert_eq!(translate_notes("dinner"), "🍽 Bữa tối");
        assert_eq!(translate_notes("mang theo tiền mặt"), "mang theo tiền mặt");
    }

    #[test]
    fn footer_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).expect("date");
        assert_eq!(format_date_vi(date), "09/03/2026");
    }
}
