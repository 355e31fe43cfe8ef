//! Comment timestamp rendering.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};

/// `H:MM DD.MM.YYYY`: unpadded hour, zero-padded minutes, day and month.
pub const COMMENT_DATE_FORMAT: &str = "%-H:%M %d.%m.%Y";

pub fn format_comment_date<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format(COMMENT_DATE_FORMAT).to_string()
}

/// Current local time in comment format.
pub fn comment_date_now() -> String {
    format_comment_date(&Local::now())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn hour_is_unpadded() {
        let at = Utc.with_ymd_and_hms(2024, 8, 5, 9, 7, 0).unwrap();
        assert_eq!(format_comment_date(&at), "9:07 05.08.2024");
    }

    #[test]
    fn afternoon_matches_seed_style() {
        let at = Utc.with_ymd_and_hms(2024, 8, 15, 14, 30, 59).unwrap();
        assert_eq!(format_comment_date(&at), "14:30 15.08.2024");
    }

    #[test]
    fn midnight() {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_comment_date(&at), "0:00 01.01.2025");
    }
}
