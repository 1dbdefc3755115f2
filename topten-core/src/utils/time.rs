use chrono::{NaiveDate, Utc};

/// Calendar-date key (`YYYY-MM-DD`) shared by the daily selector and the
/// day-rollover check. Time of day and timezone never enter the key.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_key_is_iso_formatted() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(date_key(date), "2024-01-01");

        let date = NaiveDate::from_ymd_opt(2026, 12, 9).unwrap();
        assert_eq!(date_key(date), "2026-12-09");
    }
}
