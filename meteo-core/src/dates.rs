use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::MISSING;

/// Weekday, day, month, year. No time component.
const LONG_DATE: &str = "%A %-d %B %Y";

/// Parse the raw `day` field of a forecast entry.
///
/// Accepts a plain calendar date (`2025-03-01`), an RFC 3339 timestamp or a
/// naive `YYYY-MM-DDTHH:MM:SS` timestamp; only the date part is kept.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Long French date for `date`, e.g. `samedi 1 mars 2025`.
pub fn format_long_fr(date: NaiveDate) -> String {
    date.and_time(NaiveTime::default())
        .and_utc()
        .format_localized(LONG_DATE, Locale::fr_FR)
        .to_string()
}

/// Formatted date of an optional raw `day` field. Missing and unparseable
/// values both come out as the placeholder.
pub fn localize_day(raw: Option<&str>) -> String {
    parse_day(raw.unwrap_or(MISSING))
        .map(format_long_fr)
        .unwrap_or_else(|| MISSING.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_french_long_date() {
        assert_eq!(localize_day(Some("2025-03-01")), "samedi 1 mars 2025");
        assert_eq!(
            localize_day(Some("2024-12-25")),
            "mercredi 25 décembre 2024"
        );
    }

    #[test]
    fn timestamps_keep_only_the_date() {
        assert_eq!(
            localize_day(Some("2025-03-01T00:00:00")),
            "samedi 1 mars 2025"
        );
        assert_eq!(
            localize_day(Some("2025-03-01T23:30:00+01:00")),
            "samedi 1 mars 2025"
        );
    }

    #[test]
    fn missing_day_falls_back_to_placeholder() {
        assert_eq!(localize_day(None), MISSING);
    }

    #[test]
    fn unparseable_day_falls_back_to_placeholder() {
        assert_eq!(localize_day(Some("tomorrow-ish")), MISSING);
        assert_eq!(localize_day(Some("2025-02-30")), MISSING);
    }
}
