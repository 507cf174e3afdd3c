use chrono::{NaiveDate, NaiveTime};

/// Date layouts seen on the results archive, most common first.
const DATE_FORMATS: &[&str] = &["%d %b %Y", "%d %B %Y", "%Y-%m-%d", "%d/%m/%Y"];

/// Parse a calendar date such as `"13 May 1950"`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Parse `hours:minutes:seconds.fraction`, e.g. `"2:13:23.600"`.
///
/// The fraction may be omitted: `"1:30:00"` parses as a whole-second time.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M:%S%.f").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_archive_date_layouts() {
        let expected = NaiveDate::from_ymd_opt(1950, 5, 13).unwrap();
        assert_eq!(parse_date("13 May 1950"), Some(expected));
        assert_eq!(parse_date("1950-05-13"), Some(expected));
        assert_eq!(parse_date("13/05/1950"), Some(expected));
        assert_eq!(
            parse_date("03 September 1950"),
            NaiveDate::from_ymd_opt(1950, 9, 3)
        );
        assert_eq!(parse_date("Sep 1950"), None);
    }

    #[test]
    fn parses_race_times() {
        assert_eq!(
            parse_time("2:13:23.600"),
            NaiveTime::from_hms_milli_opt(2, 13, 23, 600)
        );
        assert_eq!(parse_time("01:30:00"), NaiveTime::from_hms_opt(1, 30, 0));
        assert_eq!(parse_time("+1 Lap"), None);
        assert_eq!(parse_time(""), None);
    }
}
