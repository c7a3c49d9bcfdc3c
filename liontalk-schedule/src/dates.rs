use std::collections::HashMap;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

static MONTHS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        ("Jan", 1),
        ("Feb", 2),
        ("Mar", 3),
        ("Apr", 4),
        ("May", 5),
        ("Jun", 6),
        ("Jul", 7),
        ("Aug", 8),
        ("Sep", 9),
        ("Sept", 9),
        ("Oct", 10),
        ("Nov", 11),
        ("Dec", 12),
    ])
});

static TIME_FRAGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d{1,2}):(\d{2})\s*(am|pm)?").unwrap());

/// Parsed start/end of a seminar, plus the raw month and day segments
/// for display. The raw segments are passed through unvalidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeminarTimes {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub month_abbr: String,
    pub day_display: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

/// Parses the dataset's informal `"D-Mon-YY"` date and
/// `"H:MM am - H:MM pm"` time range into local timestamps.
///
/// Never fails: malformed input yields a sentinel (current time for both
/// timestamps, `"ERR"`/`"00"` display segments) so rendering can
/// continue.
pub fn parse_seminar_date(date_str: &str, time_str: &str) -> SeminarTimes {
    match try_parse(date_str, time_str) {
        Some(times) => times,
        None => {
            warn!("unparseable seminar date/time: {date_str:?} / {time_str:?}");
            let now = Local::now().naive_local();
            SeminarTimes {
                start: now,
                end: now,
                month_abbr: "ERR".to_string(),
                day_display: "00".to_string(),
            }
        }
    }
}

fn try_parse(date_str: &str, time_str: &str) -> Option<SeminarTimes> {
    let mut segments = date_str.split('-');
    let day_raw = segments.next()?;
    let month_raw = segments.next()?;
    let year_raw = segments.next()?;

    let day = day_raw.trim().parse::<u32>().ok()?;
    let year = 2000 + year_raw.trim().parse::<i32>().ok()?;
    // Unknown abbreviations fall back to January rather than failing.
    let month = MONTHS.get(month_raw.trim()).copied().unwrap_or(1);
    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    let mut fragments = time_str.splitn(2, '-');
    let start_fragment = fragments.next()?.trim();
    let end_fragment = fragments.next()?.trim();

    let (start_hours, start_minutes, start_meridiem) = parse_fragment(start_fragment)?;
    let (end_hours, end_minutes, end_meridiem) = parse_fragment(end_fragment)?;

    let mut start_hours = to_24h(start_hours, start_meridiem);
    // "12:00 - 1:00 pm": a bare start inherits pm from the rest of the
    // time string.
    if start_meridiem.is_none() && time_str.to_lowercase().contains("pm") && start_hours < 12 {
        start_hours += 12;
    }

    // An end without its own marker is taken as pm.
    let end_hours = to_24h(end_hours, end_meridiem.or(Some(Meridiem::Pm)));

    let start = date.and_time(NaiveTime::from_hms_opt(start_hours, start_minutes, 0)?);
    let mut end = date.and_time(NaiveTime::from_hms_opt(end_hours, end_minutes, 0)?);

    // Fallback duration keeps the range well-ordered.
    if end <= start {
        end = start + Duration::hours(1);
    }

    Some(SeminarTimes {
        start,
        end,
        month_abbr: month_raw.to_string(),
        day_display: day_raw.to_string(),
    })
}

fn parse_fragment(fragment: &str) -> Option<(u32, u32, Option<Meridiem>)> {
    let captures = TIME_FRAGMENT.captures(fragment)?;

    let hours = captures[1].parse::<u32>().ok()?;
    let minutes = captures[2].parse::<u32>().ok()?;
    let meridiem = captures.get(3).map(|marker| {
        if marker.as_str().eq_ignore_ascii_case("pm") {
            Meridiem::Pm
        } else {
            Meridiem::Am
        }
    });

    Some((hours, minutes, meridiem))
}

fn to_24h(hours: u32, meridiem: Option<Meridiem>) -> u32 {
    match meridiem {
        Some(Meridiem::Pm) if hours < 12 => hours + 12,
        Some(Meridiem::Am) if hours == 12 => 0,
        _ => hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn parses_afternoon_range() {
        let times = parse_seminar_date("20-Jan-26", "4:10 pm - 5:00 pm");
        assert_eq!(times.start, local(2026, 1, 20, 16, 10));
        assert_eq!(times.end, local(2026, 1, 20, 17, 0));
        assert_eq!(times.month_abbr, "Jan");
        assert_eq!(times.day_display, "20");
    }

    #[test]
    fn infers_pm_for_bare_start() {
        let times = parse_seminar_date("12-Mar-25", "12:00 - 1:00 pm");
        assert_eq!(times.start, local(2025, 3, 12, 12, 0));
        assert_eq!(times.end, local(2025, 3, 12, 13, 0));
    }

    #[test]
    fn sept_is_a_synonym_for_sep() {
        let long = parse_seminar_date("8-Sept-25", "4:10 pm - 5:00 pm");
        let short = parse_seminar_date("8-Sep-25", "4:10 pm - 5:00 pm");
        assert_eq!(long.start, short.start);
        assert_eq!(long.start.date(), NaiveDate::from_ymd_opt(2025, 9, 8).unwrap());
        // Display segments stay raw.
        assert_eq!(long.month_abbr, "Sept");
        assert_eq!(long.day_display, "8");
    }

    #[test]
    fn unknown_month_falls_back_to_january() {
        let times = parse_seminar_date("5-Foo-25", "1:00 pm - 2:00 pm");
        assert_eq!(times.start.date(), NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
        assert_eq!(times.month_abbr, "Foo");
    }

    #[test]
    fn handles_morning_and_midnight_hours() {
        let times = parse_seminar_date("3-Feb-25", "12:15 am - 1:05 am");
        assert_eq!(times.start, local(2025, 2, 3, 0, 15));
        assert_eq!(times.end, local(2025, 2, 3, 1, 5));
    }

    #[test]
    fn degenerate_range_gets_fallback_duration() {
        let times = parse_seminar_date("10-Oct-25", "4:00 pm - 4:00 pm");
        assert_eq!(times.end, times.start + Duration::hours(1));

        let inverted = parse_seminar_date("10-Oct-25", "4:00 pm - 2:00 pm");
        assert_eq!(inverted.end, inverted.start + Duration::hours(1));
    }

    #[test]
    fn end_is_always_after_start() {
        let inputs = [
            ("20-Jan-26", "4:10 pm - 5:00 pm"),
            ("12-Mar-25", "12:00 - 1:00 pm"),
            ("8-Sept-25", "11:40 am - 12:55 pm"),
            ("1-Dec-25", "9:00 am - 9:00 am"),
        ];

        for (date, time) in inputs {
            let times = parse_seminar_date(date, time);
            assert!(times.end > times.start, "{date} {time}");
        }
    }

    #[test]
    fn malformed_input_returns_sentinel() {
        let times = parse_seminar_date("bad-data", "oops");
        assert_eq!(times.month_abbr, "ERR");
        assert_eq!(times.day_display, "00");
        assert_eq!(times.start, times.end);
    }

    #[test]
    fn out_of_range_day_returns_sentinel() {
        let times = parse_seminar_date("32-Jan-26", "4:10 pm - 5:00 pm");
        assert_eq!(times.month_abbr, "ERR");
    }
}
