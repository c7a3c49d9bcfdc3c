use chrono::{Local, NaiveDateTime, TimeZone, Utc};

use crate::dates::parse_seminar_date;
use crate::structs::Seminar;

const RENDER_URL: &str = "https://calendar.google.com/calendar/render";

/// Builds a Google Calendar "add event" link for a seminar. Never
/// fails; sentinel timestamps still produce a well-formed URL.
pub fn google_calendar_link(seminar: &Seminar) -> String {
    let times = parse_seminar_date(&seminar.date, &seminar.time);

    let dates = format!(
        "{}/{}",
        format_compact_utc(times.start),
        format_compact_utc(times.end)
    );

    let details = format!(
        "Department: {}\nSeries: {}\nSpeaker: {}\nAffiliation: {}\n\nAbstract: {}",
        seminar.department,
        seminar.series.as_deref().unwrap_or("N/A"),
        seminar.speaker,
        seminar.affiliation,
        seminar.abstract_text,
    );

    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("action", "TEMPLATE")
        .append_pair("text", &format!("LionTalk: {}", seminar.title))
        .append_pair("dates", &dates)
        .append_pair("details", &details)
        .append_pair("location", &seminar.location)
        .finish();

    format!("{RENDER_URL}?{query}")
}

/// `YYYYMMDDTHHMMSSZ`: the local timestamp shifted to UTC, ISO-8601
/// basic form.
fn format_compact_utc(local: NaiveDateTime) -> String {
    let utc = match Local.from_local_datetime(&local).earliest() {
        Some(stamp) => stamp.with_timezone(&Utc).naive_utc(),
        // Local times skipped by a DST transition keep their wall-clock
        // value.
        None => local,
    };

    utc.format("%Y%m%dT%H%M%SZ").to_string()
}
