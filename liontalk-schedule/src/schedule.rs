use std::cmp::Reverse;

use chrono::{Duration, Local, NaiveDate};

use crate::dates::parse_seminar_date;
use crate::structs::Seminar;

/// Past seminars older than this many days are dropped from the view.
pub const PAST_WINDOW_DAYS: i64 = 30;

/// The three display groups a record can land in. `today` and
/// `upcoming` keep dataset order; `past` is sorted newest-first.
#[derive(Debug, Default)]
pub struct Buckets<'a> {
    pub today: Vec<&'a Seminar>,
    pub upcoming: Vec<&'a Seminar>,
    pub past: Vec<&'a Seminar>,
}

/// Filters by free-text query and partitions the survivors around
/// `today`. Pure in its inputs; recomputed whenever the query changes.
pub fn bucketize<'a>(seminars: &'a [Seminar], query: &str, today: NaiveDate) -> Buckets<'a> {
    let query = query.to_lowercase();
    let cutoff = today - Duration::days(PAST_WINDOW_DAYS);

    let mut buckets = Buckets::default();

    for seminar in seminars.iter().filter(|s| matches_query(s, &query)) {
        let date = calendar_date(seminar);

        if date == today {
            buckets.today.push(seminar);
        } else if date > today {
            buckets.upcoming.push(seminar);
        } else if date >= cutoff {
            buckets.past.push(seminar);
        }
        // Anything before the window is dropped entirely.
    }

    buckets.past.sort_by_key(|seminar| Reverse(calendar_date(seminar)));

    buckets
}

pub fn bucketize_today<'a>(seminars: &'a [Seminar], query: &str) -> Buckets<'a> {
    bucketize(seminars, query, Local::now().date_naive())
}

/// Classification uses the calendar date only; time-of-day is ignored.
/// Unparseable dates inherit the parser's current-time sentinel and so
/// land on today.
fn calendar_date(seminar: &Seminar) -> NaiveDate {
    parse_seminar_date(&seminar.date, &seminar.time).start.date()
}

fn matches_query(seminar: &Seminar, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let fields = [
        &seminar.title,
        &seminar.speaker,
        &seminar.abstract_text,
        &seminar.date,
        &seminar.location,
        &seminar.department,
    ];

    fields
        .into_iter()
        .chain(seminar.series.as_ref())
        .any(|field| field.to_lowercase().contains(query))
}
