mod dates;
mod gcal;
mod schedule;
mod structs;

pub use dates::{parse_seminar_date, SeminarTimes};
pub use gcal::google_calendar_link;
pub use schedule::{bucketize, bucketize_today, Buckets, PAST_WINDOW_DAYS};
pub use structs::{load_dataset, Dataset, GroupEntry, Seminar, SeminarGroup};
