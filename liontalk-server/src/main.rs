use std::{env, fs, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::get,
    Json, Router,
};
use log::info;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use liontalk_schedule::{bucketize_today, google_calendar_link, load_dataset, Seminar};

mod cli;

type Seminars = Arc<Vec<Seminar>>;

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();

    let args = cli::parse(env::args().skip(1).collect());

    let json = fs::read_to_string(&args.data_path)
        .with_context(|| format!("failed to read dataset {}", args.data_path.display()))?;
    let seminars = load_dataset(&json)
        .with_context(|| format!("failed to parse dataset {}", args.data_path.display()))?;

    info!(
        "loaded {} seminars from {}",
        seminars.len(),
        args.data_path.display()
    );

    let router = Router::new()
        .route("/schedule", get(handle_schedule))
        .fallback(|| async { Redirect::permanent(env!("CARGO_PKG_REPOSITORY")) })
        .with_state(Arc::new(seminars));

    let listener = TcpListener::bind(args.address).await?;
    info!("listening at http://{}", args.address);
    axum::serve(listener, router).await?;

    Ok(())
}

fn setup_logging() {
    if env::var("LOG").is_err() {
        env::set_var("LOG", "liontalk_server=info,liontalk_schedule=warn");
    }

    pretty_env_logger::init_custom_env("LOG");
}

#[derive(Deserialize)]
struct ScheduleQuery {
    /// Free-text filter; empty matches everything.
    #[serde(default)]
    q: String,
    /// Include the recent-past bucket (hidden unless requested).
    #[serde(default)]
    past: bool,
}

#[derive(Serialize)]
struct SeminarView {
    #[serde(flatten)]
    seminar: Seminar,
    holiday: bool,
    calendar_link: String,
}

#[derive(Serialize)]
struct ScheduleResponse {
    today: Vec<SeminarView>,
    upcoming: Vec<SeminarView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    past: Option<Vec<SeminarView>>,
}

async fn handle_schedule(
    State(seminars): State<Seminars>,
    Query(query): Query<ScheduleQuery>,
) -> Json<ScheduleResponse> {
    let buckets = bucketize_today(&seminars, &query.q);

    Json(ScheduleResponse {
        today: buckets.today.into_iter().map(view).collect(),
        upcoming: buckets.upcoming.into_iter().map(view).collect(),
        past: query
            .past
            .then(|| buckets.past.into_iter().map(view).collect()),
    })
}

fn view(seminar: &Seminar) -> SeminarView {
    SeminarView {
        holiday: seminar.is_holiday(),
        calendar_link: google_calendar_link(seminar),
        seminar: seminar.clone(),
    }
}
