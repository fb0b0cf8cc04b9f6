use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use chrono::{TimeZone, Utc};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::age;
use crate::cann::{self, CannRow};
use crate::fpl::FplClient;
use crate::standings::StandingsProvider;

#[derive(Clone)]
pub struct AppState {
    pub standings: Arc<dyn StandingsProvider>,
    pub fpl: FplClient,
    /// Comma separated FPL manager ids, empty when not configured.
    pub managers: String,
}

/// Build the Axum router for all pages.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/cann", get(cann_handler))
        .route("/fpl", get(fpl_handler))
        .route("/huxley", get(huxley_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Landing page with links to the other pages.
async fn home_handler() -> impl IntoResponse {
    info!("Request on /");
    Html(HOME_HTML)
}

/// Fetch the standings, generate the Cann table and render it.
async fn cann_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, (StatusCode, String)> {
    info!("Request on /cann");

    let raw = state.standings.fetch_standings().await.map_err(|e| {
        (
            StatusCode::BAD_GATEWAY,
            format!("error getting standings from {}: {}", state.standings.name(), e),
        )
    })?;

    let rows = cann::generate(&raw)
        .map_err(|e| (StatusCode::BAD_GATEWAY, e.to_string()))?;

    Ok(Html(render_cann(&rows)))
}

/// Aggregated FPL mini-league as JSON.
async fn fpl_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    info!("Request on /fpl");

    if state.managers.is_empty() {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            "MANAGERS env var not set".to_string(),
        ));
    }

    state
        .fpl
        .league(&state.managers)
        .await
        .map(Json)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

/// Huxley's age in days, weeks, months and years.
async fn huxley_handler() -> impl IntoResponse {
    info!("Request on /huxley");

    let dob = Utc.with_ymd_and_hms(2022, 7, 28, 12, 0, 0).unwrap();
    let huxley_age = age::age_between(dob, Utc::now());

    Html(render_huxley(&huxley_age))
}

fn render_huxley(huxley_age: &age::Age) -> String {
    HUXLEY_HTML
        .replace("%DATE%", &huxley_age.date_of_interest)
        .replace("%DAYS%", &huxley_age.days.to_string())
        .replace("%WEEKS%", &huxley_age.weeks.to_string())
        .replace("%MONTHS%", &format!("{:.2}", huxley_age.months))
        .replace("%YEARS%", &format!("{:.2}", huxley_age.years))
}

/// Render the Cann rows into the table page. Rows with no teams still get
/// a cell so the points gaps stay visible. Team names come from a third
/// party and can contain markup characters ("Brighton & Hove"), so the
/// team text is escaped.
fn render_cann(rows: &[CannRow]) -> String {
    let mut body = String::new();
    for row in rows {
        let class = if row.teams.is_empty() { "gap" } else { "occupied" };
        body.push_str(&format!(
            "      <tr class=\"{}\"><td>{}</td><td>{}</td></tr>\n",
            class,
            row.points,
            escape_html(&row.teams)
        ));
    }
    CANN_HTML.replace("<!--CANN_ROWS-->", body.trim_end())
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

const HOME_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Mick's Pages</title>
<style>
  body { background: #0f1117; color: #e0e0e0; font-family: 'Segoe UI', system-ui, sans-serif; padding: 2rem; }
  h1 { color: #6c63ff; }
  a { color: #00c896; text-decoration: none; font-size: 1.1rem; }
  a:hover { text-decoration: underline; }
  li { margin: .6rem 0; }
</style>
</head>
<body>
<h1>Mick's Pages</h1>
<ul>
  <li><a href="/cann">Premier League Cann table</a></li>
  <li><a href="/fpl">FPL mini-league scores (JSON)</a></li>
  <li><a href="/huxley">Huxley's age</a></li>
</ul>
</body>
</html>"#;

const CANN_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Premier League Cann Table</title>
<style>
  body { background: #0f1117; color: #e0e0e0; font-family: 'Segoe UI', system-ui, sans-serif; padding: 2rem; }
  h1 { color: #6c63ff; font-size: 1.4rem; }
  table { border-collapse: collapse; margin-top: 1rem; }
  td { padding: .15rem .8rem; font-size: .9rem; border-bottom: 1px solid #1e2130; }
  td:first-child { color: #8888aa; text-align: right; }
  tr.gap td { height: 1.1rem; }
  tr.occupied td:last-child { color: #00c896; }
</style>
</head>
<body>
<h1>Premier League Cann Table</h1>
<p>One row per point value. Empty rows show the gaps between teams.<br>
Team format: [position]name(played, goal difference)</p>
<table>
  <tbody>
<!--CANN_ROWS-->
  </tbody>
</table>
</body>
</html>"#;

const HUXLEY_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Huxley</title>
<style>
  body { background: #0f1117; color: #e0e0e0; font-family: 'Segoe UI', system-ui, sans-serif; padding: 2rem; }
  h1 { color: #6c63ff; }
  li { margin: .4rem 0; }
</style>
</head>
<body>
<h1>Huxley's Age</h1>
<h3>Date: %DATE%</h3>
<ul>
  <li>Breed: Golden Retriever</li>
  <li>Born: 28 July 2022</li>
  <li>Days: %DAYS%</li>
  <li>Weeks: %WEEKS%</li>
  <li>Months: %MONTHS%</li>
  <li>Years: %YEARS%</li>
</ul>
</body>
</html>"#;
