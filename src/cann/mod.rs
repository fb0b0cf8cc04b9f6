//! Cann table generation. A Cann table shows league positions with one row
//! per point value, empty rows included, so gaps between teams stand out.
//! <https://en.wikipedia.org/wiki/Cann_table>

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Separator between team tokens sharing a points row.
const SEPARATOR: &str = " - ";

#[derive(Debug, Error)]
pub enum CannError {
    #[error("malformed standings payload: {0}")]
    MalformedInput(#[from] serde_json::Error),
    #[error("standings table is empty")]
    EmptyStandings,
}

/// One output row: a points value and every team on that total,
/// formatted and joined in original ranking order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CannRow {
    pub points: i32,
    pub teams: String,
}

#[derive(Debug, Deserialize)]
struct Team {
    #[serde(rename = "shortName")]
    short_name: String,
}

#[derive(Debug, Deserialize)]
struct Row {
    team: Team,
    position: u32,
    #[serde(rename = "playedGames")]
    played: u32,
    points: i32,
    #[serde(rename = "goalDifference")]
    goal_diff: i32,
}

#[derive(Debug, Deserialize)]
struct Standings {
    table: Vec<Row>,
}

#[derive(Debug, Deserialize)]
struct DataResponse {
    standings: Vec<Standings>,
}

/// Generate a Cann table from a raw football-data.org standings payload.
///
/// The provider supplies the table pre-sorted descending by points, so the
/// first entry anchors the top row and the last entry the bottom one; the
/// range in between is covered densely, one row per integer point value,
/// whether occupied or not. Entries are never re-sorted: teams sharing a
/// points total keep their provider order within the row.
pub fn generate(raw: &[u8]) -> Result<Vec<CannRow>, CannError> {
    let response: DataResponse = serde_json::from_slice(raw)?;

    // Only the overall table (first standings block) is of interest;
    // the API also ships home/away splits after it.
    let table = response
        .standings
        .into_iter()
        .next()
        .map(|s| s.table)
        .unwrap_or_default();

    let max_points = table.first().ok_or(CannError::EmptyStandings)?.points;
    let min_points = table.last().ok_or(CannError::EmptyStandings)?.points;

    // Inverted first/last only happens if the provider breaks its sort;
    // clamp so a broken payload cannot request a huge allocation.
    let row_count = (max_points - min_points + 1).max(0) as usize;
    let mut rows: Vec<CannRow> = (0..row_count)
        .map(|offset| CannRow {
            points: max_points - offset as i32,
            teams: String::new(),
        })
        .collect();

    for entry in &table {
        let token = format!(
            "[{}]{}({}, {:+})",
            entry.position, entry.team.short_name, entry.played, entry.goal_diff
        );
        let slot = (max_points - entry.points) as usize;
        match rows.get_mut(slot) {
            Some(row) => {
                if !row.teams.is_empty() {
                    row.teams.push_str(SEPARATOR);
                }
                row.teams.push_str(&token);
            }
            // Only reachable if the provider breaks its descending sort.
            None => warn!(
                "standings entry {} has points {} outside [{}, {}], skipping",
                token, entry.points, min_points, max_points
            ),
        }
    }

    Ok(rows)
}
