//! Fantasy Premier League mini-league aggregation: one request per manager
//! id, fanned out concurrently, merged into a single league response.

use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fields of interest from the FPL `entry/<id>/` endpoint.
/// Ranks and the current event are null before the season starts.
#[derive(Debug, Clone, Deserialize)]
pub struct FplEntry {
    pub current_event: Option<i32>,
    pub id: i64,
    pub player_first_name: String,
    pub player_last_name: String,
    pub name: String,
    pub summary_overall_points: i32,
    pub summary_overall_rank: Option<i64>,
    pub summary_event_points: i32,
    pub summary_event_rank: Option<i64>,
}

/// One manager's line in the mini-league table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagerEntry {
    pub id: i64,
    pub name: String,
    pub team: String,
    pub points: i32,
    pub rank: i64,
    pub gw_points: i32,
    pub gw_rank: i64,
    pub link: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeagueResponse {
    pub gameweek: i32,
    pub timestamp: String,
    pub league: Vec<ManagerEntry>,
}

/// Client for the Fantasy Premier League entry API.
#[derive(Clone)]
pub struct FplClient {
    http: Client,
    base_url: String,
}

impl FplClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(FplClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch every configured manager concurrently and merge the results.
    /// A 404 for one manager becomes a placeholder row; any other failure
    /// fails the whole league.
    pub async fn league(&self, managers: &str) -> Result<LeagueResponse> {
        let ids = parse_manager_ids(managers);
        if ids.is_empty() {
            anyhow::bail!("no FPL manager ids configured");
        }

        let fetches: Vec<_> = ids.iter().map(|id| self.fetch_manager(id)).collect();
        let mut rows = Vec::with_capacity(ids.len());
        for result in futures_util::future::join_all(fetches).await {
            rows.push(result?);
        }

        let (gameweek, league) = merge_league(rows);
        Ok(LeagueResponse {
            gameweek,
            timestamp: Utc::now().format("%a %b %e %H:%M:%S %Z %Y").to_string(),
            league,
        })
    }

    async fn fetch_manager(&self, manager_id: &str) -> Result<(i32, ManagerEntry)> {
        let url = format!("{}/{}/", self.base_url, manager_id);
        debug!("Fetching FPL entry from {}", url);

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("FPL request for manager {} failed", manager_id))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok((-1, missing_manager_entry(manager_id)));
        }
        if !resp.status().is_success() {
            anyhow::bail!(
                "get manager ID {} not OK, Status: {}",
                manager_id,
                resp.status()
            );
        }

        let entry: FplEntry = resp
            .json()
            .await
            .with_context(|| format!("cannot parse FPL entry for manager {}", manager_id))?;

        Ok(entry_row(&entry, manager_id))
    }
}

/// Merge per-manager rows into the league table and its gameweek.
/// The gameweek is the first positive value seen: 404 placeholders carry −1
/// and pre-season entries carry 0, and neither must ever be selected.
fn merge_league(rows: Vec<(i32, ManagerEntry)>) -> (i32, Vec<ManagerEntry>) {
    let mut gameweek = 0;
    let mut league = Vec::with_capacity(rows.len());
    for (gw, entry) in rows {
        if gameweek == 0 && gw > 0 {
            gameweek = gw;
        }
        league.push(entry);
    }
    (gameweek, league)
}

fn parse_manager_ids(managers: &str) -> Vec<String> {
    managers
        .split(',')
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect()
}

fn missing_manager_entry(manager_id: &str) -> ManagerEntry {
    ManagerEntry {
        id: 0,
        name: format!("ID {} Not Found (404)", manager_id),
        team: String::new(),
        points: 0,
        rank: 0,
        gw_points: 0,
        gw_rank: 0,
        link: String::new(),
    }
}

/// Map a raw FPL entry onto a league row, paired with its gameweek.
fn entry_row(entry: &FplEntry, manager_id: &str) -> (i32, ManagerEntry) {
    let gw = entry.current_event.unwrap_or(0);
    let row = ManagerEntry {
        id: entry.id,
        name: format!("{} {}", entry.player_first_name, entry.player_last_name),
        team: entry.name.clone(),
        points: entry.summary_overall_points,
        rank: entry.summary_overall_rank.unwrap_or(0),
        gw_points: entry.summary_event_points,
        gw_rank: entry.summary_event_rank.unwrap_or(0),
        link: format!(
            "https://fantasy.premierleague.com/entry/{}/event/{}",
            manager_id, gw
        ),
    };
    (gw, row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> FplEntry {
        FplEntry {
            current_event: Some(99),
            id: 1,
            player_first_name: "first1".into(),
            player_last_name: "last1".into(),
            name: "team1".into(),
            summary_overall_points: 77,
            summary_overall_rank: Some(66),
            summary_event_points: 55,
            summary_event_rank: Some(44),
        }
    }

    #[test]
    fn test_entry_row_mapping() {
        let (gw, row) = entry_row(&entry(), "1");
        assert_eq!(gw, 99);
        assert_eq!(
            row,
            ManagerEntry {
                id: 1,
                name: "first1 last1".into(),
                team: "team1".into(),
                points: 77,
                rank: 66,
                gw_points: 55,
                gw_rank: 44,
                link: "https://fantasy.premierleague.com/entry/1/event/99".into(),
            }
        );
    }

    #[test]
    fn test_entry_row_preseason_nulls() {
        let mut raw = entry();
        raw.current_event = None;
        raw.summary_overall_rank = None;
        raw.summary_event_rank = None;
        let (gw, row) = entry_row(&raw, "1");
        assert_eq!(gw, 0);
        assert_eq!(row.rank, 0);
        assert_eq!(row.gw_rank, 0);
    }

    #[test]
    fn test_parse_manager_ids_trims_and_drops_empties() {
        assert_eq!(parse_manager_ids("1, 2 ,3"), vec!["1", "2", "3"]);
        assert_eq!(parse_manager_ids(" 7 "), vec!["7"]);
        assert!(parse_manager_ids("").is_empty());
        assert!(parse_manager_ids(" , ,").is_empty());
    }

    #[test]
    fn test_merge_league_takes_first_positive_gameweek() {
        let rows = vec![
            (-1, missing_manager_entry("1")),
            (0, missing_manager_entry("2")),
            (99, entry_row(&entry(), "3").1),
            (77, entry_row(&entry(), "4").1),
        ];
        let (gameweek, league) = merge_league(rows);
        assert_eq!(gameweek, 99);
        assert_eq!(league.len(), 4);
    }

    #[test]
    fn test_merge_league_no_positive_gameweek() {
        let rows = vec![
            (-1, missing_manager_entry("1")),
            (0, missing_manager_entry("2")),
        ];
        let (gameweek, league) = merge_league(rows);
        assert_eq!(gameweek, 0);
        assert_eq!(league.len(), 2);
    }

    #[test]
    fn test_merge_league_keeps_row_order() {
        let a = entry_row(&entry(), "1").1;
        let mut raw = entry();
        raw.id = 2;
        let b = entry_row(&raw, "2").1;
        let (_, league) = merge_league(vec![(99, a.clone()), (99, b.clone())]);
        assert_eq!(league, vec![a, b]);
    }

    #[test]
    fn test_missing_manager_entry_names_the_id() {
        let row = missing_manager_entry("42");
        assert_eq!(row.name, "ID 42 Not Found (404)");
        assert_eq!(row.id, 0);
        assert!(row.link.is_empty());
    }

    #[test]
    fn test_fpl_entry_deserializes_nulls() {
        let raw = serde_json::json!({
            "current_event": null,
            "id": 5,
            "player_first_name": "a",
            "player_last_name": "b",
            "name": "c",
            "summary_overall_points": 0,
            "summary_overall_rank": null,
            "summary_event_points": 0,
            "summary_event_rank": null
        });
        let entry: FplEntry = serde_json::from_value(raw).unwrap();
        assert_eq!(entry.current_event, None);
        assert_eq!(entry.id, 5);
    }
}
