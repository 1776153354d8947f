use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Utc};
use reqwest::header::{HeaderMap, HeaderValue, REFERER, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::core::player::{compute_age, team_logo_url};
use crate::core::{GameLine, PlayerProfile, PlayerRecord, SeasonLine};
use crate::error::{LookupError, Result};
use crate::providers::StatsProvider;

const BASE_URL: &str = "https://stats.nba.com/stats";

/// stats.nba.com provider.
///
/// Every endpoint answers with the same tabular envelope: a list of
/// `resultSets`, each carrying `headers` (column names) and `rowSet`
/// (heterogeneous JSON rows). Rows are decoded positionally by header name.
pub struct NbaStatsProvider {
    client: Client,
}

#[derive(Debug, Deserialize)]
struct StatsEnvelope {
    #[serde(rename = "resultSets", default)]
    result_sets: Vec<ResultSet>,
}

#[derive(Debug, Deserialize)]
struct ResultSet {
    #[serde(default)]
    name: String,
    headers: Vec<String>,
    #[serde(rename = "rowSet")]
    row_set: Vec<Vec<Value>>,
}

impl ResultSet {
    fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }
}

fn str_cell(row: &[Value], idx: Option<usize>) -> String {
    match idx.and_then(|i| row.get(i)) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn i64_cell(row: &[Value], idx: Option<usize>) -> i64 {
    idx.and_then(|i| row.get(i))
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
        .unwrap_or(0)
}

fn f64_cell(row: &[Value], idx: Option<usize>) -> f64 {
    idx.and_then(|i| row.get(i))
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

/// Season label the stats API expects for a given date, e.g. "2025-26".
/// Seasons roll over in October.
fn season_for(date: NaiveDate) -> String {
    let start_year = if date.month() >= 10 {
        date.year()
    } else {
        date.year() - 1
    };
    format!("{}-{:02}", start_year, (start_year + 1) % 100)
}

impl NbaStatsProvider {
    /// Create a new provider with the browser-like headers the stats API
    /// requires
    pub fn new() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36",
            ),
        );
        headers.insert(REFERER, HeaderValue::from_static("https://www.nba.com/"));

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    async fn fetch(&self, endpoint: &str, params: &[(&str, String)]) -> Result<StatsEnvelope> {
        let url = format!("{}/{}", BASE_URL, endpoint);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| LookupError::Provider {
                provider: "nba_stats".to_string(),
                message: format!("Request to {} failed: {}", endpoint, e),
            })?;

        if !response.status().is_success() {
            return Err(LookupError::Provider {
                provider: "nba_stats".to_string(),
                message: format!("{}: HTTP {}", endpoint, response.status()),
            });
        }

        response.json().await.map_err(|e| LookupError::Provider {
            provider: "nba_stats".to_string(),
            message: format!("{}: invalid JSON: {}", endpoint, e),
        })
    }

    /// Pick a result set by name, falling back to the first one (older API
    /// revisions omit names)
    fn result_set<'a>(envelope: &'a StatsEnvelope, name: &str) -> Result<&'a ResultSet> {
        envelope
            .result_sets
            .iter()
            .find(|rs| rs.name == name)
            .or_else(|| envelope.result_sets.first())
            .ok_or_else(|| LookupError::Provider {
                provider: "nba_stats".to_string(),
                message: format!("Result set '{}' missing from response", name),
            })
    }
}

impl Default for NbaStatsProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatsProvider for NbaStatsProvider {
    async fn all_players(&self) -> Result<Vec<PlayerRecord>> {
        let season = season_for(Utc::now().date_naive());
        let envelope = self
            .fetch(
                "commonallplayers",
                &[
                    ("IsOnlyCurrentSeason", "0".to_string()),
                    ("LeagueID", "00".to_string()),
                    ("Season", season),
                ],
            )
            .await?;

        let table = Self::result_set(&envelope, "CommonAllPlayers")?;
        let id_col = table.column("PERSON_ID");
        let name_col = table.column("DISPLAY_FIRST_LAST");

        let players = table
            .row_set
            .iter()
            .map(|row| PlayerRecord::new(i64_cell(row, id_col), str_cell(row, name_col)))
            .filter(|p| p.id != 0 && !p.full_name.is_empty())
            .collect();

        Ok(players)
    }

    async fn player_info(&self, player_id: i64) -> Result<PlayerProfile> {
        let envelope = self
            .fetch(
                "commonplayerinfo",
                &[("PlayerID", player_id.to_string())],
            )
            .await?;

        let table = Self::result_set(&envelope, "CommonPlayerInfo")?;
        let row = table.row_set.first().ok_or_else(|| LookupError::Provider {
            provider: "nba_stats".to_string(),
            message: format!("No info row for player {}", player_id),
        })?;

        let mut profile = PlayerProfile::new(
            player_id,
            str_cell(row, table.column("DISPLAY_FIRST_LAST")),
        );
        profile.team_id = i64_cell(row, table.column("TEAM_ID"));
        profile.team_name = str_cell(row, table.column("TEAM_NAME"));
        profile.position = str_cell(row, table.column("POSITION"));
        profile.height = str_cell(row, table.column("HEIGHT"));
        profile.weight = str_cell(row, table.column("WEIGHT"));
        profile.birthdate = str_cell(row, table.column("BIRTHDATE"));
        profile.age = compute_age(&profile.birthdate);
        profile.team_logo_url = team_logo_url(profile.team_id);

        Ok(profile)
    }

    async fn career_stats(&self, player_id: i64) -> Result<Vec<SeasonLine>> {
        let envelope = self
            .fetch(
                "playercareerstats",
                &[
                    ("PlayerID", player_id.to_string()),
                    ("PerMode", "PerGame".to_string()),
                ],
            )
            .await?;

        let table = Self::result_set(&envelope, "SeasonTotalsRegularSeason")?;
        let season_col = table.column("SEASON_ID");
        let pts_col = table.column("PTS");
        let reb_col = table.column("REB");
        let ast_col = table.column("AST");
        let stl_col = table.column("STL");
        let blk_col = table.column("BLK");
        let fg_col = table.column("FG_PCT");

        let seasons = table
            .row_set
            .iter()
            .map(|row| SeasonLine {
                season_id: str_cell(row, season_col),
                points: f64_cell(row, pts_col),
                rebounds: f64_cell(row, reb_col),
                assists: f64_cell(row, ast_col),
                steals: f64_cell(row, stl_col),
                blocks: f64_cell(row, blk_col),
                fg_pct: SeasonLine::display_fg_pct(f64_cell(row, fg_col)),
            })
            // Drop the upstream aggregate row so charts stay per-season
            .filter(|line| line.season_id != "Career")
            .collect();

        Ok(seasons)
    }

    async fn recent_games(&self, player_id: i64, count: usize) -> Result<Vec<GameLine>> {
        let season = season_for(Utc::now().date_naive());
        let envelope = self
            .fetch(
                "playergamelog",
                &[
                    ("PlayerID", player_id.to_string()),
                    ("Season", season),
                    ("SeasonType", "Regular Season".to_string()),
                ],
            )
            .await?;

        let table = Self::result_set(&envelope, "PlayerGameLog")?;
        let date_col = table.column("GAME_DATE");
        let matchup_col = table.column("MATCHUP");
        let pts_col = table.column("PTS");
        let reb_col = table.column("REB");
        let ast_col = table.column("AST");

        // Game log rows arrive newest first; keep that order
        let games = table
            .row_set
            .iter()
            .take(count)
            .map(|row| GameLine {
                game_date: str_cell(row, date_col),
                matchup: str_cell(row, matchup_col),
                points: i64_cell(row, pts_col),
                rebounds: i64_cell(row, reb_col),
                assists: i64_cell(row, ast_col),
            })
            .collect();

        Ok(games)
    }

    fn name(&self) -> &str {
        "nba_stats"
    }
}
