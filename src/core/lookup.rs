use serde::{Deserialize, Serialize};

use crate::core::{GameLine, PlayerProfile, PlayerRecord, SeasonLine};

/// Everything the player page renders: biographical info plus the per-season
/// chart series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerPage {
    pub profile: PlayerProfile,

    /// One entry per regular season, oldest first
    pub seasons: Vec<SeasonLine>,

    /// Lookup latency in milliseconds
    pub latency_ms: f64,
}

/// One side of a two-player comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparedPlayer {
    pub player: PlayerRecord,

    /// Most recent games, newest first
    pub games: Vec<GameLine>,
}

/// Side-by-side recent-game comparison of two players
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    pub first: ComparedPlayer,
    pub second: ComparedPlayer,
    pub latency_ms: f64,
}

impl PlayerPage {
    /// Chart labels (season ids) in display order
    pub fn chart_labels(&self) -> Vec<&str> {
        self.seasons.iter().map(|s| s.season_id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_labels() {
        let page = PlayerPage {
            profile: PlayerProfile::new(1, "Test Player"),
            seasons: vec![
                SeasonLine {
                    season_id: "2022-23".to_string(),
                    points: 10.0,
                    rebounds: 2.0,
                    assists: 3.0,
                    steals: 1.0,
                    blocks: 0.5,
                    fg_pct: 44.0,
                },
                SeasonLine {
                    season_id: "2023-24".to_string(),
                    points: 12.0,
                    rebounds: 2.5,
                    assists: 3.5,
                    steals: 1.1,
                    blocks: 0.6,
                    fg_pct: 46.0,
                },
            ],
            latency_ms: 1.0,
        };

        assert_eq!(page.chart_labels(), vec!["2022-23", "2023-24"]);
    }
}
