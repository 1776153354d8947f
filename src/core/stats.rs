use serde::{Deserialize, Serialize};

/// One regular-season row of per-game averages, as charted on the player page.
///
/// The upstream aggregate "Career" row is dropped before these are built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonLine {
    /// Season label, e.g. "2023-24"
    pub season_id: String,

    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub steals: f64,
    pub blocks: f64,

    /// Field-goal percentage scaled to 0-100 for display
    pub fg_pct: f64,
}

/// One game from a player's recent game log, used for side-by-side comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLine {
    /// Game date as reported upstream, e.g. "JAN 15, 2026"
    pub game_date: String,

    /// Matchup string, e.g. "GSW vs. LAL"
    pub matchup: String,

    pub points: i64,
    pub rebounds: i64,
    pub assists: i64,
}

impl SeasonLine {
    /// Scale an upstream decimal percentage (0.512) to display form (51.2)
    pub fn display_fg_pct(raw: f64) -> f64 {
        raw * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fg_pct_scaling() {
        assert_eq!(SeasonLine::display_fg_pct(0.512), 51.2);
        assert_eq!(SeasonLine::display_fg_pct(0.0), 0.0);
    }

    #[test]
    fn test_season_line_serialization() {
        let line = SeasonLine {
            season_id: "2023-24".to_string(),
            points: 26.4,
            rebounds: 4.5,
            assists: 5.1,
            steals: 0.7,
            blocks: 0.4,
            fg_pct: 45.0,
        };

        let json = serde_json::to_string(&line).unwrap();
        let back: SeasonLine = serde_json::from_str(&json).unwrap();
        assert_eq!(line, back);
    }
}
