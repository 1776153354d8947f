use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One known player from the upstream roster.
///
/// Ids are assigned upstream and never generated locally; `full_name` is the
/// sole matching key for search and autocomplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Upstream player id
    pub id: i64,

    /// Display name, e.g. "Stephen Curry"
    pub full_name: String,
}

impl PlayerRecord {
    pub fn new(id: i64, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
        }
    }
}

/// Biographical info for one player, shaped from the upstream player-info row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: i64,

    #[serde(default)]
    pub full_name: String,

    /// Upstream team id; 0 when the player has no current team
    #[serde(default)]
    pub team_id: i64,

    #[serde(default)]
    pub team_name: String,

    #[serde(default)]
    pub position: String,

    /// Height as reported upstream, e.g. "6-2"
    #[serde(default)]
    pub height: String,

    #[serde(default)]
    pub weight: String,

    /// Birthdate as reported upstream (YYYY-MM-DD, possibly with a time suffix)
    #[serde(default)]
    pub birthdate: String,

    /// Age computed from `birthdate`; None when the date is absent or malformed
    #[serde(default)]
    pub age: Option<i32>,

    /// Team logo URL (CDN for active teams, local fallback otherwise)
    #[serde(default)]
    pub team_logo_url: String,

    /// Timestamp when this profile was fetched
    #[serde(default = "Utc::now")]
    pub fetched_at: DateTime<Utc>,
}

impl PlayerProfile {
    /// Create a profile with required fields; the rest default to empty
    pub fn new(id: i64, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            team_id: 0,
            team_name: String::new(),
            position: String::new(),
            height: String::new(),
            weight: String::new(),
            birthdate: String::new(),
            age: None,
            team_logo_url: team_logo_url(0),
            fetched_at: Utc::now(),
        }
    }

    /// Display name with position (for logging/UI)
    pub fn display_name(&self) -> String {
        if self.position.is_empty() {
            self.full_name.clone()
        } else {
            format!("{} ({})", self.full_name, self.position)
        }
    }
}

/// Compute a player's age in whole years as of today.
///
/// Accepts `YYYY-MM-DD`, tolerating an upstream `T00:00:00` time suffix.
/// Returns None for absent or malformed dates.
pub fn compute_age(birthdate: &str) -> Option<i32> {
    age_on(birthdate, Utc::now().date_naive())
}

/// Age as of a given date; split out so tests don't depend on the clock
pub fn age_on(birthdate: &str, today: NaiveDate) -> Option<i32> {
    let date_part = birthdate.split('T').next()?.trim();
    let bdate = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;

    let had_birthday = (today.month(), today.day()) >= (bdate.month(), bdate.day());
    Some(today.year() - bdate.year() - i32::from(!had_birthday))
}

/// Team logo URL for a team id; 0 (retired / no current team) falls back to
/// the bundled placeholder image.
pub fn team_logo_url(team_id: i64) -> String {
    if team_id > 0 {
        format!("https://cdn.nba.com/logos/nba/{}/primary/L/logo.svg", team_id)
    } else {
        "/static/images/fallback-team.png".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_player_record_creation() {
        let player = PlayerRecord::new(201939, "Stephen Curry");
        assert_eq!(player.id, 201939);
        assert_eq!(player.full_name, "Stephen Curry");
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        // Birthday not yet reached this year
        assert_eq!(age_on("1988-03-14", date(2026, 3, 13)), Some(37));
        // Birthday reached
        assert_eq!(age_on("1988-03-14", date(2026, 3, 14)), Some(38));
        assert_eq!(age_on("1988-03-14", date(2026, 11, 1)), Some(38));
    }

    #[test]
    fn test_age_tolerates_time_suffix() {
        assert_eq!(age_on("1988-03-14T00:00:00", date(2026, 6, 1)), Some(38));
    }

    #[test]
    fn test_age_malformed_birthdate() {
        assert_eq!(age_on("", date(2026, 1, 1)), None);
        assert_eq!(age_on("March 14, 1988", date(2026, 1, 1)), None);
        assert_eq!(age_on("1988/03/14", date(2026, 1, 1)), None);
    }

    #[test]
    fn test_team_logo_url() {
        assert_eq!(
            team_logo_url(1610612744),
            "https://cdn.nba.com/logos/nba/1610612744/primary/L/logo.svg"
        );
        assert_eq!(team_logo_url(0), "/static/images/fallback-team.png");
    }

    #[test]
    fn test_profile_display_name() {
        let mut profile = PlayerProfile::new(2544, "LeBron James");
        assert_eq!(profile.display_name(), "LeBron James");

        profile.position = "Forward".to_string();
        assert_eq!(profile.display_name(), "LeBron James (Forward)");
    }
}
