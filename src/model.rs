//! Football entities served by the data provider.
//!
//! Every entity is built once when the store is constructed and is never
//! mutated afterwards. Matches embed full team snapshots rather than ids.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const HOME_WIN: &str = "Home Win";
pub const AWAY_WIN: &str = "Away Win";
pub const DRAW: &str = "Draw";
pub const OVER_2_5_GOALS: &str = "Over 2.5 Goals";

/// Labels the match generator picks a recommended bet from.
pub const RECOMMENDED_BETS: [&str; 4] = [HOME_WIN, AWAY_WIN, DRAW, OVER_2_5_GOALS];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competition {
    pub id: u32,
    pub name: String,
    pub country: String,
    pub flag: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
    pub short_name: String,
    pub logo: String,
    /// Last five results, most recent last, e.g. `WWDWL`.
    pub form: String,
    pub win_rate: f64,
    pub goals_scored_avg: f64,
    pub goals_conceded_avg: f64,
    pub clean_sheets: u32,
    pub strength_index: u32,
    pub competition_id: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormTrend {
    Rising,
    Falling,
    Steady,
}

impl FormTrend {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Rising => "↑",
            Self::Falling => "↓",
            Self::Steady => "→",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub position: String,
    pub team_id: u32,
    pub goals: u32,
    pub assists: u32,
    pub minutes_played: u32,
    pub rating: f64,
    pub form: FormTrend,
    pub form_reason: String,
    pub image: String,
    pub competition_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PastMeeting {
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
}

/// Historical record counted from the perspective of the match's home side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadToHead {
    pub home_wins: u32,
    pub draws: u32,
    pub away_wins: u32,
    pub last_matches: Vec<PastMeeting>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: u32,
    pub home_team: Team,
    pub away_team: Team,
    pub competition: String,
    pub competition_id: u32,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub home_odds: f64,
    pub draw_odds: f64,
    pub away_odds: f64,
    pub prediction_confidence: u32,
    pub recommended_bet: String,
    pub key_stats: Vec<String>,
    pub h2h: HeadToHead,
}

impl Match {
    pub fn kickoff(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&format!("{} {}", self.date, self.time), "%Y-%m-%d %H:%M")
            .ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BettingTip {
    pub match_id: u32,
    pub home_team: String,
    pub home_team_logo: String,
    pub away_team: String,
    pub away_team_logo: String,
    pub tip: String,
    pub confidence: u32,
    pub odds: f64,
    pub reason: String,
    pub date: String,
    pub time: String,
    pub competition_id: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn fixture(date: &str, time: &str) -> Match {
        let team = crate::seed::seed_teams().remove(0);
        Match {
            id: 1,
            home_team: team.clone(),
            away_team: team,
            competition: "Premier League".to_string(),
            competition_id: 1,
            date: date.to_string(),
            time: time.to_string(),
            home_odds: 2.0,
            draw_odds: 3.5,
            away_odds: 4.0,
            prediction_confidence: 70,
            recommended_bet: HOME_WIN.to_string(),
            key_stats: Vec::new(),
            h2h: HeadToHead {
                home_wins: 0,
                draws: 0,
                away_wins: 0,
                last_matches: Vec::new(),
            },
        }
    }

    #[test]
    fn kickoff_combines_date_and_time() {
        let kickoff = fixture("2023-11-15", "19:00").kickoff().unwrap();
        assert_eq!(
            kickoff.date(),
            NaiveDate::from_ymd_opt(2023, 11, 15).unwrap()
        );
        assert_eq!(kickoff.hour(), 19);
    }

    #[test]
    fn malformed_kickoff_is_none() {
        assert!(fixture("15/11/2023", "19:00").kickoff().is_none());
        assert!(fixture("2023-11-15", "late").kickoff().is_none());
    }

    #[test]
    fn form_trend_serializes_snake_case_and_has_arrow_symbols() {
        assert_eq!(
            serde_json::to_string(&FormTrend::Rising).unwrap(),
            "\"rising\""
        );
        assert_eq!(FormTrend::Falling.symbol(), "↓");
        assert_eq!(FormTrend::Steady.symbol(), "→");
    }
}
