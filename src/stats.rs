//! Derived statistics for charts, comparisons and summary cards.
//!
//! Everything here is a pure function over already-fetched entities.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::{BettingTip, HeadToHead, Player, Team};

/// Season length the per-match scoring average is projected over for charts.
pub const GOALS_CHART_MATCHES: f64 = 10.0;

pub const HIGH_CONFIDENCE: u32 = 70;
pub const MEDIUM_CONFIDENCE: u32 = 50;

pub fn win_rate_percent(team: &Team) -> f64 {
    team.win_rate * 100.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRecord {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub unknown: u32,
}

impl FormRecord {
    pub fn points(&self) -> u32 {
        self.wins * 3 + self.draws
    }

    pub fn played(&self) -> u32 {
        self.wins + self.draws + self.losses
    }
}

/// Tallies a `W`/`D`/`L` form string; any other character counts as unknown.
pub fn form_record(form: &str) -> FormRecord {
    let mut record = FormRecord::default();
    for result in form.chars() {
        match result.to_ascii_uppercase() {
            'W' => record.wins += 1,
            'D' => record.draws += 1,
            'L' => record.losses += 1,
            _ => record.unknown += 1,
        }
    }
    record
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

pub fn goals_per_team_chart(teams: &[Team]) -> Vec<ChartPoint> {
    teams
        .iter()
        .map(|team| ChartPoint {
            name: team.short_name.clone(),
            value: team.goals_scored_avg * GOALS_CHART_MATCHES,
        })
        .collect()
}

pub fn win_rate_chart(teams: &[Team]) -> Vec<ChartPoint> {
    teams
        .iter()
        .map(|team| ChartPoint {
            name: team.short_name.clone(),
            value: win_rate_percent(team),
        })
        .collect()
}

pub fn clean_sheets_chart(teams: &[Team]) -> Vec<ChartPoint> {
    teams
        .iter()
        .map(|team| ChartPoint {
            name: team.short_name.clone(),
            value: f64::from(team.clean_sheets),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerContribution {
    pub name: String,
    pub goals: u32,
    pub assists: u32,
}

pub fn player_contributions(players: &[Player]) -> Vec<PlayerContribution> {
    players
        .iter()
        .map(|player| PlayerContribution {
            name: player.name.clone(),
            goals: player.goals,
            assists: player.assists,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatEdge {
    Home,
    Away,
    Even,
}

pub fn compare_stat(home: f64, away: f64, lower_is_better: bool) -> StatEdge {
    let ordering = home.partial_cmp(&away).unwrap_or(Ordering::Equal);
    match (ordering, lower_is_better) {
        (Ordering::Equal, _) => StatEdge::Even,
        (Ordering::Greater, false) | (Ordering::Less, true) => StatEdge::Home,
        (Ordering::Less, false) | (Ordering::Greater, true) => StatEdge::Away,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatComparison {
    pub label: String,
    pub home: f64,
    pub away: f64,
    pub lower_is_better: bool,
    pub edge: StatEdge,
}

pub fn team_comparison(home: &Team, away: &Team) -> Vec<StatComparison> {
    let rows = [
        (
            "Win Rate",
            win_rate_percent(home),
            win_rate_percent(away),
            false,
        ),
        (
            "Goals Scored Avg",
            home.goals_scored_avg,
            away.goals_scored_avg,
            false,
        ),
        (
            "Goals Conceded Avg",
            home.goals_conceded_avg,
            away.goals_conceded_avg,
            true,
        ),
        (
            "Clean Sheets",
            f64::from(home.clean_sheets),
            f64::from(away.clean_sheets),
            false,
        ),
        (
            "Strength Index",
            f64::from(home.strength_index),
            f64::from(away.strength_index),
            false,
        ),
    ];

    rows.into_iter()
        .map(|(label, home, away, lower_is_better)| StatComparison {
            label: label.to_string(),
            home,
            away,
            lower_is_better,
            edge: compare_stat(home, away, lower_is_better),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

pub fn confidence_band(confidence: u32) -> ConfidenceBand {
    if confidence >= HIGH_CONFIDENCE {
        ConfidenceBand::High
    } else if confidence >= MEDIUM_CONFIDENCE {
        ConfidenceBand::Medium
    } else {
        ConfidenceBand::Low
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadToHeadSummary {
    pub meetings: u32,
    pub home_win_pct: f64,
    pub draw_pct: f64,
    pub away_win_pct: f64,
    /// Goals by the match's home side across the listed prior meetings.
    pub home_goals: u32,
    pub away_goals: u32,
}

/// Aggregates a head-to-head record. Listed meetings may have been played at
/// either venue, so goals are attributed by team name.
pub fn head_to_head_summary(h2h: &HeadToHead, home_team: &str) -> HeadToHeadSummary {
    let meetings = h2h.home_wins + h2h.draws + h2h.away_wins;
    let pct = |count: u32| {
        if meetings == 0 {
            0.0
        } else {
            f64::from(count) * 100.0 / f64::from(meetings)
        }
    };

    let mut home_goals = 0;
    let mut away_goals = 0;
    for meeting in &h2h.last_matches {
        if meeting.home_team == home_team {
            home_goals += meeting.home_score;
            away_goals += meeting.away_score;
        } else {
            home_goals += meeting.away_score;
            away_goals += meeting.home_score;
        }
    }

    HeadToHeadSummary {
        meetings,
        home_win_pct: pct(h2h.home_wins),
        draw_pct: pct(h2h.draws),
        away_win_pct: pct(h2h.away_wins),
        home_goals,
        away_goals,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipSummary {
    pub total: usize,
    pub average_odds: f64,
    pub average_confidence: f64,
    pub high_confidence: usize,
}

pub fn tip_summary(tips: &[BettingTip]) -> TipSummary {
    let divisor = tips.len().max(1) as f64;
    let odds_sum: f64 = tips.iter().map(|tip| tip.odds).sum();
    let confidence_sum: f64 = tips.iter().map(|tip| f64::from(tip.confidence)).sum();

    TipSummary {
        total: tips.len(),
        average_odds: odds_sum / divisor,
        average_confidence: confidence_sum / divisor,
        high_confidence: tips
            .iter()
            .filter(|tip| confidence_band(tip.confidence) == ConfidenceBand::High)
            .count(),
    }
}

/// Highest rated first; ties go to the better scorer, then the lower id.
pub fn top_players(players: &[Player], n: usize) -> Vec<Player> {
    let mut ranked = players.to_vec();
    ranked.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.goals.cmp(&a.goals))
            .then_with(|| a.id.cmp(&b.id))
    });
    ranked.truncate(n);
    ranked
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarPoint {
    pub axis: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarSeries {
    pub name: String,
    pub points: Vec<RadarPoint>,
}

pub const PLAYER_RADAR_AXES: [&str; 4] = ["Goals", "Assists", "Minutes", "Rating"];
pub const TEAM_RADAR_AXES: [&str; 5] = [
    "Win Rate",
    "Attack",
    "Defence",
    "Clean Sheets",
    "Strength",
];

/// Top `n` players on a 0-100 scale, each axis relative to the best of them.
pub fn player_radar(players: &[Player], n: usize) -> Vec<RadarSeries> {
    let selected = top_players(players, n);
    let raw: Vec<(String, Vec<f64>)> = selected
        .into_iter()
        .map(|player| {
            (
                player.name,
                vec![
                    f64::from(player.goals),
                    f64::from(player.assists),
                    f64::from(player.minutes_played),
                    player.rating,
                ],
            )
        })
        .collect();

    normalize_radar(raw, &PLAYER_RADAR_AXES)
}

/// Teams on a 0-100 scale. Defence is the inverse of goals conceded, so a
/// side that concedes nothing takes the full mark.
pub fn team_radar(teams: &[Team]) -> Vec<RadarSeries> {
    let raw: Vec<(String, Vec<f64>)> = teams
        .iter()
        .map(|team| {
            let defence = if team.goals_conceded_avg > 0.0 {
                1.0 / team.goals_conceded_avg
            } else {
                f64::INFINITY
            };
            (
                team.short_name.clone(),
                vec![
                    team.win_rate,
                    team.goals_scored_avg,
                    defence,
                    f64::from(team.clean_sheets),
                    f64::from(team.strength_index),
                ],
            )
        })
        .collect();

    normalize_radar(raw, &TEAM_RADAR_AXES)
}

fn normalize_radar(raw: Vec<(String, Vec<f64>)>, axes: &[&str]) -> Vec<RadarSeries> {
    let maxima: Vec<f64> = (0..axes.len())
        .map(|axis| {
            raw.iter()
                .map(|(_, values)| values[axis])
                .fold(0.0_f64, f64::max)
        })
        .collect();

    raw.into_iter()
        .map(|(name, values)| RadarSeries {
            name,
            points: axes
                .iter()
                .zip(values)
                .zip(&maxima)
                .map(|((axis, value), max)| RadarPoint {
                    axis: (*axis).to_string(),
                    value: scale_to_hundred(value, *max),
                })
                .collect(),
        })
        .collect()
}

fn scale_to_hundred(value: f64, max: f64) -> f64 {
    if max <= 0.0 {
        0.0
    } else if max.is_infinite() {
        if value.is_infinite() {
            100.0
        } else {
            0.0
        }
    } else {
        value / max * 100.0
    }
}
