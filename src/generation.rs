//! One-shot match generation and betting-tip derivation.
//!
//! Matches are generated from the team table once, when the store is built.
//! Randomness comes from the caller so seeded runs are reproducible.

use rand::Rng;

use crate::model::{
    BettingTip, Competition, HeadToHead, Match, PastMeeting, Team, AWAY_WIN, HOME_WIN,
    RECOMMENDED_BETS,
};

pub const MATCHES_PER_COMPETITION: usize = 3;
pub const FIXTURE_DATE: &str = "2023-11-15";
const FIRST_KICKOFF_HOUR: usize = 18;

const HOME_ODDS_BASE: f64 = 1.85;
const DRAW_ODDS_BASE: f64 = 3.60;
const AWAY_ODDS_BASE: f64 = 4.20;
const ODDS_JITTER: f64 = 0.5;

const CONFIDENCE_BASE: u32 = 60;
const CONFIDENCE_SPREAD: u32 = 20;

const LAST_MEETING_DATE: &str = "2023-04-26";
const PREVIOUS_MEETING_DATE: &str = "2022-12-30";

/// Largest competition id whose synthesized match ids still fit in a `u32`.
pub const MAX_COMPETITION_ID: u32 = (u32::MAX - 100 - MATCHES_PER_COMPETITION as u32) / 10;

/// Synthesized match id, unique across competitions for indices below 10.
/// Callers keep `competition_id` at or below [`MAX_COMPETITION_ID`].
pub fn match_id(competition_id: u32, index: usize) -> u32 {
    100 + competition_id * 10 + index as u32
}

pub fn generate_matches<R: Rng>(
    competitions: &[Competition],
    teams: &[Team],
    rng: &mut R,
) -> Vec<Match> {
    competitions
        .iter()
        .flat_map(|competition| generate_competition_matches(competition, teams, rng))
        .collect()
}

/// Pairs consecutive teams of one competition, wrapping around, for at most
/// three fixtures. Fewer than two teams yields nothing.
pub fn generate_competition_matches<R: Rng>(
    competition: &Competition,
    teams: &[Team],
    rng: &mut R,
) -> Vec<Match> {
    let members: Vec<&Team> = teams
        .iter()
        .filter(|team| team.competition_id == competition.id)
        .collect();

    if members.len() < 2 {
        return Vec::new();
    }

    let count = MATCHES_PER_COMPETITION.min(members.len() - 1);
    (0..count)
        .map(|i| {
            let home = members[i];
            let away = members[(i + 1) % members.len()];
            build_match(competition, i, home, away, rng)
        })
        .collect()
}

fn build_match<R: Rng>(
    competition: &Competition,
    index: usize,
    home: &Team,
    away: &Team,
    rng: &mut R,
) -> Match {
    let recommended_bet = RECOMMENDED_BETS[rng.gen_range(0..RECOMMENDED_BETS.len())];

    Match {
        id: match_id(competition.id, index),
        home_team: home.clone(),
        away_team: away.clone(),
        competition: competition.name.clone(),
        competition_id: competition.id,
        date: FIXTURE_DATE.to_string(),
        time: format!("{}:00", FIRST_KICKOFF_HOUR + index),
        home_odds: HOME_ODDS_BASE + rng.gen_range(0.0..ODDS_JITTER),
        draw_odds: DRAW_ODDS_BASE + rng.gen_range(0.0..ODDS_JITTER),
        away_odds: AWAY_ODDS_BASE + rng.gen_range(0.0..ODDS_JITTER),
        prediction_confidence: CONFIDENCE_BASE + rng.gen_range(0..CONFIDENCE_SPREAD),
        recommended_bet: recommended_bet.to_string(),
        key_stats: key_stats(home, away, rng),
        h2h: head_to_head(home, away, rng),
    }
}

fn key_stats<R: Rng>(home: &Team, away: &Team, rng: &mut R) -> Vec<String> {
    vec![
        format!(
            "{} won {} of their last 10 home matches",
            home.name,
            rng.gen_range(0..10)
        ),
        format!(
            "{} lost {} of their last 5 away matches",
            away.name,
            rng.gen_range(0..5)
        ),
        format!(
            "{} scored at least 2 goals in {} of their last 10 matches",
            home.name,
            rng.gen_range(0..10)
        ),
    ]
}

fn head_to_head<R: Rng>(home: &Team, away: &Team, rng: &mut R) -> HeadToHead {
    HeadToHead {
        home_wins: rng.gen_range(0..7),
        draws: rng.gen_range(0..3),
        away_wins: rng.gen_range(0..4),
        last_matches: vec![
            PastMeeting {
                date: LAST_MEETING_DATE.to_string(),
                home_team: home.name.clone(),
                away_team: away.name.clone(),
                home_score: rng.gen_range(0..4),
                away_score: rng.gen_range(0..3),
            },
            PastMeeting {
                date: PREVIOUS_MEETING_DATE.to_string(),
                home_team: away.name.clone(),
                away_team: home.name.clone(),
                home_score: rng.gen_range(0..3),
                away_score: rng.gen_range(0..3),
            },
        ],
    }
}

/// Odds a tip quotes for its label. Only the two exact win labels select
/// their side; every other label, compound ones included, quotes the draw.
pub fn select_tip_odds(recommended_bet: &str, fixture: &Match) -> f64 {
    match recommended_bet {
        HOME_WIN => fixture.home_odds,
        AWAY_WIN => fixture.away_odds,
        _ => fixture.draw_odds,
    }
}

pub fn derive_betting_tip(fixture: &Match) -> BettingTip {
    BettingTip {
        match_id: fixture.id,
        home_team: fixture.home_team.name.clone(),
        home_team_logo: fixture.home_team.logo.clone(),
        away_team: fixture.away_team.name.clone(),
        away_team_logo: fixture.away_team.logo.clone(),
        tip: fixture.recommended_bet.clone(),
        confidence: fixture.prediction_confidence,
        odds: select_tip_odds(&fixture.recommended_bet, fixture),
        reason: format!(
            "Based on {}'s form and {}'s recent performances",
            fixture.home_team.name, fixture.away_team.name
        ),
        date: fixture.date.clone(),
        time: fixture.time.clone(),
        competition_id: fixture.competition_id,
    }
}

pub fn derive_betting_tips(matches: &[Match]) -> Vec<BettingTip> {
    matches.iter().map(derive_betting_tip).collect()
}
