//! Immutable reference store built once at start-up.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use thiserror::Error;
use tracing::info;

use crate::generation::{derive_betting_tips, generate_matches, MAX_COMPETITION_ID};
use crate::model::{BettingTip, Competition, Match, Player, Team};
use crate::seed::{seed_competitions, seed_players, seed_teams};

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("duplicate competition id: {0}")]
    DuplicateCompetition(u32),
    #[error("competition id {0} is above the maximum of {}", MAX_COMPETITION_ID)]
    CompetitionIdOutOfRange(u32),
    #[error("duplicate team id: {0}")]
    DuplicateTeam(u32),
    #[error("duplicate player id: {0}")]
    DuplicatePlayer(u32),
    #[error("team {team_id} references unknown competition {competition_id}")]
    UnknownCompetition { team_id: u32, competition_id: u32 },
    #[error("team {team_id} has win rate {win_rate} outside [0, 1]")]
    WinRateOutOfRange { team_id: u32, win_rate: f64 },
    #[error("team {team_id} has strength index {strength_index} above 100")]
    StrengthOutOfRange { team_id: u32, strength_index: u32 },
    #[error("player {player_id} references unknown team {team_id}")]
    UnknownTeam { player_id: u32, team_id: u32 },
    #[error("player {player_id} has rating {rating} outside [0, 10]")]
    RatingOutOfRange { player_id: u32, rating: f64 },
    #[error(
        "player {player_id} is listed in competition {competition_id} but team {team_id} plays in {team_competition_id}"
    )]
    CompetitionMismatch {
        player_id: u32,
        team_id: u32,
        competition_id: u32,
        team_competition_id: u32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SportsDataStore {
    competitions: Vec<Competition>,
    teams: Vec<Team>,
    players: Vec<Player>,
    matches: Vec<Match>,
    tips: Vec<BettingTip>,
}

impl SportsDataStore {
    pub fn build<R: Rng>(
        competitions: Vec<Competition>,
        teams: Vec<Team>,
        players: Vec<Player>,
        rng: &mut R,
    ) -> Result<Self, StoreError> {
        validate(&competitions, &teams, &players)?;

        let matches = generate_matches(&competitions, &teams, rng);
        let tips = derive_betting_tips(&matches);

        info!(
            component = "sports_data",
            event = "store.build",
            competitions = competitions.len(),
            teams = teams.len(),
            players = players.len(),
            matches = matches.len(),
            tips = tips.len()
        );

        Ok(Self {
            competitions,
            teams,
            players,
            matches,
            tips,
        })
    }

    /// Store over the built-in reference tables.
    pub fn seeded<R: Rng>(rng: &mut R) -> Result<Self, StoreError> {
        Self::build(seed_competitions(), seed_teams(), seed_players(), rng)
    }

    pub fn competitions(&self) -> &[Competition] {
        &self.competitions
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn tips(&self) -> &[BettingTip] {
        &self.tips
    }

    pub fn competition(&self, id: u32) -> Option<&Competition> {
        self.competitions
            .iter()
            .find(|competition| competition.id == id)
    }

    pub fn team(&self, id: u32) -> Option<&Team> {
        self.teams.iter().find(|team| team.id == id)
    }

    pub fn fixture(&self, id: u32) -> Option<&Match> {
        self.matches.iter().find(|fixture| fixture.id == id)
    }
}

/// Keeps entries whose competition matches the filter; `None` keeps all.
pub fn filter_by_competition<T: Clone>(
    items: &[T],
    competition_id: Option<u32>,
    competition_of: impl Fn(&T) -> u32,
) -> Vec<T> {
    match competition_id {
        Some(id) => items
            .iter()
            .filter(|item| competition_of(*item) == id)
            .cloned()
            .collect(),
        None => items.to_vec(),
    }
}

fn validate(
    competitions: &[Competition],
    teams: &[Team],
    players: &[Player],
) -> Result<(), StoreError> {
    let mut competition_ids = HashSet::with_capacity(competitions.len());
    for competition in competitions {
        if !competition_ids.insert(competition.id) {
            return Err(StoreError::DuplicateCompetition(competition.id));
        }
        if competition.id > MAX_COMPETITION_ID {
            return Err(StoreError::CompetitionIdOutOfRange(competition.id));
        }
    }

    let mut team_competitions: HashMap<u32, u32> = HashMap::with_capacity(teams.len());
    for team in teams {
        if team_competitions
            .insert(team.id, team.competition_id)
            .is_some()
        {
            return Err(StoreError::DuplicateTeam(team.id));
        }
        if !competition_ids.contains(&team.competition_id) {
            return Err(StoreError::UnknownCompetition {
                team_id: team.id,
                competition_id: team.competition_id,
            });
        }
        if !(0.0..=1.0).contains(&team.win_rate) {
            return Err(StoreError::WinRateOutOfRange {
                team_id: team.id,
                win_rate: team.win_rate,
            });
        }
        if team.strength_index > 100 {
            return Err(StoreError::StrengthOutOfRange {
                team_id: team.id,
                strength_index: team.strength_index,
            });
        }
    }

    let mut player_ids = HashSet::with_capacity(players.len());
    for player in players {
        if !player_ids.insert(player.id) {
            return Err(StoreError::DuplicatePlayer(player.id));
        }
        let Some(&team_competition_id) = team_competitions.get(&player.team_id) else {
            return Err(StoreError::UnknownTeam {
                player_id: player.id,
                team_id: player.team_id,
            });
        };
        if !(0.0..=10.0).contains(&player.rating) {
            return Err(StoreError::RatingOutOfRange {
                player_id: player.id,
                rating: player.rating,
            });
        }
        if player.competition_id != team_competition_id {
            return Err(StoreError::CompetitionMismatch {
                player_id: player.id,
                team_id: player.team_id,
                competition_id: player.competition_id,
                team_competition_id,
            });
        }
    }

    Ok(())
}
