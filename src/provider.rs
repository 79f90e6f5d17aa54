//! Asynchronous sports-data access and the in-memory mock behind it.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tokio::time::sleep;
use tracing::debug;

use crate::model::{BettingTip, Competition, Match, Player, Team};
use crate::store::{filter_by_competition, SportsDataStore, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("sports data transport error: {0}")]
    Transport(String),
    #[error("sports data parse error: {0}")]
    Parse(String),
}

/// Read-only football data, optionally narrowed to one competition.
///
/// Identity lookups resolve to `Ok(None)` when nothing matches. An unknown
/// competition filter yields an empty list.
#[async_trait]
pub trait SportsDataProvider: Send + Sync + 'static {
    async fn list_competitions(&self) -> Result<Vec<Competition>, ProviderError>;

    async fn list_teams(&self, competition_id: Option<u32>) -> Result<Vec<Team>, ProviderError>;

    async fn get_team(&self, team_id: u32) -> Result<Option<Team>, ProviderError>;

    async fn list_players(&self, competition_id: Option<u32>)
        -> Result<Vec<Player>, ProviderError>;

    async fn list_players_by_team(&self, team_id: u32) -> Result<Vec<Player>, ProviderError>;

    async fn list_upcoming_matches(
        &self,
        competition_id: Option<u32>,
    ) -> Result<Vec<Match>, ProviderError>;

    async fn get_match(&self, match_id: u32) -> Result<Option<Match>, ProviderError>;

    async fn list_betting_tips(
        &self,
        competition_id: Option<u32>,
    ) -> Result<Vec<BettingTip>, ProviderError>;
}

/// Simulated round-trip cost per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub competitions: Duration,
    pub teams: Duration,
    pub team: Duration,
    pub players: Duration,
    pub players_by_team: Duration,
    pub matches: Duration,
    pub fixture: Duration,
    pub tips: Duration,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            competitions: Duration::from_millis(200),
            teams: Duration::from_millis(500),
            team: Duration::from_millis(300),
            players: Duration::from_millis(500),
            players_by_team: Duration::from_millis(300),
            matches: Duration::from_millis(700),
            fixture: Duration::from_millis(400),
            tips: Duration::from_millis(600),
        }
    }
}

impl LatencyProfile {
    /// Multiplies every delay, rounded to whole milliseconds and never below one.
    pub fn scaled(&self, factor: f64) -> Self {
        let scale = |delay: Duration| {
            let millis = (delay.as_millis() as f64 * factor.max(0.0)).round() as u64;
            Duration::from_millis(millis).max(MIN_DELAY)
        };

        Self {
            competitions: scale(self.competitions),
            teams: scale(self.teams),
            team: scale(self.team),
            players: scale(self.players),
            players_by_team: scale(self.players_by_team),
            matches: scale(self.matches),
            fixture: scale(self.fixture),
            tips: scale(self.tips),
        }
    }

    pub fn slowest(&self) -> Duration {
        [
            self.competitions,
            self.teams,
            self.team,
            self.players,
            self.players_by_team,
            self.matches,
            self.fixture,
            self.tips,
        ]
        .into_iter()
        .max()
        .unwrap_or(MIN_DELAY)
    }
}

const MIN_DELAY: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProviderConfig {
    pub latency: LatencyProfile,
    pub seed: Option<u64>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid MATCHDAY_SEED value: {0}")]
    InvalidSeed(String),
    #[error("invalid MATCHDAY_LATENCY_SCALE value: {0}")]
    InvalidLatencyScale(String),
}

pub fn parse_seed(raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidSeed(raw.to_string()))
}

pub fn parse_latency_scale(raw: &str) -> Result<f64, ConfigError> {
    match raw.trim().parse::<f64>() {
        Ok(scale) if scale.is_finite() && scale >= 0.0 => Ok(scale),
        _ => Err(ConfigError::InvalidLatencyScale(raw.to_string())),
    }
}

/// Reads `MATCHDAY_SEED` and `MATCHDAY_LATENCY_SCALE`; malformed values keep
/// the defaults.
pub fn provider_config_from_env() -> ProviderConfig {
    let mut config = ProviderConfig::default();

    if let Ok(raw) = env::var("MATCHDAY_SEED") {
        if let Ok(seed) = parse_seed(&raw) {
            config.seed = Some(seed);
        }
    }

    if let Ok(raw) = env::var("MATCHDAY_LATENCY_SCALE") {
        if let Ok(scale) = parse_latency_scale(&raw) {
            config.latency = config.latency.scaled(scale);
        }
    }

    config
}

#[derive(Clone)]
pub struct MockSportsDataProvider {
    store: Arc<SportsDataStore>,
    latency: LatencyProfile,
}

impl MockSportsDataProvider {
    pub fn new(store: Arc<SportsDataStore>, latency: LatencyProfile) -> Self {
        Self { store, latency }
    }

    /// Builds the seeded store, reproducibly when the config carries a seed.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, StoreError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let store = SportsDataStore::seeded(&mut rng)?;
        Ok(Self::new(Arc::new(store), config.latency))
    }

    pub fn store(&self) -> &Arc<SportsDataStore> {
        &self.store
    }

    pub fn latency(&self) -> LatencyProfile {
        self.latency
    }

    /// Catalog lookup without simulated latency.
    pub fn get_competition(&self, competition_id: u32) -> Option<Competition> {
        self.store.competition(competition_id).cloned()
    }
}

#[async_trait]
impl SportsDataProvider for MockSportsDataProvider {
    async fn list_competitions(&self) -> Result<Vec<Competition>, ProviderError> {
        sleep(self.latency.competitions).await;
        let competitions = self.store.competitions().to_vec();
        log_list("list_competitions", None, competitions.len());
        Ok(competitions)
    }

    async fn list_teams(&self, competition_id: Option<u32>) -> Result<Vec<Team>, ProviderError> {
        sleep(self.latency.teams).await;
        let teams = filter_by_competition(self.store.teams(), competition_id, |team| {
            team.competition_id
        });
        log_list("list_teams", competition_id, teams.len());
        Ok(teams)
    }

    async fn get_team(&self, team_id: u32) -> Result<Option<Team>, ProviderError> {
        sleep(self.latency.team).await;
        let team = self.store.team(team_id).cloned();
        log_lookup("get_team", team_id, team.is_some());
        Ok(team)
    }

    async fn list_players(
        &self,
        competition_id: Option<u32>,
    ) -> Result<Vec<Player>, ProviderError> {
        sleep(self.latency.players).await;
        let players = filter_by_competition(self.store.players(), competition_id, |player| {
            player.competition_id
        });
        log_list("list_players", competition_id, players.len());
        Ok(players)
    }

    async fn list_players_by_team(&self, team_id: u32) -> Result<Vec<Player>, ProviderError> {
        sleep(self.latency.players_by_team).await;
        let players: Vec<Player> = self
            .store
            .players()
            .iter()
            .filter(|player| player.team_id == team_id)
            .cloned()
            .collect();
        debug!(
            component = "sports_data",
            event = "provider.list_players_by_team",
            team_id,
            count = players.len()
        );
        Ok(players)
    }

    async fn list_upcoming_matches(
        &self,
        competition_id: Option<u32>,
    ) -> Result<Vec<Match>, ProviderError> {
        sleep(self.latency.matches).await;
        let matches = filter_by_competition(self.store.matches(), competition_id, |fixture| {
            fixture.competition_id
        });
        log_list("list_upcoming_matches", competition_id, matches.len());
        Ok(matches)
    }

    async fn get_match(&self, match_id: u32) -> Result<Option<Match>, ProviderError> {
        sleep(self.latency.fixture).await;
        let fixture = self.store.fixture(match_id).cloned();
        log_lookup("get_match", match_id, fixture.is_some());
        Ok(fixture)
    }

    async fn list_betting_tips(
        &self,
        competition_id: Option<u32>,
    ) -> Result<Vec<BettingTip>, ProviderError> {
        sleep(self.latency.tips).await;
        let tips =
            filter_by_competition(self.store.tips(), competition_id, |tip| tip.competition_id);
        log_list("list_betting_tips", competition_id, tips.len());
        Ok(tips)
    }
}

fn log_list(operation: &'static str, competition_id: Option<u32>, count: usize) {
    match competition_id {
        Some(competition_id) => debug!(
            component = "sports_data",
            event = "provider.list",
            operation,
            competition_id,
            count
        ),
        None => debug!(
            component = "sports_data",
            event = "provider.list",
            operation,
            count
        ),
    }
}

fn log_lookup(operation: &'static str, id: u32, found: bool) {
    debug!(
        component = "sports_data",
        event = "provider.lookup",
        operation,
        id,
        found
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_lock() -> &'static Mutex<()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn with_env_vars<R>(vars: &[(&str, Option<&str>)], f: impl FnOnce() -> R) -> R {
        let _guard = env_lock().lock().expect("env lock should not be poisoned");
        let previous: Vec<(String, Option<String>)> = vars
            .iter()
            .map(|(key, _)| ((*key).to_string(), env::var(key).ok()))
            .collect();

        for (key, value) in vars {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }

        let output = f();

        for (key, value) in previous {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }

        output
    }

    #[test]
    fn defaults_when_env_missing() {
        let cfg = with_env_vars(
            &[("MATCHDAY_SEED", None), ("MATCHDAY_LATENCY_SCALE", None)],
            provider_config_from_env,
        );
        assert_eq!(cfg, ProviderConfig::default());
        assert_eq!(cfg.latency.matches, Duration::from_millis(700));
    }

    #[test]
    fn reads_seed_and_scales_latency() {
        let cfg = with_env_vars(
            &[
                ("MATCHDAY_SEED", Some("42")),
                ("MATCHDAY_LATENCY_SCALE", Some("0.1")),
            ],
            provider_config_from_env,
        );
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.latency.matches, Duration::from_millis(70));
        assert_eq!(cfg.latency.team, Duration::from_millis(30));
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let cfg = with_env_vars(
            &[
                ("MATCHDAY_SEED", Some("minus-one")),
                ("MATCHDAY_LATENCY_SCALE", Some("-2")),
            ],
            provider_config_from_env,
        );
        assert_eq!(cfg, ProviderConfig::default());
    }

    #[test]
    fn strict_parsers_report_bad_input() {
        assert_eq!(
            parse_latency_scale("fast").unwrap_err(),
            ConfigError::InvalidLatencyScale("fast".to_string())
        );
        assert!(parse_latency_scale("NaN").is_err());
        assert_eq!(parse_latency_scale(" 2.5 ").unwrap(), 2.5);
        assert_eq!(
            parse_seed("x").unwrap_err(),
            ConfigError::InvalidSeed("x".to_string())
        );
    }

    #[test]
    fn zero_scale_keeps_delays_nonzero() {
        let latency = LatencyProfile::default().scaled(0.0);
        assert_eq!(latency.teams, Duration::from_millis(1));
        assert_eq!(latency.tips, Duration::from_millis(1));
    }

    #[test]
    fn slowest_delay_is_matches() {
        assert_eq!(
            LatencyProfile::default().slowest(),
            Duration::from_millis(700)
        );
    }

    #[test]
    fn seeded_config_reproduces_store() {
        let cfg = ProviderConfig {
            seed: Some(5),
            ..ProviderConfig::default()
        };
        let a = MockSportsDataProvider::from_config(&cfg).unwrap();
        let b = MockSportsDataProvider::from_config(&cfg).unwrap();
        assert_eq!(a.store().matches(), b.store().matches());
    }
}
