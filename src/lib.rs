//! Mock football data provider.
//!
//! Current implemented scope:
//! - seeded competitions, teams and players
//! - generated fixtures, head-to-head records and betting tips
//! - async provider with simulated latency and competition filters
//! - derived statistics, match analysis and an axum dashboard

mod analysis;
mod dashboard;
mod generation;
mod model;
mod observability;
mod provider;
mod seed;
mod stats;
mod store;

pub use analysis::{analyse_match, build_match_analysis, MatchAnalysis, SQUAD_HIGHLIGHTS};
pub use dashboard::{
    dashboard_router, load_overview, load_statistics, render_dashboard_html, CompetitionQuery,
    DashboardOverview, StatisticsReport,
};
pub use generation::{
    derive_betting_tip, derive_betting_tips, generate_competition_matches, generate_matches,
    match_id, select_tip_odds, FIXTURE_DATE, MATCHES_PER_COMPETITION, MAX_COMPETITION_ID,
};
pub use model::{
    BettingTip, Competition, FormTrend, HeadToHead, Match, PastMeeting, Player, Team, AWAY_WIN,
    DRAW, HOME_WIN, OVER_2_5_GOALS, RECOMMENDED_BETS,
};
pub use observability::{
    init_logging, log_app_bind, log_app_start, log_provider_selected, logging_config_from_env,
    LogFormat, LoggingConfig, LoggingInitError,
};
pub use provider::{
    parse_latency_scale, parse_seed, provider_config_from_env, ConfigError, LatencyProfile,
    MockSportsDataProvider, ProviderConfig, ProviderError, SportsDataProvider,
};
pub use seed::{seed_competitions, seed_players, seed_teams};
pub use stats::{
    clean_sheets_chart, compare_stat, confidence_band, form_record, goals_per_team_chart,
    head_to_head_summary, player_contributions, player_radar, team_comparison, team_radar,
    tip_summary, top_players, win_rate_chart, win_rate_percent, ChartPoint, ConfidenceBand,
    FormRecord, HeadToHeadSummary, PlayerContribution, RadarPoint, RadarSeries, StatComparison,
    StatEdge, TipSummary, PLAYER_RADAR_AXES, TEAM_RADAR_AXES,
};
pub use store::{filter_by_competition, SportsDataStore, StoreError};
