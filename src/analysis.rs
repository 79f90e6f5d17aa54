//! Match detail view: comparison, head-to-head and the squads' top players.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Match, Player};
use crate::provider::{ProviderError, SportsDataProvider};
use crate::stats::{
    confidence_band, head_to_head_summary, team_comparison, top_players, ConfidenceBand,
    HeadToHeadSummary, StatComparison,
};

pub const SQUAD_HIGHLIGHTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchAnalysis {
    #[serde(rename = "match")]
    pub fixture: Match,
    pub comparison: Vec<StatComparison>,
    pub head_to_head: HeadToHeadSummary,
    pub confidence_band: ConfidenceBand,
    pub home_top_players: Vec<Player>,
    pub away_top_players: Vec<Player>,
}

pub fn build_match_analysis(
    fixture: Match,
    home_squad: &[Player],
    away_squad: &[Player],
) -> MatchAnalysis {
    MatchAnalysis {
        comparison: team_comparison(&fixture.home_team, &fixture.away_team),
        head_to_head: head_to_head_summary(&fixture.h2h, &fixture.home_team.name),
        confidence_band: confidence_band(fixture.prediction_confidence),
        home_top_players: top_players(home_squad, SQUAD_HIGHLIGHTS),
        away_top_players: top_players(away_squad, SQUAD_HIGHLIGHTS),
        fixture,
    }
}

/// Fetches the match, then both squads concurrently. `Ok(None)` when the
/// match does not exist.
pub async fn analyse_match(
    provider: &dyn SportsDataProvider,
    match_id: u32,
) -> Result<Option<MatchAnalysis>, ProviderError> {
    let Some(fixture) = provider.get_match(match_id).await? else {
        debug!(
            component = "analysis",
            event = "analysis.match_missing",
            match_id
        );
        return Ok(None);
    };

    let (home_squad, away_squad) = tokio::try_join!(
        provider.list_players_by_team(fixture.home_team.id),
        provider.list_players_by_team(fixture.away_team.id),
    )?;

    Ok(Some(build_match_analysis(
        fixture,
        &home_squad,
        &away_squad,
    )))
}
