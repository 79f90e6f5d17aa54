use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use matchday::{
    dashboard_router, BettingTip, Competition, LatencyProfile, Match, MockSportsDataProvider,
    Player, ProviderConfig, ProviderError, SportsDataProvider, Team,
};
use tower::util::ServiceExt;

fn fast_provider() -> MockSportsDataProvider {
    let cfg = ProviderConfig {
        latency: LatencyProfile::default().scaled(0.0),
        seed: Some(11),
    };
    MockSportsDataProvider::from_config(&cfg).unwrap()
}

fn app() -> Router {
    dashboard_router(Arc::new(fast_provider()))
}

/// Serves everything from the mock except tips, which always fail.
struct TipsOutage {
    inner: MockSportsDataProvider,
}

#[async_trait]
impl SportsDataProvider for TipsOutage {
    async fn list_competitions(&self) -> Result<Vec<Competition>, ProviderError> {
        self.inner.list_competitions().await
    }

    async fn list_teams(&self, competition_id: Option<u32>) -> Result<Vec<Team>, ProviderError> {
        self.inner.list_teams(competition_id).await
    }

    async fn get_team(&self, team_id: u32) -> Result<Option<Team>, ProviderError> {
        self.inner.get_team(team_id).await
    }

    async fn list_players(
        &self,
        competition_id: Option<u32>,
    ) -> Result<Vec<Player>, ProviderError> {
        self.inner.list_players(competition_id).await
    }

    async fn list_players_by_team(&self, team_id: u32) -> Result<Vec<Player>, ProviderError> {
        self.inner.list_players_by_team(team_id).await
    }

    async fn list_upcoming_matches(
        &self,
        competition_id: Option<u32>,
    ) -> Result<Vec<Match>, ProviderError> {
        self.inner.list_upcoming_matches(competition_id).await
    }

    async fn get_match(&self, match_id: u32) -> Result<Option<Match>, ProviderError> {
        self.inner.get_match(match_id).await
    }

    async fn list_betting_tips(
        &self,
        _competition_id: Option<u32>,
    ) -> Result<Vec<BettingTip>, ProviderError> {
        Err(ProviderError::Transport(
            "simulated tips outage".to_string(),
        ))
    }
}

fn outage_app() -> Router {
    dashboard_router(Arc::new(TipsOutage {
        inner: fast_provider(),
    }))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn competitions_endpoint_lists_catalog() {
    let (status, json) = get_json(app(), "/api/competitions").await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "Premier League",
            "La Liga",
            "Bundesliga",
            "Serie A",
            "Ligue 1",
        ]
    );
}

#[tokio::test]
async fn teams_endpoint_applies_competition_filter() {
    let (status, json) = get_json(app(), "/api/teams?competition=2").await;

    assert_eq!(status, StatusCode::OK);
    let teams = json.as_array().unwrap();
    assert_eq!(teams.len(), 2);
    assert!(teams.iter().all(|t| t["competition_id"] == 2));

    let (_, all) = get_json(app(), "/api/teams").await;
    assert_eq!(all.as_array().unwrap().len(), 11);

    let (_, unknown) = get_json(app(), "/api/teams?competition=42").await;
    assert!(unknown.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn team_lookup_returns_404_for_unknown_id() {
    let (status, json) = get_json(app(), "/api/teams/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Manchester City");
    assert_eq!(json["form"], "WWDWW");

    let (status, json) = get_json(app(), "/api/teams/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "team not found");
}

#[tokio::test]
async fn team_players_endpoint_returns_squad() {
    let (status, json) = get_json(app(), "/api/teams/2/players").await;

    assert_eq!(status, StatusCode::OK);
    let players = json.as_array().unwrap();
    assert_eq!(players.len(), 2);
    assert!(players.iter().all(|p| p["team_id"] == 2));

    let (_, empty) = get_json(app(), "/api/teams/999/players").await;
    assert!(empty.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn players_endpoint_serializes_form_trend() {
    let (status, json) = get_json(app(), "/api/players?competition=3").await;

    assert_eq!(status, StatusCode::OK);
    let players = json.as_array().unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0]["name"], "Harry Kane");
    assert!(["rising", "falling", "steady"].contains(&players[0]["form"].as_str().unwrap()));
}

#[tokio::test]
async fn matches_endpoint_and_lookup() {
    let (status, json) = get_json(app(), "/api/matches?competition=1").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<u64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![110, 111, 112]);

    let (status, fixture) = get_json(app(), "/api/matches/120").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fixture["home_team"]["name"], "Barcelona");
    assert_eq!(fixture["away_team"]["name"], "Real Madrid");
    assert_eq!(fixture["date"], "2023-11-15");

    let (status, json) = get_json(app(), "/api/matches/5").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "match not found");
}

#[tokio::test]
async fn match_analysis_endpoint() {
    let (status, json) = get_json(app(), "/api/matches/110/analysis").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["match"]["id"], 110);
    assert_eq!(json["comparison"].as_array().unwrap().len(), 5);
    assert_eq!(json["home_top_players"][0]["name"], "Erling Haaland");

    let (status, _) = get_json(app(), "/api/matches/404/analysis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tips_endpoint_mirrors_matches() {
    let (_, matches) = get_json(app(), "/api/matches").await;
    let (status, tips) = get_json(app(), "/api/tips").await;

    assert_eq!(status, StatusCode::OK);
    let matches = matches.as_array().unwrap();
    let tips = tips.as_array().unwrap();
    assert_eq!(matches.len(), tips.len());
    for (fixture, tip) in matches.iter().zip(tips) {
        assert_eq!(tip["match_id"], fixture["id"]);
        assert_eq!(tip["tip"], fixture["recommended_bet"]);
        assert_eq!(tip["confidence"], fixture["prediction_confidence"]);
    }
}

#[tokio::test]
async fn statistics_endpoint_builds_charts() {
    let (status, json) = get_json(app(), "/api/statistics?competition=1").await;

    assert_eq!(status, StatusCode::OK);
    let goals = json["goals_per_team"].as_array().unwrap();
    assert_eq!(goals.len(), 6);
    assert_eq!(goals[0]["name"], "MCI");
    assert!((goals[0]["value"].as_f64().unwrap() - 27.0).abs() < 1e-9);
    assert_eq!(json["team_radar"].as_array().unwrap().len(), 6);
    assert_eq!(json["player_contributions"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn invalid_competition_query_is_rejected() {
    let (status, _) = get(app(), "/api/teams?competition=premier").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn overview_endpoint_reports_competition_and_sections() {
    let (status, json) = get_json(app(), "/dashboard/overview?competition=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["competition"]["name"], "Premier League");
    assert_eq!(json["matches"].as_array().unwrap().len(), 3);
    assert_eq!(json["tips"].as_array().unwrap().len(), 3);
    assert_eq!(json["tip_summary"]["total"], 3);
    assert_eq!(json["top_players"].as_array().unwrap().len(), 4);
    assert!(json["notices"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn overview_degrades_when_a_section_fails() {
    let (status, json) = get_json(outage_app(), "/dashboard/overview").await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["tips"].as_array().unwrap().is_empty());
    assert_eq!(json["matches"].as_array().unwrap().len(), 4);
    let notices = json["notices"].as_array().unwrap();
    assert_eq!(notices.len(), 1);
    let notice = notices[0].as_str().unwrap();
    assert!(notice.contains("simulated tips outage"));
}

#[tokio::test]
async fn provider_failure_maps_to_bad_gateway() {
    let (status, json) = get_json(outage_app(), "/api/tips").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        json["error"],
        "sports data transport error: simulated tips outage"
    );
}

#[tokio::test]
async fn dashboard_page_renders_cards_and_notices() {
    let (status, body) = get(app(), "/dashboard?competition=2").await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("<table"));
    assert!(text.contains("La Liga"));
    assert!(text.contains("Barcelona"));
    assert!(text.contains("Robert Lewandowski"));

    let (_, body) = get(outage_app(), "/dashboard").await;
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("Could not load tips"));
    assert!(text.contains("No betting tips."));
}
