//! JSON API and HTML overview over a [`SportsDataProvider`].

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::analysis::{analyse_match, MatchAnalysis};
use crate::model::{BettingTip, Competition, Match, Player, Team};
use crate::provider::{ProviderError, SportsDataProvider};
use crate::stats::{
    clean_sheets_chart, confidence_band, goals_per_team_chart, player_contributions, player_radar,
    team_radar, tip_summary, top_players, win_rate_chart, ChartPoint, ConfidenceBand,
    PlayerContribution, RadarSeries, TipSummary,
};

pub const OVERVIEW_TOP_PLAYERS: usize = 4;
pub const OVERVIEW_MATCH_ROWS: usize = 4;
pub const OVERVIEW_TIP_ROWS: usize = 3;
pub const STATISTICS_RADAR_PLAYERS: usize = 5;

pub const DASHBOARD_PATH: &str = "/dashboard";
/// Prefix shared by every JSON route.
pub const API_PREFIX: &str = "/api";

const MATCH_HEADERS: [&str; 8] = [
    "Kickoff",
    "Home",
    "Away",
    "1",
    "X",
    "2",
    "Confidence",
    "Tip",
];
const TIP_HEADERS: [&str; 5] = ["Match", "Tip", "Odds", "Confidence", "Reason"];
const PLAYER_HEADERS: [&str; 6] = ["Player", "Pos", "Goals", "Assists", "Rating", "Form"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct CompetitionQuery {
    pub competition: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardOverview {
    pub competition: Option<Competition>,
    pub matches: Vec<Match>,
    pub top_players: Vec<Player>,
    pub tips: Vec<BettingTip>,
    pub tip_summary: TipSummary,
    /// One entry per section that failed to load.
    pub notices: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub goals_per_team: Vec<ChartPoint>,
    pub win_rate: Vec<ChartPoint>,
    pub clean_sheets: Vec<ChartPoint>,
    pub player_contributions: Vec<PlayerContribution>,
    pub player_radar: Vec<RadarSeries>,
    pub team_radar: Vec<RadarSeries>,
}

/// Loads the overview sections concurrently. A failed section is left empty
/// and reported in `notices` so the rest still renders.
pub async fn load_overview(
    provider: &dyn SportsDataProvider,
    competition_id: Option<u32>,
) -> DashboardOverview {
    let (competitions, matches, players, tips) = tokio::join!(
        provider.list_competitions(),
        provider.list_upcoming_matches(competition_id),
        provider.list_players(competition_id),
        provider.list_betting_tips(competition_id),
    );

    let mut notices = Vec::new();
    let competitions = section_or_empty("competitions", competitions, &mut notices);
    let mut matches = section_or_empty("matches", matches, &mut notices);
    let players = section_or_empty("players", players, &mut notices);
    let tips = section_or_empty("tips", tips, &mut notices);

    matches.sort_by_key(|fixture| fixture.kickoff());

    let competition = competitions
        .into_iter()
        .find(|competition| Some(competition.id) == competition_id);

    DashboardOverview {
        competition,
        matches,
        top_players: top_players(&players, OVERVIEW_TOP_PLAYERS),
        tip_summary: tip_summary(&tips),
        tips,
        notices,
    }
}

pub async fn load_statistics(
    provider: &dyn SportsDataProvider,
    competition_id: Option<u32>,
) -> Result<StatisticsReport, ProviderError> {
    let (teams, players) = tokio::try_join!(
        provider.list_teams(competition_id),
        provider.list_players(competition_id),
    )?;

    Ok(StatisticsReport {
        goals_per_team: goals_per_team_chart(&teams),
        win_rate: win_rate_chart(&teams),
        clean_sheets: clean_sheets_chart(&teams),
        player_contributions: player_contributions(&players),
        player_radar: player_radar(&players, STATISTICS_RADAR_PLAYERS),
        team_radar: team_radar(&teams),
    })
}

fn section_or_empty<T>(
    section: &'static str,
    result: Result<Vec<T>, ProviderError>,
    notices: &mut Vec<String>,
) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(err) => {
            warn!(
                component = "dashboard",
                event = "dashboard.section.degraded",
                section,
                error = %err
            );
            notices.push(format!("Could not load {section}: {err}"));
            Vec::new()
        }
    }
}

pub fn dashboard_router(provider: Arc<dyn SportsDataProvider>) -> Router {
    Router::new()
        .route(DASHBOARD_PATH, get(get_dashboard_html))
        .route("/dashboard/overview", get(get_overview))
        .route("/api/competitions", get(get_competitions))
        .route("/api/teams", get(get_teams))
        .route("/api/teams/{id}", get(get_team))
        .route("/api/teams/{id}/players", get(get_team_players))
        .route("/api/players", get(get_players))
        .route("/api/matches", get(get_matches))
        .route("/api/matches/{id}", get(get_match))
        .route("/api/matches/{id}/analysis", get(get_match_analysis))
        .route("/api/tips", get(get_tips))
        .route("/api/statistics", get(get_statistics))
        .with_state(DashboardAppState { provider })
}

pub fn render_dashboard_html(overview: &DashboardOverview) -> String {
    let now_utc = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let scope = overview
        .competition
        .as_ref()
        .map(|competition| format!("{} {}", competition.flag, competition.name))
        .unwrap_or_else(|| "All competitions".to_string());

    let mut out = String::new();
    out.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str("<title>Matchday Dashboard</title>\n");
    out.push_str("<style>:root{--bg:#f1f5ef;--card:#ffffff;--ink:#17201a;--muted:#5c6a60;--line:#d5ddd7;--head:#173d2a;--high:#1f8a4c;--medium:#b7791f;--low:#c53030}*{box-sizing:border-box}body{margin:0;color:var(--ink);font-family:\"Space Grotesk\",\"Avenir Next\",\"Segoe UI\",sans-serif;background:linear-gradient(160deg,var(--bg),#e6efe9);min-height:100vh}.shell{max-width:1200px;margin:0 auto;padding:24px 18px 28px}.hero{background:linear-gradient(135deg,#12331f 0%,#2d6a45 100%);color:#f4faf6;border-radius:16px;padding:18px 20px}.hero h1{margin:0 0 8px;font-size:1.6rem}.hero-meta{display:flex;gap:16px;flex-wrap:wrap;font-size:.92rem;color:#d6eadc}.card{margin-top:16px;background:var(--card);border:1px solid #c8d3cb;border-radius:16px;overflow:hidden}.card h2{margin:0;padding:12px 14px;font-size:1rem;border-bottom:1px solid var(--line)}table{width:100%;border-collapse:collapse}thead th{background:var(--head);color:#eef6f1;font-size:.78rem;text-transform:uppercase;letter-spacing:.04em;padding:9px 10px;text-align:left}tbody td{font-size:.86rem;padding:8px 10px;border-bottom:1px solid var(--line);white-space:nowrap}.band-high{color:var(--high);font-weight:700}.band-medium{color:var(--medium);font-weight:700}.band-low{color:var(--low);font-weight:700}.notice{margin-top:16px;padding:10px 14px;border-radius:12px;background:#fff4e5;border:1px solid #f0c38e;color:#7a4a10;font-size:.86rem}.empty{padding:12px 14px;color:var(--muted);font-size:.86rem}</style>\n");
    out.push_str("</head><body><main class=\"shell\">\n");
    out.push_str("<section class=\"hero\"><h1>Matchday Dashboard</h1>");
    out.push_str("<div class=\"hero-meta\">\n");
    out.push_str(&format!("<span>Scope: {}</span>", escape_html(&scope)));
    out.push_str(&format!(
        "<span>Tips: {}</span><span>Avg. odds: {:.2}</span>",
        overview.tip_summary.total, overview.tip_summary.average_odds
    ));
    out.push_str(&format!(
        "<span>Generated: {}</span>",
        escape_html(&now_utc)
    ));
    out.push_str("</div></section>\n");

    for notice in &overview.notices {
        out.push_str("<div class=\"notice\">");
        out.push_str(&escape_html(notice));
        out.push_str("</div>\n");
    }

    push_matches_card(&mut out, &overview.matches);
    push_tips_card(&mut out, &overview.tips);
    push_players_card(&mut out, &overview.top_players);

    out.push_str("</main></body></html>\n");
    out
}

fn push_matches_card(out: &mut String, matches: &[Match]) {
    out.push_str("<section class=\"card\" id=\"upcoming-matches\"><h2>Upcoming Matches</h2>\n");
    if matches.is_empty() {
        out.push_str("<div class=\"empty\">No upcoming matches.</div></section>\n");
        return;
    }

    push_table_head(out, &MATCH_HEADERS);
    for fixture in matches.iter().take(OVERVIEW_MATCH_ROWS) {
        out.push_str(&format!("<tr data-match=\"{}\">", fixture.id));
        push_cell(out, &format!("{} {}", fixture.date, fixture.time));
        push_cell(out, &fixture.home_team.name);
        push_cell(out, &fixture.away_team.name);
        push_cell(out, &format!("{:.2}", fixture.home_odds));
        push_cell(out, &format!("{:.2}", fixture.draw_odds));
        push_cell(out, &format!("{:.2}", fixture.away_odds));
        push_confidence_cell(out, fixture.prediction_confidence);
        push_cell(out, &fixture.recommended_bet);
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody></table></section>\n");
}

fn push_tips_card(out: &mut String, tips: &[BettingTip]) {
    out.push_str("<section class=\"card\" id=\"betting-tips\"><h2>Top Betting Tips</h2>\n");
    if tips.is_empty() {
        out.push_str("<div class=\"empty\">No betting tips.</div></section>\n");
        return;
    }

    push_table_head(out, &TIP_HEADERS);
    for tip in tips.iter().take(OVERVIEW_TIP_ROWS) {
        out.push_str(&format!("<tr data-match=\"{}\">", tip.match_id));
        push_cell(out, &format!("{} vs {}", tip.home_team, tip.away_team));
        push_cell(out, &tip.tip);
        push_cell(out, &format!("{:.2}", tip.odds));
        push_confidence_cell(out, tip.confidence);
        push_cell(out, &tip.reason);
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody></table></section>\n");
}

fn push_players_card(out: &mut String, players: &[Player]) {
    out.push_str("<section class=\"card\" id=\"top-players\"><h2>Top Players</h2>\n");
    if players.is_empty() {
        out.push_str("<div class=\"empty\">No players.</div></section>\n");
        return;
    }

    push_table_head(out, &PLAYER_HEADERS);
    for player in players {
        out.push_str("<tr>");
        push_cell(out, &player.name);
        push_cell(out, &player.position);
        push_cell(out, &player.goals.to_string());
        push_cell(out, &player.assists.to_string());
        push_cell(out, &format!("{:.1}", player.rating));
        push_cell(
            out,
            &format!("{} {}", player.form.symbol(), player.form_reason),
        );
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody></table></section>\n");
}

fn push_table_head(out: &mut String, headers: &[&str]) {
    out.push_str("<table><thead><tr>");
    for header in headers {
        out.push_str("<th>");
        out.push_str(&escape_html(header));
        out.push_str("</th>");
    }
    out.push_str("</tr></thead><tbody>\n");
}

fn push_cell(out: &mut String, value: &str) {
    out.push_str("<td>");
    out.push_str(&escape_html(value));
    out.push_str("</td>");
}

fn push_confidence_cell(out: &mut String, confidence: u32) {
    let class = match confidence_band(confidence) {
        ConfidenceBand::High => "band-high",
        ConfidenceBand::Medium => "band-medium",
        ConfidenceBand::Low => "band-low",
    };
    out.push_str(&format!("<td class=\"{class}\">{confidence}%</td>"));
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[derive(Clone)]
struct DashboardAppState {
    provider: Arc<dyn SportsDataProvider>,
}

#[derive(Debug)]
enum ApiError {
    NotFound(&'static str),
    Upstream(ProviderError),
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        Self::Upstream(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(entity) => (StatusCode::NOT_FOUND, format!("{entity} not found")),
            Self::Upstream(err) => {
                warn!(
                    component = "dashboard",
                    event = "http.upstream_error",
                    error = %err
                );
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

fn log_request(route: &'static str, competition_id: Option<u32>) {
    match competition_id {
        Some(competition_id) => info!(
            component = "dashboard",
            event = "http.request",
            route,
            competition_id
        ),
        None => info!(component = "dashboard", event = "http.request", route),
    }
}

async fn get_dashboard_html(
    State(state): State<DashboardAppState>,
    Query(query): Query<CompetitionQuery>,
) -> impl IntoResponse {
    log_request("/dashboard", query.competition);
    let overview = load_overview(state.provider.as_ref(), query.competition).await;
    Html(render_dashboard_html(&overview))
}

async fn get_overview(
    State(state): State<DashboardAppState>,
    Query(query): Query<CompetitionQuery>,
) -> Json<DashboardOverview> {
    log_request("/dashboard/overview", query.competition);
    Json(load_overview(state.provider.as_ref(), query.competition).await)
}

async fn get_competitions(
    State(state): State<DashboardAppState>,
) -> Result<Json<Vec<Competition>>, ApiError> {
    log_request("/api/competitions", None);
    Ok(Json(state.provider.list_competitions().await?))
}

async fn get_teams(
    State(state): State<DashboardAppState>,
    Query(query): Query<CompetitionQuery>,
) -> Result<Json<Vec<Team>>, ApiError> {
    log_request("/api/teams", query.competition);
    Ok(Json(state.provider.list_teams(query.competition).await?))
}

async fn get_team(
    State(state): State<DashboardAppState>,
    Path(id): Path<u32>,
) -> Result<Json<Team>, ApiError> {
    log_request("/api/teams/{id}", None);
    state
        .provider
        .get_team(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("team"))
}

async fn get_team_players(
    State(state): State<DashboardAppState>,
    Path(id): Path<u32>,
) -> Result<Json<Vec<Player>>, ApiError> {
    log_request("/api/teams/{id}/players", None);
    Ok(Json(state.provider.list_players_by_team(id).await?))
}

async fn get_players(
    State(state): State<DashboardAppState>,
    Query(query): Query<CompetitionQuery>,
) -> Result<Json<Vec<Player>>, ApiError> {
    log_request("/api/players", query.competition);
    Ok(Json(state.provider.list_players(query.competition).await?))
}

async fn get_matches(
    State(state): State<DashboardAppState>,
    Query(query): Query<CompetitionQuery>,
) -> Result<Json<Vec<Match>>, ApiError> {
    log_request("/api/matches", query.competition);
    Ok(Json(
        state
            .provider
            .list_upcoming_matches(query.competition)
            .await?,
    ))
}

async fn get_match(
    State(state): State<DashboardAppState>,
    Path(id): Path<u32>,
) -> Result<Json<Match>, ApiError> {
    log_request("/api/matches/{id}", None);
    state
        .provider
        .get_match(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("match"))
}

async fn get_match_analysis(
    State(state): State<DashboardAppState>,
    Path(id): Path<u32>,
) -> Result<Json<MatchAnalysis>, ApiError> {
    log_request("/api/matches/{id}/analysis", None);
    analyse_match(state.provider.as_ref(), id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("match"))
}

async fn get_tips(
    State(state): State<DashboardAppState>,
    Query(query): Query<CompetitionQuery>,
) -> Result<Json<Vec<BettingTip>>, ApiError> {
    log_request("/api/tips", query.competition);
    Ok(Json(
        state.provider.list_betting_tips(query.competition).await?,
    ))
}

async fn get_statistics(
    State(state): State<DashboardAppState>,
    Query(query): Query<CompetitionQuery>,
) -> Result<Json<StatisticsReport>, ApiError> {
    log_request("/api/statistics", query.competition);
    Ok(Json(
        load_statistics(state.provider.as_ref(), query.competition).await?,
    ))
}
