//! Literal reference tables the mock store is built from.

use crate::model::{Competition, FormTrend, Player, Team};

const TEAM_LOGO_BASE: &str = "https://media.api-sports.io/football/teams";
const PLAYER_IMAGE_BASE: &str = "https://media.api-sports.io/football/players";

pub fn seed_competitions() -> Vec<Competition> {
    [
        (1, "Premier League", "England", "🏴󠁧󠁢󠁥󠁮󠁧󠁿"),
        (2, "La Liga", "Spain", "🇪🇸"),
        (3, "Bundesliga", "Germany", "🇩🇪"),
        (4, "Serie A", "Italy", "🇮🇹"),
        (5, "Ligue 1", "France", "🇫🇷"),
    ]
    .into_iter()
    .map(|(id, name, country, flag)| Competition {
        id,
        name: name.to_string(),
        country: country.to_string(),
        flag: flag.to_string(),
    })
    .collect()
}

#[rustfmt::skip]
pub fn seed_teams() -> Vec<Team> {
    vec![
        team(1, "Manchester City", "MCI", 50, "WWDWW", 0.75, 2.7, 0.8, 8, 93, 1),
        team(2, "Arsenal", "ARS", 42, "WWWDL", 0.70, 2.3, 0.9, 7, 88, 1),
        team(3, "Liverpool", "LIV", 40, "WDWWL", 0.68, 2.5, 1.1, 6, 87, 1),
        team(4, "Chelsea", "CHE", 49, "LWWDW", 0.62, 2.1, 1.2, 5, 83, 1),
        team(5, "Manchester United", "MUN", 33, "DLWWL", 0.58, 1.8, 1.4, 4, 80, 1),
        team(6, "Tottenham", "TOT", 47, "WLLWW", 0.60, 2.0, 1.3, 5, 82, 1),
        team(7, "Barcelona", "BAR", 529, "WWWDL", 0.72, 2.5, 0.8, 9, 91, 2),
        team(8, "Real Madrid", "RMA", 541, "WDWWW", 0.75, 2.6, 0.7, 10, 92, 2),
        team(9, "Bayern Munich", "BAY", 157, "WWWWW", 0.80, 3.0, 0.6, 12, 95, 3),
        team(10, "Juventus", "JUV", 496, "WDWDL", 0.65, 1.9, 0.8, 8, 85, 4),
        team(11, "PSG", "PSG", 85, "WWWWD", 0.78, 2.8, 0.7, 11, 90, 5),
    ]
}

#[rustfmt::skip]
pub fn seed_players() -> Vec<Player> {
    use FormTrend::{Falling, Rising, Steady};

    vec![
        player(1, "Erling Haaland", "FW", 1, (22, 5, 1845), 8.7, Rising, "5 goals in last 3 matches", 1100, 1),
        player(2, "Kevin De Bruyne", "MF", 1, (5, 14, 1920), 8.4, Steady, "Consistent performances", 627, 1),
        player(3, "Bukayo Saka", "FW", 2, (14, 11, 2070), 8.1, Rising, "3 goals, 2 assists in last 4 matches", 1161, 1),
        player(4, "Martin Ødegaard", "MF", 2, (8, 8, 2115), 8.2, Steady, "Consistent playmaking", 986, 1),
        player(5, "Mohamed Salah", "FW", 3, (17, 9, 2025), 8.3, Falling, "No goals in last 2 matches", 306, 1),
        player(6, "Cole Palmer", "MF", 4, (16, 8, 1935), 7.9, Rising, "4 goals, 2 assists in last 5 matches", 19760, 1),
        player(7, "Robert Lewandowski", "FW", 7, (24, 6, 2160), 8.6, Rising, "6 goals in last 4 matches", 521, 2),
        player(8, "Vinicius Jr", "FW", 8, (18, 12, 2205), 8.5, Steady, "Consistent performances", 2875, 2),
        player(9, "Harry Kane", "FW", 9, (25, 7, 2250), 8.8, Rising, "7 goals in last 5 matches", 184, 3),
    ]
}

#[allow(clippy::too_many_arguments)]
fn team(
    id: u32,
    name: &str,
    short_name: &str,
    logo_id: u32,
    form: &str,
    win_rate: f64,
    goals_scored_avg: f64,
    goals_conceded_avg: f64,
    clean_sheets: u32,
    strength_index: u32,
    competition_id: u32,
) -> Team {
    Team {
        id,
        name: name.to_string(),
        short_name: short_name.to_string(),
        logo: format!("{TEAM_LOGO_BASE}/{logo_id}.png"),
        form: form.to_string(),
        win_rate,
        goals_scored_avg,
        goals_conceded_avg,
        clean_sheets,
        strength_index,
        competition_id,
    }
}

#[allow(clippy::too_many_arguments)]
fn player(
    id: u32,
    name: &str,
    position: &str,
    team_id: u32,
    (goals, assists, minutes_played): (u32, u32, u32),
    rating: f64,
    form: FormTrend,
    form_reason: &str,
    image_id: u32,
    competition_id: u32,
) -> Player {
    Player {
        id,
        name: name.to_string(),
        position: position.to_string(),
        team_id,
        goals,
        assists,
        minutes_played,
        rating,
        form,
        form_reason: form_reason.to_string(),
        image: format!("{PLAYER_IMAGE_BASE}/{image_id}.png"),
        competition_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premier_league_has_six_teams_in_table_order() {
        let names: Vec<String> = seed_teams()
            .into_iter()
            .filter(|team| team.competition_id == 1)
            .map(|team| team.name)
            .collect();

        assert_eq!(
            names,
            vec![
                "Manchester City",
                "Arsenal",
                "Liverpool",
                "Chelsea",
                "Manchester United",
                "Tottenham"
            ]
        );
    }

    #[test]
    fn logo_and_image_urls_use_media_ids() {
        let teams = seed_teams();
        assert_eq!(
            teams[0].logo,
            "https://media.api-sports.io/football/teams/50.png"
        );
        let players = seed_players();
        assert_eq!(
            players[8].image,
            "https://media.api-sports.io/football/players/184.png"
        );
    }

    #[test]
    fn premier_league_flag_is_the_england_subdivision_flag() {
        let flag = &seed_competitions()[0].flag;
        assert_eq!(
            flag.as_str(),
            "\u{1F3F4}\u{E0067}\u{E0062}\u{E0065}\u{E006E}\u{E0067}\u{E007F}"
        );
        assert_eq!(flag.chars().count(), 7);
    }

    #[test]
    fn table_sizes() {
        assert_eq!(seed_competitions().len(), 5);
        assert_eq!(seed_teams().len(), 11);
        assert_eq!(seed_players().len(), 9);
    }
}
