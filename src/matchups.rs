use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::data_loader::{GameRecord, PlayerWeekRecord};

// Pairs each week's game rows into matchups for the matchup view. Every game
// normally shows up as two mirrored rows; the first row encountered claims
// the matchup and the mirror is skipped. When the mirror row is missing the
// opponent's recorded score is gone too, so that side's total falls back to
// the sum of its player scores.

#[derive(Serialize, Debug, Clone)]
pub struct MatchupSide {
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Players")]
    pub players: Vec<PlayerWeekRecord>,
    #[serde(rename = "TotalScore")]
    pub total_score: f64,
}

#[derive(Serialize, Debug, Clone)]
pub struct Matchup {
    #[serde(rename = "Team1")]
    pub team1: MatchupSide,
    #[serde(rename = "Team2")]
    pub team2: MatchupSide,
}

pub fn weekly_matchups(
    games: &[GameRecord],
    players: &[PlayerWeekRecord],
) -> BTreeMap<u32, Vec<Matchup>> {
    let mut matchups: BTreeMap<u32, Vec<Matchup>> = BTreeMap::new();
    let mut claimed: HashSet<(u32, &str, &str)> = HashSet::new();

    for game in games {
        if claimed.contains(&(game.week, game.team.as_str(), game.opponent.as_str()))
            || claimed.contains(&(game.week, game.opponent.as_str(), game.team.as_str()))
        {
            continue;
        }

        let mirror = games.iter().find(|m| {
            m.week == game.week && m.team == game.opponent && m.opponent == game.team
        });

        let matchup = Matchup {
            team1: build_side(&game.team, Some(game.score), game.week, players),
            team2: build_side(
                &game.opponent,
                mirror.map(|m| m.score),
                game.week,
                players,
            ),
        };

        matchups.entry(game.week).or_default().push(matchup);
        claimed.insert((game.week, game.team.as_str(), game.opponent.as_str()));
    }

    matchups
}

fn build_side(
    team: &str,
    recorded_score: Option<f64>,
    week: u32,
    players: &[PlayerWeekRecord],
) -> MatchupSide {
    let team_players: Vec<PlayerWeekRecord> = players
        .iter()
        .filter(|p| p.team == team && p.week == week)
        .cloned()
        .collect();

    let total_score =
        recorded_score.unwrap_or_else(|| team_players.iter().map(|p| p.score).sum());

    MatchupSide {
        team: team.to_string(),
        players: team_players,
        total_score,
    }
}
