pub mod cache;
pub mod data_loader;
pub mod error;
pub mod head_to_head;
pub mod lineup;
pub mod matchups;
pub mod report;
pub mod schedule;
pub mod standings;
pub mod weekly_scores;

use std::collections::BTreeMap;

use serde::Serialize;

pub use cache::SnapshotCache;
pub use data_loader::{GameRecord, GameResult, PlayerWeekRecord, SeedStandingsRow, Snapshot};
pub use error::DataError;
pub use head_to_head::{compute_head_to_head, HeadToHead};
pub use lineup::{best_lineup_for_week, Lineup};
pub use matchups::{weekly_matchups, Matchup};
pub use schedule::{Opponent, Schedule};
pub use standings::{compute_standings, StandingsRow};
pub use weekly_scores::{compute_weekly_scores, top_six_for_week, TeamWeekScore};

/// Everything the dashboard views need, computed from one snapshot. Field
/// names match what the frontend already expects from the old API route.
#[derive(Serialize, Debug)]
pub struct DashboardData {
    pub teams: Vec<GameRecord>,
    pub players: Vec<PlayerWeekRecord>,
    pub standings: Vec<StandingsRow>,
    pub schedule: Schedule,
    #[serde(rename = "weeklyScores")]
    pub weekly_scores: BTreeMap<u32, Vec<TeamWeekScore>>,
    #[serde(rename = "weeklyMatchups")]
    pub weekly_matchups: BTreeMap<u32, Vec<Matchup>>,
}

pub fn build_dashboard(snapshot: &Snapshot) -> Result<DashboardData, DataError> {
    let head_to_head = compute_head_to_head(&snapshot.games);
    let standings = compute_standings(&snapshot.seed_standings, &head_to_head)?;

    Ok(DashboardData {
        teams: snapshot.games.clone(),
        players: snapshot.players.clone(),
        standings,
        schedule: snapshot.schedule.clone(),
        weekly_scores: compute_weekly_scores(&snapshot.players),
        weekly_matchups: weekly_matchups(&snapshot.games, &snapshot.players),
    })
}
