use std::io::Read;
use std::path::Path;

use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::error::DataError;
use crate::schedule::Schedule;

// Loads season data from a directory of CSV exports. Column names are kept
// exactly as the spreadsheet pipeline writes them, so every struct carries
// serde renames rather than forcing the source to match Rust naming.
//
// Per-row policy: a row that fails to deserialize (non-numeric score, unknown
// result string, missing team) is logged with its line number and dropped.
// Partial data still has to render, so a bad row never aborts a whole file.

pub const TEAMS_FILE: &str = "teams_data.csv";
pub const PLAYERS_FILE: &str = "players_data.csv";
pub const STANDINGS_FILE: &str = "standings_data.csv";
pub const SCHEDULE_FILE: &str = "team_schedule.csv";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Tie,
}

// One side of one game. Every game is expected to appear twice, once per
// team with result inverted, but nothing here assumes the mirror row exists.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GameRecord {
    #[serde(rename = "Week", deserialize_with = "deserialize_number_from_string")]
    pub week: u32,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Score", deserialize_with = "deserialize_number_from_string")]
    pub score: f64,
    #[serde(rename = "Opponent")]
    pub opponent: String,
    #[serde(rename = "Result")]
    pub result: GameResult,
}

// One rostered player in one week. Position strings carry numeric suffixes
// distinguishing starters ("RB1", "WR2"), so base-position matching is
// substring based, never equality.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlayerWeekRecord {
    #[serde(rename = "Week", deserialize_with = "deserialize_number_from_string")]
    pub week: u32,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "Score", deserialize_with = "deserialize_number_from_string")]
    pub score: f64,
    #[serde(rename = "Position")]
    pub position: String,
}

// Cumulative per-team stats as exported by the sheet. Rank and the overall
// record string are seed values only; the ranker re-derives the final order.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SeedStandingsRow {
    #[serde(rename = "Rank", deserialize_with = "deserialize_number_from_string")]
    pub rank: u32,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Win/Loss Record")]
    pub win_loss_record: String,
    #[serde(rename = "Top 6 Record")]
    pub top_six_record: String,
    #[serde(rename = "Overall Record")]
    pub overall_record: String,
    #[serde(rename = "Points For", deserialize_with = "deserialize_number_from_string")]
    pub points_for: f64,
    #[serde(rename = "Points Against", deserialize_with = "deserialize_number_from_string")]
    pub points_against: f64,
    #[serde(rename = "Average Points For", deserialize_with = "deserialize_number_from_string")]
    pub avg_points_for: f64,
    #[serde(rename = "Average Points Against", deserialize_with = "deserialize_number_from_string")]
    pub avg_points_against: f64,
    #[serde(rename = "Point Differential", deserialize_with = "deserialize_number_from_string")]
    pub point_differential: f64,
    #[serde(rename = "WIN COUNT", deserialize_with = "deserialize_number_from_string")]
    pub win_count: u32,
    #[serde(rename = "LOSS COUNT", deserialize_with = "deserialize_number_from_string")]
    pub loss_count: u32,
}

// A complete season load. Derived values are always recomputed from one of
// these, never mutated in place, so two computations over the same snapshot
// can't disagree.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub games: Vec<GameRecord>,
    pub players: Vec<PlayerWeekRecord>,
    pub seed_standings: Vec<SeedStandingsRow>,
    pub schedule: Schedule,
}

pub fn load_snapshot(dir: &Path) -> Result<Snapshot, DataError> {
    let games = load_games(&dir.join(TEAMS_FILE))?;
    let players = load_players(&dir.join(PLAYERS_FILE))?;
    let seed_standings = load_seed_standings(&dir.join(STANDINGS_FILE))?;
    let schedule = Schedule::load(&dir.join(SCHEDULE_FILE))?;

    info!(
        "loaded snapshot: {} game rows, {} player rows, {} standings rows, {} schedule weeks",
        games.len(),
        players.len(),
        seed_standings.len(),
        schedule.week_count(),
    );

    Ok(Snapshot {
        games,
        players,
        seed_standings,
        schedule,
    })
}

pub fn load_games(path: &Path) -> Result<Vec<GameRecord>, DataError> {
    rows_from_reader(open_csv(path)?, &path.display().to_string())
}

pub fn load_players(path: &Path) -> Result<Vec<PlayerWeekRecord>, DataError> {
    rows_from_reader(open_csv(path)?, &path.display().to_string())
}

pub fn load_seed_standings(path: &Path) -> Result<Vec<SeedStandingsRow>, DataError> {
    rows_from_reader(open_csv(path)?, &path.display().to_string())
}

fn open_csv(path: &Path) -> Result<csv::Reader<std::fs::File>, DataError> {
    csv::Reader::from_path(path).map_err(|source| DataError::Csv {
        path: path.display().to_string(),
        source,
    })
}

// Generic over the reader so tests can feed byte slices instead of files.
pub fn rows_from_reader<T, R>(mut reader: csv::Reader<R>, origin: &str) -> Result<Vec<T>, DataError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut rows = Vec::new();

    for (idx, record) in reader.deserialize::<T>().enumerate() {
        match record {
            Ok(row) => rows.push(row),
            // Header is line 1, so the first data row is line 2
            Err(err) => warn!("{origin}: dropping row at line {}: {err}", idx + 2),
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(data: &str) -> csv::Reader<&[u8]> {
        csv::Reader::from_reader(data.as_bytes())
    }

    #[test]
    fn parses_game_rows() {
        let csv = "Week,Team,Score,Opponent,Result\n\
                   1,Alpha,112.5,Bravo,Win\n\
                   1,Bravo,98.2,Alpha,Loss\n";

        let games: Vec<GameRecord> = rows_from_reader(reader(csv), "test").unwrap();

        assert_eq!(games.len(), 2);
        assert_eq!(games[0].team, "Alpha");
        assert_eq!(games[0].score, 112.5);
        assert_eq!(games[0].result, GameResult::Win);
        assert_eq!(games[1].result, GameResult::Loss);
    }

    #[test]
    fn malformed_rows_are_dropped_not_fatal() {
        let csv = "Week,Team,Score,Opponent,Result\n\
                   1,Alpha,112.5,Bravo,Win\n\
                   1,Bravo,not-a-number,Alpha,Loss\n\
                   2,Alpha,99.0,Charlie,Forfeit\n\
                   2,Charlie,101.3,Alpha,Win\n";

        let games: Vec<GameRecord> = rows_from_reader(reader(csv), "test").unwrap();

        // Bad score and unknown result string both skipped
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].team, "Alpha");
        assert_eq!(games[1].team, "Charlie");
    }

    #[test]
    fn empty_file_yields_empty_vec() {
        let csv = "Week,Team,Score,Opponent,Result\n";
        let games: Vec<GameRecord> = rows_from_reader(reader(csv), "test").unwrap();
        assert!(games.is_empty());
    }

    #[test]
    fn parses_seed_standings_columns() {
        let csv = "Rank,Team,Win/Loss Record,Top 6 Record,Overall Record,Points For,Points Against,Average Points For,Average Points Against,Point Differential,WIN COUNT,LOSS COUNT\n\
                   1,Alpha,4-1,3-2,7-3,620.4,580.1,124.08,116.02,40.3,7,3\n";

        let rows: Vec<SeedStandingsRow> = rows_from_reader(reader(csv), "test").unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.team, "Alpha");
        assert_eq!(row.overall_record, "7-3");
        assert_eq!(row.top_six_record, "3-2");
        assert_eq!(row.points_for, 620.4);
        assert_eq!(row.win_count, 7);
        assert_eq!(row.loss_count, 3);
    }

    #[test]
    fn player_rows_keep_position_suffixes() {
        let csv = "Week,Team,Player,Score,Position\n\
                   3,Alpha,J. Allen,24.1,QB\n\
                   3,Alpha,B. Robinson,18.2,RB1\n";

        let players: Vec<PlayerWeekRecord> = rows_from_reader(reader(csv), "test").unwrap();

        assert_eq!(players[1].position, "RB1");
        assert_eq!(players[1].score, 18.2);
    }
}
