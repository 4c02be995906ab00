use std::collections::HashMap;

use serde::Serialize;

use crate::data_loader::SeedStandingsRow;
use crate::error::DataError;
use crate::head_to_head::HeadToHead;

// The standings ranker. Takes the sheet's cumulative per-team rows plus the
// head-to-head matrix and produces the season order. Tiebreak criteria, in
// strict priority:
//
//   1. overall wins, descending
//   2. overall losses, ascending
//   3. head-to-head wins between the two rows, descending
//   4. points for, descending
//
// The sort is stable, so rows equal on all four keys keep their input order
// and repeated runs reproduce the same ranking. Ranks are assigned after the
// sort as 1..N with no gaps and no shared ranks, and nothing else is allowed
// to touch them afterwards.

#[derive(Serialize, Debug, Clone)]
pub struct StandingsRow {
    #[serde(rename = "Rank")]
    pub rank: u32,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Win/Loss Record")]
    pub win_loss_record: String,
    #[serde(rename = "Top 6 Record")]
    pub top_six_record: String,
    #[serde(rename = "Overall Record")]
    pub overall_record: String,
    #[serde(rename = "Points For")]
    pub points_for: f64,
    #[serde(rename = "Points Against")]
    pub points_against: f64,
    #[serde(rename = "Average Points For")]
    pub avg_points_for: f64,
    #[serde(rename = "Average Points Against")]
    pub avg_points_against: f64,
    #[serde(rename = "Point Differential")]
    pub point_differential: f64,
    #[serde(rename = "WIN COUNT")]
    pub win_count: u32,
    #[serde(rename = "LOSS COUNT")]
    pub loss_count: u32,
    /// This team's row of the head-to-head matrix.
    #[serde(rename = "Head-to-Head")]
    pub head_to_head: HashMap<String, u32>,
    #[serde(skip)]
    pub overall_wins: u32,
    #[serde(skip)]
    pub overall_losses: u32,
}

pub fn compute_standings(
    seed_rows: &[SeedStandingsRow],
    head_to_head: &HeadToHead,
) -> Result<Vec<StandingsRow>, DataError> {
    let mut rows = Vec::with_capacity(seed_rows.len());

    // An overall record that can't be parsed poisons every comparison it
    // would take part in, so it fails the whole computation up front rather
    // than silently ranking the team 0-0.
    for seed in seed_rows {
        let (overall_wins, overall_losses) =
            parse_overall_record(&seed.team, &seed.overall_record)?;

        rows.push(StandingsRow {
            rank: seed.rank,
            team: seed.team.clone(),
            win_loss_record: seed.win_loss_record.clone(),
            top_six_record: seed.top_six_record.clone(),
            overall_record: seed.overall_record.clone(),
            points_for: seed.points_for,
            points_against: seed.points_against,
            avg_points_for: seed.avg_points_for,
            avg_points_against: seed.avg_points_against,
            point_differential: seed.point_differential,
            win_count: seed.win_count,
            loss_count: seed.loss_count,
            head_to_head: head_to_head.get(&seed.team).cloned().unwrap_or_default(),
            overall_wins,
            overall_losses,
        });
    }

    rows.sort_by(|a, b| {
        b.overall_wins
            .cmp(&a.overall_wins)
            .then(a.overall_losses.cmp(&b.overall_losses))
            .then_with(|| {
                let a_wins_vs_b = a.head_to_head.get(&b.team).copied().unwrap_or(0);
                let b_wins_vs_a = b.head_to_head.get(&a.team).copied().unwrap_or(0);
                b_wins_vs_a.cmp(&a_wins_vs_b)
            })
            .then_with(|| b.points_for.total_cmp(&a.points_for))
    });

    for (position, row) in rows.iter_mut().enumerate() {
        row.rank = position as u32 + 1;
    }

    Ok(rows)
}

// "7-3" -> (7, 3). Extra segments beyond the first two are ignored, matching
// how the sheet occasionally appends a tie count.
fn parse_overall_record(team: &str, record: &str) -> Result<(u32, u32), DataError> {
    let unrankable = || DataError::UnrankableRow {
        team: team.to_string(),
        record: record.to_string(),
    };

    let mut parts = record.split('-');
    let wins = parts.next().ok_or_else(unrankable)?;
    let losses = parts.next().ok_or_else(unrankable)?;

    let wins = wins.trim().parse().map_err(|_| unrankable())?;
    let losses = losses.trim().parse().map_err(|_| unrankable())?;

    Ok((wins, losses))
}
