use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::data_loader::PlayerWeekRecord;

/// Roster slot whose best score doubles as the weekly tiebreak stat.
pub const TIEBREAK_POSITION: &str = "RB1";

/// Slots the league starts each week, in sheet column order.
pub const LINEUP_POSITIONS: [&str; 8] = ["QB", "RB1", "RB2", "WR1", "WR2", "Flex", "K", "DEF"];

const TOP_N: usize = 6;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TeamWeekScore {
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Score")]
    pub total_score: f64,
    #[serde(rename = "RB1Score")]
    pub tiebreak_score: f64,
}

// Groups player rows into per-week team totals. The tiebreak stat is the best
// score among the team's rows at the tiebreak position that week, 0 when the
// team fielded nobody there. Grouping is insertion-order independent; the
// order of teams within a week is not part of the contract and consumers
// re-sort.
pub fn compute_weekly_scores(players: &[PlayerWeekRecord]) -> BTreeMap<u32, Vec<TeamWeekScore>> {
    let mut weeks: BTreeMap<u32, BTreeMap<String, TeamWeekScore>> = BTreeMap::new();

    for record in players {
        let entry = weeks
            .entry(record.week)
            .or_default()
            .entry(record.team.clone())
            .or_insert_with(|| TeamWeekScore {
                team: record.team.clone(),
                total_score: 0.0,
                tiebreak_score: 0.0,
            });

        entry.total_score += record.score;

        if record.position == TIEBREAK_POSITION && record.score > entry.tiebreak_score {
            entry.tiebreak_score = record.score;
        }
    }

    weeks
        .into_iter()
        .map(|(week, teams)| (week, teams.into_values().collect()))
        .collect()
}

/// Top six teams of one week: total score descending, tiebreak stat breaking
/// exact total ties. Fewer than six teams returns all of them.
pub fn top_six_for_week(scores: &[TeamWeekScore]) -> Vec<TeamWeekScore> {
    let mut ranked = scores.to_vec();

    ranked.sort_by(|a, b| {
        b.total_score
            .total_cmp(&a.total_score)
            .then(b.tiebreak_score.total_cmp(&a.tiebreak_score))
    });

    ranked.truncate(TOP_N);
    ranked
}

#[derive(Serialize, Debug, Clone)]
pub struct PositionAverage {
    pub position: String,
    /// Mean score per team at this position, 0 for teams with no rows there.
    pub averages: BTreeMap<String, f64>,
}

// Season-long per-position averages, one entry per starting slot. Matching is
// by exact position string since the slots themselves are what's compared.
pub fn position_averages(players: &[PlayerWeekRecord]) -> Vec<PositionAverage> {
    let mut scores: BTreeMap<(&str, &str), Vec<f64>> = BTreeMap::new();
    let mut teams: BTreeSet<&str> = BTreeSet::new();

    for record in players {
        teams.insert(&record.team);
        scores
            .entry((&record.team, &record.position))
            .or_default()
            .push(record.score);
    }

    LINEUP_POSITIONS
        .iter()
        .map(|&position| {
            let averages = teams
                .iter()
                .map(|&team| {
                    let avg = match scores.get(&(team, position)) {
                        Some(values) if !values.is_empty() => {
                            values.iter().sum::<f64>() / values.len() as f64
                        }
                        _ => 0.0,
                    };
                    (team.to_string(), avg)
                })
                .collect();

            PositionAverage {
                position: position.to_string(),
                averages,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn player(week: u32, team: &str, position: &str, score: f64) -> PlayerWeekRecord {
        PlayerWeekRecord {
            week,
            team: team.to_string(),
            player: format!("{team} {position}"),
            score,
            position: position.to_string(),
        }
    }

    fn week_scores(scores: &BTreeMap<u32, Vec<TeamWeekScore>>, week: u32, team: &str) -> TeamWeekScore {
        scores[&week]
            .iter()
            .find(|s| s.team == team)
            .cloned()
            .unwrap()
    }

    #[test]
    fn totals_sum_all_players_in_the_week() {
        let players = vec![
            player(1, "Alpha", "QB", 20.0),
            player(1, "Alpha", "RB1", 12.5),
            player(1, "Alpha", "WR1", 8.0),
            player(2, "Alpha", "QB", 30.0),
        ];

        let scores = compute_weekly_scores(&players);

        assert_eq!(week_scores(&scores, 1, "Alpha").total_score, 40.5);
        assert_eq!(week_scores(&scores, 2, "Alpha").total_score, 30.0);
    }

    #[test]
    fn tiebreak_stat_is_best_rb1_score() {
        let players = vec![
            player(1, "Alpha", "RB1", 12.5),
            player(1, "Alpha", "RB1", 18.2),
            player(1, "Alpha", "RB2", 25.0),
        ];

        let scores = compute_weekly_scores(&players);

        // RB2 doesn't count, and the larger of the two RB1 rows wins
        assert_eq!(week_scores(&scores, 1, "Alpha").tiebreak_score, 18.2);
    }

    #[test]
    fn no_rb1_row_means_zero_tiebreak() {
        let players = vec![player(1, "Alpha", "QB", 20.0)];
        let scores = compute_weekly_scores(&players);
        assert_eq!(week_scores(&scores, 1, "Alpha").tiebreak_score, 0.0);
    }

    #[test]
    fn grouping_ignores_insertion_order() {
        let mut players = vec![
            player(1, "Alpha", "QB", 20.0),
            player(1, "Bravo", "QB", 18.0),
            player(1, "Alpha", "RB1", 11.0),
            player(2, "Bravo", "RB1", 9.5),
            player(2, "Alpha", "WR2", 4.0),
        ];

        let baseline = compute_weekly_scores(&players);

        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10 {
            players.shuffle(&mut rng);
            assert_eq!(compute_weekly_scores(&players), baseline);
        }
    }

    fn score(team: &str, total: f64, tiebreak: f64) -> TeamWeekScore {
        TeamWeekScore {
            team: team.to_string(),
            total_score: total,
            tiebreak_score: tiebreak,
        }
    }

    #[test]
    fn top_six_caps_at_six() {
        let scores: Vec<TeamWeekScore> = (0..10)
            .map(|i| score(&format!("Team{i}"), 100.0 + i as f64, 0.0))
            .collect();

        let top = top_six_for_week(&scores);

        assert_eq!(top.len(), 6);
        assert_eq!(top[0].team, "Team9");
        assert_eq!(top[5].team, "Team4");
    }

    #[test]
    fn fewer_than_six_returns_all_without_padding() {
        let scores = vec![score("Alpha", 120.0, 0.0), score("Bravo", 90.0, 0.0)];
        let top = top_six_for_week(&scores);
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn equal_totals_fall_back_to_tiebreak_stat() {
        let scores = vec![score("Alpha", 142.5, 18.2), score("Bravo", 142.5, 20.1)];

        let top = top_six_for_week(&scores);

        assert_eq!(top[0].team, "Bravo");
        assert_eq!(top[1].team, "Alpha");
    }

    #[test]
    fn no_excluded_team_dominates_an_included_one() {
        let mut rng = StdRng::seed_from_u64(23);
        let scores: Vec<TeamWeekScore> = (0..12)
            .map(|i| {
                score(
                    &format!("Team{i}"),
                    rng.random_range(60.0..160.0),
                    rng.random_range(0.0..30.0),
                )
            })
            .collect();

        let top = top_six_for_week(&scores);
        let included: Vec<&str> = top.iter().map(|s| s.team.as_str()).collect();

        for excluded in scores.iter().filter(|s| !included.contains(&s.team.as_str())) {
            for kept in &top {
                let dominates = excluded.total_score > kept.total_score
                    || (excluded.total_score == kept.total_score
                        && excluded.tiebreak_score > kept.tiebreak_score);
                assert!(!dominates, "{} should have made the cut", excluded.team);
            }
        }
    }

    #[test]
    fn position_averages_cover_every_slot_and_team() {
        let players = vec![
            player(1, "Alpha", "QB", 20.0),
            player(2, "Alpha", "QB", 10.0),
            player(1, "Bravo", "RB1", 14.0),
        ];

        let averages = position_averages(&players);

        assert_eq!(averages.len(), LINEUP_POSITIONS.len());

        let qb = averages.iter().find(|p| p.position == "QB").unwrap();
        assert_eq!(qb.averages["Alpha"], 15.0);
        // Bravo never fielded a QB row
        assert_eq!(qb.averages["Bravo"], 0.0);
    }
}
