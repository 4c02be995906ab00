use std::collections::BTreeMap;

use crate::data_loader::PlayerWeekRecord;
use crate::lineup::best_lineup_for_week;
use crate::standings::StandingsRow;
use crate::weekly_scores::{top_six_for_week, TeamWeekScore};

// Plain-text dump of the computed season for the CLI. The web dashboard
// consumes the JSON payload instead.

pub fn output_report(
    standings: &[StandingsRow],
    weekly_scores: &BTreeMap<u32, Vec<TeamWeekScore>>,
    players: &[PlayerWeekRecord],
) {
    println!("{0:4} | {1:20} | {2:7} | {3:8} | {4:8} | {5:6}",
        "Rank", "Team", "Overall", "PF", "PA", "Diff",
    );

    for row in standings {
        println!("|{0:3}. | {1:20} | {2:7} | {3:8.1} | {4:8.1} | {5:6.1}",
            row.rank,
            row.team,
            row.overall_record,
            row.points_for,
            row.points_against,
            row.point_differential,
        );
    }

    let Some((&week, scores)) = weekly_scores.iter().next_back() else {
        return;
    };

    println!();
    println!("Top 6, week {week}:");
    for (i, score) in top_six_for_week(scores).iter().enumerate() {
        println!("|{0:3}. | {1:20} | {2:6.2}", i + 1, score.team, score.total_score);
    }

    let lineup = best_lineup_for_week(week, players);
    println!();
    println!("Best lineup, week {week} (total {0:.2}):", lineup.total_score);

    let slots = ["QB", "RB1", "RB2", "WR1", "WR2", "DEF", "K", "FLEX"];
    for (name, slot) in slots.iter().zip(lineup.slots()) {
        match slot {
            Some(player) => {
                println!("{0:4} | {1:25} | {2:6.2}", name, player.player, player.score)
            }
            None => println!("{0:4} | {1:25} |   --", name, "(empty)"),
        }
    }
}
