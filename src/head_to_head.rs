use std::collections::HashMap;

use crate::data_loader::{GameRecord, GameResult};

/// Directed win counts: `matrix[a][b]` is how many times `a` beat `b`.
pub type HeadToHead = HashMap<String, HashMap<String, u32>>;

// Every team mentioned in a game gets an outer entry even with zero wins, so
// downstream lookups never have to distinguish "never played" from "never
// won". Ties credit neither side. Each row counts only the side it describes,
// which means a game whose mirror row is missing still contributes its one
// half of the matrix.
pub fn compute_head_to_head(games: &[GameRecord]) -> HeadToHead {
    let mut matrix: HeadToHead = HashMap::new();

    for game in games {
        matrix.entry(game.team.clone()).or_default();
        matrix.entry(game.opponent.clone()).or_default();

        let (winner, loser) = match game.result {
            GameResult::Win => (&game.team, &game.opponent),
            GameResult::Loss => (&game.opponent, &game.team),
            GameResult::Tie => continue,
        };

        *matrix
            .entry(winner.clone())
            .or_default()
            .entry(loser.clone())
            .or_insert(0) += 1;
    }

    matrix
}
