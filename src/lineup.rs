use serde::Serialize;

use crate::data_loader::PlayerWeekRecord;

// Best possible starting lineup for one week across the whole league. The
// selection is deliberately greedy, slot by slot in a fixed order (QB, RB1,
// RB2, WR1, WR2, DEF, K, FLEX): each slot takes the highest-scoring player
// still available at its base position, and only the FLEX pool is affected by
// earlier picks. Downstream numbers are built on this exact policy, so it
// must not be replaced with a true optimal assignment.

#[derive(Serialize, Debug, Clone, Default)]
pub struct Lineup {
    #[serde(rename = "QB")]
    pub qb: Option<PlayerWeekRecord>,
    #[serde(rename = "RB1")]
    pub rb1: Option<PlayerWeekRecord>,
    #[serde(rename = "RB2")]
    pub rb2: Option<PlayerWeekRecord>,
    #[serde(rename = "WR1")]
    pub wr1: Option<PlayerWeekRecord>,
    #[serde(rename = "WR2")]
    pub wr2: Option<PlayerWeekRecord>,
    #[serde(rename = "DEF")]
    pub def: Option<PlayerWeekRecord>,
    #[serde(rename = "K")]
    pub kicker: Option<PlayerWeekRecord>,
    #[serde(rename = "FLEX")]
    pub flex: Option<PlayerWeekRecord>,
    #[serde(rename = "totalScore")]
    pub total_score: f64,
}

impl Lineup {
    pub fn slots(&self) -> [&Option<PlayerWeekRecord>; 8] {
        [
            &self.qb, &self.rb1, &self.rb2, &self.wr1, &self.wr2, &self.def, &self.kicker,
            &self.flex,
        ]
    }
}

pub fn best_lineup_for_week(week: u32, players: &[PlayerWeekRecord]) -> Lineup {
    let pool: Vec<&PlayerWeekRecord> = players.iter().filter(|p| p.week == week).collect();

    let quarterbacks = by_base_position(&pool, "QB");
    let running_backs = by_base_position(&pool, "RB");
    let receivers = by_base_position(&pool, "WR");
    let defenses = by_base_position(&pool, "DEF");
    let kickers = by_base_position(&pool, "K");
    let tight_ends = by_base_position(&pool, "TE");

    // FLEX draws from whatever RB/WR the dedicated slots didn't take, plus
    // every tight end, since no dedicated slot consumes those
    let mut flex_pool: Vec<&PlayerWeekRecord> = Vec::new();
    flex_pool.extend(running_backs.iter().skip(2));
    flex_pool.extend(receivers.iter().skip(2));
    flex_pool.extend(tight_ends.iter());
    flex_pool.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut lineup = Lineup {
        qb: pick(&quarterbacks, 0),
        rb1: pick(&running_backs, 0),
        rb2: pick(&running_backs, 1),
        wr1: pick(&receivers, 0),
        wr2: pick(&receivers, 1),
        def: pick(&defenses, 0),
        kicker: pick(&kickers, 0),
        flex: pick(&flex_pool, 0),
        total_score: 0.0,
    };

    lineup.total_score = lineup
        .slots()
        .iter()
        .filter_map(|slot| slot.as_ref())
        .map(|p| p.score)
        .sum();

    lineup
}

// Everyone whose position string contains the base position, best score
// first. Substring matching folds "RB1"/"RB2" into the RB pool.
fn by_base_position<'a>(pool: &[&'a PlayerWeekRecord], base: &str) -> Vec<&'a PlayerWeekRecord> {
    let mut matching: Vec<&PlayerWeekRecord> = pool
        .iter()
        .copied()
        .filter(|p| p.position.to_uppercase().contains(base))
        .collect();

    matching.sort_by(|a, b| b.score.total_cmp(&a.score));
    matching
}

fn pick(ranked: &[&PlayerWeekRecord], index: usize) -> Option<PlayerWeekRecord> {
    ranked.get(index).map(|p| (*p).clone())
}
