use std::path::Path;
use std::time::SystemTime;

use log::{debug, info};

use crate::data_loader::{load_snapshot, Snapshot};
use crate::error::DataError;

// Holds the most recently loaded snapshot so repeated renders don't re-read
// the CSVs. There is no expiry: the caller decides when to `refresh` or
// `invalidate`, and `get` never loads on its own. The computations themselves
// take a `&Snapshot` and know nothing about this type.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    snapshot: Option<Snapshot>,
    last_updated: Option<SystemTime>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&Snapshot> {
        if self.snapshot.is_some() {
            debug!("snapshot cache hit");
        }
        self.snapshot.as_ref()
    }

    pub fn last_updated(&self) -> Option<SystemTime> {
        self.last_updated
    }

    /// Reloads from `dir`, replacing whatever was cached. Failure leaves the
    /// previous snapshot in place.
    pub fn refresh(&mut self, dir: &Path) -> Result<&Snapshot, DataError> {
        let snapshot = load_snapshot(dir)?;
        info!("snapshot cache refreshed from {}", dir.display());

        self.last_updated = Some(SystemTime::now());
        Ok(self.snapshot.insert(snapshot))
    }

    pub fn invalidate(&mut self) {
        self.snapshot = None;
        self.last_updated = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_sample_data(dir: &Path) {
        fs::write(
            dir.join(crate::data_loader::TEAMS_FILE),
            "Week,Team,Score,Opponent,Result\n1,Alpha,120.5,Bravo,Win\n1,Bravo,98.2,Alpha,Loss\n",
        )
        .unwrap();
        fs::write(
            dir.join(crate::data_loader::PLAYERS_FILE),
            "Week,Team,Player,Score,Position\n1,Alpha,J. Allen,24.1,QB\n",
        )
        .unwrap();
        fs::write(
            dir.join(crate::data_loader::STANDINGS_FILE),
            "Rank,Team,Win/Loss Record,Top 6 Record,Overall Record,Points For,Points Against,Average Points For,Average Points Against,Point Differential,WIN COUNT,LOSS COUNT\n\
             1,Alpha,1-0,1-0,1-0,120.5,98.2,120.5,98.2,22.3,1,0\n",
        )
        .unwrap();
        fs::write(
            dir.join(crate::data_loader::SCHEDULE_FILE),
            "Week,Alpha\n1,Bravo\n2,Charlie\n",
        )
        .unwrap();
    }

    #[test]
    fn starts_empty_until_refreshed() {
        let cache = SnapshotCache::new();
        assert!(cache.get().is_none());
        assert!(cache.last_updated().is_none());
    }

    #[test]
    fn refresh_loads_and_get_returns_the_same_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        write_sample_data(dir.path());

        let mut cache = SnapshotCache::new();
        let snapshot = cache.refresh(dir.path()).unwrap();
        assert_eq!(snapshot.games.len(), 2);

        let cached = cache.get().unwrap();
        assert_eq!(cached.games.len(), 2);
        assert_eq!(cached.players.len(), 1);
        assert_eq!(cached.seed_standings.len(), 1);
        assert!(cache.last_updated().is_some());
    }

    #[test]
    fn invalidate_clears_everything() {
        let dir = tempfile::tempdir().unwrap();
        write_sample_data(dir.path());

        let mut cache = SnapshotCache::new();
        cache.refresh(dir.path()).unwrap();
        cache.invalidate();

        assert!(cache.get().is_none());
        assert!(cache.last_updated().is_none());
    }

    #[test]
    fn failed_refresh_keeps_the_old_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        write_sample_data(dir.path());

        let mut cache = SnapshotCache::new();
        cache.refresh(dir.path()).unwrap();

        let missing = dir.path().join("nowhere");
        assert!(cache.refresh(&missing).is_err());
        assert!(cache.get().is_some());
    }
}
