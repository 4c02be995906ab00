use std::io::Read;
use std::path::Path;

use log::warn;
use serde::Serialize;

use crate::error::DataError;

// The schedule sheet is one row per week: a "Week" column, then team-name
// columns whose cell value is that team's opponent. Column order matters.
// Opponent lookup scans pairings left to right and the first pairing that
// mentions the team wins, so the pairings are kept as an ordered sequence
// rather than a map.

#[derive(Serialize, Debug, Clone)]
pub struct SchedulePairing {
    pub team: String,
    pub opponent: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct ScheduleWeek {
    pub week: u32,
    pub pairings: Vec<SchedulePairing>,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct Schedule {
    weeks: Vec<ScheduleWeek>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opponent {
    Team(String),
    Bye,
    SeasonOver,
}

impl Schedule {
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let reader = csv::Reader::from_path(path).map_err(|source| DataError::Csv {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_reader(reader, &path.display().to_string())
    }

    pub fn from_reader<R: Read>(
        mut reader: csv::Reader<R>,
        origin: &str,
    ) -> Result<Self, DataError> {
        let headers = reader
            .headers()
            .map_err(|source| DataError::Csv {
                path: origin.to_string(),
                source,
            })?
            .clone();

        let week_col = headers.iter().position(|h| h == "Week");

        let mut weeks = Vec::new();

        for (idx, record) in reader.records().enumerate() {
            let record = match record {
                Ok(r) => r,
                Err(err) => {
                    warn!("{origin}: dropping schedule row at line {}: {err}", idx + 2);
                    continue;
                }
            };

            let Some(week_col) = week_col else {
                warn!("{origin}: no Week column, schedule is empty");
                break;
            };

            let week: u32 = match record.get(week_col).map(str::trim) {
                Some(cell) => match cell.parse() {
                    Ok(week) => week,
                    Err(_) => {
                        warn!(
                            "{origin}: dropping schedule row at line {}: bad week {cell:?}",
                            idx + 2
                        );
                        continue;
                    }
                },
                None => continue,
            };

            let mut pairings = Vec::new();
            for (col, cell) in record.iter().enumerate() {
                if col == week_col {
                    continue;
                }
                let Some(team) = headers.get(col) else {
                    continue;
                };
                let opponent = cell.trim();
                if team.is_empty() || opponent.is_empty() {
                    continue;
                }
                pairings.push(SchedulePairing {
                    team: team.to_string(),
                    opponent: opponent.to_string(),
                });
            }

            weeks.push(ScheduleWeek { week, pairings });
        }

        Ok(Self { weeks })
    }

    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    pub fn weeks(&self) -> &[ScheduleWeek] {
        &self.weeks
    }

    /// Scheduled opponent for the week after `completed_week`. `Bye` means
    /// the week exists but no pairing mentions the team; `SeasonOver` means
    /// there is no such week in the schedule at all.
    pub fn opponent_for(&self, team: &str, completed_week: u32) -> Opponent {
        let next_week = completed_week + 1;

        let Some(week) = self.weeks.iter().find(|w| w.week == next_week) else {
            return Opponent::SeasonOver;
        };

        for pairing in &week.pairings {
            if pairing.team == team {
                return Opponent::Team(pairing.opponent.clone());
            }
            if pairing.opponent == team {
                return Opponent::Team(pairing.team.clone());
            }
        }

        Opponent::Bye
    }
}
