use thiserror::Error;

// Dropped rows (bad numerics, unknown result strings) are a logging concern,
// not an error value. The only per-row condition that aborts a whole
// computation is an overall record that can't be split into wins/losses,
// since a ranking missing a comparison key would be silently wrong.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("team {team} has unrankable overall record {record:?}, expected \"<wins>-<losses>\"")]
    UnrankableRow { team: String, record: String },
}
