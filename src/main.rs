use std::env;
use std::path::Path;
use std::process::ExitCode;

use fantasy_stats::report::output_report;
use fantasy_stats::{build_dashboard, SnapshotCache};

/*
    Usage: fantasy_stats [data-dir] [--json]

    data-dir defaults to ./data and must hold the four season CSVs
    (teams_data, players_data, standings_data, team_schedule). --json prints
    the combined dashboard payload instead of the text report.
*/

fn main() -> ExitCode {
    env_logger::init();

    let mut data_dir = "./data".to_string();
    let mut as_json = false;

    for arg in env::args().skip(1) {
        if arg == "--json" {
            as_json = true;
        } else {
            data_dir = arg;
        }
    }

    let mut cache = SnapshotCache::new();
    let snapshot = match cache.refresh(Path::new(&data_dir)) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            eprintln!("failed to load season data: {err}");
            return ExitCode::FAILURE;
        }
    };

    let dashboard = match build_dashboard(snapshot) {
        Ok(dashboard) => dashboard,
        Err(err) => {
            eprintln!("failed to compute season stats: {err}");
            return ExitCode::FAILURE;
        }
    };

    if as_json {
        match serde_json::to_string_pretty(&dashboard) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("failed to serialize payload: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        output_report(&dashboard.standings, &dashboard.weekly_scores, &dashboard.players);
    }

    ExitCode::SUCCESS
}
