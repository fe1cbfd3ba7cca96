use fast_dbscan::config::load_config;
use fast_dbscan::io::{read_points_csv, write_json_file, write_labeled_csv};
use fast_dbscan::Dbscan;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let table = read_points_csv(&config.input)?;
    let points = table.as_points()?;
    let (result, report) = Dbscan::new(config.params)
        .fit_with_report(points)
        .map_err(|e| e.to_string())?;

    println!("{}", report.summary());

    if let Some(path) = &config.output.labels_csv {
        write_labeled_csv(path, &table, &result.one_based_labels())?;
        println!("Saved {} labeled points to {}", table.len(), path.display());
    }
    if let Some(path) = &config.output.report_json {
        write_json_file(path, &report)?;
        println!("Saved run report to {}", path.display());
    }

    Ok(())
}

fn usage() -> String {
    "Usage: dbscan_tool <config.json>".to_string()
}
