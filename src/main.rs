use fast_dbscan::io::{format_labeled_csv, read_points_csv};
use fast_dbscan::{Dbscan, DbscanParams};
use std::env;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        return Err(usage(args.first().map(String::as_str).unwrap_or("fast_dbscan")));
    }

    let eps: f32 = parse_arg("epsilon", &args[2])?;
    let min_samples: i64 = parse_arg("min_points", &args[3])?;
    let table = read_points_csv(Path::new(&args[1]))?;

    let params = DbscanParams::from_raw(eps, min_samples).map_err(|e| e.to_string())?;
    let points = table.as_points()?;
    let result = Dbscan::new(params)
        .fit(points)
        .map_err(|e| e.to_string())?;

    print!("{}", format_labeled_csv(&table, &result.one_based_labels()));
    Ok(())
}

/// `main` adds the `Error:` prefix, so messages start with the argument name.
fn parse_arg<T>(name: &str, raw: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse()
        .map_err(|e| format!("invalid {name} '{raw}': {e}"))
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <csv file> <epsilon> <min_points>\n\n\
         Input file format: CSV with one point per line (e.g. x,y or x,y,z)\n\
         Output: input coordinates + cluster label (0 = noise)"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_errors_name_the_argument_once() {
        let err = parse_arg::<f32>("epsilon", "abc").unwrap_err();
        assert!(err.starts_with("invalid epsilon 'abc'"), "{err}");
        assert!(!err.contains("Error"), "{err}");
        assert_eq!(parse_arg::<i64>("min_points", "4"), Ok(4));
    }
}
