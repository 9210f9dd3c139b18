use std::process::ExitCode;

use rail_diagram::Railway;
use rail_diagram::config::DiagramConfig;
use rail_diagram::railway::Diagnostic;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: rail-diagram <railway.json>");
        return ExitCode::from(2);
    };

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut rail = match Railway::from_json_file_with(&path, &mut diagnostics) {
        Ok(rail) => rail,
        Err(e) => {
            eprintln!("Failed to load {path}: {e}");
            return ExitCode::FAILURE;
        }
    };
    for diagnostic in diagnostics.drain(..) {
        eprintln!("warning: {diagnostic}");
    }

    let height = rail.cal_station_y_value_with(&DiagramConfig::default(), &mut diagnostics);
    for diagnostic in &diagnostics {
        eprintln!("warning: {diagnostic}");
    }

    print!("{}", rail.station_table());
    println!();
    print!("{}", rail.interval_table());
    println!();
    match rail.ordinate() {
        Some(ruler) => println!("Ordinate: {}", ruler.name()),
        None => println!("Ordinate: mileage"),
    }
    println!("Diagram height: {height:.1}");
    ExitCode::SUCCESS
}
