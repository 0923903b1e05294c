use colored::Colorize;
use log::{error, info};
use std::io;
use std::process::ExitCode;

use fermifab::fermi::FermiMap;
use fermifab::parse::configuration::parse_configuration;
use fermifab::parse::table::write_coordinate_table;

const USAGE: &str = "Usage: fermifab <configuration.csv> [--one-based]";

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let path = match args.iter().find(|a| !a.starts_with("--")) {
        Some(p) => p,
        None => {
            eprintln!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    };
    let one_based = args.iter().any(|a| a == "--one-based");

    let config = match parse_configuration(path) {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            eprintln!("{} {}", "error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };
    info!(
        "Configuration orbitals = {:?}, particles = {:?}",
        config.orbitals(),
        config.particles()
    );

    let map = match FermiMap::build(&config) {
        Ok(m) => m,
        Err(e) => {
            error!("{}", e);
            eprintln!("{} {}", "error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = write_coordinate_table(&map, one_based, io::stdout().lock()) {
        eprintln!("{} {}", "error:".red().bold(), e);
        return ExitCode::FAILURE;
    }

    eprintln!(
        "{} {} states, {} particles in {} orbitals over {} blocks",
        "done:".green().bold(),
        map.len(),
        config.total_particles(),
        config.total_orbitals(),
        config.n_blocks()
    );
    ExitCode::SUCCESS
}
