use csv::{Reader, StringRecord};
use derive_more::{Constructor, Error};
use log::{error, warn};
use std::fmt;
use std::fs::File;
use std::path::Path;

use crate::config::{Block, Configuration};
use crate::error::FermiError;

/// Parse a block configuration
/// # Arguments
/// * __`fp`__ - File path to the definition file, in csv format. The header
/// is `orbitals,particles` and every following line is a block, lowest
/// orbitals first.
pub fn parse_configuration<P: AsRef<Path>>(fp: P) -> Result<Configuration> {
    let file = File::open(fp.as_ref())?;
    let mut reader = Reader::from_reader(file);
    let headers = reader.headers()?.clone();
    if headers.len() != 2
        || headers.get(0).map(str::trim) != Some("orbitals")
        || headers.get(1).map(str::trim) != Some("particles")
    {
        warn!("Unexpected header {:?} in {}", headers, fp.as_ref().display());
        return Err(ConfigurationParseError::new(
            "Expected header orbitals,particles.".to_owned(),
        ));
    }

    let mut blocks: Vec<Block> = Vec::new();
    for (k, result) in reader.records().enumerate() {
        let rec = result?;
        // Should have 2 column.
        if rec.len() != 2 {
            error!("Error at line {} in configuration, invalid number of elements.", k);
            return Err(ConfigurationParseError::new(
                "Invalid number of argument on a line.".to_owned(),
            ));
        }
        let orbitals = parse_single_elem(&rec, 0, k)?;
        let particles = parse_single_elem(&rec, 1, k)?;
        blocks.push(Block::new(orbitals, particles));
    }
    Ok(Configuration::from_blocks(blocks)?)
}

fn parse_single_elem(line: &StringRecord, col: usize, l: usize) -> Result<usize> {
    let field = line.get(col).unwrap_or("");
    match field.trim().parse::<usize>() {
        Ok(v) => Ok(v),
        Err(err) => {
            error!(
                "Expected non-negative integer in configuration at line {}, col {}",
                l, col
            );
            Err(ConfigurationParseError::from(err))
        }
    }
}

type Result<T> = std::result::Result<T, ConfigurationParseError>;

/// Error in the configuration file.
#[derive(Debug, Clone, Error, Constructor)]
pub struct ConfigurationParseError {
    pub details: String,
}

impl fmt::Display for ConfigurationParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Parsing error encountered in configuration: {}", self.details)
    }
}

impl From<std::num::ParseIntError> for ConfigurationParseError {
    fn from(err: std::num::ParseIntError) -> Self {
        ConfigurationParseError::new(format!("Expected to parse an integer, {}.", err))
    }
}

impl From<csv::Error> for ConfigurationParseError {
    fn from(err: csv::Error) -> Self {
        ConfigurationParseError::new(err.to_string())
    }
}

impl From<std::io::Error> for ConfigurationParseError {
    fn from(err: std::io::Error) -> Self {
        ConfigurationParseError::new(err.to_string())
    }
}

impl From<FermiError> for ConfigurationParseError {
    fn from(err: FermiError) -> Self {
        ConfigurationParseError::new(err.to_string())
    }
}
