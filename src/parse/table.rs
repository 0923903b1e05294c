use csv::Writer;
use std::io;

use crate::error::{FermiError, Result};
use crate::fermi::{decode_into, FermiMap};

/// Writes one row per state of `map`: its index, its bitfield and its
/// occupied orbitals.
/// # Arguments
/// * __`one_based`__ - Shifts indices and orbitals by one, for environments
/// counting from 1.
pub fn write_coordinate_table<W: io::Write>(map: &FermiMap, one_based: bool, writer: W) -> Result<()> {
    let shift = usize::from(one_based);
    let n = map.particles();
    let mut wtr = Writer::from_writer(writer);

    let mut header = vec!["index".to_owned(), "bitfield".to_owned()];
    header.extend((0..n).map(|k| format!("orbital{}", k + shift)));
    wtr.write_record(&header).map_err(csv_to_io)?;

    let mut x = vec![0usize; n];
    for (i, &w) in map.iter().enumerate() {
        decode_into(w, &mut x)?;
        let mut rec = vec![(i + shift).to_string(), w.to_string()];
        rec.extend(x.iter().map(|k| (k + shift).to_string()));
        wtr.write_record(&rec).map_err(csv_to_io)?;
    }
    wtr.flush()?;
    Ok(())
}

fn csv_to_io(err: csv::Error) -> FermiError {
    FermiError::Io {
        details: err.to_string(),
    }
}
