use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;
use num::complex::Complex;

use crate::error::{FermiError, Result};
use crate::util::try_with_capacity;

const F64_BYTES: usize = std::mem::size_of::<f64>();

/// Reads `n` host-endian doubles from the start of `path`.
pub fn read_data<P: AsRef<Path>>(path: P, n: usize) -> Result<Vec<f64>> {
    let file = File::open(path.as_ref())?;
    let mut reader = BufReader::new(file);
    let mut out: Vec<f64> = try_with_capacity(n)?;
    let mut buf = [0u8; F64_BYTES];
    for k in 0..n {
        reader.read_exact(&mut buf).map_err(|e| FermiError::Io {
            details: format!(
                "{}: expected {} values, read {} ({})",
                path.as_ref().display(),
                n,
                k,
                e
            ),
        })?;
        out.push(f64::from_ne_bytes(buf));
    }
    debug!("Read {} values from {}", n, path.as_ref().display());
    Ok(out)
}

/// Reads `n` complex numbers stored as consecutive (real, imaginary) pairs.
pub fn read_complex_data<P: AsRef<Path>>(path: P, n: usize) -> Result<Vec<Complex<f64>>> {
    let raw = read_data(path, 2 * n)?;
    Ok(raw
        .chunks_exact(2)
        .map(|c| Complex::new(c[0], c[1]))
        .collect())
}

/// Writes `data` as host-endian doubles, truncating the file unless `append`.
pub fn write_data<P: AsRef<Path>>(path: P, data: &[f64], append: bool) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .append(append)
        .truncate(!append)
        .open(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    for v in data {
        writer.write_all(&v.to_ne_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let path = std::env::temp_dir().join("fermifab_binio_test.dat");
        write_data(&path, &[1.5, -2.0], false).unwrap();
        write_data(&path, &[0.25, 4.0], true).unwrap();
        let x = read_data(&path, 4).unwrap();
        assert_eq!(x, vec![1.5, -2.0, 0.25, 4.0]);
        let z = read_complex_data(&path, 2).unwrap();
        assert_eq!(z[1], Complex::new(0.25, 4.0));
        assert!(matches!(read_data(&path, 5), Err(FermiError::Io { .. })));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        assert!(read_data("tests/data/does_not_exist.dat", 1).is_err());
    }
}
