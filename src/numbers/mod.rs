//! Generation and comma-separated persistence of the numbers to sort.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::Rng;

use crate::errors::*;

/// Exclusive upper bound of generated numbers.
pub const MAX_VALUE: i32 = 1000;

/// Generates `n` integers uniformly distributed in `[0, MAX_VALUE)`.
pub fn generate<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<i32> {
    (0..n).map(|_| rng.gen_range(0..MAX_VALUE)).collect()
}

/// Writes `numbers` to `path` separated by commas, without a trailing separator.
pub fn write<P: AsRef<Path>>(path: P, numbers: &[i32]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|err| Error::Create {
        path: path.to_owned(),
        err,
    })?;

    let mut writer = BufWriter::new(file);
    for (i, v) in numbers.iter().enumerate() {
        if i > 0 {
            writer.write_all(b",")?;
        }

        write!(writer, "{}", v)?;
    }

    writer.flush()?;
    info!("Numbers written to {}", path.display());
    Ok(())
}

/// Reads the comma-separated integers stored at `path`. Whitespace around a
/// number is ignored and so are empty fields, which lets an empty file read as
/// no numbers at all.
pub fn read<P: AsRef<Path>>(path: P) -> Result<Vec<i32>> {
    let path = path.as_ref();
    let buf = fs::read_to_string(path).map_err(|err| Error::Open {
        path: path.to_owned(),
        err,
    })?;

    let mut numbers = Vec::new();
    for (position, token) in buf.split(',').enumerate() {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        let v = token.parse::<i32>().map_err(|_| Error::Malformed {
            position,
            token: token.to_owned(),
        })?;

        numbers.push(v);
    }

    debug!("Read {} numbers from {}", numbers.len(), path.display());
    Ok(numbers)
}
