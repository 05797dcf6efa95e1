//! Plain-text matrix and vector formats.
//!
//! A matrix file holds one stored entry per line:
//!
//! ```text
//! # row  col  value
//! 1  1  1e1
//! 1  3  3e0
//! 3  1  -5e0
//! ```
//!
//! Rows and columns are 1-based. Blank lines and lines starting with `#`
//! are skipped. Values are written with Rust's shortest round-trip
//! scientific notation, so a dump reads back bit-for-bit.
//!
//! A vector file holds one value per line.

use std::io::{BufRead, Write};

use sparrow_matrix::SparseMatrix;
use sparrow_types::{SparrowError, SparrowResult};

/// Writes every entry with `|value| > cutoff`, ascending by row then
/// column. Returns the number of lines written.
pub fn write_matrix<W: Write>(
    writer: &mut W,
    matrix: &SparseMatrix,
    cutoff: f64,
) -> SparrowResult<usize> {
    let mut written = 0;
    for e in matrix.iter().filter(|e| e.value.abs() > cutoff) {
        writeln!(writer, "{}  {}  {:e}", e.row, e.col, e.value)?;
        written += 1;
    }
    Ok(written)
}

/// Reads a matrix dump.
///
/// With `dims` given, every index must fit; otherwise the dimensions are
/// the largest row and column seen. Repeated coordinates accumulate.
pub fn read_matrix<R: BufRead>(
    reader: R,
    dims: Option<(usize, usize)>,
) -> SparrowResult<SparseMatrix> {
    let mut triples = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let Some(fields) = significant(&line) else {
            continue;
        };
        let lineno = number + 1;
        let parts: Vec<&str> = fields.split_whitespace().collect();
        if parts.len() != 3 {
            return Err(malformed(
                lineno,
                format!("expected 'row col value', found {} fields", parts.len()),
            ));
        }
        let row = parse_index(parts[0], lineno, "row")?;
        let col = parse_index(parts[1], lineno, "column")?;
        let value = parse_value(parts[2], lineno)?;
        triples.push((lineno, row, col, value));
    }

    let (rows, cols) = match dims {
        Some(dims) => dims,
        None => {
            if triples.is_empty() {
                return Err(SparrowError::MalformedInput(
                    "matrix file has no entries and no dimensions were given".into(),
                ));
            }
            triples.iter().fold((0, 0), |(r, c), &(_, row, col, _)| {
                (r.max(row), c.max(col))
            })
        }
    };

    let mut matrix = SparseMatrix::new(rows, cols)?;
    for (lineno, row, col, value) in triples {
        matrix
            .assign(row, col, value)
            .map_err(|e| malformed(lineno, e.to_string()))?;
    }
    Ok(matrix)
}

/// Writes one value per line. Returns the number of lines written.
pub fn write_vector<W: Write>(writer: &mut W, values: &[f64]) -> SparrowResult<usize> {
    for v in values {
        writeln!(writer, "{v:e}")?;
    }
    Ok(values.len())
}

/// Reads one value per line, skipping blank and `#` lines.
pub fn read_vector<R: BufRead>(reader: R) -> SparrowResult<Vec<f64>> {
    let mut values = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let Some(field) = significant(&line) else {
            continue;
        };
        values.push(parse_value(field, number + 1)?);
    }
    Ok(values)
}

/// Trimmed line content, or `None` for blank and comment lines.
fn significant(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_index(field: &str, lineno: usize, what: &str) -> SparrowResult<usize> {
    match field.parse::<usize>() {
        Ok(0) => Err(malformed(lineno, format!("{what} index must be >= 1"))),
        Ok(index) => Ok(index),
        Err(e) => Err(malformed(lineno, format!("bad {what} index '{field}': {e}"))),
    }
}

fn parse_value(field: &str, lineno: usize) -> SparrowResult<f64> {
    let value = field
        .parse::<f64>()
        .map_err(|e| malformed(lineno, format!("bad value '{field}': {e}")))?;
    if !value.is_finite() {
        return Err(malformed(lineno, format!("non-finite value '{field}'")));
    }
    Ok(value)
}

fn malformed(lineno: usize, message: String) -> SparrowError {
    SparrowError::MalformedInput(format!("line {lineno}: {message}"))
}
