//! Seed loaders. These validate their input and hand the core a finished
//! [`Field`]; everything malformed comes back as a [`LoadError`].

use std::io::Read;

use tracing::debug;

use crate::{
    error::{LoadError, Result},
    proc::{Cell, Coord, Field},
};

/// Parses the text grid format: one line per row, `.` for a dead cell and
/// `#` for a live one. Short lines and missing rows are filled with dead
/// cells; blank lines after the last row are ignored. A stray `\r` left at
/// the end of a line (a bare trailing `\r` without `\n`) is dropped too.
pub fn parse_grid(text: &str, height: usize, width: usize) -> std::result::Result<Field, LoadError> {
    let lines: Vec<&str> = text
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .collect();
    let rows = lines.iter().rposition(|l| !l.is_empty()).map_or(0, |i| i + 1);

    if rows > height {
        return Err(LoadError::TooManyRows { rows, height });
    }

    let mut field = Field::new(height, width);
    for (i, line) in lines[..rows].iter().enumerate() {
        let len = line.chars().count();
        if len > width {
            return Err(LoadError::RowTooLong { line: i + 1, len, width });
        }

        for (j, ch) in line.chars().enumerate() {
            let cell = Cell::from_marker(ch).ok_or(LoadError::InvalidMarker {
                line: i + 1,
                column: j + 1,
                found: ch,
            })?;
            field.set(Coord::new(i, j), cell);
        }
    }

    debug!(rows, population = field.population(), "parsed seed grid");
    Ok(field)
}

/// Reads the whole stream and parses it with [`parse_grid`].
pub fn read_grid<R: Read>(mut reader: R, height: usize, width: usize) -> Result<Field> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(parse_grid(&text, height, width)?)
}

/// Builds a field from a literal list of live `(row, col)` pairs.
pub fn from_coords<I>(coords: I, height: usize, width: usize) -> std::result::Result<Field, LoadError>
where
    I: IntoIterator<Item = (usize, usize)>,
{
    let mut field = Field::new(height, width);
    for (row, col) in coords {
        let c = Coord::new(row, col);
        if !field.contains(c) {
            return Err(LoadError::OutOfBounds { row, col, height, width });
        }
        field.set(c, Cell::Alive);
    }
    Ok(field)
}
