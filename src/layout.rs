// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Antenna layouts: the east, north and height of every antenna in an array,
//! and code to read them from text files.
//!
//! Two formats are understood. Whitespace-delimited text:
//!
//! ```text
//! # east north height [name]
//! -149.785 265.814 377.011 Tile011
//! ```
//!
//! and comma-delimited CSV (any file with a `.csv` extension). In both, lines
//! starting with `#` are comments, and a first row whose first field isn't a
//! number is treated as a header and skipped. The name column is optional,
//! but if one antenna is named, all of them must be.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::debug;
use ndarray::prelude::*;
use thiserror::Error;

use crate::{enh_xyz, InterferometerError, ENH};

#[derive(Error, Debug)]
pub enum LayoutReadError {
    #[error("Layout file '{0}' doesn't exist")]
    DoesNotExist(String),

    #[error("Line {line}: expected at least 3 columns (east, north, height), found {found}")]
    TooFewColumns { line: u64, found: usize },

    #[error("Line {line}: couldn't parse '{value}' as a number")]
    BadFloat { line: u64, value: String },

    #[error("Line {line}: some antennas are named and others aren't")]
    MixedNames { line: u64 },

    #[error("No antennas were found in the layout")]
    Empty,

    #[error(transparent)]
    Layout(#[from] InterferometerError),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

/// The positions of the antennas of an array, in the order that defines their
/// indices. All units are metres.
#[derive(Clone, Debug, PartialEq)]
pub struct AntennaLayout {
    /// Shape `(3, num_antennas)`; the rows are east, north and height.
    enh: Array2<f64>,

    names: Option<Vec<String>>,
}

impl AntennaLayout {
    /// Make a layout out of separate east, north and height sequences
    /// \[metres\]. They must have the same, non-zero length.
    pub fn new(
        east: Vec<f64>,
        north: Vec<f64>,
        height: Vec<f64>,
    ) -> Result<AntennaLayout, InterferometerError> {
        let num_ants = east.len();
        if num_ants == 0 || north.len() != num_ants || height.len() != num_ants {
            return Err(InterferometerError::ShapeMismatch {
                argument: "east, north, height",
                function: "AntennaLayout::new",
                expected: "three sequences of the same, non-zero length".into(),
                received: format!("lengths {}, {}, {}", num_ants, north.len(), height.len()),
            });
        }
        let mut enh = Array2::zeros((3, num_ants));
        enh.row_mut(0).assign(&Array1::from(east));
        enh.row_mut(1).assign(&Array1::from(north));
        enh.row_mut(2).assign(&Array1::from(height));
        Ok(AntennaLayout { enh, names: None })
    }

    /// Make a layout out of [`ENH`] positions.
    pub fn from_enhs(enhs: &[ENH]) -> Result<AntennaLayout, InterferometerError> {
        Self::new(
            enhs.iter().map(|enh| enh.e).collect(),
            enhs.iter().map(|enh| enh.n).collect(),
            enhs.iter().map(|enh| enh.h).collect(),
        )
    }

    /// Attach a name to every antenna.
    pub fn with_names(mut self, names: Vec<String>) -> Result<AntennaLayout, InterferometerError> {
        if names.len() != self.num_antennas() {
            return Err(InterferometerError::ShapeMismatch {
                argument: "names",
                function: "AntennaLayout::with_names",
                expected: format!("{} names", self.num_antennas()),
                received: format!("{} names", names.len()),
            });
        }
        self.names = Some(names);
        Ok(self)
    }

    pub fn num_antennas(&self) -> usize {
        self.enh.ncols()
    }

    /// All positions as a `(3, num_antennas)` array; the rows are east, north
    /// and height.
    pub fn enh(&self) -> ArrayView2<'_, f64> {
        self.enh.view()
    }

    pub fn east(&self) -> ArrayView1<'_, f64> {
        self.enh.row(0)
    }

    pub fn north(&self) -> ArrayView1<'_, f64> {
        self.enh.row(1)
    }

    pub fn height(&self) -> ArrayView1<'_, f64> {
        self.enh.row(2)
    }

    pub fn names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }

    pub fn iter_enh(&self) -> impl Iterator<Item = ENH> + '_ {
        self.enh.axis_iter(Axis(1)).map(|enh| ENH {
            e: enh[0],
            n: enh[1],
            h: enh[2],
        })
    }

    /// Get the geodetic XYZ positions \[metres\] of the antennas, given the
    /// array's latitude \[radians\]. See [`enh_xyz`].
    pub fn to_xyz(&self, latitude_rad: f64) -> Result<Array2<f64>, InterferometerError> {
        enh_xyz(self.enh.view(), latitude_rad)
    }
}

/// Accumulates rows of a layout table.
#[derive(Default)]
struct LayoutBuilder {
    east: Vec<f64>,
    north: Vec<f64>,
    height: Vec<f64>,
    names: Vec<String>,
    seen_first_row: bool,
}

impl LayoutBuilder {
    fn push<'a, I>(&mut self, fields: I, line: u64) -> Result<(), LayoutReadError>
    where
        I: Iterator<Item = &'a str>,
    {
        let fields: Vec<&str> = fields.map(str::trim).filter(|f| !f.is_empty()).collect();
        let first_row = !self.seen_first_row;
        self.seen_first_row = true;
        if first_row && fields.first().map_or(false, |f| f.parse::<f64>().is_err()) {
            debug!("Skipping layout header on line {line}");
            return Ok(());
        }
        if fields.len() < 3 {
            return Err(LayoutReadError::TooFewColumns {
                line,
                found: fields.len(),
            });
        }

        let parse = |value: &str| {
            value.parse::<f64>().map_err(|_| LayoutReadError::BadFloat {
                line,
                value: value.to_string(),
            })
        };
        self.east.push(parse(fields[0])?);
        self.north.push(parse(fields[1])?);
        self.height.push(parse(fields[2])?);

        // Names must be all or nothing.
        match fields.get(3) {
            Some(name) if self.names.len() + 1 == self.east.len() => {
                self.names.push(name.to_string())
            }
            None if self.names.is_empty() => (),
            _ => return Err(LayoutReadError::MixedNames { line }),
        }
        Ok(())
    }

    fn finish(self) -> Result<AntennaLayout, LayoutReadError> {
        if self.east.is_empty() {
            return Err(LayoutReadError::Empty);
        }
        let names = self.names;
        let layout = AntennaLayout::new(self.east, self.north, self.height)?;
        if names.is_empty() {
            Ok(layout)
        } else {
            Ok(layout.with_names(names)?)
        }
    }
}

/// Read a whitespace-delimited layout table.
pub fn parse_layout_text<R: Read>(reader: R) -> Result<AntennaLayout, LayoutReadError> {
    let mut builder = LayoutBuilder::default();
    for (i_line, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        builder.push(line.split_whitespace(), i_line as u64 + 1)?;
    }
    builder.finish()
}

/// Read a comma-delimited layout table.
pub fn parse_layout_csv<R: Read>(reader: R) -> Result<AntennaLayout, LayoutReadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut builder = LayoutBuilder::default();
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        builder.push(record.iter(), line)?;
    }
    builder.finish()
}

/// Read an antenna layout file. Files with a `.csv` extension are read as
/// CSV; everything else is read as whitespace-delimited text.
pub fn read_layout<P: AsRef<Path>>(path: P) -> Result<AntennaLayout, LayoutReadError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(LayoutReadError::DoesNotExist(path.display().to_string()));
    }
    let is_csv = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));
    let file = File::open(path)?;
    let layout = if is_csv {
        parse_layout_csv(file)?
    } else {
        parse_layout_text(file)?
    };
    debug!(
        "Read {} antennas from {}",
        layout.num_antennas(),
        path.display()
    );
    Ok(layout)
}
