// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Accumulate uv samples onto a regular grid.
//!
//! The grid covers `[-max_lambda, max_lambda)` in both u and v. Cell `(0, 0)`
//! is the (-max_lambda, -max_lambda) corner; rows follow v and columns follow
//! u. Samples are accumulated serially in the order they're given, so the
//! floating-point sums are reproducible.

use log::{debug, trace, warn};
use ndarray::prelude::*;

use super::kernel::Kernel;
use crate::InterferometerError;

/// The extent and resolution of a square uv grid.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSpec {
    /// The largest |u| or |v| covered by the grid \[wavelengths\]
    pub max_lambda: f64,

    /// The number of cells along each side of the grid.
    pub nside: usize,
}

impl GridSpec {
    pub fn new(max_lambda: f64, nside: usize) -> Result<GridSpec, InterferometerError> {
        if nside == 0 || !(max_lambda.is_finite() && max_lambda > 0.0) {
            return Err(InterferometerError::InvalidGridSpec { nside, max_lambda });
        }
        Ok(GridSpec { max_lambda, nside })
    }

    /// The width of a cell \[wavelengths\].
    pub fn cell_size(&self) -> f64 {
        2.0 * self.max_lambda / self.nside as f64
    }

    /// Get the (row, column) of the cell containing (`u`, `v`), or [`None`] if
    /// the sample is off the grid.
    pub fn cell_index(&self, u: f64, v: f64) -> Option<(usize, usize)> {
        let cell_size = self.cell_size();
        let col = ((u + self.max_lambda) / cell_size).floor();
        let row = ((v + self.max_lambda) / cell_size).floor();
        // NaNs fail these comparisons too.
        let on_grid = |x: f64| x >= 0.0 && x < self.nside as f64;
        if on_grid(row) && on_grid(col) {
            Some((row as usize, col as usize))
        } else {
            None
        }
    }

    /// Accumulate one sample into `grid`. Returns `false` if the sample was off
    /// the grid and nothing was added.
    fn add_sample(
        &self,
        grid: &mut ArrayViewMut2<f64>,
        u: f64,
        v: f64,
        kernel: Option<&Kernel>,
    ) -> bool {
        let (row, col) = match self.cell_index(u, v) {
            Some(cell) => cell,
            None => return false,
        };

        match kernel {
            None => grid[(row, col)] += 1.0,
            Some(kernel) => {
                let half = kernel.centre() as isize;
                let nside = self.nside as isize;
                for ((i, j), &weight) in kernel.weights().indexed_iter() {
                    let r = row as isize + i as isize - half;
                    let c = col as isize + j as isize - half;
                    if (0..nside).contains(&r) && (0..nside).contains(&c) {
                        grid[(r as usize, c as usize)] += weight;
                    }
                }
            }
        }
        true
    }
}

fn check_uvw_rows(num_rows: usize, function: &'static str) -> Result<(), InterferometerError> {
    if num_rows == 2 || num_rows == 3 {
        Ok(())
    } else {
        Err(InterferometerError::ShapeMismatch {
            argument: "uvw",
            function,
            expected: "2 or 3 rows (u, v and optionally w)".into(),
            received: format!("{num_rows} rows"),
        })
    }
}

fn warn_if_kernel_too_big(spec: GridSpec, kernel: Option<&Kernel>) {
    if let Some(kernel) = kernel {
        if kernel.size() > spec.nside {
            warn!(
                "The {}x{} kernel is larger than the {}x{} grid; its edges will be clipped",
                kernel.size(),
                kernel.size(),
                spec.nside,
                spec.nside
            );
        }
    }
}

/// Accumulate the (u, v) samples of `uvw` onto an `nside`×`nside` grid
/// spanning `-max_lambda` to `max_lambda` in both axes.
///
/// `uvw` has shape `(3, num_samples)` (or `(2, num_samples)`; `w` is
/// ignored). Without a kernel, each sample adds 1 to the cell it lands in.
/// With a kernel, the kernel's weights are added to the cells around it;
/// weights that would land off the grid are discarded. Samples whose cell is
/// off the grid are skipped.
pub fn uv_degrid(
    max_lambda: f64,
    nside: usize,
    uvw: ArrayView2<f64>,
    kernel: Option<&Kernel>,
) -> Result<Array2<f64>, InterferometerError> {
    let spec = GridSpec::new(max_lambda, nside)?;
    check_uvw_rows(uvw.nrows(), "uv_degrid")?;
    warn_if_kernel_too_big(spec, kernel);
    trace!(
        "Gridding {} samples onto a {nside}x{nside} grid (cell size {} wavelengths)",
        uvw.ncols(),
        spec.cell_size()
    );

    let mut grid = Array2::zeros((nside, nside));
    let mut grid_view = grid.view_mut();
    let mut num_skipped = 0;
    for (&u, &v) in uvw.row(0).iter().zip(uvw.row(1).iter()) {
        if !spec.add_sample(&mut grid_view, u, v, kernel) {
            num_skipped += 1;
        }
    }
    if num_skipped > 0 {
        debug!(
            "{num_skipped} of {} uv samples fell outside the grid (|u|, |v| >= {max_lambda})",
            uvw.ncols()
        );
    }
    Ok(grid)
}

/// The same as [`uv_degrid`], but for the `(num_freqs, 3, num_baselines)`
/// output of [`crate::xyz_uvw`]. Every frequency's baselines are gridded onto
/// the same grid, one frequency after another.
pub fn uv_degrid_multi_freq(
    max_lambda: f64,
    nside: usize,
    uvws: ArrayView3<f64>,
    kernel: Option<&Kernel>,
) -> Result<Array2<f64>, InterferometerError> {
    let spec = GridSpec::new(max_lambda, nside)?;
    check_uvw_rows(uvws.len_of(Axis(1)), "uv_degrid_multi_freq")?;
    warn_if_kernel_too_big(spec, kernel);

    let mut grid = Array2::zeros((nside, nside));
    let mut grid_view = grid.view_mut();
    let mut num_skipped = 0;
    for slab in uvws.outer_iter() {
        for (&u, &v) in slab.row(0).iter().zip(slab.row(1).iter()) {
            if !spec.add_sample(&mut grid_view, u, v, kernel) {
                num_skipped += 1;
            }
        }
    }
    if num_skipped > 0 {
        debug!(
            "{num_skipped} of {} uv samples fell outside the grid (|u|, |v| >= {max_lambda})",
            uvws.len_of(Axis(0)) * uvws.len_of(Axis(2))
        );
    }
    Ok(grid)
}

/// Grid with a kernel requested by name. `kernel_name` of [`None`] grids
/// each sample into a single cell; otherwise a `kernel_size`×`kernel_size`
/// kernel of that name (and `sigma`, for Gaussians) is generated and used.
pub fn uv_degrid_named(
    max_lambda: f64,
    nside: usize,
    uvw: ArrayView2<f64>,
    sigma: f64,
    kernel_size: usize,
    kernel_name: Option<&str>,
) -> Result<Array2<f64>, InterferometerError> {
    GridSpec::new(max_lambda, nside)?;
    check_uvw_rows(uvw.nrows(), "uv_degrid_named")?;
    let kernel = kernel_name
        .map(|name| Kernel::from_name(name, sigma, kernel_size))
        .transpose()?;
    uv_degrid(max_lambda, nside, uvw, kernel.as_ref())
}
