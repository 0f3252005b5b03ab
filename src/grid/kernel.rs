// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Convolution kernels used to spread a uv sample over neighbouring grid
//! cells.

use std::f64::consts::TAU;
use std::str::FromStr;

use ndarray::prelude::*;

use crate::InterferometerError;

/// The kinds of kernel that can be sampled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KernelShape {
    /// Every cell has a weight of 1.
    Box,

    /// A 2-D Gaussian density with standard deviation `sigma` \[cells\].
    Gaussian { sigma: f64 },
}

impl KernelShape {
    /// Get a [`KernelShape`] from its name. `sigma` is only used by the
    /// Gaussian kernel.
    pub fn from_name(name: &str, sigma: f64) -> Result<KernelShape, InterferometerError> {
        match name.parse::<KernelName>()? {
            KernelName::Box => Ok(KernelShape::Box),
            KernelName::Gaussian => Ok(KernelShape::Gaussian { sigma }),
        }
    }

    /// The weight of this kernel at an offset of (`di`, `dj`) cells from its
    /// centre.
    pub fn sample(&self, di: f64, dj: f64) -> f64 {
        match *self {
            KernelShape::Box => 1.0,
            KernelShape::Gaussian { sigma } => {
                let two_sigma_sq = 2.0 * sigma * sigma;
                (1.0 / (TAU * sigma * sigma)) * (-(di * di + dj * dj) / two_sigma_sq).exp()
            }
        }
    }
}

/// The names kernels can be requested by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum KernelName {
    Box,
    Gaussian,
}

impl FromStr for KernelName {
    type Err = InterferometerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "box" | "boxcar" | "uniform" => Ok(KernelName::Box),
            "gaussian" | "gauss" => Ok(KernelName::Gaussian),
            _ => Err(InterferometerError::UnknownKernel(s.to_string())),
        }
    }
}

/// A square kernel with an odd side length, sampled once at construction and
/// then reused for every gridded sample.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    shape: KernelShape,
    weights: Array2<f64>,
}

impl Kernel {
    /// Sample `shape` on a `size`×`size` grid of cells centred on the middle
    /// cell. `size` must be odd so that the centre is a cell.
    pub fn new(shape: KernelShape, size: usize) -> Result<Kernel, InterferometerError> {
        let sigma = match shape {
            KernelShape::Box => 1.0,
            KernelShape::Gaussian { sigma } => sigma,
        };
        if size % 2 == 0 || !(sigma.is_finite() && sigma > 0.0) {
            return Err(InterferometerError::InvalidKernelSpec { size, sigma });
        }

        let centre = (size / 2) as f64;
        let weights = Array2::from_shape_fn((size, size), |(i, j)| {
            shape.sample(i as f64 - centre, j as f64 - centre)
        });
        Ok(Kernel { shape, weights })
    }

    /// A kernel of ones.
    pub fn boxcar(size: usize) -> Result<Kernel, InterferometerError> {
        Self::new(KernelShape::Box, size)
    }

    /// A sampled 2-D Gaussian density.
    pub fn gaussian(sigma: f64, size: usize) -> Result<Kernel, InterferometerError> {
        Self::new(KernelShape::Gaussian { sigma }, size)
    }

    /// Get a kernel by name (e.g. "box" or "gaussian").
    pub fn from_name(name: &str, sigma: f64, size: usize) -> Result<Kernel, InterferometerError> {
        Self::new(KernelShape::from_name(name, sigma)?, size)
    }

    pub fn shape(&self) -> KernelShape {
        self.shape
    }

    /// The side length of the kernel \[cells\].
    pub fn size(&self) -> usize {
        self.weights.nrows()
    }

    /// The index of the centre cell along either axis.
    pub fn centre(&self) -> usize {
        self.size() / 2
    }

    pub fn weights(&self) -> ArrayView2<'_, f64> {
        self.weights.view()
    }

    pub fn into_weights(self) -> Array2<f64> {
        self.weights
    }
}

/// Generate a `size`×`size` Gaussian kernel with standard deviation `sigma`
/// \[cells\]. The centre cell is `1 / (2 pi sigma^2)`.
pub fn gauss_kernel(sigma: f64, size: usize) -> Result<Array2<f64>, InterferometerError> {
    Ok(Kernel::gaussian(sigma, size)?.into_weights())
}
