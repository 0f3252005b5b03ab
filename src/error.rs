// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors raised by the geometry and gridding code.

use thiserror::Error;

/// All the errors that can occur when turning antenna positions into
/// baselines, UVWs, direction cosines and grids. Every variant is raised
/// before any output array is allocated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterferometerError {
    /// Array lengths or shapes that can't be combined.
    #[error("bad array shape supplied to argument {argument} of function {function}. expected {expected}, received {received}")]
    ShapeMismatch {
        argument: &'static str,
        function: &'static str,
        expected: String,
        received: String,
    },

    /// A latitude, hour angle or declination that isn't a finite number.
    #[error("argument {argument} of function {function} must be a finite angle in radians, received {value}")]
    InvalidAngle {
        argument: &'static str,
        function: &'static str,
        value: f64,
    },

    /// A frequency for which no wavelength can be calculated.
    #[error("frequency {0} Hz is not a positive, finite number")]
    InvalidFrequency(f64),

    /// A grid that can't hold anything.
    #[error("invalid uv grid: nside ({nside}) and max_lambda ({max_lambda}) must both be positive and finite")]
    InvalidGridSpec { nside: usize, max_lambda: f64 },

    /// Kernel parameters that don't describe a kernel.
    #[error("invalid kernel: size ({size}) must be a positive odd integer and sigma ({sigma}) must be positive and finite")]
    InvalidKernelSpec { size: usize, sigma: f64 },

    /// A kernel name that isn't recognised.
    #[error("unknown kernel '{0}'; supported kernels are 'box' and 'gaussian'")]
    UnknownKernel(String),
}
