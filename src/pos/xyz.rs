// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Handle geodetic (x,y,z) coordinates of antennas and the baselines formed
//! between them.
//!
//! Baselines are formed between every ordered pair of antennas, including each
//! antenna with itself, so an array of N antennas has N² baselines. Baseline
//! `i * N + j` is antenna `i` minus antenna `j`; see [`crate::math`] for
//! index helpers and for selecting only the `i < j` cross-correlations.
//!
//! This coordinate system is discussed at length in Interferometry and
//! Synthesis in Radio Astronomy, Third Edition, Section 4: Geometrical
//! Relationships, Polarimetry, and the Measurement Equation.

use log::debug;
use ndarray::{prelude::*, Zip};
use rayon::prelude::*;

use super::{check_angle, uvw::rotate_to_uvw};
use crate::{constants::VEL_C, HADec, InterferometerError};

/// The geodetic (x,y,z) coordinates of an antenna (a.k.a. tile or station). All
/// units are in metres.
///
/// This coordinate system is discussed at length in Interferometry and
/// Synthesis in Radio Astronomy, Third Edition, Section 4: Geometrical
/// Relationships, Polarimetry, and the Measurement Equation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct XyzGeodetic {
    /// x-coordinate \[meters\]
    pub x: f64,
    /// y-coordinate \[meters\]
    pub y: f64,
    /// z-coordinate \[meters\]
    pub z: f64,
}

impl std::ops::Sub<XyzGeodetic> for XyzGeodetic {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        XyzGeodetic {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

fn check_xyz_shape(
    xyz: ArrayView2<f64>,
    function: &'static str,
) -> Result<usize, InterferometerError> {
    match xyz.dim() {
        (3, num_ants) if num_ants > 0 => Ok(num_ants),
        dim => Err(InterferometerError::ShapeMismatch {
            argument: "xyz",
            function,
            expected: "(3, N > 0)".into(),
            received: format!("{dim:?}"),
        }),
    }
}

fn check_freqs(freqs_hz: &[f64], function: &'static str) -> Result<(), InterferometerError> {
    if freqs_hz.is_empty() {
        return Err(InterferometerError::ShapeMismatch {
            argument: "freqs_hz",
            function,
            expected: "at least one frequency".into(),
            received: "none".into(),
        });
    }
    match freqs_hz.iter().find(|f| !(f.is_finite() && **f > 0.0)) {
        Some(&bad) => Err(InterferometerError::InvalidFrequency(bad)),
        None => Ok(()),
    }
}

/// Form every ordered baseline between the antennas of a `(3, N)` XYZ array.
/// The result has shape `(3, N * N)`; column `i * N + j` is antenna `i` minus
/// antenna `j`, so the auto-correlation columns (`i == j`) are exactly zero.
pub fn xyz_baselines(xyz: ArrayView2<f64>) -> Result<Array2<f64>, InterferometerError> {
    let num_ants = check_xyz_shape(xyz, "xyz_baselines")?;
    Ok(Array2::from_shape_fn(
        (3, num_ants * num_ants),
        |(axis, i_bl)| xyz[(axis, i_bl / num_ants)] - xyz[(axis, i_bl % num_ants)],
    ))
}

/// The same as [`xyz_baselines`], but the elements are calculated in
/// parallel. The results are bit-identical.
pub fn xyz_baselines_parallel(xyz: ArrayView2<f64>) -> Result<Array2<f64>, InterferometerError> {
    let num_ants = check_xyz_shape(xyz, "xyz_baselines_parallel")?;
    let mut baselines = Array2::zeros((3, num_ants * num_ants));
    Zip::indexed(&mut baselines).par_for_each(|(axis, i_bl), bl| {
        *bl = xyz[(axis, i_bl / num_ants)] - xyz[(axis, i_bl % num_ants)];
    });
    Ok(baselines)
}

/// Divide `(3, num_baselines)` baselines \[metres\] by the wavelength of each
/// frequency \[Hz\]. The result has shape `(num_freqs, 3, num_baselines)`
/// and is in units of wavelengths.
pub fn xyz_lambda(
    baselines: ArrayView2<f64>,
    freqs_hz: &[f64],
) -> Result<Array3<f64>, InterferometerError> {
    if baselines.nrows() != 3 {
        return Err(InterferometerError::ShapeMismatch {
            argument: "baselines",
            function: "xyz_lambda",
            expected: "(3, num_baselines)".into(),
            received: format!("{:?}", baselines.dim()),
        });
    }
    check_freqs(freqs_hz, "xyz_lambda")?;

    let mut scaled = Array3::zeros((freqs_hz.len(), 3, baselines.ncols()));
    for (&freq, mut slab) in freqs_hz.iter().zip(scaled.outer_iter_mut()) {
        let wavelength = VEL_C / freq;
        Zip::from(&mut slab)
            .and(&baselines)
            .for_each(|s, &bl| *s = bl / wavelength);
    }
    Ok(scaled)
}

/// Rotate wavelength-scaled baselines of shape
/// `(num_freqs, 3, num_baselines)` (the output of [`xyz_lambda`]) to face
/// `phase_centre`. The result has the same shape; the rows of each frequency
/// slab are u, v and w.
pub fn rotate_baselines(
    baselines_lambda: ArrayView3<f64>,
    phase_centre: HADec,
) -> Result<Array3<f64>, InterferometerError> {
    check_angle("rotate_baselines", "hour_angle", phase_centre.ha)?;
    check_angle("rotate_baselines", "declination", phase_centre.dec)?;
    if baselines_lambda.len_of(Axis(1)) != 3 {
        return Err(InterferometerError::ShapeMismatch {
            argument: "baselines_lambda",
            function: "rotate_baselines",
            expected: "(num_freqs, 3, num_baselines)".into(),
            received: format!("{:?}", baselines_lambda.dim()),
        });
    }

    let mut uvws = baselines_lambda.to_owned();
    for slab in uvws.outer_iter_mut() {
        rotate_to_uvw(slab, phase_centre);
    }
    Ok(uvws)
}

/// Turn a `(3, N)` array of antenna XYZs \[metres\] into UVWs \[wavelengths\]
/// for every ordered baseline and every frequency.
///
/// The result has shape `(num_freqs, 3, N * N)`; the rows of each frequency
/// slab are u, v and w. `hour_angle` and `declination` describe the phase
/// centre and are in radians.
pub fn xyz_uvw(
    xyz: ArrayView2<f64>,
    freqs_hz: &[f64],
    hour_angle: f64,
    declination: f64,
) -> Result<Array3<f64>, InterferometerError> {
    check_angle("xyz_uvw", "hour_angle", hour_angle)?;
    check_angle("xyz_uvw", "declination", declination)?;
    let num_ants = check_xyz_shape(xyz, "xyz_uvw")?;
    check_freqs(freqs_hz, "xyz_uvw")?;
    debug!(
        "Calculating UVWs for {num_ants} antennas ({} baselines) at {} frequencies",
        num_ants * num_ants,
        freqs_hz.len()
    );

    let baselines = xyz_baselines(xyz)?;
    let mut uvws = xyz_lambda(baselines.view(), freqs_hz)?;
    let phase_centre = HADec::from_radians(hour_angle, declination);
    for slab in uvws.outer_iter_mut() {
        rotate_to_uvw(slab, phase_centre);
    }
    Ok(uvws)
}

/// The same as [`xyz_uvw`], but baselines are formed and each frequency is
/// rotated in parallel. Every element is computed the same way as the serial
/// version, so the results are bit-identical.
pub fn xyz_uvw_parallel(
    xyz: ArrayView2<f64>,
    freqs_hz: &[f64],
    hour_angle: f64,
    declination: f64,
) -> Result<Array3<f64>, InterferometerError> {
    check_angle("xyz_uvw_parallel", "hour_angle", hour_angle)?;
    check_angle("xyz_uvw_parallel", "declination", declination)?;
    check_xyz_shape(xyz, "xyz_uvw_parallel")?;
    check_freqs(freqs_hz, "xyz_uvw_parallel")?;

    let baselines = xyz_baselines_parallel(xyz)?;
    let mut uvws = xyz_lambda(baselines.view(), freqs_hz)?;
    let phase_centre = HADec::from_radians(hour_angle, declination);
    uvws.outer_iter_mut()
        .into_par_iter()
        .for_each(|slab| rotate_to_uvw(slab, phase_centre));
    Ok(uvws)
}

/// The single-frequency form of [`xyz_uvw`]. The result has shape
/// `(3, N * N)`.
pub fn xyz_uvw_single_freq(
    xyz: ArrayView2<f64>,
    freq_hz: f64,
    hour_angle: f64,
    declination: f64,
) -> Result<Array2<f64>, InterferometerError> {
    let uvws = xyz_uvw(xyz, &[freq_hz], hour_angle, declination)?;
    Ok(uvws.index_axis_move(Axis(0), 0))
}

#[cfg(any(test, feature = "approx"))]
impl approx::AbsDiffEq for XyzGeodetic {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        f64::abs_diff_eq(&self.x, &other.x, epsilon)
            && f64::abs_diff_eq(&self.y, &other.y, epsilon)
            && f64::abs_diff_eq(&self.z, &other.z, epsilon)
    }
}
