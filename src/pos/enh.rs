// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Handle East, North and Height coordinates (typically associated with
//! antennas in a layout file).

use itertools::izip;
use log::trace;
use ndarray::prelude::*;

use super::check_angle;
use crate::{constants::MWA_LAT_RAD, InterferometerError, XyzGeodetic};

/// East, North and Height coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[allow(clippy::upper_case_acronyms)]
pub struct ENH {
    /// East \[metres\]
    pub e: f64,
    /// North \[metres\]
    pub n: f64,
    /// Height \[metres\]
    pub h: f64,
}

impl ENH {
    /// Convert coords in local topocentric East, North, Height units to 'local'
    /// [`XyzGeodetic`] units. Local means Z points north, X points through the
    /// equator from the geocenter along the local meridian and Y is East. This
    /// is like the absolute system except that zero longitude is now the local
    /// meridian rather than prime meridian. Latitude is geodetic, in radians.
    ///
    /// Taken from the third edition of Interferometry and Synthesis in Radio
    /// Astronomy, chapter 4: Geometrical Relationships, Polarimetry, and the
    /// Measurement Equation.
    pub fn to_xyz(self, latitude_rad: f64) -> XyzGeodetic {
        let (s_lat, c_lat) = latitude_rad.sin_cos();
        Self::to_xyz_inner(self, s_lat, c_lat)
    }

    /// Convert coords in local topocentric East, North, Height units to 'local'
    /// [`XyzGeodetic`] units. See [`ENH::to_xyz`] for more information. This
    /// function is less convenient than [`ENH::to_xyz`], but is slightly more
    /// efficient because the caller can prevent needless `sin` and `cos`
    /// calculations.
    pub fn to_xyz_inner(self, sin_latitude: f64, cos_latitude: f64) -> XyzGeodetic {
        XyzGeodetic {
            x: self.h * cos_latitude - self.n * sin_latitude,
            y: self.e,
            z: self.h * sin_latitude + self.n * cos_latitude,
        }
    }

    /// Convert [`ENH`] coordinates to [`XyzGeodetic`] for the MWA's latitude.
    pub fn to_xyz_mwa(self) -> XyzGeodetic {
        self.to_xyz(MWA_LAT_RAD)
    }
}

/// Convert a layout of antenna positions into geodetic XYZ coordinates.
///
/// `layout` has shape `(3, num_antennas)`; its rows are east, north and height
/// \[metres\]. The returned array has the same shape with rows x, y and z
/// \[metres\]. `latitude_rad` is the geodetic latitude of the array.
pub fn enh_xyz(
    layout: ArrayView2<f64>,
    latitude_rad: f64,
) -> Result<Array2<f64>, InterferometerError> {
    check_angle("enh_xyz", "latitude_rad", latitude_rad)?;
    let (num_rows, num_ants) = layout.dim();
    if num_rows != 3 || num_ants == 0 {
        return Err(InterferometerError::ShapeMismatch {
            argument: "layout",
            function: "enh_xyz",
            expected: "(3, N > 0)".into(),
            received: format!("{:?}", layout.dim()),
        });
    }
    trace!("Converting {num_ants} ENH positions to XYZ at latitude {latitude_rad} rad");

    let (s_lat, c_lat) = latitude_rad.sin_cos();
    let mut xyz = Array2::zeros((3, num_ants));
    for (enh, mut xyz) in izip!(layout.axis_iter(Axis(1)), xyz.axis_iter_mut(Axis(1))) {
        let geodetic = ENH {
            e: enh[0],
            n: enh[1],
            h: enh[2],
        }
        .to_xyz_inner(s_lat, c_lat);
        xyz[0] = geodetic.x;
        xyz[1] = geodetic.y;
        xyz[2] = geodetic.z;
    }
    Ok(xyz)
}

#[cfg(any(test, feature = "approx"))]
impl approx::AbsDiffEq for ENH {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        f64::abs_diff_eq(&self.e, &other.e, epsilon)
            && f64::abs_diff_eq(&self.n, &other.n, epsilon)
            && f64::abs_diff_eq(&self.h, &other.h, epsilon)
    }
}
