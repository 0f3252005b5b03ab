// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Handle UVW coordinates.

use ndarray::prelude::*;

use super::hadec::HADec;
use super::xyz::XyzGeodetic;

/// The (u,v,w) coordinates of a baseline. The units are whatever the
/// [`XyzGeodetic`] baseline was in; this crate mostly deals in wavelengths.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[allow(clippy::upper_case_acronyms)]
pub struct UVW {
    /// u coordinate
    pub u: f64,
    /// v coordinate
    pub v: f64,
    /// w coordinate
    pub w: f64,
}

impl UVW {
    /// Convert an [XyzGeodetic] to [UVW], given the phase centre.
    ///
    /// This is Equation 4.1 of: Interferometry and Synthesis in Radio
    /// Astronomy, Third Edition, Section 4: Geometrical Relationships,
    /// Polarimetry, and the Measurement Equation.
    pub fn from_xyz(xyz: XyzGeodetic, phase_centre: HADec) -> Self {
        let (s_ha, c_ha) = phase_centre.ha.sin_cos();
        let (s_dec, c_dec) = phase_centre.dec.sin_cos();
        Self::from_xyz_inner(xyz, s_ha, c_ha, s_dec, c_dec)
    }

    /// Convert an [XyzGeodetic] to [UVW], given the phase centre. This function
    /// is less convenient than [UVW::from_xyz()], but may be better in tight
    /// loops as the `sin` and `cos` of the phase centre don't need to be
    /// uselessly re-calculated.
    ///
    /// The terms are the rows of [`uvw_rotation_matrix`] applied to `xyz`.
    pub fn from_xyz_inner(xyz: XyzGeodetic, s_ha: f64, c_ha: f64, s_dec: f64, c_dec: f64) -> Self {
        Self {
            u: s_ha * xyz.x + c_ha * xyz.y,
            v: -s_dec * c_ha * xyz.x + s_dec * s_ha * xyz.y + c_dec * xyz.z,
            w: c_dec * c_ha * xyz.x - c_dec * s_ha * xyz.y + s_dec * xyz.z,
        }
    }
}

/// The 3x3 matrix that rotates XYZ baselines into the UVW frame of the given
/// phase centre.
///
/// ```text
/// [[ sin(H),         cos(H),         0      ],
///  [-sin(D)cos(H),   sin(D)sin(H),   cos(D) ],
///  [ cos(D)cos(H),  -cos(D)sin(H),   sin(D) ]]
/// ```
pub fn uvw_rotation_matrix(phase_centre: HADec) -> Array2<f64> {
    let (s_ha, c_ha) = phase_centre.ha.sin_cos();
    let (s_dec, c_dec) = phase_centre.dec.sin_cos();
    array![
        [s_ha, c_ha, 0.0],
        [-s_dec * c_ha, s_dec * s_ha, c_dec],
        [c_dec * c_ha, -c_dec * s_ha, s_dec]
    ]
}

/// Rotate a `(3, num_baselines)` array of XYZ baselines into UVWs in place.
/// Each column is replaced by its UVW.
pub(crate) fn rotate_to_uvw(mut baselines: ArrayViewMut2<f64>, phase_centre: HADec) {
    let (s_ha, c_ha) = phase_centre.ha.sin_cos();
    let (s_dec, c_dec) = phase_centre.dec.sin_cos();
    for mut bl in baselines.axis_iter_mut(Axis(1)) {
        let xyz = XyzGeodetic {
            x: bl[0],
            y: bl[1],
            z: bl[2],
        };
        let uvw = UVW::from_xyz_inner(xyz, s_ha, c_ha, s_dec, c_dec);
        bl[0] = uvw.u;
        bl[1] = uvw.v;
        bl[2] = uvw.w;
    }
}

impl std::ops::Sub<UVW> for UVW {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        UVW {
            u: self.u - rhs.u,
            v: self.v - rhs.v,
            w: self.w - rhs.w,
        }
    }
}

impl std::ops::Mul<f64> for UVW {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        UVW {
            u: self.u * rhs,
            v: self.v * rhs,
            w: self.w * rhs,
        }
    }
}

impl std::ops::Div<f64> for UVW {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        UVW {
            u: self.u / rhs,
            v: self.v / rhs,
            w: self.w / rhs,
        }
    }
}

#[cfg(any(test, feature = "approx"))]
impl approx::AbsDiffEq for UVW {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        f64::abs_diff_eq(&self.u, &other.u, epsilon)
            && f64::abs_diff_eq(&self.v, &other.v, epsilon)
            && f64::abs_diff_eq(&self.w, &other.w, epsilon)
    }
}
