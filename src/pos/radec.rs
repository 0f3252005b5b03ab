// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Handle (right ascension, declination) coordinates.

use super::hadec::HADec;
use super::lmn::LMN;

/// A struct containing a Right Ascension and Declination. All units are in
/// radians.
///
/// Note that the serialised units are degrees and are automatically converted
/// when serialising/deserialising.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::upper_case_acronyms)]
pub struct RADec {
    /// Right ascension \[radians\]
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::pos::radians_to_degrees"))]
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::pos::degrees_to_radians"))]
    pub ra: f64,

    /// Declination \[radians\]
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::pos::radians_to_degrees"))]
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::pos::degrees_to_radians"))]
    pub dec: f64,
}

impl RADec {
    /// Make a new [`RADec`] struct from values in radians.
    pub fn from_radians(ra: f64, dec: f64) -> RADec {
        Self { ra, dec }
    }

    /// Make a new [`RADec`] struct from values in degrees.
    pub fn from_degrees(ra: f64, dec: f64) -> RADec {
        Self {
            ra: ra.to_radians(),
            dec: dec.to_radians(),
        }
    }

    /// Given a local sidereal time, make a new [`HADec`] struct from a [`RADec`].
    pub fn to_hadec(self, lst_rad: f64) -> HADec {
        HADec {
            ha: lst_rad - self.ra,
            dec: self.dec,
        }
    }

    /// Get the [LMN] direction cosines from an [`RADec`] and a phase centre.
    ///
    /// Derived using "Coordinate transformations" on page 388 of Synthesis
    /// Imaging in Radio Astronomy II.
    pub fn to_lmn(&self, phase_centre: RADec) -> LMN {
        let (pc_s_dec, pc_c_dec) = phase_centre.dec.sin_cos();
        self.to_lmn_inner(phase_centre.ra, pc_s_dec, pc_c_dec)
    }

    /// Get the [LMN] direction cosines from an [`RADec`] and a phase centre.
    /// This function is less convenient than [`RADec::to_lmn`], but avoids
    /// recalculating the `sin` and `cos` of the phase centre's declination in
    /// tight loops.
    pub fn to_lmn_inner(&self, pc_ra: f64, pc_s_dec: f64, pc_c_dec: f64) -> LMN {
        let d_ra = self.ra - pc_ra;
        let (s_d_ra, c_d_ra) = d_ra.sin_cos();
        let (s_dec, c_dec) = self.dec.sin_cos();
        LMN {
            l: c_dec * s_d_ra,
            m: s_dec * pc_c_dec - c_dec * pc_s_dec * c_d_ra,
            n: s_dec * pc_s_dec + c_dec * pc_c_dec * c_d_ra,
        }
    }
}

impl std::fmt::Display for RADec {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "({:.4}°, {:.4}°)",
            self.ra.to_degrees(),
            self.dec.to_degrees()
        )
    }
}

#[cfg(any(test, feature = "approx"))]
impl approx::AbsDiffEq for RADec {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        f64::abs_diff_eq(&self.ra, &other.ra, epsilon)
            && f64::abs_diff_eq(&self.dec, &other.dec, epsilon)
    }
}
