// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Handle (hour angle, declination) coordinates.

use crate::RADec;

/// A struct containing an Hour Angle and Declination. All units are in radians.
///
/// Note that the serialised units are degrees and are automatically converted
/// when serialising/deserialising.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::upper_case_acronyms)]
pub struct HADec {
    /// Hour angle \[radians\]
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::pos::radians_to_degrees"))]
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::pos::degrees_to_radians"))]
    pub ha: f64,
    /// Declination \[radians\]
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::pos::radians_to_degrees"))]
    #[cfg_attr(feature = "serde", serde(deserialize_with = "crate::pos::degrees_to_radians"))]
    pub dec: f64,
}

impl HADec {
    /// Make a new [`HADec`] struct from values in radians.
    pub fn from_radians(ha: f64, dec: f64) -> HADec {
        Self { ha, dec }
    }

    /// Make a new [`HADec`] struct from values in degrees.
    pub fn from_degrees(ha: f64, dec: f64) -> HADec {
        Self {
            ha: ha.to_radians(),
            dec: dec.to_radians(),
        }
    }

    /// A phase centre on the meridian at zenith for an array at the given
    /// latitude. Every baseline of a co-planar array has `w = 0` here.
    pub fn zenith(latitude_rad: f64) -> HADec {
        Self {
            ha: 0.0,
            dec: latitude_rad,
        }
    }

    /// Given a local sidereal time, make a new [`RADec`] struct from a [`HADec`].
    pub fn to_radec(self, lst_rad: f64) -> RADec {
        RADec {
            ra: lst_rad - self.ha,
            dec: self.dec,
        }
    }
}

impl std::fmt::Display for HADec {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "({:.4}°, {:.4}°)",
            self.ha.to_degrees(),
            self.dec.to_degrees()
        )
    }
}

#[cfg(any(test, feature = "approx"))]
impl approx::AbsDiffEq for HADec {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        f64::abs_diff_eq(&self.ha, &other.ha, epsilon)
            && f64::abs_diff_eq(&self.dec, &other.dec, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_radec_round_trip() {
        let lst = 1.2;
        let hadec = HADec::from_degrees(15.0, -27.0);
        let radec = hadec.to_radec(lst);
        assert_abs_diff_eq!(radec.ra, lst - 15.0_f64.to_radians());
        assert_abs_diff_eq!(radec.to_hadec(lst), hadec, epsilon = 1e-12);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_serde_uses_degrees() {
        let hadec = HADec::from_degrees(30.0, -45.0);
        let json = serde_json::to_string(&hadec).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_abs_diff_eq!(value["ha"].as_f64().unwrap(), 30.0, epsilon = 1e-10);
        assert_abs_diff_eq!(value["dec"].as_f64().unwrap(), -45.0, epsilon = 1e-10);
        let hadec2: HADec = serde_json::from_str(&json).unwrap();
        assert_abs_diff_eq!(hadec, hadec2, epsilon = 1e-12);
    }
}
