// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Super module for all positional code.

pub mod earth;
pub mod enh;
pub mod hadec;
pub mod lmn;
pub mod radec;
pub mod uvw;
pub mod xyz;

use crate::InterferometerError;

/// Make sure an angle can be fed to `sin` and `cos` meaningfully.
pub(crate) fn check_angle(
    function: &'static str,
    argument: &'static str,
    value: f64,
) -> Result<(), InterferometerError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InterferometerError::InvalidAngle {
            argument,
            function,
            value,
        })
    }
}

#[cfg(feature = "serde")]
pub(crate) fn radians_to_degrees<S: serde::Serializer>(num: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(num.to_degrees())
}

#[cfg(feature = "serde")]
pub(crate) fn degrees_to_radians<'de, D>(d: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let num: f64 = serde::Deserialize::deserialize(d)?;
    Ok(num.to_radians())
}
