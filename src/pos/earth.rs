// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Handling of Earth Coordinates (Latitude/Longitude/Height)

use std::fmt::Display;

use crate::constants::{MWA_HEIGHT_M, MWA_LAT_RAD, MWA_LONG_RAD};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
/// An earth position: Latitude, Longitude and Height [radians, meters]
pub struct LatLngHeight {
    /// Longitude \[radians\]
    pub longitude_rad: f64,
    /// Latitude \[radians\]
    pub latitude_rad: f64,
    /// Height above ellipsoid \[meters\]
    pub height_metres: f64,
}

impl LatLngHeight {
    /// Get a [`LatLngHeight`] at the MWA's position.
    pub fn mwa() -> LatLngHeight {
        Self {
            longitude_rad: MWA_LONG_RAD,
            latitude_rad: MWA_LAT_RAD,
            height_metres: MWA_HEIGHT_M,
        }
    }

    /// Make a new [`LatLngHeight`] from a latitude and longitude in degrees
    /// (the order that telescope sites are usually quoted in) and a height in
    /// metres.
    pub fn from_degrees(latitude_deg: f64, longitude_deg: f64, height_metres: f64) -> LatLngHeight {
        Self {
            longitude_rad: longitude_deg.to_radians(),
            latitude_rad: latitude_deg.to_radians(),
            height_metres,
        }
    }
}

impl Display for LatLngHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ longitude: {:.4}°, latitude: {:.4}°, height: {}m }}",
            self.longitude_rad.to_degrees(),
            self.latitude_rad.to_degrees(),
            self.height_metres
        )
    }
}

#[cfg(any(test, feature = "approx"))]
impl approx::AbsDiffEq for LatLngHeight {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        f64::abs_diff_eq(&self.longitude_rad, &other.longitude_rad, epsilon)
            && f64::abs_diff_eq(&self.latitude_rad, &other.latitude_rad, epsilon)
            && f64::abs_diff_eq(&self.height_metres, &other.height_metres, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_from_degrees() {
        let pos = LatLngHeight::from_degrees(-26.703319, 116.670815, 337.83);
        assert_abs_diff_eq!(pos.latitude_rad, -0.46606083776035967, epsilon = 1e-15);
        assert_abs_diff_eq!(pos.longitude_rad, 116.670815_f64.to_radians());
        assert_abs_diff_eq!(pos.height_metres, 337.83);
    }

    #[test]
    fn test_mwa_is_close_to_the_published_site() {
        let published = LatLngHeight::from_degrees(-26.703319, 116.670815, 377.827);
        assert_abs_diff_eq!(LatLngHeight::mwa(), published, epsilon = 1e-6);
    }

    #[test]
    fn test_display() {
        let result = format!("{}", LatLngHeight::mwa());
        assert!(result.contains("latitude: -26.7033°"), "{result}");
    }
}
