// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A named interferometer: where it is, where its antennas are, and the
//! frequencies it observes at.

use std::path::Path;

use log::{debug, info};
use ndarray::prelude::*;
use thiserror::Error;

use crate::{
    grid::{uv_degrid_multi_freq, GridSpec, Kernel},
    layout::{read_layout, AntennaLayout, LayoutReadError},
    rotate_baselines, xyz_baselines, xyz_lambda, HADec, InterferometerError, LatLngHeight,
};

#[derive(Error, Debug)]
pub enum TelescopeError {
    #[error("Telescope '{0}' hasn't been configured with a location, layout and frequencies")]
    NotConfigured(String),

    #[error(transparent)]
    Layout(#[from] LayoutReadError),

    #[error(transparent)]
    Geometry(#[from] InterferometerError),
}

/// Everything derived from a telescope's configuration.
#[derive(Clone, Debug)]
struct ArrayGeometry {
    location: LatLngHeight,

    layout: AntennaLayout,

    freqs_hz: Vec<f64>,

    /// Geodetic XYZ of every antenna \[metres\], shape `(3, num_antennas)`.
    xyz: Array2<f64>,

    /// Every ordered baseline \[wavelengths\], shape
    /// `(num_freqs, 3, num_antennas²)`.
    xyz_lambda: Array3<f64>,
}

/// A named array. It's created empty with [`Telescope::new`] and given its
/// geometry with [`Telescope::configure`]; reconfiguring replaces everything
/// derived from the previous configuration.
#[derive(Clone, Debug)]
pub struct Telescope {
    name: String,

    geometry: Option<ArrayGeometry>,
}

impl Telescope {
    pub fn new<S: Into<String>>(name: S) -> Telescope {
        Telescope {
            name: name.into(),
            geometry: None,
        }
    }

    /// Give this telescope a location, antenna layout and observing
    /// frequencies \[Hz\]. The antenna XYZs and wavelength-scaled baselines
    /// are calculated and stored. On error, the telescope's previous
    /// configuration is untouched.
    pub fn configure(
        &mut self,
        location: LatLngHeight,
        layout: AntennaLayout,
        freqs_hz: &[f64],
    ) -> Result<(), TelescopeError> {
        let xyz = layout.to_xyz(location.latitude_rad)?;
        let baselines = xyz_baselines(xyz.view())?;
        let xyz_lambda = xyz_lambda(baselines.view(), freqs_hz)?;
        info!(
            "Configured telescope '{}' at {location} with {} antennas and {} frequencies",
            self.name,
            layout.num_antennas(),
            freqs_hz.len()
        );
        self.geometry = Some(ArrayGeometry {
            location,
            layout,
            freqs_hz: freqs_hz.to_vec(),
            xyz,
            xyz_lambda,
        });
        Ok(())
    }

    /// The same as [`Telescope::configure`], but the layout is read from a
    /// file (see [`read_layout`]).
    pub fn configure_from_file<P: AsRef<Path>>(
        &mut self,
        location: LatLngHeight,
        layout_file: P,
        freqs_hz: &[f64],
    ) -> Result<(), TelescopeError> {
        let layout = read_layout(layout_file)?;
        self.configure(location, layout, freqs_hz)
    }

    fn geometry(&self) -> Result<&ArrayGeometry, TelescopeError> {
        self.geometry
            .as_ref()
            .ok_or_else(|| TelescopeError::NotConfigured(self.name.clone()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_configured(&self) -> bool {
        self.geometry.is_some()
    }

    pub fn location(&self) -> Option<LatLngHeight> {
        self.geometry.as_ref().map(|g| g.location)
    }

    pub fn layout(&self) -> Option<&AntennaLayout> {
        self.geometry.as_ref().map(|g| &g.layout)
    }

    pub fn freqs_hz(&self) -> Option<&[f64]> {
        self.geometry.as_ref().map(|g| g.freqs_hz.as_slice())
    }

    pub fn xyz(&self) -> Option<ArrayView2<'_, f64>> {
        self.geometry.as_ref().map(|g| g.xyz.view())
    }

    pub fn xyz_lambda(&self) -> Option<ArrayView3<'_, f64>> {
        self.geometry.as_ref().map(|g| g.xyz_lambda.view())
    }

    /// Rotate the stored baselines to face `phase_centre`. The result has
    /// shape `(num_freqs, 3, num_antennas²)` and is in wavelengths, the same
    /// as [`crate::xyz_uvw`].
    pub fn uvw(&self, phase_centre: HADec) -> Result<Array3<f64>, TelescopeError> {
        let geometry = self.geometry()?;
        let uvws = rotate_baselines(geometry.xyz_lambda.view(), phase_centre)?;
        debug!(
            "Telescope '{}': calculated UVWs towards {phase_centre}",
            self.name
        );
        Ok(uvws)
    }

    /// Grid the uv coverage of every baseline and frequency towards
    /// `phase_centre`.
    pub fn uv_grid(
        &self,
        phase_centre: HADec,
        spec: GridSpec,
        kernel: Option<&Kernel>,
    ) -> Result<Array2<f64>, TelescopeError> {
        let uvws = self.uvw(phase_centre)?;
        Ok(uv_degrid_multi_freq(
            spec.max_lambda,
            spec.nside,
            uvws.view(),
            kernel,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{xyz_uvw, ENH};
    use approx::assert_abs_diff_eq;

    fn mwa_subset() -> AntennaLayout {
        AntennaLayout::new(
            vec![-149.785, -585.675, -565.439],
            vec![265.814, -101.530, 1071.476],
            vec![377.011, 375.212, 374.625],
        )
        .unwrap()
    }

    #[test]
    fn test_unconfigured_telescope() {
        let telescope = Telescope::new("MWA");
        assert_eq!(telescope.name(), "MWA");
        assert!(!telescope.is_configured());
        assert!(telescope.xyz().is_none());
        assert!(matches!(
            telescope.uvw(HADec::from_radians(0.0, 0.0)),
            Err(TelescopeError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_configure() {
        let mut telescope = Telescope::new("MWA");
        let location = LatLngHeight::from_degrees(-26.703319, 116.670815, 377.827);
        telescope
            .configure(location, mwa_subset(), &[150e6, 200e6])
            .unwrap();
        assert!(telescope.is_configured());
        assert_eq!(telescope.freqs_hz().unwrap(), &[150e6, 200e6]);
        assert_eq!(telescope.layout().unwrap().num_antennas(), 3);

        let xyz = telescope.xyz().unwrap();
        assert_eq!(xyz.dim(), (3, 3));
        assert_abs_diff_eq!(xyz[(0, 0)], 456.25006328090495, epsilon = 1e-10);
        assert_abs_diff_eq!(xyz[(2, 0)], 68.04598792853452, epsilon = 1e-10);

        let xyz_lambda = telescope.xyz_lambda().unwrap();
        assert_eq!(xyz_lambda.dim(), (2, 3, 9));
        // East-west component of antenna 0 minus antenna 1 at 200 MHz.
        assert_abs_diff_eq!(
            xyz_lambda[(1, 1, 1)],
            (-149.785 + 585.675) * 200e6 / crate::constants::VEL_C,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_failed_configure_keeps_previous_configuration() {
        let mut telescope = Telescope::new("MWA");
        telescope
            .configure(LatLngHeight::mwa(), mwa_subset(), &[150e6])
            .unwrap();
        let result = telescope.configure(LatLngHeight::mwa(), mwa_subset(), &[-1.0]);
        assert!(matches!(
            result,
            Err(TelescopeError::Geometry(InterferometerError::InvalidFrequency(_)))
        ));
        assert_eq!(telescope.freqs_hz().unwrap(), &[150e6]);
    }

    #[test]
    fn test_uvw_matches_xyz_uvw() {
        let mut telescope = Telescope::new("MWA");
        let freqs = [150e6, 180e6];
        telescope
            .configure(LatLngHeight::mwa(), mwa_subset(), &freqs)
            .unwrap();
        let phase_centre = HADec::from_degrees(15.0, -40.0);
        let uvws = telescope.uvw(phase_centre).unwrap();
        let expected = xyz_uvw(
            telescope.xyz().unwrap(),
            &freqs,
            phase_centre.ha,
            phase_centre.dec,
        )
        .unwrap();
        assert_abs_diff_eq!(uvws, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_configure_from_file() {
        let mut telescope = Telescope::new("MWA");
        telescope
            .configure_from_file(LatLngHeight::mwa(), "test_files/test_mwa.csv", &[150e6])
            .unwrap();
        let layout = telescope.layout().unwrap();
        assert_eq!(layout.names().unwrap()[2], "Tile013");

        let result =
            telescope.configure_from_file(LatLngHeight::mwa(), "test_files/nope.csv", &[150e6]);
        assert!(matches!(
            result,
            Err(TelescopeError::Layout(LayoutReadError::DoesNotExist(_)))
        ));
    }

    #[test]
    fn test_uv_grid() {
        // Two antennas 10 m apart east-west at 1 wavelength per 10 m gives
        // baselines of +-1 wavelength in u towards zenith.
        let freq = crate::constants::VEL_C / 10.0;
        let layout = AntennaLayout::from_enhs(&[
            ENH::default(),
            ENH {
                e: 10.0,
                n: 0.0,
                h: 0.0,
            },
        ])
        .unwrap();
        let location = LatLngHeight::mwa();
        let mut telescope = Telescope::new("pair");
        telescope.configure(location, layout, &[freq]).unwrap();

        let spec = GridSpec::new(2.0, 4).unwrap();
        let grid = telescope
            .uv_grid(HADec::zenith(location.latitude_rad), spec, None)
            .unwrap();
        assert_eq!(grid.dim(), (4, 4));
        // Four baselines, two of them auto-correlations at the origin.
        assert_abs_diff_eq!(grid.sum(), 4.0);
        assert_abs_diff_eq!(grid[(2, 2)], 2.0);
    }
}
