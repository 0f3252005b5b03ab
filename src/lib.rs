// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Interferometer geometry: antenna layouts to baselines, UVWs, direction
//! cosines and gridded uv coverage.

pub mod constants;
pub mod error;
pub mod grid;
pub mod layout;
pub mod math;
pub mod pos;
pub mod telescope;

// Re-exports.
pub use error::InterferometerError;
pub use grid::{
    gauss_kernel, uv_degrid, uv_degrid_multi_freq, uv_degrid_named, GridSpec, Kernel, KernelShape,
};
pub use layout::{read_layout, AntennaLayout, LayoutReadError};
pub use pos::{
    earth::LatLngHeight,
    enh::{enh_xyz, ENH},
    hadec::HADec,
    lmn::{radec_lmn, LMN},
    radec::RADec,
    uvw::{uvw_rotation_matrix, UVW},
    xyz::{
        rotate_baselines, xyz_baselines, xyz_baselines_parallel, xyz_lambda, xyz_uvw,
        xyz_uvw_parallel, xyz_uvw_single_freq, XyzGeodetic,
    },
};
pub use telescope::{Telescope, TelescopeError};

pub use ndarray;
pub use rayon;

#[cfg(test)]
#[test]
fn layout_to_grid_works_as_expected() {
    use ndarray::array;

    let layout = array![
        [-149.785, -585.675, -565.439],
        [265.814, -101.530, 1071.476],
        [377.011, 375.212, 374.625]
    ];
    let latitude = constants::MWA_LAT_RAD;
    let xyz = enh_xyz(layout.view(), latitude).unwrap();
    let uvw = xyz_uvw_single_freq(xyz.view(), 150e6, 0.0, latitude).unwrap();
    assert_eq!(uvw.dim(), (3, 9));

    // Every baseline is shorter than 1 km, so fits within 1000 wavelengths
    // at 150 MHz (a wavelength of ~2 m).
    let grid = uv_degrid(1000.0, 64, uvw.view(), None).unwrap();
    approx::assert_abs_diff_eq!(grid.sum(), 9.0);
    // The auto-correlations land in the centre cell.
    assert!(grid[(32, 32)] >= 3.0);
}

#[cfg(test)]
#[test]
fn layout_file_to_uvw_regression() {
    use approx::assert_relative_eq;

    let layout = read_layout("test_files/test_mwa.txt").unwrap();
    let latitude = (-26.703319_f64).to_radians();
    let xyz = layout.to_xyz(latitude).unwrap();
    let uvws = xyz_uvw(xyz.view(), &[200e6, 300e6], 0.0, latitude).unwrap();
    assert_eq!(uvws.dim(), (2, 3, 9));

    // Antenna 0 minus antenna 1 at 200 MHz.
    assert_relative_eq!(uvws[(0, 0, 1)], 290.7945069118451, max_relative = 1e-9);
    assert_relative_eq!(uvws[(0, 1, 1)], 245.06553797293995, max_relative = 1e-9);
    assert_relative_eq!(uvws[(0, 2, 1)], 1.2001636145229355, max_relative = 1e-9);
    // Antenna 1 minus antenna 2 at 300 MHz.
    assert_relative_eq!(uvws[(1, 0, 5)], -20.25000909128952, max_relative = 1e-9);
    assert_relative_eq!(uvws[(1, 1, 5)], -1173.8180551560108, max_relative = 1e-9);
    assert_relative_eq!(uvws[(1, 2, 5)], 0.5874063716441356, max_relative = 1e-9);
}
