// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Interferometric direction-cosine coordinates.
//!
//! This coordinate system is discussed at length in Interferometry and
//! Synthesis in Radio Astronomy, Third Edition, Section 3: Analysis of the
//! Interferometer Response.

use std::f64::consts::TAU;

use log::trace;
use ndarray::prelude::*;

use super::{check_angle, radec::RADec, uvw::UVW};
use crate::InterferometerError;

/// (l,m,n) direction-cosine coordinates. There are no units (i.e.
/// dimensionless).
///
/// This coordinate system is discussed at length in Interferometry and
/// Synthesis in Radio Astronomy, Third Edition, Section 3: Analysis of the
/// Interferometer Response.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[allow(clippy::upper_case_acronyms)]
pub struct LMN {
    /// l coordinate \[dimensionless\]
    pub l: f64,
    /// m coordinate \[dimensionless\]
    pub m: f64,
    /// n coordinate \[dimensionless\]
    pub n: f64,
}

impl LMN {
    /// Get the dot product of a [`UVW`] with a [`LMN`], i.e. `2 * pi * (u * l +
    /// v * m + w * (n - 1))`. This is the phase of a unit point source at
    /// this position as seen by a baseline.
    pub fn dot(self, uvw: UVW) -> f64 {
        TAU * (uvw.u * self.l + uvw.v * self.m + uvw.w * (self.n - 1.0))
    }
}

/// Convert sky positions into direction cosines relative to the phase centre
/// (`ra0`, `dec0`). All angles are in radians.
///
/// `ra` and `dec` are broadcast against each other: they must have the same
/// length, or one of them must have length 1. The result has shape `(3, M)`
/// where `M` is the broadcast length; its rows are l, m and n.
pub fn radec_lmn(
    ra: ArrayView1<f64>,
    dec: ArrayView1<f64>,
    ra0: f64,
    dec0: f64,
) -> Result<Array2<f64>, InterferometerError> {
    check_angle("radec_lmn", "ra0", ra0)?;
    check_angle("radec_lmn", "dec0", dec0)?;
    let num_sources = match (ra.len(), dec.len()) {
        (a, b) if a == b => a,
        (1, b) => b,
        (a, 1) => a,
        (a, b) => {
            return Err(InterferometerError::ShapeMismatch {
                argument: "dec",
                function: "radec_lmn",
                expected: format!("length {a} or 1 (to broadcast against ra)"),
                received: format!("length {b}"),
            })
        }
    };
    trace!("Converting {num_sources} RADecs to LMN");

    // Whichever input has length 1 is stretched, as numpy would.
    let stretch = |a: &ArrayView1<f64>, i: usize| if a.len() == 1 { a[0] } else { a[i] };

    let (pc_s_dec, pc_c_dec) = dec0.sin_cos();
    let mut lmns = Array2::zeros((3, num_sources));
    for (i_source, mut lmn_col) in lmns.axis_iter_mut(Axis(1)).enumerate() {
        let radec = RADec {
            ra: stretch(&ra, i_source),
            dec: stretch(&dec, i_source),
        };
        let lmn = radec.to_lmn_inner(ra0, pc_s_dec, pc_c_dec);
        lmn_col[0] = lmn.l;
        lmn_col[1] = lmn.m;
        lmn_col[2] = lmn.n;
    }
    Ok(lmns)
}

#[cfg(any(test, feature = "approx"))]
impl approx::AbsDiffEq for LMN {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        f64::abs_diff_eq(&self.l, &other.l, epsilon)
            && f64::abs_diff_eq(&self.m, &other.m, epsilon)
            && f64::abs_diff_eq(&self.n, &other.n, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_lmn_dot() {
        let lmn = LMN {
            l: 0.5,
            m: 0.5,
            n: 0.707,
        };
        let uvw = UVW {
            u: 1.0,
            v: 2.0,
            w: 3.0,
        };
        assert_abs_diff_eq!(lmn.dot(uvw), 3.9018580757585224);
    }

    #[test]
    fn test_radec_lmn() {
        let ra = array![0.0, 1.0, 2.0, 3.0];
        let dec = array![-2.0, -1.0, 0.0, 1.0];
        let lmns = radec_lmn(ra.view(), dec.view(), 3.0, 0.0).unwrap();
        assert_eq!(lmns.dim(), (3, 4));

        let expected = array![
            [
                0.05872664492762098,
                -0.49129549643388193,
                -0.8414709848078965,
                0.0
            ],
            [
                -0.9092974268256817,
                -0.8414709848078965,
                0.0,
                0.8414709848078965
            ],
            [
                0.411982245665683,
                -0.2248450953661529,
                0.5403023058681398,
                0.5403023058681398
            ]
        ];
        assert_abs_diff_eq!(lmns, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_radec_lmn_matches_radec_to_lmn() {
        let phase_centre = RADec::from_degrees(60.0, -27.0);
        let radecs = [
            RADec::from_degrees(62.0, -27.5),
            RADec::from_degrees(55.0, -20.0),
            RADec::from_degrees(60.0, -27.0),
        ];
        let ra: Array1<f64> = radecs.iter().map(|r| r.ra).collect();
        let dec: Array1<f64> = radecs.iter().map(|r| r.dec).collect();
        let lmns = radec_lmn(ra.view(), dec.view(), phase_centre.ra, phase_centre.dec).unwrap();
        for (radec, lmn_col) in radecs.iter().zip(lmns.axis_iter(Axis(1))) {
            let expected = radec.to_lmn(phase_centre);
            assert_eq!(lmn_col[0], expected.l);
            assert_eq!(lmn_col[1], expected.m);
            assert_eq!(lmn_col[2], expected.n);
        }
    }

    #[test]
    fn test_radec_lmn_broadcasts() {
        let ra = array![0.1, 0.2, 0.3];
        let dec = array![-0.5];
        let lmns = radec_lmn(ra.view(), dec.view(), 0.0, -0.5).unwrap();
        assert_eq!(lmns.dim(), (3, 3));
        let expected = RADec::from_radians(0.2, -0.5).to_lmn(RADec::from_radians(0.0, -0.5));
        assert_abs_diff_eq!(lmns[[0, 1]], expected.l);
        assert_abs_diff_eq!(lmns[[1, 1]], expected.m);
        assert_abs_diff_eq!(lmns[[2, 1]], expected.n);

        // The other way around.
        let lmns = radec_lmn(dec.view(), ra.view(), 0.0, -0.5).unwrap();
        assert_eq!(lmns.dim(), (3, 3));
    }

    #[test]
    fn test_radec_lmn_rejects_incompatible_lengths() {
        let ra = array![0.1, 0.2, 0.3];
        let dec = array![-0.5, 0.5];
        let result = radec_lmn(ra.view(), dec.view(), 0.0, 0.0);
        assert!(matches!(
            result,
            Err(InterferometerError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_radec_lmn_rejects_bad_phase_centre() {
        let ra = array![0.1];
        let result = radec_lmn(ra.view(), ra.view(), f64::NAN, 0.0);
        assert!(matches!(
            result,
            Err(InterferometerError::InvalidAngle { argument: "ra0", .. })
        ));
    }
}
