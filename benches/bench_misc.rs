// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Misc Benchmarks

use criterion::*;
use radio_dreams::{
    constants::MWA_LAT_RAD,
    ndarray::{Array1, Array2},
    radec_lmn, uv_degrid, xyz_baselines, xyz_baselines_parallel, xyz_uvw, xyz_uvw_parallel,
    Kernel,
};

/// A pseudo-random `(3, num_ants)` layout spread over a few km.
fn fake_xyz(num_ants: usize) -> Array2<f64> {
    Array2::from_shape_fn((3, num_ants), |(axis, i)| {
        let x = (i * 7919 + axis * 104729) as f64;
        (x * 0.618034).fract() * 3000.0 - 1500.0
    })
}

fn misc(c: &mut Criterion) {
    let xyz = fake_xyz(128);
    let freqs: Vec<f64> = (0..24).map(|i| 150e6 + i as f64 * 1.28e6).collect();

    // Is the parallel xyz_uvw really worth it?
    c.bench_function("xyz_uvw", |b| {
        b.iter(|| xyz_uvw(black_box(xyz.view()), &freqs, 0.0, MWA_LAT_RAD))
    });

    c.bench_function("xyz_uvw_parallel", |b| {
        b.iter(|| xyz_uvw_parallel(black_box(xyz.view()), &freqs, 0.0, MWA_LAT_RAD))
    });

    c.bench_function("xyz_baselines", |b| {
        b.iter(|| xyz_baselines(black_box(xyz.view())))
    });

    c.bench_function("xyz_baselines_parallel", |b| {
        b.iter(|| xyz_baselines_parallel(black_box(xyz.view())))
    });

    c.bench_function("radec_lmn", |b| {
        let ra = Array1::linspace(0.0, 1.0, 100000);
        let dec = Array1::linspace(-1.0, 0.0, 100000);
        b.iter(|| radec_lmn(ra.view(), dec.view(), 0.5, -0.5))
    });

    // The kernel dominates gridding time; compare a single cell with a 7x7
    // Gaussian.
    let uvws = xyz_uvw(xyz.view(), &freqs[..1], 0.0, MWA_LAT_RAD).unwrap();
    let uvw = uvws.index_axis(radio_dreams::ndarray::Axis(0), 0);
    c.bench_function("uv_degrid no kernel", |b| {
        b.iter(|| uv_degrid(2000.0, 512, black_box(uvw), None))
    });

    let kernel = Kernel::gaussian(2.0, 7).unwrap();
    c.bench_function("uv_degrid gaussian kernel", |b| {
        b.iter(|| uv_degrid(2000.0, 512, black_box(uvw), Some(&kernel)))
    });
}

criterion_group!(benches, misc);
criterion_main!(benches);
