// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Gridding of uv samples, with optional convolution kernels.

pub mod degrid;
pub mod kernel;

pub use degrid::{uv_degrid, uv_degrid_multi_freq, uv_degrid_named, GridSpec};
pub use kernel::{gauss_kernel, Kernel, KernelShape};
