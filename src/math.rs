// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Some helper mathematics for indexing the N² baselines of an array.

/// Get the index of the baseline between antennas `ant1` and `ant2` (antenna
/// `ant1` minus antenna `ant2`). Baseline 0 _is_ between antenna 0 and itself.
#[inline]
pub fn baseline_index(total_num_ants: usize, ant1: usize, ant2: usize) -> usize {
    ant1 * total_num_ants + ant2
}

/// Convert a baseline index into its constituent antenna indices. This is the
/// inverse of [`baseline_index`]. Returns [`None`] if `baseline` isn't one of
/// the `total_num_ants²` baselines (including when there are no antennas).
#[inline]
pub fn baseline_to_antennas(total_num_ants: usize, baseline: usize) -> Option<(usize, usize)> {
    if baseline >= total_num_ants.checked_mul(total_num_ants)? {
        return None;
    }
    Some((baseline / total_num_ants, baseline % total_num_ants))
}

/// From the number of baselines (every ordered pair of antennas, including
/// each antenna with itself), get the number of antennas. Returns [`None`] if
/// the number of baselines isn't a perfect square.
#[inline]
pub fn num_antennas_from_num_baselines(num_baselines: usize) -> Option<usize> {
    let n = (num_baselines as f64).sqrt().round() as usize;
    (n * n == num_baselines).then_some(n)
}

/// Get the indices of the unique cross-correlation baselines (`ant1 < ant2`)
/// among the N² ordered baselines. Real instruments only correlate these; use
/// them to select columns out of UVW arrays when the auto-correlations and
/// mirrored baselines aren't wanted.
pub fn cross_baseline_indices(total_num_ants: usize) -> Vec<usize> {
    let num_cross = total_num_ants * total_num_ants.saturating_sub(1) / 2;
    let mut indices = Vec::with_capacity(num_cross);
    for ant1 in 0..total_num_ants {
        for ant2 in ant1 + 1..total_num_ants {
            indices.push(baseline_index(total_num_ants, ant1, ant2));
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_to_antennas() {
        // Let's pretend we have 128 tiles, therefore 16384 baselines. Check that
        // our function does the right thing.
        for n in [1, 3, 126, 128] {
            let mut bl_index = 0;
            for ant1 in 0..n {
                for ant2 in 0..n {
                    assert_eq!(baseline_index(n, ant1, ant2), bl_index);
                    let (a1, a2) = baseline_to_antennas(n, bl_index).unwrap();
                    assert_eq!(ant1, a1, "Expected ant1 = {ant1}, got {a1}. bl = {bl_index}");
                    assert_eq!(ant2, a2, "Expected ant2 = {ant2}, got {a2}. bl = {bl_index}");
                    bl_index += 1;
                }
            }
        }
    }

    #[test]
    fn test_baseline_to_antennas_out_of_range() {
        assert_eq!(baseline_to_antennas(0, 0), None);
        assert_eq!(baseline_to_antennas(0, 5), None);
        assert_eq!(baseline_to_antennas(3, 9), None);
        assert_eq!(baseline_to_antennas(3, 8), Some((2, 2)));
        assert_eq!(baseline_to_antennas(usize::MAX, 1), None);
    }

    #[test]
    fn test_num_antennas_from_num_baselines() {
        assert_eq!(num_antennas_from_num_baselines(16384), Some(128));
        assert_eq!(num_antennas_from_num_baselines(9), Some(3));
        assert_eq!(num_antennas_from_num_baselines(1), Some(1));
        assert_eq!(num_antennas_from_num_baselines(0), Some(0));
        assert_eq!(num_antennas_from_num_baselines(8128), None);
    }

    #[test]
    fn test_cross_baseline_indices() {
        assert_eq!(cross_baseline_indices(3), vec![1, 2, 5]);
        assert!(cross_baseline_indices(1).is_empty());
        assert!(cross_baseline_indices(0).is_empty());

        let indices = cross_baseline_indices(128);
        assert_eq!(indices.len(), 8128);
        for bl in indices {
            let (ant1, ant2) = baseline_to_antennas(128, bl).unwrap();
            assert!(ant1 < ant2);
        }
    }
}
