/// Absolute tolerance of the bisection in [`fill_water`].
pub const TOLERANCE: f64 = 1e-8;

/// Volume of water held below `ceiling` by a terrain of the given heights.
#[inline(always)]
pub fn volume(level: &[f64], ceiling: f64) -> f64 {
    level.iter().filter(|&&l| l < ceiling).map(|&l| ceiling - l).sum()
}

/// Pours `water` onto a terrain with heights `level` and returns the resulting water surface,
/// i.e. the smallest `c` in `[0, water]` with `sum(max(c - level[j], 0)) == water`.
///
/// The search is a bisection on `[0, water]` up to [`TOLERANCE`]. If even a surface at `water`
/// cannot hold all of it (in particular if `level` is empty), the result is `water`.
pub fn fill_water(level: &[f64], water: f64) -> f64 {
    let mut l = 0.0;
    let mut r = water;
    while r - l > TOLERANCE {
        let mid = (l + r) / 2.0;
        if volume(level, mid) >= water {
            r = mid;
        } else {
            l = mid;
        }
    }
    (l + r) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_terrain_splits_evenly() {
        let c = fill_water(&[0.0, 0.0, 0.0, 0.0], 1.0);
        assert!((c - 0.25).abs() < TOLERANCE);
    }

    #[test]
    fn single_basin_fills_to_water() {
        let c = fill_water(&[0.0], 1.0);
        assert!((c - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn uneven_terrain_fills_low_basins_first() {
        // 0.1 and 0.3 are flooded to 0.7, 0.9 stays dry
        let level = [0.1, 0.9, 0.3];
        let c = fill_water(&level, 1.0);
        assert!((c - 0.7).abs() < 1e-7);
        assert!((volume(&level, c) - 1.0).abs() < level.len() as f64 * TOLERANCE);
    }

    #[test]
    fn empty_terrain_saturates() {
        let c = fill_water(&[], 1.0);
        assert!((c - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn surface_is_capped_at_water() {
        let c = fill_water(&[0.95, 1.0], 1.0);
        assert!(c <= 1.0);
        assert!(volume(&[0.95, 1.0], c) < 1.0);
    }
}
