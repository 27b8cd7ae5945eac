use serde::Serialize;

/// Design air-void content, %.
pub const DEFAULT_TARGET_VTM: f64 = 4.0;

/// One specimen as seen by the optimum-content rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VtmPoint {
    /// Position of the specimen in the input table.
    pub index: usize,
    pub asphalt_percent: f64,
    pub vtm: f64,
}

/// Asphalt content interpolated between the two specimens straddling the target VTM.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BracketEstimate {
    pub asphalt_percent: f64,
    pub lower: VtmPoint,
    pub upper: VtmPoint,
}

/// Picks the point whose VTM is closest to `target`.
///
/// Points with a non-finite VTM are skipped. Ties go to the earliest point in input
/// order. Returns `None` when no point is eligible.
pub fn select_nearest(points: &[VtmPoint], target: f64) -> Option<VtmPoint> {
    nearest_position(points, target).map(|position| points[position])
}

/// Same rule as [`select_nearest`], returning the position within `points`.
pub fn nearest_position(points: &[VtmPoint], target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (position, point) in points.iter().enumerate().filter(|(_, p)| p.vtm.is_finite()) {
        let deviation = (point.vtm - target).abs();
        match best {
            Some((_, best_deviation)) if deviation >= best_deviation => {}
            _ => best = Some((position, deviation)),
        }
    }
    best.map(|(position, _)| position)
}

/// Linear interpolation of asphalt content at `target` VTM.
///
/// Points are ordered by asphalt content (stable for equal contents); the first
/// adjacent pair whose VTM values straddle the target is used. A point sitting
/// exactly on the target is returned as its own bracket. Returns `None` when the
/// target is not bracketed.
pub fn interpolate_bracketing(points: &[VtmPoint], target: f64) -> Option<BracketEstimate> {
    let mut ordered: Vec<VtmPoint> = points
        .iter()
        .filter(|p| p.vtm.is_finite() && p.asphalt_percent.is_finite())
        .copied()
        .collect();
    ordered.sort_by(|a, b| a.asphalt_percent.total_cmp(&b.asphalt_percent));

    let exact = |p: VtmPoint| BracketEstimate {
        asphalt_percent: p.asphalt_percent,
        lower: p,
        upper: p,
    };

    for pair in ordered.windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        let below = lower.vtm - target;
        let above = upper.vtm - target;
        if below == 0.0 {
            return Some(exact(lower));
        }
        if below * above < 0.0 {
            let slope = (upper.asphalt_percent - lower.asphalt_percent) / (upper.vtm - lower.vtm);
            return Some(BracketEstimate {
                asphalt_percent: lower.asphalt_percent + (target - lower.vtm) * slope,
                lower,
                upper,
            });
        }
    }

    ordered
        .last()
        .filter(|p| p.vtm == target)
        .map(|p| exact(*p))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(index: usize, asphalt_percent: f64, vtm: f64) -> VtmPoint {
        VtmPoint {
            index,
            asphalt_percent,
            vtm,
        }
    }

    #[test]
    fn select_nearest_picks_minimum_deviation() {
        let points = [
            point(0, 4.0, 6.1),
            point(1, 4.5, 4.8),
            point(2, 5.0, 3.7),
            point(3, 5.5, 2.9),
        ];
        assert_eq!(select_nearest(&points, DEFAULT_TARGET_VTM), Some(points[2]));
    }

    #[test]
    fn select_nearest_breaks_ties_by_earliest_index() {
        let points = [point(0, 4.0, 5.0), point(1, 5.0, 3.0), point(2, 6.0, 5.0)];
        assert_eq!(select_nearest(&points, 4.0).map(|p| p.index), Some(0));
    }

    #[test]
    fn select_nearest_skips_non_finite_vtm() {
        let points = [
            point(0, 4.0, f64::NAN),
            point(1, 4.5, f64::NEG_INFINITY),
            point(2, 5.0, 9.0),
        ];
        assert_eq!(select_nearest(&points, 4.0).map(|p| p.index), Some(2));
    }

    #[test]
    fn select_nearest_returns_none_without_eligible_points() {
        assert_eq!(select_nearest(&[], 4.0), None);
        assert_eq!(select_nearest(&[point(0, 5.0, f64::NAN)], 4.0), None);
    }

    #[test]
    fn select_nearest_does_not_interpolate() {
        let points = [point(0, 4.0, 5.0), point(1, 5.0, 3.2)];
        let selected = select_nearest(&points, 4.0).unwrap();
        assert_eq!(selected.asphalt_percent, 5.0);
    }

    #[test]
    fn nearest_position_is_relative_to_the_slice() {
        let points = [point(7, 4.5, 6.0), point(9, 5.0, 4.2), point(12, 5.5, 3.1)];
        assert_eq!(nearest_position(&points, 4.0), Some(1));
        assert_eq!(nearest_position(&[], 4.0), None);
    }

    #[test]
    fn bracketing_interpolates_between_straddling_specimens() {
        let points = [
            point(0, 5.0, 3.0),
            point(1, 4.0, 5.0),
            point(2, 6.0, 2.0),
        ];
        let estimate = interpolate_bracketing(&points, 4.0).unwrap();
        assert!((estimate.asphalt_percent - 4.5).abs() < 1e-12);
        assert_eq!(estimate.lower.index, 1);
        assert_eq!(estimate.upper.index, 0);
    }

    #[test]
    fn bracketing_returns_exact_hit() {
        let points = [point(0, 4.0, 6.0), point(1, 5.0, 4.0)];
        let estimate = interpolate_bracketing(&points, 4.0).unwrap();
        assert_eq!(estimate.asphalt_percent, 5.0);
        assert_eq!(estimate.lower, estimate.upper);
    }

    #[test]
    fn bracketing_returns_none_when_target_not_straddled() {
        let points = [point(0, 4.0, 6.0), point(1, 5.0, 5.0)];
        assert_eq!(interpolate_bracketing(&points, 4.0), None);
        assert_eq!(interpolate_bracketing(&[point(0, 4.0, 4.5)], 4.0), None);
    }
}
