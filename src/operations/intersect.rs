use crate::geometry::{Polyline, Segment};

/// Computes every pairwise segment crossing among the input polylines.
///
/// Every unordered pair drawn from the inputs' segment decompositions is
/// tested with [`Segment::intersects_middle`], so shared endpoints and
/// vertex-adjacent segments never report. The result is a point bag (a
/// [`Polyline`] used for its vertices only, no implied connecting segments).
///
/// All-pairs O(n²) over the total segment count; no spatial index. A point
/// where three or more segments meet is reported once per crossing pair, not
/// de-duplicated.
#[must_use]
pub fn compute_intersections(polylines: &[Polyline]) -> Polyline {
    let segments: Vec<Segment> = polylines
        .iter()
        .flat_map(Polyline::as_segments)
        .collect();

    let mut bag = Polyline::new();
    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            if let Some(pt) = segments[i].intersects_middle(&segments[j]) {
                bag.add_point(pt);
            }
        }
    }
    bag
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point2;

    const TOL: f64 = 1e-9;

    fn pline(points: &[(f64, f64)]) -> Polyline {
        points.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn single_crossing() {
        let a = pline(&[(0.0, 0.0), (10.0, 0.0)]);
        let b = pline(&[(5.0, -5.0), (5.0, 5.0)]);
        let bag = compute_intersections(&[a, b]);
        assert_eq!(bag.len(), 1);
        assert!((bag.points[0].x - 5.0).abs() < TOL);
        assert!(bag.points[0].y.abs() < TOL);
    }

    #[test]
    fn shared_endpoints_not_reported() {
        // An L runs into a V at matching vertices: only true crossings count.
        let a = pline(&[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)]);
        let b = pline(&[(5.0, 5.0), (10.0, 0.0)]);
        let bag = compute_intersections(&[a, b]);
        assert!(bag.is_empty());
    }

    #[test]
    fn adjacent_segments_within_one_polyline_excluded() {
        let zig = pline(&[(0.0, 0.0), (5.0, 5.0), (10.0, 0.0)]);
        let bag = compute_intersections(&[zig]);
        assert!(bag.is_empty());
    }

    #[test]
    fn self_intersection_within_one_polyline() {
        // A path crossing over itself: segment 0 crosses segment 2.
        let p = pline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 5.0), (5.0, -5.0)]);
        let bag = compute_intersections(&[p]);
        assert_eq!(bag.len(), 1);
        let pt = bag.points[0];
        assert!(pt.y.abs() < TOL, "pt={pt:?}");
    }

    #[test]
    fn concurrent_lines_report_duplicates() {
        // Three segments through the origin: one hit per pair, three total.
        let a = pline(&[(-1.0, 0.0), (1.0, 0.0)]);
        let b = pline(&[(0.0, -1.0), (0.0, 1.0)]);
        let c = pline(&[(-1.0, -1.0), (1.0, 1.0)]);
        let bag = compute_intersections(&[a, b, c]);
        assert_eq!(bag.len(), 3);
        for pt in &bag.points {
            assert!(pt.x.abs() < TOL && pt.y.abs() < TOL, "pt={pt:?}");
        }
    }

    #[test]
    fn no_inputs_no_points() {
        assert!(compute_intersections(&[]).is_empty());
    }
}
