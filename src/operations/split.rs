use crate::geometry::{Polyline, Segment};
use crate::math::distance_2d::point_to_segment_dist;
use crate::math::{points_equal, Point2, TOLERANCE};

/// Cuts a polyline at a point that lies on it.
///
/// - `p` off the polyline (beyond [`TOLERANCE`]) → `None`; a cut is never
///   fabricated.
/// - `p` at the first or last point → a single-element result equal to the
///   original (cutting at an endpoint splits nothing).
/// - otherwise → two pieces meeting at `p`. With `margin > 0` the segment on
///   each side of the cut is shortened by `margin / 2`, opening a gap of
///   `margin` between the pieces.
#[must_use]
pub fn split_at(pline: &Polyline, p: &Point2, margin: f64) -> Option<Vec<Polyline>> {
    let (seg, t) = locate(pline, p)?;

    let last_seg = pline.len() - 2;
    if (seg == 0 && t <= 0.0) || (seg == last_seg && t >= 1.0) {
        return Some(vec![pline.clone()]);
    }

    let q = point_on(pline, seg, t);
    let (head, tail) = cut(pline, seg, q, margin);
    Some(vec![head, tail])
}

/// Cuts a polyline at every point of `intersections` (a point bag) that lies
/// on it, left-to-right along the path.
///
/// Split points are ordered by path position (segment index, then parameter
/// on the segment — equivalent to cumulative arc length) before cutting, so
/// the result does not depend on the bag's ordering: `k` effective cuts yield
/// `k + 1` ordered pieces. Points off the path, at the path endpoints, or
/// coinciding with an earlier split point are skipped. `margin` opens a gap
/// at each cut as in [`split_at`].
#[must_use]
pub fn split_at_intersections(
    pline: &Polyline,
    intersections: &Polyline,
    margin: f64,
) -> Vec<Polyline> {
    if pline.len() < 2 {
        return vec![pline.clone()];
    }

    let mut locs: Vec<(usize, f64)> = intersections
        .points
        .iter()
        .filter_map(|p| locate(pline, p))
        .collect();
    locs.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));

    let mut pieces = Vec::with_capacity(locs.len() + 1);
    let mut remaining = pline.clone();

    for (seg, t) in locs {
        let q = point_on(pline, seg, t);
        // Re-split the tail piece; endpoint hits and points that fell into a
        // previous margin gap come back as single/None and are skipped.
        match split_at(&remaining, &q, margin) {
            Some(mut parts) if parts.len() == 2 => {
                let tail = parts.pop().unwrap_or_default();
                let head = parts.pop().unwrap_or_default();
                pieces.push(head);
                remaining = tail;
            }
            _ => {}
        }
    }

    pieces.push(remaining);
    pieces
}

/// Finds where `p` sits on the polyline as `(segment index, parameter)`.
///
/// Vertex hits are normalized to `t = 0` on the outgoing segment; the final
/// vertex reports as `(last_segment, 1.0)`. Returns `None` when `p` is not on
/// the path within [`TOLERANCE`].
fn locate(pline: &Polyline, p: &Point2) -> Option<(usize, f64)> {
    let pts = &pline.points;
    if pts.len() < 2 {
        return None;
    }

    // Exact vertex hits first, so a cut at a vertex reuses the vertex value.
    for (i, q) in pts.iter().enumerate() {
        if points_equal(q, p) {
            return Some(if i == pts.len() - 1 {
                (pts.len() - 2, 1.0)
            } else {
                (i, 0.0)
            });
        }
    }

    for i in 0..pts.len() - 1 {
        let a = pts[i];
        let b = pts[i + 1];
        if point_to_segment_dist(p, &a, &b) < TOLERANCE {
            let ab = b - a;
            let len_sq = ab.norm_squared();
            if len_sq < TOLERANCE * TOLERANCE {
                continue;
            }
            let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
            return Some((i, t));
        }
    }

    None
}

/// Evaluates the path position `(seg, t)` back to a point.
fn point_on(pline: &Polyline, seg: usize, t: f64) -> Point2 {
    let a = pline.points[seg];
    let b = pline.points[seg + 1];
    a + (b - a) * t
}

/// Severs the polyline at `q` on segment `seg` into head and tail pieces,
/// shortening each cut-adjacent segment by `margin / 2`.
fn cut(pline: &Polyline, seg: usize, q: Point2, margin: f64) -> (Polyline, Polyline) {
    let mut head = Polyline::from_points(pline.points[..=seg].to_vec());
    head.add_point_if_further_than(q, TOLERANCE);

    let mut tail = Polyline::new();
    tail.add_point(q);
    for &p in &pline.points[seg + 1..] {
        tail.add_point_if_further_than(p, TOLERANCE);
    }

    if margin > 0.0 {
        shorten_tail_end(&mut head, margin / 2.0);
        shorten_head_start(&mut tail, margin / 2.0);
    }

    (head, tail)
}

/// Pulls a polyline's last point back along its final segment.
fn shorten_tail_end(pline: &mut Polyline, amount: f64) {
    let n = pline.len();
    if n < 2 {
        return;
    }
    let mut s = Segment::new(pline.points[n - 2], pline.points[n - 1]);
    s.shorten_end_by(amount);
    pline.points[n - 1] = s.end;
}

/// Pushes a polyline's first point forward along its leading segment.
fn shorten_head_start(pline: &mut Polyline, amount: f64) {
    if pline.len() < 2 {
        return;
    }
    let mut s = Segment::new(pline.points[0], pline.points[1]);
    s.shorten_start_by(amount);
    pline.points[0] = s.start;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn pline(points: &[(f64, f64)]) -> Polyline {
        points.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    fn assert_points(actual: &Polyline, expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len(), "points={:?}", actual.points);
        for (pt, &(x, y)) in actual.points.iter().zip(expected) {
            assert!(
                (pt.x - x).abs() < TOL && (pt.y - y).abs() < TOL,
                "got ({}, {}), expected ({x}, {y})",
                pt.x,
                pt.y
            );
        }
    }

    // ── split_at ──

    #[test]
    fn split_at_interior_vertex() {
        let p = pline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let parts = split_at(&p, &Point2::new(10.0, 0.0), 0.0).unwrap();
        assert_eq!(parts.len(), 2);
        assert_points(&parts[0], &[(0.0, 0.0), (10.0, 0.0)]);
        assert_points(&parts[1], &[(10.0, 0.0), (10.0, 10.0)]);
    }

    #[test]
    fn split_at_interior_vertex_counts() {
        // Interior vertex index i on an n-point polyline: pieces of point
        // count i+1 and n-i, together covering every original point.
        let p = pline(&[(0.0, 0.0), (1.0, 0.0), (2.0, 1.0), (3.0, 1.0), (4.0, 0.0)]);
        let parts = split_at(&p, &Point2::new(2.0, 1.0), 0.0).unwrap();
        assert_eq!(parts[0].len(), 3);
        assert_eq!(parts[1].len(), 3);
        assert_eq!(*parts[0].last().unwrap(), *parts[1].first().unwrap());
    }

    #[test]
    fn split_at_mid_segment() {
        let p = pline(&[(0.0, 0.0), (10.0, 0.0)]);
        let parts = split_at(&p, &Point2::new(4.0, 0.0), 0.0).unwrap();
        assert_points(&parts[0], &[(0.0, 0.0), (4.0, 0.0)]);
        assert_points(&parts[1], &[(4.0, 0.0), (10.0, 0.0)]);
    }

    #[test]
    fn split_at_endpoint_returns_single() {
        let p = pline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let at_first = split_at(&p, &Point2::new(0.0, 0.0), 0.0).unwrap();
        let at_last = split_at(&p, &Point2::new(10.0, 10.0), 0.0).unwrap();
        assert_eq!(at_first.len(), 1);
        assert_eq!(at_last.len(), 1);
        assert_points(&at_first[0], &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    }

    #[test]
    fn split_at_off_path_returns_none() {
        let p = pline(&[(0.0, 0.0), (10.0, 0.0)]);
        assert!(split_at(&p, &Point2::new(5.0, 1.0), 0.0).is_none());
        assert!(split_at(&p, &Point2::new(11.0, 0.0), 0.0).is_none());
    }

    #[test]
    fn split_at_vertex_with_margin() {
        // Each adjacent segment is shortened by margin/2 = 1 along its own
        // direction, so the gap between the pieces totals the margin.
        let p = pline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let parts = split_at(&p, &Point2::new(10.0, 0.0), 2.0).unwrap();
        assert_points(&parts[0], &[(0.0, 0.0), (9.0, 0.0)]);
        assert_points(&parts[1], &[(10.0, 1.0), (10.0, 10.0)]);
    }

    #[test]
    fn split_at_margin_clamps_on_short_segments() {
        let p = pline(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let parts = split_at(&p, &Point2::new(1.0, 0.0), 10.0).unwrap();
        // margin/2 = 5 exceeds both adjacent segment lengths: each cut side
        // collapses onto the piece's surviving endpoint.
        assert_points(&parts[0], &[(0.0, 0.0), (0.0, 0.0)]);
        assert_points(&parts[1], &[(2.0, 0.0), (2.0, 0.0)]);
    }

    // ── split_at_intersections ──

    #[test]
    fn split_many_is_order_independent() {
        let p = pline(&[(0.0, 0.0), (10.0, 0.0)]);
        let forward = pline(&[(3.0, 0.0), (7.0, 0.0)]);
        let backward = pline(&[(7.0, 0.0), (3.0, 0.0)]);

        let a = split_at_intersections(&p, &forward, 0.0);
        let b = split_at_intersections(&p, &backward, 0.0);

        assert_eq!(a.len(), 3);
        assert_eq!(a, b);
        assert_points(&a[0], &[(0.0, 0.0), (3.0, 0.0)]);
        assert_points(&a[1], &[(3.0, 0.0), (7.0, 0.0)]);
        assert_points(&a[2], &[(7.0, 0.0), (10.0, 0.0)]);
    }

    #[test]
    fn split_many_skips_off_path_and_endpoints() {
        let p = pline(&[(0.0, 0.0), (10.0, 0.0)]);
        let bag = pline(&[(0.0, 0.0), (5.0, 3.0), (10.0, 0.0), (4.0, 0.0)]);
        let parts = split_at_intersections(&p, &bag, 0.0);
        assert_eq!(parts.len(), 2);
        assert_points(&parts[0], &[(0.0, 0.0), (4.0, 0.0)]);
        assert_points(&parts[1], &[(4.0, 0.0), (10.0, 0.0)]);
    }

    #[test]
    fn split_many_collapses_duplicate_points() {
        let p = pline(&[(0.0, 0.0), (10.0, 0.0)]);
        let bag = pline(&[(5.0, 0.0), (5.0, 0.0), (5.0, 0.0)]);
        let parts = split_at_intersections(&p, &bag, 0.0);
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn split_many_with_margin_opens_gaps() {
        let p = pline(&[(0.0, 0.0), (12.0, 0.0)]);
        let bag = pline(&[(4.0, 0.0), (8.0, 0.0)]);
        let parts = split_at_intersections(&p, &bag, 2.0);
        assert_eq!(parts.len(), 3);
        assert_points(&parts[0], &[(0.0, 0.0), (3.0, 0.0)]);
        assert_points(&parts[1], &[(5.0, 0.0), (7.0, 0.0)]);
        assert_points(&parts[2], &[(9.0, 0.0), (12.0, 0.0)]);
    }

    #[test]
    fn split_many_across_vertices() {
        let p = pline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let bag = pline(&[(10.0, 5.0), (5.0, 0.0)]);
        let parts = split_at_intersections(&p, &bag, 0.0);
        assert_eq!(parts.len(), 3);
        assert_points(&parts[0], &[(0.0, 0.0), (5.0, 0.0)]);
        assert_points(&parts[1], &[(5.0, 0.0), (10.0, 0.0), (10.0, 5.0)]);
        assert_points(&parts[2], &[(10.0, 5.0), (10.0, 10.0)]);
    }

    #[test]
    fn intersections_feed_splitting() {
        // The drawing pipeline: find crossings, then cut both paths there
        // with a margin so the resulting pieces clear each other.
        use crate::operations::intersect::compute_intersections;
        let a = pline(&[(0.0, 0.0), (10.0, 0.0)]);
        let b = pline(&[(5.0, -5.0), (5.0, 5.0)]);
        let bag = compute_intersections(&[a.clone(), b.clone()]);

        let pieces_a = split_at_intersections(&a, &bag, 1.0);
        let pieces_b = split_at_intersections(&b, &bag, 1.0);
        assert_points(&pieces_a[0], &[(0.0, 0.0), (4.5, 0.0)]);
        assert_points(&pieces_a[1], &[(5.5, 0.0), (10.0, 0.0)]);
        assert_points(&pieces_b[0], &[(5.0, -5.0), (5.0, -0.5)]);
        assert_points(&pieces_b[1], &[(5.0, 0.5), (5.0, 5.0)]);
    }

    #[test]
    fn split_many_empty_bag_passes_through() {
        let p = pline(&[(0.0, 0.0), (10.0, 0.0)]);
        let parts = split_at_intersections(&p, &Polyline::new(), 0.0);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0], p);
    }
}
