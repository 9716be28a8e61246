use crate::error::{OperationError, Result};
use crate::geometry::{Polyline, Segment};
use crate::math::{left_normal, Point2, TOLERANCE};

use super::offset::{miter_offset_points, unit_directions};

/// Threads a zigzag between the raw per-segment offset boundaries of the
/// path, one crossing point every `interval` of arc length.
///
/// Each segment's boundaries are its own `±width/2` normal offsets (the
/// picture-frame rectangles), with no join handling: zigzag density and
/// alignment visibly distort at acute joins. [`satin_stitch`] is the
/// join-aware variant.
///
/// # Errors
///
/// `OperationError::InvalidInput` if fewer than 2 points are provided,
/// `width`/`interval` is not positive, or the path contains a zero-length
/// segment.
pub fn simple_satin_stitch(pline: &Polyline, width: f64, interval: f64) -> Result<Polyline> {
    validate(pline, width, interval)?;

    let dirs = unit_directions(&pline.points)?;
    let h = width / 2.0;

    // Raw boundaries, one independent pair of offset edges per segment.
    let mut left = Vec::with_capacity(dirs.len());
    let mut right = Vec::with_capacity(dirs.len());
    for (i, dir) in dirs.iter().enumerate() {
        let offset = left_normal(dir) * h;
        let a = pline.points[i];
        let b = pline.points[i + 1];
        left.push((a + offset, b + offset));
        right.push((a - offset, b - offset));
    }

    Ok(thread_zigzag(&pline.points, &left, &right, interval))
}

/// Threads a zigzag between the mitered offset boundaries of the path, one
/// crossing point every `interval` of arc length.
///
/// The boundaries are re-derived with the same per-vertex miter joins as
/// [`super::Widen`], so the two sides are continuous polylines and acute
/// interior angles produce well-formed, non-overlapping stitches.
///
/// # Errors
///
/// `OperationError::InvalidInput` if fewer than 2 points are provided,
/// `width`/`interval` is not positive, or the path contains a zero-length
/// segment.
pub fn satin_stitch(pline: &Polyline, width: f64, interval: f64) -> Result<Polyline> {
    validate(pline, width, interval)?;

    let dirs = unit_directions(&pline.points)?;
    let h = width / 2.0;
    let left_pts = miter_offset_points(&pline.points, &dirs, h);
    let right_pts = miter_offset_points(&pline.points, &dirs, -h);

    // Mitered boundaries share their per-vertex points across segments.
    let left: Vec<_> = left_pts.windows(2).map(|w| (w[0], w[1])).collect();
    let right: Vec<_> = right_pts.windows(2).map(|w| (w[0], w[1])).collect();

    Ok(thread_zigzag(&pline.points, &left, &right, interval))
}

fn validate(pline: &Polyline, width: f64, interval: f64) -> Result<()> {
    if pline.len() < 2 {
        return Err(OperationError::InvalidInput(
            "at least 2 points are required for satin stitch".to_owned(),
        )
        .into());
    }
    if width <= TOLERANCE {
        return Err(
            OperationError::InvalidInput("width must be positive".to_owned()).into(),
        );
    }
    if interval <= TOLERANCE {
        return Err(
            OperationError::InvalidInput("interval must be positive".to_owned()).into(),
        );
    }
    Ok(())
}

/// Walks stations every `interval` of arc length along the path and emits
/// one point per station, alternating between the left and right boundary.
///
/// `left`/`right` hold each segment's boundary edge as an endpoint pair; a
/// station at fraction `t` of a segment lands at fraction `t` of that
/// segment's boundary edge. Station spacing follows the
/// [`Segment::subdivide`] rule (remainder folded into each segment's final
/// span); a station shared by two adjacent segments is emitted once, using
/// the incoming segment's boundary. The side alternation carries across
/// segment boundaries.
fn thread_zigzag(
    points: &[Point2],
    left: &[(Point2, Point2)],
    right: &[(Point2, Point2)],
    interval: f64,
) -> Polyline {
    let mut out = Polyline::new();
    let mut on_left = true;

    for i in 0..left.len() {
        let seg = Segment::new(points[i], points[i + 1]);
        let len = seg.length();
        let stations = seg.subdivide(interval);
        let skip = usize::from(i > 0);

        for station in stations.points.iter().skip(skip) {
            let t = if len < TOLERANCE {
                0.0
            } else {
                (station - points[i]).norm() / len
            };
            let (b0, b1) = if on_left { left[i] } else { right[i] };
            out.add_point(b0 + (b1 - b0) * t);
            on_left = !on_left;
        }
    }

    out
}
