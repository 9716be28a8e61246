use crate::error::{OperationError, Result};
use crate::geometry::Polyline;
use crate::math::intersect_2d::{line_line_intersect_2d, point_at};
use crate::math::{left_normal, Point2, Vector2, TOLERANCE};

/// Maximum miter distance as a multiple of the half-width. When a join's
/// miter point would extend further than this, it is clamped along the miter
/// direction. A limit of 4.0 clips at ~30° turn angles (matches SVG default).
const MITER_LIMIT: f64 = 4.0;

/// Replaces each segment of the polyline by a closed quadrilateral `amount`
/// wide, centered on the segment.
///
/// The quadrilaterals are independent per segment: no joining or mitering
/// across segment boundaries (the "thick line" rendition of the path).
/// Degenerate zero-length segments are skipped.
///
/// # Errors
///
/// - `OperationError::InvalidInput` if fewer than 2 points are provided or
///   `amount` is not positive
/// - `OperationError::Failed` if every segment is degenerate
pub fn picture_frame(pline: &Polyline, amount: f64) -> Result<Vec<Polyline>> {
    if pline.len() < 2 {
        return Err(OperationError::InvalidInput(
            "at least 2 points are required for picture frame".to_owned(),
        )
        .into());
    }
    if amount <= TOLERANCE {
        return Err(
            OperationError::InvalidInput("width must be positive".to_owned()).into(),
        );
    }

    let h = amount / 2.0;
    let mut quads = Vec::with_capacity(pline.len() - 1);
    for s in pline.as_segments() {
        let Some(dir) = s.direction() else {
            continue;
        };
        let offset = left_normal(&dir) * h;

        let mut quad = Polyline::new();
        quad.add_point(s.start + offset);
        quad.add_point(s.end + offset);
        quad.add_point(s.end - offset);
        quad.add_point(s.start - offset);
        quad.add_point(s.start + offset);
        quads.push(quad);
    }

    if quads.is_empty() {
        return Err(OperationError::Failed("no valid segments to offset".to_owned()).into());
    }
    Ok(quads)
}

/// Merges a polyline's per-segment offset quadrilaterals into one continuous
/// closed outline (true stroke-to-fill).
///
/// Interior joins are mitered: adjacent offset edges are extended/trimmed to
/// meet at each shared vertex, with runaway miters at near-reversal joins
/// clamped to the miter limit. Path ends are squared off by default; with an
/// endcap angle they come to a point instead.
#[derive(Debug)]
pub struct Widen {
    points: Vec<Point2>,
    amount: f64,
    endcap_angle: Option<f64>,
}

impl Widen {
    /// Creates a new widen operation producing an outline `amount` wide.
    #[must_use]
    pub fn new(pline: &Polyline, amount: f64) -> Self {
        Self {
            points: pline.points.clone(),
            amount,
            endcap_angle: None,
        }
    }

    /// Miters the outline's ends to a point with the given tip angle
    /// (radians, in `(0, π)`) instead of squaring them off.
    ///
    /// A 60° angle gives the pointed endcaps of a six-pointed star.
    #[must_use]
    pub fn with_endcap_angle(mut self, angle: f64) -> Self {
        self.endcap_angle = Some(angle);
        self
    }

    /// Executes the operation, returning the closed offset outline (first
    /// point repeated as last).
    ///
    /// # Errors
    ///
    /// - `OperationError::InvalidInput` if fewer than 2 points are provided,
    ///   the width is not positive, or the path contains a zero-length
    ///   segment
    /// - `GeometryError::ParameterOutOfRange` if the endcap angle is outside
    ///   `(0, π)`
    pub fn execute(&self) -> Result<Polyline> {
        if self.points.len() < 2 {
            return Err(OperationError::InvalidInput(
                "at least 2 points are required for widen".to_owned(),
            )
            .into());
        }
        if self.amount <= TOLERANCE {
            return Err(
                OperationError::InvalidInput("width must be positive".to_owned()).into(),
            );
        }
        if let Some(angle) = self.endcap_angle {
            if angle <= 0.0 || angle >= std::f64::consts::PI {
                return Err(crate::error::GeometryError::ParameterOutOfRange {
                    parameter: "endcap_angle",
                    value: angle,
                    min: 0.0,
                    max: std::f64::consts::PI,
                }
                .into());
            }
        }

        let dirs = unit_directions(&self.points)?;
        let h = self.amount / 2.0;
        let left = miter_offset_points(&self.points, &dirs, h);
        let right = miter_offset_points(&self.points, &dirs, -h);

        // Walk out along the left side, back along the right, inserting tip
        // points at the turnarounds when an endcap angle is set.
        let mut outline = Polyline::new();
        outline.points.extend(left);

        if let Some(angle) = self.endcap_angle {
            let ext = h / (angle / 2.0).tan();
            let last = self.points[self.points.len() - 1];
            outline.add_point(last + dirs[dirs.len() - 1] * ext);
        }

        outline.points.extend(right.iter().rev());

        if let Some(angle) = self.endcap_angle {
            let ext = h / (angle / 2.0).tan();
            outline.add_point(self.points[0] - dirs[0] * ext);
        }

        let first = outline.points[0];
        outline.add_point(first);
        Ok(outline)
    }
}

/// Computes the unit direction of every segment of a point sequence.
///
/// # Errors
///
/// Returns `OperationError::InvalidInput` on a zero-length segment.
pub(crate) fn unit_directions(points: &[Point2]) -> Result<Vec<Vector2>> {
    let mut dirs = Vec::with_capacity(points.len() - 1);
    for w in points.windows(2) {
        let d = w[1] - w[0];
        let len = d.norm();
        if len < TOLERANCE {
            return Err(OperationError::InvalidInput(format!(
                "zero-length segment between ({}, {}) and ({}, {})",
                w[0].x, w[0].y, w[1].x, w[1].y
            ))
            .into());
        }
        dirs.push(d / len);
    }
    Ok(dirs)
}

/// Offsets a point sequence `h` to the left of its walking direction,
/// producing exactly one offset point per input vertex.
///
/// Interior vertices get the miter intersection of the adjacent offset
/// edges; a negative `h` offsets to the right. One point per vertex keeps
/// offset boundaries aligned with the path's own parametrization, which the
/// stitch generators rely on.
pub(crate) fn miter_offset_points(points: &[Point2], dirs: &[Vector2], h: f64) -> Vec<Point2> {
    let n = points.len();
    let mut out = Vec::with_capacity(n);

    out.push(points[0] + left_normal(&dirs[0]) * h);
    for i in 1..n - 1 {
        out.push(miter_corner(&points[i], &dirs[i - 1], &dirs[i], h));
    }
    out.push(points[n - 1] + left_normal(&dirs[n - 2]) * h);
    out
}

/// Intersects the two offset edges meeting at a vertex.
///
/// Falls back to the incoming edge's offset point when the edges are
/// parallel (collinear segments), and clamps the miter to `MITER_LIMIT`
/// half-widths for near-reversal joins.
fn miter_corner(corner: &Point2, dir_prev: &Vector2, dir_next: &Vector2, h: f64) -> Point2 {
    let off_prev = corner + left_normal(dir_prev) * h;
    let off_next = corner + left_normal(dir_next) * h;

    let raw = line_line_intersect_2d(&off_prev, dir_prev, &off_next, dir_next)
        .map_or(off_prev, |(t, _)| point_at(&off_prev, dir_prev, t));

    let v = raw - corner;
    let len = v.norm();
    let limit = MITER_LIMIT * h.abs();
    if len > limit && len > TOLERANCE {
        corner + v * (limit / len)
    } else {
        raw
    }
}
