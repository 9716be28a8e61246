use crate::math::distance_2d::point_to_segment_dist;
use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::{points_equal, Point2, Vector2, TOLERANCE};

use super::Polyline;

/// A straight line segment between two points.
///
/// Most operations expect a non-degenerate segment (`start != end`);
/// degenerate segments are reported as non-intersecting and are skipped by
/// direction-dependent operations instead of producing NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    /// Creates a new segment from two points.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Returns the segment length.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Returns the unit direction from `start` to `end`, or `None` for a
    /// degenerate segment.
    #[must_use]
    pub fn direction(&self) -> Option<Vector2> {
        let d = self.end - self.start;
        let len = d.norm();
        if len < TOLERANCE {
            return None;
        }
        Some(d / len)
    }

    /// Returns the segment midpoint.
    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        self.start + (self.end - self.start) * 0.5
    }

    /// Returns the slope Δy/Δx, or `None` for a vertical (or degenerate)
    /// segment.
    #[must_use]
    pub fn slope(&self) -> Option<f64> {
        let dx = self.end.x - self.start.x;
        if dx.abs() < TOLERANCE {
            return None;
        }
        Some((self.end.y - self.start.y) / dx)
    }

    /// Returns the y-intercept of the carrying line, or `None` when the
    /// slope is undefined.
    #[must_use]
    pub fn intercept(&self) -> Option<f64> {
        self.slope().map(|m| self.start.y - m * self.start.x)
    }

    /// Returns true if `p` lies on the segment (endpoints inclusive) within
    /// [`TOLERANCE`].
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        point_to_segment_dist(p, &self.start, &self.end) < TOLERANCE
    }

    /// Returns the intersection point with `other`, if the two segments cross
    /// within both segments' bounds (endpoints inclusive).
    ///
    /// Parallel, coincident, and degenerate cases return `None`.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> Option<Point2> {
        segment_segment_intersect_2d(&self.start, &self.end, &other.start, &other.end)
            .map(|(pt, _, _)| pt)
    }

    /// Like [`Self::intersects`], but rejects an intersection that coincides
    /// with an endpoint of either segment.
    ///
    /// Distinguishes true crossings from shared-endpoint adjacency.
    #[must_use]
    pub fn intersects_middle(&self, other: &Self) -> Option<Point2> {
        let pt = self.intersects(other)?;
        let at_endpoint = points_equal(&pt, &self.start)
            || points_equal(&pt, &self.end)
            || points_equal(&pt, &other.start)
            || points_equal(&pt, &other.end);
        if at_endpoint {
            None
        } else {
            Some(pt)
        }
    }

    /// Returns true if any endpoint of `self` equals any endpoint of `other`
    /// within [`TOLERANCE`].
    #[must_use]
    pub fn has_common_endpoint(&self, other: &Self) -> bool {
        points_equal(&self.start, &other.start)
            || points_equal(&self.start, &other.end)
            || points_equal(&self.end, &other.start)
            || points_equal(&self.end, &other.end)
    }

    /// Moves `start` toward `end` by `amount` along the segment direction.
    ///
    /// Clamps to `end` when `amount` meets or exceeds the segment length.
    /// No-op for a non-positive amount or a degenerate segment.
    pub fn shorten_start_by(&mut self, amount: f64) {
        let len = self.length();
        if amount <= 0.0 || len < TOLERANCE {
            return;
        }
        if amount >= len {
            self.start = self.end;
            return;
        }
        let dir = (self.end - self.start) / len;
        self.start += dir * amount;
    }

    /// Moves `end` toward `start` by `amount` along the segment direction.
    ///
    /// Clamps to `start` when `amount` meets or exceeds the segment length.
    /// No-op for a non-positive amount or a degenerate segment.
    pub fn shorten_end_by(&mut self, amount: f64) {
        let len = self.length();
        if amount <= 0.0 || len < TOLERANCE {
            return;
        }
        if amount >= len {
            self.end = self.start;
            return;
        }
        let dir = (self.start - self.end) / len;
        self.end += dir * amount;
    }

    /// Carves the segment into stations spaced `amount` apart, starting at
    /// `start`, with any remainder folded into the last span.
    ///
    /// The final span length is therefore in `[amount, 2·amount)`. When the
    /// whole segment is shorter than `2·amount` (or `amount` is not positive)
    /// the result is just `[start, end]`.
    #[must_use]
    pub fn subdivide(&self, amount: f64) -> Polyline {
        let mut result = Polyline::new();
        result.add_point(self.start);

        let len = self.length();
        if amount > TOLERANCE && len >= 2.0 * amount {
            if let Some(dir) = self.direction() {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let steps = ((len / amount) + TOLERANCE).floor() as u32;
                for i in 1..steps {
                    result.add_point(self.start + dir * (amount * f64::from(i)));
                }
            }
        }

        result.add_point(self.end);
        result
    }
}
