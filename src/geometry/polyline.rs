use crate::math::distance_2d::point_to_segment_dist;
use crate::math::{points_equal, Matrix3, Point2, TOLERANCE};

use super::Segment;

/// An ordered sequence of points interpreted as consecutive connected
/// segments.
///
/// A closed path repeats its first point as the last. A `Polyline` owns its
/// point buffer exclusively; transformations produce new sibling polylines
/// rather than sharing storage.
///
/// Also used as a plain point bag by the intersection engine (no implied
/// connecting segments in that role).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point2>,
}

impl Polyline {
    /// Creates an empty polyline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a polyline from an existing point sequence.
    #[must_use]
    pub fn from_points(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the polyline has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the first point, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Point2> {
        self.points.first()
    }

    /// Returns the last point, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Point2> {
        self.points.last()
    }

    /// Appends a point to the path.
    pub fn add_point(&mut self, p: Point2) {
        self.points.push(p);
    }

    /// Appends `p` only if it is at least `threshold` away from the current
    /// tail.
    ///
    /// This is the primary defense against degenerate zero-length segments
    /// entering the model. Returns true if the point was added.
    pub fn add_point_if_further_than(&mut self, p: Point2, threshold: f64) -> bool {
        if let Some(last) = self.points.last() {
            if (p - last).norm() < threshold {
                return false;
            }
        }
        self.points.push(p);
        true
    }

    /// Inserts a point at `index`, shifting later points toward the tail.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert_point(&mut self, index: usize, p: Point2) {
        self.points.insert(index, p);
    }

    /// Appends a segment, skipping the duplicate joint when the current tail
    /// already equals `start` (within [`TOLERANCE`]).
    pub fn add_segment(&mut self, start: Point2, end: Point2) {
        match self.points.last() {
            Some(last) if points_equal(last, &start) => {}
            _ => self.points.push(start),
        }
        self.points.push(end);
    }

    /// Returns the ordered segments connecting consecutive points.
    ///
    /// This is a computed projection: `len() - 1` segments for `len() >= 2`,
    /// empty otherwise.
    #[must_use]
    pub fn as_segments(&self) -> Vec<Segment> {
        if self.points.len() < 2 {
            return Vec::new();
        }
        self.points
            .windows(2)
            .map(|w| Segment::new(w[0], w[1]))
            .collect()
    }

    /// Returns the total arc length of the path.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| (w[1] - w[0]).norm())
            .sum()
    }

    /// Returns true if the path is closed (first point repeated as last).
    #[must_use]
    pub fn is_closed(&self) -> bool {
        if self.points.len() < 3 {
            return false;
        }
        points_equal(&self.points[0], &self.points[self.points.len() - 1])
    }

    /// Returns a new polyline with the points in reverse order.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            points: self.points.iter().rev().copied().collect(),
        }
    }

    /// Applies a homogeneous 2D affine map to every point in place.
    ///
    /// `t` maps `[x y 1]ᵀ`; the bottom row is ignored. Matches the transform
    /// semantics of the rendering layer, so split/offset computations stay in
    /// consistent coordinates.
    pub fn apply_affine_transform(&mut self, t: &Matrix3) {
        for p in &mut self.points {
            let x = t[(0, 0)] * p.x + t[(0, 1)] * p.y + t[(0, 2)];
            let y = t[(1, 0)] * p.x + t[(1, 1)] * p.y + t[(1, 2)];
            *p = Point2::new(x, y);
        }
    }

    /// Returns a copy with interior vertices dropped when they are collinear
    /// with their neighbors within [`TOLERANCE`].
    ///
    /// Endpoints are always preserved, the point count never grows, and the
    /// path shape is unchanged beyond tolerance. Runs of collinear vertices
    /// and coincident duplicates collapse in a single pass.
    #[must_use]
    pub fn remove_redundant(&self) -> Self {
        if self.points.len() < 3 {
            return self.clone();
        }

        let mut kept = Vec::with_capacity(self.points.len());
        kept.push(self.points[0]);

        for i in 1..self.points.len() - 1 {
            let prev = kept[kept.len() - 1];
            let next = self.points[i + 1];
            // Clamped distance keeps out-and-back vertices: a vertex beyond
            // `next` on the same carrying line is a real shape feature.
            if point_to_segment_dist(&self.points[i], &prev, &next) >= TOLERANCE {
                kept.push(self.points[i]);
            }
        }

        kept.push(self.points[self.points.len() - 1]);
        Self { points: kept }
    }
}

impl FromIterator<Point2> for Polyline {
    fn from_iter<I: IntoIterator<Item = Point2>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Polyline {
    type Item = Point2;
    type IntoIter = std::vec::IntoIter<Point2>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a Polyline {
    type Item = &'a Point2;
    type IntoIter = std::slice::Iter<'a, Point2>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
