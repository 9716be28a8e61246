use super::{Point2, TOLERANCE};

/// Returns the angle formed at `vertex` by the rays toward `first` and `third`.
///
/// The angle is unsigned, in `[0, π]`, and independent of ray orientation.
/// Computed as `atan2(|cross|, dot)` of the two ray vectors, which stays
/// well-conditioned for near-parallel rays where an `acos` form would not.
///
/// Returns `0.0` when either ray is degenerate (endpoint coincides with the
/// vertex).
#[must_use]
pub fn angle_at(first: &Point2, vertex: &Point2, third: &Point2) -> f64 {
    let u = first - vertex;
    let v = third - vertex;

    if u.norm() < TOLERANCE || v.norm() < TOLERANCE {
        return 0.0;
    }

    let cross = u.x * v.y - u.y * v.x;
    let dot = u.x * v.x + u.y * v.y;
    cross.abs().atan2(dot)
}
