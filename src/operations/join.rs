use crate::geometry::Polyline;
use crate::math::points_equal;

/// Merges directed chains wherever one polyline's end meets another's start.
///
/// Each input is a directed chain; whenever chain `i`'s last point equals
/// chain `j`'s first point (within tolerance) the two merge into one chain,
/// dropping the duplicated joint vertex. Merging repeats to a fixed point, so
/// it is transitive: A→B and B→C chain into a single A→C path.
///
/// Tie-break when several chains could merge at one endpoint: the first
/// matching `(i, j)` pair in current scan order wins (lowest surviving index
/// first), then the scan restarts. Deterministic for a given input order.
///
/// Chains that merge with nothing pass through unchanged, so a fully-joined
/// input is returned as-is (the operation is idempotent). A chain is never
/// merged with itself: closed loops survive intact.
#[must_use]
pub fn join_by_endpoints(polylines: Vec<Polyline>) -> Vec<Polyline> {
    let mut chains = polylines;
    while let Some((i, j)) = find_mergeable_pair(&chains) {
        let tail = chains.remove(j);
        let head = if j < i { i - 1 } else { i };
        chains[head].points.extend(tail.points.into_iter().skip(1));
    }
    chains
}

/// Finds the first pair `(i, j)` where chain `i` ends where chain `j` starts.
fn find_mergeable_pair(chains: &[Polyline]) -> Option<(usize, usize)> {
    for i in 0..chains.len() {
        if chains[i].len() < 2 {
            continue;
        }
        let Some(end) = chains[i].last() else {
            continue;
        };
        for (j, other) in chains.iter().enumerate() {
            if i == j || other.len() < 2 {
                continue;
            }
            if let Some(start) = other.first() {
                if points_equal(end, start) {
                    return Some((i, j));
                }
            }
        }
    }
    None
}
