pub mod intersect;
pub mod join;
pub mod offset;
pub mod split;
pub mod stitch;

pub use intersect::compute_intersections;
pub use join::join_by_endpoints;
pub use offset::{picture_frame, Widen};
pub use split::{split_at, split_at_intersections};
pub use stitch::{satin_stitch, simple_satin_stitch};
