pub mod polyline;
pub mod segment;

pub use polyline::Polyline;
pub use segment::Segment;
