// geom/ - Geometry kernel
//
// Pure functions and value types shared by every effect.
// No state, no drawing - just math.

mod circle;
pub mod path;
mod point;
mod rect;

pub use circle::{Circle, Connector, metaball};
pub use path::{Path, Segment, polygon_centroid, smooth_closed_path};
pub use point::{Point, distance, vector_from_angle_length};
pub use rect::{Rect, Size};
