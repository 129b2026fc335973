mod circle;
mod cylinder;
mod ellipse;
mod infinite_line;
mod plane;
mod segment;
mod sphere;
mod tetrahedron;
mod triangle;

pub use circle::{Circle, Disk};
pub use cylinder::Cylinder;
pub use ellipse::{Ellipse, Frame};
pub use infinite_line::{InfiniteLine, InfiniteLine2, InfiniteLine3};
pub use plane::Plane;
pub(crate) use plane::orthonormal_complement;
pub use segment::{Segment, Segment2, Segment3};
pub use sphere::{Ball, Sphere};
pub use tetrahedron::Tetrahedron;
pub use triangle::{Triangle, Triangle2, Triangle3};
