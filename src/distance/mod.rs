//! Closest points and distances between primitives.
//!
//! Every function returns the distance first, followed by the closest
//! point on each argument in argument order. Signed variants encode the
//! side of the query relative to the primitive orientation.

mod ellipse;
mod linear;
mod round;
mod segment;
mod tetrahedron;
mod triangle;

pub use crate::math::point_point_distance;
pub use ellipse::{point_ellipse_distance, MAX_BISECTION_ITERATIONS};
pub use linear::{
    point_line_distance, point_line_signed_distance, point_plane_distance,
    point_plane_signed_distance, point_segment_distance,
};
pub use round::{
    point_ball_distance, point_circle_distance, point_circle_signed_distance,
    point_cylinder_distance, point_disk_distance, point_sphere_distance,
    point_sphere_signed_distance,
};
pub use segment::{segment_line_distance, segment_segment_distance};
pub use tetrahedron::point_tetrahedron_distance;
pub use triangle::{
    line_triangle_distance, point_triangle_distance, point_triangle_distance_2d,
    point_triangle_signed_distance, segment_triangle_distance, triangle_triangle_distance,
    triangle_triangle_distance_between_non_conformal_parts,
};
