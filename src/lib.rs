//! Robust geometric kernel: exact orientation predicates, mensuration,
//! closest-point distances and intersections between basic primitives in
//! two and three dimensions.
//!
//! Every function is a pure computation over value types. Predicate
//! constants are initialized lazily on first use; call
//! [`math::predicates::initialize`] at startup to pay that cost up front.

pub mod distance;
pub mod error;
pub mod geometry;
pub mod intersection;
pub mod math;
pub mod position;

pub use error::{GeokernError, Result};
