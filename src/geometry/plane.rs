use crate::error::Result;
use crate::math::{normalize, Point3, Vector3};

/// An infinite plane in 3D space.
///
/// Defined by an origin point and a unit normal. Two in-plane unit
/// directions (`u_dir`, `v_dir`) complete the normal into a right-handed
/// orthonormal frame: `u_dir x v_dir = normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    origin: Point3,
    normal: Vector3,
    u_dir: Vector3,
    v_dir: Vector3,
}

impl Plane {
    /// Creates a plane from an origin and a normal vector.
    ///
    /// The normal is normalized and the in-plane directions are computed
    /// automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal vector is zero-length.
    pub fn new(origin: Point3, normal: &Vector3) -> Result<Self> {
        let normal = normalize(normal)?;
        let (u_dir, v_dir) = orthonormal_complement(&normal);
        Ok(Self {
            origin,
            normal,
            u_dir,
            v_dir,
        })
    }

    /// Returns the origin point of the plane.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit normal of the plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Returns the first in-plane direction.
    #[must_use]
    pub fn u_dir(&self) -> &Vector3 {
        &self.u_dir
    }

    /// Returns the second in-plane direction.
    #[must_use]
    pub fn v_dir(&self) -> &Vector3 {
        &self.v_dir
    }

    /// Returns `d` in the plane equation `normal . x + d = 0`.
    #[must_use]
    pub fn plane_constant(&self) -> f64 {
        -self.normal.dot(&self.origin.coords)
    }
}

/// Completes a unit vector into a right-handed orthonormal frame.
///
/// Returns `(u, v)` such that `u x v = axis`.
pub(crate) fn orthonormal_complement(axis: &Vector3) -> (Vector3, Vector3) {
    // Choose a reference vector not parallel to the axis
    let reference = if axis.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let v = axis.cross(&reference).normalize();
    let u = v.cross(axis);
    (u, v)
}
