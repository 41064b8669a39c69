mod attribute;
mod geometry;
mod primitive;
mod shape;
mod vertex;

pub use attribute::*;
pub use geometry::*;
pub use primitive::*;
pub use shape::*;
pub use vertex::*;

pub type Vector3 = cgmath::Vector3<f32>;

// We rely on Vector3 being repr(c).
static_assertions::assert_eq_size!(Vector3, [f32; 3]);
static_assertions::assert_eq_align!(Vector3, f32);

/// A reasonable default mesh to select for unopinionated consumers.
pub type DefaultMesh = Geometry;

/// A single facet as delivered by a loader.
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Triangle {
    /// Facet normal. Loaders that have no normal leave this as zero.
    pub normal: Vector3,
    pub p0: Vector3,
    pub p1: Vector3,
    pub p2: Vector3,
}

pub trait TriangleMesh: Sized {
    /// Creates a TriangleMesh from a list of facets.
    ///
    /// # Arguments
    ///
    /// * `triangles` - A vector of the triangles of the mesh.
    fn from_triangles(triangles: Vec<Triangle>) -> Self;

    /// Returns the number of triangles that comprises this mesh.
    fn triangle_count(&self) -> usize;

    /// Returns a slice that represents a series of triangles.
    ///
    /// As this is returning a slice, this will only return `Some` if the
    /// implementation already stores the mesh in this format.
    fn as_triangle_slice(&self) -> Option<&[Triangle]>;
}

impl TriangleMesh for Vec<Triangle> {
    fn from_triangles(triangles: Vec<Triangle>) -> Self {
        triangles
    }

    fn triangle_count(&self) -> usize {
        self.len()
    }

    fn as_triangle_slice(&self) -> Option<&[Triangle]> {
        Some(self.as_slice())
    }
}
