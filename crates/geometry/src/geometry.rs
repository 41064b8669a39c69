use std::collections::HashMap;
use std::ops::Range;

use crate::{
    Attribute, AttributeSet, Primitive, PrimitiveType, Shape, ShapeId, Triangle, TriangleMesh,
    Vector3, Vertex, VertexKey,
};

/// Counters gathered while baking a [`Geometry`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BakeStats {
    pub shapes: usize,
    /// Triangle-list vertices before deduplication.
    pub source_vertices: usize,
    /// Vertices appended to the global vertex list.
    pub unique_vertices: usize,
    /// Indices appended to the global index list.
    pub indices: usize,
    /// Primitives left out because they have no area (lines, points).
    pub skipped_primitives: usize,
}

/// An indexed draw for one visible shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRange {
    pub shape: ShapeId,
    pub indices: Range<u32>,
}

/// All of the geometry for a model.
///
/// Shapes are filled in by a loader with raw primitives. Baking
/// ([`Geometry::create_vertex_array`]) collapses them into one vertex list and
/// one index list that can be uploaded to the GPU in one go, with each shape
/// owning a contiguous run of the index list.
#[derive(Debug, Clone)]
pub struct Geometry<U = ()> {
    shapes: Vec<Shape<U>>,
    // All the vertex indices in the model, in shape order.
    model_indices: Vec<u32>,
    // All the vertices in the model, deduplicated per shape.
    model_vertices: Vec<Vertex>,
}

impl<U> Default for Geometry<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> Geometry<U> {
    pub fn new() -> Self {
        Self {
            shapes: Vec::new(),
            model_indices: Vec::new(),
            model_vertices: Vec::new(),
        }
    }

    pub fn add_shape(&mut self, shape: Shape<U>) -> ShapeId {
        self.shapes.push(shape);
        ShapeId(self.shapes.len() - 1)
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape<U>> {
        self.shapes.get(id.0)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape<U>> {
        self.shapes.get_mut(id.0)
    }

    pub fn shapes(&self) -> &[Shape<U>] {
        self.shapes.as_slice()
    }

    pub fn shapes_mut(&mut self) -> &mut [Shape<U>] {
        self.shapes.as_mut_slice()
    }

    pub fn shape_ids(&self) -> impl Iterator<Item = ShapeId> {
        (0..self.shapes.len()).map(ShapeId)
    }

    pub fn model_indices(&self) -> &[u32] {
        self.model_indices.as_slice()
    }

    pub fn model_vertices(&self) -> &[Vertex] {
        self.model_vertices.as_slice()
    }

    /// The global vertex list as raw bytes, ready for a vertex buffer.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.model_vertices)
    }

    /// The global index list as raw bytes, ready for a `u32` index buffer.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.model_indices)
    }

    /// Appends `vertices` to the global vertex list and returns the index of
    /// the first appended vertex.
    ///
    /// No deduplication happens here.
    pub fn add_vertices<I: IntoIterator<Item = Vertex>>(&mut self, vertices: I) -> u32 {
        let base = index_u32(self.model_vertices.len());
        self.model_vertices.extend(vertices);
        base
    }

    /// Bakes every shape into the global vertex and index lists.
    ///
    /// Shapes are processed in order. Each shape's primitives are triangulated
    /// in place, then its vertices are deduplicated against each other (never
    /// against other shapes) using the shape's enabled attributes. The shape
    /// records where its indices start and how many there are, and its center
    /// of mass is recomputed from the triangulated vertices.
    ///
    /// Any previously baked lists are discarded first.
    pub fn create_vertex_array(&mut self) -> BakeStats {
        self.model_vertices.clear();
        self.model_indices.clear();

        let mut stats = BakeStats {
            shapes: self.shapes.len(),
            ..Default::default()
        };

        for n in 0..self.shapes.len() {
            let shape = &mut self.shapes[n];
            let mut skipped = 0;
            for primitive in shape.primitives_mut().iter_mut() {
                primitive.triangulate();
                if primitive.kind() != PrimitiveType::Triangles {
                    skipped += 1;
                }
            }
            if skipped > 0 {
                log::warn!("shape {}: skipping {} primitives without area", n, skipped);
            }
            stats.skipped_primitives += skipped;

            let (local_vertices, local_indices) =
                dedup_shape(shape.attributes(), shape.primitives());
            let unique = local_vertices.len();
            stats.source_vertices += local_indices.len();
            stats.unique_vertices += unique;

            let base = self.add_vertices(local_vertices);
            let first_index_offset = index_u32(self.model_indices.len());
            self.model_indices
                .extend(local_indices.iter().map(|i| i.saturating_add(base)));
            let index_count = index_u32(local_indices.len());

            let shape = &mut self.shapes[n];
            shape.set_index_range(first_index_offset, index_count);
            shape.calculate_center_of_mass();

            log::debug!(
                "shape {}: {} indices at {}, {} unique vertices at {}",
                n,
                index_count,
                first_index_offset,
                unique,
                base
            );
        }

        stats.indices = stats.source_vertices;
        log::info!(
            "baked {} shapes: {} vertices ({} before dedup), {} indices",
            stats.shapes,
            stats.unique_vertices,
            stats.source_vertices,
            stats.indices
        );
        stats
    }

    /// Drops the global lists and every shape's primitives.
    ///
    /// The raw primitives are gone afterwards; baking again requires the loader
    /// to refill the shapes. Calling this on an empty geometry does nothing.
    pub fn cleanup_vertex_array(&mut self) {
        self.model_vertices = Vec::new();
        self.model_indices = Vec::new();
        for shape in self.shapes.iter_mut() {
            *shape.primitives_mut() = Vec::new();
        }
    }

    /// The indexed draws a renderer should issue, in shape order, skipping
    /// shapes that are hidden or empty.
    pub fn draw_ranges(&self) -> impl Iterator<Item = DrawRange> + '_ {
        self.shapes
            .iter()
            .enumerate()
            .filter(|(_, shape)| shape.visible())
            .map(|(i, shape)| DrawRange {
                shape: ShapeId(i),
                indices: shape.index_range(),
            })
            .filter(|draw| !draw.indices.is_empty())
    }
}

// Converts a buffer length to a `u32` index, clamping at `u32::MAX`.
fn index_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| {
        log::warn!("{} entries exceed the u32 index range; clamping", len);
        u32::MAX
    })
}

// Builds the shape-local vertex list and the indices into it.
fn dedup_shape(attributes: &AttributeSet, primitives: &[Primitive]) -> (Vec<Vertex>, Vec<u32>) {
    let mut lookup: HashMap<VertexKey, u32> = HashMap::new();
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for triangle in primitives.iter().flat_map(|p| p.triangles()) {
        for vertex in triangle {
            let index = *lookup.entry(vertex.key(attributes)).or_insert_with(|| {
                vertices.push(vertex);
                index_u32(vertices.len() - 1)
            });
            indices.push(index);
        }
    }
    (vertices, indices)
}

impl<U> TriangleMesh for Geometry<U> {
    /// Builds a geometry with a single shape holding one triangle list.
    ///
    /// Facet normals are enabled as an attribute when any facet has a
    /// non-zero normal.
    fn from_triangles(triangles: Vec<Triangle>) -> Self {
        let zero = Vector3 {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        };
        let mut attributes = AttributeSet::position_only();
        if triangles.iter().any(|t| t.normal != zero) {
            attributes.insert(Attribute::Normal);
        }

        let mut primitive = Primitive::new(PrimitiveType::Triangles);
        primitive.vertices_mut().reserve(triangles.len() * 3);
        for t in &triangles {
            for p in [t.p0, t.p1, t.p2] {
                primitive.push(Vertex::from_position(p).with_normal(t.normal));
            }
        }

        let mut shape = Shape::new(attributes);
        shape.add_primitive(primitive);
        let mut geometry = Geometry::new();
        geometry.add_shape(shape);
        geometry
    }

    fn triangle_count(&self) -> usize {
        if self.model_indices.is_empty() {
            self.shapes.iter().map(Shape::triangle_count).sum()
        } else {
            self.model_indices.len() / 3
        }
    }

    fn as_triangle_slice(&self) -> Option<&[Triangle]> {
        None
    }
}
