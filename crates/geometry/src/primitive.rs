use crate::Vertex;

/// How the vertices of a primitive are assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveType {
    /// Every three vertices form a triangle.
    #[default]
    Triangles,
    /// Each vertex after the second forms a triangle with the two before it.
    TriangleStrip,
    /// Each vertex after the second forms a triangle with the previous vertex
    /// and the first one.
    TriangleFan,
    /// Every four vertices form a quad.
    Quads,
    Lines,
    LineStrip,
    Points,
}

impl PrimitiveType {
    /// Whether this kind produces triangles once triangulated.
    pub fn is_surface(self) -> bool {
        matches!(
            self,
            PrimitiveType::Triangles
                | PrimitiveType::TriangleStrip
                | PrimitiveType::TriangleFan
                | PrimitiveType::Quads
        )
    }
}

/// A typed run of vertices; one drawable unit of a shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Primitive {
    kind: PrimitiveType,
    vertices: Vec<Vertex>,
}

impl Primitive {
    pub fn new(kind: PrimitiveType) -> Self {
        Self {
            kind,
            vertices: Vec::new(),
        }
    }

    pub fn with_vertices(kind: PrimitiveType, vertices: Vec<Vertex>) -> Self {
        Self { kind, vertices }
    }

    pub fn kind(&self) -> PrimitiveType {
        self.kind
    }

    pub fn vertices(&self) -> &[Vertex] {
        self.vertices.as_slice()
    }

    pub fn vertices_mut(&mut self) -> &mut Vec<Vertex> {
        &mut self.vertices
    }

    pub fn push(&mut self, vertex: Vertex) {
        self.vertices.push(vertex)
    }

    /// Number of triangles this primitive contributes, in its current form.
    pub fn triangle_count(&self) -> usize {
        let n = self.vertices.len();
        match self.kind {
            PrimitiveType::Triangles => n / 3,
            PrimitiveType::TriangleStrip | PrimitiveType::TriangleFan => n.saturating_sub(2),
            PrimitiveType::Quads => (n / 4) * 2,
            PrimitiveType::Lines | PrimitiveType::LineStrip | PrimitiveType::Points => 0,
        }
    }

    /// Iterates the triangles of a triangle list.
    ///
    /// Yields nothing for any other kind; call [`Primitive::triangulate`] first.
    pub fn triangles(&self) -> impl Iterator<Item = [Vertex; 3]> + '_ {
        let vertices: &[Vertex] = if self.kind == PrimitiveType::Triangles {
            &self.vertices
        } else {
            &[]
        };
        vertices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Rewrites the vertices as a plain triangle list.
    ///
    /// Strips alternate the order of the first two vertices on odd triangles so
    /// every emitted triangle keeps the winding of the first. Fans share the
    /// first vertex as a hub. Fewer than 3 vertices produce an empty list.
    ///
    /// Line and point kinds have no area and are left untouched.
    pub fn triangulate(&mut self) {
        let triangulated = match self.kind {
            PrimitiveType::Triangles => {
                let whole = self.vertices.len() - self.vertices.len() % 3;
                if whole != self.vertices.len() {
                    log::warn!(
                        "dropping {} trailing vertices from triangle list",
                        self.vertices.len() - whole
                    );
                    self.vertices.truncate(whole);
                }
                return;
            }
            PrimitiveType::TriangleStrip => triangulate_strip(&self.vertices),
            PrimitiveType::TriangleFan => triangulate_fan(&self.vertices),
            PrimitiveType::Quads => triangulate_quads(&self.vertices),
            PrimitiveType::Lines | PrimitiveType::LineStrip | PrimitiveType::Points => return,
        };
        self.vertices = triangulated;
        self.kind = PrimitiveType::Triangles;
    }
}

fn triangulate_strip(v: &[Vertex]) -> Vec<Vertex> {
    let count = v.len().saturating_sub(2);
    let mut out = Vec::with_capacity(count * 3);
    for i in 0..count {
        if i % 2 == 0 {
            out.extend_from_slice(&[v[i], v[i + 1], v[i + 2]]);
        } else {
            out.extend_from_slice(&[v[i + 1], v[i], v[i + 2]]);
        }
    }
    out
}

fn triangulate_fan(v: &[Vertex]) -> Vec<Vertex> {
    let count = v.len().saturating_sub(2);
    let mut out = Vec::with_capacity(count * 3);
    for i in 1..=count {
        out.extend_from_slice(&[v[0], v[i], v[i + 1]]);
    }
    out
}

fn triangulate_quads(v: &[Vertex]) -> Vec<Vertex> {
    let quads = v.chunks_exact(4);
    if !quads.remainder().is_empty() {
        log::warn!(
            "dropping {} trailing vertices from quad list",
            quads.remainder().len()
        );
    }
    let mut out = Vec::with_capacity(quads.len() * 6);
    for q in quads {
        out.extend_from_slice(&[q[0], q[1], q[2], q[0], q[2], q[3]]);
    }
    out
}
