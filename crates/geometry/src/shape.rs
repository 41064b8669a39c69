use std::ops::Range;

use crate::{AttributeSet, Primitive, Vector3};

/// Stable handle to a [`Shape`] owned by a [`crate::Geometry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub(crate) usize);

impl ShapeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A set of primitives sharing the same enabled attributes.
///
/// After a bake the shape knows where its indices live in the geometry's
/// global index list. `U` is an optional payload the embedding application can
/// attach, such as a material handle.
#[derive(Debug, Clone)]
pub struct Shape<U = ()> {
    attributes: AttributeSet,
    primitives: Vec<Primitive>,
    first_index_offset: u32,
    index_count: u32,
    center_of_mass: Vector3,
    visible: bool,
    user_data: Option<U>,
}

impl<U> Shape<U> {
    pub fn new(attributes: AttributeSet) -> Self {
        Self {
            attributes,
            primitives: Vec::new(),
            first_index_offset: 0,
            index_count: 0,
            center_of_mass: Vector3 {
                x: 0.0,
                y: 0.0,
                z: 0.0,
            },
            visible: true,
            user_data: None,
        }
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeSet {
        &mut self.attributes
    }

    pub fn primitives(&self) -> &[Primitive] {
        self.primitives.as_slice()
    }

    pub fn primitives_mut(&mut self) -> &mut Vec<Primitive> {
        &mut self.primitives
    }

    pub fn add_primitive(&mut self, primitive: Primitive) {
        self.primitives.push(primitive)
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible
    }

    /// The center of mass as of the last call to
    /// [`Shape::calculate_center_of_mass`].
    pub fn center_of_mass(&self) -> Vector3 {
        self.center_of_mass
    }

    /// Recomputes the center of mass as the mean position of every vertex
    /// currently held by the primitives. An empty shape sits at the origin.
    ///
    /// The result is cached and is not refreshed when primitives change.
    pub fn calculate_center_of_mass(&mut self) -> Vector3 {
        let mut sum = Vector3 {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        };
        let mut count = 0usize;
        for vertex in self.primitives.iter().flat_map(|p| p.vertices()) {
            sum += vertex.position();
            count += 1;
        }
        self.center_of_mass = if count == 0 { sum } else { sum / count as f32 };
        self.center_of_mass
    }

    /// Returns `(first_index_offset, index_count)` into the global index list.
    pub fn vertex_offset_and_count(&self) -> (u32, u32) {
        (self.first_index_offset, self.index_count)
    }

    /// The baked range of this shape in the global index list.
    pub fn index_range(&self) -> Range<u32> {
        self.first_index_offset..self.first_index_offset + self.index_count
    }

    pub(crate) fn set_index_range(&mut self, first_index_offset: u32, index_count: u32) {
        self.first_index_offset = first_index_offset;
        self.index_count = index_count;
    }

    /// Number of triangles the primitives hold in their current form.
    pub fn triangle_count(&self) -> usize {
        self.primitives.iter().map(Primitive::triangle_count).sum()
    }

    pub fn user_data(&self) -> Option<&U> {
        self.user_data.as_ref()
    }

    pub fn user_data_mut(&mut self) -> Option<&mut U> {
        self.user_data.as_mut()
    }

    /// Attaches `data`, returning whatever was attached before.
    pub fn set_user_data(&mut self, data: U) -> Option<U> {
        self.user_data.replace(data)
    }

    pub fn take_user_data(&mut self) -> Option<U> {
        self.user_data.take()
    }
}
