use ordered_float::OrderedFloat;

use crate::{Attribute, AttributeSet, Vector3};

pub const MAX_COLORS: usize = 2;
pub const MAX_TEX_COORDS: usize = 8;

/// A single vertex with every channel a shape may enable.
///
/// The layout is fixed so the baked vertex list can be handed to the GPU as-is.
/// Channels that are not enabled for the owning shape hold whatever the loader
/// left there and are ignored when comparing vertices.
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub colors: [[f32; 4]; MAX_COLORS],
    pub tex_coords: [[f32; 2]; MAX_TEX_COORDS],
    pub position_matrix_index: u32,
}

impl Vertex {
    pub fn from_position(position: Vector3) -> Self {
        Self {
            position: position.into(),
            ..Default::default()
        }
    }

    pub fn with_normal(mut self, normal: Vector3) -> Self {
        self.normal = normal.into();
        self
    }

    pub fn position(&self) -> Vector3 {
        self.position.into()
    }

    pub fn normal(&self) -> Vector3 {
        self.normal.into()
    }

    /// Projects this vertex onto the channels in `attributes`.
    ///
    /// Two vertices produce equal keys exactly when they agree on every enabled
    /// channel. Floats go through `OrderedFloat`, so `-0.0` matches `0.0` and
    /// NaN matches NaN.
    pub fn key(&self, attributes: &AttributeSet) -> VertexKey {
        let mut key = VertexKey::default();
        for attribute in attributes {
            match attribute {
                Attribute::PositionMatrixIndex => key.matrix_index = Some(self.position_matrix_index),
                Attribute::Position => key.push(&self.position),
                Attribute::Normal => key.push(&self.normal),
                Attribute::Color0 | Attribute::Color1 => {
                    if let Some(slot) = attribute.color_slot() {
                        key.push(&self.colors[slot]);
                    }
                }
                _ => {
                    if let Some(slot) = attribute.tex_coord_slot() {
                        key.push(&self.tex_coords[slot]);
                    }
                }
            }
        }
        key
    }

    /// Value equality restricted to the channels in `attributes`.
    pub fn eq_over(&self, other: &Vertex, attributes: &AttributeSet) -> bool {
        self.key(attributes) == other.key(attributes)
    }
}

/// Hashable projection of a [`Vertex`] onto a shape's enabled channels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VertexKey {
    components: Vec<OrderedFloat<f32>>,
    matrix_index: Option<u32>,
}

impl VertexKey {
    fn push(&mut self, values: &[f32]) {
        self.components
            .extend(values.iter().copied().map(OrderedFloat));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: f32, y: f32, z: f32) -> Vertex {
        Vertex::from_position(Vector3 { x, y, z })
    }

    #[test]
    fn inactive_channels_are_ignored() {
        let mut a = vertex(1.0, 2.0, 3.0);
        let mut b = vertex(1.0, 2.0, 3.0);
        a.normal = [0.0, 1.0, 0.0];
        b.normal = [1.0, 0.0, 0.0];
        a.tex_coords[4] = [0.25, 0.5];

        assert!(a.eq_over(&b, &AttributeSet::position_only()));

        let with_normal: AttributeSet = [Attribute::Position, Attribute::Normal]
            .into_iter()
            .collect();
        assert!(!a.eq_over(&b, &with_normal));
    }

    #[test]
    fn tex_coord_and_color_slots_are_distinct() {
        let mut a = vertex(0.0, 0.0, 0.0);
        let mut b = a;
        a.tex_coords[1] = [1.0, 1.0];
        b.tex_coords[2] = [1.0, 1.0];

        let tex1: AttributeSet = [Attribute::Position, Attribute::TexCoord1]
            .into_iter()
            .collect();
        assert!(!a.eq_over(&b, &tex1));

        a.colors[1] = [1.0, 0.0, 0.0, 1.0];
        let color0: AttributeSet = [Attribute::Position, Attribute::Color0]
            .into_iter()
            .collect();
        assert!(a.eq_over(&b, &color0));
    }

    #[test]
    fn matrix_index_participates_when_enabled() {
        let mut a = vertex(0.0, 0.0, 0.0);
        let b = a;
        a.position_matrix_index = 3;

        assert!(a.eq_over(&b, &AttributeSet::position_only()));
        let set: AttributeSet = [Attribute::PositionMatrixIndex, Attribute::Position]
            .into_iter()
            .collect();
        assert!(!a.eq_over(&b, &set));
    }

    #[test]
    fn signed_zero_and_nan_compare_equal() {
        let attributes = AttributeSet::position_only();
        assert!(vertex(0.0, 0.0, 0.0).eq_over(&vertex(-0.0, 0.0, 0.0), &attributes));
        assert!(vertex(f32::NAN, 0.0, 0.0).eq_over(&vertex(f32::NAN, 0.0, 0.0), &attributes));
    }

    #[test]
    fn vertex_is_tightly_packed() {
        // 3 + 3 + 2 * 4 + 8 * 2 floats, plus the matrix index.
        assert_eq!(std::mem::size_of::<Vertex>(), 31 * 4);
    }
}
