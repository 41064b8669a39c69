use float_eq::assert_float_eq;
use gxbake_geometry::{
    Attribute, AttributeSet, DefaultMesh, Geometry, Primitive, PrimitiveType, Shape,
    TriangleMesh, Vector3, Vertex,
};
use gxbake_test_data::stl_cube;

fn vertex(x: f32, y: f32, z: f32) -> Vertex {
    Vertex::from_position(Vector3 { x, y, z })
}

// Checks the invariants every baked geometry must hold.
fn assert_baked<U>(geometry: &Geometry<U>) {
    let indices = geometry.model_indices();
    let vertices = geometry.model_vertices();
    let mut expected_offset = 0u32;

    for shape in geometry.shapes() {
        let (offset, count) = shape.vertex_offset_and_count();
        assert_eq!(offset, expected_offset, "ranges must be contiguous and ordered");
        assert_eq!(count as usize, 3 * shape.triangle_count());
        assert!((offset + count) as usize <= indices.len());
        expected_offset += count;

        for primitive in shape.primitives() {
            if primitive.kind().is_surface() {
                assert_eq!(primitive.kind(), PrimitiveType::Triangles);
                assert_eq!(primitive.vertices().len() % 3, 0);
            }
        }

        // No two distinct referenced vertices may be equal over the shape's attributes.
        let mut referenced: Vec<u32> =
            indices[offset as usize..(offset + count) as usize].to_vec();
        referenced.sort_unstable();
        referenced.dedup();
        for (i, a) in referenced.iter().enumerate() {
            for b in &referenced[i + 1..] {
                assert!(!vertices[*a as usize].eq_over(&vertices[*b as usize], shape.attributes()));
            }
        }
    }
    assert_eq!(expected_offset as usize, indices.len());
}

fn cube() -> DefaultMesh {
    gxbake_stl::parse_stl::<DefaultMesh>(&stl_cube().bytes).unwrap()
}

#[test]
fn bake_cube() {
    let mut geometry = cube();
    assert_eq!(geometry.triangle_count(), 12);
    let stats = geometry.create_vertex_array();

    assert_eq!(stats.shapes, 1);
    assert_eq!(stats.source_vertices, 36);
    // Corners are shared within a side but not across sides, since their normals differ.
    assert_eq!(stats.unique_vertices, 24);
    assert_eq!(geometry.model_indices().len(), 36);
    assert_eq!(geometry.triangle_count(), 12);
    assert_baked(&geometry);

    let c = geometry.shapes()[0].center_of_mass();
    for v in [c.x, c.y, c.z] {
        assert!(v > 0.0 && v < 20.0);
    }
}

#[test]
fn cube_positions_only_shares_corners() {
    let mut geometry = cube();
    *geometry.shapes_mut()[0].attributes_mut() = AttributeSet::position_only();
    geometry.create_vertex_array();

    assert_eq!(geometry.model_vertices().len(), 8);
    assert_baked(&geometry);
}

#[test]
fn mixed_shapes() {
    let mut geometry: Geometry<&'static str> = Geometry::new();

    // A fan and a strip covering the same unit square, plus a stray point.
    let mut square = Shape::new(AttributeSet::position_only());
    square.add_primitive(Primitive::with_vertices(
        PrimitiveType::TriangleFan,
        vec![
            vertex(0.0, 0.0, 0.0),
            vertex(1.0, 0.0, 0.0),
            vertex(1.0, 1.0, 0.0),
            vertex(0.0, 1.0, 0.0),
        ],
    ));
    square.add_primitive(Primitive::with_vertices(
        PrimitiveType::TriangleStrip,
        vec![
            vertex(0.0, 0.0, 0.0),
            vertex(1.0, 0.0, 0.0),
            vertex(0.0, 1.0, 0.0),
            vertex(1.0, 1.0, 0.0),
        ],
    ));
    square.add_primitive(Primitive::with_vertices(
        PrimitiveType::Points,
        vec![vertex(5.0, 5.0, 5.0)],
    ));
    square.set_user_data("square");
    let square = geometry.add_shape(square);

    // Too short to form a triangle.
    let mut degenerate = Shape::new(AttributeSet::position_only());
    degenerate.add_primitive(Primitive::with_vertices(
        PrimitiveType::TriangleStrip,
        vec![vertex(0.0, 0.0, 0.0), vertex(1.0, 0.0, 0.0)],
    ));
    let degenerate = geometry.add_shape(degenerate);

    // The same square again as a quad, in a shape of its own.
    let colors: AttributeSet = [Attribute::Position, Attribute::Color0]
        .into_iter()
        .collect();
    let mut quad = Shape::new(colors);
    let mut corners = vec![
        vertex(0.0, 0.0, 0.0),
        vertex(1.0, 0.0, 0.0),
        vertex(1.0, 1.0, 0.0),
        vertex(0.0, 1.0, 0.0),
    ];
    corners[0].colors[0] = [1.0, 0.0, 0.0, 1.0];
    quad.add_primitive(Primitive::with_vertices(PrimitiveType::Quads, corners));
    let quad = geometry.add_shape(quad);

    let stats = geometry.create_vertex_array();
    assert_eq!(stats.skipped_primitives, 1);
    assert_baked(&geometry);

    let square = geometry.shape(square).unwrap();
    assert_eq!(square.vertex_offset_and_count(), (0, 12));
    assert_eq!(square.user_data(), Some(&"square"));
    assert_eq!(geometry.shape(degenerate).unwrap().vertex_offset_and_count(), (12, 0));
    assert_eq!(geometry.shape(quad).unwrap().vertex_offset_and_count(), (12, 6));

    // The square shape reuses its 4 corners; the quad shape brings its own.
    assert_eq!(geometry.model_vertices().len(), 8);
    assert_eq!(&geometry.model_indices()[12..], &[4, 5, 6, 4, 6, 7]);

    let draws: Vec<_> = geometry.draw_ranges().map(|d| d.indices).collect();
    assert_eq!(draws, vec![0..12, 12..18]);

    // The stray point is part of the population the center is computed over.
    let c = square.center_of_mass();
    // 12 triangle corners with x summing to 6, plus the point at x = 5.
    assert_float_eq!(c.x, 11.0 / 13.0, abs <= 0.0001);
    assert_float_eq!(c.z, 5.0 / 13.0, abs <= 0.0001);
}

#[test]
fn cleanup_then_rebake_is_empty() {
    let mut geometry = cube();
    geometry.create_vertex_array();
    geometry.cleanup_vertex_array();
    geometry.cleanup_vertex_array();

    assert!(geometry.model_vertices().is_empty());
    assert!(geometry.model_indices().is_empty());
    assert!(geometry.shapes().iter().all(|s| s.primitives().is_empty()));

    // The raw data is gone, so a second bake has nothing to do.
    let stats = geometry.create_vertex_array();
    assert_eq!(stats.indices, 0);
    assert_eq!(geometry.shapes()[0].vertex_offset_and_count(), (0, 0));
}
