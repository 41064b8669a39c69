use byteorder::{LittleEndian, WriteBytesExt};

pub struct TestModel {
    pub bytes: Vec<u8>,
    pub triangle_count: usize,
}

type Facet = ([f32; 3], [[f32; 3]; 3]);

// An axis-aligned cube from 0 to `size` on every axis, two facets per side,
// wound counter-clockwise when seen from outside.
fn cube_facets(size: f32) -> Vec<Facet> {
    let s = size;
    let c = |x: f32, y: f32, z: f32| [x * s, y * s, z * s];
    let quads: [([f32; 3], [[f32; 3]; 4]); 6] = [
        ([0.0, 0.0, -1.0], [c(0., 0., 0.), c(0., 1., 0.), c(1., 1., 0.), c(1., 0., 0.)]),
        ([0.0, 0.0, 1.0], [c(0., 0., 1.), c(1., 0., 1.), c(1., 1., 1.), c(0., 1., 1.)]),
        ([0.0, -1.0, 0.0], [c(0., 0., 0.), c(1., 0., 0.), c(1., 0., 1.), c(0., 0., 1.)]),
        ([0.0, 1.0, 0.0], [c(0., 1., 0.), c(0., 1., 1.), c(1., 1., 1.), c(1., 1., 0.)]),
        ([-1.0, 0.0, 0.0], [c(0., 0., 0.), c(0., 0., 1.), c(0., 1., 1.), c(0., 1., 0.)]),
        ([1.0, 0.0, 0.0], [c(1., 0., 0.), c(1., 1., 0.), c(1., 1., 1.), c(1., 0., 1.)]),
    ];
    quads
        .iter()
        .flat_map(|(n, q)| [(*n, [q[0], q[1], q[2]]), (*n, [q[0], q[2], q[3]])])
        .collect()
}

fn binary_stl(facets: &[Facet]) -> Vec<u8> {
    let mut out = vec![0u8; 80];
    // Writing into a Vec cannot fail.
    out.write_u32::<LittleEndian>(facets.len() as u32).unwrap();
    for (normal, points) in facets {
        for v in std::iter::once(normal).chain(points.iter()) {
            for f in v {
                out.write_f32::<LittleEndian>(*f).unwrap();
            }
        }
        out.write_u16::<LittleEndian>(0).unwrap();
    }
    out
}

fn ascii_stl(name: &str, facets: &[Facet]) -> Vec<u8> {
    let mut out = format!("solid {}\n", name);
    for (n, points) in facets {
        out.push_str(&format!("  facet normal {} {} {}\n", n[0], n[1], n[2]));
        out.push_str("    outer loop\n");
        for p in points {
            out.push_str(&format!("      vertex {} {} {}\n", p[0], p[1], p[2]));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }
    out.push_str(&format!("endsolid {}\n", name));
    out.into_bytes()
}

/// A 20mm cube as a binary STL.
pub fn stl_cube() -> TestModel {
    let facets = cube_facets(20.0);
    TestModel {
        bytes: binary_stl(&facets),
        triangle_count: facets.len(),
    }
}

/// The same 20mm cube as an ASCII STL.
pub fn stl_cube_ascii() -> TestModel {
    let facets = cube_facets(20.0);
    TestModel {
        bytes: ascii_stl("cube", &facets),
        triangle_count: facets.len(),
    }
}
