use std::{fs, io::Write, path::Path};

use anyhow::Context;
use gxbake_geometry::{AttributeSet, BakeStats, DefaultMesh, Geometry};

use crate::args;

pub fn bake_command(args: args::BakeArgs) -> anyhow::Result<()> {
    let mut geometry = gxbake_stl::read_stl::<DefaultMesh, _>(&args.model_path)?;
    if args.positions_only {
        for shape in geometry.shapes_mut() {
            *shape.attributes_mut() = AttributeSet::position_only();
        }
    }

    let stats = geometry.create_vertex_array();
    write_report(&mut std::io::stdout().lock(), &geometry, &stats)?;

    if let Some(output) = args.output {
        write_buffers(&output, &geometry)?;
    }

    // The buffers have been handed off; the staging copy is no longer needed.
    geometry.cleanup_vertex_array();
    Ok(())
}

fn write_report<W: Write, U>(
    f: &mut W,
    geometry: &Geometry<U>,
    stats: &BakeStats,
) -> std::io::Result<()> {
    for (id, shape) in geometry.shape_ids().zip(geometry.shapes()) {
        let range = shape.index_range();
        let c = shape.center_of_mass();
        writeln!(
            f,
            "shape {}: indices {}..{} ({} triangles), center ({}, {}, {}){}",
            id.index(),
            range.start,
            range.end,
            range.len() / 3,
            c.x,
            c.y,
            c.z,
            if shape.visible() { "" } else { ", hidden" }
        )?;
    }
    writeln!(
        f,
        "vertices: {} ({} before dedup)",
        stats.unique_vertices, stats.source_vertices
    )?;
    writeln!(f, "indices: {}", stats.indices)?;
    writeln!(f, "draws: {}", geometry.draw_ranges().count())?;
    Ok(())
}

fn write_buffers<P: AsRef<Path>, U>(dir: P, geometry: &Geometry<U>) -> anyhow::Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let vertices = dir.join("vertices.bin");
    fs::write(&vertices, geometry.vertex_bytes())
        .with_context(|| format!("writing {}", vertices.display()))?;
    let indices = dir.join("indices.bin");
    fs::write(&indices, geometry.index_bytes())
        .with_context(|| format!("writing {}", indices.display()))?;

    log::info!(
        "wrote {} vertex bytes and {} index bytes to {}",
        geometry.vertex_bytes().len(),
        geometry.index_bytes().len(),
        dir.display()
    );
    Ok(())
}
