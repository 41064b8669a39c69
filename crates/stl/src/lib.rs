use anyhow::{bail, Context};
use byteorder::{LittleEndian, ReadBytesExt};
use gxbake_geometry::{Triangle, TriangleMesh, Vector3};
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

fn read_vector<T: Read>(f: &mut T) -> std::io::Result<Vector3> {
    Ok(Vector3 {
        x: f.read_f32::<LittleEndian>()?,
        y: f.read_f32::<LittleEndian>()?,
        z: f.read_f32::<LittleEndian>()?,
    })
}

// Header, triangle count, then 50 bytes per facet: 12 floats and a u16.
const BINARY_HEADER_LEN: u64 = 84;
const BINARY_FACET_LEN: u64 = 50;

fn binary_len(n_triangles: u32) -> u64 {
    BINARY_HEADER_LEN + BINARY_FACET_LEN * n_triangles as u64
}

fn read_binary<M: TriangleMesh, T: Read + Seek>(f: &mut T) -> anyhow::Result<M> {
    let stream_len = f.seek(SeekFrom::End(0))?;

    // Binary files start with an 80 byte header. There is no defined structure for this
    // header but some implementations will stash some metadata in this header. For now
    // we'll just skip the header and load the geometry.
    f.seek(SeekFrom::Start(80))?;

    // Immediately following the header is an unsigned 32-bit integer that indicates the
    // number of triagles that follow.
    let n_triangles = f
        .read_u32::<LittleEndian>()
        .context("STL file is missing its triangle count")?;
    // Check the count against the data actually present before allocating for it.
    if stream_len < binary_len(n_triangles) {
        bail!(
            "truncated STL: header claims {} facets ({} bytes) but the file has {} bytes",
            n_triangles,
            binary_len(n_triangles),
            stream_len
        );
    }
    let n_triangles = n_triangles as usize;

    let mut data = Vec::<Triangle>::with_capacity(n_triangles);
    for i in 0..n_triangles {
        // Each triangle is specified by a normal vector followed by 3 verticies of the
        // triangle. The normal may be given as (0, 0, 0), in which case consumers should
        // rely on the counter-clockwise vertex order instead.
        let read_facet = |f: &mut T| -> std::io::Result<Triangle> {
            let t = Triangle {
                normal: read_vector(f)?,
                p0: read_vector(f)?,
                p1: read_vector(f)?,
                p2: read_vector(f)?,
            };
            // After the triangle geometry there is a 2-byte unsigned integer called the
            // "attribute byte count". There is no standard structure of this field, but
            // some applications use this for color data.
            let _attribute_byte_count = f.read_u16::<LittleEndian>()?;
            Ok(t)
        };
        let t = read_facet(f)
            .with_context(|| format!("truncated STL: expected {} facets, got {}", n_triangles, i))?;
        data.push(t);
    }
    Ok(M::from_triangles(data))
}

fn parse_floats<'a, I: Iterator<Item = &'a str>>(words: &mut I, line: usize) -> anyhow::Result<Vector3> {
    let mut next = || -> anyhow::Result<f32> {
        let word = words
            .next()
            .with_context(|| format!("line {}: expected 3 coordinates", line))?;
        word.parse::<f32>()
            .with_context(|| format!("line {}: invalid number {:?}", line, word))
    };
    Ok(Vector3 {
        x: next()?,
        y: next()?,
        z: next()?,
    })
}

fn read_ascii<M: TriangleMesh>(text: &str) -> anyhow::Result<M> {
    let mut data = Vec::new();
    let mut normal = Vector3::new(0.0, 0.0, 0.0);
    let mut points = Vec::with_capacity(3);

    for (n, line) in text.lines().enumerate() {
        let line_no = n + 1;
        let mut words = line.split_whitespace();
        match words.next() {
            Some("facet") => {
                if words.next() != Some("normal") {
                    bail!("line {}: expected `facet normal`", line_no);
                }
                normal = parse_floats(&mut words, line_no)?;
                points.clear();
            }
            Some("vertex") => points.push(parse_floats(&mut words, line_no)?),
            Some("endfacet") => {
                if points.len() != 3 {
                    bail!(
                        "line {}: facet has {} vertices, expected 3",
                        line_no,
                        points.len()
                    );
                }
                data.push(Triangle {
                    normal,
                    p0: points[0],
                    p1: points[1],
                    p2: points[2],
                });
                points.clear();
            }
            // solid, outer loop, endloop, endsolid and blank lines carry no geometry.
            _ => (),
        }
    }
    Ok(M::from_triangles(data))
}

// ASCII files start with `solid`, but so do some binary headers. Data whose size
// matches the binary layout for its facet count is always read as binary; other
// data is only treated as text if it is valid UTF-8 and contains a facet.
fn as_ascii(data: &[u8]) -> Option<&str> {
    if !data.starts_with(b"solid") {
        return None;
    }
    if let Some(count) = data.get(80..84) {
        let n_triangles = u32::from_le_bytes([count[0], count[1], count[2], count[3]]);
        if data.len() as u64 == binary_len(n_triangles) {
            return None;
        }
    }
    let text = std::str::from_utf8(data).ok()?;
    if text.contains("facet") {
        Some(text)
    } else {
        None
    }
}

fn read_any<M: TriangleMesh, T: Read + Seek>(f: &mut T) -> anyhow::Result<M> {
    let mut data = Vec::new();
    f.seek(SeekFrom::Start(0))?;
    f.read_to_end(&mut data)?;
    parse_stl(&data)
}

pub fn read_stl<M: TriangleMesh, P: AsRef<Path>>(p: P) -> anyhow::Result<M> {
    let p = p.as_ref();
    let mut f = std::fs::File::open(p).with_context(|| format!("opening {}", p.display()))?;
    read_any(&mut f).with_context(|| format!("reading {}", p.display()))
}

pub fn parse_stl<M: TriangleMesh>(data: &[u8]) -> anyhow::Result<M> {
    if let Some(text) = as_ascii(data) {
        return read_ascii(text);
    }
    let mut c = std::io::Cursor::new(data);
    read_binary(&mut c)
}

pub trait StlReader: Read {
    fn read_stl<M: TriangleMesh>(&mut self) -> anyhow::Result<M>;
}

impl<T: Read + Seek> StlReader for T {
    fn read_stl<M: TriangleMesh>(&mut self) -> anyhow::Result<M> {
        read_any(self)
    }
}
