/// OBJ model parser for the vertex/face subset the pipeline consumes
///
/// Accepts `v`, `vt`, `vn` and `f` records; comments and unknown keywords
/// are skipped. Face records may be bare 1-based position indices
/// (`f 1 2 3`) or full `v/t/n` triplets (`f 1/1/1 2/2/2 3/3/3`, with the
/// texture or normal slot omitted as in `1//2`). Faces with more than
/// three corners are fan-triangulated.
use std::fmt;

use log::debug;
use nalgebra::{Point2, Point3, Vector3};
use nom::{
    character::complete::{char, digit1, multispace0, multispace1},
    combinator::{all_consuming, map_res, opt},
    multi::separated_list1,
    number::complete::float,
    sequence::preceded,
    IResult,
};

use crate::geometry::Triangle;
use crate::mesh::Mesh;

/// Parse failure, naming the offending 1-based source line
#[derive(Debug, PartialEq, Eq)]
pub enum ObjError {
    /// The line starts with a known keyword but does not scan
    Malformed { line: usize, content: String },
    /// A face references a vertex/texture/normal slot that does not exist
    IndexOutOfRange { line: usize, index: usize },
}

impl fmt::Display for ObjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjError::Malformed { line, content } => {
                write!(f, "malformed record on line {}: {:?}", line, content)
            }
            ObjError::IndexOutOfRange { line, index } => {
                write!(f, "index {} out of range on line {}", index, line)
            }
        }
    }
}

impl std::error::Error for ObjError {}

/// One corner reference within a face record (already 0-based)
#[derive(Debug, Clone, Copy)]
struct CornerRef {
    position: usize,
    texcoord: Option<usize>,
    normal: Option<usize>,
}

/// Parse OBJ text into a mesh. File I/O belongs to the caller.
pub fn parse_obj(input: &str) -> Result<Mesh, ObjError> {
    let mut positions: Vec<Point3<f32>> = Vec::new();
    let mut texcoords: Vec<Point2<f32>> = Vec::new();
    let mut normals: Vec<Vector3<f32>> = Vec::new();
    let mut mesh = Mesh::new();

    for (number, raw) in input.lines().enumerate() {
        let line = number + 1;
        let record = raw.trim();
        if record.is_empty() || record.starts_with('#') {
            continue;
        }

        let malformed = |_| ObjError::Malformed {
            line,
            content: record.to_string(),
        };

        if let Some(rest) = record.strip_prefix("vt ") {
            let (_, (u, v)) = all_consuming(parse_vec2)(rest).map_err(malformed)?;
            texcoords.push(Point2::new(u, v));
        } else if let Some(rest) = record.strip_prefix("vn ") {
            let (_, (x, y, z)) = all_consuming(parse_vec3)(rest).map_err(malformed)?;
            normals.push(Vector3::new(x, y, z));
        } else if let Some(rest) = record.strip_prefix("v ") {
            let (_, (x, y, z)) = all_consuming(parse_vec3)(rest).map_err(malformed)?;
            positions.push(Point3::new(x, y, z));
        } else if let Some(rest) = record.strip_prefix("f ") {
            let (_, corners) = all_consuming(parse_face)(rest).map_err(malformed)?;
            if corners.len() < 3 {
                return Err(ObjError::Malformed {
                    line,
                    content: record.to_string(),
                });
            }
            // Fan triangulation keeps quads and larger faces usable.
            for i in 1..corners.len() - 1 {
                let fan = [corners[0], corners[i], corners[i + 1]];
                mesh.add_triangle(build_triangle(
                    fan, &positions, &texcoords, &normals, line,
                )?);
            }
        }
    }

    debug!(
        "parsed {} positions, {} normals, {} triangles",
        positions.len(),
        normals.len(),
        mesh.triangles.len()
    );

    Ok(mesh)
}

fn build_triangle(
    corners: [CornerRef; 3],
    positions: &[Point3<f32>],
    texcoords: &[Point2<f32>],
    normals: &[Vector3<f32>],
    line: usize,
) -> Result<Triangle, ObjError> {
    let out_of_range = |index: usize| ObjError::IndexOutOfRange {
        line,
        index: index + 1,
    };

    let mut vertices = [Point3::origin(); 3];
    for (slot, corner) in corners.iter().enumerate() {
        vertices[slot] = *positions
            .get(corner.position)
            .ok_or_else(|| out_of_range(corner.position))?;
    }

    // Attribute arrays attach only when every corner carries the index.
    let normal_refs: Option<[usize; 3]> = match corners.map(|c| c.normal) {
        [Some(a), Some(b), Some(c)] => Some([a, b, c]),
        _ => None,
    };
    let tri_normals = match normal_refs {
        Some(refs) => {
            let mut resolved = [Vector3::zeros(); 3];
            for (slot, &index) in refs.iter().enumerate() {
                resolved[slot] = *normals.get(index).ok_or_else(|| out_of_range(index))?;
            }
            Some(resolved)
        }
        None => None,
    };

    let texcoord_refs: Option<[usize; 3]> = match corners.map(|c| c.texcoord) {
        [Some(a), Some(b), Some(c)] => Some([a, b, c]),
        _ => None,
    };
    let tri_texcoords = match texcoord_refs {
        Some(refs) => {
            let mut resolved = [Point2::origin(); 3];
            for (slot, &index) in refs.iter().enumerate() {
                resolved[slot] = *texcoords.get(index).ok_or_else(|| out_of_range(index))?;
            }
            Some(resolved)
        }
        None => None,
    };

    Ok(Triangle::with_attributes(
        vertices,
        tri_normals,
        tri_texcoords,
    ))
}

fn parse_vec3(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, _) = multispace0(input)?;
    let (input, x) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = float(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, (x, y, z)))
}

fn parse_vec2(input: &str) -> IResult<&str, (f32, f32)> {
    let (input, _) = multispace0(input)?;
    let (input, u) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, v) = float(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, (u, v)))
}

/// A 1-based index token, converted to 0-based
fn parse_index(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |digits: &str| {
        digits
            .parse::<usize>()
            .ok()
            .and_then(|index| index.checked_sub(1))
            .ok_or("index must be >= 1")
    })(input)
}

/// One `v`, `v/t`, `v//n` or `v/t/n` corner token
fn parse_corner(input: &str) -> IResult<&str, CornerRef> {
    let (input, position) = parse_index(input)?;
    let (input, texcoord) = opt(preceded(char('/'), opt(parse_index)))(input)?;
    let (input, normal) = opt(preceded(char('/'), parse_index))(input)?;
    Ok((
        input,
        CornerRef {
            position,
            texcoord: texcoord.flatten(),
            normal,
        },
    ))
}

fn parse_face(input: &str) -> IResult<&str, Vec<CornerRef>> {
    let (input, _) = multispace0(input)?;
    let (input, corners) = separated_list1(multispace1, parse_corner)(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, corners))
}
