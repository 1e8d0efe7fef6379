/// Mesh ownership, model transforms and the per-frame render pipeline
use log::trace;
use nalgebra::{Matrix4, Point3, Vector3};

use crate::canvas::Canvas;
use crate::geometry::Triangle;
use crate::light::LightSource;
use crate::transform::Transform;

/// A triangle mesh plus the state the render pipeline needs.
///
/// Source triangles live in object space and change only through the
/// explicit transform calls. The screen-space list is rebuilt from scratch
/// on every [`Mesh::render`] call and has no identity beyond one frame.
#[derive(Debug)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
    screen_triangles: Vec<Triangle>,
    view: Matrix4<f32>,
    projection: Matrix4<f32>,
    wireframe: bool,
    gouraud: bool,
}

impl Mesh {
    pub fn new() -> Self {
        Self::from_triangles(Vec::new())
    }

    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self {
            triangles,
            screen_triangles: Vec::new(),
            view: Transform::identity(),
            projection: Transform::identity(),
            wireframe: true,
            gouraud: false,
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Axis-aligned cube centered on the origin, with outward per-vertex
    /// normals and counter-clockwise winding (seen from outside).
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let mut mesh = Self::new();

        let corners = |quad: [[f32; 3]; 4]| quad.map(|[x, y, z]| Point3::new(x, y, z));

        // Quads listed counter-clockwise as seen from outside the cube.
        let faces = [
            (
                corners([[-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]]),
                Vector3::new(0.0, 0.0, 1.0),
            ),
            (
                corners([[h, -h, -h], [-h, -h, -h], [-h, h, -h], [h, h, -h]]),
                Vector3::new(0.0, 0.0, -1.0),
            ),
            (
                corners([[-h, h, h], [h, h, h], [h, h, -h], [-h, h, -h]]),
                Vector3::new(0.0, 1.0, 0.0),
            ),
            (
                corners([[-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]]),
                Vector3::new(0.0, -1.0, 0.0),
            ),
            (
                corners([[h, -h, h], [h, -h, -h], [h, h, -h], [h, h, h]]),
                Vector3::new(1.0, 0.0, 0.0),
            ),
            (
                corners([[-h, -h, -h], [-h, -h, h], [-h, h, h], [-h, h, -h]]),
                Vector3::new(-1.0, 0.0, 0.0),
            ),
        ];

        for (quad, normal) in faces {
            mesh.add_triangle(Triangle::with_normals(
                [quad[0], quad[1], quad[2]],
                [normal; 3],
            ));
            mesh.add_triangle(Triangle::with_normals(
                [quad[0], quad[2], quad[3]],
                [normal; 3],
            ));
        }

        mesh
    }

    /// Replace the view matrix wholesale
    pub fn set_view(&mut self, view: Matrix4<f32>) {
        self.view = view;
    }

    /// Replace the projection matrix wholesale
    pub fn set_projection(&mut self, projection: Matrix4<f32>) {
        self.projection = projection;
    }

    pub fn toggle_wireframe(&mut self) {
        self.wireframe = !self.wireframe;
    }

    pub fn toggle_gouraud(&mut self) {
        self.gouraud = !self.gouraud;
    }

    pub fn is_wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn is_gouraud(&self) -> bool {
        self.gouraud
    }

    /// Last frame's screen-space triangles, sorted near-to-far by average
    /// depth. Rebuilt by every [`Mesh::render`] call.
    pub fn screen_triangles(&self) -> &[Triangle] {
        &self.screen_triangles
    }

    /// Translate every source vertex in place (cumulative)
    pub fn translate(&mut self, tx: f32, ty: f32, tz: f32) {
        self.apply_to_vertices(&Transform::translation(tx, ty, tz));
    }

    /// Scale every source vertex in place (cumulative). Normals are left
    /// untouched; non-uniform scales skew them like the vertices.
    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) {
        self.apply_to_vertices(&Transform::scaling(sx, sy, sz));
    }

    /// Rotate the model about the x axis (radians, cumulative)
    pub fn rotate_x(&mut self, angle: f32) {
        self.apply_rotation(&Transform::x_rotation(angle));
    }

    /// Rotate the model about the y axis (radians, cumulative)
    pub fn rotate_y(&mut self, angle: f32) {
        self.apply_rotation(&Transform::y_rotation(angle));
    }

    /// Rotate the model about the z axis (radians, cumulative)
    pub fn rotate_z(&mut self, angle: f32) {
        self.apply_rotation(&Transform::z_rotation(angle));
    }

    fn apply_to_vertices(&mut self, matrix: &Matrix4<f32>) {
        for tri in &mut self.triangles {
            for vertex in &mut tri.vertices {
                *vertex = Transform::apply(matrix, *vertex);
            }
        }
    }

    /// Rotations also re-orient stored per-vertex normals; rotation
    /// matrices are orthonormal so the vertex matrix applies directly.
    fn apply_rotation(&mut self, matrix: &Matrix4<f32>) {
        for tri in &mut self.triangles {
            for vertex in &mut tri.vertices {
                *vertex = Transform::apply(matrix, *vertex);
            }
            if let Some(normals) = &mut tri.normals {
                for normal in normals.iter_mut() {
                    *normal = matrix.transform_vector(normal);
                }
            }
        }
    }

    /// Run one frame: cull, shade, transform to screen space, depth-sort,
    /// draw.
    ///
    /// The camera position is an explicit parameter so the cull and shade
    /// stages have no ambient dependencies. Each source triangle is copied
    /// before any stage touches it; model space is never mutated here.
    pub fn render<L, C>(&mut self, camera_pos: Point3<f32>, light: &L, canvas: &mut C)
    where
        L: LightSource + ?Sized,
        C: Canvas + ?Sized,
    {
        self.screen_triangles.clear();

        // NDC [-1, 1] to pixel coordinates: shift into [0, 2], then scale
        // by half the surface size. Depth is carried through unchanged.
        let viewport_shift = Transform::translation(1.0, 1.0, 0.0);
        let viewport_scale = Transform::scaling(
            0.5 * canvas.width() as f32,
            0.5 * canvas.height() as f32,
            1.0,
        );

        for source in &self.triangles {
            let mut tri = source.clone();

            if is_backfacing(&tri, camera_pos) {
                continue;
            }

            if self.gouraud {
                shade_gouraud(&mut tri, camera_pos, light);
            } else {
                shade_flat(&mut tri, camera_pos, light);
            }

            for vertex in &mut tri.vertices {
                *vertex = Transform::apply(&self.view, *vertex);
                *vertex = Transform::apply(&self.projection, *vertex);
                *vertex = Transform::apply(&viewport_shift, *vertex);
                *vertex = Transform::apply(&viewport_scale, *vertex);
            }

            self.screen_triangles.push(tri);
        }

        // Ascending by average depth; sort_by is stable, so equal depths
        // keep their source order.
        self.screen_triangles
            .sort_by(|t1, t2| t1.average_depth().total_cmp(&t2.average_depth()));

        trace!(
            "rendering {} of {} triangles",
            self.screen_triangles.len(),
            self.triangles.len()
        );

        // Painter's pass: iterate far-to-near (largest average depth first)
        // so near triangles overwrite far ones.
        for tri in self.screen_triangles.iter().rev() {
            if self.wireframe {
                tri.wireframe_draw(canvas);
            } else {
                tri.rasterize(canvas);
            }
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

/// Cull test, coupled to the face-normal edge convention: a triangle is
/// discarded when its normal points along the camera-to-centroid ray.
fn is_backfacing(tri: &Triangle, camera_pos: Point3<f32>) -> bool {
    let centroid = tri.centroid();
    let view_dir = (centroid - camera_pos).normalize();
    tri.face_normal().dot(&view_dir) >= 0.0
}

/// One intensity from the centroid and face normal, replicated per corner
fn shade_flat<L: LightSource + ?Sized>(tri: &mut Triangle, camera_pos: Point3<f32>, light: &L) {
    let centroid = tri.centroid();
    let view_dir = (camera_pos - centroid).normalize();
    let shade = light.intensity(centroid, tri.face_normal(), view_dir);
    tri.set_intensity(Vector3::new(shade, shade, shade));
}

/// One intensity per corner from the vertex position and its own normal.
/// Meshes without per-vertex normals fall back to the face normal.
fn shade_gouraud<L: LightSource + ?Sized>(tri: &mut Triangle, camera_pos: Point3<f32>, light: &L) {
    let face = tri.face_normal();
    let mut intensity = Vector3::zeros();
    for (corner, vertex) in tri.vertices.iter().enumerate() {
        let normal = tri.normals.map_or(face, |normals| normals[corner]);
        let view_dir = (camera_pos - *vertex).normalize();
        intensity[corner] = light.intensity(*vertex, normal, view_dir);
    }
    tri.set_intensity(intensity);
}
