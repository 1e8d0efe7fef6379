/// Geometry primitives for 3D rendering
use nalgebra::{Point2, Point3, Vector3};

use crate::canvas::Canvas;
use crate::transform;

/// A triangle with optional per-vertex attributes.
///
/// Vertices, normals and texture coordinates are parallel arrays: index k
/// of each refers to the same logical corner. The intensity triple holds
/// one scalar shade per corner (replicated for flat shading). Triangles
/// are cheap value objects; the render pipeline clones them every frame.
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Point3<f32>; 3],
    pub normals: Option<[Vector3<f32>; 3]>,
    pub texcoords: Option<[Point2<f32>; 3]>,
    pub intensity: Vector3<f32>,
}

impl Triangle {
    pub fn new(vertices: [Point3<f32>; 3]) -> Self {
        Self {
            vertices,
            normals: None,
            texcoords: None,
            intensity: Vector3::zeros(),
        }
    }

    pub fn with_normals(vertices: [Point3<f32>; 3], normals: [Vector3<f32>; 3]) -> Self {
        Self {
            normals: Some(normals),
            ..Self::new(vertices)
        }
    }

    pub fn with_attributes(
        vertices: [Point3<f32>; 3],
        normals: Option<[Vector3<f32>; 3]>,
        texcoords: Option<[Point2<f32>; 3]>,
    ) -> Self {
        Self {
            normals,
            texcoords,
            ..Self::new(vertices)
        }
    }

    /// Store a per-corner shade triple (flat shading replicates one value)
    pub fn set_intensity(&mut self, intensity: Vector3<f32>) {
        self.intensity = intensity;
    }

    pub fn centroid(&self) -> Point3<f32> {
        transform::centroid(self.vertices[0], self.vertices[1], self.vertices[2])
    }

    /// Face normal from the centroid-anchored edge pair (see
    /// [`transform::face_normal`] for the orientation convention).
    pub fn face_normal(&self) -> Vector3<f32> {
        transform::face_normal(self.centroid(), self.vertices[1], self.vertices[2])
    }

    /// Mean z of the three vertices, the painter's-algorithm sort key
    pub fn average_depth(&self) -> f32 {
        (self.vertices[0].z + self.vertices[1].z + self.vertices[2].z) / 3.0
    }

    /// Draw the three edges as lines at full shade, ignoring intensity.
    /// Expects screen-space vertices.
    pub fn wireframe_draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let [a, b, c] = self.vertices;
        canvas.line((a.x, a.y), (b.x, b.y), 1.0);
        canvas.line((b.x, b.y), (c.x, c.y), 1.0);
        canvas.line((c.x, c.y), (a.x, a.y), 1.0);
    }

    /// Fill the triangle's interior, interpolating the corner intensities
    /// barycentrically (flat shading is the uniform-corner special case).
    /// Expects screen-space vertices; pixels outside the canvas are
    /// skipped, degenerate triangles produce no pixels.
    pub fn rasterize<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let [a, b, c] = self.vertices;

        let min_x = (a.x.min(b.x).min(c.x).floor() as i32).max(0);
        let max_x = (a.x.max(b.x).max(c.x).ceil() as i32).min(canvas.width() as i32 - 1);
        let min_y = (a.y.min(b.y).min(c.y).floor() as i32).max(0);
        let max_y = (a.y.max(b.y).max(c.y).ceil() as i32).min(canvas.height() as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                if let Some((w0, w1, w2)) =
                    barycentric((a.x, a.y), (b.x, b.y), (c.x, c.y), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let shade = w0 * self.intensity[0]
                            + w1 * self.intensity[1]
                            + w2 * self.intensity[2];
                        canvas.plot(x, y, shade);
                    }
                }
            }
        }
    }
}

/// Barycentric coordinates of a point relative to a screen-space triangle.
/// Returns None for degenerate (zero-area) triangles.
pub fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::ShadeBuffer;

    fn screen_triangle() -> Triangle {
        Triangle::new([
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(14.0, 1.0, 0.0),
            Point3::new(1.0, 14.0, 0.0),
        ])
    }

    #[test]
    fn test_barycentric_center() {
        let (w0, w1, w2) =
            barycentric((0.0, 0.0), (3.0, 0.0), (0.0, 3.0), (1.0, 1.0)).unwrap();
        assert!((w0 - w1).abs() < 1e-6);
        assert!((w1 - w2).abs() < 1e-6);
        assert!((w0 + w1 + w2 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_barycentric_degenerate() {
        // All three corners collinear.
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (1.0, 0.0)).is_none());
    }

    #[test]
    fn test_flat_fill_is_uniform() {
        let mut tri = screen_triangle();
        tri.set_intensity(Vector3::new(0.75, 0.75, 0.75));
        let mut buffer = ShadeBuffer::new(16, 16);
        tri.rasterize(&mut buffer);

        assert!((buffer.shade_at(3, 3) - 0.75).abs() < 1e-6);
        assert!((buffer.shade_at(6, 2) - 0.75).abs() < 1e-6);
        // Outside the triangle nothing is written.
        assert_eq!(buffer.shade_at(15, 15), 0.0);
    }

    #[test]
    fn test_gouraud_fill_interpolates() {
        let mut tri = screen_triangle();
        tri.set_intensity(Vector3::new(1.0, 0.0, 0.0));
        let mut buffer = ShadeBuffer::new(16, 16);
        tri.rasterize(&mut buffer);

        // Shade falls off moving away from the bright corner.
        let near = buffer.shade_at(2, 2);
        let far = buffer.shade_at(11, 2);
        assert!(near > far);
        assert!(far > 0.0);
    }

    #[test]
    fn test_degenerate_triangle_draws_nothing() {
        let mut tri = Triangle::new([
            Point3::new(2.0, 2.0, 0.0),
            Point3::new(5.0, 5.0, 0.0),
            Point3::new(8.0, 8.0, 0.0),
        ]);
        tri.set_intensity(Vector3::new(1.0, 1.0, 1.0));
        let mut buffer = ShadeBuffer::new(16, 16);
        tri.rasterize(&mut buffer);
        assert!(buffer.shades().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_offscreen_fill_is_clipped() {
        let mut tri = Triangle::new([
            Point3::new(-8.0, -8.0, 0.0),
            Point3::new(12.0, -8.0, 0.0),
            Point3::new(-8.0, 12.0, 0.0),
        ]);
        tri.set_intensity(Vector3::new(1.0, 1.0, 1.0));
        let mut buffer = ShadeBuffer::new(4, 4);
        // Must not panic; only the on-screen corner region is written.
        tri.rasterize(&mut buffer);
        assert!(buffer.shade_at(0, 0) > 0.0);
    }

    #[test]
    fn test_wireframe_draws_three_edges() {
        struct Recorder {
            segments: Vec<((f32, f32), (f32, f32))>,
            fills: usize,
        }
        impl Canvas for Recorder {
            fn width(&self) -> u32 {
                16
            }
            fn height(&self) -> u32 {
                16
            }
            fn plot(&mut self, _x: i32, _y: i32, _shade: f32) {
                self.fills += 1;
            }
            fn line(&mut self, from: (f32, f32), to: (f32, f32), _shade: f32) {
                self.segments.push((from, to));
            }
        }

        let mut recorder = Recorder {
            segments: Vec::new(),
            fills: 0,
        };
        screen_triangle().wireframe_draw(&mut recorder);
        assert_eq!(recorder.segments.len(), 3);
        assert_eq!(recorder.fills, 0);
    }
}
