/// Light collaborators for the shading stages
use nalgebra::{Point3, Vector3};

/// Supplies the scalar shade for a surface sample.
///
/// `view_dir` is the unit vector from the surface point toward the viewer;
/// diffuse-only implementations may ignore it, view-dependent models
/// (specular terms) get it for free.
pub trait LightSource {
    fn intensity(&self, point: Point3<f32>, normal: Vector3<f32>, view_dir: Vector3<f32>) -> f32;
}

/// Positional diffuse light without falloff
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub position: Point3<f32>,
    pub intensity: f32,
}

impl LightSource for PointLight {
    fn intensity(&self, point: Point3<f32>, normal: Vector3<f32>, _view_dir: Vector3<f32>) -> f32 {
        let to_light = self.position - point;
        let alignment = normal.dot(&to_light);
        if alignment > 0.0 {
            self.intensity * alignment / (normal.norm() * to_light.norm())
        } else {
            0.0
        }
    }
}

/// Infinitely distant light shining along a fixed direction
#[derive(Debug, Clone, Copy)]
pub struct Directional {
    /// Direction the light travels, not necessarily unit length
    pub direction: Vector3<f32>,
    pub intensity: f32,
}

impl LightSource for Directional {
    fn intensity(&self, _point: Point3<f32>, normal: Vector3<f32>, _view_dir: Vector3<f32>) -> f32 {
        let toward_light = -self.direction.normalize();
        self.intensity * normal.normalize().dot(&toward_light).max(0.0)
    }
}
