/// Camera state and view/projection matrix construction
use nalgebra::{Matrix4, Point3, Vector3};

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Camera collaborator: a position for the cull/shade stages plus the
/// view and projection matrices the frontend hands to the mesh setters.
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    /// Perspective camera on the -z axis looking at the origin
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, -5.0),
            target: Point3::origin(),
            up: Vector3::y(),
            fov: std::f32::consts::FRAC_PI_4,
            aspect,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    /// Right-handed look-at view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Projection matrix for the current mode
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => self.perspective(),
            ProjectionMode::Orthographic => self.orthographic(),
        }
    }

    fn perspective(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Orthographic box sized by the camera-to-target distance
    fn orthographic(&self) -> Matrix4<f32> {
        let half_h = (self.position - self.target).norm() * 0.5;
        let half_w = half_h * self.aspect;
        Matrix4::new_orthographic(-half_w, half_w, -half_h, half_h, self.near, self.far)
    }
}
