use glam::{Mat4, Vec3};

/// Projection model of a camera.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Projection {
    /// Right-handed perspective with vertical field of view in degrees.
    Perspective { fov_y_deg: f32, near: f32, far: f32 },
    /// Orthographic box spanning `[-1, 1]` vertically, widened by aspect.
    Orthographic { near: f32, far: f32 },
}

/// A look-at camera.
///
/// `aspect` is kept in sync with the drawable surface by the owning scene;
/// a degenerate aspect is clamped when building matrices.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub projection: Projection,
}

impl Camera {
    pub fn perspective(fov_y_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            projection: Projection::Perspective {
                fov_y_deg,
                near,
                far,
            },
        }
    }

    /// Unit orthographic camera looking down -Z, used for full-screen passes.
    pub fn orthographic_unit() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 1.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            projection: Projection::Orthographic {
                near: 0.0,
                far: 2.0,
            },
        }
    }

    pub fn looking_at(mut self, eye: Vec3, target: Vec3) -> Self {
        self.eye = eye;
        self.target = target;
        self
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        let aspect = if self.aspect.is_finite() && self.aspect > 0.0 {
            self.aspect
        } else {
            1.0
        };

        match self.projection {
            Projection::Perspective {
                fov_y_deg,
                near,
                far,
            } => Mat4::perspective_rh(fov_y_deg.to_radians(), aspect, near, far),
            Projection::Orthographic { near, far } => {
                Mat4::orthographic_rh(-aspect, aspect, -1.0, 1.0, near, far)
            }
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view()
    }

    /// Distance from eye to target.
    pub fn distance(&self) -> f32 {
        self.eye.distance(self.target)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective(60.0, 1.0, 0.1, 100.0)
    }
}
