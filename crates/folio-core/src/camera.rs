//! Perspective camera, region framing and picking rays.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::constants::{
    CAMERA_FAR, CAMERA_FAR_EDGE_FACTOR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_START_Z,
};

/// Axis-aligned box in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn from_center_half(center: Vec3, half: Vec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

/// Collaborator asked to frame a region after every view transition.
pub trait RegionFraming {
    fn frame_region(&mut self, region: &Bounds);
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_START_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn resize(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Moves the camera along z so the smaller side of `bounds` fills the view,
    /// then pulls the far plane out to cover the box.
    pub fn focus(&mut self, bounds: &Bounds) {
        let center = bounds.center();
        let size = bounds.size();
        let fit = size.x.min(size.y);
        let distance = fit / 2.0 / (self.fovy_radians / 2.0).tan();
        let camera_z = center.z + distance;

        self.eye = Vec3::new(center.x, center.y, camera_z);
        self.target = center;

        let min_z = bounds.min.z;
        let to_far_edge = if min_z < 0.0 {
            -min_z + camera_z
        } else {
            camera_z - min_z
        };
        self.zfar = (to_far_edge * CAMERA_FAR_EDGE_FACTOR).max(self.znear * 2.0);
    }

    /// World-space ray through a point given in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        Ray {
            origin: self.eye,
            dir: (p1 - self.eye).normalize(),
        }
    }
}

impl RegionFraming for Camera {
    fn frame_region(&mut self, region: &Bounds) {
        self.focus(region);
    }
}
