//! View and projection matrices for an orbiting viewer

use glam::{Mat4, Vec3};
use std::f32::consts::FRAC_PI_2;

/// Radians of orbit per pixel of mouse drag
pub const DRAG_SENSITIVITY: f32 = 0.005;

/// Keeps the eye off the poles, where the up vector degenerates
const POLE_MARGIN: f32 = 0.001;

/// Symmetric perspective projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perspective {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for Perspective {
    fn default() -> Self {
        Self {
            fov_degrees: 90.0,
            aspect: 1.0,
            z_near: 0.1,
            z_far: 10.0,
        }
    }
}

impl Perspective {
    pub fn new(fov_degrees: f32, aspect: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_degrees,
            aspect,
            z_near,
            z_far,
        }
    }

    /// Right-handed projection with a `[-1, 1]` depth range
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_degrees.to_radians(),
            self.aspect,
            self.z_near,
            self.z_far,
        )
    }
}

/// A camera on a sphere around a center point, looking at it with +Y up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    center: Vec3,
    distance: f32,
    /// Elevation in radians, kept inside `(-pi/2, pi/2)`
    latitude: f32,
    /// Azimuth in radians around +Y, zero looking down -Z
    longitude: f32,
    perspective: Perspective,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0, Perspective::default())
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, latitude: f32, longitude: f32, perspective: Perspective) -> Self {
        Self {
            center: Vec3::ZERO,
            distance,
            latitude: clamp_latitude(latitude),
            longitude,
            perspective,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance;
    }

    pub fn latitude(&self) -> f32 {
        self.latitude
    }

    pub fn longitude(&self) -> f32 {
        self.longitude
    }

    pub fn perspective(&self) -> &Perspective {
        &self.perspective
    }

    pub fn perspective_mut(&mut self) -> &mut Perspective {
        &mut self.perspective
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_lat, cos_lat) = self.latitude.sin_cos();
        let (sin_lon, cos_lon) = self.longitude.sin_cos();
        self.center + self.distance * Vec3::new(sin_lon * cos_lat, sin_lat, cos_lon * cos_lat)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.center, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        self.perspective.projection()
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Orbit by a mouse drag of `(dx, dy)` pixels
    ///
    /// Only drags with the left button held move the camera.
    pub fn on_mouse_motion(&mut self, dx: f32, dy: f32, left_button_held: bool) {
        if !left_button_held {
            return;
        }
        self.longitude -= DRAG_SENSITIVITY * dx;
        self.latitude = clamp_latitude(self.latitude + DRAG_SENSITIVITY * dy);
    }
}

fn clamp_latitude(latitude: f32) -> f32 {
    latitude.clamp(-FRAC_PI_2 + POLE_MARGIN, FRAC_PI_2 - POLE_MARGIN)
}
