use glam::{Mat4, Vec2, Vec3};

use crate::layout::Viewport;
use crate::picking::Ray;

/// Perspective camera on the +z axis whose field of view is chosen so that
/// one world unit at z=0 is exactly one CSS pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    distance: f32,
    near: f32,
    far: f32,
    fov_y: f32,
    aspect: f32,
    projection: Mat4,
}

/// Vertical field of view (radians) that fits `viewport_height` pixels at
/// `distance`.
pub fn fov_for(viewport_height: f32, distance: f32) -> f32 {
    2.0 * ((viewport_height / 2.0) / distance).atan()
}

impl Camera {
    pub fn new(distance: f32, near: f32, far: f32, viewport: Viewport) -> Self {
        let mut camera = Self {
            distance,
            near,
            far,
            fov_y: 0.0,
            aspect: 1.0,
            projection: Mat4::IDENTITY,
        };
        camera.resize(viewport);
        camera
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.fov_y = fov_for(viewport.height, self.distance);
        self.aspect = viewport.aspect();
        self.projection = Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far);
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.distance)
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(-self.position())
    }

    /// Picking ray through a point in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = (self.projection * self.view()).inverse();
        let through = inverse.project_point3(ndc.extend(0.5));
        let origin = self.position();
        Ray { origin, direction: (through - origin).normalize() }
    }
}

/// Client (CSS pixel) coordinates to NDC, y up.
pub fn ndc_from_client(client: Vec2, viewport: Viewport) -> Vec2 {
    Vec2::new(
        client.x / viewport.width * 2.0 - 1.0,
        -(client.y / viewport.height) * 2.0 + 1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fov_fits_viewport_height_at_z0() {
        let cam = Camera::new(20.0, 0.1, 1000.0, Viewport::new(1280.0, 720.0));
        let visible = 2.0 * cam.distance * (cam.fov_y() / 2.0).tan();
        assert!((visible - 720.0).abs() < 1e-2);
        assert!((cam.aspect() - 1280.0 / 720.0).abs() < 1e-6);
    }

    #[test]
    fn resize_refreshes_projection() {
        let mut cam = Camera::new(20.0, 0.1, 1000.0, Viewport::new(800.0, 600.0));
        let before = cam.projection();
        cam.resize(Viewport::new(600.0, 800.0));
        assert_ne!(before, cam.projection());
        assert!((cam.aspect() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn pixel_on_plane_projects_back_to_its_client_position() {
        let vp = Viewport::new(1000.0, 500.0);
        let cam = Camera::new(20.0, 0.1, 1000.0, vp);
        // world (250, 125) is client (750, 125)
        let clip = cam.projection() * cam.view() * Vec3::new(250.0, 125.0, 0.0).extend(1.0);
        let ndc = clip.truncate() / clip.w;
        let expected = ndc_from_client(Vec2::new(750.0, 125.0), vp);
        assert!((ndc.x - expected.x).abs() < 1e-4, "{ndc:?} vs {expected:?}");
        assert!((ndc.y - expected.y).abs() < 1e-4, "{ndc:?} vs {expected:?}");
    }

    #[test]
    fn ndc_corners() {
        let vp = Viewport::new(200.0, 100.0);
        assert_eq!(ndc_from_client(Vec2::ZERO, vp), Vec2::new(-1.0, 1.0));
        assert_eq!(ndc_from_client(Vec2::new(200.0, 100.0), vp), Vec2::new(1.0, -1.0));
        assert_eq!(ndc_from_client(Vec2::new(100.0, 50.0), vp), Vec2::ZERO);
    }

    #[test]
    fn centre_ray_points_straight_down_the_axis() {
        let cam = Camera::new(20.0, 0.1, 1000.0, Viewport::new(640.0, 480.0));
        let ray = cam.ray_from_ndc(Vec2::ZERO);
        assert_eq!(ray.origin, Vec3::new(0.0, 0.0, 20.0));
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-5);
    }
}
