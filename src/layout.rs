//! Mapping from DOM layout (CSS pixels, y down, origin top-left) to scene
//! space (world units = CSS pixels at z=0, y up, origin at viewport centre).

use glam::{Mat4, Vec2, Vec3};

/// Inner window size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Both sides are clamped to at least one pixel so the camera never
    /// degenerates.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width: width.max(1.0), height: height.max(1.0) }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

/// An element's `getBoundingClientRect()`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClientRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Where a plane sits in the scene. Planes always lie on z=0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaneLayout {
    pub center: Vec2,
    pub size: Vec2,
}

impl PlaneLayout {
    pub fn from_rect(rect: ClientRect, viewport: Viewport) -> Self {
        let center = Vec2::new(
            rect.left - viewport.width / 2.0 + rect.width / 2.0,
            -rect.top + viewport.height / 2.0 - rect.height / 2.0,
        );
        Self { center, size: Vec2::new(rect.width, rect.height) }
    }

    /// Places the unit plane mesh (spanning [-0.5, 0.5]²) at this layout.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.center.extend(0.0)) * Mat4::from_scale(self.size.extend(1.0))
    }

    pub fn is_visible(&self) -> bool {
        self.size.x > 0.0 && self.size.y > 0.0
    }

    pub fn contains(&self, point: Vec3) -> bool {
        let d = (point.truncate() - self.center).abs();
        let half = self.size / 2.0;
        d.x <= half.x && d.y <= half.y
    }

    /// Texture coordinate of a point on the plane: u grows rightwards and v
    /// grows upwards, both over [0, 1].
    pub fn uv_at(&self, point: Vec3) -> Vec2 {
        let bottom_left = self.center - self.size / 2.0;
        (point.truncate() - bottom_left) / self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_viewport_rect_is_centred() {
        let vp = Viewport::new(800.0, 600.0);
        let l = PlaneLayout::from_rect(ClientRect { left: 0.0, top: 0.0, width: 800.0, height: 600.0 }, vp);
        assert_eq!(l.center, Vec2::ZERO);
        assert_eq!(l.size, Vec2::new(800.0, 600.0));
    }

    #[test]
    fn top_left_rect_maps_up_and_left() {
        let vp = Viewport::new(1000.0, 800.0);
        let l = PlaneLayout::from_rect(ClientRect { left: 100.0, top: 50.0, width: 200.0, height: 100.0 }, vp);
        assert_eq!(l.center, Vec2::new(100.0 - 500.0 + 100.0, -50.0 + 400.0 - 50.0));
    }

    #[test]
    fn scrolled_off_rect_goes_below() {
        let vp = Viewport::new(1000.0, 800.0);
        let l = PlaneLayout::from_rect(ClientRect { left: 0.0, top: 900.0, width: 100.0, height: 100.0 }, vp);
        assert!(l.center.y + l.size.y / 2.0 < -vp.height / 2.0);
    }

    #[test]
    fn model_matrix_maps_unit_corners_to_rect_corners() {
        let l = PlaneLayout { center: Vec2::new(10.0, -20.0), size: Vec2::new(40.0, 30.0) };
        let m = l.model_matrix();
        assert_eq!(m.transform_point3(Vec3::new(-0.5, -0.5, 0.0)), Vec3::new(-10.0, -35.0, 0.0));
        assert_eq!(m.transform_point3(Vec3::new(0.5, 0.5, 0.0)), Vec3::new(30.0, -5.0, 0.0));
    }

    #[test]
    fn uv_runs_bottom_left_to_top_right() {
        let l = PlaneLayout { center: Vec2::ZERO, size: Vec2::new(200.0, 100.0) };
        assert_eq!(l.uv_at(Vec3::new(-100.0, -50.0, 0.0)), Vec2::ZERO);
        assert_eq!(l.uv_at(Vec3::new(100.0, 50.0, 0.0)), Vec2::ONE);
        assert_eq!(l.uv_at(Vec3::new(50.0, 0.0, 0.0)), Vec2::new(0.75, 0.5));
    }

    #[test]
    fn contains_is_edge_inclusive() {
        let l = PlaneLayout { center: Vec2::ZERO, size: Vec2::new(2.0, 2.0) };
        assert!(l.contains(Vec3::new(1.0, -1.0, 0.0)));
        assert!(!l.contains(Vec3::new(1.01, 0.0, 0.0)));
    }

    #[test]
    fn zero_size_is_invisible() {
        let vp = Viewport::new(0.0, 0.0);
        assert_eq!(vp, Viewport::new(1.0, 1.0));
        assert!(!PlaneLayout::from_rect(ClientRect::default(), vp).is_visible());
    }
}
