//! Ray casting against the gallery planes.

use glam::{Vec2, Vec3};

use crate::layout::PlaneLayout;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Where a ray struck a plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Index of the plane in DOM order.
    pub index: usize,
    pub distance: f32,
    pub point: Vec3,
    pub uv: Vec2,
}

pub fn intersect_plane(ray: &Ray, index: usize, layout: &PlaneLayout) -> Option<Hit> {
    if !layout.is_visible() || ray.direction.z.abs() < f32::EPSILON {
        return None;
    }
    let t = -ray.origin.z / ray.direction.z;
    if t <= 0.0 {
        return None;
    }
    let point = ray.at(t);
    if !layout.contains(point) {
        return None;
    }
    Some(Hit { index, distance: t, point, uv: layout.uv_at(point) })
}

/// Nearest hit; ties go to the plane that comes first.
pub fn intersect_planes<'a, I>(ray: &Ray, layouts: I) -> Option<Hit>
where
    I: IntoIterator<Item = &'a PlaneLayout>,
{
    layouts
        .into_iter()
        .enumerate()
        .filter_map(|(i, layout)| intersect_plane(ray, i, layout))
        .fold(None, |best: Option<Hit>, hit| match best {
            Some(b) if b.distance <= hit.distance => Some(b),
            _ => Some(hit),
        })
}
