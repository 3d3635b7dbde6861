//! Scene state for the gallery: one plane per page image, kept aligned with
//! DOM layout, plus the hover animation driven by the pointer.

use glam::Vec2;

use crate::camera::{ndc_from_client, Camera};
use crate::config::GalleryConfig;
use crate::layout::{ClientRect, PlaneLayout, Viewport};
use crate::picking::{intersect_planes, Hit};
use crate::tween::{Motion, Tweened};

/// `uMouse` when the pointer is not over a plane.
pub const MOUSE_REST: Vec2 = Vec2::splat(0.5);

#[derive(Debug, Clone)]
pub struct Plane {
    pub layout: PlaneLayout,
    mouse: Tweened<Vec2>,
    hover: Tweened<f32>,
}

impl Plane {
    fn new(layout: PlaneLayout) -> Self {
        Self { layout, mouse: Tweened::new(MOUSE_REST), hover: Tweened::new(0.0) }
    }

    /// Current `uMouse` uniform.
    pub fn mouse(&self) -> Vec2 {
        self.mouse.value()
    }

    /// Current `uHover` uniform.
    pub fn hover(&self) -> f32 {
        self.hover.value()
    }

    pub fn mouse_target(&self) -> Vec2 {
        self.mouse.target()
    }

    pub fn hover_target(&self) -> f32 {
        self.hover.target()
    }

    fn settle_towards(&mut self, mouse: Vec2, hover: f32, motion: Motion) {
        self.mouse.to(mouse, motion);
        self.hover.to(hover, motion);
    }
}

#[derive(Debug, Clone)]
pub struct Gallery {
    camera: Camera,
    viewport: Viewport,
    planes: Vec<Plane>,
    motion: Motion,
}

impl Gallery {
    pub fn new<I>(config: &GalleryConfig, viewport: Viewport, rects: I) -> Self
    where
        I: IntoIterator<Item = ClientRect>,
    {
        let planes = rects
            .into_iter()
            .map(|rect| Plane::new(PlaneLayout::from_rect(rect, viewport)))
            .collect();
        Self {
            camera: Camera::new(config.camera_distance, config.near, config.far, viewport),
            viewport,
            planes,
            motion: config.hover,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.resize(viewport);
    }

    /// Re-derive every plane from fresh client rects, paired in DOM order.
    pub fn sync_layout<I>(&mut self, rects: I)
    where
        I: IntoIterator<Item = ClientRect>,
    {
        let viewport = self.viewport;
        for (plane, rect) in self.planes.iter_mut().zip(rects) {
            plane.layout = PlaneLayout::from_rect(rect, viewport);
        }
    }

    /// Pointer moved to `client` (CSS pixels). Every plane relaxes toward
    /// rest; the plane under the pointer, if any, lights up and follows it.
    pub fn pointer_moved(&mut self, client: Vec2) -> Option<Hit> {
        let ndc = ndc_from_client(client, self.viewport);
        let ray = self.camera.ray_from_ndc(ndc);
        let hit = intersect_planes(&ray, self.planes.iter().map(|p| &p.layout));

        let motion = self.motion;
        for (i, plane) in self.planes.iter_mut().enumerate() {
            match hit {
                Some(h) if h.index == i => plane.settle_towards(h.uv, 1.0, motion),
                _ => plane.settle_towards(MOUSE_REST, 0.0, motion),
            }
        }
        hit
    }

    /// One frame of scene work: follow the DOM, then step the tweens, so the
    /// frame draws fresh layout with fresh uniforms.
    pub fn update<I>(&mut self, rects: I, dt: f32) -> bool
    where
        I: IntoIterator<Item = ClientRect>,
    {
        self.sync_layout(rects);
        self.advance(dt)
    }

    /// Step all uniform tweens. Returns true while anything is animating.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.planes.iter_mut().fold(false, |busy, plane| {
            let mouse = plane.mouse.advance(dt);
            let hover = plane.hover.advance(dt);
            busy | mouse | hover
        })
    }
}
