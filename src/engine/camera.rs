// screen = world * zoom + pan. `pan` is in screen pixels, so a drag of N pixels
// moves the scene by N pixels at any zoom.

use eframe::egui::{Pos2, Vec2, pos2, vec2};
use serde::Deserialize;

pub const DEFAULT_MIN_ZOOM: f32 = 0.1;
pub const DEFAULT_MAX_ZOOM: f32 = 3.0;
pub const DEFAULT_FOCUS_ZOOM: f32 = 1.5;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    pub fn center(&self) -> Pos2 {
        pos2(self.width * 0.5, self.height * 0.5)
    }

    pub fn size(&self) -> Vec2 {
        vec2(self.width, self.height)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ZoomLimits {
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub focus_zoom: f32,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            focus_zoom: DEFAULT_FOCUS_ZOOM,
        }
    }
}

impl ZoomLimits {
    pub fn clamp(&self, zoom: f32) -> f32 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pan: Vec2,
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

pub fn world_to_screen(point: Pos2, camera: &Camera) -> Pos2 {
    (point.to_vec2() * camera.zoom + camera.pan).to_pos2()
}

pub fn screen_to_world(point: Pos2, camera: &Camera) -> Pos2 {
    ((point.to_vec2() - camera.pan) / camera.zoom).to_pos2()
}

pub fn apply_pan(camera: &Camera, delta_screen: Vec2) -> Camera {
    if !(delta_screen.x.is_finite() && delta_screen.y.is_finite()) {
        return *camera;
    }

    Camera {
        pan: camera.pan + delta_screen,
        zoom: camera.zoom,
    }
}

pub fn apply_zoom(
    camera: &Camera,
    factor: f32,
    anchor: Option<Pos2>,
    viewport: Viewport,
    limits: &ZoomLimits,
) -> Camera {
    if !factor.is_finite() || factor <= 0.0 {
        return *camera;
    }

    let anchor = anchor.unwrap_or_else(|| viewport.center());
    let zoom = limits.clamp(camera.zoom * factor);
    let world_under_anchor = screen_to_world(anchor, camera);

    Camera {
        pan: anchor.to_vec2() - world_under_anchor.to_vec2() * zoom,
        zoom,
    }
}

pub fn focus_on(world: Pos2, zoom: f32, viewport: Viewport, limits: &ZoomLimits) -> Camera {
    let zoom = limits.clamp(zoom);
    Camera {
        pan: viewport.center().to_vec2() - world.to_vec2() * zoom,
        zoom,
    }
}
