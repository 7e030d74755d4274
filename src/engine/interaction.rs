use std::collections::HashSet;

use eframe::egui::{Pos2, Vec2};
use serde::Deserialize;
use tracing::{debug, trace};

use super::camera::{Camera, Viewport, ZoomLimits, apply_pan, apply_zoom, focus_on};
use super::hit_test::hit_test;
use super::layout::PositionedNode;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down(Pos2),
    Move(Pos2),
    Up(Pos2),
    DoubleClick(Pos2),
    // Positive delta scrolls up and zooms in.
    Wheel { position: Pos2, delta: f32 },
    Leave,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InteractionEvent {
    HoverChanged(Option<String>),
    Selected(String),
    DoubleClicked(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    pub drag_threshold: f32,
    pub wheel_zoom_in: f32,
    pub wheel_zoom_out: f32,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            drag_threshold: 4.0,
            wheel_zoom_in: 1.1,
            wheel_zoom_out: 0.9,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase<'a> {
    Idle,
    Hovering(&'a str),
    Dragging,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Drag {
    origin: Pos2,
    last: Pos2,
    travelled: f32,
}

pub struct InteractionInput<'a> {
    pub nodes: &'a [PositionedNode],
    pub viewport: Viewport,
    pub limits: &'a ZoomLimits,
    pub settings: &'a InteractionSettings,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionState {
    hovered: Option<String>,
    selected: Option<String>,
    drag: Option<Drag>,
    last_pointer: Option<Pos2>,
}

impl InteractionState {
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn last_pointer(&self) -> Option<Pos2> {
        self.last_pointer
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn phase(&self) -> Phase<'_> {
        match (&self.drag, &self.hovered) {
            (Some(_), _) => Phase::Dragging,
            (None, Some(id)) => Phase::Hovering(id),
            (None, None) => Phase::Idle,
        }
    }

    pub fn select(&mut self, id: Option<String>) -> bool {
        if self.selected == id {
            return false;
        }
        debug!(from = ?self.selected, to = ?id, "selection changed");
        self.selected = id;
        true
    }

    pub fn retain_known(&mut self, known: &HashSet<&str>) -> (bool, bool) {
        let hover_cleared = self
            .hovered
            .take_if(|id| !known.contains(id.as_str()))
            .is_some();
        let selection_cleared = self
            .selected
            .take_if(|id| !known.contains(id.as_str()))
            .is_some();

        if hover_cleared || selection_cleared {
            debug!(hover_cleared, selection_cleared, "cleared stale interaction ids");
        }
        (hover_cleared, selection_cleared)
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        camera: &mut Camera,
        input: &InteractionInput<'_>,
    ) -> Vec<InteractionEvent> {
        let mut events = Vec::new();
        trace!(?event, "pointer event");

        match event {
            PointerEvent::Down(position) => {
                self.drag = Some(Drag {
                    origin: position,
                    last: position,
                    travelled: 0.0,
                });
                self.last_pointer = Some(position);
            }
            PointerEvent::Move(position) => {
                self.last_pointer = Some(position);
                if let Some(drag) = &mut self.drag {
                    let delta: Vec2 = position - drag.last;
                    *camera = apply_pan(camera, delta);
                    drag.last = position;
                    drag.travelled = drag.travelled.max(position.distance(drag.origin));
                } else {
                    self.update_hover(position, camera, input.nodes, &mut events);
                }
            }
            PointerEvent::Up(position) => {
                self.last_pointer = Some(position);
                let is_click = self
                    .drag
                    .take()
                    .is_none_or(|drag| drag.travelled <= input.settings.drag_threshold);

                if is_click && let Some(hit) = hit_test(position, camera, input.nodes) {
                    let id = hit.id().to_owned();
                    self.select(Some(id.clone()));
                    events.push(InteractionEvent::Selected(id));
                }
            }
            PointerEvent::DoubleClick(position) => {
                self.last_pointer = Some(position);
                if let Some(hit) = hit_test(position, camera, input.nodes) {
                    let id = hit.id().to_owned();
                    if self.select(Some(id.clone())) {
                        events.push(InteractionEvent::Selected(id.clone()));
                    }

                    *camera = focus_on(
                        hit.position,
                        input.limits.focus_zoom,
                        input.viewport,
                        input.limits,
                    );
                    debug!(%id, zoom = camera.zoom, "recentred camera on node");
                    events.push(InteractionEvent::DoubleClicked(id));
                }
            }
            PointerEvent::Wheel { position, delta } => {
                self.last_pointer = Some(position);
                let factor = if delta > 0.0 {
                    input.settings.wheel_zoom_in
                } else if delta < 0.0 {
                    input.settings.wheel_zoom_out
                } else {
                    return events;
                };
                *camera = apply_zoom(camera, factor, Some(position), input.viewport, input.limits);
            }
            PointerEvent::Leave => {
                self.drag = None;
                self.last_pointer = None;
                if self.hovered.take().is_some() {
                    events.push(InteractionEvent::HoverChanged(None));
                }
            }
        }

        events
    }

    fn update_hover(
        &mut self,
        position: Pos2,
        camera: &Camera,
        nodes: &[PositionedNode],
        events: &mut Vec<InteractionEvent>,
    ) {
        let hit = hit_test(position, camera, nodes).map(PositionedNode::id);
        if hit == self.hovered.as_deref() {
            return;
        }

        self.hovered = hit.map(str::to_owned);
        events.push(InteractionEvent::HoverChanged(self.hovered.clone()));
    }
}
