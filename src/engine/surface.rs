use std::collections::HashSet;

use tracing::debug;

use crate::config::ViewerConfig;
use crate::skill::SkillNode;

use super::camera::{Camera, Viewport, apply_zoom, focus_on};
use super::interaction::{InteractionEvent, InteractionInput, InteractionState, PointerEvent};
use super::layout::{LayoutKind, PositionedNode, layout_nodes};
use super::render::{Canvas, RenderStats, Scene, render_scene};

pub trait SurfaceListener {
    fn on_node_select(&mut self, _id: &str) {}
    fn on_node_hover(&mut self, _id: Option<&str>) {}
    fn on_node_double_click(&mut self, _id: &str) {}
}

impl SurfaceListener for () {}

impl SurfaceListener for Vec<InteractionEvent> {
    fn on_node_select(&mut self, id: &str) {
        self.push(InteractionEvent::Selected(id.to_owned()));
    }

    fn on_node_hover(&mut self, id: Option<&str>) {
        self.push(InteractionEvent::HoverChanged(id.map(str::to_owned)));
    }

    fn on_node_double_click(&mut self, id: &str) {
        self.push(InteractionEvent::DoubleClicked(id.to_owned()));
    }
}

fn dispatch(listener: &mut impl SurfaceListener, event: &InteractionEvent) {
    match event {
        InteractionEvent::HoverChanged(id) => listener.on_node_hover(id.as_deref()),
        InteractionEvent::Selected(id) => listener.on_node_select(id),
        InteractionEvent::DoubleClicked(id) => listener.on_node_double_click(id),
    }
}

pub struct SkillGraphSurface {
    config: ViewerConfig,
    nodes: Vec<SkillNode>,
    layout_kind: LayoutKind,
    viewport: Viewport,
    positioned: Vec<PositionedNode>,
    layout_pending: bool,
    camera: Camera,
    interaction: InteractionState,
    needs_repaint: bool,
}

impl SkillGraphSurface {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            layout_kind: config.layout,
            config,
            nodes: Vec::new(),
            viewport: Viewport::default(),
            positioned: Vec::new(),
            layout_pending: false,
            camera: Camera::default(),
            interaction: InteractionState::default(),
            needs_repaint: true,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn nodes(&self) -> &[SkillNode] {
        &self.nodes
    }

    pub fn positioned_nodes(&self) -> &[PositionedNode] {
        &self.positioned
    }

    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.positioned.iter().find(|placed| placed.id() == id)
    }

    pub fn layout_kind(&self) -> LayoutKind {
        self.layout_kind
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn hovered(&self) -> Option<&str> {
        self.interaction.hovered()
    }

    pub fn selected(&self) -> Option<&str> {
        self.interaction.selected()
    }

    pub fn is_dragging(&self) -> bool {
        self.interaction.is_dragging()
    }

    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.needs_repaint)
    }

    pub fn set_nodes(&mut self, nodes: Vec<SkillNode>, listener: &mut impl SurfaceListener) {
        self.nodes = nodes.into_iter().map(SkillNode::sanitized).collect();

        let known = self.nodes.iter().map(|node| node.id.as_str()).collect::<HashSet<_>>();
        let (hover_cleared, _) = self.interaction.retain_known(&known);
        if hover_cleared {
            listener.on_node_hover(None);
        }

        self.relayout();
    }

    pub fn set_layout_kind(&mut self, kind: LayoutKind) {
        if self.layout_kind == kind {
            return;
        }
        self.layout_kind = kind;
        self.relayout();
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        self.relayout();
    }

    fn relayout(&mut self) {
        self.needs_repaint = true;
        if self.viewport.is_empty() {
            self.positioned.clear();
            self.layout_pending = true;
            return;
        }

        self.positioned = layout_nodes(&self.nodes, self.layout_kind, self.viewport);
        self.layout_pending = false;
        debug!(
            kind = ?self.layout_kind,
            nodes = self.positioned.len(),
            width = self.viewport.width,
            height = self.viewport.height,
            "laid out skill graph"
        );
    }

    pub fn handle_pointer(&mut self, event: PointerEvent, listener: &mut impl SurfaceListener) {
        let before = self.visual_state();
        let input = InteractionInput {
            nodes: &self.positioned,
            viewport: self.viewport,
            limits: &self.config.camera,
            settings: &self.config.interaction,
        };
        let events = self.interaction.handle(event, &mut self.camera, &input);

        if before != self.visual_state() {
            self.needs_repaint = true;
        }
        for event in &events {
            dispatch(listener, event);
        }
    }

    fn visual_state(&self) -> (Camera, Option<String>, Option<String>, bool) {
        (
            self.camera,
            self.interaction.hovered().map(str::to_owned),
            self.interaction.selected().map(str::to_owned),
            self.interaction.is_dragging(),
        )
    }

    pub fn select(&mut self, id: Option<&str>) {
        let id = id.filter(|id| self.nodes.iter().any(|node| node.id == *id));
        if self.interaction.select(id.map(str::to_owned)) {
            self.needs_repaint = true;
        }
    }

    pub fn clear_selection(&mut self) {
        self.select(None);
    }

    pub fn reset_camera(&mut self) {
        self.set_camera(Camera::default());
    }

    pub fn zoom_by(&mut self, factor: f32) {
        let camera = apply_zoom(&self.camera, factor, None, self.viewport, &self.config.camera);
        self.set_camera(camera);
    }

    pub fn focus_node(&mut self, id: &str) -> bool {
        let Some(position) = self.node(id).map(|placed| placed.position) else {
            return false;
        };
        let camera = focus_on(
            position,
            self.config.camera.focus_zoom,
            self.viewport,
            &self.config.camera,
        );
        self.set_camera(camera);
        true
    }

    fn set_camera(&mut self, camera: Camera) {
        if self.camera != camera {
            self.camera = camera;
            self.needs_repaint = true;
        }
    }

    pub fn paint(&mut self, canvas: &mut impl Canvas) -> RenderStats {
        if self.layout_pending {
            return RenderStats::default();
        }

        let scene = Scene {
            nodes: &self.positioned,
            camera: &self.camera,
            viewport: self.viewport,
            hovered: self.interaction.hovered(),
            selected: self.interaction.selected(),
            settings: &self.config.render,
        };
        render_scene(canvas, &scene)
    }
}
