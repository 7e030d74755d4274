use chrono::Utc;
use eframe::egui::{self, Align2, Color32, FontId, Painter, Rect, Sense, Stroke, Ui, vec2};
use tracing::debug;

use skill_constellation::engine::camera::world_to_screen;
use skill_constellation::engine::hit_test::node_screen_radius;
use skill_constellation::engine::{SurfaceListener, Viewport};
use skill_constellation::util::format_age;

use super::super::ViewModel;
use super::super::canvas::EguiCanvas;

#[derive(Default)]
pub(in crate::app) struct FrameEvents {
    pub(in crate::app) selected: Option<String>,
    pub(in crate::app) double_clicked: Option<String>,
}

impl SurfaceListener for FrameEvents {
    fn on_node_select(&mut self, id: &str) {
        self.selected = Some(id.to_owned());
    }

    fn on_node_hover(&mut self, id: Option<&str>) {
        debug!(?id, "hover changed");
    }

    fn on_node_double_click(&mut self, id: &str) {
        self.double_clicked = Some(id.to_owned());
    }
}

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        if self.filter_dirty {
            self.apply_filter();
        }

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        self.surface.resize(Viewport::new(rect.width(), rect.height()));

        let mut frame_events = FrameEvents::default();
        for event in self.collect_pointer_events(ui, rect, &response) {
            self.surface.handle_pointer(event, &mut frame_events);
        }
        self.handle_graph_keys(ui, &response);
        self.apply_frame_events(frame_events);

        let painter = ui.painter_at(rect);
        let mut canvas = EguiCanvas::new(&painter, rect.min);
        self.last_stats = self.surface.paint(&mut canvas);

        if self.surface.is_dragging() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::Grabbing);
        } else if self.surface.hovered().is_some() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::PointingHand);
        }

        if self.surface.nodes().is_empty() {
            let message = if self.all_nodes.is_empty() {
                "No skills yet."
            } else {
                "No skills match the current filters."
            };
            painter.text(
                rect.center_bottom() - vec2(0.0, 32.0),
                Align2::CENTER_BOTTOM,
                message,
                FontId::proportional(15.0),
                Color32::from_gray(200),
            );
        }

        self.draw_tooltip(&painter, rect);

        if self.surface.take_repaint() {
            ui.ctx().request_repaint();
        }
    }

    pub(in crate::app) fn apply_frame_events(&mut self, events: FrameEvents) {
        if let Some(id) = events.selected {
            self.push_breadcrumb(id);
        }
        if let Some(id) = events.double_clicked {
            debug!(%id, "focused node from double click");
        }
    }

    fn draw_tooltip(&self, painter: &Painter, rect: Rect) {
        if self.surface.is_dragging() {
            return;
        }
        let Some(placed) = self.surface.hovered().and_then(|id| self.surface.node(id)) else {
            return;
        };

        let node = &placed.node;
        let camera = self.surface.camera();
        let mut text = format!(
            "{}\n{}  ·  score {:.0}  ·  {:.0} xp",
            node.name,
            node.category.label(),
            node.score,
            node.xp
        );
        if let Some(last_updated) = node.last_updated {
            text.push_str(&format!("\nupdated {}", format_age(last_updated, Utc::now())));
        }

        let anchor = rect.min
            + world_to_screen(placed.position, &camera).to_vec2()
            + vec2(node_screen_radius(node, &camera) + 12.0, 0.0);
        let galley =
            painter.layout_no_wrap(text, FontId::proportional(13.0), Color32::from_gray(240));
        let mut frame = Rect::from_min_size(anchor, galley.size()).expand(6.0);
        if frame.right() > rect.right() {
            frame = frame.translate(vec2(rect.right() - frame.right() - 4.0, 0.0));
        }
        if frame.bottom() > rect.bottom() {
            frame = frame.translate(vec2(0.0, rect.bottom() - frame.bottom() - 4.0));
        }

        painter.rect_filled(frame, 6.0, Color32::from_rgba_unmultiplied(18, 22, 36, 235));
        painter.rect_stroke(
            frame,
            6.0,
            Stroke::new(1.0, node.category.color()),
            egui::StrokeKind::Inside,
        );
        painter.galley(frame.min + vec2(6.0, 6.0), galley, Color32::from_gray(240));
    }
}
