use eframe::egui::{self, Key, Pos2, Rect, Ui, Vec2};

use skill_constellation::engine::PointerEvent;

use super::super::ViewModel;

fn to_local(rect: Rect, position: Pos2) -> Pos2 {
    (position - rect.min).to_pos2()
}

impl ViewModel {
    pub(in crate::app) fn collect_pointer_events(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) -> Vec<PointerEvent> {
        let mut events = Vec::new();

        let (latest, pressed, released, moved, scroll) = ui.input(|input| {
            (
                input.pointer.latest_pos(),
                input.pointer.primary_pressed(),
                input.pointer.primary_released(),
                input.pointer.delta() != Vec2::ZERO,
                input.raw_scroll_delta.y,
            )
        });
        let inside = response.contains_pointer();
        let mut dragging = self.surface.is_dragging();

        if let Some(position) = latest.map(|position| to_local(rect, position)) {
            if inside && pressed {
                events.push(PointerEvent::Down(position));
                dragging = true;
            }

            if moved && (inside || dragging) {
                events.push(PointerEvent::Move(position));
            }

            if released && dragging {
                events.push(PointerEvent::Up(position));
            }

            if response.double_clicked() {
                events.push(PointerEvent::DoubleClick(position));
            }

            if inside && scroll.abs() > f32::EPSILON {
                events.push(PointerEvent::Wheel {
                    position,
                    delta: scroll,
                });
            }
        }

        if self.pointer_inside && !inside {
            events.push(PointerEvent::Leave);
        }
        self.pointer_inside = inside;

        events
    }

    pub(in crate::app) fn handle_graph_keys(&mut self, ui: &Ui, response: &egui::Response) {
        if !response.contains_pointer() && !response.has_focus() {
            return;
        }

        let (escape, home, zoom_in, zoom_out) = ui.input(|input| {
            (
                input.key_pressed(Key::Escape),
                input.key_pressed(Key::Home),
                input.key_pressed(Key::Plus) || input.key_pressed(Key::Equals),
                input.key_pressed(Key::Minus),
            )
        });

        if escape {
            self.surface.clear_selection();
        }
        if home {
            self.surface.reset_camera();
        }
        if zoom_in {
            self.surface.zoom_by(self.surface.config().interaction.wheel_zoom_in);
        }
        if zoom_out {
            self.surface.zoom_by(self.surface.config().interaction.wheel_zoom_out);
        }
    }
}
