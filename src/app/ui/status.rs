use eframe::egui::Context;

use super::super::ViewModel;

const FPS_WINDOW: usize = 180;

impl ViewModel {
    pub(in crate::app) fn update_fps_counter(&mut self, ctx: &Context) {
        let frame_time = ctx.input(|input| input.stable_dt);
        if frame_time > f32::EPSILON {
            self.record_fps(frame_time.recip());
        }
    }

    fn record_fps(&mut self, fps: f32) {
        self.fps_current = fps.min(1000.0);
        if self.fps_samples.len() == FPS_WINDOW {
            self.fps_samples.pop_front();
        }
        self.fps_samples.push_back(self.fps_current);
    }

    pub(in crate::app) fn fps_display_text(&self) -> Option<String> {
        if !self.show_fps_bar {
            return None;
        }

        let mut parts = vec![format!("FPS {:.0}", self.fps_current)];
        if !self.fps_samples.is_empty() {
            let avg = self.fps_samples.iter().sum::<f32>() / self.fps_samples.len() as f32;
            parts.push(format!("avg {avg:.1}"));
        }
        Some(parts.join(" | "))
    }

    pub(in crate::app) fn camera_text(&self) -> String {
        let camera = self.surface.camera();
        format!(
            "zoom {:.2}x  pan ({:.0}, {:.0})",
            camera.zoom, camera.pan.x, camera.pan.y
        )
    }

    pub(in crate::app) fn visible_graph_text(&self) -> String {
        format!(
            "drawn: {} nodes / {} labels",
            self.last_stats.nodes_drawn, self.last_stats.labels_drawn
        )
    }
}
