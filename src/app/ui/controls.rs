use eframe::egui::{self, RichText, Ui};

use skill_constellation::engine::LayoutKind;
use skill_constellation::skill::{Category, MAX_SCORE, NodeFilter};

use super::super::ViewModel;

const DEFAULT_RECENCY_DAYS: u32 = 30;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Layout");
        ui.add_space(4.0);

        let current_layout = self.surface.layout_kind();
        let mut layout = current_layout;
        ui.horizontal(|ui| {
            for kind in LayoutKind::ALL {
                ui.selectable_value(&mut layout, kind, kind.label());
            }
        });
        if layout != current_layout {
            self.surface.set_layout_kind(layout);
        }

        ui.separator();
        ui.heading("View");
        ui.horizontal(|ui| {
            let zoom = self.surface.config().interaction;
            if ui.button("Zoom in").clicked() {
                self.surface.zoom_by(zoom.wheel_zoom_in);
            }
            if ui.button("Zoom out").clicked() {
                self.surface.zoom_by(zoom.wheel_zoom_out);
            }
            if ui
                .button("Reset view")
                .on_hover_text("Back to the initial pan and zoom (Home).")
                .clicked()
            {
                self.surface.reset_camera();
            }
        });
        let selected = self.surface.selected().map(str::to_owned);
        ui.add_enabled_ui(selected.is_some(), |ui| {
            if ui.button("Focus selected").clicked()
                && let Some(id) = &selected
            {
                self.surface.focus_node(id);
            }
        });
        ui.checkbox(&mut self.show_fps_bar, "FPS display");

        ui.separator();
        ui.heading("Filters");
        ui.add_space(4.0);

        let mut changed = false;

        ui.label(RichText::new("Categories").strong());
        for category in Category::ALL {
            let mut shown = self.filter.shows_category(category);
            let label = RichText::new(category.label()).color(category.color());
            if ui.checkbox(&mut shown, label).changed() {
                self.filter.toggle_category(category);
                changed = true;
            }
        }

        ui.add_space(6.0);
        changed |= ui
            .add(egui::Slider::new(&mut self.filter.min_score, 0.0..=MAX_SCORE).text("Min score"))
            .changed();
        changed |= ui
            .add(egui::Slider::new(&mut self.filter.max_score, 0.0..=MAX_SCORE).text("Max score"))
            .changed();

        let mut recent_only = self.filter.updated_within_days.is_some();
        if ui.checkbox(&mut recent_only, "Only recently updated").changed() {
            self.filter.updated_within_days = recent_only.then_some(DEFAULT_RECENCY_DAYS);
            changed = true;
        }
        if let Some(days) = &mut self.filter.updated_within_days {
            changed |= ui.add(egui::Slider::new(days, 1..=365).text("days")).changed();
        }

        ui.add_space(6.0);
        ui.label("Search").on_hover_text("Fuzzy match on skill names.");
        changed |= ui.text_edit_singleline(&mut self.filter.search).changed();

        ui.add_space(6.0);
        if ui
            .add_enabled(self.filter.is_active(), egui::Button::new("Clear filters"))
            .clicked()
        {
            self.filter = NodeFilter::default();
            changed = true;
        }

        if changed {
            self.filter_dirty = true;
        }
    }
}
