use chrono::Utc;
use eframe::egui::{self, RichText, Ui};
use serde_json::Value;

use skill_constellation::util::format_age;

use super::super::ViewModel;

fn payload_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Selection Details");
        ui.add_space(6.0);

        let selected = self.surface.selected().map(str::to_owned);
        match selected.as_deref().and_then(|id| self.find_node(id)).cloned() {
            None => {
                ui.label("Click a skill in the graph to see its details.");
            }
            Some(node) => {
                ui.label(RichText::new(&node.name).strong().size(16.0));
                ui.label(RichText::new(node.category.label()).color(node.category.color()));
                ui.small(node.id.as_str());
                ui.add_space(6.0);

                ui.label(format!("Score: {:.0} / 100", node.score));
                ui.add(egui::ProgressBar::new(node.score_fraction()).desired_width(200.0));
                ui.label(format!("Experience: {:.0} xp", node.xp));
                match node.last_updated {
                    Some(last_updated) => ui.label(format!(
                        "Last updated: {} ({})",
                        last_updated.format("%Y-%m-%d"),
                        format_age(last_updated, Utc::now())
                    )),
                    None => ui.label("Last updated: unknown"),
                };

                if !node.details.is_empty() {
                    ui.separator();
                    ui.label(RichText::new("More").strong());
                    egui::Grid::new("node_payload")
                        .num_columns(2)
                        .striped(true)
                        .show(ui, |ui| {
                            for (key, value) in &node.details {
                                ui.label(key.as_str());
                                ui.label(payload_text(value));
                                ui.end_row();
                            }
                        });
                }

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Focus").clicked() {
                        self.surface.focus_node(&node.id);
                    }
                    if ui.button("Deselect").on_hover_text("Escape").clicked() {
                        self.surface.clear_selection();
                    }
                });
            }
        }

        ui.separator();
        ui.label(RichText::new("Recently selected").strong());
        if self.breadcrumbs.is_empty() {
            ui.label("Nothing yet.");
            return;
        }

        let mut jump_to = None;
        for id in &self.breadcrumbs {
            let Some(node) = self.find_node(id) else {
                continue;
            };
            let is_current = selected.as_deref() == Some(id.as_str());
            if ui.selectable_label(is_current, node.name.as_str()).clicked() {
                jump_to = Some(id.clone());
            }
        }

        if let Some(id) = jump_to {
            // Hidden by the filters: the surface ignores unknown ids.
            self.surface.select(Some(&id));
            self.surface.focus_node(&id);
            self.push_breadcrumb(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_strings_are_unquoted() {
        assert_eq!(payload_text(&Value::String("solid".to_owned())), "solid");
        assert_eq!(payload_text(&serde_json::json!(4)), "4");
        assert_eq!(payload_text(&serde_json::json!({"a": 1})), r#"{"a":1}"#);
    }
}
