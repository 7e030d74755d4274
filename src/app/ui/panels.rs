use std::collections::VecDeque;

use chrono::Utc;
use eframe::egui::{self, Align, Context, Layout};
use tracing::info;

use skill_constellation::config::ViewerConfig;
use skill_constellation::engine::{RenderStats, SkillGraphSurface};
use skill_constellation::skill::{NodeFilter, SkillNode};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) const MAX_BREADCRUMBS: usize = 8;

    pub(in crate::app) fn new(nodes: Vec<SkillNode>, config: ViewerConfig) -> Self {
        let mut model = Self {
            all_nodes: nodes,
            filter: NodeFilter::default(),
            filter_dirty: true,
            surface: SkillGraphSurface::new(config),
            breadcrumbs: VecDeque::new(),
            pointer_inside: false,
            last_stats: RenderStats::default(),
            show_fps_bar: true,
            fps_current: 0.0,
            fps_samples: VecDeque::new(),
        };
        model.apply_filter();
        model
    }

    pub(in crate::app) fn replace_nodes(&mut self, nodes: Vec<SkillNode>) {
        info!(count = nodes.len(), "reloaded skill nodes");
        self.all_nodes = nodes;
        self.apply_filter();

        let known = &self.all_nodes;
        self.breadcrumbs
            .retain(|id| known.iter().any(|node| &node.id == id));
    }

    pub(in crate::app) fn apply_filter(&mut self) {
        let visible = self.filter.apply(&self.all_nodes, Utc::now());
        self.surface.set_nodes(visible, &mut ());
        self.filter_dirty = false;
    }

    pub(in crate::app) fn push_breadcrumb(&mut self, id: String) {
        if self.breadcrumbs.front() == Some(&id) {
            return;
        }
        self.breadcrumbs.retain(|existing| existing != &id);
        self.breadcrumbs.push_front(id);
        self.breadcrumbs.truncate(Self::MAX_BREADCRUMBS);
    }

    pub(in crate::app) fn find_node(&self, id: &str) -> Option<&SkillNode> {
        self.all_nodes.iter().find(|node| node.id == id)
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        source: &str,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        self.update_fps_counter(ctx);
        if self.filter_dirty {
            self.apply_filter();
        }

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Skill constellation");
                    ui.separator();
                    ui.label(format!("source: {source}"));
                    ui.label(format!(
                        "skills: {} / {}",
                        self.surface.nodes().len(),
                        self.all_nodes.len()
                    ));
                    let reload_button = ui.add_enabled(!is_loading, egui::Button::new("Reload"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(self.camera_text());
                        ui.label(self.visible_graph_text());
                        if let Some(fps_text) = self.fps_display_text() {
                            ui.label(fps_text);
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_graph(ui));
    }
}
