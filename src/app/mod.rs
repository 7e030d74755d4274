use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use anyhow::Result;
use chrono::Utc;
use eframe::egui::{self, Context};
use tracing::{error, info};

use skill_constellation::config::ViewerConfig;
use skill_constellation::engine::{RenderStats, SkillGraphSurface};
use skill_constellation::skill::{NodeFilter, SkillNode, load_nodes, sample_nodes};

mod canvas;
mod graph;
mod ui;

#[derive(Clone, Debug)]
pub enum NodeSource {
    File(PathBuf),
    Sample { count: usize },
}

impl NodeSource {
    fn load(&self) -> Result<Vec<SkillNode>> {
        match self {
            Self::File(path) => load_nodes(path),
            Self::Sample { count } => Ok(sample_nodes(*count, Utc::now())),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Sample { count } => format!("sample ({count} skills)"),
        }
    }
}

type LoadResult = Result<Vec<SkillNode>, String>;

pub struct SkillMapApp {
    source: NodeSource,
    config: ViewerConfig,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
}

enum AppState {
    Loading { rx: Receiver<LoadResult> },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    all_nodes: Vec<SkillNode>,
    filter: NodeFilter,
    filter_dirty: bool,
    surface: SkillGraphSurface,
    breadcrumbs: VecDeque<String>,
    pointer_inside: bool,
    last_stats: RenderStats,
    show_fps_bar: bool,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
}

impl SkillMapApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        source: NodeSource,
        config: ViewerConfig,
    ) -> Self {
        let state = Self::start_load(source.clone());
        Self {
            source,
            config,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(source: NodeSource) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            info!(source = %source.describe(), "loading skill nodes");
            let result = source.load().map_err(|error| format!("{error:#}"));
            if let Err(error) = &result {
                error!(%error, "failed to load skill nodes");
            }
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(source: NodeSource) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(source),
        }
    }
}

impl eframe::App for SkillMapApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(nodes) => AppState::Ready(Box::new(ViewModel::new(
                            nodes,
                            self.config.clone(),
                        ))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading skills...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load skills");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.source.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.source.describe(), &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.source.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(Ok(nodes)) => model.replace_nodes(nodes),
                        Ok(Err(error)) => transition = Some(AppState::Error(error)),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
