use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Pos2, Vec2};

use crate::data::{self, EdgeKind, PopulationDatum, TaxonomyGraph};

mod graph;
mod layout;
mod render_utils;
mod ui;

pub struct TaxoscopeApp {
    hierarchy_path: String,
    population_path: String,
    state: AppState,
}

struct LoadReport {
    taxonomy: Result<TaxonomyGraph, String>,
    populations: Result<Vec<PopulationDatum>, String>,
}

enum AppState {
    Loading {
        rx: Receiver<LoadReport>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum View {
    Taxonomy,
    Population,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HoverTarget {
    Node(usize),
    Edge(usize),
}

struct ViewModel {
    taxonomy: Result<TaxonomyGraph, String>,
    populations: Result<Vec<PopulationDatum>, String>,
    view: View,
    search: String,
    pan: Vec2,
    zoom: f32,
    hovered: Option<HoverTarget>,
    layout_config: layout::LayoutConfig,
    excitation: layout::Excitation,
    graph_dirty: bool,
    graph_cache: Option<RenderGraph>,
    last_canvas_size: Option<Vec2>,
    visible_node_count: usize,
    visible_edge_count: usize,
}

struct RenderGraph {
    nodes: Vec<RenderNode>,
    edges: Vec<RenderEdge>,
    render_index_by_node: HashMap<usize, usize>,
    root_index: usize,
    direct_parents: Vec<Vec<usize>>,
    siblings: Vec<Vec<usize>>,
    min_instances: u64,
    max_instances: u64,
    view_scratch: ViewScratch,
}

struct RenderNode {
    graph_index: usize,
    depth: u32,
    world_pos: Vec2,
    velocity: Vec2,
    radius: f32,
}

struct RenderEdge {
    graph_edge: usize,
    from: usize,
    to: usize,
    kind: EdgeKind,
}

struct ViewScratch {
    screen_positions: Vec<Pos2>,
    screen_radii: Vec<f32>,
}

impl TaxoscopeApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        hierarchy_path: String,
        population_path: String,
    ) -> Self {
        let state = Self::start_load(hierarchy_path.clone(), population_path.clone());
        Self {
            hierarchy_path,
            population_path,
            state,
        }
    }

    fn spawn_load(hierarchy_path: String, population_path: String) -> Receiver<LoadReport> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let taxonomy = data::load_taxonomy_graph(&hierarchy_path).map_err(|error| {
                log::error!("taxonomy load failed: {error:#}");
                format!("{error:#}")
            });
            let populations = data::load_population_data(&population_path).map_err(|error| {
                log::error!("population load failed: {error:#}");
                format!("{error:#}")
            });
            let _ = tx.send(LoadReport {
                taxonomy,
                populations,
            });
        });

        rx
    }

    fn start_load(hierarchy_path: String, population_path: String) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(hierarchy_path, population_path),
        }
    }
}

impl eframe::App for TaxoscopeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(report) => {
                        transition = Some(AppState::Ready(Box::new(ViewModel::new(report))));
                    }
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => {
                        transition =
                            Some(AppState::Error("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading datasets...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load datasets");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(
                            self.hierarchy_path.clone(),
                            self.population_path.clone(),
                        ));
                    }
                });
            }
            AppState::Ready(model) => {
                model.show(ctx, &self.hierarchy_path, &self.population_path);
            }
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
