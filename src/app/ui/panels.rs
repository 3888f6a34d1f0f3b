use eframe::egui::{self, Context, Ui, Vec2};

use crate::chart;

use super::super::{LoadReport, View, ViewModel, layout};

impl ViewModel {
    pub(in crate::app) fn new(report: LoadReport) -> Self {
        Self {
            taxonomy: report.taxonomy,
            populations: report.populations,
            view: View::Taxonomy,
            search: String::new(),
            pan: Vec2::ZERO,
            zoom: 1.0,
            hovered: None,
            layout_config: layout::LayoutConfig::default(),
            excitation: layout::Excitation::new(),
            graph_dirty: true,
            graph_cache: None,
            last_canvas_size: None,
            visible_node_count: 0,
            visible_edge_count: 0,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        hierarchy_path: &str,
        population_path: &str,
    ) {
        if self.graph_dirty {
            self.rebuild_render_graph();
        }

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("taxoscope");
                    ui.separator();
                    ui.selectable_value(&mut self.view, View::Taxonomy, "Taxonomy");
                    ui.selectable_value(&mut self.view, View::Population, "Populations");
                    ui.separator();
                    match self.view {
                        View::Taxonomy => {
                            ui.label(format!("dataset: {hierarchy_path}"));
                            if let Ok(graph) = &self.taxonomy {
                                ui.label(format!("root: {}", graph.nodes[graph.root].label));
                                ui.label(format!("nodes: {}", graph.node_count()));
                                ui.label(format!("edges: {}", graph.edge_count()));
                                ui.label(format!("revealed: {}", graph.visible_count()));
                            }
                        }
                        View::Population => {
                            ui.label(format!("dataset: {population_path}"));
                            if let Ok(data) = &self.populations {
                                ui.label(format!("records: {}", data.len()));
                            }
                        }
                    }
                });
            });

        if self.view == View::Taxonomy && self.taxonomy.is_ok() {
            egui::SidePanel::left("controls")
                .resizable(true)
                .default_width(320.0)
                .show(ctx, |ui| self.draw_controls(ui));

            egui::SidePanel::right("details")
                .resizable(true)
                .default_width(340.0)
                .show(ctx, |ui| self.draw_details(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.view {
            View::Taxonomy => {
                if let Err(error) = &self.taxonomy {
                    let message = error.clone();
                    show_dataset_error(ui, "Failed to load taxonomy dataset", &message);
                } else {
                    self.draw_graph(ui);
                }
            }
            View::Population => match &self.populations {
                Ok(data) => chart::draw_population_chart(ui, data),
                Err(error) => show_dataset_error(ui, "Failed to load population dataset", error),
            },
        });
    }
}

fn show_dataset_error(ui: &mut Ui, title: &str, error: &str) {
    ui.heading(title);
    ui.add_space(6.0);
    ui.label(error);
}
