use eframe::egui::{RichText, Ui};

use crate::data::TaxonomyGraph;
use crate::util::{format_count, wikidata_url};

use super::super::{HoverTarget, ViewModel};

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Hover Details");
        ui.add_space(6.0);

        let Ok(graph) = &self.taxonomy else {
            ui.label("Taxonomy dataset failed to load.");
            return;
        };

        match self.hovered {
            None => {
                ui.label("Hover a node or an edge in the graph.");
                ui.add_space(4.0);
                ui.label("Click a node with a bright ring to reveal its subclasses.");
            }
            Some(HoverTarget::Node(index)) => {
                node_block(ui, graph, index, None);
            }
            Some(HoverTarget::Edge(edge_index)) => {
                let edge = &graph.edges[edge_index];
                ui.label(RichText::new(format!("{} edge", edge.kind.label())).strong());
                ui.add_space(6.0);
                node_block(ui, graph, edge.parent, Some("Parent"));
                ui.separator();
                node_block(ui, graph, edge.child, Some("Child"));
            }
        }
    }
}

fn node_block(ui: &mut Ui, graph: &TaxonomyGraph, index: usize, role: Option<&str>) {
    let node = &graph.nodes[index];

    if let Some(role) = role {
        ui.label(RichText::new(role).strong());
    }
    ui.label(RichText::new(node.label.as_str()).strong());
    if !node.description.is_empty() {
        ui.label(node.description.as_str());
    }
    ui.label(format!("Depth: {}", node.depth));
    ui.label(format!("Subclasses: {}", graph.children_of(index).len()));
    ui.label(format!(
        "Instances: {}",
        format_count(node.number_of_instances)
    ));
    ui.hyperlink_to(node.id.as_str(), wikidata_url(&node.id));
}
