use std::collections::HashMap;

use eframe::egui::{Vec2, vec2};

use super::super::render_utils::node_radius;
use super::super::{RenderEdge, RenderGraph, RenderNode, ViewModel, ViewScratch};

const SPAWN_SPREAD: f32 = 240.0;
const SPAWN_JITTER: f32 = 36.0;

impl ViewModel {
    pub(in crate::app) fn rebuild_render_graph(&mut self) {
        self.graph_dirty = false;
        self.hovered = None;

        let Ok(graph) = &self.taxonomy else {
            self.graph_cache = None;
            self.visible_node_count = 0;
            self.visible_edge_count = 0;
            return;
        };

        let visible = (0..graph.node_count())
            .filter(|&index| graph.is_visible(index))
            .collect::<Vec<_>>();
        if visible.is_empty() {
            self.graph_cache = None;
            self.visible_node_count = 0;
            self.visible_edge_count = 0;
            return;
        }

        let mut render_index_by_node = HashMap::with_capacity(visible.len());
        for (render_index, &graph_index) in visible.iter().enumerate() {
            render_index_by_node.insert(graph_index, render_index);
        }

        let mut min_instances = u64::MAX;
        let mut max_instances = 0u64;
        for &graph_index in &visible {
            let instances = graph.nodes[graph_index].number_of_instances.max(1);
            min_instances = min_instances.min(instances);
            max_instances = max_instances.max(instances);
        }
        if min_instances == u64::MAX {
            min_instances = 1;
        }
        if max_instances < min_instances {
            max_instances = min_instances;
        }

        let mut prior_nodes = self
            .graph_cache
            .take()
            .map(|cache| {
                cache
                    .nodes
                    .into_iter()
                    .map(|node| (node.graph_index, node))
                    .collect::<HashMap<_, _>>()
            })
            .unwrap_or_default();
        let prior_positions = prior_nodes
            .iter()
            .map(|(&graph_index, node)| (graph_index, node.world_pos))
            .collect::<HashMap<_, _>>();

        let mut nodes = Vec::with_capacity(visible.len());
        for &graph_index in &visible {
            let datum = &graph.nodes[graph_index];
            let radius =
                node_radius(datum.number_of_instances.max(1), min_instances, max_instances);

            if let Some(mut prior) = prior_nodes.remove(&graph_index) {
                prior.radius = radius;
                nodes.push(prior);
                continue;
            }

            let jitter = vec2(datum.seed.0, datum.seed.1);
            let world_pos = graph
                .direct_parents_of(graph_index)
                .into_iter()
                .find_map(|parent| prior_positions.get(&parent).copied())
                .map(|parent_pos| parent_pos + jitter * SPAWN_JITTER)
                .unwrap_or(jitter * SPAWN_SPREAD);

            nodes.push(RenderNode {
                graph_index,
                depth: datum.depth,
                world_pos,
                velocity: Vec2::ZERO,
                radius,
            });
        }

        let mut edges = Vec::with_capacity(graph.edge_count());
        for (graph_edge, edge) in graph.edges.iter().enumerate() {
            if let (Some(&from), Some(&to)) = (
                render_index_by_node.get(&edge.parent),
                render_index_by_node.get(&edge.child),
            ) {
                edges.push(RenderEdge {
                    graph_edge,
                    from,
                    to,
                    kind: edge.kind,
                });
            }
        }

        let mut direct_parents = Vec::with_capacity(visible.len());
        let mut siblings = Vec::with_capacity(visible.len());
        for &graph_index in &visible {
            direct_parents.push(
                graph
                    .direct_parents_of(graph_index)
                    .into_iter()
                    .filter_map(|parent| render_index_by_node.get(&parent).copied())
                    .collect::<Vec<_>>(),
            );
            siblings.push(
                graph
                    .siblings_of(graph_index)
                    .into_iter()
                    .filter_map(|sibling| render_index_by_node.get(&sibling).copied())
                    .collect::<Vec<_>>(),
            );
        }

        let root_index = render_index_by_node
            .get(&graph.root)
            .copied()
            .unwrap_or(0);

        self.visible_node_count = nodes.len();
        self.visible_edge_count = edges.len();
        self.graph_cache = Some(RenderGraph {
            nodes,
            edges,
            render_index_by_node,
            root_index,
            direct_parents,
            siblings,
            min_instances,
            max_instances,
            view_scratch: ViewScratch {
                screen_positions: Vec::new(),
                screen_radii: Vec::new(),
            },
        });
    }
}
