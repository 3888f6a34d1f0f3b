use std::collections::HashSet;

use eframe::egui::{self, Align2, Color32, FontId, Sense, Shape, Stroke, Ui, Vec2, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::data::{EdgeKind, TaxonomyGraph};

use super::super::render_utils::{
    blend_color, circle_visible, dim_color, draw_background, edge_visible, instance_color,
    world_to_screen,
};
use super::super::{HoverTarget, RenderGraph, ViewModel, layout};

fn search_matches(
    graph: &TaxonomyGraph,
    cache: &RenderGraph,
    query: &str,
) -> Option<HashSet<usize>> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let matcher = SkimMatcherV2::default();
    Some(
        cache
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let datum = &graph.nodes[node.graph_index];
                if matcher.fuzzy_match(&datum.label, query).is_some()
                    || matcher.fuzzy_match(&datum.id, query).is_some()
                {
                    Some(index)
                } else {
                    None
                }
            })
            .collect(),
    )
}

impl ViewModel {
    fn note_canvas_size(&mut self, size: Vec2) -> bool {
        let resized = self
            .last_canvas_size
            .is_some_and(|previous| previous != size);
        self.last_canvas_size = Some(size);
        if resized {
            self.excitation.restart();
        }
        resized
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        if self.graph_dirty {
            self.rebuild_render_graph();
        }

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect, self.pan, self.zoom);

        self.note_canvas_size(rect.size());

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);

        let pan = self.pan;
        let zoom = self.zoom;
        let pointer = response.hover_pos();
        let clicked = response.clicked_by(egui::PointerButton::Primary);

        let pending_expand = {
            let Ok(graph) = &self.taxonomy else {
                return;
            };
            let Some(cache) = self.graph_cache.as_mut() else {
                return;
            };

            let moving = layout::step_layout(
                cache,
                &graph.radius_by_depth,
                &self.layout_config,
                &mut self.excitation,
            );
            if moving || response.dragged() {
                ui.ctx().request_repaint();
            }

            cache.view_scratch.screen_positions.clear();
            cache.view_scratch.screen_radii.clear();
            for node in &cache.nodes {
                cache
                    .view_scratch
                    .screen_positions
                    .push(world_to_screen(rect, pan, zoom, node.world_pos));
                cache
                    .view_scratch
                    .screen_radii
                    .push((node.radius * zoom.powf(0.40)).clamp(2.5, 40.0));
            }

            let hovered_node = Self::hovered_node_index(
                pointer,
                &cache.view_scratch.screen_positions,
                &cache.view_scratch.screen_radii,
            );
            let hovered_edge = if hovered_node.is_none() {
                Self::hovered_edge_index(
                    pointer,
                    &cache.edges,
                    &cache.view_scratch.screen_positions,
                )
            } else {
                None
            };

            self.hovered = hovered_node
                .map(|index| HoverTarget::Node(cache.nodes[index].graph_index))
                .or_else(|| {
                    hovered_edge.map(|index| HoverTarget::Edge(cache.edges[index].graph_edge))
                });

            let matches = search_matches(graph, cache, &self.search);
            let search_active = matches.as_ref().is_some_and(|matched| !matched.is_empty());
            let zoom_sqrt = zoom.sqrt();

            for edge in &cache.edges {
                let start = cache.view_scratch.screen_positions[edge.from];
                let end = cache.view_scratch.screen_positions[edge.to];
                if !edge_visible(rect, start, end, 4.0) {
                    continue;
                }

                let is_hovered = self.hovered == Some(HoverTarget::Edge(edge.graph_edge));
                match edge.kind {
                    EdgeKind::Direct => {
                        let (width, color) = if is_hovered {
                            (
                                (2.8 * zoom_sqrt).clamp(1.6, 5.0),
                                Color32::from_rgb(246, 206, 104),
                            )
                        } else {
                            (
                                (1.3 * zoom_sqrt).clamp(0.6, 3.2),
                                Color32::from_rgba_unmultiplied(130, 140, 150, 180),
                            )
                        };
                        painter.line_segment([start, end], Stroke::new(width, color));
                    }
                    EdgeKind::Indirect => {
                        let (width, color) = if is_hovered {
                            (
                                (2.4 * zoom_sqrt).clamp(1.4, 4.4),
                                Color32::from_rgb(241, 146, 94),
                            )
                        } else {
                            (
                                (1.1 * zoom_sqrt).clamp(0.5, 2.6),
                                Color32::from_rgba_unmultiplied(110, 120, 140, 140),
                            )
                        };
                        painter.extend(Shape::dashed_line(
                            &[start, end],
                            Stroke::new(width, color),
                            8.0,
                            6.0,
                        ));
                    }
                }
            }

            let mut expandable_under_pointer = false;
            for (index, node) in cache.nodes.iter().enumerate() {
                let position = cache.view_scratch.screen_positions[index];
                let radius = cache.view_scratch.screen_radii[index];
                if !circle_visible(rect, position, radius) {
                    continue;
                }

                let datum = &graph.nodes[node.graph_index];
                let is_hovered = self.hovered == Some(HoverTarget::Node(node.graph_index));
                let is_root = index == cache.root_index;
                let expandable = graph.has_hidden_children(node.graph_index);
                let is_match = matches.as_ref().is_some_and(|matched| matched.contains(&index));

                let base = instance_color(
                    datum.number_of_instances.max(1),
                    cache.min_instances,
                    cache.max_instances,
                );
                let fill = if is_hovered {
                    Color32::from_rgb(255, 164, 101)
                } else if is_match {
                    blend_color(base, Color32::from_rgb(103, 196, 255), 0.68)
                } else if search_active {
                    dim_color(base, 0.38)
                } else {
                    base
                };

                painter.circle_filled(position, radius, fill);

                let (stroke_width, stroke_color) = if is_root {
                    (2.0, Color32::from_rgb(245, 206, 93))
                } else if expandable {
                    (2.0, Color32::from_gray(230))
                } else {
                    (1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190))
                };
                painter.circle_stroke(position, radius, Stroke::new(stroke_width, stroke_color));

                if is_hovered && expandable {
                    expandable_under_pointer = true;
                }

                if is_hovered || is_match || is_root || zoom > 1.2 || radius > 16.0 {
                    painter.text(
                        position + vec2(radius + 5.0, 0.0),
                        Align2::LEFT_CENTER,
                        datum.label.as_str(),
                        FontId::proportional(12.0),
                        Color32::from_gray(238),
                    );
                }
            }

            if expandable_under_pointer {
                ui.output_mut(|output| {
                    output.cursor_icon = egui::CursorIcon::PointingHand;
                });
            }

            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                format!(
                    "visible {} nodes | {} edges | alpha {:.3}",
                    cache.nodes.len(),
                    cache.edges.len(),
                    self.excitation.alpha()
                ),
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );

            if clicked {
                if let Some(HoverTarget::Node(graph_index)) = self.hovered {
                    Some(graph_index)
                } else {
                    None
                }
            } else {
                None
            }
        };

        if let Some(graph_index) = pending_expand
            && let Ok(graph) = self.taxonomy.as_mut()
            && graph.expand(graph_index)
        {
            self.graph_dirty = true;
            self.excitation.restart();
            ui.ctx().request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use crate::data::parse_taxonomy_graph;

    use super::super::super::{LoadReport, ViewModel, layout};

    const SAMPLE: &str = r#"{
        "nodes": [
            {"id": "R", "label": "root", "distance_to_root": 0},
            {"id": "A", "label": "a", "distance_to_root": 1}
        ],
        "links": [{"parent": "R", "child": "A"}]
    }"#;

    fn model() -> ViewModel {
        ViewModel::new(LoadReport {
            taxonomy: parse_taxonomy_graph(SAMPLE).map_err(|error| error.to_string()),
            populations: Ok(Vec::new()),
        })
    }

    #[test]
    fn canvas_resize_restarts_excitation_without_touching_visibility() {
        let mut model = model();
        model.rebuild_render_graph();

        // First observation establishes the baseline, not a resize.
        assert!(!model.note_canvas_size(vec2(800.0, 600.0)));
        assert!(!model.note_canvas_size(vec2(800.0, 600.0)));

        let radii = model.taxonomy.as_ref().unwrap().radius_by_depth.clone();
        let cache = model.graph_cache.as_mut().unwrap();
        layout::step_layout(cache, &radii, &model.layout_config, &mut model.excitation);
        assert!(model.excitation.alpha() < 1.0);

        let visible_before = model.taxonomy.as_ref().unwrap().visible_count();
        assert!(model.note_canvas_size(vec2(640.0, 480.0)));
        assert_eq!(model.excitation.alpha(), 1.0);
        assert_eq!(
            model.taxonomy.as_ref().unwrap().visible_count(),
            visible_before
        );
        assert!(!model.graph_dirty);
    }
}
