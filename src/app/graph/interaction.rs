use eframe::egui::{self, Pos2, Rect, Ui};

use super::super::render_utils::screen_to_world;
use super::super::{RenderEdge, ViewModel};

const EDGE_PICK_DISTANCE: f32 = 6.0;

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let (scroll, pointer) = ui.input(|input| {
            (input.raw_scroll_delta.y, input.pointer.hover_pos())
        });
        if scroll == 0.0 {
            return;
        }
        let anchor_screen = pointer.unwrap_or_else(|| rect.center());
        let anchor_world = screen_to_world(rect, self.pan, self.zoom, anchor_screen);

        let factor = (scroll * 0.0018).exp().clamp(0.85, 1.15);
        self.zoom = (self.zoom * factor).clamp(0.05, 6.0);
        self.pan = anchor_screen - rect.center() - (anchor_world * self.zoom);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        let panning = response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle);
        if panning {
            self.pan += response.drag_delta();
        }
    }

    pub(in crate::app) fn hovered_node_index(
        pointer: Option<Pos2>,
        screen_positions: &[Pos2],
        screen_radii: &[f32],
    ) -> Option<usize> {
        let pointer = pointer?;
        (0..screen_positions.len())
            .filter_map(|index| {
                let distance = screen_positions[index].distance(pointer);
                if distance <= screen_radii[index] {
                    Some((index, distance))
                } else {
                    None
                }
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    pub(in crate::app) fn hovered_edge_index(
        pointer: Option<Pos2>,
        edges: &[RenderEdge],
        screen_positions: &[Pos2],
    ) -> Option<usize> {
        let pointer = pointer?;
        edges
            .iter()
            .enumerate()
            .filter_map(|(index, edge)| {
                let distance = point_segment_distance(
                    pointer,
                    screen_positions[edge.from],
                    screen_positions[edge.to],
                );
                if distance <= EDGE_PICK_DISTANCE {
                    Some((index, distance))
                } else {
                    None
                }
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }
}

fn point_segment_distance(point: Pos2, start: Pos2, end: Pos2) -> f32 {
    let segment = end - start;
    let length_sq = segment.length_sq();
    if length_sq <= f32::EPSILON {
        return start.distance(point);
    }

    let t = ((point - start).dot(segment) / length_sq).clamp(0.0, 1.0);
    let projection = start + segment * t;
    projection.distance(point)
}
