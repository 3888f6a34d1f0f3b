use eframe::egui::{Slider, Ui, Vec2};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Layout");
        ui.add_space(6.0);

        let mut changed = false;
        changed |= ui
            .add(Slider::new(&mut self.layout_config.center_alpha, 0.0..=1.0).text("center pull"))
            .changed();
        changed |= ui
            .add(Slider::new(&mut self.layout_config.link_alpha, 0.0..=1.0).text("link pull"))
            .changed();
        changed |= ui
            .add(Slider::new(&mut self.layout_config.sibling_alpha, 0.0..=1.0).text("sibling pull"))
            .changed();
        changed |= ui
            .add(
                Slider::new(&mut self.layout_config.collide_padding, 0.0..=40.0)
                    .text("collision padding"),
            )
            .changed();
        changed |= ui
            .add(
                Slider::new(&mut self.layout_config.collide_iterations, 1..=64)
                    .text("collision passes"),
            )
            .changed();
        changed |= ui
            .add(
                Slider::new(&mut self.layout_config.alpha_decay, 0.0001..=0.05)
                    .logarithmic(true)
                    .text("alpha decay"),
            )
            .changed();
        changed |= ui
            .add(
                Slider::new(&mut self.layout_config.velocity_decay, 0.0..=0.9)
                    .text("velocity decay"),
            )
            .changed();
        if changed {
            self.excitation.restart();
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Restart layout").clicked() {
                self.excitation.restart();
            }
            if ui.button("Reset view").clicked() {
                self.pan = Vec2::ZERO;
                self.zoom = 1.0;
            }
        });

        ui.separator();
        ui.heading("Search");
        ui.add_space(4.0);
        ui.text_edit_singleline(&mut self.search);
        if !self.search.trim().is_empty() && ui.button("Clear").clicked() {
            self.search.clear();
        }

        ui.separator();
        ui.heading("Stats");
        ui.add_space(4.0);
        if let Ok(graph) = &self.taxonomy {
            ui.label(format!(
                "revealed nodes: {} / {}",
                graph.visible_count(),
                graph.node_count()
            ));
        }
        ui.label(format!("rendered nodes: {}", self.visible_node_count));
        ui.label(format!("rendered edges: {}", self.visible_edge_count));
        ui.label(format!("excitation alpha: {:.3}", self.excitation.alpha()));
        ui.label(if self.excitation.is_active() {
            "simulation: running"
        } else {
            "simulation: converged"
        });
    }
}
