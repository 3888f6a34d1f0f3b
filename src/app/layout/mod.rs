mod forces;

use super::RenderGraph;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct LayoutConfig {
    pub(in crate::app) center_alpha: f32,
    pub(in crate::app) link_alpha: f32,
    pub(in crate::app) sibling_alpha: f32,
    pub(in crate::app) collide_padding: f32,
    pub(in crate::app) collide_iterations: usize,
    pub(in crate::app) alpha_decay: f32,
    pub(in crate::app) velocity_decay: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            center_alpha: 1.0,
            link_alpha: 0.1,
            sibling_alpha: 0.25,
            collide_padding: 10.0,
            collide_iterations: 12,
            alpha_decay: 0.001,
            velocity_decay: 0.1,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(in crate::app) struct Excitation {
    alpha: f32,
    floor: f32,
}

impl Excitation {
    pub(in crate::app) fn new() -> Self {
        Self {
            alpha: 1.0,
            floor: 0.001,
        }
    }

    pub(in crate::app) fn alpha(&self) -> f32 {
        self.alpha
    }

    pub(in crate::app) fn is_active(&self) -> bool {
        self.alpha >= self.floor
    }

    pub(in crate::app) fn restart(&mut self) {
        self.alpha = 1.0;
    }

    fn decay(&mut self, rate: f32) {
        self.alpha -= self.alpha * rate.clamp(0.0, 1.0);
    }
}

pub(in crate::app) fn step_layout(
    cache: &mut RenderGraph,
    radius_by_depth: &[f32],
    config: &LayoutConfig,
    excitation: &mut Excitation,
) -> bool {
    if cache.nodes.is_empty() || !excitation.is_active() {
        return false;
    }

    forces::apply_center_pull(cache, radius_by_depth, config.center_alpha);
    forces::apply_link_force(cache, config.link_alpha);
    forces::apply_sibling_force(cache, config.sibling_alpha);
    forces::resolve_collisions(cache, config.collide_padding, config.collide_iterations);

    let damping = 1.0 - config.velocity_decay.clamp(0.0, 1.0);
    for node in &mut cache.nodes {
        node.world_pos += node.velocity;
        node.velocity *= damping;
    }

    forces::pin_centroid(cache);
    excitation.decay(config.alpha_decay);
    true
}

#[cfg(test)]
mod tests {
    use eframe::egui::{Vec2, vec2};

    use super::super::{RenderEdge, RenderGraph, RenderNode, ViewScratch};
    use crate::data::EdgeKind;

    use super::*;

    fn render_graph(positions: &[(f32, f32)], depths: &[u32]) -> RenderGraph {
        let nodes = positions
            .iter()
            .zip(depths.iter())
            .enumerate()
            .map(|(index, (&(x, y), &depth))| RenderNode {
                graph_index: index,
                depth,
                world_pos: vec2(x, y),
                velocity: Vec2::ZERO,
                radius: 8.0,
            })
            .collect::<Vec<_>>();

        let count = nodes.len();
        RenderGraph {
            nodes,
            edges: Vec::new(),
            render_index_by_node: (0..count).map(|index| (index, index)).collect(),
            root_index: 0,
            direct_parents: vec![Vec::new(); count],
            siblings: vec![Vec::new(); count],
            min_instances: 1,
            max_instances: 1,
            view_scratch: ViewScratch {
                screen_positions: Vec::new(),
                screen_radii: Vec::new(),
            },
        }
    }

    #[test]
    fn center_pull_moves_node_toward_its_depth_ring() {
        let mut cache = render_graph(&[(0.0, 0.0), (10.0, 0.0)], &[0, 1]);
        let radii = vec![100.0, 200.0];

        // Too close to the root: a full-strength pull lands exactly on the ring.
        forces::apply_center_pull(&mut cache, &radii, 1.0);
        let distance = cache.nodes[1].world_pos.length();
        assert!((distance - 200.0).abs() < 0.001);

        // Root never moves.
        assert_eq!(cache.nodes[0].world_pos, Vec2::ZERO);
    }

    #[test]
    fn center_pull_partial_alpha_converges_monotonically() {
        let mut cache = render_graph(&[(0.0, 0.0), (500.0, 0.0)], &[0, 1]);
        let radii = vec![100.0, 200.0];

        let mut last_error = (cache.nodes[1].world_pos.length() - 200.0).abs();
        for _ in 0..50 {
            forces::apply_center_pull(&mut cache, &radii, 0.3);
            let error = (cache.nodes[1].world_pos.length() - 200.0).abs();
            assert!(error <= last_error + 0.001);
            last_error = error;
        }
        assert!(last_error < 1.0);
    }

    #[test]
    fn link_force_blends_toward_direct_parent_mean() {
        let mut cache = render_graph(&[(0.0, 0.0), (100.0, 0.0), (0.0, 100.0), (80.0, 80.0)], &[
            0, 1, 1, 2,
        ]);
        cache.direct_parents[3] = vec![1, 2];

        forces::apply_link_force(&mut cache, 0.5);
        // Parent mean is (50, 50); half-way blend from (80, 80).
        assert!((cache.nodes[3].world_pos - vec2(65.0, 65.0)).length() < 0.001);
        // Nodes without direct parents are untouched.
        assert_eq!(cache.nodes[1].world_pos, vec2(100.0, 0.0));
    }

    #[test]
    fn sibling_force_blends_toward_sibling_mean() {
        let mut cache = render_graph(&[(0.0, 0.0), (100.0, 0.0), (0.0, 100.0)], &[0, 1, 1]);
        cache.siblings[1] = vec![2];
        cache.siblings[2] = vec![1];

        forces::apply_sibling_force(&mut cache, 0.25);
        // Node 1 moves a quarter of the way toward node 2's position.
        assert!((cache.nodes[1].world_pos - vec2(75.0, 25.0)).length() < 0.001);
    }

    #[test]
    fn collision_separates_overlapping_nodes() {
        let mut cache = render_graph(&[(0.0, 0.0), (1.0, 0.0)], &[0, 1]);

        forces::resolve_collisions(&mut cache, 10.0, 24);
        for node in &mut cache.nodes {
            node.world_pos += node.velocity;
        }

        let gap = (cache.nodes[0].world_pos - cache.nodes[1].world_pos).length();
        // Separation approaches radius + radius + padding.
        assert!(gap > 20.0);
    }

    #[test]
    fn collision_leaves_separated_nodes_alone() {
        let mut cache = render_graph(&[(0.0, 0.0), (500.0, 0.0)], &[0, 1]);
        forces::resolve_collisions(&mut cache, 10.0, 8);
        assert_eq!(cache.nodes[0].velocity, Vec2::ZERO);
        assert_eq!(cache.nodes[1].velocity, Vec2::ZERO);
    }

    #[test]
    fn centroid_is_pinned_to_origin() {
        let mut cache = render_graph(&[(100.0, 100.0), (300.0, 100.0)], &[0, 1]);
        forces::pin_centroid(&mut cache);

        let centroid = (cache.nodes[0].world_pos + cache.nodes[1].world_pos) / 2.0;
        assert!(centroid.length() < 0.001);
        // Relative geometry is preserved.
        let delta = cache.nodes[1].world_pos - cache.nodes[0].world_pos;
        assert!((delta - vec2(200.0, 0.0)).length() < 0.001);
    }

    #[test]
    fn excitation_decays_and_restarts() {
        let mut excitation = Excitation::new();
        assert!(excitation.is_active());
        assert_eq!(excitation.alpha(), 1.0);

        for _ in 0..20_000 {
            excitation.decay(0.001);
        }
        assert!(!excitation.is_active());

        excitation.restart();
        assert!(excitation.is_active());
        assert_eq!(excitation.alpha(), 1.0);
    }

    #[test]
    fn converged_step_is_a_no_op() {
        let mut cache = render_graph(&[(0.0, 0.0), (300.0, 0.0)], &[0, 1]);
        let before = cache.nodes[1].world_pos;
        let config = LayoutConfig::default();
        let mut excitation = Excitation::new();
        while excitation.is_active() {
            excitation.decay(0.5);
        }

        assert!(!step_layout(&mut cache, &[100.0, 200.0], &config, &mut excitation));
        assert_eq!(cache.nodes[1].world_pos, before);
    }

    #[test]
    fn full_ticks_settle_children_around_the_root() {
        let mut cache = render_graph(
            &[(0.0, 0.0), (40.0, 10.0), (-30.0, 20.0), (15.0, -35.0)],
            &[0, 1, 1, 1],
        );
        for index in 1..4 {
            cache.direct_parents[index] = vec![0];
            cache.siblings[index] = (1..4).filter(|&other| other != index).collect();
        }
        cache.edges = (1..4)
            .map(|to| RenderEdge {
                graph_edge: to - 1,
                from: 0,
                to,
                kind: EdgeKind::Direct,
            })
            .collect();

        let config = LayoutConfig::default();
        let mut excitation = Excitation::new();
        let radii = vec![100.0, 200.0];
        for _ in 0..600 {
            step_layout(&mut cache, &radii, &config, &mut excitation);
        }

        let root = cache.nodes[0].world_pos;
        for node in &cache.nodes[1..] {
            let distance = (node.world_pos - root).length();
            assert!(
                (50.0..400.0).contains(&distance),
                "child drifted to distance {distance}"
            );
        }
    }
}
