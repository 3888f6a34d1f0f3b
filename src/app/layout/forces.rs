use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};

use super::super::{RenderGraph, RenderNode};

const MIN_DISTANCE: f32 = 0.0001;

fn mean_position(indices: &[usize], nodes: &[RenderNode]) -> Option<Vec2> {
    if indices.is_empty() {
        return None;
    }
    let mut sum = Vec2::ZERO;
    for &index in indices {
        sum += nodes[index].world_pos;
    }
    Some(sum / indices.len() as f32)
}

pub(super) fn apply_center_pull(cache: &mut RenderGraph, radius_by_depth: &[f32], alpha: f32) {
    let root = cache.root_index;
    let root_pos = cache.nodes[root].world_pos;

    for index in 0..cache.nodes.len() {
        if index == root {
            continue;
        }

        let node = &mut cache.nodes[index];
        let goal = radius_by_depth
            .get(node.depth as usize)
            .or_else(|| radius_by_depth.last())
            .copied()
            .unwrap_or(0.0);

        let delta = root_pos - node.world_pos;
        let distance = delta.length();
        if distance <= MIN_DISTANCE {
            continue;
        }

        let keep = 1.0 - ((distance - goal) / distance) * alpha;
        node.world_pos = node.world_pos * keep + root_pos * (1.0 - keep);
    }
}

pub(super) fn apply_link_force(cache: &mut RenderGraph, alpha: f32) {
    let root = cache.root_index;

    for index in 0..cache.nodes.len() {
        if index == root {
            continue;
        }

        let Some(parent_mean) = mean_position(&cache.direct_parents[index], &cache.nodes) else {
            continue;
        };

        let node = &mut cache.nodes[index];
        node.world_pos = node.world_pos * (1.0 - alpha) + parent_mean * alpha;
    }
}

pub(super) fn apply_sibling_force(cache: &mut RenderGraph, alpha: f32) {
    for index in 0..cache.nodes.len() {
        let Some(sibling_mean) = mean_position(&cache.siblings[index], &cache.nodes) else {
            continue;
        };

        let node = &mut cache.nodes[index];
        node.world_pos = node.world_pos * (1.0 - alpha) + sibling_mean * alpha;
    }
}

pub(super) fn resolve_collisions(cache: &mut RenderGraph, padding: f32, iterations: usize) {
    let count = cache.nodes.len();

    for _ in 0..iterations {
        for i in 0..count {
            for j in (i + 1)..count {
                let predicted_i = cache.nodes[i].world_pos + cache.nodes[i].velocity;
                let predicted_j = cache.nodes[j].world_pos + cache.nodes[j].velocity;
                let delta = predicted_i - predicted_j;
                let min_distance = cache.nodes[i].radius + cache.nodes[j].radius + padding;

                let distance_sq = delta.length_sq();
                if distance_sq >= min_distance * min_distance {
                    continue;
                }

                let distance = distance_sq.sqrt();
                let direction = if distance > MIN_DISTANCE {
                    delta / distance
                } else {
                    let angle = ((i as f32) * 0.618_034 + (j as f32) * 0.414_214) * TAU;
                    vec2(angle.cos(), angle.sin())
                };

                let push = (min_distance - distance) * 0.5;
                cache.nodes[i].velocity += direction * push;
                cache.nodes[j].velocity -= direction * push;
            }
        }
    }
}

pub(super) fn pin_centroid(cache: &mut RenderGraph) {
    if cache.nodes.is_empty() {
        return;
    }

    let mut centroid = Vec2::ZERO;
    for node in &cache.nodes {
        centroid += node.world_pos;
    }
    centroid /= cache.nodes.len() as f32;

    if centroid.length_sq() > 0.000_001 {
        for node in &mut cache.nodes {
            node.world_pos -= centroid;
        }
    }
}
