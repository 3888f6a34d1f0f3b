use std::collections::HashMap;
use std::f32::consts::TAU;

use anyhow::{Result, anyhow};

use crate::util::stable_pair;

use super::parse::RawHierarchyFile;

const CIRCUMFERENCE_PER_NODE: f32 = 15.0;
const MIN_DISTANCE_BETWEEN_DEPTHS: f32 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    Direct,
    Indirect,
}

impl EdgeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Indirect => "indirect",
        }
    }
}

#[derive(Clone, Debug)]
pub struct TaxonomyNode {
    pub id: String,
    pub label: String,
    pub description: String,
    pub number_of_instances: u64,
    pub depth: u32,
    pub display_enabled: bool,
    pub seed: (f32, f32),
}

#[derive(Clone, Copy, Debug)]
pub struct TaxonomyEdge {
    pub parent: usize,
    pub child: usize,
    pub kind: EdgeKind,
}

#[derive(Clone, Debug)]
pub struct TaxonomyGraph {
    pub nodes: Vec<TaxonomyNode>,
    pub edges: Vec<TaxonomyEdge>,
    index_by_id: HashMap<String, usize>,
    children: Vec<Vec<usize>>,
    parents: Vec<Vec<usize>>,
    pub root: usize,
    pub radius_by_depth: Vec<f32>,
}

pub(super) fn build(raw: RawHierarchyFile) -> Result<TaxonomyGraph> {
    let mut nodes = Vec::with_capacity(raw.nodes.len());
    let mut index_by_id = HashMap::with_capacity(raw.nodes.len());

    for raw_node in raw.nodes {
        let index = nodes.len();
        if index_by_id.insert(raw_node.id.clone(), index).is_some() {
            return Err(anyhow!("duplicate node id {}", raw_node.id));
        }

        let seed = stable_pair(&raw_node.id);
        nodes.push(TaxonomyNode {
            display_enabled: raw_node.distance_to_root == 0,
            id: raw_node.id,
            label: raw_node.label,
            description: raw_node.description,
            number_of_instances: raw_node.number_of_instances,
            depth: raw_node.distance_to_root,
            seed,
        });
    }

    let mut roots = nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.depth == 0)
        .map(|(index, _)| index);
    let root = roots
        .next()
        .ok_or_else(|| anyhow!("taxonomy has no root node (distance_to_root == 0)"))?;
    if roots.next().is_some() {
        return Err(anyhow!("taxonomy has more than one root node"));
    }

    let mut edges = Vec::with_capacity(raw.links.len());
    let mut children = vec![Vec::new(); nodes.len()];
    let mut parents = vec![Vec::new(); nodes.len()];

    for link in raw.links {
        let parent = *index_by_id
            .get(&link.parent)
            .ok_or_else(|| anyhow!("link references unknown parent {}", link.parent))?;
        let child = *index_by_id
            .get(&link.child)
            .ok_or_else(|| anyhow!("link references unknown child {}", link.child))?;

        let kind = if nodes[child].depth == nodes[parent].depth + 1 {
            EdgeKind::Direct
        } else {
            EdgeKind::Indirect
        };

        children[parent].push(child);
        parents[child].push(parent);
        edges.push(TaxonomyEdge {
            parent,
            child,
            kind,
        });
    }

    let radius_by_depth = radius_by_depth(&nodes);

    Ok(TaxonomyGraph {
        nodes,
        edges,
        index_by_id,
        children,
        parents,
        root,
        radius_by_depth,
    })
}

fn radius_by_depth(nodes: &[TaxonomyNode]) -> Vec<f32> {
    let max_depth = nodes.iter().map(|node| node.depth).max().unwrap_or(0);
    let mut counts = vec![0usize; max_depth as usize + 1];
    for node in nodes {
        counts[node.depth as usize] += 1;
    }

    let mut radii = Vec::with_capacity(counts.len());
    let mut accumulated = 0.0f32;
    for count in counts {
        let expected_radius = (count as f32 * CIRCUMFERENCE_PER_NODE) / TAU;
        let ring = expected_radius.max(MIN_DISTANCE_BETWEEN_DEPTHS);
        accumulated += ring;
        radii.push(accumulated);
    }
    radii
}

impl TaxonomyGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn children_of(&self, index: usize) -> &[usize] {
        &self.children[index]
    }

    pub fn parents_of(&self, index: usize) -> &[usize] {
        &self.parents[index]
    }

    pub fn direct_parents_of(&self, index: usize) -> Vec<usize> {
        let depth = self.nodes[index].depth;
        self.parents[index]
            .iter()
            .copied()
            .filter(|&parent| self.nodes[parent].depth + 1 == depth)
            .collect()
    }

    pub fn siblings_of(&self, index: usize) -> Vec<usize> {
        let depth = self.nodes[index].depth;
        let mut siblings = Vec::new();
        for parent in self.direct_parents_of(index) {
            for &candidate in &self.children[parent] {
                if candidate != index && self.nodes[candidate].depth == depth {
                    siblings.push(candidate);
                }
            }
        }
        siblings.sort_unstable();
        siblings.dedup();
        siblings
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.nodes[index].display_enabled
    }

    pub fn visible_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.display_enabled)
            .count()
    }

    pub fn has_hidden_children(&self, index: usize) -> bool {
        let next_depth = self.nodes[index].depth + 1;
        self.children[index]
            .iter()
            .any(|&child| self.nodes[child].depth == next_depth && !self.nodes[child].display_enabled)
    }

    pub fn expand(&mut self, index: usize) -> bool {
        let next_depth = self.nodes[index].depth + 1;
        let mut changed = false;
        let child_indices = self.children[index].clone();
        for child in child_indices {
            if self.nodes[child].depth == next_depth && !self.nodes[child].display_enabled {
                self.nodes[child].display_enabled = true;
                changed = true;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse::{RawHierarchyFile, RawLink, RawNode};
    use super::*;

    fn raw(nodes: &[(&str, u32)], links: &[(&str, &str)]) -> RawHierarchyFile {
        RawHierarchyFile {
            nodes: nodes
                .iter()
                .map(|(id, depth)| RawNode {
                    id: (*id).to_owned(),
                    label: format!("label of {id}"),
                    description: String::new(),
                    number_of_instances: 1,
                    distance_to_root: *depth,
                })
                .collect(),
            links: links
                .iter()
                .map(|(parent, child)| RawLink {
                    parent: (*parent).to_owned(),
                    child: (*child).to_owned(),
                })
                .collect(),
        }
    }

    fn sample() -> TaxonomyGraph {
        // R -> {A, B}, A -> C, plus a skip-level edge R -> C.
        build(raw(
            &[("R", 0), ("A", 1), ("B", 1), ("C", 2)],
            &[("R", "A"), ("R", "B"), ("A", "C"), ("R", "C")],
        ))
        .unwrap()
    }

    fn visible_ids(graph: &TaxonomyGraph) -> Vec<&str> {
        graph
            .nodes
            .iter()
            .filter(|node| node.display_enabled)
            .map(|node| node.id.as_str())
            .collect()
    }

    #[test]
    fn only_root_visible_after_load() {
        let graph = sample();
        assert_eq!(visible_ids(&graph), vec!["R"]);
        assert_eq!(graph.visible_count(), 1);
        assert_eq!(graph.nodes[graph.root].id, "R");
    }

    #[test]
    fn expansion_reveals_exactly_direct_children() {
        let mut graph = sample();
        let root = graph.root;

        assert!(graph.expand(root));
        // C is linked from R too, but sits two levels down.
        assert_eq!(visible_ids(&graph), vec!["R", "A", "B"]);

        let a = graph.index_of("A").unwrap();
        assert!(graph.expand(a));
        assert_eq!(visible_ids(&graph), vec!["R", "A", "B", "C"]);

        // B is a leaf.
        let b = graph.index_of("B").unwrap();
        assert!(!graph.expand(b));
        assert_eq!(visible_ids(&graph), vec!["R", "A", "B", "C"]);
    }

    #[test]
    fn visibility_is_monotonic() {
        let mut graph = sample();
        let root = graph.root;
        graph.expand(root);
        let before = graph.visible_count();

        // Re-expanding changes nothing and hides nothing.
        assert!(!graph.expand(root));
        assert_eq!(graph.visible_count(), before);
    }

    #[test]
    fn edge_kind_follows_depth_difference() {
        let graph = sample();
        let kinds = graph
            .edges
            .iter()
            .map(|edge| {
                (
                    graph.nodes[edge.parent].id.as_str(),
                    graph.nodes[edge.child].id.as_str(),
                    edge.kind,
                )
            })
            .collect::<Vec<_>>();

        assert!(kinds.contains(&("R", "A", EdgeKind::Direct)));
        assert!(kinds.contains(&("A", "C", EdgeKind::Direct)));
        assert!(kinds.contains(&("R", "C", EdgeKind::Indirect)));
    }

    #[test]
    fn direct_parents_skip_indirect_ancestors() {
        let graph = sample();
        let c = graph.index_of("C").unwrap();
        let a = graph.index_of("A").unwrap();

        // C has parents {A, R}; only A is one level up.
        assert_eq!(graph.parents_of(c).len(), 2);
        assert_eq!(graph.direct_parents_of(c), vec![a]);
    }

    #[test]
    fn siblings_share_a_direct_parent_at_the_same_depth() {
        let graph = sample();
        let a = graph.index_of("A").unwrap();
        let b = graph.index_of("B").unwrap();

        assert_eq!(graph.siblings_of(a), vec![b]);
        assert_eq!(graph.siblings_of(b), vec![a]);
        // The root has no direct parents, so no siblings.
        assert!(graph.siblings_of(graph.root).is_empty());
        // C shares parent A with no one.
        let c = graph.index_of("C").unwrap();
        assert!(graph.siblings_of(c).is_empty());
    }

    #[test]
    fn hidden_children_probe_matches_expand() {
        let mut graph = sample();
        let root = graph.root;
        let b = graph.index_of("B").unwrap();

        assert!(graph.has_hidden_children(root));
        assert!(!graph.has_hidden_children(b));

        graph.expand(root);
        assert!(!graph.has_hidden_children(root));
    }

    #[test]
    fn radius_by_depth_is_accumulated_and_floored() {
        let graph = sample();
        // Depths 0..=2 all fall below the circumference threshold, so each
        // ring contributes the 100.0 floor.
        assert_eq!(graph.radius_by_depth, vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn radius_by_depth_is_non_decreasing_for_wide_layers() {
        let ids = (0..200).map(|i| format!("n{i}")).collect::<Vec<_>>();
        let mut nodes = vec![("R", 0)];
        for id in &ids {
            nodes.push((id.as_str(), 1));
        }
        let links = ids
            .iter()
            .map(|id| ("R", id.as_str()))
            .collect::<Vec<_>>();
        let graph = build(raw(&nodes, &links)).unwrap();

        // 200 nodes * 15 / tau > 100, so depth 1 outgrows the floor.
        assert!(graph.radius_by_depth[1] - graph.radius_by_depth[0] > 100.0);
        for window in graph.radius_by_depth.windows(2) {
            assert!(window[1] > window[0]);
        }
    }

    #[test]
    fn build_rejects_malformed_graphs() {
        assert!(build(raw(&[("A", 1)], &[])).is_err());
        assert!(build(raw(&[("R", 0), ("S", 0)], &[])).is_err());
        assert!(build(raw(&[("R", 0)], &[("R", "ghost")])).is_err());
        assert!(build(raw(&[("R", 0), ("R", 0)], &[])).is_err());
    }

    #[test]
    fn adjacency_preserves_link_order() {
        let graph = build(raw(
            &[("R", 0), ("A", 1), ("B", 1)],
            &[("R", "B"), ("R", "A")],
        ))
        .unwrap();

        let b = graph.index_of("B").unwrap();
        let a = graph.index_of("A").unwrap();
        assert_eq!(graph.children_of(graph.root), &[b, a]);
    }
}
