use std::f32::consts::TAU;

use eframe::egui::{Pos2, Vec2, vec2};
use serde::Deserialize;

use crate::skill::{Category, SkillNode};

use super::camera::Viewport;

pub const RADIAL_BASE_RADIUS: f32 = 150.0;
pub const CLUSTER_RING_RADIUS: f32 = 200.0;
pub const CLUSTER_BASE_RADIUS: f32 = 50.0;
pub const TIER_BAND_OFFSET: f32 = 150.0;
pub const TIER_MAX_SPACING: f32 = 100.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    #[default]
    Radial,
    Clustered,
    Tiered,
}

impl LayoutKind {
    pub const ALL: [Self; 3] = [Self::Radial, Self::Clustered, Self::Tiered];

    pub fn label(self) -> &'static str {
        match self {
            Self::Radial => "Radial",
            Self::Clustered => "Clustered",
            Self::Tiered => "Tiered",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PositionedNode {
    pub node: SkillNode,
    pub position: Pos2,
}

impl PositionedNode {
    pub fn id(&self) -> &str {
        &self.node.id
    }
}

// Input order is kept and is also paint order.
pub fn layout_nodes(
    nodes: &[SkillNode],
    kind: LayoutKind,
    viewport: Viewport,
) -> Vec<PositionedNode> {
    if nodes.is_empty() {
        return Vec::new();
    }

    let center = viewport.center();
    let offsets = match kind {
        LayoutKind::Radial => radial_offsets(nodes),
        LayoutKind::Clustered => clustered_offsets(nodes),
        LayoutKind::Tiered => tiered_offsets(nodes, viewport.width),
    };

    nodes
        .iter()
        .zip(offsets)
        .map(|(node, offset)| PositionedNode {
            node: node.clone(),
            position: center + offset,
        })
        .collect()
}

fn unit(angle: f32) -> Vec2 {
    vec2(angle.cos(), angle.sin())
}

fn radial_offsets(nodes: &[SkillNode]) -> Vec<Vec2> {
    let count = nodes.len().max(1) as f32;
    nodes
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let angle = TAU * index as f32 / count;
            unit(angle) * (RADIAL_BASE_RADIUS + node.xp / 10.0)
        })
        .collect()
}

fn clustered_offsets(nodes: &[SkillNode]) -> Vec<Vec2> {
    let slot_count = Category::ALL.len() as f32;
    let mut members = [0usize; Category::ALL.len()];
    for node in nodes {
        members[node.category.slot()] += 1;
    }

    let mut placed = [0usize; Category::ALL.len()];
    nodes
        .iter()
        .map(|node| {
            let slot = node.category.slot();
            let sub_center = unit(TAU * slot as f32 / slot_count) * CLUSTER_RING_RADIUS;

            let siblings = members[slot].max(1) as f32;
            let angle = TAU * placed[slot] as f32 / siblings;
            placed[slot] += 1;

            sub_center + unit(angle) * (CLUSTER_BASE_RADIUS + node.score / 5.0)
        })
        .collect()
}

pub fn score_tier(score: f32) -> usize {
    if score < 40.0 {
        0
    } else if score < 70.0 {
        1
    } else {
        2
    }
}

fn tiered_offsets(nodes: &[SkillNode], width: f32) -> Vec<Vec2> {
    let mut members = [0usize; 3];
    for node in nodes {
        members[score_tier(node.score)] += 1;
    }

    let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
    let mut placed = [0usize; 3];
    nodes
        .iter()
        .map(|node| {
            let tier = score_tier(node.score);
            let count = members[tier].max(1);
            let spacing = (width / (count + 1) as f32).min(TIER_MAX_SPACING);
            let column = placed[tier] as f32 - (count - 1) as f32 * 0.5;
            placed[tier] += 1;

            vec2(column * spacing, (tier as f32 - 1.0) * TIER_BAND_OFFSET)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    fn node(index: usize, category: Category, score: f32, xp: f32) -> SkillNode {
        SkillNode::new(format!("n{index}"), format!("Node {index}"), category, score, xp)
    }

    fn mixed_nodes(count: usize) -> Vec<SkillNode> {
        (0..count)
            .map(|index| {
                node(
                    index,
                    Category::ALL[index % Category::ALL.len()],
                    (index * 37 % 101) as f32,
                    (index * 53 % 700) as f32,
                )
            })
            .collect()
    }

    #[test]
    fn radial_distance_follows_xp() {
        let viewport = Viewport::new(800.0, 600.0);
        let nodes = mixed_nodes(14);
        let positioned = layout_nodes(&nodes, LayoutKind::Radial, viewport);

        assert_eq!(positioned.len(), 14);
        for placed in &positioned {
            let distance = (placed.position - viewport.center()).length();
            let expected = 150.0 + placed.node.xp / 10.0;
            assert!((distance - expected).abs() < 1e-3, "{distance} vs {expected}");
        }
    }

    #[test]
    fn radial_spreads_nodes_evenly() {
        let viewport = Viewport::new(400.0, 400.0);
        let nodes = (0..4)
            .map(|index| node(index, Category::Technical, 50.0, 0.0))
            .collect::<Vec<_>>();
        let positioned = layout_nodes(&nodes, LayoutKind::Radial, viewport);

        let expected = [vec2(150.0, 0.0), vec2(0.0, 150.0), vec2(-150.0, 0.0), vec2(0.0, -150.0)];
        for (placed, offset) in positioned.iter().zip(expected) {
            assert!((placed.position - (viewport.center() + offset)).length() < 1e-3);
        }
    }

    #[test]
    fn clustered_groups_by_category() {
        let viewport = Viewport::new(800.0, 600.0);
        let nodes = vec![
            node(0, Category::Technical, 50.0, 0.0),
            node(1, Category::Technical, 50.0, 0.0),
            node(2, Category::Learning, 0.0, 0.0),
        ];
        let positioned = layout_nodes(&nodes, LayoutKind::Clustered, viewport);

        let technical_center = viewport.center() + vec2(CLUSTER_RING_RADIUS, 0.0);
        for placed in &positioned[..2] {
            let distance = (placed.position - technical_center).length();
            assert!((distance - 60.0).abs() < 1e-3, "{distance}");
        }
        // Two siblings sit opposite each other.
        let midpoint =
            positioned[0].position + (positioned[1].position - positioned[0].position) * 0.5;
        assert!((midpoint - technical_center).length() < 1e-3);

        let learning_center = viewport.center() + unit(TAU * 4.0 / 5.0) * CLUSTER_RING_RADIUS;
        let distance = (positioned[2].position - learning_center).length();
        assert!((distance - CLUSTER_BASE_RADIUS).abs() < 1e-3);
    }

    #[test]
    fn tiered_bands_and_spacing() {
        let viewport = Viewport::new(300.0, 600.0);
        let nodes = vec![
            node(0, Category::Technical, 10.0, 0.0),
            node(1, Category::Technical, 40.0, 0.0),
            node(2, Category::Technical, 69.9, 0.0),
            node(3, Category::Technical, 70.0, 0.0),
            node(4, Category::Technical, 95.0, 0.0),
            node(5, Category::Technical, 99.0, 0.0),
        ];
        let positioned = layout_nodes(&nodes, LayoutKind::Tiered, viewport);
        let center = viewport.center();

        assert_eq!(positioned[0].position, center + vec2(0.0, -150.0));
        assert_eq!(positioned[1].position.y, center.y);
        assert_eq!(positioned[2].position.y, center.y);
        for placed in &positioned[3..] {
            assert_eq!(placed.position.y, center.y + 150.0);
        }

        // Three top-tier nodes: spacing min(300 / 4, 100) = 75, centred.
        let xs = positioned[3..]
            .iter()
            .map(|placed| placed.position.x - center.x)
            .collect::<Vec<_>>();
        assert_eq!(xs, vec![-75.0, 0.0, 75.0]);

        // Two mid-tier nodes: spacing min(300 / 3, 100) = 100.
        assert_eq!(positioned[1].position.x - center.x, -50.0);
        assert_eq!(positioned[2].position.x - center.x, 50.0);
    }

    #[test]
    fn tiered_caps_spacing_on_wide_viewports() {
        let viewport = Viewport::new(4_000.0, 600.0);
        let nodes = vec![
            node(0, Category::Technical, 80.0, 0.0),
            node(1, Category::Technical, 80.0, 0.0),
        ];
        let positioned = layout_nodes(&nodes, LayoutKind::Tiered, viewport);
        assert_eq!(positioned[1].position.x - positioned[0].position.x, 100.0);
    }

    #[test]
    fn zero_viewport_still_places_everything_finitely() {
        let nodes = mixed_nodes(5);
        for kind in LayoutKind::ALL {
            let positioned = layout_nodes(&nodes, kind, Viewport::default());
            assert_eq!(positioned.len(), 5);
            assert!(positioned.iter().all(|placed| placed.position.is_finite()));
        }
    }

    #[test]
    fn coverage_for_all_kinds_and_sizes() {
        let viewport = Viewport::new(1024.0, 768.0);
        for count in [0, 1, 5, 200] {
            let nodes = mixed_nodes(count);
            let input_ids = nodes.iter().map(|node| node.id.as_str()).collect::<HashSet<_>>();
            for kind in LayoutKind::ALL {
                let positioned = layout_nodes(&nodes, kind, viewport);
                assert_eq!(positioned.len(), count, "{kind:?}");
                let output_ids = positioned.iter().map(PositionedNode::id).collect::<HashSet<_>>();
                assert_eq!(output_ids, input_ids, "{kind:?}");
            }
        }
    }

    proptest! {
        #[test]
        fn layout_is_deterministic(
            count in 0usize..60,
            width in 1.0f32..2_000.0,
            height in 1.0f32..2_000.0,
            kind_index in 0usize..3,
        ) {
            let nodes = mixed_nodes(count);
            let kind = LayoutKind::ALL[kind_index];
            let viewport = Viewport::new(width, height);
            let first = layout_nodes(&nodes, kind, viewport);
            let second = layout_nodes(&nodes, kind, viewport);
            prop_assert_eq!(first, second);
        }
    }
}
