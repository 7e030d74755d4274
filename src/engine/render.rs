use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Align2, Color32, Pos2, Rect, Stroke, pos2, vec2};
use serde::Deserialize;

use crate::util::{stable_pair, truncate_label};

use super::camera::{Camera, Viewport, world_to_screen};
use super::hit_test::node_screen_radius;
use super::layout::PositionedNode;

const BACKGROUND: Color32 = Color32::from_rgb(11, 14, 26);
const HUB_COLOR: Color32 = Color32::from_rgb(255, 236, 179);
const HUB_RADIUS: f32 = 26.0;
const LABEL_FONT_SIZE: f32 = 12.0;
const LABEL_MAX_CHARS: usize = 24;
const STAR_PARALLAX: f32 = 0.15;

pub trait Canvas {
    fn fill_background(&mut self, color: Color32);
    fn circle_filled(&mut self, center: Pos2, radius: f32, color: Color32);
    fn circle_stroke(&mut self, center: Pos2, radius: f32, stroke: Stroke);
    fn radial_gradient(&mut self, center: Pos2, radius: f32, inner: Color32, outer: Color32);
    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke);
    // Clockwise on screen, starting at `start` radians.
    fn arc(&mut self, center: Pos2, radius: f32, start: f32, sweep: f32, stroke: Stroke);
    fn text(&mut self, position: Pos2, anchor: Align2, text: &str, size: f32, color: Color32);
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub label_zoom_threshold: f32,
    pub emphasis_scale: f32,
    pub starfield: bool,
    pub star_count: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            label_zoom_threshold: 0.5,
            emphasis_scale: 1.15,
            starfield: true,
            star_count: 140,
        }
    }
}

pub struct Scene<'a> {
    pub nodes: &'a [PositionedNode],
    pub camera: &'a Camera,
    pub viewport: Viewport,
    pub hovered: Option<&'a str>,
    pub selected: Option<&'a str>,
    pub settings: &'a RenderSettings,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub nodes_drawn: usize,
    pub labels_drawn: usize,
}

pub(crate) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

// A hub connector can cross the viewport while both of its ends are outside it.
pub(crate) fn edge_visible(rect: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let min_x = start.x.min(end.x) - padding;
    let max_x = start.x.max(end.x) + padding;
    let min_y = start.y.min(end.y) - padding;
    let max_y = start.y.max(end.y) + padding;
    if max_x < rect.left() || min_x > rect.right() || max_y < rect.top() || min_y > rect.bottom() {
        return false;
    }

    let rect = rect.expand(padding);
    if rect.contains(start) || rect.contains(end) {
        return true;
    }

    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
    ];
    (0..corners.len()).any(|index| {
        segments_intersect(start, end, corners[index], corners[(index + 1) % corners.len()])
    })
}

fn segments_intersect(a1: Pos2, a2: Pos2, b1: Pos2, b2: Pos2) -> bool {
    fn cross(origin: Pos2, a: Pos2, b: Pos2) -> f32 {
        let oa = a - origin;
        let ob = b - origin;
        oa.x * ob.y - oa.y * ob.x
    }
    fn straddles(first: f32, second: f32) -> bool {
        (first <= 0.0 && second >= 0.0) || (first >= 0.0 && second <= 0.0)
    }

    straddles(cross(a1, a2, b1), cross(a1, a2, b2))
        && straddles(cross(b1, b2, a1), cross(b1, b2, a2))
}

fn lighten(color: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let mix = |channel: u8| (channel as f32 + (255.0 - channel as f32) * amount) as u8;
    Color32::from_rgb(mix(color.r()), mix(color.g()), mix(color.b()))
}

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

pub fn render_scene(canvas: &mut impl Canvas, scene: &Scene<'_>) -> RenderStats {
    let mut stats = RenderStats::default();
    if scene.viewport.is_empty() {
        return stats;
    }

    canvas.fill_background(BACKGROUND);
    if scene.settings.starfield {
        draw_starfield(canvas, scene);
    }

    let hub = world_to_screen(scene.viewport.center(), scene.camera);
    draw_hub(canvas, hub, scene.camera.zoom);

    let bounds = Rect::from_min_size(Pos2::ZERO, scene.viewport.size());
    let emphasis = scene.settings.emphasis_scale.max(1.0);
    let projected = scene
        .nodes
        .iter()
        .map(|placed| {
            let emphasized =
                scene.hovered == Some(placed.id()) || scene.selected == Some(placed.id());
            let scale = if emphasized { emphasis } else { 1.0 };
            let center = world_to_screen(placed.position, scene.camera);
            let radius = node_screen_radius(&placed.node, scene.camera) * scale;
            (placed, center, radius, emphasized)
        })
        .collect::<Vec<_>>();

    let width = (1.2 * scene.camera.zoom.sqrt()).clamp(0.6, 2.4);
    for (placed, center, _, emphasized) in &projected {
        if !edge_visible(bounds, hub, *center, width) {
            continue;
        }
        let alpha = if *emphasized { 170 } else { 70 };
        canvas.line(
            hub,
            *center,
            Stroke::new(width, with_alpha(placed.node.category.color(), alpha)),
        );
    }

    let visible = projected
        .into_iter()
        .filter(|(_, center, radius, _)| circle_visible(bounds, *center, *radius * 1.6))
        .collect::<Vec<_>>();

    for (placed, center, radius, emphasized) in &visible {
        draw_node(canvas, placed, *center, *radius, *emphasized, scene.camera.zoom);
        stats.nodes_drawn += 1;
    }

    if scene.camera.zoom > scene.settings.label_zoom_threshold {
        let font_size = (LABEL_FONT_SIZE * scene.camera.zoom.sqrt()).clamp(9.0, 18.0);
        for (placed, center, radius, emphasized) in &visible {
            let color = if *emphasized {
                Color32::WHITE
            } else {
                Color32::from_gray(210)
            };
            canvas.text(
                *center + vec2(0.0, radius + 6.0),
                Align2::CENTER_TOP,
                &truncate_label(&placed.node.name, LABEL_MAX_CHARS),
                font_size,
                color,
            );
            stats.labels_drawn += 1;
        }
    }

    stats
}

fn draw_starfield(canvas: &mut impl Canvas, scene: &Scene<'_>) {
    let Viewport { width, height } = scene.viewport;
    let drift = scene.camera.pan * STAR_PARALLAX;

    for index in 0..scene.settings.star_count {
        let (u, v) = stable_pair(&format!("star-{index}"));
        let x = ((u + 1.0) * 0.5 * width + drift.x).rem_euclid(width);
        let y = ((v + 1.0) * 0.5 * height + drift.y).rem_euclid(height);
        let twinkle = ((u * v).abs() * 4.0).fract();
        let radius = 0.6 + twinkle * 1.1;
        let alpha = (60.0 + twinkle * 140.0) as u8;
        canvas.circle_filled(pos2(x, y), radius, Color32::from_white_alpha(alpha));
    }
}

fn draw_hub(canvas: &mut impl Canvas, hub: Pos2, zoom: f32) {
    let radius = HUB_RADIUS * zoom;
    canvas.radial_gradient(hub, radius * 3.0, with_alpha(HUB_COLOR, 120), Color32::TRANSPARENT);
    canvas.radial_gradient(hub, radius, Color32::WHITE, HUB_COLOR);
    canvas.circle_stroke(
        hub,
        radius,
        Stroke::new((2.0 * zoom).clamp(1.0, 3.0), with_alpha(HUB_COLOR, 220)),
    );
}

fn draw_node(
    canvas: &mut impl Canvas,
    placed: &PositionedNode,
    center: Pos2,
    radius: f32,
    emphasized: bool,
    zoom: f32,
) {
    let color = placed.node.category.color();

    if emphasized {
        canvas.radial_gradient(center, radius * 1.8, with_alpha(color, 150), Color32::TRANSPARENT);
    }

    canvas.radial_gradient(center, radius, lighten(color, 0.55), color);

    let border = if emphasized {
        Stroke::new((2.5 * zoom).clamp(1.5, 4.0), Color32::WHITE)
    } else {
        Stroke::new((1.5 * zoom).clamp(0.8, 3.0), lighten(color, 0.3))
    };
    canvas.circle_stroke(center, radius, border);

    let fraction = placed.node.score_fraction();
    if fraction > 0.0 {
        let ring_gap = (4.0 * zoom).max(2.0);
        canvas.arc(
            center,
            radius + ring_gap,
            -FRAC_PI_2,
            TAU * fraction,
            Stroke::new((3.0 * zoom).clamp(1.5, 5.0), lighten(color, 0.2)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::{Category, SkillNode};

    #[derive(Clone, Debug, PartialEq)]
    enum Op {
        Background,
        Circle(Pos2, f32),
        Stroke(Pos2, f32),
        Gradient(Pos2, f32),
        Line(Pos2, Pos2),
        Arc(Pos2, f32),
        Text(String),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Canvas for Recorder {
        fn fill_background(&mut self, _color: Color32) {
            self.ops.push(Op::Background);
        }

        fn circle_filled(&mut self, center: Pos2, radius: f32, _color: Color32) {
            self.ops.push(Op::Circle(center, radius));
        }

        fn circle_stroke(&mut self, center: Pos2, radius: f32, _stroke: Stroke) {
            self.ops.push(Op::Stroke(center, radius));
        }

        fn radial_gradient(&mut self, center: Pos2, radius: f32, _inner: Color32, _outer: Color32) {
            self.ops.push(Op::Gradient(center, radius));
        }

        fn line(&mut self, from: Pos2, to: Pos2, _stroke: Stroke) {
            self.ops.push(Op::Line(from, to));
        }

        fn arc(&mut self, _center: Pos2, _radius: f32, _start: f32, sweep: f32, _stroke: Stroke) {
            self.ops.push(Op::Arc(Pos2::ZERO, sweep));
        }

        fn text(&mut self, _position: Pos2, _anchor: Align2, text: &str, _size: f32, _color: Color32) {
            self.ops.push(Op::Text(text.to_owned()));
        }
    }

    fn placed(id: &str, x: f32, y: f32, score: f32) -> PositionedNode {
        PositionedNode {
            node: SkillNode::new(id, format!("Skill {id}"), Category::Technical, score, 0.0),
            position: pos2(x, y),
        }
    }

    fn quiet_settings() -> RenderSettings {
        RenderSettings {
            starfield: false,
            ..RenderSettings::default()
        }
    }

    fn render(
        nodes: &[PositionedNode],
        camera: &Camera,
        hovered: Option<&str>,
    ) -> (Vec<Op>, RenderStats) {
        let settings = quiet_settings();
        let scene = Scene {
            nodes,
            camera,
            viewport: Viewport::new(800.0, 600.0),
            hovered,
            selected: None,
            settings: &settings,
        };
        let mut recorder = Recorder::default();
        let stats = render_scene(&mut recorder, &scene);
        (recorder.ops, stats)
    }

    #[test]
    fn draws_in_fixed_order() {
        let nodes = vec![placed("a", 200.0, 300.0, 50.0), placed("b", 600.0, 300.0, 0.0)];
        let (ops, stats) = render(&nodes, &Camera::default(), None);

        assert_eq!(ops[0], Op::Background);
        // Hub glow, hub body, hub border.
        assert_eq!(ops[1], Op::Gradient(pos2(400.0, 300.0), HUB_RADIUS * 3.0));
        assert!(matches!(ops[3], Op::Stroke(..)));

        let first_line = ops.iter().position(|op| matches!(op, Op::Line(..))).expect("connectors");
        let first_node = ops
            .iter()
            .position(|op| matches!(op, Op::Gradient(center, _) if *center == pos2(200.0, 300.0)))
            .expect("node body");
        let first_label = ops.iter().position(|op| matches!(op, Op::Text(_))).expect("labels");
        assert!(first_line < first_node && first_node < first_label);

        assert_eq!(
            ops[first_line],
            Op::Line(pos2(400.0, 300.0), pos2(200.0, 300.0))
        );
        assert_eq!(stats, RenderStats { nodes_drawn: 2, labels_drawn: 2 });
    }

    #[test]
    fn score_ring_encodes_score() {
        let nodes = vec![placed("a", 200.0, 300.0, 25.0), placed("b", 600.0, 300.0, 0.0)];
        let (ops, _) = render(&nodes, &Camera::default(), None);

        let arcs = ops
            .iter()
            .filter_map(|op| match op {
                Op::Arc(_, sweep) => Some(*sweep),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(arcs.len(), 1);
        assert!((arcs[0] - TAU * 0.25).abs() < 1e-5);
    }

    #[test]
    fn labels_hidden_when_zoomed_out() {
        let nodes = vec![placed("a", 400.0, 300.0, 50.0)];
        let camera = Camera {
            pan: vec2(200.0, 150.0),
            zoom: 0.5,
        };
        let (ops, stats) = render(&nodes, &camera, None);

        assert!(!ops.iter().any(|op| matches!(op, Op::Text(_))));
        assert_eq!(stats.labels_drawn, 0);
        assert_eq!(stats.nodes_drawn, 1);
    }

    #[test]
    fn hovered_node_is_enlarged_with_glow() {
        let nodes = vec![placed("a", 200.0, 300.0, 50.0)];
        let (plain, _) = render(&nodes, &Camera::default(), None);
        let (hovered, _) = render(&nodes, &Camera::default(), Some("a"));

        let body_radius = |ops: &[Op]| {
            ops.iter()
                .filter_map(|op| match op {
                    Op::Stroke(center, radius) if *center == pos2(200.0, 300.0) => Some(*radius),
                    _ => None,
                })
                .next()
                .expect("node border")
        };
        assert_eq!(body_radius(&plain), 20.0);
        assert!((body_radius(&hovered) - 23.0).abs() < 1e-4);

        let gradients = |ops: &[Op]| ops.iter().filter(|op| matches!(op, Op::Gradient(..))).count();
        assert_eq!(gradients(&hovered), gradients(&plain) + 1);
    }

    #[test]
    fn offscreen_nodes_are_culled() {
        let nodes = vec![placed("a", 200.0, 300.0, 50.0), placed("far", 5_000.0, 300.0, 50.0)];
        let (_, stats) = render(&nodes, &Camera::default(), None);
        assert_eq!(stats.nodes_drawn, 1);
    }

    #[test]
    fn connector_kept_for_node_beyond_the_edge() {
        let nodes = vec![placed("far", 1200.0, 300.0, 50.0)];
        let (ops, stats) = render(&nodes, &Camera::default(), None);

        let lines = ops
            .iter()
            .filter(|op| matches!(op, Op::Line(..)))
            .collect::<Vec<_>>();
        assert_eq!(lines, [&Op::Line(pos2(400.0, 300.0), pos2(1200.0, 300.0))]);
        assert_eq!(stats.nodes_drawn, 0);
        assert_eq!(stats.labels_drawn, 0);
    }

    #[test]
    fn connector_crossing_the_viewport_from_outside() {
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0));
        assert!(edge_visible(rect, pos2(-100.0, 300.0), pos2(900.0, 300.0), 1.0));
        assert!(!edge_visible(rect, pos2(-100.0, -50.0), pos2(-10.0, 700.0), 1.0));
        assert!(!edge_visible(rect, pos2(900.0, -200.0), pos2(1200.0, 100.0), 1.0));
    }

    #[test]
    fn empty_scene_draws_hub_only() {
        let (ops, stats) = render(&[], &Camera::default(), None);
        assert_eq!(ops.len(), 4);
        assert_eq!(stats, RenderStats::default());
    }

    #[test]
    fn unmeasured_viewport_draws_nothing() {
        let settings = RenderSettings::default();
        let nodes = vec![placed("a", 0.0, 0.0, 50.0)];
        let scene = Scene {
            nodes: &nodes,
            camera: &Camera::default(),
            viewport: Viewport::default(),
            hovered: None,
            selected: None,
            settings: &settings,
        };
        let mut recorder = Recorder::default();

        assert_eq!(render_scene(&mut recorder, &scene), RenderStats::default());
        assert!(recorder.ops.is_empty());
    }

    #[test]
    fn starfield_is_stable_between_frames() {
        let settings = RenderSettings::default();
        let camera = Camera::default();
        let scene = Scene {
            nodes: &[],
            camera: &camera,
            viewport: Viewport::new(640.0, 480.0),
            hovered: None,
            selected: None,
            settings: &settings,
        };
        let mut first = Recorder::default();
        let mut second = Recorder::default();
        render_scene(&mut first, &scene);
        render_scene(&mut second, &scene);

        assert_eq!(first.ops, second.ops);
        let stars = first.ops.iter().filter(|op| matches!(op, Op::Circle(..))).count();
        assert_eq!(stars, settings.star_count);
    }
}
