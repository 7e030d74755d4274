use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Shape, Stroke, Vec2, pos2};

use skill_constellation::engine::Canvas;

const GRADIENT_STEPS: usize = 10;

fn lerp_color(from: Color32, to: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * amount).round() as u8;

    Color32::from_rgba_premultiplied(
        mix(from.r(), to.r()),
        mix(from.g(), to.g()),
        mix(from.b(), to.b()),
        mix(from.a(), to.a()),
    )
}

pub(super) struct EguiCanvas<'a> {
    painter: &'a Painter,
    origin: Vec2,
}

impl<'a> EguiCanvas<'a> {
    pub(super) fn new(painter: &'a Painter, origin: Pos2) -> Self {
        Self {
            painter,
            origin: origin.to_vec2(),
        }
    }

    fn at(&self, local: Pos2) -> Pos2 {
        local + self.origin
    }
}

impl Canvas for EguiCanvas<'_> {
    fn fill_background(&mut self, color: Color32) {
        self.painter.rect_filled(self.painter.clip_rect(), 0.0, color);
    }

    fn circle_filled(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.painter.circle_filled(self.at(center), radius, color);
    }

    fn circle_stroke(&mut self, center: Pos2, radius: f32, stroke: Stroke) {
        self.painter.circle_stroke(self.at(center), radius, stroke);
    }

    fn radial_gradient(&mut self, center: Pos2, radius: f32, inner: Color32, outer: Color32) {
        if radius <= 0.0 {
            return;
        }

        let center = self.at(center);
        for step in 0..GRADIENT_STEPS {
            let t = step as f32 / GRADIENT_STEPS as f32;
            let color = lerp_color(outer, inner, t);
            self.painter.circle_filled(center, radius * (1.0 - t), color);
        }
    }

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.painter.line_segment([self.at(from), self.at(to)], stroke);
    }

    fn arc(&mut self, center: Pos2, radius: f32, start: f32, sweep: f32, stroke: Stroke) {
        if radius <= 0.0 || sweep == 0.0 {
            return;
        }

        let center = self.at(center);
        let segments = ((sweep.abs() * radius / 4.0).ceil() as usize).clamp(8, 128);
        let points = (0..=segments)
            .map(|index| {
                let angle = start + sweep * index as f32 / segments as f32;
                pos2(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                )
            })
            .collect::<Vec<_>>();
        self.painter.add(Shape::line(points, stroke));
    }

    fn text(&mut self, position: Pos2, anchor: Align2, text: &str, size: f32, color: Color32) {
        self.painter.text(
            self.at(position),
            anchor,
            text,
            FontId::proportional(size),
            color,
        );
    }
}
