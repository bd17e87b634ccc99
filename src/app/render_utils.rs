use eframe::egui::{Color32, Painter, Pos2, Rect, Rgba, Stroke, Vec2, vec2};

use super::scales::{CHART_HEIGHT, CHART_WIDTH};

/// Uniform fit of the fixed chart frame into the available panel rect,
/// preserving aspect ratio and centering the frame.
#[derive(Clone, Copy)]
pub(super) struct ChartTransform {
    scale: f32,
    origin: Pos2,
}

impl ChartTransform {
    pub(super) fn fit(rect: Rect) -> Self {
        let scale = (rect.width() / CHART_WIDTH)
            .min(rect.height() / CHART_HEIGHT)
            .max(0.05);
        let origin = rect.center() - vec2(CHART_WIDTH, CHART_HEIGHT) * (scale * 0.5);
        Self { scale, origin }
    }

    pub(super) fn scale(&self) -> f32 {
        self.scale
    }

    pub(super) fn to_screen(&self, chart: Vec2) -> Pos2 {
        self.origin + chart * self.scale
    }

    pub(super) fn frame_rect(&self) -> Rect {
        Rect::from_min_max(
            self.to_screen(Vec2::ZERO),
            self.to_screen(vec2(CHART_WIDTH, CHART_HEIGHT)),
        )
    }
}

/// Linear mix of two colors, kept in f32 space. Blending through u8
/// would quantize every step and an incremental ease could reach a
/// fixed point several levels short of its target.
pub(super) fn blend_color(base: Rgba, target: Rgba, amount: f32) -> Rgba {
    let amount = amount.clamp(0.0, 1.0);
    let mix = |from: f32, to: f32| from + (to - from) * amount;

    Rgba::from_rgba_premultiplied(
        mix(base.r(), target.r()),
        mix(base.g(), target.g()),
        mix(base.b(), target.b()),
        mix(base.a(), target.a()),
    )
}

/// True once every channel is within half a u8 quantization level of
/// the target, at which point the caller should snap to it exactly.
pub(super) fn color_settled(current: Rgba, target: Rgba) -> bool {
    const CHANNEL_EPSILON: f32 = 0.5 / 255.0;
    (0..4).all(|channel| (current[channel] - target[channel]).abs() <= CHANNEL_EPSILON)
}

pub(super) fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    let alpha = (color.a() as f32 * opacity.clamp(0.0, 1.0)) as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, frame: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(24, 26, 30));
    painter.rect_filled(frame.expand(8.0), 6.0, Color32::from_rgb(32, 35, 41));
    painter.rect_stroke(
        frame.expand(8.0),
        6.0,
        Stroke::new(1.0, Color32::from_rgba_unmultiplied(80, 88, 98, 120)),
        eframe::egui::StrokeKind::Outside,
    );
}

/// Round a tick step up to a 1/2/5 multiple so axis labels land on
/// friendly values.
pub(super) fn nice_step(raw_step: f32) -> f32 {
    if raw_step <= 0.0 {
        return 1.0;
    }
    let magnitude = 10.0_f32.powf(raw_step.log10().floor());
    let residual = raw_step / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_preserves_aspect_and_centers() {
        let rect = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1720.0, 2000.0));
        let transform = ChartTransform::fit(rect);
        assert!((transform.scale() - 2.0).abs() < 0.001);

        let center = transform.to_screen(vec2(CHART_WIDTH * 0.5, CHART_HEIGHT * 0.5));
        assert!((center.x - 860.0).abs() < 0.5);
        assert!((center.y - 1000.0).abs() < 0.5);
    }

    #[test]
    fn with_opacity_scales_alpha_only() {
        let color = Color32::from_rgb(10, 20, 30);
        let faded = with_opacity(color, 0.5);
        assert_eq!((faded.r(), faded.g(), faded.b()), (10, 20, 30));
        assert_eq!(faded.a(), 127);
    }

    #[test]
    fn nice_step_rounds_to_125_multiples() {
        assert_eq!(nice_step(3.2), 5.0);
        assert_eq!(nice_step(0.13), 0.2);
        assert_eq!(nice_step(12.0), 20.0);
        assert_eq!(nice_step(1.0), 1.0);
    }

    #[test]
    fn blend_at_extremes_returns_endpoints() {
        let a = Rgba::from(Color32::from_rgb(0, 0, 0));
        let b = Rgba::from(Color32::from_rgb(200, 100, 50));
        assert_eq!(blend_color(a, b, 0.0), a);
        assert_eq!(blend_color(a, b, 1.0), b);
    }

    #[test]
    fn eased_color_reaches_its_target_exactly() {
        // one 60 fps step of the chart easing
        let ease = 0.088;
        let mut color = Rgba::from(Color32::from_rgb(0x00, 0x7D, 0x8A));
        let target = Rgba::from(Color32::from_rgb(211, 211, 211));

        let mut steps = 0;
        while color != target {
            color = blend_color(color, target, ease);
            if color_settled(color, target) {
                color = target;
            }
            steps += 1;
            assert!(
                steps < 600,
                "color stalled at {:?}",
                Color32::from(color)
            );
        }
        assert_eq!(Color32::from(color), Color32::from_rgb(211, 211, 211));
    }
}
