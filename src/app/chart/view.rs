use std::time::Duration;

use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};

use crate::app::physics::LayoutMode;
use crate::app::scales::{
    CHART_HEIGHT, CHART_WIDTH, FOCUS_RADIUS, NEUTRAL_FILL, status_color, status_x, temp_x, year_x,
};
use crate::app::timeline::{Fill, NodeStyle};
use crate::data::Record;
use crate::util::format_temp;

use super::super::render_utils::{
    ChartTransform, blend_color, color_settled, draw_background, nice_step, with_opacity,
};
use super::super::{DisplayStyle, ViewModel};

/// Easing rate for recolor/resize transitions; settles in roughly the
/// 750 ms the published chart used.
const FADE_RATE: f32 = 5.5;

/// Caption fade duration, kept on the same transition window as the
/// bubble easing.
const CAPTION_FADE_SECS: f32 = 0.75;

const ANIMATION_EPSILON: f32 = 0.01;

/// Composed per-node target appearance: the narrated style plus the
/// hover enlargement. Pure so hover enter and exit compose the same
/// target from the same inputs.
fn target_style(style: NodeStyle, record: &Record, hovered: bool) -> DisplayStyle {
    let color = match style.fill {
        Fill::Neutral => NEUTRAL_FILL,
        Fill::ByStatus => status_color(record.air_conditioning),
    };
    DisplayStyle {
        radius: if hovered {
            style.radius.max(FOCUS_RADIUS)
        } else {
            style.radius
        },
        color: color.into(),
        opacity: style.opacity,
    }
}

impl ViewModel {
    pub(in crate::app) fn draw_chart(&mut self, ui: &mut Ui) {
        // timeline first: actions fire on absolute elapsed time no matter
        // what the simulation or the user is doing
        let elapsed = self.story_started.elapsed().as_secs_f32();
        let fired = self
            .timeline
            .poll(elapsed, &mut self.story, &self.dataset.records);
        if let Some(text) = self.story.caption {
            self.last_caption = Some(text);
        }
        if let Some(next_delay) = self.timeline.next_delay_secs() {
            let wait = (next_delay - elapsed).max(0.0) + 0.02;
            ui.ctx().request_repaint_after(Duration::from_secs_f32(wait));
        }

        let (rect, _response) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
        let painter = ui.painter_at(rect);
        let transform = ChartTransform::fit(rect);
        draw_background(&painter, rect, transform.frame_rect());

        let delta_seconds = ui
            .ctx()
            .input(|input| input.stable_dt)
            .clamp(1.0 / 240.0, 1.0 / 20.0);

        if self.simulation.is_awake() {
            self.simulation
                .step(&self.dataset, &self.tuning, delta_seconds);
            ui.ctx().request_repaint();
        }

        let scale = transform.scale();
        self.chart_scratch.screen_positions.clear();
        self.chart_scratch.screen_radii.clear();
        for (node, display) in self.simulation.nodes().iter().zip(&self.display) {
            self.chart_scratch
                .screen_positions
                .push(transform.to_screen(node.pos));
            self.chart_scratch.screen_radii.push(display.radius * scale);
        }

        let hovered = Self::hovered_index(
            ui,
            &self.chart_scratch.screen_positions,
            &self.chart_scratch.screen_radii,
        );
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }
        self.hovered = hovered;

        let search_mask = self.search_mask().map(<[bool]>::to_vec);

        // ease every bubble toward its composed timeline + hover target
        let ease = 1.0 - (-delta_seconds * FADE_RATE).exp();
        let mut animating = fired > 0;
        for (index, (display, record)) in self
            .display
            .iter_mut()
            .zip(&self.dataset.records)
            .enumerate()
        {
            let target = target_style(self.story.nodes[index], record, hovered == Some(index));

            display.radius += (target.radius - display.radius) * ease;
            display.opacity += (target.opacity - display.opacity) * ease;
            display.color = blend_color(display.color, target.color, ease);
            if color_settled(display.color, target.color) {
                display.color = target.color;
            }

            if (display.radius - target.radius).abs() > ANIMATION_EPSILON
                || (display.opacity - target.opacity).abs() > ANIMATION_EPSILON
                || display.color != target.color
            {
                animating = true;
            }
        }
        if animating {
            ui.ctx().request_repaint();
        }

        for (index, display) in self.display.iter().enumerate() {
            let position = self.chart_scratch.screen_positions[index];
            let radius = display.radius * scale;

            painter.circle_filled(
                position,
                radius,
                with_opacity(Color32::from(display.color), display.opacity),
            );

            if search_mask
                .as_ref()
                .is_some_and(|mask| mask.get(index).copied().unwrap_or(false))
            {
                painter.circle_stroke(
                    position,
                    radius + 2.5,
                    Stroke::new(1.5, Color32::from_rgb(103, 196, 255)),
                );
            }
        }

        match self.simulation.mode() {
            LayoutMode::Combined => {}
            LayoutMode::ByStatus => self.draw_status_labels(&painter, transform),
            LayoutMode::ByYear => self.draw_year_labels(&painter, transform),
            LayoutMode::ByTemperature => self.draw_temperature_axis(&painter, transform),
        }

        self.draw_caption(ui, &painter, transform);
    }

    fn draw_status_labels(&self, painter: &egui::Painter, transform: ChartTransform) {
        for status in crate::data::AcStatus::ALL {
            let count = self.dataset.count_by_status(status);
            if count == 0 {
                continue;
            }
            let position = transform.to_screen(vec2(status_x(status, CHART_WIDTH), 26.0));
            painter.text(
                position,
                Align2::CENTER_CENTER,
                format!("{} ({count})", status.label()),
                FontId::proportional(14.0),
                status_color(status),
            );
        }
    }

    fn draw_year_labels(&self, painter: &egui::Painter, transform: ChartTransform) {
        for &year in &self.dataset.years {
            let position = transform.to_screen(vec2(year_x(year, &self.dataset.years, CHART_WIDTH), 26.0));
            painter.text(
                position,
                Align2::CENTER_CENTER,
                year.to_string(),
                FontId::proportional(14.0),
                Color32::from_gray(220),
            );
        }
    }

    fn draw_temperature_axis(&self, painter: &egui::Painter, transform: ChartTransform) {
        let axis_color = Color32::from_gray(170);
        let baseline_start = transform.to_screen(vec2(0.0, CHART_HEIGHT));
        let baseline_end = transform.to_screen(vec2(CHART_WIDTH, CHART_HEIGHT));
        painter.line_segment([baseline_start, baseline_end], Stroke::new(1.0, axis_color));

        let (min, max) = self.dataset.temp_extent;
        let step = nice_step((max - min) / 6.0);
        let mut tick = (min / step).ceil() * step;
        while tick <= max + f32::EPSILON {
            let x = temp_x(tick, self.dataset.temp_extent, CHART_WIDTH);
            let top = transform.to_screen(vec2(x, CHART_HEIGHT));
            let bottom = transform.to_screen(vec2(x, CHART_HEIGHT + 6.0));
            painter.line_segment([top, bottom], Stroke::new(1.0, axis_color));
            painter.text(
                bottom + vec2(0.0, 4.0),
                Align2::CENTER_TOP,
                format_temp(tick),
                FontId::proportional(12.0),
                axis_color,
            );
            tick += step;
        }
    }

    fn draw_caption(&self, ui: &Ui, painter: &egui::Painter, transform: ChartTransform) {
        let visible = ui.ctx().animate_bool_with_time(
            egui::Id::new("story-caption"),
            self.story.caption.is_some(),
            CAPTION_FADE_SECS,
        );
        if visible <= 0.0 {
            return;
        }
        let Some(text) = self.story.caption.or(self.last_caption) else {
            return;
        };

        let frame = transform.frame_rect();
        let wrap_width = (frame.width() * 0.45).max(220.0);
        let galley = painter.layout(
            text.to_owned(),
            FontId::proportional(15.0),
            with_opacity(Color32::from_gray(235), visible),
            wrap_width,
        );

        let origin = frame.left_top() + vec2(14.0, 14.0);
        let backdrop = egui::Rect::from_min_size(origin, galley.size()).expand(10.0);
        painter.rect_filled(
            backdrop,
            6.0,
            with_opacity(Color32::from_rgba_unmultiplied(15, 17, 20, 215), visible),
        );
        painter.galley(origin, galley, Color32::from_gray(235));
    }
}
