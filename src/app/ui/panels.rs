use std::collections::VecDeque;
use std::time::Instant;

use eframe::egui::{self, Align, Context, Layout};
use log::info;

use crate::data::Dataset;
use crate::util::format_temp;

use super::super::physics::{PhysicsTuning, Simulation};
use super::super::scales::{BASE_RADIUS, NEUTRAL_FILL};
use super::super::story;
use super::super::timeline::{StoryStyle, Timeline};
use super::super::{ChartScratch, DisplayStyle, ViewModel};

impl ViewModel {
    pub(in crate::app) fn new(dataset: Dataset) -> Self {
        let simulation = Simulation::new(&dataset);
        let node_count = dataset.record_count();

        Self {
            simulation,
            tuning: PhysicsTuning::default(),
            timeline: Timeline::new(story::script()),
            story: StoryStyle::new(node_count),
            story_started: Instant::now(),
            search: String::new(),
            search_cache: None,
            hovered: None,
            last_caption: None,
            display: vec![
                DisplayStyle {
                    radius: BASE_RADIUS,
                    color: NEUTRAL_FILL.into(),
                    opacity: 1.0,
                };
                node_count
            ],
            chart_scratch: ChartScratch::default(),
            show_fps_bar: false,
            fps_current: 0.0,
            fps_samples: VecDeque::new(),
            dataset,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        data_path: &str,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        self.update_fps_counter(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("heat-bubbles");
                    ui.separator();
                    ui.label(format!("{} deaths", self.dataset.record_count()));
                    if let (Some(first), Some(last)) =
                        (self.dataset.years.first(), self.dataset.years.last())
                    {
                        ui.label(format!("{first}-{last}"));
                    }
                    ui.label(format!(
                        "indoor temps {} to {}",
                        format_temp(self.dataset.temp_extent.0),
                        format_temp(self.dataset.temp_extent.1)
                    ));
                    ui.label(format!("source: {data_path}"));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload data"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(fps_text) = self.fps_display_text() {
                            ui.label(fps_text);
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Reloading heat-death records...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_chart(ui);
            }
        });
    }

    pub(in crate::app) fn restart_story(&mut self) {
        info!("restarting the narrative from the top");
        self.timeline.restart();
        self.story = StoryStyle::new(self.dataset.record_count());
        self.last_caption = None;
        self.story_started = Instant::now();
    }
}
