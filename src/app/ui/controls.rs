use eframe::egui::{self, Ui};

use super::super::ViewModel;
use super::super::physics::LayoutMode;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Layout");
        ui.separator();
        ui.add_space(4.0);

        for mode in LayoutMode::ALL {
            let active = self.simulation.mode() == mode;
            let hint = match mode {
                LayoutMode::Combined => "Pull every bubble into one cluster.",
                LayoutMode::ByStatus => "Group bubbles by air conditioning status.",
                LayoutMode::ByYear => "Group bubbles by year of death.",
                LayoutMode::ByTemperature => "Sort bubbles by recorded indoor temperature.",
            };
            if ui.selectable_label(active, mode.label()).on_hover_text(hint).clicked() {
                // clicking the active mode again still shakes the layout
                self.simulation.switch_layout(mode);
            }
        }

        ui.separator();

        ui.label("Search by name")
            .on_hover_text("Fuzzy-highlight matching bubbles without moving anything.");
        ui.text_edit_singleline(&mut self.search);

        ui.separator();

        ui.label("Story");
        let elapsed = self.story_started.elapsed().as_secs_f32();
        if self.timeline.is_finished() {
            ui.small("finished");
        } else {
            ui.small(format!("{elapsed:.0}s elapsed"));
        }
        if ui
            .button("Restart story")
            .on_hover_text("Replay the narrative sequence from the beginning.")
            .clicked()
        {
            self.restart_story();
        }

        ui.separator();

        ui.collapsing("Physics tuning", |ui| {
            ui.add(
                egui::Slider::new(&mut self.tuning.strength_scale, 0.25..=3.0)
                    .text("Force strength"),
            )
            .on_hover_text("Multiplier on the active positional force.");
            ui.add(
                egui::Slider::new(&mut self.tuning.velocity_decay, 0.0..=0.9)
                    .text("Velocity decay"),
            )
            .on_hover_text("How quickly bubble movement slows each tick.");
            ui.add(
                egui::Slider::new(&mut self.tuning.collide_padding, 0.0..=12.0)
                    .text("Collision padding"),
            )
            .on_hover_text("Extra spacing kept between neighboring bubbles.");

            if ui
                .button("Shake")
                .on_hover_text("Inject energy so tuning changes become visible.")
                .clicked()
            {
                self.simulation.inject(0.5);
            }
        });

        ui.separator();
        ui.checkbox(&mut self.show_fps_bar, "FPS readout");
    }
}
