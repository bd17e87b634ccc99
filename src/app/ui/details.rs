use eframe::egui::{RichText, Ui};

use crate::util::format_temp;

use super::super::ViewModel;
use super::super::scales::status_color;
use super::super::story::END_QUOTE;
use crate::data::AcStatus;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Details");
        ui.add_space(6.0);

        if let Some(record) = self.hovered.and_then(|index| self.dataset.records.get(index)) {
            ui.label(RichText::new(record.name.as_str()).strong());
            ui.add_space(4.0);

            match record.age {
                Some(age) => ui.label(format!("Age: {age}")),
                None => ui.label("Age: not recorded"),
            };
            ui.label(format!("Indoor temperature: {}", format_temp(record.temp)));
            ui.label(format!("Year: {}", record.year));
            if !record.gender.is_empty() {
                ui.label(format!("Gender: {}", record.gender));
            }
            ui.horizontal(|ui| {
                ui.label("Air conditioning:");
                ui.colored_label(
                    status_color(record.air_conditioning),
                    record.air_conditioning.label(),
                );
            });
        } else if self.timeline.is_finished() {
            ui.label(RichText::new(END_QUOTE).italics());
        } else {
            ui.label("Hover a bubble to see who it stands for.");
        }

        ui.add_space(10.0);
        ui.separator();
        ui.label(RichText::new("Air conditioning status").strong());
        for status in AcStatus::ALL {
            let count = self.dataset.count_by_status(status);
            ui.horizontal(|ui| {
                ui.colored_label(status_color(status), "●");
                ui.label(format!("{}: {count}", status.label()));
            });
        }

        ui.add_space(10.0);
        ui.separator();
        ui.small(format!(
            "{} records, {} years",
            self.dataset.record_count(),
            self.dataset.years.len()
        ));
    }
}
