use eframe::egui::Vec2;

use crate::app::scales::{status_x, temp_x, year_x};
use crate::data::{Dataset, Record};

/// Which positional x-force is currently driving the layout. Exactly one
/// is active at a time; the y-centering and collision forces never change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutMode {
    Combined,
    ByStatus,
    ByYear,
    ByTemperature,
}

impl LayoutMode {
    pub const ALL: [LayoutMode; 4] = [
        Self::Combined,
        Self::ByStatus,
        Self::ByYear,
        Self::ByTemperature,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Combined => "Combined",
            Self::ByStatus => "By A/C status",
            Self::ByYear => "By year",
            Self::ByTemperature => "By indoor temperature",
        }
    }

    /// Convergence speed of the active x-force.
    pub fn strength(self) -> f32 {
        match self {
            Self::Combined => 0.04,
            Self::ByStatus | Self::ByYear => 0.05,
            Self::ByTemperature => 0.12,
        }
    }

    /// Energy injected when this mode is activated. More disruptive
    /// re-layouts get a larger boost so the re-settling reads clearly.
    pub fn injection(self) -> f32 {
        match self {
            Self::Combined => 0.4,
            Self::ByStatus | Self::ByYear => 0.5,
            Self::ByTemperature => 0.6,
        }
    }
}

pub const Y_CENTER_STRENGTH: f32 = 0.045;

pub fn x_target(mode: LayoutMode, record: &Record, dataset: &Dataset, width: f32) -> f32 {
    match mode {
        LayoutMode::Combined => width * 0.5,
        LayoutMode::ByStatus => status_x(record.air_conditioning, width),
        LayoutMode::ByYear => year_x(record.year, &dataset.years, width),
        LayoutMode::ByTemperature => temp_x(record.temp, dataset.temp_extent, width),
    }
}

pub fn y_target(height: f32) -> f32 {
    height / 1.75
}

/// One relaxation pass of the pairwise minimum-separation constraint.
/// Runs on positions directly and independent of the energy level, so
/// bubbles never stack even once the simulation has gone quiet.
pub fn collide_pass(positions: &mut [Vec2], collide_radius: f32) {
    let min_distance = collide_radius * 2.0;
    let min_distance_sq = min_distance * min_distance;

    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            let delta = positions[i] - positions[j];
            let distance_sq = delta.length_sq();
            if distance_sq >= min_distance_sq {
                continue;
            }

            let distance = distance_sq.sqrt();
            let direction = if distance > 0.0001 {
                delta / distance
            } else {
                // coincident points: deterministic split direction
                let angle =
                    ((i as f32) * 0.618_034 + (j as f32) * 0.414_214) * std::f32::consts::TAU;
                Vec2::new(angle.cos(), angle.sin())
            };

            let push = direction * ((min_distance - distance) * 0.5);
            positions[i] += push;
            positions[j] -= push;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AcStatus;

    fn record(status: AcStatus, temp: f32, year: u16) -> Record {
        Record {
            name: "test".to_owned(),
            age: None,
            temp,
            year,
            gender: String::new(),
            air_conditioning: status,
        }
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            record(AcStatus::Broken, 95.0, 2018),
            record(AcStatus::Unknown, 115.0, 2019),
        ])
        .unwrap()
    }

    #[test]
    fn combined_mode_targets_chart_center() {
        let dataset = dataset();
        let x = x_target(LayoutMode::Combined, &dataset.records[0], &dataset, 860.0);
        assert_eq!(x, 430.0);
    }

    #[test]
    fn status_mode_separates_categories() {
        let dataset = dataset();
        let broken = x_target(LayoutMode::ByStatus, &dataset.records[0], &dataset, 860.0);
        let unknown = x_target(LayoutMode::ByStatus, &dataset.records[1], &dataset, 860.0);
        assert!(broken < unknown);
    }

    #[test]
    fn temperature_mode_orders_by_temp() {
        let dataset = dataset();
        let cool = x_target(
            LayoutMode::ByTemperature,
            &dataset.records[0],
            &dataset,
            860.0,
        );
        let hot = x_target(
            LayoutMode::ByTemperature,
            &dataset.records[1],
            &dataset,
            860.0,
        );
        assert_eq!(cool, 0.0);
        assert_eq!(hot, 860.0);
    }

    #[test]
    fn temperature_mode_has_the_strongest_pull() {
        for mode in [LayoutMode::Combined, LayoutMode::ByStatus, LayoutMode::ByYear] {
            assert!(LayoutMode::ByTemperature.strength() > mode.strength());
        }
    }

    #[test]
    fn collide_pass_separates_overlapping_points() {
        let mut positions = vec![Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0)];
        for _ in 0..80 {
            collide_pass(&mut positions, 12.0);
        }
        let distance = (positions[0] - positions[1]).length();
        assert!(distance >= 24.0 - 0.5, "distance was {distance}");
    }

    #[test]
    fn collide_pass_splits_coincident_points() {
        let mut positions = vec![Vec2::ZERO, Vec2::ZERO];
        for _ in 0..120 {
            collide_pass(&mut positions, 12.0);
        }
        assert!((positions[0] - positions[1]).length() > 1.0);
    }
}
