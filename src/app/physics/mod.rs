mod forces;

use eframe::egui::{Vec2, vec2};
use log::debug;

pub use forces::LayoutMode;
use forces::{Y_CENTER_STRENGTH, collide_pass, x_target, y_target};

use crate::app::scales::{BASE_RADIUS, CHART_HEIGHT, CHART_WIDTH};
use crate::data::Dataset;
use crate::util::stable_pair;

/// Energy floor below which the simulation sleeps.
const ALPHA_MIN: f32 = 0.001;
/// Geometric decay per tick; roughly 300 ticks from 1.0 to the floor.
const ALPHA_DECAY: f32 = 0.0228;

const COLLIDE_ITERATIONS: usize = 2;

#[derive(Clone, Copy, Debug)]
pub struct PhysicsTuning {
    /// Multiplier on the active x-force strength.
    pub strength_scale: f32,
    /// Per-tick velocity loss, 0 = frictionless.
    pub velocity_decay: f32,
    /// Extra spacing added to the rendered radius for collisions.
    pub collide_padding: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            strength_scale: 1.0,
            velocity_decay: 0.4,
            collide_padding: 4.0,
        }
    }
}

/// One simulated bubble. The simulation owns position and velocity; the
/// renderer only ever reads them.
#[derive(Clone, Copy, Debug)]
pub struct SimNode {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// d3-style force simulation: every tick each node is pulled toward the
/// active x-target and the fixed y-center, scaled by a decaying energy
/// level, then a pairwise collision constraint untangles overlaps.
pub struct Simulation {
    nodes: Vec<SimNode>,
    mode: LayoutMode,
    alpha: f32,
    collide_scratch: Vec<Vec2>,
}

impl Simulation {
    pub fn new(dataset: &Dataset) -> Self {
        let center = vec2(CHART_WIDTH * 0.5, y_target(CHART_HEIGHT));
        let spread = (dataset.record_count() as f32).sqrt() * BASE_RADIUS * 1.6;
        let nodes = dataset
            .records
            .iter()
            .map(|record| {
                let (jx, jy) = stable_pair(&record.name);
                SimNode {
                    pos: center + vec2(jx, jy) * spread,
                    vel: Vec2::ZERO,
                }
            })
            .collect();

        Self {
            nodes,
            mode: LayoutMode::Combined,
            alpha: 1.0,
            collide_scratch: Vec::new(),
        }
    }

    pub fn nodes(&self) -> &[SimNode] {
        &self.nodes
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Swap the active positional force. Positions and velocities are
    /// untouched; the integrator simply starts pulling toward new targets.
    pub fn set_mode(&mut self, mode: LayoutMode) {
        self.mode = mode;
    }

    /// Raise the energy level so the layout visibly re-settles. Never
    /// lowers it.
    pub fn inject(&mut self, alpha: f32) {
        self.alpha = self.alpha.max(alpha.clamp(0.0, 1.0));
    }

    /// User-triggered layout switch: swap force, boost energy.
    pub fn switch_layout(&mut self, mode: LayoutMode) {
        debug!("layout switch: {:?} -> {:?}", self.mode, mode);
        self.set_mode(mode);
        self.inject(mode.injection());
    }

    pub fn is_awake(&self) -> bool {
        self.alpha >= ALPHA_MIN
    }

    /// Advance one tick. Returns false once the energy has decayed and
    /// nothing is moving, so the caller can stop requesting repaints.
    pub fn step(&mut self, dataset: &Dataset, tuning: &PhysicsTuning, delta_seconds: f32) -> bool {
        if !self.is_awake() {
            return false;
        }

        let step_scale = (delta_seconds * 60.0).clamp(0.25, 3.0);
        self.alpha *= (1.0 - ALPHA_DECAY).powf(step_scale);

        let x_strength = self.mode.strength() * tuning.strength_scale.clamp(0.25, 3.0);
        let y_center = y_target(CHART_HEIGHT);
        let velocity_keep = (1.0 - tuning.velocity_decay.clamp(0.0, 0.95)).powf(step_scale);

        for (node, record) in self.nodes.iter_mut().zip(&dataset.records) {
            let target_x = x_target(self.mode, record, dataset, CHART_WIDTH);
            node.vel.x += (target_x - node.pos.x) * x_strength * self.alpha * step_scale;
            node.vel.y += (y_center - node.pos.y) * Y_CENTER_STRENGTH * self.alpha * step_scale;

            node.vel *= velocity_keep;
            node.pos += node.vel * step_scale;
        }

        let collide_radius = BASE_RADIUS + tuning.collide_padding.clamp(0.0, 12.0);
        self.collide_scratch.clear();
        self.collide_scratch.extend(self.nodes.iter().map(|node| node.pos));
        for _ in 0..COLLIDE_ITERATIONS {
            collide_pass(&mut self.collide_scratch, collide_radius);
        }
        for (node, resolved) in self.nodes.iter_mut().zip(&self.collide_scratch) {
            node.pos = *resolved;
        }

        if !self.is_awake() {
            for node in &mut self.nodes {
                node.vel = Vec2::ZERO;
            }
            debug!("simulation settled");
            return false;
        }
        true
    }
}
