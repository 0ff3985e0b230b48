//! Debounced motion state machines
//!
//! Each controller owns its state exclusively and is mutated only from the
//! cooperative loop. [`Controllers`] feeds them one classified sample at a
//! time in dependency order: park first, since braking must know whether the
//! vehicle is parked.

mod blinker;
mod braking;
mod direction;
mod impact;
mod park;

use embassy_time::Instant;

pub use blinker::{BLINK_HALF_PERIOD, BlinkerController, Side};
pub use braking::{BRAKING_CYCLES, BrakingController, FLASH_CYCLE, PULSE_CYCLE};
pub use direction::{DirectionController, DirectionFrame, FadeFrame};
pub use impact::{IMPACT_FLASH, IMPACT_FLASH_HALF_PERIOD, ImpactController};
pub use park::ParkController;

use crate::config::MotionConfig;
use crate::motion::ClassifiedMotion;

/// The five motion controllers
#[derive(Debug, Clone, Default)]
pub struct Controllers {
    pub direction: DirectionController,
    pub blinker: BlinkerController,
    pub braking: BrakingController,
    pub park: ParkController,
    pub impact: ImpactController,
}

impl Controllers {
    pub const fn new() -> Self {
        Self {
            direction: DirectionController::new(),
            blinker: BlinkerController::new(),
            braking: BrakingController::new(),
            park: ParkController::new(),
            impact: ImpactController::new(),
        }
    }

    /// Feed one classified sample to every enabled controller
    pub fn update(&mut self, motion: &ClassifiedMotion, config: &MotionConfig, now: Instant) {
        if config.park_enabled() {
            self.park
                .update(motion.stillness_magnitude, motion.angular_rate, config, now);
        }
        if config.direction_based_lighting() {
            self.direction.update(motion.forward_accel, config, now);
        }
        if config.braking_enabled() {
            self.braking.update(
                motion.raw_forward_accel,
                self.direction.is_moving_forward(),
                self.park.is_active(),
                config,
                now,
            );
        }
        if config.blinker_enabled() {
            self.blinker.update(motion.lateral_accel, config, now);
        }
        if config.impact_enabled() {
            self.impact.update(motion.g_force, config, now);
        }
    }

    /// Reset every controller whose enabled flag is off
    pub fn apply_enabled(&mut self, config: &MotionConfig) {
        if !config.direction_based_lighting() {
            self.direction.reset();
        }
        if !config.blinker_enabled() {
            self.blinker.reset();
        }
        if !config.braking_enabled() {
            self.braking.reset();
        }
        if !config.park_enabled() {
            self.park.reset();
        }
        if !config.impact_enabled() {
            self.impact.reset();
        }
    }

    /// Forget everything that was sensed; manual overrides survive
    pub fn clear_sensed(&mut self) {
        self.direction.reset();
        self.blinker.clear_sensed();
        self.braking.clear_sensed();
        self.park.reset();
        self.impact.reset();
    }

    /// Blinker, braking or park currently overrides the base look
    pub const fn overrides_active(&self) -> bool {
        self.blinker.is_active() || self.braking.is_active() || self.park.is_active()
    }
}
