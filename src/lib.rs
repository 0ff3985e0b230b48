#![no_std]

pub mod bounds;
pub mod color;
pub mod composer;
pub mod config;
pub mod controller;
pub mod effect;
pub mod frame_clock;
mod log;
pub mod mailbox;
pub mod math8;
pub mod motion;
pub mod orchestrator;
pub mod request;
pub mod settings;
pub mod startup;
pub mod sync;
pub mod transition;

pub use composer::{DrawnLayers, FrameInput, Layer, LayerComposer, LayerOutcome, Role};
pub use config::{
    BrakingMode, ConfigError, ConfigPatch, LightingConfig, MotionConfig, Preset, StripStyle,
};
pub use controller::{Controllers, Side};
pub use effect::{BuiltinPatterns, EffectId, PatternLibrary};
pub use frame_clock::{FrameClock, FrameTick};
pub use mailbox::{Busy, Mailbox};
pub use motion::{
    CalibrationMapping, Calibrator, ClassifiedMotion, MotionClassifier, MotionSample,
    MotionSensor, SensorError, Vector3,
};
pub use orchestrator::{Orchestrator, Status, TickReport};
pub use request::{ControlRequest, RequestError, RequestMailbox, RequestReceiver, RequestSender};
pub use settings::{SettingValue, Settings, SettingsStore};
pub use startup::StartupSequence;
pub use sync::{SyncPublisher, SyncState};

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Physical LED strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Strip {
    Headlight = 0,
    Taillight = 1,
}

impl Strip {
    pub const ALL: [Self; 2] = [Self::Headlight, Self::Taillight];

    /// Index into per-strip arrays
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The orchestrator is generic over this trait.
pub trait OutputDriver {
    /// Write a finished frame and the global brightness to one strip
    fn write(&mut self, strip: Strip, colors: &[Rgb], brightness: u8);
}
