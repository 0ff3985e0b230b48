#![allow(dead_code)]

use std::collections::HashMap;

use embassy_time::Instant;
use pev_light_orchestrator::motion::Vector3;
use pev_light_orchestrator::{
    MotionSample, MotionSensor, OutputDriver, Rgb, SensorError, SettingValue, SettingsStore, Strip,
};

pub const MAX_LEDS: usize = 32;

pub fn ms(millis: u64) -> Instant {
    Instant::from_millis(millis)
}

pub fn accel(x: f32, y: f32, z: f32) -> MotionSample {
    MotionSample::at_rest().with_accel(Vector3::new(x, y, z))
}

/// Sensor returning whatever the test put in `next`
pub struct FakeSensor {
    pub next: Result<MotionSample, SensorError>,
    pub reads: usize,
}

impl FakeSensor {
    pub fn at_rest() -> Self {
        Self {
            next: Ok(MotionSample::at_rest()),
            reads: 0,
        }
    }

    pub fn failing(error: SensorError) -> Self {
        Self {
            next: Err(error),
            reads: 0,
        }
    }
}

impl MotionSensor for FakeSensor {
    fn sample(&mut self) -> Result<MotionSample, SensorError> {
        self.reads += 1;
        self.next
    }
}

/// One `write` call
#[derive(Debug, Clone, PartialEq)]
pub struct Write {
    pub strip: Strip,
    pub colors: Vec<Rgb>,
    pub brightness: u8,
}

#[derive(Default)]
pub struct RecordingDriver {
    pub writes: Vec<Write>,
}

impl RecordingDriver {
    pub fn last(&self, strip: Strip) -> Option<&Write> {
        self.writes.iter().rev().find(|w| w.strip == strip)
    }
}

impl OutputDriver for RecordingDriver {
    fn write(&mut self, strip: Strip, colors: &[Rgb], brightness: u8) {
        self.writes.push(Write {
            strip,
            colors: colors.to_vec(),
            brightness,
        });
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub values: HashMap<String, SettingValue>,
}

impl MemoryStore {
    pub fn with(mut self, key: &str, value: SettingValue) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<SettingValue> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: SettingValue) {
        self.values.insert(key.to_string(), value);
    }
}
