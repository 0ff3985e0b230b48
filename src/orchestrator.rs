use embassy_time::{Duration, Instant};

use crate::color::{BLACK, Rgb};
use crate::composer::{FrameInput, LayerComposer};
use crate::config::{ConfigError, ConfigPatch, LightingConfig, MotionConfig, Preset};
use crate::controller::{Controllers, Side};
use crate::effect::PatternLibrary;
use crate::frame_clock::FrameClock;
use crate::log::log;
use crate::motion::{
    CalibrationError, CalibrationEvent, Calibrator, ClassifiedMotion, MotionClassifier,
    MotionSample, MotionSensor,
};
use crate::request::{ControlRequest, RequestError, RequestReceiver};
use crate::settings::Settings;
use crate::startup::{StartupFrame, StartupPlayer};
use crate::sync::{SyncPublisher, SyncState};
use crate::transition::BrightnessRamp;
use crate::{OutputDriver, Strip};

/// Nominal sensor polling interval (20 Hz)
pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(50);

/// Duration of output brightness changes
pub const BRIGHTNESS_RAMP: Duration = Duration::from_millis(200);

/// What one loop iteration did
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    /// A frame that differs from the last one sent was written to the driver
    pub rendered: bool,
    /// Outcome of the request drained this iteration
    pub request: Option<Result<(), RequestError>>,
    /// Persisted settings changed and should be stored
    pub settings_changed: bool,
    /// State to broadcast to the sync group
    pub sync_update: Option<SyncState>,
}

/// Snapshot of every controller for status reporting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Status {
    pub moving_forward: bool,
    pub direction_pending: bool,
    pub fade_progress: f32,
    pub blinker: Option<Side>,
    pub blinker_manual: bool,
    pub braking_active: bool,
    pub braking_manual: bool,
    pub braking_cycles: u8,
    pub last_braking_at: Option<Instant>,
    pub park_active: bool,
    pub last_impact_at: Option<Instant>,
    pub calibrating: bool,
    pub calibration_step: Option<u8>,
    pub calibrated: bool,
    pub sensor_fault: bool,
    pub startup_running: bool,
    pub steps: [u16; 2],
    pub output_brightness: u8,
}

/// Overlay state that forces a frame when it changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OverlaySignature {
    park: bool,
    braking: bool,
    blinker: Option<Side>,
    impact: bool,
}

/// What the driver last received for one strip
#[derive(Debug, Clone, Copy)]
struct WrittenFrame<const MAX_LEDS: usize> {
    colors: [Rgb; MAX_LEDS],
    len: usize,
    brightness: Option<u8>,
}

impl<const MAX_LEDS: usize> WrittenFrame<MAX_LEDS> {
    const fn new() -> Self {
        Self {
            colors: [BLACK; MAX_LEDS],
            len: 0,
            brightness: None,
        }
    }

    fn matches(&self, colors: &[Rgb], brightness: u8) -> bool {
        self.brightness == Some(brightness) && self.colors[..self.len] == *colors
    }

    fn store(&mut self, colors: &[Rgb], brightness: u8) {
        let len = colors.len().min(MAX_LEDS);
        self.colors[..len].copy_from_slice(&colors[..len]);
        self.len = len;
        self.brightness = Some(brightness);
    }
}

/// Motion-reactive lighting orchestrator
///
/// Drive it from a single cooperative loop by calling [`Orchestrator::tick`]
/// as often as possible. External requests reach it only through the
/// request mailbox.
pub struct Orchestrator<'a, S, D, P, const MAX_LEDS: usize>
where
    S: MotionSensor,
    D: OutputDriver,
    P: PatternLibrary,
{
    sensor: S,
    driver: D,
    patterns: P,
    requests: RequestReceiver<'a>,

    lighting: LightingConfig,
    motion_config: MotionConfig,

    calibrator: Calibrator,
    classifier: MotionClassifier,
    controllers: Controllers,
    clocks: [FrameClock; 2],
    composer: LayerComposer<MAX_LEDS>,
    written: [WrittenFrame<MAX_LEDS>; 2],
    startup: StartupPlayer,
    brightness: BrightnessRamp,
    publisher: SyncPublisher,

    last_sample_at: Option<Instant>,
    last_sample: Option<MotionSample>,
    last_motion: ClassifiedMotion,
    sensor_fault: bool,
    last_overlay: Option<OverlaySignature>,
    dirty: bool,
}

impl<'a, S, D, P, const MAX_LEDS: usize> Orchestrator<'a, S, D, P, MAX_LEDS>
where
    S: MotionSensor,
    D: OutputDriver,
    P: PatternLibrary,
{
    /// Create the orchestrator and start the configured startup sequence
    pub fn new(
        sensor: S,
        driver: D,
        patterns: P,
        requests: RequestReceiver<'a>,
        settings: Settings,
        now: Instant,
    ) -> Self {
        let mut startup = StartupPlayer::new();
        startup.start(
            settings.lighting.startup.sequence,
            settings.lighting.startup.duration(),
            now,
        );
        Self {
            sensor,
            driver,
            patterns,
            requests,
            lighting: settings.lighting,
            motion_config: settings.motion,
            calibrator: Calibrator::new(settings.calibration),
            classifier: MotionClassifier::default(),
            controllers: Controllers::new(),
            clocks: [FrameClock::new(), FrameClock::new()],
            composer: LayerComposer::new(),
            written: [WrittenFrame::new(); 2],
            startup,
            brightness: BrightnessRamp::new(settings.lighting.brightness, BRIGHTNESS_RAMP),
            publisher: SyncPublisher::new(),
            last_sample_at: None,
            last_sample: None,
            last_motion: ClassifiedMotion::default(),
            sensor_fault: false,
            last_overlay: None,
            dirty: true,
        }
    }

    /// Run one loop iteration
    pub fn tick(&mut self, now: Instant) -> TickReport {
        let mut report = TickReport::default();

        if let Some(request) = self.requests.take() {
            let result = self.handle_request(request, now);
            match result {
                Ok(changed) => report.settings_changed = changed,
                Err(error) => log!("[Orchestrator] request failed: {}", error),
            }
            report.request = Some(result.map(|_| ()));
            self.dirty = true;
        }

        if self.calibrator.poll(now) {
            self.dirty = true;
        }
        if self.sample_due(now) {
            self.last_sample_at = Some(now);
            self.sample_motion(now);
        }

        let startup = self.startup.poll(now);
        let parked = startup.is_none() && self.controllers.park.is_active();
        let (speed, target_brightness) = if parked {
            (self.lighting.park.speed, self.lighting.park.brightness)
        } else {
            (self.lighting.effect_speed, self.lighting.brightness)
        };

        let mut fired = false;
        for strip in Strip::ALL {
            let length = self.lighting.led_count(strip);
            fired |= self.clocks[strip.index()].tick(now, speed, length).fired;
        }

        self.brightness.set_target(target_brightness, now);
        let ramping = self.brightness.is_transitioning();
        self.brightness.tick(now);

        let overlay = self.overlay_signature(now);
        let forced = self.dirty
            || ramping
            || startup.is_some()
            || self.controllers.direction.is_pending()
            || self.last_overlay != Some(overlay);
        if fired || forced {
            report.rendered = self.render(now, startup, parked);
            self.last_overlay = Some(overlay);
            self.dirty = false;
        }

        report.sync_update = self.publish(now);
        report
    }

    fn sample_due(&self, now: Instant) -> bool {
        self.last_sample_at
            .is_none_or(|at| now.saturating_duration_since(at) >= SAMPLE_INTERVAL)
    }

    fn sample_motion(&mut self, now: Instant) {
        if !self.motion_config.motion_enabled() {
            return;
        }
        match self.sensor.sample() {
            Ok(sample) => {
                if self.sensor_fault {
                    log!("[Orchestrator] sensor recovered");
                    self.sensor_fault = false;
                }
                self.last_sample = Some(sample);
                let motion = self
                    .classifier
                    .classify(&sample, &self.calibrator.mapping());
                self.last_motion = motion;
                if !self.calibrator.is_capturing() {
                    self.controllers.update(&motion, &self.motion_config, now);
                }
            }
            Err(error) => {
                if !self.sensor_fault {
                    log!("[Orchestrator] {}, motion control suspended", error);
                    self.sensor_fault = true;
                    self.controllers.clear_sensed();
                    self.classifier.reset();
                }
                self.last_sample = None;
            }
        }
    }

    fn overlay_signature(&self, now: Instant) -> OverlaySignature {
        OverlaySignature {
            park: self.controllers.park.is_active(),
            braking: self.controllers.braking.is_active(),
            blinker: self.controllers.blinker.active(),
            impact: self.controllers.impact.is_flashing(now),
        }
    }

    /// Compose both strips and write the ones that changed
    fn render(&mut self, now: Instant, startup: Option<StartupFrame>, parked: bool) -> bool {
        let direction = self.controllers.direction.frame(now);
        let blinker = &self.controllers.blinker;
        let input = FrameInput {
            lighting: &self.lighting,
            direction_based: self.motion_config.direction_based_lighting(),
            direction,
            steps: [
                self.clocks[Strip::Headlight.index()].step(),
                self.clocks[Strip::Taillight.index()].step(),
            ],
            startup,
            park: parked,
            braking: self.controllers.braking.intensity(now),
            blinker: blinker.active().map(|side| (side, blinker.is_lit(now))),
            impact_lit: self.controllers.impact.is_lit(now),
        };
        self.composer.compose(&self.patterns, &input);

        let brightness = self.brightness.current();
        let mut written = false;
        for strip in Strip::ALL {
            let frame = self.composer.frame(strip);
            let last = &mut self.written[strip.index()];
            if last.matches(frame, brightness) {
                continue;
            }
            self.driver.write(strip, frame, brightness);
            last.store(frame, brightness);
            written = true;
        }
        written
    }

    fn publish(&mut self, now: Instant) -> Option<SyncState> {
        if !(self.lighting.sync_enabled && self.lighting.sync_leader) {
            return None;
        }
        let strip = Strip::Headlight;
        let state = SyncState::capture(
            &self.lighting,
            self.clocks[strip.index()].step(),
            self.lighting.led_count(strip),
        );
        self.publisher
            .poll(state, self.controllers.overrides_active(), now)
    }

    /// Apply one request; `Ok(true)` if persisted settings changed
    fn handle_request(
        &mut self,
        request: ControlRequest,
        now: Instant,
    ) -> Result<bool, RequestError> {
        match request {
            ControlRequest::Configure(patch) => {
                self.configure(&patch)?;
                Ok(true)
            }
            ControlRequest::SetPreset(raw) => {
                let preset = Preset::from_raw(raw).ok_or(ConfigError::UnknownPreset(raw))?;
                log!("[Orchestrator] preset {}", preset.as_str());
                preset.apply(&mut self.lighting);
                Ok(true)
            }
            ControlRequest::StartCalibration => {
                self.calibrator.start(now);
                self.controllers.clear_sensed();
                Ok(false)
            }
            ControlRequest::NextCalibrationStep => {
                if !self.calibrator.is_capturing() {
                    return Err(CalibrationError::NotCapturing.into());
                }
                let sample = self
                    .last_sample
                    .ok_or(CalibrationError::SensorUnavailable)?;
                match self.calibrator.capture(sample.accel, now)? {
                    CalibrationEvent::Captured { .. } => Ok(false),
                    CalibrationEvent::Complete(_) => {
                        self.classifier.reset();
                        Ok(true)
                    }
                }
            }
            ControlRequest::ResetCalibration => {
                self.calibrator.reset();
                self.classifier.reset();
                Ok(true)
            }
            ControlRequest::ManualBlinker(side) => {
                if !self.motion_config.blinker_enabled() {
                    return Err(RequestError::ControllerDisabled);
                }
                self.controllers.blinker.set_manual(side, now);
                Ok(false)
            }
            ControlRequest::ManualBrake(on) => {
                if !self.motion_config.braking_enabled() {
                    return Err(RequestError::ControllerDisabled);
                }
                self.controllers
                    .braking
                    .set_manual(on, self.motion_config.braking_mode(), now);
                Ok(false)
            }
            ControlRequest::TestStartup => {
                let startup = self.lighting.startup;
                self.startup.start(startup.sequence, startup.duration(), now);
                Ok(false)
            }
            ControlRequest::ApplySync(state) => {
                self.apply_sync(&state)?;
                Ok(false)
            }
        }
    }

    fn configure(&mut self, patch: &ConfigPatch) -> Result<(), ConfigError> {
        let motion_was_enabled = self.motion_config.motion_enabled();
        patch.apply(&mut self.lighting, &mut self.motion_config, MAX_LEDS)?;
        if motion_was_enabled && !self.motion_config.motion_enabled() {
            log!("[Orchestrator] motion control disabled");
            self.controllers.clear_sensed();
            self.classifier.reset();
            self.last_sample = None;
        }
        self.controllers.apply_enabled(&self.motion_config);
        if !self.lighting.sync_leader {
            self.publisher.reset();
        }
        Ok(())
    }

    fn apply_sync(&mut self, state: &SyncState) -> Result<(), RequestError> {
        if !self.lighting.sync_enabled || self.lighting.sync_leader {
            log!("[Orchestrator] sync update ignored, not a follower");
            return Err(RequestError::SyncIgnored);
        }
        if self.controllers.overrides_active() {
            log!("[Orchestrator] sync update ignored, motion override active");
            return Err(RequestError::SyncIgnored);
        }
        state.apply_to(&mut self.lighting);
        for strip in Strip::ALL {
            let step = state.local_step(self.lighting.led_count(strip));
            self.clocks[strip.index()].set_step(step);
        }
        Ok(())
    }

    pub fn status(&self, now: Instant) -> Status {
        let controllers = &self.controllers;
        Status {
            moving_forward: controllers.direction.is_moving_forward(),
            direction_pending: controllers.direction.is_pending(),
            fade_progress: controllers.direction.fade_progress(),
            blinker: controllers.blinker.active(),
            blinker_manual: controllers.blinker.is_manual(),
            braking_active: controllers.braking.is_active(),
            braking_manual: controllers.braking.is_manual(),
            braking_cycles: controllers.braking.cycle_count(now),
            last_braking_at: controllers.braking.last_event_at(),
            park_active: controllers.park.is_active(),
            last_impact_at: controllers.impact.last_fired_at(),
            calibrating: self.calibrator.is_capturing(),
            calibration_step: self.calibrator.step(),
            calibrated: self.calibrator.mapping().valid,
            sensor_fault: self.sensor_fault,
            startup_running: self.startup.is_running(),
            steps: [
                self.clocks[Strip::Headlight.index()].step(),
                self.clocks[Strip::Taillight.index()].step(),
            ],
            output_brightness: self.brightness.current(),
        }
    }

    /// Persisted state, for storing after `settings_changed`
    pub fn settings(&self) -> Settings {
        Settings {
            lighting: self.lighting,
            motion: self.motion_config,
            calibration: self.calibrator.mapping(),
        }
    }

    pub const fn lighting(&self) -> &LightingConfig {
        &self.lighting
    }

    pub const fn motion_config(&self) -> &MotionConfig {
        &self.motion_config
    }

    pub const fn controllers(&self) -> &Controllers {
        &self.controllers
    }

    /// Classification of the latest good sample
    pub const fn last_motion(&self) -> &ClassifiedMotion {
        &self.last_motion
    }

    /// The last composed frame of `strip`
    pub fn frame(&self, strip: Strip) -> &[Rgb] {
        self.composer.frame(strip)
    }

    pub const fn driver(&self) -> &D {
        &self.driver
    }

    pub const fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }
}
