//! Per-frame layer arbitration
//!
//! Layers are drawn in a fixed order. An exclusive layer owns the whole
//! frame and stops composition; the others are overlays that overwrite the
//! pixels of earlier layers.

use crate::Strip;
use crate::bounds::{RenderingBounds, bounded};
use crate::color::{BLACK, Rgb, fill, lerp_frames, scale_color};
use crate::config::{LightingConfig, StripStyle};
use crate::controller::{DirectionFrame, Side};
use crate::effect::PatternLibrary;
use crate::startup::{StartupFrame, render_startup};

/// Lighting role of a physical strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Front,
    Rear,
}

impl Role {
    /// Role of `strip` for the given direction of travel
    pub const fn of(strip: Strip, moving_forward: bool) -> Self {
        match (strip, moving_forward) {
            (Strip::Headlight, true) | (Strip::Taillight, false) => Self::Front,
            (Strip::Headlight, false) | (Strip::Taillight, true) => Self::Rear,
        }
    }
}

/// Composition layers, bottom to top
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Layer {
    Startup = 0,
    Park = 1,
    Base = 2,
    Braking = 3,
    Blinker = 4,
    Impact = 5,
}

impl Layer {
    /// Drawing order
    pub const ORDER: [Self; 6] = [
        Self::Startup,
        Self::Park,
        Self::Base,
        Self::Braking,
        Self::Blinker,
        Self::Impact,
    ];

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// What a layer did with the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerOutcome {
    /// Nothing to draw
    Skipped,
    /// Drew an overlay; later layers still run
    Drawn,
    /// Owns the frame; later layers are suppressed
    Exclusive,
}

/// Set of layers that drew into a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawnLayers(u8);

impl DrawnLayers {
    pub const fn contains(self, layer: Layer) -> bool {
        self.0 & layer.bit() != 0
    }

    const fn insert(&mut self, layer: Layer) {
        self.0 |= layer.bit();
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Everything one frame depends on
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub lighting: &'a LightingConfig,
    /// Swap roles with the direction of travel
    pub direction_based: bool,
    pub direction: DirectionFrame,
    /// Animation step per physical strip
    pub steps: [u16; 2],
    pub startup: Option<StartupFrame>,
    pub park: bool,
    /// Braking overlay intensity
    pub braking: Option<u8>,
    /// Indicated side and whether the blink phase is lit
    pub blinker: Option<(Side, bool)>,
    pub impact_lit: bool,
}

impl FrameInput<'_> {
    const fn moving_forward(&self) -> bool {
        !self.direction_based || self.direction.moving_forward
    }

    /// Physical strip currently holding `role`
    const fn strip_with(&self, role: Role) -> Strip {
        match (role, self.moving_forward()) {
            (Role::Front, true) | (Role::Rear, false) => Strip::Headlight,
            (Role::Front, false) | (Role::Rear, true) => Strip::Taillight,
        }
    }
}

/// Owner of the two physical pixel buffers
pub struct LayerComposer<const MAX_LEDS: usize> {
    frames: [[Rgb; MAX_LEDS]; 2],
    /// Previous role assignment during a direction fade
    previous: [[Rgb; MAX_LEDS]; 2],
    /// New role assignment during a direction fade
    incoming: [[Rgb; MAX_LEDS]; 2],
    lengths: [u8; 2],
}

impl<const MAX_LEDS: usize> Default for LayerComposer<MAX_LEDS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const MAX_LEDS: usize> LayerComposer<MAX_LEDS> {
    pub const fn new() -> Self {
        Self {
            frames: [[BLACK; MAX_LEDS]; 2],
            previous: [[BLACK; MAX_LEDS]; 2],
            incoming: [[BLACK; MAX_LEDS]; 2],
            lengths: [0; 2],
        }
    }

    /// The last composed frame of `strip`
    pub fn frame(&self, strip: Strip) -> &[Rgb] {
        let len = usize::from(self.lengths[strip.index()]).min(MAX_LEDS);
        &self.frames[strip.index()][..len]
    }

    /// Compose one frame into both strip buffers
    pub fn compose<P: PatternLibrary + ?Sized>(
        &mut self,
        patterns: &P,
        input: &FrameInput<'_>,
    ) -> DrawnLayers {
        self.lengths = input.lighting.led_counts();
        let mut drawn = DrawnLayers::default();
        for layer in Layer::ORDER {
            let outcome = match layer {
                Layer::Startup => self.draw_startup(input),
                Layer::Park => self.draw_park(patterns, input),
                Layer::Base => self.draw_base(patterns, input),
                Layer::Braking => self.draw_braking(input),
                Layer::Blinker => self.draw_blinker(input),
                Layer::Impact => self.draw_impact(input),
            };
            match outcome {
                LayerOutcome::Skipped => {}
                LayerOutcome::Drawn => drawn.insert(layer),
                LayerOutcome::Exclusive => {
                    drawn.insert(layer);
                    break;
                }
            }
        }
        drawn
    }

    fn strip_buffer(&mut self, strip: Strip) -> &mut [Rgb] {
        let len = self.lengths[strip.index()];
        bounded(&mut self.frames[strip.index()], RenderingBounds::whole(len))
    }

    fn draw_startup(&mut self, input: &FrameInput<'_>) -> LayerOutcome {
        let Some(frame) = input.startup else {
            return LayerOutcome::Skipped;
        };
        for strip in Strip::ALL {
            let color = input.lighting.style(strip).color;
            render_startup(frame.sequence, frame.progress, self.strip_buffer(strip), color);
        }
        LayerOutcome::Exclusive
    }

    fn draw_park<P: PatternLibrary + ?Sized>(
        &mut self,
        patterns: &P,
        input: &FrameInput<'_>,
    ) -> LayerOutcome {
        if !input.park {
            return LayerOutcome::Skipped;
        }
        let lighting = input.lighting;
        for strip in Strip::ALL {
            let step = input.steps[strip.index()];
            patterns.render(
                lighting.park.effect,
                self.strip_buffer(strip),
                lighting.park_color(strip),
                step,
            );
        }
        LayerOutcome::Exclusive
    }

    fn draw_base<P: PatternLibrary + ?Sized>(
        &mut self,
        patterns: &P,
        input: &FrameInput<'_>,
    ) -> LayerOutcome {
        let lighting = input.lighting;
        let fade = if input.direction_based {
            input.direction.fade
        } else {
            None
        };

        let Some(fade) = fade else {
            let moving_forward = input.moving_forward();
            for strip in Strip::ALL {
                let style = role_style(lighting, Role::of(strip, moving_forward));
                patterns.render(
                    style.effect,
                    self.strip_buffer(strip),
                    style.color,
                    input.steps[strip.index()],
                );
            }
            return LayerOutcome::Drawn;
        };

        for strip in Strip::ALL {
            let i = strip.index();
            let len = self.lengths[i];
            let step = input.steps[i];

            let old = role_style(lighting, Role::of(strip, input.direction.moving_forward));
            let previous = bounded(&mut self.previous[i], RenderingBounds::whole(len));
            patterns.render(old.effect, previous, old.color, step);

            let new = role_style(lighting, Role::of(strip, fade.target_forward));
            let incoming = bounded(&mut self.incoming[i], RenderingBounds::whole(len));
            patterns.render(new.effect, incoming, new.color, step);

            let out = bounded(&mut self.frames[i], RenderingBounds::whole(len));
            lerp_frames(out, &self.previous[i], &self.incoming[i], fade.progress);
        }
        LayerOutcome::Drawn
    }

    fn draw_braking(&mut self, input: &FrameInput<'_>) -> LayerOutcome {
        let Some(intensity) = input.braking else {
            return LayerOutcome::Skipped;
        };
        let color = scale_color(input.lighting.braking_color, intensity);
        fill(self.strip_buffer(input.strip_with(Role::Rear)), color);
        LayerOutcome::Drawn
    }

    fn draw_blinker(&mut self, input: &FrameInput<'_>) -> LayerOutcome {
        let Some((side, lit)) = input.blinker else {
            return LayerOutcome::Skipped;
        };
        let indicator = input.lighting.indicator;
        fill(self.strip_buffer(input.strip_with(Role::Front)), indicator.front_base);
        fill(self.strip_buffer(input.strip_with(Role::Rear)), indicator.rear_base);

        let blink = if lit { indicator.blink } else { BLACK };
        for strip in Strip::ALL {
            let i = strip.index();
            let len = self.lengths[i];
            let half = match side {
                Side::Left => RenderingBounds::lower_half(len),
                Side::Right => RenderingBounds::upper_half(len),
            };
            fill(bounded(&mut self.frames[i], half), blink);
        }
        LayerOutcome::Drawn
    }

    fn draw_impact(&mut self, input: &FrameInput<'_>) -> LayerOutcome {
        if !input.impact_lit {
            return LayerOutcome::Skipped;
        }
        for strip in Strip::ALL {
            let color = input.lighting.impact_color;
            fill(self.strip_buffer(strip), color);
        }
        LayerOutcome::Drawn
    }
}

const fn role_style(lighting: &LightingConfig, role: Role) -> StripStyle {
    match role {
        Role::Front => lighting.headlight,
        Role::Rear => lighting.taillight,
    }
}
