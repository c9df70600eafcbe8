// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use crate::color::Color;
use crate::fixture::{FixtureMode, Head};

use super::roles::{ChannelRoleCache, ShutterState};

/// Length of one strobe blink cycle, in decoded frames. The first half of
/// each cycle is dark.
pub const STROBE_PERIOD: i32 = 30;

/// Strobe phase sentinel for "not currently strobing".
const STROBE_IDLE: i32 = -1;

/// Pan travel assumed when the fixture declares no maximum.
const DEFAULT_PAN_MAX_DEGREES: f64 = 540.0;

/// Tilt travel assumed when the fixture declares no maximum.
const DEFAULT_TILT_MAX_DEGREES: f64 = 270.0;

/// Maps a coarse channel value onto a signed angle centered at 0, so that
/// 0 reads as -max/2 and 255 as +max/2.
///
/// This is the endpoint-exact scaling; a parallel legacy formula divided by
/// 256 - 1/256 instead, landing a fraction of a degree short at full scale.
pub fn dmx_to_degrees(value: u8, max_degrees: f64) -> f64 {
    f64::from(value) * max_degrees / 255.0 - max_degrees / 2.0
}

/// The instantaneous visual state of one head, recomputed every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodedHeadState {
    /// The resolved body color.
    pub color: Color,

    /// Opacity, 0 (closed) to 255 (fully open).
    pub alpha: u8,

    /// Pan angle in degrees, centered at 0. Only meaningful if the head
    /// has a pan channel.
    pub pan_degrees: f64,

    /// Tilt angle in degrees, centered at 0. Only meaningful if the head
    /// has a tilt channel.
    pub tilt_degrees: f64,
}

/// Decodes raw universe buffers into one head's visual state.
///
/// Role classification runs once at construction; the only state mutated per
/// frame is the strobe phase.
#[derive(Debug, Clone)]
pub struct HeadDecoder {
    roles: ChannelRoleCache,
    address: usize,
    gel_color: Option<Color>,
    pan_max_degrees: f64,
    tilt_max_degrees: f64,
    strobe_phase: i32,
}

impl HeadDecoder {
    /// Creates a decoder for one head of a fixture patched at the given base
    /// DMX address.
    pub fn new(mode: &FixtureMode, head: &Head, address: usize) -> HeadDecoder {
        let mut roles = ChannelRoleCache::default();
        roles.cache_channels(mode, head);

        HeadDecoder {
            roles,
            address,
            gel_color: None,
            pan_max_degrees: mode
                .physical
                .pan_max_degrees
                .unwrap_or(DEFAULT_PAN_MAX_DEGREES),
            tilt_max_degrees: mode
                .physical
                .tilt_max_degrees
                .unwrap_or(DEFAULT_TILT_MAX_DEGREES),
            strobe_phase: STROBE_IDLE,
        }
    }

    /// Sets a static gel color, used as the color source for fixtures with
    /// no color channels (plain dimmers behind a filter).
    pub fn set_gel_color(&mut self, color: Option<Color>) {
        self.gel_color = color;
    }

    /// Decodes the full visual state for this frame.
    pub fn decode(&mut self, ua: &[u8]) -> DecodedHeadState {
        DecodedHeadState {
            color: self.compute_color(ua),
            alpha: self.compute_alpha(ua),
            pan_degrees: self.pan_degrees(ua),
            tilt_degrees: self.tilt_degrees(ua),
        }
    }

    /// Reads one channel from the buffer. A buffer shorter than the channel
    /// index (incomplete universe) reads as 0.
    fn read(&self, ua: &[u8], index: usize) -> u8 {
        ua.get(self.address + index).copied().unwrap_or(0)
    }

    /// Resolves the head color. First matching source wins: color wheel,
    /// RGB primaries, CMY primaries, gel color, then plain white.
    pub fn compute_color(&self, ua: &[u8]) -> Color {
        for &wheel in self.roles.color_wheels() {
            let value = self.read(ua, wheel);
            if let Some(color) = self.roles.wheel_color(wheel, value) {
                return color;
            }
        }

        if let Some([r, g, b]) = self.roles.rgb_channels() {
            return Color::new(self.read(ua, r), self.read(ua, g), self.read(ua, b));
        }

        if let Some([c, m, y]) = self.roles.cmy_channels() {
            return Color::from_cmy(self.read(ua, c), self.read(ua, m), self.read(ua, y));
        }

        if let Some(gel) = self.gel_color {
            return gel;
        }

        Color::WHITE
    }

    /// Resolves the head opacity from the master dimmer and the shutter
    /// channels, advancing the strobe phase.
    ///
    /// An incomplete universe reads the dimmer as 0, i.e. fully closed. That
    /// is the fail-safe direction: missing data never renders as full-on.
    pub fn compute_alpha(&mut self, ua: &[u8]) -> u8 {
        let mut alpha = match self.roles.master_dimmer() {
            Some(dimmer) => self.read(ua, dimmer),
            None => 255,
        };

        // A closed master dimmer overrides everything downstream.
        if alpha == 0 {
            self.strobe_phase = STROBE_IDLE;
            return 0;
        }

        for i in 0..self.roles.shutter_channels().len() {
            let shutter = self.roles.shutter_channels()[i];
            let value = self.read(ua, shutter);
            match self.roles.shutter_state(shutter, value) {
                ShutterState::Closed => {
                    self.strobe_phase = STROBE_IDLE;
                    return 0;
                }
                ShutterState::Strobe => {
                    if self.strobe_phase == STROBE_IDLE {
                        self.strobe_phase = 0;
                    }
                    if self.strobe_phase < STROBE_PERIOD / 2 {
                        alpha = 0;
                    }
                    self.strobe_phase += 1;
                    if self.strobe_phase > STROBE_PERIOD {
                        self.strobe_phase = 0;
                    }
                    if alpha == 0 {
                        return 0;
                    }
                }
                ShutterState::Open => self.strobe_phase = STROBE_IDLE,
            }
        }

        alpha
    }

    /// The pan angle in degrees. 0 when the head has no pan channel; callers
    /// must check [`HeadDecoder::has_pan`] since 0 is also a legitimate
    /// mid-range reading.
    pub fn pan_degrees(&self, ua: &[u8]) -> f64 {
        match self.roles.pan() {
            Some(pan) => dmx_to_degrees(self.read(ua, pan), self.pan_max_degrees),
            None => 0.0,
        }
    }

    /// The tilt angle in degrees. 0 when the head has no tilt channel.
    pub fn tilt_degrees(&self, ua: &[u8]) -> f64 {
        match self.roles.tilt() {
            Some(tilt) => dmx_to_degrees(self.read(ua, tilt), self.tilt_max_degrees),
            None => 0.0,
        }
    }

    /// Whether this head can pan.
    pub fn has_pan(&self) -> bool {
        self.roles.pan().is_some()
    }

    /// Whether this head can tilt.
    pub fn has_tilt(&self) -> bool {
        self.roles.tilt().is_some()
    }

    /// Whether this head has a master dimmer channel.
    pub fn has_master_dimmer(&self) -> bool {
        self.roles.master_dimmer().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{ChannelGroup, Physical, PrimaryColor};
    use crate::testutil::{cap, channel, moving_head_mode, primary, rgb_dimmer_mode};

    #[test]
    fn test_dmx_to_degrees_boundaries() {
        assert_eq!(dmx_to_degrees(0, 540.0), -270.0);
        assert_eq!(dmx_to_degrees(255, 540.0), 270.0);
        assert_eq!(dmx_to_degrees(0, 270.0), -135.0);
        assert_eq!(dmx_to_degrees(255, 270.0), 135.0);

        // Mid-scale sits just under center, 8 bits have no exact midpoint.
        let mid = dmx_to_degrees(127, 540.0);
        assert!(mid < 0.0 && mid > -2.0);
    }

    #[test]
    fn test_rgb_dimmer_scenario() {
        let mode = rgb_dimmer_mode();
        let mut decoder = HeadDecoder::new(&mode, &mode.heads[0], 0);

        let state = decoder.decode(&[255, 0, 0, 128]);
        assert_eq!(state.color, Color::new(255, 0, 0));
        assert_eq!(state.alpha, 128);
        assert!(!decoder.has_pan());
        assert!(!decoder.has_tilt());
    }

    #[test]
    fn test_base_address_offset() {
        let mode = rgb_dimmer_mode();
        let mut decoder = HeadDecoder::new(&mode, &mode.heads[0], 10);

        let mut ua = vec![0u8; 14];
        ua[10..14].copy_from_slice(&[0, 255, 0, 200]);
        let state = decoder.decode(&ua);
        assert_eq!(state.color, Color::new(0, 255, 0));
        assert_eq!(state.alpha, 200);
    }

    #[test]
    fn test_incomplete_universe_fails_safe() {
        let mode = rgb_dimmer_mode();
        let mut decoder = HeadDecoder::new(&mode, &mode.heads[0], 0);

        // Empty buffer with a master dimmer present must close, not open.
        assert_eq!(decoder.compute_alpha(&[]), 0);
        assert_eq!(decoder.compute_color(&[]), Color::new(0, 0, 0));
    }

    #[test]
    fn test_no_dimmer_defaults_open() {
        let mode = crate::fixture::FixtureMode {
            name: "RGB".into(),
            channels: vec![
                primary("Red", PrimaryColor::Red),
                primary("Green", PrimaryColor::Green),
                primary("Blue", PrimaryColor::Blue),
            ],
            physical: Physical::default(),
            heads: vec![crate::fixture::Head::new([0, 1, 2])],
        };
        let mut decoder = HeadDecoder::new(&mode, &mode.heads[0], 0);

        assert_eq!(decoder.compute_alpha(&[]), 255);
    }

    #[test]
    fn test_wheel_beats_rgb() {
        let red = Color::new(255, 0, 0);
        let mut wheel = channel("Colour", ChannelGroup::Colour);
        wheel.capabilities = vec![
            cap(0, 127, "Red", Some(red)),
            cap(128, 255, "Rotation", None),
        ];

        let mode = crate::fixture::FixtureMode {
            name: "Wheel+RGB".into(),
            channels: vec![
                primary("Red", PrimaryColor::Red),
                primary("Green", PrimaryColor::Green),
                primary("Blue", PrimaryColor::Blue),
                wheel,
            ],
            physical: Physical::default(),
            heads: vec![crate::fixture::Head::new([0, 1, 2, 3])],
        };
        let decoder = HeadDecoder::new(&mode, &mode.heads[0], 0);

        // Wheel maps to red while RGB is set to blue: wheel wins.
        assert_eq!(decoder.compute_color(&[0, 0, 255, 0]), red);

        // Wheel value in the colorless range: RGB wins.
        assert_eq!(decoder.compute_color(&[0, 0, 255, 200]), Color::new(0, 0, 255));
    }

    #[test]
    fn test_cmy_color() {
        let mode = crate::fixture::FixtureMode {
            name: "CMY".into(),
            channels: vec![
                primary("Cyan", PrimaryColor::Cyan),
                primary("Magenta", PrimaryColor::Magenta),
                primary("Yellow", PrimaryColor::Yellow),
            ],
            physical: Physical::default(),
            heads: vec![crate::fixture::Head::new([0, 1, 2])],
        };
        let decoder = HeadDecoder::new(&mode, &mode.heads[0], 0);

        assert_eq!(decoder.compute_color(&[255, 0, 0]), Color::new(0, 255, 255));
    }

    #[test]
    fn test_gel_color_and_white_fallback() {
        let mode = crate::fixture::FixtureMode {
            name: "Dimmer".into(),
            channels: vec![channel("Dimmer", ChannelGroup::Intensity)],
            physical: Physical::default(),
            heads: vec![crate::fixture::Head::new([0])],
        };
        let mut decoder = HeadDecoder::new(&mode, &mode.heads[0], 0);

        assert_eq!(decoder.compute_color(&[255]), Color::WHITE);

        let amber = Color::new(255, 191, 0);
        decoder.set_gel_color(Some(amber));
        assert_eq!(decoder.compute_color(&[255]), amber);
    }

    #[test]
    fn test_pan_tilt_angles() {
        let mode = moving_head_mode();
        let decoder = HeadDecoder::new(&mode, &mode.heads[0], 0);

        assert!(decoder.has_pan());
        assert!(decoder.has_tilt());
        assert_eq!(decoder.pan_degrees(&[0, 0, 0, 0]), -270.0);
        assert_eq!(decoder.pan_degrees(&[255, 0, 0, 0]), 270.0);
        assert_eq!(decoder.tilt_degrees(&[0, 0, 0, 0]), -135.0);
        assert_eq!(decoder.tilt_degrees(&[0, 255, 0, 0]), 135.0);

        // Missing data reads as value 0, which is center-low, not center.
        assert_eq!(decoder.pan_degrees(&[]), -270.0);
    }

    #[test]
    fn test_default_pan_tilt_range() {
        let mut mode = moving_head_mode();
        mode.physical = Physical::default();
        let decoder = HeadDecoder::new(&mode, &mode.heads[0], 0);

        assert_eq!(decoder.pan_degrees(&[255, 0, 0, 0]), 270.0);
        assert_eq!(decoder.tilt_degrees(&[0, 255, 0, 0]), 135.0);
    }
}
