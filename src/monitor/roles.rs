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

use std::collections::HashMap;

use tracing::warn;

use crate::color::Color;
use crate::fixture::{ChannelGroup, ControlByte, FixtureMode, Head, PrimaryColor};

/// What a shutter channel value does to light output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShutterState {
    /// Light passes through.
    #[default]
    Open,
    /// Light is blocked.
    Closed,
    /// Light blinks at the strobe cadence.
    Strobe,
}

/// Classifies each shutter capability by name. The Closed keywords are
/// checked first, so "Strobe off" counts as Closed.
fn shutter_state_for(name: &str) -> ShutterState {
    let name = name.to_lowercase();
    if name.contains("close") || name.contains("blackout") || name.contains("off") {
        ShutterState::Closed
    } else if name.contains("strob") || name.contains("pulse") {
        ShutterState::Strobe
    } else {
        ShutterState::Open
    }
}

/// The semantic roles of one head's channels, computed once from the fixture
/// mode and immutable afterwards. Indices are mode-local; the decoder applies
/// the fixture's base DMX address when reading universe buffers.
#[derive(Debug, Clone, Default)]
pub struct ChannelRoleCache {
    cached: bool,
    pan: Option<usize>,
    tilt: Option<usize>,
    master_dimmer: Option<usize>,
    primaries: HashMap<PrimaryColor, usize>,
    color_wheels: Vec<usize>,
    shutter_channels: Vec<usize>,
    wheel_colors: HashMap<usize, Box<[Option<Color>; 256]>>,
    shutter_states: HashMap<usize, Box<[ShutterState; 256]>>,
}

impl ChannelRoleCache {
    /// Classifies the head's channels against the owning mode. Runs at most
    /// once per cache instance; repeat calls are no-ops.
    ///
    /// Fixture definition data is untrusted: out-of-range channel indices are
    /// logged and skipped, never fatal.
    pub fn cache_channels(&mut self, mode: &FixtureMode, head: &Head) {
        if self.cached {
            return;
        }

        self.pan = None;
        self.tilt = None;
        self.master_dimmer = None;
        self.primaries.clear();
        self.color_wheels.clear();
        self.shutter_channels.clear();

        for &i in head.channels() {
            let Some(ch) = mode.channel(i) else {
                warn!(
                    channel = i,
                    mode = mode.name.as_str(),
                    "Head contains undefined channel"
                );
                continue;
            };

            // Only the coarse byte of a 16-bit pair carries a role.
            if ch.control_byte == ControlByte::Lsb {
                continue;
            }

            match ch.group {
                ChannelGroup::Pan => self.pan = Some(i),
                ChannelGroup::Tilt => self.tilt = Some(i),
                ChannelGroup::Intensity => match ch.colour {
                    None => self.master_dimmer = Some(i),
                    Some(colour) => {
                        self.primaries.insert(colour, i);
                    }
                },
                ChannelGroup::Colour => self.color_wheels.push(i),
                ChannelGroup::Shutter => self.shutter_channels.push(i),
                _ => {}
            }
        }

        // A head without its own pan/tilt adopts the mode-level channels.
        if self.pan.is_none() {
            self.pan = mode.channel_number(ChannelGroup::Pan);
        }
        if self.tilt.is_none() {
            self.tilt = mode.channel_number(ChannelGroup::Tilt);
        }

        // Deterministic iteration order for the priority chains downstream.
        self.color_wheels.sort_unstable();
        self.shutter_channels.sort_unstable();

        self.build_wheel_tables(mode);
        self.build_shutter_tables(mode);

        self.cached = true;
    }

    /// Builds the DMX value to color table for each wheel channel. A wheel
    /// whose capabilities yield no color anywhere is inert and dropped.
    fn build_wheel_tables(&mut self, mode: &FixtureMode) {
        let mut tables = HashMap::new();

        self.color_wheels.retain(|&wheel| {
            let Some(ch) = mode.channel(wheel) else {
                return false;
            };

            let mut values = Box::new([None; 256]);
            let mut contains_color = false;
            for value in 0..=255u8 {
                if let Some(color) = ch
                    .search_capability(value)
                    .and_then(|cap| cap.resource_color)
                {
                    values[usize::from(value)] = Some(color);
                    contains_color = true;
                }
            }

            if contains_color {
                tables.insert(wheel, values);
            }
            contains_color
        });

        self.wheel_colors = tables;
    }

    /// Builds the DMX value to shutter state table for each shutter channel.
    /// A channel that never closes or strobes has no operational effect and
    /// is dropped.
    fn build_shutter_tables(&mut self, mode: &FixtureMode) {
        let mut tables = HashMap::new();

        self.shutter_channels.retain(|&shutter| {
            let Some(ch) = mode.channel(shutter) else {
                return false;
            };

            let mut values = Box::new([ShutterState::Open; 256]);
            let mut contains_shutter = false;
            for value in 0..=255u8 {
                if let Some(cap) = ch.search_capability(value) {
                    let state = shutter_state_for(&cap.name);
                    if state != ShutterState::Open {
                        contains_shutter = true;
                    }
                    values[usize::from(value)] = state;
                }
            }

            if contains_shutter {
                // A channel with a single whole-range capability has no real
                // off state; keep value 0 Open so it doesn't blink at DMX 0.
                if ch.capabilities.len() <= 1 {
                    values[0] = ShutterState::Open;
                }
                tables.insert(shutter, values);
            }
            contains_shutter
        });

        self.shutter_states = tables;
    }

    /// Whether classification already ran.
    pub fn is_cached(&self) -> bool {
        self.cached
    }

    /// The pan channel index, if the head (or mode) has one.
    pub fn pan(&self) -> Option<usize> {
        self.pan
    }

    /// The tilt channel index, if the head (or mode) has one.
    pub fn tilt(&self) -> Option<usize> {
        self.tilt
    }

    /// The master dimmer channel index, if the head has one.
    pub fn master_dimmer(&self) -> Option<usize> {
        self.master_dimmer
    }

    /// The intensity channel driving the given primary color, if present.
    pub fn primary(&self, colour: PrimaryColor) -> Option<usize> {
        self.primaries.get(&colour).copied()
    }

    /// The [red, green, blue] channel indices. Partial primary sets are not
    /// usable as RGB, so this is all-or-nothing.
    pub fn rgb_channels(&self) -> Option<[usize; 3]> {
        Some([
            self.primary(PrimaryColor::Red)?,
            self.primary(PrimaryColor::Green)?,
            self.primary(PrimaryColor::Blue)?,
        ])
    }

    /// The [cyan, magenta, yellow] channel indices, all-or-nothing.
    pub fn cmy_channels(&self) -> Option<[usize; 3]> {
        Some([
            self.primary(PrimaryColor::Cyan)?,
            self.primary(PrimaryColor::Magenta)?,
            self.primary(PrimaryColor::Yellow)?,
        ])
    }

    /// Color wheel channel indices, ascending.
    pub fn color_wheels(&self) -> &[usize] {
        &self.color_wheels
    }

    /// Shutter channel indices, ascending.
    pub fn shutter_channels(&self) -> &[usize] {
        &self.shutter_channels
    }

    /// Looks up the wheel color selected by the given DMX value.
    pub fn wheel_color(&self, wheel: usize, value: u8) -> Option<Color> {
        self.wheel_colors
            .get(&wheel)
            .and_then(|table| table[usize::from(value)])
    }

    /// Looks up the shutter state selected by the given DMX value.
    pub fn shutter_state(&self, shutter: usize, value: u8) -> ShutterState {
        self.shutter_states
            .get(&shutter)
            .map(|table| table[usize::from(value)])
            .unwrap_or_default()
    }
}
