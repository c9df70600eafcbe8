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

use serde::Deserialize;

use crate::color::Color;

/// The functional group a DMX channel belongs to.
///
/// Only intensity, colour wheel, pan, tilt and shutter channels take part in
/// monitor role classification; the remaining groups are carried so fixture
/// definitions round-trip but are ignored by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelGroup {
    Intensity,
    Colour,
    Pan,
    Tilt,
    Shutter,
    Gobo,
    Speed,
    Prism,
    Beam,
    Effect,
    Maintenance,
    Nothing,
}

/// The primary color an intensity channel drives, if any. An intensity
/// channel with no primary color is a master dimmer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryColor {
    Red,
    Green,
    Blue,
    Cyan,
    Magenta,
    Yellow,
    White,
    Amber,
}

/// Which byte of a 16-bit channel pair this channel carries. Fine (LSB)
/// channels are excluded from role classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlByte {
    #[default]
    Msb,
    Lsb,
}

/// A capability covers a contiguous DMX value sub-range of a channel and
/// optionally names it and/or assigns it a display color.
#[derive(Debug, Clone, PartialEq)]
pub struct Capability {
    /// Lowest DMX value covered, inclusive.
    pub min: u8,

    /// Highest DMX value covered, inclusive.
    pub max: u8,

    /// Descriptive name, e.g. "Strobe (slow)". Matched by substring when
    /// classifying shutter behavior.
    pub name: String,

    /// The color this value range selects on a color wheel, if any.
    pub resource_color: Option<Color>,
}

impl Capability {
    /// Whether this capability covers the given DMX value.
    pub fn covers(&self, value: u8) -> bool {
        self.min <= value && value <= self.max
    }
}

/// One channel of a fixture mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    /// The name of the channel.
    pub name: String,

    /// The functional group.
    pub group: ChannelGroup,

    /// The primary color, for intensity channels that drive one.
    pub colour: Option<PrimaryColor>,

    /// Coarse or fine byte of a 16-bit pair.
    pub control_byte: ControlByte,

    /// Capability ranges, in definition order.
    pub capabilities: Vec<Capability>,
}

impl Channel {
    /// Finds the capability covering the given DMX value.
    pub fn search_capability(&self, value: u8) -> Option<&Capability> {
        self.capabilities.iter().find(|cap| cap.covers(value))
    }
}
