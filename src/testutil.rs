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

//! Fixture definition builders shared by the test modules.

use crate::color::Color;
use crate::fixture::{
    Capability, Channel, ChannelGroup, ControlByte, FixtureMode, Head, Physical, PrimaryColor,
};

/// Creates a channel with no capabilities.
pub(crate) fn channel(name: &str, group: ChannelGroup) -> Channel {
    Channel {
        name: name.to_string(),
        group,
        colour: None,
        control_byte: ControlByte::Msb,
        capabilities: vec![],
    }
}

/// Creates an intensity channel driving the given primary color.
pub(crate) fn primary(name: &str, colour: PrimaryColor) -> Channel {
    Channel {
        colour: Some(colour),
        ..channel(name, ChannelGroup::Intensity)
    }
}

/// Creates a capability range.
pub(crate) fn cap(min: u8, max: u8, name: &str, resource_color: Option<Color>) -> Capability {
    Capability {
        min,
        max,
        name: name.to_string(),
        resource_color,
    }
}

/// A mode with channels [Red, Green, Blue, Dimmer] and one head over all of
/// them.
pub(crate) fn rgb_dimmer_mode() -> FixtureMode {
    FixtureMode {
        name: "RGB Dimmer".into(),
        channels: vec![
            primary("Red", PrimaryColor::Red),
            primary("Green", PrimaryColor::Green),
            primary("Blue", PrimaryColor::Blue),
            channel("Dimmer", ChannelGroup::Intensity),
        ],
        physical: Physical::default(),
        heads: vec![Head::new([0, 1, 2, 3])],
    }
}

/// A moving head mode with [Pan, Tilt, Dimmer, Shutter] where the shutter has
/// an open range and a strobe range, plus declared physical limits.
pub(crate) fn moving_head_mode() -> FixtureMode {
    let mut shutter = channel("Shutter", ChannelGroup::Shutter);
    shutter.capabilities = vec![
        cap(0, 127, "Open", None),
        cap(128, 255, "Strobe (slow)", None),
    ];

    FixtureMode {
        name: "Moving Head".into(),
        channels: vec![
            channel("Pan", ChannelGroup::Pan),
            channel("Tilt", ChannelGroup::Tilt),
            channel("Dimmer", ChannelGroup::Intensity),
            shutter,
        ],
        physical: Physical {
            pan_max_degrees: Some(540.0),
            tilt_max_degrees: Some(270.0),
        },
        heads: vec![Head::new([0, 1, 2, 3])],
    }
}
