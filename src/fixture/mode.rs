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

use super::channel::{Channel, ChannelGroup, ControlByte};

/// One independently controllable optical unit of a fixture. Heads reference
/// a subset of the owning mode's channels by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Head {
    channels: Vec<usize>,
}

impl Head {
    /// Creates a head from a channel index list. Duplicate indices in the
    /// definition are dropped.
    pub fn new(channels: impl IntoIterator<Item = usize>) -> Head {
        let mut head = Head::default();
        for channel in channels {
            head.add_channel(channel);
        }
        head
    }

    /// Adds a channel index to this head unless already present.
    pub fn add_channel(&mut self, channel: usize) {
        if !self.channels.contains(&channel) {
            self.channels.push(channel);
        }
    }

    /// Gets the channel indices, in definition order.
    pub fn channels(&self) -> &[usize] {
        &self.channels
    }
}

/// Physical limits from the fixture definition. Pan/tilt maximums of zero in
/// source files are normalized to `None` by the config layer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Physical {
    /// Maximum pan travel in degrees, if the fixture declares one.
    pub pan_max_degrees: Option<f64>,

    /// Maximum tilt travel in degrees, if the fixture declares one.
    pub tilt_max_degrees: Option<f64>,
}

/// A fixture mode: an ordered channel list plus head and physical data.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureMode {
    /// The name of the mode.
    pub name: String,

    /// All channels of the mode, in DMX order.
    pub channels: Vec<Channel>,

    /// Physical limits.
    pub physical: Physical,

    /// The heads of the mode. A mode without explicit heads is treated as a
    /// single head spanning every channel.
    pub heads: Vec<Head>,
}

impl FixtureMode {
    /// Gets the channel at the given mode-local index.
    pub fn channel(&self, index: usize) -> Option<&Channel> {
        self.channels.get(index)
    }

    /// Finds the first coarse channel of the given group, used as the
    /// mode-level pan/tilt fallback for heads that define neither.
    pub fn channel_number(&self, group: ChannelGroup) -> Option<usize> {
        self.channels
            .iter()
            .position(|ch| ch.group == group && ch.control_byte == ControlByte::Msb)
    }
}
