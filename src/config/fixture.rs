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
use crate::fixture::{
    Capability, Channel, ChannelGroup, ControlByte, FixtureMode, Head, Physical, PrimaryColor,
};

use super::error::ConfigError;

/// A YAML representation of a fixture mode.
#[derive(Deserialize, Clone)]
pub struct FixtureDef {
    /// The name of the mode.
    name: String,

    /// The channels, in DMX order.
    channels: Vec<ChannelDef>,

    /// Physical limits.
    #[serde(default)]
    physical: PhysicalDef,

    /// The heads. May be empty for single-head fixtures.
    #[serde(default)]
    heads: Vec<HeadDef>,
}

/// A YAML representation of one channel.
#[derive(Deserialize, Clone)]
struct ChannelDef {
    name: String,

    group: ChannelGroup,

    #[serde(default)]
    colour: Option<PrimaryColor>,

    #[serde(default)]
    control_byte: ControlByte,

    #[serde(default)]
    capabilities: Vec<CapabilityDef>,
}

/// A YAML representation of one capability range.
#[derive(Deserialize, Clone)]
struct CapabilityDef {
    min: u8,

    max: u8,

    #[serde(default)]
    name: String,

    /// Display color as `#rrggbb`.
    #[serde(default)]
    color: Option<String>,
}

/// A YAML representation of the physical limits.
#[derive(Deserialize, Clone, Default)]
struct PhysicalDef {
    pan_max: Option<f64>,

    tilt_max: Option<f64>,
}

/// A YAML representation of one head.
#[derive(Deserialize, Clone)]
struct HeadDef {
    channels: Vec<usize>,
}

impl FixtureDef {
    /// Gets the mode name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Converts the definition into the domain model, validating capability
    /// ranges and colors.
    pub fn to_mode(&self) -> Result<FixtureMode, ConfigError> {
        let channels = self
            .channels
            .iter()
            .map(|ch| ch.to_channel())
            .collect::<Result<Vec<Channel>, ConfigError>>()?;

        Ok(FixtureMode {
            name: self.name.clone(),
            channels,
            physical: Physical {
                // A declared maximum of zero means "not specified".
                pan_max_degrees: self.physical.pan_max.filter(|max| *max > 0.0),
                tilt_max_degrees: self.physical.tilt_max.filter(|max| *max > 0.0),
            },
            heads: self
                .heads
                .iter()
                .map(|head| Head::new(head.channels.iter().copied()))
                .collect(),
        })
    }
}

impl ChannelDef {
    fn to_channel(&self) -> Result<Channel, ConfigError> {
        let capabilities = self
            .capabilities
            .iter()
            .map(|cap| cap.to_capability(&self.name))
            .collect::<Result<Vec<Capability>, ConfigError>>()?;

        Ok(Channel {
            name: self.name.clone(),
            group: self.group,
            colour: self.colour,
            control_byte: self.control_byte,
            capabilities,
        })
    }
}

impl CapabilityDef {
    fn to_capability(&self, channel: &str) -> Result<Capability, ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvalidCapability {
                channel: channel.to_string(),
                min: self.min,
                max: self.max,
            });
        }

        let resource_color = match &self.color {
            Some(color) => Some(Color::from_hex(color).ok_or_else(|| {
                ConfigError::InvalidColor {
                    color: color.clone(),
                    context: format!("channel {:?}", channel),
                }
            })?),
            None => None,
        };

        Ok(Capability {
            min: self.min,
            max: self.max,
            name: self.name.clone(),
            resource_color,
        })
    }
}
