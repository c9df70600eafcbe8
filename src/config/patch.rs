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

use serde::Deserialize;
use tracing::warn;

use crate::color::Color;
use crate::fixture::FixtureMode;
use crate::monitor::{Monitor, MonitorFixture};

use super::error::ConfigError;

/// A YAML representation of the monitor patch: which fixtures exist, which
/// mode each uses and where it sits in the universe.
#[derive(Deserialize, Clone)]
pub struct PatchDef {
    fixtures: Vec<PatchEntryDef>,
}

/// One patched fixture.
#[derive(Deserialize, Clone)]
struct PatchEntryDef {
    /// The fixture name, unique within the patch.
    name: String,

    /// The fixture mode name, resolved against the loaded mode library.
    mode: String,

    /// Base DMX address, 0-based.
    address: usize,

    /// Optional gel color as `#rrggbb`, for color-less dimmer fixtures.
    #[serde(default)]
    gel_color: Option<String>,
}

impl PatchDef {
    /// Builds a monitor from the patch, resolving each entry against the
    /// loaded fixture modes.
    pub fn to_monitor(&self, modes: &HashMap<String, FixtureMode>) -> Result<Monitor, ConfigError> {
        let mut monitor = Monitor::new();

        for entry in &self.fixtures {
            let mode = modes
                .get(&entry.mode)
                .ok_or_else(|| ConfigError::UnknownMode(entry.mode.clone()))?;

            if entry.address >= 512 {
                warn!(
                    fixture = entry.name.as_str(),
                    address = entry.address,
                    "Fixture address is outside the universe"
                );
            }

            let mut fixture = MonitorFixture::new(&entry.name, mode, entry.address);
            if let Some(gel) = &entry.gel_color {
                let color =
                    Color::from_hex(gel).ok_or_else(|| ConfigError::InvalidColor {
                        color: gel.clone(),
                        context: format!("fixture {:?}", entry.name),
                    })?;
                fixture.set_gel_color(Some(color));
            }
            monitor.add_fixture(fixture);
        }

        Ok(monitor)
    }
}
