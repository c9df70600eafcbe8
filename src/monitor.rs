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

use std::sync::Arc;

use tracing::debug;

use crate::color::Color;
use crate::fixture::{FixtureMode, Head};

pub mod head;
pub mod mailbox;
pub mod roles;

// Re-export the main types for convenience
pub use head::{dmx_to_degrees, DecodedHeadState, HeadDecoder, STROBE_PERIOD};
pub use mailbox::FrameMailbox;
pub use roles::{ChannelRoleCache, ShutterState};

/// Consumes decoded head states. One adapter interface serves every view:
/// the 2D canvas maps color/alpha to an ellipse brush, the 3D scene maps
/// them to mesh material and rotation transforms.
pub trait Renderer {
    /// Renders one head's state for the current frame.
    fn render_head(&mut self, fixture: &str, head: usize, state: &DecodedHeadState);
}

/// One patched fixture under the monitor: a mode instance at a base DMX
/// address, with one decoder per head.
pub struct MonitorFixture {
    name: String,
    heads: Vec<HeadDecoder>,
    states: Vec<Option<DecodedHeadState>>,
}

impl MonitorFixture {
    /// Creates a monitor fixture from its mode at the given base address.
    /// A mode defining no heads gets one implicit head over every channel.
    pub fn new(name: &str, mode: &FixtureMode, address: usize) -> MonitorFixture {
        let heads: Vec<HeadDecoder> = if mode.heads.is_empty() {
            debug!(
                fixture = name,
                "Mode defines no heads, using one over all channels"
            );
            let all = Head::new(0..mode.channels.len());
            vec![HeadDecoder::new(mode, &all, address)]
        } else {
            mode.heads
                .iter()
                .map(|head| HeadDecoder::new(mode, head, address))
                .collect()
        };

        let states = vec![None; heads.len()];
        MonitorFixture {
            name: name.to_string(),
            heads,
            states,
        }
    }

    /// Gets the fixture name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the number of heads.
    pub fn head_count(&self) -> usize {
        self.heads.len()
    }

    /// Sets the gel color on every head.
    pub fn set_gel_color(&mut self, color: Option<Color>) {
        for head in &mut self.heads {
            head.set_gel_color(color);
        }
    }

    /// Decodes all heads against the frame and hands each state to the
    /// renderer. Returns true if any head's state changed since the last
    /// frame, so callers can skip redraws.
    pub fn update(&mut self, ua: &[u8], renderer: &mut dyn Renderer) -> bool {
        let mut changed = false;
        for (i, decoder) in self.heads.iter_mut().enumerate() {
            let state = decoder.decode(ua);
            if self.states[i] != Some(state) {
                self.states[i] = Some(state);
                changed = true;
            }
            renderer.render_head(&self.name, i, &state);
        }
        changed
    }
}

/// The monitor: all patched fixtures plus the frame mailbox the output path
/// publishes into. One decode pipeline serves every UI variant.
pub struct Monitor {
    fixtures: Vec<MonitorFixture>,
    mailbox: Arc<FrameMailbox>,
    scratch: Vec<u8>,
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Monitor {
    pub fn new() -> Monitor {
        Monitor {
            fixtures: Vec::new(),
            mailbox: Arc::new(FrameMailbox::new()),
            scratch: Vec::new(),
        }
    }

    /// The mailbox frame producers publish into. The producer side holds its
    /// own clone of the Arc; the monitor drains it on [`Monitor::tick`].
    pub fn mailbox(&self) -> Arc<FrameMailbox> {
        self.mailbox.clone()
    }

    /// Adds a patched fixture.
    pub fn add_fixture(&mut self, fixture: MonitorFixture) {
        self.fixtures.push(fixture);
    }

    /// Gets the patched fixtures.
    pub fn fixtures(&self) -> &[MonitorFixture] {
        &self.fixtures
    }

    /// Gets a patched fixture by name.
    pub fn fixture_mut(&mut self, name: &str) -> Option<&mut MonitorFixture> {
        self.fixtures.iter_mut().find(|f| f.name == name)
    }

    /// Runs one monitor tick: takes the latest frame from the mailbox, if
    /// any, and updates every fixture. Returns true if a frame was decoded
    /// and at least one head's state changed.
    pub fn tick(&mut self, renderer: &mut dyn Renderer) -> bool {
        let mut frame = std::mem::take(&mut self.scratch);
        if !self.mailbox.take(&mut frame) {
            self.scratch = frame;
            return false;
        }

        let mut changed = false;
        for fixture in &mut self.fixtures {
            changed |= fixture.update(&frame, renderer);
        }

        self.scratch = frame;
        changed
    }
}
