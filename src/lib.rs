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

//! The DMX monitor decode kernel: classifies fixture channels into semantic
//! roles once per head, then decodes raw universe buffers into per-head
//! visual state (color, alpha, pan/tilt) every output frame. Renderers
//! consume the decoded state through the [`monitor::Renderer`] trait.

pub mod color;
pub mod config;
pub mod fixture;
pub mod monitor;

#[cfg(test)]
pub(crate) mod testutil;
