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

use parking_lot::Mutex;

/// Single-slot hand-off for universe frames between the producing I/O thread
/// and the decode/render thread.
///
/// The producer is never blocked on rendering and the consumer never sees a
/// partially written buffer. Intermediate frames are dropped; only the latest
/// frame is ever decoded. No ordering guarantee is made across dropped
/// frames.
#[derive(Debug, Default)]
pub struct FrameMailbox {
    slot: Mutex<Slot>,
}

#[derive(Debug, Default)]
struct Slot {
    frame: Vec<u8>,
    changed: bool,
}

impl FrameMailbox {
    pub fn new() -> FrameMailbox {
        FrameMailbox::default()
    }

    /// Publishes a frame, replacing any frame not yet consumed.
    pub fn publish(&self, frame: Vec<u8>) {
        let mut slot = self.slot.lock();
        slot.frame = frame;
        slot.changed = true;
    }

    /// Takes the latest frame if one arrived since the last take, swapping it
    /// into `out`. Returns false and leaves `out` untouched otherwise.
    pub fn take(&self, out: &mut Vec<u8>) -> bool {
        let mut slot = self.slot.lock();
        if !slot.changed {
            return false;
        }
        std::mem::swap(&mut slot.frame, out);
        slot.changed = false;
        true
    }
}
