// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::graph::Point;
use crate::model::ConceptId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
}

impl MouseButton {
    /// DOM `MouseEvent.button` numbering.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }

    fn slot(self) -> usize {
        match self {
            Self::Primary => 0,
            Self::Middle => 1,
            Self::Secondary => 2,
        }
    }
}

/// Accumulates node drags between primary-button down and up.
///
/// Positions reported while the primary button is up are ignored. Last write wins per node.
#[derive(Debug, Clone, Default)]
pub struct MoveBuffer {
    pressed: [bool; 3],
    moves: BTreeMap<ConceptId, Point>,
}

impl MoveBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_down(&mut self, button: MouseButton) {
        self.pressed[button.slot()] = true;
    }

    /// Releases the button and hands back everything buffered so far.
    pub fn pointer_up(&mut self, button: MouseButton) -> Vec<(ConceptId, Point)> {
        self.pressed[button.slot()] = false;
        self.flush()
    }

    /// Releases the button without handing back the buffer.
    pub fn release(&mut self, button: MouseButton) {
        self.pressed[button.slot()] = false;
    }

    /// Returns `true` if the position was buffered.
    pub fn position_changed(&mut self, node: ConceptId, position: Point) -> bool {
        if !self.is_dragging() {
            return false;
        }
        self.moves.insert(node, position);
        true
    }

    pub fn is_dragging(&self) -> bool {
        self.pressed[MouseButton::Primary.slot()]
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Empties the buffer in node-id order. Button state is left alone.
    pub fn flush(&mut self) -> Vec<(ConceptId, Point)> {
        std::mem::take(&mut self.moves).into_iter().collect()
    }

    /// Forgets buttons and buffered moves; used when the connection or view goes away.
    pub fn reset(&mut self) -> Vec<(ConceptId, Point)> {
        self.pressed = [false; 3];
        self.flush()
    }
}
