// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{SurfaceChange, TreeChange, View, ViewChange};
use crate::reconcile::PropertyForm;

/// Keeps every change in order. Meant for tests and for replaying a session offline.
#[derive(Debug, Default, Clone)]
pub struct RecordingView {
    changes: Vec<ViewChange>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn changes(&self) -> &[ViewChange] {
        &self.changes
    }

    pub fn take(&mut self) -> Vec<ViewChange> {
        std::mem::take(&mut self.changes)
    }

    pub fn clear(&mut self) {
        self.changes.clear();
    }

    pub fn tree_changes(&self) -> impl Iterator<Item = &TreeChange> {
        self.changes.iter().filter_map(|change| match change {
            ViewChange::Tree(change) => Some(change),
            _ => None,
        })
    }

    pub fn surface_changes(&self) -> impl Iterator<Item = &SurfaceChange> {
        self.changes.iter().filter_map(|change| match change {
            ViewChange::Surface(change) => Some(change),
            _ => None,
        })
    }

    pub fn last_properties(&self) -> Option<&PropertyForm> {
        self.changes.iter().rev().find_map(|change| match change {
            ViewChange::Properties(form) => Some(form),
            _ => None,
        })
    }

    pub fn alerts(&self) -> Vec<&str> {
        self.changes
            .iter()
            .filter_map(|change| match change {
                ViewChange::Alert(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl View for RecordingView {
    fn apply(&mut self, change: ViewChange) {
        self.changes.push(change);
    }
}
