// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::graph::LinkPayload;
use crate::model::{DiagramId, DrawingElementId};

/// Outcome of draining the pending set to its fixed point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Passes run, including the final one that made no progress.
    pub passes: usize,
    pub materialized: usize,
    pub still_pending: usize,
}

/// Link payloads waiting for an endpoint, keyed by link id.
///
/// Iteration order is the key order, so drains are deterministic.
#[derive(Debug, Clone, Default)]
pub struct PendingLinks {
    entries: BTreeMap<DrawingElementId, LinkPayload>,
}

impl PendingLinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &DrawingElementId) -> bool {
        self.entries.contains_key(id)
    }

    /// Stores or replaces the payload; the latest notification for a link wins.
    pub fn insert(&mut self, payload: LinkPayload) {
        self.entries.insert(payload.element_id(), payload);
    }

    pub fn remove(&mut self, id: &DrawingElementId) -> Option<LinkPayload> {
        self.entries.remove(id)
    }

    /// Drops every entry that belongs to `diagram`. Returns how many were dropped.
    pub fn forget_diagram(&mut self, diagram: &DiagramId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, payload| &payload.diagram_id != diagram);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Repeats full passes over the set until one pass materializes nothing.
    ///
    /// `materialize` returns `true` when the link now exists in its graph; the entry is then
    /// removed immediately, so later entries in the same pass already see it.
    pub fn drain<F>(&mut self, mut materialize: F) -> DrainReport
    where
        F: FnMut(&LinkPayload) -> bool,
    {
        let mut report = DrainReport::default();

        while !self.entries.is_empty() {
            report.passes += 1;
            let mut progressed = false;

            let keys: Vec<DrawingElementId> = self.entries.keys().cloned().collect();
            for key in keys {
                let resolved = match self.entries.get(&key) {
                    Some(payload) => materialize(payload),
                    None => false,
                };
                if resolved {
                    self.entries.remove(&key);
                    report.materialized += 1;
                    progressed = true;
                }
            }

            if !progressed {
                break;
            }
        }

        report.still_pending = self.entries.len();
        report
    }
}
