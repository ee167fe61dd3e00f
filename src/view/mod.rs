// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The seam to the widgets the client drives but does not own.
//!
//! The tree widget, the drawing surface, the property panel, tabs, toolbar and alert dialog all
//! receive typed [`ViewChange`] values. The reconcilers keep their own mirrors, so a view is
//! write-only from the client's point of view.

mod recording;

pub use recording::RecordingView;

use crate::model::{
    ContainerId, DiagramViewIds, DrawingElementId, GraphId, TabId, TreeNodeId, TreeParent,
};
use crate::reconcile::{CursorHint, DiagramLink, DiagramNode, PropertyForm, Tool, TreeNodeAttrs};

#[derive(Debug, Clone, PartialEq)]
pub enum TreeChange {
    Insert {
        node: TreeNodeId,
        parent: TreeParent,
        index: usize,
        attrs: TreeNodeAttrs,
    },
    Update {
        node: TreeNodeId,
        attrs: TreeNodeAttrs,
    },
    Move {
        node: TreeNodeId,
        parent: TreeParent,
        index: usize,
    },
    /// Removes the node and everything below it.
    Remove {
        node: TreeNodeId,
    },
    Clear,
    Select {
        node: TreeNodeId,
        suppress_event: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceChange {
    CreateContainer {
        ids: DiagramViewIds,
        label: String,
    },
    ShowContainer {
        container: ContainerId,
        tab: TabId,
    },
    /// Hidden containers keep their graph; only the tab is de-emphasized.
    HideContainer {
        container: ContainerId,
        tab: TabId,
    },
    DestroyContainer {
        ids: DiagramViewIds,
    },
    RenameTab {
        tab: TabId,
        label: String,
    },
    AddNode {
        graph: GraphId,
        node: DiagramNode,
    },
    UpdateNode {
        graph: GraphId,
        node: DiagramNode,
    },
    AddLink {
        graph: GraphId,
        link: DiagramLink,
    },
    RepointLink {
        graph: GraphId,
        link: DrawingElementId,
        source: DrawingElementId,
        target: DrawingElementId,
    },
    SetLinkLabel {
        graph: GraphId,
        link: DrawingElementId,
        label: String,
    },
    RemoveElement {
        graph: GraphId,
        element: DrawingElementId,
    },
    /// Drops the link the user is dragging; it never got a server identity.
    DiscardTransientLink {
        graph: GraphId,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewChange {
    Tree(TreeChange),
    Surface(SurfaceChange),
    Properties(PropertyForm),
    ClearProperties,
    Toolbar { active: Tool, cursor: CursorHint },
    Alert(String),
    WorkspacePath(String),
    DisplayGraph(String),
    AvailableGraphs(usize),
    Reload,
}

/// Sink for everything the client wants the widgets to show.
pub trait View {
    fn apply(&mut self, change: ViewChange);

    fn tree(&mut self, change: TreeChange) {
        self.apply(ViewChange::Tree(change));
    }

    fn surface(&mut self, change: SurfaceChange) {
        self.apply(ViewChange::Surface(change));
    }
}

impl<T: View + ?Sized> View for &mut T {
    fn apply(&mut self, change: ViewChange) {
        (**self).apply(change);
    }
}

/// Headless view used by the binary: every change becomes a log line.
#[derive(Debug, Default)]
pub struct TracingView {
    changes: u64,
}

impl TracingView {
    pub fn changes(&self) -> u64 {
        self.changes
    }
}

impl View for TracingView {
    fn apply(&mut self, change: ViewChange) {
        self.changes += 1;
        match &change {
            ViewChange::Alert(message) => tracing::warn!(%message, "alert"),
            ViewChange::WorkspacePath(path) => tracing::info!(%path, "workspace"),
            ViewChange::Reload => tracing::info!("view reload requested"),
            ViewChange::Tree(change) => tracing::debug!(?change, "tree"),
            ViewChange::Surface(change) => tracing::debug!(?change, "surface"),
            other => tracing::debug!(change = ?other, "view"),
        }
    }
}
