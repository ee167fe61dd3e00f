// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Client-side state kept in step with the server: navigator tree, diagram graphs, selection and
//! toolbar.

pub mod diagram;
pub mod selection;
pub mod toolbar;
pub mod tree;

pub use diagram::{
    cell_context_menu, CellMenuItem, DiagramGraph, DiagramLink, DiagramNode, DiagramReconciler,
    DiagramView, DrainReport, DrawingElement, LinkPayload, MouseButton, MoveBuffer, NodePayload,
    PayloadError, PendingLinks, Point, Size, UpsertOutcome, Upserted,
};
pub use selection::{render_properties, PropertyField, PropertyForm, PropertyRow, Selection};
pub use toolbar::{CursorHint, Tool, Toolbar};
pub use tree::{
    tree_context_menu, NavigatorTree, NodeClass, TreeMenuItem, TreeNodeAttrs, TreeOutcome,
};
