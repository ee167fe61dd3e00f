// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core identifiers and concept classification.
//!
//! The server owns the concept model; the client only needs stable ids, the id mapping used by
//! its widgets, and the closed set of concept/link kinds that gate editing.

pub mod concept;
pub mod ids;
pub mod view_ids;

pub use concept::{ConceptType, LinkKind, Represents, UnknownWireValue};
pub use ids::{ConceptId, DiagramId, Id, IdError};
pub use view_ids::{
    ContainerId, DiagramViewIds, DrawingElementId, GraphId, TabId, TreeNodeId, TreeParent,
    ViewportId,
};
