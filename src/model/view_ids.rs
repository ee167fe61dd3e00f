// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Identifier mapping between server concept ids and the ids used by view widgets.
//!
//! Every view id is the concept id with a fixed prefix. Each type below is built from a
//! [`ConceptId`] and can always hand it back, so the mapping is invertible by construction;
//! `parse` is the only way to get one from a raw widget string.

use std::fmt;

use super::ids::ConceptId;

macro_rules! view_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name {
            concept_id: ConceptId,
        }

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            pub fn from_concept(concept_id: &ConceptId) -> Self {
                Self { concept_id: concept_id.clone() }
            }

            /// Strips the prefix from a raw widget id. Returns `None` for foreign ids.
            pub fn parse(raw: &str) -> Option<Self> {
                let concept = raw.strip_prefix(Self::PREFIX)?;
                ConceptId::from_wire(concept).map(|concept_id| Self { concept_id })
            }

            pub fn concept_id(&self) -> &ConceptId {
                &self.concept_id
            }

            pub fn to_raw(&self) -> String {
                format!("{}{}", Self::PREFIX, self.concept_id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(Self::PREFIX)?;
                f.write_str(self.concept_id.as_str())
            }
        }
    };
}

view_id!(
    /// Navigator tree node id.
    TreeNodeId,
    "TreeNode"
);
view_id!(
    /// Node or link on a diagram canvas.
    DrawingElementId,
    "JointElement"
);
view_id!(
    /// Per-diagram container that hosts the canvas.
    ContainerId,
    "DiagramContainer"
);
view_id!(GraphId, "JointGraph");
view_id!(ViewportId, "JointPaper");
view_id!(TabId, "DiagramTab");

/// Parent slot of a tree node: either the invisible root or another node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TreeParent {
    Root,
    Node(TreeNodeId),
}

impl TreeParent {
    pub const ROOT_SENTINEL: &'static str = "#";

    pub fn from_owner(owner: Option<&ConceptId>) -> Self {
        match owner {
            Some(owner) => Self::Node(TreeNodeId::from_concept(owner)),
            None => Self::Root,
        }
    }

    pub fn owner(&self) -> Option<&ConceptId> {
        match self {
            Self::Root => None,
            Self::Node(node) => Some(node.concept_id()),
        }
    }
}

impl fmt::Display for TreeParent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str(Self::ROOT_SENTINEL),
            Self::Node(node) => node.fmt(f),
        }
    }
}

/// All widget ids that belong to one open diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramViewIds {
    pub container: ContainerId,
    pub graph: GraphId,
    pub viewport: ViewportId,
    pub tab: TabId,
}

impl DiagramViewIds {
    pub fn for_diagram(diagram_id: &ConceptId) -> Self {
        Self {
            container: ContainerId::from_concept(diagram_id),
            graph: GraphId::from_concept(diagram_id),
            viewport: ViewportId::from_concept(diagram_id),
            tab: TabId::from_concept(diagram_id),
        }
    }
}
