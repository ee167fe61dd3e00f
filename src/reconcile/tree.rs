// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mirror of the navigator tree.
//!
//! Children are ordered by label, ties broken by concept id. A node whose owner is not known yet
//! is kept but not shown; it is inserted into the widget as soon as its parent chain reaches the
//! root.

use std::collections::{BTreeMap, BTreeSet};

use smallvec::SmallVec;

use crate::model::{ConceptId, TreeNodeId, TreeParent};
use crate::protocol::{Action, Notification};
use crate::view::{TreeChange, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    Normal,
    ReadOnly,
}

impl NodeClass {
    pub fn for_flags(is_core: bool, read_only: bool) -> Self {
        if is_core || read_only {
            Self::ReadOnly
        } else {
            Self::Normal
        }
    }

    pub fn css(self) -> &'static str {
        match self {
            Self::Normal => "node",
            Self::ReadOnly => "node-read-only",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNodeAttrs {
    pub label: String,
    pub icon: String,
    pub class: NodeClass,
    pub is_core: bool,
    pub read_only: bool,
    pub is_diagram: bool,
}

impl TreeNodeAttrs {
    pub fn from_notification(notification: &Notification) -> Self {
        let state = &notification.state;
        Self {
            label: state.label.clone(),
            icon: notification.param("icon").to_owned(),
            class: NodeClass::for_flags(state.is_core, state.read_only),
            is_core: state.is_core,
            read_only: state.read_only,
            is_diagram: notification.param_bool("isDiagram"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeOutcome {
    Inserted,
    /// Stored, but the owner chain does not reach the root yet.
    Deferred,
    Duplicate,
    Updated,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct SortKey {
    label: String,
    node: TreeNodeId,
}

#[derive(Debug, Clone)]
struct TreeEntry {
    parent: TreeParent,
    attrs: TreeNodeAttrs,
}

#[derive(Debug, Default)]
pub struct NavigatorTree {
    nodes: BTreeMap<TreeNodeId, TreeEntry>,
    children: BTreeMap<TreeParent, BTreeSet<SortKey>>,
}

impl NavigatorTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, concept: &ConceptId) -> bool {
        self.nodes.contains_key(&TreeNodeId::from_concept(concept))
    }

    pub fn attrs(&self, concept: &ConceptId) -> Option<&TreeNodeAttrs> {
        self.nodes.get(&TreeNodeId::from_concept(concept)).map(|entry| &entry.attrs)
    }

    pub fn parent(&self, concept: &ConceptId) -> Option<&TreeParent> {
        self.nodes.get(&TreeNodeId::from_concept(concept)).map(|entry| &entry.parent)
    }

    /// Children of `parent` in display order.
    pub fn children(&self, parent: &TreeParent) -> Vec<TreeNodeId> {
        self.children
            .get(parent)
            .map(|keys| keys.iter().map(|key| key.node.clone()).collect())
            .unwrap_or_default()
    }

    pub fn is_visible(&self, concept: &ConceptId) -> bool {
        self.node_visible(&TreeNodeId::from_concept(concept))
    }

    /// Inserts a node. Duplicate deliveries leave the existing node untouched.
    pub fn add(
        &mut self,
        concept: &ConceptId,
        parent: TreeParent,
        attrs: TreeNodeAttrs,
        view: &mut impl View,
    ) -> TreeOutcome {
        let node = TreeNodeId::from_concept(concept);
        if self.nodes.contains_key(&node) {
            return TreeOutcome::Duplicate;
        }
        self.link(&node, parent, attrs);
        if self.node_visible(&node) {
            self.reveal(&node, view);
            TreeOutcome::Inserted
        } else {
            tracing::debug!(node = %node, "tree node parked until its owner appears");
            TreeOutcome::Deferred
        }
    }

    /// Re-parents, renames and restyles a node. Unknown nodes are inserted.
    pub fn change(
        &mut self,
        concept: &ConceptId,
        parent: TreeParent,
        attrs: TreeNodeAttrs,
        view: &mut impl View,
    ) -> TreeOutcome {
        let node = TreeNodeId::from_concept(concept);
        let Some((old_parent, old_index)) = self.placement(&node) else {
            return self.add(concept, parent, attrs, view);
        };
        let was_visible = self.node_visible(&node);

        self.unlink(&node);
        self.link(&node, parent.clone(), attrs.clone());
        let now_visible = self.node_visible(&node);

        match (was_visible, now_visible) {
            (true, true) => {
                let index = self.index_of(&node).unwrap_or_default();
                if old_parent != parent || old_index != index {
                    view.tree(TreeChange::Move { node: node.clone(), parent, index });
                }
                view.tree(TreeChange::Update { node, attrs });
            }
            (true, false) => view.tree(TreeChange::Remove { node }),
            (false, true) => self.reveal(&node, view),
            (false, false) => {}
        }
        TreeOutcome::Updated
    }

    /// Removes the node and its subtree.
    pub fn remove(&mut self, concept: &ConceptId, view: &mut impl View) -> bool {
        let node = TreeNodeId::from_concept(concept);
        if !self.nodes.contains_key(&node) {
            return false;
        }
        let visible = self.node_visible(&node);
        self.unlink(&node);

        let mut work = vec![node.clone()];
        while let Some(current) = work.pop() {
            self.nodes.remove(&current);
            if let Some(keys) = self.children.remove(&TreeParent::Node(current)) {
                work.extend(keys.into_iter().map(|key| key.node));
            }
        }

        if visible {
            view.tree(TreeChange::Remove { node });
        }
        true
    }

    pub fn clear(&mut self, view: &mut impl View) {
        self.nodes.clear();
        self.children.clear();
        view.tree(TreeChange::Clear);
    }

    fn link(&mut self, node: &TreeNodeId, parent: TreeParent, attrs: TreeNodeAttrs) {
        let key = SortKey { label: attrs.label.clone(), node: node.clone() };
        self.children.entry(parent.clone()).or_default().insert(key);
        self.nodes.insert(node.clone(), TreeEntry { parent, attrs });
    }

    fn unlink(&mut self, node: &TreeNodeId) {
        let Some(entry) = self.nodes.get(node) else {
            return;
        };
        let key = SortKey { label: entry.attrs.label.clone(), node: node.clone() };
        let parent = entry.parent.clone();
        if let Some(keys) = self.children.get_mut(&parent) {
            keys.remove(&key);
            if keys.is_empty() {
                self.children.remove(&parent);
            }
        }
    }

    fn placement(&self, node: &TreeNodeId) -> Option<(TreeParent, usize)> {
        let entry = self.nodes.get(node)?;
        Some((entry.parent.clone(), self.index_of(node)?))
    }

    fn index_of(&self, node: &TreeNodeId) -> Option<usize> {
        let entry = self.nodes.get(node)?;
        let key = SortKey { label: entry.attrs.label.clone(), node: node.clone() };
        let siblings = self.children.get(&entry.parent)?;
        Some(siblings.range(..key).count())
    }

    /// Walks owners up to the root; a cycle or a missing owner means hidden.
    fn node_visible(&self, node: &TreeNodeId) -> bool {
        let mut current = node;
        for _ in 0..=self.nodes.len() {
            let Some(entry) = self.nodes.get(current) else {
                return false;
            };
            match &entry.parent {
                TreeParent::Root => return true,
                TreeParent::Node(parent) => current = parent,
            }
        }
        false
    }

    /// Emits inserts for `node` and every parked descendant, parents first.
    fn reveal(&self, node: &TreeNodeId, view: &mut impl View) {
        let mut work = vec![node.clone()];
        while let Some(current) = work.pop() {
            let Some(entry) = self.nodes.get(&current) else {
                continue;
            };
            view.tree(TreeChange::Insert {
                node: current.clone(),
                parent: entry.parent.clone(),
                index: self.index_of(&current).unwrap_or_default(),
                attrs: entry.attrs.clone(),
            });
            let below = self.children(&TreeParent::Node(current));
            work.extend(below.into_iter().rev());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeMenuItem {
    AddElementChild,
    AddDiagramChild,
    AddLiteralChild,
    AddReferenceChild,
    AddRefinementChild,
    Delete,
    DisplayDiagram,
}

impl TreeMenuItem {
    pub fn action(self) -> Action {
        match self {
            Self::AddElementChild => Action::AddElementChild,
            Self::AddDiagramChild => Action::AddDiagramChild,
            Self::AddLiteralChild => Action::AddLiteralChild,
            Self::AddReferenceChild => Action::AddReferenceChild,
            Self::AddRefinementChild => Action::AddRefinementChild,
            Self::Delete => Action::TreeNodeDelete,
            Self::DisplayDiagram => Action::DisplayDiagramSelected,
        }
    }
}

/// Items the tree's context menu offers for a node.
pub fn tree_context_menu(attrs: &TreeNodeAttrs) -> SmallVec<[TreeMenuItem; 7]> {
    let mut items: SmallVec<[TreeMenuItem; 7]> = SmallVec::from_slice(&[
        TreeMenuItem::AddElementChild,
        TreeMenuItem::AddDiagramChild,
        TreeMenuItem::AddLiteralChild,
        TreeMenuItem::AddReferenceChild,
        TreeMenuItem::AddRefinementChild,
    ]);
    if !attrs.is_core && !attrs.read_only {
        items.push(TreeMenuItem::Delete);
    }
    if attrs.is_diagram {
        items.push(TreeMenuItem::DisplayDiagram);
    }
    items
}
