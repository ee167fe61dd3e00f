// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Per-diagram drawing-surface mirrors and the pending-link resolution.
//!
//! A diagram view goes absent → constructed → visible ⇄ hidden → closed. Only diagrams with a
//! view receive drawing elements; notifications for any other diagram are accepted and ignored.
//! Links are materialized once both endpoints exist in the same graph. Until then their payload
//! waits in [`PendingLinks`], which is drained to a fixed point after every successful add.

mod graph;
mod menu;
mod moves;
mod pending;

use std::collections::BTreeMap;

pub use graph::{
    DiagramGraph, DiagramLink, DiagramNode, DrawingElement, LinkPayload, NodePayload,
    PayloadError, Point, Size,
};
pub use menu::{cell_context_menu, CellMenuItem};
pub use moves::{MouseButton, MoveBuffer};
pub use pending::{DrainReport, PendingLinks};

use crate::model::{ConceptId, DiagramId, DiagramViewIds, DrawingElementId};
use crate::view::{SurfaceChange, View};

/// One open diagram: its widget ids, tab label and graph mirror.
#[derive(Debug, Clone)]
pub struct DiagramView {
    pub ids: DiagramViewIds,
    pub label: String,
    pub graph: DiagramGraph,
    pub visible: bool,
}

impl DiagramView {
    fn new(diagram_id: &DiagramId, label: &str) -> Self {
        Self {
            ids: DiagramViewIds::for_diagram(diagram_id),
            label: label.to_owned(),
            graph: DiagramGraph::new(),
            visible: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The owning diagram has no view; nothing was touched.
    OffScreen,
    Created,
    Updated,
    /// A link endpoint is missing; the payload waits in the pending set.
    Pending,
    /// An existing link lost an endpoint. It was taken off the surface and waits in the pending
    /// set until both endpoints are drawn again.
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upserted {
    pub outcome: UpsertOutcome,
    pub drained: DrainReport,
}

impl Upserted {
    fn without_drain(outcome: UpsertOutcome) -> Self {
        Self { outcome, drained: DrainReport::default() }
    }
}

#[derive(Debug, Default)]
pub struct DiagramReconciler {
    views: BTreeMap<DiagramId, DiagramView>,
    current: Option<DiagramId>,
    pending: PendingLinks,
}

impl DiagramReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&DiagramId> {
        self.current.as_ref()
    }

    pub fn is_open(&self, diagram: &DiagramId) -> bool {
        self.views.contains_key(diagram)
    }

    pub fn open_diagrams(&self) -> impl Iterator<Item = &DiagramId> {
        self.views.keys()
    }

    pub fn diagram(&self, diagram: &DiagramId) -> Option<&DiagramView> {
        self.views.get(diagram)
    }

    pub fn graph(&self, diagram: &DiagramId) -> Option<&DiagramGraph> {
        self.views.get(diagram).map(|view| &view.graph)
    }

    pub fn pending(&self) -> &PendingLinks {
        &self.pending
    }

    /// Shows `diagram`, constructing its view on first display. Every other view is hidden.
    pub fn display(&mut self, diagram: &DiagramId, label: &str, view: &mut impl View) -> bool {
        let created = !self.views.contains_key(diagram);
        if created {
            let state = DiagramView::new(diagram, label);
            view.surface(SurfaceChange::CreateContainer {
                ids: state.ids.clone(),
                label: state.label.clone(),
            });
            self.views.insert(diagram.clone(), state);
            tracing::debug!(%diagram, "diagram view constructed");
        }

        for (id, state) in &mut self.views {
            let show = id == diagram;
            if show {
                view.surface(SurfaceChange::ShowContainer {
                    container: state.ids.container.clone(),
                    tab: state.ids.tab.clone(),
                });
            } else if state.visible {
                view.surface(SurfaceChange::HideContainer {
                    container: state.ids.container.clone(),
                    tab: state.ids.tab.clone(),
                });
            }
            state.visible = show;
        }

        self.current = Some(diagram.clone());
        created
    }

    /// Tears down the view of `diagram` and forgets its pending links.
    pub fn close(&mut self, diagram: &DiagramId, view: &mut impl View) -> bool {
        let Some(state) = self.views.remove(diagram) else {
            return false;
        };
        view.surface(SurfaceChange::DestroyContainer { ids: state.ids });
        let dropped = self.pending.forget_diagram(diagram);
        if self.current.as_ref() == Some(diagram) {
            self.current = None;
        }
        tracing::debug!(%diagram, dropped_pending = dropped, "diagram view closed");
        true
    }

    pub fn clear(&mut self, view: &mut impl View) {
        let open: Vec<DiagramId> = self.views.keys().cloned().collect();
        for diagram in &open {
            self.close(diagram, view);
        }
        self.pending.clear();
        self.current = None;
    }

    pub fn rename_tab(&mut self, diagram: &DiagramId, label: &str, view: &mut impl View) -> bool {
        let Some(state) = self.views.get_mut(diagram) else {
            return false;
        };
        state.label = label.to_owned();
        view.surface(SurfaceChange::RenameTab {
            tab: state.ids.tab.clone(),
            label: state.label.clone(),
        });
        true
    }

    /// Creates the node if needed, then applies every payload attribute.
    pub fn upsert_node(&mut self, payload: &NodePayload, view: &mut impl View) -> Upserted {
        let Some(state) = self.views.get_mut(&payload.diagram_id) else {
            return Upserted::without_drain(UpsertOutcome::OffScreen);
        };

        let id = payload.element_id();
        let graph_id = state.ids.graph.clone();
        if let Some(node) = state.graph.node_mut(&id) {
            node.apply(payload);
            view.surface(SurfaceChange::UpdateNode { graph: graph_id, node: node.clone() });
            return Upserted::without_drain(UpsertOutcome::Updated);
        }

        if state.graph.contains(&id) {
            tracing::warn!(element = %id, "node notification for an element drawn as a link");
            return Upserted::without_drain(UpsertOutcome::Updated);
        }

        let mut node = DiagramNode::new(id);
        node.apply(payload);
        state.graph.insert(DrawingElement::Node(node.clone()));
        view.surface(SurfaceChange::AddNode { graph: graph_id, node });

        let drained = self.drain_pending(view);
        Upserted { outcome: UpsertOutcome::Created, drained }
    }

    /// Link add and update share one path; see the module docs for the outcomes.
    pub fn upsert_link(&mut self, payload: &LinkPayload, view: &mut impl View) -> Upserted {
        let Some(state) = self.views.get_mut(&payload.diagram_id) else {
            return Upserted::without_drain(UpsertOutcome::OffScreen);
        };

        let id = payload.element_id();
        let graph_id = state.ids.graph.clone();
        if state.graph.node(&id).is_some() {
            tracing::warn!(element = %id, "link notification for an element drawn as a node");
            return Upserted::without_drain(UpsertOutcome::Updated);
        }
        let endpoints = state.graph.resolve_endpoints(payload);

        if state.graph.link(&id).is_none() {
            let Some((source, target)) = endpoints else {
                tracing::debug!(link = %id, "link endpoints not drawn yet, deferring");
                self.pending.insert(payload.clone());
                return Upserted::without_drain(UpsertOutcome::Pending);
            };
            let link = new_link(payload, source, target);
            state.graph.insert(DrawingElement::Link(link.clone()));
            view.surface(SurfaceChange::AddLink { graph: graph_id, link });
            self.pending.remove(&id);

            let drained = self.drain_pending(view);
            return Upserted { outcome: UpsertOutcome::Created, drained };
        }

        let Some((source, target)) = endpoints else {
            state.graph.remove(&id);
            view.surface(SurfaceChange::RemoveElement { graph: graph_id, element: id });
            self.pending.insert(payload.clone());
            return Upserted::without_drain(UpsertOutcome::Removed);
        };
        self.pending.remove(&id);

        let Some(link) = state.graph.link_mut(&id) else {
            return Upserted::without_drain(UpsertOutcome::Updated);
        };
        if link.source != source || link.target != target {
            link.source = source.clone();
            link.target = target.clone();
            view.surface(SurfaceChange::RepointLink {
                graph: graph_id.clone(),
                link: id.clone(),
                source,
                target,
            });
        }
        link.label.clone_from(&payload.label);
        view.surface(SurfaceChange::SetLinkLabel {
            graph: graph_id,
            link: id,
            label: payload.label.clone(),
        });
        Upserted::without_drain(UpsertOutcome::Updated)
    }

    /// Removes a drawing element from `owner`'s graph. A pending entry for it is dropped too.
    pub fn delete_element(
        &mut self,
        element: &ConceptId,
        owner: Option<&DiagramId>,
        view: &mut impl View,
    ) -> bool {
        let id = DrawingElementId::from_concept(element);
        self.pending.remove(&id);

        let Some(state) = owner.and_then(|owner| self.views.get_mut(owner)) else {
            return false;
        };
        if state.graph.remove(&id).is_none() {
            return false;
        }
        view.surface(SurfaceChange::RemoveElement { graph: state.ids.graph.clone(), element: id });
        true
    }

    /// True when the link is drawn and both of its declared endpoints are drawn too.
    pub fn link_exists(&self, payload: &LinkPayload) -> bool {
        self.views.get(&payload.diagram_id).is_some_and(|state| {
            state.graph.link(&payload.element_id()).is_some()
                && state.graph.resolve_endpoints(payload).is_some()
        })
    }

    /// Materializes pending links until a pass makes no progress.
    pub fn drain_pending(&mut self, view: &mut impl View) -> DrainReport {
        let views = &mut self.views;
        let report = self.pending.drain(|payload| materialize(&mut *views, payload, &mut *view));
        if report.materialized > 0 {
            tracing::debug!(
                materialized = report.materialized,
                passes = report.passes,
                still_pending = report.still_pending,
                "pending links drained"
            );
        }
        report
    }
}

fn new_link(payload: &LinkPayload, source: DrawingElementId, target: DrawingElementId) -> DiagramLink {
    DiagramLink {
        id: payload.element_id(),
        kind: payload.kind,
        represents: payload.represents,
        source,
        target,
        label: payload.label.clone(),
    }
}

fn materialize(
    views: &mut BTreeMap<DiagramId, DiagramView>,
    payload: &LinkPayload,
    view: &mut impl View,
) -> bool {
    let Some(state) = views.get_mut(&payload.diagram_id) else {
        return false;
    };
    let id = payload.element_id();
    if state.graph.contains(&id) {
        return true;
    }
    let Some((source, target)) = state.graph.resolve_endpoints(payload) else {
        return false;
    };
    let link = new_link(payload, source, target);
    state.graph.insert(DrawingElement::Link(link.clone()));
    view.surface(SurfaceChange::AddLink { graph: state.ids.graph.clone(), link });
    true
}
