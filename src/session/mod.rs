// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The client session: one object owning every piece of synchronized state.
//!
//! Inbound notifications go through [`Session::handle_notification`], which always produces
//! exactly one [`Ack`]. User gestures are methods in `gestures.rs`; they only send requests and
//! touch local drag or toolbar state, never the mirrored model.

mod gestures;

pub use gestures::{LinkConnection, SessionCommand};

use crate::dispatch::{reply_effect, ReplyEffect, RequestSink};
use crate::model::{ConceptId, TreeNodeId, TreeParent};
use crate::protocol::{Ack, Action, Notification, NotificationKind, Reply, Request};
use crate::reconcile::{
    DiagramReconciler, LinkPayload, MoveBuffer, NavigatorTree, NodePayload, PayloadError, Point,
    Selection, Tool, Toolbar, TreeNodeAttrs,
};
use crate::view::{TreeChange, View, ViewChange};

/// Notification tracing switches pushed by the server's `DebugSettings`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugSettings {
    pub enable_notification_tracing: bool,
    pub omit_housekeeping_calls: bool,
    pub omit_manage_tree_nodes_calls: bool,
    pub omit_diagram_related_calls: bool,
    pub max_tracing_depth: u32,
}

impl DebugSettings {
    fn from_notification(notification: &Notification) -> Self {
        Self {
            enable_notification_tracing: notification.param_bool("EnableNotificationTracing"),
            omit_housekeeping_calls: notification.param_bool("OmitHousekeepingCalls"),
            omit_manage_tree_nodes_calls: notification.param_bool("OmitManageTreeNodesCalls"),
            omit_diagram_related_calls: notification.param_bool("OmitDiagramRelatedCalls"),
            max_tracing_depth: notification.param("MaxTracingDepth").trim().parse().unwrap_or(0),
        }
    }

    /// Whether a notification of `kind` should be traced at info level.
    pub fn traces(&self, kind: NotificationKind) -> bool {
        if !self.enable_notification_tracing {
            return false;
        }
        if kind.is_tree_management() {
            !self.omit_manage_tree_nodes_calls
        } else if kind.is_diagram_related() {
            !self.omit_diagram_related_calls
        } else {
            !self.omit_housekeeping_calls
        }
    }

    fn to_request(&self) -> Request {
        Request::new(Action::UpdateDebugSettings)
            .with_param("EnableNotificationTracing", bool_str(self.enable_notification_tracing))
            .with_param("OmitHousekeepingCalls", bool_str(self.omit_housekeeping_calls))
            .with_param("OmitManageTreeNodesCalls", bool_str(self.omit_manage_tree_nodes_calls))
            .with_param("OmitDiagramRelatedCalls", bool_str(self.omit_diagram_related_calls))
            .with_param("MaxTracingDepth", self.max_tracing_depth.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserPreferences {
    pub drop_reference_as_link: bool,
    pub drop_refinement_as_link: bool,
}

impl UserPreferences {
    fn from_notification(notification: &Notification) -> Self {
        Self {
            drop_reference_as_link: notification.param_bool("DropReferenceAsLink"),
            drop_refinement_as_link: notification.param_bool("DropRefinementAsLink"),
        }
    }

    fn to_request(self) -> Request {
        Request::new(Action::UpdateUserPreferences)
            .with_param("DropReferenceAsLink", bool_str(self.drop_reference_as_link))
            .with_param("DropRefinementAsLink", bool_str(self.drop_refinement_as_link))
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Suppresses user alerts for rejected requests.
    pub automated_test: bool,
}

/// Colors copied from one drawing element, ready to paste onto another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatClipboard {
    pub line_color: String,
    pub bg_color: String,
}

pub struct Session<V, R> {
    view: V,
    requests: R,
    options: SessionOptions,
    tree: NavigatorTree,
    diagrams: DiagramReconciler,
    selection: Selection,
    toolbar: Toolbar,
    moves: MoveBuffer,
    debug: DebugSettings,
    preferences: UserPreferences,
    workspace_path: String,
    initialized: bool,
    format_clipboard: Option<FormatClipboard>,
}

impl<V: View, R: RequestSink> Session<V, R> {
    pub fn new(view: V, requests: R, options: SessionOptions) -> Self {
        Self {
            view,
            requests,
            options,
            tree: NavigatorTree::new(),
            diagrams: DiagramReconciler::new(),
            selection: Selection::default(),
            toolbar: Toolbar::default(),
            moves: MoveBuffer::new(),
            debug: DebugSettings::default(),
            preferences: UserPreferences::default(),
            workspace_path: String::new(),
            initialized: false,
            format_clipboard: None,
        }
    }

    pub fn into_parts(self) -> (V, R) {
        (self.view, self.requests)
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn requests(&self) -> &R {
        &self.requests
    }

    pub fn requests_mut(&mut self) -> &mut R {
        &mut self.requests
    }

    pub fn tree(&self) -> &NavigatorTree {
        &self.tree
    }

    pub fn diagrams(&self) -> &DiagramReconciler {
        &self.diagrams
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn active_tool(&self) -> Tool {
        self.toolbar.active()
    }

    pub fn debug_settings(&self) -> &DebugSettings {
        &self.debug
    }

    pub fn preferences(&self) -> UserPreferences {
        self.preferences
    }

    pub fn workspace_path(&self) -> &str {
        &self.workspace_path
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_dragging(&self) -> bool {
        self.moves.is_dragging()
    }

    /// Decodes one notification frame and handles it. Undecodable frames are acked as errors.
    pub fn handle_text(&mut self, raw: &str) -> Ack {
        match serde_json::from_str::<Notification>(raw) {
            Ok(notification) => self.handle_notification(&notification),
            Err(err) => {
                tracing::warn!(error = %err, "malformed notification");
                Ack::malformed(err)
            }
        }
    }

    /// Applies one notification. Every path ends in exactly one ack.
    pub fn handle_notification(&mut self, notification: &Notification) -> Ack {
        let Some(kind) = notification.kind() else {
            tracing::warn!(name = %notification.name, "unhandled notification");
            return Ack::unhandled();
        };

        let traced = self.debug.traces(kind);
        if traced {
            tracing::info!(%kind, concept = %notification.concept_id, "notification");
        } else {
            tracing::debug!(%kind, concept = %notification.concept_id, "notification");
        }

        let ack = match self.apply(kind, notification) {
            Ok(ack) => ack,
            Err(err) => {
                tracing::warn!(%kind, error = %err, "notification rejected");
                Ack::error(err.to_string())
            }
        };

        if traced {
            tracing::debug!(%kind, result = ack.result, "ack");
        } else {
            tracing::trace!(%kind, result = ack.result, "ack");
        }
        ack
    }

    fn apply(&mut self, kind: NotificationKind, notification: &Notification) -> Result<Ack, PayloadError> {
        match kind {
            NotificationKind::AddTreeNode => {
                let concept = notification.subject_id().ok_or(PayloadError::MissingConceptId)?;
                let parent = TreeParent::from_owner(notification.state.owner().as_ref());
                let attrs = TreeNodeAttrs::from_notification(notification);
                self.tree.add(&concept, parent, attrs, &mut self.view);
            }
            NotificationKind::ChangeTreeNode => {
                let concept = notification.subject_id().ok_or(PayloadError::MissingConceptId)?;
                let parent = TreeParent::from_owner(notification.state.owner().as_ref());
                let attrs = TreeNodeAttrs::from_notification(notification);
                self.tree.change(&concept, parent, attrs, &mut self.view);
                if self.selection.is_selected(&concept) {
                    self.selection.show(notification, &mut self.view);
                }
            }
            NotificationKind::DeleteTreeNode => {
                if let Some(concept) = envelope_id(notification) {
                    self.tree.remove(&concept, &mut self.view);
                }
            }
            NotificationKind::ClearTree => self.tree.clear(&mut self.view),
            NotificationKind::ClearDiagrams => {
                self.flush_moves();
                self.diagrams.clear(&mut self.view);
            }
            NotificationKind::ClearToolbarSelection => {
                self.toolbar.select(Tool::Cursor, &mut self.view);
            }
            NotificationKind::CloseDiagramView => {
                if let Some(diagram) = envelope_id(notification) {
                    self.close_diagram(&diagram);
                }
            }
            NotificationKind::DebugSettings => {
                self.debug = DebugSettings::from_notification(notification);
                tracing::debug!(settings = ?self.debug, "debug settings updated");
            }
            NotificationKind::DeleteDiagramElement => {
                let element = notification.subject_id().ok_or(PayloadError::MissingConceptId)?;
                let owner = notification.param_opt("OwnerID").and_then(ConceptId::from_wire);
                if !self.diagrams.delete_element(&element, owner.as_ref(), &mut self.view) {
                    tracing::debug!(%element, "delete for an element that is not drawn");
                }
            }
            NotificationKind::DiagramLabelChanged => {
                if let Some(diagram) = envelope_id(notification) {
                    self.diagrams.rename_tab(&diagram, &notification.state.label, &mut self.view);
                }
            }
            NotificationKind::DisplayDiagram => {
                let diagram = envelope_id(notification).ok_or(PayloadError::MissingConceptId)?;
                self.diagrams.display(&diagram, &notification.state.label, &mut self.view);
            }
            NotificationKind::DisplayGraph => {
                let graph = notification.param("GraphString").to_owned();
                self.view.apply(ViewChange::DisplayGraph(graph));
            }
            NotificationKind::DoesLinkExist => {
                let exists = match LinkPayload::from_notification(notification) {
                    Ok(payload) => self.diagrams.link_exists(&payload),
                    Err(err) => {
                        tracing::debug!(error = %err, "link existence query without a usable link");
                        false
                    }
                };
                return Ok(Ack::boolean(exists));
            }
            NotificationKind::UserPreferences => {
                self.preferences = UserPreferences::from_notification(notification);
            }
            NotificationKind::ElementSelected => {
                self.selection.element_selected(notification, &mut self.view);
            }
            NotificationKind::InitializationComplete => {
                self.initialized = true;
                tracing::info!("server initialization complete");
            }
            NotificationKind::Refresh => self.reset(),
            NotificationKind::ShowTreeNode => {
                let concept = notification.subject_id().ok_or(PayloadError::MissingConceptId)?;
                let node = TreeNodeId::from_concept(&concept);
                self.view.tree(TreeChange::Select { node, suppress_event: false });
            }
            NotificationKind::AddDiagramLink | NotificationKind::UpdateDiagramLink => {
                let payload = LinkPayload::from_notification(notification)?;
                self.diagrams.upsert_link(&payload, &mut self.view);
            }
            NotificationKind::AddDiagramNode | NotificationKind::UpdateDiagramNode => {
                let payload = NodePayload::from_notification(notification)?;
                self.diagrams.upsert_node(&payload, &mut self.view);
            }
            NotificationKind::UpdateProperties => {
                self.selection.show(notification, &mut self.view);
            }
            NotificationKind::WorkspacePath => {
                self.workspace_path = notification.param("WorkspacePath").to_owned();
                self.view.apply(ViewChange::WorkspacePath(self.workspace_path.clone()));
            }
        }
        Ok(Ack::ok())
    }

    /// Handles the reply to a request sent earlier. Never touches mirrored state.
    pub fn reply_received(&mut self, action: Action, reply: &Reply) {
        match reply_effect(action, reply, self.options.automated_test) {
            ReplyEffect::None => {}
            ReplyEffect::Alert(message) => self.view.apply(ViewChange::Alert(message)),
            ReplyEffect::AvailableGraphs(count) => {
                self.view.apply(ViewChange::AvailableGraphs(count));
            }
        }
    }

    /// The notification channel dropped: drags in flight are flushed and released.
    pub fn connection_lost(&mut self) {
        let moves = self.moves.reset();
        self.send_moves(moves);
    }

    /// Drops every piece of mirrored state and asks the view to reload.
    fn reset(&mut self) {
        self.moves.reset();
        self.diagrams.clear(&mut self.view);
        self.tree.clear(&mut self.view);
        self.selection.clear();
        self.view.apply(ViewChange::ClearProperties);
        self.view.apply(ViewChange::Reload);
        tracing::info!("session reset for refresh");
    }

    /// Local teardown first, then tells the server the view is gone.
    fn close_diagram(&mut self, diagram: &ConceptId) {
        self.flush_moves();
        self.diagrams.close(diagram, &mut self.view);
        self.send(Request::for_concept(Action::DiagramViewHasBeenClosed, diagram));
    }

    fn flush_moves(&mut self) {
        let moves = self.moves.flush();
        self.send_moves(moves);
    }

    fn send_moves(&mut self, moves: Vec<(ConceptId, Point)>) {
        for (node, position) in moves {
            self.send(
                Request::for_concept(Action::DiagramNodeNewPosition, &node)
                    .with_param("NodeX", position.x.to_string())
                    .with_param("NodeY", position.y.to_string()),
            );
        }
    }

    fn send(&mut self, request: Request) {
        tracing::debug!(action = ?request.action, concept = ?request.concept_id, "request");
        self.requests.dispatch(request);
    }
}

fn envelope_id(notification: &Notification) -> Option<ConceptId> {
    ConceptId::from_wire(&notification.concept_id).or_else(|| notification.subject_id())
}

#[cfg(test)]
mod tests;
