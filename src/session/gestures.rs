// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::dispatch::RequestSink;
use crate::model::{
    ConceptId, DiagramId, DiagramViewIds, DrawingElementId, LinkKind, Represents, TreeNodeId,
};
use crate::protocol::{Action, Request};
use crate::reconcile::{CellMenuItem, MouseButton, Point, PropertyField, Tool, TreeMenuItem};
use crate::view::{SurfaceChange, View};

use super::{DebugSettings, FormatClipboard, Session, UserPreferences};

/// A link the user finished dragging onto a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConnection {
    pub diagram: DiagramId,
    pub kind: LinkKind,
    /// `None` for a link drawn locally that the server has not seen yet.
    pub link: Option<ConceptId>,
    pub source: DrawingElementId,
    pub target: DrawingElementId,
}

/// Menu and keyboard commands that are a bare request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    OpenWorkspace,
    SaveWorkspace,
    ClearWorkspace,
    CloseWorkspace,
    NewDomain,
    Exit,
    Undo,
    Redo,
}

impl SessionCommand {
    pub fn action(self) -> Action {
        match self {
            Self::OpenWorkspace => Action::OpenWorkspace,
            Self::SaveWorkspace => Action::SaveWorkspace,
            Self::ClearWorkspace => Action::ClearWorkspace,
            Self::CloseWorkspace => Action::CloseWorkspace,
            Self::NewDomain => Action::NewDomainRequest,
            Self::Exit => Action::Exit,
            Self::Undo => Action::Undo,
            Self::Redo => Action::Redo,
        }
    }
}

fn link_changed_action(kind: LinkKind) -> Action {
    match kind {
        LinkKind::ReferenceLink => Action::ReferenceLinkChanged,
        LinkKind::RefinementLink => Action::RefinementLinkChanged,
        LinkKind::OwnerPointer => Action::OwnerPointerChanged,
        LinkKind::ElementPointer => Action::ElementPointerChanged,
        LinkKind::AbstractPointer => Action::AbstractPointerChanged,
        LinkKind::RefinedPointer => Action::RefinedPointerChanged,
    }
}

impl<V: View, R: RequestSink> Session<V, R> {
    // Navigator tree.

    /// The tree widget selected a node. Echoes of the current selection send nothing.
    pub fn tree_node_selected(&mut self, node: &TreeNodeId) -> bool {
        match self.selection.tree_node_selected(node) {
            Some(request) => {
                self.send(request);
                true
            }
            None => false,
        }
    }

    pub fn tree_drag_started(&mut self, node: &TreeNodeId) {
        self.send(Request::for_concept(Action::SetTreeDragSelection, node.concept_id()));
    }

    /// A tree drag ended somewhere other than a diagram.
    pub fn editor_drop(&mut self) {
        self.send(Request::new(Action::SetTreeDragSelection).with_raw_concept_id(""));
    }

    pub fn tree_menu_selected(&mut self, node: &TreeNodeId, item: TreeMenuItem) {
        self.send(Request::for_concept(item.action(), node.concept_id()));
    }

    // Diagram canvas.

    /// A click on empty canvas. Only node-creation tools produce a request.
    pub fn diagram_clicked(&mut self, diagram: &DiagramId, at: Point) -> bool {
        let Some(node_type) = self.toolbar.active().node_type() else {
            return false;
        };
        self.send(
            Request::new(Action::DiagramClick)
                .with_param("DiagramID", diagram.as_str())
                .with_param("NodeType", node_type)
                .with_param("NodeX", at.x.to_string())
                .with_param("NodeY", at.y.to_string()),
        );
        true
    }

    /// A tree node was dropped onto a diagram.
    pub fn diagram_drop(&mut self, diagram: &DiagramId, at: Point, shift: bool) {
        self.send(
            Request::new(Action::DiagramDrop)
                .with_param("DiagramID", diagram.as_str())
                .with_param("NodeX", at.x.to_string())
                .with_param("NodeY", at.y.to_string())
                .with_param("Shift", if shift { "true" } else { "false" }),
        );
    }

    pub fn cell_pointer_down(&mut self, element: &DrawingElementId, button: MouseButton) {
        self.moves.pointer_down(button);
        self.send(Request::for_concept(Action::DiagramElementSelected, element.concept_id()));
    }

    /// The drawing library moved a node. Only buffered while the primary button is held.
    pub fn position_changed(&mut self, element: &DrawingElementId, position: Point) -> bool {
        self.moves.position_changed(element.concept_id().clone(), position)
    }

    /// Button released over a cell: one position request per moved node.
    pub fn cell_pointer_up(&mut self, button: MouseButton) -> usize {
        let moves = self.moves.pointer_up(button);
        let sent = moves.len();
        self.send_moves(moves);
        sent
    }

    /// Button released over empty canvas. Buffered moves wait for the next cell release.
    pub fn blank_pointer_up(&mut self, button: MouseButton) {
        self.moves.release(button);
    }

    pub fn tab_clicked(&mut self, diagram: &DiagramId) {
        self.send(Request::for_concept(Action::DisplayDiagramSelected, diagram));
    }

    /// The user closed the current diagram tab.
    pub fn close_current_diagram(&mut self) -> bool {
        let Some(diagram) = self.diagrams.current().cloned() else {
            return false;
        };
        self.close_diagram(&diagram);
        true
    }

    pub fn refresh_diagram(&mut self, diagram: &DiagramId) {
        self.send(Request::for_concept(Action::RefreshDiagram, diagram));
    }

    // Links.

    /// Kind of link a drag starting on `element` would create, if the active tool allows one.
    pub fn link_start(&self, diagram: &DiagramId, element: &DrawingElementId) -> Option<LinkKind> {
        self.toolbar.link_start(self.represents(diagram, element))
    }

    /// Whether a dragged link of `kind` may be dropped on `target`.
    pub fn can_connect(&self, diagram: &DiagramId, kind: LinkKind, target: &DrawingElementId) -> bool {
        kind.can_end_on(self.represents(diagram, target))
    }

    fn represents(&self, diagram: &DiagramId, element: &DrawingElementId) -> Option<Represents> {
        self.diagrams.graph(diagram)?.get(element)?.represents()
    }

    /// A dragged link landed on a legal target. Returns `false` if the drop was refused.
    pub fn link_connected(&mut self, connection: &LinkConnection) -> bool {
        let target_represents = self.represents(&connection.diagram, &connection.target);
        if !connection.kind.can_end_on(target_represents) {
            tracing::debug!(kind = %connection.kind, target = %connection.target, "link drop refused");
            return false;
        }

        let mut request = Request::new(link_changed_action(connection.kind))
            .with_raw_concept_id(connection.link.as_ref().map(ConceptId::as_str).unwrap_or_default())
            .with_param("SourceID", connection.source.concept_id().as_str())
            .with_param("TargetID", connection.target.concept_id().as_str());
        if connection.kind.carries_target_attribute() {
            let attribute =
                target_represents.map(|target| target.target_attribute_name()).unwrap_or("NoAttribute");
            request = request.with_param("TargetAttributeName", attribute);
        }
        self.send(request);

        if connection.link.is_none() {
            let graph = DiagramViewIds::for_diagram(&connection.diagram).graph;
            self.view.surface(SurfaceChange::DiscardTransientLink { graph });
        }
        true
    }

    pub fn delete_view(&mut self, element: &DrawingElementId) {
        self.send(Request::for_concept(Action::DeleteDiagramElementView, element.concept_id()));
    }

    // Format and cell menu.

    pub fn format_changed(&mut self, element: &DrawingElementId, line_color: &str, bg_color: &str) {
        self.send(
            Request::for_concept(Action::FormatChanged, element.concept_id())
                .with_param("LineColor", line_color)
                .with_param("BGColor", bg_color),
        );
    }

    /// Remembers a node's colors. Links and unknown elements leave the clipboard alone.
    pub fn copy_format(&mut self, diagram: &DiagramId, element: &DrawingElementId) -> bool {
        let Some(node) = self.diagrams.graph(diagram).and_then(|graph| graph.node(element)) else {
            return false;
        };
        self.format_clipboard = Some(FormatClipboard {
            line_color: node.line_color.clone().unwrap_or_default(),
            bg_color: node.bg_color.clone().unwrap_or_default(),
        });
        true
    }

    pub fn paste_format(&mut self, element: &DrawingElementId) -> bool {
        let Some(clipboard) = self.format_clipboard.clone() else {
            return false;
        };
        self.format_changed(element, &clipboard.line_color, &clipboard.bg_color);
        true
    }

    pub fn format_clipboard(&self) -> Option<&FormatClipboard> {
        self.format_clipboard.as_ref()
    }

    /// Runs a cell context menu item. `EditFormat` is the view's dialog and sends nothing here.
    pub fn cell_menu_selected(
        &mut self,
        diagram: &DiagramId,
        element: &DrawingElementId,
        item: CellMenuItem,
    ) -> bool {
        if let Some(action) = item.action() {
            self.send(Request::for_concept(action, element.concept_id()));
            return true;
        }
        match item {
            CellMenuItem::CopyFormat => self.copy_format(diagram, element),
            CellMenuItem::PasteFormat => self.paste_format(element),
            _ => false,
        }
    }

    pub fn show_concept_in_navigator(&mut self, concept: &ConceptId) {
        self.send(Request::for_concept(Action::ShowConceptInNavigator, concept));
    }

    // Properties and session-wide commands.

    /// A keystroke in the property panel. Read-only concepts send nothing.
    pub fn property_edited(&mut self, field: PropertyField, raw: &str) -> bool {
        match self.selection.edit(field, raw) {
            Some(request) => {
                self.send(request);
                true
            }
            None => false,
        }
    }

    pub fn command(&mut self, command: SessionCommand) {
        self.send(Request::new(command.action()));
    }

    pub fn update_debug_settings(&mut self, settings: DebugSettings) {
        self.send(settings.to_request());
    }

    pub fn update_user_preferences(&mut self, preferences: UserPreferences) {
        self.send(preferences.to_request());
    }

    pub fn request_available_graph_count(&mut self) {
        self.send(Request::new(Action::ReturnAvailableGraphCount));
    }

    pub fn display_call_graph(&mut self, index: usize) {
        self.send(Request::new(Action::DisplayCallGraph).with_param("GraphIndex", index.to_string()));
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.toolbar.select(tool, &mut self.view);
    }

    /// Toolbar click by widget id. Unknown buttons are ignored.
    pub fn toolbar_button_clicked(&mut self, button_id: &str) -> bool {
        match Tool::from_button_id(button_id) {
            Some(tool) => {
                self.select_tool(tool);
                true
            }
            None => {
                tracing::warn!(button_id, "unknown toolbar button");
                false
            }
        }
    }
}
