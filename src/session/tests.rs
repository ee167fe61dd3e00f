// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{DrawingElementId, LinkKind, TreeNodeId};
use crate::protocol::fixtures::{
    cid, delete_element, diagram_link, diagram_node, display_diagram, state, tree_node,
};
use crate::protocol::{Ack, Action, Notification, NotificationKind, Reply, Request};
use crate::reconcile::{CellMenuItem, MouseButton, Point, PropertyField, Tool};
use crate::view::{RecordingView, SurfaceChange, TreeChange, ViewChange};

use super::{LinkConnection, Session, SessionCommand, SessionOptions};

type TestSession = Session<RecordingView, Vec<Request>>;

fn session() -> TestSession {
    Session::new(RecordingView::new(), Vec::new(), SessionOptions::default())
}

fn element(raw: &str) -> DrawingElementId {
    DrawingElementId::from_concept(&cid(raw))
}

fn handle_ok(session: &mut TestSession, notification: Notification) {
    let ack = session.handle_notification(&notification);
    assert!(ack.is_ok(), "{} rejected: {}", notification.name, ack.error_message);
}

fn open_with_nodes(session: &mut TestSession, diagram: &str, nodes: &[(&str, &str)]) {
    handle_ok(session, display_diagram(diagram, diagram));
    for (index, (node, represents)) in nodes.iter().enumerate() {
        let x = 100.0 * index as f64;
        handle_ok(
            session,
            diagram_node(NotificationKind::AddDiagramNode, diagram, node, represents, x, 0.0),
        );
    }
}

fn selected(id: &str) -> Notification {
    Notification::new(NotificationKind::ElementSelected)
        .with_concept_id(id)
        .with_state(state(id, "*core.element", "", "Thing"))
}

fn take_requests(session: &mut TestSession) -> Vec<Request> {
    std::mem::take(session.requests_mut())
}

#[test]
fn selection_round_trip_sends_nothing_back() {
    let mut session = session();
    handle_ok(&mut session, tree_node(NotificationKind::AddTreeNode, "c1", "", "Thing"));

    handle_ok(&mut session, selected("c1"));

    let node = TreeNodeId::from_concept(&cid("c1"));
    assert!(session
        .view()
        .tree_changes()
        .any(|change| *change == TreeChange::Select { node: node.clone(), suppress_event: true }));
    assert!(!session.tree_node_selected(&node));
    assert!(session.requests().is_empty());

    session.view_mut().clear();
    handle_ok(&mut session, selected("c1"));
    assert!(session.view().changes().is_empty());
}

#[test]
fn show_tree_node_selects_without_suppression() {
    let mut session = session();
    handle_ok(&mut session, tree_node(NotificationKind::AddTreeNode, "c1", "", "Thing"));
    session.view_mut().clear();

    handle_ok(&mut session, tree_node(NotificationKind::ShowTreeNode, "c1", "", "Thing"));

    let node = TreeNodeId::from_concept(&cid("c1"));
    assert_eq!(
        session.view().tree_changes().collect::<Vec<_>>(),
        vec![&TreeChange::Select { node: node.clone(), suppress_event: false }]
    );
    assert!(session.tree_node_selected(&node));
    assert_eq!(take_requests(&mut session)[0].action, Action::TreeNodeSelected);
}

#[test]
fn changing_the_selected_concept_refreshes_properties() {
    let mut session = session();
    handle_ok(&mut session, tree_node(NotificationKind::AddTreeNode, "c1", "", "Old"));
    handle_ok(&mut session, selected("c1"));
    session.view_mut().clear();

    handle_ok(&mut session, tree_node(NotificationKind::ChangeTreeNode, "c1", "", "New"));

    let form = session.view().last_properties().expect("properties rendered");
    assert_eq!(form.row("Label").map(|row| row.value.as_str()), Some("New"));
}

#[test]
fn three_moves_produce_one_position_request() {
    let mut session = session();
    open_with_nodes(&mut session, "d1", &[("n1", "Element")]);
    let n1 = element("n1");

    session.cell_pointer_down(&n1, MouseButton::Primary);
    for x in [10.0, 20.0, 30.0] {
        assert!(session.position_changed(&n1, Point::new(x, 5.0)));
    }
    assert_eq!(session.cell_pointer_up(MouseButton::Primary), 1);

    let requests = take_requests(&mut session);
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].action, Action::DiagramElementSelected);
    let position = &requests[1];
    assert_eq!(position.action, Action::DiagramNodeNewPosition);
    assert_eq!(position.concept_id.as_deref(), Some("n1"));
    assert_eq!(position.param("NodeX"), Some("30"));
    assert_eq!(position.param("NodeY"), Some("5"));
}

#[test]
fn moves_without_primary_button_are_ignored() {
    let mut session = session();
    open_with_nodes(&mut session, "d1", &[("n1", "Element")]);

    session.cell_pointer_down(&element("n1"), MouseButton::Secondary);
    assert!(!session.position_changed(&element("n1"), Point::new(1.0, 1.0)));
    assert_eq!(session.cell_pointer_up(MouseButton::Secondary), 0);
}

#[test]
fn unknown_notification_is_unhandled_and_changes_nothing() {
    let mut session = session();
    handle_ok(&mut session, tree_node(NotificationKind::AddTreeNode, "c1", "", "Thing"));
    session.view_mut().clear();

    let ack = session.handle_text(
        r#"{"Notification":"Bogus","NotificationConceptID":"c1","AdditionalParameters":{}}"#,
    );

    assert_eq!(ack, Ack::unhandled());
    assert!(session.view().changes().is_empty());
    assert!(session.requests().is_empty());
    assert_eq!(session.tree().len(), 1);
}

#[test]
fn malformed_frames_are_acked_as_errors() {
    let mut session = session();

    let ack = session.handle_text("{not json");

    assert_eq!(ack.result, 1);
    assert!(ack.error_message.starts_with("Malformed notification: "));
}

#[test]
fn unknown_link_type_is_an_error_ack() {
    let mut session = session();
    open_with_nodes(&mut session, "d1", &[("a", "Element"), ("b", "Element")]);

    let ack = session.handle_notification(&diagram_link(
        NotificationKind::AddDiagramLink,
        "d1",
        "l1",
        "Zigzag",
        "a",
        "b",
    ));

    assert_eq!(ack.result, 1);
    assert!(ack.error_message.contains("Zigzag"));
    assert!(session.diagrams().pending().is_empty());
}

#[test]
fn pointers_delivered_before_their_refinement_materialize() {
    let mut session = session();
    open_with_nodes(&mut session, "d1", &[("abs", "Element"), ("ref", "Element")]);

    for notification in [
        diagram_link(NotificationKind::AddDiagramLink, "d1", "pr", "RefinedPointer", "r", "ref"),
        diagram_link(NotificationKind::AddDiagramLink, "d1", "pa", "AbstractPointer", "r", "abs"),
        diagram_link(NotificationKind::AddDiagramLink, "d1", "r", "RefinementLink", "ref", "abs"),
    ] {
        handle_ok(&mut session, notification);
    }

    assert!(session.diagrams().pending().is_empty());
    let graph = session.diagrams().graph(&cid("d1")).expect("graph");
    for id in ["r", "pa", "pr"] {
        assert!(graph.link(&element(id)).is_some(), "{id} not drawn");
    }
    assert_eq!(graph.link(&element("pa")).map(|link| &link.source), Some(&element("r")));
}

#[test]
fn does_link_exist_answers_with_a_boolean_ack() {
    let mut session = session();
    open_with_nodes(&mut session, "d1", &[("a", "Element"), ("b", "Element")]);
    let query = Notification {
        name: NotificationKind::DoesLinkExist.as_str().to_owned(),
        ..diagram_link(NotificationKind::AddDiagramLink, "d1", "l1", "OwnerPointer", "a", "b")
    };

    assert_eq!(session.handle_notification(&query), Ack::boolean(false));

    handle_ok(
        &mut session,
        diagram_link(NotificationKind::AddDiagramLink, "d1", "l1", "OwnerPointer", "a", "b"),
    );
    assert_eq!(session.handle_notification(&query), Ack::boolean(true));
}

#[test]
fn deleted_elements_leave_the_graph() {
    let mut session = session();
    open_with_nodes(&mut session, "d1", &[("a", "Element")]);

    handle_ok(&mut session, delete_element("d1", "a"));

    assert!(session.diagrams().graph(&cid("d1")).is_some_and(|graph| graph.is_empty()));
}

#[test]
fn elements_for_an_unopened_diagram_are_acked_and_ignored() {
    let mut session = session();
    handle_ok(&mut session, display_diagram("d1", "Open"));
    session.view_mut().clear();

    let acks: Vec<_> = [
        diagram_node(NotificationKind::AddDiagramNode, "d9", "a", "Element", 10.0, 20.0),
        diagram_link(NotificationKind::AddDiagramLink, "d9", "l1", "ReferenceLink", "a", "b"),
        delete_element("d9", "a"),
    ]
    .iter()
    .map(|notification| session.handle_notification(notification))
    .collect();

    assert_eq!(acks, vec![Ack::ok(), Ack::ok(), Ack::ok()]);
    assert_eq!(session.view().surface_changes().count(), 0);
    assert!(session.diagrams().pending().is_empty());
    assert!(session.diagrams().graph(&cid("d1")).is_some_and(|graph| graph.is_empty()));
    assert!(session.requests().is_empty());
}

#[test]
fn server_close_flushes_moves_then_reports_closure() {
    let mut session = session();
    open_with_nodes(&mut session, "d1", &[("n1", "Element")]);
    session.cell_pointer_down(&element("n1"), MouseButton::Primary);
    session.position_changed(&element("n1"), Point::new(7.0, 8.0));
    take_requests(&mut session);

    handle_ok(
        &mut session,
        Notification::new(NotificationKind::CloseDiagramView).with_concept_id("d1"),
    );

    let actions: Vec<_> = take_requests(&mut session).iter().map(|r| r.action).collect();
    assert_eq!(actions, vec![Action::DiagramNodeNewPosition, Action::DiagramViewHasBeenClosed]);
    assert!(!session.diagrams().is_open(&cid("d1")));
}

#[test]
fn clear_diagrams_does_not_notify_the_server() {
    let mut session = session();
    open_with_nodes(&mut session, "d1", &[("n1", "Element")]);
    handle_ok(&mut session, display_diagram("d2", "Two"));

    handle_ok(&mut session, Notification::new(NotificationKind::ClearDiagrams));

    assert!(session.requests().is_empty());
    assert_eq!(session.diagrams().open_diagrams().count(), 0);
}

#[test]
fn user_close_tears_down_the_current_diagram() {
    let mut session = session();
    assert!(!session.close_current_diagram());
    handle_ok(&mut session, display_diagram("d1", "One"));

    assert!(session.close_current_diagram());

    let requests = take_requests(&mut session);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].action, Action::DiagramViewHasBeenClosed);
    assert_eq!(requests[0].concept_id.as_deref(), Some("d1"));
}

#[test]
fn refresh_resets_everything_and_reloads() {
    let mut session = session();
    handle_ok(&mut session, tree_node(NotificationKind::AddTreeNode, "c1", "", "Thing"));
    handle_ok(&mut session, selected("c1"));
    open_with_nodes(&mut session, "d1", &[("n1", "Element")]);
    session.view_mut().clear();

    handle_ok(&mut session, Notification::new(NotificationKind::Refresh));

    assert!(session.tree().is_empty());
    assert_eq!(session.diagrams().open_diagrams().count(), 0);
    assert_eq!(session.selection().selected(), None);
    assert_eq!(session.view().changes().last(), Some(&ViewChange::Reload));
}

#[test]
fn settings_notifications_are_stored() {
    let mut session = session();

    handle_ok(
        &mut session,
        Notification::new(NotificationKind::DebugSettings)
            .with_param("EnableNotificationTracing", "true")
            .with_param("OmitDiagramRelatedCalls", "true")
            .with_param("MaxTracingDepth", "4"),
    );
    handle_ok(
        &mut session,
        Notification::new(NotificationKind::UserPreferences)
            .with_param("DropReferenceAsLink", "true"),
    );
    handle_ok(
        &mut session,
        Notification::new(NotificationKind::WorkspacePath).with_param("WorkspacePath", "/tmp/ws"),
    );
    handle_ok(&mut session, Notification::new(NotificationKind::InitializationComplete));

    let debug = session.debug_settings();
    assert_eq!(debug.max_tracing_depth, 4);
    assert!(debug.traces(NotificationKind::AddTreeNode));
    assert!(!debug.traces(NotificationKind::AddDiagramNode));
    assert!(session.preferences().drop_reference_as_link);
    assert!(!session.preferences().drop_refinement_as_link);
    assert_eq!(session.workspace_path(), "/tmp/ws");
    assert!(session.is_initialized());
}

#[test]
fn diagram_click_needs_a_creation_tool() {
    let mut session = session();
    assert!(!session.diagram_clicked(&cid("d1"), Point::new(1.0, 2.0)));

    session.select_tool(Tool::Literal);
    assert!(session.diagram_clicked(&cid("d1"), Point::new(1.0, 2.0)));

    let request = &take_requests(&mut session)[0];
    assert_eq!(request.action, Action::DiagramClick);
    assert_eq!(request.concept_id, None);
    assert_eq!(request.param("DiagramID"), Some("d1"));
    assert_eq!(request.param("NodeType"), Some("Literal"));

    handle_ok(&mut session, Notification::new(NotificationKind::ClearToolbarSelection));
    assert_eq!(session.active_tool(), Tool::Cursor);
}

#[test]
fn reference_link_onto_a_pointer_names_the_target_attribute() {
    let mut session = session();
    open_with_nodes(
        &mut session,
        "d1",
        &[("ref", "Reference"), ("lit", "Literal"), ("e", "Element")],
    );
    handle_ok(
        &mut session,
        diagram_link(NotificationKind::AddDiagramLink, "d1", "op", "OwnerPointer", "lit", "e"),
    );
    session.view_mut().clear();

    session.select_tool(Tool::ReferenceLink);
    assert_eq!(session.link_start(&cid("d1"), &element("ref")), Some(LinkKind::ReferenceLink));

    let connected = session.link_connected(&LinkConnection {
        diagram: cid("d1"),
        kind: LinkKind::ReferenceLink,
        link: None,
        source: element("ref"),
        target: element("op"),
    });

    assert!(connected);
    let request = &take_requests(&mut session)[0];
    assert_eq!(request.action, Action::ReferenceLinkChanged);
    assert_eq!(request.concept_id.as_deref(), Some(""));
    assert_eq!(request.param("SourceID"), Some("ref"));
    assert_eq!(request.param("TargetID"), Some("op"));
    assert_eq!(request.param("TargetAttributeName"), Some("OwningConceptID"));
    assert!(session
        .view()
        .surface_changes()
        .any(|change| matches!(change, SurfaceChange::DiscardTransientLink { .. })));
}

#[test]
fn refinement_links_cannot_end_on_pointers() {
    let mut session = session();
    open_with_nodes(&mut session, "d1", &[("lit", "Literal"), ("e", "Element")]);
    handle_ok(
        &mut session,
        diagram_link(NotificationKind::AddDiagramLink, "d1", "op", "OwnerPointer", "lit", "e"),
    );

    assert!(!session.can_connect(&cid("d1"), LinkKind::RefinementLink, &element("op")));
    let connected = session.link_connected(&LinkConnection {
        diagram: cid("d1"),
        kind: LinkKind::RefinementLink,
        link: Some(cid("rl")),
        source: element("lit"),
        target: element("op"),
    });

    assert!(!connected);
    assert!(session.requests().is_empty());
}

#[test]
fn copied_format_pastes_onto_another_element() {
    let mut session = session();
    handle_ok(&mut session, display_diagram("d1", "One"));
    handle_ok(
        &mut session,
        diagram_node(NotificationKind::AddDiagramNode, "d1", "a", "Element", 0.0, 0.0)
            .with_param("LineColor", "#112233")
            .with_param("BGColor", "#ffeedd"),
    );

    assert!(!session.paste_format(&element("b")));
    assert!(session.cell_menu_selected(&cid("d1"), &element("a"), CellMenuItem::CopyFormat));
    assert!(session.cell_menu_selected(&cid("d1"), &element("b"), CellMenuItem::PasteFormat));

    let request = &take_requests(&mut session)[0];
    assert_eq!(request.action, Action::FormatChanged);
    assert_eq!(request.concept_id.as_deref(), Some("b"));
    assert_eq!(request.param("LineColor"), Some("#112233"));
    assert_eq!(request.param("BGColor"), Some("#ffeedd"));
}

#[test]
fn cell_menu_items_request_about_the_element() {
    let mut session = session();

    assert!(session.cell_menu_selected(&cid("d1"), &element("a"), CellMenuItem::ShowOwner));
    assert!(!session.cell_menu_selected(&cid("d1"), &element("a"), CellMenuItem::EditFormat));

    let requests = take_requests(&mut session);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].action, Action::ShowOwner);
    assert_eq!(requests[0].concept_id.as_deref(), Some("a"));
}

#[test]
fn property_edits_follow_editability() {
    let mut session = session();
    assert!(!session.property_edited(PropertyField::Label, "x"));

    handle_ok(&mut session, selected("c1"));
    assert!(session.property_edited(PropertyField::Definition, "a \"quoted\" thing"));

    let request = &take_requests(&mut session)[0];
    assert_eq!(request.action, Action::DefinitionChanged);
    assert_eq!(request.param("NewValue"), Some("a quoted thing"));
}

#[test]
fn tree_gestures_carry_the_concept_id() {
    let mut session = session();
    let node = TreeNodeId::from_concept(&cid("c1"));

    session.tree_drag_started(&node);
    session.editor_drop();
    session.tab_clicked(&cid("d1"));
    session.command(SessionCommand::Undo);
    session.display_call_graph(2);
    session.refresh_diagram(&cid("d1"));
    session.show_concept_in_navigator(&cid("c1"));

    let requests = take_requests(&mut session);
    let summary: Vec<_> =
        requests.iter().map(|request| (request.action, request.concept_id.as_deref())).collect();
    assert_eq!(
        summary,
        vec![
            (Action::SetTreeDragSelection, Some("c1")),
            (Action::SetTreeDragSelection, Some("")),
            (Action::DisplayDiagramSelected, Some("d1")),
            (Action::Undo, None),
            (Action::DisplayCallGraph, None),
            (Action::RefreshDiagram, Some("d1")),
            (Action::ShowConceptInNavigator, Some("c1")),
        ]
    );
    assert_eq!(requests[4].param("GraphIndex"), Some("2"));
}

#[test]
fn rejected_replies_alert_unless_automated() {
    let rejected = Reply { result: 1, result_description: "nope".to_owned(), ..Reply::default() };

    let mut interactive = session();
    interactive.reply_received(Action::Undo, &rejected);
    assert_eq!(interactive.view().alerts(), vec!["nope"]);

    let mut automated = Session::new(
        RecordingView::new(),
        Vec::new(),
        SessionOptions { automated_test: true },
    );
    automated.reply_received(Action::Undo, &rejected);
    assert!(automated.view().alerts().is_empty());
}

#[test]
fn connection_loss_flushes_and_releases_drags() {
    let mut session = session();
    open_with_nodes(&mut session, "d1", &[("n1", "Element")]);
    session.cell_pointer_down(&element("n1"), MouseButton::Primary);
    session.position_changed(&element("n1"), Point::new(3.0, 4.0));
    take_requests(&mut session);

    session.connection_lost();

    assert!(!session.is_dragging());
    assert_eq!(take_requests(&mut session)[0].action, Action::DiagramNodeNewPosition);
}
