// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{ConceptState, Notification, NotificationKind};
use crate::model::ConceptId;

pub(crate) fn cid(value: &str) -> ConceptId {
    ConceptId::new(value).expect("concept id")
}

pub(crate) fn state(concept_id: &str, concept_type: &str, owner: &str, label: &str) -> ConceptState {
    ConceptState {
        concept_id: concept_id.to_owned(),
        concept_type: concept_type.to_owned(),
        owning_concept_id: owner.to_owned(),
        label: label.to_owned(),
        version: "1".to_owned(),
        ..ConceptState::default()
    }
}

pub(crate) fn tree_node(kind: NotificationKind, id: &str, owner: &str, label: &str) -> Notification {
    Notification::new(kind)
        .with_concept_id(id)
        .with_state(state(id, "*core.element", owner, label))
        .with_param("icon", "/icons/ElementIcon.svg")
        .with_param("isDiagram", "false")
}

pub(crate) fn display_diagram(diagram: &str, label: &str) -> Notification {
    Notification::new(NotificationKind::DisplayDiagram)
        .with_concept_id(diagram)
        .with_state(state(diagram, "*core.element", "", label))
}

pub(crate) fn diagram_node(
    kind: NotificationKind,
    diagram: &str,
    node: &str,
    represents: &str,
    x: f64,
    y: f64,
) -> Notification {
    Notification::new(kind)
        .with_concept_id(node)
        .with_state(state(node, "*core.element", diagram, node))
        .with_param("NodeX", x.to_string())
        .with_param("NodeY", y.to_string())
        .with_param("NodeWidth", "120")
        .with_param("NodeHeight", "40")
        .with_param("DisplayLabel", node)
        .with_param("Icon", "/icons/ElementIcon.svg")
        .with_param("Abstractions", "")
        .with_param("DisplayLabelYOffset", "12")
        .with_param("Represents", represents)
}

pub(crate) fn diagram_link(
    kind: NotificationKind,
    diagram: &str,
    link: &str,
    link_type: &str,
    source: &str,
    target: &str,
) -> Notification {
    Notification::new(kind)
        .with_concept_id(link)
        .with_state(state(link, "*core.element", diagram, link))
        .with_param("LinkType", link_type)
        .with_param("LinkSourceID", source)
        .with_param("LinkTargetID", target)
        .with_param("DisplayLabel", link)
}

pub(crate) fn delete_element(diagram: &str, element: &str) -> Notification {
    Notification::new(NotificationKind::DeleteDiagramElement)
        .with_concept_id(element)
        .with_state(state(element, "*core.element", diagram, element))
        .with_param("OwnerID", diagram)
}
