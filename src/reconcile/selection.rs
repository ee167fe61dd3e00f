// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The single selected concept and the property panel that shows it.
//!
//! Only `ElementSelected` changes the selection. Clicks in the tree or on the canvas just send a
//! request; the server answers with the notification. When the selection moves the tree
//! highlight along, the select is marked so the widget does not echo it back, and an echo that
//! arrives anyway is dropped because it names the concept that is already selected.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;
use smallvec::SmallVec;

use crate::model::{ConceptId, ConceptType, TreeNodeId};
use crate::protocol::{Action, ConceptState, Notification, Request};
use crate::view::{TreeChange, View, ViewChange};

/// Property fields the user may edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyField {
    Label,
    Definition,
    Uri,
    LiteralValue,
}

impl PropertyField {
    pub fn action(self) -> Action {
        match self {
            Self::Label => Action::LabelChanged,
            Self::Definition => Action::DefinitionChanged,
            Self::Uri => Action::UriChanged,
            Self::LiteralValue => Action::LiteralValueChanged,
        }
    }

    /// Strips characters the server cannot take in a value. URIs keep their slashes.
    pub fn sanitize(self, raw: &str) -> Cow<'_, str> {
        static VALUE: OnceLock<Option<Regex>> = OnceLock::new();
        static URI: OnceLock<Option<Regex>> = OnceLock::new();

        let pattern = match self {
            Self::Uri => URI.get_or_init(|| Regex::new(r#"[\\\x08\x0C\n\r\t"]"#).ok()),
            _ => VALUE.get_or_init(|| Regex::new(r#"[\\/\x08\x0C\n\r\t"]"#).ok()),
        };
        match pattern {
            Some(pattern) => pattern.replace_all(raw, ""),
            None => Cow::Borrowed(raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRow {
    pub label: &'static str,
    pub value: String,
    /// Set on rows backed by an input; `editable` says whether it accepts keystrokes.
    pub field: Option<PropertyField>,
    pub editable: bool,
}

impl PropertyRow {
    fn text(label: &'static str, value: impl Into<String>) -> Self {
        Self { label, value: value.into(), field: None, editable: false }
    }

    fn input(label: &'static str, value: &str, field: PropertyField, editable: bool) -> Self {
        Self { label, value: value.to_owned(), field: Some(field), editable }
    }
}

/// Rendered property panel. Eight common rows, then up to two type-specific ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyForm {
    pub concept_id: String,
    pub rows: SmallVec<[PropertyRow; 10]>,
}

impl PropertyForm {
    pub fn row(&self, label: &str) -> Option<&PropertyRow> {
        self.rows.iter().find(|row| row.label == label)
    }
}

pub fn render_properties(notification: &Notification) -> PropertyForm {
    let state: &ConceptState = &notification.state;
    let editable = state.is_editable();
    let concept_id = if notification.concept_id.is_empty() {
        state.concept_id.clone()
    } else {
        notification.concept_id.clone()
    };

    let mut rows: SmallVec<[PropertyRow; 10]> = SmallVec::new();
    rows.push(PropertyRow::text("Type", state.concept_type.as_str()));
    rows.push(PropertyRow::text("ID", concept_id.as_str()));
    rows.push(PropertyRow::text("Owning Concept ID", state.owning_concept_id.as_str()));
    rows.push(PropertyRow::text("Version", state.version.as_str()));
    rows.push(PropertyRow::input("Label", &state.label, PropertyField::Label, editable));
    rows.push(PropertyRow::input(
        "Definition",
        &state.definition,
        PropertyField::Definition,
        editable,
    ));
    rows.push(PropertyRow::input("URI", &state.uri, PropertyField::Uri, editable));
    rows.push(PropertyRow::text("Read Only", if state.read_only { "true" } else { "false" }));

    match state.concept_type() {
        ConceptType::Literal => rows.push(PropertyRow::input(
            "Literal Value",
            &state.literal_value,
            PropertyField::LiteralValue,
            editable,
        )),
        ConceptType::Reference => {
            rows.push(PropertyRow::text(
                "Referenced Concept ID",
                state.referenced_concept_id.as_str(),
            ));
            rows.push(PropertyRow::text(
                "Referenced AttributeName",
                state.referenced_attribute_name.as_str(),
            ));
        }
        ConceptType::Refinement => {
            rows.push(PropertyRow::text("Abstract Concept ID", state.abstract_concept_id.as_str()));
            rows.push(PropertyRow::text("Refined Concept ID", state.refined_concept_id.as_str()));
        }
        ConceptType::Element | ConceptType::Diagram | ConceptType::Other(_) => {}
    }

    PropertyForm { concept_id, rows }
}

#[derive(Debug, Default)]
pub struct Selection {
    selected: Option<ConceptId>,
    editable: bool,
}

impl Selection {
    pub fn selected(&self) -> Option<&ConceptId> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, concept: &ConceptId) -> bool {
        self.selected.as_ref() == Some(concept)
    }

    /// Applies a server selection. Returns `false` when the concept was already selected.
    pub fn element_selected(&mut self, notification: &Notification, view: &mut impl View) -> bool {
        let concept =
            ConceptId::from_wire(&notification.concept_id).or_else(|| notification.subject_id());
        if concept == self.selected {
            return false;
        }
        self.selected = concept.clone();

        match concept {
            Some(concept) => {
                self.show(notification, view);
                let node = TreeNodeId::from_concept(&concept);
                view.tree(TreeChange::Select { node, suppress_event: true });
            }
            None => {
                self.editable = false;
                view.apply(ViewChange::ClearProperties);
            }
        }
        true
    }

    /// Re-renders the panel from a newer snapshot of the concept.
    pub fn show(&mut self, notification: &Notification, view: &mut impl View) {
        let form = render_properties(notification);
        if ConceptId::from_wire(&form.concept_id) == self.selected {
            self.editable = notification.state.is_editable();
        }
        view.apply(ViewChange::Properties(form));
    }

    /// The tree widget reported a selection. Echoes of the current selection are dropped.
    pub fn tree_node_selected(&self, node: &TreeNodeId) -> Option<Request> {
        if self.is_selected(node.concept_id()) {
            tracing::trace!(%node, "tree select echo suppressed");
            return None;
        }
        Some(Request::for_concept(Action::TreeNodeSelected, node.concept_id()))
    }

    /// A keystroke in a property input. Nothing is sent for read-only or unselected concepts.
    pub fn edit(&self, field: PropertyField, raw: &str) -> Option<Request> {
        let concept = self.selected.as_ref().filter(|_| self.editable)?;
        let value = field.sanitize(raw);
        Some(Request::for_concept(field.action(), concept).with_param("NewValue", value))
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.editable = false;
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::protocol::fixtures::state;
    use crate::protocol::NotificationKind;
    use crate::view::RecordingView;

    fn selected(id: &str, concept_type: &str) -> Notification {
        Notification::new(NotificationKind::ElementSelected)
            .with_concept_id(id)
            .with_state(state(id, concept_type, "owner", "Thing"))
    }

    #[rstest]
    #[case("*core.element", 8, None)]
    #[case("*core.literal", 9, Some("Literal Value"))]
    #[case("*core.reference", 10, Some("Referenced AttributeName"))]
    #[case("*core.refinement", 10, Some("Refined Concept ID"))]
    fn rows_depend_on_concept_type(
        #[case] concept_type: &str,
        #[case] rows: usize,
        #[case] last: Option<&str>,
    ) {
        let form = render_properties(&selected("c1", concept_type));
        assert_eq!(form.rows.len(), rows);
        if let Some(last) = last {
            assert_eq!(form.rows.last().map(|row| row.label), Some(last));
        }
        assert_eq!(form.row("ID").map(|row| row.value.as_str()), Some("c1"));
    }

    #[test]
    fn core_concepts_render_read_only_inputs() {
        let mut notification = selected("c1", "*core.literal");
        notification.state.is_core = true;

        let form = render_properties(&notification);

        assert!(form.rows.iter().filter(|row| row.field.is_some()).all(|row| !row.editable));
    }

    #[test]
    fn selection_highlights_tree_without_echo() {
        let mut selection = Selection::default();
        let mut view = RecordingView::new();

        assert!(selection.element_selected(&selected("c1", "*core.element"), &mut view));
        assert!(!selection.element_selected(&selected("c1", "*core.element"), &mut view));

        let node = TreeNodeId::from_concept(&ConceptId::new("c1").expect("id"));
        assert_eq!(
            view.tree_changes().collect::<Vec<_>>(),
            vec![&TreeChange::Select { node: node.clone(), suppress_event: true }]
        );
        assert_eq!(selection.tree_node_selected(&node), None);

        let other = TreeNodeId::from_concept(&ConceptId::new("c2").expect("id"));
        let request = selection.tree_node_selected(&other).expect("request");
        assert_eq!(request.action, Action::TreeNodeSelected);
        assert_eq!(request.concept_id.as_deref(), Some("c2"));
    }

    #[test]
    fn edits_are_stripped_and_gated() {
        let mut selection = Selection::default();
        let mut view = RecordingView::new();
        assert_eq!(selection.edit(PropertyField::Label, "x"), None);

        selection.element_selected(&selected("c1", "*core.element"), &mut view);
        let request = selection.edit(PropertyField::Label, "a\"b\\c/d\te").expect("request");
        assert_eq!(request.param("NewValue"), Some("abcde"));

        let uri = selection.edit(PropertyField::Uri, "http://x.org/a\n").expect("request");
        assert_eq!(uri.action, Action::UriChanged);
        assert_eq!(uri.param("NewValue"), Some("http://x.org/a"));

        let mut read_only = selected("c2", "*core.element");
        read_only.state.read_only = true;
        selection.element_selected(&read_only, &mut view);
        assert_eq!(selection.edit(PropertyField::Definition, "nope"), None);
    }
}
