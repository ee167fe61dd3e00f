// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{LinkKind, Represents};
use crate::view::{View, ViewChange};

/// Toolbar tools. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tool {
    #[default]
    Cursor,
    Element,
    Literal,
    Reference,
    ReferenceLink,
    Refinement,
    RefinementLink,
    Diagram,
    OwnerPointer,
    ElementPointer,
    AbstractPointer,
    RefinedPointer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    /// Shown over the canvas while a node-creation tool is active.
    Cell,
}

impl Tool {
    /// Toolbar order.
    pub const ALL: [Tool; 12] = [
        Self::Cursor,
        Self::Element,
        Self::Literal,
        Self::Reference,
        Self::ReferenceLink,
        Self::Refinement,
        Self::RefinementLink,
        Self::Diagram,
        Self::OwnerPointer,
        Self::ElementPointer,
        Self::AbstractPointer,
        Self::RefinedPointer,
    ];

    pub fn button_id(self) -> &'static str {
        match self {
            Self::Cursor => "cursorToolbarButton",
            Self::Element => "elementToolbarButton",
            Self::Literal => "literalToolbarButton",
            Self::Reference => "referenceToolbarButton",
            Self::ReferenceLink => "referenceLinkToolbarButton",
            Self::Refinement => "refinementToolbarButton",
            Self::RefinementLink => "refinementLinkToolbarButton",
            Self::Diagram => "diagramToolbarButton",
            Self::OwnerPointer => "ownerPointerToolbarButton",
            Self::ElementPointer => "elementPointerToolbarButton",
            Self::AbstractPointer => "abstractPointerToolbarButton",
            Self::RefinedPointer => "refinedPointerToolbarButton",
        }
    }

    pub fn from_button_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.button_id() == id)
    }

    /// `NodeType` sent with a diagram click, for node-creation tools only.
    pub fn node_type(self) -> Option<&'static str> {
        match self {
            Self::Element => Some("Element"),
            Self::Literal => Some("Literal"),
            Self::Reference => Some("Reference"),
            Self::Refinement => Some("Refinement"),
            Self::Diagram => Some("Diagram"),
            _ => None,
        }
    }

    /// Kind of link a drag from a connection point starts with this tool.
    pub fn default_link(self) -> Option<LinkKind> {
        match self {
            Self::ReferenceLink => Some(LinkKind::ReferenceLink),
            Self::RefinementLink => Some(LinkKind::RefinementLink),
            Self::OwnerPointer => Some(LinkKind::OwnerPointer),
            Self::ElementPointer => Some(LinkKind::ElementPointer),
            Self::AbstractPointer => Some(LinkKind::AbstractPointer),
            Self::RefinedPointer => Some(LinkKind::RefinedPointer),
            _ => None,
        }
    }

    /// Whether a link drag may start on an element representing `source`.
    pub fn can_start_link_from(self, source: Option<Represents>) -> bool {
        let Some(source) = source else {
            return false;
        };
        match self {
            Self::ReferenceLink | Self::RefinementLink | Self::OwnerPointer => {
                source.is_model_concept()
            }
            Self::ElementPointer => source == Represents::Reference,
            Self::AbstractPointer | Self::RefinedPointer => source == Represents::Refinement,
            Self::Cursor
            | Self::Element
            | Self::Literal
            | Self::Reference
            | Self::Refinement
            | Self::Diagram => false,
        }
    }

    pub fn cursor_hint(self) -> CursorHint {
        if self.node_type().is_some() {
            CursorHint::Cell
        } else {
            CursorHint::Default
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Toolbar {
    active: Tool,
}

impl Toolbar {
    pub fn active(&self) -> Tool {
        self.active
    }

    pub fn select(&mut self, tool: Tool, view: &mut impl View) {
        self.active = tool;
        view.apply(ViewChange::Toolbar { active: tool, cursor: tool.cursor_hint() });
    }

    /// Link kind to start from an element representing `source`, if the active tool allows it.
    pub fn link_start(&self, source: Option<Represents>) -> Option<LinkKind> {
        self.active.default_link().filter(|_| self.active.can_start_link_from(source))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::view::RecordingView;

    #[rstest]
    #[case(Tool::ReferenceLink, Represents::Literal, true)]
    #[case(Tool::RefinementLink, Represents::Reference, true)]
    #[case(Tool::OwnerPointer, Represents::Refinement, true)]
    #[case(Tool::OwnerPointer, Represents::Diagram, false)]
    #[case(Tool::ElementPointer, Represents::Reference, true)]
    #[case(Tool::ElementPointer, Represents::Element, false)]
    #[case(Tool::AbstractPointer, Represents::Refinement, true)]
    #[case(Tool::RefinedPointer, Represents::Reference, false)]
    #[case(Tool::Cursor, Represents::Element, false)]
    #[case(Tool::Element, Represents::Element, false)]
    #[case(Tool::Diagram, Represents::Refinement, false)]
    fn link_start_legality(#[case] tool: Tool, #[case] source: Represents, #[case] expected: bool) {
        assert_eq!(tool.can_start_link_from(Some(source)), expected);
    }

    #[test]
    fn button_ids_round_trip() {
        for tool in Tool::ALL {
            assert_eq!(Tool::from_button_id(tool.button_id()), Some(tool));
        }
        assert_eq!(Tool::from_button_id("paintbrushToolbarButton"), None);
    }

    #[test]
    fn only_creation_tools_show_the_cell_cursor() {
        let cell: Vec<Tool> =
            Tool::ALL.into_iter().filter(|tool| tool.cursor_hint() == CursorHint::Cell).collect();
        assert_eq!(
            cell,
            vec![Tool::Element, Tool::Literal, Tool::Reference, Tool::Refinement, Tool::Diagram]
        );
    }

    #[test]
    fn select_reports_the_active_tool() {
        let mut toolbar = Toolbar::default();
        let mut view = RecordingView::new();
        toolbar.select(Tool::AbstractPointer, &mut view);

        assert_eq!(toolbar.link_start(Some(Represents::Refinement)), Some(LinkKind::AbstractPointer));
        assert_eq!(toolbar.link_start(Some(Represents::Element)), None);
        assert_eq!(
            view.changes(),
            &[ViewChange::Toolbar { active: Tool::AbstractPointer, cursor: CursorHint::Default }]
        );
    }
}
