// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smallvec::SmallVec;

use crate::model::Represents;
use crate::protocol::Action;

/// Entries of the context menu on a drawn node or link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellMenuItem {
    ShowOwner,
    ShowReferencedConcept,
    NullifyReferencedConcept,
    ShowAbstractConcept,
    ShowRefinedConcept,
    ShowModelConceptInNavigator,
    ShowDiagramElementInNavigator,
    ShowOwnedConcepts,
    DeleteView,
    EditFormat,
    CopyFormat,
    PasteFormat,
}

impl CellMenuItem {
    /// Server action for items that are a plain request about the element.
    pub fn action(self) -> Option<Action> {
        Some(match self {
            Self::ShowOwner => Action::ShowOwner,
            Self::ShowReferencedConcept => Action::ShowReferencedConcept,
            Self::NullifyReferencedConcept => Action::NullifyReferencedConcept,
            Self::ShowAbstractConcept => Action::ShowAbstractConcept,
            Self::ShowRefinedConcept => Action::ShowRefinedConcept,
            Self::ShowModelConceptInNavigator => Action::ShowModelConceptInNavigator,
            Self::ShowDiagramElementInNavigator => Action::ShowDiagramElementInNavigator,
            Self::ShowOwnedConcepts => Action::ShowOwnedConcepts,
            Self::DeleteView => Action::DeleteDiagramElementView,
            Self::EditFormat | Self::CopyFormat | Self::PasteFormat => return None,
        })
    }
}

/// Menu items for an element that represents `represents`.
pub fn cell_context_menu(represents: Option<Represents>) -> SmallVec<[CellMenuItem; 12]> {
    let mut items = SmallVec::new();
    if !represents.is_some_and(Represents::is_pointer) {
        items.push(CellMenuItem::ShowOwner);
    }
    if represents == Some(Represents::Reference) {
        items.push(CellMenuItem::ShowReferencedConcept);
        items.push(CellMenuItem::NullifyReferencedConcept);
    }
    if represents == Some(Represents::Refinement) {
        items.push(CellMenuItem::ShowAbstractConcept);
        items.push(CellMenuItem::ShowRefinedConcept);
    }
    items.extend([
        CellMenuItem::ShowModelConceptInNavigator,
        CellMenuItem::ShowDiagramElementInNavigator,
        CellMenuItem::ShowOwnedConcepts,
        CellMenuItem::DeleteView,
        CellMenuItem::EditFormat,
        CellMenuItem::CopyFormat,
        CellMenuItem::PasteFormat,
    ]);
    items
}
