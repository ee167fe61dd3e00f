// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::wire::null_as_default;
use crate::model::ConceptId;

/// Client-initiated action names. Serialized by variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Action {
    // Navigator tree
    AddElementChild,
    AddDiagramChild,
    AddLiteralChild,
    AddReferenceChild,
    AddRefinementChild,
    TreeNodeDelete,
    TreeNodeSelected,
    SetTreeDragSelection,
    // Diagram canvas
    DiagramClick,
    DiagramDrop,
    DiagramNodeNewPosition,
    DiagramElementSelected,
    DisplayDiagramSelected,
    DeleteDiagramElementView,
    FormatChanged,
    DiagramViewHasBeenClosed,
    RefreshDiagram,
    ReferenceLinkChanged,
    RefinementLinkChanged,
    OwnerPointerChanged,
    ElementPointerChanged,
    AbstractPointerChanged,
    RefinedPointerChanged,
    // Property panel
    LabelChanged,
    DefinitionChanged,
    #[serde(rename = "URIChanged")]
    UriChanged,
    LiteralValueChanged,
    // Workspace and session
    OpenWorkspace,
    SaveWorkspace,
    ClearWorkspace,
    CloseWorkspace,
    NewDomainRequest,
    Exit,
    Undo,
    Redo,
    UpdateUserPreferences,
    // Diagnostics and navigation
    UpdateDebugSettings,
    ReturnAvailableGraphCount,
    DisplayCallGraph,
    ShowOwner,
    ShowAbstractConcept,
    ShowReferencedConcept,
    ShowRefinedConcept,
    ShowModelConceptInNavigator,
    ShowDiagramElementInNavigator,
    ShowConceptInNavigator,
    ShowOwnedConcepts,
    NullifyReferencedConcept,
}

/// Envelope POSTed to the request endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Request {
    #[serde(rename = "Action")]
    pub action: Action,
    #[serde(rename = "RequestConceptID", default, skip_serializing_if = "Option::is_none")]
    pub concept_id: Option<String>,
    #[serde(rename = "AdditionalParameters", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
}

impl Request {
    pub fn new(action: Action) -> Self {
        Self { action, concept_id: None, params: BTreeMap::new() }
    }

    pub fn for_concept(action: Action, concept_id: &ConceptId) -> Self {
        Self::new(action).with_raw_concept_id(concept_id.as_str())
    }

    /// Some actions carry an empty id on purpose (e.g. a link drawn but not yet persisted).
    pub fn with_raw_concept_id(mut self, concept_id: impl Into<String>) -> Self {
        self.concept_id = Some(concept_id.into());
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Response body of the request endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "PascalCase")]
pub struct Reply {
    pub result: i32,
    pub result_description: String,
    #[serde(rename = "ResultConceptID")]
    pub result_concept_id: String,
    #[serde(deserialize_with = "null_as_default")]
    #[schemars(with = "BTreeMap<String, String>")]
    pub additional_parameters: BTreeMap<String, String>,
}

impl Reply {
    pub fn is_accepted(&self) -> bool {
        self.result == 0
    }

    /// Stand-in reply for a request that never reached the server.
    pub fn transport_failure(description: impl Into<String>) -> Self {
        Self { result: 1, result_description: description.into(), ..Self::default() }
    }
}
