// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::wire::{null_as_default, string_bool, string_or_number};
use crate::model::{ConceptId, ConceptType};

/// Snapshot of a concept as sent by the server. Always replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "PascalCase")]
pub struct ConceptState {
    #[serde(rename = "ConceptID")]
    pub concept_id: String,
    pub concept_type: String,
    #[serde(rename = "OwningConceptID")]
    pub owning_concept_id: String,
    pub label: String,
    pub definition: String,
    #[serde(rename = "URI")]
    pub uri: String,
    #[serde(deserialize_with = "string_or_number")]
    #[schemars(with = "String")]
    pub version: String,
    #[serde(with = "string_bool")]
    #[schemars(with = "String")]
    pub is_core: bool,
    #[serde(with = "string_bool")]
    #[schemars(with = "String")]
    pub read_only: bool,
    pub literal_value: String,
    #[serde(rename = "ReferencedConceptID")]
    pub referenced_concept_id: String,
    pub referenced_attribute_name: String,
    #[serde(rename = "AbstractConceptID")]
    pub abstract_concept_id: String,
    #[serde(rename = "RefinedConceptID")]
    pub refined_concept_id: String,
}

impl ConceptState {
    pub fn concept_type(&self) -> ConceptType {
        ConceptType::from_wire(&self.concept_type)
    }

    pub fn owner(&self) -> Option<ConceptId> {
        ConceptId::from_wire(&self.owning_concept_id)
    }

    /// Label, definition, URI and literal value may only be edited on user concepts.
    pub fn is_editable(&self) -> bool {
        !self.is_core && !self.read_only
    }
}

/// Server → client push message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Notification {
    #[serde(rename = "Notification")]
    pub name: String,
    #[serde(rename = "NotificationConceptID", default)]
    pub concept_id: String,
    #[serde(rename = "NotificationConceptState", default, deserialize_with = "null_as_default")]
    #[schemars(with = "ConceptState")]
    pub state: ConceptState,
    #[serde(rename = "AdditionalParameters", default, deserialize_with = "null_as_default")]
    #[schemars(with = "BTreeMap<String, String>")]
    pub params: BTreeMap<String, String>,
}

impl Notification {
    pub fn new(kind: NotificationKind) -> Self {
        Self { name: kind.as_str().to_owned(), ..Self::default() }
    }

    pub fn with_concept_id(mut self, concept_id: impl Into<String>) -> Self {
        self.concept_id = concept_id.into();
        self
    }

    pub fn with_state(mut self, state: ConceptState) -> Self {
        self.state = state;
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn kind(&self) -> Option<NotificationKind> {
        NotificationKind::parse(&self.name)
    }

    /// The concept the notification is about: the state's id, else the envelope id.
    pub fn subject_id(&self) -> Option<ConceptId> {
        ConceptId::from_wire(&self.state.concept_id)
            .or_else(|| ConceptId::from_wire(&self.concept_id))
    }

    pub fn param(&self, key: &str) -> &str {
        self.params.get(key).map(String::as_str).unwrap_or_default()
    }

    pub fn param_opt(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str).filter(|value| !value.is_empty())
    }

    /// Numeric parameter; missing or malformed values read as zero.
    pub fn param_f64(&self, key: &str) -> f64 {
        let raw = self.param(key).trim();
        if raw.is_empty() {
            return 0.0;
        }
        raw.parse().unwrap_or_else(|_| {
            tracing::debug!(key, raw, "non-numeric notification parameter");
            0.0
        })
    }

    pub fn param_bool(&self, key: &str) -> bool {
        self.param(key).trim().eq_ignore_ascii_case("true")
    }
}

macro_rules! notification_kinds {
    ($($variant:ident),* $(,)?) => {
        /// Closed set of notification names the client understands.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum NotificationKind {
            $($variant,)*
        }

        impl NotificationKind {
            pub const ALL: &'static [NotificationKind] = &[$(Self::$variant,)*];

            pub fn parse(name: &str) -> Option<Self> {
                match name {
                    $(stringify!($variant) => Some(Self::$variant),)*
                    _ => None,
                }
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)*
                }
            }
        }
    };
}

notification_kinds!(
    AddDiagramLink,
    AddDiagramNode,
    AddTreeNode,
    ChangeTreeNode,
    ClearDiagrams,
    ClearToolbarSelection,
    ClearTree,
    CloseDiagramView,
    DebugSettings,
    DeleteDiagramElement,
    DeleteTreeNode,
    DiagramLabelChanged,
    DisplayDiagram,
    DisplayGraph,
    DoesLinkExist,
    UserPreferences,
    ElementSelected,
    InitializationComplete,
    Refresh,
    ShowTreeNode,
    UpdateDiagramLink,
    UpdateDiagramNode,
    UpdateProperties,
    WorkspacePath,
);

impl NotificationKind {
    /// Tree bookkeeping, filtered by the `OmitManageTreeNodesCalls` debug setting.
    pub fn is_tree_management(self) -> bool {
        matches!(
            self,
            Self::AddTreeNode | Self::ChangeTreeNode | Self::DeleteTreeNode | Self::ClearTree
        )
    }

    /// Canvas traffic, filtered by the `OmitDiagramRelatedCalls` debug setting.
    pub fn is_diagram_related(self) -> bool {
        matches!(
            self,
            Self::AddDiagramLink
                | Self::AddDiagramNode
                | Self::ClearDiagrams
                | Self::CloseDiagramView
                | Self::DeleteDiagramElement
                | Self::DiagramLabelChanged
                | Self::DisplayDiagram
                | Self::DoesLinkExist
                | Self::UpdateDiagramLink
                | Self::UpdateDiagramNode
        )
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const UNHANDLED_NOTIFICATION: &str = "Unhandled notification";
const PLACEHOLDER_RESULT_CONCEPT_ID: &str = "none";

/// Client → server acknowledgment, one per notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct Ack {
    pub result: i32,
    pub error_message: String,
    #[serde(rename = "ResultConceptID", default, skip_serializing_if = "Option::is_none")]
    pub result_concept_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boolean_value: Option<String>,
}

impl Ack {
    pub fn ok() -> Self {
        Self {
            result: 0,
            error_message: "none".to_owned(),
            result_concept_id: None,
            boolean_value: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            result: 1,
            error_message: message.into(),
            result_concept_id: None,
            boolean_value: None,
        }
    }

    pub fn unhandled() -> Self {
        Self::error(UNHANDLED_NOTIFICATION)
    }

    /// Answer to a frame that did not decode as a notification.
    pub fn malformed(err: impl fmt::Display) -> Self {
        Self::error(format!("Malformed notification: {err}"))
    }

    pub fn boolean(value: bool) -> Self {
        Self {
            result_concept_id: Some(PLACEHOLDER_RESULT_CONCEPT_ID.to_owned()),
            boolean_value: Some(if value { "true" } else { "false" }.to_owned()),
            ..Self::ok()
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result == 0
    }
}
