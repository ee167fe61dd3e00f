// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use crate::model::{ConceptId, DiagramId, DrawingElementId, LinkKind, Represents, UnknownWireValue};
use crate::protocol::Notification;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Why a diagram notification could not be turned into a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    MissingConceptId,
    MissingDiagram,
    Wire(UnknownWireValue),
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingConceptId => f.write_str("notification carries no concept id"),
            Self::MissingDiagram => f.write_str("notification names no owning diagram"),
            Self::Wire(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for PayloadError {}

impl From<UnknownWireValue> for PayloadError {
    fn from(value: UnknownWireValue) -> Self {
        Self::Wire(value)
    }
}

fn required_ids(notification: &Notification) -> Result<(ConceptId, DiagramId), PayloadError> {
    let concept_id = notification.subject_id().ok_or(PayloadError::MissingConceptId)?;
    let diagram_id = notification.state.owner().ok_or(PayloadError::MissingDiagram)?;
    Ok((concept_id, diagram_id))
}

fn optional_represents(notification: &Notification) -> Result<Option<Represents>, PayloadError> {
    notification.param_opt("Represents").map(Represents::parse).transpose().map_err(Into::into)
}

fn optional_color(notification: &Notification, key: &str) -> Option<String> {
    notification.param_opt(key).map(str::to_owned)
}

/// Attributes of an `AddDiagramNode`/`UpdateDiagramNode` notification.
#[derive(Debug, Clone, PartialEq)]
pub struct NodePayload {
    pub concept_id: ConceptId,
    pub diagram_id: DiagramId,
    pub represents: Option<Represents>,
    pub position: Point,
    pub size: Size,
    pub label: String,
    pub icon: String,
    pub abstractions: String,
    pub label_y_offset: f64,
    pub line_color: Option<String>,
    pub bg_color: Option<String>,
}

impl NodePayload {
    pub fn from_notification(notification: &Notification) -> Result<Self, PayloadError> {
        let (concept_id, diagram_id) = required_ids(notification)?;
        Ok(Self {
            concept_id,
            diagram_id,
            represents: optional_represents(notification)?,
            position: Point::new(notification.param_f64("NodeX"), notification.param_f64("NodeY")),
            size: Size {
                width: notification.param_f64("NodeWidth"),
                height: notification.param_f64("NodeHeight"),
            },
            label: notification.param("DisplayLabel").to_owned(),
            icon: notification.param("Icon").to_owned(),
            abstractions: notification.param("Abstractions").to_owned(),
            label_y_offset: notification.param_f64("DisplayLabelYOffset"),
            line_color: optional_color(notification, "LineColor"),
            bg_color: optional_color(notification, "BGColor"),
        })
    }

    pub fn element_id(&self) -> DrawingElementId {
        DrawingElementId::from_concept(&self.concept_id)
    }
}

/// Attributes of an `AddDiagramLink`/`UpdateDiagramLink` notification.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkPayload {
    pub concept_id: ConceptId,
    pub diagram_id: DiagramId,
    pub kind: LinkKind,
    pub represents: Option<Represents>,
    /// `None` when the server sent an empty endpoint; such a link never resolves.
    pub source: Option<DrawingElementId>,
    pub target: Option<DrawingElementId>,
    pub label: String,
}

impl LinkPayload {
    pub fn from_notification(notification: &Notification) -> Result<Self, PayloadError> {
        let (concept_id, diagram_id) = required_ids(notification)?;
        let endpoint = |key: &str| {
            ConceptId::from_wire(notification.param(key))
                .map(|concept| DrawingElementId::from_concept(&concept))
        };
        let kind = LinkKind::parse(notification.param("LinkType"))?;
        Ok(Self {
            concept_id,
            diagram_id,
            kind,
            represents: optional_represents(notification)?.or(Some(kind.represents())),
            source: endpoint("LinkSourceID"),
            target: endpoint("LinkTargetID"),
            label: notification.param("DisplayLabel").to_owned(),
        })
    }

    pub fn element_id(&self) -> DrawingElementId {
        DrawingElementId::from_concept(&self.concept_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagramNode {
    pub id: DrawingElementId,
    pub represents: Option<Represents>,
    pub position: Point,
    pub size: Size,
    pub label: String,
    pub icon: String,
    pub abstractions: String,
    pub label_y_offset: f64,
    pub line_color: Option<String>,
    pub bg_color: Option<String>,
}

impl DiagramNode {
    pub fn new(id: DrawingElementId) -> Self {
        Self {
            id,
            represents: None,
            position: Point::default(),
            size: Size::default(),
            label: String::new(),
            icon: String::new(),
            abstractions: String::new(),
            label_y_offset: 0.0,
            line_color: None,
            bg_color: None,
        }
    }

    /// Overwrites every payload-carried attribute.
    pub fn apply(&mut self, payload: &NodePayload) {
        if payload.represents.is_some() {
            self.represents = payload.represents;
        }
        self.position = payload.position;
        self.size = payload.size;
        self.label.clone_from(&payload.label);
        self.icon.clone_from(&payload.icon);
        self.abstractions.clone_from(&payload.abstractions);
        self.label_y_offset = payload.label_y_offset;
        self.line_color.clone_from(&payload.line_color);
        self.bg_color.clone_from(&payload.bg_color);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagramLink {
    pub id: DrawingElementId,
    pub kind: LinkKind,
    pub represents: Option<Represents>,
    pub source: DrawingElementId,
    pub target: DrawingElementId,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawingElement {
    Node(DiagramNode),
    Link(DiagramLink),
}

impl DrawingElement {
    pub fn id(&self) -> &DrawingElementId {
        match self {
            Self::Node(node) => &node.id,
            Self::Link(link) => &link.id,
        }
    }

    pub fn represents(&self) -> Option<Represents> {
        match self {
            Self::Node(node) => node.represents,
            Self::Link(link) => link.represents,
        }
    }
}

/// In-memory mirror of one drawing-surface graph. Links may point at links.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagramGraph {
    elements: BTreeMap<DrawingElementId, DrawingElement>,
}

impl DiagramGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, id: &DrawingElementId) -> bool {
        self.elements.contains_key(id)
    }

    pub fn get(&self, id: &DrawingElementId) -> Option<&DrawingElement> {
        self.elements.get(id)
    }

    pub fn node(&self, id: &DrawingElementId) -> Option<&DiagramNode> {
        match self.elements.get(id) {
            Some(DrawingElement::Node(node)) => Some(node),
            _ => None,
        }
    }

    pub fn node_mut(&mut self, id: &DrawingElementId) -> Option<&mut DiagramNode> {
        match self.elements.get_mut(id) {
            Some(DrawingElement::Node(node)) => Some(node),
            _ => None,
        }
    }

    pub fn link(&self, id: &DrawingElementId) -> Option<&DiagramLink> {
        match self.elements.get(id) {
            Some(DrawingElement::Link(link)) => Some(link),
            _ => None,
        }
    }

    pub fn link_mut(&mut self, id: &DrawingElementId) -> Option<&mut DiagramLink> {
        match self.elements.get_mut(id) {
            Some(DrawingElement::Link(link)) => Some(link),
            _ => None,
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &DiagramNode> {
        self.elements.values().filter_map(|element| match element {
            DrawingElement::Node(node) => Some(node),
            DrawingElement::Link(_) => None,
        })
    }

    pub fn links(&self) -> impl Iterator<Item = &DiagramLink> {
        self.elements.values().filter_map(|element| match element {
            DrawingElement::Link(link) => Some(link),
            DrawingElement::Node(_) => None,
        })
    }

    /// Resolved `(source, target)` of a payload, if both endpoints are present.
    pub fn resolve_endpoints(
        &self,
        payload: &LinkPayload,
    ) -> Option<(DrawingElementId, DrawingElementId)> {
        let source = payload.source.as_ref().filter(|id| self.contains(id))?;
        let target = payload.target.as_ref().filter(|id| self.contains(id))?;
        Some((source.clone(), target.clone()))
    }

    pub fn insert(&mut self, element: DrawingElement) -> Option<DrawingElement> {
        self.elements.insert(element.id().clone(), element)
    }

    /// Removes one element. Links attached to it stay until their next update drops them.
    pub fn remove(&mut self, id: &DrawingElementId) -> Option<DrawingElement> {
        self.elements.remove(id)
    }
}
