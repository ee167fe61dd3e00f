// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

/// Concept type tag as reported in `ConceptState.ConceptType`.
///
/// The server reports qualified type names (`*core.element`, ...); short names are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConceptType {
    Element,
    Literal,
    Reference,
    Refinement,
    Diagram,
    Other(String),
}

impl ConceptType {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "*core.element" | "Element" => Self::Element,
            "*core.literal" | "Literal" => Self::Literal,
            "*core.reference" | "Reference" => Self::Reference,
            "*core.refinement" | "Refinement" => Self::Refinement,
            "Diagram" => Self::Diagram,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            Self::Element => "*core.element",
            Self::Literal => "*core.literal",
            Self::Reference => "*core.reference",
            Self::Refinement => "*core.refinement",
            Self::Diagram => "Diagram",
            Self::Other(other) => other,
        }
    }
}

impl fmt::Display for ConceptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// A wire value that does not map onto one of the closed enums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownWireValue {
    pub field: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownWireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.field, self.value)
    }
}

impl std::error::Error for UnknownWireValue {}

/// What kind of concept a drawing element stands for (`Represents` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Represents {
    Element,
    Literal,
    Reference,
    Refinement,
    Diagram,
    OwnerPointer,
    ElementPointer,
    AbstractPointer,
    RefinedPointer,
}

impl Represents {
    pub fn parse(value: &str) -> Result<Self, UnknownWireValue> {
        Ok(match value {
            "Element" => Self::Element,
            "Literal" => Self::Literal,
            "Reference" => Self::Reference,
            "Refinement" => Self::Refinement,
            "Diagram" => Self::Diagram,
            "OwnerPointer" => Self::OwnerPointer,
            "ElementPointer" => Self::ElementPointer,
            "AbstractPointer" => Self::AbstractPointer,
            "RefinedPointer" => Self::RefinedPointer,
            other => {
                return Err(UnknownWireValue { field: "Represents", value: other.to_owned() })
            }
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Element => "Element",
            Self::Literal => "Literal",
            Self::Reference => "Reference",
            Self::Refinement => "Refinement",
            Self::Diagram => "Diagram",
            Self::OwnerPointer => "OwnerPointer",
            Self::ElementPointer => "ElementPointer",
            Self::AbstractPointer => "AbstractPointer",
            Self::RefinedPointer => "RefinedPointer",
        }
    }

    /// Element, literal, reference or refinement: the things links may attach to.
    pub fn is_model_concept(self) -> bool {
        matches!(self, Self::Element | Self::Literal | Self::Reference | Self::Refinement)
    }

    pub fn is_pointer(self) -> bool {
        matches!(
            self,
            Self::OwnerPointer | Self::ElementPointer | Self::AbstractPointer | Self::RefinedPointer
        )
    }

    /// Attribute of the source concept that a reference pointing at this element would target.
    pub fn target_attribute_name(self) -> &'static str {
        match self {
            Self::OwnerPointer => "OwningConceptID",
            Self::ElementPointer => "ReferencedConceptID",
            Self::AbstractPointer => "AbstractConceptID",
            Self::RefinedPointer => "RefinedConceptID",
            _ => "NoAttribute",
        }
    }
}

/// Typed kind of a diagram link (`LinkType` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    ReferenceLink,
    RefinementLink,
    OwnerPointer,
    ElementPointer,
    AbstractPointer,
    RefinedPointer,
}

impl LinkKind {
    pub const ALL: [LinkKind; 6] = [
        Self::ReferenceLink,
        Self::RefinementLink,
        Self::OwnerPointer,
        Self::ElementPointer,
        Self::AbstractPointer,
        Self::RefinedPointer,
    ];

    pub fn parse(value: &str) -> Result<Self, UnknownWireValue> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| UnknownWireValue { field: "LinkType", value: value.to_owned() })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReferenceLink => "ReferenceLink",
            Self::RefinementLink => "RefinementLink",
            Self::OwnerPointer => "OwnerPointer",
            Self::ElementPointer => "ElementPointer",
            Self::AbstractPointer => "AbstractPointer",
            Self::RefinedPointer => "RefinedPointer",
        }
    }

    /// The concept kind a freshly drawn link of this kind stands for.
    pub fn represents(self) -> Represents {
        match self {
            Self::ReferenceLink => Represents::Reference,
            Self::RefinementLink => Represents::Refinement,
            Self::OwnerPointer => Represents::OwnerPointer,
            Self::ElementPointer => Represents::ElementPointer,
            Self::AbstractPointer => Represents::AbstractPointer,
            Self::RefinedPointer => Represents::RefinedPointer,
        }
    }

    /// Whether a connection request for this kind names the target attribute.
    pub fn carries_target_attribute(self) -> bool {
        matches!(self, Self::ReferenceLink | Self::ElementPointer)
    }

    /// Whether a link of this kind may end on an element that represents `target`.
    pub fn can_end_on(self, target: Option<Represents>) -> bool {
        let Some(target) = target else {
            return false;
        };
        match self.represents() {
            Represents::Reference | Represents::ElementPointer => true,
            _ => target.is_model_concept(),
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn concept_type_accepts_server_and_short_names() {
        assert_eq!(ConceptType::from_wire("*core.refinement"), ConceptType::Refinement);
        assert_eq!(ConceptType::from_wire("Literal"), ConceptType::Literal);
        assert_eq!(
            ConceptType::from_wire("*core.widget"),
            ConceptType::Other("*core.widget".to_owned())
        );
    }

    #[test]
    fn link_kind_rejects_unknown_wire_value() {
        let err = LinkKind::parse("Bogus").unwrap_err();
        assert_eq!(err.field, "LinkType");
        assert_eq!(err.to_string(), "unknown LinkType 'Bogus'");
    }

    #[rstest]
    #[case(LinkKind::ReferenceLink, Represents::Diagram, true)]
    #[case(LinkKind::ElementPointer, Represents::OwnerPointer, true)]
    #[case(LinkKind::RefinementLink, Represents::Refinement, true)]
    #[case(LinkKind::RefinementLink, Represents::AbstractPointer, false)]
    #[case(LinkKind::OwnerPointer, Represents::Element, true)]
    #[case(LinkKind::AbstractPointer, Represents::Diagram, false)]
    #[case(LinkKind::RefinedPointer, Represents::Literal, true)]
    fn connection_legality(
        #[case] kind: LinkKind,
        #[case] target: Represents,
        #[case] expected: bool,
    ) {
        assert_eq!(kind.can_end_on(Some(target)), expected);
    }

    #[test]
    fn nothing_ends_on_an_unclassified_target() {
        assert!(LinkKind::ALL.iter().all(|kind| !kind.can_end_on(None)));
    }

    #[test]
    fn pointer_targets_name_their_attribute() {
        assert_eq!(Represents::OwnerPointer.target_attribute_name(), "OwningConceptID");
        assert_eq!(Represents::RefinedPointer.target_attribute_name(), "RefinedConceptID");
        assert_eq!(Represents::Element.target_attribute_name(), "NoAttribute");
    }
}
