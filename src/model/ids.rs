// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use smol_str::SmolStr;

/// A stable, server-issued identifier.
///
/// The server hands out UUID-like strings; the client never inspects their structure. The only
/// rule enforced here is that an id is non-empty, because the wire format uses the empty string
/// to mean "absent" (e.g. a root concept has an empty `OwningConceptID`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: SmolStr,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl AsRef<str>) -> Result<Self, IdError> {
        let value = value.as_ref();
        if value.is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self { value: SmolStr::new(value), _marker: PhantomData })
    }

    /// Parses a wire value where the empty string means "no id".
    pub fn from_wire(value: &str) -> Option<Self> {
        Self::new(value).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value.to_string()
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<T> TryFrom<String> for Id<T> {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("id must not be empty"),
        }
    }
}

impl std::error::Error for IdError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConceptIdTag {}
pub type ConceptId = Id<ConceptIdTag>;

/// Diagrams are concepts too; the alias only documents intent at call sites.
pub type DiagramId = ConceptId;

#[cfg(test)]
mod tests {
    use super::{ConceptId, IdError};

    #[test]
    fn id_rejects_empty() {
        assert_eq!(ConceptId::new(""), Err(IdError::Empty));
    }

    #[test]
    fn from_wire_treats_empty_as_absent() {
        assert_eq!(ConceptId::from_wire(""), None);
        assert_eq!(ConceptId::from_wire("c1").map(ConceptId::into_string), Some("c1".to_owned()));
    }

    #[test]
    fn ids_order_by_value() {
        let a = ConceptId::new("a").expect("id");
        let b = ConceptId::new("b").expect("id");
        assert!(a < b);
    }
}
