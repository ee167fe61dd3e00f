// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Serde adapters for the editor server's loosely typed JSON.

use serde::{Deserialize, Deserializer, Serializer};

/// Booleans travel as the strings `"true"`/`"false"`.
pub(crate) mod string_bool {
    use super::*;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "true" } else { "false" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Text(String),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Bool(value)) => value,
            Some(Raw::Text(text)) => text.trim().eq_ignore_ascii_case("true"),
            None => false,
        })
    }
}

/// Accepts a string or a number and keeps its textual form.
pub(crate) fn string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(text)) => text,
        Some(Raw::Int(value)) => value.to_string(),
        Some(Raw::Float(value)) => value.to_string(),
        None => String::new(),
    })
}

/// The server encodes empty maps and absent structs as `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
