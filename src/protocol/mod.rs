// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Wire envelopes exchanged with the editor server.
//!
//! Notifications arrive on the WebSocket and are answered with exactly one [`Ack`] each.
//! Requests go out over HTTP and come back as a [`Reply`].

#[cfg(test)]
pub(crate) mod fixtures;
mod notification;
mod request;
mod wire;

pub use notification::{
    Ack, ConceptState, Notification, NotificationKind, UNHANDLED_NOTIFICATION,
};
pub use request::{Action, Reply, Request};

/// JSON schemas for the notification envelope and the request envelope.
pub fn schemas() -> serde_json::Value {
    serde_json::json!({
        "notification": schemars::schema_for!(Notification),
        "ack": schemars::schema_for!(Ack),
        "request": schemars::schema_for!(Request),
        "reply": schemars::schema_for!(Reply),
    })
}
