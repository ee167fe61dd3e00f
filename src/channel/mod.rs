// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Transport: the notification WebSocket, the request endpoint and the loop that joins them to a
//! [`Session`](crate::session::Session).

mod error;
mod notification;
mod request;
mod runtime;

pub use error::{ClientError, Result};
pub use notification::{Inbound, NotificationChannel};
pub use request::RequestChannel;
pub use runtime::{run_client, Backoff};
