// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Headless client for the CRL concept-modeling editor.
//!
//! The server pushes notifications over a WebSocket; [`session::Session`] applies each one to the
//! mirrored navigator tree and diagram graphs and answers with an ack. User gestures become
//! requests POSTed to the server. Widgets sit behind the [`view::View`] trait.

pub mod channel;
pub mod config;
pub mod dispatch;
pub mod model;
pub mod protocol;
pub mod reconcile;
pub mod session;
pub mod view;
