// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    #[error("connection timeout after {0:?}")]
    Timeout(Duration),

    #[error("notification channel closed")]
    Closed,

    #[error("request failed: {0}")]
    Request(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("reply did not decode: {0}")]
    Decode(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
