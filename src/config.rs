// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Connection settings, from CLI flags with environment fallbacks.

use std::time::Duration;

use url::Url;

use crate::channel::ClientError;

pub const DEFAULT_NOTIFICATION_URL: &str = "ws://localhost:8081/index/ws";
pub const DEFAULT_REQUEST_URL: &str = "http://localhost:8082/index/request";

pub const NOTIFICATION_URL_ENV: &str = "CRL_NOTIFICATION_URL";
pub const REQUEST_URL_ENV: &str = "CRL_REQUEST_URL";
pub const AUTOMATED_TEST_ENV: &str = "CRL_AUTOMATED_TEST";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub notification_url: Url,
    pub request_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub reconnect_initial: Duration,
    pub reconnect_max: Duration,
    /// `None` retries forever.
    pub max_reconnects: Option<u32>,
    pub automated_test: bool,
}

impl ClientConfig {
    /// Defaults with both URLs validated.
    pub fn new(notification_url: &str, request_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            notification_url: parse_url(notification_url, &["ws", "wss"])?,
            request_url: parse_url(request_url, &["http", "https"])?,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(10),
            reconnect_initial: Duration::from_millis(250),
            reconnect_max: Duration::from_secs(5),
            max_reconnects: None,
            automated_test: false,
        })
    }

    /// Explicit values win; unset ones fall back to `lookup` (normally the process environment),
    /// then to the built-in defaults.
    pub fn resolve(
        notification_url: Option<&str>,
        request_url: Option<&str>,
        automated_test: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ClientError> {
        let notification_url = notification_url
            .map(str::to_owned)
            .or_else(|| lookup(NOTIFICATION_URL_ENV))
            .unwrap_or_else(|| DEFAULT_NOTIFICATION_URL.to_owned());
        let request_url = request_url
            .map(str::to_owned)
            .or_else(|| lookup(REQUEST_URL_ENV))
            .unwrap_or_else(|| DEFAULT_REQUEST_URL.to_owned());
        let automated_test = automated_test
            || lookup(AUTOMATED_TEST_ENV).is_some_and(|value| env_flag(&value));

        let mut config = Self::new(&notification_url, &request_url)?;
        config.automated_test = automated_test;
        Ok(config)
    }
}

fn parse_url(raw: &str, schemes: &[&str]) -> Result<Url, ClientError> {
    let url = Url::parse(raw.trim())?;
    if !schemes.contains(&url.scheme()) {
        return Err(ClientError::InvalidUrl(format!(
            "{raw}: expected scheme {}",
            schemes.join(" or ")
        )));
    }
    Ok(url)
}

fn env_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
