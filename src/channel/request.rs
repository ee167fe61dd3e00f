// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Client-initiated requests, POSTed one at a time in the order the session produced them.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use url::Url;

use super::error::{ClientError, Result};
use crate::protocol::{Action, Reply, Request};

#[derive(Debug, Clone)]
pub struct RequestChannel {
    http: reqwest::Client,
    url: Url,
    timeout: Duration,
}

impl RequestChannel {
    pub fn new(url: Url, timeout: Duration) -> Result<Self> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!("{url} is not an HTTP URL")));
        }
        Ok(Self { http: reqwest::Client::new(), url, timeout })
    }

    pub async fn send(&self, request: &Request) -> Result<Reply> {
        let response = self
            .http
            .post(self.url.as_str())
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|err| ClientError::Request(err.to_string()))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|err| ClientError::Request(err.to_string()))?;
        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).trim().to_owned(),
            });
        }
        serde_json::from_slice(&body).map_err(|err| ClientError::Decode(err.to_string()))
    }

    /// Drains `requests` until every sender is gone. Transport failures come back as rejected
    /// replies so the session can surface them like any other refusal.
    pub fn spawn_pump(
        self,
        mut requests: mpsc::UnboundedReceiver<Request>,
        replies: mpsc::UnboundedSender<(Action, Reply)>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(request) = requests.recv().await {
                let reply = match self.send(&request).await {
                    Ok(reply) => reply,
                    Err(err) => {
                        tracing::warn!(action = ?request.action, error = %err, "request failed");
                        Reply::transport_failure(err.to_string())
                    }
                };
                if replies.send((request.action, reply)).is_err() {
                    tracing::debug!("reply receiver dropped");
                }
            }
            tracing::debug!("request pump finished");
        })
    }
}
