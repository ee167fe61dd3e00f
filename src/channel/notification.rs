// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The server-push WebSocket. One text frame per notification, one text frame per ack.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use url::Url;

use super::error::{ClientError, Result};
use crate::protocol::{Ack, Notification};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// One decoded inbound frame.
#[derive(Debug)]
pub enum Inbound {
    Notification(Box<Notification>),
    /// Text that is not a notification; still owed an ack.
    Malformed(serde_json::Error),
}

impl Inbound {
    fn decode(text: &str) -> Self {
        match serde_json::from_str(text) {
            Ok(notification) => Self::Notification(Box::new(notification)),
            Err(err) => Self::Malformed(err),
        }
    }
}

pub struct NotificationChannel {
    url: Url,
    socket: Socket,
}

impl NotificationChannel {
    pub async fn connect(url: &Url, connect_timeout: Duration) -> Result<Self> {
        if !matches!(url.scheme(), "ws" | "wss") {
            return Err(ClientError::InvalidUrl(format!("{url} is not a WebSocket URL")));
        }
        let (socket, _response) = timeout(connect_timeout, connect_async(url.as_str()))
            .await
            .map_err(|_| ClientError::Timeout(connect_timeout))?
            .map_err(|err| ClientError::WebSocket(err.to_string()))?;
        tracing::info!(%url, "notification channel connected");
        Ok(Self { url: url.clone(), socket })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Next notification frame. `None` once the server closed the socket.
    pub async fn next_notification(&mut self) -> Result<Option<Inbound>> {
        while let Some(message) = self.socket.next().await {
            match message.map_err(|err| ClientError::WebSocket(err.to_string()))? {
                Message::Text(text) => return Ok(Some(Inbound::decode(&text))),
                Message::Close(frame) => {
                    tracing::info!(url = %self.url, ?frame, "server closed notification channel");
                    return Ok(None);
                }
                Message::Binary(bytes) => {
                    tracing::debug!(len = bytes.len(), "ignoring binary frame");
                }
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
            }
        }
        Ok(None)
    }

    pub async fn send_ack(&mut self, ack: &Ack) -> Result<()> {
        let text = serde_json::to_string(ack)?;
        self.socket
            .send(Message::Text(text))
            .await
            .map_err(|err| ClientError::WebSocket(err.to_string()))
    }

    pub async fn close(mut self) {
        if let Err(err) = self.socket.close(None).await {
            tracing::debug!(error = %err, "notification channel close failed");
        }
    }
}
