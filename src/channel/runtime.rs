// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The client loop: connect, answer every notification, forward requests, reconnect.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;

use super::error::{ClientError, Result};
use super::notification::{Inbound, NotificationChannel};
use super::request::RequestChannel;
use crate::config::ClientConfig;
use crate::protocol::{Ack, Action, Reply, Request};
use crate::session::{Session, SessionOptions};
use crate::view::View;

/// Exponential reconnect delay with a cap.
#[derive(Debug, Clone)]
pub struct Backoff {
    initial: Duration,
    max: Duration,
    next: Duration,
    attempts: u32,
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self { initial, max, next: initial, attempts: 0 }
    }

    pub fn next_delay(&mut self) -> Duration {
        let delay = self.next.min(self.max);
        self.next = self.next.saturating_mul(2).min(self.max);
        self.attempts = self.attempts.saturating_add(1);
        delay
    }

    /// Reconnect attempts since the last successful connection.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn reset(&mut self) {
        self.next = self.initial;
        self.attempts = 0;
    }
}

/// Runs until `shutdown` resolves, then hands the view back.
///
/// Mirrored state survives reconnects. The server's replay after a reconnect is absorbed by the
/// idempotent upserts, or wiped by a `Refresh`.
pub async fn run_client<V: View>(
    config: &ClientConfig,
    view: V,
    shutdown: impl Future<Output = ()>,
) -> Result<V> {
    let (request_tx, request_rx) = mpsc::unbounded_channel();
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel();
    let pump = RequestChannel::new(config.request_url.clone(), config.request_timeout)?
        .spawn_pump(request_rx, reply_tx);

    let options = SessionOptions { automated_test: config.automated_test };
    let mut session = Session::new(view, request_tx, options);
    let mut backoff = Backoff::new(config.reconnect_initial, config.reconnect_max);
    let mut outcome = Ok(());
    tokio::pin!(shutdown);

    'connect: loop {
        let connected = tokio::select! {
            _ = &mut shutdown => break 'connect,
            connected = NotificationChannel::connect(
                &config.notification_url,
                config.connect_timeout,
            ) => connected,
        };

        match connected {
            Ok(mut channel) => {
                backoff.reset();
                let stop = serve(&mut session, &mut channel, &mut reply_rx, &mut shutdown).await;
                session.connection_lost();
                if stop {
                    channel.close().await;
                    break 'connect;
                }
            }
            Err(err) => {
                tracing::warn!(url = %config.notification_url, error = %err, "connect failed");
            }
        }

        if config.max_reconnects.is_some_and(|max| backoff.attempts() >= max) {
            tracing::error!(attempts = backoff.attempts(), "giving up on the notification channel");
            outcome = Err(ClientError::Closed);
            break 'connect;
        }
        let delay = backoff.next_delay();
        tracing::info!(?delay, "reconnecting");
        tokio::select! {
            _ = &mut shutdown => break 'connect,
            _ = tokio::time::sleep(delay) => {}
        }
    }

    let (view, requests) = session.into_parts();
    drop(requests);
    if let Err(err) = pump.await {
        tracing::warn!(error = %err, "request pump panicked");
    }
    outcome.map(|()| view)
}

/// Pumps one connection. Returns `true` when shutdown was requested.
async fn serve<V: View>(
    session: &mut Session<V, mpsc::UnboundedSender<Request>>,
    channel: &mut NotificationChannel,
    replies: &mut mpsc::UnboundedReceiver<(Action, Reply)>,
    shutdown: &mut (impl Future<Output = ()> + Unpin),
) -> bool {
    loop {
        tokio::select! {
            _ = &mut *shutdown => return true,
            Some((action, reply)) = replies.recv() => session.reply_received(action, &reply),
            inbound = channel.next_notification() => {
                let ack = match inbound {
                    Ok(Some(Inbound::Notification(notification))) => {
                        session.handle_notification(&notification)
                    }
                    Ok(Some(Inbound::Malformed(err))) => {
                        tracing::warn!(error = %err, "malformed notification");
                        Ack::malformed(err)
                    }
                    Ok(None) => return false,
                    Err(err) => {
                        tracing::warn!(error = %err, "notification channel failed");
                        return false;
                    }
                };
                if let Err(err) = channel.send_ack(&ack).await {
                    tracing::warn!(error = %err, "ack could not be sent");
                    return false;
                }
            }
        }
    }
}
