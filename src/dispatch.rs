// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Outbound requests.
//!
//! Sending is fire-and-forget: local state never waits for a reply. Replies are looked at only to
//! surface rejections and to pick up the few values a reply carries.

use tokio::sync::mpsc;

use crate::protocol::{Action, Reply, Request};

/// Where the session hands its requests.
pub trait RequestSink {
    fn dispatch(&mut self, request: Request);
}

impl RequestSink for Vec<Request> {
    fn dispatch(&mut self, request: Request) {
        self.push(request);
    }
}

impl RequestSink for mpsc::UnboundedSender<Request> {
    fn dispatch(&mut self, request: Request) {
        let action = request.action;
        if mpsc::UnboundedSender::send(self, request).is_err() {
            tracing::warn!(?action, "request channel closed, request dropped");
        }
    }
}

impl<T: RequestSink + ?Sized> RequestSink for &mut T {
    fn dispatch(&mut self, request: Request) {
        (**self).dispatch(request);
    }
}

/// What the session should do with a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyEffect {
    None,
    Alert(String),
    AvailableGraphs(usize),
}

pub fn reply_effect(action: Action, reply: &Reply, automated_test: bool) -> ReplyEffect {
    if !reply.is_accepted() {
        tracing::warn!(
            ?action,
            result = reply.result,
            description = %reply.result_description,
            "request rejected"
        );
        if automated_test {
            return ReplyEffect::None;
        }
        return ReplyEffect::Alert(reply.result_description.clone());
    }

    if action == Action::ReturnAvailableGraphCount {
        let raw = reply
            .additional_parameters
            .get("NumberOfAvailableGraphs")
            .map(String::as_str)
            .unwrap_or_default();
        return match raw.trim().parse() {
            Ok(count) => ReplyEffect::AvailableGraphs(count),
            Err(_) => {
                tracing::warn!(raw, "graph count reply is not a number");
                ReplyEffect::None
            }
        };
    }

    ReplyEffect::None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(description: &str) -> Reply {
        Reply { result: 1, result_description: description.to_owned(), ..Reply::default() }
    }

    #[test]
    fn rejection_alerts_unless_automated() {
        let reply = rejected("no such concept");
        assert_eq!(
            reply_effect(Action::Undo, &reply, false),
            ReplyEffect::Alert("no such concept".to_owned())
        );
        assert_eq!(reply_effect(Action::Undo, &reply, true), ReplyEffect::None);
    }

    #[test]
    fn graph_count_reply_is_read() {
        let mut reply = Reply::default();
        reply.additional_parameters.insert("NumberOfAvailableGraphs".to_owned(), "4".to_owned());
        assert_eq!(
            reply_effect(Action::ReturnAvailableGraphCount, &reply, false),
            ReplyEffect::AvailableGraphs(4)
        );
        assert_eq!(reply_effect(Action::Redo, &reply, false), ReplyEffect::None);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn unbounded_sender_forwards_requests() {
        let (mut tx, mut rx) = mpsc::unbounded_channel();
        tx.dispatch(Request::new(Action::SaveWorkspace));
        assert_eq!(rx.recv().await.map(|request| request.action), Some(Action::SaveWorkspace));
    }
}
