// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of crl-editor-client and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::mpsc;

use crl_editor_client::channel::{run_client, Inbound, NotificationChannel, RequestChannel};
use crl_editor_client::config::ClientConfig;
use crl_editor_client::model::{ConceptId, TreeParent};
use crl_editor_client::protocol::{Action, NotificationKind, Request};
use crl_editor_client::view::{RecordingView, TreeChange};

#[derive(Clone)]
struct FakeEditor {
    frames: Arc<Vec<String>>,
    acks: mpsc::UnboundedSender<Value>,
    requests: mpsc::UnboundedSender<Value>,
}

struct Running {
    addr: SocketAddr,
    acks: mpsc::UnboundedReceiver<Value>,
    requests: mpsc::UnboundedReceiver<Value>,
}

impl Running {
    fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(
            &format!("ws://{}/index/ws", self.addr),
            &format!("http://{}/index/request", self.addr),
        )
        .expect("config");
        config.connect_timeout = Duration::from_secs(5);
        config.reconnect_initial = Duration::from_millis(20);
        config
    }
}

fn frame(kind: &str, concept: &str, owner: &str, label: &str) -> String {
    json!({
        "Notification": kind,
        "NotificationConceptID": concept,
        "NotificationConceptState": {
            "ConceptID": concept,
            "ConceptType": "*core.element",
            "OwningConceptID": owner,
            "Label": label,
            "Version": "1",
            "IsCore": "false",
            "ReadOnly": "false"
        },
        "AdditionalParameters": {"icon": "/icons/ElementIcon.svg", "isDiagram": "false"}
    })
    .to_string()
}

async fn ws_handler(State(editor): State<FakeEditor>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| push_frames(socket, editor))
}

async fn push_frames(mut socket: WebSocket, editor: FakeEditor) {
    for frame in editor.frames.iter() {
        if socket.send(Message::Text(frame.clone().into())).await.is_err() {
            return;
        }
    }
    while let Some(Ok(message)) = socket.recv().await {
        if let Message::Text(text) = message {
            if let Ok(ack) = serde_json::from_str::<Value>(text.as_str()) {
                let _ = editor.acks.send(ack);
            }
        }
    }
}

async fn request_handler(State(editor): State<FakeEditor>, Json(body): Json<Value>) -> Json<Value> {
    let _ = editor.requests.send(body.clone());
    if body["Action"] == "Undo" {
        Json(json!({"Result": 1, "ResultDescription": "nothing to undo", "AdditionalParameters": null}))
    } else {
        Json(json!({"Result": 0, "ResultDescription": "ok", "ResultConceptID": ""}))
    }
}

async fn start_editor(frames: Vec<String>) -> Running {
    let (acks_tx, acks) = mpsc::unbounded_channel();
    let (requests_tx, requests) = mpsc::unbounded_channel();
    let editor =
        FakeEditor { frames: Arc::new(frames), acks: acks_tx, requests: requests_tx };
    let router = Router::new()
        .route("/index/ws", get(ws_handler))
        .route("/index/request", post(request_handler))
        .with_state(editor);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Running { addr, acks, requests }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread().enable_all().build().expect("runtime")
}

#[test]
fn channels_decode_notifications_and_carry_acks_and_replies() {
    runtime().block_on(async {
        let mut editor = start_editor(vec![
            frame("AddTreeNode", "c1", "", "Thing"),
            "{not a notification".to_owned(),
        ])
        .await;
        let config = editor.config();

        let mut channel = NotificationChannel::connect(&config.notification_url, config.connect_timeout)
            .await
            .expect("connect");

        match channel.next_notification().await.expect("frame") {
            Some(Inbound::Notification(notification)) => {
                assert_eq!(notification.kind(), Some(NotificationKind::AddTreeNode));
                assert_eq!(notification.state.label, "Thing");
            }
            other => panic!("expected a notification, got {other:?}"),
        }
        assert!(matches!(channel.next_notification().await, Ok(Some(Inbound::Malformed(_)))));

        channel
            .send_ack(&crl_editor_client::protocol::Ack::ok())
            .await
            .expect("ack");
        let ack = editor.acks.recv().await.expect("ack received");
        assert_eq!(ack, json!({"Result": 0, "ErrorMessage": "none"}));
        channel.close().await;

        let requests = RequestChannel::new(config.request_url.clone(), config.request_timeout)
            .expect("request channel");
        let reply = requests.send(&Request::new(Action::Undo)).await.expect("reply");
        assert!(!reply.is_accepted());
        assert_eq!(reply.result_description, "nothing to undo");
        assert_eq!(editor.requests.recv().await, Some(json!({"Action": "Undo"})));
    });
}

#[test]
fn client_loop_acks_every_frame_and_forwards_requests() {
    runtime().block_on(async {
        let mut editor = start_editor(vec![
            frame("AddTreeNode", "c1", "", "Thing"),
            frame("DisplayDiagram", "d1", "c1", "Overview"),
            "garbage".to_owned(),
            frame("CloseDiagramView", "d1", "c1", "Overview"),
        ])
        .await;
        let config = editor.config();

        let (done_tx, done_rx) = tokio::sync::oneshot::channel();
        let mut acks = Vec::new();
        let collect = async {
            while acks.len() < 4 {
                match editor.acks.recv().await {
                    Some(ack) => acks.push(ack),
                    None => break,
                }
            }
            let _ = done_tx.send(());
        };
        let shutdown = async {
            let _ = done_rx.await;
        };

        let (view, ()) = tokio::join!(run_client(&config, RecordingView::new(), shutdown), collect);
        let view = view.expect("client stopped cleanly");

        let results: Vec<_> = acks.iter().map(|ack| ack["Result"].as_i64()).collect();
        assert_eq!(results, vec![Some(0), Some(0), Some(1), Some(0)]);
        assert!(acks[2]["ErrorMessage"]
            .as_str()
            .is_some_and(|message| message.starts_with("Malformed notification")));

        let c1 = ConceptId::new("c1").expect("id");
        assert!(view.tree_changes().any(|change| matches!(
            change,
            TreeChange::Insert { node, parent: TreeParent::Root, .. } if node.concept_id() == &c1
        )));

        let request = editor.requests.recv().await.expect("close request");
        assert_eq!(request["Action"], "DiagramViewHasBeenClosed");
        assert_eq!(request["RequestConceptID"], "d1");
    });
}
