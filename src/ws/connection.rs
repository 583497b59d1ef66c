//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching incoming commands and forwarding filtered events.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{broadcast, mpsc};

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::SubscriptionManager;
use crate::domain::{ADULT_AGE_THRESHOLD, EventTopic, RecordEvent};
use crate::service::RecordService;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and dispatches them.
/// - Forwards matching events from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(
    socket: WebSocket,
    mut event_rx: broadcast::Receiver<RecordEvent>,
    record_service: Arc<RecordService>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();
    // Replies from commands that run off the loop.
    let (reply_tx, mut reply_rx) = mpsc::channel::<String>(16);

    loop {
        tokio::select! {
            // Incoming message from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(text.as_str(), &mut subs, &record_service, &reply_tx);
                        if let Some(resp_json) = response
                            && ws_tx.send(Message::text(resp_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            // Reply from a spawned command
            Some(resp_json) = reply_rx.recv() => {
                if ws_tx.send(Message::text(resp_json)).await.is_err() {
                    break;
                }
            }
            // Event from EventBus
            event = event_rx.recv() => {
                match event {
                    Ok(record_event) => {
                        if subs.matches(record_event.topic()) {
                            let msg = WsMessage::new(
                                uuid::Uuid::new_v4().to_string(),
                                WsMessageType::Event,
                                serde_json::to_value(&record_event).unwrap_or_default(),
                            );
                            let json = serde_json::to_string(&msg).unwrap_or_default();
                            if ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Handles a text message from the client, returning an optional JSON
/// response.
///
/// Commands that touch the store are spawned and reply through `replies`
/// instead, so the caller never blocks on file I/O or filtering.
fn handle_text_message(
    text: &str,
    subs: &mut SubscriptionManager,
    record_service: &Arc<RecordService>,
    replies: &mpsc::Sender<String>,
) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return serde_json::to_string(&WsMessage::error(String::new(), 400, "malformed JSON")).ok();
    };

    let Ok(command) = serde_json::from_value::<WsCommand>(msg.payload) else {
        return serde_json::to_string(&WsMessage::error(msg.id, 404, "unknown command")).ok();
    };

    let response = match command {
        WsCommand::Subscribe { topics } => {
            let (parsed, wildcard) = parse_topics(&topics);
            subs.subscribe(&parsed, wildcard);
            WsMessage::new(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({
                    "subscribed": parsed,
                    "count": subs.count(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            )
        }
        WsCommand::Unsubscribe { topics } => {
            let (parsed, wildcard) = parse_topics(&topics);
            subs.unsubscribe(&parsed, wildcard);
            WsMessage::new(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({
                    "unsubscribed": parsed,
                    "remaining_count": subs.count(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            )
        }
        WsCommand::FilterAdults => {
            let record_service = Arc::clone(record_service);
            let replies = replies.clone();
            tokio::spawn(async move {
                let response = filter_adults_reply(msg.id, &record_service).await;
                if let Ok(resp_json) = serde_json::to_string(&response) {
                    let _ = replies.send(resp_json).await;
                }
            });
            return None;
        }
    };

    serde_json::to_string(&response).ok()
}

async fn filter_adults_reply(id: String, record_service: &RecordService) -> WsMessage {
    match record_service.load_adults().await {
        Ok(outcome) => WsMessage::new(
            id,
            WsMessageType::Response,
            serde_json::json!({
                "records": outcome.adults,
                "examined": outcome.examined,
                "threshold": ADULT_AGE_THRESHOLD,
            }),
        ),
        Err(e) => WsMessage::error(id, e.error_code(), e.to_string()),
    }
}

/// Splits topic names into known topics and the wildcard flag. Unknown
/// names are ignored.
fn parse_topics(names: &[String]) -> (Vec<EventTopic>, bool) {
    let wildcard = names.iter().any(|name| name == "*");
    let topics = names
        .iter()
        .filter_map(|name| EventTopic::parse(name))
        .collect();
    (topics, wildcard)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::EventBus;
    use crate::persistence::JsonFileStore;
    use serde_json::{Value, json};

    struct Harness {
        service: Arc<RecordService>,
        subs: SubscriptionManager,
        reply_tx: mpsc::Sender<String>,
        reply_rx: mpsc::Receiver<String>,
        _dir: tempfile::TempDir,
    }

    impl Harness {
        fn new(capacity: usize) -> Self {
            let Ok(dir) = tempfile::tempdir() else {
                panic!("tempdir");
            };
            let store = JsonFileStore::new(dir.path().join("users.json"));
            let (reply_tx, reply_rx) = mpsc::channel(4);
            Self {
                service: Arc::new(RecordService::new(store, EventBus::new(capacity))),
                subs: SubscriptionManager::new(),
                reply_tx,
                reply_rx,
                _dir: dir,
            }
        }

        fn handle(&mut self, text: &str) -> Option<String> {
            handle_text_message(text, &mut self.subs, &self.service, &self.reply_tx)
        }

        fn reply(&mut self, text: &str) -> Value {
            let Some(json) = self.handle(text) else {
                panic!("expected an immediate reply");
            };
            serde_json::from_str(&json).unwrap_or(Value::Null)
        }

        async fn deferred_reply(&mut self) -> Value {
            let Ok(Some(json)) =
                tokio::time::timeout(Duration::from_secs(5), self.reply_rx.recv()).await
            else {
                panic!("expected a deferred reply");
            };
            serde_json::from_str(&json).unwrap_or(Value::Null)
        }
    }

    fn command(payload: Value) -> String {
        json!({
            "id": "req-1",
            "type": "command",
            "timestamp": chrono::Utc::now(),
            "payload": payload,
        })
        .to_string()
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() {
        let mut harness = Harness::new(16);
        let reply = harness.reply("{ nope");
        assert_eq!(reply["type"], "error");
        assert_eq!(reply["payload"]["code"], 400);
    }

    #[tokio::test]
    async fn unknown_command_is_404() {
        let mut harness = Harness::new(16);
        let reply = harness.reply(&command(json!({ "command": "delete_all" })));
        assert_eq!(reply["type"], "error");
        assert_eq!(reply["id"], "req-1");
        assert_eq!(reply["payload"]["code"], 404);
    }

    #[tokio::test]
    async fn subscribe_ignores_unknown_topics() {
        let mut harness = Harness::new(16);
        let text = command(json!({ "command": "subscribe", "topics": ["filter", "audit"] }));
        let reply = harness.reply(&text);
        assert_eq!(reply["payload"]["subscribed"], json!(["filter"]));
        assert!(harness.subs.matches(EventTopic::Filter));
        assert!(!harness.subs.matches(EventTopic::Store));
    }

    #[tokio::test]
    async fn filter_adults_replies_with_adults() {
        let mut harness = Harness::new(16);
        let text = command(json!({ "command": "filter_adults" }));
        assert!(harness.handle(&text).is_none());

        let reply = harness.deferred_reply().await;
        assert_eq!(reply["type"], "response");
        assert_eq!(reply["id"], "req-1");
        assert_eq!(reply["payload"]["examined"], 3);
        assert_eq!(
            reply["payload"]["records"],
            json!([{ "name": "Ana", "age": 22 }, { "name": "Beatriz", "age": 30 }])
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn filter_adults_does_not_hold_the_receive_loop() {
        // Capacity well below the stored collection size.
        let mut harness = Harness::new(4);
        let records: Vec<Value> = (0..40)
            .map(|i| json!({ "name": format!("user-{i}"), "age": i }))
            .collect();
        let saved = harness.service.save_records(&Value::Array(records)).await;
        assert!(saved.is_ok());
        let mut events = harness.service.event_bus().subscribe();

        let text = command(json!({ "command": "filter_adults" }));
        // Returns before the filter has run: nothing has been published yet.
        assert!(harness.handle(&text).is_none());
        assert!(matches!(
            events.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));

        let reply = harness.deferred_reply().await;
        assert_eq!(reply["payload"]["examined"], 40);
    }
}
