//! Best-effort WebSocket progress listener
//!
//! Connects to the backend's `/ws/progress` endpoint and forwards
//! `progress_update` events to the display channel. Every failure mode is
//! logged and swallowed; the primary request flow never notices.

use std::time::Duration;

use futures::StreamExt;
use serde_json::Value;
use tokio::sync::watch;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::debug;

use super::Progress;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

pub(super) async fn listen(url: String, tx: watch::Sender<Progress>) {
    let connect = tokio::time::timeout(CONNECT_TIMEOUT, connect_async(url.as_str())).await;
    let (mut stream, _) = match connect {
        Ok(Ok(pair)) => pair,
        Ok(Err(e)) => {
            debug!(%url, error = %e, "listen: progress socket unavailable");
            return;
        }
        Err(_) => {
            debug!(%url, "listen: progress socket connect timed out");
            return;
        }
    };

    while let Some(frame) = stream.next().await {
        let text = match frame {
            Ok(Message::Text(text)) => text.to_string(),
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                debug!(error = %e, "listen: progress socket error");
                break;
            }
        };

        if let Some((percent, message)) = parse_progress_event(&text) {
            debug!(percent, "listen: progress update");
            if tx
                .send(Progress {
                    percent,
                    message,
                    simulated: false,
                })
                .is_err()
            {
                break;
            }
        }
    }
}

/// Decode a `progress_update` event, `None` for anything else
pub fn parse_progress_event(text: &str) -> Option<(f64, Option<String>)> {
    let value: Value = serde_json::from_str(text).ok()?;
    if value.get("type")?.as_str()? != "progress_update" {
        return None;
    }
    let percent = value.get("progress")?.as_f64()?.clamp(0.0, 100.0);
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string);
    Some((percent, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_progress_event() {
        let (percent, message) =
            parse_progress_event(r#"{"type":"progress_update","progress":42,"message":"routing"}"#)
                .unwrap();
        assert_eq!(percent, 42.0);
        assert_eq!(message.as_deref(), Some("routing"));
    }

    #[test]
    fn test_parse_rejects_other_events_and_garbage() {
        assert!(parse_progress_event(r#"{"type":"heartbeat"}"#).is_none());
        assert!(parse_progress_event(r#"{"type":"progress_update"}"#).is_none());
        assert!(parse_progress_event("not json").is_none());
    }

    #[test]
    fn test_parse_clamps_out_of_range() {
        let (percent, _) =
            parse_progress_event(r#"{"type":"progress_update","progress":250}"#).unwrap();
        assert_eq!(percent, 100.0);
    }
}
