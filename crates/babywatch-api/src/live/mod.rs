//! Live screens over websocket
//!
//! Each socket serves one screen. After the upgrade the server sends
//! `READY`, then the current read model, then a fresh read model every time
//! the underlying collections change. Client frames are handled by a
//! receive task; a send task owns the subscription and the socket sink.
//! When either task ends the other is aborted and the subscription dropped.

mod names;
mod predictions;
pub mod protocol;

pub use names::names_socket;
pub use predictions::predictions_socket;
pub use protocol::{ClientFrame, Screen, ServerFrame};

use axum::extract::ws::{Message, WebSocket};
use futures_util::stream::SplitSink;
use futures_util::SinkExt;
use tokio::sync::mpsc;

use babywatch_common::AppError;

use crate::extractors::AuthUser;
use crate::response::ApiError;
use crate::state::AppState;

/// Buffer for frames queued by the receive task
const REPLY_BUFFER_SIZE: usize = 32;

type WsSink = SplitSink<WebSocket, Message>;

/// Write one frame; an encoding failure is logged and skipped
async fn send_frame(sink: &mut WsSink, frame: &ServerFrame) -> Result<(), axum::Error> {
    match frame.to_json() {
        Ok(json) => sink.send(Message::Text(json.into())).await,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to encode frame");
            Ok(())
        }
    }
}

/// Queue an `ERROR` frame for a failed client request
async fn reply_error(replies: &mpsc::Sender<ServerFrame>, err: ApiError) {
    if err.status_code().is_server_error() {
        tracing::error!(error = ?err, "Live request failed");
    } else {
        tracing::debug!(error = %err, "Live request rejected");
    }
    let _ = replies.send(ServerFrame::from(&err)).await;
}

/// Fail with `SESSION_REVOKED` once the socket's session is closed or expired
async fn ensure_session(state: &AppState, auth: &AuthUser) -> Result<(), ApiError> {
    let live = state
        .service_context()
        .sessions()
        .is_live(&auth.claims.sid, auth.email())
        .await?;
    if live {
        Ok(())
    } else {
        Err(AppError::SessionRevoked.into())
    }
}

/// Decode a text frame, answering malformed input with an `ERROR` frame
async fn decode_frame(text: &str, replies: &mpsc::Sender<ServerFrame>) -> Option<ClientFrame> {
    match ClientFrame::from_json(text) {
        Ok(frame) => Some(frame),
        Err(e) => {
            let _ = replies
                .send(ServerFrame::error("INVALID_FRAME", e.to_string()))
                .await;
            None
        }
    }
}
