//! Predictions screen session
//!
//! The receive task owns one editor for the life of the socket. Each `EDIT`
//! applies to that local copy and saves the whole record, so edits made
//! elsewhere to the same record after connecting are overwritten by the next
//! edit here.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use babywatch_core::{FieldEdit, PredictionEditor, PredictionFields};
use babywatch_service::dto::PredictionBoardResponse;
use babywatch_service::{PredictionService, PredictionsSubscription};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use super::{
    decode_frame, ensure_session, reply_error, send_frame, ClientFrame, Screen, ServerFrame,
    WsSink,
};
use super::REPLY_BUFFER_SIZE;
use crate::extractors::{AuthUser, QueryParams};
use crate::response::ApiResult;
use crate::state::AppState;

/// `/live/predictions?token=...`
#[derive(Debug, Deserialize)]
pub struct LivePredictionsQuery {
    pub token: String,
}

/// Upgrade to a predictions screen socket
///
/// GET /live/predictions
pub async fn predictions_socket(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<LivePredictionsQuery>,
    ws: WebSocketUpgrade,
) -> ApiResult<Response> {
    let auth = AuthUser::from_token(&state, &query.token).await?;
    let editor = PredictionService::new(state.service_context())
        .editor(auth.email())
        .await?;
    Ok(ws.on_upgrade(move |socket| run_session(state, auth, editor, socket)))
}

async fn run_session(state: AppState, auth: AuthUser, editor: PredictionEditor, socket: WebSocket) {
    let email = auth.email().to_string();
    tracing::info!(email = %email, "Predictions screen connected");

    let (mut sink, mut stream) = socket.split();
    let ready = ServerFrame::ready(&email, &auth.claims.sid, Screen::Predictions);
    if send_frame(&mut sink, &ready).await.is_err() {
        return;
    }

    let screen = state.service_context().hub().predictions_screen();
    let defaults = state.service_context().prediction_defaults().clone();
    let (reply_tx, reply_rx) = mpsc::channel(REPLY_BUFFER_SIZE);

    let mut send_task = tokio::spawn(push_boards(
        sink,
        screen,
        email.clone(),
        defaults,
        reply_rx,
    ));

    let recv_email = email.clone();
    let mut recv_task = tokio::spawn(async move {
        let mut editor = editor;
        while let Some(msg) = stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    if !handle_text(&state, &auth, &mut editor, &text, &reply_tx).await {
                        break;
                    }
                }
                Ok(Message::Binary(_)) => {
                    let _ = reply_tx
                        .send(ServerFrame::error(
                            "UNSUPPORTED_FRAME",
                            "Binary frames are not supported",
                        ))
                        .await;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Ok(Message::Close(_)) => break,
                Err(e) => {
                    tracing::warn!(email = %recv_email, error = %e, "WebSocket error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => {
            let _ = send_task.await;
        }
    }

    tracing::info!(email = %email, "Predictions screen disconnected");
}

async fn push_boards(
    mut sink: WsSink,
    mut screen: PredictionsSubscription,
    email: String,
    defaults: PredictionFields,
    mut reply_rx: mpsc::Receiver<ServerFrame>,
) {
    let mut board = Some(screen.board(&email, &defaults));

    loop {
        if let Some(board) = board.take() {
            let frame = ServerFrame::Predictions(PredictionBoardResponse::from(board));
            if send_frame(&mut sink, &frame).await.is_err() {
                break;
            }
        }

        tokio::select! {
            biased;

            reply = reply_rx.recv() => match reply {
                Some(frame) => {
                    if send_frame(&mut sink, &frame).await.is_err() {
                        break;
                    }
                }
                None => break,
            },
            next = screen.next_board(&email, &defaults) => match next {
                Some(next) => board = Some(next),
                None => break,
            },
        }
    }

    let _ = sink.close().await;
}

/// Handle one text frame. `false` ends the session.
async fn handle_text(
    state: &AppState,
    auth: &AuthUser,
    editor: &mut PredictionEditor,
    text: &str,
    replies: &mpsc::Sender<ServerFrame>,
) -> bool {
    let Some(frame) = decode_frame(text, replies).await else {
        return true;
    };
    tracing::trace!(email = %auth.email(), frame = frame.kind(), "Live frame received");

    if let Err(err) = ensure_session(state, auth).await {
        reply_error(replies, err).await;
        return false;
    }

    match frame {
        ClientFrame::Edit(edit) => {
            if let Err(err) = save_edit(state, auth, editor, edit).await {
                reply_error(replies, err).await;
            }
        }
        ClientFrame::Ping => {
            let _ = replies.send(ServerFrame::Pong).await;
        }
        other => {
            let _ = replies
                .send(ServerFrame::error(
                    "UNSUPPORTED_FRAME",
                    format!("{} is only accepted on the names screen", other.kind()),
                ))
                .await;
        }
    }

    true
}

async fn save_edit(
    state: &AppState,
    auth: &AuthUser,
    editor: &mut PredictionEditor,
    edit: FieldEdit,
) -> ApiResult<()> {
    let fields = editor.apply(edit);
    PredictionService::new(state.service_context())
        .update_prediction(auth.email(), fields)
        .await?;
    Ok(())
}
