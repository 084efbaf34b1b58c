//! Names screen session

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use babywatch_core::{
    reconcile_with, DomainError, NameBoard, NameKey, NameView, NoopAnimator, ReorderAnimator,
    RowSlot, SortKey,
};
use babywatch_service::dto::{NameBoardResponse, NameRequest, NamesQuery};
use babywatch_service::{NameService, NamesSubscription, ServiceError};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::{mpsc, watch};
use validator::Validate;

use super::protocol::NamesPayload;
use super::{
    decode_frame, ensure_session, reply_error, send_frame, ClientFrame, Screen, ServerFrame,
    WsSink,
};
use super::REPLY_BUFFER_SIZE;
use crate::extractors::{AuthUser, QueryParams};
use crate::response::ApiResult;
use crate::state::AppState;

/// `/live/names?token=...&sort=likes&girls=false`
#[derive(Debug, Deserialize)]
pub struct LiveNamesQuery {
    pub token: String,
    pub sort: Option<SortKey>,
    pub reverse: Option<bool>,
    pub girls: Option<bool>,
    pub boys: Option<bool>,
}

impl LiveNamesQuery {
    fn view(&self) -> NameView {
        NamesQuery {
            sort: self.sort,
            reverse: self.reverse,
            girls: self.girls,
            boys: self.boys,
        }
        .into()
    }
}

/// Upgrade to a names screen socket
///
/// GET /live/names
pub async fn names_socket(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<LiveNamesQuery>,
    ws: WebSocketUpgrade,
) -> ApiResult<Response> {
    let auth = AuthUser::from_token(&state, &query.token).await?;
    let view = query.view();
    Ok(ws.on_upgrade(move |socket| run_session(state, auth, view, socket)))
}

async fn run_session(state: AppState, auth: AuthUser, view: NameView, socket: WebSocket) {
    let email = auth.email().to_string();
    tracing::info!(email = %email, "Names screen connected");

    let (mut sink, mut stream) = socket.split();
    let ready = ServerFrame::ready(&email, &auth.claims.sid, Screen::Names);
    if send_frame(&mut sink, &ready).await.is_err() {
        return;
    }

    let screen = state.service_context().hub().names_screen();
    let (view_tx, view_rx) = watch::channel(view);
    let (reply_tx, reply_rx) = mpsc::channel(REPLY_BUFFER_SIZE);

    let mut send_task = tokio::spawn(push_boards(sink, screen, view_rx, reply_rx, NoopAnimator));

    let recv_email = email.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    if !handle_text(&state, &auth, &text, &view_tx, &reply_tx).await {
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

    // The send task flushes queued replies before it notices the receiver is gone
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => {
            let _ = send_task.await;
        }
    }

    tracing::info!(email = %email, "Names screen disconnected");
}

/// Frame for a freshly computed board, with the moves since `previous`
fn board_frame(
    board: NameBoard,
    previous: &[RowSlot],
    animator: &mut dyn ReorderAnimator,
) -> (ServerFrame, Vec<RowSlot>) {
    let slots = board.row_slots();
    let frame = ServerFrame::Names(NamesPayload {
        transitions: reconcile_with(previous, &slots, animator),
        board: NameBoardResponse::from(board),
    });
    (frame, slots)
}

/// Push the board on connect and after every data or view change
async fn push_boards<A: ReorderAnimator>(
    mut sink: WsSink,
    mut screen: NamesSubscription,
    mut view_rx: watch::Receiver<NameView>,
    mut reply_rx: mpsc::Receiver<ServerFrame>,
    mut animator: A,
) {
    let mut view = *view_rx.borrow_and_update();
    let mut previous: Vec<RowSlot> = Vec::new();

    loop {
        let (frame, slots) = board_frame(screen.board(view), &previous, &mut animator);
        if send_frame(&mut sink, &frame).await.is_err() {
            break;
        }
        previous = slots;

        // Wait for something that changes the board, relaying replies meanwhile
        let keep_going = loop {
            tokio::select! {
                biased;

                reply = reply_rx.recv() => match reply {
                    Some(frame) => {
                        if send_frame(&mut sink, &frame).await.is_err() {
                            break false;
                        }
                    }
                    None => break false,
                },
                alive = screen.changed() => break alive,
                changed = view_rx.changed() => {
                    if changed.is_err() {
                        break false;
                    }
                    view = *view_rx.borrow_and_update();
                    break true;
                }
            }
        };
        if !keep_going {
            break;
        }
    }

    let _ = sink.close().await;
}

/// Handle one text frame. `false` ends the session.
async fn handle_text(
    state: &AppState,
    auth: &AuthUser,
    text: &str,
    view_tx: &watch::Sender<NameView>,
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
        ClientFrame::SetView(query) => {
            view_tx.send_modify(|view| *view = query.merge_into(*view));
        }
        ClientFrame::AddName(request) => {
            if let Err(err) = add_name(state, auth, request).await {
                reply_error(replies, err).await;
            }
        }
        ClientFrame::LikeName(request) => {
            if let Err(err) = like_name(state, auth, request).await {
                reply_error(replies, err).await;
            }
        }
        ClientFrame::Edit(_) => {
            let _ = replies
                .send(ServerFrame::error(
                    "UNSUPPORTED_FRAME",
                    "EDIT is only accepted on the predictions screen",
                ))
                .await;
        }
        ClientFrame::Ping => {
            let _ = replies.send(ServerFrame::Pong).await;
        }
    }

    true
}

async fn add_name(state: &AppState, auth: &AuthUser, request: NameRequest) -> ApiResult<()> {
    request.validate()?;
    let added = NameService::new(state.service_context())
        .suggest_name(auth.email(), &request.name, request.boy, request.girl)
        .await?;

    if added.is_none() {
        let key = NameKey::normalize(&request.name, request.boy, request.girl);
        return Err(ServiceError::from(DomainError::NameAlreadyExists(key)).into());
    }
    Ok(())
}

async fn like_name(state: &AppState, auth: &AuthUser, request: NameRequest) -> ApiResult<()> {
    request.validate()?;
    NameService::new(state.service_context())
        .like_name(auth.email(), &request.name, request.boy, request.girl)
        .await?;
    Ok(())
}
