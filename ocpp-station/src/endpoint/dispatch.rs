use std::{
    future::Future,
    sync::{atomic::Ordering, Arc, PoisonError},
    task::Poll,
};

use futures::StreamExt;
use octt_core::{
    format::{
        error::{GenericError, OcppError},
        frame::{Call, CallError, CallResult},
        message::{CallResponse, EncodeDecode, OcppMessage},
    },
    v201::{protocol_error::ProtocolError, Action},
};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::{Endpoint, Shared};
use crate::{error::EndpointError, transport::WebsocketIo};

enum Event {
    Cancelled,
    Inbound(Option<String>),
    Outbound(Option<String>),
}

impl Endpoint {
    /// Spawns the dispatch loop over `ws`. An endpoint can be started once.
    pub fn start<W: WebsocketIo>(&self, ws: W) -> Result<Session, EndpointError> {
        if self.shared.started.swap(true, Ordering::SeqCst) {
            return Err(EndpointError::AlreadyStarted);
        }
        self.shared.running.store(true, Ordering::SeqCst);
        let token = CancellationToken::new();
        let task = tokio::spawn(run(self.shared.clone(), ws, token.clone()));
        Ok(Session {
            token,
            task: Some(task),
        })
    }
}

async fn run<W: WebsocketIo>(shared: Arc<Shared>, mut ws: W, token: CancellationToken) -> Result<(), EndpointError> {
    log::debug!("dispatch loop started for {}", shared.identity);
    let cancelled = token.cancelled();
    tokio::pin!(cancelled);
    let outbox = shared.outbox_rx.clone().into_stream();
    tokio::pin!(outbox);

    let result = loop {
        let event = futures::future::poll_fn(|cx| {
            if cancelled.as_mut().poll(cx).is_ready() {
                return Poll::Ready(Event::Cancelled);
            }
            if let Poll::Ready(msg) = ws.poll_recv(cx) {
                return Poll::Ready(Event::Inbound(msg));
            }
            if let Poll::Ready(msg) = outbox.poll_next_unpin(cx) {
                return Poll::Ready(Event::Outbound(msg));
            }
            Poll::Pending
        })
        .await;

        let outgoing = match event {
            Event::Cancelled => {
                ws.close(1000, "Normal closure").await;
                break Err(EndpointError::Cancelled);
            }
            Event::Inbound(None) => {
                log::info!("connection of {} closed by CSMS", shared.identity);
                break Err(EndpointError::Disconnected);
            }
            Event::Inbound(Some(msg)) => {
                log::debug!("[MSG_IN] {}", msg);
                match handle_msg(&shared, msg) {
                    Some(reply) => reply,
                    None => continue,
                }
            }
            Event::Outbound(Some(msg)) => msg,
            // the sender lives in `shared`, so the outbox never closes while we run
            Event::Outbound(None) => break Err(EndpointError::Disconnected),
        };
        log::debug!("[MSG_OUT] {}", outgoing);
        if let Err(e) = ws.send(outgoing).await {
            log::error!("send failed: {}", e);
            break Err(e.into());
        }
    };

    shared.running.store(false, Ordering::SeqCst);
    let drained: Vec<_> = shared
        .pending_calls
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .drain()
        .collect();
    for (_, tx) in drained {
        let _ = tx.send(Err(OcppError::Other(GenericError::Offline)));
    }
    log::debug!("dispatch loop for {} ended: {:?}", shared.identity, result);
    result
}

/// Returns the frame to send back, if any.
fn handle_msg(shared: &Shared, msg: String) -> Option<String> {
    match OcppMessage::<ProtocolError>::decode(msg) {
        OcppMessage::Call(call) => Some(handle_call(shared, call)),
        OcppMessage::CallResponse(response) => {
            let tx = shared
                .pending_calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(response.get_unique_id());
            match (tx, response) {
                (Some(tx), CallResponse::CallResult(res)) => {
                    let _ = tx.send(Ok(res.payload));
                }
                (Some(tx), CallResponse::CallError(err)) => {
                    let _ = tx.send(Err(OcppError::Protocol(err)));
                }
                (None, response) => {
                    log::warn!("no pending call for response {}", response.get_unique_id());
                }
            }
            None
        }
        OcppMessage::Invalid(invalid) => {
            let tx = invalid.unique_id.as_ref().and_then(|id| {
                shared
                    .pending_calls
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .remove(id)
            });
            match tx {
                Some(tx) => {
                    log::warn!("malformed response {}: {}", invalid.message, invalid.err_msg);
                    let _ = tx.send(Err(OcppError::Other(GenericError::ParsingError)));
                }
                None => log::warn!("dropping invalid frame {}: {}", invalid.message, invalid.err_msg),
            }
            None
        }
    }
}

fn handle_call(shared: &Shared, call: Call) -> String {
    let Call {
        unique_id,
        action,
        payload,
    } = call;
    let handler = action
        .parse::<Action>()
        .ok()
        .and_then(|action| shared.handlers.get(&action));
    let Some(handler) = handler else {
        log::warn!("unhandled action {} from CSMS", action);
        return CallError::new(unique_id, ProtocolError::NotImplemented)
            .with_description(format!("{action} is not implemented"))
            .encode();
    };
    match handler(shared, payload) {
        Ok(payload) => CallResult::new(unique_id, payload).encode(),
        Err(e) => {
            log::warn!("answering {} with {}", action, e);
            CallError::new(unique_id, e.code)
                .with_description(e.description)
                .encode()
        }
    }
}

/// Handle on a running dispatch loop. Dropping it cancels the loop.
pub struct Session {
    token: CancellationToken,
    task: Option<JoinHandle<Result<(), EndpointError>>>,
}

impl Session {
    /// Cancels the loop, which closes the connection with 1000 before it
    /// returns `Err(EndpointError::Cancelled)`.
    pub async fn stop(mut self) -> Result<(), EndpointError> {
        self.token.cancel();
        self.join().await
    }

    /// Waits until the loop ends on its own, e.g. when the CSMS closes.
    pub async fn closed(mut self) -> Result<(), EndpointError> {
        self.join().await
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    async fn join(&mut self) -> Result<(), EndpointError> {
        let Some(task) = self.task.take() else {
            return Err(EndpointError::Cancelled);
        };
        match task.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => Err(EndpointError::Cancelled),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
