//! Mock Charging Station endpoint.
//!
//! One [`Endpoint`] emulates one Charging Station over one connection. The
//! test driver issues calls through it while the dispatch loop started by
//! [`Endpoint::start`] answers CSMS-initiated requests from the configured
//! [`Responses`] and records them in [`Received`] for later assertions.

mod call;
mod dispatch;
mod handlers;
mod pending;
mod requests;
mod responses;

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicI32, Ordering},
        Arc, Mutex, PoisonError,
    },
    time::Duration,
};

use octt_core::{
    format::{error::OcppError, frame::CallError},
    v201::{protocol_error::ProtocolError, types::TransactionEventType, Action},
};
use serde_json::Value;
use tokio::sync::oneshot;

pub use dispatch::Session;
pub use pending::{Inbound, Pending, Received, Signal};
pub use responses::Responses;

use crate::error::HandlerError;

pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) type Handler = Box<dyn Fn(&Shared, Value) -> Result<Value, HandlerError> + Send + Sync>;
pub(crate) type CallReply = Result<Value, OcppError<CallError<ProtocolError>>>;

pub(crate) struct Shared {
    identity: String,
    call_timeout: Duration,
    strict_schema: bool,
    handlers: HashMap<Action, Handler>,
    outbox_tx: flume::Sender<String>,
    outbox_rx: flume::Receiver<String>,
    pending_calls: Mutex<HashMap<String, oneshot::Sender<CallReply>>>,
    pub(crate) received: Received,
    pub(crate) responses: Mutex<Responses>,
    seq_no: AtomicI32,
    event_reported: AtomicBool,
    started: AtomicBool,
    running: AtomicBool,
}

#[derive(Clone)]
pub struct Endpoint {
    shared: Arc<Shared>,
}

pub struct EndpointBuilder {
    identity: String,
    call_timeout: Duration,
    strict_schema: bool,
    responses: Responses,
    handlers: HashMap<Action, Handler>,
}

impl EndpointBuilder {
    pub fn call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Check every CSMS reply against the message schema, rejecting unknown
    /// properties and overlong strings as well as undecodable payloads.
    pub fn strict_schema(mut self, strict: bool) -> Self {
        self.strict_schema = strict;
        self
    }

    /// Initial configured responses.
    pub fn responses(mut self, responses: Responses) -> Self {
        self.responses = responses;
        self
    }

    /// Replaces the default answer for `R`. The request is still recorded.
    pub fn handler<R, F>(mut self, respond: F) -> Self
    where
        R: Inbound,
        F: Fn(&R) -> Result<R::Response, HandlerError> + Send + Sync + 'static,
    {
        self.handlers
            .insert(R::ACTION, handlers::typed::<R, _>(move |_, request| respond(request)));
        self
    }

    /// Answers every `action` request with a CallError, emulating a station
    /// without the feature.
    pub fn reject_with(mut self, action: Action, code: ProtocolError, description: impl Into<String>) -> Self {
        self.handlers
            .insert(action, handlers::rejecting(code, description.into()));
        self
    }

    pub fn build(self) -> Endpoint {
        let (outbox_tx, outbox_rx) = flume::unbounded();
        Endpoint {
            shared: Arc::new(Shared {
                identity: self.identity,
                call_timeout: self.call_timeout,
                strict_schema: self.strict_schema,
                handlers: self.handlers,
                outbox_tx,
                outbox_rx,
                pending_calls: Mutex::new(HashMap::new()),
                received: Received::default(),
                responses: Mutex::new(self.responses),
                seq_no: AtomicI32::new(-1),
                event_reported: AtomicBool::new(false),
                started: AtomicBool::new(false),
                running: AtomicBool::new(false),
            }),
        }
    }
}

impl Endpoint {
    pub fn builder(identity: impl Into<String>) -> EndpointBuilder {
        EndpointBuilder {
            identity: identity.into(),
            call_timeout: DEFAULT_CALL_TIMEOUT,
            strict_schema: false,
            responses: Responses::default(),
            handlers: handlers::default_handlers(),
        }
    }

    /// Endpoint with every default handler.
    pub fn new(identity: impl Into<String>) -> Self {
        Self::builder(identity).build()
    }

    pub fn identity(&self) -> &str {
        &self.shared.identity
    }

    pub fn call_timeout(&self) -> Duration {
        self.shared.call_timeout
    }

    /// Sequence number for the next TransactionEvent. Starts at 0.
    pub fn next_seq_no(&self) -> i32 {
        self.shared.seq_no.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Last number handed out by `next_seq_no`, `-1` if none yet.
    pub fn seq_no(&self) -> i32 {
        self.shared.seq_no.load(Ordering::SeqCst)
    }

    /// Restart numbering, as for a new transaction.
    pub fn reset_seq_no(&self) {
        self.shared.seq_no.store(-1, Ordering::SeqCst);
    }

    /// The next `next_seq_no()` returns `seq_no + 1`.
    pub fn set_seq_no(&self, seq_no: i32) {
        self.shared.seq_no.store(seq_no, Ordering::SeqCst);
    }

    /// `Started` for the first NotifyEvent of the session, `Updated` afterwards.
    pub fn notify_event_type(&self) -> TransactionEventType {
        if self.shared.event_reported.swap(true, Ordering::SeqCst) {
            TransactionEventType::Updated
        } else {
            TransactionEventType::Started
        }
    }

    pub fn received(&self) -> &Received {
        &self.shared.received
    }

    pub fn configure(&self, f: impl FnOnce(&mut Responses)) {
        let mut responses = self.shared.responses.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut responses);
    }

    pub fn responses(&self) -> Responses {
        self.shared
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("identity", &self.shared.identity)
            .field("running", &self.is_running())
            .finish()
    }
}
