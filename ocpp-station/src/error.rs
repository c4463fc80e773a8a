use octt_core::{
    format::{
        error::{GenericError, OcppError},
        frame::CallError,
    },
    v201::{protocol_error::ProtocolError, Action},
};
use tokio_tungstenite::tungstenite;

/// Failure of an endpoint operation as seen by a test driver.
#[derive(Debug)]
pub enum EndpointError {
    /// The CSMS answered with a CallError.
    Protocol {
        action: Action,
        code: ProtocolError,
        description: String,
    },
    /// No reply (or no inbound request) within the allowed window.
    Timeout { action: Action },
    /// A reply arrived but its payload does not match the response record.
    Parse { action: Action, message: String },
    /// The dispatch loop is not running.
    Disconnected,
    /// The dispatch loop was stopped by its session.
    Cancelled,
    AlreadyStarted,
    Transport(TransportError),
}

impl EndpointError {
    pub(crate) fn from_call(action: Action, err: OcppError<CallError<ProtocolError>>) -> Self {
        match err {
            OcppError::Protocol(e) => EndpointError::Protocol {
                action,
                code: e.error_code,
                description: e.error_description,
            },
            OcppError::Other(GenericError::TimeOut) => EndpointError::Timeout { action },
            OcppError::Other(GenericError::ParsingError) => EndpointError::Parse {
                action,
                message: "malformed response frame".into(),
            },
            OcppError::Other(GenericError::Offline | GenericError::General) => EndpointError::Disconnected,
        }
    }

    /// The CallError code, when the CSMS rejected the call at protocol level.
    pub fn protocol_code(&self) -> Option<ProtocolError> {
        match self {
            EndpointError::Protocol { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl std::fmt::Display for EndpointError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndpointError::Protocol {
                action,
                code,
                description,
            } => write!(f, "{action} rejected with {code}: {description}"),
            EndpointError::Timeout { action } => write!(f, "timed out waiting for {action}"),
            EndpointError::Parse { action, message } => write!(f, "invalid {action} payload: {message}"),
            EndpointError::Disconnected => write!(f, "connection is not running"),
            EndpointError::Cancelled => write!(f, "session cancelled"),
            EndpointError::AlreadyStarted => write!(f, "endpoint already started"),
            EndpointError::Transport(e) => write!(f, "transport: {e}"),
        }
    }
}

impl std::error::Error for EndpointError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EndpointError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TransportError> for EndpointError {
    fn from(value: TransportError) -> Self {
        EndpointError::Transport(value)
    }
}

#[derive(Debug)]
pub enum TransportError {
    InvalidUrl(String),
    /// The upgrade request was answered with something other than 101.
    Rejected { status: u16 },
    Handshake(Box<tungstenite::Error>),
    /// Local certificate material could not be loaded.
    Tls(String),
    Send(Box<tungstenite::Error>),
}

impl TransportError {
    pub(crate) fn from_handshake(err: tungstenite::Error) -> Self {
        match err {
            tungstenite::Error::Http(response) => TransportError::Rejected {
                status: response.status().as_u16(),
            },
            other => TransportError::Handshake(Box::new(other)),
        }
    }

    /// HTTP status of a rejected upgrade.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Rejected { status } => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::InvalidUrl(url) => write!(f, "invalid CSMS url: {url}"),
            TransportError::Rejected { status } => write!(f, "upgrade rejected with HTTP {status}"),
            TransportError::Handshake(e) => write!(f, "handshake failed: {e}"),
            TransportError::Tls(msg) => write!(f, "tls setup failed: {msg}"),
            TransportError::Send(e) => write!(f, "send failed: {e}"),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Handshake(e) | TransportError::Send(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    pub var: String,
    pub value: String,
    pub reason: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={:?}: {}", self.var, self.value, self.reason)
    }
}

impl std::error::Error for ConfigError {}

/// Returned by an inbound handler to answer the CSMS with a CallError.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerError {
    pub code: ProtocolError,
    pub description: String,
}

impl HandlerError {
    pub fn new(code: ProtocolError, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
        }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.description)
    }
}

impl std::error::Error for HandlerError {}
