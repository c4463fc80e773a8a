//! Mock OCPP 2.0.1 Charging Station used to check a CSMS against the
//! conformance test cases.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod reusable_states;
pub mod schema;
pub mod transport;

pub use config::SuiteConfig;
pub use endpoint::{Endpoint, EndpointBuilder, Responses, Session};
pub use error::{ConfigError, EndpointError, HandlerError, TransportError};
pub use transport::{connect, ConnectOptions, TokioWsClient, WebsocketIo};
