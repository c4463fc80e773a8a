pub mod action;
pub mod messages;
pub mod protocol_error;
pub mod types;

pub use action::Action;

/// Binds a request record to its action name and the response it expects.
pub trait OcppRequest: serde::Serialize + serde::de::DeserializeOwned + Clone + Send + Sync + 'static {
    const ACTION: Action;
    type Response: serde::Serialize + serde::de::DeserializeOwned + Clone + Send + Sync + 'static;
}
