//! OCPP-J framing and the OCPP 2.0.1 message model.
//!
//! [`format`] knows how to split a WebSocket text frame into a Call, a
//! CallResult or a CallError and how to write those back. [`v201`] holds the
//! typed request/response records for every action the conformance suite
//! exchanges with a CSMS.

pub mod format;
pub mod v201;
