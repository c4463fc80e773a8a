use std::{sync::atomic::Ordering, sync::PoisonError, time::Duration};

use octt_core::{
    format::{
        error::{GenericError, OcppError},
        frame::Call,
        message::EncodeDecode,
    },
    v201::OcppRequest,
};
use tokio::sync::oneshot;

use super::{CallReply, Endpoint};
use crate::{error::EndpointError, schema};

impl Endpoint {
    /// Sends `request` and waits for the CSMS reply within the call timeout.
    pub async fn call<R: OcppRequest + std::fmt::Debug>(&self, request: R) -> Result<R::Response, EndpointError> {
        self.call_with_timeout(request, self.shared.call_timeout).await
    }

    pub async fn call_with_timeout<R: OcppRequest + std::fmt::Debug>(
        &self,
        request: R,
        timeout: Duration,
    ) -> Result<R::Response, EndpointError> {
        let action = R::ACTION;
        log::info!("{} to CSMS: {:?}", action, request);
        let unique_id = uuid::Uuid::new_v4().to_string();
        let call = Call::new(unique_id.clone(), action, &request).map_err(|e| EndpointError::Parse {
            action,
            message: e.to_string(),
        })?;

        let (tx, rx) = oneshot::channel::<CallReply>();
        self.pending_calls().insert(unique_id.clone(), tx);
        // checked after registering so the loop's shutdown drain cannot miss this call
        if !self.shared.running.load(Ordering::SeqCst) {
            self.pending_calls().remove(&unique_id);
            return Err(EndpointError::Disconnected);
        }
        if self.shared.outbox_tx.send(call.encode()).is_err() {
            self.pending_calls().remove(&unique_id);
            return Err(EndpointError::Disconnected);
        }

        let reply = match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(_)) => Err(OcppError::Other(GenericError::Offline)),
            Err(_) => {
                self.pending_calls().remove(&unique_id);
                Err(OcppError::Other(GenericError::TimeOut))
            }
        };
        let payload = reply.map_err(|e| EndpointError::from_call(action, e))?;
        if self.shared.strict_schema {
            return schema::conforms(&payload).map_err(|e| EndpointError::Parse {
                action,
                message: e.to_string(),
            });
        }
        serde_json::from_value(payload).map_err(|e| EndpointError::Parse {
            action,
            message: e.to_string(),
        })
    }

    fn pending_calls(
        &self,
    ) -> std::sync::MutexGuard<'_, std::collections::HashMap<String, oneshot::Sender<CallReply>>> {
        self.shared.pending_calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
