use std::{
    fmt::Debug,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, PoisonError,
    },
    time::Duration,
};

use octt_core::v201::{messages::*, OcppRequest};
use tokio::sync::Notify;

use crate::error::EndpointError;

/// Binary, explicitly cleared event.
#[derive(Debug, Default)]
pub struct Signal {
    set: AtomicBool,
    notify: Notify,
}

impl Signal {
    pub fn set(&self) {
        self.set.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn clear(&self) {
        self.set.store(false, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.set.load(Ordering::SeqCst)
    }

    /// Resolves immediately if already set.
    pub async fn wait(&self) {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            // register before checking the flag so a concurrent set() is not lost
            notified.as_mut().enable();
            if self.is_set() {
                return;
            }
            notified.await;
        }
    }
}

/// Signal plus the last payload of one CSMS-initiated request type.
pub struct Pending<T> {
    signal: Signal,
    payload: Mutex<Option<T>>,
}

impl<T> Default for Pending<T> {
    fn default() -> Self {
        Self {
            signal: Signal::default(),
            payload: Mutex::new(None),
        }
    }
}

impl<T: OcppRequest> Pending<T> {
    pub(crate) fn record(&self, request: T) {
        *self.payload.lock().unwrap_or_else(PoisonError::into_inner) = Some(request);
        self.signal.set();
    }

    pub fn is_set(&self) -> bool {
        self.signal.is_set()
    }

    /// The most recent request, kept across `clear()`.
    pub fn payload(&self) -> Option<T> {
        self.payload.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Re-arms the signal for the next occurrence.
    pub fn clear(&self) {
        self.signal.clear();
    }

    pub async fn wait(&self, timeout: Duration) -> Result<T, EndpointError> {
        tokio::time::timeout(timeout, self.signal.wait())
            .await
            .map_err(|_| EndpointError::Timeout { action: T::ACTION })?;
        self.payload().ok_or(EndpointError::Timeout { action: T::ACTION })
    }
}

impl<T> Debug for Pending<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pending").field("set", &self.signal.is_set()).finish()
    }
}

/// A request the CSMS may send to the station.
pub trait Inbound: OcppRequest + Debug {
    fn slot(received: &Received) -> &Pending<Self>;
}

macro_rules! received {
    ($($field:ident: $req:ty),* $(,)?) => {
        /// Pending slots for every CSMS-initiated action.
        #[derive(Debug, Default)]
        pub struct Received {
            $(pub $field: Pending<$req>,)*
        }

        $(
            impl Inbound for $req {
                fn slot(received: &Received) -> &Pending<Self> {
                    &received.$field
                }
            }
        )*
    };
}

received! {
    set_variables: SetVariablesRequest,
    get_variables: GetVariablesRequest,
    get_base_report: GetBaseReportRequest,
    get_report: GetReportRequest,
    reset: ResetRequest,
    clear_cache: ClearCacheRequest,
    send_local_list: SendLocalListRequest,
    get_local_list_version: GetLocalListVersionRequest,
    request_start_transaction: RequestStartTransactionRequest,
    request_stop_transaction: RequestStopTransactionRequest,
    get_transaction_status: GetTransactionStatusRequest,
    unlock_connector: UnlockConnectorRequest,
    trigger_message: TriggerMessageRequest,
    certificate_signed: CertificateSignedRequest,
    change_availability: ChangeAvailabilityRequest,
    reserve_now: ReserveNowRequest,
    cancel_reservation: CancelReservationRequest,
    cost_updated: CostUpdatedRequest,
    update_firmware: UpdateFirmwareRequest,
    publish_firmware: PublishFirmwareRequest,
    unpublish_firmware: UnpublishFirmwareRequest,
    install_certificate: InstallCertificateRequest,
    get_installed_certificate_ids: GetInstalledCertificateIdsRequest,
    delete_certificate: DeleteCertificateRequest,
    set_network_profile: SetNetworkProfileRequest,
    set_charging_profile: SetChargingProfileRequest,
    clear_charging_profile: ClearChargingProfileRequest,
    get_charging_profiles: GetChargingProfilesRequest,
    get_composite_schedule: GetCompositeScheduleRequest,
    get_monitoring_report: GetMonitoringReportRequest,
    set_monitoring_base: SetMonitoringBaseRequest,
    set_variable_monitoring: SetVariableMonitoringRequest,
    set_monitoring_level: SetMonitoringLevelRequest,
    clear_variable_monitoring: ClearVariableMonitoringRequest,
    customer_information: CustomerInformationRequest,
    get_log: GetLogRequest,
    set_display_message: SetDisplayMessageRequest,
    get_display_messages: GetDisplayMessagesRequest,
    clear_display_message: ClearDisplayMessageRequest,
}
