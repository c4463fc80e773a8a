use std::collections::HashMap;

use octt_core::v201::types::*;

/// Canned answers for CSMS-initiated requests.
///
/// Each field is read when the matching request arrives; changing it afterwards
/// only affects later requests.
#[derive(Clone, Debug)]
pub struct Responses {
    pub set_variables_status: SetVariableStatus,
    /// Returned verbatim instead of one synthesized result per item.
    pub set_variables_result: Option<Vec<SetVariableResult>>,
    pub get_variables_status: GetVariableStatus,
    /// `"Component.Variable"` → attribute value; unknown keys answer `"0"`.
    pub get_variables_values: HashMap<String, String>,
    pub get_variables_result: Option<Vec<GetVariableResult>>,
    pub get_base_report_status: GenericDeviceModelStatus,
    pub get_report_status: GenericDeviceModelStatus,
    pub reset_status: ResetStatus,
    pub clear_cache_status: ClearCacheStatus,
    pub send_local_list_status: SendLocalListStatus,
    pub local_list_version: i32,
    pub request_start_transaction_status: RequestStartStopStatus,
    pub request_start_transaction_id: Option<String>,
    pub request_stop_transaction_status: RequestStartStopStatus,
    /// `None` omits `ongoingIndicator`, which is not the same as `Some(false)`.
    pub get_transaction_status_ongoing_indicator: Option<bool>,
    pub get_transaction_status_messages_in_queue: bool,
    pub unlock_connector_status: UnlockStatus,
    pub trigger_message_status: TriggerMessageStatus,
    pub certificate_signed_status: CertificateSignedStatus,
    pub change_availability_status: ChangeAvailabilityStatus,
    pub reserve_now_status: ReserveNowStatus,
    pub cancel_reservation_status: CancelReservationStatus,
    pub update_firmware_status: UpdateFirmwareStatus,
    pub publish_firmware_status: GenericStatus,
    pub unpublish_firmware_status: UnpublishFirmwareStatus,
    pub install_certificate_status: InstallCertificateStatus,
    pub get_installed_certificate_ids_status: GetInstalledCertificateStatus,
    pub installed_certificates: Option<Vec<CertificateHashDataChain>>,
    pub delete_certificate_status: DeleteCertificateStatus,
    pub set_network_profile_status: SetNetworkProfileStatus,
    pub set_charging_profile_status: ChargingProfileStatus,
    pub clear_charging_profile_status: ClearChargingProfileStatus,
    pub get_charging_profiles_status: GetChargingProfileStatus,
    pub get_composite_schedule_status: GenericStatus,
    pub composite_schedule: Option<CompositeSchedule>,
    pub get_monitoring_report_status: GenericDeviceModelStatus,
    pub set_monitoring_base_status: GenericDeviceModelStatus,
    pub set_variable_monitoring_status: SetMonitoringStatus,
    pub set_variable_monitoring_result: Option<Vec<SetMonitoringResult>>,
    pub set_monitoring_level_status: GenericStatus,
    pub clear_variable_monitoring_status: ClearMonitoringStatus,
    pub clear_variable_monitoring_result: Option<Vec<ClearMonitoringResult>>,
    pub customer_information_status: CustomerInformationStatus,
    pub get_log_status: LogStatus,
    pub get_log_filename: Option<String>,
    pub set_display_message_status: DisplayMessageStatus,
    pub get_display_messages_status: GetDisplayMessagesStatus,
    pub clear_display_message_status: ClearMessageStatus,
}

impl Default for Responses {
    fn default() -> Self {
        Self {
            set_variables_status: SetVariableStatus::Accepted,
            set_variables_result: None,
            get_variables_status: GetVariableStatus::Accepted,
            get_variables_values: HashMap::new(),
            get_variables_result: None,
            get_base_report_status: GenericDeviceModelStatus::Accepted,
            get_report_status: GenericDeviceModelStatus::Accepted,
            reset_status: ResetStatus::Accepted,
            clear_cache_status: ClearCacheStatus::Accepted,
            send_local_list_status: SendLocalListStatus::Accepted,
            local_list_version: 1,
            request_start_transaction_status: RequestStartStopStatus::Accepted,
            request_start_transaction_id: None,
            request_stop_transaction_status: RequestStartStopStatus::Accepted,
            get_transaction_status_ongoing_indicator: None,
            get_transaction_status_messages_in_queue: false,
            unlock_connector_status: UnlockStatus::Unlocked,
            trigger_message_status: TriggerMessageStatus::Accepted,
            certificate_signed_status: CertificateSignedStatus::Accepted,
            change_availability_status: ChangeAvailabilityStatus::Accepted,
            reserve_now_status: ReserveNowStatus::Accepted,
            cancel_reservation_status: CancelReservationStatus::Accepted,
            update_firmware_status: UpdateFirmwareStatus::Accepted,
            publish_firmware_status: GenericStatus::Accepted,
            unpublish_firmware_status: UnpublishFirmwareStatus::Unpublished,
            install_certificate_status: InstallCertificateStatus::Accepted,
            get_installed_certificate_ids_status: GetInstalledCertificateStatus::Accepted,
            installed_certificates: None,
            delete_certificate_status: DeleteCertificateStatus::Accepted,
            set_network_profile_status: SetNetworkProfileStatus::Accepted,
            set_charging_profile_status: ChargingProfileStatus::Accepted,
            clear_charging_profile_status: ClearChargingProfileStatus::Accepted,
            get_charging_profiles_status: GetChargingProfileStatus::Accepted,
            get_composite_schedule_status: GenericStatus::Accepted,
            composite_schedule: None,
            get_monitoring_report_status: GenericDeviceModelStatus::Accepted,
            set_monitoring_base_status: GenericDeviceModelStatus::Accepted,
            set_variable_monitoring_status: SetMonitoringStatus::Accepted,
            set_variable_monitoring_result: None,
            set_monitoring_level_status: GenericStatus::Accepted,
            clear_variable_monitoring_status: ClearMonitoringStatus::Accepted,
            clear_variable_monitoring_result: None,
            customer_information_status: CustomerInformationStatus::Accepted,
            get_log_status: LogStatus::Accepted,
            get_log_filename: None,
            set_display_message_status: DisplayMessageStatus::Accepted,
            get_display_messages_status: GetDisplayMessagesStatus::Accepted,
            clear_display_message_status: ClearMessageStatus::Accepted,
        }
    }
}

impl Responses {
    /// Value answered for `component.variable` in GetVariables.
    pub fn variable_value(&self, component: &str, variable: &str) -> String {
        self.get_variables_values
            .get(&format!("{component}.{variable}"))
            .cloned()
            .unwrap_or_else(|| "0".to_string())
    }

    pub fn set_variable_value(&mut self, component: &str, variable: &str, value: impl Into<String>) {
        self.get_variables_values
            .insert(format!("{component}.{variable}"), value.into());
    }
}
