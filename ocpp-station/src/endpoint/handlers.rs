use std::{collections::HashMap, sync::PoisonError};

use octt_core::v201::{messages::*, protocol_error::ProtocolError, types::*, Action, OcppRequest};
use serde_json::Value;

use super::{
    pending::Inbound,
    responses::Responses,
    Handler, Shared,
};
use crate::error::HandlerError;

/// Answer built from the configured responses.
pub(crate) trait DefaultResponse: Inbound {
    fn respond(&self, responses: &Responses) -> Self::Response;
}

/// Wraps a typed responder into a handler: decode, log, answer, record.
pub(crate) fn typed<R, F>(respond: F) -> Handler
where
    R: Inbound,
    F: Fn(&Shared, &R) -> Result<R::Response, HandlerError> + Send + Sync + 'static,
{
    Box::new(move |shared: &Shared, payload: Value| {
        let request: R =
            serde_json::from_value(payload).map_err(|e| HandlerError::new(decode_error_code(&e), e.to_string()))?;
        log::info!("{} from CSMS: {:?}", R::ACTION, request);
        let response = respond(shared, &request);
        R::slot(&shared.received).record(request);
        let response = response?;
        serde_json::to_value(response).map_err(|e| HandlerError::new(ProtocolError::InternalError, e.to_string()))
    })
}

/// CallError code naming the constraint an undecodable payload broke.
fn decode_error_code(err: &serde_json::Error) -> ProtocolError {
    let message = err.to_string();
    if message.starts_with("missing field") {
        ProtocolError::OccurrenceConstraintViolation
    } else if message.starts_with("invalid type") {
        ProtocolError::TypeConstraintViolation
    } else if ["unknown variant", "invalid value", "invalid length"]
        .iter()
        .any(|prefix| message.starts_with(prefix))
    {
        ProtocolError::PropertyConstraintViolation
    } else {
        ProtocolError::FormatViolation
    }
}

fn default_handler<R: DefaultResponse>() -> Handler {
    typed::<R, _>(|shared, request| {
        let responses = shared.responses.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(request.respond(&responses))
    })
}

pub(crate) fn rejecting(code: ProtocolError, description: String) -> Handler {
    Box::new(move |_: &Shared, _: Value| Err(HandlerError::new(code, description.clone())))
}

pub(crate) fn default_handlers() -> HashMap<Action, Handler> {
    let mut handlers: HashMap<Action, Handler> = HashMap::new();
    macro_rules! register {
        ($($req:ty),* $(,)?) => {
            $(handlers.insert(<$req as OcppRequest>::ACTION, default_handler::<$req>());)*
        };
    }
    register!(
        SetVariablesRequest,
        GetVariablesRequest,
        GetBaseReportRequest,
        GetReportRequest,
        ResetRequest,
        ClearCacheRequest,
        SendLocalListRequest,
        GetLocalListVersionRequest,
        RequestStartTransactionRequest,
        RequestStopTransactionRequest,
        GetTransactionStatusRequest,
        UnlockConnectorRequest,
        TriggerMessageRequest,
        CertificateSignedRequest,
        ChangeAvailabilityRequest,
        ReserveNowRequest,
        CancelReservationRequest,
        CostUpdatedRequest,
        UpdateFirmwareRequest,
        PublishFirmwareRequest,
        UnpublishFirmwareRequest,
        InstallCertificateRequest,
        GetInstalledCertificateIdsRequest,
        DeleteCertificateRequest,
        SetNetworkProfileRequest,
        SetChargingProfileRequest,
        ClearChargingProfileRequest,
        GetChargingProfilesRequest,
        GetCompositeScheduleRequest,
        GetMonitoringReportRequest,
        SetMonitoringBaseRequest,
        SetVariableMonitoringRequest,
        SetMonitoringLevelRequest,
        ClearVariableMonitoringRequest,
        CustomerInformationRequest,
        GetLogRequest,
        SetDisplayMessageRequest,
        GetDisplayMessagesRequest,
        ClearDisplayMessageRequest,
    );
    handlers
}

/// Requests whose answer is just `{status}` (plus an optional extra field).
macro_rules! status_response {
    ($($req:ty => $res:ident { status: $field:ident $(, $extra:ident: $src:ident)* }),* $(,)?) => {
        $(
            impl DefaultResponse for $req {
                fn respond(&self, responses: &Responses) -> $res {
                    $res {
                        status: responses.$field.clone(),
                        status_info: None,
                        $($extra: responses.$src.clone(),)*
                    }
                }
            }
        )*
    };
}

status_response! {
    GetBaseReportRequest => GetBaseReportResponse { status: get_base_report_status },
    GetReportRequest => GetReportResponse { status: get_report_status },
    ResetRequest => ResetResponse { status: reset_status },
    ClearCacheRequest => ClearCacheResponse { status: clear_cache_status },
    SendLocalListRequest => SendLocalListResponse { status: send_local_list_status },
    RequestStartTransactionRequest => RequestStartTransactionResponse {
        status: request_start_transaction_status,
        transaction_id: request_start_transaction_id
    },
    RequestStopTransactionRequest => RequestStopTransactionResponse { status: request_stop_transaction_status },
    UnlockConnectorRequest => UnlockConnectorResponse { status: unlock_connector_status },
    TriggerMessageRequest => TriggerMessageResponse { status: trigger_message_status },
    CertificateSignedRequest => CertificateSignedResponse { status: certificate_signed_status },
    ChangeAvailabilityRequest => ChangeAvailabilityResponse { status: change_availability_status },
    ReserveNowRequest => ReserveNowResponse { status: reserve_now_status },
    CancelReservationRequest => CancelReservationResponse { status: cancel_reservation_status },
    UpdateFirmwareRequest => UpdateFirmwareResponse { status: update_firmware_status },
    PublishFirmwareRequest => PublishFirmwareResponse { status: publish_firmware_status },
    InstallCertificateRequest => InstallCertificateResponse { status: install_certificate_status },
    GetInstalledCertificateIdsRequest => GetInstalledCertificateIdsResponse {
        status: get_installed_certificate_ids_status,
        certificate_hash_data_chain: installed_certificates
    },
    DeleteCertificateRequest => DeleteCertificateResponse { status: delete_certificate_status },
    SetNetworkProfileRequest => SetNetworkProfileResponse { status: set_network_profile_status },
    SetChargingProfileRequest => SetChargingProfileResponse { status: set_charging_profile_status },
    ClearChargingProfileRequest => ClearChargingProfileResponse { status: clear_charging_profile_status },
    GetChargingProfilesRequest => GetChargingProfilesResponse { status: get_charging_profiles_status },
    GetCompositeScheduleRequest => GetCompositeScheduleResponse {
        status: get_composite_schedule_status,
        schedule: composite_schedule
    },
    GetMonitoringReportRequest => GetMonitoringReportResponse { status: get_monitoring_report_status },
    SetMonitoringBaseRequest => SetMonitoringBaseResponse { status: set_monitoring_base_status },
    SetMonitoringLevelRequest => SetMonitoringLevelResponse { status: set_monitoring_level_status },
    CustomerInformationRequest => CustomerInformationResponse { status: customer_information_status },
    GetLogRequest => GetLogResponse { status: get_log_status, filename: get_log_filename },
    SetDisplayMessageRequest => SetDisplayMessageResponse { status: set_display_message_status },
    GetDisplayMessagesRequest => GetDisplayMessagesResponse { status: get_display_messages_status },
    ClearDisplayMessageRequest => ClearDisplayMessageResponse { status: clear_display_message_status },
}

impl DefaultResponse for SetVariablesRequest {
    fn respond(&self, responses: &Responses) -> SetVariablesResponse {
        if let Some(result) = &responses.set_variables_result {
            return SetVariablesResponse {
                set_variable_result: result.clone(),
            };
        }
        SetVariablesResponse {
            set_variable_result: self
                .set_variable_data
                .iter()
                .map(|data| SetVariableResult {
                    attribute_type: data.attribute_type.clone(),
                    attribute_status: responses.set_variables_status.clone(),
                    component: data.component.clone(),
                    variable: data.variable.clone(),
                    attribute_status_info: None,
                })
                .collect(),
        }
    }
}

impl DefaultResponse for GetVariablesRequest {
    fn respond(&self, responses: &Responses) -> GetVariablesResponse {
        if let Some(result) = &responses.get_variables_result {
            return GetVariablesResponse {
                get_variable_result: result.clone(),
            };
        }
        GetVariablesResponse {
            get_variable_result: self
                .get_variable_data
                .iter()
                .map(|data| GetVariableResult {
                    attribute_status: responses.get_variables_status.clone(),
                    attribute_type: data.attribute_type.clone(),
                    attribute_value: Some(responses.variable_value(&data.component.name, &data.variable.name)),
                    component: data.component.clone(),
                    variable: data.variable.clone(),
                    attribute_status_info: None,
                })
                .collect(),
        }
    }
}

impl DefaultResponse for SetVariableMonitoringRequest {
    fn respond(&self, responses: &Responses) -> SetVariableMonitoringResponse {
        if let Some(result) = &responses.set_variable_monitoring_result {
            return SetVariableMonitoringResponse {
                set_monitoring_result: result.clone(),
            };
        }
        SetVariableMonitoringResponse {
            set_monitoring_result: self
                .set_monitoring_data
                .iter()
                .map(|data| SetMonitoringResult {
                    id: data.id,
                    status: responses.set_variable_monitoring_status.clone(),
                    kind: data.kind.clone(),
                    component: data.component.clone(),
                    variable: data.variable.clone(),
                    severity: data.severity,
                    status_info: None,
                })
                .collect(),
        }
    }
}

impl DefaultResponse for ClearVariableMonitoringRequest {
    fn respond(&self, responses: &Responses) -> ClearVariableMonitoringResponse {
        if let Some(result) = &responses.clear_variable_monitoring_result {
            return ClearVariableMonitoringResponse {
                clear_monitoring_result: result.clone(),
            };
        }
        ClearVariableMonitoringResponse {
            clear_monitoring_result: self
                .id
                .iter()
                .map(|id| ClearMonitoringResult {
                    status: responses.clear_variable_monitoring_status.clone(),
                    id: *id,
                    status_info: None,
                })
                .collect(),
        }
    }
}

impl DefaultResponse for GetLocalListVersionRequest {
    fn respond(&self, responses: &Responses) -> GetLocalListVersionResponse {
        GetLocalListVersionResponse {
            version_number: responses.local_list_version,
        }
    }
}

impl DefaultResponse for GetTransactionStatusRequest {
    fn respond(&self, responses: &Responses) -> GetTransactionStatusResponse {
        GetTransactionStatusResponse {
            ongoing_indicator: responses.get_transaction_status_ongoing_indicator,
            messages_in_queue: responses.get_transaction_status_messages_in_queue,
        }
    }
}

impl DefaultResponse for CostUpdatedRequest {
    fn respond(&self, _: &Responses) -> CostUpdatedResponse {
        CostUpdatedResponse {}
    }
}

impl DefaultResponse for UnpublishFirmwareRequest {
    fn respond(&self, responses: &Responses) -> UnpublishFirmwareResponse {
        UnpublishFirmwareResponse {
            status: responses.unpublish_firmware_status.clone(),
        }
    }
}
