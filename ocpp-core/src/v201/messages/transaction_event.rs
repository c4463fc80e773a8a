use chrono::{DateTime, Utc};

use crate::v201::types::{
    Evse, IdToken, IdTokenInfo, MessageContent, MeterValue, Transaction, TransactionEventType, TriggerReason,
};

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEventRequest {
    pub event_type: TransactionEventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meter_value: Option<Vec<MeterValue>>,
    pub timestamp: DateTime<Utc>,
    pub trigger_reason: TriggerReason,
    pub seq_no: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_phases_used: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cable_max_current: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<i32>,
    pub transaction_info: Transaction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evse: Option<Evse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token: Option<IdToken>,
}

impl TransactionEventRequest {
    pub fn new(
        event_type: TransactionEventType,
        trigger_reason: TriggerReason,
        seq_no: i32,
        transaction_info: Transaction,
    ) -> Self {
        Self {
            event_type,
            meter_value: None,
            timestamp: Utc::now(),
            trigger_reason,
            seq_no,
            offline: None,
            number_of_phases_used: None,
            cable_max_current: None,
            reservation_id: None,
            transaction_info,
            evse: None,
            id_token: None,
        }
    }

    pub fn evse(mut self, evse: Evse) -> Self {
        self.evse = Some(evse);
        self
    }

    pub fn id_token(mut self, id_token: IdToken) -> Self {
        self.id_token = Some(id_token);
        self
    }

    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = Some(offline);
        self
    }

    pub fn meter_value(mut self, meter_value: Vec<MeterValue>) -> Self {
        self.meter_value = Some(meter_value);
        self
    }

    pub fn reservation_id(mut self, reservation_id: i32) -> Self {
        self.reservation_id = Some(reservation_id);
        self
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEventResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging_priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token_info: Option<IdTokenInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_personal_message: Option<MessageContent>,
}
