use crate::v201::types::{CertificateAction, Iso15118EVCertificateStatus, StatusInfo};

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Get15118EVCertificateRequest {
    #[serde(rename = "iso15118SchemaVersion")]
    pub iso15118_schema_version: String,
    pub action: CertificateAction,
    #[serde(rename = "exiRequest")]
    pub exi_request: String,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Get15118EVCertificateResponse {
    pub status: Iso15118EVCertificateStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
    pub exi_response: String,
}
