#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConnectionProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apn: Option<Apn>,
    pub ocpp_version: OcppVersion,
    pub ocpp_transport: OcppTransport,
    pub ocpp_csms_url: String,
    pub message_timeout: i32,
    pub security_profile: i32,
    pub ocpp_interface: OcppInterface,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpn: Option<Vpn>,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Apn {
    pub apn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apn_user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apn_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sim_pin: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_only_preferred_network: Option<bool>,
    pub apn_authentication: ApnAuthentication,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vpn {
    pub server: String,
    pub user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub password: String,
    pub key: String,
    #[serde(rename = "type")]
    pub kind: VpnType,
}

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Clone, Debug)]
pub enum OcppVersion {
    OCPP12,
    OCPP15,
    OCPP16,
    OCPP20,
}

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Clone, Debug)]
pub enum OcppTransport {
    JSON,
    SOAP,
}

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Clone, Debug)]
pub enum OcppInterface {
    Wired0,
    Wired1,
    Wired2,
    Wired3,
    Wireless0,
    Wireless1,
    Wireless2,
    Wireless3,
}

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Clone, Debug)]
pub enum VpnType {
    IKEv2,
    IPSec,
    L2TP,
    PPTP,
}

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Clone, Debug)]
pub enum ApnAuthentication {
    CHAP,
    NONE,
    PAP,
    AUTO,
}

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Clone, Debug)]
pub enum SetNetworkProfileStatus {
    Accepted,
    Rejected,
    Failed,
}
