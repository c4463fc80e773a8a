//! Suite configuration read from the process environment.

use std::{collections::HashMap, path::PathBuf, str::FromStr, time::Duration};

use octt_core::v201::types::{IdToken, IdTokenKind};

use crate::{
    error::ConfigError,
    transport::{ConnectOptions, TlsOptions},
};

#[derive(Clone, Debug, PartialEq)]
pub struct SuiteConfig {
    pub csms_address: String,
    pub csms_wss_address: Option<String>,
    pub basic_auth_cp: String,
    pub basic_auth_cp_password: String,
    pub security_profile_3_cp: Option<String>,
    pub tls: Option<TlsOptions>,
    pub valid_id_token: IdToken,
    pub invalid_id_token: Option<IdToken>,
    pub evse_id: i32,
    pub connector_id: i32,
    pub number_phases: i32,
    pub action_timeout: Duration,
    pub transaction_duration: Duration,
    pub local_list_version: i32,
    /// `AlignedDataCtrlr.Interval` the CSMS configures for clock-aligned meter values.
    pub clock_aligned_interval: Duration,
    pub call_timeout: Duration,
    /// `BASIC_AUTH_CP_<SUFFIX>` overrides, keyed by suffix.
    identities: HashMap<String, String>,
}

const IDENTITY_PREFIX: &str = "BASIC_AUTH_CP_";

impl SuiteConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        let get = |var: &str| vars.get(var).filter(|v| !v.is_empty()).cloned();

        let tls = match get("TLS_CA_CERT") {
            Some(ca) => Some(TlsOptions {
                ca_cert: PathBuf::from(ca),
                client_cert: get("TLS_CLIENT_CERT").map(PathBuf::from),
                client_key: get("TLS_CLIENT_KEY").map(PathBuf::from),
            }),
            None => None,
        };

        let valid_id_token = IdToken::new(
            get("VALID_ID_TOKEN").unwrap_or_else(|| "100000C01".into()),
            parse_or(&vars, "VALID_ID_TOKEN_TYPE", IdTokenKind::Central)?,
        );
        let invalid_id_token = match get("INVALID_ID_TOKEN") {
            Some(token) => Some(IdToken::new(
                token,
                parse_or(&vars, "INVALID_ID_TOKEN_TYPE", IdTokenKind::Central)?,
            )),
            None => None,
        };

        let identities = vars
            .iter()
            .filter_map(|(k, v)| {
                let suffix = k.strip_prefix(IDENTITY_PREFIX)?;
                (suffix != "PASSWORD" && !v.is_empty()).then(|| (suffix.to_string(), v.clone()))
            })
            .collect();

        Ok(Self {
            csms_address: get("CSMS_ADDRESS").unwrap_or_else(|| "ws://localhost:9000".into()),
            csms_wss_address: get("CSMS_WSS_ADDRESS"),
            basic_auth_cp: get("BASIC_AUTH_CP").unwrap_or_else(|| "CP_1".into()),
            basic_auth_cp_password: get("BASIC_AUTH_CP_PASSWORD").unwrap_or_else(|| "0123456789123456".into()),
            security_profile_3_cp: get("SECURITY_PROFILE_3_CP"),
            tls,
            valid_id_token,
            invalid_id_token,
            evse_id: parse_or(&vars, "CONFIGURED_EVSE_ID", 1)?,
            connector_id: parse_or(&vars, "CONFIGURED_CONNECTOR_ID", 1)?,
            number_phases: parse_or(&vars, "CONFIGURED_NUMBER_PHASES", 3)?,
            action_timeout: seconds_or(&vars, "CSMS_ACTION_TIMEOUT", 30)?,
            transaction_duration: seconds_or(&vars, "TRANSACTION_DURATION", 5)?,
            local_list_version: parse_or(&vars, "LOCAL_LIST_VERSION", 1)?,
            clock_aligned_interval: seconds_or(&vars, "CLOCK_ALIGNED_METER_VALUES_INTERVAL", 1)?,
            call_timeout: seconds_or(&vars, "CALL_TIMEOUT", 30)?,
            identities,
        })
    }

    /// Identity configured for a particular test group, e.g. `cp_identity("E")`
    /// reads `BASIC_AUTH_CP_E`.
    pub fn cp_identity(&self, suffix: &str) -> &str {
        self.identities
            .get(suffix)
            .map(String::as_str)
            .unwrap_or(&self.basic_auth_cp)
    }

    /// Plain or Basic-Auth connection to `CSMS_ADDRESS`.
    pub fn connect_options(&self, identity: &str) -> ConnectOptions {
        ConnectOptions::new(&self.csms_address, identity).basic_auth(identity, &self.basic_auth_cp_password)
    }

    /// Security profile 3 connection, if the TLS material is configured.
    pub fn tls_connect_options(&self) -> Option<ConnectOptions> {
        let address = self.csms_wss_address.as_ref()?;
        let identity = self.security_profile_3_cp.as_ref()?;
        let tls = self.tls.clone()?;
        Some(ConnectOptions::new(address, identity).tls(tls))
    }
}

fn parse_or<T>(vars: &HashMap<String, String>, var: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match vars.get(var).filter(|v| !v.is_empty()) {
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError {
            var: var.to_string(),
            value: value.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn seconds_or(vars: &HashMap<String, String>, var: &str, default: u64) -> Result<Duration, ConfigError> {
    let secs: f64 = parse_or(vars, var, default as f64)?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(ConfigError {
            var: var.to_string(),
            value: secs.to_string(),
            reason: "expected a non-negative number of seconds".into(),
        });
    }
    Ok(Duration::from_secs_f64(secs))
}
