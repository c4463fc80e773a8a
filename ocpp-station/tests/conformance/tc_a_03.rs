use anyhow::ensure;
use octt_station::{connect, ConnectOptions};
use uuid::Uuid;

use super::config;

/// Upgrade requests without credentials or with a wrong password get HTTP 401.
pub async fn run() -> anyhow::Result<()> {
    let config = config()?;
    let identity = config.cp_identity("A");

    let missing = ConnectOptions::new(&config.csms_address, identity);
    let wrong = ConnectOptions::new(&config.csms_address, identity)
        .basic_auth(identity, Uuid::new_v4().simple().to_string());

    for options in [missing, wrong] {
        let status = match connect(&options).await {
            Ok(_) => None,
            Err(e) => e.status(),
        };
        ensure!(status == Some(401), "expected upgrade rejected with 401, got {status:?}");
    }
    Ok(())
}
