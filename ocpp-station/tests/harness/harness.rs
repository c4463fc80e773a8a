use std::{sync::Once, time::Duration};

use log::LevelFilter;
use octt_station::{connect, ConnectOptions, Endpoint, Session, SuiteConfig};

use super::csms::{CsmsConnection, MockCsms, PASSWORD};

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::builder()
            .is_test(true)
            .filter_level(LevelFilter::Trace)
            .try_init()
            .ok();
    });
}

pub fn options(csms: &MockCsms, identity: &str) -> ConnectOptions {
    ConnectOptions::new(csms.url(), identity)
        .basic_auth(identity, PASSWORD)
        .settle(Duration::ZERO)
}

/// A started station together with the CSMS side of its connection.
pub struct StationHarness {
    pub cp: Endpoint,
    pub session: Session,
    pub csms: CsmsConnection,
}

impl StationHarness {
    pub async fn connect(csms: &MockCsms, cp: Endpoint) -> Self {
        init_logger();
        let (ws, handshake) = connect(&options(csms, cp.identity())).await.unwrap();
        assert_eq!(handshake.status, 101);
        let session = cp.start(ws).unwrap();
        let conn = csms.accept().await;
        assert_eq!(conn.identity, cp.identity());
        Self {
            cp,
            session,
            csms: conn,
        }
    }
}

/// Connection for the conformance scripts, against the CSMS named by the
/// environment.
pub async fn connect_to_csms(config: &SuiteConfig, cp: Endpoint) -> anyhow::Result<(Endpoint, Session)> {
    init_logger();
    let options = config.connect_options(cp.identity());
    let (ws, _) = connect(&options).await?;
    let session = cp.start(ws)?;
    Ok((cp, session))
}
