use octt_core::v201::{
    messages::TransactionEventRequest,
    types::{Reason, TransactionEventType, TriggerReason},
};
use octt_station::reusable_states::{self as rs, TransactionContext};

use super::{config, station};
use crate::harness::harness::connect_to_csms;

/// Local stop: the driver presents the token again and the transaction ends.
pub async fn run() -> anyhow::Result<()> {
    let config = config()?;
    let (cp, session) = connect_to_csms(&config, station(&config, "E")).await?;

    let ctx = TransactionContext::new(config.evse_id, config.connector_id);
    rs::authorized(&cp, &config.valid_id_token, &ctx, false).await?;
    rs::energy_transfer_started(&cp, &ctx).await?;

    let ended = TransactionEventRequest::new(
        TransactionEventType::Ended,
        TriggerReason::StopAuthorized,
        cp.next_seq_no(),
        ctx.transaction().stopped_reason(Reason::Local),
    );
    cp.send_transaction_event_request(ended).await?;

    let _ = session.stop().await;
    Ok(())
}
