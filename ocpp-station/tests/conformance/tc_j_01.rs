use chrono::Utc;
use octt_core::v201::types::{
    Component, EventData, EventNotification, EventTrigger, ReadingContext, SampledValue, Variable,
};

use super::{boot, config, station};
use crate::harness::harness::connect_to_csms;

const METER_VALUE_COUNT: u32 = 3;

/// Clock-aligned meter values with no transaction ongoing, for the station
/// (evseId 0) and the configured EVSE.
pub async fn run() -> anyhow::Result<()> {
    let config = config()?;
    let (cp, session) = connect_to_csms(&config, station(&config, "J")).await?;
    boot(&cp, &config).await?;

    let evse_ids = if config.evse_id == 0 { vec![0] } else { vec![0, config.evse_id] };
    let mut event_id = 0;
    for evse_id in evse_ids {
        let base = Utc::now();
        for i in 0..METER_VALUE_COUNT {
            let tick = base + config.clock_aligned_interval * i;
            let reading = f64::from(i * 100);
            cp.send_meter_values(
                evse_id,
                Some(vec![SampledValue::new(reading, Some(ReadingContext::SampleClock))]),
                Some(tick),
            )
            .await?;

            event_id += 1;
            cp.send_notify_event(vec![EventData {
                event_id,
                timestamp: tick,
                trigger: EventTrigger::Periodic,
                cause: None,
                actual_value: reading.to_string(),
                tech_code: None,
                tech_info: None,
                cleared: None,
                transaction_id: None,
                component: Component::new("FiscalMetering"),
                variable_monitoring_id: None,
                event_notification_type: EventNotification::CustomMonitor,
                variable: Variable::new("MeterValue"),
            }])
            .await?;

            if i + 1 < METER_VALUE_COUNT {
                tokio::time::sleep(config.clock_aligned_interval).await;
            }
        }
    }

    let _ = session.stop().await;
    Ok(())
}
