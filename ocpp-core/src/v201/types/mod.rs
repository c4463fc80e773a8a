mod certificate;
mod charging_profile;
mod charging_station;
mod common;
mod connector;
mod device_model;
mod display_message;
mod event_data;
mod firmware;
mod id_token;
mod log;
mod meter_value;
mod monitoring;
mod network_profile;
mod operations;
mod reservation;
mod transaction;

pub use certificate::*;
pub use charging_profile::*;
pub use charging_station::*;
pub use common::*;
pub use connector::*;
pub use device_model::*;
pub use display_message::*;
pub use event_data::*;
pub use firmware::*;
pub use id_token::*;
pub use log::*;
pub use meter_value::*;
pub use monitoring::*;
pub use network_profile::*;
pub use operations::*;
pub use reservation::*;
pub use transaction::*;
