#[derive(serde::Serialize, serde::Deserialize, PartialEq, Clone, Debug)]
pub enum ReserveNowStatus {
    Accepted,
    Faulted,
    Occupied,
    Rejected,
    Unavailable,
}

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Clone, Debug)]
pub enum CancelReservationStatus {
    Accepted,
    Rejected,
}

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Clone, Debug)]
pub enum ReservationUpdateStatus {
    Expired,
    Removed,
}
