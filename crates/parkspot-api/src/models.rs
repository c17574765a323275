// Wire types for the reservation backend.
//
// Field names match the backend JSON exactly. Optional fields are the ones
// the backend has been observed to omit or null out.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The car currently parked by a user. `GET /mycar/{userId}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub car_id: u64,
    pub parking_spot_number: u32,
    pub area_name: String,
    pub area_floor: i32,
    pub parking_lot_name: String,
    #[serde(default, with = "crate::time::optional")]
    pub start_time: Option<NaiveDateTime>,
}

/// One parking lot. `GET /parkinglots`
///
/// `current_capacity` is the number of free spots, `maximum_capacity`
/// the total spot count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingLot {
    pub parkinglot_id: u64,
    pub name: String,
    pub current_capacity: u32,
    pub maximum_capacity: u32,
    #[serde(default)]
    pub priority: bool,
}

/// A user's parking profile. `GET|PUT|POST /profile/{userId}`
///
/// The preference lot/area fields are only present on `GET`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference_lot_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference_lot_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference_area_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference_area_name: Option<String>,
    #[serde(default)]
    pub preference: Option<i64>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default, with = "crate::time::optional")]
    pub expired: Option<NaiveDateTime>,
}

/// Body of `PUT /profile/{userId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub preference: i64,
    pub role: String,
    pub priority: String,
}

/// Body of `POST /profile/{userId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileCreate {
    pub user_id: u64,
    pub preference: i64,
    pub role: String,
    pub priority: String,
}

/// A car's active reservation. `GET /reservation/{carId}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub car_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking_spot_id: Option<u64>,
    pub parking_spot_number: u32,
    pub area_name: String,
    pub area_floor: i32,
    pub parking_lot_name: String,
    #[serde(default, with = "crate::time::optional")]
    pub reservation_time: Option<NaiveDateTime>,
    #[serde(default, with = "crate::time::optional")]
    pub expired_time: Option<NaiveDateTime>,
}

/// Body of `POST /reservation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReservation {
    pub car_id: u64,
    pub parking_spot_id: u64,
}

/// Response of `POST /reservation`.
///
/// Older backends answer with only `reservation_id`; newer ones echo the
/// full reservation detail instead. Every field is therefore optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationCreated {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking_spot_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking_lot_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_floor: Option<i32>,
    #[serde(
        default,
        with = "crate::time::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub reservation_time: Option<NaiveDateTime>,
    #[serde(
        default,
        with = "crate::time::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub expired_time: Option<NaiveDateTime>,
}

/// Plain acknowledgement. `DELETE /reservation/{carId}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub message: String,
}

/// One usage record for a spot. `GET /history/{spotId}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub user_id: u64,
    pub license: String,
    #[serde(default, with = "crate::time::optional")]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default, with = "crate::time::optional")]
    pub end_time: Option<NaiveDateTime>,
}

/// `GET /userstatus/{userId}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatus {
    pub status: String,
}

/// Body of `POST /login`. The password is only exposed while serializing.
#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub account: &'a str,
    pub password: &'a str,
}

/// Response of `POST /login`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub(crate) struct LoginResponse {
    pub user_id: u64,
}

/// Collection endpoints answer with either a bare object or an array.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}
