// ── Domain model ──
//
// `LotOccupancy` is the only type with domain meaning beyond its wire
// shape. The remaining backend resources are passed through unchanged.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub use parkspot_api::{
    Car, HistoryEntry, ParkingLot, Profile, ProfileCreate, ProfileUpdate, Reservation,
    ReservationCreated, UserStatus,
};

/// Occupancy of a single parking lot, as of one snapshot.
///
/// Callers guarantee `available <= capacity`; the aggregator does not check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotOccupancy {
    /// Backend `parkinglot_id`, when the lot came from the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    /// Free spots.
    pub available: u32,
    /// Total spots.
    pub capacity: u32,
    /// Lot reserved for accessibility-priority use. Display only.
    #[serde(default)]
    pub priority: bool,
}

impl LotOccupancy {
    pub fn new(name: impl Into<String>, available: u32, capacity: u32) -> Self {
        Self {
            id: None,
            name: name.into(),
            available,
            capacity,
            priority: false,
        }
    }

    pub fn with_priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }

    /// Spots in use. Saturates at zero for inputs breaking `available <= capacity`.
    pub fn occupied(&self) -> u32 {
        self.capacity.saturating_sub(self.available)
    }
}

impl From<ParkingLot> for LotOccupancy {
    fn from(lot: ParkingLot) -> Self {
        Self {
            id: Some(lot.parkinglot_id),
            name: lot.name,
            available: lot.current_capacity,
            capacity: lot.maximum_capacity,
            priority: lot.priority,
        }
    }
}

/// Whether a reservation's hold has lapsed at `now`.
///
/// A reservation without an expiry time never expires.
pub fn reservation_expired(reservation: &Reservation, now: NaiveDateTime) -> bool {
    reservation.expired_time.is_some_and(|expiry| expiry <= now)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 11, 2)
            .and_then(|d| d.and_hms_opt(h, 0, 0))
            .unwrap()
    }

    fn reservation(expiry: Option<NaiveDateTime>) -> Reservation {
        Reservation {
            car_id: 1,
            car_license: None,
            parking_spot_id: Some(1),
            parking_spot_number: 10,
            area_name: "Test Area".into(),
            area_floor: 2,
            parking_lot_name: "Test ParkingLot".into(),
            reservation_time: Some(at(0)),
            expired_time: expiry,
        }
    }

    #[test]
    fn parking_lot_maps_current_capacity_to_available() {
        let lot = LotOccupancy::from(ParkingLot {
            parkinglot_id: 8,
            name: "Parking Lot 8".into(),
            current_capacity: 3,
            maximum_capacity: 100,
            priority: true,
        });
        assert_eq!(lot.id, Some(8));
        assert_eq!(lot.available, 3);
        assert_eq!(lot.capacity, 100);
        assert_eq!(lot.occupied(), 97);
        assert!(lot.priority);
    }

    #[test]
    fn occupied_saturates_on_bad_input() {
        assert_eq!(LotOccupancy::new("odd", 12, 10).occupied(), 0);
    }

    #[test]
    fn expiry_is_inclusive() {
        assert!(reservation_expired(&reservation(Some(at(12))), at(12)));
        assert!(!reservation_expired(&reservation(Some(at(12))), at(11)));
        assert!(!reservation_expired(&reservation(None), at(23)));
    }
}
