// ── Occupancy aggregation ──
//
// Pure fold of a lot snapshot into totals and a display percentage.

use serde::{Deserialize, Serialize};

use crate::model::LotOccupancy;

/// Totals across one lot snapshot. Derived, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OccupancySummary {
    /// Spots in use: Σcapacity − Σavailable.
    pub occupied: u64,
    /// Σcapacity.
    pub capacity: u64,
    /// `occupied / capacity`, rounded half-up to a whole percent, in `0..=100`.
    pub percentage: u8,
}

impl OccupancySummary {
    /// Spots still free across all lots.
    pub fn available(&self) -> u64 {
        self.capacity - self.occupied
    }
}

/// Fold a lot snapshot into an [`OccupancySummary`].
///
/// Zero total capacity (including an empty snapshot) yields a percentage of
/// `0`. Lots breaking `available <= capacity` are not rejected: occupancy
/// saturates at zero and the percentage never exceeds `100`.
pub fn summarize<'a, I>(lots: I) -> OccupancySummary
where
    I: IntoIterator<Item = &'a LotOccupancy>,
{
    let (capacity, available) = lots.into_iter().fold((0u64, 0u64), |(cap, avail), lot| {
        (cap + u64::from(lot.capacity), avail + u64::from(lot.available))
    });
    let occupied = capacity.saturating_sub(available);

    OccupancySummary {
        occupied,
        capacity,
        percentage: percent_half_up(occupied, capacity),
    }
}

/// `round(part / whole * 100)` with halves rounded up, `0` when `whole == 0`.
fn percent_half_up(part: u64, whole: u64) -> u8 {
    if whole == 0 {
        return 0;
    }
    let pct = (u128::from(part) * 200 + u128::from(whole)) / (u128::from(whole) * 2);
    u8::try_from(pct.min(100)).unwrap_or(100)
}
