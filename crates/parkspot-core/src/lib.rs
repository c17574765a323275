//! Domain logic and reactive services between `parkspot-api` and the
//! CLI / TUI front ends.
//!
//! - **[`summarize`]**: folds a lot snapshot into an [`OccupancySummary`]
//!   (occupied, capacity, round-half-up percentage, `0` for zero capacity).
//!
//! - **[`Progression`]**: the explicit `Idle → Advancing → Holding` state
//!   machine behind the animated percentage. [`ProgressAnimator`] drives one
//!   progression from a tokio task, one step per interval, and restarts it
//!   whenever a new target supersedes the old one.
//!
//! - **[`Gateway`]**: cheaply cloneable facade over
//!   [`ParkingClient`](parkspot_api::ParkingClient) returning domain types and
//!   [`CoreError`].
//!
//! - **[`LotFeed`]**: background poller publishing changed lot snapshots
//!   through a `watch` channel; consumed via [`LotStream`].
//!
//! - **[`View`]**: the client-side page table, resolving paths with a
//!   fallback to the root view.

pub mod animator;
pub mod config;
pub mod error;
pub mod feed;
pub mod gateway;
pub mod model;
pub mod occupancy;
pub mod progress;
pub mod view;

#[cfg(test)]
pub(crate) mod fixtures;

// ── Primary re-exports ──────────────────────────────────────────────
pub use animator::{Frame, ProgressAnimator};
pub use config::{DisplayConfig, GatewayConfig, TlsVerification};
pub use error::CoreError;
pub use feed::{FeedStatus, LotFeed, LotStream};
pub use gateway::Gateway;
pub use model::{
    Car, HistoryEntry, LotOccupancy, Profile, ProfileCreate, ProfileUpdate, Reservation,
    ReservationCreated, UserStatus, reservation_expired,
};
pub use occupancy::{OccupancySummary, summarize};
pub use progress::{Phase, Progression, StartFrom};
pub use view::View;
