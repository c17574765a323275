// parkspot-api: Async Rust client for the parkspot reservation backend

pub mod client;
pub mod error;
pub mod models;
mod resources;
pub mod time;
pub mod transport;

pub use client::ParkingClient;
pub use error::Error;
pub use models::{
    Car, HistoryEntry, Message, NewReservation, ParkingLot, Profile, ProfileCreate, ProfileUpdate,
    Reservation, ReservationCreated, UserStatus,
};
pub use transport::{TlsMode, TransportConfig};
