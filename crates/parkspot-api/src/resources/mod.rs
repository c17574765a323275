// Resource endpoints, one module per backend resource.
//
// Each module adds inherent methods to `ParkingClient`.

mod account;
mod car;
mod history;
mod lots;
mod profile;
mod reservation;
