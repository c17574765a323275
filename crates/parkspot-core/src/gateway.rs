// ── Gateway abstraction ──
//
// Domain-level entry point over the reservation backend. Wraps the raw
// `ParkingClient`, converts wire types to domain types where they
// differ, and funnels every failure through `CoreError`.

use std::sync::Arc;

use chrono::NaiveDateTime;
use secrecy::SecretString;
use tracing::{debug, info};

use parkspot_api::transport::{TlsMode, TransportConfig};
use parkspot_api::{NewReservation, ParkingClient};

use crate::config::{GatewayConfig, TlsVerification};
use crate::error::CoreError;
use crate::model::{
    Car, HistoryEntry, LotOccupancy, Profile, ProfileCreate, ProfileUpdate, Reservation,
    ReservationCreated, UserStatus, reservation_expired,
};
use crate::occupancy::{OccupancySummary, summarize};

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<GatewayInner>`. Holds no cached state:
/// every call is one backend round trip.
#[derive(Clone)]
pub struct Gateway {
    inner: Arc<GatewayInner>,
}

struct GatewayInner {
    config: GatewayConfig,
    client: ParkingClient,
}

impl Gateway {
    /// Build a gateway from configuration. Does not contact the backend.
    pub fn new(config: GatewayConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: tls_to_transport(&config.tls),
            timeout: config.timeout,
        };
        let client = ParkingClient::new(config.base_url.clone(), &transport)?;
        debug!(base_url = %config.base_url, "gateway ready");

        Ok(Self {
            inner: Arc::new(GatewayInner { config, client }),
        })
    }

    /// Access the gateway configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.inner.config
    }

    // ── Occupancy ────────────────────────────────────────────────

    /// Current occupancy of every lot.
    pub async fn lots(&self) -> Result<Vec<LotOccupancy>, CoreError> {
        let lots = self.inner.client.list_parking_lots().await?;
        Ok(lots.into_iter().map(LotOccupancy::from).collect())
    }

    /// Fetch the lots and fold them into a summary in one call.
    pub async fn occupancy(&self) -> Result<(Vec<LotOccupancy>, OccupancySummary), CoreError> {
        let lots = self.lots().await?;
        let summary = summarize(&lots);
        Ok((lots, summary))
    }

    // ── Car & profile ────────────────────────────────────────────

    pub async fn car(&self, user_id: u64) -> Result<Car, CoreError> {
        Ok(self.inner.client.get_car(user_id).await?)
    }

    pub async fn profile(&self, user_id: u64) -> Result<Profile, CoreError> {
        Ok(self.inner.client.get_profile(user_id).await?)
    }

    pub async fn update_profile(
        &self,
        user_id: u64,
        update: &ProfileUpdate,
    ) -> Result<Profile, CoreError> {
        Ok(self.inner.client.update_profile(user_id, update).await?)
    }

    pub async fn create_profile(&self, create: &ProfileCreate) -> Result<Profile, CoreError> {
        Ok(self.inner.client.create_profile(create).await?)
    }

    // ── Reservations ─────────────────────────────────────────────

    pub async fn reservation(&self, car_id: u64) -> Result<Reservation, CoreError> {
        Ok(self.inner.client.get_reservation(car_id).await?)
    }

    /// The car's reservation and whether its hold has lapsed at `now`.
    pub async fn reservation_state(
        &self,
        car_id: u64,
        now: NaiveDateTime,
    ) -> Result<(Reservation, bool), CoreError> {
        let reservation = self.reservation(car_id).await?;
        let expired = reservation_expired(&reservation, now);
        Ok((reservation, expired))
    }

    /// Reserve a spot. A taken spot surfaces as [`CoreError::SpotUnavailable`].
    pub async fn reserve(
        &self,
        car_id: u64,
        parking_spot_id: u64,
    ) -> Result<ReservationCreated, CoreError> {
        let created = self
            .inner
            .client
            .create_reservation(NewReservation {
                car_id,
                parking_spot_id,
            })
            .await?;
        info!(car_id, parking_spot_id, "spot reserved");
        Ok(created)
    }

    /// Cancel the car's reservation, returning the backend's message.
    pub async fn cancel_reservation(&self, car_id: u64) -> Result<String, CoreError> {
        let ack = self.inner.client.cancel_reservation(car_id).await?;
        info!(car_id, "reservation cancelled");
        Ok(ack.message)
    }

    // ── Spots & users ────────────────────────────────────────────

    pub async fn history(&self, spot_id: u64) -> Result<Vec<HistoryEntry>, CoreError> {
        Ok(self.inner.client.spot_history(spot_id).await?)
    }

    pub async fn user_status(&self, user_id: u64) -> Result<UserStatus, CoreError> {
        Ok(self.inner.client.user_status(user_id).await?)
    }

    /// Log in and return the backend user id.
    pub async fn login(&self, account: &str, password: &SecretString) -> Result<u64, CoreError> {
        let user_id = self.inner.client.login(account, password).await?;
        info!(account, user_id, "logged in");
        Ok(user_id)
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
