use tracing::debug;

use crate::client::ParkingClient;
use crate::error::Error;
use crate::models::{Message, NewReservation, Reservation, ReservationCreated};

impl ParkingClient {
    /// The active reservation held by a car.
    ///
    /// `GET /reservation/{carId}`
    pub async fn get_reservation(&self, car_id: u64) -> Result<Reservation, Error> {
        let url = self.url(&format!("reservation/{car_id}"))?;
        debug!(car_id, "fetching reservation");
        self.get(url).await
    }

    /// Reserve a spot for a car. A spot that is already reserved or
    /// occupied yields [`Error::Conflict`].
    ///
    /// `POST /reservation` with `{car_id, parking_spot_id}`
    pub async fn create_reservation(
        &self,
        request: NewReservation,
    ) -> Result<ReservationCreated, Error> {
        let url = self.url("reservation")?;
        debug!(
            car_id = request.car_id,
            spot_id = request.parking_spot_id,
            "creating reservation"
        );
        let created: Option<ReservationCreated> = self.post(url, &request).await?;
        Ok(created.unwrap_or_default())
    }

    /// Cancel the reservation held by a car.
    ///
    /// `DELETE /reservation/{carId}`
    pub async fn cancel_reservation(&self, car_id: u64) -> Result<Message, Error> {
        let url = self.url(&format!("reservation/{car_id}"))?;
        debug!(car_id, "cancelling reservation");
        let message: Option<Message> = self.delete(url).await?;
        Ok(message.unwrap_or_default())
    }
}
