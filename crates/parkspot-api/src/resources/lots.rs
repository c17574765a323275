use tracing::debug;

use crate::client::ParkingClient;
use crate::error::Error;
use crate::models::{OneOrMany, ParkingLot};

impl ParkingClient {
    /// List every parking lot with its current free and total spot counts.
    ///
    /// `GET /parkinglots`
    pub async fn list_parking_lots(&self) -> Result<Vec<ParkingLot>, Error> {
        let url = self.url("parkinglots")?;
        debug!("listing parking lots");
        let lots: OneOrMany<ParkingLot> = self.get(url).await?;
        Ok(lots.into())
    }
}
