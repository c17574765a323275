use tracing::debug;

use crate::client::ParkingClient;
use crate::error::Error;
use crate::models::Car;

impl ParkingClient {
    /// The car a user currently has parked.
    ///
    /// `GET /mycar/{userId}`
    pub async fn get_car(&self, user_id: u64) -> Result<Car, Error> {
        let url = self.url(&format!("mycar/{user_id}"))?;
        debug!(user_id, "fetching car");
        self.get(url).await
    }
}
