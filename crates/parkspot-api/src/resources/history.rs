use tracing::debug;

use crate::client::ParkingClient;
use crate::error::Error;
use crate::models::{HistoryEntry, OneOrMany};

impl ParkingClient {
    /// Usage history of a single parking spot, oldest first as returned.
    ///
    /// `GET /history/{spotId}`
    pub async fn spot_history(&self, spot_id: u64) -> Result<Vec<HistoryEntry>, Error> {
        let url = self.url(&format!("history/{spot_id}"))?;
        debug!(spot_id, "fetching spot history");
        let entries: Option<OneOrMany<HistoryEntry>> = self.get(url).await?;
        Ok(entries.map(Vec::from).unwrap_or_default())
    }
}
