use tracing::debug;

use crate::client::ParkingClient;
use crate::error::Error;
use crate::models::{Profile, ProfileCreate, ProfileUpdate};

impl ParkingClient {
    /// `GET /profile/{userId}`
    pub async fn get_profile(&self, user_id: u64) -> Result<Profile, Error> {
        let url = self.url(&format!("profile/{user_id}"))?;
        debug!(user_id, "fetching profile");
        self.get(url).await
    }

    /// Replace the preference, role and priority of an existing profile.
    ///
    /// `PUT /profile/{userId}` with `{preference, role, priority}`
    pub async fn update_profile(
        &self,
        user_id: u64,
        update: &ProfileUpdate,
    ) -> Result<Profile, Error> {
        let url = self.url(&format!("profile/{user_id}"))?;
        debug!(user_id, role = %update.role, "updating profile");
        self.put(url, update).await
    }

    /// Create the profile for a user.
    ///
    /// `POST /profile/{userId}` with `{user_id, preference, role, priority}`
    pub async fn create_profile(&self, create: &ProfileCreate) -> Result<Profile, Error> {
        let url = self.url(&format!("profile/{}", create.user_id))?;
        debug!(user_id = create.user_id, "creating profile");
        self.post(url, create).await
    }
}
