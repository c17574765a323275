// Account endpoints: login and the user's parking status.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::ParkingClient;
use crate::error::Error;
use crate::models::{LoginRequest, LoginResponse, UserStatus};

impl ParkingClient {
    /// Authenticate and return the backend user id.
    ///
    /// `POST /login` with `{account, password}`. The backend keeps no
    /// session; callers pass the returned id to the user-scoped endpoints.
    pub async fn login(&self, account: &str, password: &SecretString) -> Result<u64, Error> {
        let url = self.url("login")?;
        debug!(account, "logging in");
        let body = LoginRequest {
            account,
            password: password.expose_secret(),
        };
        let resp: LoginResponse = self.post(url, &body).await.map_err(|e| match e {
            Error::NotFound { message, .. } => Error::Authentication {
                message: message.unwrap_or_else(|| "unknown account".into()),
            },
            other => other,
        })?;
        Ok(resp.user_id)
    }

    /// `GET /userstatus/{userId}`
    pub async fn user_status(&self, user_id: u64) -> Result<UserStatus, Error> {
        let url = self.url(&format!("userstatus/{user_id}"))?;
        debug!(user_id, "fetching user status");
        self.get(url).await
    }
}
