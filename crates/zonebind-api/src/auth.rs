// Controller authentication
//
// Two ways in: a static token (`X-Auth-Token`) or an email/password login
// that hands back a token in the body and a session cookie. Either way the
// profile is fetched afterwards to learn the tenant id that scopes every
// other endpoint.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::{debug, info};

use crate::client::CgxClient;
use crate::error::Error;
use crate::models::{LoginResponse, Profile};

/// Public controller used when no URL is configured.
pub const DEFAULT_CONTROLLER: &str = "https://api.elcapitan.cloudgenix.com";

const LOGIN_VERSION: &str = "v2.0";
const PROFILE_VERSION: &str = "v2.1";
const LOGOUT_VERSION: &str = "v2.0";

impl CgxClient {
    /// Use a pre-issued token for all further requests.
    ///
    /// No request is made; call [`fetch_profile`](Self::fetch_profile) to
    /// validate the token and learn the tenant.
    pub fn use_token(&self, token: SecretString) {
        self.set_auth_token(token);
    }

    /// Authenticate with email and password.
    ///
    /// `POST /v2.0/api/login`. If the response carries `x_auth_token` it is
    /// stored as the session token; otherwise the session cookie in the
    /// client's jar carries the session.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.api_url(LOGIN_VERSION, "login")?;
        debug!("logging in at {url}");

        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let resp = self.http().post(url).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status}): {body}"),
            });
        }

        let body = resp.text().await?;
        match serde_json::from_str::<LoginResponse>(&body) {
            Ok(LoginResponse {
                x_auth_token: Some(token),
            }) => self.set_auth_token(SecretString::from(token)),
            _ => debug!("login response carried no token, relying on session cookie"),
        }

        debug!("login successful");
        Ok(())
    }

    /// Fetch the operator profile and remember its tenant id.
    ///
    /// `GET /v2.1/api/profile`. A rejected token or a profile without a
    /// tenant is an authentication failure.
    pub async fn fetch_profile(&self) -> Result<Profile, Error> {
        let url = self.api_url(PROFILE_VERSION, "profile")?;
        let profile: Profile = self.get(url).await?;

        let Some(tenant_id) = profile.tenant_id.clone() else {
            return Err(Error::Authentication {
                message: "profile has no tenant id".into(),
            });
        };

        info!(tenant_id, email = ?profile.email, "authenticated");
        self.set_tenant_id(Some(tenant_id));
        Ok(profile)
    }

    /// End the session.
    ///
    /// `GET /v2.0/api/logout`. The stored token and tenant are dropped
    /// whether or not the controller acknowledged.
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.api_url(LOGOUT_VERSION, "logout")?;
        debug!("logging out at {url}");

        let result = self.get::<serde_json::Value>(url).await;
        self.clear_session();
        match result {
            // Some controller builds answer logout with an empty body.
            Ok(_) | Err(Error::Deserialization { .. }) => {}
            Err(e) => return Err(e),
        }

        debug!("logout complete");
        Ok(())
    }
}
