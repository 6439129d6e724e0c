// Session establishment
//
// A token is tried once: if the profile cannot be fetched with it, the run
// is over. Interactive login keeps prompting until the controller accepts
// a pair of credentials; any non-authentication failure ends the loop.

use secrecy::SecretString;
use tracing::{info, warn};
use zonebind_api::{CgxClient, Profile};

use crate::config::AuthCredentials;
use crate::error::CoreError;

/// Source of email/password pairs for interactive login.
pub trait CredentialPrompt: Send {
    /// Ask for a fresh email and password.
    fn credentials(&mut self) -> Result<(String, SecretString), CoreError>;

    /// Called after a rejected login, before the next prompt.
    fn login_failed(&mut self, _error: &CoreError) {}
}

/// Authenticate `client` and return the operator profile.
pub async fn connect(
    client: &CgxClient,
    auth: &AuthCredentials,
    prompt: &mut dyn CredentialPrompt,
) -> Result<Profile, CoreError> {
    match auth {
        AuthCredentials::Token { token, source } => {
            info!("authenticating using {source}");
            client.use_token(token.clone());
            client.fetch_profile().await.map_err(|e| match CoreError::from(e) {
                CoreError::AuthenticationFailed { message } => CoreError::AuthenticationFailed {
                    message: format!("auth token login failure, please check token ({message})"),
                },
                other => other,
            })
        }
        AuthCredentials::Interactive => {
            info!("authenticating using interactive login");
            loop {
                let (email, password) = prompt.credentials()?;
                match login_once(client, &email, &password).await {
                    Ok(profile) => return Ok(profile),
                    Err(err) if err.is_auth_failure() => {
                        warn!(%err, "login rejected");
                        prompt.login_failed(&err);
                    }
                    Err(err) => return Err(err),
                }
            }
        }
    }
}

async fn login_once(
    client: &CgxClient,
    email: &str,
    password: &SecretString,
) -> Result<Profile, CoreError> {
    client.login(email, password).await?;
    Ok(client.fetch_profile().await?)
}
