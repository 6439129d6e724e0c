// Controller HTTP client
//
// Wraps `reqwest::Client` with versioned URL construction, tenant scoping,
// token injection, and envelope unwrapping. Endpoint groups (sites,
// elements, security zones) are inherent methods in separate files so
// this module stays focused on transport mechanics.

use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::{ErrorResponse, ListResponse};
use crate::transport::TransportConfig;

/// Header carrying the session token on every request.
pub(crate) const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Raw HTTP client for the controller REST API.
///
/// Holds the auth token and the tenant id learned from the profile.
/// Tenant-scoped URLs can only be built after [`fetch_profile`] succeeded.
///
/// [`fetch_profile`]: CgxClient::fetch_profile
pub struct CgxClient {
    http: reqwest::Client,
    base_url: Url,
    auth_token: RwLock<Option<SecretString>>,
    tenant_id: RwLock<Option<String>>,
}

impl CgxClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// A cookie jar is added if the config has none, since password
    /// logins may hand back the session as cookies only.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            auth_token: RwLock::new(None),
            tenant_id: RwLock::new(None),
        }
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Tenant id, once the profile has been fetched.
    pub fn tenant_id(&self) -> Option<String> {
        self.tenant_id.read().expect("tenant lock poisoned").clone()
    }

    pub(crate) fn set_tenant_id(&self, tenant_id: Option<String>) {
        *self.tenant_id.write().expect("tenant lock poisoned") = tenant_id;
    }

    // ── Token management ─────────────────────────────────────────────

    /// Store a token; it is sent as `X-Auth-Token` from now on.
    pub(crate) fn set_auth_token(&self, token: SecretString) {
        debug!("storing auth token");
        *self.auth_token.write().expect("token lock poisoned") = Some(token);
    }

    /// Forget the token and tenant (after logout).
    pub(crate) fn clear_session(&self) {
        *self.auth_token.write().expect("token lock poisoned") = None;
        self.set_tenant_id(None);
    }

    /// Apply the stored token to a request builder.
    fn apply_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let guard = self.auth_token.read().expect("token lock poisoned");
        match guard.as_ref() {
            Some(token) => builder.header(AUTH_TOKEN_HEADER, token.expose_secret()),
            None => builder,
        }
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/{version}/api/{path}`.
    pub(crate) fn api_url(&self, version: &str, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{version}/api/{path}"))?)
    }

    /// Build `{base}/{version}/api/tenants/{tenant}/{path}`.
    pub(crate) fn tenant_url(&self, version: &str, path: &str) -> Result<Url, Error> {
        let tenant = self.tenant_id().ok_or(Error::NotAuthenticated)?;
        self.api_url(version, &format!("tenants/{tenant}/{path}"))
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");
        let resp = self.apply_auth(self.http.get(url)).send().await?;
        Self::parse_response(resp).await
    }

    /// Send a GET request and unwrap the `items` envelope.
    pub(crate) async fn get_items<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, Error> {
        let envelope: ListResponse<T> = self.get(url).await?;
        trace!(count = ?envelope.count, items = envelope.items.len(), "list envelope");
        Ok(envelope.items)
    }

    /// Send a POST request with JSON body and decode the response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("POST {url}");
        let resp = self
            .apply_auth(self.http.post(url).json(body))
            .send()
            .await?;
        Self::parse_response(resp).await
    }

    /// Map the status code, then decode the body as `T`.
    ///
    /// 401 becomes `Authentication`, 403 `Forbidden`; other failures are
    /// parsed from the controller's `{"_error": [{code, message}]}` body.
    async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: error_message(&body).unwrap_or_else(|| "token rejected".into()),
            });
        }

        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::Forbidden {
                message: error_message(&body).unwrap_or_else(|| "HTTP 403".into()),
            });
        }

        if !status.is_success() {
            let parsed = serde_json::from_str::<ErrorResponse>(&body).ok();
            let first = parsed.and_then(|p| p.errors.into_iter().next());
            let code = first.as_ref().and_then(|e| e.code.clone());
            let message = first
                .and_then(|e| e.message)
                .unwrap_or_else(|| preview(&body).to_owned());
            return Err(Error::Api {
                message,
                code,
                status: status.as_u16(),
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }
}

/// First `_error` entry rendered as `code: message`.
fn error_message(body: &str) -> Option<String> {
    let parsed: ErrorResponse = serde_json::from_str(body).ok()?;
    let first = parsed.errors.into_iter().next()?;
    match (first.code, first.message) {
        (Some(code), Some(msg)) => Some(format!("{code}: {msg}")),
        (Some(only), None) | (None, Some(only)) => Some(only),
        (None, None) => None,
    }
}

fn preview(body: &str) -> &str {
    let end = body
        .char_indices()
        .nth(200)
        .map_or(body.len(), |(idx, _)| idx);
    &body[..end]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client() -> CgxClient {
        CgxClient::with_client(
            reqwest::Client::new(),
            Url::parse("https://controller.example/").unwrap(),
        )
    }

    #[test]
    fn api_url_joins_version_and_path() {
        let url = client().api_url("v2.1", "profile").unwrap();
        assert_eq!(url.as_str(), "https://controller.example/v2.1/api/profile");
    }

    #[test]
    fn tenant_url_requires_profile() {
        let c = client();
        assert!(matches!(
            c.tenant_url("v4.7", "sites"),
            Err(Error::NotAuthenticated)
        ));
        c.set_tenant_id(Some("1234".into()));
        let url = c.tenant_url("v4.7", "sites").unwrap();
        assert_eq!(
            url.as_str(),
            "https://controller.example/v4.7/api/tenants/1234/sites"
        );
    }

    #[test]
    fn error_message_prefers_code_and_message() {
        let body = r#"{"_error":[{"code":"INVALID_TOKEN","message":"Token expired"}]}"#;
        assert_eq!(
            error_message(body).as_deref(),
            Some("INVALID_TOKEN: Token expired")
        );
        assert_eq!(error_message("not json"), None);
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let long = "é".repeat(300);
        assert_eq!(preview(&long).chars().count(), 200);
        assert_eq!(preview("short"), "short");
    }
}
