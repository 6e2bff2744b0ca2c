//! OAuth2 client-credentials authentication and per-request authorization headers.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, StatusCode};
/// Secret string types that redact values in debug output for security.
pub use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
#[cfg(feature = "tracing")]
use tracing::{debug, warn};

use crate::Result;
use crate::error::Error;

/// Header scoping a request to a single customer's data partition.
pub const CUSTOMER_ID_HEADER: &str = "x-sotaog-customer-id";

pub(crate) const AUTHENTICATE_PATH: &str = "/v1/authenticate";

const GRANT_TYPE: &str = "client_credentials";

/// The client id and secret issued for an API integration. These are exchanged once, when the
/// [`crate::Client`] is created, for a bearer token.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub(crate) client_id: String,
    pub(crate) client_secret: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new<I: Into<String>, S: Into<String>>(client_id: I, client_secret: S) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
        }
    }

    /// Returns the client id.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the client secret.
    #[must_use]
    pub fn client_secret(&self) -> &SecretString {
        &self.client_secret
    }
}

#[derive(Serialize)]
struct GrantRequest<'grant> {
    grant_type: &'grant str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<SecretString>,
}

/// Exchanges `credentials` for a bearer token against `{host}/v1/authenticate`.
///
/// Anything but a 200 carrying a non-empty `access_token` is an authentication failure. There is
/// no retry.
pub(crate) async fn authenticate(
    client: &ReqwestClient,
    host: &str,
    credentials: &Credentials,
) -> Result<SecretString> {
    #[cfg(feature = "tracing")]
    debug!(host, client_id = %credentials.client_id, "authenticating to API");

    let body = serde_html_form::to_string(&GrantRequest {
        grant_type: GRANT_TYPE,
    })?;

    let response = client
        .post(format!("{host}{AUTHENTICATE_PATH}"))
        .basic_auth(
            &credentials.client_id,
            Some(credentials.client_secret.expose_secret()),
        )
        .header(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        )
        .body(body)
        .send()
        .await?;

    let status_code = response.status();
    if status_code != StatusCode::OK {
        #[cfg(feature = "tracing")]
        warn!(status = %status_code, "unable to authenticate to API");
        return Err(Error::authentication(Some(status_code)));
    }

    let token = response
        .json::<TokenResponse>()
        .await
        .ok()
        .and_then(|body| body.access_token)
        .filter(|token| !token.expose_secret().is_empty());

    token.ok_or_else(|| Error::authentication(None))
}

/// Returns the headers every API call carries: the bearer token and, when set, the customer id.
pub(crate) fn create_headers(token: &SecretString, customer_id: Option<&str>) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();

    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))?;
    bearer.set_sensitive(true);
    map.insert(AUTHORIZATION, bearer);

    if let Some(customer_id) = customer_id {
        map.insert(CUSTOMER_ID_HEADER, customer_id.parse()?);
    }

    Ok(map)
}
