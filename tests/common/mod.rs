#![allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    reason = "Do not need additional syntax for setting up tests, and https://github.com/rust-lang/rust-clippy/issues/13981"
)]
#![allow(
    unused,
    reason = "Deeply nested uses in sub-modules are falsely flagged as being unused"
)]

use httpmock::MockServer;
use reqwest::StatusCode;
use serde_json::json;
use sotaog_public_api_client::auth::Credentials;
use sotaog_public_api_client::{Client, Config};

pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";
/// `Basic base64("client-id:client-secret")`
pub const BASIC_AUTHORIZATION: &str = "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=";

pub const TOKEN: &str = "T";
pub const BEARER: &str = "Bearer T";
pub const CUSTOMER_ID: &str = "C1";

pub const AUTHORIZATION: &str = "authorization";
pub const CUSTOMER_ID_HEADER: &str = "x-sotaog-customer-id";

#[must_use]
pub fn credentials() -> Credentials {
    Credentials::new(CLIENT_ID, CLIENT_SECRET)
}

/// Mocks a successful credential exchange and returns a client without a customer id.
pub async fn create_authenticated(server: &MockServer) -> anyhow::Result<Client> {
    create_with_config(server, Config::default()).await
}

/// Mocks a successful credential exchange and returns a client scoped to [`CUSTOMER_ID`].
pub async fn create_with_customer(server: &MockServer) -> anyhow::Result<Client> {
    create_with_config(server, Config::builder().customer_id(CUSTOMER_ID).build()).await
}

/// Mocks a successful credential exchange and returns a client built from `config`.
pub async fn create_with_config(server: &MockServer, config: Config) -> anyhow::Result<Client> {
    let mock = server.mock(|when, then| {
        when.method(httpmock::Method::POST)
            .path("/v1/authenticate")
            .header(AUTHORIZATION, BASIC_AUTHORIZATION)
            .body("grant_type=client_credentials");
        then.status(StatusCode::OK)
            .json_body(json!({ "access_token": TOKEN }));
    });

    let client = Client::new(&server.base_url(), &credentials(), config).await?;

    mock.assert();

    Ok(client)
}
