#![cfg_attr(doc, doc = include_str!("../README.md"))]

pub mod auth;
pub mod client;
pub mod error;
pub mod types;

use reqwest::{Request, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub use crate::client::{Client, Config};
use crate::error::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Trait for converting request types to URL query parameters.
///
/// This trait is automatically implemented for all types that implement [`Serialize`].
/// It uses [`serde_html_form`] to serialize the struct fields into a query string.
/// Arrays are serialized as repeated keys (`key=val1&key=val2`).
pub trait ToQueryParams: Serialize {
    /// Converts the request to a URL query string.
    ///
    /// Returns an empty string if no parameters are set, otherwise returns
    /// a string starting with `?` followed by URL-encoded key-value pairs.
    fn query_params(&self) -> String {
        let params = serde_html_form::to_string(self)
            .inspect_err(|e| {
                #[cfg(feature = "tracing")]
                tracing::error!("Unable to convert to URL-encoded string {e:?}");
                #[cfg(not(feature = "tracing"))]
                let _: &serde_html_form::ser::Error = e;
            })
            .unwrap_or_default();

        if params.is_empty() {
            String::new()
        } else {
            format!("?{params}")
        }
    }
}

impl<T: Serialize> ToQueryParams for T {}

/// Sends `request` and fails unless the response status is one of `accepted`. `operation`
/// describes the call for the error message, e.g. `retrieve facility F1`.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "debug",
        skip(client, request, accepted),
        fields(
            method = %request.method(),
            path = request.url().path(),
            status_code
        )
    )
)]
async fn execute(
    client: &reqwest::Client,
    request: Request,
    accepted: &[StatusCode],
    operation: &str,
) -> Result<Response> {
    let method = request.method().clone();
    let path = request.url().path().to_owned();

    let response = client.execute(request).await?;
    let status_code = response.status();

    #[cfg(feature = "tracing")]
    tracing::Span::current().record("status_code", status_code.as_u16());

    if !accepted.contains(&status_code) {
        let message = response.text().await.unwrap_or_default();

        #[cfg(feature = "tracing")]
        tracing::warn!(
            status = %status_code,
            method = %method,
            path = %path,
            message = %message,
            "API request failed"
        );

        return Err(Error::status(operation, status_code, method, path, message));
    }

    Ok(response)
}

/// Executes `request` and decodes the JSON body of an accepted response.
async fn request<Res: DeserializeOwned>(
    client: &reqwest::Client,
    request: Request,
    accepted: &[StatusCode],
    operation: &str,
) -> Result<Res> {
    let response = execute(client, request, accepted, operation).await?;

    Ok(response.json::<Res>().await?)
}

/// Executes `request` for endpoints that answer without a meaningful body.
async fn request_empty(
    client: &reqwest::Client,
    request: Request,
    accepted: &[StatusCode],
    operation: &str,
) -> Result<()> {
    execute(client, request, accepted, operation).await?;

    Ok(())
}
