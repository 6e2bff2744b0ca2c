#![allow(clippy::unwrap_used, reason = "tests can panic on unwrap")]

mod common;

use std::time::Duration;

use httpmock::Method::{GET, POST};
use httpmock::MockServer;
use reqwest::StatusCode;
use serde_json::json;
use sotaog_public_api_client::error::{Authentication, Kind, Status};
use sotaog_public_api_client::{Client, Config};

use crate::common::{
    AUTHORIZATION, BEARER, CUSTOMER_ID, CUSTOMER_ID_HEADER, create_authenticated,
    create_with_config, create_with_customer, credentials,
};

#[tokio::test]
async fn authenticate_should_succeed() -> anyhow::Result<()> {
    let server = MockServer::start();
    let client = create_authenticated(&server).await?;

    assert_eq!(client.host(), server.base_url());
    assert!(client.customer_id().is_none());

    Ok(())
}

#[tokio::test]
async fn authenticate_should_strip_trailing_slashes() -> anyhow::Result<()> {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST).path("/v1/authenticate");
        then.status(StatusCode::OK)
            .json_body(json!({ "access_token": "T" }));
    });

    let host = format!("{}//", server.base_url());
    let client = Client::new(&host, &credentials(), Config::default()).await?;

    assert_eq!(client.host(), server.base_url());
    mock.assert();

    Ok(())
}

#[tokio::test]
async fn authenticate_with_unauthorized_should_fail() -> anyhow::Result<()> {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST).path("/v1/authenticate");
        then.status(StatusCode::UNAUTHORIZED)
            .json_body(json!({ "error": "invalid_client" }));
    });

    let err = Client::new(&server.base_url(), &credentials(), Config::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Kind::Authentication);
    let auth_err = err.downcast_ref::<Authentication>().unwrap();
    assert_eq!(auth_err.status_code, Some(StatusCode::UNAUTHORIZED));
    mock.assert();

    Ok(())
}

#[tokio::test]
async fn authenticate_with_non_ok_success_should_fail() -> anyhow::Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/v1/authenticate");
        then.status(StatusCode::CREATED)
            .json_body(json!({ "access_token": "T" }));
    });

    let err = Client::new(&server.base_url(), &credentials(), Config::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Kind::Authentication);

    Ok(())
}

#[tokio::test]
async fn authenticate_without_token_should_fail() -> anyhow::Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/v1/authenticate");
        then.status(StatusCode::OK)
            .json_body(json!({ "access_token": "" }));
    });

    let err = Client::new(&server.base_url(), &credentials(), Config::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Kind::Authentication);
    let auth_err = err.downcast_ref::<Authentication>().unwrap();
    assert!(auth_err.status_code.is_none());

    Ok(())
}

#[tokio::test]
async fn authenticate_with_invalid_host_should_fail() {
    let err = Client::new("not a url", &credentials(), Config::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Kind::Validation);
}

#[tokio::test]
async fn authenticate_with_invalid_customer_should_fail() {
    let config = Config::builder().customer_id("C1\r\n").build();
    let err = Client::new("http://localhost", &credentials(), config)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Kind::Validation);
}

#[tokio::test]
async fn requests_should_carry_bearer_token() -> anyhow::Result<()> {
    let server = MockServer::start();
    let client = create_authenticated(&server).await?;

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/facilities")
            .header(AUTHORIZATION, BEARER)
            .header_missing(CUSTOMER_ID_HEADER);
        then.status(StatusCode::OK).json_body(json!([]));
    });

    let facilities = client.get_facilities().await?;

    assert!(facilities.is_empty());
    mock.assert();

    Ok(())
}

#[tokio::test]
async fn requests_should_carry_customer_id() -> anyhow::Result<()> {
    let server = MockServer::start();
    let client = create_with_customer(&server).await?;

    assert_eq!(client.customer_id(), Some(CUSTOMER_ID));

    let facilities = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/facilities")
            .header(AUTHORIZATION, BEARER)
            .header(CUSTOMER_ID_HEADER, CUSTOMER_ID);
        then.status(StatusCode::OK).json_body(json!([]));
    });
    let ticket = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/truck-tickets")
            .header(AUTHORIZATION, BEARER)
            .header(CUSTOMER_ID_HEADER, CUSTOMER_ID);
        then.status(StatusCode::CREATED)
            .json_body(json!({ "id": "TT1" }));
    });

    client.get_facilities().await?;
    client.post_truck_ticket(&json!({ "volume": 80 })).await?;

    facilities.assert();
    ticket.assert();

    Ok(())
}

#[tokio::test]
async fn expired_token_should_surface_as_authentication_error() -> anyhow::Result<()> {
    let server = MockServer::start();
    let client = create_authenticated(&server).await?;

    let mock = server.mock(|when, then| {
        when.method(GET).path("/v1/customers");
        then.status(StatusCode::UNAUTHORIZED)
            .json_body(json!({ "message": "token expired" }));
    });

    let err = client.get_customers().await.unwrap_err();

    assert_eq!(err.kind(), Kind::Authentication);
    let status_err = err.downcast_ref::<Status>().unwrap();
    assert_eq!(status_err.status_code, StatusCode::UNAUTHORIZED);
    assert_eq!(status_err.operation, "retrieve customers");
    mock.assert_calls(1);

    Ok(())
}

#[tokio::test]
async fn configured_user_agent_should_be_sent() -> anyhow::Result<()> {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/authenticate")
            .header("user-agent", "sotaog-sync/1.2");
        then.status(StatusCode::OK)
            .json_body(json!({ "access_token": "T" }));
    });

    let config = Config::builder().user_agent("sotaog-sync/1.2").build();
    Client::new(&server.base_url(), &credentials(), config).await?;

    mock.assert();

    Ok(())
}

#[tokio::test]
async fn configured_timeout_should_surface_as_transport_error() -> anyhow::Result<()> {
    let server = MockServer::start();
    let config = Config::builder()
        .timeout(Duration::from_millis(100))
        .build();
    let client = create_with_config(&server, config).await?;

    server.mock(|when, then| {
        when.method(GET).path("/v1/facilities");
        then.status(StatusCode::OK)
            .delay(Duration::from_millis(500))
            .json_body(json!([]));
    });

    let err = client.get_facilities().await.unwrap_err();

    assert_eq!(err.kind(), Kind::Transport);

    Ok(())
}
