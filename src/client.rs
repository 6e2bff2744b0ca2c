//! Client for the Sotaog public API.
//!
//! A [`Client`] authenticates once, when it is created, and then maps each method to a single
//! HTTP call. Read endpoints return the server's JSON as-is; write endpoints return either the
//! created resource or `()`.
//!
//! # Example
//!
//! ```no_run
//! use sotaog_public_api_client::auth::Credentials;
//! use sotaog_public_api_client::types::request::AssetsRequest;
//! use sotaog_public_api_client::{Client, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = Credentials::new("client-id", "client-secret");
//! let config = Config::builder().customer_id("customer-1").build();
//! let client = Client::new("https://api.sotaog.com", &credentials, config).await?;
//!
//! let facilities = client.get_facilities().await?;
//! let tanks = client
//!     .get_assets(&AssetsRequest::builder().collection("tanks").facility("F1").build())
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use bon::Builder;
use reqwest::header::{ACCEPT, CONNECTION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Body, Client as ReqwestClient, Method, RequestBuilder, StatusCode};
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
#[cfg(feature = "tracing")]
use tracing::info;
use url::Url;

use crate::auth::{self, Credentials};
use crate::error::Error;
use crate::types::NaiveDate;
use crate::types::request::{
    AssetDatapointsRequest, AssetsRequest, DatapointsRequest, DatatypesRequest,
    TruckTicketsRequest, WellsProductionRequest, retain_swd_networks,
};
use crate::types::response::{
    Alarm, AlarmService, Asset, AssetType, Customer, Datapoints, Datatype, Facility,
    FinancialsCategory, SwdNetwork, TruckTicket, TypeCurve, WellConfig, WellProduction,
};
use crate::{Result, ToQueryParams as _};

const DEFAULT_USER_AGENT: &str = "sotaog-public-api-client";

const OK: &[StatusCode] = &[StatusCode::OK];
const CREATED: &[StatusCode] = &[StatusCode::CREATED];
const ACCEPTED: &[StatusCode] = &[StatusCode::ACCEPTED];
const NO_CONTENT: &[StatusCode] = &[StatusCode::NO_CONTENT];
const OK_OR_CREATED: &[StatusCode] = &[StatusCode::OK, StatusCode::CREATED];

/// Configuration for [`Client`]
#[non_exhaustive]
#[derive(Clone, Debug, Default, Builder)]
pub struct Config {
    /// Customer whose data partition every request is scoped to, sent as
    /// [`auth::CUSTOMER_ID_HEADER`]. Unset means the API's default partition for the credentials.
    #[builder(into)]
    customer_id: Option<String>,
    /// Per-request timeout. Unset leaves the HTTP stack's default in place.
    timeout: Option<Duration>,
    /// Overrides the `User-Agent` header.
    #[builder(into)]
    user_agent: Option<String>,
}

/// An authenticated Sotaog API client.
///
/// Cloning is cheap: clones share the connection pool and the bearer token.
#[derive(Clone, Debug)]
pub struct Client {
    /// Base URL without trailing slashes.
    host: String,
    /// The inner [`ReqwestClient`] used to make requests to `host`.
    client: ReqwestClient,
    token: SecretString,
    customer_id: Option<String>,
}

impl Client {
    /// Exchanges `credentials` for a bearer token and returns a client ready for every endpoint.
    ///
    /// Trailing slashes on `host` are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::error::Kind::Validation`] error if `host` is not a URL or the configured
    /// customer id cannot be sent as a header, and a [`crate::error::Kind::Authentication`] error if
    /// the API does not hand out a token.
    pub async fn new(host: &str, credentials: &Credentials, config: Config) -> Result<Client> {
        let host = host.trim_end_matches('/');
        Url::parse(host)?;

        if let Some(customer_id) = &config.customer_id {
            HeaderValue::from_str(customer_id).map_err(|e| {
                Error::validation(format!("customer id {customer_id:?} is not a valid header: {e}"))
            })?;
        }

        #[cfg(feature = "tracing")]
        info!(host, "initializing Sotaog API client");

        let mut headers = HeaderMap::new();

        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

        let mut builder = ReqwestClient::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let token = auth::authenticate(&client, host, credentials).await?;

        Ok(Self {
            host: host.to_owned(),
            client,
            token,
            customer_id: config.customer_id,
        })
    }

    /// Returns the base URL, without trailing slashes.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the customer id requests are scoped to, if any.
    #[must_use]
    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    fn request_builder(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let headers = auth::create_headers(&self.token, self.customer_id.as_deref())?;

        Ok(self
            .client
            .request(method, format!("{}{path}", self.host))
            .headers(headers))
    }

    async fn get<Req: Serialize, Res: DeserializeOwned>(
        &self,
        path: &str,
        query: &Req,
        operation: &str,
    ) -> Result<Res> {
        let path = format!("{path}{}", query.query_params());
        let request = self.request_builder(Method::GET, &path)?.build()?;

        crate::request(&self.client, request, OK, operation).await
    }

    async fn send<Req: Serialize + ?Sized, Res: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &Req,
        accepted: &[StatusCode],
        operation: &str,
    ) -> Result<Res> {
        let request = self.request_builder(method, path)?.json(body).build()?;

        crate::request(&self.client, request, accepted, operation).await
    }

    async fn send_empty<Req: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &Req,
        accepted: &[StatusCode],
        operation: &str,
    ) -> Result<()> {
        let request = self.request_builder(method, path)?.json(body).build()?;

        crate::request_empty(&self.client, request, accepted, operation).await
    }

    /// Lists every facility visible to the caller.
    pub async fn get_facilities(&self) -> Result<Vec<Facility>> {
        self.get("/v1/facilities", &(), "retrieve facilities").await
    }

    pub async fn get_facility(&self, facility_id: &str) -> Result<Facility> {
        self.get(
            &format!("/v1/facilities/{facility_id}"),
            &(),
            &format!("retrieve facility {facility_id}"),
        )
        .await
    }

    /// Lists the assets of one collection (`/v1/{collection}`).
    ///
    /// The `facility` and `asset_type` filters of `request` are applied here, after the whole
    /// collection is fetched: only assets that carry the field with an equal value are kept.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sotaog_public_api_client::Client;
    /// use sotaog_public_api_client::types::request::AssetsRequest;
    ///
    /// # async fn example(client: Client) -> Result<(), Box<dyn std::error::Error>> {
    /// let request = AssetsRequest::builder().facility("F1").build();
    /// for asset in client.get_assets(&request).await? {
    ///     println!("{}", asset["id"]);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_assets(&self, request: &AssetsRequest) -> Result<Vec<Asset>> {
        let collection = &request.collection;
        let mut assets: Vec<Asset> = self
            .get(
                &format!("/v1/{collection}"),
                &(),
                &format!("retrieve assets of type {collection}"),
            )
            .await?;

        request.retain(&mut assets);

        Ok(assets)
    }

    /// Fetches one asset from `collection`, e.g. `assets` or `wells`.
    pub async fn get_asset(&self, collection: &str, asset_id: &str) -> Result<Asset> {
        self.get(
            &format!("/v1/{collection}/{asset_id}"),
            &(),
            &format!("retrieve asset {asset_id} of type {collection}"),
        )
        .await
    }

    pub async fn get_asset_types(&self) -> Result<Vec<AssetType>> {
        self.get("/v1/asset-types", &(), "retrieve asset types").await
    }

    pub async fn get_asset_type(&self, asset_type_id: &str) -> Result<AssetType> {
        self.get(
            &format!("/v1/asset-types/{asset_type_id}"),
            &(),
            &format!("retrieve asset type {asset_type_id}"),
        )
        .await
    }

    pub async fn get_customers(&self) -> Result<Vec<Customer>> {
        self.get("/v1/customers", &(), "retrieve customers").await
    }

    pub async fn get_customer(&self, customer_id: &str) -> Result<Customer> {
        self.get(
            &format!("/v1/customers/{customer_id}"),
            &(),
            &format!("retrieve customer {customer_id}"),
        )
        .await
    }

    /// Lists datatypes, optionally grouped by the API (`group_by`).
    ///
    /// The shape of the result depends on the grouping, so it is returned as a single value.
    pub async fn get_datatypes(&self, request: &DatatypesRequest) -> Result<Datatype> {
        self.get("/v1/datatypes", request, "retrieve datatypes")
            .await
    }

    /// Fetches one datatype together with the assets that report it.
    pub async fn get_datatype(&self, datatype_id: &str) -> Result<Datatype> {
        let request = DatatypesRequest::builder().group_by("asset").build();

        self.get(
            &format!("/v1/datatypes/{datatype_id}"),
            &request,
            &format!("retrieve datatype {datatype_id}"),
        )
        .await
    }

    /// Queries datapoints for several assets at once.
    ///
    /// Despite being a read, this is a `POST /v1/datapoints` carrying the query as its body.
    pub async fn get_datapoints(&self, request: &DatapointsRequest) -> Result<Datapoints> {
        self.send(Method::POST, "/v1/datapoints", request, OK, "get datapoints")
            .await
    }

    pub async fn get_asset_datapoints(
        &self,
        asset_id: &str,
        request: &AssetDatapointsRequest,
    ) -> Result<Datapoints> {
        self.get(
            &format!("/v1/datapoints/{asset_id}"),
            request,
            &format!("get datapoints for asset {asset_id}"),
        )
        .await
    }

    /// Ingests datapoints for `asset_id`. The API queues them and answers `202 Accepted`.
    pub async fn post_datapoints<B: Serialize + ?Sized>(
        &self,
        asset_id: &str,
        datapoints: &B,
    ) -> Result<()> {
        self.send_empty(
            Method::POST,
            &format!("/v1/datapoints/{asset_id}"),
            datapoints,
            ACCEPTED,
            &format!("post datapoints for asset {asset_id}"),
        )
        .await
    }

    /// Lists SWD networks, keeping only those that include `facility` when it is given.
    pub async fn get_swd_networks(&self, facility: Option<&str>) -> Result<Vec<SwdNetwork>> {
        let mut networks: Vec<SwdNetwork> = self
            .get("/v1/swd-networks", &(), "retrieve SWD networks")
            .await?;

        retain_swd_networks(&mut networks, facility);

        Ok(networks)
    }

    pub async fn get_truck_tickets(
        &self,
        request: &TruckTicketsRequest,
    ) -> Result<Vec<TruckTicket>> {
        self.get("/v1/truck-tickets", request, "retrieve truck tickets")
            .await
    }

    /// Creates a truck ticket and returns it as stored by the API.
    pub async fn post_truck_ticket<B: Serialize + ?Sized>(
        &self,
        truck_ticket: &B,
    ) -> Result<TruckTicket> {
        self.send(
            Method::POST,
            "/v1/truck-tickets",
            truck_ticket,
            CREATED,
            "create truck ticket",
        )
        .await
    }

    /// Uploads the scanned image of a truck ticket.
    ///
    /// `content_type` is sent verbatim, e.g. `image/png`. The API answers `204 No Content`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sotaog_public_api_client::Client;
    ///
    /// # async fn example(client: Client) -> Result<(), Box<dyn std::error::Error>> {
    /// let image = std::fs::read("ticket.jpg")?;
    /// client.put_truck_ticket_image("ticket-1", image, "image/jpeg").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn put_truck_ticket_image<I: Into<Body>>(
        &self,
        truck_ticket_id: &str,
        image: I,
        content_type: &str,
    ) -> Result<()> {
        let request = self
            .request_builder(
                Method::PUT,
                &format!("/v1/truck-tickets/{truck_ticket_id}/image"),
            )?
            .header(CONTENT_TYPE, HeaderValue::from_str(content_type)?)
            .body(image)
            .build()?;

        crate::request_empty(
            &self.client,
            request,
            NO_CONTENT,
            &format!("upload image for truck ticket {truck_ticket_id}"),
        )
        .await
    }

    pub async fn get_alarm_services(&self) -> Result<Vec<AlarmService>> {
        self.get("/v1/alarm-services", &(), "retrieve alarm services")
            .await
    }

    pub async fn get_alarm_service(&self, alarm_service_id: &str) -> Result<AlarmService> {
        self.get(
            &format!("/v1/alarm-services/{alarm_service_id}"),
            &(),
            &format!("retrieve alarm service {alarm_service_id}"),
        )
        .await
    }

    pub async fn get_alarms(&self) -> Result<Vec<Alarm>> {
        self.get("/v1/alarms", &(), "retrieve alarms").await
    }

    /// Lists the alarms configured on `asset_id`, or only those on `datatype` when given. An empty
    /// `datatype` counts as not given.
    pub async fn get_asset_alarms(
        &self,
        asset_id: &str,
        datatype: Option<&str>,
    ) -> Result<Vec<Alarm>> {
        let (path, operation) = match datatype.filter(|d| !d.is_empty()) {
            Some(datatype) => (
                format!("/v1/alarms/{asset_id}/{datatype}"),
                format!("retrieve alarms for asset {asset_id} and datatype {datatype}"),
            ),
            None => (
                format!("/v1/alarms/{asset_id}"),
                format!("retrieve alarms for asset {asset_id}"),
            ),
        };

        self.get(&path, &(), &operation).await
    }

    pub async fn put_alarm<B: Serialize + ?Sized>(
        &self,
        asset_id: &str,
        datatype: &str,
        alarm: &B,
    ) -> Result<()> {
        self.send_empty(
            Method::PUT,
            &format!("/v1/alarms/{asset_id}/{datatype}"),
            alarm,
            CREATED,
            &format!("create alarm for asset {asset_id} and datatype {datatype}"),
        )
        .await
    }

    /// Writes a batch of production records, each naming its own well and date.
    pub async fn put_wells_production<B: Serialize>(&self, records: &[B]) -> Result<()> {
        self.send_empty(
            Method::PUT,
            "/v1/wells/production",
            records,
            CREATED,
            "update well production",
        )
        .await
    }

    pub async fn put_well_production<B: Serialize + ?Sized>(
        &self,
        well_id: &str,
        date: NaiveDate,
        production: &B,
    ) -> Result<()> {
        self.send_empty(
            Method::PUT,
            &format!("/v1/wells/production/{well_id}/{date}"),
            production,
            CREATED,
            &format!("update production for well {well_id} on {date}"),
        )
        .await
    }

    pub async fn get_wells_production(
        &self,
        request: &WellsProductionRequest,
    ) -> Result<Vec<WellProduction>> {
        self.get("/v1/wells/production", request, "retrieve well production")
            .await
    }

    pub async fn get_well_config(&self, well_id: &str) -> Result<WellConfig> {
        self.get(
            &format!("/v1/wells/{well_id}/config"),
            &(),
            &format!("retrieve config for well {well_id}"),
        )
        .await
    }

    pub async fn put_well_config<B: Serialize + ?Sized>(
        &self,
        well_id: &str,
        config: &B,
    ) -> Result<()> {
        self.send_empty(
            Method::PUT,
            &format!("/v1/wells/{well_id}/config"),
            config,
            CREATED,
            &format!("update config for well {well_id}"),
        )
        .await
    }

    pub async fn get_well_type_curve(&self, well_id: &str) -> Result<TypeCurve> {
        self.get(
            &format!("/v1/wells/{well_id}/type-curve"),
            &(),
            &format!("retrieve type curve for well {well_id}"),
        )
        .await
    }

    pub async fn put_well_type_curve<B: Serialize + ?Sized>(
        &self,
        well_id: &str,
        type_curve: &B,
    ) -> Result<()> {
        self.send_empty(
            Method::PUT,
            &format!("/v1/wells/{well_id}/type-curve"),
            type_curve,
            CREATED,
            &format!("update type curve for well {well_id}"),
        )
        .await
    }

    pub async fn get_financials_categories(&self) -> Result<Vec<FinancialsCategory>> {
        self.get(
            "/v1/financials-categories",
            &(),
            "retrieve financials categories",
        )
        .await
    }

    /// Creates a financials category and returns it as stored by the API.
    pub async fn post_financials_category<B: Serialize + ?Sized>(
        &self,
        category: &B,
    ) -> Result<FinancialsCategory> {
        self.send(
            Method::POST,
            "/v1/financials-categories",
            category,
            CREATED,
            "create financials category",
        )
        .await
    }

    /// Writes the financials of one entity for one month.
    ///
    /// `financials_type` is the kind of entity (e.g. `wells` or `facilities`), `type_id` its id,
    /// and `month` is formatted `YYYY-MM`. Both `200 OK` (updated) and `201 Created` succeed.
    pub async fn put_financials<B: Serialize + ?Sized>(
        &self,
        financials_type: &str,
        type_id: &str,
        month: &str,
        financials: &B,
    ) -> Result<()> {
        self.send_empty(
            Method::PUT,
            &format!("/v1/financials/{financials_type}/{type_id}/{month}"),
            financials,
            OK_OR_CREATED,
            &format!("update {financials_type} financials for {type_id} in {month}"),
        )
        .await
    }

    /// Writes a facility's sales for one month (`YYYY-MM`). Both `200 OK` and `201 Created`
    /// succeed.
    pub async fn put_facility_sales<B: Serialize + ?Sized>(
        &self,
        facility_id: &str,
        month: &str,
        sales: &B,
    ) -> Result<()> {
        self.send_empty(
            Method::PUT,
            &format!("/v1/facilities/sales/{facility_id}/{month}"),
            sales,
            OK_OR_CREATED,
            &format!("update sales for facility {facility_id} in {month}"),
        )
        .await
    }
}
