//! [`Geo`] lookup of Turkish administrative divisions.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use common::operations::{By, Select};
use derive_more::{Display, Error as StdError, From};
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use tokio::sync::RwLock;
use tracerr::Traced;

/// Geo lookup operation.
pub use common::Handler as Geo;

/// [`Client`] configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Base URL of the upstream API.
    #[default("https://turkiyeapi.dev/api/v1".into())]
    pub base_url: String,

    /// How long looked up [`Place`]s are cached.
    #[default(Duration::from_secs(24 * 60 * 60))]
    pub cache_ttl: Duration,

    /// Timeout of a single upstream request.
    #[default(Duration::from_secs(10))]
    pub timeout: Duration,
}

/// Scope of a [`Place`]s lookup.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Scope {
    /// All the provinces.
    #[display("provinces")]
    Provinces,

    /// Districts of the province with the provided ID.
    #[display("districts of province {_0}")]
    Districts(i64),

    /// Neighborhoods of the district with the provided ID.
    #[display("neighborhoods of district {_0}")]
    Neighborhoods(i64),
}

impl Scope {
    /// Returns the upstream API path of this [`Scope`].
    fn path(self) -> String {
        match self {
            Self::Provinces => "/provinces".into(),
            Self::Districts(province) => format!("/provinces/{province}"),
            Self::Neighborhoods(district) => format!("/districts/{district}"),
        }
    }

    /// Extracts the [`Place`]s of this [`Scope`] out of the upstream
    /// response `body`.
    fn parse(self, body: serde_json::Value) -> Result<Vec<Place>, Error> {
        let mut envelope = serde_json::from_value::<Envelope>(body)?;
        if envelope.status != "OK" {
            return Err(Error::NotOk(envelope.status));
        }
        let places = match self {
            Self::Provinces => envelope.data,
            Self::Districts(_) => envelope.data["districts"].take(),
            Self::Neighborhoods(_) => envelope.data["neighborhoods"].take(),
        };
        Ok(serde_json::from_value(places)?)
    }
}

/// Upstream API response envelope.
#[derive(Debug, Deserialize)]
struct Envelope {
    /// Response status, `OK` on success.
    status: String,

    /// Response payload.
    #[serde(default)]
    data: serde_json::Value,
}

/// Named administrative division.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Place {
    /// Upstream ID of this [`Place`].
    pub id: i64,

    /// Name of this [`Place`].
    pub name: String,
}

/// Result of forwarding a request to the upstream API.
#[derive(Clone, Debug)]
pub enum Forwarded {
    /// Successful JSON response.
    Json(serde_json::Value),

    /// Upstream responded with the provided non-success status code.
    Failed(u16),
}

/// [`Place`]s cached by a [`Client`].
#[derive(Debug)]
struct Cached {
    /// Moment the [`Place`]s were looked up at.
    at: Instant,

    /// Looked up [`Place`]s.
    places: Arc<Vec<Place>>,
}

/// Caching client of the upstream geo API.
#[derive(Clone, Debug)]
pub struct Client {
    /// [`Config`] of this [`Client`].
    config: Arc<Config>,

    /// HTTP client to reach the upstream API with.
    http: reqwest::Client,

    /// [`Cached`] lookups by their [`Scope`].
    cache: Arc<RwLock<HashMap<Scope, Cached>>>,
}

impl Client {
    /// Creates a new [`Client`] with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If failed to build an HTTP client.
    pub fn new(config: Config) -> Result<Self, Traced<Error>> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("catalog/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        Ok(Self {
            config: Arc::new(config),
            http,
            cache: Arc::default(),
        })
    }

    /// Forwards a GET request of the provided `path` and `query` to the
    /// upstream API.
    ///
    /// # Errors
    ///
    /// If the upstream API is unreachable, or its successful response is
    /// not JSON.
    pub async fn forward(
        &self,
        path: &str,
        query: Option<&str>,
    ) -> Result<Forwarded, Traced<Error>> {
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let url = match query {
            Some(q) if !q.is_empty() => format!("{base}/{path}?{q}"),
            _ => format!("{base}/{path}"),
        };

        let resp = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%url, %status, "upstream geo request failed");
            return Ok(Forwarded::Failed(status.as_u16()));
        }
        resp.json()
            .await
            .map(Forwarded::Json)
            .map_err(tracerr::from_and_wrap!(=> Error))
    }

    /// Returns the cached [`Place`]s of the provided [`Scope`], unless
    /// expired.
    async fn cached(&self, scope: Scope) -> Option<Arc<Vec<Place>>> {
        let cache = self.cache.read().await;
        cache
            .get(&scope)
            .filter(|c| c.at.elapsed() < self.config.cache_ttl)
            .map(|c| Arc::clone(&c.places))
    }
}

impl Geo<Select<By<Arc<Vec<Place>>, Scope>>> for Client {
    type Ok = Arc<Vec<Place>>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Arc<Vec<Place>>, Scope>>,
    ) -> Result<Self::Ok, Self::Err> {
        let scope = by.into_inner();
        if let Some(places) = self.cached(scope).await {
            return Ok(places);
        }

        let body = match self
            .forward(&scope.path(), None)
            .await
            .map_err(tracerr::wrap!())?
        {
            Forwarded::Json(body) => body,
            Forwarded::Failed(status) => {
                return Err(tracerr::new!(Error::Status(status)));
            }
        };
        let places = Arc::new(scope.parse(body).map_err(tracerr::wrap!())?);

        let mut cache = self.cache.write().await;
        cache.retain(|_, c| c.at.elapsed() < self.config.cache_ttl);
        drop(cache.insert(
            scope,
            Cached {
                at: Instant::now(),
                places: Arc::clone(&places),
            },
        ));
        Ok(places)
    }
}

/// [`Geo`] lookup error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// HTTP request to the upstream API failed.
    #[display("Upstream geo request failed: {_0}")]
    Http(reqwest::Error),

    /// Upstream API responded with a non-success status code.
    #[display("Upstream geo API responded with `{_0}` status")]
    #[from(ignore)]
    Status(#[error(not(source))] u16),

    /// Upstream API reported a non-`OK` status in its response.
    #[display("Upstream geo API reported `{_0}` status")]
    #[from(ignore)]
    NotOk(#[error(not(source))] String),

    /// Upstream API response has unexpected shape.
    #[display("Failed to decode upstream geo response: {_0}")]
    Decode(serde_json::Error),
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use super::{Error, Place, Scope};

    fn place(id: i64, name: &str) -> Place {
        Place {
            id,
            name: name.into(),
        }
    }

    #[test]
    fn parses_provinces() {
        let body = json!({
            "status": "OK",
            "data": [
                { "id": 35, "name": "İzmir", "population": 4_462_056 },
                { "id": 45, "name": "Manisa" },
            ],
        });

        assert_eq!(
            Scope::Provinces.parse(body).expect("valid body"),
            [place(35, "İzmir"), place(45, "Manisa")],
        );
    }

    #[test]
    fn parses_nested_divisions() {
        let body = json!({
            "status": "OK",
            "data": {
                "id": 35,
                "name": "İzmir",
                "districts": [{ "id": 1203, "name": "Karşıyaka" }],
            },
        });
        assert_eq!(
            Scope::Districts(35).parse(body).expect("valid body"),
            [place(1203, "Karşıyaka")],
        );

        let body = json!({
            "status": "OK",
            "data": { "neighborhoods": [{ "id": 7, "name": "Bostanlı" }] },
        });
        assert_eq!(
            Scope::Neighborhoods(1203).parse(body).expect("valid body"),
            [place(7, "Bostanlı")],
        );
    }

    #[test]
    fn rejects_failed_envelope() {
        let body = json!({ "status": "ERROR", "error": "Not found" });
        assert!(matches!(
            Scope::Districts(99).parse(body),
            Err(Error::NotOk(s)) if s == "ERROR",
        ));

        let body = json!({ "status": "OK", "data": { "id": 99 } });
        assert!(matches!(
            Scope::Districts(99).parse(body),
            Err(Error::Decode(_)),
        ));
    }

    #[test]
    fn builds_upstream_paths() {
        assert_eq!(Scope::Provinces.path(), "/provinces");
        assert_eq!(Scope::Districts(35).path(), "/provinces/35");
        assert_eq!(Scope::Neighborhoods(1203).path(), "/districts/1203");
    }
}
