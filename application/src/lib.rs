//! Application provides API for interacting with the [`Service`].

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod api;
pub mod args;
pub mod config;
mod context;
pub mod error;

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, Query, WebSocketUpgrade},
    response::{IntoResponse, Response},
    Extension, Json,
};
use common::Field;
use derive_more::Debug;
use juniper::{http::GraphQLBatchResponse, DefaultScalarValue, ScalarValue};
use juniper_axum::{extract::JuniperRequest, subscriptions};
use juniper_graphql_ws::ConnectionConfig;
use serde::Deserialize;
use serde_json::json;
use service::{
    command,
    domain::listing,
    infra::{geo::Forwarded, storage, Postgres},
    Command as _,
};
// Used in binary.
use axum_client_ip as _;
use refinery as _;
use tower_http as _;
use tracing_subscriber as _;

pub use self::{
    args::Args,
    config::Config,
    context::{Context, Session},
    error::{AsError, Error},
};

/// [`Service`] with filled infrastructure dependencies.
///
/// [`Service`]: service::Service
pub type Service = service::Service<Postgres, Postgres, storage::Filesystem>;

/// [`juniper`] GraphQL response.
#[derive(Debug)]
pub struct JuniperResponse<S = DefaultScalarValue>
where
    S: ScalarValue,
{
    /// Status code of the response.
    pub status_code: http::StatusCode,

    /// Underlying GraphQL response.
    #[debug(skip)]
    pub response: GraphQLBatchResponse<S>,
}

impl<S> IntoResponse for JuniperResponse<S>
where
    S: ScalarValue,
{
    fn into_response(self) -> Response {
        let Self {
            status_code,
            response,
        } = self;

        if response.is_ok() {
            Json(response).into_response()
        } else {
            (status_code, Json(response)).into_response()
        }
    }
}

/// GraphQL API handler.
pub async fn graphql(
    Extension(schema): Extension<Arc<api::Schema>>,
    context: Context,
    JuniperRequest(gql_request): JuniperRequest,
) -> JuniperResponse {
    JuniperResponse {
        status_code: context.error_status_code(),
        response: gql_request.execute(&*schema, &context).await,
    }
}

/// GraphQL subscriptions handler.
#[expect(
    clippy::unused_async,
    reason = "`async` is required to match signature"
)]
pub async fn subscriptions(
    Extension(schema): Extension<Arc<api::Schema>>,
    mut context: Context,
    ws: WebSocketUpgrade,
) -> Response {
    ws.protocols(["graphql-transport-ws", "graphql-ws"])
        .max_frame_size(1024)
        .max_message_size(1024)
        .write_buffer_size(512)
        .max_write_buffer_size(1024)
        .on_upgrade(move |socket| {
            subscriptions::serve_ws(socket, schema, move |vars| async move {
                context.apply_subscription_variables(&vars).map(|()| {
                    ConnectionConfig::new(context)
                        .with_max_in_flight_operations(10)
                })
            })
        })
}

/// Query parameters of a [`upload_photo()`] request.
#[derive(Clone, Debug, Deserialize)]
pub struct UploadParams {
    /// Number of the listing the photo is uploaded for, if it exists
    /// already.
    ///
    /// Blank for a listing being created.
    pub listing: Option<String>,
}

impl UploadParams {
    /// Parses the [`listing::Id`] of these [`UploadParams`].
    ///
    /// # Errors
    ///
    /// Errors if the provided listing number is malformed.
    pub fn listing(&self) -> Result<Option<listing::Id>, Error> {
        self.listing
            .as_deref()
            .map(str::parse::<Field<listing::Id>>)
            .transpose()
            .map(|id| id.and_then(Field::into_option))
            .map_err(|e| {
                Error::bad_request(&format!("invalid `listing` number: {e}"))
            })
    }
}

/// Photo upload handler.
///
/// Accepts the raw image bytes with the image `Content-Type` and the original
/// file name in the `X-File-Name` header. Responds with the public URL of the
/// stored photo.
///
/// # Errors
///
/// Errors if:
/// - the request is not made by the administrator;
/// - the content is not an image;
/// - the content exceeds the configured size limit;
/// - the photo cannot be stored.
#[tracing::instrument(skip_all, fields(otel.name = "photo upload"))]
pub async fn upload_photo(
    context: Context,
    Query(params): Query<UploadParams>,
    headers: http::HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<serde_json::Value>, Error> {
    _ = context.require_admin().await?;
    let listing = params.listing()?;

    let max = context.service().config().max_upload_size;
    let bytes = body.map_err(|e| {
        if e.status() == http::StatusCode::PAYLOAD_TOO_LARGE {
            command::upload_photo::ExecutionError::TooLarge { max }
                .into_error()
        } else {
            Error::bad_request(&e.body_text())
        }
    })?;
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned)
    };

    let url = context
        .service()
        .execute(command::UploadPhoto {
            listing,
            content_type: header(http::header::CONTENT_TYPE.as_str())
                .unwrap_or_default(),
            file_name: header("x-file-name").unwrap_or_default(),
            bytes: bytes.to_vec(),
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(json!({ "url": url.to_string() })))
}

/// Geo lookup proxy handler.
///
/// Forwards `GET` requests to the upstream geo API, preserving the path
/// and the query string.
#[tracing::instrument(skip_all, fields(path = %path, otel.name = "geo proxy"))]
pub async fn geo_proxy(
    Extension(service): Extension<Service>,
    method: http::Method,
    Path(path): Path<String>,
    uri: http::Uri,
) -> Response {
    if method != http::Method::GET {
        return (
            http::StatusCode::METHOD_NOT_ALLOWED,
            Json(json!({ "error": "Method not allowed" })),
        )
            .into_response();
    }

    match service.geo().forward(&path, uri.query()).await {
        Ok(Forwarded::Json(body)) => (
            [
                (http::header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                (http::header::ACCESS_CONTROL_ALLOW_METHODS, "GET"),
                (http::header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
                (http::header::CACHE_CONTROL, "public, max-age=3600"),
            ],
            Json(body),
        )
            .into_response(),
        Ok(Forwarded::Failed(status)) => (
            http::StatusCode::from_u16(status)
                .unwrap_or(http::StatusCode::BAD_GATEWAY),
            Json(json!({
                "error": "upstream request failed",
                "status": status,
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("geo proxy failed: {e}");
            (
                http::StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error",
                    "message": e.as_ref().to_string(),
                })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod spec {
    use super::UploadParams;

    fn params(listing: Option<&str>) -> UploadParams {
        UploadParams {
            listing: listing.map(ToOwned::to_owned),
        }
    }

    #[test]
    fn parses_listing_of_uploads() {
        assert_eq!(params(None).listing().expect("valid"), None);
        assert_eq!(params(Some("")).listing().expect("valid"), None);
        assert_eq!(
            params(Some(" 7 "))
                .listing()
                .expect("valid")
                .map(|id| id.to_string()),
            Some("7".to_owned()),
        );

        let err = params(Some("7x")).listing().expect_err("malformed");
        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
    }
}
