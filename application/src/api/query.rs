//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{infra::geo::Scope, query, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Fetches the page of `Listing`s meeting the provided `filter`.
    ///
    /// Hidden `Listing`s and admin-only criteria are honored for the
    /// administrator only.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PAGE` - the provided `page` is not positive;
    /// - `AUTHORIZATION_REQUIRED` - the provided auth token is invalid.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "listings",
            otel.name = Self::SPAN_NAME,
            page = ?page,
            sort = ?sort,
        ),
    )]
    pub async fn listings(
        filter: Option<api::listing::Filter>,
        sort: Option<api::listing::Sort>,
        page: Option<i32>,
        ctx: &Context,
    ) -> Result<api::listing::Page, Error> {
        let page = api::listing::list::page_number(page)
            .ok_or_else(|| PaginationError::InvalidPage.into())
            .map_err(ctx.error())?;
        let role = ctx.role().await?;

        ctx.service()
            .execute(query::listings::List {
                filter: filter.unwrap_or_default().into(),
                sort: sort.unwrap_or_default().into(),
                page,
                role,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Listing` with the provided `number`.
    ///
    /// Hidden `Listing`s are visible to the administrator only.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` doesn't exist or is hidden;
    /// - `AUTHORIZATION_REQUIRED` - the provided auth token is invalid.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "listing",
            number = %number,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn listing(
        number: api::listing::Number,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        let role = ctx.role().await?;
        ctx.service()
            .execute(query::listing::ByNumber::by((number.0, role)))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| api::listing::ListingError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns all the provinces.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `GEO_LOOKUP_FAILED` - the upstream lookup service failed.
    #[tracing::instrument(
        skip_all,
        fields(gql.name = "provinces", otel.name = Self::SPAN_NAME),
    )]
    pub async fn provinces(ctx: &Context) -> Result<Vec<api::Place>, Error> {
        places(Scope::Provinces, ctx).await
    }

    /// Returns the districts of the province with the provided ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `GEO_LOOKUP_FAILED` - the upstream lookup service failed.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "districts",
            otel.name = Self::SPAN_NAME,
            province_id = province_id,
        ),
    )]
    pub async fn districts(
        province_id: i32,
        ctx: &Context,
    ) -> Result<Vec<api::Place>, Error> {
        places(Scope::Districts(province_id.into()), ctx).await
    }

    /// Returns the neighborhoods of the district with the provided ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `GEO_LOOKUP_FAILED` - the upstream lookup service failed.
    #[tracing::instrument(
        skip_all,
        fields(
            district_id = district_id,
            gql.name = "neighborhoods",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn neighborhoods(
        district_id: i32,
        ctx: &Context,
    ) -> Result<Vec<api::Place>, Error> {
        places(Scope::Neighborhoods(district_id.into()), ctx).await
    }

    /// Returns the `Preferences` stored under the provided `key`.
    ///
    /// Defaults are returned if nothing usable is stored.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "preferences",
            key = %key,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn preferences(
        key: api::preferences::Key,
        ctx: &Context,
    ) -> Result<api::Preferences, Error> {
        ctx.service()
            .execute(query::preferences::ByKey(key.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the contact block of the agency.
    #[must_use]
    pub fn contact(ctx: &Context) -> api::Contact {
        ctx.contact().into()
    }

    /// Returns the `Role` of the current request.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the provided auth token is invalid.
    pub async fn role(ctx: &Context) -> Result<api::Role, Error> {
        ctx.role().await.map(Into::into)
    }
}

/// Looks up the [`api::Place`]s within the provided [`Scope`].
async fn places(scope: Scope, ctx: &Context) -> Result<Vec<api::Place>, Error> {
    ctx.service()
        .execute(query::geo::Places(scope))
        .await
        .map_err(AsError::into_error)
        .map_err(ctx.error())
        .map(|places| places.iter().map(Into::into).collect())
}

define_error! {
    enum PaginationError {
        #[code = "INVALID_PAGE"]
        #[status = BAD_REQUEST]
        #[message = "Page number must be positive"]
        InvalidPage,
    }
}
