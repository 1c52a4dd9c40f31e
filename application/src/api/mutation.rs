//! GraphQL [`Mutation`]s definitions.

use juniper::graphql_object;
use service::{command, Command as _};

use crate::{api, define_error, AsError, Context, Error, Session};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Creates a new admin `Session` with the provided credentials.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `WRONG_CREDENTIALS` - provided credentials don't match the
    ///                         administrator ones.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createAdminSession",
            login = %login,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_admin_session(
        login: api::session::Login,
        password: api::session::Password,
        ctx: &Context,
    ) -> Result<api::session::CreateResult, Error> {
        let output = ctx
            .service()
            .execute(command::CreateAdminSession {
                login: login.into(),
                password: secrecy::SecretBox::init_with(move || {
                    password.into()
                }),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.set_current_session(Session {
            login: output.session.login.clone(),
            role: output.session.role,
            token: output.token.clone(),
            expires_at: output.session.expires_at.coerce(),
        })
        .await;

        Ok(output.into())
    }

    /// Creates a new `Listing`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current request is not made by the
    ///                              administrator.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createListing",
            kind = ?input.kind,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_listing(
        input: api::listing::Input,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        _ = ctx.require_admin().await?;

        ctx.service()
            .execute(command::CreateListing {
                draft: input.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the `Listing` with the provided `number`.
    ///
    /// Omitted `patch` fields are left intact, while the explicit `null`
    /// ones are cleared. Stored photos removed from the `Listing` are
    /// deleted.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current request is not made by the
    ///                              administrator;
    /// - `LISTING_NOT_EXISTS` - the `Listing` doesn't exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateListing",
            number = %number,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_listing(
        number: api::listing::Number,
        patch: api::listing::Patch,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        _ = ctx.require_admin().await?;

        ctx.service()
            .execute(command::UpdateListing {
                id: number.0,
                patch: patch.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Hides the `Listing` with the provided `number` from guests, or makes
    /// it visible again.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current request is not made by the
    ///                              administrator;
    /// - `LISTING_NOT_EXISTS` - the `Listing` doesn't exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "setListingHidden",
            hidden = hidden,
            number = %number,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn set_listing_hidden(
        number: api::listing::Number,
        hidden: bool,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        _ = ctx.require_admin().await?;

        ctx.service()
            .execute(command::SetListingHidden {
                id: number.0,
                hidden,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Listing` with the provided `number` along with its
    /// stored photos.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current request is not made by the
    ///                              administrator;
    /// - `LISTING_NOT_EXISTS` - the `Listing` doesn't exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteListing",
            number = %number,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_listing(
        number: api::listing::Number,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        _ = ctx.require_admin().await?;

        ctx.service()
            .execute(command::DeleteListing { id: number.0 })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes a single stored photo by its URL.
    ///
    /// Returns `false` if the URL is not served by the photo storage.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current request is not made by the
    ///                              administrator.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteListingPhoto",
            otel.name = Self::SPAN_NAME,
            url = %url,
        ),
    )]
    pub async fn delete_listing_photo(
        url: api::listing::PhotoUrl,
        ctx: &Context,
    ) -> Result<bool, Error> {
        _ = ctx.require_admin().await?;

        ctx.service()
            .execute(command::DeleteListingPhoto { url: url.0 })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Stores the provided `Preferences` under the provided `key`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "savePreferences",
            key = %key,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn save_preferences(
        key: api::preferences::Key,
        preferences: api::Preferences,
        ctx: &Context,
    ) -> Result<api::Preferences, Error> {
        let preferences = service::domain::Preferences::from(preferences);
        ctx.service()
            .execute(command::SavePreferences {
                key: key.into(),
                preferences: preferences.clone(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        Ok(preferences.into())
    }
}

impl AsError for command::create_admin_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "WRONG_CREDENTIALS"]
                #[status = UNAUTHORIZED]
                #[message = "Provided credentials don't match the \
                             administrator ones"]
                WrongCredentials,
            }
        }

        match self {
            Self::JsonWebTokenEncodeError(_) => None,
            Self::WrongCredentials => Some(Error::WrongCredentials.into()),
        }
    }
}

impl AsError for command::update_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotFound(_) => {
                Some(api::listing::ListingError::NotExists.into())
            }
        }
    }
}

impl AsError for command::delete_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotFound(_) => {
                Some(api::listing::ListingError::NotExists.into())
            }
        }
    }
}

impl AsError for command::upload_photo::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "NOT_IMAGE"]
                #[status = BAD_REQUEST]
                #[message = "Only image files are accepted"]
                NotImage,

                #[code = "FILE_TOO_LARGE"]
                #[status = PAYLOAD_TOO_LARGE]
                #[message = "File exceeds the size limit"]
                TooLarge,
            }
        }

        match self {
            Self::NotImage(_) => Some(Error::NotImage.into()),
            Self::TooLarge { .. } => Some(Error::TooLarge.into()),
            Self::Storage(e) => e.try_as_error(),
        }
    }
}

#[cfg(test)]
mod spec {
    use service::{command, domain::listing};

    use crate::AsError as _;

    #[test]
    fn missing_listings_are_not_found() {
        let err = command::update_listing::ExecutionError::NotFound(
            listing::Id::from(7),
        )
        .as_error();

        assert_eq!(err.code, "LISTING_NOT_EXISTS");
        assert_eq!(err.status_code, http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn rejected_uploads_keep_client_statuses() {
        let not_image =
            command::upload_photo::ExecutionError::NotImage("text/plain".into())
                .as_error();
        assert_eq!(not_image.status_code, http::StatusCode::BAD_REQUEST);

        let too_large =
            command::upload_photo::ExecutionError::TooLarge { max: 1 }.as_error();
        assert_eq!(too_large.status_code, http::StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn wrong_credentials_are_unauthorized() {
        let err =
            command::create_admin_session::ExecutionError::WrongCredentials
                .as_error();

        assert_eq!(err.code, "WRONG_CREDENTIALS");
        assert_eq!(err.status_code, http::StatusCode::UNAUTHORIZED);
    }
}
