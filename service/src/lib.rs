//! Service contains the business logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
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

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;

use std::time::Duration;

use common::pagination;
use derive_more::Debug;

use crate::domain::user::{Login, PasswordHash};
#[cfg(doc)]
use crate::{
    domain::user::Session,
    infra::{Database, KeyValue, Storage},
};

pub use self::{command::Command, query::Query};

/// [`Service`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// [JWT] encoding key.
    ///
    /// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
    #[debug(skip)]
    pub jwt_encoding_key: jsonwebtoken::EncodingKey,

    /// [JWT] decoding key.
    ///
    /// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
    #[debug(skip)]
    pub jwt_decoding_key: jsonwebtoken::DecodingKey,

    /// Time-to-live of an admin [`Session`].
    pub session_ttl: Duration,

    /// [`Login`] of the administrator.
    pub admin_login: Login,

    /// [`PasswordHash`] of the administrator password.
    #[debug(skip)]
    pub admin_password_hash: PasswordHash,

    /// Number of listings on a page.
    pub page_size: pagination::Size,

    /// Maximum size of an uploaded photo, in bytes.
    pub max_upload_size: usize,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db, Kv, St> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,

    /// [`KeyValue`] store of this [`Service`].
    kv: Kv,

    /// Photo [`Storage`] of this [`Service`].
    storage: St,

    /// [`infra::geo::Client`] of this [`Service`].
    geo: infra::geo::Client,
}

impl<Db, Kv, St> Service<Db, Kv, St> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(
        config: Config,
        database: Db,
        kv: Kv,
        storage: St,
        geo: infra::geo::Client,
    ) -> Self {
        Self {
            config,
            database,
            kv,
            storage,
            geo,
        }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Returns [`KeyValue`] store of this [`Service`].
    #[must_use]
    pub fn kv(&self) -> &Kv {
        &self.kv
    }

    /// Returns photo [`Storage`] of this [`Service`].
    #[must_use]
    pub fn storage(&self) -> &St {
        &self.storage
    }

    /// Returns [`infra::geo::Client`] of this [`Service`].
    #[must_use]
    pub fn geo(&self) -> &infra::geo::Client {
        &self.geo
    }
}

#[cfg(test)]
pub(crate) mod test {
    //! Test [`Service`] setup.

    use std::time::Duration;

    use common::pagination;
    use secrecy::SecretBox;

    use crate::{
        command::{create_admin_session, CreateAdminSession},
        domain::user::{Login, Password, PasswordHash},
        infra::{database, geo, storage},
        Command as _, Config, Service,
    };

    /// [`Service`] over in-memory infrastructure.
    pub(crate) type TestService =
        Service<database::Memory, database::Memory, storage::Memory>;

    /// Administrator credentials of a [`TestService`].
    pub(crate) const ADMIN: (&str, &str) = ("admin", "correct horse");

    /// Creates a new [`TestService`].
    pub(crate) fn service() -> TestService {
        let secret = b"test-secret";
        let db = database::Memory::default();
        Service::new(
            Config {
                jwt_encoding_key: jsonwebtoken::EncodingKey::from_secret(
                    secret,
                ),
                jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(
                    secret,
                ),
                session_ttl: Duration::from_secs(12 * 60 * 60),
                admin_login: Login::new(ADMIN.0).expect("valid login"),
                admin_password_hash: PasswordHash::new(&Password::from(
                    ADMIN.1,
                )),
                page_size: pagination::Size::DEFAULT,
                max_upload_size: 10 * 1024 * 1024,
            },
            db.clone(),
            db,
            storage::Memory::default(),
            geo::Client::new(geo::Config::default())
                .expect("valid HTTP client"),
        )
    }

    /// Signs the administrator in the provided [`TestService`].
    pub(crate) async fn sign_in(
        svc: &TestService,
    ) -> create_admin_session::Output {
        svc.execute(CreateAdminSession {
            login: Login::new(ADMIN.0).expect("valid login"),
            password: SecretBox::new(Box::new(Password::from(ADMIN.1))),
        })
        .await
        .expect("signed in")
    }
}
