//! Admin [`Session`]-related definitions.
//!
//! [`Session`]: crate::Session

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{GraphQLEnum, GraphQLObject, GraphQLScalar};
use service::{command, domain::user};

use crate::{api::scalar, Context};

/// Login of the administrator.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "AdminLogin", with = scalar::Via::<user::Login>)]
pub struct Login(user::Login);

/// Password of the administrator.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "AdminPassword", with = scalar::Via::<user::Password>)]
pub struct Password(user::Password);

/// Access token of an admin `Session`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "AuthToken", with = scalar::Via::<user::session::Token>)]
pub struct Token(user::session::Token);

/// Role of a catalog reader.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
pub enum Role {
    /// Anonymous visitor.
    Guest,

    /// Authenticated administrator.
    Admin,
}

impl From<user::Role> for Role {
    fn from(role: user::Role) -> Self {
        match role {
            user::Role::Guest => Self::Guest,
            user::Role::Admin => Self::Admin,
        }
    }
}

/// Result of an admin `Session` creation.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context, name = "CreateSessionResult")]
pub struct CreateResult {
    /// Access token of the created `Session`.
    pub token: Token,

    /// `DateTime` when the created `Session` expires.
    pub expires_at: DateTime,
}

impl From<command::create_admin_session::Output> for CreateResult {
    fn from(output: command::create_admin_session::Output) -> Self {
        let command::create_admin_session::Output { token, session } = output;
        Self {
            token: token.into(),
            expires_at: session.expires_at.coerce(),
        }
    }
}
