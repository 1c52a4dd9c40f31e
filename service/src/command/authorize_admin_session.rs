//! [`Command`] for authorizing an admin [`Session`].

use derive_more::{Display, Error, From};
use jsonwebtoken::Validation;
use tracerr::Traced;

use crate::{
    domain::user::{session, Session},
    Service,
};

use super::Command;

/// [`Command`] for authorizing an admin [`Session`] by its token.
#[derive(Clone, Debug, From)]
pub struct AuthorizeAdminSession {
    /// [`Session`] token to authorize.
    pub token: session::Token,
}

impl<Db, Kv, St> Command<AuthorizeAdminSession> for Service<Db, Kv, St> {
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AuthorizeAdminSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AuthorizeAdminSession { token } = cmd;

        let session = jsonwebtoken::decode::<Session>(
            token.as_ref(),
            &self.config().jwt_decoding_key,
            &Validation::default(),
        )
        .map_err(tracerr::from_and_wrap!(=> E))?
        .claims;

        // Only the configured administrator may hold a session, so a token of
        // a renamed one is stale.
        if session.login != self.config().admin_login {
            return Err(tracerr::new!(E::UnknownLogin));
        }

        Ok(session)
    }
}

/// Error of [`AuthorizeAdminSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`jsonwebtoken`] decoding error.
    #[display("Failed to decode a JSON Web Token: {_0}")]
    JsonWebTokenDecodeError(jsonwebtoken::errors::Error),

    /// [`Session`] belongs to a login other than the configured one.
    #[display("`Session` belongs to an unknown login")]
    UnknownLogin,
}
