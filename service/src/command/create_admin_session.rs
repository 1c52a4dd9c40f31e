//! [`Command`] for creating an admin [`Session`].

use common::DateTime;
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret, SecretBox};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::session::Token;
use crate::{
    domain::user::{self, session, Role, Session},
    Service,
};

use super::Command;

/// [`Command`] for creating an admin [`Session`] by the administrator
/// credentials.
#[derive(Debug)]
pub struct CreateAdminSession {
    /// [`user::Login`] of the administrator.
    pub login: user::Login,

    /// [`user::Password`] of the administrator.
    pub password: SecretBox<user::Password>,
}

/// Output of [`CreateAdminSession`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// [`Token`] of the created [`Session`].
    pub token: session::Token,

    /// Created [`Session`].
    pub session: Session,
}

impl<Db, Kv, St> Command<CreateAdminSession> for Service<Db, Kv, St> {
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateAdminSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateAdminSession { login, password } = cmd;

        let hash = user::PasswordHash::new(password.expose_secret());
        if login != self.config().admin_login
            || hash != self.config().admin_password_hash
        {
            tracing::info!(%login, "rejected admin credentials");
            return Err(tracerr::new!(E::WrongCredentials));
        }

        let session = Session {
            login,
            role: Role::Admin,
            expires_at: (DateTime::now() + self.config().session_ttl).coerce(),
        };
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &session,
            &self.config().jwt_encoding_key,
        )
        .map_err(tracerr::from_and_wrap!(=> E))?;

        // SAFETY: `jsonwebtoken::encode` always returns a valid
        //         `session::Token`.
        #[expect(unsafe_code, reason = "invariants are preserved")]
        let token = unsafe { session::Token::new_unchecked(token) };

        Ok(Output { token, session })
    }
}

/// Error of [`CreateAdminSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`jsonwebtoken`] encoding error.
    #[display("Failed to encode a JSON Web Token: {_0}")]
    JsonWebTokenEncodeError(jsonwebtoken::errors::Error),

    /// [`CreateAdminSession`] contains wrong credentials.
    #[display("Wrong admin credentials")]
    WrongCredentials,
}
