//! Catalog user definitions.

pub mod session;

use std::sync::LazyLock;

use derive_more::{Display, From};
use regex::Regex;
use secrecy::{zeroize::Zeroize, CloneableSecret};
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3;

pub use self::session::Session;

/// Role of a catalog user, deciding what the user may read and write.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    Hash,
    PartialEq,
    Serialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Anonymous visitor of the public catalog.
    #[default]
    #[display("GUEST")]
    Guest,

    /// Authenticated administrator.
    #[display("ADMIN")]
    Admin,
}

impl Role {
    /// Indicates whether this [`Role`] is allowed to see and modify admin-only
    /// data.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Login of an administrator.
#[derive(Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Login(String);

impl Login {
    /// Creates a new [`Login`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `login` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(login: impl Into<String>) -> Self {
        Self(login.into())
    }

    /// Creates a new [`Login`] if the given `login` is valid.
    #[must_use]
    pub fn new(login: impl Into<String>) -> Option<Self> {
        let login = login.into();
        Self::check(&login).then_some(Self(login))
    }

    /// Checks whether the given `login` is a valid [`Login`].
    fn check(login: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Login`] invariants:
        /// - Must not contain whitespace or control characters;
        /// - Must consist of letters, digits, `.`, `_`, `-` or `@`;
        /// - Must be between 1 and 64 characters long.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[\p{L}\p{N}._@-]{1,64}$").expect("valid regex")
        });

        REGEX.is_match(login.as_ref())
    }
}

impl std::str::FromStr for Login {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Login`")
    }
}

impl TryFrom<String> for Login {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `Login`")
    }
}

impl From<Login> for String {
    fn from(login: Login) -> Self {
        login.0
    }
}

/// Password of an administrator.
#[derive(Clone, Debug, Display, Eq, From, PartialEq)]
#[from(&str, String)]
pub struct Password(String);

impl Password {
    /// Creates a new [`Password`] if the given `password` is valid.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Option<Self> {
        let password = password.into();
        Self::check(&password).then_some(Self(password))
    }

    /// Checks whether the given `password` is a valid [`Password`].
    fn check(password: impl AsRef<str>) -> bool {
        let password = password.as_ref();
        password.len() > 1 && password.len() <= 128
    }
}

impl std::str::FromStr for Password {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Password`")
    }
}

impl CloneableSecret for Password {}
impl Zeroize for Password {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Hash of a [`Password`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[display("{_0:032x}")]
pub struct PasswordHash(u128);

impl PasswordHash {
    /// Calculates a new [`PasswordHash`] of the given [`Password`].
    #[must_use]
    pub fn new(password: &Password) -> Self {
        // TODO: Switch to a salted key derivation function once more than a
        //       single configured administrator is supported.
        Self(xxh3::xxh3_128(password.0.as_bytes()))
    }
}
