//! [`Storage`] of photo files.

pub mod filesystem;
#[cfg(test)]
pub mod memory;

use derive_more::{Debug, Display, Error as StdError, From};

#[cfg(test)]
pub use self::memory::Memory;
pub use self::filesystem::Filesystem;
use crate::domain::listing::{photo::FileName, PhotoUrl};

/// Photo storage operation.
pub use common::Handler as Storage;

/// Photo file to be stored.
#[derive(Clone, Debug)]
pub struct Upload {
    /// [`FileName`] to store the photo under.
    pub name: FileName,

    /// Content of the photo file.
    #[debug(skip)]
    pub bytes: Vec<u8>,
}

/// Public base URL a [`Storage`] serves its files under.
#[derive(Clone, Debug, Display)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new [`BaseUrl`] out of the provided `url`, ignoring its
    /// trailing slashes.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        let mut url = url.into();
        url.truncate(url.trim_end_matches('/').len());
        Self(url)
    }

    /// Builds the [`PhotoUrl`] of the file with the provided [`FileName`].
    #[must_use]
    pub fn join(&self, name: &FileName) -> String {
        format!("{}/{name}", self.0)
    }

    /// Resolves the [`FileName`] of the provided [`PhotoUrl`], if it's
    /// served directly under this [`BaseUrl`].
    ///
    /// The [`FileName`] is the last path segment, so the query and the
    /// fragment of the [`PhotoUrl`] are ignored.
    #[must_use]
    pub fn file_name(&self, url: &PhotoUrl) -> Option<FileName> {
        let rest = url.path().strip_prefix(&self.0)?.strip_prefix('/')?;
        if rest.contains('/') {
            return None;
        }
        FileName::new(url.last_segment())
    }
}

/// [`Storage`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// I/O error of a [`Filesystem`] [`Storage`].
    #[display("I/O operation failed: {_0}")]
    Io(std::io::Error),

    /// File with the same [`FileName`] already exists.
    #[display("File `{_0}` already exists")]
    #[from(ignore)]
    AlreadyExists(#[error(not(source))] FileName),

    /// Stored file cannot be addressed by a [`PhotoUrl`].
    #[display("Invalid URL of a stored file: {_0}")]
    #[from(ignore)]
    InvalidUrl(#[error(not(source))] String),
}

#[cfg(test)]
mod spec {
    use super::BaseUrl;
    use crate::domain::listing::PhotoUrl;

    fn name_of(base: &BaseUrl, url: &str) -> Option<String> {
        let url = PhotoUrl::new(url).expect("valid URL");
        base.file_name(&url).map(|n| n.to_string())
    }

    #[test]
    fn resolves_own_urls_only() {
        let base = BaseUrl::new("https://example.com/photos/");

        assert_eq!(
            name_of(&base, "https://example.com/photos/7_1_abc.jpg"),
            Some("7_1_abc.jpg".to_owned()),
        );
        assert_eq!(name_of(&base, "https://cdn.other/photos/7.jpg"), None);
        assert_eq!(
            name_of(&base, "https://example.com/photos/nested/7.jpg"),
            None,
        );
        assert_eq!(name_of(&base, "https://example.com/photos"), None);
    }

    #[test]
    fn ignores_query_and_fragment() {
        let base = BaseUrl::new("https://example.com/photos");

        assert_eq!(
            name_of(&base, "https://example.com/photos/7_1_abc.jpg?v=2"),
            Some("7_1_abc.jpg".to_owned()),
        );
        assert_eq!(
            name_of(&base, "https://example.com/photos/7_1_abc.jpg#top"),
            Some("7_1_abc.jpg".to_owned()),
        );
        assert_eq!(
            name_of(&base, "https://example.com/photos?f=7_1_abc.jpg"),
            None,
        );
    }
}
