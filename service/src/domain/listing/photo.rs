//! [`Photos`] of a [`Listing`].

#[cfg(feature = "postgres")]
use std::error::Error as StdError;
use std::{path::Path, str::FromStr};

use common::DateTime;
use derive_more::{AsRef, Display, Into};
use itertools::Itertools as _;
#[cfg(feature = "postgres")]
use postgres_types::{
    accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type,
};
use uuid::Uuid;

#[cfg(doc)]
use super::Listing;
use super::Id;

/// Public URL of a stored photo.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Into, PartialEq)]
#[as_ref(str, String)]
pub struct PhotoUrl(String);

impl PhotoUrl {
    /// Creates a new [`PhotoUrl`] if the given `url` is valid.
    ///
    /// Valid URLs are non-empty, have no surrounding whitespace and contain
    /// no commas, as the latter separate URLs in a [`Photos`] string.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        (url.trim() == url && !url.is_empty() && !url.contains(','))
            .then_some(Self(url))
    }

    /// Returns this [`PhotoUrl`] without its query and fragment.
    #[must_use]
    pub fn path(&self) -> &str {
        self.0.split(['?', '#']).next().unwrap_or_default()
    }

    /// Returns the last path segment of this [`PhotoUrl`].
    #[must_use]
    pub fn last_segment(&self) -> &str {
        self.path().rsplit('/').next().unwrap_or_default()
    }
}

impl FromStr for PhotoUrl {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `PhotoUrl`")
    }
}

/// Ordered photos of a [`Listing`].
///
/// The first one is the cover photo.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Photos(Vec<PhotoUrl>);

impl Photos {
    /// Creates new [`Photos`] out of the given [`PhotoUrl`]s, keeping their
    /// order.
    #[must_use]
    pub fn new(urls: impl IntoIterator<Item = PhotoUrl>) -> Self {
        Self(urls.into_iter().collect())
    }

    /// Parses [`Photos`] from a comma-joined URL string.
    ///
    /// URLs are trimmed and empty entries dropped.
    #[must_use]
    pub fn from_url_string(s: &str) -> Self {
        Self(
            s.split(',')
                .map(str::trim)
                .filter_map(PhotoUrl::new)
                .collect(),
        )
    }

    /// Joins these [`Photos`] into a comma-joined URL string.
    #[must_use]
    pub fn to_url_string(&self) -> String {
        self.0.iter().join(",")
    }

    /// Returns the cover [`PhotoUrl`], if any.
    #[must_use]
    pub fn cover(&self) -> Option<&PhotoUrl> {
        self.0.first()
    }

    /// Returns the [`PhotoUrl`]s in order.
    #[must_use]
    pub fn as_slice(&self) -> &[PhotoUrl] {
        &self.0
    }

    /// Indicates whether there are no photos.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Numbers these [`Photos`] for an editing session started at the
    /// given `timestamp` (Unix milliseconds).
    #[must_use]
    pub fn numbered(&self, timestamp: i64) -> Vec<Photo> {
        self.0
            .iter()
            .enumerate()
            .map(|(i, url)| Photo {
                id: format!("existing_{i}_{timestamp}"),
                url: url.clone(),
            })
            .collect()
    }

    /// Returns the [`PhotoUrl`]s present in these [`Photos`] and absent in
    /// the `updated` ones.
    #[must_use]
    pub fn removed_in<'a>(&'a self, updated: &Self) -> Vec<&'a PhotoUrl> {
        self.0.iter().filter(|url| !updated.0.contains(url)).collect()
    }

    /// Removes the given [`PhotoUrl`], returning whether it was present.
    pub fn remove(&mut self, url: &PhotoUrl) -> bool {
        let len = self.0.len();
        self.0.retain(|u| u != url);
        self.0.len() != len
    }
}

/// [`PhotoUrl`] numbered for an editing session.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Photo {
    /// Session-local ID of this [`Photo`].
    pub id: String,

    /// [`PhotoUrl`] of this [`Photo`].
    pub url: PhotoUrl,
}

/// Name of a stored photo file.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct FileName(String);

impl FileName {
    /// Number of random characters in a generated [`FileName`].
    const RANDOM_LEN: usize = 9;

    /// Generates a new unique [`FileName`] for a photo of the [`Listing`]
    /// with the provided [`Id`], keeping the extension of the `original`
    /// file name.
    ///
    /// The format is `<id | temp>_<unix millis>_<random>.<ext>`.
    #[must_use]
    pub fn generate(
        listing: Option<Id>,
        original: &str,
        now: DateTime,
    ) -> Self {
        let owner =
            listing.map_or_else(|| "temp".to_owned(), |id| id.to_string());
        let random = Uuid::new_v4().simple().to_string();
        let random = &random[..Self::RANDOM_LEN];
        let ext = Path::new(original)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| "jpg".to_owned());

        Self(format!("{owner}_{}_{random}.{ext}", now.unix_millis()))
    }

    /// Creates a new [`FileName`] if the given `name` is a safe single path
    /// segment.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        let safe = !name.is_empty()
            && !name.starts_with('.')
            && name.chars().all(|c| {
                c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
            });
        safe.then_some(Self(name))
    }
}

#[cfg(feature = "postgres")]
impl FromSql<'_> for Photos {
    accepts!(TEXT, VARCHAR);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        <&str as FromSql<'_>>::from_sql(ty, raw).map(Self::from_url_string)
    }
}

#[cfg(feature = "postgres")]
impl ToSql for Photos {
    accepts!(TEXT, VARCHAR);
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        self.to_url_string().to_sql(ty, w)
    }
}

#[cfg(test)]
mod spec {
    use common::DateTime;

    use super::{FileName, PhotoUrl, Photos};
    use crate::domain::listing::Id;

    fn url(s: &str) -> PhotoUrl {
        PhotoUrl::new(s).expect("valid URL")
    }

    #[test]
    fn url_string_round_trips() {
        let photos = Photos::new([
            url("https://cdn.example/a.jpg"),
            url("https://cdn.example/b.jpg"),
            url("https://cdn.example/c.jpg"),
        ]);

        let s = photos.to_url_string();
        assert_eq!(
            s,
            "https://cdn.example/a.jpg,https://cdn.example/b.jpg,\
             https://cdn.example/c.jpg",
        );
        assert_eq!(Photos::from_url_string(&s), photos);
    }

    #[test]
    fn parsing_trims_and_drops_empties() {
        let photos = Photos::from_url_string(" /a.jpg , ,/b.jpg,, ");

        assert_eq!(photos.as_slice(), &[url("/a.jpg"), url("/b.jpg")]);
        assert_eq!(photos.cover(), Some(&url("/a.jpg")));
        assert!(Photos::from_url_string("").is_empty());
    }

    #[test]
    fn numbers_existing_photos() {
        let photos = Photos::from_url_string("/a.jpg,/b.jpg");
        let numbered = photos.numbered(1_700_000_000_000);

        assert_eq!(numbered[0].id, "existing_0_1700000000000");
        assert_eq!(numbered[1].id, "existing_1_1700000000000");
        assert_eq!(numbered[1].url, url("/b.jpg"));
    }

    #[test]
    fn diffs_removed_photos() {
        let before = Photos::from_url_string("/a.jpg,/b.jpg,/c.jpg");
        let after = Photos::from_url_string("/c.jpg,/d.jpg");

        assert_eq!(
            before.removed_in(&after),
            [&url("/a.jpg"), &url("/b.jpg")],
        );
    }

    #[test]
    fn takes_last_segment() {
        assert_eq!(
            url("https://cdn.example/photos/12_1_abc.png?v=2").last_segment(),
            "12_1_abc.png",
        );
    }

    #[test]
    fn generates_file_names() {
        let now = DateTime::from_unix_timestamp(1_700_000_000)
            .expect("valid timestamp");

        let name = FileName::generate(Some(Id::from(42)), "IMG_01.JPG", now);
        let parts = AsRef::<str>::as_ref(&name).split(['_', '.']).collect::<Vec<_>>();
        assert_eq!(parts[0], "42");
        assert_eq!(parts[1], "1700000000000");
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(parts[3], "jpg");

        let name = FileName::generate(None, "photo", now);
        assert!(AsRef::<str>::as_ref(&name).starts_with("temp_1700000000000_"));
        assert!(AsRef::<str>::as_ref(&name).ends_with(".jpg"));

        assert!(FileName::new(name.to_string()).is_some());
        assert!(FileName::new("../etc/passwd").is_none());
    }
}
