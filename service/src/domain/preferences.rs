//! [`Preferences`] definitions.

use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

use crate::read::listing::{Filter, SortKey};

/// Listing browsing selections of a client, persisted between visits.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, SmartDefault)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    /// Schema version these [`Preferences`] were stored with.
    ///
    /// Missing version is never the current one.
    #[default(Preferences::VERSION)]
    #[serde(default)]
    pub version: u32,

    /// Last applied [`Filter`].
    pub filter: Filter,

    /// Last applied [`SortKey`].
    pub sort: SortKey,

    /// Last visited page number.
    #[default(1)]
    pub page: usize,

    /// Last scroll position, in pixels.
    pub scroll_position: u32,
}

impl Preferences {
    /// Current schema version of [`Preferences`].
    pub const VERSION: u32 = 1;

    /// Decodes [`Preferences`] from the stored JSON `value`.
    ///
    /// Values of another schema version, or ones failing to decode, are
    /// discarded in favor of [`Preferences::default()`].
    #[must_use]
    pub fn decode(value: serde_json::Value) -> Self {
        match serde_json::from_value::<Self>(value) {
            Ok(prefs) if prefs.version == Self::VERSION => prefs.normalized(),
            Ok(prefs) => {
                tracing::debug!(
                    version = prefs.version,
                    "discarding preferences of outdated version",
                );
                Self::default()
            }
            Err(e) => {
                tracing::debug!("discarding undecodable preferences: {e}");
                Self::default()
            }
        }
    }

    /// Encodes these [`Preferences`] into a JSON value to be stored.
    #[must_use]
    pub fn encode(&self) -> serde_json::Value {
        serde_json::json!({
            "version": Self::VERSION,
            "filter": self.filter,
            "sort": self.sort,
            "page": self.page.max(1),
            "scrollPosition": self.scroll_position,
        })
    }

    /// Clamps the page number to the first page at least.
    fn normalized(self) -> Self {
        Self {
            page: self.page.max(1),
            ..self
        }
    }
}

define_text! {
    #[doc = "Client key [`Preferences`] are stored under."]
    Key(128)
}
