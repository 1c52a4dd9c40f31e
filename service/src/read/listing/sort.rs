//! [`SortKey`] of a [`Listing`] list.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::domain::{listing::Area, Listing};

/// Order of a [`Listing`] list.
///
/// Ties are broken by the listing number, the newest first.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    EnumString,
    Eq,
    Hash,
    PartialEq,
    Serialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SortKey {
    /// Newest first.
    #[default]
    DateDesc,

    /// Oldest first.
    DateAsc,

    /// Cheapest first.
    PriceAsc,

    /// Most expensive first.
    PriceDesc,

    /// Smallest first.
    AreaAsc,

    /// Largest first.
    AreaDesc,

    /// Cheapest square meter first.
    PricePerAreaAsc,

    /// Most expensive square meter first.
    PricePerAreaDesc,
}

impl SortKey {
    /// Compares the provided [`Listing`]s according to this [`SortKey`].
    ///
    /// [`Listing`]s without a defined non-zero [`Area`] go after all the
    /// others for the area-based keys, in both directions.
    #[must_use]
    pub fn compare(self, a: &Listing, b: &Listing) -> Ordering {
        match self {
            Self::DateDesc => b.created_at.cmp(&a.created_at),
            Self::DateAsc => a.created_at.cmp(&b.created_at),
            Self::PriceAsc => a.price.cmp(&b.price),
            Self::PriceDesc => b.price.cmp(&a.price),
            Self::AreaAsc => defined_first(area(a), area(b), false),
            Self::AreaDesc => defined_first(area(a), area(b), true),
            Self::PricePerAreaAsc => {
                defined_first(price_per_area(a), price_per_area(b), false)
            }
            Self::PricePerAreaDesc => {
                defined_first(price_per_area(a), price_per_area(b), true)
            }
        }
        .then_with(|| b.id.cmp(&a.id))
    }
}

/// Returns the non-zero [`Area`] of the provided [`Listing`].
fn area(listing: &Listing) -> Option<Area> {
    listing.area.filter(|a| !a.is_zero())
}

/// Calculates the exact price of a square meter of the provided
/// [`Listing`].
fn price_per_area(listing: &Listing) -> Option<Decimal> {
    let area = Decimal::from(i32::from(area(listing)?));
    Decimal::from(i64::from(listing.price)).checked_div(area)
}

/// Compares the provided values putting the missing ones last.
fn defined_first<T: Ord>(a: Option<T>, b: Option<T>, desc: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            if desc {
                b.cmp(&a)
            } else {
                a.cmp(&b)
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
