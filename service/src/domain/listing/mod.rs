//! [`Listing`] definitions.

pub mod photo;

use std::sync::LazyLock;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Date, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use serde::{Deserialize, Serialize};

pub use self::photo::{PhotoUrl, Photos};

/// Property listing of the catalog.
#[derive(Clone, Debug)]
pub struct Listing {
    /// ID of this [`Listing`], also known as the listing number.
    pub id: Id,

    /// [`Kind`] of the property.
    pub kind: Kind,

    /// [`Title`] of this [`Listing`].
    pub title: Title,

    /// [`Description`] of this [`Listing`].
    pub description: Option<Description>,

    /// Asking [`Price`].
    pub price: Price,

    /// [`Area`] of the property.
    pub area: Option<Area>,

    /// [`Location`] of the property.
    pub location: Location,

    /// Cadastral data of a land property.
    pub land: Land,

    /// Attributes of a residential property.
    pub residence: Residence,

    /// Ordered [`Photos`] of the property.
    pub photos: Photos,

    /// Admin-only data, [`None`] when read by a guest.
    pub private: Option<Private>,

    /// [`DateTime`] when this [`Listing`] was created.
    pub created_at: CreationDateTime,
}

impl Listing {
    /// Indicates whether this [`Listing`] is hidden from guests.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.private.as_ref().is_some_and(|p| p.hidden)
    }
}

/// Data of a [`Listing`] to be created.
///
/// The [`Id`] is assigned by the store.
#[derive(Clone, Debug)]
pub struct Draft {
    /// [`Kind`] of the property.
    pub kind: Kind,

    /// [`Title`] of the [`Listing`].
    pub title: Title,

    /// [`Description`] of the [`Listing`].
    pub description: Option<Description>,

    /// Asking [`Price`].
    pub price: Price,

    /// [`Area`] of the property.
    pub area: Option<Area>,

    /// [`Location`] of the property.
    pub location: Location,

    /// Cadastral data of a land property.
    pub land: Land,

    /// Attributes of a residential property.
    pub residence: Residence,

    /// Ordered [`Photos`] of the property.
    pub photos: Photos,

    /// Admin-only data.
    pub private: Private,

    /// [`DateTime`] when the [`Listing`] is created.
    pub created_at: CreationDateTime,
}

impl Draft {
    /// Turns this [`Draft`] into a [`Listing`] with the provided [`Id`].
    #[must_use]
    pub fn into_listing(self, id: Id) -> Listing {
        let Self {
            kind,
            title,
            description,
            price,
            area,
            location,
            land,
            residence,
            photos,
            private,
            created_at,
        } = self;
        Listing {
            id,
            kind,
            title,
            description,
            price,
            area,
            location,
            land,
            residence,
            photos,
            private: Some(private),
            created_at,
        }
    }
}

/// ID (number) of a [`Listing`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Id(i64);

define_kind! {
    #[doc = "Kind of a [`Listing`] property."]
    enum Kind {
        #[doc = "Building land plot."]
        LandPlot = 1,

        #[doc = "Agricultural field."]
        Field = 2,

        #[doc = "Vineyard plot."]
        VineyardPlot = 3,

        #[doc = "Shared ownership of a land."]
        LandShare = 4,

        #[doc = "Apartment for rent."]
        RentalApartment = 5,

        #[doc = "Apartment for sale."]
        SaleApartment = 6,
    }
}

impl Kind {
    /// Indicates whether this [`Kind`] is a land property.
    #[must_use]
    pub const fn is_land(self) -> bool {
        matches!(
            self,
            Self::LandPlot | Self::Field | Self::VineyardPlot | Self::LandShare
        )
    }

    /// Indicates whether this [`Kind`] is a residential property.
    #[must_use]
    pub const fn is_residential(self) -> bool {
        matches!(self, Self::RentalApartment | Self::SaleApartment)
    }

    /// Returns a human-readable label of this [`Kind`].
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LandPlot => "Land plot",
            Self::Field => "Field",
            Self::VineyardPlot => "Vineyard plot",
            Self::LandShare => "Land share",
            Self::RentalApartment => "Apartment for rent",
            Self::SaleApartment => "Apartment for sale",
        }
    }
}

define_text! {
    #[doc = "Title of a [`Listing`]."]
    Title(256)
}

define_text! {
    #[doc = "Description of a [`Listing`]."]
    Description(10_000)
}

/// Price in whole currency units.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Price(i64);

impl Price {
    /// Creates a new [`Price`] if the given `amount` is not negative.
    #[must_use]
    pub fn new(amount: i64) -> Option<Self> {
        (amount >= 0).then_some(Self(amount))
    }
}

impl std::str::FromStr for Price {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `Price`")
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: serde::Deserializer<'de>>(
        d: D,
    ) -> Result<Self, D::Error> {
        Self::new(i64::deserialize(d)?)
            .ok_or_else(|| serde::de::Error::custom("negative `Price`"))
    }
}

/// Area in square meters.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Area(i32);

impl Area {
    /// Creates a new [`Area`] if the given `m2` is not negative.
    #[must_use]
    pub fn new(m2: i32) -> Option<Self> {
        (m2 >= 0).then_some(Self(m2))
    }

    /// Indicates whether this [`Area`] is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl std::str::FromStr for Area {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `Area`")
    }
}

impl<'de> Deserialize<'de> for Area {
    fn deserialize<D: serde::Deserializer<'de>>(
        d: D,
    ) -> Result<Self, D::Error> {
        Self::new(i32::deserialize(d)?)
            .ok_or_else(|| serde::de::Error::custom("negative `Area`"))
    }
}

/// Location of a [`Listing`] property.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Location {
    /// [`Province`] the property is located in.
    pub province: Option<Province>,

    /// [`District`] the property is located in.
    pub district: Option<District>,

    /// [`Neighborhood`] the property is located in.
    pub neighborhood: Option<Neighborhood>,
}

define_text! {
    #[doc = "Province of a [`Location`]."]
    Province(128)
}

define_text! {
    #[doc = "District of a [`Location`]."]
    District(128)
}

define_text! {
    #[doc = "Neighborhood of a [`Location`]."]
    Neighborhood(256)
}

/// Cadastral data of a land [`Listing`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Land {
    /// [`BlockNum`] of the land.
    pub block: Option<BlockNum>,

    /// [`ParcelNum`] of the land.
    pub parcel: Option<ParcelNum>,
}

/// Cadastral block number.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct BlockNum(i32);

/// Cadastral parcel number.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct ParcelNum(i32);

/// Attributes of a residential [`Listing`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Residence {
    /// [`RoomLayout`] of the apartment.
    pub rooms: Option<RoomLayout>,

    /// [`BuildingAge`] bracket of the building.
    pub building_age: Option<BuildingAge>,

    /// [`FloorLabel`] of the apartment.
    pub floor: Option<FloorLabel>,

    /// Number of floors in the building.
    pub num_floors: Option<u16>,

    /// [`Heating`] of the apartment.
    pub heating: Option<Heating>,

    /// Number of bathrooms.
    pub num_bathrooms: Option<u16>,

    /// Monthly maintenance fee.
    pub maintenance_fee: Option<Price>,

    /// [`Amenities`] of the apartment.
    pub amenities: Amenities,
}

define_text! {
    #[doc = "Room layout of an apartment (e.g. `3+1`)."]
    RoomLayout(32)
}

define_text! {
    #[doc = "Age bracket of a building (e.g. `6-10`)."]
    BuildingAge(32)
}

define_text! {
    #[doc = "Floor an apartment is located on (e.g. `Ground`, `3`)."]
    FloorLabel(32)
}

define_text! {
    #[doc = "Heating type of an apartment."]
    Heating(64)
}

/// Amenities of a residential [`Listing`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Amenities {
    /// Apartment has a balcony.
    pub balcony: bool,

    /// Building has an elevator.
    pub elevator: bool,

    /// Apartment is furnished.
    pub furnished: bool,
}

/// Admin-only data of a [`Listing`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Private {
    /// [`OwnerName`] of the property.
    pub owner_name: Option<OwnerName>,

    /// [`Phone`] of the property owner.
    pub owner_phone: Option<Phone>,

    /// Number of the same listing on an external listing platform.
    pub external_num: Option<ExternalNum>,

    /// [`Date`] of the external listing.
    pub external_date: Option<Date>,

    /// Free-text admin [`Note`].
    pub note: Option<Note>,

    /// Indicator whether the [`Listing`] is hidden from guests.
    pub hidden: bool,
}

define_text! {
    #[doc = "Name of a property owner."]
    OwnerName(256)
}

define_text! {
    #[doc = "Free-text admin note of a [`Listing`]."]
    Note(10_000)
}

/// Number of a [`Listing`] on an external listing platform.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct ExternalNum(i64);

/// Phone number of a property owner.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `number` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format: an optional leading
        /// `+`, then digits grouped by spaces, dashes or parentheses.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\+?\d[\d\s()-]{5,22}\d$").expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

impl std::str::FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

/// [`DateTime`] when a [`Listing`] was created.
pub type CreationDateTime = DateTimeOf<(Listing, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{Kind, Phone, Price, Title};

    #[test]
    fn kinds_split_into_categories() {
        let land = Kind::ALL.iter().filter(|k| k.is_land()).count();
        let residential =
            Kind::ALL.iter().filter(|k| k.is_residential()).count();

        assert_eq!(land, 4);
        assert_eq!(residential, 2);
        assert_eq!(Kind::ALL.len(), 6);
    }

    #[test]
    fn validates_text() {
        assert!(Title::new("Sea view plot").is_some());
        assert!(Title::new(" padded").is_none());
        assert!(Title::new("").is_none());
        assert!(Title::new("ş".repeat(256)).is_some());
        assert!(Title::new("ş".repeat(257)).is_none());
    }

    #[test]
    fn validates_phone() {
        assert!(Phone::new("0532 123 45 67").is_some());
        assert!(Phone::new("+90 (532) 123-4567").is_some());
        assert!(Phone::new("call me").is_none());
    }

    #[test]
    fn price_is_not_negative() {
        assert_eq!("1500000".parse::<Price>().map(i64::from), Ok(1_500_000));
        assert!("-1".parse::<Price>().is_err());
        assert!("1.5".parse::<Price>().is_err());
    }
}
