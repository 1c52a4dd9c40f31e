//! [`Listing`]-related definitions.

pub mod input;
pub mod list;

use common::{Date, DateTime};
use derive_more::{From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLObject};
use service::{domain::listing, read};

use crate::{api::scalar::define_scalar, define_error, Context};

pub use self::{
    input::{Input, Patch},
    list::{Filter, Page, Sort},
};

define_scalar! {
    #[doc = "Number of a `Listing`, unique across the catalog."]
    #[graphql(name = "ListingNumber")]
    Number(listing::Id);

    #[doc = "Price in whole currency units."]
    #[graphql(name = "Price")]
    Price(listing::Price);

    #[doc = "Area in square meters."]
    #[graphql(name = "Area")]
    Area(listing::Area);

    #[doc = "Non-negative count of things, e.g. floors or bathrooms."]
    #[graphql(name = "Count")]
    Count(u16);

    #[doc = "Title of a `Listing`."]
    #[graphql(name = "ListingTitle")]
    Title(listing::Title);

    #[doc = "Description of a `Listing`."]
    #[graphql(name = "ListingDescription")]
    Description(listing::Description);

    #[doc = "Province of a `Listing` location."]
    #[graphql(name = "Province")]
    Province(listing::Province);

    #[doc = "District of a `Listing` location."]
    #[graphql(name = "District")]
    District(listing::District);

    #[doc = "Neighborhood of a `Listing` location."]
    #[graphql(name = "Neighborhood")]
    Neighborhood(listing::Neighborhood);

    #[doc = "Cadastral block number of a land."]
    #[graphql(name = "BlockNum")]
    BlockNum(listing::BlockNum);

    #[doc = "Cadastral parcel number of a land."]
    #[graphql(name = "ParcelNum")]
    ParcelNum(listing::ParcelNum);

    #[doc = "Room layout of an apartment, e.g. `3+1`."]
    #[graphql(name = "RoomLayout")]
    RoomLayout(listing::RoomLayout);

    #[doc = "Age bracket of a building, e.g. `6-10`."]
    #[graphql(name = "BuildingAge")]
    BuildingAge(listing::BuildingAge);

    #[doc = "Floor an apartment is located on, e.g. `Ground` or `3`."]
    #[graphql(name = "FloorLabel")]
    FloorLabel(listing::FloorLabel);

    #[doc = "Heating type of an apartment."]
    #[graphql(name = "Heating")]
    Heating(listing::Heating);

    #[doc = "Name of a property owner."]
    #[graphql(name = "OwnerName")]
    OwnerName(listing::OwnerName);

    #[doc = "Phone number of a property owner."]
    #[graphql(name = "OwnerPhone")]
    Phone(listing::Phone);

    #[doc = "Number of a `Listing` on an external listing platform."]
    #[graphql(name = "ExternalNum")]
    ExternalNum(listing::ExternalNum);

    #[doc = "Free-text admin note of a `Listing`."]
    #[graphql(name = "ListingNote")]
    Note(listing::Note);

    #[doc = "Public URL of a stored photo."]
    #[graphql(name = "PhotoUrl")]
    PhotoUrl(listing::PhotoUrl);
}

/// Kind of a `Listing` property.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "ListingKind")]
pub enum Kind {
    /// Building land plot.
    LandPlot,

    /// Agricultural field.
    Field,

    /// Vineyard plot.
    VineyardPlot,

    /// Shared ownership of a land.
    LandShare,

    /// Apartment for rent.
    RentalApartment,

    /// Apartment for sale.
    SaleApartment,
}

impl From<listing::Kind> for Kind {
    fn from(kind: listing::Kind) -> Self {
        match kind {
            listing::Kind::LandPlot => Self::LandPlot,
            listing::Kind::Field => Self::Field,
            listing::Kind::VineyardPlot => Self::VineyardPlot,
            listing::Kind::LandShare => Self::LandShare,
            listing::Kind::RentalApartment => Self::RentalApartment,
            listing::Kind::SaleApartment => Self::SaleApartment,
        }
    }
}

impl From<Kind> for listing::Kind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::LandPlot => Self::LandPlot,
            Kind::Field => Self::Field,
            Kind::VineyardPlot => Self::VineyardPlot,
            Kind::LandShare => Self::LandShare,
            Kind::RentalApartment => Self::RentalApartment,
            Kind::SaleApartment => Self::SaleApartment,
        }
    }
}

/// Property listing of the catalog.
#[derive(Clone, Debug, From, Into)]
pub struct Listing(listing::Listing);

/// Property listing of the catalog.
#[graphql_object(context = Context)]
impl Listing {
    /// Number of this `Listing`.
    #[must_use]
    pub fn number(&self) -> Number {
        self.0.id.into()
    }

    /// Kind of the property.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.0.kind.into()
    }

    /// Title of this `Listing`.
    #[must_use]
    pub fn title(&self) -> Title {
        self.0.title.clone().into()
    }

    /// Description of this `Listing`.
    #[must_use]
    pub fn description(&self) -> Option<Description> {
        self.0.description.clone().map(Into::into)
    }

    /// Asking price.
    #[must_use]
    pub fn price(&self) -> Price {
        self.0.price.into()
    }

    /// Area of the property.
    #[must_use]
    pub fn area(&self) -> Option<Area> {
        self.0.area.map(Into::into)
    }

    /// Province the property is located in.
    #[must_use]
    pub fn province(&self) -> Option<Province> {
        self.0.location.province.clone().map(Into::into)
    }

    /// District the property is located in.
    #[must_use]
    pub fn district(&self) -> Option<District> {
        self.0.location.district.clone().map(Into::into)
    }

    /// Neighborhood the property is located in.
    #[must_use]
    pub fn neighborhood(&self) -> Option<Neighborhood> {
        self.0.location.neighborhood.clone().map(Into::into)
    }

    /// Cadastral block number of a land.
    #[must_use]
    pub fn block_num(&self) -> Option<BlockNum> {
        self.0.land.block.map(Into::into)
    }

    /// Cadastral parcel number of a land.
    #[must_use]
    pub fn parcel_num(&self) -> Option<ParcelNum> {
        self.0.land.parcel.map(Into::into)
    }

    /// Room layout of an apartment.
    #[must_use]
    pub fn rooms(&self) -> Option<RoomLayout> {
        self.0.residence.rooms.clone().map(Into::into)
    }

    /// Age bracket of the building.
    #[must_use]
    pub fn building_age(&self) -> Option<BuildingAge> {
        self.0.residence.building_age.clone().map(Into::into)
    }

    /// Floor the apartment is located on.
    #[must_use]
    pub fn floor(&self) -> Option<FloorLabel> {
        self.0.residence.floor.clone().map(Into::into)
    }

    /// Number of floors in the building.
    #[must_use]
    pub fn num_floors(&self) -> Option<Count> {
        self.0.residence.num_floors.map(Into::into)
    }

    /// Heating type of the apartment.
    #[must_use]
    pub fn heating(&self) -> Option<Heating> {
        self.0.residence.heating.clone().map(Into::into)
    }

    /// Number of bathrooms.
    #[must_use]
    pub fn num_bathrooms(&self) -> Option<Count> {
        self.0.residence.num_bathrooms.map(Into::into)
    }

    /// Monthly maintenance fee.
    #[must_use]
    pub fn maintenance_fee(&self) -> Option<Price> {
        self.0.residence.maintenance_fee.map(Into::into)
    }

    /// Indicator whether the apartment has a balcony.
    #[must_use]
    pub fn balcony(&self) -> bool {
        self.0.residence.amenities.balcony
    }

    /// Indicator whether the building has an elevator.
    #[must_use]
    pub fn elevator(&self) -> bool {
        self.0.residence.amenities.elevator
    }

    /// Indicator whether the apartment is furnished.
    #[must_use]
    pub fn furnished(&self) -> bool {
        self.0.residence.amenities.furnished
    }

    /// Ordered photos of the property, the cover one first.
    #[must_use]
    pub fn photos(&self) -> Vec<PhotoUrl> {
        self.0.photos.as_slice().iter().cloned().map(Into::into).collect()
    }

    /// Cover photo of the property.
    #[must_use]
    pub fn cover_photo(&self) -> Option<PhotoUrl> {
        self.0.photos.cover().cloned().map(Into::into)
    }

    /// Ordered photos of the property, numbered for an editing session
    /// started now.
    #[must_use]
    pub fn editable_photos(&self) -> Vec<Photo> {
        self.0
            .photos
            .numbered(DateTime::now().unix_millis())
            .into_iter()
            .map(Into::into)
            .collect()
    }

    /// Human-readable attributes of the property, in display order.
    #[must_use]
    pub fn attributes(&self) -> Vec<Attribute> {
        read::listing::attributes(&self.0)
            .into_iter()
            .map(|a| Attribute {
                name: a.name.to_owned(),
                value: a.value,
            })
            .collect()
    }

    /// `DateTime` when this `Listing` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }

    /// Admin-only data of this `Listing`.
    ///
    /// Always `null` for guests.
    #[must_use]
    pub fn private(&self) -> Option<Private> {
        self.0.private.clone().map(Private)
    }
}

/// Named attribute of a `Listing`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "ListingAttribute")]
pub struct Attribute {
    /// Name of this `ListingAttribute`.
    pub name: String,

    /// Human-readable value of this `ListingAttribute`.
    pub value: String,
}

/// Photo of a `Listing` within an editing session.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "ListingPhoto")]
pub struct Photo {
    /// Session-local ID of this `ListingPhoto`.
    pub id: String,

    /// URL of this `ListingPhoto`.
    pub url: PhotoUrl,
}

impl From<listing::photo::Photo> for Photo {
    fn from(photo: listing::photo::Photo) -> Self {
        Self {
            id: photo.id,
            url: photo.url.into(),
        }
    }
}

/// Admin-only data of a [`Listing`].
#[derive(Clone, Debug)]
pub struct Private(listing::Private);

/// Admin-only data of a `Listing`.
#[graphql_object(name = "ListingPrivate", context = Context)]
impl Private {
    /// Name of the property owner.
    #[must_use]
    pub fn owner_name(&self) -> Option<OwnerName> {
        self.0.owner_name.clone().map(Into::into)
    }

    /// Phone of the property owner.
    #[must_use]
    pub fn owner_phone(&self) -> Option<Phone> {
        self.0.owner_phone.clone().map(Into::into)
    }

    /// Number of the same listing on an external listing platform.
    #[must_use]
    pub fn external_num(&self) -> Option<ExternalNum> {
        self.0.external_num.map(Into::into)
    }

    /// `Date` of the external listing.
    #[must_use]
    pub fn external_date(&self) -> Option<Date> {
        self.0.external_date
    }

    /// Free-text admin note.
    #[must_use]
    pub fn note(&self) -> Option<Note> {
        self.0.note.clone().map(Into::into)
    }

    /// Indicator whether the `Listing` is hidden from guests.
    #[must_use]
    pub fn hidden(&self) -> bool {
        self.0.hidden
    }
}

define_error! {
    enum ListingError {
        #[code = "LISTING_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Listing` with the provided number doesn't exist"]
        NotExists,
    }
}

#[cfg(test)]
mod spec {
    use service::domain::listing;

    use super::Kind;

    #[test]
    fn kinds_map_both_ways() {
        for kind in listing::Kind::ALL.iter().copied() {
            assert_eq!(listing::Kind::from(Kind::from(kind)), kind);
        }
    }
}
