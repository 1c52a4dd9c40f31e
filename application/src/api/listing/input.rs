//! Input objects of [`Listing`] mutations.
//!
//! [`Listing`]: super::Listing

use common::{Date, DateTime, Field};
use juniper::{GraphQLInputObject, Nullable};
use service::{command::update_listing, domain::listing};

use super::{
    Area, BlockNum, BuildingAge, Count, Description, District, ExternalNum,
    FloorLabel, Heating, Kind, Neighborhood, Note, OwnerName, ParcelNum,
    Phone, PhotoUrl, Price, Province, RoomLayout, Title,
};

/// Data of a new `Listing`.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "ListingInput")]
pub struct Input {
    /// Kind of the property.
    pub kind: Kind,

    /// Title of the `Listing`.
    pub title: Title,

    /// Description of the `Listing`.
    pub description: Option<Description>,

    /// Asking price.
    pub price: Price,

    /// Area of the property.
    pub area: Option<Area>,

    /// Province the property is located in.
    pub province: Option<Province>,

    /// District the property is located in.
    pub district: Option<District>,

    /// Neighborhood the property is located in.
    pub neighborhood: Option<Neighborhood>,

    /// Cadastral block number of a land.
    pub block_num: Option<BlockNum>,

    /// Cadastral parcel number of a land.
    pub parcel_num: Option<ParcelNum>,

    /// Room layout of an apartment.
    pub rooms: Option<RoomLayout>,

    /// Age bracket of the building.
    pub building_age: Option<BuildingAge>,

    /// Floor the apartment is located on.
    pub floor: Option<FloorLabel>,

    /// Number of floors in the building.
    pub num_floors: Option<Count>,

    /// Heating type of the apartment.
    pub heating: Option<Heating>,

    /// Number of bathrooms.
    pub num_bathrooms: Option<Count>,

    /// Monthly maintenance fee.
    pub maintenance_fee: Option<Price>,

    /// Indicator whether the apartment has a balcony.
    pub balcony: Option<bool>,

    /// Indicator whether the building has an elevator.
    pub elevator: Option<bool>,

    /// Indicator whether the apartment is furnished.
    pub furnished: Option<bool>,

    /// Ordered photos, the cover one first.
    pub photos: Option<Vec<PhotoUrl>>,

    /// Name of the property owner.
    pub owner_name: Option<OwnerName>,

    /// Phone of the property owner.
    pub owner_phone: Option<Phone>,

    /// Number of the same listing on an external listing platform.
    pub external_num: Option<ExternalNum>,

    /// `Date` of the external listing.
    pub external_date: Option<Date>,

    /// Free-text admin note.
    pub note: Option<Note>,

    /// Indicator whether the `Listing` is hidden from guests.
    pub hidden: Option<bool>,
}

impl From<Input> for listing::Draft {
    fn from(input: Input) -> Self {
        let Input {
            kind,
            title,
            description,
            price,
            area,
            province,
            district,
            neighborhood,
            block_num,
            parcel_num,
            rooms,
            building_age,
            floor,
            num_floors,
            heating,
            num_bathrooms,
            maintenance_fee,
            balcony,
            elevator,
            furnished,
            photos,
            owner_name,
            owner_phone,
            external_num,
            external_date,
            note,
            hidden,
        } = input;

        Self {
            kind: kind.into(),
            title: title.0,
            description: description.map(|d| d.0),
            price: price.0,
            area: area.map(|a| a.0),
            location: listing::Location {
                province: province.map(|p| p.0),
                district: district.map(|d| d.0),
                neighborhood: neighborhood.map(|n| n.0),
            },
            land: listing::Land {
                block: block_num.map(|b| b.0),
                parcel: parcel_num.map(|p| p.0),
            },
            residence: listing::Residence {
                rooms: rooms.map(|r| r.0),
                building_age: building_age.map(|a| a.0),
                floor: floor.map(|f| f.0),
                num_floors: num_floors.map(|c| c.0),
                heating: heating.map(|h| h.0),
                num_bathrooms: num_bathrooms.map(|c| c.0),
                maintenance_fee: maintenance_fee.map(|p| p.0),
                amenities: listing::Amenities {
                    balcony: balcony.unwrap_or_default(),
                    elevator: elevator.unwrap_or_default(),
                    furnished: furnished.unwrap_or_default(),
                },
            },
            photos: listing::Photos::new(
                photos.into_iter().flatten().map(|p| p.0),
            ),
            private: listing::Private {
                owner_name: owner_name.map(|n| n.0),
                owner_phone: owner_phone.map(|p| p.0),
                external_num: external_num.map(|n| n.0),
                external_date,
                note: note.map(|n| n.0),
                hidden: hidden.unwrap_or_default(),
            },
            created_at: DateTime::now().coerce(),
        }
    }
}

/// Partial update of a `Listing`.
///
/// Omitted fields are left intact, while the ones explicitly set to `null`
/// are cleared.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
#[graphql(name = "ListingPatch")]
pub struct Patch {
    /// New kind of the property.
    pub kind: Option<Kind>,

    /// New title.
    pub title: Option<Title>,

    /// New description.
    pub description: Nullable<Description>,

    /// New asking price.
    pub price: Option<Price>,

    /// New area of the property.
    pub area: Nullable<Area>,

    /// New province.
    pub province: Nullable<Province>,

    /// New district.
    pub district: Nullable<District>,

    /// New neighborhood.
    pub neighborhood: Nullable<Neighborhood>,

    /// New cadastral block number.
    pub block_num: Nullable<BlockNum>,

    /// New cadastral parcel number.
    pub parcel_num: Nullable<ParcelNum>,

    /// New room layout.
    pub rooms: Nullable<RoomLayout>,

    /// New building age bracket.
    pub building_age: Nullable<BuildingAge>,

    /// New floor.
    pub floor: Nullable<FloorLabel>,

    /// New number of floors in the building.
    pub num_floors: Nullable<Count>,

    /// New heating type.
    pub heating: Nullable<Heating>,

    /// New number of bathrooms.
    pub num_bathrooms: Nullable<Count>,

    /// New monthly maintenance fee.
    pub maintenance_fee: Nullable<Price>,

    /// New balcony indicator.
    pub balcony: Option<bool>,

    /// New elevator indicator.
    pub elevator: Option<bool>,

    /// New furnished indicator.
    pub furnished: Option<bool>,

    /// New ordered photos, replacing the current ones.
    pub photos: Option<Vec<PhotoUrl>>,

    /// New owner name.
    pub owner_name: Nullable<OwnerName>,

    /// New owner phone.
    pub owner_phone: Nullable<Phone>,

    /// New external listing number.
    pub external_num: Nullable<ExternalNum>,

    /// New external listing `Date`.
    pub external_date: Nullable<Date>,

    /// New admin note.
    pub note: Nullable<Note>,

    /// New hidden indicator.
    pub hidden: Option<bool>,
}

/// Converts a [`Nullable`] input into an optional [`Field`] update.
fn field<T, U>(value: Nullable<T>, f: impl FnOnce(T) -> U) -> Option<Field<U>> {
    value.explicit().map(|v| Field::from(v).map(f))
}

impl From<Patch> for update_listing::Patch {
    fn from(patch: Patch) -> Self {
        let Patch {
            kind,
            title,
            description,
            price,
            area,
            province,
            district,
            neighborhood,
            block_num,
            parcel_num,
            rooms,
            building_age,
            floor,
            num_floors,
            heating,
            num_bathrooms,
            maintenance_fee,
            balcony,
            elevator,
            furnished,
            photos,
            owner_name,
            owner_phone,
            external_num,
            external_date,
            note,
            hidden,
        } = patch;

        Self {
            kind: kind.map(Into::into),
            title: title.map(|t| t.0),
            description: field(description, |d| d.0),
            price: price.map(|p| p.0),
            area: field(area, |a| a.0),
            province: field(province, |p| p.0),
            district: field(district, |d| d.0),
            neighborhood: field(neighborhood, |n| n.0),
            block: field(block_num, |b| b.0),
            parcel: field(parcel_num, |p| p.0),
            rooms: field(rooms, |r| r.0),
            building_age: field(building_age, |a| a.0),
            floor: field(floor, |f| f.0),
            num_floors: field(num_floors, |c| c.0),
            heating: field(heating, |h| h.0),
            num_bathrooms: field(num_bathrooms, |c| c.0),
            maintenance_fee: field(maintenance_fee, |p| p.0),
            balcony,
            elevator,
            furnished,
            photos: photos
                .map(|urls| listing::Photos::new(urls.into_iter().map(|u| u.0))),
            owner_name: field(owner_name, |n| n.0),
            owner_phone: field(owner_phone, |p| p.0),
            external_num: field(external_num, |n| n.0),
            external_date: field(external_date, |d| d),
            note: field(note, |n| n.0),
            hidden,
        }
    }
}

#[cfg(test)]
mod spec {
    use common::Field;
    use juniper::Nullable;
    use service::{command::update_listing, domain::listing};

    use super::{Area, Patch};

    #[test]
    fn distinguishes_omitted_and_cleared_fields() {
        let patch = update_listing::Patch::from(Patch {
            area: Nullable::ExplicitNull,
            note: Nullable::ImplicitNull,
            num_floors: Nullable::Some(super::Count(4)),
            ..Patch::default()
        });

        assert_eq!(patch.area, Some(Field::Unset));
        assert_eq!(patch.note, None);
        assert_eq!(patch.num_floors, Some(Field::Value(4)));
        assert!(patch.title.is_none());

        let patch = update_listing::Patch::from(Patch {
            area: Nullable::Some(Area(listing::Area::new(90).expect("valid"))),
            ..Patch::default()
        });
        assert_eq!(
            patch.area,
            Some(Field::Value(listing::Area::new(90).expect("valid"))),
        );
    }
}
