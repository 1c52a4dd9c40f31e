//! [`Command`] for updating an existing [`Listing`].

use common::{
    operations::{By, Commit, Delete, Select, Transact, Transacted, Update},
    Date, Field,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        listing::{
            self, photo::FileName, Area, BlockNum, BuildingAge, Description,
            District, ExternalNum, FloorLabel, Heating, Kind, Neighborhood,
            Note, OwnerName, ParcelNum, Phone, PhotoUrl, Photos, Price,
            Province, RoomLayout, Title,
        },
        user::Role,
        Listing,
    },
    infra::{database, storage, Database, Storage},
    Service,
};

use super::{Command, DeleteListingPhoto};

/// [`Command`] for updating an existing [`Listing`] with a [`Patch`].
///
/// Photos removed from the [`Listing`] by the [`Patch`] are deleted from
/// the [`Storage`] once the update is committed.
#[derive(Clone, Debug)]
pub struct UpdateListing {
    /// [`listing::Id`] of the [`Listing`] to update.
    pub id: listing::Id,

    /// [`Patch`] to apply.
    pub patch: Patch,
}

/// Partial update of a [`Listing`].
///
/// [`None`] leaves the field intact.
#[derive(Clone, Debug, Default)]
pub struct Patch {
    /// New [`Kind`].
    pub kind: Option<Kind>,

    /// New [`Title`].
    pub title: Option<Title>,

    /// New [`Description`].
    pub description: Option<Field<Description>>,

    /// New [`Price`].
    pub price: Option<Price>,

    /// New [`Area`].
    pub area: Option<Field<Area>>,

    /// New [`Province`].
    pub province: Option<Field<Province>>,

    /// New [`District`].
    pub district: Option<Field<District>>,

    /// New [`Neighborhood`].
    pub neighborhood: Option<Field<Neighborhood>>,

    /// New [`BlockNum`].
    pub block: Option<Field<BlockNum>>,

    /// New [`ParcelNum`].
    pub parcel: Option<Field<ParcelNum>>,

    /// New [`RoomLayout`].
    pub rooms: Option<Field<RoomLayout>>,

    /// New [`BuildingAge`].
    pub building_age: Option<Field<BuildingAge>>,

    /// New [`FloorLabel`].
    pub floor: Option<Field<FloorLabel>>,

    /// New number of floors in the building.
    pub num_floors: Option<Field<u16>>,

    /// New [`Heating`].
    pub heating: Option<Field<Heating>>,

    /// New number of bathrooms.
    pub num_bathrooms: Option<Field<u16>>,

    /// New monthly maintenance fee.
    pub maintenance_fee: Option<Field<Price>>,

    /// New balcony indicator.
    pub balcony: Option<bool>,

    /// New elevator indicator.
    pub elevator: Option<bool>,

    /// New furnished indicator.
    pub furnished: Option<bool>,

    /// New ordered [`Photos`].
    pub photos: Option<Photos>,

    /// New [`OwnerName`].
    pub owner_name: Option<Field<OwnerName>>,

    /// New owner [`Phone`].
    pub owner_phone: Option<Field<Phone>>,

    /// New [`ExternalNum`].
    pub external_num: Option<Field<ExternalNum>>,

    /// New external listing [`Date`].
    pub external_date: Option<Field<Date>>,

    /// New admin [`Note`].
    pub note: Option<Field<Note>>,

    /// New hidden indicator.
    pub hidden: Option<bool>,
}

impl Patch {
    /// Applies this [`Patch`] to the provided [`Listing`].
    pub fn apply(self, listing: &mut Listing) {
        fn set<T>(slot: &mut Option<T>, field: Option<Field<T>>) {
            if let Some(field) = field {
                *slot = field.into_option();
            }
        }
        fn put<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        let Self {
            kind,
            title,
            description,
            price,
            area,
            province,
            district,
            neighborhood,
            block,
            parcel,
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
        } = self;

        put(&mut listing.kind, kind);
        put(&mut listing.title, title);
        set(&mut listing.description, description);
        put(&mut listing.price, price);
        set(&mut listing.area, area);
        put(&mut listing.photos, photos);

        let loc = &mut listing.location;
        set(&mut loc.province, province);
        set(&mut loc.district, district);
        set(&mut loc.neighborhood, neighborhood);

        set(&mut listing.land.block, block);
        set(&mut listing.land.parcel, parcel);

        let res = &mut listing.residence;
        set(&mut res.rooms, rooms);
        set(&mut res.building_age, building_age);
        set(&mut res.floor, floor);
        set(&mut res.num_floors, num_floors);
        set(&mut res.heating, heating);
        set(&mut res.num_bathrooms, num_bathrooms);
        set(&mut res.maintenance_fee, maintenance_fee);
        put(&mut res.amenities.balcony, balcony);
        put(&mut res.amenities.elevator, elevator);
        put(&mut res.amenities.furnished, furnished);

        let private = listing.private.get_or_insert_with(Default::default);
        set(&mut private.owner_name, owner_name);
        set(&mut private.owner_phone, owner_phone);
        set(&mut private.external_num, external_num);
        set(&mut private.external_date, external_date);
        set(&mut private.note, note);
        put(&mut private.hidden, hidden);
    }
}

impl<Db, Kv, St> Command<UpdateListing> for Service<Db, Kv, St>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Listing>, (listing::Id, Role)>>,
            Ok = Option<Listing>,
            Err = Traced<database::Error>,
        > + Database<Update<Listing>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
    St: Storage<
            Select<By<Option<FileName>, PhotoUrl>>,
            Ok = Option<FileName>,
            Err = Traced<storage::Error>,
        > + Storage<Delete<FileName>, Ok = bool, Err = Traced<storage::Error>>,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateListing,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateListing { id, patch } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut listing = tx
            .execute(Select(By::new((id, Role::Admin))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| tracerr::new!(E::NotFound(id)))?;
        let before = listing.photos.clone();

        patch.apply(&mut listing);

        tx.execute(Update(listing.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tracing::info!(%id, "listing updated");

        for url in before.removed_in(&listing.photos) {
            // Orphaned files don't affect the catalog, so the update succeeds
            // regardless.
            if let Err(e) = self
                .execute(DeleteListingPhoto { url: url.clone() })
                .await
            {
                tracing::warn!(%id, %url, "failed to delete photo: {e}");
            }
        }

        Ok(listing)
    }
}

/// Error of [`UpdateListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Listing`] with the provided [`listing::Id`] doesn't exist.
    #[display("`Listing(id: {_0})` doesn't exist")]
    #[from(ignore)]
    NotFound(#[error(not(source))] listing::Id),
}

#[cfg(test)]
mod spec {
    use common::Field;

    use super::{ExecutionError, Patch, UpdateListing};
    use crate::{
        command::{create_listing::fixture::draft, CreateListing, UploadPhoto},
        domain::listing::{Area, Id, Kind, Photos, PhotoUrl, Price, Title},
        test, Command as _,
    };

    async fn upload(svc: &test::TestService, id: Id) -> PhotoUrl {
        svc.execute(UploadPhoto {
            listing: Some(id),
            content_type: "image/jpeg".into(),
            file_name: "photo.jpg".into(),
            bytes: vec![0xFF; 16],
        })
        .await
        .expect("uploaded")
    }

    #[tokio::test]
    async fn applies_only_provided_fields() {
        let svc = test::service();
        let mut d = draft(Kind::SaleApartment, 1_000_000);
        d.area = Area::new(120);
        let created = svc
            .execute(CreateListing::from(d))
            .await
            .expect("created");

        let updated = svc
            .execute(UpdateListing {
                id: created.id,
                patch: Patch {
                    title: Title::new("Sea view"),
                    price: Price::new(950_000),
                    area: Some(Field::Unset),
                    balcony: Some(true),
                    ..Patch::default()
                },
            })
            .await
            .expect("updated");

        assert_eq!(AsRef::<str>::as_ref(&updated.title), "Sea view");
        assert_eq!(updated.price, Price::new(950_000).expect("valid"));
        assert_eq!(updated.area, None);
        assert!(updated.residence.amenities.balcony);
        assert_eq!(updated.kind, Kind::SaleApartment);
        assert_eq!(updated.created_at, created.created_at);

        let stored = svc.database().listings();
        assert_eq!(AsRef::<str>::as_ref(&stored[0].title), "Sea view");
    }

    #[tokio::test]
    async fn deletes_removed_photos() {
        let svc = test::service();
        let created = svc
            .execute(CreateListing::from(draft(Kind::Field, 10)))
            .await
            .expect("created");
        let a = upload(&svc, created.id).await;
        let b = upload(&svc, created.id).await;
        drop(
            svc.execute(UpdateListing {
                id: created.id,
                patch: Patch {
                    photos: Some(Photos::new([a.clone(), b.clone()])),
                    ..Patch::default()
                },
            })
            .await
            .expect("updated"),
        );

        let updated = svc
            .execute(UpdateListing {
                id: created.id,
                patch: Patch {
                    photos: Some(Photos::new([b.clone()])),
                    ..Patch::default()
                },
            })
            .await
            .expect("updated");

        assert_eq!(updated.photos.as_slice(), [b.clone()]);
        assert!(!svc.storage().contains(&a));
        assert!(svc.storage().contains(&b));
    }

    #[tokio::test]
    async fn fails_on_unknown_listing() {
        let svc = test::service();

        let err = svc
            .execute(UpdateListing {
                id: Id::from(404),
                patch: Patch::default(),
            })
            .await
            .expect_err("no such listing");

        assert!(matches!(err.as_ref(), ExecutionError::NotFound(_)));
    }
}
