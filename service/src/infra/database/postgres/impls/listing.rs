//! [`Listing`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        listing::{self, Amenities, Draft, Land, Location, Private, Residence},
        user::Role,
        Listing,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Columns readable by anyone.
macro_rules! public_columns {
    () => {
        "id, kind, title, description, price, area, \
         province, district, neighborhood, \
         block_num, parcel_num, \
         rooms, building_age, floor, num_floors, heating, num_bathrooms, \
         maintenance_fee, balcony, elevator, furnished, \
         photos, created_at"
    };
}

/// Columns readable by an admin only.
macro_rules! private_columns {
    () => {
        "owner_name, owner_phone, external_num, external_date, note, hidden"
    };
}

/// Reads a [`Listing`] out of the provided [`Row`], along with its
/// [`Private`] data if the [`Row`] carries it.
fn listing_from_row(row: &Row, private: bool) -> Listing {
    let count = |column: &str| {
        row.get::<_, Option<i16>>(column)
            .and_then(|n| u16::try_from(n).ok())
    };

    Listing {
        id: row.get("id"),
        kind: row.get("kind"),
        title: row.get("title"),
        description: row.get("description"),
        price: row.get("price"),
        area: row.get("area"),
        location: Location {
            province: row.get("province"),
            district: row.get("district"),
            neighborhood: row.get("neighborhood"),
        },
        land: Land {
            block: row.get("block_num"),
            parcel: row.get("parcel_num"),
        },
        residence: Residence {
            rooms: row.get("rooms"),
            building_age: row.get("building_age"),
            floor: row.get("floor"),
            num_floors: count("num_floors"),
            heating: row.get("heating"),
            num_bathrooms: count("num_bathrooms"),
            maintenance_fee: row.get("maintenance_fee"),
            amenities: Amenities {
                balcony: row.get("balcony"),
                elevator: row.get("elevator"),
                furnished: row.get("furnished"),
            },
        },
        photos: row.get("photos"),
        private: private.then(|| Private {
            owner_name: row.get("owner_name"),
            owner_phone: row.get("owner_phone"),
            external_num: row.get("external_num"),
            external_date: row.get("external_date"),
            note: row.get("note"),
            hidden: row.get("hidden"),
        }),
        created_at: row.get("created_at"),
    }
}

/// Converts the provided count into an `INT2` column value.
fn count_to_sql(n: Option<u16>) -> Option<i16> {
    n.map(|n| i16::try_from(n).unwrap_or(i16::MAX))
}

impl<C> Database<Select<By<Vec<Listing>, Role>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Listing>, Role>>,
    ) -> Result<Self::Ok, Self::Err> {
        let role = by.into_inner();

        let rows = if role.is_admin() {
            const SQL: &str = concat!(
                "SELECT ",
                public_columns!(),
                ", ",
                private_columns!(),
                " FROM listings \
                  ORDER BY created_at DESC",
            );
            self.query(SQL, &[]).await
        } else {
            const SQL: &str = concat!(
                "SELECT ",
                public_columns!(),
                " FROM listings \
                  WHERE hidden = false \
                  ORDER BY created_at DESC",
            );
            self.query(SQL, &[]).await
        }
        .map_err(tracerr::wrap!())?;

        Ok(rows
            .iter()
            .map(|row| listing_from_row(row, role.is_admin()))
            .collect())
    }
}

impl<C> Database<Select<By<Option<Listing>, (listing::Id, Role)>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, (listing::Id, Role)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (id, role) = by.into_inner();

        let row = if role.is_admin() {
            const SQL: &str = concat!(
                "SELECT ",
                public_columns!(),
                ", ",
                private_columns!(),
                " FROM listings \
                  WHERE id = $1::INT8",
            );
            self.query_opt(SQL, &[&id]).await
        } else {
            const SQL: &str = concat!(
                "SELECT ",
                public_columns!(),
                " FROM listings \
                  WHERE id = $1::INT8 \
                    AND hidden = false",
            );
            self.query_opt(SQL, &[&id]).await
        }
        .map_err(tracerr::wrap!())?;

        Ok(row.map(|row| listing_from_row(&row, role.is_admin())))
    }
}

impl<C> Database<Insert<Draft>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Listing;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            INSERT INTO listings (\
                kind, title, description, price, area, \
                province, district, neighborhood, \
                block_num, parcel_num, \
                rooms, building_age, floor, num_floors, heating, \
                num_bathrooms, maintenance_fee, \
                balcony, elevator, furnished, \
                photos, \
                owner_name, owner_phone, external_num, external_date, note, \
                hidden, \
                created_at \
            ) VALUES (\
                $1::INT2, $2::VARCHAR, $3::TEXT, $4::INT8, $5::INT4, \
                $6::VARCHAR, $7::VARCHAR, $8::VARCHAR, \
                $9::INT4, $10::INT4, \
                $11::VARCHAR, $12::VARCHAR, $13::VARCHAR, $14::INT2, \
                $15::VARCHAR, \
                $16::INT2, $17::INT8, \
                $18::BOOL, $19::BOOL, $20::BOOL, \
                $21::TEXT, \
                $22::VARCHAR, $23::VARCHAR, $24::INT8, $25::DATE, $26::TEXT, \
                $27::BOOL, \
                $28::TIMESTAMPTZ \
            ) \
            RETURNING id";
        let Draft {
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
        } = &draft;
        let num_floors = count_to_sql(residence.num_floors);
        let num_bathrooms = count_to_sql(residence.num_bathrooms);
        let row = self
            .query_opt(
                SQL,
                &[
                    kind,
                    title,
                    description,
                    price,
                    area,
                    &location.province,
                    &location.district,
                    &location.neighborhood,
                    &land.block,
                    &land.parcel,
                    &residence.rooms,
                    &residence.building_age,
                    &residence.floor,
                    &num_floors,
                    &residence.heating,
                    &num_bathrooms,
                    &residence.maintenance_fee,
                    &residence.amenities.balcony,
                    &residence.amenities.elevator,
                    &residence.amenities.furnished,
                    photos,
                    &private.owner_name,
                    &private.owner_phone,
                    &private.external_num,
                    &private.external_date,
                    &private.note,
                    &private.hidden,
                    created_at,
                ],
            )
            .await
            .map_err(tracerr::wrap!())?;
        let id = row
            .ok_or(database::Error::NoRowsReturned)
            .map_err(tracerr::wrap!())?
            .get("id");

        Ok(draft.into_listing(id))
    }
}

impl<C> Database<Update<Listing>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(listing): Update<Listing>,
    ) -> Result<Self::Ok, Self::Err> {
        let Listing {
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
            private,
            created_at: _,
        } = &listing;
        let num_floors = count_to_sql(residence.num_floors);
        let num_bathrooms = count_to_sql(residence.num_bathrooms);

        const SQL: &str = "\
            UPDATE listings \
            SET kind = $2::INT2, \
                title = $3::VARCHAR, \
                description = $4::TEXT, \
                price = $5::INT8, \
                area = $6::INT4, \
                province = $7::VARCHAR, \
                district = $8::VARCHAR, \
                neighborhood = $9::VARCHAR, \
                block_num = $10::INT4, \
                parcel_num = $11::INT4, \
                rooms = $12::VARCHAR, \
                building_age = $13::VARCHAR, \
                floor = $14::VARCHAR, \
                num_floors = $15::INT2, \
                heating = $16::VARCHAR, \
                num_bathrooms = $17::INT2, \
                maintenance_fee = $18::INT8, \
                balcony = $19::BOOL, \
                elevator = $20::BOOL, \
                furnished = $21::BOOL, \
                photos = $22::TEXT \
            WHERE id = $1::INT8";
        _ = self
            .exec(
                SQL,
                &[
                    id,
                    kind,
                    title,
                    description,
                    price,
                    area,
                    &location.province,
                    &location.district,
                    &location.neighborhood,
                    &land.block,
                    &land.parcel,
                    &residence.rooms,
                    &residence.building_age,
                    &residence.floor,
                    &num_floors,
                    &residence.heating,
                    &num_bathrooms,
                    &residence.maintenance_fee,
                    &residence.amenities.balcony,
                    &residence.amenities.elevator,
                    &residence.amenities.furnished,
                    photos,
                ],
            )
            .await
            .map_err(tracerr::wrap!())?;

        // `Listing`s read by guests carry no `Private` data to overwrite with.
        let Some(private) = private else {
            return Ok(());
        };
        const PRIVATE_SQL: &str = "\
            UPDATE listings \
            SET owner_name = $2::VARCHAR, \
                owner_phone = $3::VARCHAR, \
                external_num = $4::INT8, \
                external_date = $5::DATE, \
                note = $6::TEXT, \
                hidden = $7::BOOL \
            WHERE id = $1::INT8";
        self.exec(
            PRIVATE_SQL,
            &[
                id,
                &private.owner_name,
                &private.owner_phone,
                &private.external_num,
                &private.external_date,
                &private.note,
                &private.hidden,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Option<Listing>, listing::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Option<Listing>, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: listing::Id = by.into_inner();

        const SQL: &str = concat!(
            "DELETE FROM listings \
             WHERE id = $1::INT8 \
             RETURNING ",
            public_columns!(),
            ", ",
            private_columns!(),
        );
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| listing_from_row(&row, true)))
    }
}
