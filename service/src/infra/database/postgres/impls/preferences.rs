//! [`Preferences`]-related [`KeyValue`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{preferences, Preferences},
    infra::{
        database::{self, postgres::Connection, Postgres},
        KeyValue,
    },
};

impl<C> KeyValue<Select<By<Option<Preferences>, preferences::Key>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Preferences>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Preferences>, preferences::Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        let key = by.into_inner();

        const SQL: &str = "\
            SELECT value \
            FROM preferences \
            WHERE key = $1::VARCHAR";
        Ok(self
            .query_opt(SQL, &[&key])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Preferences::decode(row.get("value"))))
    }
}

impl<C> KeyValue<Insert<(preferences::Key, Preferences)>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert((key, prefs)): Insert<(preferences::Key, Preferences)>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            INSERT INTO preferences (key, value, updated_at) \
            VALUES ($1::VARCHAR, $2::JSONB, NOW()) \
            ON CONFLICT (key) DO UPDATE \
            SET value = EXCLUDED.value, \
                updated_at = EXCLUDED.updated_at";
        self.exec(SQL, &[&key, &prefs.encode()])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
