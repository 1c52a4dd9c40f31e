//! [`Query`] of saved [`Preferences`].

use common::operations::{By, Select};
use derive_more::From;
use tracerr::Traced;

use crate::{
    domain::{preferences, Preferences},
    infra::{database, KeyValue},
    Service,
};

use super::Query;

/// [`Query`] of the [`Preferences`] saved under a [`preferences::Key`].
///
/// Yields [`Preferences::default()`] if nothing usable is saved.
#[derive(Clone, Debug, From)]
pub struct ByKey(pub preferences::Key);

impl<Db, Kv, St> Query<ByKey> for Service<Db, Kv, St>
where
    Kv: KeyValue<
        Select<By<Option<Preferences>, preferences::Key>>,
        Ok = Option<Preferences>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Preferences;
    type Err = Traced<database::Error>;

    async fn execute(&self, ByKey(key): ByKey) -> Result<Self::Ok, Self::Err> {
        self.kv()
            .execute(Select(By::new(key)))
            .await
            .map(Option::unwrap_or_default)
            .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use super::ByKey;
    use crate::{
        command::SavePreferences,
        domain::{preferences::Key, Preferences},
        read::listing::SortKey,
        test, Command as _, Query as _,
    };

    fn key() -> Key {
        Key::new("client-1").expect("valid key")
    }

    #[tokio::test]
    async fn restores_saved_preferences() {
        let svc = test::service();
        let prefs = Preferences {
            sort: SortKey::PriceAsc,
            page: 3,
            scroll_position: 640,
            ..Preferences::default()
        };

        svc.execute(SavePreferences {
            key: key(),
            preferences: prefs.clone(),
        })
        .await
        .expect("saved");
        let restored = svc.execute(ByKey(key())).await.expect("restored");

        assert_eq!(restored, prefs);
    }

    #[tokio::test]
    async fn defaults_when_nothing_saved() {
        let svc = test::service();

        let restored = svc.execute(ByKey(key())).await.expect("restored");

        assert_eq!(restored, Preferences::default());
    }

    #[tokio::test]
    async fn discards_outdated_preferences() {
        let svc = test::service();
        svc.database().put_raw(
            key(),
            json!({ "version": 0, "sort": "priceAsc", "page": 4 }),
        );

        let restored = svc.execute(ByKey(key())).await.expect("restored");

        assert_eq!(restored, Preferences::default());
    }
}
