//! In-memory [`Database`] and [`KeyValue`] store, used in tests.

use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex, MutexGuard},
};

use common::operations::{By, Commit, Delete, Insert, Select, Transact, Update};
use tracerr::Traced;

use crate::{
    domain::{
        listing::{self, Draft},
        preferences,
        user::Role,
        Listing, Preferences,
    },
    infra::{database, Database, KeyValue},
};

/// In-memory [`Database`] and [`KeyValue`] store.
///
/// Writes are visible immediately, so [`Transact`] and [`Commit`] do
/// nothing.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// Shared state of this [`Memory`] store.
    state: Arc<Mutex<State>>,
}

/// State of a [`Memory`] store.
#[derive(Debug, Default)]
struct State {
    /// Stored [`Listing`]s.
    listings: BTreeMap<listing::Id, Listing>,

    /// Last assigned [`listing::Id`] value.
    last_id: i64,

    /// Stored [`Preferences`] JSON values.
    preferences: HashMap<preferences::Key, serde_json::Value>,
}

impl Memory {
    /// Locks the [`State`] of this [`Memory`] store.
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("poisoned")
    }

    /// Returns all the stored [`Listing`]s with their [`listing::Private`]
    /// data, oldest first.
    pub fn listings(&self) -> Vec<Listing> {
        self.state().listings.values().cloned().collect()
    }

    /// Stores the provided raw `value` under the given `key`.
    pub fn put_raw(&self, key: preferences::Key, value: serde_json::Value) {
        drop(self.state().preferences.insert(key, value));
    }
}

/// Returns the [`Listing`] as visible to the provided [`Role`].
fn visible_to(role: Role, listing: &Listing) -> Option<Listing> {
    if role.is_admin() {
        return Some(listing.clone());
    }
    (!listing.is_hidden()).then(|| Listing {
        private: None,
        ..listing.clone()
    })
}

impl Database<Select<By<Vec<Listing>, Role>>> for Memory {
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Listing>, Role>>,
    ) -> Result<Self::Ok, Self::Err> {
        let role = by.into_inner();
        let mut listings = self
            .state()
            .listings
            .values()
            .filter_map(|l| visible_to(role, l))
            .collect::<Vec<_>>();
        listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listings)
    }
}

impl Database<Select<By<Option<Listing>, (listing::Id, Role)>>> for Memory {
    type Ok = Option<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, (listing::Id, Role)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (id, role) = by.into_inner();
        Ok(self
            .state()
            .listings
            .get(&id)
            .and_then(|l| visible_to(role, l)))
    }
}

impl Database<Insert<Draft>> for Memory {
    type Ok = Listing;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state();
        state.last_id += 1;
        let listing = draft.into_listing(listing::Id::from(state.last_id));
        drop(state.listings.insert(listing.id, listing.clone()));
        Ok(listing)
    }
}

impl Database<Update<Listing>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(mut listing): Update<Listing>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state();
        let Some(stored) = state.listings.get_mut(&listing.id) else {
            return Ok(());
        };
        listing.created_at = stored.created_at;
        if listing.private.is_none() {
            listing.private.clone_from(&stored.private);
        }
        *stored = listing;
        Ok(())
    }
}

impl Database<Delete<By<Option<Listing>, listing::Id>>> for Memory {
    type Ok = Option<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Option<Listing>, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.state().listings.remove(&by.into_inner()))
    }
}

impl Database<Transact> for Memory {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(self.clone())
    }
}

impl Database<Commit> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        Ok(())
    }
}

impl KeyValue<Select<By<Option<Preferences>, preferences::Key>>> for Memory {
    type Ok = Option<Preferences>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Preferences>, preferences::Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .state()
            .preferences
            .get(&by.into_inner())
            .cloned()
            .map(Preferences::decode))
    }
}

impl KeyValue<Insert<(preferences::Key, Preferences)>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert((key, prefs)): Insert<(preferences::Key, Preferences)>,
    ) -> Result<Self::Ok, Self::Err> {
        self.put_raw(key, prefs.encode());
        Ok(())
    }
}
