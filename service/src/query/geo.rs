//! [`Query`] of administrative divisions.

use std::sync::Arc;

use common::operations::{By, Select};
use derive_more::From;
use tracerr::Traced;

use crate::{
    infra::{
        geo::{self, Place, Scope},
        Geo as _,
    },
    Service,
};

use super::Query;

/// [`Query`] of the [`Place`]s within a [`Scope`].
#[derive(Clone, Copy, Debug, From)]
pub struct Places(pub Scope);

impl<Db, Kv, St> Query<Places> for Service<Db, Kv, St> {
    type Ok = Arc<Vec<Place>>;
    type Err = Traced<geo::Error>;

    async fn execute(
        &self,
        Places(scope): Places,
    ) -> Result<Self::Ok, Self::Err> {
        self.geo()
            .execute(Select(By::new(scope)))
            .await
            .map_err(tracerr::wrap!())
    }
}
