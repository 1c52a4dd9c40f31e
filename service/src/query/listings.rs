//! [`Query`] collection related to the multiple [`Listing`]s.

use common::{
    operations::{By, Select},
    pagination,
};
use tracerr::Traced;

use crate::{
    domain::{user::Role, Listing},
    infra::{database, Database},
    read::listing::{self as read, Filter, SortKey},
    Service,
};

use super::Query;

/// [`Query`] of a [`read::Page`] of [`Listing`]s meeting a [`Filter`].
///
/// Hidden [`Listing`]s and admin-only [`Filter`] criteria are honored for
/// the [`Role::Admin`] only.
#[derive(Clone, Debug)]
pub struct List {
    /// [`Filter`] to apply.
    pub filter: Filter,

    /// [`SortKey`] to order by.
    pub sort: SortKey,

    /// Requested [`pagination::Number`].
    pub page: pagination::Number,

    /// [`Role`] of the reader.
    pub role: Role,
}

impl<Db, Kv, St> Query<List> for Service<Db, Kv, St>
where
    Db: Database<
        Select<By<Vec<Listing>, Role>>,
        Ok = Vec<Listing>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = read::Page;
    type Err = Traced<database::Error>;

    async fn execute(&self, query: List) -> Result<Self::Ok, Self::Err> {
        let List {
            filter,
            sort,
            page,
            role,
        } = query;

        let listings = self
            .database()
            .execute(Select(By::new(role)))
            .await
            .map_err(tracerr::wrap!())?;

        let filter = if role.is_admin() {
            filter
        } else {
            filter.without_admin()
        };
        let args = read::Arguments {
            number: page,
            size: self.config().page_size,
        };
        Ok(read::select(listings, &filter, sort, args))
    }
}
