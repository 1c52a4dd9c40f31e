//! [`Command`] for creating a new [`Listing`].

use common::operations::Insert;
use derive_more::From;
use tracerr::Traced;

use crate::{
    domain::{listing::Draft, Listing},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Listing`] out of its [`Draft`].
#[derive(Clone, Debug, From)]
pub struct CreateListing {
    /// [`Draft`] of a new [`Listing`].
    pub draft: Draft,
}

impl<Db, Kv, St> Command<CreateListing> for Service<Db, Kv, St>
where
    Db: Database<
        Insert<Draft>,
        Ok = Listing,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateListing,
    ) -> Result<Self::Ok, Self::Err> {
        let listing = self
            .database()
            .execute(Insert(cmd.draft))
            .await
            .map_err(tracerr::wrap!())?;

        tracing::info!(id = %listing.id, "listing created");

        Ok(listing)
    }
}

/// Error of [`CreateListing`] [`Command`] execution.
pub type ExecutionError = database::Error;

#[cfg(test)]
pub(crate) mod fixture {
    //! [`Draft`]s for tests.

    use common::DateTime;

    use crate::domain::listing::{
        Draft, Kind, Land, Location, Photos, Price, Private, Residence, Title,
    };

    /// Creates a new [`Draft`] of the provided [`Kind`] and [`Price`].
    pub(crate) fn draft(kind: Kind, price: i64) -> Draft {
        Draft {
            kind,
            title: Title::new(format!("{} for {price}", kind.label()))
                .expect("valid title"),
            description: None,
            price: Price::new(price).expect("valid price"),
            area: None,
            location: Location::default(),
            land: Land::default(),
            residence: Residence::default(),
            photos: Photos::default(),
            private: Private::default(),
            created_at: DateTime::now().coerce(),
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{fixture::draft, CreateListing};
    use crate::{
        domain::listing::Kind,
        test, Command as _,
    };

    #[tokio::test]
    async fn assigns_increasing_numbers() {
        let svc = test::service();

        let first = svc
            .execute(CreateListing::from(draft(Kind::Field, 100)))
            .await
            .expect("created");
        let second = svc
            .execute(CreateListing::from(draft(Kind::LandShare, 200)))
            .await
            .expect("created");

        assert!(second.id > first.id);
        assert_eq!(svc.database().listings().len(), 2);
    }
}
