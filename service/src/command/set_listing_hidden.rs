//! [`Command`] for hiding a [`Listing`] from guests, or revealing it.

use tracerr::Traced;

use crate::{
    domain::{listing, Listing},
    Service,
};

use super::{update_listing, Command, UpdateListing};

/// [`Command`] for toggling visibility of a [`Listing`] to guests.
#[derive(Clone, Copy, Debug)]
pub struct SetListingHidden {
    /// [`listing::Id`] of the [`Listing`] to toggle.
    pub id: listing::Id,

    /// Whether the [`Listing`] should be hidden.
    pub hidden: bool,
}

impl<Db, Kv, St> Command<SetListingHidden> for Service<Db, Kv, St>
where
    Self: Command<
        UpdateListing,
        Ok = Listing,
        Err = Traced<update_listing::ExecutionError>,
    >,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SetListingHidden,
    ) -> Result<Self::Ok, Self::Err> {
        let SetListingHidden { id, hidden } = cmd;

        self.execute(UpdateListing {
            id,
            patch: update_listing::Patch {
                hidden: Some(hidden),
                ..update_listing::Patch::default()
            },
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

/// Error of [`SetListingHidden`] [`Command`] execution.
pub type ExecutionError = update_listing::ExecutionError;

#[cfg(test)]
mod spec {
    use super::SetListingHidden;
    use crate::{
        command::{create_listing::fixture::draft, CreateListing},
        domain::listing::Kind,
        test, Command as _,
    };

    #[tokio::test]
    async fn toggles_visibility() {
        let svc = test::service();
        let created = svc
            .execute(CreateListing::from(draft(Kind::VineyardPlot, 5)))
            .await
            .expect("created");
        assert!(!created.is_hidden());

        let hidden = svc
            .execute(SetListingHidden {
                id: created.id,
                hidden: true,
            })
            .await
            .expect("hidden");
        assert!(hidden.is_hidden());

        let shown = svc
            .execute(SetListingHidden {
                id: created.id,
                hidden: false,
            })
            .await
            .expect("shown");
        assert!(!shown.is_hidden());
    }
}
