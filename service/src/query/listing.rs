//! [`Query`] collection related to a single [`Listing`].

use common::operations::By;

use crate::domain::{listing, user::Role, Listing};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Listing`] by its [`listing::Id`], as visible to the provided
/// [`Role`].
pub type ByNumber = DatabaseQuery<By<Option<Listing>, (listing::Id, Role)>>;

#[cfg(test)]
mod spec {
    use super::ByNumber;
    use crate::{
        command::{
            create_listing::fixture::draft, CreateListing, SetListingHidden,
        },
        domain::{listing::Kind, user::Role},
        test, Command as _, Query as _,
    };

    #[tokio::test]
    async fn hidden_listing_is_visible_to_admin_only() {
        let svc = test::service();
        let created = svc
            .execute(CreateListing::from(draft(Kind::LandPlot, 42)))
            .await
            .expect("created");
        drop(
            svc.execute(SetListingHidden {
                id: created.id,
                hidden: true,
            })
            .await
            .expect("hidden"),
        );

        let as_guest = svc
            .execute(ByNumber::by((created.id, Role::Guest)))
            .await
            .expect("no error");
        assert!(as_guest.is_none());

        let as_admin = svc
            .execute(ByNumber::by((created.id, Role::Admin)))
            .await
            .expect("no error")
            .expect("visible");
        assert!(as_admin.is_hidden());
    }

    #[tokio::test]
    async fn guests_never_see_private_data() {
        let svc = test::service();
        let created = svc
            .execute(CreateListing::from(draft(Kind::LandShare, 42)))
            .await
            .expect("created");

        let as_guest = svc
            .execute(ByNumber::by((created.id, Role::Guest)))
            .await
            .expect("no error")
            .expect("visible");
        assert!(as_guest.private.is_none());
    }
}
