//! [`Command`] for deleting a [`Listing`].

use common::operations::{By, Delete, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        listing::{self, photo::FileName, PhotoUrl},
        Listing,
    },
    infra::{database, storage, Database, Storage},
    Service,
};

use super::{Command, DeleteListingPhoto};

/// [`Command`] for deleting a [`Listing`] along with its photos.
///
/// The [`Listing`] is removed first, so a failure to delete some of its
/// photos leaves only orphaned files behind.
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteListing {
    /// [`listing::Id`] of the [`Listing`] to delete.
    pub id: listing::Id,
}

impl<Db, Kv, St> Command<DeleteListing> for Service<Db, Kv, St>
where
    Db: Database<
        Delete<By<Option<Listing>, listing::Id>>,
        Ok = Option<Listing>,
        Err = Traced<database::Error>,
    >,
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
        cmd: DeleteListing,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteListing { id } = cmd;

        let listing = self
            .database()
            .execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| tracerr::new!(E::NotFound(id)))?;

        tracing::info!(%id, "listing deleted");

        for url in listing.photos.as_slice() {
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

/// Error of [`DeleteListing`] [`Command`] execution.
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
    use super::{DeleteListing, ExecutionError};
    use crate::{
        command::{create_listing::fixture::draft, CreateListing, UploadPhoto},
        domain::listing::{Id, Kind, PhotoUrl, Photos},
        test, Command as _,
    };

    #[tokio::test]
    async fn removes_listing_with_its_photos() {
        let svc = test::service();
        let url = svc
            .execute(UploadPhoto {
                listing: None,
                content_type: "image/webp".into(),
                file_name: "front.webp".into(),
                bytes: vec![1; 8],
            })
            .await
            .expect("uploaded");
        let foreign = PhotoUrl::new("https://elsewhere.example/x.jpg")
            .expect("valid URL");
        let mut d = draft(Kind::RentalApartment, 15_000);
        d.photos = Photos::new([url.clone(), foreign]);
        let created = svc
            .execute(CreateListing::from(d))
            .await
            .expect("created");

        let deleted = svc
            .execute(DeleteListing::from(created.id))
            .await
            .expect("deleted");

        assert_eq!(deleted.id, created.id);
        assert!(svc.database().listings().is_empty());
        assert!(!svc.storage().contains(&url));
    }

    #[tokio::test]
    async fn fails_on_unknown_listing() {
        let svc = test::service();

        let err = svc
            .execute(DeleteListing::from(Id::from(1)))
            .await
            .expect_err("no such listing");

        assert!(matches!(err.as_ref(), ExecutionError::NotFound(_)));
    }
}
