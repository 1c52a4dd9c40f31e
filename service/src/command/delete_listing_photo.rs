//! [`Command`] for deleting a stored photo.

use common::operations::{By, Delete, Select};
use derive_more::From;
use tracerr::Traced;

use crate::{
    domain::listing::{photo::FileName, PhotoUrl},
    infra::{storage, Storage},
    Service,
};

use super::Command;

/// [`Command`] for deleting a stored photo by its [`PhotoUrl`].
///
/// Returns `false` if the [`PhotoUrl`] doesn't point to a file of the
/// [`Storage`], or the file is already gone.
#[derive(Clone, Debug, From)]
pub struct DeleteListingPhoto {
    /// [`PhotoUrl`] of the photo to delete.
    pub url: PhotoUrl,
}

impl<Db, Kv, St> Command<DeleteListingPhoto> for Service<Db, Kv, St>
where
    St: Storage<
            Select<By<Option<FileName>, PhotoUrl>>,
            Ok = Option<FileName>,
            Err = Traced<storage::Error>,
        > + Storage<Delete<FileName>, Ok = bool, Err = Traced<storage::Error>>,
{
    type Ok = bool;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteListingPhoto,
    ) -> Result<Self::Ok, Self::Err> {
        let DeleteListingPhoto { url } = cmd;

        let Some(name) = self
            .storage()
            .execute(Select(By::new(url.clone())))
            .await
            .map_err(tracerr::wrap!())?
        else {
            tracing::debug!(%url, "not a stored photo, skipping");
            return Ok(false);
        };

        self.storage()
            .execute(Delete(name))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`DeleteListingPhoto`] [`Command`] execution.
pub type ExecutionError = storage::Error;

#[cfg(test)]
mod spec {
    use super::DeleteListingPhoto;
    use crate::{
        command::UploadPhoto, domain::listing::PhotoUrl, test, Command as _,
    };

    #[tokio::test]
    async fn deletes_own_photos_only() {
        let svc = test::service();
        let url = svc
            .execute(UploadPhoto {
                listing: None,
                content_type: "image/png".into(),
                file_name: "a.png".into(),
                bytes: vec![1, 2, 3],
            })
            .await
            .expect("uploaded");

        let foreign = PhotoUrl::new("https://elsewhere.example/a.png")
            .expect("valid URL");
        let deleted = svc
            .execute(DeleteListingPhoto::from(foreign))
            .await
            .expect("no error");
        assert!(!deleted);
        assert_eq!(svc.storage().len(), 1);

        let deleted = svc
            .execute(DeleteListingPhoto::from(url.clone()))
            .await
            .expect("no error");
        assert!(deleted);
        assert!(!svc.storage().contains(&url));

        let deleted = svc
            .execute(DeleteListingPhoto::from(url))
            .await
            .expect("no error");
        assert!(!deleted);
    }

    #[tokio::test]
    async fn deletes_photos_addressed_with_query() {
        let svc = test::service();
        let url = svc
            .execute(UploadPhoto {
                listing: None,
                content_type: "image/jpeg".into(),
                file_name: "a.jpg".into(),
                bytes: vec![1, 2, 3],
            })
            .await
            .expect("uploaded");
        let versioned =
            PhotoUrl::new(format!("{url}?v=2")).expect("valid URL");
        assert_eq!(versioned.last_segment(), url.last_segment());

        let deleted = svc
            .execute(DeleteListingPhoto::from(versioned))
            .await
            .expect("no error");
        assert!(deleted);
        assert!(!svc.storage().contains(&url));
        assert_eq!(svc.storage().len(), 0);
    }
}
