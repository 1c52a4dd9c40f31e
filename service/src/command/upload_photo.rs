//! [`Command`] for uploading a photo of a [`Listing`].

use common::{operations::Insert, DateTime};
use derive_more::{Debug, Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::listing::{self, photo::FileName, PhotoUrl},
    infra::{storage, Storage},
    Service,
};
#[cfg(doc)]
use crate::{domain::Listing, Config};

use super::Command;

/// [`Command`] for storing a photo file and returning its public
/// [`PhotoUrl`].
#[derive(Clone, Debug)]
pub struct UploadPhoto {
    /// [`listing::Id`] of the [`Listing`] the photo belongs to, if it exists
    /// already.
    pub listing: Option<listing::Id>,

    /// MIME type of the photo file.
    pub content_type: String,

    /// Original name of the photo file.
    pub file_name: String,

    /// Content of the photo file.
    #[debug(skip)]
    pub bytes: Vec<u8>,
}

impl<Db, Kv, St> Command<UploadPhoto> for Service<Db, Kv, St>
where
    St: Storage<
        Insert<storage::Upload>,
        Ok = PhotoUrl,
        Err = Traced<storage::Error>,
    >,
{
    type Ok = PhotoUrl;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UploadPhoto) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UploadPhoto {
            listing,
            content_type,
            file_name,
            bytes,
        } = cmd;

        if !content_type.starts_with("image/") {
            return Err(tracerr::new!(E::NotImage(content_type)));
        }
        let max = self.config().max_upload_size;
        if bytes.len() > max {
            return Err(tracerr::new!(E::TooLarge { max }));
        }

        let name = FileName::generate(listing, &file_name, DateTime::now());
        let size = bytes.len();
        let url = self
            .storage()
            .execute(Insert(storage::Upload { name, bytes }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tracing::info!(%url, size, "photo uploaded");

        Ok(url)
    }
}

/// Error of [`UploadPhoto`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Uploaded file is not an image.
    #[display("Only image files are accepted, got `{_0}`")]
    #[from(ignore)]
    NotImage(#[error(not(source))] String),

    /// Uploaded file exceeds the size limit.
    #[display("File exceeds the size limit of {max} bytes")]
    #[from(ignore)]
    TooLarge {
        /// Maximum allowed size, in bytes.
        max: usize,
    },

    /// [`Storage`] error.
    #[display("Failed to store the photo: {_0}")]
    Storage(storage::Error),
}

#[cfg(test)]
mod spec {
    use super::{ExecutionError, UploadPhoto};
    use crate::{domain::listing::Id, test, Command as _};

    fn upload(content_type: &str, size: usize) -> UploadPhoto {
        UploadPhoto {
            listing: Some(Id::from(7)),
            content_type: content_type.into(),
            file_name: "DSC_0042.JPG".into(),
            bytes: vec![0; size],
        }
    }

    #[tokio::test]
    async fn stores_images_under_generated_names() {
        let svc = test::service();

        let url = svc
            .execute(upload("image/jpeg", 1024))
            .await
            .expect("uploaded");

        assert!(url.last_segment().starts_with("7_"));
        assert!(url.last_segment().ends_with(".jpg"));
        assert!(svc.storage().contains(&url));
    }

    #[tokio::test]
    async fn rejects_non_images() {
        let svc = test::service();

        let err = svc
            .execute(upload("application/pdf", 10))
            .await
            .expect_err("not an image");

        assert!(matches!(err.as_ref(), ExecutionError::NotImage(_)));
        assert_eq!(svc.storage().len(), 0);
    }

    #[tokio::test]
    async fn rejects_oversized_files() {
        let svc = test::service();
        let max = svc.config().max_upload_size;

        drop(svc.execute(upload("image/png", max)).await.expect("fits"));
        let err = svc
            .execute(upload("image/png", max + 1))
            .await
            .expect_err("too large");

        assert!(matches!(err.as_ref(), ExecutionError::TooLarge { .. }));
        assert_eq!(svc.storage().len(), 1);
    }
}
