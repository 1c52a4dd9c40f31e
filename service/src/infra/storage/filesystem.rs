//! [`Filesystem`] [`Storage`] implementation.

use std::{
    io,
    path::{Path, PathBuf},
};

use common::operations::{By, Delete, Insert, Select};
use tokio::{fs, io::AsyncWriteExt as _};
use tracerr::Traced;

use crate::{
    domain::listing::{photo::FileName, PhotoUrl},
    infra::storage::{self, BaseUrl, Storage, Upload},
};

/// [`Storage`] keeping photo files in a local directory, served under a
/// public [`BaseUrl`].
#[derive(Clone, Debug)]
pub struct Filesystem {
    /// Directory the files are stored in.
    dir: PathBuf,

    /// [`BaseUrl`] the stored files are served under.
    base_url: BaseUrl,
}

impl Filesystem {
    /// Creates a new [`Filesystem`] [`Storage`] in the provided `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, base_url: BaseUrl) -> Self {
        Self {
            dir: dir.into(),
            base_url,
        }
    }
}

impl Storage<Insert<Upload>> for Filesystem {
    type Ok = PhotoUrl;
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Insert(upload): Insert<Upload>,
    ) -> Result<Self::Ok, Self::Err> {
        use storage::Error as E;

        let Upload { name, bytes } = upload;

        fs::create_dir_all(&self.dir)
            .await
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let path = self.dir.join(AsRef::<str>::as_ref(&name));
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => E::AlreadyExists(name.clone()),
                _ => E::Io(e),
            })
            .map_err(tracerr::wrap!())?;
        let written = async {
            file.write_all(&bytes).await?;
            file.sync_all().await
        }
        .await;
        drop(file);
        keep_or_remove(&path, written)
            .await
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let url = self.base_url.join(&name);
        PhotoUrl::new(url.clone())
            .ok_or(E::InvalidUrl(url))
            .map_err(tracerr::wrap!())
    }
}

/// Removes the file at the provided `path` if it wasn't `written` fully.
async fn keep_or_remove(path: &Path, written: io::Result<()>) -> io::Result<()> {
    if written.is_err() {
        if let Err(e) = fs::remove_file(path).await {
            tracing::warn!(
                path = %path.display(),
                "failed to remove partially written photo: {e}",
            );
        }
    }
    written
}

impl Storage<Delete<FileName>> for Filesystem {
    /// Whether the file existed.
    type Ok = bool;
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Delete(name): Delete<FileName>,
    ) -> Result<Self::Ok, Self::Err> {
        match fs::remove_file(self.dir.join(AsRef::<str>::as_ref(&name))).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(tracerr::new!(storage::Error::Io(e))),
        }
    }
}

impl Storage<Select<By<Option<FileName>, PhotoUrl>>> for Filesystem {
    type Ok = Option<FileName>;
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<FileName>, PhotoUrl>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.base_url.file_name(&by.into_inner()))
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Delete, Insert, Select};

    use super::{keep_or_remove, Filesystem};
    use crate::{
        domain::listing::photo::FileName,
        infra::storage::{BaseUrl, Storage as _, Upload},
    };

    #[tokio::test]
    async fn stores_and_deletes_files() {
        let dir = std::env::temp_dir()
            .join(format!("photos-{}", uuid::Uuid::new_v4().simple()));
        let fs = Filesystem::new(&dir, BaseUrl::new("https://x.test/photos"));
        let name = FileName::new("7_1_abc.jpg").expect("valid name");

        let url = fs
            .execute(Insert(Upload {
                name: name.clone(),
                bytes: vec![1, 2, 3],
            }))
            .await
            .expect("stored");
        assert_eq!(url.to_string(), "https://x.test/photos/7_1_abc.jpg");
        assert_eq!(
            std::fs::read(dir.join("7_1_abc.jpg")).expect("file exists"),
            [1, 2, 3],
        );

        let resolved = fs
            .execute(Select(By::new(url)))
            .await
            .expect("resolved");
        assert_eq!(resolved, Some(name.clone()));

        assert!(fs.execute(Delete(name.clone())).await.expect("deleted"));
        assert!(!fs.execute(Delete(name)).await.expect("already gone"));

        drop(std::fs::remove_dir_all(dir));
    }

    #[tokio::test]
    async fn removes_partially_written_files() {
        let dir = std::env::temp_dir()
            .join(format!("photos-{}", uuid::Uuid::new_v4().simple()));
        std::fs::create_dir_all(&dir).expect("dir created");
        let path = dir.join("7_1_abc.jpg");

        std::fs::write(&path, [1]).expect("written");
        keep_or_remove(&path, Ok(())).await.expect("kept");
        assert!(path.exists());

        let res =
            keep_or_remove(&path, Err(std::io::Error::other("disk full")))
                .await;
        assert_eq!(
            res.expect_err("write failed").to_string(),
            "disk full",
        );
        assert!(!path.exists());

        drop(std::fs::remove_dir_all(dir));
    }
}
