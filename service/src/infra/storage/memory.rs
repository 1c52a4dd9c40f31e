//! In-memory [`Storage`], used in tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use common::operations::{By, Delete, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::listing::{photo::FileName, PhotoUrl},
    infra::storage::{self, BaseUrl, Storage, Upload},
};

/// In-memory [`Storage`].
#[derive(Clone, Debug)]
pub struct Memory {
    /// [`BaseUrl`] the stored files are addressed by.
    base_url: BaseUrl,

    /// Stored files.
    files: Arc<Mutex<HashMap<FileName, Vec<u8>>>>,
}

impl Default for Memory {
    fn default() -> Self {
        Self {
            base_url: BaseUrl::new("http://localhost/photos"),
            files: Arc::default(),
        }
    }
}

impl Memory {
    /// Locks the stored files.
    fn files(&self) -> MutexGuard<'_, HashMap<FileName, Vec<u8>>> {
        self.files.lock().expect("poisoned")
    }

    /// Indicates whether a file is stored under the provided [`PhotoUrl`].
    pub fn contains(&self, url: &PhotoUrl) -> bool {
        self.base_url
            .file_name(url)
            .is_some_and(|name| self.files().contains_key(&name))
    }

    /// Returns the number of stored files.
    pub fn len(&self) -> usize {
        self.files().len()
    }
}

impl Storage<Insert<Upload>> for Memory {
    type Ok = PhotoUrl;
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Insert(upload): Insert<Upload>,
    ) -> Result<Self::Ok, Self::Err> {
        let Upload { name, bytes } = upload;
        let mut files = self.files();
        if files.contains_key(&name) {
            return Err(tracerr::new!(storage::Error::AlreadyExists(name)));
        }
        let url = self.base_url.join(&name);
        drop(files.insert(name, bytes));
        PhotoUrl::new(url.clone())
            .ok_or(storage::Error::InvalidUrl(url))
            .map_err(tracerr::wrap!())
    }
}

impl Storage<Delete<FileName>> for Memory {
    type Ok = bool;
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Delete(name): Delete<FileName>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.files().remove(&name).is_some())
    }
}

impl Storage<Select<By<Option<FileName>, PhotoUrl>>> for Memory {
    type Ok = Option<FileName>;
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<FileName>, PhotoUrl>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.base_url.file_name(&by.into_inner()))
    }
}
