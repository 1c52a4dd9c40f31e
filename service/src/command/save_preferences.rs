//! [`Command`] for saving [`Preferences`] of a client.

use common::operations::Insert;
use tracerr::Traced;

use crate::{
    domain::{preferences, Preferences},
    infra::{database, KeyValue},
    Service,
};

use super::Command;

/// [`Command`] for saving [`Preferences`] under a client [`preferences::Key`],
/// replacing the previously saved ones.
#[derive(Clone, Debug)]
pub struct SavePreferences {
    /// [`preferences::Key`] of the client.
    pub key: preferences::Key,

    /// [`Preferences`] to save.
    pub preferences: Preferences,
}

impl<Db, Kv, St> Command<SavePreferences> for Service<Db, Kv, St>
where
    Kv: KeyValue<
        Insert<(preferences::Key, Preferences)>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SavePreferences,
    ) -> Result<Self::Ok, Self::Err> {
        let SavePreferences { key, preferences } = cmd;

        self.kv()
            .execute(Insert((key, preferences)))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

/// Error of [`SavePreferences`] [`Command`] execution.
pub type ExecutionError = database::Error;
