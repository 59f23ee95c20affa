//! [`Command`] for deleting all [`Notification`]s.

use common::{
    operations::{By, Delete},
    unit,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::Notification,
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting all [`Notification`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeleteAllNotifications;

impl<Db> Command<DeleteAllNotifications> for Service<Db>
where
    Db: Database<
            Delete<By<Notification, unit::All>>,
            Ok = u64,
            Err = Traced<database::Error>,
        >,
{
    /// Number of deleted [`Notification`]s.
    type Ok = u64;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        _: DeleteAllNotifications,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        self.database()
            .execute(Delete(By::<Notification, _>::new(unit::All)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`DeleteAllNotifications`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),
}
