//! [`Command`] for deleting a [`Notification`].

use common::operations::{By, Delete, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{notification, Notification},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Notification`].
#[derive(Clone, Copy, Debug)]
pub struct DeleteNotification {
    /// ID of the [`Notification`] to delete.
    pub id: notification::Id,
}

impl<Db> Command<DeleteNotification> for Service<Db>
where
    Db: Database<
            Select<By<Option<Notification>, notification::Id>>,
            Ok = Option<Notification>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Notification, notification::Id>>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteNotification,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteNotification { id } = cmd;

        self.database()
            .execute(Select(By::<Option<Notification>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NotificationNotExists(id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        self.database()
            .execute(Delete(By::<Notification, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(())
    }
}

/// Error of [`DeleteNotification`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Notification`] with the provided ID does not exist.
    #[display("`Notification(id: {_0})` does not exist")]
    NotificationNotExists(#[error(not(source))] notification::Id),
}
