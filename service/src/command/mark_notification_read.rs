//! [`Command`] for marking a [`Notification`] as read.

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{notification, Notification},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for marking a [`Notification`] as read.
#[derive(Clone, Copy, Debug)]
pub struct MarkNotificationRead {
    /// ID of the [`Notification`] to mark as read.
    pub id: notification::Id,
}

impl<Db> Command<MarkNotificationRead> for Service<Db>
where
    Db: Database<
            Select<By<Option<Notification>, notification::Id>>,
            Ok = Option<Notification>,
            Err = Traced<database::Error>,
        > + Database<Update<Notification>, Err = Traced<database::Error>>,
{
    type Ok = Notification;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: MarkNotificationRead,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let MarkNotificationRead { id } = cmd;

        let mut notification = self
            .database()
            .execute(Select(By::<Option<Notification>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NotificationNotExists(id))
            .map_err(tracerr::wrap!())?;
        if notification.is_read {
            return Err(tracerr::new!(E::AlreadyRead(id)));
        }

        notification.is_read = true;
        self.database()
            .execute(Update(notification.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(notification)
    }
}

/// Error of [`MarkNotificationRead`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Notification`] with the provided ID is already read.
    #[display("`Notification(id: {_0})` is already read")]
    AlreadyRead(#[error(not(source))] notification::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Notification`] with the provided ID does not exist.
    #[display("`Notification(id: {_0})` does not exist")]
    NotificationNotExists(#[error(not(source))] notification::Id),
}
