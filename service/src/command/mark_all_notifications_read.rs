//! [`Command`] for marking all [`Notification`]s as read.

use common::{
    operations::{By, Update},
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

/// [`Command`] for marking all [`Notification`]s as read.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkAllNotificationsRead;

impl<Db> Command<MarkAllNotificationsRead> for Service<Db>
where
    Db: Database<
            Update<By<Notification, unit::All>>,
            Ok = u64,
            Err = Traced<database::Error>,
        >,
{
    /// Number of [`Notification`]s marked as read.
    type Ok = u64;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        _: MarkAllNotificationsRead,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        self.database()
            .execute(Update(By::<Notification, _>::new(unit::All)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`MarkAllNotificationsRead`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),
}
